//! Annotation extraction from Go e2e test sources
//!
//! This crate handles:
//! - Loading a test source file as an immutable line sequence
//! - Collecting test functions annotated with `// from_version: <version>`
//! - Locating the single test suite entry point (`func TestXxx(t *testing.T)`)
//!
//! Extraction is text based: function names are matched with regular
//! expressions rather than by parsing Go.

pub mod annotation;
pub mod error;
pub mod source;
pub mod suite;

pub use annotation::AnnotationExtractor;
pub use error::ExtractError;
pub use source::SourceFile;
pub use suite::SuiteExtractor;

use compatgen_core::AnnotationsConfig;

/// Everything the descriptor needs from a test source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Suite entry point name
    pub suite_name: String,

    /// Annotated test functions for the requested version, in file order
    pub test_functions: Vec<String>,
}

/// Extract the suite name and the test functions annotated for `version`.
///
/// The suite is located first, so a file without a suite fails even when it
/// carries no matching annotations.
pub fn extract(
    source: &SourceFile,
    version: &str,
    config: &AnnotationsConfig,
) -> Result<Extraction, ExtractError> {
    let suite_name = SuiteExtractor::new(&config.suite_signature).extract(source.lines())?;

    let test_functions = AnnotationExtractor::new(&config.marker, config.lookahead)?
        .extract(source.lines(), version)?;

    Ok(Extraction { suite_name, test_functions })
}
