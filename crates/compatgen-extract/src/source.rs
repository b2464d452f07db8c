//! Test source loading

use crate::error::ExtractError;
use std::path::Path;

/// A test source file held as an immutable sequence of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Raw lines without their terminators
    lines: Vec<String>,
}

impl SourceFile {
    /// Load a source file with a single whole-file read
    pub fn from_file(path: &Path) -> Result<Self, ExtractError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ExtractError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let source = Self::from_text(&contents);

        tracing::debug!(path = %path.display(), lines = source.lines.len(), "loaded test source");
        Ok(source)
    }

    /// Build a source from text already in memory
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
