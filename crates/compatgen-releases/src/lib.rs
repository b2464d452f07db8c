//! Published release discovery and compatibility filtering
//!
//! This crate provides sources for the list of published release tags and a
//! filter that keeps the stable tags at or above a reference version.
//!
//! ## Sources
//!
//! - [`GitHubReleases`] - GitHub REST releases listing (single blocking GET)
//! - [`FileReleases`] - a JSON file with the same shape, for offline runs
//! - [`MockReleases`] - in-memory tags for tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use compatgen_releases::{compatible_releases, GitHubReleases};
//!
//! let source = GitHubReleases::new("https://api.github.com/repos/cosmos/ibc-go/releases");
//! let tags = compatible_releases(&source, "v7.3.0")?;
//! ```

pub mod source;
pub mod github;
pub mod file;
pub mod mock;
pub mod filter;

pub use source::{ReleaseSource, Release, FetchError, parse_release_tags};
pub use github::GitHubReleases;
pub use file::FileReleases;
pub use mock::MockReleases;
pub use filter::{ReleaseFilter, FilterError, TagVerdict, strip_v};

/// Errors from [`compatible_releases`]
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Fetch all tags from `source` and keep the stable ones `>= reference`.
///
/// The reference is parsed before the source is queried, so a malformed
/// reference never costs a network round trip. Output keeps source order.
pub fn compatible_releases(
    source: &dyn ReleaseSource,
    reference: &str,
) -> Result<Vec<String>, ReleaseError> {
    let filter = ReleaseFilter::new(reference)?;

    let tags = source.fetch_tags()?;
    tracing::debug!(source = source.name(), fetched = tags.len(), "fetched release tags");

    let compatible = filter.apply(&tags);
    tracing::debug!(reference, compatible = compatible.len(), "filtered release tags");

    Ok(compatible)
}
