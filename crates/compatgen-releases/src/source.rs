//! Release source trait for listing published tags

use serde::Deserialize;

/// One entry of a GitHub-style releases listing (subset of fields we care about)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Git tag the release was cut from (e.g. "v7.3.0")
    pub tag_name: String,
}

/// Errors that can occur when listing releases
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Request to {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Trait for anything that can list published release tags
pub trait ReleaseSource {
    /// Get the source name (e.g., "GitHub", "File")
    fn name(&self) -> &'static str;

    /// Return every release tag, in the order the source lists them
    fn fetch_tags(&self) -> Result<Vec<String>, FetchError>;
}

/// Parse a releases listing body into its tag names, keeping order
pub fn parse_release_tags(json: &str) -> Result<Vec<String>, FetchError> {
    let releases: Vec<Release> =
        serde_json::from_str(json).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

    Ok(releases.into_iter().map(|release| release.tag_name).collect())
}
