//! Releases listing read from disk
//!
//! Accepts a saved copy of the GitHub response, e.g.
//! `curl -s https://api.github.com/repos/cosmos/ibc-go/releases > releases.json`.

use crate::source::{parse_release_tags, FetchError, ReleaseSource};
use std::path::{Path, PathBuf};

/// Release source backed by a local JSON file
#[derive(Debug, Clone)]
pub struct FileReleases {
    path: PathBuf,
}

impl FileReleases {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReleaseSource for FileReleases {
    fn name(&self) -> &'static str {
        "File"
    }

    fn fetch_tags(&self) -> Result<Vec<String>, FetchError> {
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| FetchError::Io(format!("{}: {}", self.path.display(), e)))?;

        parse_release_tags(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_saved_listing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("releases.json");
        std::fs::write(&path, r#"[{"tag_name": "v8.0.0"}, {"tag_name": "v7.4.0"}]"#).unwrap();

        let tags = FileReleases::new(&path).fetch_tags().unwrap();
        assert_eq!(tags, vec!["v8.0.0", "v7.4.0"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FileReleases::new("/nonexistent/releases.json").fetch_tags().unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }
}
