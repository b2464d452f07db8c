//! Mock release source for testing
//!
//! Returns predefined tags without touching the network, and can simulate a
//! failed request.
//!
//! ```rust,ignore
//! let source = MockReleases::new(["v8.0.0", "v7.4.0"]);
//! assert_eq!(source.fetch_tags()?, vec!["v8.0.0", "v7.4.0"]);
//! ```

use crate::source::{FetchError, ReleaseSource};
use std::cell::Cell;

/// In-memory release source
#[derive(Debug, Default)]
pub struct MockReleases {
    /// Tags returned by every fetch, in listing order
    tags: Vec<String>,

    /// Error returned instead of the tags
    failure: Option<FetchError>,

    /// Number of fetches performed
    fetches: Cell<usize>,
}

impl MockReleases {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            failure: None,
            fetches: Cell::new(0),
        }
    }

    /// Fail every fetch with `error`
    pub fn with_failure(mut self, error: FetchError) -> Self {
        self.failure = Some(error);
        self
    }

    /// How many times `fetch_tags` was called
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl ReleaseSource for MockReleases {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn fetch_tags(&self) -> Result<Vec<String>, FetchError> {
        self.fetches.set(self.fetches.get() + 1);

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.tags.clone()),
        }
    }
}
