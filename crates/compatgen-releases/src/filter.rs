//! Compatibility filter over release tags
//!
//! A tag is compatible when it is a stable semantic version at or above the
//! reference. Pre-release and unparsable tags are dropped silently.

use semver::Version;
use std::cmp::Ordering;

/// Substrings that mark a tag as a pre-release (case-sensitive)
pub const PRERELEASE_MARKERS: [&str; 3] = ["beta", "rc", "alpha"];

/// Strip a single leading `v` from a tag
pub fn strip_v(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Why a tag was kept or dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagVerdict {
    /// Stable and `>=` the reference
    Compatible,

    /// Contains a pre-release marker
    PreRelease,

    /// Not a semantic version (e.g. a submodule tag)
    Unparsable,

    /// Valid but older than the reference
    Older,
}

/// Keeps the release tags compatible with a reference version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFilter {
    reference: Version,
}

impl ReleaseFilter {
    /// Parse `reference` (an optional leading `v` is accepted)
    pub fn new(reference: &str) -> Result<Self, FilterError> {
        let reference = Version::parse(strip_v(reference)).map_err(|e| FilterError::InvalidReference {
            version: reference.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { reference })
    }

    pub fn reference(&self) -> &Version {
        &self.reference
    }

    /// Classify a single tag
    pub fn verdict(&self, tag: &str) -> TagVerdict {
        let bare = strip_v(tag);

        if PRERELEASE_MARKERS.iter().any(|marker| bare.contains(marker)) {
            return TagVerdict::PreRelease;
        }

        let Ok(version) = Version::parse(bare) else {
            return TagVerdict::Unparsable;
        };

        match version.cmp_precedence(&self.reference) {
            Ordering::Less => TagVerdict::Older,
            Ordering::Equal | Ordering::Greater => TagVerdict::Compatible,
        }
    }

    /// Return the compatible tags, unmodified and in input order
    pub fn apply<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        tags.iter()
            .map(|tag| tag.as_ref())
            .filter(|tag| {
                let verdict = self.verdict(tag);
                if verdict != TagVerdict::Compatible {
                    tracing::trace!(tag, ?verdict, "skipping release tag");
                }
                verdict == TagVerdict::Compatible
            })
            .map(str::to_string)
            .collect()
    }
}

/// Filter error types
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid reference version '{version}': {message}")]
    InvalidReference { version: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_with_and_without_prefix() {
        assert_eq!(ReleaseFilter::new("v7.3.0").unwrap().reference(), &Version::new(7, 3, 0));
        assert_eq!(ReleaseFilter::new("7.3.0").unwrap().reference(), &Version::new(7, 3, 0));
    }

    #[test]
    fn malformed_reference() {
        for bad in ["", "v", "v7.3", "vv7.3.0", "main"] {
            let err = ReleaseFilter::new(bad).unwrap_err();
            assert!(matches!(err, FilterError::InvalidReference { .. }), "{bad}");
        }
    }

    #[test]
    fn verdicts() {
        let filter = ReleaseFilter::new("v2.3.0").unwrap();

        assert_eq!(filter.verdict("v2.3.0"), TagVerdict::Compatible);
        assert_eq!(filter.verdict("2.4.0"), TagVerdict::Compatible);
        assert_eq!(filter.verdict("v2.2.9"), TagVerdict::Older);
        assert_eq!(filter.verdict("v3.0.0-rc1"), TagVerdict::PreRelease);
        assert_eq!(filter.verdict("v3.0.0-beta.1"), TagVerdict::PreRelease);
        assert_eq!(filter.verdict("v3.0.0-alpha"), TagVerdict::PreRelease);
        assert_eq!(filter.verdict("not-a-version"), TagVerdict::Unparsable);
        assert_eq!(filter.verdict("modules/capability/v1.0.0"), TagVerdict::Unparsable);
    }

    #[test]
    fn marker_check_is_case_sensitive() {
        let filter = ReleaseFilter::new("v1.0.0").unwrap();

        // Not caught by the marker check, but still a semver pre-release
        // that orders above 1.0.0-* and below 2.0.0.
        assert_eq!(filter.verdict("v2.0.0-RC1"), TagVerdict::Compatible);
        assert_eq!(filter.verdict("v1.0.0-RC1"), TagVerdict::Older);
    }

    #[test]
    fn build_metadata_does_not_affect_ordering() {
        let filter = ReleaseFilter::new("v2.3.0+build.7").unwrap();

        assert_eq!(filter.verdict("v2.3.0"), TagVerdict::Compatible);
    }

    #[test]
    fn apply_keeps_order_and_original_tags() {
        let filter = ReleaseFilter::new("v2.3.0").unwrap();
        let tags = ["v2.4.0", "v2.3.0", "v2.2.9", "v3.0.0-rc1", "not-a-version", "2.3.1"];

        assert_eq!(filter.apply(&tags), vec!["v2.4.0", "v2.3.0", "2.3.1"]);
    }
}
