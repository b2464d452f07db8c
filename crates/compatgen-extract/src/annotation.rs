//! `from_version` annotation scanning
//!
//! A test opts into a compatibility run with a comment placed right above its
//! declaration:
//!
//! ```text
//! // from_version: v7.2.0
//! func (s *TransferTestSuite) TestMsgTransfer_Succeeds() {
//! ```
//!
//! Versions are compared as exact strings, not as semver ranges.

use crate::error::ExtractError;
use regex::Regex;
use std::sync::LazyLock;

/// Captures from the last `Test` that is followed by text ending in `()`
static TEST_FUNC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*(Test.*)\(\)").expect("test function pattern is valid"));

/// Collects test functions annotated for a given version
#[derive(Debug, Clone)]
pub struct AnnotationExtractor {
    marker: String,
    annotation: Regex,
    lookahead: usize,
}

impl AnnotationExtractor {
    /// `marker` is the annotation tag (`from_version`); `lookahead` is the
    /// number of lines after the annotation searched for the declaration.
    /// A lookahead of 1 means "the immediately following line".
    pub fn new(marker: &str, lookahead: usize) -> Result<Self, ExtractError> {
        if lookahead == 0 {
            return Err(ExtractError::InvalidLookahead(lookahead));
        }

        let pattern = format!(r"^//\s+{}:\s+(\S+)", regex::escape(marker));
        let annotation = Regex::new(&pattern).map_err(|e| ExtractError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            marker: marker.to_string(),
            annotation,
            lookahead,
        })
    }

    /// Return the names of the test functions annotated with exactly `version`,
    /// in file order.
    pub fn extract(&self, lines: &[String], version: &str) -> Result<Vec<String>, ExtractError> {
        let mut names = Vec::new();

        for (index, raw) in lines.iter().enumerate() {
            let line = raw.trim();

            if !line.starts_with("//") || !line.contains(&self.marker) {
                continue;
            }

            if self.annotated_version(line) != Some(version) {
                continue;
            }

            let name = self.function_after(lines, index)?;
            tracing::debug!(test = %name, annotation_line = index + 1, version, "matched annotation");
            names.push(name);
        }

        Ok(names)
    }

    /// Version declared by an annotation comment, if the line is one
    fn annotated_version<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.annotation
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Search the lookahead window after the annotation at `index`
    fn function_after(&self, lines: &[String], index: usize) -> Result<String, ExtractError> {
        let start = index + 1;
        if start >= lines.len() {
            return Err(ExtractError::AnnotationAtEndOfFile {
                line: index + 1,
                marker: self.marker.clone(),
            });
        }

        let end = (start + self.lookahead).min(lines.len());
        lines[start..end]
            .iter()
            .find_map(|line| function_name(line.trim()))
            .ok_or(ExtractError::FunctionNameNotFound {
                line: index + 1,
                lookahead: self.lookahead,
            })
    }
}

/// Extract the Go test function name from a declaration line
pub fn function_name(line: &str) -> Option<String> {
    TEST_FUNC_NAME
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn extractor() -> AnnotationExtractor {
        AnnotationExtractor::new("from_version", 1).unwrap()
    }

    #[test]
    fn function_name_from_method_declaration() {
        assert_eq!(
            function_name("func (s *TransferTestSuite) TestMsgTransfer_Succeeds() {"),
            Some("TestMsgTransfer_Succeeds".to_string())
        );
        assert_eq!(function_name("func TestFoo()"), Some("TestFoo".to_string()));
        assert_eq!(function_name("func helper(t *testing.T) {"), None);
    }

    #[test]
    fn collects_matching_annotations_in_file_order() {
        let src = lines(
            "// from_version: v7.2.0\n\
             func (s *TransferTestSuite) TestB() {\n\
             }\n\
             \n\
             \t// from_version: v7.2.0\n\
             \tfunc (s *TransferTestSuite) TestA() {\n\
             }\n",
        );

        let names = extractor().extract(&src, "v7.2.0").unwrap();
        assert_eq!(names, vec!["TestB", "TestA"]);
    }

    #[test]
    fn other_versions_never_contribute() {
        let src = lines(
            "// from_version: v7.3.0\n\
             func (s *Suite) TestNewer() {\n\
             // from_version: v7.2.0\n\
             func (s *Suite) TestMatching() {\n\
             // from_version: v7.2.0-rc1\n\
             func (s *Suite) TestRc() {\n",
        );

        let names = extractor().extract(&src, "v7.2.0").unwrap();
        assert_eq!(names, vec!["TestMatching"]);
    }

    #[test]
    fn version_is_not_a_prefix_match() {
        let src = lines("// from_version: v7.10.0\nfunc (s *Suite) TestTen() {\n");

        assert!(extractor().extract(&src, "v7.1").unwrap().is_empty());
    }

    #[test]
    fn non_comment_lines_are_ignored() {
        let src = lines(
            "s.Require().Equal(\"from_version: v7.2.0\", x)\n\
             func (s *Suite) TestNotAnnotated() {\n",
        );

        assert!(extractor().extract(&src, "v7.2.0").unwrap().is_empty());
    }

    #[test]
    fn annotation_on_last_line_is_out_of_bounds() {
        let src = lines("func (s *Suite) TestA() {\n}\n// from_version: v7.2.0\n");

        let err = extractor().extract(&src, "v7.2.0").unwrap_err();
        assert!(matches!(err, ExtractError::AnnotationAtEndOfFile { line: 3, .. }));
    }

    #[test]
    fn next_line_without_test_function_is_fatal() {
        let src = lines("// from_version: v7.2.0\n// a second comment\nfunc (s *Suite) TestA() {\n");

        let err = extractor().extract(&src, "v7.2.0").unwrap_err();
        assert!(matches!(err, ExtractError::FunctionNameNotFound { line: 1, lookahead: 1 }));
    }

    #[test]
    fn wider_lookahead_skips_intervening_lines() {
        let src = lines("// from_version: v7.2.0\n// a second comment\nfunc (s *Suite) TestA() {\n");

        let names = AnnotationExtractor::new("from_version", 3)
            .unwrap()
            .extract(&src, "v7.2.0")
            .unwrap();
        assert_eq!(names, vec!["TestA"]);
    }

    #[test]
    fn zero_lookahead_rejected() {
        assert!(matches!(
            AnnotationExtractor::new("from_version", 0),
            Err(ExtractError::InvalidLookahead(0))
        ));
    }
}
