//! Test suite entry point detection

use crate::error::ExtractError;
use regex::Regex;
use std::sync::LazyLock;

/// Captures the function name up to the parameter list in `func Name(`
static FUNC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"func\s+(.*)\(").expect("suite function pattern is valid"));

/// Finds the suite entry point: the function taking the test context parameter
pub struct SuiteExtractor<'a> {
    signature: &'a str,
}

impl<'a> SuiteExtractor<'a> {
    /// `signature` is the parameter list that identifies the entry point,
    /// e.g. `(t *testing.T)`
    pub fn new(signature: &'a str) -> Self {
        Self { signature }
    }

    /// Return the name of the first function whose declaration carries the
    /// signature. One suite per file is assumed and not checked further.
    pub fn extract(&self, lines: &[String]) -> Result<String, ExtractError> {
        let (index, line) = lines
            .iter()
            .map(|line| line.trim())
            .enumerate()
            .find(|(_, line)| line.contains(self.signature))
            .ok_or_else(|| ExtractError::SuiteNotFound {
                signature: self.signature.to_string(),
            })?;

        let name = FUNC_NAME
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ExtractError::SuiteNameUnparsable {
                line: index + 1,
                text: line.to_string(),
            })?;

        tracing::debug!(suite = %name, line = index + 1, "found test suite entry point");
        Ok(name)
    }
}
