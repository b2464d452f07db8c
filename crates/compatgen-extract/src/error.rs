//! Extraction error types

use std::path::PathBuf;

/// Errors raised while reading or scanning a test source file
///
/// Line numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error(
        "index out of bounds: annotation on line {line} is the last line, \
         did not find a function associated with the '{marker}' annotation"
    )]
    AnnotationAtEndOfFile { line: usize, marker: String },

    #[error("no test function found within {lookahead} line(s) after the annotation on line {line}")]
    FunctionNameNotFound { line: usize, lookahead: usize },

    #[error("unable to find test suite in file lines (no line contains '{signature}')")]
    SuiteNotFound { signature: String },

    #[error("unable to extract the suite function name from line {line}: {text}")]
    SuiteNameUnparsable { line: usize, text: String },

    #[error("Invalid lookahead {0}: must be at least 1")]
    InvalidLookahead(usize),

    #[error("Invalid annotation pattern: {0}")]
    InvalidPattern(String),
}
