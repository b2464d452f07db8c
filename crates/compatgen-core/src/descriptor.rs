//! Compatibility descriptor consumed by the CI matrix job
//!
//! The descriptor is printed as a single JSON line so that a workflow step can
//! capture it verbatim and feed it to `fromJSON` for a strategy matrix.

use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Which side of the two-chain comparison is pinned to the release version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainSide {
    /// The release under test runs on chain A; chain B iterates over releases
    ChainA,

    /// The release under test runs on chain B; chain A iterates over releases
    ChainB,
}

impl ChainSide {
    /// Stable identifier used on the command line and in the JSON keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChainA => "chain-a",
            Self::ChainB => "chain-b",
        }
    }
}

impl Default for ChainSide {
    fn default() -> Self {
        Self::ChainA
    }
}

impl fmt::Display for ChainSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainSide {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chain-a" => Ok(Self::ChainA),
            "chain-b" => Ok(Self::ChainB),
            other => Err(DescriptorError::UnknownChain(other.to_string())),
        }
    }
}

/// Relayer implementation the e2e suite should run with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayerType {
    /// Hermes (Rust relayer)
    Hermes,

    /// rly (Go relayer)
    Rly,
}

impl RelayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hermes => "hermes",
            Self::Rly => "rly",
        }
    }
}

impl Default for RelayerType {
    fn default() -> Self {
        Self::Hermes
    }
}

impl fmt::Display for RelayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelayerType {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hermes" => Ok(Self::Hermes),
            "rly" => Ok(Self::Rly),
            other => Err(DescriptorError::UnknownRelayer(other.to_string())),
        }
    }
}

/// The JSON document handed to the compatibility workflow
///
/// Field order is the serialization order:
/// `chain-a`, `chain-b`, `entrypoint`, `test`, `relayer-type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityDescriptor {
    /// Versions to run on chain A
    #[serde(rename = "chain-a")]
    pub chain_a: Vec<String>,

    /// Versions to run on chain B
    #[serde(rename = "chain-b")]
    pub chain_b: Vec<String>,

    /// Test suite entry point (always a single element)
    pub entrypoint: Vec<String>,

    /// Test functions to run, in file order
    pub test: Vec<String>,

    /// Relayer to run with (always a single element)
    #[serde(rename = "relayer-type")]
    pub relayer_type: Vec<RelayerType>,
}

impl CompatibilityDescriptor {
    /// Build the descriptor for one compatibility run.
    ///
    /// `release_version` is pinned on `chain` and the other side receives
    /// `compatible_releases` unchanged (no sorting, no dedup).
    pub fn assemble(
        release_version: impl Into<String>,
        compatible_releases: Vec<String>,
        chain: ChainSide,
        suite_name: impl Into<String>,
        test_functions: Vec<String>,
        relayer: RelayerType,
    ) -> Self {
        let pinned = vec![release_version.into()];
        let others = compatible_releases;

        let (chain_a, chain_b) = match chain {
            ChainSide::ChainA => (pinned, others),
            ChainSide::ChainB => (others, pinned),
        };

        Self {
            chain_a,
            chain_b,
            entrypoint: vec![suite_name.into()],
            test: test_functions,
            relayer_type: vec![relayer],
        }
    }

    /// Serialize as compact single-line JSON (no trailing newline)
    pub fn to_json_line(&self) -> Result<String, DescriptorError> {
        serde_json::to_string(self).map_err(|e| DescriptorError::SerializeError(e.to_string()))
    }

    /// Write the JSON line to `writer` and flush it
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), DescriptorError> {
        let line = self.to_json_line()?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| DescriptorError::IoError(e.to_string()))
    }
}

/// Descriptor error types
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Unknown chain '{0}', expected 'chain-a' or 'chain-b'")]
    UnknownChain(String),

    #[error("Unknown relayer '{0}', expected 'hermes' or 'rly'")]
    UnknownRelayer(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("IO error: {0}")]
    IoError(String),
}
