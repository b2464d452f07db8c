//! compatgen Core
//!
//! Domain model shared by the extractor, the release filter and the CLI.
//! The descriptor keys are consumed by CI workflows - never rename them.

pub mod descriptor;
pub mod config;

pub use descriptor::{ChainSide, RelayerType, CompatibilityDescriptor, DescriptorError};
pub use config::{Config, ReleasesConfig, AnnotationsConfig, ConfigError};
