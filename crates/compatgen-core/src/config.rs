//! Configuration schema (compatgen.toml)

use serde::{Deserialize, Serialize};

/// GitHub releases listing used when no override is configured
pub const DEFAULT_RELEASES_URL: &str = "https://api.github.com/repos/cosmos/ibc-go/releases";

/// Release source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleasesConfig {
    /// Releases listing endpoint (GitHub REST API shape)
    #[serde(default = "default_releases_url")]
    pub url: String,

    /// Name of the environment variable holding an API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// User-Agent header sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_releases_url() -> String {
    DEFAULT_RELEASES_URL.to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_user_agent() -> String {
    concat!("compatgen/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ReleasesConfig {
    fn default() -> Self {
        Self {
            url: default_releases_url(),
            token_env: default_token_env(),
            user_agent: default_user_agent(),
        }
    }
}

impl ReleasesConfig {
    /// Read the API token from the configured environment variable, if set
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

/// Source annotation conventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationsConfig {
    /// Tag used in `// <marker>: <version>` comments
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Parameter signature identifying the suite entry point
    #[serde(default = "default_suite_signature")]
    pub suite_signature: String,

    /// Number of lines after an annotation searched for the test function
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
}

fn default_marker() -> String {
    "from_version".to_string()
}

fn default_suite_signature() -> String {
    "(t *testing.T)".to_string()
}

fn default_lookahead() -> usize {
    1
}

impl Default for AnnotationsConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            suite_signature: default_suite_signature(),
            lookahead: default_lookahead(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Release source settings
    #[serde(default)]
    pub releases: ReleasesConfig,

    /// Annotation conventions
    #[serde(default)]
    pub annotations: AnnotationsConfig,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Reject settings that would make extraction or fetching meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.releases.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("releases.url must not be empty".into()));
        }
        if self.annotations.marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue("annotations.marker must not be empty".into()));
        }
        if self.annotations.suite_signature.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "annotations.suite_signature must not be empty".into(),
            ));
        }
        if self.annotations.lookahead == 0 {
            return Err(ConfigError::InvalidValue("annotations.lookahead must be at least 1".into()));
        }
        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
