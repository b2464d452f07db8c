//! GitHub releases listing over HTTPS
//!
//! Issues exactly one blocking GET against the configured endpoint. There is
//! no pagination, retry or caching: the first page of the listing (newest
//! releases first) is what the compatibility matrix is built from.
//!
//! Reference: https://docs.github.com/en/rest/releases/releases#list-releases

use crate::source::{parse_release_tags, FetchError, ReleaseSource};
use compatgen_core::ReleasesConfig;

/// Release source backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    url: String,
    user_agent: String,
    token: Option<String>,
}

impl GitHubReleases {
    /// Create a source for `url` with the default user agent and no token
    pub fn new(url: impl Into<String>) -> Self {
        let defaults = ReleasesConfig::default();
        Self {
            url: url.into(),
            user_agent: defaults.user_agent,
            token: None,
        }
    }

    /// Create a source from the `[releases]` config section, picking up the
    /// token from the configured environment variable
    pub fn from_config(config: &ReleasesConfig) -> Self {
        Self {
            url: config.url.clone(),
            user_agent: config.user_agent.clone(),
            token: config.token(),
        }
    }

    /// Authenticate requests with a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl ReleaseSource for GitHubReleases {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn fetch_tags(&self) -> Result<Vec<String>, FetchError> {
        let mut request = ureq::get(&self.url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", &self.user_agent);

        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        tracing::debug!(url = %self.url, authenticated = self.token.is_some(), "requesting releases");

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::HttpStatus {
                    url: self.url.clone(),
                    status,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(FetchError::Network(transport.to_string()));
            }
        };

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(FetchError::HttpStatus {
                url: self.url.clone(),
                status,
            });
        }

        let body = response
            .into_string()
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        parse_release_tags(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_settings() {
        let source = GitHubReleases::new("https://api.github.com/repos/cosmos/ibc-go/releases")
            .with_user_agent("ci-matrix")
            .with_token("ghp_example");

        assert_eq!(source.url(), "https://api.github.com/repos/cosmos/ibc-go/releases");
        assert_eq!(source.user_agent, "ci-matrix");
        assert!(source.has_token());
        assert_eq!(source.name(), "GitHub");
    }

    #[test]
    fn from_config_without_token_env() {
        let config = ReleasesConfig {
            token_env: "COMPATGEN_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
            ..ReleasesConfig::default()
        };

        let source = GitHubReleases::from_config(&config);
        assert_eq!(source.url(), config.url);
        assert!(!source.has_token());
    }
}
