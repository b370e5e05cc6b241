//! Configuration management.
//!
//! The server has intentionally few knobs; all of them can be overridden
//! through environment variables so deployments never need a config file.

use serde::{Deserialize, Serialize};

/// Default CGI host. Override with `PAPERBLAST_BASE_URL` for mirrors or tests.
pub const DEFAULT_BASE_URL: &str = "https://papers.genomics.lbl.gov";

/// BLAST searches can be slow, so the request timeout is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base origin of the PaperBLAST service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: std::env::var("PAPERBLAST_BASE_URL").unwrap_or_else(|_| default_base_url()),
            timeout_secs: std::env::var("PAPERBLAST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    concat!("paperblast-mcp/", env!("CARGO_PKG_VERSION")).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        };
        assert_eq!(config.base_url, "https://papers.genomics.lbl.gov");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.user_agent.starts_with("paperblast-mcp/"));
    }
}
