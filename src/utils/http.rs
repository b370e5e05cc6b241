//! HTTP client for the PaperBLAST CGI endpoints.
//!
//! One GET per tool call, fully awaited before any parsing starts. There is
//! deliberately no retry and no cache: a slow upstream BLAST is often
//! legitimately slow, and retry policy belongs to the caller.

use std::time::Duration;

use crate::config::Config;

/// Errors raised at the retrieval boundary.
///
/// Timeout and HTTP-status conditions are distinguishable so they map to
/// different user-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status
    #[error("HTTP {0} from server")]
    Status(u16),

    /// Connection-level failure
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be read or decoded
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    /// Short, caller-actionable message for tool output.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Timeout => {
                "Error: Request timed out. BLAST searches on long sequences can take >30s. \
                 Try a shorter sequence or an identifier."
                    .to_string()
            }
            FetchError::Status(404) => {
                "Error: Endpoint not found. The PaperBLAST server may be down.".to_string()
            }
            FetchError::Status(500) => {
                "Error: PaperBLAST server error. The query may be malformed or the server \
                 is overloaded."
                    .to_string()
            }
            FetchError::Status(code) => {
                format!("Error: HTTP {} from PaperBLAST server.", code)
            }
            FetchError::Network(msg) => format!("Error: network failure: {}", msg),
            FetchError::Body(msg) => format!("Error: unreadable response: {}", msg),
        }
    }
}

/// Client for the papers.genomics.lbl.gov CGI interface.
#[derive(Debug, Clone)]
pub struct PaperBlastClient {
    client: reqwest::Client,
    base_url: String,
}

impl PaperBlastClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base origin, used for normalizing root-relative links.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Canonical browser URL for a CGI endpoint with the given parameters.
    ///
    /// Built from the same parameters as [`get`](Self::get) so every result
    /// envelope can point a human at the equivalent HTML page.
    pub fn cgi_url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}/cgi-bin/{}?{}", self.base_url, endpoint, query)
    }

    /// GET a CGI endpoint and return the raw HTML body.
    pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = format!("{}/cgi-bin/{}", self.base_url, endpoint);
        tracing::debug!(endpoint, ?params, "fetching CGI page");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> PaperBlastClient {
        let config = Config {
            base_url: base.to_string(),
            ..Config::default()
        };
        PaperBlastClient::new(&config).unwrap()
    }

    #[test]
    fn test_cgi_url_encodes_parameters() {
        let client = client_for("https://papers.genomics.lbl.gov");
        let url = client.cgi_url("litSearch.cgi", &[("query", "acrB E. coli")]);
        assert_eq!(
            url,
            "https://papers.genomics.lbl.gov/cgi-bin/litSearch.cgi?query=acrB%20E.%20coli"
        );
    }

    #[test]
    fn test_status_messages() {
        assert!(FetchError::Status(404).user_message().contains("may be down"));
        assert!(FetchError::Status(500).user_message().contains("overloaded"));
        assert!(FetchError::Status(503).user_message().contains("503"));
        assert!(FetchError::Timeout.user_message().contains("timed out"));
    }

    #[tokio::test]
    async fn test_error_status_is_distinguished() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.get("litSearch.cgi", &[("query", "x")]).await;
        match err {
            Err(FetchError::Status(500)) => {}
            other => panic!("expected Status(500), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_body_roundtrip() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body("<html><h3>ok</h3></html>")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let body = client.get("litSearch.cgi", &[("query", "x")]).await.unwrap();
        assert!(body.contains("<h3>ok</h3>"));
    }
}
