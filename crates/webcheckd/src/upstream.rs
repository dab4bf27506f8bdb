//! Upstream Client - Calls the W3C HTML and CSS validators
//!
//! One outbound request per validation. The HTML path reports failures as
//! [`UpstreamError`]; the CSS path folds every failure into a [`CssOutcome`].

use crate::config::UpstreamConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};
use webcheck_common::CssOutcome;

/// Upstream call errors
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Validator API returned {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for both validator services
pub struct ValidatorClient {
    http: reqwest::Client,
    html_url: String,
    css_url: String,
}

impl ValidatorClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            html_url: config.html_validator_url.clone(),
            css_url: config.css_validator_url.clone(),
        })
    }

    /// Validate a page with the Nu validator, returning its JSON unchanged
    pub async fn validate_html(&self, url: &str) -> Result<Value, UpstreamError> {
        debug!("Requesting HTML validation for {}", url);

        let response = self
            .http
            .get(&self.html_url)
            .query(&[("doc", url), ("out", "json")])
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let data: Value =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Parse(e.to_string()))?;

        info!("HTML validation complete for {}", url);
        Ok(data)
    }

    /// Validate a page's stylesheets with the CSS validator
    pub async fn validate_css(&self, url: &str) -> CssOutcome {
        debug!("Requesting CSS validation for {}", url);

        let response = match self
            .http
            .get(&self.css_url)
            .query(&[("uri", url), ("output", "json")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("CSS validator unreachable for {}: {}", url, e);
                return CssOutcome::failed(url, e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("CSS validator returned {} for {}", status, url);
            return CssOutcome::upstream_status(url, status.as_u16());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read CSS validator response for {}: {}", url, e);
                return CssOutcome::failed(url, e.to_string());
            }
        };

        let outcome = CssOutcome::from_body(url, &body);
        info!("CSS validation for {}: {}", url, outcome.code());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UpstreamError::Status(503).to_string(),
            "Validator API returned 503"
        );
        assert_eq!(
            UpstreamError::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
    }

    #[test]
    fn test_client_builds_from_defaults() {
        let client = ValidatorClient::new(&UpstreamConfig::default()).unwrap();
        assert_eq!(client.html_url, "https://validator.w3.org/nu/");
        assert_eq!(
            client.css_url,
            "https://jigsaw.w3.org/css-validator/validator"
        );
    }

    #[tokio::test]
    async fn test_unreachable_css_validator_is_server_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = UpstreamConfig {
            css_validator_url: format!("http://{}/css", addr),
            ..UpstreamConfig::default()
        };
        let client = ValidatorClient::new(&config).unwrap();

        let (code, result) = client.validate_css("https://a.test/").await.into_parts();
        assert_eq!(code, webcheck_common::OutcomeCode::ServerError);
        assert_eq!(result.errors.len(), 1);
        assert!(!result.errors[0].message.is_empty());
        assert_eq!(result.errors[0].source, "https://a.test/");
    }
}
