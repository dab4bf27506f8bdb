//! HTTP surface shared by webcheckd and webcheckctl.

use serde::{Deserialize, Serialize};

pub const VALIDATE_HTML_PATH: &str = "/api/validate-html";
pub const VALIDATE_CSS_PATH: &str = "/api/validate-css";
pub const HEALTH_PATH: &str = "/health";

/// Default daemon port
pub const DEFAULT_PORT: u16 = 5000;

pub const MISSING_URL_MESSAGE: &str = "Missing URL parameter";
pub const HTML_FAILURE_MESSAGE: &str = "Failed to validate URL";
pub const API_NOT_FOUND_MESSAGE: &str = "API endpoint not found";

/// Query string accepted by both validate endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateQuery {
    pub url: Option<String>,
}

impl ValidateQuery {
    /// Target URL, or None when absent or blank
    pub fn target(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Error body for requests that produce no result shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiError {
    pub fn missing_url() -> Self {
        Self {
            error: MISSING_URL_MESSAGE.to_string(),
            path: None,
        }
    }

    pub fn html_failure() -> Self {
        Self {
            error: HTML_FAILURE_MESSAGE.to_string(),
            path: None,
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self {
            error: API_NOT_FOUND_MESSAGE.to_string(),
            path: Some(path.to_string()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_rejects_blank() {
        assert_eq!(ValidateQuery { url: None }.target(), None);
        assert_eq!(ValidateQuery { url: Some(String::new()) }.target(), None);
        assert_eq!(ValidateQuery { url: Some("   ".into()) }.target(), None);
        assert_eq!(
            ValidateQuery { url: Some(" https://a.test/ ".into()) }.target(),
            Some("https://a.test/")
        );
    }

    #[test]
    fn test_missing_url_body_has_no_path() {
        let json = serde_json::to_string(&ApiError::missing_url()).unwrap();
        assert_eq!(json, r#"{"error":"Missing URL parameter"}"#);
    }

    #[test]
    fn test_not_found_body_carries_path() {
        let value = serde_json::to_value(ApiError::not_found("/api/nope")).unwrap();
        assert_eq!(value["error"], "API endpoint not found");
        assert_eq!(value["path"], "/api/nope");
    }
}
