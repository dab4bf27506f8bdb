//! HTTP client for webcheckd.
//!
//! Batches are validated one URL at a time, in input order.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::time::Duration;
use webcheck_common::{
    ApiError, CssValidationResult, HtmlValidationResult, VALIDATE_CSS_PATH, VALIDATE_HTML_PATH,
};

/// Default daemon address
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Request timeout; longer than the daemon's own upstream timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// HTML response as delivered by the daemon
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HtmlReport {
    Validated(HtmlValidationResult),
    /// The daemon could not validate the page and sent its generic error
    Failed { url: String, error: String },
}

impl HtmlReport {
    pub fn url(&self) -> &str {
        match self {
            Self::Validated(result) => &result.url,
            Self::Failed { url, .. } => url,
        }
    }
}

/// Client for the webcheckd API
pub struct WebcheckClient {
    base: String,
    http: reqwest::Client,
}

impl WebcheckClient {
    pub fn new(base: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Validate one page's HTML
    pub async fn validate_html(&self, url: &str) -> Result<HtmlReport> {
        let response = self
            .http
            .get(self.endpoint(VALIDATE_HTML_PATH))
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let mut result: HtmlValidationResult = serde_json::from_str(&body)?;
            if result.url.is_empty() {
                result.url = url.to_string();
            }
            return Ok(HtmlReport::Validated(result));
        }

        let error = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| format!("HTTP {}", status));

        Ok(HtmlReport::Failed {
            url: url.to_string(),
            error,
        })
    }

    /// Validate one page's CSS. Non-success statuses still carry a full result.
    pub async fn validate_css(&self, url: &str) -> Result<CssValidationResult> {
        let response = self
            .http
            .get(self.endpoint(VALIDATE_CSS_PATH))
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::BAD_REQUEST {
            let error = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(anyhow!("Daemon rejected {}: {}", url, error));
        }

        let result: CssValidationResult = serde_json::from_str(&body)?;
        Ok(result)
    }

    pub async fn validate_html_batch(&self, urls: &[String]) -> Result<Vec<HtmlReport>> {
        let mut reports = Vec::with_capacity(urls.len());
        for url in urls {
            reports.push(self.validate_html(url).await?);
        }
        Ok(reports)
    }

    pub async fn validate_css_batch(&self, urls: &[String]) -> Result<Vec<CssValidationResult>> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            results.push(self.validate_css(url).await?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<String>>>;

    async fn fake_html(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        let url = params.get("url").cloned().unwrap_or_default();
        seen.lock().unwrap().push(url.clone());

        if url.contains("down") {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to validate URL" })),
            )
                .into_response();
        }
        Json(json!({
            "messages": [
                { "type": "error", "message": "Stray end tag" },
                { "type": "info", "message": "Trailing slash" }
            ]
        }))
        .into_response()
    }

    async fn fake_css(
        State(seen): State<Seen>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        let url = params.get("url").cloned().unwrap_or_default();
        seen.lock().unwrap().push(url.clone());

        if url.contains("down") {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "url": url,
                    "result": { "errorcount": 1, "warningcount": 0 },
                    "errors": [ { "message": "CSS validator returned status 503", "source": url } ],
                    "warnings": []
                })),
            )
                .into_response();
        }
        Json(json!({
            "url": url,
            "result": { "errorcount": 0, "warningcount": 0 },
            "errors": [],
            "warnings": []
        }))
        .into_response()
    }

    async fn spawn_fake_daemon() -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(VALIDATE_HTML_PATH, get(fake_html))
            .route(VALIDATE_CSS_PATH, get(fake_css))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/", addr), seen)
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_html_batch_is_sequential_and_ordered() {
        let (base, seen) = spawn_fake_daemon().await;
        let client = WebcheckClient::new(&base).unwrap();
        let input = urls(&["https://a.test/", "https://a.test/down", "https://a.test/c"]);

        let reports = client.validate_html_batch(&input).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), input);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].url(), "https://a.test/");
        assert!(matches!(&reports[0], HtmlReport::Validated(r) if r.messages.len() == 2));
        assert_eq!(
            reports[1],
            HtmlReport::Failed {
                url: "https://a.test/down".to_string(),
                error: "Failed to validate URL".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_css_not_found_still_yields_result() {
        let (base, _) = spawn_fake_daemon().await;
        let client = WebcheckClient::new(&base).unwrap();

        let results = client
            .validate_css_batch(&urls(&["https://a.test/", "https://a.test/down"]))
            .await
            .unwrap();

        assert!(results[0].is_clean());
        assert_eq!(results[1].summary.error_count, 1);
        assert!(results[1].errors[0].message.contains("503"));
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_requests() {
        let (base, seen) = spawn_fake_daemon().await;
        let client = WebcheckClient::new(&base).unwrap();

        assert!(client.validate_html_batch(&[]).await.unwrap().is_empty());
        assert!(client.validate_css_batch(&[]).await.unwrap().is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = WebcheckClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(
            client.endpoint(VALIDATE_CSS_PATH),
            "http://127.0.0.1:5000/api/validate-css"
        );
    }
}
