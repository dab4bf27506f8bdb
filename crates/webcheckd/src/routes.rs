//! API routes for webcheckd

use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use webcheck_common::{
    ApiError, HealthResponse, OutcomeCode, ValidateQuery, HEALTH_PATH, VALIDATE_CSS_PATH,
    VALIDATE_HTML_PATH,
};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Validation Routes
// ============================================================================

pub fn validate_routes() -> Router<AppStateArc> {
    Router::new()
        .route(VALIDATE_HTML_PATH, get(validate_html))
        .route(VALIDATE_CSS_PATH, get(validate_css))
}

/// Proxy to the Nu validator. Any failure collapses to one generic error body.
async fn validate_html(
    State(state): State<AppStateArc>,
    Query(query): Query<ValidateQuery>,
) -> Response {
    let Some(url) = query.target() else {
        warn!("HTML validation requested without url");
        return missing_url();
    };

    info!("Validating HTML: {}", url);

    match state.validator.validate_html(url).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            error!("HTML validation error for {}: {}", url, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::html_failure()),
            )
                .into_response()
        }
    }
}

/// Proxy to the CSS validator. Always answers with a full result body.
async fn validate_css(
    State(state): State<AppStateArc>,
    Query(query): Query<ValidateQuery>,
) -> Response {
    let Some(url) = query.target() else {
        warn!("CSS validation requested without url");
        return missing_url();
    };

    info!("Validating CSS: {}", url);

    let (code, result) = state.validator.validate_css(url).await.into_parts();
    (status_for(code), Json(result)).into_response()
}

fn missing_url() -> Response {
    (
        status_for(OutcomeCode::ClientError),
        Json(ApiError::missing_url()),
    )
        .into_response()
}

fn status_for(code: OutcomeCode) -> StatusCode {
    StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

// ============================================================================
// API Fallback
// ============================================================================

/// Unknown /api paths answer with JSON instead of reaching the static fallback
pub fn api_fallback_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api", any(api_not_found))
        .route("/api/", any(api_not_found))
        .route("/api/*rest", any(api_not_found))
}

async fn api_not_found(uri: Uri) -> (StatusCode, Json<ApiError>) {
    warn!("Unknown API endpoint: {}", uri.path());
    (StatusCode::NOT_FOUND, Json(ApiError::not_found(uri.path())))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route(HEALTH_PATH, get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_matches_outcome_codes() {
        for code in [
            OutcomeCode::Ok,
            OutcomeCode::ClientError,
            OutcomeCode::NotFound,
            OutcomeCode::ServerError,
        ] {
            assert_eq!(status_for(code).as_u16(), code.http_status());
        }
    }

    #[test]
    fn test_missing_url_is_client_error() {
        let response = missing_url();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.status().as_u16(),
            OutcomeCode::ClientError.http_status()
        );
    }
}
