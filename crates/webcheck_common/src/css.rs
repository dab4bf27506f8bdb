//! CSS validation results and upstream response normalization.
//!
//! The W3C CSS validator answers with several payload shapes. Every one of
//! them is folded into a [`CssValidationResult`], so callers always get
//! counts to badge and an `errors` list to expand.

use crate::outcome::OutcomeCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Synthetic message when the upstream body is not JSON
pub const INVALID_RESPONSE_FORMAT: &str = "Invalid response format from CSS validator";

/// Synthetic message when the upstream JSON has no validation record
pub const UNEXPECTED_RESPONSE_STRUCTURE: &str = "Unexpected response structure from CSS validator";

/// Synthetic message when a fault carries no description
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Single CSS error or warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssIssue {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub source: String,
    /// Remaining upstream fields (line, context, type, ...), passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CssIssue {
    pub fn new(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: source.into(),
            extra: Map::new(),
        }
    }
}

/// Error and warning totals as reported by the validator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssSummary {
    #[serde(rename = "errorcount", default)]
    pub error_count: u64,
    #[serde(rename = "warningcount", default)]
    pub warning_count: u64,
}

/// Normalized CSS validation result for one URL
///
/// `errors.len()` may be smaller than `summary.error_count` when the
/// validator truncates details; both values are kept as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssValidationResult {
    pub url: String,
    #[serde(rename = "result")]
    pub summary: CssSummary,
    #[serde(default)]
    pub errors: Vec<CssIssue>,
    #[serde(default)]
    pub warnings: Vec<CssIssue>,
}

impl CssValidationResult {
    /// Result carrying one synthetic error that describes a failure
    pub fn synthetic_failure(url: &str, message: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            summary: CssSummary {
                error_count: 1,
                warning_count: 0,
            },
            errors: vec![CssIssue::new(message, url)],
            warnings: Vec::new(),
        }
    }

    /// True when the validator reported neither errors nor warnings
    pub fn is_clean(&self) -> bool {
        self.summary.error_count == 0
            && self.summary.warning_count == 0
            && self.errors.is_empty()
            && self.warnings.is_empty()
    }
}

/// `cssvalidation` record inside the upstream JSON
#[derive(Debug, Deserialize)]
struct UpstreamValidation {
    #[serde(default)]
    result: Option<CssSummary>,
    #[serde(default)]
    errors: Vec<CssIssue>,
    #[serde(default)]
    warnings: Vec<CssIssue>,
}

/// Every way a CSS validation call can end
#[derive(Debug, Clone, PartialEq)]
pub enum CssOutcome {
    /// Upstream answered with a readable validation record
    Validated(CssValidationResult),
    /// Upstream answered with a non-success status
    UpstreamStatus { url: String, status: u16 },
    /// Upstream body was not JSON
    InvalidFormat { url: String },
    /// Upstream JSON had no usable `cssvalidation` record
    UnexpectedStructure { url: String },
    /// The call itself failed (network, timeout, body read)
    Failed { url: String, reason: String },
}

impl CssOutcome {
    pub fn upstream_status(url: &str, status: u16) -> Self {
        Self::UpstreamStatus {
            url: url.to_string(),
            status,
        }
    }

    pub fn failed(url: &str, reason: impl Into<String>) -> Self {
        Self::Failed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Classify a body received with a success status
    pub fn from_body(url: &str, body: &str) -> Self {
        let parsed: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => {
                return Self::InvalidFormat {
                    url: url.to_string(),
                }
            }
        };

        let record = match parsed.get("cssvalidation") {
            Some(record) => record.clone(),
            None => {
                return Self::UnexpectedStructure {
                    url: url.to_string(),
                }
            }
        };

        let validation: UpstreamValidation = match serde_json::from_value(record) {
            Ok(v) => v,
            Err(_) => {
                return Self::UnexpectedStructure {
                    url: url.to_string(),
                }
            }
        };

        // Missing totals fall back to what was actually listed
        let summary = validation.result.unwrap_or(CssSummary {
            error_count: validation.errors.len() as u64,
            warning_count: validation.warnings.len() as u64,
        });

        Self::Validated(CssValidationResult {
            url: url.to_string(),
            summary,
            errors: validation.errors,
            warnings: validation.warnings,
        })
    }

    pub fn code(&self) -> OutcomeCode {
        match self {
            Self::Validated(_) => OutcomeCode::Ok,
            Self::UpstreamStatus { .. } => OutcomeCode::NotFound,
            Self::InvalidFormat { .. }
            | Self::UnexpectedStructure { .. }
            | Self::Failed { .. } => OutcomeCode::ServerError,
        }
    }

    /// Flatten into the public result shape
    pub fn into_result(self) -> CssValidationResult {
        match self {
            Self::Validated(result) => result,
            Self::UpstreamStatus { url, status } => CssValidationResult::synthetic_failure(
                &url,
                format!("CSS validator returned status {}", status),
            ),
            Self::InvalidFormat { url } => {
                CssValidationResult::synthetic_failure(&url, INVALID_RESPONSE_FORMAT)
            }
            Self::UnexpectedStructure { url } => {
                CssValidationResult::synthetic_failure(&url, UNEXPECTED_RESPONSE_STRUCTURE)
            }
            Self::Failed { url, reason } => {
                let message = if reason.trim().is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    reason
                };
                CssValidationResult::synthetic_failure(&url, message)
            }
        }
    }

    pub fn into_parts(self) -> (OutcomeCode, CssValidationResult) {
        let code = self.code();
        (code, self.into_result())
    }
}
