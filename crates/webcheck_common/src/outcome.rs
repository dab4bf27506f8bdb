//! Outcome codes attached to gateway responses.

use serde::{Deserialize, Serialize};

/// Transport-level classification of a gateway response.
///
/// Used only to pick the HTTP status; the body shape is decided separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeCode {
    Ok,
    ClientError,
    NotFound,
    ServerError,
}

impl OutcomeCode {
    /// HTTP status code for this outcome
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::ClientError => 400,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }
}

impl std::fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::ClientError => write!(f, "client-error"),
            Self::NotFound => write!(f, "not-found"),
            Self::ServerError => write!(f, "server-error"),
        }
    }
}
