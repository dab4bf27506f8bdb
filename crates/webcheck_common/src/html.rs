//! HTML validation results as produced by the Nu validator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Nu validator message type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlMessageKind {
    Error,
    Info,
    NonDocumentError,
}

/// Single Nu validator message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlMessage {
    #[serde(rename = "type")]
    pub kind: HtmlMessageKind,
    #[serde(rename = "subType", default, skip_serializing_if = "Option::is_none")]
    pub sub_kind: Option<String>,
    #[serde(rename = "message", default)]
    pub text: String,
    /// Position and extract fields (lastLine, firstColumn, extract, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HtmlMessage {
    pub fn new(kind: HtmlMessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            sub_kind: None,
            text: text.into(),
            extra: Map::new(),
        }
    }

    pub fn with_sub_kind(mut self, sub_kind: impl Into<String>) -> Self {
        self.sub_kind = Some(sub_kind.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.kind,
            HtmlMessageKind::Error | HtmlMessageKind::NonDocumentError
        )
    }
}

/// HTML validation result for one URL, in upstream message order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlValidationResult {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub messages: Vec<HtmlMessage>,
}

impl HtmlValidationResult {
    pub fn counts(&self) -> MessageCounts {
        count_html_messages(&self.messages)
    }
}

/// Aggregated message counts for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCounts {
    pub errors: usize,
    pub infos: usize,
}

/// Count errors (including non-document errors) and infos
pub fn count_html_messages(messages: &[HtmlMessage]) -> MessageCounts {
    messages
        .iter()
        .fold(MessageCounts::default(), |mut acc, msg| {
            if msg.is_error() {
                acc.errors += 1;
            } else {
                acc.infos += 1;
            }
            acc
        })
}
