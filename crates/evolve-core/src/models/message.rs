//! Transcript entries.

use serde::{Deserialize, Serialize};

use super::CoachCard;

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One entry of the append-only conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,

    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CoachCard>,

    /// Milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            card: None,
            timestamp: Some(now_millis()),
        }
    }

    pub fn model(text: impl Into<String>, card: Option<CoachCard>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            card,
            timestamp: Some(now_millis()),
        }
    }
}

fn now_millis() -> i64 {
    jiff::Timestamp::now().as_millisecond()
}
