//! Normalization of raw advisory replies into `{text, card}`.
//!
//! Normalization never fails. Content that is not a JSON object becomes a
//! text-only reply carrying the raw content; a card that does not match the
//! schema is dropped while the text is kept. Either case is reported as a
//! `MalformedServiceReply` alongside the reply.

use log::warn;
use serde_json::Value;

use crate::{error::CoachError, models::CoachCard};

/// Text used when the reply object has no usable `text` field.
pub const EMPTY_TEXT: &str = "...";

/// A reply in the engine's internal shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachReply {
    pub text: String,
    pub card: Option<CoachCard>,
}

/// Result of [`normalize_reply`].
#[derive(Debug)]
pub struct NormalizedReply {
    pub reply: CoachReply,
    /// Set when part or all of the reply had to be discarded
    pub malformed: Option<CoachError>,
}

impl NormalizedReply {
    fn clean(reply: CoachReply) -> Self {
        Self {
            reply,
            malformed: None,
        }
    }

    fn degraded(reply: CoachReply, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!("Degrading advisory reply: {reason}");
        Self {
            reply,
            malformed: Some(CoachError::MalformedServiceReply { reason }),
        }
    }
}

/// Removes a surrounding Markdown code fence, if any.
fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses a raw advisory reply.
pub fn normalize_reply(raw: &str) -> NormalizedReply {
    let text_only = || CoachReply {
        text: raw.to_string(),
        card: None,
    };

    let value: Value = match serde_json::from_str(strip_fence(raw)) {
        Ok(value) => value,
        Err(e) => return NormalizedReply::degraded(text_only(), format!("not JSON: {e}")),
    };
    let Value::Object(mut object) = value else {
        return NormalizedReply::degraded(text_only(), "reply is not a JSON object");
    };

    let text = match object.remove("text") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => EMPTY_TEXT.to_string(),
    };

    let card_value = match object.remove("card") {
        None | Some(Value::Null) => return NormalizedReply::clean(CoachReply { text, card: None }),
        Some(card) => card,
    };

    let card = match serde_json::from_value::<CoachCard>(card_value) {
        Ok(card) => card,
        Err(e) => {
            return NormalizedReply::degraded(
                CoachReply { text, card: None },
                format!("card does not match schema: {e}"),
            )
        }
    };
    if let Err(reason) = card.validate() {
        return NormalizedReply::degraded(CoachReply { text, card: None }, reason);
    }

    NormalizedReply::clean(CoachReply {
        text,
        card: Some(card),
    })
}
