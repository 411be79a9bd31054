//! Dialogue turn protocol.
//!
//! A turn turns one user utterance into one model reply:
//!
//! 1. [`turn`] counts turns and renders the instruction template with the
//!    lifecycle state and task context.
//! 2. An [`AdvisoryService`] produces raw reply text; [`GeminiClient`] is the
//!    hosted implementation.
//! 3. [`reply`] normalizes the raw text into `{text, card}`.
//! 4. [`gate`] drops cards that arrive out of phase order.
//!
//! The engine drives these steps and owns the transcript.

pub mod gate;
pub mod gemini;
pub mod reply;
pub mod service;
pub mod turn;

pub use gate::PhaseGate;
pub use gemini::GeminiClient;
pub use reply::{normalize_reply, CoachReply, NormalizedReply};
pub use service::{AdvisoryError, AdvisoryRequest, AdvisoryService, OfflineAdvisor};
pub use turn::{render_instruction, tasks_context, turn_count, INSTRUCTION_TEMPLATE};

/// Model reply appended when the advisory service fails.
pub const APOLOGY: &str = "(Thinking interrupted) Sorry, could you say that again?";
