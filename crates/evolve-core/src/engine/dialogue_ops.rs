//! Dialogue turns for the Engine.

use log::{debug, error, warn};

use super::Engine;
use crate::{
    dialogue::{
        normalize_reply, render_instruction, turn::turn_for, AdvisoryRequest, PhaseGate, APOLOGY,
        INSTRUCTION_TEMPLATE,
    },
    error::{CoachError, Result},
    models::{CardKind, ChatMessage},
};

/// Result of one dialogue turn.
#[derive(Debug)]
pub struct TurnOutcome {
    /// Transcript index of the model reply
    pub index: usize,
    pub message: ChatMessage,
    /// `ServiceUnavailable` or `MalformedServiceReply` when the reply was
    /// degraded; the turn itself still succeeded
    pub recovered: Option<CoachError>,
    /// Card dropped by the phase gate
    pub rejected_card: Option<CardKind>,
}

impl Engine {
    /// Sends one user utterance and appends the model reply.
    ///
    /// Service failures and malformed replies never fail the turn: the user
    /// message stays in the transcript and a degraded reply is appended.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for blank text, without touching the transcript.
    pub async fn send_user_turn(&mut self, text: &str) -> Result<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoachError::invalid_input("text").with_reason("Message cannot be empty"));
        }

        let history = self.store.messages().to_vec();
        let turn = turn_for(&history);
        let state = self.store.lifecycle_state();
        let request = AdvisoryRequest {
            system_instruction: render_instruction(
                INSTRUCTION_TEMPLATE,
                state,
                turn,
                self.store.tasks(),
            ),
            history,
            user_input: text.to_string(),
        };
        self.store.append_message(ChatMessage::user(text));
        debug!("Sending turn {turn} in state {}", state.as_str());

        let (message, recovered, rejected_card) = match self.advisor.generate(request).await {
            Ok(raw) => {
                let normalized = normalize_reply(&raw);
                let mut reply = normalized.reply;
                let mut rejected_card = None;

                if let Some(kind) = reply.card.as_ref().map(|c| c.kind()) {
                    if self.config.enforce_phase_gate {
                        let gate = PhaseGate::new(state, turn, self.coach_mode());
                        if let Err(reason) = gate.admit(kind) {
                            warn!("Dropping card: {reason}");
                            reply.card = None;
                            rejected_card = Some(kind);
                        }
                    }
                }
                (
                    ChatMessage::model(reply.text, reply.card),
                    normalized.malformed,
                    rejected_card,
                )
            }
            Err(e) => {
                error!("Advisory service failed on turn {turn}: {e}");
                let recovered = CoachError::ServiceUnavailable {
                    message: e.to_string(),
                };
                (ChatMessage::model(APOLOGY, None), Some(recovered), None)
            }
        };

        let index = self.store.append_message(message.clone());
        self.persist().await;

        Ok(TurnOutcome {
            index,
            message,
            recovered,
            rejected_card,
        })
    }
}
