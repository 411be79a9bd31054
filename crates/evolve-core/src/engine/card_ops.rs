//! Card answers for the Engine.

use log::info;

use super::{Engine, TurnOutcome};
use crate::{
    cards::{self, CardAnswer, Resolution, READY_TO_EXECUTE},
    error::{CoachError, Result},
    models::{ChatMessage, Task},
};

/// What answering a card led to.
#[derive(Debug)]
pub enum CardOutcome {
    /// The commitment sentence was sent as a user turn
    Turn(TurnOutcome),
    /// A plan preview was activated
    Activated { plan_id: String, tasks: Vec<Task> },
}

impl Engine {
    /// Answers the card attached to transcript entry `index`.
    ///
    /// Nothing is recorded unless the answer is valid: the card is marked
    /// answered only once resolution (and, for plans, activation) succeeds.
    ///
    /// # Errors
    ///
    /// `CardNotFound`, `CardAlreadyAnswered`, `CardAnswerMismatch`,
    /// `InvalidInput` for values not offered by the card, and the
    /// activation errors of [`Engine::activate_plan`].
    pub async fn resolve_card(&mut self, index: usize, answer: CardAnswer) -> Result<CardOutcome> {
        let card = self
            .store
            .messages()
            .get(index)
            .and_then(|m| m.card.clone())
            .ok_or(CoachError::CardNotFound { index })?;
        if self.store.is_card_answered(index) {
            return Err(CoachError::CardAlreadyAnswered { index });
        }

        match cards::resolve(index, &card, answer)? {
            Resolution::Utterance(sentence) => {
                info!("Answered {} on message {index}", card.kind());
                self.store.mark_card_answered(index);
                let outcome = self.send_user_turn(&sentence).await?;
                Ok(CardOutcome::Turn(outcome))
            }
            Resolution::Activate(plan) => {
                let plan_id = plan.id.clone();
                let tasks = self.apply_activation(plan)?;
                self.store.mark_card_answered(index);
                self.store
                    .append_message(ChatMessage::user(READY_TO_EXECUTE));
                self.after_mutation().await;
                Ok(CardOutcome::Activated { plan_id, tasks })
            }
        }
    }
}
