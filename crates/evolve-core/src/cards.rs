//! Card resolution: a user's answer to a card becomes a commitment.
//!
//! Truth and choice answers are rendered into a canonical sentence that
//! re-enters the dialogue as a user turn. Activating a plan preview needs
//! no sentence from the user; the engine records [`READY_TO_EXECUTE`].

use crate::{
    error::{CoachError, Result},
    models::{CardKind, ChoiceSet, CoachCard, Plan, TruthSnapshot},
};

/// User message recorded when a plan preview is activated.
pub const READY_TO_EXECUTE: &str = "I'm ready to execute this plan.";

/// A user's answer to one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAnswer {
    Truth {
        energy: String,
        time_budget: String,
        blockers: Vec<String>,
    },
    Choice {
        option_id: String,
    },
    ActivatePlan,
}

impl CardAnswer {
    /// Card kind this answer is meant for.
    pub fn kind(&self) -> CardKind {
        match self {
            CardAnswer::Truth { .. } => CardKind::Truth,
            CardAnswer::Choice { .. } => CardKind::Choice,
            CardAnswer::ActivatePlan => CardKind::PlanPreview,
        }
    }
}

/// What the engine must do with a resolved answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Send the sentence as the next user turn
    Utterance(String),
    /// Project and activate the plan
    Activate(Plan),
}

/// Resolves `answer` against the card stored on transcript entry `index`.
///
/// # Errors
///
/// `CardAnswerMismatch` when the answer is for another card kind,
/// `InvalidInput` when a value is not among the card's options.
pub fn resolve(index: usize, card: &CoachCard, answer: CardAnswer) -> Result<Resolution> {
    match (card, answer) {
        (
            CoachCard::Truth(truth),
            CardAnswer::Truth {
                energy,
                time_budget,
                blockers,
            },
        ) => resolve_truth(truth, &energy, &time_budget, &blockers).map(Resolution::Utterance),
        (CoachCard::Choice(choice), CardAnswer::Choice { option_id }) => {
            resolve_choice(choice, &option_id).map(Resolution::Utterance)
        }
        (CoachCard::PlanPreview(preview), CardAnswer::ActivatePlan) => {
            Ok(Resolution::Activate(preview.plan.clone()))
        }
        (card, _) => Err(CoachError::CardAnswerMismatch {
            index,
            expected: card.kind(),
        }),
    }
}

/// Finds `value` among `offered`, ignoring case and surrounding space, and
/// returns the offered spelling.
fn pick<'a>(field: &str, offered: &'a [String], value: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoachError::invalid_input(field).with_reason("A selection is required"));
    }
    offered
        .iter()
        .find(|o| o.trim().eq_ignore_ascii_case(value))
        .map(String::as_str)
        .ok_or_else(|| {
            CoachError::invalid_input(field).with_reason(format!(
                "'{value}' is not one of: {}",
                offered.join(", ")
            ))
        })
}

/// Renders the confirmation sentence for a truth snapshot.
///
/// Energy and time budget are required; blockers keep the user's order and
/// duplicates are dropped.
pub fn resolve_truth(
    truth: &TruthSnapshot,
    energy: &str,
    time_budget: &str,
    blockers: &[String],
) -> Result<String> {
    let energy = pick("energy", &truth.energy, energy)?;
    let budget = pick("time_budget", &truth.time_budget, time_budget)?;

    let mut chosen: Vec<&str> = Vec::with_capacity(blockers.len());
    for blocker in blockers {
        let blocker = pick("blockers", &truth.blockers, blocker)?;
        if !chosen.contains(&blocker) {
            chosen.push(blocker);
        }
    }

    Ok(format!(
        "I confirm: energy = {energy}, daily budget = {budget}, primary blockers = [{}].",
        chosen.join(", ")
    ))
}

/// Renders the commitment sentence for the chosen strategy.
pub fn resolve_choice(choice: &ChoiceSet, option_id: &str) -> Result<String> {
    let option = choice.option(option_id.trim()).ok_or_else(|| {
        let ids: Vec<&str> = choice.options.iter().map(|o| o.id.as_str()).collect();
        CoachError::invalid_input("option_id").with_reason(format!(
            "Unknown option '{option_id}', expected one of: {}",
            ids.join(", ")
        ))
    })?;
    Ok(format!(
        "I choose option {}; I believe '{}' and accept the tradeoff '{}'.",
        option.title, option.belief, option.tradeoff
    ))
}
