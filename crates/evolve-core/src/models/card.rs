//! Structured cards attached to model replies.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Plan;

/// A typed payload requesting a specific structured answer from the user.
///
/// Wire shape: `{"type": "truth_card", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum CoachCard {
    #[serde(rename = "truth_card")]
    Truth(TruthSnapshot),

    #[serde(rename = "choice_options_card")]
    Choice(ChoiceSet),

    #[serde(rename = "plan_preview_card")]
    PlanPreview(PlanPreview),
}

impl CoachCard {
    pub fn kind(&self) -> CardKind {
        match self {
            CoachCard::Truth(_) => CardKind::Truth,
            CoachCard::Choice(_) => CardKind::Choice,
            CoachCard::PlanPreview(_) => CardKind::PlanPreview,
        }
    }

    /// Structural checks the serde schema cannot express.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            CoachCard::Truth(truth) => {
                if truth.energy.is_empty() {
                    return Err("truth card offers no energy levels".to_string());
                }
                if truth.time_budget.is_empty() {
                    return Err("truth card offers no time budgets".to_string());
                }
                Ok(())
            }
            CoachCard::Choice(choice) => {
                let count = choice.options.len();
                if !(2..=3).contains(&count) {
                    return Err(format!("choice card must offer 2-3 options, got {count}"));
                }
                for (i, option) in choice.options.iter().enumerate() {
                    if choice.options[..i].iter().any(|o| o.id == option.id) {
                        return Err(format!("duplicate choice option id '{}'", option.id));
                    }
                }
                Ok(())
            }
            CoachCard::PlanPreview(preview) => {
                if preview.plan.phases.is_empty() {
                    return Err("plan preview has no phases".to_string());
                }
                Ok(())
            }
        }
    }
}

/// Discriminator of [`CoachCard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    Truth,
    Choice,
    PlanPreview,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Truth => "truth_card",
            CardKind::Choice => "choice_options_card",
            CardKind::PlanPreview => "plan_preview_card",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for confirming current capacity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TruthSnapshot {
    #[serde(default)]
    pub energy: Vec<String>,

    #[serde(default, alias = "timeBudget")]
    pub time_budget: Vec<String>,

    #[serde(default)]
    pub blockers: Vec<String>,
}

/// Competing strategies to choose from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceSet {
    pub options: Vec<ChoiceOption>,
}

impl ChoiceSet {
    pub fn option(&self, id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub belief: String,
    #[serde(default)]
    pub tradeoff: String,
    #[serde(default)]
    pub timebox_days: u32,
    #[serde(default)]
    pub daily_core_minutes: u32,
}

/// A drafted plan awaiting activation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanPreview {
    pub plan: Plan,
}
