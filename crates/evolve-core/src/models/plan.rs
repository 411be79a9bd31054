//! Plan model definition and related functionality.

use serde::{Deserialize, Serialize};

use super::PlanStatus;
use crate::ids;

/// An accepted (or proposed) multi-phase strategy.
///
/// Plans arrive from the advisory service inside a plan preview card, where
/// the identifier, status and phase index are usually omitted; they default
/// to a fresh id, [`PlanStatus::Drafted`] and the first phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    #[serde(default = "ids::new_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: PlanStatus,

    #[serde(default)]
    pub phases: Vec<PlanPhase>,

    #[serde(default, alias = "currentPhaseIndex")]
    pub current_phase_index: usize,

    /// The user's testable belief behind this plan
    #[serde(default, alias = "goalHypothesis")]
    pub goal_hypothesis: String,
}

/// Ordered group of task templates within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanPhase {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub tasks: Vec<TaskTemplate>,
}

/// Partial task data proposed by the advisory service.
///
/// Labels are kept as free text and interpreted at projection time so that
/// one unexpected value never invalidates the whole card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Kind label, e.g. `single`, `counting`, `sequential`
    #[serde(default, rename = "type", alias = "kind", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, alias = "targetCount", skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}
