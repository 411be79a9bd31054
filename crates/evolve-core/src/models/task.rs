//! Task model definition and related functionality.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Difficulty, TaskKind, TaskSource, TaskStatus};

/// Reward granted for tasks projected from a plan.
pub const PLAN_TASK_EXP: u32 = 100;

/// Reward granted for tasks the user adds by hand.
pub const USER_TASK_EXP: u32 = 50;

/// A unit of user action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Opaque unique identifier
    pub id: String,

    /// Plan this task was projected from (weak back-link)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub source: TaskSource,

    #[serde(default)]
    pub kind: TaskKind,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub difficulty: Difficulty,

    pub category: String,

    /// Reward value
    pub exp_value: u32,

    pub due_date: Date,

    /// Progress of a counting task; unset for other kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_count: Option<u32>,

    /// Goal of a counting task, at least 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Locked tasks reject status and count changes
    #[serde(default)]
    pub is_locked: bool,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_counting(&self) -> bool {
        self.kind == TaskKind::Counting
    }

    /// Target of a counting task, never below 1.
    pub fn effective_target(&self) -> u32 {
        self.target_count.unwrap_or(1).max(1)
    }

    /// Belongs to the plan with the given id.
    pub fn belongs_to(&self, plan_id: &str) -> bool {
        self.plan_id.as_deref() == Some(plan_id)
    }
}
