//! Enumerations shared by tasks, plans and the coaching state machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a task came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
    /// Added by the user from the task view
    #[default]
    UserCreated,

    /// Projected from an accepted plan
    AiGenerated,
}

impl TaskSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSource::UserCreated => "user_created",
            TaskSource::AiGenerated => "ai_generated",
        }
    }
}

/// Completion semantics of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Done once, completed by toggling
    #[default]
    Single,

    /// Repeats; completed by toggling for the current period
    Recurring,

    /// Completed when the count reaches the target
    Counting,

    /// Part of an ordered progression; later entries start locked
    Sequential,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(TaskKind::Single),
            "recurring" => Ok(TaskKind::Recurring),
            "counting" => Ok(TaskKind::Counting),
            "sequential" => Ok(TaskKind::Sequential),
            _ => Err(format!("Invalid task kind: {s}")),
        }
    }
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Single => "single",
            TaskKind::Recurring => "recurring",
            TaskKind::Counting => "counting",
            TaskKind::Sequential => "sequential",
        }
    }
}

/// Type-safe enumeration of task statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Active,
    Completed,
    Overdue,
    Skipped,
    Archived,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TaskStatus::Active),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "overdue" => Ok(TaskStatus::Overdue),
            "skipped" => Ok(TaskStatus::Skipped),
            "archived" => Ok(TaskStatus::Archived),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
            TaskStatus::Skipped => "skipped",
            TaskStatus::Archived => "archived",
        }
    }

    /// Get status with a consistent icon for list display.
    ///
    /// - `✓` completed
    /// - `○` active
    /// - `!` overdue
    /// - `–` skipped or archived
    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓",
            TaskStatus::Active => "○",
            TaskStatus::Overdue => "!",
            TaskStatus::Skipped | TaskStatus::Archived => "–",
        }
    }
}

/// Effort estimate attached to a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "Low")]
    Low,
    #[default]
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Difficulty::Low),
            "medium" => Ok(Difficulty::Medium),
            "high" => Ok(Difficulty::High),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Medium => "medium",
            Difficulty::High => "high",
        }
    }
}

/// Lifecycle of a plan from draft to closure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Proposed inside a plan preview card, not yet accepted
    #[default]
    Drafted,
    Active,
    StageCompleted,
    Reflecting,
    Completed,
    Abandoned,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drafted" => Ok(PlanStatus::Drafted),
            "active" => Ok(PlanStatus::Active),
            "stage_completed" => Ok(PlanStatus::StageCompleted),
            "reflecting" => Ok(PlanStatus::Reflecting),
            "completed" => Ok(PlanStatus::Completed),
            "abandoned" => Ok(PlanStatus::Abandoned),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Drafted => "drafted",
            PlanStatus::Active => "active",
            PlanStatus::StageCompleted => "stage_completed",
            PlanStatus::Reflecting => "reflecting",
            PlanStatus::Completed => "completed",
            PlanStatus::Abandoned => "abandoned",
        }
    }
}

/// Macro state of the user's overall journey.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// No plan and no dialogue progress yet
    #[default]
    Idle,
    Exploring,
    Executing,
    Reflecting,
    Stuck,
    Rebuilding,
}

impl FromStr for LifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "idle" => Ok(LifecycleState::Idle),
            "exploring" => Ok(LifecycleState::Exploring),
            "executing" => Ok(LifecycleState::Executing),
            "reflecting" => Ok(LifecycleState::Reflecting),
            "stuck" => Ok(LifecycleState::Stuck),
            "rebuilding" => Ok(LifecycleState::Rebuilding),
            _ => Err(format!("Invalid lifecycle state: {s}")),
        }
    }
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Exploring => "exploring",
            LifecycleState::Executing => "executing",
            LifecycleState::Reflecting => "reflecting",
            LifecycleState::Stuck => "stuck",
            LifecycleState::Rebuilding => "rebuilding",
        }
    }
}

/// Micro phase of the coaching dialogue, derived from the transcript.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoachMode {
    /// Open exploration until the truth snapshot is confirmed
    #[default]
    Explore,
    /// Truth confirmed, strategy options are due
    Choice,
    /// Strategy chosen, a concrete plan is due
    Plan,
    /// Plan accepted and being executed
    Execute,
}

impl CoachMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoachMode::Explore => "explore",
            CoachMode::Choice => "choice",
            CoachMode::Plan => "plan",
            CoachMode::Execute => "execute",
        }
    }
}

/// Self-reported energy shown next to the task list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(EnergyLevel::High),
            "medium" => Ok(EnergyLevel::Medium),
            "low" => Ok(EnergyLevel::Low),
            _ => Err(format!("Invalid energy level: {s}")),
        }
    }
}

impl EnergyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::High => "high",
            EnergyLevel::Medium => "medium",
            EnergyLevel::Low => "low",
        }
    }

    /// Next level in the high → medium → low → high rotation.
    pub fn next(self) -> Self {
        match self {
            EnergyLevel::High => EnergyLevel::Medium,
            EnergyLevel::Medium => EnergyLevel::Low,
            EnergyLevel::Low => EnergyLevel::High,
        }
    }
}
