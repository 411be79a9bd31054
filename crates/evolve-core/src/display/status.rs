//! Status and confirmation message types.

use std::fmt;

use crate::{
    engine::Engine,
    models::{CoachMode, EnergyLevel, LifecycleState, TaskStatus},
};

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}

/// One-screen overview of where the user stands.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub state: LifecycleState,
    pub mode: CoachMode,
    pub energy: EnergyLevel,
    pub turn: usize,
    /// Title, completed and total task counts of the active plan
    pub active_plan: Option<(String, usize, usize)>,
    pub open_tasks: usize,
    pub pending_card: Option<usize>,
}

impl StatusReport {
    pub fn from_engine(engine: &Engine) -> Self {
        let active_plan = engine.active_plan().map(|plan| {
            let tasks = engine.plan_tasks(&plan.id);
            let done = tasks.iter().filter(|t| t.is_completed()).count();
            (plan.title.clone(), done, tasks.len())
        });
        Self {
            state: engine.lifecycle_state(),
            mode: engine.coach_mode(),
            energy: engine.energy(),
            turn: engine.turn_count(),
            active_plan,
            open_tasks: engine
                .tasks()
                .iter()
                .filter(|t| t.status == TaskStatus::Active)
                .count(),
            pending_card: engine.pending_card(),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Status")?;
        writeln!(f)?;
        writeln!(f, "- State: {}", self.state)?;
        writeln!(f, "- Coach mode: {}", self.mode)?;
        writeln!(f, "- Energy: {}", self.energy)?;
        writeln!(f, "- Turn: {}", self.turn)?;
        writeln!(f, "- Open tasks: {}", self.open_tasks)?;
        match &self.active_plan {
            Some((title, done, total)) => writeln!(f, "- Active plan: {title} ({done}/{total})")?,
            None => writeln!(f, "- Active plan: none")?,
        }
        if let Some(index) = self.pending_card {
            writeln!(f, "- Card waiting on message #{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Operation completed".to_string());
        assert!(format!("{success}").contains("Success:"));

        let failure = OperationStatus::failure("Operation failed".to_string());
        assert!(format!("{failure}").contains("Error:"));
    }

    #[test]
    fn test_status_report_display() {
        let report = StatusReport {
            state: LifecycleState::Executing,
            mode: CoachMode::Execute,
            energy: EnergyLevel::Low,
            turn: 7,
            active_plan: Some(("Reading".to_string(), 1, 3)),
            open_tasks: 2,
            pending_card: None,
        };
        let output = report.to_string();
        assert!(output.contains("- State: executing"));
        assert!(output.contains("- Active plan: Reading (1/3)"));
        assert!(!output.contains("Card waiting"));
    }
}
