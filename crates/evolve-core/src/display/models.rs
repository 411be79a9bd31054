//! Display implementations for domain models.
//!
//! Kept apart from the model definitions; every implementation produces
//! markdown.

use std::fmt;

use super::datetime::MessageTime;
use crate::models::{
    ChatMessage, CoachCard, CoachMode, Difficulty, EnergyLevel, LifecycleState, Plan, PlanStatus,
    Role, Task, TaskKind, TaskStatus, TaskTemplate,
};

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    TaskStatus,
    TaskKind,
    Difficulty,
    PlanStatus,
    LifecycleState,
    CoachMode,
    EnergyLevel,
    Role,
);

impl Task {
    /// Progress suffix for counting tasks, e.g. ` 3/10 reps`.
    pub(crate) fn progress(&self) -> String {
        if !self.is_counting() {
            return String::new();
        }
        let unit = self
            .unit
            .as_deref()
            .map(|u| format!(" {u}"))
            .unwrap_or_default();
        format!(
            " {}/{}{unit}",
            self.current_count.unwrap_or(0),
            self.effective_target()
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} {}", self.status.icon(), self.title)?;
        writeln!(f)?;
        writeln!(f, "- ID: `{}`", self.id)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Kind: {}{}", self.kind, self.progress())?;
        writeln!(f, "- Difficulty: {}", self.difficulty)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- EXP: {}", self.exp_value)?;
        writeln!(f, "- Due: {}", self.due_date)?;
        if let Some(plan_id) = &self.plan_id {
            writeln!(f, "- Plan: `{plan_id}`")?;
        }
        if self.is_locked {
            writeln!(f, "- Locked")?;
        }
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        Ok(())
    }
}

fn fmt_template(f: &mut fmt::Formatter<'_>, template: &TaskTemplate) -> fmt::Result {
    let title = template.title.as_deref().unwrap_or("(untitled)");
    let kind = template.kind.as_deref().unwrap_or("sequential");
    write!(f, "- {title} [{kind}")?;
    if let Some(difficulty) = &template.difficulty {
        write!(f, ", {difficulty}")?;
    }
    if let Some(target) = template.target_count {
        write!(f, ", {target}")?;
        if let Some(unit) = &template.unit {
            write!(f, " {unit}")?;
        }
    }
    writeln!(f, "]")
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "- ID: `{}`", self.id)?;
        writeln!(f, "- Status: {}", self.status)?;
        if !self.goal_hypothesis.is_empty() {
            writeln!(f, "- Hypothesis: {}", self.goal_hypothesis)?;
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if self.phases.is_empty() {
            writeln!(f, "\nNo phases in this plan.")?;
            return Ok(());
        }
        for (i, phase) in self.phases.iter().enumerate() {
            let marker = if i == self.current_phase_index {
                " (current)"
            } else {
                ""
            };
            writeln!(f, "\n## Phase {}: {}{marker}", i + 1, phase.name)?;
            writeln!(f)?;
            for template in &phase.tasks {
                fmt_template(f, template)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CoachCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoachCard::Truth(truth) => {
                writeln!(f, "**Truth snapshot**")?;
                writeln!(f)?;
                writeln!(f, "- Energy: {}", truth.energy.join(" | "))?;
                writeln!(f, "- Time budget: {}", truth.time_budget.join(" | "))?;
                if !truth.blockers.is_empty() {
                    writeln!(f, "- Blockers: {}", truth.blockers.join(" | "))?;
                }
                Ok(())
            }
            CoachCard::Choice(choice) => {
                writeln!(f, "**Choose a strategy**")?;
                writeln!(f)?;
                for option in &choice.options {
                    writeln!(
                        f,
                        "- `{}` **{}**: {} ({} days, {} min/day). Tradeoff: {}",
                        option.id,
                        option.title,
                        option.belief,
                        option.timebox_days,
                        option.daily_core_minutes,
                        option.tradeoff
                    )?;
                }
                Ok(())
            }
            CoachCard::PlanPreview(preview) => {
                writeln!(f, "**Plan preview**")?;
                writeln!(f)?;
                write!(f, "{}", preview.plan)
            }
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = match self.role {
            Role::User => "You",
            Role::Model => "Coach",
        };
        match self.timestamp {
            Some(ms) => writeln!(f, "**{who}** _{}_", MessageTime(ms))?,
            None => writeln!(f, "**{who}**")?,
        }
        writeln!(f)?;
        writeln!(f, "{}", self.text)?;
        if let Some(card) = &self.card {
            writeln!(f)?;
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
