//! Collection wrapper types for displaying groups of domain objects.

use std::{collections::BTreeSet, fmt};

use crate::models::{ChatMessage, Plan, PlanStatus, Task};

/// Newtype wrapper for displaying a task list, one line per task.
///
/// # Examples
///
/// ```rust
/// use evolve_core::display::Tasks;
///
/// assert_eq!(Tasks(vec![]).to_string(), "No tasks found.\n");
/// ```
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            write!(
                f,
                "- {} **{}** ({}){}",
                task.status.icon(),
                task.title,
                task.difficulty,
                task.progress()
            )?;
            if task.is_locked {
                write!(f, " [locked]")?;
            }
            writeln!(f, " `{}`", task.id)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying plans as a summary list.
pub struct Plans<'a> {
    pub plans: Vec<Plan>,
    /// Used for per-plan progress
    pub tasks: &'a [Task],
}

impl fmt::Display for Plans<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.plans.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.plans {
            let (done, total) = self
                .tasks
                .iter()
                .filter(|t| t.belongs_to(&plan.id))
                .fold((0, 0), |(done, total), t| {
                    (done + usize::from(t.is_completed()), total + 1)
                });
            let marker = if plan.status == PlanStatus::Active {
                "▶"
            } else {
                "·"
            };
            writeln!(
                f,
                "## {marker} {} ({}, {done}/{total})",
                plan.title, plan.status
            )?;
            writeln!(f)?;
            writeln!(f, "- ID: `{}`", plan.id)?;
            if !plan.goal_hypothesis.is_empty() {
                writeln!(f, "- Hypothesis: {}", plan.goal_hypothesis)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The transcript with message indices, so cards can be answered by index.
pub struct Transcript<'a> {
    pub messages: &'a [ChatMessage],
    /// Index of the first message to show
    pub offset: usize,
    pub answered: &'a BTreeSet<usize>,
}

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.len() <= self.offset {
            return writeln!(f, "No messages yet.");
        }
        for (index, message) in self.messages.iter().enumerate().skip(self.offset) {
            writeln!(f, "---")?;
            write!(f, "`#{index}` {message}")?;
            if message.card.is_some() {
                writeln!(f)?;
                if self.answered.contains(&index) {
                    writeln!(f, "_Answered._")?;
                } else {
                    writeln!(f, "_Answer with `evolve card ... {index}`._")?;
                }
            }
        }
        Ok(())
    }
}
