//! Turn counting and context assembly.

use crate::models::{ChatMessage, LifecycleState, Task, TaskStatus};

/// Instruction template shipped with the crate.
pub const INSTRUCTION_TEMPLATE: &str = include_str!("../../assets/coach_instruction.md");

pub const TURN_COUNT_PLACEHOLDER: &str = "{{TURN_COUNT}}";
pub const TASKS_CONTEXT_PLACEHOLDER: &str = "{{TASKS_CONTEXT}}";
pub const USER_STATE_PLACEHOLDER: &str = "{{USER_STATE}}";

/// Stands in for an empty task block so absence is never ambiguous.
pub const NONE_PLACEHOLDER: &str = "(none)";

/// One user/model pair is one turn: `⌊len / 2⌋ + 1`.
pub fn turn_count(transcript_len: usize) -> usize {
    transcript_len / 2 + 1
}

/// Turn number for a request sent after `history`.
pub fn turn_for(history: &[ChatMessage]) -> usize {
    turn_count(history.len())
}

/// Serializes active and completed tasks into two labeled blocks.
pub fn tasks_context(tasks: &[Task]) -> String {
    let active: Vec<String> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Active)
        .map(|t| format!("- [ ] {} ({})", t.title, t.difficulty.as_str()))
        .collect();
    let completed: Vec<String> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .map(|t| format!("- [x] {}", t.title))
        .collect();

    let block = |lines: &[String]| {
        if lines.is_empty() {
            NONE_PLACEHOLDER.to_string()
        } else {
            lines.join("\n")
        }
    };

    format!(
        "Current task list:\n[Active tasks]:\n{}\n\n[Completed tasks]:\n{}\n",
        block(&active),
        block(&completed)
    )
}

/// Substitutes state, turn and task context into `template`.
pub fn render_instruction(
    template: &str,
    state: LifecycleState,
    turn: usize,
    tasks: &[Task],
) -> String {
    template
        .replace(USER_STATE_PLACEHOLDER, state.as_str())
        .replace(TURN_COUNT_PLACEHOLDER, &turn.to_string())
        .replace(TASKS_CONTEXT_PLACEHOLDER, &tasks_context(tasks))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{Difficulty, TaskKind, TaskSource};

    fn task(title: &str, status: TaskStatus) -> Task {
        Task {
            id: title.to_string(),
            plan_id: None,
            title: title.to_string(),
            description: None,
            source: TaskSource::UserCreated,
            kind: TaskKind::Single,
            status,
            difficulty: Difficulty::High,
            category: "daily".to_string(),
            exp_value: 50,
            due_date: date(2026, 1, 1),
            current_count: None,
            target_count: None,
            unit: None,
            is_locked: false,
        }
    }

    #[test]
    fn test_turn_count_formula() {
        assert_eq!(turn_count(0), 1);
        assert_eq!(turn_count(1), 1);
        assert_eq!(turn_count(2), 2);
        assert_eq!(turn_count(6), 4);
        assert_eq!(turn_count(7), 4);
    }

    #[test]
    fn test_turn_count_is_monotonic() {
        let counts: Vec<usize> = (0..20).map(turn_count).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_blocks_use_placeholder() {
        let context = tasks_context(&[]);
        assert_eq!(context.matches(NONE_PLACEHOLDER).count(), 2);
        assert!(context.contains("[Active tasks]"));
        assert!(context.contains("[Completed tasks]"));
    }

    #[test]
    fn test_context_lists_tasks_by_status() {
        let tasks = vec![
            task("Run", TaskStatus::Active),
            task("Read", TaskStatus::Completed),
            task("Skip me", TaskStatus::Skipped),
        ];
        let context = tasks_context(&tasks);
        assert!(context.contains("- [ ] Run (high)"));
        assert!(context.contains("- [x] Read"));
        assert!(!context.contains("Skip me"));
        assert!(!context.contains(NONE_PLACEHOLDER));
    }

    #[test]
    fn test_render_substitutes_every_placeholder() {
        let rendered = render_instruction(
            INSTRUCTION_TEMPLATE,
            LifecycleState::Exploring,
            3,
            &[task("Run", TaskStatus::Active)],
        );
        assert!(!rendered.contains(TURN_COUNT_PLACEHOLDER));
        assert!(!rendered.contains(TASKS_CONTEXT_PLACEHOLDER));
        assert!(!rendered.contains(USER_STATE_PLACEHOLDER));
        assert!(rendered.contains("Current turn count: 3"));
        assert!(rendered.contains("Current user state: exploring."));
        assert!(rendered.contains("- [ ] Run (high)"));
    }
}
