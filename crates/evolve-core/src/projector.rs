//! Projection of an accepted plan into concrete tasks.
//!
//! Only the first phase is projected. Later phases stay as templates on the
//! plan and `current_phase_index` is never advanced here.

use jiff::civil::Date;

use crate::{
    error::{CoachError, Result},
    ids,
    models::{
        Difficulty, Plan, PlanStatus, Task, TaskKind, TaskSource, TaskStatus, TaskTemplate,
        PLAN_TASK_EXP,
    },
};

const DEFAULT_TITLE: &str = "Action item";
const DEFAULT_CATEGORY: &str = "goal";

/// Maps a template's kind label onto the three projected kinds.
///
/// Unrecognized labels, including `recurring`, become `sequential`.
pub fn kind_from_label(label: Option<&str>) -> TaskKind {
    match label.map(|l| l.trim().to_lowercase()) {
        Some(l) if l == "single" || l == "单次" => TaskKind::Single,
        Some(l) if l == "counting" || l == "计数" => TaskKind::Counting,
        _ => TaskKind::Sequential,
    }
}

fn difficulty_from_label(label: Option<&str>) -> Difficulty {
    match label.map(|l| l.trim().to_lowercase()).as_deref() {
        Some("low" | "低") => Difficulty::Low,
        Some("high" | "高") => Difficulty::High,
        _ => Difficulty::Medium,
    }
}

/// Builds the task for the template at position `index` of the first phase.
pub fn project_template(plan_id: &str, template: &TaskTemplate, index: usize, today: Date) -> Task {
    let kind = kind_from_label(template.kind.as_deref());
    let counting = kind == TaskKind::Counting;

    Task {
        id: ids::new_id(),
        plan_id: Some(plan_id.to_string()),
        title: template
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string(),
        description: template.description.clone(),
        source: TaskSource::AiGenerated,
        kind,
        status: TaskStatus::Active,
        difficulty: difficulty_from_label(template.difficulty.as_deref()),
        category: template
            .category
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        exp_value: PLAN_TASK_EXP,
        due_date: today,
        current_count: counting.then_some(0),
        target_count: if counting {
            Some(template.target_count.unwrap_or(1).max(1))
        } else {
            template.target_count
        },
        unit: template.unit.clone(),
        is_locked: kind == TaskKind::Sequential && index > 0,
    }
}

/// Checks that a plan can be activated and synthesizes its first-phase
/// tasks without touching any collection.
///
/// # Errors
///
/// `InvalidPlanState` unless the plan is drafted; `InvalidInput` when it
/// has no phases.
pub fn project_first_phase(plan: &Plan, today: Date) -> Result<Vec<Task>> {
    if plan.status != PlanStatus::Drafted {
        return Err(CoachError::InvalidPlanState {
            id: plan.id.clone(),
            status: plan.status,
        });
    }
    let phase = plan.phases.first().ok_or_else(|| {
        CoachError::invalid_input("phases").with_reason("Plan has no phases to project")
    })?;

    Ok(phase
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, template)| project_template(&plan.id, template, idx, today))
        .collect())
}
