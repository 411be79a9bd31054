//! Tests for the engine module.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tempfile::TempDir;

use super::*;
use crate::{
    cards::{CardAnswer, READY_TO_EXECUTE},
    dialogue::{AdvisoryError, AdvisoryRequest, APOLOGY},
    models::{CardKind, PlanStatus, Role, TaskKind, TaskStatus},
    params::{AddTask, EditTask, ListTasks},
};

/// Advisory service replaying canned replies and recording requests.
#[derive(Clone, Default)]
struct ScriptedAdvisor {
    replies: Arc<Mutex<VecDeque<std::result::Result<String, u16>>>>,
    requests: Arc<Mutex<Vec<AdvisoryRequest>>>,
}

impl ScriptedAdvisor {
    fn reply(&self, raw: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(raw.to_string()));
        self
    }

    fn fail(&self, status: u16) -> &Self {
        self.replies.lock().unwrap().push_back(Err(status));
        self
    }

    fn last_request(&self) -> AdvisoryRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl AdvisoryService for ScriptedAdvisor {
    async fn generate(
        &self,
        request: AdvisoryRequest,
    ) -> std::result::Result<String, AdvisoryError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(raw)) => Ok(raw),
            Some(Err(status)) => Err(AdvisoryError::Api {
                status,
                message: "scripted failure".to_string(),
            }),
            None => Ok(r#"{"text": "Tell me more."}"#.to_string()),
        }
    }
}

async fn create_test_engine() -> (TempDir, Engine, ScriptedAdvisor) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let advisor = ScriptedAdvisor::default();
    let engine = EngineBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_advisor(advisor.clone())
        .build()
        .await
        .expect("Failed to create engine");
    (temp_dir, engine, advisor)
}

async fn reopen(temp_dir: &TempDir) -> Engine {
    EngineBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_advisor(ScriptedAdvisor::default())
        .build()
        .await
        .expect("Failed to reopen engine")
}

const TRUTH_REPLY: &str = r#"{"text": "Let's capture where you are.", "card": {"type": "truth_card", "data": {
    "energy": ["Drained", "Okay", "Energized"],
    "time_budget": ["5 min", "15 min", "45 min"],
    "blockers": ["Phone", "Perfectionism"]
}}}"#;

const CHOICE_REPLY: &str = r#"{"text": "Here are your options.", "card": {"type": "choice_options_card", "data": {"options": [
    {"id": "opt_easy", "title": "Minimal start", "belief": "Done beats perfect", "tradeoff": "Slow progress", "timebox_days": 7, "daily_core_minutes": 5},
    {"id": "opt_hard", "title": "Sprint", "belief": "Momentum matters", "tradeoff": "Risk of burnout", "timebox_days": 14, "daily_core_minutes": 45}
]}}}"#;

fn plan_reply(kind: &str) -> String {
    format!(
        r#"{{"text": "Here is the plan.", "card": {{"type": "plan_preview_card", "data": {{"plan": {{
            "title": "Reading habit",
            "description": "Read every day",
            "goalHypothesis": "Tiny daily steps stick",
            "phases": [
                {{"name": "Week 1", "tasks": [
                    {{"title": "Read 5 pages", "type": "{kind}", "difficulty": "low", "category": "reading"}},
                    {{"title": "Read 10 pages", "type": "{kind}", "difficulty": "medium", "category": "reading"}},
                    {{"title": "Read a chapter", "type": "{kind}", "difficulty": "high", "category": "reading"}}
                ]}},
                {{"name": "Week 2", "tasks": [{{"title": "Finish the book", "type": "single"}}]}}
            ]
        }}}}}}}}"#
    )
}

/// Exploration turns that bring the next request to turn 4.
async fn explore(engine: &mut Engine) {
    for text in ["I want to read more", "I keep scrolling my phone", "Evenings"] {
        engine.send_user_turn(text).await.unwrap();
    }
}

/// Runs the whole workshop up to an activated plan of `kind` tasks.
async fn activated_engine(kind: &str) -> (TempDir, Engine, ScriptedAdvisor, Vec<Task>) {
    let (temp_dir, mut engine, advisor) = create_test_engine().await;
    explore(&mut engine).await;

    advisor.reply(TRUTH_REPLY);
    let truth = engine.send_user_turn("About 15 minutes").await.unwrap();
    advisor.reply(CHOICE_REPLY);
    let CardOutcome::Turn(choice) = engine
        .resolve_card(
            truth.index,
            CardAnswer::Truth {
                energy: "Okay".into(),
                time_budget: "15 min".into(),
                blockers: vec!["Phone".into()],
            },
        )
        .await
        .unwrap()
    else {
        panic!("truth answer should send a turn");
    };
    advisor.reply(&plan_reply(kind));
    let CardOutcome::Turn(plan) = engine
        .resolve_card(
            choice.index,
            CardAnswer::Choice {
                option_id: "opt_easy".into(),
            },
        )
        .await
        .unwrap()
    else {
        panic!("choice answer should send a turn");
    };
    let CardOutcome::Activated { tasks, .. } = engine
        .resolve_card(plan.index, CardAnswer::ActivatePlan)
        .await
        .unwrap()
    else {
        panic!("plan answer should activate");
    };
    (temp_dir, engine, advisor, tasks)
}

#[tokio::test]
async fn test_fresh_engine_greets() {
    let (_temp_dir, engine, _advisor) = create_test_engine().await;

    assert_eq!(engine.lifecycle_state(), LifecycleState::Idle);
    assert_eq!(engine.transcript().len(), 1);
    assert_eq!(engine.transcript()[0].role, Role::Model);
    assert!(engine.transcript()[0].text.contains("Evolve"));
    assert_eq!(engine.turn_count(), 1);
    assert_eq!(engine.initial_view(), InitialView::Dialogue);
    assert_eq!(engine.energy(), EnergyLevel::Medium);
}

#[tokio::test]
async fn test_user_turn_request_keeps_state() {
    let (_temp_dir, mut engine, advisor) = create_test_engine().await;
    engine.add_task(&AddTask::titled("Drink water")).await.unwrap();

    let outcome = engine.send_user_turn("  I want to read more  ").await.unwrap();

    assert_eq!(engine.lifecycle_state(), LifecycleState::Idle);
    assert_eq!(outcome.message.text, "Tell me more.");
    assert!(outcome.recovered.is_none());
    assert_eq!(outcome.index, 2);

    let request = advisor.last_request();
    assert_eq!(request.user_input, "I want to read more");
    assert_eq!(request.history.len(), 1);
    assert!(request.system_instruction.contains("Current turn count: 1"));
    assert!(request.system_instruction.contains("Current user state: idle."));
    assert!(request.system_instruction.contains("- [ ] Drink water (medium)"));

    let roles: Vec<Role> = engine.transcript().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::Model, Role::User, Role::Model]);
}

#[tokio::test]
async fn test_dialogue_without_plan_reopens_in_dialogue() {
    let (temp_dir, mut engine, _advisor) = create_test_engine().await;
    engine.send_user_turn("I keep procrastinating").await.unwrap();
    engine.send_user_turn("Mostly in the evenings").await.unwrap();
    drop(engine);

    let reopened = reopen(&temp_dir).await;
    assert_eq!(reopened.lifecycle_state(), LifecycleState::Idle);
    assert_eq!(reopened.transcript().len(), 5);
    assert_eq!(reopened.initial_view(), InitialView::Dialogue);
}

#[tokio::test]
async fn test_blank_input_is_rejected() {
    let (_temp_dir, mut engine, advisor) = create_test_engine().await;
    let err = engine.send_user_turn("   ").await.unwrap_err();
    assert!(matches!(err, CoachError::InvalidInput { .. }));
    assert_eq!(engine.transcript().len(), 1);
    assert_eq!(engine.lifecycle_state(), LifecycleState::Idle);
    assert!(advisor.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_service_failure_appends_apology() {
    let (_temp_dir, mut engine, advisor) = create_test_engine().await;
    advisor.fail(503);

    let outcome = engine.send_user_turn("Hello").await.unwrap();

    assert_eq!(outcome.message.text, APOLOGY);
    assert!(matches!(
        outcome.recovered,
        Some(CoachError::ServiceUnavailable { .. })
    ));
    let transcript = engine.transcript();
    assert_eq!(transcript[1].text, "Hello");
    assert_eq!(transcript[2].text, APOLOGY);
}

#[tokio::test]
async fn test_non_json_reply_degrades_to_text() {
    let (_temp_dir, mut engine, advisor) = create_test_engine().await;
    advisor.reply("plain words, no JSON");

    let outcome = engine.send_user_turn("Hello").await.unwrap();

    assert_eq!(outcome.message.text, "plain words, no JSON");
    assert!(outcome.message.card.is_none());
    assert!(matches!(
        outcome.recovered,
        Some(CoachError::MalformedServiceReply { .. })
    ));
}

#[tokio::test]
async fn test_phase_gate_drops_early_card() {
    let (_temp_dir, mut engine, advisor) = create_test_engine().await;
    advisor.reply(TRUTH_REPLY);

    let outcome = engine.send_user_turn("Hello").await.unwrap();

    assert_eq!(outcome.rejected_card, Some(CardKind::Truth));
    assert!(outcome.message.card.is_none());
    assert_eq!(outcome.message.text, "Let's capture where you are.");
}

#[tokio::test]
async fn test_phase_gate_can_be_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let advisor = ScriptedAdvisor::default();
    advisor.reply(TRUTH_REPLY);
    let mut engine = EngineBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_advisor(advisor.clone())
        .with_config(EngineConfig {
            enforce_phase_gate: false,
        })
        .build()
        .await
        .unwrap();

    let outcome = engine.send_user_turn("Hello").await.unwrap();
    assert!(outcome.rejected_card.is_none());
    assert!(outcome.message.card.is_some());
    assert_eq!(engine.pending_card(), Some(outcome.index));
}

#[tokio::test]
async fn test_full_workshop_activates_plan() {
    let (_temp_dir, engine, advisor, tasks) = activated_engine("sequential").await;

    let locks: Vec<bool> = tasks.iter().map(|t| t.is_locked).collect();
    assert_eq!(locks, vec![false, true, true]);
    assert_eq!(engine.lifecycle_state(), LifecycleState::Executing);
    assert_eq!(engine.coach_mode(), CoachMode::Execute);
    assert_eq!(engine.pending_card(), None);

    let plan = engine.active_plan().unwrap();
    assert_eq!(plan.status, PlanStatus::Active);
    assert_eq!(plan.current_phase_index, 0);
    assert_eq!(engine.plan_tasks(&plan.id).len(), 3);

    let last = engine.transcript().last().unwrap();
    assert_eq!(last.role, Role::User);
    assert_eq!(last.text, READY_TO_EXECUTE);

    // Truth and choice answers went to the service as user turns.
    let inputs: Vec<String> = advisor
        .requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.user_input.clone())
        .collect();
    assert_eq!(inputs.len(), 6);
    assert!(inputs[4].starts_with("I confirm: energy = Okay, daily budget = 15 min"));
    assert!(inputs[5].starts_with("I choose option Minimal start"));
}

#[tokio::test]
async fn test_locked_task_rejects_toggle() {
    let (_temp_dir, mut engine, _advisor, tasks) = activated_engine("sequential").await;

    let err = engine.toggle_task(&tasks[1].id).await.unwrap_err();
    assert!(matches!(err, CoachError::LockedTask { .. }));
    assert_eq!(engine.store().task(&tasks[1].id).unwrap().status, TaskStatus::Active);
}

#[tokio::test]
async fn test_completing_plan_moves_to_reflecting() {
    let (temp_dir, mut engine, _advisor, tasks) = activated_engine("single").await;
    assert!(tasks.iter().all(|t| !t.is_locked));

    for task in &tasks[..2] {
        engine.toggle_task(&task.id).await.unwrap();
    }
    assert_eq!(engine.lifecycle_state(), LifecycleState::Executing);

    engine.toggle_task(&tasks[2].id).await.unwrap();
    assert_eq!(engine.lifecycle_state(), LifecycleState::Reflecting);

    // Un-completing a task does not leave reflecting.
    engine.toggle_task(&tasks[2].id).await.unwrap();
    assert_eq!(engine.lifecycle_state(), LifecycleState::Reflecting);

    let reopened = reopen(&temp_dir).await;
    assert_eq!(reopened.lifecycle_state(), LifecycleState::Reflecting);
    assert_eq!(reopened.initial_view(), InitialView::Tasks);
}

#[tokio::test]
async fn test_card_errors() {
    let (_temp_dir, mut engine, advisor) = create_test_engine().await;

    let err = engine.resolve_card(0, CardAnswer::ActivatePlan).await.unwrap_err();
    assert!(matches!(err, CoachError::CardNotFound { index: 0 }));
    let err = engine.resolve_card(99, CardAnswer::ActivatePlan).await.unwrap_err();
    assert!(matches!(err, CoachError::CardNotFound { index: 99 }));

    explore(&mut engine).await;
    advisor.reply(TRUTH_REPLY);
    let truth = engine.send_user_turn("15 minutes a day").await.unwrap();

    let err = engine
        .resolve_card(
            truth.index,
            CardAnswer::Choice {
                option_id: "x".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoachError::CardAnswerMismatch {
            expected: CardKind::Truth,
            ..
        }
    ));

    let answer = CardAnswer::Truth {
        energy: "Energized".into(),
        time_budget: "45 min".into(),
        blockers: vec![],
    };
    engine.resolve_card(truth.index, answer.clone()).await.unwrap();
    let err = engine.resolve_card(truth.index, answer).await.unwrap_err();
    assert!(matches!(err, CoachError::CardAlreadyAnswered { .. }));
    assert_eq!(engine.coach_mode(), CoachMode::Choice);
}

#[tokio::test]
async fn test_invalid_truth_answer_leaves_card_open() {
    let (_temp_dir, mut engine, advisor) = create_test_engine().await;
    explore(&mut engine).await;
    advisor.reply(TRUTH_REPLY);
    let truth = engine.send_user_turn("15 minutes a day").await.unwrap();
    let len = engine.transcript().len();

    let err = engine
        .resolve_card(
            truth.index,
            CardAnswer::Truth {
                energy: "Sleepy".into(),
                time_budget: "5 min".into(),
                blockers: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoachError::InvalidInput { .. }));
    assert_eq!(engine.transcript().len(), len);
    assert_eq!(engine.pending_card(), Some(truth.index));
}

#[tokio::test]
async fn test_activate_non_drafted_plan_changes_nothing() {
    let (_temp_dir, mut engine, _advisor, _tasks) = activated_engine("single").await;
    let plan = engine.active_plan().unwrap().clone();
    let tasks_before = engine.tasks().to_vec();
    let plans_before = engine.plans().to_vec();

    let err = engine.activate_plan(plan).await.unwrap_err();

    assert!(matches!(err, CoachError::InvalidPlanState { .. }));
    assert_eq!(engine.tasks(), tasks_before.as_slice());
    assert_eq!(engine.plans(), plans_before.as_slice());
}

#[tokio::test]
async fn test_new_activation_closes_previous_plan() {
    let (_temp_dir, mut engine, _advisor, first_tasks) = activated_engine("single").await;
    let first_id = engine.active_plan().unwrap().id.clone();

    let mut next = engine.active_plan().unwrap().clone();
    next.id = "second".to_string();
    next.status = PlanStatus::Drafted;
    engine.activate_plan(next).await.unwrap();

    assert_eq!(engine.plan(&first_id).unwrap().status, PlanStatus::Abandoned);
    assert_eq!(engine.active_plan().unwrap().id, "second");
    assert_eq!(engine.tasks().len(), first_tasks.len() * 2);
    let active = engine
        .plans()
        .iter()
        .filter(|p| p.status == PlanStatus::Active)
        .count();
    assert_eq!(active, 1);
}

#[tokio::test]
async fn test_counting_task_completes_at_target() {
    let (_temp_dir, mut engine, _advisor) = create_test_engine().await;
    let task = engine
        .add_task(&AddTask {
            title: "Push-ups".into(),
            kind: Some(TaskKind::Counting),
            target_count: Some(10),
            unit: Some("reps".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(task.current_count, Some(0));
    assert_eq!(task.exp_value, 50);
    assert_eq!(task.category, "daily");

    engine.increment_task(&task.id, 9).await.unwrap();
    let done = engine.increment_task(&task.id, 1).await.unwrap();
    assert_eq!(done.current_count, Some(10));
    assert_eq!(done.status, TaskStatus::Completed);

    let undone = engine.increment_task(&task.id, -25).await.unwrap();
    assert_eq!(undone.current_count, Some(0));
    assert_eq!(undone.status, TaskStatus::Active);

    let err = engine.toggle_task(&task.id).await.unwrap_err();
    assert!(matches!(err, CoachError::InvalidTaskKind { .. }));
}

#[tokio::test]
async fn test_add_task_inserts_at_head() {
    let (_temp_dir, mut engine, _advisor) = create_test_engine().await;
    engine.add_task(&AddTask::titled("First")).await.unwrap();
    engine.add_task(&AddTask::titled("Second")).await.unwrap();

    let titles: Vec<&str> = engine.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);

    let err = engine.add_task(&AddTask::titled("  ")).await.unwrap_err();
    assert!(matches!(err, CoachError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_edit_and_update_task() {
    let (_temp_dir, mut engine, _advisor) = create_test_engine().await;
    let task = engine.add_task(&AddTask::titled("Walk")).await.unwrap();

    let edited = engine
        .edit_task(&EditTask {
            id: task.id.clone(),
            title: Some("Walk the dog".into()),
            category: Some("health".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(edited.title, "Walk the dog");
    assert_eq!(edited.category, "health");

    let mut ghost = edited.clone();
    ghost.id = "missing".into();
    assert!(!engine.update_task(ghost).await.unwrap());

    let err = engine
        .edit_task(&EditTask {
            id: "missing".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CoachError::TaskNotFound { .. }));
}

#[tokio::test]
async fn test_list_tasks_filters() {
    let (_temp_dir, mut engine, _advisor) = create_test_engine().await;
    let a = engine.add_task(&AddTask::titled("A")).await.unwrap();
    engine.add_task(&AddTask::titled("B")).await.unwrap();
    engine.toggle_task(&a.id).await.unwrap();

    let completed = engine.list_tasks(&ListTasks {
        status: Some(TaskStatus::Completed),
        plan_id: None,
    });
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title, "A");
    assert_eq!(engine.list_tasks(&ListTasks::default()).len(), 2);
}

#[tokio::test]
async fn test_energy_and_state_persist() {
    let (temp_dir, mut engine, _advisor) = create_test_engine().await;
    assert_eq!(engine.cycle_energy().await, EnergyLevel::Low);
    assert_eq!(engine.cycle_energy().await, EnergyLevel::High);
    engine.set_lifecycle_state(LifecycleState::Stuck).await;

    let reopened = reopen(&temp_dir).await;
    assert_eq!(reopened.energy(), EnergyLevel::High);
    assert_eq!(reopened.lifecycle_state(), LifecycleState::Stuck);
    assert_eq!(reopened.initial_view(), InitialView::Tasks);
}

#[tokio::test]
async fn test_snapshot_reloads_identically() {
    let (temp_dir, engine, _advisor, _tasks) = activated_engine("sequential").await;
    let reopened = reopen(&temp_dir).await;
    assert_eq!(reopened.store(), engine.store());
    assert_eq!(reopened.turn_count(), engine.turn_count());
}

#[tokio::test]
async fn test_resolve_task_id_prefix() {
    let (_temp_dir, mut engine, _advisor) = create_test_engine().await;
    let mut a = engine.add_task(&AddTask::titled("A")).await.unwrap();
    a.id = "abc123".into();
    engine
        .create_task(Task {
            id: "abd456".into(),
            ..a.clone()
        })
        .await
        .unwrap();
    engine.create_task(a).await.unwrap();

    assert_eq!(engine.resolve_task_id("abc").unwrap(), "abc123");
    assert_eq!(engine.resolve_task_id("abd456").unwrap(), "abd456");
    assert!(matches!(
        engine.resolve_task_id("ab"),
        Err(CoachError::InvalidInput { .. })
    ));
    assert!(matches!(
        engine.resolve_task_id("zzz"),
        Err(CoachError::TaskNotFound { .. })
    ));
}
