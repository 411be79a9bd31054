//! Command definitions and handlers.
//!
//! Each command has a clap argument struct that converts into the matching
//! core parameter type with `From`, so the core stays free of clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Engine
//! ```
//!
//! Handlers format results through the core `Display` impls and hand the
//! markdown to the [`TerminalRenderer`].

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use evolve_core::{
    models::{Difficulty, EnergyLevel, LifecycleState, TaskKind, TaskStatus},
    params::{AddTask, EditTask, ListTasks},
    CardAnswer, CardOutcome, Engine, InitialView, OperationStatus, Plans, StatusReport, Tasks,
    Transcript, TurnOutcome,
};
use jiff::civil::Date;
use log::{info, warn};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Task arguments
// ============================================================================

/// Add a task by hand
#[derive(Args)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
    /// Longer description
    #[arg(short, long)]
    pub description: Option<String>,
    /// How the task completes
    #[arg(short, long, value_enum)]
    pub kind: Option<TaskKindArg>,
    /// Difficulty, used for display only
    #[arg(long, value_enum)]
    pub difficulty: Option<DifficultyArg>,
    /// Free-form category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Target count for counting tasks
    #[arg(short, long)]
    pub target: Option<u32>,
    /// Unit of the target count, e.g. "reps"
    #[arg(short, long)]
    pub unit: Option<String>,
    /// Due date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub due: Option<Date>,
}

impl From<AddTaskArgs> for AddTask {
    fn from(val: AddTaskArgs) -> Self {
        AddTask {
            title: val.title,
            description: val.description,
            kind: val.kind.map(Into::into),
            difficulty: val.difficulty.map(Into::into),
            category: val.category,
            target_count: val.target,
            unit: val.unit,
            due_date: val.due,
        }
    }
}

/// List tasks
#[derive(Args)]
pub struct ListTasksArgs {
    /// Only tasks with this status
    #[arg(short, long, value_enum)]
    pub status: Option<TaskStatusArg>,
    /// Only tasks belonging to this plan
    #[arg(short, long)]
    pub plan: Option<String>,
}

impl From<ListTasksArgs> for ListTasks {
    fn from(val: ListTasksArgs) -> Self {
        ListTasks {
            status: val.status.map(Into::into),
            plan_id: val.plan,
        }
    }
}

/// Refer to one task by id or unique id prefix
#[derive(Args)]
pub struct TaskIdArgs {
    /// Task id, or a prefix that matches exactly one task
    pub id: String,
}

/// Change the progress of a counting task
#[derive(Args)]
pub struct IncrementTaskArgs {
    /// Task id, or a prefix that matches exactly one task
    pub id: String,
    /// Amount to add, may be negative
    #[arg(default_value_t = 1, allow_negative_numbers = true)]
    pub delta: i64,
}

/// Edit task fields; omitted flags stay unchanged
#[derive(Args)]
pub struct EditTaskArgs {
    /// Task id, or a prefix that matches exactly one task
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long, value_enum)]
    pub difficulty: Option<DifficultyArg>,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(short, long)]
    pub target: Option<u32>,
    #[arg(short, long)]
    pub unit: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<Date>,
}

impl From<EditTaskArgs> for EditTask {
    fn from(val: EditTaskArgs) -> Self {
        EditTask {
            id: val.id,
            title: val.title,
            description: val.description,
            difficulty: val.difficulty.map(Into::into),
            category: val.category,
            target_count: val.target,
            unit: val.unit,
            due_date: val.due,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List tasks
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Show details of a task
    #[command(alias = "s")]
    Show(TaskIdArgs),
    /// Complete or reopen a task
    #[command(alias = "x")]
    Toggle(TaskIdArgs),
    /// Add to the progress of a counting task
    #[command(aliases = ["i", "inc"])]
    Increment(IncrementTaskArgs),
    /// Edit a task
    #[command(alias = "e")]
    Edit(EditTaskArgs),
}

// ============================================================================
// Plan arguments
// ============================================================================

#[derive(Args)]
pub struct ShowPlanArgs {
    /// Plan id, or a prefix that matches exactly one plan
    pub id: String,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with its tasks
    #[command(alias = "s")]
    Show(ShowPlanArgs),
}

// ============================================================================
// Dialogue arguments
// ============================================================================

/// Send a message to the coach
#[derive(Args)]
pub struct SayArgs {
    /// Message text; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Show the transcript
#[derive(Args)]
pub struct LogArgs {
    /// Only the last N messages
    #[arg(short = 'n', long)]
    pub last: Option<usize>,
}

#[derive(Subcommand)]
pub enum ChatCommands {
    /// Send a message to the coach
    #[command(alias = "s")]
    Say(SayArgs),
    /// Show the transcript
    #[command(alias = "l")]
    Log(LogArgs),
}

/// Confirm a truth snapshot
#[derive(Args)]
pub struct TruthArgs {
    /// One of the offered energy options
    #[arg(short, long)]
    pub energy: String,
    /// One of the offered daily time budgets
    #[arg(short, long)]
    pub budget: String,
    /// An offered blocker; repeat for several
    #[arg(long = "blocker")]
    pub blockers: Vec<String>,
    /// Message index of the card, defaults to the pending card
    pub index: Option<usize>,
}

impl From<TruthArgs> for CardAnswer {
    fn from(val: TruthArgs) -> Self {
        CardAnswer::Truth {
            energy: val.energy,
            time_budget: val.budget,
            blockers: val.blockers,
        }
    }
}

/// Pick a strategy option
#[derive(Args)]
pub struct ChooseArgs {
    /// Id of the chosen option
    pub option: String,
    /// Message index of the card, defaults to the pending card
    pub index: Option<usize>,
}

impl From<ChooseArgs> for CardAnswer {
    fn from(val: ChooseArgs) -> Self {
        CardAnswer::Choice {
            option_id: val.option,
        }
    }
}

/// Accept a plan preview
#[derive(Args)]
pub struct ActivateArgs {
    /// Message index of the card, defaults to the pending card
    pub index: Option<usize>,
}

#[derive(Subcommand)]
pub enum CardCommands {
    /// Confirm energy, time budget and blockers
    #[command(alias = "t")]
    Truth(TruthArgs),
    /// Choose one of the offered strategies
    #[command(alias = "c")]
    Choose(ChooseArgs),
    /// Activate the previewed plan
    #[command(alias = "a")]
    Activate(ActivateArgs),
}

// ============================================================================
// User state arguments
// ============================================================================

#[derive(Args)]
pub struct EnergyArgs {
    /// New energy level
    #[arg(value_enum, conflicts_with = "cycle")]
    pub level: Option<EnergyArg>,
    /// Advance high → medium → low → high
    #[arg(long)]
    pub cycle: bool,
}

#[derive(Args)]
pub struct StateArgs {
    /// New lifecycle state
    #[arg(value_enum)]
    pub state: Option<LifecycleStateArg>,
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskKindArg {
    Single,
    Recurring,
    Counting,
    Sequential,
}

impl From<TaskKindArg> for TaskKind {
    fn from(val: TaskKindArg) -> Self {
        match val {
            TaskKindArg::Single => TaskKind::Single,
            TaskKindArg::Recurring => TaskKind::Recurring,
            TaskKindArg::Counting => TaskKind::Counting,
            TaskKindArg::Sequential => TaskKind::Sequential,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Low,
    Medium,
    High,
}

impl From<DifficultyArg> for Difficulty {
    fn from(val: DifficultyArg) -> Self {
        match val {
            DifficultyArg::Low => Difficulty::Low,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::High => Difficulty::High,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Active,
    Completed,
    Overdue,
    Skipped,
    Archived,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(val: TaskStatusArg) -> Self {
        match val {
            TaskStatusArg::Active => TaskStatus::Active,
            TaskStatusArg::Completed => TaskStatus::Completed,
            TaskStatusArg::Overdue => TaskStatus::Overdue,
            TaskStatusArg::Skipped => TaskStatus::Skipped,
            TaskStatusArg::Archived => TaskStatus::Archived,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EnergyArg {
    High,
    Medium,
    Low,
}

impl From<EnergyArg> for EnergyLevel {
    fn from(val: EnergyArg) -> Self {
        match val {
            EnergyArg::High => EnergyLevel::High,
            EnergyArg::Medium => EnergyLevel::Medium,
            EnergyArg::Low => EnergyLevel::Low,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LifecycleStateArg {
    Idle,
    Exploring,
    Executing,
    Reflecting,
    Stuck,
    Rebuilding,
}

impl From<LifecycleStateArg> for LifecycleState {
    fn from(val: LifecycleStateArg) -> Self {
        match val {
            LifecycleStateArg::Idle => LifecycleState::Idle,
            LifecycleStateArg::Exploring => LifecycleState::Exploring,
            LifecycleStateArg::Executing => LifecycleState::Executing,
            LifecycleStateArg::Reflecting => LifecycleState::Reflecting,
            LifecycleStateArg::Stuck => LifecycleState::Stuck,
            LifecycleStateArg::Rebuilding => LifecycleState::Rebuilding,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs commands against an engine and renders the results.
pub struct Cli {
    engine: Engine,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(engine: Engine, renderer: TerminalRenderer) -> Self {
        Self { engine, renderer }
    }

    pub async fn handle_task_command(&mut self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => self.add_task(args.into()).await,
            TaskCommands::List(args) => self.list_tasks(&args.into()),
            TaskCommands::Show(TaskIdArgs { id }) => self.show_task(&id),
            TaskCommands::Toggle(TaskIdArgs { id }) => self.toggle_task(&id).await,
            TaskCommands::Increment(IncrementTaskArgs { id, delta }) => {
                self.increment_task(&id, delta).await
            }
            TaskCommands::Edit(args) => self.edit_task(args.into()).await,
        }
    }

    pub async fn handle_plan_command(&mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::List => self.list_plans(),
            PlanCommands::Show(ShowPlanArgs { id }) => self.show_plan(&id),
        }
    }

    pub async fn handle_chat_command(&mut self, command: ChatCommands) -> Result<()> {
        match command {
            ChatCommands::Say(SayArgs { text }) => self.say(&text.join(" ")).await,
            ChatCommands::Log(LogArgs { last }) => self.show_transcript(last),
        }
    }

    pub async fn handle_card_command(&mut self, command: CardCommands) -> Result<()> {
        let (index, answer) = match command {
            CardCommands::Truth(args) => (args.index, args.into()),
            CardCommands::Choose(args) => (args.index, args.into()),
            CardCommands::Activate(ActivateArgs { index }) => (index, CardAnswer::ActivatePlan),
        };
        let index = index
            .or_else(|| self.engine.pending_card())
            .ok_or_else(|| anyhow!("No card is waiting for an answer"))?;

        match self.engine.resolve_card(index, answer).await? {
            CardOutcome::Turn(outcome) => self.render_turn(&outcome),
            CardOutcome::Activated { plan_id, tasks } => {
                let title = self
                    .engine
                    .plan(&plan_id)
                    .map(|plan| plan.title.clone())
                    .unwrap_or_else(|| plan_id.clone());
                let status = OperationStatus::success(format!(
                    "Activated plan '{title}' with {} task(s)",
                    tasks.len()
                ));
                self.renderer
                    .render(&format!("{status}\n{}", Tasks(tasks)))
            }
        }
    }

    pub async fn handle_energy_command(&mut self, args: EnergyArgs) -> Result<()> {
        let energy = match (args.level, args.cycle) {
            (Some(level), _) => self.engine.set_energy(level.into()).await,
            (None, true) => self.engine.cycle_energy().await,
            (None, false) => self.engine.energy(),
        };
        self.renderer.render(&format!("Energy: {energy}\n"))
    }

    pub async fn handle_state_command(&mut self, args: StateArgs) -> Result<()> {
        let state = match args.state {
            Some(state) => self.engine.set_lifecycle_state(state.into()).await,
            None => self.engine.lifecycle_state(),
        };
        self.renderer.render(&format!(
            "Lifecycle state: {state}\nCoach mode: {}\n",
            self.engine.coach_mode()
        ))
    }

    pub fn show_status(&self) -> Result<()> {
        let report = StatusReport::from_engine(&self.engine);
        self.renderer.render(&report.to_string())
    }

    /// Opens the dialogue or the task list, depending on the state at startup.
    pub fn show_initial_view(&self) -> Result<()> {
        match self.engine.initial_view() {
            InitialView::Dialogue => self.show_transcript(None),
            InitialView::Tasks => self.list_tasks(&ListTasks::default()),
        }
    }

    async fn add_task(&mut self, params: AddTask) -> Result<()> {
        let task = self.engine.add_task(&params).await?;
        let status = OperationStatus::success(format!("Created task `{}`", task.id));
        self.renderer.render(&format!("{status}\n{task}"))
    }

    fn list_tasks(&self, filter: &ListTasks) -> Result<()> {
        let tasks = Tasks(self.engine.list_tasks(filter));
        self.renderer.render(&tasks.to_string())
    }

    fn show_task(&self, id: &str) -> Result<()> {
        let id = self.engine.resolve_task_id(id)?;
        match self.engine.store().task(&id) {
            Some(task) => self.renderer.render(&task.to_string()),
            None => bail!("Task with ID {id} not found"),
        }
    }

    async fn toggle_task(&mut self, id: &str) -> Result<()> {
        let id = self.engine.resolve_task_id(id)?;
        let before = self.engine.lifecycle_state();
        let task = self.engine.toggle_task(&id).await?;
        let status = OperationStatus::success(format!(
            "Task '{}' is now {}",
            task.title, task.status
        ));
        self.render_task_change(status, before)
    }

    async fn increment_task(&mut self, id: &str, delta: i64) -> Result<()> {
        let id = self.engine.resolve_task_id(id)?;
        let before = self.engine.lifecycle_state();
        let task = self.engine.increment_task(&id, delta).await?;
        let status = OperationStatus::success(format!(
            "Task '{}' at {}/{} ({})",
            task.title,
            task.current_count.unwrap_or(0),
            task.target_count.unwrap_or(0),
            task.status
        ));
        self.render_task_change(status, before)
    }

    async fn edit_task(&mut self, mut params: EditTask) -> Result<()> {
        params.id = self.engine.resolve_task_id(&params.id)?;
        let task = self.engine.edit_task(&params).await?;
        let status = OperationStatus::success(format!("Updated task `{}`", task.id));
        self.renderer.render(&format!("{status}\n{task}"))
    }

    fn render_task_change(&self, status: OperationStatus, before: LifecycleState) -> Result<()> {
        let after = self.engine.lifecycle_state();
        let mut markdown = status.to_string();
        if after != before {
            markdown.push_str(&format!("Lifecycle state: {before} → {after}\n"));
        }
        self.renderer.render(&markdown)
    }

    fn list_plans(&self) -> Result<()> {
        let plans = Plans {
            plans: self.engine.plans().to_vec(),
            tasks: self.engine.tasks(),
        };
        self.renderer.render(&plans.to_string())
    }

    fn show_plan(&self, id: &str) -> Result<()> {
        let mut matches = self
            .engine
            .plans()
            .iter()
            .filter(|plan| plan.id == id || plan.id.starts_with(id));
        let plan = match (matches.next(), matches.next()) {
            (Some(plan), None) => plan,
            (Some(_), Some(_)) => bail!("Plan id prefix '{id}' is ambiguous"),
            (None, _) => bail!("Plan {id} not found"),
        };
        let tasks = Tasks(self.engine.plan_tasks(&plan.id));
        self.renderer.render(&format!("{plan}\n## Tasks\n\n{tasks}"))
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        let outcome = self.engine.send_user_turn(text).await?;
        self.render_turn(&outcome)
    }

    fn render_turn(&self, outcome: &TurnOutcome) -> Result<()> {
        if let Some(error) = &outcome.recovered {
            warn!("Coach reply degraded: {error}");
        }
        if let Some(kind) = outcome.rejected_card {
            info!("Dropped {kind} card sent out of phase");
        }
        let transcript = Transcript {
            messages: self.engine.transcript(),
            offset: outcome.index.saturating_sub(1),
            answered: self.engine.store().answered_cards(),
        };
        self.renderer.render(&transcript.to_string())
    }

    fn show_transcript(&self, last: Option<usize>) -> Result<()> {
        let messages = self.engine.transcript();
        let offset = last.map_or(0, |n| messages.len().saturating_sub(n));
        let transcript = Transcript {
            messages,
            offset,
            answered: self.engine.store().answered_cards(),
        };
        self.renderer.render(&transcript.to_string())
    }
}
