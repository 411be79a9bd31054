//! Lifecycle state machine.
//!
//! The macro [`LifecycleState`] is stored on the [`EntityStore`]. Only the
//! completion watcher changes it on its own; plan activation moves to
//! `executing`, and every other state is set explicitly by the user.
//! Dialogue turns alone never change it.
//!
//! ```text
//!   idle / exploring ──activate──▶ executing ──all done──▶ reflecting
//!                                      ▲                       │
//!                                      └──────activate─────────┘
//! ```
//!
//! The micro [`CoachMode`] is never stored; it is derived from which cards
//! in the transcript have been answered.

use log::info;

use crate::{
    models::{CardKind, ChatMessage, CoachMode, LifecycleState, Task},
    store::EntityStore,
};

/// Which view a front end shows first on a cold start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialView {
    Dialogue,
    Tasks,
}

/// Cold-start policy: no persisted state, or `idle`, opens the dialogue.
pub fn initial_view(persisted: Option<LifecycleState>) -> InitialView {
    match persisted {
        None | Some(LifecycleState::Idle) => InitialView::Dialogue,
        Some(_) => InitialView::Tasks,
    }
}

/// Completion watcher.
///
/// When the active plan has at least one task and all of them are completed,
/// the state moves to `reflecting`. Returns the new state when a transition
/// happened; re-running in `reflecting` is a no-op.
pub fn watch(store: &mut EntityStore) -> Option<LifecycleState> {
    if store.lifecycle_state() == LifecycleState::Reflecting {
        return None;
    }
    let plan_id = store.active_plan()?.id.clone();

    let finished = {
        let mut tasks = store.plan_tasks(&plan_id).peekable();
        tasks.peek().is_some() && tasks.all(Task::is_completed)
    };
    if !finished {
        return None;
    }

    info!(
        "All tasks of plan {plan_id} completed, {} -> reflecting",
        store.lifecycle_state().as_str()
    );
    store.set_lifecycle_state(LifecycleState::Reflecting);
    Some(LifecycleState::Reflecting)
}

/// Plan activation moves any state to `executing`.
pub fn on_plan_activated(store: &mut EntityStore) {
    if store.lifecycle_state() != LifecycleState::Executing {
        info!(
            "Plan activated, {} -> executing",
            store.lifecycle_state().as_str()
        );
    }
    store.set_lifecycle_state(LifecycleState::Executing);
}

/// Derives the micro coaching phase from answered cards, in transcript order.
pub fn coach_mode(store: &EntityStore) -> CoachMode {
    mode_from(store.messages(), |i| store.is_card_answered(i))
}

fn mode_from(messages: &[ChatMessage], answered: impl Fn(usize) -> bool) -> CoachMode {
    messages
        .iter()
        .enumerate()
        .filter(|(i, _)| answered(*i))
        .filter_map(|(_, m)| m.card.as_ref())
        .fold(CoachMode::Explore, |_, card| match card.kind() {
            CardKind::Truth => CoachMode::Choice,
            CardKind::Choice => CoachMode::Plan,
            CardKind::PlanPreview => CoachMode::Execute,
        })
}

/// Opening model message for an empty transcript.
pub fn greeting(state: LifecycleState) -> &'static str {
    match state {
        LifecycleState::Idle => {
            "Hi, I'm **Evolve**. There's no rush to make a plan. First, tell me: what has been bothering you most lately?"
        }
        LifecycleState::Executing => {
            "I can see you're steadily executing. How did today's key tasks go?"
        }
        LifecycleState::Reflecting => {
            "This stage is over. Looking back, does your original hypothesis still hold?"
        }
        _ => "Hi, I'm **Evolve**. Ready to start today's conversation?",
    }
}
