//! Local phase gate for incoming cards.
//!
//! The ordering rules are also stated to the advisory service in the
//! instruction template; this gate re-checks them so a card of the wrong
//! type for the current phase never reaches the transcript.

use crate::models::{CardKind, CoachMode, LifecycleState};

/// First turn on which a card may appear during exploration.
pub const FIRST_CARD_TURN: usize = 4;

/// Snapshot of everything the gate decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseGate {
    pub state: LifecycleState,
    pub turn: usize,
    pub mode: CoachMode,
}

impl PhaseGate {
    pub fn new(state: LifecycleState, turn: usize, mode: CoachMode) -> Self {
        Self { state, turn, mode }
    }

    /// The only card kind admissible right now, if any.
    pub fn expected(&self) -> Option<CardKind> {
        match self.mode {
            CoachMode::Explore => Some(CardKind::Truth),
            CoachMode::Choice => Some(CardKind::Choice),
            CoachMode::Plan => Some(CardKind::PlanPreview),
            CoachMode::Execute => match self.state {
                LifecycleState::Reflecting | LifecycleState::Stuck | LifecycleState::Rebuilding => {
                    Some(CardKind::Truth)
                }
                _ => None,
            },
        }
    }

    /// Checks whether a card of `kind` may be attached to the next reply.
    pub fn admit(&self, kind: CardKind) -> Result<(), String> {
        let exploring = matches!(self.state, LifecycleState::Idle | LifecycleState::Exploring);
        if exploring && self.turn < FIRST_CARD_TURN {
            return Err(format!(
                "{kind} on turn {} is before turn {FIRST_CARD_TURN}",
                self.turn
            ));
        }
        match self.expected() {
            Some(expected) if expected == kind => Ok(()),
            Some(expected) => Err(format!(
                "{kind} is out of order in {} mode, expected {expected}",
                self.mode.as_str()
            )),
            None => Err(format!(
                "{kind} is not accepted while {}",
                self.state.as_str()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_card_before_turn_four() {
        let gate = PhaseGate::new(LifecycleState::Exploring, 3, CoachMode::Explore);
        assert!(gate.admit(CardKind::Truth).is_err());

        let gate = PhaseGate::new(LifecycleState::Exploring, 4, CoachMode::Explore);
        assert!(gate.admit(CardKind::Truth).is_ok());
    }

    #[test]
    fn test_cards_follow_the_workshop_order() {
        let explore = PhaseGate::new(LifecycleState::Exploring, 5, CoachMode::Explore);
        assert!(explore.admit(CardKind::Choice).is_err());
        assert!(explore.admit(CardKind::PlanPreview).is_err());

        let choice = PhaseGate::new(LifecycleState::Exploring, 6, CoachMode::Choice);
        assert!(choice.admit(CardKind::Choice).is_ok());
        assert!(choice.admit(CardKind::Truth).is_err());

        let plan = PhaseGate::new(LifecycleState::Exploring, 7, CoachMode::Plan);
        assert!(plan.admit(CardKind::PlanPreview).is_ok());
        assert!(plan.admit(CardKind::Choice).is_err());
    }

    #[test]
    fn test_execution_accepts_no_cards() {
        let gate = PhaseGate::new(LifecycleState::Executing, 10, CoachMode::Execute);
        assert_eq!(gate.expected(), None);
        assert!(gate.admit(CardKind::Truth).is_err());
    }

    #[test]
    fn test_reflection_starts_a_new_cycle() {
        let gate = PhaseGate::new(LifecycleState::Reflecting, 2, CoachMode::Execute);
        assert!(gate.admit(CardKind::Truth).is_ok());
        assert!(gate.admit(CardKind::PlanPreview).is_err());
    }
}
