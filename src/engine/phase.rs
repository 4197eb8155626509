//! Engine phase: waiting for input, or resolving a revealed pair.

use serde::{Deserialize, Serialize};

use super::event::ResetHandle;
use crate::core::CardId;

/// Where the engine is in a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting reveals. `pending` is the single unmatched face-up card.
    Idle { pending: Option<CardId> },

    /// Two unmatched cards are face up. Reveals are ignored.
    ///
    /// `reset` is set once a mismatch has been scheduled for hiding.
    Evaluating {
        first: CardId,
        second: CardId,
        reset: Option<ResetHandle>,
    },
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle { pending: None }
    }
}

impl Phase {
    /// Whether a comparison or mismatch delay is in progress.
    #[must_use]
    pub fn is_evaluating(&self) -> bool {
        matches!(self, Phase::Evaluating { .. })
    }

    /// The card waiting for a partner, if any.
    #[must_use]
    pub fn pending(&self) -> Option<CardId> {
        match self {
            Phase::Idle { pending } => *pending,
            Phase::Evaluating { .. } => None,
        }
    }

    /// The reset this phase is waiting on, if any.
    #[must_use]
    pub fn awaiting_reset(&self) -> Option<ResetHandle> {
        match self {
            Phase::Evaluating { reset, .. } => *reset,
            Phase::Idle { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let phase = Phase::default();
        assert!(!phase.is_evaluating());
        assert_eq!(phase.pending(), None);
        assert_eq!(phase.awaiting_reset(), None);
    }

    #[test]
    fn test_evaluating_accessors() {
        let phase = Phase::Evaluating {
            first: CardId::new(0),
            second: CardId::new(1),
            reset: Some(ResetHandle(4)),
        };
        assert!(phase.is_evaluating());
        assert_eq!(phase.pending(), None);
        assert_eq!(phase.awaiting_reset(), Some(ResetHandle(4)));
    }
}
