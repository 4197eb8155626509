//! Engine output: events, snapshots bundled into updates, and the
//! scheduled mismatch reset.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;
use crate::core::{CardId, PairId};

/// Identifies one scheduled mismatch reset.
///
/// Handles are never reused within an engine. A handle whose evaluation was
/// superseded (by a new game) is stale and completing it does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResetHandle(pub u64);

impl std::fmt::Display for ResetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Reset({})", self.0)
    }
}

/// A request to call `complete_evaluation(handle)` after `delay`.
///
/// The engine does not keep time; whoever drives it owns the timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReset {
    pub handle: ResetHandle,
    pub delay: Duration,
}

/// Something that changed in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A card was turned face up.
    Flipped { card: CardId },

    /// Two face-up cards formed a pair and stay face up for good.
    Matched { first: CardId, second: CardId, pair: PairId },

    /// Two face-up cards differ; they are hidden when `reset` fires.
    Mismatched { first: CardId, second: CardId, reset: ScheduledReset },

    /// A mismatched pair was turned face down again.
    Hidden { first: CardId, second: CardId },

    /// The deck was replaced and all counters cleared.
    NewGame { pairs: usize },
}

impl MatchEvent {
    /// The reset to schedule, if this event asks for one.
    #[must_use]
    pub fn scheduled_reset(&self) -> Option<ScheduledReset> {
        match self {
            MatchEvent::Mismatched { reset, .. } => Some(*reset),
            _ => None,
        }
    }
}

/// One mutation: what happened and the state right after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update<P: Clone> {
    pub event: MatchEvent,
    pub snapshot: Snapshot<P>,
}
