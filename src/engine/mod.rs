//! Match engine: the flip/match/reset state machine.
//!
//! ## Phases
//!
//! - `Idle`: zero or one unmatched card face up
//! - `Evaluating`: two unmatched cards face up, input locked
//!
//! ## Output
//!
//! Every mutation returns an [`Update`]: the [`MatchEvent`] that happened
//! and an immutable [`Snapshot`] taken right after it. Rendering layers
//! redraw from snapshots and never see the engine's own deck.
//!
//! ## Example
//!
//! ```
//! use concentration::cards::Deck;
//! use concentration::core::PairId;
//! use concentration::engine::{MatchEngine, MatchEvent};
//!
//! let deck = Deck::from_layout([
//!     (PairId::new(0), "A"),
//!     (PairId::new(1), "B"),
//!     (PairId::new(0), "A"),
//!     (PairId::new(1), "B"),
//! ])
//! .expect("every pair appears twice");
//! let mut engine = MatchEngine::new(deck);
//!
//! engine.reveal(0);
//! let updates = engine.reveal(2);
//! assert!(matches!(updates.last().unwrap().event, MatchEvent::Matched { .. }));
//! assert_eq!(engine.matched_pairs(), 1);
//! ```

mod event;
mod match_engine;
mod phase;
mod snapshot;

pub use event::{MatchEvent, ResetHandle, ScheduledReset, Update};
pub use match_engine::MatchEngine;
pub use phase::Phase;
pub use snapshot::Snapshot;
