//! # concentration
//!
//! A memory-matching ("Concentration") card game engine.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never draws, animates or sleeps.
//!    It returns immutable snapshots and lets the caller render them.
//!
//! 2. **One Engine, Any Face**: Cards carry an opaque payload. Image cards
//!    and numbered cards run through the same deck and state machine.
//!
//! 3. **Explicit Time**: The mismatch delay is a scheduled event with a
//!    handle, not a hidden callback. The session owns the timer.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot clones via `im-rs`.
//!
//! - **Silent Input Filter**: Reveals that cannot apply (locked engine,
//!   face-up card, bad index) are dropped without an error.
//!
//! ## Modules
//!
//! - `core`: Card/pair IDs, RNG, configuration
//! - `cards`: Cards and deck generation
//! - `engine`: The match state machine, events and snapshots
//! - `session`: Tokio event loop driving an engine and its reset timer
//! - `provider`: Card face sources (character API, numeric labels)

pub mod core;
pub mod cards;
pub mod engine;
pub mod session;
pub mod provider;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CardId, PairId,
    GameRng,
    AppConfig, GameConfig, ProviderConfig,
};

pub use crate::cards::{Card, Deck};

pub use crate::engine::{MatchEngine, MatchEvent, Phase, ResetHandle, ScheduledReset, Snapshot, Update};

pub use crate::session::GameSession;

pub use crate::provider::{load_engine, Character, ItemProvider, LabelProvider, MarvelClient, Thumbnail};

pub use crate::error::{Error, ProviderError, Result};
