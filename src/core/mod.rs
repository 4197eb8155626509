//! Core types: identifiers, RNG, configuration.
//!
//! These are shared by the deck generator, the match engine and the
//! providers, and know nothing about any of them.

pub mod entity;
pub mod rng;
pub mod config;

pub use entity::{CardId, PairId};
pub use rng::GameRng;
pub use config::{AppConfig, GameConfig, ProviderConfig, DEFAULT_BASE_URL, DEFAULT_MISMATCH_DELAY_MS, MAX_PAIRS};
