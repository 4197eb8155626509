//! Cards and decks.
//!
//! ## Key Types
//!
//! - `Card<P>`: one token with a pair identity and an opaque payload
//! - `Deck<P>`: the doubled, shuffled card sequence for one game
//!
//! The payload type is chosen by the caller: image URLs, API records and
//! numeric labels all go through the same deck and engine.

pub mod card;
pub mod deck;

pub use card::Card;
pub use deck::{Deck, MAX_ITEMS};
