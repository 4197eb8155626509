//! Card and pair identifiers.
//!
//! ## ID Layout
//!
//! - `CardId`: the card's position in the shuffled deck, `0..2N`
//! - `PairId`: index of the source item the card depicts, `0..N`
//!
//! Two cards share every `PairId`; no two cards share a `CardId`.
//!
//! ```
//! use concentration::core::{CardId, PairId};
//!
//! let card = CardId::new(3);
//! assert_eq!(card.index(), 3);
//! assert_eq!(format!("{}", PairId::new(1)), "Pair(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a card within one deck.
///
/// Equal to the card's index in the shuffled sequence, so the rendering
/// layer can address cards by position and by id interchangeably.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Card ID for a deck position, if the position fits.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Position of the card in its deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Identifier shared by the two cards depicting the same item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairId(pub u32);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Pair ID for an item index, if the index fits.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}
