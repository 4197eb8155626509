//! Immutable view of a game for the rendering layer.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::CardId;

/// The state of a game at one instant.
///
/// `cards` shares structure with the engine's deck, so taking a snapshot is
/// O(1), and no later mutation inside the engine is visible through it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<P: Clone> {
    /// Cards in table order.
    pub cards: Vector<Card<P>>,

    /// Pairs in the deck.
    pub total_pairs: usize,

    /// Pairs found so far.
    pub matched_pairs: usize,

    /// Successful flips so far.
    pub flips: u32,

    /// Single face-up card awaiting a partner.
    pub pending: Option<CardId>,

    /// A pair is being resolved; input is locked.
    pub evaluating: bool,
}

impl<P: Clone> Snapshot<P> {
    /// All pairs found. An empty deck is never complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_pairs > 0 && self.matched_pairs == self.total_pairs
    }

    /// No cards to play with (e.g. the provider returned nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether a reveal could currently change anything.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        !self.evaluating && !self.is_complete() && !self.is_empty()
    }

    /// Positions a reveal would currently act on.
    pub fn selectable(&self) -> Vec<usize> {
        if self.evaluating {
            return Vec::new();
        }
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_selectable())
            .map(|(i, _)| i)
            .collect()
    }

    /// Card at a position.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card<P>> {
        self.cards.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PairId;

    fn snapshot(matched: usize, evaluating: bool) -> Snapshot<u8> {
        let mut cards = Vector::new();
        for i in 0..4u32 {
            let mut card = Card::new(CardId::new(i), PairId::new(i % 2), 0u8);
            card.is_matched = (i as usize) < matched * 2;
            card.is_flipped = card.is_matched;
            cards.push_back(card);
        }
        Snapshot {
            cards,
            total_pairs: 2,
            matched_pairs: matched,
            flips: 0,
            pending: None,
            evaluating,
        }
    }

    #[test]
    fn test_selectable() {
        assert_eq!(snapshot(0, false).selectable(), vec![0, 1, 2, 3]);
        assert_eq!(snapshot(1, false).selectable(), vec![2, 3]);
        assert!(snapshot(0, true).selectable().is_empty());
    }

    #[test]
    fn test_completion() {
        assert!(!snapshot(1, false).is_complete());
        assert!(snapshot(2, false).is_complete());
        assert!(!snapshot(2, false).accepts_input());
    }

    #[test]
    fn test_empty_is_not_complete() {
        let empty: Snapshot<u8> = Snapshot {
            cards: Vector::new(),
            total_pairs: 0,
            matched_pairs: 0,
            flips: 0,
            pending: None,
            evaluating: false,
        };
        assert!(empty.is_empty());
        assert!(!empty.is_complete());
        assert!(!empty.accepts_input());
    }
}
