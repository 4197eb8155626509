//! A single card: fixed identity plus face-up/matched status.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, PairId};

/// One card on the table.
///
/// `payload` is whatever the rendering layer shows on the face (an image
/// URL, a character record, a number). Matching only ever looks at
/// `pair_id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card<P> {
    /// Position in the deck; unique.
    pub id: CardId,

    /// Shared with exactly one other card.
    pub pair_id: PairId,

    /// Face content.
    pub payload: P,

    /// Face currently shown.
    pub is_flipped: bool,

    /// Pair found. Never reverts.
    pub is_matched: bool,
}

impl<P> Card<P> {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, pair_id: PairId, payload: P) -> Self {
        Self {
            id,
            pair_id,
            payload,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Whether the face should be drawn.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    /// Whether a tap on this card can flip it.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_face_up()
    }

    /// Whether this card and `other` form a pair.
    ///
    /// A card never pairs with itself.
    #[must_use]
    pub fn pairs_with(&self, other: &Card<P>) -> bool {
        self.id != other.id && self.pair_id == other.pair_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardId::new(0), PairId::new(0), "A");
        assert!(!card.is_flipped);
        assert!(!card.is_matched);
        assert!(!card.is_face_up());
        assert!(card.is_selectable());
    }

    #[test]
    fn test_face_up_states() {
        let mut card = Card::new(CardId::new(0), PairId::new(0), 1u32);

        card.is_flipped = true;
        assert!(card.is_face_up());
        assert!(!card.is_selectable());

        card.is_matched = true;
        assert!(card.is_face_up());
        assert!(!card.is_selectable());
    }

    #[test]
    fn test_pairs_with() {
        let a1 = Card::new(CardId::new(0), PairId::new(0), "A");
        let a2 = Card::new(CardId::new(2), PairId::new(0), "A");
        let b1 = Card::new(CardId::new(1), PairId::new(1), "B");

        assert!(a1.pairs_with(&a2));
        assert!(a2.pairs_with(&a1));
        assert!(!a1.pairs_with(&b1));
        assert!(!a1.pairs_with(&a1));
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardId::new(3), PairId::new(1), "http://img/1.jpg".to_string());

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
