//! Deck generation and storage.
//!
//! A deck is the doubled, shuffled sequence of cards for one game. It is
//! backed by `im::Vector`, so cloning a deck for a snapshot is O(1) and the
//! clone is unaffected by later changes to the original.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::core::{CardId, GameRng, PairId};

/// Most items one deck can hold: two cards each, all ids within `u32`.
pub const MAX_ITEMS: usize = (u32::MAX as usize / 2) + 1;

/// Ordered sequence of cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck<P: Clone> {
    cards: Vector<Card<P>>,
}

impl<P: Clone> Default for Deck<P> {
    fn default() -> Self {
        Self { cards: Vector::new() }
    }
}

impl<P: Clone> Deck<P> {
    /// Deal a new deck from `items`.
    ///
    /// Every item at index `i` becomes two cards with `pair_id = i`. The
    /// doubled sequence is shuffled, then each card's id is set to its final
    /// position. An empty `items` yields an empty deck.
    ///
    /// Ids are `u32`, so at most `MAX_ITEMS` items are dealt; the rest are
    /// left out.
    pub fn generate(items: &[P], rng: &mut GameRng) -> Self {
        let mut faces: Vec<(PairId, P)> = items
            .iter()
            .take(MAX_ITEMS)
            .enumerate()
            .map_while(|(i, item)| PairId::from_index(i).map(|pair| (pair, item)))
            .flat_map(|(pair, item)| [(pair, item.clone()), (pair, item.clone())])
            .collect();

        rng.shuffle(&mut faces);

        let cards = faces
            .into_iter()
            .enumerate()
            .map_while(|(position, (pair, payload))| {
                CardId::from_index(position).map(|id| Card::new(id, pair, payload))
            })
            .collect();

        Self { cards }
    }

    /// Build a deck from cards laid out in a known order.
    ///
    /// Ids are reassigned to match positions. Returns `None` unless the
    /// layout is well formed: every pair id in `0..N` appears exactly twice.
    pub fn from_layout(layout: impl IntoIterator<Item = (PairId, P)>) -> Option<Self> {
        let cards = layout
            .into_iter()
            .enumerate()
            .map(|(position, (pair, payload))| CardId::from_index(position).map(|id| Card::new(id, pair, payload)))
            .collect::<Option<Vector<_>>>()?;

        let deck = Self { cards };
        deck.is_well_formed().then_some(deck)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of distinct pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Card at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card<P>> {
        self.cards.get(index)
    }

    /// Iterate over cards in deck order.
    pub fn iter(&self) -> im::vector::Iter<'_, Card<P>> {
        self.cards.iter()
    }

    /// Shared handle to the underlying cards.
    #[must_use]
    pub fn cards(&self) -> Vector<Card<P>> {
        self.cards.clone()
    }

    /// Apply `f` to the card at `index`. Returns false if out of range.
    pub(crate) fn update<F: FnOnce(&mut Card<P>)>(&mut self, index: usize, f: F) -> bool {
        match self.cards.get_mut(index) {
            Some(card) => {
                f(card);
                true
            }
            None => false,
        }
    }

    /// How many cards hold each pair id.
    #[must_use]
    pub fn pair_counts(&self) -> FxHashMap<PairId, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.pair_id).or_insert(0) += 1;
        }
        counts
    }

    /// Check the pairing invariants.
    ///
    /// Every pair id appears exactly twice, pair ids cover `0..N` and each
    /// card's id equals its position.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let counts = self.pair_counts();
        let pairs = self.pair_count();

        self.cards.len() % 2 == 0
            && counts.len() == pairs
            && counts.values().all(|&n| n == 2)
            && counts.keys().all(|p| (p.raw() as usize) < pairs)
            && self.cards.iter().enumerate().all(|(i, c)| c.id.index() == i)
    }

    /// Positions of the two cards holding `pair`.
    #[must_use]
    pub fn positions_of(&self, pair: PairId) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.pair_id == pair)
            .map(|(i, _)| i)
            .collect()
    }
}

impl<'a, P: Clone> IntoIterator for &'a Deck<P> {
    type Item = &'a Card<P>;
    type IntoIter = im::vector::Iter<'a, Card<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
