//! The match engine: flip, compare, match or schedule a reset.
//!
//! ## Turn Structure
//!
//! 1. `reveal(a)` flips the first card; it becomes pending.
//! 2. `reveal(b)` flips a second card; the engine starts evaluating.
//! 3. Equal pair ids: both cards are matched at once, back to idle.
//! 4. Different pair ids: a `ScheduledReset` is returned. The engine stays
//!    evaluating, ignoring reveals, until `complete_evaluation(handle)`
//!    hides both cards.
//!
//! Invalid reveals (locked engine, face-up card, bad index) are ignored and
//! return no updates. The engine is synchronous and owns no timers.

use std::time::Duration;

use tracing::{debug, info, trace};

use super::event::{MatchEvent, ResetHandle, ScheduledReset, Update};
use super::phase::Phase;
use super::snapshot::Snapshot;
use crate::cards::Deck;
use crate::core::{CardId, DEFAULT_MISMATCH_DELAY_MS};

/// State machine for one game of Concentration.
#[derive(Clone, Debug)]
pub struct MatchEngine<P: Clone> {
    deck: Deck<P>,
    phase: Phase,
    matched_pairs: usize,
    flips: u32,
    mismatch_delay: Duration,
    next_reset: u64,
}

impl<P: Clone> MatchEngine<P> {
    /// Create an engine over `deck` with the default mismatch delay.
    #[must_use]
    pub fn new(deck: Deck<P>) -> Self {
        Self::with_mismatch_delay(deck, Duration::from_millis(DEFAULT_MISMATCH_DELAY_MS))
    }

    /// Create an engine with a custom mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay(deck: Deck<P>, mismatch_delay: Duration) -> Self {
        Self {
            deck,
            phase: Phase::default(),
            matched_pairs: 0,
            flips: 0,
            mismatch_delay,
            next_reset: 0,
        }
    }

    // === Queries ===

    /// The current deck.
    #[must_use]
    pub fn deck(&self) -> &Deck<P> {
        &self.deck
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pairs in the deck.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.deck.pair_count()
    }

    /// Pairs found so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Successful flips so far.
    #[must_use]
    pub fn flips(&self) -> u32 {
        self.flips
    }

    /// How long a mismatched pair stays face up.
    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }

    /// All pairs found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let total = self.total_pairs();
        total > 0 && self.matched_pairs == total
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<P> {
        Snapshot {
            cards: self.deck.cards(),
            total_pairs: self.total_pairs(),
            matched_pairs: self.matched_pairs,
            flips: self.flips,
            pending: self.phase.pending(),
            evaluating: self.phase.is_evaluating(),
        }
    }

    // === Events ===

    /// The player selects the card at `index`.
    ///
    /// Returns one update per mutation, in order. An empty result means the
    /// reveal was ignored.
    pub fn reveal(&mut self, index: usize) -> Vec<Update<P>> {
        let pending = match self.phase {
            Phase::Evaluating { .. } => {
                trace!(index, "Reveal ignored while evaluating");
                return Vec::new();
            }
            Phase::Idle { pending } => pending,
        };

        let card_id = match self.deck.get(index) {
            Some(card) if card.is_selectable() => card.id,
            Some(_) => {
                trace!(index, "Reveal ignored on face-up card");
                return Vec::new();
            }
            None => {
                trace!(index, cards = self.deck.len(), "Reveal ignored out of range");
                return Vec::new();
            }
        };

        self.deck.update(index, |card| card.is_flipped = true);
        self.flips += 1;

        let Some(first) = pending else {
            self.phase = Phase::Idle { pending: Some(card_id) };
            debug!(card = %card_id, "First card revealed");
            return vec![self.update(MatchEvent::Flipped { card: card_id })];
        };

        // The partner is located by identity, never by pair id: the pending
        // card must not be compared with itself.
        let second = self
            .deck
            .iter()
            .find(|c| c.is_flipped && !c.is_matched && c.id != first)
            .map(|c| c.id)
            .unwrap_or(card_id);

        self.phase = Phase::Evaluating { first, second, reset: None };
        let mut updates = vec![self.update(MatchEvent::Flipped { card: card_id })];
        updates.push(self.evaluate(first, second));
        updates
    }

    /// The scheduled reset identified by `handle` has elapsed.
    ///
    /// Hides the mismatched pair and returns to idle. Stale handles are
    /// ignored.
    pub fn complete_evaluation(&mut self, handle: ResetHandle) -> Vec<Update<P>> {
        match self.phase {
            Phase::Evaluating { first, second, reset: Some(expected) } if expected == handle => {
                for id in [first, second] {
                    self.deck.update(id.index(), |card| card.is_flipped = false);
                }
                self.phase = Phase::Idle { pending: None };
                debug!(%first, %second, %handle, "Mismatched pair hidden");
                vec![self.update(MatchEvent::Hidden { first, second })]
            }
            _ => {
                trace!(%handle, "Stale reset ignored");
                Vec::new()
            }
        }
    }

    /// Replace the deck and start over.
    ///
    /// Any scheduled reset becomes stale; its driver should cancel the timer.
    pub fn new_game(&mut self, deck: Deck<P>) -> Update<P> {
        if let Some(handle) = self.phase.awaiting_reset() {
            debug!(%handle, "Pending reset cancelled by new game");
        }

        self.deck = deck;
        self.phase = Phase::default();
        self.matched_pairs = 0;
        self.flips = 0;

        let pairs = self.total_pairs();
        info!(pairs, "New game");
        self.update(MatchEvent::NewGame { pairs })
    }

    // === Internals ===

    fn evaluate(&mut self, first: CardId, second: CardId) -> Update<P> {
        let pair_of = |id: CardId| self.deck.get(id.index()).map(|c| c.pair_id);
        let (first_pair, second_pair) = (pair_of(first), pair_of(second));

        match (first_pair, second_pair) {
            (Some(pair), Some(other)) if pair == other => {
                for id in [first, second] {
                    self.deck.update(id.index(), |card| card.is_matched = true);
                }
                self.matched_pairs += 1;
                self.phase = Phase::Idle { pending: None };

                info!(%first, %second, %pair, matched = self.matched_pairs, "Pair matched");
                if self.is_complete() {
                    info!(flips = self.flips, "All pairs matched");
                }
                self.update(MatchEvent::Matched { first, second, pair })
            }
            _ => {
                let handle = ResetHandle(self.next_reset);
                self.next_reset += 1;
                self.phase = Phase::Evaluating { first, second, reset: Some(handle) };

                let reset = ScheduledReset { handle, delay: self.mismatch_delay };
                debug!(%first, %second, %handle, delay_ms = reset.delay.as_millis() as u64, "Mismatch");
                self.update(MatchEvent::Mismatched { first, second, reset })
            }
        }
    }

    fn update(&self, event: MatchEvent) -> Update<P> {
        Update {
            event,
            snapshot: self.snapshot(),
        }
    }
}
