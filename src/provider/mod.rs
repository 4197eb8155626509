//! Item providers: where card faces come from.
//!
//! A provider is asked once, before the first deal, for up to `limit`
//! distinct items. Providers fail soft: any upstream problem is logged and
//! an empty list returned, which deals an empty, unplayable deck.
//!
//! - [`MarvelClient`]: character records with thumbnail images
//! - [`LabelProvider`]: the numbers `1..=limit`

mod labels;
mod marvel;

pub use labels::LabelProvider;
pub use marvel::{Character, MarvelClient, Thumbnail};

use std::future::Future;

use tracing::{debug, warn};

use crate::cards::Deck;
use crate::core::GameConfig;
use crate::engine::MatchEngine;

/// Source of distinct card faces.
pub trait ItemProvider {
    /// Payload placed on each pair of cards.
    type Item: Clone;

    /// Fetch up to `limit` distinct items. Never fails; returns `[]` instead.
    fn fetch_items(&self, limit: usize) -> impl Future<Output = Vec<Self::Item>> + Send;
}

/// Fetch items for one game and deal them into a fresh engine.
///
/// A short or empty item list still produces an engine; the caller decides
/// how to present an empty deck.
pub async fn load_engine<Pr: ItemProvider>(provider: &Pr, config: &GameConfig) -> MatchEngine<Pr::Item> {
    let items = provider.fetch_items(config.pair_count).await;

    if items.is_empty() {
        warn!(requested = config.pair_count, "Provider returned no items; deck is empty");
    } else if items.len() < config.pair_count {
        warn!(requested = config.pair_count, received = items.len(), "Provider returned fewer items than requested");
    }

    let mut rng = config.rng();
    let deck = Deck::generate(&items, &mut rng);
    debug!(seed = rng.seed(), cards = deck.len(), "Deck dealt");

    MatchEngine::with_mismatch_delay(deck, config.mismatch_delay())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;

    impl ItemProvider for Nothing {
        type Item = String;

        fn fetch_items(&self, _limit: usize) -> impl Future<Output = Vec<String>> + Send {
            std::future::ready(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_load_engine_with_labels() {
        let config = GameConfig::new().with_pair_count(5).with_seed(11);
        let engine = load_engine(&LabelProvider, &config).await;

        assert_eq!(engine.total_pairs(), 5);
        assert_eq!(engine.deck().len(), 10);
        assert!(engine.deck().is_well_formed());
        assert_eq!(engine.mismatch_delay(), config.mismatch_delay());
    }

    #[tokio::test]
    async fn test_load_engine_is_reproducible() {
        let config = GameConfig::new().with_pair_count(4).with_seed(3);
        let a = load_engine(&LabelProvider, &config).await;
        let b = load_engine(&LabelProvider, &config).await;
        assert_eq!(a.deck(), b.deck());
    }

    #[tokio::test]
    async fn test_load_engine_empty_provider() {
        let engine = load_engine(&Nothing, &GameConfig::new()).await;
        assert!(engine.deck().is_empty());
        assert!(engine.snapshot().is_empty());
        assert!(!engine.is_complete());
    }
}
