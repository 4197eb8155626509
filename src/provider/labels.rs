//! Numeric card faces.

use std::future::Future;

use super::ItemProvider;

/// Supplies the labels `1..=limit`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LabelProvider;

impl LabelProvider {
    /// The labels for `limit` pairs.
    #[must_use]
    pub fn labels(limit: usize) -> Vec<u32> {
        (1..=limit as u32).collect()
    }
}

impl ItemProvider for LabelProvider {
    type Item = u32;

    fn fetch_items(&self, limit: usize) -> impl Future<Output = Vec<u32>> + Send {
        std::future::ready(Self::labels(limit))
    }
}
