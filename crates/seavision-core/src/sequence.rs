//! Sequence generation: the order a session presents its items in.
//!
//! A sequence is drawn once when a session starts and then stays fixed.
//! The only way to change it is an explicit [`QuizSequence::reshuffle`] or,
//! for arrangement tasks, an explicit [`QuizSequence::move_item`].

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::QuizError;
use crate::model::ItemId;
use crate::traits::QuizItem;

/// How a sequence is derived from its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceOrder {
    /// Catalog order, unchanged.
    Canonical,
    /// A uniformly random permutation of the catalog.
    Shuffled,
}

/// Ordered item identifiers for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSequence {
    order: Vec<ItemId>,
}

/// Produce the sequence a session will step through.
///
/// The result always contains every catalog item exactly once.
pub fn generate<T, R>(catalog: &Catalog<T>, order: SequenceOrder, rng: &mut R) -> QuizSequence
where
    T: QuizItem,
    R: Rng + ?Sized,
{
    let mut ids: Vec<ItemId> = catalog.ids().cloned().collect();
    if order == SequenceOrder::Shuffled {
        ids.shuffle(rng);
    }
    tracing::debug!(
        quiz = %catalog.quiz(),
        items = ids.len(),
        ?order,
        "generated sequence"
    );
    QuizSequence { order: ids }
}

impl QuizSequence {
    /// Draw a fresh random order over the same items.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
        tracing::debug!(items = self.order.len(), "sequence reshuffled");
    }

    /// Move `item` to slot `target` (clamped to the last slot), shifting the
    /// items in between.
    pub fn move_item(&mut self, item: &ItemId, target: usize) -> Result<(), QuizError> {
        let from = self.position_of(item).ok_or_else(|| {
            QuizError::InvalidArrangement(format!("'{item}' is not part of this arrangement"))
        })?;
        let moved = self.order.remove(from);
        let target = target.min(self.order.len());
        self.order.insert(target, moved);
        Ok(())
    }

    pub fn get(&self, position: usize) -> Option<&ItemId> {
        self.order.get(position)
    }

    pub fn position_of(&self, item: &ItemId) -> Option<usize> {
        self.order.iter().position(|id| id == item)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[ItemId] {
        &self.order
    }

    /// `true` when the sequence holds each catalog item exactly once.
    pub fn is_permutation_of<T: QuizItem>(&self, catalog: &Catalog<T>) -> bool {
        if self.order.len() != catalog.len() {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.order.len());
        self.order
            .iter()
            .all(|id| catalog.contains(id) && seen.insert(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(ids: impl Iterator<Item = ItemId>) -> Vec<ItemId> {
        let mut v: Vec<ItemId> = ids.collect();
        v.sort();
        v
    }

    #[test]
    fn canonical_order_is_catalog_order() {
        let catalog = catalog::ishihara();
        let mut rng = StdRng::seed_from_u64(1);
        let sequence = generate(&catalog, SequenceOrder::Canonical, &mut rng);
        let expected: Vec<ItemId> = catalog.ids().cloned().collect();
        assert_eq!(sequence.as_slice(), expected.as_slice());
    }

    #[test]
    fn shuffled_sequences_are_permutations() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let lantern = catalog::lantern();
            let seq = generate(&lantern, SequenceOrder::Shuffled, &mut rng);
            assert!(seq.is_permutation_of(&lantern));
            assert_eq!(
                sorted(seq.iter().cloned()),
                sorted(lantern.ids().cloned())
            );

            let fm15 = catalog::fm15();
            let seq = generate(&fm15, SequenceOrder::Shuffled, &mut rng);
            assert!(seq.is_permutation_of(&fm15));

            let chart = catalog::chart();
            let seq = generate(&chart, SequenceOrder::Shuffled, &mut rng);
            assert!(seq.is_permutation_of(&chart));

            let scale = catalog::radar_intensity_scale();
            let seq = generate(&scale, SequenceOrder::Shuffled, &mut rng);
            assert!(seq.is_permutation_of(&scale));
        }
    }

    #[test]
    fn same_seed_same_order() {
        let catalog = catalog::fm15();
        let a = generate(&catalog, SequenceOrder::Shuffled, &mut StdRng::seed_from_u64(9));
        let b = generate(&catalog, SequenceOrder::Shuffled, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn reshuffle_keeps_the_same_items() {
        let catalog = catalog::ecdis_hue();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seq = generate(&catalog, SequenceOrder::Canonical, &mut rng);
        seq.reshuffle(&mut rng);
        assert!(seq.is_permutation_of(&catalog));
    }

    #[test]
    fn move_item_removes_then_inserts() {
        let catalog = catalog::ecdis_hue();
        let mut rng = StdRng::seed_from_u64(0);
        let mut seq = generate(&catalog, SequenceOrder::Canonical, &mut rng);
        let last = ItemId::from("eh-08");
        seq.move_item(&last, 0).unwrap();
        assert_eq!(seq.get(0), Some(&last));
        assert_eq!(seq.get(1), Some(&ItemId::from("eh-01")));

        // Out-of-range targets land in the last slot.
        seq.move_item(&last, 100).unwrap();
        assert_eq!(seq.get(7), Some(&last));
        assert!(seq.is_permutation_of(&catalog));

        assert!(seq.move_item(&ItemId::from("fm-01"), 0).is_err());
    }

    #[test]
    fn duplicates_are_not_a_permutation() {
        let catalog = catalog::lantern();
        let ids: Vec<ItemId> = std::iter::repeat(ItemId::from("pair-1")).take(9).collect();
        let seq = QuizSequence { order: ids };
        assert!(!seq.is_permutation_of(&catalog));
    }
}
