//! The user's card collection and its derived statistics.

mod stats;

pub use stats::{CollectionStats, EnergyHistogram};

use std::collections::HashSet;

use tokio::sync::watch;
use tracing::debug;

use crate::card::Card;
use crate::metrics;

/// Cards the user picked, unique by id, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    cards: Vec<Card>,
    ids: HashSet<String>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card. Returns false (and changes nothing) if its id is already
    /// in the collection.
    pub fn add(&mut self, card: Card) -> bool {
        if !self.ids.insert(card.id.clone()) {
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Remove the card with `id`. Returns false if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.ids.remove(id) {
            return false;
        }
        self.cards.retain(|c| c.id != id);
        true
    }

    /// Remove every card, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.cards.len();
        self.cards.clear();
        self.ids.clear();
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards in insertion order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats::compute(&self.cards)
    }
}

/// Owns a [`Collection`] and republishes its statistics after every change.
pub struct CollectionAggregator {
    collection: Collection,
    stats: watch::Sender<CollectionStats>,
}

impl Default for CollectionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionAggregator {
    pub fn new() -> Self {
        let (stats, _) = watch::channel(CollectionStats::default());
        Self {
            collection: Collection::new(),
            stats,
        }
    }

    pub fn add(&mut self, card: Card) -> bool {
        let id = card.id.clone();
        let added = self.collection.add(card);
        if added {
            debug!("Added {} to collection", id);
            self.publish();
        }
        added
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.collection.remove(id);
        if removed {
            debug!("Removed {} from collection", id);
            self.publish();
        }
        removed
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.collection.clear();
        debug!("Cleared {} cards from collection", removed);
        self.publish();
        removed
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Statistics for the current collection.
    pub fn stats(&self) -> CollectionStats {
        self.stats.borrow().clone()
    }

    /// Receive statistics after every change.
    pub fn subscribe(&self) -> watch::Receiver<CollectionStats> {
        self.stats.subscribe()
    }

    fn publish(&self) {
        metrics::COLLECTION_SIZE.set(self.collection.len() as i64);
        self.stats.send_replace(self.collection.stats());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::EnergyType;
    use crate::testing::fixtures;

    #[test]
    fn test_add_is_idempotent() {
        let mut collection = Collection::new();
        assert!(collection.add(fixtures::card("1", "Bulbasaur")));
        assert!(!collection.add(fixtures::card("1", "Bulbasaur")));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_add_keeps_first_copy() {
        let mut collection = Collection::new();
        collection.add(fixtures::card("1", "Original"));
        collection.add(fixtures::card("1", "Duplicate"));
        assert_eq!(collection.get("1").unwrap().name, "Original");
    }

    #[test]
    fn test_insertion_order() {
        let mut collection = Collection::new();
        for (id, name) in [("3", "C"), ("1", "A"), ("2", "B")] {
            collection.add(fixtures::card(id, name));
        }
        let names: Vec<&str> = collection.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_remove_member_and_non_member() {
        let mut collection = Collection::new();
        collection.add(fixtures::card("1", "Squirtle"));
        collection.add(fixtures::card("2", "Wartortle"));

        assert!(!collection.remove("99"));
        assert_eq!(collection.len(), 2);

        assert!(collection.remove("1"));
        assert!(!collection.contains("1"));
        assert_eq!(collection.len(), 1);

        // Re-adding after removal works.
        assert!(collection.add(fixtures::card("1", "Squirtle")));
    }

    #[test]
    fn test_clear() {
        let mut collection = Collection::new();
        collection.add(fixtures::typed_card("1", Some(60), &[EnergyType::Water]));
        collection.add(fixtures::typed_card("2", Some(80), &[EnergyType::Water]));

        assert_eq!(collection.clear(), 2);
        assert!(collection.is_empty());
        assert_eq!(collection.stats(), CollectionStats::default());
        assert_eq!(collection.clear(), 0);
    }

    #[test]
    fn test_aggregator_publishes_on_change() {
        let mut aggregator = CollectionAggregator::new();
        let mut rx = aggregator.subscribe();

        aggregator.add(fixtures::typed_card("1", Some(100), &[EnergyType::Fire]));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().average_hp, 100.0);

        aggregator.add(fixtures::typed_card("2", Some(50), &[EnergyType::Fire, EnergyType::Water]));
        let stats = rx.borrow_and_update().clone();
        assert_eq!(stats.average_hp, 75.0);
        assert_eq!(stats.type_counts[&EnergyType::Fire], 2);

        // No-ops do not publish.
        assert!(!aggregator.add(fixtures::card("1", "dup")));
        assert!(!aggregator.remove("404"));
        assert!(!rx.has_changed().unwrap());

        assert!(aggregator.remove("1"));
        assert_eq!(rx.borrow_and_update().average_hp, 50.0);
    }

    #[test]
    fn test_aggregator_clear_resets_stats() {
        let mut aggregator = CollectionAggregator::new();
        aggregator.add(fixtures::typed_card("1", Some(100), &[EnergyType::Grass]));
        assert_eq!(aggregator.stats().card_count, 1);

        assert_eq!(aggregator.clear(), 1);
        let stats = aggregator.stats();
        assert!(stats.is_empty());
        assert_eq!(stats.average_hp, 0.0);
        assert_eq!(stats.average_damage, 0.0);
        assert!(stats.retreat_energy.is_empty());
        assert!(stats.attack_energy.is_empty());
        assert!(aggregator.collection().is_empty());
    }
}
