//! Aggregate statistics over a set of cards.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::card::{Card, EnergyType};

/// Occurrence counts of energy tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnergyHistogram {
    counts: BTreeMap<EnergyType, u32>,
}

impl EnergyHistogram {
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a EnergyType>) -> Self {
        let mut counts = BTreeMap::new();
        for token in tokens {
            *counts.entry(token.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, energy: &EnergyType) -> u32 {
        self.counts.get(energy).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EnergyType, u32)> {
        self.counts.iter().map(|(t, c)| (t, *c))
    }

    /// Icons to draw per type for a collection of `collection_size` cards:
    /// `round(count / collection_size)`, halves rounding up.
    ///
    /// This is a density heuristic, not a count: a type seen once across
    /// three cards rounds to zero icons. Zero entries are kept so callers can
    /// tell "rounded away" from "never seen". Empty when the collection is.
    pub fn icon_counts(&self, collection_size: usize) -> Vec<(EnergyType, u32)> {
        if collection_size == 0 {
            return Vec::new();
        }
        self.counts
            .iter()
            .map(|(t, c)| {
                let icons = (*c as f64 / collection_size as f64).round() as u32;
                (t.clone(), icons)
            })
            .collect()
    }
}

/// Statistics derived from the collection. Always recomputed, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionStats {
    pub card_count: usize,
    /// Cards per elemental type. A dual-type card counts once for each.
    pub type_counts: BTreeMap<EnergyType, u32>,
    /// Mean HP; cards without HP count as 0.
    pub average_hp: f64,
    /// Mean over cards of each card's mean attack damage.
    pub average_damage: f64,
    pub retreat_energy: EnergyHistogram,
    pub attack_energy: EnergyHistogram,
}

impl CollectionStats {
    pub fn compute(cards: &[Card]) -> Self {
        if cards.is_empty() {
            return Self::default();
        }

        let size = cards.len() as f64;

        let mut type_counts = BTreeMap::new();
        for energy in cards.iter().flat_map(|c| c.types.iter()) {
            *type_counts.entry(energy.clone()).or_insert(0) += 1;
        }

        let total_hp: u64 = cards.iter().map(|c| c.hp_or_zero() as u64).sum();
        let total_damage: f64 = cards.iter().map(Card::mean_attack_damage).sum();

        Self {
            card_count: cards.len(),
            type_counts,
            average_hp: total_hp as f64 / size,
            average_damage: total_damage / size,
            retreat_energy: EnergyHistogram::from_tokens(
                cards.iter().flat_map(|c| c.retreat_cost.iter()),
            ),
            attack_energy: EnergyHistogram::from_tokens(
                cards
                    .iter()
                    .flat_map(|c| c.attacks.iter())
                    .flat_map(|a| a.cost.iter()),
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.card_count == 0
    }

    /// Each type's share of all type occurrences, in percent.
    pub fn type_shares(&self) -> Vec<(EnergyType, f64)> {
        let total: u32 = self.type_counts.values().sum();
        if total == 0 {
            return Vec::new();
        }
        self.type_counts
            .iter()
            .map(|(t, c)| (t.clone(), *c as f64 * 100.0 / total as f64))
            .collect()
    }

    pub fn retreat_icons(&self) -> Vec<(EnergyType, u32)> {
        self.retreat_energy.icon_counts(self.card_count)
    }

    pub fn attack_icons(&self) -> Vec<(EnergyType, u32)> {
        self.attack_energy.icon_counts(self.card_count)
    }
}
