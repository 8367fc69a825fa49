//! Card domain types.
//!
//! These are the validated shapes produced at the ingestion boundary
//! (see `catalog::ptcg`); every list is present, numeric fields are parsed.

use serde::{Deserialize, Serialize};

use super::energy::EnergyType;

/// A single collectible card returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    /// Catalog identifier, unique within a result set (e.g. "swsh4-25").
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<CardSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<CardImages>,
    /// Elemental types, in catalog order.
    #[serde(default)]
    pub types: Vec<EnergyType>,
    /// Hit points. `None` when absent or unparseable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    #[serde(default)]
    pub attacks: Vec<Attack>,
    #[serde(default)]
    pub weaknesses: Vec<TypeModifier>,
    #[serde(default)]
    pub resistances: Vec<TypeModifier>,
    #[serde(default)]
    pub retreat_cost: Vec<EnergyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default)]
    pub market: MarketLinks,
}

impl Card {
    /// HP as used by aggregation: missing counts as zero.
    pub fn hp_or_zero(&self) -> u32 {
        self.hp.unwrap_or(0)
    }

    /// Mean parsed damage across this card's attacks, 0 without attacks.
    pub fn mean_attack_damage(&self) -> f64 {
        if self.attacks.is_empty() {
            return 0.0;
        }
        let total: u64 = self.attacks.iter().map(|a| a.damage_value as u64).sum();
        total as f64 / self.attacks.len() as f64
    }

    /// Name of the set this card belongs to, if known.
    pub fn set_name(&self) -> Option<&str> {
        self.set.as_ref().map(|s| s.name.as_str())
    }
}

/// Set the card was printed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CardSet {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

/// Image URLs for a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CardImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

/// An attack printed on a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attack {
    pub name: String,
    /// Energy tokens required to use the attack.
    #[serde(default)]
    pub cost: Vec<EnergyType>,
    /// Damage as printed ("30", "20+", "50×", or empty).
    #[serde(default)]
    pub damage: String,
    /// Leading integer of `damage`, 0 when there is none.
    #[serde(default)]
    pub damage_value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A weakness or resistance entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeModifier {
    #[serde(rename = "type")]
    pub energy: EnergyType,
    /// Multiplier or offset as printed ("×2", "-30").
    pub value: String,
}

/// Marketplace pages for a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MarketLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcgplayer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardmarket: Option<String>,
}
