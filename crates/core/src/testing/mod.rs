//! Testing utilities and mock implementations.
//!
//! This module provides a mock card catalog and card fixtures, allowing the
//! search and collection pipeline to be tested without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use cardbinder_core::testing::{fixtures, MockCardCatalog};
//!
//! let catalog = Arc::new(MockCardCatalog::new());
//! catalog.set_cards(vec![fixtures::card("base1-4", "Charizard")]).await;
//!
//! let mut controller = SearchController::new(catalog.clone(), config.catalog, &config.search);
//! controller.set_query("charizard");
//! ```

mod mock_catalog;

pub use mock_catalog::{MockCardCatalog, RecordedCardSearch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::card::{
        parse_leading_int, Attack, Card, CardImages, CardSet, EnergyType, MarketLinks,
    };

    /// Create a test card with reasonable defaults and no types or attacks.
    pub fn card(id: &str, name: &str) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            rarity: Some("Common".to_string()),
            set: Some(CardSet {
                id: "test1".to_string(),
                name: "Test Set".to_string(),
                series: Some("Test Series".to_string()),
            }),
            images: Some(CardImages {
                small: Some(format!("https://images.example/{}.png", id)),
                large: Some(format!("https://images.example/{}_hires.png", id)),
            }),
            types: vec![],
            hp: None,
            attacks: vec![],
            weaknesses: vec![],
            resistances: vec![],
            retreat_cost: vec![],
            flavor_text: None,
            artist: None,
            market: MarketLinks::default(),
        }
    }

    /// Create a test card with the given HP and types.
    pub fn typed_card(id: &str, hp: Option<u32>, types: &[EnergyType]) -> Card {
        let mut card = card(id, &format!("Card {}", id));
        card.hp = hp;
        card.types = types.to_vec();
        card
    }

    /// Create an attack; `damage` is parsed the way the catalog client does.
    pub fn attack(name: &str, cost: &[EnergyType], damage: &str) -> Attack {
        Attack {
            name: name.to_string(),
            cost: cost.to_vec(),
            damage: damage.to_string(),
            damage_value: parse_leading_int(damage).unwrap_or(0),
            text: None,
        }
    }
}
