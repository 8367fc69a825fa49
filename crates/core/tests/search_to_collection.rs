//! Search → collection integration tests.
//!
//! These tests drive the debounced search controller against the mock
//! catalog and feed its results into the collection aggregator, the way the
//! front-end does.

use std::sync::Arc;
use std::time::Duration;

use cardbinder_core::{
    testing::{fixtures, MockCardCatalog},
    CardCatalog, CollectionAggregator, Config, EnergyType, SearchController,
};

struct TestHarness {
    catalog: Arc<MockCardCatalog>,
    controller: SearchController,
    aggregator: CollectionAggregator,
}

impl TestHarness {
    fn new() -> Self {
        let config = Config::default();
        let catalog = Arc::new(MockCardCatalog::new());
        let controller = SearchController::new(
            Arc::clone(&catalog) as Arc<dyn CardCatalog>,
            config.catalog.clone(),
            &config.search,
        );

        Self {
            catalog,
            controller,
            aggregator: CollectionAggregator::new(),
        }
    }

    /// Type `query` and wait for its results to be published.
    async fn search(&mut self, query: &str) {
        let mut rx = self.controller.subscribe();
        self.controller.set_query(query);
        rx.changed().await.expect("controller dropped");
    }

    /// Add a card from the current results by id.
    fn add(&mut self, id: &str) -> bool {
        match self.controller.find(id) {
            Some(card) => self.aggregator.add(card),
            None => false,
        }
    }
}

fn fire_and_water_cards() -> Vec<cardbinder_core::Card> {
    let mut charmander = fixtures::typed_card("base1-46", Some(100), &[EnergyType::Fire]);
    charmander.name = "Charmander".to_string();
    charmander.retreat_cost = vec![EnergyType::Colorless];
    charmander.attacks = vec![fixtures::attack(
        "Ember",
        &[EnergyType::Fire, EnergyType::Colorless],
        "30",
    )];

    let mut volcanion = fixtures::typed_card(
        "xy11-25",
        Some(50),
        &[EnergyType::Fire, EnergyType::Water],
    );
    volcanion.name = "Volcanion".to_string();
    volcanion.retreat_cost = vec![EnergyType::Colorless, EnergyType::Colorless];

    vec![charmander, volcanion]
}

#[tokio::test(start_paused = true)]
async fn test_search_then_build_collection() {
    let mut harness = TestHarness::new();
    harness.catalog.set_cards(fire_and_water_cards()).await;

    harness.search("char").await;
    assert_eq!(harness.controller.results().len(), 2);

    assert!(harness.add("base1-46"));
    assert!(harness.add("xy11-25"));
    assert!(!harness.add("base1-46"));

    let stats = harness.aggregator.stats();
    assert_eq!(stats.card_count, 2);
    assert_eq!(stats.type_counts[&EnergyType::Fire], 2);
    assert_eq!(stats.type_counts[&EnergyType::Water], 1);
    assert_eq!(stats.average_hp, 75.0);
    // (30 + 0) / 2
    assert_eq!(stats.average_damage, 15.0);
    // 3 colorless retreat tokens over 2 cards -> round(1.5) = 2 icons
    assert_eq!(stats.retreat_icons(), vec![(EnergyType::Colorless, 2)]);
}

#[tokio::test(start_paused = true)]
async fn test_new_search_does_not_touch_collection() {
    let mut harness = TestHarness::new();
    harness.catalog.set_cards(fire_and_water_cards()).await;

    harness.search("char").await;
    assert!(harness.add("base1-46"));

    harness
        .catalog
        .set_cards(vec![fixtures::card("swsh1-1", "Celebi V")])
        .await;
    harness.search("celebi").await;

    assert_eq!(harness.controller.results().len(), 1);
    assert_eq!(harness.aggregator.collection().len(), 1);
    assert!(harness.aggregator.collection().contains("base1-46"));

    // Cards that are no longer in the results can't be added.
    assert!(!harness.add("xy11-25"));
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_then_clear() {
    let mut harness = TestHarness::new();
    harness.catalog.set_cards(fire_and_water_cards()).await;

    let mut rx = harness.controller.subscribe();
    for partial in ["v", "vo", "vol", "volc"] {
        harness.controller.set_query(partial);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    rx.changed().await.unwrap();

    let searches = harness.catalog.recorded_searches().await;
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].name, "volc");

    assert!(harness.add("xy11-25"));
    harness.aggregator.clear();

    let stats = harness.aggregator.stats();
    assert!(stats.is_empty());
    assert_eq!(stats.average_hp, 0.0);
    assert!(stats.attack_icons().is_empty());
}
