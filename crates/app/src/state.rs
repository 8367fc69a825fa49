use std::sync::Arc;

use cardbinder_core::{
    CardCatalog, CollectionAggregator, Config, SanitizedConfig, SearchController,
};
use tracing::{debug, warn};

use crate::commands::{Command, HELP};
use crate::metrics::{self, COMMANDS_TOTAL};
use crate::view;

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print; results arrive through the results watcher.
    Silent,
    Print(String),
    Quit,
}

/// Shared application state
pub struct AppState {
    config: Config,
    controller: SearchController,
    aggregator: CollectionAggregator,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn CardCatalog>) -> Self {
        let controller = SearchController::new(catalog, config.catalog.clone(), &config.search);
        Self {
            config,
            controller,
            aggregator: CollectionAggregator::new(),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    #[allow(dead_code)]
    pub fn aggregator(&self) -> &CollectionAggregator {
        &self.aggregator
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        COMMANDS_TOTAL.with_label_values(&[command.label()]).inc();
        debug!("Handling command: {:?}", command);

        match command {
            Command::Query(query) => {
                self.controller.set_query(query);
                Reply::Silent
            }
            Command::Add(id) => match self.controller.find(&id) {
                Some(card) => {
                    let name = card.name.clone();
                    if self.aggregator.add(card) {
                        Reply::Print(format!(
                            "Added {} ({}). {} cards in collection.",
                            name,
                            id,
                            self.aggregator.collection().len()
                        ))
                    } else {
                        Reply::Print(format!("{} is already in your collection.", id))
                    }
                }
                None => Reply::Print(format!("No card {} in the current results.", id)),
            },
            Command::Remove(id) => {
                if self.aggregator.remove(&id) {
                    Reply::Print(format!(
                        "Removed {}. {} cards in collection.",
                        id,
                        self.aggregator.collection().len()
                    ))
                } else {
                    Reply::Print(format!("{} is not in your collection.", id))
                }
            }
            Command::Clear => {
                let removed = self.aggregator.clear();
                Reply::Print(format!("Cleared {} cards from your collection.", removed))
            }
            Command::Show(id) => {
                let card = self
                    .controller
                    .find(&id)
                    .or_else(|| self.aggregator.collection().get(&id).cloned());
                match card {
                    Some(card) => Reply::Print(view::render_card_detail(&card)),
                    None => Reply::Print(format!("No card {} in results or collection.", id)),
                }
            }
            Command::Stats => Reply::Print(view::render_collection(
                self.aggregator.collection(),
                &self.aggregator.stats(),
            )),
            Command::Metrics => match metrics::encode_metrics() {
                Ok(text) => Reply::Print(text),
                Err(e) => {
                    warn!("Failed to encode metrics: {}", e);
                    Reply::Print(format!("Failed to encode metrics: {}", e))
                }
            },
            Command::Help => Reply::Print(HELP.to_string()),
            Command::Quit => Reply::Quit,
            Command::Invalid(message) => Reply::Print(message),
        }
    }

    /// Schedule the initial search for the default term.
    pub fn start(&mut self) {
        self.controller.set_query("");
    }

    /// Cancel any pending search.
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse;
    use cardbinder_core::testing::{fixtures, MockCardCatalog};
    use cardbinder_core::EnergyType;

    async fn state_with_results() -> (AppState, Arc<MockCardCatalog>) {
        let catalog = Arc::new(MockCardCatalog::new());
        let mut bulbasaur = fixtures::typed_card("base1-44", Some(40), &[EnergyType::Grass]);
        bulbasaur.name = "Bulbasaur".to_string();
        catalog
            .set_cards(vec![bulbasaur, fixtures::card("base1-1", "Alakazam")])
            .await;

        let mut state = AppState::new(Config::default(), catalog.clone());
        let mut rx = state.controller().subscribe();
        assert_eq!(state.handle(parse("bulba")), Reply::Silent);
        rx.changed().await.unwrap();
        (state, catalog)
    }

    fn printed(reply: Reply) -> String {
        match reply {
            Reply::Print(text) => text,
            other => panic!("expected Print, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_from_results() {
        let (mut state, catalog) = state_with_results().await;
        assert_eq!(catalog.recorded_searches().await[0].name, "bulba");

        let out = printed(state.handle(parse(":add base1-44")));
        assert!(out.contains("Added Bulbasaur"));
        assert!(out.contains("1 cards"));

        let out = printed(state.handle(parse(":add base1-44")));
        assert!(out.contains("already"));
        assert_eq!(state.aggregator().collection().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_unknown_id() {
        let (mut state, _) = state_with_results().await;
        let out = printed(state.handle(parse(":add nope-1")));
        assert!(out.contains("No card nope-1"));
        assert!(state.aggregator().collection().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_and_clear() {
        let (mut state, _) = state_with_results().await;
        state.handle(parse(":add base1-44"));
        state.handle(parse(":add base1-1"));

        let out = printed(state.handle(parse(":rm base1-44")));
        assert!(out.contains("Removed base1-44"));
        let out = printed(state.handle(parse(":rm base1-44")));
        assert!(out.contains("not in your collection"));

        let out = printed(state.handle(parse(":clear")));
        assert!(out.contains("Cleared 1 cards"));
        assert!(state.aggregator().stats().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_falls_back_to_collection() {
        let (mut state, catalog) = state_with_results().await;
        state.handle(parse(":add base1-44"));

        catalog.set_cards(vec![]).await;
        let mut rx = state.controller().subscribe();
        state.handle(parse("nothing"));
        rx.changed().await.unwrap();
        assert!(state.controller().results().is_empty());

        let out = printed(state.handle(parse(":show base1-44")));
        assert!(out.starts_with("Bulbasaur (base1-44)"));

        let out = printed(state.handle(parse(":show base1-1")));
        assert!(out.contains("No card base1-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_panel() {
        let (mut state, _) = state_with_results().await;
        let out = printed(state.handle(parse(":stats")));
        assert!(out.contains("empty"));

        state.handle(parse(":add base1-44"));
        let out = printed(state.handle(parse(":stats")));
        assert!(out.contains("Grass"));
        assert!(out.contains("Average HP:     40.0"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_searches_default_term() {
        let catalog = Arc::new(MockCardCatalog::new());
        let mut state = AppState::new(Config::default(), catalog.clone());
        let mut rx = state.controller().subscribe();

        state.start();
        rx.changed().await.unwrap();

        assert_eq!(catalog.recorded_searches().await[0].name, "tyranitar");
        assert_eq!(rx.borrow().term, "tyranitar");
    }

    #[tokio::test]
    async fn test_help_quit_and_invalid() {
        let mut state = AppState::new(Config::default(), Arc::new(MockCardCatalog::new()));
        assert!(printed(state.handle(parse(":help"))).contains(":add <id>"));
        assert!(printed(state.handle(parse(":bogus"))).contains("unknown command"));
        assert_eq!(state.handle(parse(":quit")), Reply::Quit);
    }

    #[tokio::test]
    async fn test_metrics_command() {
        let mut state = AppState::new(Config::default(), Arc::new(MockCardCatalog::new()));
        let out = printed(state.handle(parse(":metrics")));
        assert!(out.contains("cardbinder_commands_total"));
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let mut config = Config::default();
        config.catalog.api_key = Some("secret".to_string());
        let state = AppState::new(config, Arc::new(MockCardCatalog::new()));

        let json = serde_json::to_string(&state.sanitized_config()).unwrap();
        assert!(!json.contains("secret"));
        assert!(state.sanitized_config().catalog.api_key_configured);
    }
}
