//! Search-as-you-type controller.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info};

use super::debounce::Debouncer;
use crate::card::Card;
use crate::catalog::{CardCatalog, CardSearchRequest};
use crate::config::{CatalogConfig, SearchConfig};
use crate::metrics;

/// The most recently applied search result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchSnapshot {
    /// Name term the results were fetched for (after defaulting).
    pub term: String,
    /// Cards in catalog order.
    pub cards: Vec<Card>,
    /// When the results were applied. `None` before the first fetch.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SearchSnapshot {
    pub fn find(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

/// Owns the query text, debounces it and publishes fetched results.
///
/// Each [`set_query`](SearchController::set_query) restarts the debounce
/// timer. When the timer fires the request is spawned as its own task, so a
/// later keystroke never aborts a request that is already on the wire. Results
/// are applied in completion order: whichever response lands last wins.
///
/// Fetch failures are logged and leave the published results untouched.
pub struct SearchController {
    catalog: Arc<dyn CardCatalog>,
    catalog_config: CatalogConfig,
    query: String,
    debouncer: Debouncer,
    results: Arc<watch::Sender<SearchSnapshot>>,
}

impl SearchController {
    pub fn new(
        catalog: Arc<dyn CardCatalog>,
        catalog_config: CatalogConfig,
        search_config: &SearchConfig,
    ) -> Self {
        let (results, _) = watch::channel(SearchSnapshot::default());

        Self {
            catalog,
            catalog_config,
            query: String::new(),
            debouncer: Debouncer::new(Duration::from_millis(search_config.debounce_ms)),
            results: Arc::new(results),
        }
    }

    /// Record a new query and (re)start the debounce timer.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();

        let request = CardSearchRequest::new(self.search_term(), &self.catalog_config);
        let catalog = Arc::clone(&self.catalog);
        let results = Arc::clone(&self.results);

        if self.debouncer.cancel() {
            metrics::DEBOUNCE_CANCELLATIONS.inc();
        }
        self.debouncer.schedule(async move {
            tokio::spawn(run_search(catalog, request, results));
        });
    }

    /// Current query text as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The name term a search for the current query would use.
    pub fn search_term(&self) -> String {
        if self.query.trim().is_empty() {
            self.catalog_config.default_query.clone()
        } else {
            self.query.clone()
        }
    }

    /// Whether a debounced search has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Receive every newly applied result set.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.results.subscribe()
    }

    /// Copy of the currently published results.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.results.borrow().clone()
    }

    /// Cards from the currently published results.
    pub fn results(&self) -> Vec<Card> {
        self.results.borrow().cards.clone()
    }

    /// Look up a card in the current results by id.
    pub fn find(&self, id: &str) -> Option<Card> {
        self.results.borrow().find(id).cloned()
    }

    /// Cancel the pending timer. Requests already in flight still complete.
    pub fn shutdown(&mut self) {
        if self.debouncer.cancel() {
            debug!("Cancelled pending search on shutdown");
        }
    }
}

async fn run_search(
    catalog: Arc<dyn CardCatalog>,
    request: CardSearchRequest,
    results: Arc<watch::Sender<SearchSnapshot>>,
) {
    debug!("Searching {} for '{}'", catalog.name(), request.name);

    match catalog.search_cards(&request).await {
        Ok(cards) => {
            info!("Search for '{}' returned {} cards", request.name, cards.len());
            results.send_replace(SearchSnapshot {
                term: request.name,
                cards,
                fetched_at: Some(Utc::now()),
            });
        }
        Err(e) => {
            metrics::SEARCH_FAILURES.inc();
            error!("Error fetching cards for '{}': {}", request.name, e);
        }
    }
}
