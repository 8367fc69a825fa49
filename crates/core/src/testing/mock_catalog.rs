//! Mock card catalog for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::card::Card;
use crate::catalog::{CardCatalog, CardSearchRequest, CatalogError};

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCardSearch {
    /// Name term that was searched.
    pub name: String,
    /// Page size requested.
    pub page_size: u32,
    /// Selected fields.
    pub select: Vec<String>,
    /// When the search was made.
    pub timestamp: Instant,
}

/// A handler that produces results dynamically based on the name term.
type QueryHandler = Box<dyn Fn(&str) -> Vec<Card> + Send + Sync>;

/// Mock implementation of the CardCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable cards (truncated to the requested page size)
/// - Track searches for assertions
/// - Simulate failures and slow responses
///
/// Searches are recorded before an injected error is returned, so failed
/// searches still count.
///
/// # Example
///
/// ```rust,ignore
/// use cardbinder_core::testing::{MockCardCatalog, fixtures};
///
/// let catalog = MockCardCatalog::new();
/// catalog.set_cards(vec![fixtures::card("base1-58", "Pikachu")]).await;
///
/// let cards = catalog.search_cards(&request).await?;
/// assert_eq!(cards.len(), 1);
/// assert_eq!(catalog.search_count().await, 1);
/// ```
pub struct MockCardCatalog {
    /// Configured cards to return.
    cards: Arc<RwLock<Vec<Card>>>,
    /// Recorded searches.
    searches: Arc<RwLock<Vec<RecordedCardSearch>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    /// Simulated response time.
    latency: Arc<RwLock<Option<Duration>>>,
    /// Query handler for dynamic results.
    query_handler: Arc<RwLock<Option<QueryHandler>>>,
}

impl std::fmt::Debug for MockCardCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCardCatalog")
            .field("cards", &"<cards>")
            .field("searches", &"<searches>")
            .field("next_error", &"<next_error>")
            .field("latency", &"<latency>")
            .field("query_handler", &"<handler>")
            .finish()
    }
}

impl Default for MockCardCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCardCatalog {
    /// Create a new mock catalog with no cards.
    pub fn new() -> Self {
        Self {
            cards: Arc::new(RwLock::new(Vec::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            latency: Arc::new(RwLock::new(None)),
            query_handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the cards returned by subsequent searches.
    pub async fn set_cards(&self, cards: Vec<Card>) {
        *self.cards.write().await = cards;
    }

    /// Get recorded searches.
    pub async fn recorded_searches(&self) -> Vec<RecordedCardSearch> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Clear recorded searches.
    pub async fn clear_recorded(&self) {
        self.searches.write().await.clear();
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every response by `latency`.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = Some(latency);
    }

    /// Produce results from the name term instead of the configured cards.
    ///
    /// ```rust,ignore
    /// catalog.set_query_handler(|name| {
    ///     if name == "pikachu" { vec![pikachu.clone()] } else { vec![] }
    /// }).await;
    /// ```
    pub async fn set_query_handler<F>(&self, handler: F)
    where
        F: Fn(&str) -> Vec<Card> + Send + Sync + 'static,
    {
        *self.query_handler.write().await = Some(Box::new(handler));
    }

    async fn record(&self, request: &CardSearchRequest) {
        self.searches.write().await.push(RecordedCardSearch {
            name: request.name.clone(),
            page_size: request.page_size,
            select: request.select.clone(),
            timestamp: Instant::now(),
        });
    }
}

#[async_trait]
impl CardCatalog for MockCardCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_cards(&self, request: &CardSearchRequest) -> Result<Vec<Card>, CatalogError> {
        self.record(request).await;

        let error = self.next_error.write().await.take();
        let latency = *self.latency.read().await;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(err) = error {
            return Err(err);
        }

        let cards = match self.query_handler.read().await.as_ref() {
            Some(handler) => handler(&request.name),
            None => self.cards.read().await.clone(),
        };

        Ok(cards
            .into_iter()
            .take(request.page_size as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::testing::fixtures;
    use tokio_test::{assert_err, assert_ok};

    fn request(name: &str, page_size: u32) -> CardSearchRequest {
        let config = CatalogConfig {
            page_size,
            ..Default::default()
        };
        CardSearchRequest::new(name, &config)
    }

    #[tokio::test]
    async fn test_returns_configured_cards_up_to_page_size() {
        let catalog = MockCardCatalog::new();
        catalog
            .set_cards((1..=5).map(|i| fixtures::card(&i.to_string(), "Magikarp")).collect())
            .await;

        let cards = assert_ok!(catalog.search_cards(&request("magikarp", 3)).await);
        assert_eq!(cards.len(), 3);
        assert_eq!(catalog.search_count().await, 1);
    }

    #[tokio::test]
    async fn test_next_error_is_consumed_once() {
        let catalog = MockCardCatalog::new();
        catalog
            .set_next_error(CatalogError::ParseError("bad".to_string()))
            .await;

        assert_err!(catalog.search_cards(&request("x", 10)).await);
        assert_ok!(catalog.search_cards(&request("x", 10)).await);
        assert_eq!(catalog.search_count().await, 2);
    }

    #[tokio::test]
    async fn test_query_handler() {
        let catalog = MockCardCatalog::new();
        catalog
            .set_query_handler(|name| {
                if name == "ditto" {
                    vec![fixtures::card("ditto-1", "Ditto")]
                } else {
                    vec![]
                }
            })
            .await;

        assert_eq!(
            catalog.search_cards(&request("ditto", 10)).await.unwrap().len(),
            1
        );
        assert!(catalog
            .search_cards(&request("mew", 10))
            .await
            .unwrap()
            .is_empty());

        let names: Vec<String> = catalog
            .recorded_searches()
            .await
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["ditto", "mew"]);
    }
}
