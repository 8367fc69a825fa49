//! Card catalog integration.
//!
//! This module provides the `CardCatalog` trait and a client for the
//! Pokémon TCG API. Responses are validated into `Card` values here, so
//! nothing downstream has to deal with missing fields.

mod ptcg;
mod types;

pub use ptcg::PokemonTcgClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::card::Card;

/// Errors that can occur when querying the card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured or rejected (bad API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Trait for card catalog clients.
#[async_trait]
pub trait CardCatalog: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Search for cards matching the request, in catalog order.
    async fn search_cards(&self, request: &CardSearchRequest) -> Result<Vec<Card>, CatalogError>;
}
