//! Pokémon TCG API client.
//!
//! An API key is optional but raises the rate limit; it is sent in the
//! `X-Api-Key` header.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{CardCatalog, CardSearchRequest, CatalogError};
use crate::card::{
    parse_leading_int, Attack, Card, CardImages, CardSet, EnergyType, MarketLinks, TypeModifier,
};
use crate::config::CatalogConfig;
use crate::metrics;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Pokémon TCG API client.
pub struct PokemonTcgClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PokemonTcgClient {
    /// Create a new client from the catalog configuration.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let api_key = config
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if api_key.is_none() {
            warn!("No catalog API key configured, requests are rate limited more strictly");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn fetch(&self, request: &CardSearchRequest) -> Result<Vec<Card>, CatalogError> {
        let url = format!("{}/cards", self.base_url);

        debug!(
            "Catalog card search: name='{}', page_size={}",
            request.name, request.page_size
        );

        let mut http_request = self.client.get(&url).query(&[
            ("q", request.name_filter()),
            ("pageSize", request.page_size.to_string()),
            ("select", request.select_param()),
        ]);

        if let Some(key) = &self.api_key {
            http_request = http_request.header(API_KEY_HEADER, key);
        }

        let response = http_request.send().await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(CatalogError::NotConfigured(
                "Catalog rejected the API key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let cards = parse_cards_response(&body)?;

        debug!("Catalog returned {} cards", cards.len());
        Ok(cards)
    }
}

#[async_trait]
impl CardCatalog for PokemonTcgClient {
    fn name(&self) -> &str {
        "pokemontcg"
    }

    async fn search_cards(&self, request: &CardSearchRequest) -> Result<Vec<Card>, CatalogError> {
        let started = Instant::now();
        let result = self.fetch(request).await;

        let status = if result.is_ok() { "success" } else { "error" };
        metrics::CATALOG_REQUESTS.with_label_values(&[status]).inc();
        metrics::CATALOG_REQUEST_DURATION
            .with_label_values(&[status])
            .observe(started.elapsed().as_secs_f64());
        if let Ok(cards) = &result {
            metrics::SEARCH_RESULTS
                .with_label_values(&[])
                .observe(cards.len() as f64);
        }

        result
    }
}

/// Parse a `/cards` response body into validated cards.
///
/// A missing or null `data` array yields no cards. Records without an `id`
/// or with fields of the wrong shape are skipped; the rest of the page is
/// kept.
pub(crate) fn parse_cards_response(body: &str) -> Result<Vec<Card>, CatalogError> {
    let response: CardsResponse = serde_json::from_str(body).map_err(|e| {
        CatalogError::ParseError(format!("Failed to parse card search response: {}", e))
    })?;

    let cards = response
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| {
            let raw: RawCard = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping malformed catalog record: {}", e);
                    return None;
                }
            };
            let card = raw.into_card();
            if card.is_none() {
                warn!("Skipping catalog record without an id");
            }
            card
        })
        .collect();

    Ok(cards)
}

// ============================================================================
// API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct CardsResponse {
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    id: Option<String>,
    name: Option<String>,
    rarity: Option<String>,
    set: Option<RawSet>,
    images: Option<RawImages>,
    types: Option<Vec<String>>,
    hp: Option<StringOrNumber>,
    attacks: Option<Vec<RawAttack>>,
    weaknesses: Option<Vec<RawTypeModifier>>,
    resistances: Option<Vec<RawTypeModifier>>,
    retreat_cost: Option<Vec<String>>,
    flavor_text: Option<String>,
    artist: Option<String>,
    tcgplayer: Option<RawMarket>,
    cardmarket: Option<RawMarket>,
}

#[derive(Debug, Deserialize)]
struct RawSet {
    id: Option<String>,
    name: Option<String>,
    series: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawImages {
    small: Option<String>,
    large: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAttack {
    name: Option<String>,
    cost: Option<Vec<String>>,
    damage: Option<StringOrNumber>,
    text: Option<String>,
}

/// Numeric fields the API documents as strings ("60", "30+").
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(u32),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::Text(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTypeModifier {
    #[serde(rename = "type")]
    energy: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMarket {
    url: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

/// Energy tokens with empty entries dropped.
fn energy_list(raw: Option<Vec<String>>) -> Vec<EnergyType> {
    raw.unwrap_or_default()
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .map(EnergyType::from)
        .collect()
}

impl RawCard {
    fn into_card(self) -> Option<Card> {
        let id = self.id.filter(|id| !id.is_empty())?;

        Some(Card {
            id,
            name: self.name.unwrap_or_default(),
            rarity: self.rarity,
            set: self.set.map(|s| s.into()),
            images: self.images.map(|i| i.into()),
            types: energy_list(self.types),
            hp: self.hp.map(String::from).as_deref().and_then(parse_leading_int),
            attacks: self
                .attacks
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.into())
                .collect(),
            weaknesses: modifier_list(self.weaknesses),
            resistances: modifier_list(self.resistances),
            retreat_cost: energy_list(self.retreat_cost),
            flavor_text: self.flavor_text,
            artist: self.artist,
            market: MarketLinks {
                tcgplayer: self.tcgplayer.and_then(|m| m.url),
                cardmarket: self.cardmarket.and_then(|m| m.url),
            },
        })
    }
}

fn modifier_list(raw: Option<Vec<RawTypeModifier>>) -> Vec<TypeModifier> {
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(|m| {
            let energy = m.energy.filter(|t| !t.trim().is_empty())?;
            Some(TypeModifier {
                energy: EnergyType::from(energy),
                value: m.value.unwrap_or_default(),
            })
        })
        .collect()
}

impl From<RawSet> for CardSet {
    fn from(s: RawSet) -> Self {
        Self {
            id: s.id.unwrap_or_default(),
            name: s.name.unwrap_or_default(),
            series: s.series,
        }
    }
}

impl From<RawImages> for CardImages {
    fn from(i: RawImages) -> Self {
        Self {
            small: i.small,
            large: i.large,
        }
    }
}

impl From<RawAttack> for Attack {
    fn from(a: RawAttack) -> Self {
        let damage = a.damage.map(String::from).unwrap_or_default();
        let damage_value = parse_leading_int(&damage).unwrap_or(0);
        Self {
            name: a.name.unwrap_or_default(),
            cost: energy_list(a.cost),
            damage,
            damage_value,
            text: a.text,
        }
    }
}
