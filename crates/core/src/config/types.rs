use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Card catalog API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// API base URL (e.g., "https://api.pokemontcg.io/v2")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as `X-Api-Key`. Requests go out unauthenticated without it.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Fixed page size for every search
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Name searched for when the query is empty
    #[serde(default = "default_query")]
    pub default_query: String,
    /// Fields requested through the `select` parameter
    #[serde(default = "default_select_fields")]
    pub select_fields: Vec<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            page_size: default_page_size(),
            default_query: default_query(),
            select_fields: default_select_fields(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.pokemontcg.io/v2".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_query() -> String {
    "tyranitar".to_string()
}

fn default_select_fields() -> Vec<String> {
    [
        "id",
        "name",
        "rarity",
        "set",
        "images",
        "types",
        "hp",
        "attacks",
        "weaknesses",
        "resistances",
        "retreatCost",
        "flavorText",
        "artist",
        "tcgplayer",
        "cardmarket",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_timeout() -> u32 {
    30
}

/// Search-as-you-type configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub catalog: SanitizedCatalogConfig,
    pub search: SearchConfig,
}

/// Sanitized catalog config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub page_size: u32,
    pub default_query: String,
    pub select_fields: Vec<String>,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let catalog = &config.catalog;
        Self {
            catalog: SanitizedCatalogConfig {
                base_url: catalog.base_url.clone(),
                api_key_configured: catalog
                    .api_key
                    .as_ref()
                    .is_some_and(|k| !k.trim().is_empty()),
                page_size: catalog.page_size,
                default_query: catalog.default_query.clone(),
                select_fields: catalog.select_fields.clone(),
                timeout_secs: catalog.timeout_secs,
            },
            search: config.search.clone(),
        }
    }
}
