pub mod card;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod metrics;
pub mod search;
pub mod testing;

pub use card::{Attack, Card, CardImages, CardSet, EnergyType, MarketLinks, TypeModifier};
pub use catalog::{CardCatalog, CardSearchRequest, CatalogError, PokemonTcgClient};
pub use collection::{Collection, CollectionAggregator, CollectionStats, EnergyHistogram};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, CatalogConfig,
    Config, ConfigError, SanitizedConfig, SearchConfig,
};
pub use search::{Debouncer, SearchController, SearchSnapshot, TimerHandle};
