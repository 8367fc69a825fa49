//! Configuration: TOML file, `CARDBINDER_*` overrides and the bare
//! `PTCG_API_KEY` variable, layered over built-in defaults.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_env, load_config_from_str, API_KEY_ENV, ENV_PREFIX};
pub use types::*;
pub use validate::{validate_config, MAX_PAGE_SIZE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// A value parsed but is unusable; `field` is its dotted path.
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
