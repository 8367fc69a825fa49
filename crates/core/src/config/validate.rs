use super::{types::Config, ConfigError};

/// Largest page size the catalog API accepts
pub const MAX_PAGE_SIZE: u32 = 250;

/// Check values that parse but cannot work.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let catalog = &config.catalog;

    let base_url = catalog.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::invalid("catalog.base_url", "cannot be empty"));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::invalid(
            "catalog.base_url",
            format!("'{}' is not an http(s) URL", base_url),
        ));
    }

    if catalog.page_size == 0 || catalog.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::invalid(
            "catalog.page_size",
            format!("must be between 1 and {}", MAX_PAGE_SIZE),
        ));
    }

    if catalog.default_query.trim().is_empty() {
        return Err(ConfigError::invalid("catalog.default_query", "cannot be blank"));
    }

    if catalog.select_fields.is_empty() {
        return Err(ConfigError::invalid("catalog.select_fields", "cannot be empty"));
    }
    if !catalog.select_fields.iter().any(|f| f == "id") {
        // Records are keyed by id; without it every card would be dropped.
        return Err(ConfigError::invalid("catalog.select_fields", "must include \"id\""));
    }

    if catalog.timeout_secs == 0 {
        return Err(ConfigError::invalid("catalog.timeout_secs", "cannot be 0"));
    }

    if config.search.debounce_ms == 0 {
        return Err(ConfigError::invalid("search.debounce_ms", "cannot be 0"));
    }

    Ok(())
}
