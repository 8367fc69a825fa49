//! Request types for catalog searches.

use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;

/// Parameters of a single card search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSearchRequest {
    /// Card name to match (already defaulted; never empty).
    pub name: String,
    /// Fixed page size.
    pub page_size: u32,
    /// Fields to select.
    pub select: Vec<String>,
}

impl CardSearchRequest {
    /// Build a request for `name` using the catalog's fixed page size and
    /// field selection.
    pub fn new(name: impl Into<String>, config: &CatalogConfig) -> Self {
        Self {
            name: name.into(),
            page_size: config.page_size,
            select: config.select_fields.clone(),
        }
    }

    /// The `q` parameter value, e.g. `name:pikachu`.
    pub fn name_filter(&self) -> String {
        format!("name:{}", self.name)
    }

    /// The `select` parameter value.
    pub fn select_param(&self) -> String {
        self.select.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_config() {
        let config = CatalogConfig {
            page_size: 15,
            select_fields: vec!["id".to_string(), "name".to_string()],
            ..Default::default()
        };
        let request = CardSearchRequest::new("pikachu", &config);
        assert_eq!(request.page_size, 15);
        assert_eq!(request.name_filter(), "name:pikachu");
        assert_eq!(request.select_param(), "id,name");
    }
}
