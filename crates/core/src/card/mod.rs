//! Card model shared by the catalog client, the search controller and the
//! collection aggregator.

mod energy;
mod types;

pub use energy::EnergyType;
pub use types::*;

/// Lenient integer parse: the leading run of ASCII digits after optional
/// whitespace, as printed values like "30+", "20×" or "120" carry.
///
/// Returns `None` when there is no leading digit or the value overflows.
pub fn parse_leading_int(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
