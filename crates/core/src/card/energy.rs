//! Elemental energy types used for card types, attack costs and retreat costs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An energy/elemental type as reported by the catalog.
///
/// Unknown tokens are preserved in [`EnergyType::Other`] so that aggregation
/// still counts them, even though they have no icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnergyType {
    Bug,
    Darkness,
    Dragon,
    Lightning,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Colorless,
    Poison,
    Psychic,
    Rock,
    Metal,
    Water,
    Other(String),
}

impl EnergyType {
    /// All known types, in the catalog's canonical order.
    pub const KNOWN: [EnergyType; 18] = [
        EnergyType::Bug,
        EnergyType::Darkness,
        EnergyType::Dragon,
        EnergyType::Lightning,
        EnergyType::Fairy,
        EnergyType::Fighting,
        EnergyType::Fire,
        EnergyType::Flying,
        EnergyType::Ghost,
        EnergyType::Grass,
        EnergyType::Ground,
        EnergyType::Ice,
        EnergyType::Colorless,
        EnergyType::Poison,
        EnergyType::Psychic,
        EnergyType::Rock,
        EnergyType::Metal,
        EnergyType::Water,
    ];

    /// Parse a catalog token. Matching is exact, like the catalog itself.
    pub fn parse(token: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|t| t.as_str() == token)
            .cloned()
            .unwrap_or_else(|| EnergyType::Other(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            EnergyType::Bug => "Bug",
            EnergyType::Darkness => "Darkness",
            EnergyType::Dragon => "Dragon",
            EnergyType::Lightning => "Lightning",
            EnergyType::Fairy => "Fairy",
            EnergyType::Fighting => "Fighting",
            EnergyType::Fire => "Fire",
            EnergyType::Flying => "Flying",
            EnergyType::Ghost => "Ghost",
            EnergyType::Grass => "Grass",
            EnergyType::Ground => "Ground",
            EnergyType::Ice => "Ice",
            EnergyType::Colorless => "Colorless",
            EnergyType::Poison => "Poison",
            EnergyType::Psychic => "Psychic",
            EnergyType::Rock => "Rock",
            EnergyType::Metal => "Metal",
            EnergyType::Water => "Water",
            EnergyType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EnergyType::Other(_))
    }

    /// Chart color (hex). Unknown types are drawn white.
    pub fn color(&self) -> &'static str {
        match self {
            EnergyType::Bug => "#A8B820",
            EnergyType::Darkness => "#705848",
            EnergyType::Dragon => "#7038F8",
            EnergyType::Lightning => "#F8D030",
            EnergyType::Fairy => "#EE99AC",
            EnergyType::Fighting => "#C03028",
            EnergyType::Fire => "#F08030",
            EnergyType::Flying => "#A890F0",
            EnergyType::Ghost => "#705898",
            EnergyType::Grass => "#78C850",
            EnergyType::Ground => "#E0C068",
            EnergyType::Ice => "#98D8D8",
            EnergyType::Colorless => "#A8A878",
            EnergyType::Poison => "#A040A0",
            EnergyType::Psychic => "#F85888",
            EnergyType::Rock => "#B8A038",
            EnergyType::Metal => "#B8B8D0",
            EnergyType::Water => "#6890F0",
            EnergyType::Other(_) => "#ffffff",
        }
    }

    /// Short bracketed glyph used as the terminal "icon".
    ///
    /// Returns `None` for unknown types, which are not drawn.
    pub fn icon(&self) -> Option<&'static str> {
        let icon = match self {
            EnergyType::Bug => "[B]",
            EnergyType::Darkness => "[D]",
            EnergyType::Dragon => "[N]",
            EnergyType::Lightning => "[L]",
            EnergyType::Fairy => "[Y]",
            EnergyType::Fighting => "[F]",
            EnergyType::Fire => "[R]",
            EnergyType::Flying => "[V]",
            EnergyType::Ghost => "[H]",
            EnergyType::Grass => "[G]",
            EnergyType::Ground => "[E]",
            EnergyType::Ice => "[I]",
            EnergyType::Colorless => "[C]",
            EnergyType::Poison => "[P]",
            EnergyType::Psychic => "[S]",
            EnergyType::Rock => "[K]",
            EnergyType::Metal => "[M]",
            EnergyType::Water => "[W]",
            EnergyType::Other(_) => return None,
        };
        Some(icon)
    }
}

impl From<String> for EnergyType {
    fn from(s: String) -> Self {
        EnergyType::parse(&s)
    }
}

impl From<EnergyType> for String {
    fn from(t: EnergyType) -> Self {
        match t {
            EnergyType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EnergyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(EnergyType::parse("Fire"), EnergyType::Fire);
        assert_eq!(EnergyType::parse("Colorless"), EnergyType::Colorless);
        for t in EnergyType::KNOWN.iter() {
            assert_eq!(&EnergyType::parse(t.as_str()), t);
        }
    }

    #[test]
    fn test_parse_unknown_type_is_preserved() {
        let t = EnergyType::parse("Shadow");
        assert_eq!(t, EnergyType::Other("Shadow".to_string()));
        assert!(!t.is_known());
        assert_eq!(t.as_str(), "Shadow");
        assert!(t.icon().is_none());
        assert_eq!(t.color(), "#ffffff");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(!EnergyType::parse("fire").is_known());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let types: Vec<EnergyType> = serde_json::from_str(r#"["Water","Mystery"]"#).unwrap();
        assert_eq!(
            types,
            vec![EnergyType::Water, EnergyType::Other("Mystery".to_string())]
        );
        assert_eq!(
            serde_json::to_string(&types).unwrap(),
            r#"["Water","Mystery"]"#
        );
    }

    #[test]
    fn test_every_known_type_has_icon() {
        assert!(EnergyType::KNOWN.iter().all(|t| t.icon().is_some()));
    }
}
