//! Product category enum.

use serde::{Deserialize, Serialize};

/// Product category.
///
/// The backend stores categories as display strings, so the serde names
/// match the storefront labels exactly (note the space in "Gift Sets").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Stationery,
    #[serde(rename = "Gift Sets")]
    GiftSets,
    Paper,
    Chitrayan,
}

impl Category {
    /// All categories, in storefront display order.
    pub const ALL: [Self; 4] = [Self::Stationery, Self::GiftSets, Self::Paper, Self::Chitrayan];

    /// The display/wire label for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stationery => "Stationery",
            Self::GiftSets => "Gift Sets",
            Self::Paper => "Paper",
            Self::Chitrayan => "Chitrayan",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Stationery" => Ok(Self::Stationery),
            "Gift Sets" => Ok(Self::GiftSets),
            "Paper" => Ok(Self::Paper),
            "Chitrayan" => Ok(Self::Chitrayan),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}
