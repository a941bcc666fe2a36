//! Product category labels.

use serde::{Deserialize, Serialize};

/// A product category.
///
/// The backend validates categories against this closed set, and the
/// serialized form is the exact human-readable label it stores, so the
/// serde names carry spaces and ampersands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fashion & Accessories")]
    FashionAndAccessories,
    #[serde(rename = "Electronics")]
    Electronics,
    #[serde(rename = "Toys & Games")]
    ToysAndGames,
    #[serde(rename = "Home & Living")]
    HomeAndLiving,
}

impl Category {
    /// All categories, in the order the storefront lists them.
    pub const ALL: [Self; 4] = [
        Self::FashionAndAccessories,
        Self::Electronics,
        Self::ToysAndGames,
        Self::HomeAndLiving,
    ];

    /// The backend's label for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FashionAndAccessories => "Fashion & Accessories",
            Self::Electronics => "Electronics",
            Self::ToysAndGames => "Toys & Games",
            Self::HomeAndLiving => "Home & Living",
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
            "Fashion & Accessories" => Ok(Self::FashionAndAccessories),
            "Electronics" => Ok(Self::Electronics),
            "Toys & Games" => Ok(Self::ToysAndGames),
            "Home & Living" => Ok(Self::HomeAndLiving),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_backend_labels() {
        let json = serde_json::to_string(&Category::FashionAndAccessories).unwrap();
        assert_eq!(json, "\"Fashion & Accessories\"");

        let parsed: Category = serde_json::from_str("\"Toys & Games\"").unwrap();
        assert_eq!(parsed, Category::ToysAndGames);
    }

    #[test]
    fn test_from_str_matches_display() {
        for category in Category::ALL {
            let roundtripped: Category = category.to_string().parse().unwrap();
            assert_eq!(roundtripped, category);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("Groceries".parse::<Category>().is_err());
    }
}
