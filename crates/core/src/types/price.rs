//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price in the marketplace's single display currency (USD).
///
/// The backend transmits prices as plain JSON numbers; construct a `Price`
/// with [`Price::try_from`] to reject NaN and infinite values at the wire
/// boundary instead of letting them reach templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price from a decimal amount in dollars.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The amount in the currency's standard unit (dollars, not cents).
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = rust_decimal::Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::try_from(value).map(Self)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        let price = Price::new(Decimal::new(1999, 2));
        assert_eq!(price.display(), "$19.99");

        let whole = Price::new(Decimal::new(12, 0));
        assert_eq!(whole.display(), "$12.00");
    }

    #[test]
    fn test_try_from_f64() {
        let price = Price::try_from(12.5).unwrap();
        assert_eq!(price.display(), "$12.50");
    }

    #[test]
    fn test_try_from_rejects_non_finite() {
        assert!(Price::try_from(f64::NAN).is_err());
        assert!(Price::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_serde_uses_decimal_string() {
        let price = Price::new(Decimal::new(450, 2));
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"4.50\"");
    }
}
