use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Pricing strategy knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Fixed amount (whole currency units) subtracted from the competitor's
    /// lowest price to win the price-comparison slot
    pub undercut_offset: i64,

    /// Marketplace commission applied to the target price
    pub fee_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            undercut_offset: 50,
            fee_rate: 0.06,
        }
    }
}

/// Validated price pair for one listing-economics calculation.
///
/// Construct via [`PriceQuote::from_raw`]; raw request numbers never reach
/// the arithmetic directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub wholesale_price: i64,
    pub competitor_lowest_price: i64,
}

impl PriceQuote {
    /// Validate untyped JSON numbers into a quote.
    ///
    /// Rejects non-finite and negative values. Fractional inputs are rounded
    /// to whole currency units (prices are in the currency's smallest unit).
    pub fn from_raw(wholesale_price: f64, competitor_lowest_price: f64) -> Result<Self, CoreError> {
        let wholesale = validate_price("wholesale_price", wholesale_price)?;
        let competitor = validate_price("competitor_lowest_price", competitor_lowest_price)?;
        Ok(Self {
            wholesale_price: wholesale,
            competitor_lowest_price: competitor,
        })
    }
}

fn validate_price(field: &str, value: f64) -> Result<i64, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "{field} must not be negative"
        )));
    }
    Ok(value.round() as i64)
}

/// Listing economics for one price point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingResult {
    /// Recommended listing price (competitor lowest minus the undercut offset)
    pub target_price: i64,

    /// Marketplace commission at the target price, rounded half-up
    pub fee: i64,

    /// Target price minus supplier cost minus fee; negative means the price
    /// point is unviable, which is a valid output and not an error
    pub margin: i64,

    /// Margin as a percentage of the target price, one decimal place
    pub margin_rate_display: String,
}

/// Listing-economics calculator
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Derive target price, fee, margin, and margin rate for a quote.
    ///
    /// Fails with [`CoreError::NonPositiveTargetPrice`] when the competitor
    /// price does not exceed the undercut offset: at zero the margin rate is
    /// a division by zero, and a negative listing price is meaningless, so
    /// both fail fast instead of producing a NaN/Infinity display string.
    pub fn compute_listing_economics(&self, quote: &PriceQuote) -> Result<PricingResult, CoreError> {
        let target_price = quote.competitor_lowest_price - self.config.undercut_offset;
        if target_price <= 0 {
            return Err(CoreError::NonPositiveTargetPrice {
                target: target_price,
            });
        }

        // f64::round is half-away-from-zero; target_price > 0 here, so this
        // is the half-up rounding the fee schedule expects
        let fee = (target_price as f64 * self.config.fee_rate).round() as i64;
        let margin = target_price - quote.wholesale_price - fee;
        let margin_rate = margin as f64 / target_price as f64 * 100.0;

        Ok(PricingResult {
            target_price,
            fee,
            margin,
            margin_rate_display: format!("{margin_rate:.1}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> PricingEngine {
        PricingEngine::new(PricingConfig::default())
    }

    #[test]
    fn test_worked_example() {
        let quote = PriceQuote::from_raw(5000.0, 8900.0).unwrap();
        let result = engine().compute_listing_economics(&quote).unwrap();

        assert_eq!(result.target_price, 8850);
        assert_eq!(result.fee, 531);
        assert_eq!(result.margin, 3319);
        assert_eq!(result.margin_rate_display, "37.5");
    }

    #[test]
    fn test_negative_margin_is_a_valid_output() {
        // Selling below cost: margin goes negative but the call succeeds
        let quote = PriceQuote::from_raw(9000.0, 8900.0).unwrap();
        let result = engine().compute_listing_economics(&quote).unwrap();

        assert_eq!(result.margin, 8850 - 9000 - 531);
        assert!(result.margin < 0);
        assert_eq!(result.margin_rate_display, "-7.7");
    }

    #[test]
    fn test_zero_target_price_fails_fast() {
        let quote = PriceQuote::from_raw(0.0, 50.0).unwrap();
        let err = engine().compute_listing_economics(&quote).unwrap_err();

        assert_eq!(err, CoreError::NonPositiveTargetPrice { target: 0 });
    }

    #[test]
    fn test_negative_target_price_fails_fast() {
        let quote = PriceQuote::from_raw(0.0, 30.0).unwrap();
        let err = engine().compute_listing_economics(&quote).unwrap_err();

        assert_eq!(err, CoreError::NonPositiveTargetPrice { target: -20 });
    }

    #[test]
    fn test_rejects_negative_price() {
        let err = PriceQuote::from_raw(-1.0, 8900.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_non_finite_price() {
        assert!(PriceQuote::from_raw(f64::NAN, 8900.0).is_err());
        assert!(PriceQuote::from_raw(5000.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_idempotent() {
        let quote = PriceQuote::from_raw(5000.0, 8900.0).unwrap();
        let e = engine();
        assert_eq!(
            e.compute_listing_economics(&quote).unwrap(),
            e.compute_listing_economics(&quote).unwrap()
        );
    }
}
