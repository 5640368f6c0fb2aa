pub mod error;
pub mod market;
pub mod pricing;

pub use error::CoreError;
pub use market::{ListingItem, PriceRangeSummary, SellerFrequency, TrendDirection, TrendPoint};
pub use pricing::{PriceQuote, PricingConfig, PricingEngine, PricingResult};
