use thiserror::Error;

/// Domain errors for the pricing and aggregation core
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A price field was missing, non-numeric, non-finite, or negative
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Undercutting drove the target price to zero or below; the margin
    /// rate would be undefined (or nonsensical), so the calculation refuses
    /// rather than emit a NaN/Infinity display string
    #[error("target price {target} is not positive; competitor price must exceed the undercut offset")]
    NonPositiveTargetPrice { target: i64 },

    /// Aggregation over an empty listing set
    #[error("empty input: at least one listing is required")]
    EmptyInput,
}
