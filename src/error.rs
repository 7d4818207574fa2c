//! Error handling for the pricing crate.
//!
//! Only boundary operations (configuration validation, payload parsing)
//! return errors. The pricing pipeline itself is total: it always produces a
//! complete `Calculations` record and reports degraded configuration through
//! diagnostics instead of failing.

/// Crate error type
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("invalid pricing configuration: {0}")]
    InvalidConfig(String),

    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PricingError>;
