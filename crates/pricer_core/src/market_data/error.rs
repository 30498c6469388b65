//! Market data error types.
//!
//! This module provides structured error handling for market snapshot
//! construction and dividend schedules.

use crate::types::PricingError;
use thiserror::Error;

/// Market data construction errors.
///
/// # Variants
///
/// - `InvalidSpot`: Non-positive or non-finite spot price
/// - `InvalidRate`: Non-finite risk-free rate
/// - `InvalidVolatility`: Negative or non-finite volatility
/// - `InvalidDividend`: Negative or non-finite dividend amount
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidSpot { spot: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Spot price must be finite and strictly positive.
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Risk-free rate must be finite (negative rates are allowed).
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Volatility must be finite and non-negative.
    #[error("Invalid volatility: sigma = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Dividend amount must be finite and non-negative.
    #[error("Invalid dividend on {ex_date}: amount = {amount}")]
    InvalidDividend {
        /// Ex-dividend date (ISO 8601)
        ex_date: String,
        /// The invalid amount
        amount: f64,
    },
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::Domain(err.to_string())
    }
}
