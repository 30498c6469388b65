//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing operations (the shared taxonomy)
//! - `DateError`: Errors from date construction and parsing
//!
//! Module-level errors elsewhere in the workspace (market data, instruments,
//! analytical formulas, engine configuration) convert into [`PricingError`]
//! through `From` implementations so callers only ever match on one type.

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Every pricing call either returns a price or one of these variants.
/// There is no partial or degraded result.
///
/// # Variants
/// - `Configuration`: Pricing method incompatible with the contract, unknown
///   method name, or invalid engine settings
/// - `Domain`: Inputs outside the model's domain (non-positive maturity,
///   spot or strike, negative volatility)
/// - `NumericalInstability`: A computation produced a non-finite value
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::Domain("maturity must be positive".to_string());
/// assert_eq!(format!("{}", err), "Domain error: maturity must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Pricing method or engine configuration is invalid for the request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input lies outside the domain of the pricing model.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl PricingError {
    /// Returns whether this is a configuration error.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, PricingError::Configuration(_))
    }

    /// Returns whether this is a domain error.
    #[inline]
    pub fn is_domain(&self) -> bool {
        matches!(self, PricingError::Domain(_))
    }
}

/// Date-related errors.
///
/// Provides structured error handling for date construction and parsing
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    ParseError(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::Domain(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::Configuration("unknown method 'Binomial'".to_string());
        assert_eq!(
            format!("{}", err),
            "Configuration error: unknown method 'Binomial'"
        );

        let err = PricingError::Domain("spot must be positive".to_string());
        assert_eq!(format!("{}", err), "Domain error: spot must be positive");

        let err = PricingError::NumericalInstability("NaN price".to_string());
        assert_eq!(format!("{}", err), "Numerical instability: NaN price");
    }

    #[test]
    fn test_pricing_error_predicates() {
        assert!(PricingError::Configuration(String::new()).is_configuration());
        assert!(!PricingError::Configuration(String::new()).is_domain());
        assert!(PricingError::Domain(String::new()).is_domain());
        assert!(!PricingError::NumericalInstability(String::new()).is_domain());
    }

    #[test]
    fn test_pricing_error_is_std_error() {
        let err = PricingError::Domain("x".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_date_error_display() {
        let err = DateError::InvalidDate {
            year: 2024,
            month: 13,
            day: 1,
        };
        assert_eq!(format!("{}", err), "Invalid date: 2024-13-1");

        let err = DateError::ParseError("bad".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad");
    }

    #[test]
    fn test_date_error_to_pricing_error() {
        let err = DateError::ParseError("not-a-date".to_string());
        let pricing: PricingError = err.into();
        assert!(pricing.is_domain());
    }
}
