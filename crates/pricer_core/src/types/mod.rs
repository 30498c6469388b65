//! Core time and error types.
//!
//! This module provides:
//! - `time`: Date wrapper and day count conventions for year fractions
//! - `error`: The shared pricing error taxonomy and date errors
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`DayCountConvention`], [`time_to_maturity_dates`] from `time`
//! - [`PricingError`], [`DateError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use time::{time_to_maturity_dates, Date, DayCountConvention};
