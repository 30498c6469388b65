//! # pricer_core: Foundation types for vanilla option pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 3-crate workspace, providing:
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - Market snapshot: `Market`, `Dividend`, `DividendSchedule` (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::{DividendSchedule, Market};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let year_fraction = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
//! assert!(year_fraction > 0.49 && year_fraction < 0.5);
//!
//! let market = Market::new(100.0, 0.05, 0.2, DividendSchedule::empty(), start).unwrap();
//! let rolled = market.shift_valuation_date(end);
//! assert_eq!(rolled.valuation_date(), end);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for Date, DayCountConvention, dividends and Market

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
