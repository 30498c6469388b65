//! Market snapshot for single-asset option pricing.
//!
//! This module provides the immutable environment a pricing call reads from:
//! spot, risk-free rate, volatility, a discrete dividend schedule and the
//! valuation date.
//!
//! # Components
//!
//! - [`dividends`]: Discrete cash dividends and the window query used by the lattice
//! - [`market`]: The validated `Market` snapshot and its pure scenario helpers
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{Dividend, DividendSchedule, Market};
//! use pricer_core::types::Date;
//!
//! let valuation = Date::from_ymd(2024, 1, 1).unwrap();
//! let dividends = DividendSchedule::new(vec![
//!     Dividend::new(Date::from_ymd(2024, 7, 1).unwrap(), 2.0).unwrap(),
//! ]);
//!
//! let market = Market::new(100.0, 0.05, 0.2, dividends, valuation).unwrap();
//! assert_eq!(market.total_dividend(0.0, 1.0), 2.0);
//!
//! // Rolling the valuation date forward yields a new snapshot.
//! let rolled = market.shift_valuation_date(Date::from_ymd(2024, 8, 1).unwrap());
//! assert_eq!(rolled.total_dividend(0.0, 1.0), 0.0);
//! assert_eq!(market.valuation_date(), valuation);
//! ```

pub mod dividends;
pub mod error;
pub mod market;

// Re-export commonly used types
pub use dividends::{Dividend, DividendSchedule};
pub use error::MarketDataError;
pub use market::{shift_valuation_date, Market};
