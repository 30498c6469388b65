//! Vanilla option contract definitions.
//!
//! # Architecture
//!
//! Exercise style is a tagged enum rather than a type hierarchy: the payoff
//! is identical across styles and callers match on [`ExerciseStyle`] to pick
//! a pricing path.
//!
//! # Instrument Types
//!
//! - [`VanillaOption`]: European/American options with Call/Put payoffs
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{ExerciseStyle, PayoffType, VanillaOption};
//! use pricer_core::types::Date;
//!
//! let today = Date::from_ymd(2024, 1, 1).unwrap();
//! let put = VanillaOption::new(
//!     110.0,
//!     today.add_days(365),
//!     PayoffType::Put,
//!     ExerciseStyle::American,
//!     today,
//! )
//! .unwrap();
//!
//! assert_eq!(put.payoff(100.0), 10.0);
//! assert_eq!(put.maturity(), 1.0);
//! ```

mod error;
mod exercise;
mod payoff;
mod vanilla;

pub use error::InstrumentError;
pub use exercise::ExerciseStyle;
pub use payoff::PayoffType;
pub use vanilla::VanillaOption;
