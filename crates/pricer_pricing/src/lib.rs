//! # Pricer Pricing (Layer 3: Pricing Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns a contract and a market snapshot into a price:
//! - [`lattice`]: pruned recombining trinomial lattice with backward induction,
//!   valid for European and American exercise
//! - [`engine`]: dispatcher choosing between the lattice and the
//!   Black-Scholes closed form from `pricer_models`
//! - [`config`]: explicit engine settings (steps, pruning threshold,
//!   early-exercise tolerance)
//!
//! Every call is synchronous and deterministic and owns its lattice; nothing
//! is shared between calls except the read-only inputs.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{DividendSchedule, Market};
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{PayoffType, VanillaOption};
//! use pricer_pricing::config::PricingConfig;
//! use pricer_pricing::engine::{PriceEngine, PricingMethod};
//!
//! let today = Date::from_ymd(2024, 1, 1).unwrap();
//! let market = Market::new(100.0, 0.05, 0.2, DividendSchedule::empty(), today).unwrap();
//! let put = VanillaOption::american(110.0, today.add_days(365), PayoffType::Put, today).unwrap();
//!
//! let engine = PriceEngine::new(PricingConfig::with_steps(100).unwrap());
//! let price = engine.price(&put, &market, PricingMethod::Auto).unwrap();
//! assert!(price > 10.0 && price < 13.0);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` per build and price, `trace`
//! per lattice layer, `warn` on probability drift or ignored dividends). No
//! subscriber is installed here; binaries choose their own.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod error;
pub mod lattice;

pub use config::PricingConfig;
pub use engine::{lattice_extreme_terminal_prices, price, PriceEngine, PricingMethod};
pub use error::ConfigError;
pub use lattice::{backward_induction, Lattice};
