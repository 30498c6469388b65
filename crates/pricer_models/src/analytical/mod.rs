//! Closed-form pricing for European options.
//!
//! - [`BlackScholes`]: lognormal closed-form prices
//! - [`distributions`]: standard normal CDF/PDF
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the formulas run on `f64` or `f32`
//! - **Errors, not sentinels**: expired or American contracts are rejected
//!   instead of returning an intrinsic value

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
