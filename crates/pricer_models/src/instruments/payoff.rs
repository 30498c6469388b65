//! Payoff type definitions.
//!
//! Payoffs are evaluated exactly; the lattice compares continuation value
//! against intrinsic value node by node, so no smoothing is applied.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Type of option payoff.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::PayoffType;
///
/// assert_eq!(PayoffType::Call.evaluate(110.0, 100.0), 10.0);
/// assert_eq!(PayoffType::Put.evaluate(110.0, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// Intrinsic value at underlying level `spot`.
    #[inline]
    pub fn evaluate(&self, spot: f64, strike: f64) -> f64 {
        match self {
            PayoffType::Call => (spot - strike).max(0.0),
            PayoffType::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, PayoffType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, PayoffType::Put)
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffType::Call => f.write_str("Call"),
            PayoffType::Put => f.write_str("Put"),
        }
    }
}

impl FromStr for PayoffType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(PayoffType::Call),
            "put" | "p" => Ok(PayoffType::Put),
            _ => Err(InstrumentError::InvalidParameter {
                message: format!("Unknown payoff type: {}", s),
            }),
        }
    }
}
