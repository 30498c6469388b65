//! Error types for the lattice pricing engine.
//!
//! Configuration problems are reported as [`ConfigError`] and surface to
//! callers as `PricingError::Configuration`.

use std::fmt;

use pricer_core::types::PricingError;

/// Configuration error for the pricing engine.
///
/// These errors occur at build time when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Step count outside valid range [1, MAX_STEPS].
    InvalidStepCount(usize),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStepCount(count) => {
                write!(
                    f,
                    "Invalid step count {}: must be in range [1, {}]",
                    count,
                    crate::config::MAX_STEPS
                )
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::Configuration(err.to_string())
    }
}
