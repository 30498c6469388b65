//! Pricing engine configuration.
//!
//! Every numerical knob of the lattice lives here with a documented default,
//! so callers pass their choices explicitly instead of relying on literals
//! scattered through the engine. Year fractions are not configured here:
//! maturity and dividend offsets follow the market's day count.

use crate::error::ConfigError;

/// Maximum number of lattice time steps allowed.
pub const MAX_STEPS: usize = 20_000;

/// Default number of lattice time steps.
pub const DEFAULT_STEPS: usize = 50;

/// Default minimum reach probability for materialising a lattice node.
pub const DEFAULT_PRUNING_THRESHOLD: f64 = 1e-9;

/// Default tolerance of the early-exercise test.
pub const DEFAULT_EXERCISE_TOLERANCE: f64 = 1e-10;

/// Lattice pricing configuration.
///
/// Immutable once built. Use [`PricingConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::config::PricingConfig;
///
/// let config = PricingConfig::builder()
///     .steps(2000)
///     .pruning_threshold(1e-10)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.steps(), 2000);
/// assert_eq!(PricingConfig::default().steps(), 50);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingConfig {
    /// Number of lattice time steps.
    steps: usize,
    /// Minimum reach probability for creating a new node.
    pruning_threshold: f64,
    /// Tolerance of the `value - intrinsic` early-exercise test.
    exercise_tolerance: f64,
}

impl PricingConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> PricingConfigBuilder {
        PricingConfigBuilder::default()
    }

    /// Default configuration with a different step count.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidStepCount` if `steps` is 0 or above [`MAX_STEPS`].
    pub fn with_steps(steps: usize) -> Result<Self, ConfigError> {
        Self::builder().steps(steps).build()
    }

    /// Returns the number of lattice time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the pruning threshold.
    #[inline]
    pub fn pruning_threshold(&self) -> f64 {
        self.pruning_threshold
    }

    /// Returns the early-exercise tolerance.
    #[inline]
    pub fn exercise_tolerance(&self) -> f64 {
        self.exercise_tolerance
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `steps` is 0 or greater than [`MAX_STEPS`]
    /// - `pruning_threshold` is not finite and positive
    /// - `exercise_tolerance` is not finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.steps));
        }
        if !self.pruning_threshold.is_finite() || self.pruning_threshold <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "pruning_threshold",
                value: format!("must be positive, got {}", self.pruning_threshold),
            });
        }
        if !self.exercise_tolerance.is_finite() || self.exercise_tolerance < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "exercise_tolerance",
                value: format!("must be non-negative, got {}", self.exercise_tolerance),
            });
        }
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            pruning_threshold: DEFAULT_PRUNING_THRESHOLD,
            exercise_tolerance: DEFAULT_EXERCISE_TOLERANCE,
        }
    }
}

/// Builder for [`PricingConfig`].
///
/// Unset fields take the documented defaults; validation happens in
/// [`PricingConfigBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct PricingConfigBuilder {
    steps: Option<usize>,
    pruning_threshold: Option<f64>,
    exercise_tolerance: Option<f64>,
}

impl PricingConfigBuilder {
    /// Sets the number of lattice time steps, in [1, MAX_STEPS].
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the pruning threshold.
    #[inline]
    pub fn pruning_threshold(mut self, threshold: f64) -> Self {
        self.pruning_threshold = Some(threshold);
        self
    }

    /// Sets the early-exercise tolerance.
    #[inline]
    pub fn exercise_tolerance(mut self, tolerance: f64) -> Self {
        self.exercise_tolerance = Some(tolerance);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any value is out of range.
    pub fn build(self) -> Result<PricingConfig, ConfigError> {
        let defaults = PricingConfig::default();
        let config = PricingConfig {
            steps: self.steps.unwrap_or(defaults.steps),
            pruning_threshold: self.pruning_threshold.unwrap_or(defaults.pruning_threshold),
            exercise_tolerance: self
                .exercise_tolerance
                .unwrap_or(defaults.exercise_tolerance),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PricingConfig::builder().build().unwrap();
        assert_eq!(config, PricingConfig::default());
        assert_eq!(config.steps(), 50);
        assert_eq!(config.pruning_threshold(), 1e-9);
        assert_eq!(config.exercise_tolerance(), 1e-10);
    }

    #[test]
    fn test_builder_overrides() {
        let config = PricingConfig::builder()
            .steps(2000)
            .pruning_threshold(1e-12)
            .exercise_tolerance(0.0)
            .build()
            .unwrap();

        assert_eq!(config.steps(), 2000);
        assert_eq!(config.pruning_threshold(), 1e-12);
        assert_eq!(config.exercise_tolerance(), 0.0);
    }

    #[test]
    fn test_with_steps() {
        assert_eq!(PricingConfig::with_steps(100).unwrap().steps(), 100);
    }

    #[test]
    fn test_invalid_zero_steps() {
        let result = PricingConfig::builder().steps(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidStepCount(0))));
    }

    #[test]
    fn test_invalid_too_many_steps() {
        let result = PricingConfig::with_steps(MAX_STEPS + 1);
        assert!(matches!(result, Err(ConfigError::InvalidStepCount(_))));
        assert!(PricingConfig::with_steps(MAX_STEPS).is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        for threshold in [0.0, -1e-9, f64::NAN] {
            let result = PricingConfig::builder().pruning_threshold(threshold).build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter {
                    name: "pruning_threshold",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_invalid_exercise_tolerance() {
        let result = PricingConfig::builder().exercise_tolerance(-1.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "exercise_tolerance",
                ..
            })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let config = PricingConfig::with_steps(2000).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"steps\":2000"));
        let parsed: PricingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
