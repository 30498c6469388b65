//! Option exercise style definitions.
//!
//! The payoff formula is identical for both styles; the exercise style only
//! decides which pricing path applies and whether the early-exercise test
//! runs during backward induction.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Option exercise style.
///
/// # Variants
/// - `European`: Exercise only at expiry
/// - `American`: Exercise at any time up to expiry
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// let style: ExerciseStyle = "american".parse().unwrap();
/// assert!(style.allows_early_exercise());
/// assert_eq!(ExerciseStyle::European.to_string(), "European");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    #[default]
    European,

    /// American style: exercise at any time before expiry.
    American,
}

impl ExerciseStyle {
    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether this is an American exercise style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether the holder may exercise before expiry.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        self.is_american()
    }

    /// Style name.
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American => "American",
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExerciseStyle {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" | "eu" => Ok(ExerciseStyle::European),
            "american" | "am" => Ok(ExerciseStyle::American),
            _ => Err(InstrumentError::InvalidParameter {
                message: format!("Unknown exercise style: {}", s),
            }),
        }
    }
}
