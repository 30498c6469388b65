//! Vanilla option definitions.
//!
//! A vanilla option combines a strike, an expiration date, a payoff type and
//! an exercise style. Maturity is derived from the valuation date the option
//! is being priced on, so rolling a contract forward is a matter of swapping
//! that date.

use pricer_core::types::{Date, DayCountConvention};

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;
use super::payoff::PayoffType;

/// Vanilla option contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{PayoffType, VanillaOption};
/// use pricer_core::types::Date;
///
/// let today = Date::from_ymd(2024, 1, 1).unwrap();
/// let expiry = Date::from_ymd(2025, 1, 1).unwrap();
///
/// let call = VanillaOption::european(100.0, expiry, PayoffType::Call, today).unwrap();
/// assert_eq!(call.payoff(110.0), 10.0);
/// assert!((call.maturity() - 366.0 / 365.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VanillaOption {
    strike: f64,
    expiration: Date,
    payoff_type: PayoffType,
    exercise_style: ExerciseStyle,
    valuation_date: Date,
}

impl VanillaOption {
    /// Creates a new vanilla option.
    ///
    /// An expiration on or before the valuation date is accepted here; it
    /// is rejected at pricing time as a non-positive maturity.
    ///
    /// # Errors
    /// `InstrumentError::InvalidStrike` if `strike` is not finite and positive.
    pub fn new(
        strike: f64,
        expiration: Date,
        payoff_type: PayoffType,
        exercise_style: ExerciseStyle,
        valuation_date: Date,
    ) -> Result<Self, InstrumentError> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }

        Ok(Self {
            strike,
            expiration,
            payoff_type,
            exercise_style,
            valuation_date,
        })
    }

    /// Creates a European option.
    pub fn european(
        strike: f64,
        expiration: Date,
        payoff_type: PayoffType,
        valuation_date: Date,
    ) -> Result<Self, InstrumentError> {
        Self::new(
            strike,
            expiration,
            payoff_type,
            ExerciseStyle::European,
            valuation_date,
        )
    }

    /// Creates an American option.
    pub fn american(
        strike: f64,
        expiration: Date,
        payoff_type: PayoffType,
        valuation_date: Date,
    ) -> Result<Self, InstrumentError> {
        Self::new(
            strike,
            expiration,
            payoff_type,
            ExerciseStyle::American,
            valuation_date,
        )
    }

    /// Intrinsic payoff at underlying level `spot`.
    ///
    /// Identical for both exercise styles.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.payoff_type.evaluate(spot, self.strike)
    }

    /// Years from valuation date to expiration under ACT/365.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity_with(DayCountConvention::ActualActual365)
    }

    /// Years from valuation date to expiration under `day_count`.
    ///
    /// Negative once the valuation date has passed the expiration.
    #[inline]
    pub fn maturity_with(&self, day_count: DayCountConvention) -> f64 {
        day_count.year_fraction_dates(self.valuation_date, self.expiration)
    }

    /// The same contract observed on `date`.
    pub fn with_valuation_date(&self, date: Date) -> Self {
        Self {
            valuation_date: date,
            ..self.clone()
        }
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Expiration date.
    #[inline]
    pub fn expiration(&self) -> Date {
        self.expiration
    }

    /// Valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Payoff type.
    #[inline]
    pub fn payoff_type(&self) -> PayoffType {
        self.payoff_type
    }

    /// Exercise style.
    #[inline]
    pub fn exercise_style(&self) -> ExerciseStyle {
        self.exercise_style
    }
}
