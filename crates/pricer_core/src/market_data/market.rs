//! Immutable market snapshot.

use super::dividends::DividendSchedule;
use super::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// Market environment for a single underlying.
///
/// Constructed once and never mutated. Scenario variants (a rolled-forward
/// valuation date, a bumped spot) are new snapshots produced by
/// [`Market::shift_valuation_date`] and [`Market::with_spot`].
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{DividendSchedule, Market};
/// use pricer_core::types::Date;
///
/// let today = Date::from_ymd(2024, 1, 1).unwrap();
/// let market = Market::new(100.0, 0.05, 0.2, DividendSchedule::empty(), today).unwrap();
///
/// assert_eq!(market.spot(), 100.0);
/// assert!(Market::new(0.0, 0.05, 0.2, DividendSchedule::empty(), today).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Market {
    spot: f64,
    rate: f64,
    volatility: f64,
    dividends: DividendSchedule,
    valuation_date: Date,
    day_count: DayCountConvention,
}

impl Market {
    /// Creates a validated market snapshot.
    ///
    /// # Arguments
    ///
    /// * `spot` - Underlying price (finite, > 0)
    /// * `rate` - Continuously compounded risk-free rate (finite, any sign)
    /// * `volatility` - Annualised lognormal volatility (finite, >= 0)
    /// * `dividends` - Discrete cash dividend schedule
    /// * `valuation_date` - Date the snapshot is observed on
    ///
    /// # Errors
    /// The matching `MarketDataError` variant for the first invalid input.
    pub fn new(
        spot: f64,
        rate: f64,
        volatility: f64,
        dividends: DividendSchedule,
        valuation_date: Date,
    ) -> Result<Self, MarketDataError> {
        validate_spot(spot)?;
        if !rate.is_finite() {
            return Err(MarketDataError::InvalidRate { rate });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(MarketDataError::InvalidVolatility { volatility });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
            dividends,
            valuation_date,
            day_count: DayCountConvention::default(),
        })
    }

    /// Returns a copy using `day_count` for option maturity and dividend
    /// offsets when pricing against this market.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Underlying spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Dividend schedule.
    #[inline]
    pub fn dividends(&self) -> &DividendSchedule {
        &self.dividends
    }

    /// Valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Day count used to turn dividend dates into year offsets.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Total dividend paid in `(t_start, t_end]`, offsets measured from the
    /// market valuation date.
    pub fn total_dividend(&self, t_start: f64, t_end: f64) -> f64 {
        self.total_dividend_from(self.valuation_date, t_start, t_end)
    }

    /// Total dividend paid in `(t_start, t_end]`, offsets measured from
    /// `reference`.
    pub fn total_dividend_from(&self, reference: Date, t_start: f64, t_end: f64) -> f64 {
        self.dividends
            .total_between(reference, t_start, t_end, self.day_count)
    }

    /// New snapshot observed on `date`; every other field is carried over.
    pub fn shift_valuation_date(&self, date: Date) -> Self {
        Self {
            valuation_date: date,
            ..self.clone()
        }
    }

    /// New snapshot with a different spot.
    ///
    /// # Errors
    /// `MarketDataError::InvalidSpot` if `spot` is not finite and positive.
    pub fn with_spot(&self, spot: f64) -> Result<Self, MarketDataError> {
        validate_spot(spot)?;
        Ok(Self {
            spot,
            ..self.clone()
        })
    }
}

/// Rolls `market` forward (or back) to `date` without touching the original.
pub fn shift_valuation_date(market: &Market, date: Date) -> Market {
    market.shift_valuation_date(date)
}

fn validate_spot(spot: f64) -> Result<(), MarketDataError> {
    if !spot.is_finite() || spot <= 0.0 {
        return Err(MarketDataError::InvalidSpot { spot });
    }
    Ok(())
}
