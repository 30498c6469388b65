//! Discrete cash dividends.
//!
//! A dividend lowers the forward level of the underlying by its cash amount
//! on the step whose window contains the ex-date. Windows are expressed as
//! year-fraction offsets from a reference date and are half-open:
//! `(t_start, t_end]`. A dividend falling exactly on `t_start` belongs to the
//! previous window, so consecutive windows never count it twice.

use super::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// A single cash dividend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dividend {
    ex_date: Date,
    amount: f64,
}

impl Dividend {
    /// Creates a dividend paid on `ex_date`.
    ///
    /// # Errors
    /// `MarketDataError::InvalidDividend` if `amount` is negative or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::market_data::Dividend;
    /// use pricer_core::types::Date;
    ///
    /// let d = Date::from_ymd(2024, 6, 15).unwrap();
    /// assert!(Dividend::new(d, 1.25).is_ok());
    /// assert!(Dividend::new(d, -1.0).is_err());
    /// ```
    pub fn new(ex_date: Date, amount: f64) -> Result<Self, MarketDataError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(MarketDataError::InvalidDividend {
                ex_date: ex_date.to_string(),
                amount,
            });
        }
        Ok(Self { ex_date, amount })
    }

    /// Ex-dividend date.
    #[inline]
    pub fn ex_date(&self) -> Date {
        self.ex_date
    }

    /// Cash amount.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Dividends ordered by ex-date.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DividendSchedule {
    dividends: Vec<Dividend>,
}

impl DividendSchedule {
    /// Builds a schedule, sorting the dividends by ex-date.
    pub fn new(mut dividends: Vec<Dividend>) -> Self {
        dividends.sort_by_key(|d| d.ex_date);
        Self { dividends }
    }

    /// A schedule with no dividends.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Dividends in ex-date order.
    pub fn dividends(&self) -> &[Dividend] {
        &self.dividends
    }

    /// Returns true if the schedule holds no dividends.
    pub fn is_empty(&self) -> bool {
        self.dividends.is_empty()
    }

    /// Number of dividends in the schedule.
    pub fn len(&self) -> usize {
        self.dividends.len()
    }

    /// Total cash paid with ex-date offset `t` in `(t_start, t_end]`.
    ///
    /// Offsets are year fractions from `reference` under `day_count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::market_data::{Dividend, DividendSchedule};
    /// use pricer_core::types::{Date, DayCountConvention};
    ///
    /// let reference = Date::from_ymd(2024, 1, 1).unwrap();
    /// let schedule = DividendSchedule::new(vec![
    ///     Dividend::new(reference.add_days(73), 1.0).unwrap(), // t = 0.2
    /// ]);
    /// let dcc = DayCountConvention::ActualActual365;
    ///
    /// assert_eq!(schedule.total_between(reference, 0.0, 0.2, dcc), 1.0);
    /// assert_eq!(schedule.total_between(reference, 0.2, 0.4, dcc), 0.0);
    /// ```
    pub fn total_between(
        &self,
        reference: Date,
        t_start: f64,
        t_end: f64,
        day_count: DayCountConvention,
    ) -> f64 {
        self.dividends
            .iter()
            .filter(|d| {
                let t = day_count.year_fraction_dates(reference, d.ex_date);
                t > t_start && t <= t_end
            })
            .map(|d| d.amount)
            .sum()
    }
}

impl FromIterator<Dividend> for DividendSchedule {
    fn from_iter<I: IntoIterator<Item = Dividend>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
