//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The formula has no notion of discrete dividends; the spot is used as-is.
//!
//! At σ = 0, d₁ and d₂ diverge and the prices reduce to the discounted
//! forward payoff: `max(S - K·e^(-rT), 0)` for a call and
//! `max(K·e^(-rT) - S, 0)` for a put.

use num_traits::Float;

use super::distributions::{constant, norm_cdf};
use super::error::AnalyticalError;
use crate::instruments::{PayoffType, VanillaOption};

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0).unwrap();
/// let put_price = bs.price_put(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, any sign)
    /// * `volatility` - Volatility (must be non-negative)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, -0.01, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_ok());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, -0.2).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !spot.is_finite() || spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !volatility.is_finite() || volatility < zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// Callers guarantee `strike > 0` and `expiry > 0`. Infinite or NaN at
    /// zero volatility.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = constant::<T>(0.5);
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price.
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive inputs. An expired
    /// contract is an error, not its intrinsic value.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let price = bs.price_call(100.0, 1.0).unwrap();
    /// assert!((price - 10.4506).abs() < 1e-3);
    ///
    /// assert!(bs.price_call(100.0, 0.0).is_err());
    /// ```
    pub fn price_call(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.validate(strike, expiry)?;

        let discount = (-self.rate * expiry).exp();
        if self.volatility == T::zero() {
            return Ok((self.spot - strike * discount).max(T::zero()));
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);

        Ok(self.spot * norm_cdf(d1) - strike * discount * norm_cdf(d2))
    }

    /// European put price.
    ///
    /// # Errors
    /// Same as [`BlackScholes::price_call`].
    pub fn price_put(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.validate(strike, expiry)?;

        let discount = (-self.rate * expiry).exp();
        if self.volatility == T::zero() {
            return Ok((strike * discount - self.spot).max(T::zero()));
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);

        Ok(strike * discount * norm_cdf(-d2) - self.spot * norm_cdf(-d1))
    }

    fn validate(&self, strike: T, expiry: T) -> Result<(), AnalyticalError> {
        let zero = T::zero();
        if !strike.is_finite() || strike <= zero {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !expiry.is_finite() || expiry <= zero {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }
}

impl BlackScholes<f64> {
    /// Prices a European [`VanillaOption`] using its ACT/365 maturity.
    ///
    /// # Errors
    /// - `AnalyticalError::UnsupportedExerciseStyle` for American contracts
    /// - `AnalyticalError::InvalidExpiry` if the maturity is not positive
    /// - `AnalyticalError::NumericalInstability` if the price is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::{PayoffType, VanillaOption};
    /// use pricer_core::types::Date;
    ///
    /// let today = Date::from_ymd(2023, 1, 1).unwrap();
    /// let option =
    ///     VanillaOption::european(100.0, today.add_days(365), PayoffType::Call, today).unwrap();
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let price = bs.price_option(&option).unwrap();
    /// assert!((price - 10.45).abs() < 0.01);
    /// ```
    pub fn price_option(&self, option: &VanillaOption) -> Result<f64, AnalyticalError> {
        self.price_option_with_maturity(option, option.maturity())
    }

    /// Prices a European [`VanillaOption`] with an explicitly supplied
    /// maturity in years (for callers using a non-default day count).
    pub fn price_option_with_maturity(
        &self,
        option: &VanillaOption,
        maturity: f64,
    ) -> Result<f64, AnalyticalError> {
        if !option.exercise_style().is_european() {
            return Err(AnalyticalError::UnsupportedExerciseStyle {
                style: option.exercise_style().name().to_string(),
            });
        }

        let price = match option.payoff_type() {
            PayoffType::Call => self.price_call(option.strike(), maturity)?,
            PayoffType::Put => self.price_put(option.strike(), maturity)?,
        };

        if !price.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!(
                    "non-finite Black-Scholes price for K = {}, T = {}",
                    option.strike(),
                    maturity
                ),
            });
        }

        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::Date;

    fn bs() -> BlackScholes<f64> {
        BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let model = bs();
        assert_eq!(model.spot(), 100.0);
        assert_eq!(model.rate(), 0.05);
        assert_eq!(model.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_spot() {
        for spot in [0.0, -100.0, f64::NAN] {
            assert!(matches!(
                BlackScholes::new(spot, 0.05, 0.2),
                Err(AnalyticalError::InvalidSpot { .. })
            ));
        }
    }

    #[test]
    fn test_new_invalid_volatility() {
        match BlackScholes::new(100.0_f64, 0.05, -0.2) {
            Err(AnalyticalError::InvalidVolatility { volatility }) => {
                assert_eq!(volatility, -0.2)
            }
            other => panic!("Expected InvalidVolatility error, got {:?}", other),
        }
        assert!(BlackScholes::new(100.0_f64, 0.05, f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_volatility_prices_discounted_forward_payoff() {
        let model = BlackScholes::new(100.0_f64, 0.05, 0.0).unwrap();
        let discounted_strike = 90.0 * (-0.05_f64).exp();

        assert_relative_eq!(
            model.price_call(90.0, 1.0).unwrap(),
            100.0 - discounted_strike,
            epsilon = 1e-12
        );
        assert_eq!(model.price_put(90.0, 1.0).unwrap(), 0.0);

        // Strike above the forward: only the put has value
        let forward_strike = 110.0;
        assert_eq!(model.price_call(forward_strike, 1.0).unwrap(), 0.0);
        assert_relative_eq!(
            model.price_put(forward_strike, 1.0).unwrap(),
            forward_strike * (-0.05_f64).exp() - 100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_volatility_at_the_forward_is_worthless() {
        // ln(S/K) + rT == 0 makes d1 a 0/0; the limit is still zero
        let model = BlackScholes::new(100.0_f64, 0.05, 0.0).unwrap();
        let at_forward = 100.0 * 0.05_f64.exp();
        assert!(model.price_call(at_forward, 1.0).unwrap().abs() < 1e-12);
        assert!(model.price_put(at_forward, 1.0).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_small_volatility_approaches_zero_volatility_limit() {
        let limit = BlackScholes::new(100.0_f64, 0.05, 0.0).unwrap();
        let near = BlackScholes::new(100.0_f64, 0.05, 1e-4).unwrap();
        assert_relative_eq!(
            near.price_call(90.0, 1.0).unwrap(),
            limit.price_call(90.0, 1.0).unwrap(),
            epsilon = 1e-6
        );
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_reference() {
        // ATM: d1 = (r + σ²/2) / σ = 0.35, d2 = 0.15
        let model = bs();
        assert_relative_eq!(model.d1(100.0, 1.0), 0.35, epsilon = 1e-12);
        assert_relative_eq!(model.d2(100.0, 1.0), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_sign_follows_moneyness() {
        let model = BlackScholes::new(100.0_f64, 0.0, 0.2).unwrap();
        assert!(model.d1(80.0, 1.0) > 0.0);
        assert!(model.d1(130.0, 1.0) < 0.0);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        // S=100, K=100, r=0.05, σ=0.2, T=1
        assert_relative_eq!(bs().price_call(100.0, 1.0).unwrap(), 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_put_price_reference_value() {
        assert_relative_eq!(bs().price_put(100.0, 1.0).unwrap(), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_deep_itm_and_otm_calls() {
        let deep_itm = BlackScholes::new(200.0_f64, 0.05, 0.2).unwrap();
        let lower_bound = 200.0 - 100.0 * (-0.05_f64).exp();
        assert!(deep_itm.price_call(100.0, 1.0).unwrap() >= lower_bound - 1e-6);

        let deep_otm = BlackScholes::new(50.0_f64, 0.05, 0.2).unwrap();
        assert!(deep_otm.price_call(100.0, 1.0).unwrap() < 0.01);
    }

    #[test]
    fn test_zero_expiry_is_an_error() {
        assert!(matches!(
            bs().price_call(100.0, 0.0),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
        assert!(matches!(
            bs().price_put(100.0, -0.5),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_invalid_strike_is_an_error() {
        assert!(matches!(
            bs().price_call(0.0, 1.0),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
    }

    // ==========================================================
    // Put-Call Parity Tests
    // ==========================================================

    #[test]
    fn test_put_call_parity_grid() {
        for rate in [-0.02, 0.0, 0.05] {
            let model = BlackScholes::new(100.0_f64, rate, 0.2).unwrap();
            for strike in [80.0, 90.0, 110.0, 120.0] {
                for expiry in [0.25, 1.0, 2.0] {
                    let call = model.price_call(strike, expiry).unwrap();
                    let put = model.price_put(strike, expiry).unwrap();
                    let forward = 100.0 - strike * (-rate * expiry).exp();
                    assert_relative_eq!(call - put, forward, epsilon = 1e-9);
                }
            }
        }
    }

    // ==========================================================
    // VanillaOption Integration Tests
    // ==========================================================

    fn today() -> Date {
        Date::from_ymd(2023, 1, 1).unwrap()
    }

    #[test]
    fn test_price_option_european_call_and_put() {
        let model = bs();
        let call =
            VanillaOption::european(100.0, today().add_days(365), PayoffType::Call, today())
                .unwrap();
        let put = VanillaOption::european(100.0, today().add_days(365), PayoffType::Put, today())
            .unwrap();

        assert_relative_eq!(
            model.price_option(&call).unwrap(),
            model.price_call(100.0, 1.0).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            model.price_option(&put).unwrap(),
            model.price_put(100.0, 1.0).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_price_option_american_rejected() {
        let option =
            VanillaOption::american(100.0, today().add_days(365), PayoffType::Put, today()).unwrap();

        match bs().price_option(&option) {
            Err(AnalyticalError::UnsupportedExerciseStyle { style }) => {
                assert_eq!(style, "American")
            }
            other => panic!("Expected UnsupportedExerciseStyle error, got {:?}", other),
        }
    }

    #[test]
    fn test_price_option_expired_rejected() {
        let option = VanillaOption::european(100.0, today(), PayoffType::Call, today()).unwrap();
        assert!(matches!(
            bs().price_option(&option),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_generic_over_f32() {
        let model = BlackScholes::new(100.0_f32, 0.05, 0.2).unwrap();
        let price = model.price_call(100.0, 1.0).unwrap();
        assert!((price - 10.4506).abs() < 1e-2);
    }
}
