//! Price dispatcher.
//!
//! Chooses between the closed-form Black-Scholes formula and the trinomial
//! lattice, validates inputs before either path runs, and guarantees every
//! successful result is a finite number. Year fractions follow the market's
//! day count.
//!
//! At zero volatility the lattice has no branches (`alpha == 1`). `Tree`
//! requests then value the contract on the deterministic forward path; the
//! lattice diagnostics ([`PriceEngine::price_with_lattice`] and
//! [`PriceEngine::lattice_extreme_terminal_prices`]) reject it as a domain
//! error.
//!
//! # Examples
//!
//! ```
//! use pricer_core::market_data::{DividendSchedule, Market};
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{PayoffType, VanillaOption};
//! use pricer_pricing::engine::{price, PricingMethod};
//!
//! let today = Date::from_ymd(2023, 1, 1).unwrap();
//! let market = Market::new(100.0, 0.05, 0.2, DividendSchedule::empty(), today).unwrap();
//! let call = VanillaOption::european(100.0, today.add_days(365), PayoffType::Call, today).unwrap();
//!
//! let closed_form = price(&call, &market, PricingMethod::BlackScholes, 50).unwrap();
//! let method: PricingMethod = "Tree".parse().unwrap();
//! let lattice = price(&call, &market, method, 500).unwrap();
//!
//! assert!((closed_form - 10.4506).abs() < 1e-3);
//! assert!((lattice - closed_form).abs() < 0.05);
//! ```

use std::fmt;
use std::str::FromStr;

use pricer_core::market_data::Market;
use pricer_core::types::PricingError;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{ExerciseStyle, VanillaOption};
use tracing::{debug, warn};

use crate::config::PricingConfig;
use crate::lattice::{backward_induction, Lattice};

/// Pricing method requested by the caller.
///
/// # Variants
/// - `Auto`: American → `Tree`, European → `BlackScholes`
/// - `Tree`: trinomial lattice, either exercise style
/// - `BlackScholes`: closed form, European only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingMethod {
    /// Pick by exercise style.
    #[default]
    Auto,
    /// Trinomial lattice with backward induction.
    Tree,
    /// Black-Scholes closed form.
    BlackScholes,
}

impl PricingMethod {
    /// Method name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            PricingMethod::Auto => "Auto",
            PricingMethod::Tree => "Tree",
            PricingMethod::BlackScholes => "BlackScholes",
        }
    }
}

impl fmt::Display for PricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PricingMethod {
    type Err = PricingError;

    /// Parses a method name (case-insensitive).
    ///
    /// Accepts "Auto", "Tree", "BlackScholes", "Black-Scholes" and "BS".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(PricingMethod::Auto),
            "tree" => Ok(PricingMethod::Tree),
            "blackscholes" | "black-scholes" | "bs" => Ok(PricingMethod::BlackScholes),
            _ => Err(PricingError::Configuration(format!(
                "unknown pricing method '{}'",
                s
            ))),
        }
    }
}

/// Lattice and closed-form pricer sharing one configuration.
#[derive(Debug, Clone, Default)]
pub struct PriceEngine {
    config: PricingConfig,
}

impl PriceEngine {
    /// Creates an engine with `config`.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Concrete method `method` resolves to for `option`.
    ///
    /// # Errors
    /// `PricingError::Configuration` when `BlackScholes` is requested for
    /// an American contract.
    pub fn resolve_method(
        &self,
        option: &VanillaOption,
        method: PricingMethod,
    ) -> Result<PricingMethod, PricingError> {
        match (method, option.exercise_style()) {
            (PricingMethod::Auto, ExerciseStyle::American) => Ok(PricingMethod::Tree),
            (PricingMethod::Auto, ExerciseStyle::European) => Ok(PricingMethod::BlackScholes),
            (PricingMethod::BlackScholes, ExerciseStyle::American) => {
                Err(PricingError::Configuration(
                    "Black-Scholes is only applicable to European options".to_string(),
                ))
            }
            (resolved, _) => Ok(resolved),
        }
    }

    /// Prices `option` under `market` with `method`.
    ///
    /// # Errors
    /// - `PricingError::Configuration` for an incompatible method
    /// - `PricingError::Domain` for non-positive maturity, spot or strike,
    ///   or negative volatility
    /// - `PricingError::NumericalInstability` for a non-finite result
    pub fn price(
        &self,
        option: &VanillaOption,
        market: &Market,
        method: PricingMethod,
    ) -> Result<f64, PricingError> {
        let resolved = self.resolve_method(option, method)?;
        self.validate(option, market)?;

        let value = match resolved {
            PricingMethod::BlackScholes => self.price_closed_form(option, market)?,
            _ if market.volatility() == 0.0 => self.price_on_forward_path(option, market)?,
            _ => self.price_with_lattice(option, market)?.0,
        };

        ensure_finite(value)?;
        debug!(
            requested = %method,
            method = %resolved,
            style = %option.exercise_style(),
            payoff = %option.payoff_type(),
            strike = option.strike(),
            price = value,
            "option priced"
        );
        Ok(value)
    }

    /// Prices on the lattice and hands back the valued lattice for callers
    /// that inspect node values or the exercise boundary.
    pub fn price_with_lattice(
        &self,
        option: &VanillaOption,
        market: &Market,
    ) -> Result<(f64, Lattice), PricingError> {
        self.validate(option, market)?;
        let mut lattice = Lattice::build(option, market, &self.config)?;
        let value = backward_induction(&mut lattice, option, self.config.exercise_tolerance())?;
        ensure_finite(value)?;
        Ok((value, lattice))
    }

    /// `(highest, lowest)` underlying level in the final layer of the pruned
    /// lattice built for `option` under `market`.
    pub fn lattice_extreme_terminal_prices(
        &self,
        option: &VanillaOption,
        market: &Market,
    ) -> Result<(f64, f64), PricingError> {
        self.validate(option, market)?;
        let lattice = Lattice::build(option, market, &self.config)?;
        Ok(lattice.terminal_extremes())
    }

    fn price_closed_form(
        &self,
        option: &VanillaOption,
        market: &Market,
    ) -> Result<f64, PricingError> {
        let maturity = option.maturity_with(market.day_count());
        let paid = market.total_dividend_from(option.valuation_date(), 0.0, maturity);
        if paid > 0.0 {
            warn!(
                dividends = paid,
                "closed-form price ignores discrete dividends before expiry"
            );
        }

        let model = BlackScholes::new(market.spot(), market.rate(), market.volatility())?;
        Ok(model.price_option_with_maturity(option, maturity)?)
    }

    /// Zero-volatility limit of the lattice: a single path growing at the
    /// risk-free rate net of dividends, with the same steps as the lattice.
    /// American contracts take the best discounted exercise along it.
    fn price_on_forward_path(
        &self,
        option: &VanillaOption,
        market: &Market,
    ) -> Result<f64, PricingError> {
        let maturity = option.maturity_with(market.day_count());
        let steps = self.config.steps();
        let dt = maturity / steps as f64;
        let growth = (market.rate() * dt).exp();
        let discount = (-market.rate() * dt).exp();
        let american = option.exercise_style().allows_early_exercise();

        let mut spot = market.spot();
        let mut deflator = 1.0;
        let mut value = if american { option.payoff(spot) } else { 0.0 };
        for t in 0..steps {
            let dividend = market.total_dividend_from(
                option.valuation_date(),
                t as f64 * dt,
                (t + 1) as f64 * dt,
            );
            spot = spot * growth - dividend;
            if spot <= 0.0 {
                return Err(PricingError::Domain(format!(
                    "dividend {} exceeds forward level at step {}",
                    dividend, t
                )));
            }
            deflator *= discount;
            if american || t + 1 == steps {
                value = value.max(deflator * option.payoff(spot));
            }
        }

        debug!(steps, terminal = spot, value, "priced on deterministic forward path");
        Ok(value)
    }

    fn validate(&self, option: &VanillaOption, market: &Market) -> Result<(), PricingError> {
        let maturity = option.maturity_with(market.day_count());
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(PricingError::Domain(format!(
                "maturity must be positive, got {} years (valuation {}, expiration {})",
                maturity,
                option.valuation_date(),
                option.expiration()
            )));
        }
        if market.spot() <= 0.0 {
            return Err(PricingError::Domain(format!(
                "spot must be positive, got {}",
                market.spot()
            )));
        }
        if option.strike() <= 0.0 {
            return Err(PricingError::Domain(format!(
                "strike must be positive, got {}",
                option.strike()
            )));
        }
        if !market.volatility().is_finite() || market.volatility() < 0.0 {
            return Err(PricingError::Domain(format!(
                "volatility must be non-negative, got {}",
                market.volatility()
            )));
        }
        Ok(())
    }
}

fn ensure_finite(value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::NumericalInstability(format!(
            "pricing produced a non-finite value: {}",
            value
        )))
    }
}

/// Prices `option` with `method` on a lattice of `steps` layers when the
/// lattice is used. Other settings take their defaults. `steps` is ignored,
/// and not validated, when the method resolves to the closed form.
///
/// # Errors
/// As [`PriceEngine::price`], plus `PricingError::Configuration` for an
/// out-of-range `steps` on the lattice path.
pub fn price(
    option: &VanillaOption,
    market: &Market,
    method: PricingMethod,
    steps: usize,
) -> Result<f64, PricingError> {
    let config = match PriceEngine::default().resolve_method(option, method)? {
        PricingMethod::BlackScholes => PricingConfig::default(),
        _ => PricingConfig::with_steps(steps)?,
    };
    PriceEngine::new(config).price(option, market, method)
}

/// `(highest, lowest)` underlying level reached by the final layer of a
/// `steps`-layer lattice, for sizing plots and sampling grids.
pub fn lattice_extreme_terminal_prices(
    option: &VanillaOption,
    market: &Market,
    steps: usize,
) -> Result<(f64, f64), PricingError> {
    PriceEngine::new(PricingConfig::with_steps(steps)?).lattice_extreme_terminal_prices(option, market)
}
