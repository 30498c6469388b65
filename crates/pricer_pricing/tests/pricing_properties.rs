//! Pricing properties of the dispatcher.
//!
//! # Test Categories
//!
//! 1. **Reference scenarios**: closed form, lattice convergence, early exercise
//! 2. **No-arbitrage relations**: put-call parity, American >= European
//! 3. **Error taxonomy**: expired contracts, unknown methods, incompatible methods
//! 4. **Dividends and rolled-forward valuation**

use approx::assert_relative_eq;
use pricer_core::market_data::{Dividend, DividendSchedule, Market};
use pricer_core::types::{Date, PricingError};
use pricer_models::instruments::{PayoffType, VanillaOption};
use pricer_pricing::config::PricingConfig;
use pricer_pricing::engine::{price, PriceEngine, PricingMethod};

fn today() -> Date {
    Date::from_ymd(2023, 1, 1).unwrap()
}

fn one_year() -> Date {
    today().add_days(365)
}

fn market() -> Market {
    Market::new(100.0, 0.05, 0.2, DividendSchedule::empty(), today()).unwrap()
}

fn european(strike: f64, payoff: PayoffType) -> VanillaOption {
    VanillaOption::european(strike, one_year(), payoff, today()).unwrap()
}

fn american(strike: f64, payoff: PayoffType) -> VanillaOption {
    VanillaOption::american(strike, one_year(), payoff, today()).unwrap()
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_closed_form_atm_call() {
    let value = price(
        &european(100.0, PayoffType::Call),
        &market(),
        PricingMethod::BlackScholes,
        50,
    )
    .unwrap();
    assert_relative_eq!(value, 10.45, epsilon = 0.01);
}

#[test]
fn test_lattice_converges_to_closed_form() {
    let option = european(100.0, PayoffType::Call);
    let closed_form = price(&option, &market(), PricingMethod::BlackScholes, 50).unwrap();
    let lattice = price(&option, &market(), PricingMethod::Tree, 2000).unwrap();

    assert_relative_eq!(lattice, closed_form, epsilon = 1e-2);
}

#[test]
fn test_lattice_error_shrinks_with_steps() {
    let option = european(100.0, PayoffType::Call);
    let closed_form = price(&option, &market(), PricingMethod::BlackScholes, 50).unwrap();

    let coarse = price(&option, &market(), PricingMethod::Tree, 50).unwrap();
    let fine = price(&option, &market(), PricingMethod::Tree, 500).unwrap();

    assert!((fine - closed_form).abs() < (coarse - closed_form).abs());
}

#[test]
fn test_american_put_early_exercise() {
    let engine = PriceEngine::new(PricingConfig::with_steps(100).unwrap());
    let eu = engine
        .price(&european(110.0, PayoffType::Put), &market(), PricingMethod::Tree)
        .unwrap();
    let (am, lattice) = engine
        .price_with_lattice(&american(110.0, PayoffType::Put), &market())
        .unwrap();

    assert!(am > eu, "American {} should exceed European {}", am, eu);
    assert!(lattice
        .trunk_nodes()
        .any(|node| node.early_exercise() == Some(true)));
}

#[test]
fn test_european_nodes_carry_no_exercise_flag() {
    let engine = PriceEngine::new(PricingConfig::with_steps(50).unwrap());
    let (_, lattice) = engine
        .price_with_lattice(&european(110.0, PayoffType::Put), &market())
        .unwrap();

    assert!(lattice
        .layers()
        .iter()
        .flat_map(|layer| layer.nodes())
        .all(|node| node.early_exercise().is_none()));
}

// ============================================================================
// No-Arbitrage Relations
// ============================================================================

#[test]
fn test_put_call_parity_closed_form() {
    let m = market();
    for strike in [70.0, 95.0, 100.0, 105.0, 140.0] {
        let call = price(&european(strike, PayoffType::Call), &m, PricingMethod::BlackScholes, 50)
            .unwrap();
        let put = price(&european(strike, PayoffType::Put), &m, PricingMethod::BlackScholes, 50)
            .unwrap();
        let forward = m.spot() - strike * (-m.rate()).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-9);
    }
}

#[test]
fn test_american_never_below_european() {
    let m = market();
    for payoff in [PayoffType::Call, PayoffType::Put] {
        for strike in [80.0, 100.0, 120.0] {
            let eu = price(&european(strike, payoff), &m, PricingMethod::Tree, 100).unwrap();
            let am = price(&american(strike, payoff), &m, PricingMethod::Tree, 100).unwrap();
            assert!(am >= eu - 1e-12, "{} K={}: {} < {}", payoff, strike, am, eu);
        }
    }
}

#[test]
fn test_american_call_without_dividends_matches_european() {
    let m = market();
    let eu = price(&european(100.0, PayoffType::Call), &m, PricingMethod::Tree, 200).unwrap();
    let am = price(&american(100.0, PayoffType::Call), &m, PricingMethod::Tree, 200).unwrap();
    assert_relative_eq!(am, eu, epsilon = 1e-4);
}

#[test]
fn test_american_put_at_least_intrinsic() {
    let deep = american(160.0, PayoffType::Put);
    let value = price(&deep, &market(), PricingMethod::Tree, 100).unwrap();
    assert!(value >= 60.0 - 1e-12);
}

#[test]
fn test_negative_rate_american_put() {
    let m = Market::new(100.0, -0.01, 0.2, DividendSchedule::empty(), today()).unwrap();
    let eu = price(&european(110.0, PayoffType::Put), &m, PricingMethod::Tree, 100).unwrap();
    let am = price(&american(110.0, PayoffType::Put), &m, PricingMethod::Tree, 100).unwrap();
    assert!(am.is_finite());
    assert!(am >= eu - 1e-12);
    assert!(am >= 10.0);
}

#[test]
fn test_zero_volatility_prices_deterministic_limit() {
    let flat = Market::new(100.0, 0.05, 0.0, DividendSchedule::empty(), today()).unwrap();
    let call = european(90.0, PayoffType::Call);
    let expected = 100.0 - 90.0 * (-0.05_f64).exp();

    let closed_form = price(&call, &flat, PricingMethod::Auto, 50).unwrap();
    let tree = price(&call, &flat, PricingMethod::Tree, 50).unwrap();
    assert_relative_eq!(closed_form, expected, epsilon = 1e-12);
    assert_relative_eq!(tree, expected, epsilon = 1e-9);
    assert_relative_eq!(closed_form, 14.39, epsilon = 0.01);

    let put = european(90.0, PayoffType::Put);
    assert_eq!(price(&put, &flat, PricingMethod::BlackScholes, 50).unwrap(), 0.0);
}

#[test]
fn test_negative_volatility_cannot_reach_pricing() {
    let err = Market::new(100.0, 0.05, -0.2, DividendSchedule::empty(), today()).unwrap_err();
    assert!(PricingError::from(err).is_domain());
}

#[test]
fn test_pricing_is_deterministic() {
    let option = american(105.0, PayoffType::Put);
    let a = price(&option, &market(), PricingMethod::Tree, 150).unwrap();
    let b = price(&option, &market(), PricingMethod::Tree, 150).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

// ============================================================================
// Error Taxonomy
// ============================================================================

#[test]
fn test_zero_maturity_is_domain_error() {
    let expiring = VanillaOption::european(100.0, today(), PayoffType::Call, today()).unwrap();
    for method in [
        PricingMethod::Auto,
        PricingMethod::Tree,
        PricingMethod::BlackScholes,
    ] {
        match price(&expiring, &market(), method, 50) {
            Err(PricingError::Domain(_)) => {}
            other => panic!("{}: expected Domain error, got {:?}", method, other),
        }
    }
}

#[test]
fn test_expired_american_is_domain_error() {
    let expired = american(100.0, PayoffType::Put).with_valuation_date(one_year().add_days(1));
    let err = price(&expired, &market(), PricingMethod::Auto, 50).unwrap_err();
    assert!(err.is_domain());
}

#[test]
fn test_unknown_method_name() {
    let err = "Binomial".parse::<PricingMethod>().unwrap_err();
    assert!(matches!(err, PricingError::Configuration(_)));
}

#[test]
fn test_black_scholes_rejects_american() {
    let err = price(
        &american(100.0, PayoffType::Call),
        &market(),
        PricingMethod::BlackScholes,
        50,
    )
    .unwrap_err();
    assert!(matches!(err, PricingError::Configuration(_)));
}

// ============================================================================
// Dividends and Rolled-Forward Valuation
// ============================================================================

fn market_with_dividend(amount: f64) -> Market {
    let schedule = DividendSchedule::new(vec![Dividend::new(today().add_days(183), amount).unwrap()]);
    Market::new(100.0, 0.05, 0.2, schedule, today()).unwrap()
}

#[test]
fn test_dividend_lowers_call_and_raises_put() {
    let plain = market();
    let paying = market_with_dividend(3.0);

    let call = european(100.0, PayoffType::Call);
    let put = european(100.0, PayoffType::Put);

    let call_plain = price(&call, &plain, PricingMethod::Tree, 200).unwrap();
    let call_div = price(&call, &paying, PricingMethod::Tree, 200).unwrap();
    let put_plain = price(&put, &plain, PricingMethod::Tree, 200).unwrap();
    let put_div = price(&put, &paying, PricingMethod::Tree, 200).unwrap();

    assert!(call_div < call_plain);
    assert!(put_div > put_plain);
}

#[test]
fn test_dividend_gives_american_call_a_premium() {
    let paying = market_with_dividend(3.0);
    let eu = price(&european(100.0, PayoffType::Call), &paying, PricingMethod::Tree, 200).unwrap();
    let am = price(&american(100.0, PayoffType::Call), &paying, PricingMethod::Tree, 200).unwrap();
    assert!(am > eu);
}

#[test]
fn test_dividend_after_expiry_is_ignored() {
    let schedule =
        DividendSchedule::new(vec![Dividend::new(one_year().add_days(30), 5.0).unwrap()]);
    let late = Market::new(100.0, 0.05, 0.2, schedule, today()).unwrap();
    let option = american(100.0, PayoffType::Put);

    let with_late = price(&option, &late, PricingMethod::Tree, 100).unwrap();
    let without = price(&option, &market(), PricingMethod::Tree, 100).unwrap();
    assert_eq!(with_late, without);
}

#[test]
fn test_rolled_forward_leg_prices_shorter_maturity() {
    let near_expiry = today().add_days(182);
    let long_leg = american(100.0, PayoffType::Call);

    let rolled_market = market().shift_valuation_date(near_expiry);
    let rolled_leg = long_leg.with_valuation_date(near_expiry);

    let full = price(&long_leg, &market(), PricingMethod::Tree, 100).unwrap();
    let remaining = price(&rolled_leg, &rolled_market, PricingMethod::Tree, 100).unwrap();

    assert!(remaining > 0.0);
    assert!(remaining < full);
    assert_eq!(market().valuation_date(), today());
}

#[test]
fn test_engine_emits_tracing_events() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();

    let value = price(&american(110.0, PayoffType::Put), &market(), PricingMethod::Auto, 20).unwrap();
    assert!(value > 0.0);
}
