//! Internal rate of return.
//!
//! The IRR is the annual rate `r` at which the net present value of the
//! signed flows is zero:
//!
//! $$NPV(r) = \sum_i a_i (1 + r)^{-t_i}$$
//!
//! where `t_i` is the ACT/365F year fraction from the earliest flow to flow
//! `i`. Deposits are negative, withdrawals and the closing valuation are
//! positive.
//!
//! The root is searched for with Newton-Raphson from [`IrrConfig::initial_guess`]
//! inside `(lower_bound, upper_bound)`, falling back to bisection over the
//! closed interval. If neither locates a root the IRR is undefined and
//! [`solve_irr`] returns `Ok(None)`.
//!
//! A rate is accepted when `|NPV(r)| < max(tolerance, relative_tolerance * G(r))`
//! with `G(r) = \sum_i |a_i| (1 + r)^{-t_i}`. The relative floor only matters
//! once the discounted flows are large enough that rounding keeps the absolute
//! NPV above `tolerance`.

use effrate_core::daycount::Act365Fixed;
use effrate_core::error::{ensure_finite, EffRateError, EffRateResult};
use effrate_core::types::SignedFlow;
use effrate_math::solvers::{hybrid, SolverConfig};

/// Newton starting point (10% per year).
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Lowest admissible rate. Just above a total loss.
pub const DEFAULT_LOWER_BOUND: f64 = -0.9999;

/// Highest admissible rate (1000% per year).
pub const DEFAULT_UPPER_BOUND: f64 = 10.0;

/// Convergence threshold on `|NPV(r)|`.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Convergence threshold on `|NPV(r)|` relative to the gross present value.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-11;

/// Newton iteration cap.
pub const DEFAULT_NEWTON_ITERATIONS: u32 = 50;

/// Bisection iteration cap.
pub const DEFAULT_BISECTION_ITERATIONS: u32 = 100;

/// Parameters of the IRR search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrConfig {
    /// Newton starting rate.
    pub initial_guess: f64,
    /// Lower end of the search interval.
    pub lower_bound: f64,
    /// Upper end of the search interval.
    pub upper_bound: f64,
    /// Convergence threshold on the absolute NPV.
    pub tolerance: f64,
    /// Convergence threshold on the NPV relative to the gross present value.
    /// Zero leaves only the absolute threshold.
    pub relative_tolerance: f64,
    /// Maximum Newton iterations before falling back to bisection.
    pub newton_max_iterations: u32,
    /// Maximum bisection halvings.
    pub bisection_max_iterations: u32,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            tolerance: DEFAULT_TOLERANCE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            newton_max_iterations: DEFAULT_NEWTON_ITERATIONS,
            bisection_max_iterations: DEFAULT_BISECTION_ITERATIONS,
        }
    }
}

impl IrrConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Newton starting rate.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the search interval.
    #[must_use]
    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    /// Sets the convergence threshold.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the relative convergence threshold.
    #[must_use]
    pub fn with_relative_tolerance(mut self, relative_tolerance: f64) -> Self {
        self.relative_tolerance = relative_tolerance;
        self
    }

    /// Sets both iteration caps.
    #[must_use]
    pub fn with_max_iterations(mut self, newton: u32, bisection: u32) -> Self {
        self.newton_max_iterations = newton;
        self.bisection_max_iterations = bisection;
        self
    }

    /// Checks that the parameters describe a usable search.
    ///
    /// # Errors
    ///
    /// `EffRateError::InvalidConfig` when a parameter is non-finite, the
    /// lower bound is at or below -1, the bounds are not ordered, the initial
    /// guess is outside them, the tolerance is not positive, or the relative
    /// tolerance is negative.
    pub fn validate(&self) -> EffRateResult<()> {
        let params = [
            self.initial_guess,
            self.lower_bound,
            self.upper_bound,
            self.tolerance,
            self.relative_tolerance,
        ];
        if params.iter().any(|p| !p.is_finite()) {
            return Err(EffRateError::invalid_config(
                "IRR parameters must be finite",
            ));
        }
        if self.lower_bound <= -1.0 {
            return Err(EffRateError::invalid_config(format!(
                "lower bound {} must be above -1",
                self.lower_bound
            )));
        }
        if self.lower_bound >= self.upper_bound {
            return Err(EffRateError::invalid_config(format!(
                "lower bound {} must be below upper bound {}",
                self.lower_bound, self.upper_bound
            )));
        }
        if self.initial_guess <= self.lower_bound || self.initial_guess >= self.upper_bound {
            return Err(EffRateError::invalid_config(format!(
                "initial guess {} must lie strictly inside the bounds",
                self.initial_guess
            )));
        }
        if self.tolerance <= 0.0 {
            return Err(EffRateError::invalid_config("tolerance must be positive"));
        }
        if self.relative_tolerance < 0.0 {
            return Err(EffRateError::invalid_config(
                "relative tolerance must not be negative",
            ));
        }
        Ok(())
    }

    fn newton_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.newton_max_iterations)
    }

    fn bisection_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.bisection_max_iterations)
    }
}

/// `(year fraction, amount)` pairs in date order.
fn timed_flows(flows: &[SignedFlow]) -> Vec<(f64, f64)> {
    let mut sorted = flows.to_vec();
    sorted.sort_by_key(|flow| flow.date);

    let Some(start) = sorted.first().map(|flow| flow.date) else {
        return Vec::new();
    };
    sorted
        .iter()
        .map(|flow| (Act365Fixed.year_fraction(start, flow.date), flow.amount))
        .collect()
}

fn present_value(timed: &[(f64, f64)], rate: f64) -> f64 {
    let base = 1.0 + rate;
    timed.iter().map(|&(t, amount)| amount * base.powf(-t)).sum()
}

fn present_value_derivative(timed: &[(f64, f64)], rate: f64) -> f64 {
    let base = 1.0 + rate;
    timed
        .iter()
        .map(|&(t, amount)| -t * amount * base.powf(-t - 1.0))
        .sum()
}

fn gross_present_value(timed: &[(f64, f64)], rate: f64) -> f64 {
    let base = 1.0 + rate;
    timed.iter().map(|&(t, amount)| amount.abs() * base.powf(-t)).sum()
}

/// Net present value of `flows` at an annual `rate`.
///
/// Times are measured from the earliest flow. Returns 0 for no flows.
#[must_use]
pub fn npv(flows: &[SignedFlow], rate: f64) -> f64 {
    present_value(&timed_flows(flows), rate)
}

/// Derivative of [`npv`] with respect to the rate.
#[must_use]
pub fn npv_derivative(flows: &[SignedFlow], rate: f64) -> f64 {
    present_value_derivative(&timed_flows(flows), rate)
}

/// Solves for the IRR with the default [`IrrConfig`].
///
/// Returns `Ok(None)` when fewer than two flows are given, when the flows do
/// not include both a strictly positive and a strictly negative amount, or
/// when no root is found inside `[-0.9999, 10.0]`.
///
/// # Errors
///
/// `EffRateError::NonFiniteInput` if any amount is NaN or infinite.
///
/// # Example
///
/// ```rust
/// use effrate_analytics::irr::solve_irr;
/// use effrate_core::{Date, SignedFlow};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let flows = [
///     SignedFlow::new(start, -1000.0),
///     SignedFlow::new(start.add_days(365), 800.0),
/// ];
///
/// let irr = solve_irr(&flows).unwrap().unwrap();
/// assert!((irr + 0.20).abs() < 1e-6);
/// ```
pub fn solve_irr(flows: &[SignedFlow]) -> EffRateResult<Option<f64>> {
    solve_irr_with_config(flows, &IrrConfig::default())
}

/// Solves for the IRR with explicit search parameters.
///
/// # Errors
///
/// `EffRateError::NonFiniteInput` for non-finite amounts and
/// `EffRateError::InvalidConfig` when `config` fails [`IrrConfig::validate`].
pub fn solve_irr_with_config(
    flows: &[SignedFlow],
    config: &IrrConfig,
) -> EffRateResult<Option<f64>> {
    for (index, flow) in flows.iter().enumerate() {
        ensure_finite(&format!("amount of flow {index}"), flow.amount)?;
    }
    config.validate()?;

    if flows.len() < 2 {
        log::trace!("IRR undefined: {} flow(s)", flows.len());
        return Ok(None);
    }
    let has_inflow = flows.iter().any(|flow| flow.amount > 0.0);
    let has_outflow = flows.iter().any(|flow| flow.amount < 0.0);
    if !(has_inflow && has_outflow) {
        log::trace!("IRR undefined: flows do not change sign");
        return Ok(None);
    }

    let timed = timed_flows(flows);
    // Dividing by the scale turns the absolute test on the solver side into
    // `|NPV| < max(tolerance, relative_tolerance * G(r))` without moving the root.
    let scale = |rate: f64| {
        (config.relative_tolerance * gross_present_value(&timed, rate) / config.tolerance).max(1.0)
    };
    let f = |rate: f64| present_value(&timed, rate) / scale(rate);
    let df = |rate: f64| present_value_derivative(&timed, rate) / scale(rate);

    match hybrid(
        f,
        df,
        config.initial_guess,
        (config.lower_bound, config.upper_bound),
        &config.newton_config(),
        &config.bisection_config(),
    ) {
        Ok(result) => {
            log::debug!(
                "IRR {} found in {} iterations (NPV {:e})",
                result.root,
                result.iterations,
                present_value(&timed, result.root)
            );
            Ok(Some(result.root))
        }
        Err(err) if err.is_no_solution() => {
            log::debug!("IRR undefined: {err}");
            Ok(None)
        }
        Err(err) => Err(EffRateError::invalid_config(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use effrate_core::types::Date;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn flow(d: &str, amount: f64) -> SignedFlow {
        SignedFlow::new(date(d), amount)
    }

    #[test]
    fn test_one_year_gain() {
        // 2024-01-01 to 2024-12-31 is exactly 365 days.
        let flows = [flow("2024-01-01", -1000.0), flow("2024-12-31", 1100.0)];

        let irr = solve_irr(&flows).unwrap().unwrap();

        assert_relative_eq!(irr, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_leap_year_span_uses_365_day_basis() {
        let flows = [flow("2024-01-01", -1000.0), flow("2025-01-01", 1100.0)];

        let irr = solve_irr(&flows).unwrap().unwrap();

        assert_relative_eq!(irr, 1.1_f64.powf(365.0 / 366.0) - 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_order_of_flows_does_not_matter() {
        let flows = [
            flow("2025-01-01", 1500.0),
            flow("2024-06-01", -500.0),
            flow("2024-09-01", 200.0),
            flow("2024-01-01", -1000.0),
        ];
        let mut sorted = flows.to_vec();
        sorted.sort_by_key(|f| f.date);

        let unsorted_irr = solve_irr(&flows).unwrap().unwrap();
        let sorted_irr = solve_irr(&sorted).unwrap().unwrap();

        assert_relative_eq!(unsorted_irr, sorted_irr, epsilon = 1e-9);
        assert!(npv(&flows, unsorted_irr).abs() < 1e-4);
        assert!(unsorted_irr > 0.0 && unsorted_irr < 0.3);
    }

    #[test]
    fn test_one_day_gain() {
        let flows = [flow("2024-01-01", -1000.0), flow("2024-01-02", 1001.0)];

        let irr = solve_irr(&flows).unwrap().unwrap();

        assert!(irr > 0.1 && irr < 2.0, "irr = {irr}");
        assert_relative_eq!(irr, 1.001_f64.powf(365.0) - 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fewer_than_two_flows() {
        assert_eq!(solve_irr(&[]).unwrap(), None);
        assert_eq!(solve_irr(&[flow("2024-01-01", -1000.0)]).unwrap(), None);
    }

    #[test]
    fn test_requires_both_signs() {
        let deposits = [flow("2024-01-01", -1000.0), flow("2024-06-01", -500.0)];
        let with_zero = [flow("2024-01-01", -1000.0), flow("2025-01-01", 0.0)];

        assert_eq!(solve_irr(&deposits).unwrap(), None);
        assert_eq!(solve_irr(&with_zero).unwrap(), None);
    }

    #[test]
    fn test_rate_beyond_upper_bound_is_undefined() {
        // 1000-fold in a month is far above 1000% a year.
        let flows = [flow("2024-01-01", -1000.0), flow("2024-01-31", 1_000_000.0)];

        assert_eq!(solve_irr(&flows).unwrap(), None);
    }

    #[test]
    fn test_non_finite_amount_is_an_error() {
        let flows = [flow("2024-01-01", -1000.0), flow("2025-01-01", f64::NAN)];

        match solve_irr(&flows) {
            Err(EffRateError::NonFiniteInput { field, .. }) => {
                assert_eq!(field, "amount of flow 1");
            }
            other => panic!("Expected NonFiniteInput, got {other:?}"),
        }
    }

    #[test]
    fn test_bisection_fallback_finds_root() {
        let flows = [flow("2024-01-01", -1000.0), flow("2024-12-31", 1250.0)];
        let config = IrrConfig::default().with_max_iterations(1, 100);

        let irr = solve_irr_with_config(&flows, &config).unwrap().unwrap();

        assert_relative_eq!(irr, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_exhausted_bisection_is_undefined() {
        let flows = [flow("2024-01-01", -1000.0), flow("2024-12-31", 1250.0)];
        let config = IrrConfig::default().with_max_iterations(0, 3);

        assert_eq!(solve_irr_with_config(&flows, &config).unwrap(), None);
    }

    #[test]
    fn test_invalid_config() {
        let flows = [flow("2024-01-01", -1000.0), flow("2024-12-31", 1100.0)];

        for config in [
            IrrConfig::default().with_bounds(-1.5, 10.0),
            IrrConfig::default().with_bounds(1.0, 0.5),
            IrrConfig::default().with_initial_guess(20.0),
            IrrConfig::default().with_tolerance(0.0),
            IrrConfig::default().with_tolerance(f64::NAN),
            IrrConfig::default().with_relative_tolerance(-1e-12),
        ] {
            assert!(matches!(
                solve_irr_with_config(&flows, &config),
                Err(EffRateError::InvalidConfig { .. })
            ));
        }
    }

    fn monthly_deposits(amount: f64) -> Vec<SignedFlow> {
        let start = date("2015-01-01");
        let mut flows: Vec<SignedFlow> = (0..120)
            .map(|i| SignedFlow::new(start.add_days(30 * i), -amount))
            .collect();
        let invested = 120.0 * amount;
        flows.push(SignedFlow::new(start.add_days(3700), invested * 1.37));
        flows
    }

    #[test]
    fn test_rate_is_independent_of_currency_scale() {
        let reference = solve_irr(&monthly_deposits(1000.0)).unwrap().unwrap();

        for scale in [1e-3, 1.0, 1e3, 1e5, 1e6, 1e7, 1e9] {
            let flows = monthly_deposits(1000.0 * scale);

            let irr = solve_irr(&flows)
                .unwrap()
                .unwrap_or_else(|| panic!("no IRR at scale {scale:e}"));

            assert_relative_eq!(irr, reference, epsilon = 1e-8);
            let gross: f64 = flows.iter().map(|f| f.amount.abs()).sum();
            assert!(npv(&flows, irr).abs() < 1e-4_f64.max(1e-9 * gross));
        }
    }

    #[test]
    fn test_absolute_tolerance_alone_fails_at_large_scale() {
        let flows = monthly_deposits(1e9);
        let config = IrrConfig::default().with_relative_tolerance(0.0);

        assert_eq!(solve_irr_with_config(&flows, &config).unwrap(), None);
    }

    #[test]
    fn test_small_amounts_keep_absolute_tolerance() {
        let flows = [
            flow("2024-01-01", -1000.0),
            flow("2024-07-01", -500.0),
            flow("2025-03-01", 1700.0),
        ];

        let irr = solve_irr(&flows).unwrap().unwrap();

        assert!(npv(&flows, irr).abs() < DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_npv_at_zero_rate_is_sum() {
        let flows = [
            flow("2024-01-01", -1000.0),
            flow("2024-04-01", -500.0),
            flow("2025-01-01", 1600.0),
        ];

        assert_relative_eq!(npv(&flows, 0.0), 100.0, epsilon = 1e-9);
        assert_eq!(npv(&[], 0.05), 0.0);
    }

    #[test]
    fn test_npv_derivative_matches_finite_difference() {
        let flows = [
            flow("2024-01-01", -1000.0),
            flow("2024-07-01", -250.0),
            flow("2025-03-01", 1400.0),
        ];
        let rate = 0.07;
        let h = 1e-6;

        let numeric = (npv(&flows, rate + h) - npv(&flows, rate - h)) / (2.0 * h);

        assert_relative_eq!(npv_derivative(&flows, rate), numeric, max_relative = 1e-5);
    }
}
