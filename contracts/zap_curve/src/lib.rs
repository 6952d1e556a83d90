//! Zap Curve Pricing Engine
//!
//! Deterministic, side-effect-free pricing of dots against a provider curve.
//! Rank `n` is zero-based: `marginal_price(curve, n)` is the price of going
//! from `n` held dots to `n + 1`.
//!
//! | shape        | marginal price                      | cumulative cost                    |
//! |--------------|-------------------------------------|------------------------------------|
//! | Linear       | `m*n + s`                           | `m*k(k-1)/2 + s*k`                 |
//! | Exponential  | `m*n^2 + s`                         | `m*(k-1)k(2k-1)/6 + s*k`           |
//! | Logarithmic  | `ceil(m*log2(n) + s)`, rank 0 = `s` | plateau summation of the marginal  |
//!
//! ## Work bounds
//!
//! - Polynomial cumulative cost is O(1). `max_units_for_budget` doubles then
//!   bisects over it, at most `MAX_SEARCH_PROBES` evaluations.
//! - Logarithmic sums and inversion walk price plateaus and are capped at
//!   `MAX_LOG_EVALUATIONS` exact log evaluations, each O(log2 multiplier).
//!
//! Exceeding a bound fails with `PricingBoundExceeded`. Any intermediate
//! beyond `i128` fails with `ArithmeticOverflow`. Nothing wraps.

#![no_std]

mod log2;
mod logarithmic;
pub mod math;
mod types;

pub use log2::ceil_mul_log2;
pub use logarithmic::MAX_LOG_EVALUATIONS;
pub use types::{Curve, CurveType, Purchase};

use math::{add_i128, mul_i128, square_pyramidal, sub_i128, triangular};
use zap_errors::ContractError;



/// Upper bound on cumulative-cost probes in a polynomial budget search:
/// 64 doublings plus 64 bisections, with headroom.
pub const MAX_SEARCH_PROBES: u32 = 130;

// ─── Curve state ───────────────────────────────────────────────────────────

/// Rejects negative parameters and the all-zero curve, which would price
/// every rank at nothing.
pub fn validate(curve: &Curve) -> Result<(), ContractError> {
    if curve.start < 0 || curve.multiplier < 0 {
        return Err(ContractError::InvalidCurve);
    }
    if curve.start == 0 && curve.multiplier == 0 {
        return Err(ContractError::InvalidCurve);
    }
    Ok(())
}

/// Resolves the "uninitialized" state of a (provider, specifier) curve.
pub fn require_curve(curve: Option<Curve>) -> Result<Curve, ContractError> {
    curve.ok_or(ContractError::CurveUninitialized)
}

// ─── Pricing ───────────────────────────────────────────────────────────────

/// Price of the dot at zero-based `rank`.
pub fn marginal_price(curve: &Curve, rank: u64) -> Result<i128, ContractError> {
    validate(curve)?;
    let n = rank as i128;
    match curve.curve_type {
        CurveType::Linear => add_i128(mul_i128(curve.multiplier, n)?, curve.start),
        CurveType::Exponential => {
            add_i128(mul_i128(curve.multiplier, mul_i128(n, n)?)?, curve.start)
        }
        CurveType::Logarithmic => add_i128(curve.start, ceil_mul_log2(curve.multiplier, rank)?),
    }
}

/// Externally quoted price of the next dot when `issued` dots are held.
pub fn current_unit_price(curve: &Curve, issued: u64) -> Result<i128, ContractError> {
    marginal_price(curve, issued)
}

/// Total budget needed to go from 0 to `dots` held.
pub fn cumulative_cost(curve: &Curve, dots: u64) -> Result<i128, ContractError> {
    range_cost(curve, 0, dots)
}

/// Cost of the ranks `[from, to)`, i.e. `cumulative_cost(to) - cumulative_cost(from)`.
pub fn range_cost(curve: &Curve, from: u64, to: u64) -> Result<i128, ContractError> {
    validate(curve)?;
    if from > to {
        return Err(ContractError::InvalidAmount);
    }
    if from == to {
        return Ok(0);
    }
    match curve.curve_type {
        CurveType::Logarithmic => logarithmic::range_cost(curve, from, to),
        _ => sub_i128(polynomial_cost(curve, to)?, polynomial_cost(curve, from)?),
    }
}

/// Largest number of dots purchasable with `budget` by a holder of
/// `start_rank` dots, and the exact budget consumed.
///
/// A zero budget always yields an empty purchase.
pub fn max_units_for_budget(
    curve: &Curve,
    start_rank: u64,
    budget: i128,
) -> Result<Purchase, ContractError> {
    validate(curve)?;
    if budget < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if budget == 0 {
        return Ok(Purchase::NONE);
    }
    match curve.curve_type {
        CurveType::Logarithmic => logarithmic::max_units(curve, start_rank, budget),
        _ => polynomial_max_units(curve, start_rank, budget),
    }
}

// ─── Polynomial curves ─────────────────────────────────────────────────────

fn polynomial_cost(curve: &Curve, dots: u64) -> Result<i128, ContractError> {
    let rank_sum = match curve.curve_type {
        CurveType::Linear => triangular(dots)?,
        CurveType::Exponential => square_pyramidal(dots)?,
        CurveType::Logarithmic => return logarithmic::range_cost(curve, 0, dots),
    };
    add_i128(
        mul_i128(curve.multiplier, rank_sum)?,
        mul_i128(curve.start, dots as i128)?,
    )
}

struct BudgetSearch<'a> {
    curve: &'a Curve,
    start_rank: u64,
    base: i128,
    ceiling: i128,
    probes: u32,
}

impl<'a> BudgetSearch<'a> {
    /// Cost of buying `delta` more dots, or `None` when it exceeds the budget.
    fn cost_of(&mut self, delta: u64) -> Result<Option<i128>, ContractError> {
        self.probes += 1;
        if self.probes > MAX_SEARCH_PROBES {
            return Err(ContractError::PricingBoundExceeded);
        }
        // cumulative cost is monotone, so a value past i128 is past any budget
        match polynomial_cost(self.curve, self.start_rank + delta) {
            Ok(total) if total <= self.ceiling => Ok(Some(total - self.base)),
            Ok(_) | Err(ContractError::ArithmeticOverflow) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn polynomial_max_units(
    curve: &Curve,
    start_rank: u64,
    budget: i128,
) -> Result<Purchase, ContractError> {
    let base = polynomial_cost(curve, start_rank)?;
    let mut search = BudgetSearch {
        curve,
        start_rank,
        base,
        ceiling: base.saturating_add(budget),
        probes: 0,
    };
    let headroom = u64::MAX - start_rank;

    // best is always affordable
    let mut best = Purchase::NONE;
    let mut span: u64 = 1;
    let mut hi = loop {
        let delta = span.min(headroom);
        if delta == best.dots {
            return Ok(best);
        }
        match search.cost_of(delta)? {
            Some(cost) => {
                best = Purchase { dots: delta, cost };
                span = span.saturating_mul(2);
            }
            None => break delta,
        }
    };

    while hi - best.dots > 1 {
        let mid = best.dots + (hi - best.dots) / 2;
        match search.cost_of(mid)? {
            Some(cost) => best = Purchase { dots: mid, cost },
            None => hi = mid,
        }
    }
    Ok(best)
}
