//! Summation and inversion for logarithmic curves.
//!
//! The logarithmic marginal price `start + ceil(m * log2 n)` is a step
//! function of the rank. Sums walk it plateau by plateau: each plateau is a
//! run of ranks sharing one price. Plateau lengths grow geometrically, by
//! about `2^(1/m)` per plateau, so the walker guesses each end from the
//! previous plateau, gallops from the guess and finishes with binary
//! search. The step found just past a plateau is kept as the next
//! plateau's step.
//!
//! Every exact log evaluation is charged against `MAX_LOG_EVALUATIONS`. A
//! range holding `P` distinct prices costs about `P` evaluations while
//! plateaus are one rank long and about `2P` once they are longer. There
//! are roughly `m * log2(to)` distinct prices below rank `to`, so:
//!
//! | multiplier | ranks priced in one call |
//! |---|---|
//! | up to 100 | the whole `u64` range |
//! | 1 000 | about 10 000 000 |
//! | 1 000 000 | about 65 000 |
//!
//! A holding past the bound is still returned in parts, since an unbond of
//! the top ranks only walks those ranks.

use crate::log2::ceil_mul_log2;
use crate::math::{add_i128, add_u64, mul_i128, sub_i128};
use crate::types::{Curve, Purchase};
use zap_errors::ContractError;

/// Upper bound on exact log evaluations per pricing call.
pub const MAX_LOG_EVALUATIONS: u32 = 65_536;

struct PlateauWalker<'a> {
    curve: &'a Curve,
    evaluations: u32,
    /// Step at the last rank found past the plateau being walked.
    boundary: Option<(u64, i128)>,
}

impl<'a> PlateauWalker<'a> {
    fn new(curve: &'a Curve) -> Self {
        PlateauWalker {
            curve,
            evaluations: 0,
            boundary: None,
        }
    }

    fn step(&mut self, rank: u64) -> Result<i128, ContractError> {
        if let Some((known, step)) = self.boundary {
            if known == rank {
                return Ok(step);
            }
        }
        self.evaluations += 1;
        if self.evaluations > MAX_LOG_EVALUATIONS {
            return Err(ContractError::PricingBoundExceeded);
        }
        ceil_mul_log2(self.curve.multiplier, rank)
    }

    /// First rank after `rank` whose step differs from `step`, capped at the
    /// exclusive `limit`. `hint` is the expected plateau length. Requires
    /// `rank < limit`.
    fn plateau_end(
        &mut self,
        rank: u64,
        step: i128,
        limit: u64,
        hint: u64,
    ) -> Result<u64, ContractError> {
        if self.curve.multiplier == 0 {
            return Ok(limit);
        }

        // ranks in [rank, lo] share `step`; hi is the first known mismatch or limit
        let mut lo = rank;
        let mut hi = limit;
        let mut climbing = true;

        let guess = rank.saturating_add(hint.saturating_sub(1));
        if guess > rank && guess < limit {
            let found = self.step(guess)?;
            if found == step {
                lo = guess;
            } else {
                hi = guess;
                self.boundary = Some((guess, found));
                climbing = false;
            }
        }

        let mut span: u64 = 1;
        if climbing {
            while let Some(candidate) = lo.checked_add(span).filter(|p| *p < hi) {
                let found = self.step(candidate)?;
                if found != step {
                    hi = candidate;
                    self.boundary = Some((candidate, found));
                    break;
                }
                lo = candidate;
                span = span.saturating_mul(2);
            }
        } else {
            while let Some(candidate) = hi.checked_sub(span).filter(|p| *p > lo) {
                let found = self.step(candidate)?;
                if found == step {
                    lo = candidate;
                    break;
                }
                hi = candidate;
                self.boundary = Some((candidate, found));
                span = span.saturating_mul(2);
            }
        }

        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            let found = self.step(mid)?;
            if found == step {
                lo = mid;
            } else {
                hi = mid;
                self.boundary = Some((mid, found));
            }
        }
        Ok(hi)
    }
}

/// Expected length of the plateau opening at `end`, after one spanning
/// `[rank, end)`.
fn next_hint(rank: u64, end: u64) -> u64 {
    let len = end - rank;
    if rank == 0 {
        return len;
    }
    let scaled = len as u128 * end as u128 / rank as u128;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Cost of ranks `[from, to)` on a logarithmic curve.
pub fn range_cost(curve: &Curve, from: u64, to: u64) -> Result<i128, ContractError> {
    let mut walker = PlateauWalker::new(curve);
    let mut total: i128 = 0;
    let mut rank = from;
    let mut hint: u64 = 1;

    while rank < to {
        let step = walker.step(rank)?;
        let end = walker.plateau_end(rank, step, to, hint)?;
        let price = add_i128(curve.start, step)?;
        total = add_i128(total, mul_i128(price, (end - rank) as i128)?)?;
        hint = next_hint(rank, end);
        rank = end;
    }
    Ok(total)
}

/// Largest run of ranks starting at `start_rank` whose cost fits `budget`.
pub fn max_units(curve: &Curve, start_rank: u64, budget: i128) -> Result<Purchase, ContractError> {
    let mut walker = PlateauWalker::new(curve);
    let mut bought = Purchase::NONE;
    let mut remaining = budget;
    let mut rank = start_rank;
    let mut hint: u64 = 1;

    while rank < u64::MAX {
        let step = walker.step(rank)?;
        let price = add_i128(curve.start, step)?;
        if price > remaining {
            break;
        }

        let end = walker.plateau_end(rank, step, u64::MAX, hint)?;
        let run = end - rank;
        hint = next_hint(rank, end);
        let affordable = if price == 0 {
            run
        } else {
            // remaining / price <= remaining, and run fits u64
            core::cmp::min(run as i128, remaining / price) as u64
        };

        let cost = mul_i128(price, affordable as i128)?;
        remaining = sub_i128(remaining, cost)?;
        bought.dots = add_u64(bought.dots, affordable)?;
        bought.cost = add_i128(bought.cost, cost)?;
        rank = add_u64(rank, affordable)?;

        if affordable < run {
            break;
        }
    }
    Ok(bought)
}
