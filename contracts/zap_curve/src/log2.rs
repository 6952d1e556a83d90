//! Exact `ceil(multiplier * log2(rank))` without floating point.
//!
//! `ceil(m * log2 n) == ceil(log2(n^m))`. When `n` is a power of two the
//! answer is `m * log2 n` exactly. Otherwise `n^m` is never a power of two and
//! the answer is `floor(log2(n^m)) + 1`. The floor is read from a lower and an
//! upper bound of `n^m`, each kept as a normalized 64-bit mantissa and a binary
//! exponent while square-and-multiply runs. If the two bounds disagree on the
//! binary exponent the mantissa precision is exhausted and the call fails with
//! `PricingBoundExceeded`.

use crate::math::{add_i128, mul_i128};
use zap_errors::ContractError;

const TOP_BIT: u64 = 1 << 63;

/// `mant * 2^exp` with `mant` normalized so its top bit is set.
#[derive(Clone, Copy, Debug)]
struct Bound {
    mant: u64,
    exp: i128,
}

impl Bound {
    fn from_rank(rank: u64) -> Self {
        let shift = rank.leading_zeros();
        Bound {
            mant: rank << shift,
            exp: -(shift as i128),
        }
    }

    fn floor_log2(&self) -> Result<i128, ContractError> {
        add_i128(self.exp, 63)
    }

    /// Product of two bounds, truncated (lower bound) or rounded away from
    /// zero (upper bound) back to a 64-bit mantissa.
    fn mul(self, other: Bound, round_up: bool) -> Result<Bound, ContractError> {
        let product = (self.mant as u128) * (other.mant as u128);
        // product lies in [2^126, 2^128)
        let shift: u32 = if product >> 127 == 1 { 64 } else { 63 };
        let mut mant = (product >> shift) as u64;
        let mut exp = add_i128(add_i128(self.exp, other.exp)?, shift as i128)?;

        let dropped = product & ((1_u128 << shift) - 1);
        if round_up && dropped != 0 {
            match mant.checked_add(1) {
                Some(m) => mant = m,
                None => {
                    mant = TOP_BIT;
                    exp = add_i128(exp, 1)?;
                }
            }
        }

        Ok(Bound { mant, exp })
    }

    fn pow(self, exponent: u128, round_up: bool) -> Result<Bound, ContractError> {
        let high_bit = 127 - exponent.leading_zeros();
        let mut acc = self;
        for bit in (0..high_bit).rev() {
            acc = acc.mul(acc, round_up)?;
            if (exponent >> bit) & 1 == 1 {
                acc = acc.mul(self, round_up)?;
            }
        }
        Ok(acc)
    }
}

/// `ceil(multiplier * log2(rank))`, with rank 0 and rank 1 mapping to 0.
///
/// `multiplier` must be non-negative.
pub fn ceil_mul_log2(multiplier: i128, rank: u64) -> Result<i128, ContractError> {
    if multiplier < 0 {
        return Err(ContractError::InvalidCurve);
    }
    if multiplier == 0 || rank <= 1 {
        return Ok(0);
    }
    if rank.is_power_of_two() {
        return mul_i128(multiplier, rank.trailing_zeros() as i128);
    }

    let base = Bound::from_rank(rank);
    let exponent = multiplier as u128;
    let lower = base.pow(exponent, false)?.floor_log2()?;
    let upper = base.pow(exponent, true)?.floor_log2()?;
    if lower != upper {
        return Err(ContractError::PricingBoundExceeded);
    }

    add_i128(lower, 1)
}
