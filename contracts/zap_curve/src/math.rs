//! Overflow-safe arithmetic helpers for pricing calculations.
//!
//! Every helper uses checked arithmetic and reports overflow as
//! `ContractError::ArithmeticOverflow` instead of wrapping or panicking.

use zap_errors::ContractError;

/// Checked `i128` addition.
#[inline]
pub fn add_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

/// Checked `i128` subtraction.
#[inline]
pub fn sub_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::ArithmeticOverflow)
}

/// Checked `i128` multiplication.
#[inline]
pub fn mul_i128(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::ArithmeticOverflow)
}

/// Checked `u64` addition, used for dot counters.
#[inline]
pub fn add_u64(a: u64, b: u64) -> Result<u64, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

/// Checked `u64` subtraction, used for dot counters.
#[inline]
pub fn sub_u64(a: u64, b: u64) -> Result<u64, ContractError> {
    a.checked_sub(b).ok_or(ContractError::ArithmeticOverflow)
}

/// Product of `factors` with checked multiplication.
pub fn product_i128(factors: &[i128]) -> Result<i128, ContractError> {
    factors.iter().try_fold(1_i128, |acc, f| mul_i128(acc, *f))
}

/// `k * (k - 1) / 2`, the sum of ranks `0..k`.
///
/// The even factor is halved before multiplying so the result is computed
/// whenever it is itself representable.
pub fn triangular(k: u64) -> Result<i128, ContractError> {
    if k == 0 {
        return Ok(0);
    }
    let (a, b) = (k as i128, (k - 1) as i128);
    if a % 2 == 0 {
        mul_i128(a / 2, b)
    } else {
        mul_i128(a, b / 2)
    }
}

/// `(k - 1) * k * (2k - 1) / 6`, the sum of squared ranks `0..k`.
///
/// One of `k - 1`, `k` is even and one of the three factors is divisible by
/// three; both divisions happen before the checked product.
pub fn square_pyramidal(k: u64) -> Result<i128, ContractError> {
    if k == 0 {
        return Ok(0);
    }
    let k = k as i128;
    let mut factors = [k - 1, k, sub_i128(mul_i128(2, k)?, 1)?];

    if factors[0] % 2 == 0 {
        factors[0] /= 2;
    } else {
        factors[1] /= 2;
    }
    if let Some(f) = factors.iter_mut().find(|f| **f % 3 == 0) {
        *f /= 3;
    }

    product_i128(&factors)
}
