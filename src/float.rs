//! The floating-point capability every primitive and predicate is generic over.

use std::fmt::Debug;
use std::hint::black_box;

use num_traits::Float;

use crate::bounds::{ErrorBounds, F32_BOUNDS, F64_BOUNDS};
use crate::error::PredicateError;
use crate::expansion::primitives::two_sum;

/// A binary IEEE-754 floating-point type whose arithmetic rounds to nearest,
/// ties to even, at its own precision.
pub trait PredicateFloat: Float + Debug + Send + Sync + 'static {
    /// `2^ceil(p / 2) + 1` for a `p`-bit significand. Multiplying by it splits a
    /// value into two halves of at most `p / 2` significant bits each.
    const SPLITTER: Self;

    /// `2^-p`: half an ulp of one, the largest relative error of one rounding.
    const EPSILON: Self;

    /// Error-bound coefficients derived from [`Self::EPSILON`].
    fn error_bounds() -> &'static ErrorBounds<Self>;

    #[inline(always)]
    fn two() -> Self {
        Self::one() + Self::one()
    }
}

impl PredicateFloat for f64 {
    const SPLITTER: f64 = 134_217_729.0;
    const EPSILON: f64 = 1.0 / 9_007_199_254_740_992.0;

    #[inline(always)]
    fn error_bounds() -> &'static ErrorBounds<f64> {
        &F64_BOUNDS
    }
}

impl PredicateFloat for f32 {
    const SPLITTER: f32 = 4_097.0;
    const EPSILON: f32 = 1.0 / 16_777_216.0;

    #[inline(always)]
    fn error_bounds() -> &'static ErrorBounds<f32> {
        &F32_BOUNDS
    }
}

/// Measures `2^-p` at run time by halving until `1 + epsilon` rounds to one.
pub fn probe_epsilon<T: PredicateFloat>() -> T {
    probe::<T>().0
}

/// Measures the splitter at run time alongside [`probe_epsilon`].
pub fn probe_splitter<T: PredicateFloat>() -> T {
    probe::<T>().1
}

fn probe<T: PredicateFloat>() -> (T, T) {
    let one = T::one();
    let half = one / T::two();
    let mut every_other = true;
    let mut epsilon = one;
    let mut splitter = one;
    let mut check = one;
    loop {
        let last_check = check;
        epsilon = black_box(epsilon * half);
        if every_other {
            splitter = splitter * T::two();
        }
        every_other = !every_other;
        check = black_box(one + epsilon);
        if check == one || check == last_check {
            break;
        }
    }
    (epsilon, splitter + one)
}

/// Checks that the running platform reproduces the constants the exact
/// primitives were compiled for, and that a simple exact sum is recovered.
pub fn verify_arithmetic<T: PredicateFloat>() -> Result<(), PredicateError> {
    let (epsilon, splitter) = probe::<T>();
    if epsilon != T::EPSILON {
        return Err(unsupported("epsilon", T::EPSILON, epsilon));
    }
    if splitter != T::SPLITTER {
        return Err(unsupported("splitter", T::SPLITTER, splitter));
    }

    let (sum, err) = two_sum(black_box(T::one()), black_box(T::EPSILON));
    if sum != T::one() {
        return Err(unsupported("two_sum(1, epsilon).sum", T::one(), sum));
    }
    if err != T::EPSILON {
        return Err(unsupported("two_sum(1, epsilon).err", T::EPSILON, err));
    }
    Ok(())
}

fn unsupported<T: PredicateFloat>(quantity: &'static str, expected: T, observed: T) -> PredicateError {
    PredicateError::UnsupportedArithmetic {
        quantity,
        expected: expected.to_f64().unwrap_or(f64::NAN),
        observed: observed.to_f64().unwrap_or(f64::NAN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_match_compiled_constants_f64() {
        assert_eq!(probe_epsilon::<f64>(), 2f64.powi(-53));
        assert_eq!(probe_splitter::<f64>(), 2f64.powi(27) + 1.0);
        verify_arithmetic::<f64>().unwrap();
    }

    #[test]
    fn probes_match_compiled_constants_f32() {
        assert_eq!(probe_epsilon::<f32>(), 2f32.powi(-24));
        assert_eq!(probe_splitter::<f32>(), 2f32.powi(12) + 1.0);
        verify_arithmetic::<f32>().unwrap();
    }

    #[test]
    fn epsilon_is_half_machine_epsilon() {
        assert_eq!(<f64 as PredicateFloat>::EPSILON * 2.0, f64::EPSILON);
        assert_eq!(<f32 as PredicateFloat>::EPSILON * 2.0, f32::EPSILON);
    }
}
