//! Arbitrary precision values as sums of floating-point components.
//!
//! An expansion represents the exact sum of its components. Components are
//! stored in order of increasing magnitude, are pairwise nonoverlapping, and are
//! never zero: the value zero is the empty expansion. The routines below are the
//! zero-eliminating variants of the classic expansion algorithms; each writes
//! into a caller-provided buffer and returns the number of components produced.

use crate::error::PredicateError;
use crate::float::PredicateFloat;

mod fixed;
pub mod primitives;

pub use fixed::Expansion;

use primitives::{fast_two_sum, two_product, two_sum};

/// Adds a single value to an expansion. `out` needs room for `e.len() + 1`
/// components.
pub(crate) fn grow_expansion_zeroelim<T: PredicateFloat>(e: &[T], b: T, out: &mut [T]) -> usize {
    let mut q = b;
    let mut len = 0;
    for &enow in e {
        let (sum, err) = two_sum(q, enow);
        if err != T::zero() {
            out[len] = err;
            len += 1;
        }
        q = sum;
    }
    if q != T::zero() {
        out[len] = q;
        len += 1;
    }
    len
}

/// Sums two expansions by merging their components in magnitude order. `out`
/// needs room for `e.len() + f.len()` components.
pub(crate) fn fast_expansion_sum_zeroelim<T: PredicateFloat>(e: &[T], f: &[T], out: &mut [T]) -> usize {
    if e.is_empty() {
        out[..f.len()].copy_from_slice(f);
        return f.len();
    }
    if f.is_empty() {
        out[..e.len()].copy_from_slice(e);
        return e.len();
    }

    let mut ei = 0;
    let mut fi = 0;
    let mut next_smallest = || match (e.get(ei), f.get(fi)) {
        (Some(&enow), Some(&fnow)) => {
            if takes_first(enow, fnow) {
                ei += 1;
                Some(enow)
            } else {
                fi += 1;
                Some(fnow)
            }
        }
        (Some(&enow), None) => {
            ei += 1;
            Some(enow)
        }
        (None, Some(&fnow)) => {
            fi += 1;
            Some(fnow)
        }
        (None, None) => None,
    };

    let mut len = 0;
    let mut q = next_smallest().unwrap_or_else(T::zero);
    while let Some(component) = next_smallest() {
        let (sum, err) = two_sum(q, component);
        if err != T::zero() {
            out[len] = err;
            len += 1;
        }
        q = sum;
    }
    if q != T::zero() {
        out[len] = q;
        len += 1;
    }
    len
}

/// Whether `e` is merged before `f`, i.e. `|e| < |f|`, with ties going to `f`.
#[inline(always)]
fn takes_first<T: PredicateFloat>(e: T, f: T) -> bool {
    (f > e) == (f > -e)
}

/// Multiplies an expansion by a single value. `out` needs room for
/// `2 * e.len()` components.
pub(crate) fn scale_expansion_zeroelim<T: PredicateFloat>(e: &[T], b: T, out: &mut [T]) -> usize {
    let Some((&first, rest)) = e.split_first() else {
        return 0;
    };

    let mut len = 0;
    let (mut q, err) = two_product(first, b);
    if err != T::zero() {
        out[len] = err;
        len += 1;
    }
    for &enow in rest {
        let (product1, product0) = two_product(enow, b);
        let (sum, err) = two_sum(q, product0);
        if err != T::zero() {
            out[len] = err;
            len += 1;
        }
        let (new_q, err) = fast_two_sum(product1, sum);
        if err != T::zero() {
            out[len] = err;
            len += 1;
        }
        q = new_q;
    }
    if q != T::zero() {
        out[len] = q;
        len += 1;
    }
    len
}

/// Floating-point approximation of the expansion's value, summed from the
/// least significant component up. For expansions produced by the routines in
/// this module its sign matches the exact value's, and it is zero only for the
/// empty expansion.
#[inline]
pub(crate) fn estimate<T: PredicateFloat>(e: &[T]) -> T {
    e.iter().fold(T::zero(), |acc, &component| acc + component)
}

/// Checks every representation invariant of an expansion.
pub(crate) fn check_components<T: PredicateFloat>(components: &[T]) -> Result<(), PredicateError> {
    for &component in components {
        if !component.is_finite() {
            return Err(PredicateError::InvalidExpansion {
                reason: "component is not finite",
            });
        }
        if component == T::zero() {
            return Err(PredicateError::InvalidExpansion {
                reason: "component is zero",
            });
        }
    }
    if !components
        .windows(2)
        .all(|pair| is_nonoverlapping(pair[0], pair[1]))
    {
        return Err(PredicateError::InvalidExpansion {
            reason: "components overlap or are not in increasing magnitude order",
        });
    }
    Ok(())
}

/// Whether the highest set bit of `low` lies strictly below the lowest set bit
/// of `high`. Both must be finite and nonzero.
fn is_nonoverlapping<T: PredicateFloat>(low: T, high: T) -> bool {
    let (_, low_top) = bit_span(low);
    let (high_bottom, _) = bit_span(high);
    low_top < high_bottom
}

/// Exponents of the lowest and highest set bits of a nonzero value.
fn bit_span<T: PredicateFloat>(value: T) -> (i32, i32) {
    let (mantissa, exponent, _) = value.integer_decode();
    let exponent = i32::from(exponent);
    let lowest = exponent + mantissa.trailing_zeros() as i32;
    let highest = exponent + 63 - mantissa.leading_zeros() as i32;
    (lowest, highest)
}
