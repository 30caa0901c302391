//! Error-free transformations.
//!
//! Each function returns a rounded result together with the exact rounding
//! error, so that `x + err` equals the true mathematical value. Multi-component
//! results are returned most significant first. All of them require
//! round-to-nearest-even arithmetic and no overflow.

use crate::float::PredicateFloat;

/// `a + b` as `(sum, err)`, valid only when `|a| >= |b|` (or `a` is zero).
#[inline(always)]
pub fn fast_two_sum<T: PredicateFloat>(a: T, b: T) -> (T, T) {
    let x = a + b;
    let b_virtual = x - a;
    (x, b - b_virtual)
}

/// `a + b` as `(sum, err)` for any finite operands.
#[inline(always)]
pub fn two_sum<T: PredicateFloat>(a: T, b: T) -> (T, T) {
    let x = a + b;
    (x, two_sum_tail(a, b, x))
}

/// Rounding error of `x = fl(a + b)`.
#[inline(always)]
pub fn two_sum_tail<T: PredicateFloat>(a: T, b: T, x: T) -> T {
    let b_virtual = x - a;
    let a_virtual = x - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    a_roundoff + b_roundoff
}

/// `a - b` as `(difference, err)`.
#[inline(always)]
pub fn two_diff<T: PredicateFloat>(a: T, b: T) -> (T, T) {
    let x = a - b;
    (x, two_diff_tail(a, b, x))
}

/// Rounding error of `x = fl(a - b)`. Zero whenever the subtraction was exact,
/// which the adaptive stages use to detect exact coordinate differences.
#[inline(always)]
pub fn two_diff_tail<T: PredicateFloat>(a: T, b: T, x: T) -> T {
    let b_virtual = a - x;
    let a_virtual = x + b_virtual;
    let b_roundoff = b_virtual - b;
    let a_roundoff = a - a_virtual;
    a_roundoff + b_roundoff
}

/// Splits `a` into `(hi, lo)` with `a = hi + lo`, each half carrying at most
/// half the significand bits.
#[inline(always)]
pub fn split<T: PredicateFloat>(a: T) -> (T, T) {
    let c = T::SPLITTER * a;
    let a_big = c - a;
    let hi = c - a_big;
    (hi, a - hi)
}

/// `a * b` as `(product, err)`.
#[inline(always)]
pub fn two_product<T: PredicateFloat>(a: T, b: T) -> (T, T) {
    let x = a * b;
    (x, two_product_tail(a, b, x))
}

/// Rounding error of `x = fl(a * b)`.
#[inline(always)]
pub fn two_product_tail<T: PredicateFloat>(a: T, b: T, x: T) -> T {
    let (a_hi, a_lo) = split(a);
    let (b_hi, b_lo) = split(b);
    let err1 = x - a_hi * b_hi;
    let err2 = err1 - a_lo * b_hi;
    let err3 = err2 - a_hi * b_lo;
    a_lo * b_lo - err3
}

/// `a * a` as `(square, err)`, one split cheaper than [`two_product`].
#[inline(always)]
pub fn square<T: PredicateFloat>(a: T) -> (T, T) {
    let x = a * a;
    let (hi, lo) = split(a);
    let err1 = x - hi * hi;
    let err3 = err1 - (hi + hi) * lo;
    (x, lo * lo - err3)
}

/// `(a1 + a0) + b` as a three-component expansion `(x2, x1, x0)`.
#[inline(always)]
pub fn two_one_sum<T: PredicateFloat>(a1: T, a0: T, b: T) -> (T, T, T) {
    let (i, x0) = two_sum(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

/// `(a1 + a0) - b` as a three-component expansion `(x2, x1, x0)`.
#[inline(always)]
pub fn two_one_diff<T: PredicateFloat>(a1: T, a0: T, b: T) -> (T, T, T) {
    let (i, x0) = two_diff(a0, b);
    let (x2, x1) = two_sum(a1, i);
    (x2, x1, x0)
}

/// `(a1 + a0) + (b1 + b0)` as a four-component expansion `(x3, x2, x1, x0)`.
#[inline(always)]
pub fn two_two_sum<T: PredicateFloat>(a1: T, a0: T, b1: T, b0: T) -> (T, T, T, T) {
    let (j, z, x0) = two_one_sum(a1, a0, b0);
    let (x3, x2, x1) = two_one_sum(j, z, b1);
    (x3, x2, x1, x0)
}

/// `(a1 + a0) - (b1 + b0)` as a four-component expansion `(x3, x2, x1, x0)`.
#[inline(always)]
pub fn two_two_diff<T: PredicateFloat>(a1: T, a0: T, b1: T, b0: T) -> (T, T, T, T) {
    let (j, z, x0) = two_one_diff(a1, a0, b0);
    let (x3, x2, x1) = two_one_diff(j, z, b1);
    (x3, x2, x1, x0)
}

/// `a * b - c * d` exactly, as four components in increasing magnitude order.
/// Some of them may be zero.
#[inline(always)]
pub fn product_difference<T: PredicateFloat>(a: T, b: T, c: T, d: T) -> [T; 4] {
    let (p1, p0) = two_product(a, b);
    let (q1, q0) = two_product(c, d);
    let (x3, x2, x1, x0) = two_two_diff(p1, p0, q1, q0);
    [x0, x1, x2, x3]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = f64::EPSILON / 2.0;

    #[test]
    fn two_sum_recovers_lost_bits() {
        assert_eq!(two_sum(1.0, EPS), (1.0, EPS));
        assert_eq!(two_sum(EPS, 1.0), (1.0, EPS));
        assert_eq!(fast_two_sum(1.0, EPS), (1.0, EPS));
        assert_eq!(two_sum(1e16, 1.0), (1e16, 1.0));
        assert_eq!(two_sum(3.0, -3.0), (0.0, 0.0));
    }

    #[test]
    fn two_diff_tail_is_zero_when_exact() {
        assert_eq!(two_diff(24.0, 0.5), (23.5, 0.0));
        assert_eq!(two_diff(1.0, EPS), (1.0 - EPS, 0.0));
        // 1 - 2^-54 is a tie and rounds to even.
        let (x, err) = two_diff(1.0, EPS / 2.0);
        assert_eq!(x, 1.0);
        assert_eq!(err, -EPS / 2.0);
        let (x, err) = two_diff(0.1, 1e10);
        assert_ne!(err, 0.0);
        assert_eq!(x + err, x);
    }

    #[test]
    fn split_halves_fit_in_half_precision() {
        for a in [1.0 + f64::EPSILON, 0.1, -123456.789, 3.0e200] {
            let (hi, lo) = split(a);
            assert_eq!(hi + lo, a);
            let (mantissa, _, _) = num_traits::Float::integer_decode(hi);
            assert!(mantissa.trailing_zeros() >= 26, "hi of {a} has too many bits");
            assert!(lo.abs() <= hi.abs());
        }
    }

    #[test]
    fn two_product_is_exact() {
        let a = 1.0 + 2f64.powi(-30);
        let (x, err) = two_product(a, a);
        assert_eq!(x, 1.0 + 2f64.powi(-29));
        assert_eq!(err, 2f64.powi(-60));
        assert_eq!(square(a), (x, err));
        assert_eq!(two_product(3.0, 7.0), (21.0, 0.0));
    }

    #[test]
    fn two_two_diff_cancels_to_exact_tail() {
        // (1 + 2^-52)(1 - 2^-53) - 1 = 2^-53 - 2^-105
        let [x0, x1, x2, x3] = product_difference(1.0 + f64::EPSILON, 1.0 - EPS, 1.0, 1.0);
        let total = ((x3 + x2) + x1) + x0;
        assert_eq!(total, f64::EPSILON * (1.0 - EPS) - EPS);
        assert_eq!(x2, 0.0);
        assert_eq!(two_two_sum(2.0, 0.0, 3.0, 0.0), (5.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn f32_primitives() {
        let eps = f32::EPSILON / 2.0;
        assert_eq!(two_sum(1.0f32, eps), (1.0, eps));
        let a = 1.0f32 + 2f32.powi(-12);
        assert_eq!(two_product(a, a), (1.0 + 2f32.powi(-11), 2f32.powi(-24)));
    }
}
