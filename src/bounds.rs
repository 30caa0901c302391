//! Error-bound coefficients for the staged evaluation.
//!
//! Each predicate compares its floating-point determinant against
//! `coefficient * permanent`, where the permanent is the same polynomial with
//! every term replaced by its absolute value. The coefficients depend only on
//! the precision of the working type and are computed once, at compile time, for
//! `f32` and `f64`.

use crate::error::PredicateError;
use crate::float::PredicateFloat;
use crate::geometry::{Point2, Point3};
use crate::predicates::{
    self, incircle_fast_with_permanent, insphere_fast_with_permanent, orient2d_fast_with_permanent,
    orient3d_fast_with_permanent,
};

/// Immutable table of the error-bound coefficients for one precision.
///
/// `*_a` bounds the plain floating-point determinant, `*_b` the determinant
/// recomputed exactly from rounded differences, and `*_c` the tail correction
/// added on top of it. `result` bounds the rounding of the final estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorBounds<T> {
    pub epsilon: T,
    pub result: T,
    pub ccw_a: T,
    pub ccw_b: T,
    pub ccw_c: T,
    pub o3d_a: T,
    pub o3d_b: T,
    pub o3d_c: T,
    pub icc_a: T,
    pub icc_b: T,
    pub icc_c: T,
    pub isp_a: T,
    pub isp_b: T,
    pub isp_c: T,
}

macro_rules! error_bounds {
    ($ty:ty) => {{
        const E: $ty = <$ty as PredicateFloat>::EPSILON;
        ErrorBounds {
            epsilon: E,
            result: (3.0 + 8.0 * E) * E,
            ccw_a: (3.0 + 16.0 * E) * E,
            ccw_b: (2.0 + 12.0 * E) * E,
            ccw_c: (9.0 + 64.0 * E) * E * E,
            o3d_a: (7.0 + 56.0 * E) * E,
            o3d_b: (3.0 + 28.0 * E) * E,
            o3d_c: (26.0 + 288.0 * E) * E * E,
            icc_a: (10.0 + 96.0 * E) * E,
            icc_b: (4.0 + 48.0 * E) * E,
            icc_c: (44.0 + 576.0 * E) * E * E,
            isp_a: (16.0 + 224.0 * E) * E,
            isp_b: (5.0 + 72.0 * E) * E,
            isp_c: (71.0 + 1408.0 * E) * E * E,
        }
    }};
}

pub(crate) static F64_BOUNDS: ErrorBounds<f64> = error_bounds!(f64);
pub(crate) static F32_BOUNDS: ErrorBounds<f32> = error_bounds!(f32);

impl<T: PredicateFloat> ErrorBounds<T> {
    /// The shared table for `T`.
    #[inline(always)]
    pub fn get() -> &'static Self {
        T::error_bounds()
    }
}

/// A filter for callers that know an upper bound on the magnitude of every
/// coordinate they will pass.
///
/// The bounds are computed once from that magnitude, so the first stage becomes
/// a single comparison against a constant instead of a bound derived from each
/// call's permanent. Inputs the constant cannot settle, and inputs with a
/// coordinate larger than the configured magnitude, fall back to the full
/// adaptive predicate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticFilter<T> {
    max_abs: T,
    orient2d: T,
    orient3d: T,
    incircle: T,
    insphere: T,
}

impl<T: PredicateFloat> StaticFilter<T> {
    pub fn new(max_abs: T) -> Result<Self, PredicateError> {
        if !max_abs.is_finite() || max_abs < T::zero() {
            return Err(PredicateError::InvalidMagnitude {
                value: max_abs.to_f64().unwrap_or(f64::NAN),
            });
        }
        let bounds = T::error_bounds();
        let from = |n: u32| T::from(n).unwrap_or_else(T::one);

        // Coordinate differences are at most twice the magnitude. The margin
        // absorbs the rounding of the permanent and of these products.
        let d = max_abs * T::two();
        let margin = T::one() + from(32) * bounds.epsilon;
        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d2 * d2;
        let d5 = d4 * d;
        Ok(StaticFilter {
            max_abs,
            orient2d: bounds.ccw_a * (from(2) * d2) * margin,
            orient3d: bounds.o3d_a * (from(6) * d3) * margin,
            incircle: bounds.icc_a * (from(12) * d4) * margin,
            insphere: bounds.isp_a * (from(72) * d5) * margin,
        })
    }

    pub fn max_abs(&self) -> T {
        self.max_abs
    }

    pub fn orient2d(&self, a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
        if !self.covers(&[a.x, a.y, b.x, b.y, c.x, c.y]) {
            return predicates::orient2d(a, b, c);
        }
        let (det, _) = orient2d_fast_with_permanent(a, b, c);
        if det > self.orient2d || -det > self.orient2d {
            return det;
        }
        predicates::orient2d(a, b, c)
    }

    pub fn orient3d(&self, a: &Point3<T>, b: &Point3<T>, c: &Point3<T>, d: &Point3<T>) -> T {
        if !self.covers(&[a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z, d.x, d.y, d.z]) {
            return predicates::orient3d(a, b, c, d);
        }
        let (det, _) = orient3d_fast_with_permanent(a, b, c, d);
        if det > self.orient3d || -det > self.orient3d {
            return det;
        }
        predicates::orient3d(a, b, c, d)
    }

    pub fn incircle(&self, a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> T {
        if !self.covers(&[a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y]) {
            return predicates::incircle(a, b, c, d);
        }
        let (det, _) = incircle_fast_with_permanent(a, b, c, d);
        if det > self.incircle || -det > self.incircle {
            return det;
        }
        predicates::incircle(a, b, c, d)
    }

    pub fn insphere(
        &self,
        a: &Point3<T>,
        b: &Point3<T>,
        c: &Point3<T>,
        d: &Point3<T>,
        e: &Point3<T>,
    ) -> T {
        if !self.covers(&[
            a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z, d.x, d.y, d.z, e.x, e.y, e.z,
        ]) {
            return predicates::insphere(a, b, c, d, e);
        }
        let (det, _) = insphere_fast_with_permanent(a, b, c, d, e);
        if det > self.insphere || -det > self.insphere {
            return det;
        }
        predicates::insphere(a, b, c, d, e)
    }

    fn covers(&self, coordinates: &[T]) -> bool {
        coordinates.iter().all(|v| v.abs() <= self.max_abs)
    }
}
