//! The adaptive predicates.
//!
//! Each predicate comes in four flavours:
//!
//! - `name(..)` returns the adaptively evaluated determinant. Its sign is exact.
//! - `name_with(bounds, ..)` does the same with an explicit [`ErrorBounds`] table
//!   and also reports the [`Stage`] that settled the sign.
//! - `name_fast(..)` is the plain floating-point determinant, with no
//!   guarantee at all.
//! - `name_exact(..)` skips the filters and expands the determinant exactly
//!   from the raw coordinates.

mod incircle;
mod insphere;
mod orient2d;
mod orient3d;

pub use incircle::{incircle, incircle_exact, incircle_fast, incircle_with};
pub use insphere::{insphere, insphere_exact, insphere_fast, insphere_with};
pub use orient2d::{orient2d, orient2d_exact, orient2d_fast, orient2d_with};
pub use orient3d::{orient3d, orient3d_exact, orient3d_fast, orient3d_with};

pub(crate) use incircle::incircle_fast_with_permanent;
pub(crate) use insphere::insphere_fast_with_permanent;
pub(crate) use orient2d::orient2d_fast_with_permanent;
pub(crate) use orient3d::orient3d_fast_with_permanent;

use crate::bounds::ErrorBounds;
use crate::float::PredicateFloat;
use crate::geometry::Sign;

/// The evaluation stage that settled a predicate's sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Plain floating-point evaluation cleared the first error bound.
    Fast,
    /// The exact determinant of the rounded differences, optionally corrected by
    /// the difference tails, cleared a tighter bound.
    SemiExact,
    /// The determinant was expanded exactly from the raw coordinates.
    Exact,
}

/// The value of an adaptive predicate together with the stage that settled it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation<T> {
    /// An approximation of the determinant whose sign is exact.
    pub value: T,
    pub stage: Stage,
}

impl<T: PredicateFloat> Evaluation<T> {
    #[inline(always)]
    pub(crate) fn new(value: T, stage: Stage) -> Self {
        Evaluation { value, stage }
    }

    pub fn sign(&self) -> Sign {
        Sign::of(self.value)
    }
}

/// First-stage acceptance. The bound is only valid for a strict comparison.
#[inline(always)]
pub(crate) fn exceeds<T: PredicateFloat>(det: T, errbound: T) -> bool {
    det > errbound || -det > errbound
}

/// Acceptance for the semi-exact stages, whose bounds allow equality.
#[inline(always)]
pub(crate) fn clears<T: PredicateFloat>(det: T, errbound: T) -> bool {
    det >= errbound || -det >= errbound
}

/// Bound for the tail-corrected determinant.
#[inline(always)]
pub(crate) fn tail_errbound<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    coefficient: T,
    permanent: T,
    det: T,
) -> T {
    coefficient * permanent + bounds.result * det.abs()
}
