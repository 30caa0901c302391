use tracing::trace;

use super::{Evaluation, Stage, clears, exceeds, tail_errbound};
use crate::bounds::ErrorBounds;
use crate::expansion::Expansion;
use crate::expansion::primitives::two_diff_tail;
use crate::float::PredicateFloat;
use crate::geometry::Point2;

/// Orientation of `c` relative to the directed line from `a` to `b`.
///
/// Returns a positive value if `a, b, c` are in counterclockwise order, a
/// negative value if they are in clockwise order, and zero if they are
/// collinear. The value approximates twice the signed area of the triangle.
///
/// ```rust
/// use adaptive_predicates::{Point2, orient2d};
///
/// let a = Point2::new(0.0, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// assert!(orient2d(&a, &b, &Point2::new(0.5, 1.0)) > 0.0);
/// assert!(orient2d(&a, &b, &Point2::new(0.5, -1.0)) < 0.0);
/// assert_eq!(orient2d(&a, &b, &Point2::new(3.0, 0.0)), 0.0);
/// ```
pub fn orient2d<T: PredicateFloat>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
    orient2d_with(T::error_bounds(), a, b, c).value
}

/// [`orient2d`] with an explicit bounds table, reporting the deciding stage.
pub fn orient2d_with<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
) -> Evaluation<T> {
    let (det, detsum) = orient2d_fast_with_permanent(a, b, c);
    if exceeds(det, bounds.ccw_a * detsum) {
        return Evaluation::new(det, Stage::Fast);
    }
    orient2d_adapt(bounds, a, b, c, detsum)
}

/// Plain floating-point orientation determinant. The sign may be wrong for
/// nearly collinear points.
#[inline]
pub fn orient2d_fast<T: PredicateFloat>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
    orient2d_fast_with_permanent(a, b, c).0
}

#[inline(always)]
pub(crate) fn orient2d_fast_with_permanent<T: PredicateFloat>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
) -> (T, T) {
    let detleft = (a.x - c.x) * (b.y - c.y);
    let detright = (a.y - c.y) * (b.x - c.x);
    let det = detleft - detright;
    (det, detleft.abs() + detright.abs())
}

fn orient2d_adapt<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    detsum: T,
) -> Evaluation<T> {
    trace!(predicate = "orient2d", "fast stage inconclusive, escalating to semi-exact");
    let acx = a.x - c.x;
    let bcx = b.x - c.x;
    let acy = a.y - c.y;
    let bcy = b.y - c.y;

    let b_exp: Expansion<T, 4> = Expansion::product_difference(acx, bcy, acy, bcx);
    let mut det = b_exp.estimate();
    if clears(det, bounds.ccw_b * detsum) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    let acxtail = two_diff_tail(a.x, c.x, acx);
    let bcxtail = two_diff_tail(b.x, c.x, bcx);
    let acytail = two_diff_tail(a.y, c.y, acy);
    let bcytail = two_diff_tail(b.y, c.y, bcy);
    let zero = T::zero();
    if acxtail == zero && acytail == zero && bcxtail == zero && bcytail == zero {
        // The differences were exact, so the expansion above is the determinant.
        return Evaluation::new(det, Stage::SemiExact);
    }

    let errbound = tail_errbound(bounds, bounds.ccw_c, detsum, det);
    det = det + ((acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail));
    if clears(det, errbound) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    trace!(predicate = "orient2d", "semi-exact stage inconclusive, expanding exactly");
    Evaluation::new(orient2d_exact(a, b, c), Stage::Exact)
}

/// Exact orientation determinant expanded from the raw coordinates. Returns
/// the most significant component of the exact expansion, so the sign is exact
/// and zero means collinear.
pub fn orient2d_exact<T: PredicateFloat>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
    let aterms: Expansion<T, 4> = Expansion::product_difference(a.x, b.y, a.x, c.y);
    let bterms: Expansion<T, 4> = Expansion::product_difference(b.x, c.y, b.x, a.y);
    let cterms: Expansion<T, 4> = Expansion::product_difference(c.x, a.y, c.x, b.y);
    let v: Expansion<T, 8> = aterms.sum(&bterms);
    let w: Expansion<T, 12> = v.sum(&cterms);
    w.most_significant()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn simple_orientations() {
        let a = p(0.0, 0.0);
        let b = p(1.0, 0.0);
        assert!(orient2d(&a, &b, &p(0.0, 1.0)) > 0.0);
        assert!(orient2d(&a, &b, &p(0.0, -1.0)) < 0.0);
        assert_eq!(orient2d(&a, &b, &p(2.0, 0.0)), 0.0);
        assert_eq!(orient2d(&a, &a, &a), 0.0);
    }

    #[test]
    fn easy_input_settles_in_fast_stage() {
        let eval = orient2d_with(ErrorBounds::get(), &p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0));
        assert_eq!(eval.stage, Stage::Fast);
        assert_eq!(eval.value, 1.0);
    }

    #[test]
    fn exact_differences_settle_in_semi_exact_stage() {
        let eval = orient2d_with(ErrorBounds::get(), &p(0.0, 0.0), &p(24.0, 24.0), &p(0.5, 0.5));
        assert_eq!(eval, Evaluation::new(0.0, Stage::SemiExact));
    }

    #[test]
    fn inexact_collinear_points_need_exact_stage() {
        let eval = orient2d_with(ErrorBounds::get(), &p(0.1, 0.1), &p(0.2, 0.2), &p(1e10, 1e10));
        assert_eq!(eval, Evaluation::new(0.0, Stage::Exact));
    }

    #[test]
    fn one_ulp_off_the_line() {
        let c = p(0.5 + f64::EPSILON / 2.0, 0.5);
        let value = orient2d(&p(0.0, 0.0), &p(24.0, 24.0), &c);
        assert!(value < 0.0);
        assert_eq!(orient2d_exact(&p(0.0, 0.0), &p(24.0, 24.0), &c).signum(), -1.0);
    }

    #[test]
    fn exact_matches_sign_of_fast_for_easy_cases() {
        let a = p(-3.5, 2.25);
        let b = p(7.0, -1.0);
        let c = p(0.125, 9.0);
        assert_eq!(orient2d_exact(&a, &b, &c).signum(), orient2d_fast(&a, &b, &c).signum());
    }

    #[test]
    fn works_for_f32() {
        let a = Point2::new(0.0f32, 0.0);
        let b = Point2::new(24.0f32, 24.0);
        assert_eq!(orient2d(&a, &b, &Point2::new(0.5, 0.5)), 0.0);
        let nudged = Point2::new(0.5 + f32::EPSILON / 2.0, 0.5);
        assert!(orient2d(&a, &b, &nudged) < 0.0);
        assert!(orient2d(&a, &b, &Point2::new(0.0, 1.0)) > 0.0);
    }
}
