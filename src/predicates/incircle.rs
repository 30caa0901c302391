use tracing::trace;

use super::orient3d::{sum_then_diff, triple_sum};
use super::{Evaluation, Stage, clears, exceeds, tail_errbound};
use crate::bounds::ErrorBounds;
use crate::expansion::Expansion;
use crate::expansion::primitives::two_diff_tail;
use crate::float::PredicateFloat;
use crate::geometry::Point2;

/// Position of `d` relative to the circle through `a`, `b` and `c`.
///
/// With `a, b, c` in counterclockwise order, returns a positive value if `d`
/// lies inside the circle, a negative value if it lies outside, and zero if the
/// four points are cocircular. The sign is reversed when `a, b, c` are
/// clockwise.
///
/// ```rust
/// use adaptive_predicates::{Point2, incircle};
///
/// let a = Point2::new(1.0, 0.0);
/// let b = Point2::new(0.0, 1.0);
/// let c = Point2::new(-1.0, 0.0);
/// assert!(incircle(&a, &b, &c, &Point2::new(0.0, 0.0)) > 0.0);
/// assert!(incircle(&a, &b, &c, &Point2::new(2.0, 2.0)) < 0.0);
/// assert_eq!(incircle(&a, &b, &c, &Point2::new(0.0, -1.0)), 0.0);
/// ```
pub fn incircle<T: PredicateFloat>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> T {
    incircle_with(T::error_bounds(), a, b, c, d).value
}

/// [`incircle`] with an explicit bounds table, reporting the deciding stage.
pub fn incircle_with<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> Evaluation<T> {
    let (det, permanent) = incircle_fast_with_permanent(a, b, c, d);
    if exceeds(det, bounds.icc_a * permanent) {
        return Evaluation::new(det, Stage::Fast);
    }
    incircle_adapt(bounds, a, b, c, d, permanent)
}

/// Plain floating-point in-circle determinant.
#[inline]
pub fn incircle_fast<T: PredicateFloat>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> T {
    incircle_fast_with_permanent(a, b, c, d).0
}

#[inline(always)]
pub(crate) fn incircle_fast_with_permanent<T: PredicateFloat>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> (T, T) {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);
    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;
    (det, permanent)
}

fn incircle_adapt<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
    permanent: T,
) -> Evaluation<T> {
    trace!(predicate = "incircle", "fast stage inconclusive, escalating to semi-exact");
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let bc: Expansion<T, 4> = Expansion::product_difference(bdx, cdy, cdx, bdy);
    let adet = lift_scale::<T, 4, 8, 16, 32>(&bc, adx, ady);
    let ca: Expansion<T, 4> = Expansion::product_difference(cdx, ady, adx, cdy);
    let bdet = lift_scale::<T, 4, 8, 16, 32>(&ca, bdx, bdy);
    let ab: Expansion<T, 4> = Expansion::product_difference(adx, bdy, bdx, ady);
    let cdet = lift_scale::<T, 4, 8, 16, 32>(&ab, cdx, cdy);
    let abdet: Expansion<T, 64> = adet.sum(&bdet);
    let fin: Expansion<T, 96> = abdet.sum(&cdet);

    let mut det = fin.estimate();
    if clears(det, bounds.icc_b * permanent) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    let adxtail = two_diff_tail(a.x, d.x, adx);
    let adytail = two_diff_tail(a.y, d.y, ady);
    let bdxtail = two_diff_tail(b.x, d.x, bdx);
    let bdytail = two_diff_tail(b.y, d.y, bdy);
    let cdxtail = two_diff_tail(c.x, d.x, cdx);
    let cdytail = two_diff_tail(c.y, d.y, cdy);
    let tails = [adxtail, adytail, bdxtail, bdytail, cdxtail, cdytail];
    if tails.iter().all(|&t| t == T::zero()) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    let two = T::two();
    let errbound = tail_errbound(bounds, bounds.icc_c, permanent, det);
    det = det
        + (((adx * adx + ady * ady)
            * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
            + two * (adx * adxtail + ady * adytail) * (bdx * cdy - bdy * cdx))
            + ((bdx * bdx + bdy * bdy)
                * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
                + two * (bdx * bdxtail + bdy * bdytail) * (cdx * ady - cdy * adx))
            + ((cdx * cdx + cdy * cdy)
                * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
                + two * (cdx * cdxtail + cdy * cdytail) * (adx * bdy - ady * bdx)));
    if clears(det, errbound) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    trace!(predicate = "incircle", "semi-exact stage inconclusive, expanding exactly");
    Evaluation::new(incircle_exact(a, b, c, d), Stage::Exact)
}

/// `(x^2 + y^2) * e`, exactly.
#[inline]
fn lift_scale<T: PredicateFloat, const N: usize, const S: usize, const Q: usize, const R: usize>(
    e: &Expansion<T, N>,
    x: T,
    y: T,
) -> Expansion<T, R> {
    let ex: Expansion<T, S> = e.scale(x);
    let exx: Expansion<T, Q> = ex.scale(x);
    let ey: Expansion<T, S> = e.scale(y);
    let eyy: Expansion<T, Q> = ey.scale(y);
    exx.sum(&eyy)
}

/// Exact in-circle determinant expanded from the raw coordinates.
pub fn incircle_exact<T: PredicateFloat>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> T {
    let ab: Expansion<T, 4> = Expansion::product_difference(a.x, b.y, b.x, a.y);
    let bc: Expansion<T, 4> = Expansion::product_difference(b.x, c.y, c.x, b.y);
    let cd: Expansion<T, 4> = Expansion::product_difference(c.x, d.y, d.x, c.y);
    let da: Expansion<T, 4> = Expansion::product_difference(d.x, a.y, a.x, d.y);
    let ac: Expansion<T, 4> = Expansion::product_difference(a.x, c.y, c.x, a.y);
    let bd: Expansion<T, 4> = Expansion::product_difference(b.x, d.y, d.x, b.y);

    let cda = triple_sum(&cd, &da, &ac);
    let dab = triple_sum(&da, &ab, &bd);
    let abc = sum_then_diff(&ab, &bc, &ac);
    let bcd = sum_then_diff(&bc, &cd, &bd);

    let adet = lift_scale::<T, 12, 24, 48, 96>(&bcd, a.x, a.y);
    let bdet = lift_scale::<T, 12, 24, 48, 96>(&cda, b.x, b.y);
    let cdet = lift_scale::<T, 12, 24, 48, 96>(&dab, c.x, c.y);
    let ddet = lift_scale::<T, 12, 24, 48, 96>(&abc, d.x, d.y);

    let abdet: Expansion<T, 192> = adet.diff(&bdet);
    let cddet: Expansion<T, 192> = cdet.diff(&ddet);
    let deter: Expansion<T, 384> = abdet.sum(&cddet);
    deter.most_significant()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn inside_outside_on() {
        let a = p(0.0, 0.0);
        let b = p(1.0, 0.0);
        let c = p(0.0, 1.0);
        assert!(incircle(&a, &b, &c, &p(0.5, 0.5)) > 0.0);
        assert!(incircle(&a, &b, &c, &p(10.0, 10.0)) < 0.0);
        assert_eq!(incircle(&a, &b, &c, &p(1.0, 1.0)), 0.0);
        assert!(incircle_exact(&a, &b, &c, &p(0.5, 0.5)) > 0.0);
        assert!(incircle_exact(&a, &b, &c, &p(10.0, 10.0)) < 0.0);
    }

    #[test]
    fn clockwise_triangle_flips_sign() {
        let a = p(0.0, 0.0);
        let b = p(0.0, 1.0);
        let c = p(1.0, 0.0);
        assert!(incircle(&a, &b, &c, &p(0.5, 0.5)) < 0.0);
    }

    #[test]
    fn cocircular_integer_points() {
        let a = p(5.0, 0.0);
        let b = p(3.0, 4.0);
        let c = p(-4.0, 3.0);
        let d = p(0.0, -5.0);
        assert_eq!(incircle(&a, &b, &c, &d), 0.0);
        assert_eq!(incircle_exact(&a, &b, &c, &d), 0.0);
        assert_eq!(incircle_exact(&a, &b, &c, &p(0.0, -5.0 + f64::EPSILON * 4.0)).signum(), 1.0);
    }

    #[test]
    fn stages() {
        let bounds = ErrorBounds::get();
        let eval = incircle_with(bounds, &p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(10.0, 10.0));
        assert_eq!(eval.stage, Stage::Fast);

        let eval = incircle_with(bounds, &p(5.0, 0.0), &p(3.0, 4.0), &p(-4.0, 3.0), &p(0.0, -5.0));
        assert_eq!(eval, Evaluation::new(0.0, Stage::SemiExact));

        // Collinear points on y = x with rounded differences.
        let eval = incircle_with(bounds, &p(0.1, 0.1), &p(0.3, 0.3), &p(1e10, 1e10), &p(0.7, 0.7));
        assert_eq!(eval, Evaluation::new(0.0, Stage::Exact));
    }
}
