use tracing::trace;

use super::{Evaluation, Stage, clears, exceeds, tail_errbound};
use crate::bounds::ErrorBounds;
use crate::expansion::Expansion;
use crate::expansion::primitives::two_diff_tail;
use crate::float::PredicateFloat;
use crate::geometry::Point3;

/// Orientation of `d` relative to the plane through `a`, `b` and `c`.
///
/// Returns a positive value if `d` lies below the plane, where "above" is the
/// side from which `a, b, c` appear in counterclockwise order. Returns a
/// negative value if `d` lies above the plane and zero if the four points are
/// coplanar. The value approximates six times the signed volume of the
/// tetrahedron.
///
/// ```rust
/// use adaptive_predicates::{Point3, orient3d};
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(1.0, 0.0, 0.0);
/// let c = Point3::new(0.0, 1.0, 0.0);
/// assert!(orient3d(&a, &b, &c, &Point3::new(0.0, 0.0, -1.0)) > 0.0);
/// assert!(orient3d(&a, &b, &c, &Point3::new(0.0, 0.0, 1.0)) < 0.0);
/// ```
pub fn orient3d<T: PredicateFloat>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>, d: &Point3<T>) -> T {
    orient3d_with(T::error_bounds(), a, b, c, d).value
}

/// [`orient3d`] with an explicit bounds table, reporting the deciding stage.
pub fn orient3d_with<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> Evaluation<T> {
    let (det, permanent) = orient3d_fast_with_permanent(a, b, c, d);
    if exceeds(det, bounds.o3d_a * permanent) {
        return Evaluation::new(det, Stage::Fast);
    }
    orient3d_adapt(bounds, a, b, c, d, permanent)
}

/// Plain floating-point orientation determinant.
#[inline]
pub fn orient3d_fast<T: PredicateFloat>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>, d: &Point3<T>) -> T {
    orient3d_fast_with_permanent(a, b, c, d).0
}

#[inline(always)]
pub(crate) fn orient3d_fast_with_permanent<T: PredicateFloat>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> (T, T) {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;
    let adz = a.z - d.z;
    let bdz = b.z - d.z;
    let cdz = c.z - d.z;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;

    let det = adz * (bdxcdy - cdxbdy) + bdz * (cdxady - adxcdy) + cdz * (adxbdy - bdxady);
    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * adz.abs()
        + (cdxady.abs() + adxcdy.abs()) * bdz.abs()
        + (adxbdy.abs() + bdxady.abs()) * cdz.abs();
    (det, permanent)
}

fn orient3d_adapt<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    permanent: T,
) -> Evaluation<T> {
    trace!(predicate = "orient3d", "fast stage inconclusive, escalating to semi-exact");
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;
    let adz = a.z - d.z;
    let bdz = b.z - d.z;
    let cdz = c.z - d.z;

    let bc: Expansion<T, 4> = Expansion::product_difference(bdx, cdy, cdx, bdy);
    let adet: Expansion<T, 8> = bc.scale(adz);
    let ca: Expansion<T, 4> = Expansion::product_difference(cdx, ady, adx, cdy);
    let bdet: Expansion<T, 8> = ca.scale(bdz);
    let ab: Expansion<T, 4> = Expansion::product_difference(adx, bdy, bdx, ady);
    let cdet: Expansion<T, 8> = ab.scale(cdz);
    let abdet: Expansion<T, 16> = adet.sum(&bdet);
    let fin: Expansion<T, 24> = abdet.sum(&cdet);

    let mut det = fin.estimate();
    if clears(det, bounds.o3d_b * permanent) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    let adxtail = two_diff_tail(a.x, d.x, adx);
    let bdxtail = two_diff_tail(b.x, d.x, bdx);
    let cdxtail = two_diff_tail(c.x, d.x, cdx);
    let adytail = two_diff_tail(a.y, d.y, ady);
    let bdytail = two_diff_tail(b.y, d.y, bdy);
    let cdytail = two_diff_tail(c.y, d.y, cdy);
    let adztail = two_diff_tail(a.z, d.z, adz);
    let bdztail = two_diff_tail(b.z, d.z, bdz);
    let cdztail = two_diff_tail(c.z, d.z, cdz);
    let tails = [adxtail, bdxtail, cdxtail, adytail, bdytail, cdytail, adztail, bdztail, cdztail];
    if tails.iter().all(|&t| t == T::zero()) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    let errbound = tail_errbound(bounds, bounds.o3d_c, permanent, det);
    det = det
        + ((adz * ((bdx * cdytail + cdy * bdxtail) - (bdy * cdxtail + cdx * bdytail))
            + adztail * (bdx * cdy - bdy * cdx))
            + (bdz * ((cdx * adytail + ady * cdxtail) - (cdy * adxtail + adx * cdytail))
                + bdztail * (cdx * ady - cdy * adx))
            + (cdz * ((adx * bdytail + bdy * adxtail) - (ady * bdxtail + bdx * adytail))
                + cdztail * (adx * bdy - ady * bdx)));
    if clears(det, errbound) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    trace!(predicate = "orient3d", "semi-exact stage inconclusive, expanding exactly");
    Evaluation::new(orient3d_exact(a, b, c, d), Stage::Exact)
}

/// Exact orientation determinant expanded from the raw coordinates.
pub fn orient3d_exact<T: PredicateFloat>(a: &Point3<T>, b: &Point3<T>, c: &Point3<T>, d: &Point3<T>) -> T {
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

    let adet: Expansion<T, 24> = bcd.scale(a.z);
    let bdet: Expansion<T, 24> = cda.scale(-b.z);
    let cdet: Expansion<T, 24> = dab.scale(c.z);
    let ddet: Expansion<T, 24> = abc.scale(-d.z);
    let abdet: Expansion<T, 48> = adet.sum(&bdet);
    let cddet: Expansion<T, 48> = cdet.sum(&ddet);
    let deter: Expansion<T, 96> = abdet.sum(&cddet);
    deter.most_significant()
}

/// `p + q + r` for three 2x2 minors.
#[inline]
pub(super) fn triple_sum<T: PredicateFloat>(
    p: &Expansion<T, 4>,
    q: &Expansion<T, 4>,
    r: &Expansion<T, 4>,
) -> Expansion<T, 12> {
    let pq: Expansion<T, 8> = p.sum(q);
    pq.sum(r)
}

/// `p + q - r` for three 2x2 minors.
#[inline]
pub(super) fn sum_then_diff<T: PredicateFloat>(
    p: &Expansion<T, 4>,
    q: &Expansion<T, 4>,
    r: &Expansion<T, 4>,
) -> Expansion<T, 12> {
    let pq: Expansion<T, 8> = p.sum(q);
    pq.diff(r)
}
