use tracing::trace;

use super::{Evaluation, Stage, clears, exceeds, tail_errbound};
use crate::bounds::ErrorBounds;
use crate::expansion::Expansion;
use crate::expansion::primitives::two_diff_tail;
use crate::float::PredicateFloat;
use crate::geometry::Point3;

/// Position of `e` relative to the sphere through `a`, `b`, `c` and `d`.
///
/// With `a, b, c, d` positively oriented (`orient3d(a, b, c, d) > 0`), returns a
/// positive value if `e` lies inside the sphere, a negative value if it lies
/// outside, and zero if the five points are cospherical. The sign is reversed
/// for negatively oriented `a, b, c, d`.
///
/// ```rust
/// use adaptive_predicates::{Point3, insphere};
///
/// let a = Point3::new(1.0, 0.0, 0.0);
/// let b = Point3::new(0.0, 1.0, 0.0);
/// let c = Point3::new(0.0, 0.0, 1.0);
/// let d = Point3::new(0.0, 0.0, 0.0);
/// assert!(insphere(&a, &b, &c, &d, &Point3::new(0.25, 0.25, 0.25)) > 0.0);
/// assert!(insphere(&a, &b, &c, &d, &Point3::new(3.0, 3.0, 3.0)) < 0.0);
/// assert_eq!(insphere(&a, &b, &c, &d, &Point3::new(1.0, 1.0, 1.0)), 0.0);
/// ```
pub fn insphere<T: PredicateFloat>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> T {
    insphere_with(T::error_bounds(), a, b, c, d, e).value
}

/// [`insphere`] with an explicit bounds table, reporting the deciding stage.
pub fn insphere_with<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> Evaluation<T> {
    let (det, permanent) = insphere_fast_with_permanent(a, b, c, d, e);
    if exceeds(det, bounds.isp_a * permanent) {
        return Evaluation::new(det, Stage::Fast);
    }
    insphere_adapt(bounds, a, b, c, d, e, permanent)
}

/// Plain floating-point in-sphere determinant.
#[inline]
pub fn insphere_fast<T: PredicateFloat>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> T {
    insphere_fast_with_permanent(a, b, c, d, e).0
}

#[inline(always)]
pub(crate) fn insphere_fast_with_permanent<T: PredicateFloat>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> (T, T) {
    let aex = a.x - e.x;
    let bex = b.x - e.x;
    let cex = c.x - e.x;
    let dex = d.x - e.x;
    let aey = a.y - e.y;
    let bey = b.y - e.y;
    let cey = c.y - e.y;
    let dey = d.y - e.y;
    let aez = a.z - e.z;
    let bez = b.z - e.z;
    let cez = c.z - e.z;
    let dez = d.z - e.z;

    let aexbey = aex * bey;
    let bexaey = bex * aey;
    let ab = aexbey - bexaey;
    let bexcey = bex * cey;
    let cexbey = cex * bey;
    let bc = bexcey - cexbey;
    let cexdey = cex * dey;
    let dexcey = dex * cey;
    let cd = cexdey - dexcey;
    let dexaey = dex * aey;
    let aexdey = aex * dey;
    let da = dexaey - aexdey;
    let aexcey = aex * cey;
    let cexaey = cex * aey;
    let ac = aexcey - cexaey;
    let bexdey = bex * dey;
    let dexbey = dex * bey;
    let bd = bexdey - dexbey;

    let abc = aez * bc - bez * ac + cez * ab;
    let bcd = bez * cd - cez * bd + dez * bc;
    let cda = cez * da + dez * ac + aez * cd;
    let dab = dez * ab + aez * bd + bez * da;

    let alift = aex * aex + aey * aey + aez * aez;
    let blift = bex * bex + bey * bey + bez * bez;
    let clift = cex * cex + cey * cey + cez * cez;
    let dlift = dex * dex + dey * dey + dez * dez;

    let det = (dlift * abc - clift * dab) + (blift * cda - alift * bcd);

    let aezplus = aez.abs();
    let bezplus = bez.abs();
    let cezplus = cez.abs();
    let dezplus = dez.abs();
    let ab_plus = aexbey.abs() + bexaey.abs();
    let bc_plus = bexcey.abs() + cexbey.abs();
    let cd_plus = cexdey.abs() + dexcey.abs();
    let da_plus = dexaey.abs() + aexdey.abs();
    let ac_plus = aexcey.abs() + cexaey.abs();
    let bd_plus = bexdey.abs() + dexbey.abs();
    let permanent = (cd_plus * bezplus + bd_plus * cezplus + bc_plus * dezplus) * alift
        + (da_plus * cezplus + ac_plus * dezplus + cd_plus * aezplus) * blift
        + (ab_plus * dezplus + bd_plus * aezplus + da_plus * bezplus) * clift
        + (bc_plus * aezplus + ac_plus * bezplus + ab_plus * cezplus) * dlift;
    (det, permanent)
}

fn insphere_adapt<T: PredicateFloat>(
    bounds: &ErrorBounds<T>,
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
    permanent: T,
) -> Evaluation<T> {
    trace!(predicate = "insphere", "fast stage inconclusive, escalating to semi-exact");
    let aex = a.x - e.x;
    let bex = b.x - e.x;
    let cex = c.x - e.x;
    let dex = d.x - e.x;
    let aey = a.y - e.y;
    let bey = b.y - e.y;
    let cey = c.y - e.y;
    let dey = d.y - e.y;
    let aez = a.z - e.z;
    let bez = b.z - e.z;
    let cez = c.z - e.z;
    let dez = d.z - e.z;

    let ab: Expansion<T, 4> = Expansion::product_difference(aex, bey, bex, aey);
    let bc: Expansion<T, 4> = Expansion::product_difference(bex, cey, cex, bey);
    let cd: Expansion<T, 4> = Expansion::product_difference(cex, dey, dex, cey);
    let da: Expansion<T, 4> = Expansion::product_difference(dex, aey, aex, dey);
    let ac: Expansion<T, 4> = Expansion::product_difference(aex, cey, cex, aey);
    let bd: Expansion<T, 4> = Expansion::product_difference(bex, dey, dex, bey);

    let bcd = weighted_sum(&cd, bez, &bd, -cez, &bc, dez);
    let adet = lift_scale::<T, 24, 48, 96, 192, 288>(&bcd, aex, aey, aez, true);
    let cda = weighted_sum(&da, cez, &ac, dez, &cd, aez);
    let bdet = lift_scale::<T, 24, 48, 96, 192, 288>(&cda, bex, bey, bez, false);
    let dab = weighted_sum(&ab, dez, &bd, aez, &da, bez);
    let cdet = lift_scale::<T, 24, 48, 96, 192, 288>(&dab, cex, cey, cez, true);
    let abc = weighted_sum(&bc, aez, &ac, -bez, &ab, cez);
    let ddet = lift_scale::<T, 24, 48, 96, 192, 288>(&abc, dex, dey, dez, false);

    let abdet: Expansion<T, 576> = adet.sum(&bdet);
    let cddet: Expansion<T, 576> = cdet.sum(&ddet);
    let fin: Expansion<T, 1152> = abdet.sum(&cddet);

    let mut det = fin.estimate();
    if clears(det, bounds.isp_b * permanent) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    let aextail = two_diff_tail(a.x, e.x, aex);
    let aeytail = two_diff_tail(a.y, e.y, aey);
    let aeztail = two_diff_tail(a.z, e.z, aez);
    let bextail = two_diff_tail(b.x, e.x, bex);
    let beytail = two_diff_tail(b.y, e.y, bey);
    let beztail = two_diff_tail(b.z, e.z, bez);
    let cextail = two_diff_tail(c.x, e.x, cex);
    let ceytail = two_diff_tail(c.y, e.y, cey);
    let ceztail = two_diff_tail(c.z, e.z, cez);
    let dextail = two_diff_tail(d.x, e.x, dex);
    let deytail = two_diff_tail(d.y, e.y, dey);
    let deztail = two_diff_tail(d.z, e.z, dez);
    let tails = [
        aextail, aeytail, aeztail, bextail, beytail, beztail, cextail, ceytail, ceztail, dextail,
        deytail, deztail,
    ];
    if tails.iter().all(|&t| t == T::zero()) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    let ab3 = ab.most_significant();
    let bc3 = bc.most_significant();
    let cd3 = cd.most_significant();
    let da3 = da.most_significant();
    let ac3 = ac.most_significant();
    let bd3 = bd.most_significant();

    let errbound = tail_errbound(bounds, bounds.isp_c, permanent, det);
    let abeps = (aex * beytail + bey * aextail) - (aey * bextail + bex * aeytail);
    let bceps = (bex * ceytail + cey * bextail) - (bey * cextail + cex * beytail);
    let cdeps = (cex * deytail + dey * cextail) - (cey * dextail + dex * ceytail);
    let daeps = (dex * aeytail + aey * dextail) - (dey * aextail + aex * deytail);
    let aceps = (aex * ceytail + cey * aextail) - (aey * cextail + cex * aeytail);
    let bdeps = (bex * deytail + dey * bextail) - (bey * dextail + dex * beytail);
    det = det
        + (((bex * bex + bey * bey + bez * bez)
            * ((cez * daeps + dez * aceps + aez * cdeps)
                + (ceztail * da3 + deztail * ac3 + aeztail * cd3))
            + (dex * dex + dey * dey + dez * dez)
                * ((aez * bceps - bez * aceps + cez * abeps)
                    + (aeztail * bc3 - beztail * ac3 + ceztail * ab3)))
            - ((aex * aex + aey * aey + aez * aez)
                * ((bez * cdeps - cez * bdeps + dez * bceps)
                    + (beztail * cd3 - ceztail * bd3 + deztail * bc3))
                + (cex * cex + cey * cey + cez * cez)
                    * ((dez * abeps + aez * bdeps + bez * daeps)
                        + (deztail * ab3 + aeztail * bd3 + beztail * da3))))
        + T::two()
            * (((bex * bextail + bey * beytail + bez * beztail)
                * (cez * da3 + dez * ac3 + aez * cd3)
                + (dex * dextail + dey * deytail + dez * deztail)
                    * (aez * bc3 - bez * ac3 + cez * ab3))
                - ((aex * aextail + aey * aeytail + aez * aeztail)
                    * (bez * cd3 - cez * bd3 + dez * bc3)
                    + (cex * cextail + cey * ceytail + cez * ceztail)
                        * (dez * ab3 + aez * bd3 + bez * da3)));
    if clears(det, errbound) {
        return Evaluation::new(det, Stage::SemiExact);
    }

    trace!(predicate = "insphere", "semi-exact stage inconclusive, expanding exactly");
    Evaluation::new(insphere_exact(a, b, c, d, e), Stage::Exact)
}

/// `p * pz + q * qz + r * rz` for three 2x2 minors.
#[inline]
fn weighted_sum<T: PredicateFloat>(
    p: &Expansion<T, 4>,
    pz: T,
    q: &Expansion<T, 4>,
    qz: T,
    r: &Expansion<T, 4>,
    rz: T,
) -> Expansion<T, 24> {
    let pp: Expansion<T, 8> = p.scale(pz);
    let qq: Expansion<T, 8> = q.scale(qz);
    let pq: Expansion<T, 16> = pp.sum(&qq);
    let rr: Expansion<T, 8> = r.scale(rz);
    rr.sum(&pq)
}

/// `(p + q) - (r + s)` for four 3x3 minors.
#[inline]
fn pair_difference<T: PredicateFloat>(
    p: &Expansion<T, 24>,
    q: &Expansion<T, 24>,
    r: &Expansion<T, 24>,
    s: &Expansion<T, 24>,
) -> Expansion<T, 96> {
    let pq: Expansion<T, 48> = p.sum(q);
    let rs: Expansion<T, 48> = r.sum(s);
    pq.diff(&rs)
}

/// `±(x^2 + y^2 + z^2) * e`, exactly.
#[inline]
fn lift_scale<
    T: PredicateFloat,
    const N: usize,
    const S: usize,
    const Q: usize,
    const XY: usize,
    const R: usize,
>(
    e: &Expansion<T, N>,
    x: T,
    y: T,
    z: T,
    negate: bool,
) -> Expansion<T, R> {
    let (sx, sy, sz) = if negate { (-x, -y, -z) } else { (x, y, z) };
    let ex: Expansion<T, S> = e.scale(x);
    let exx: Expansion<T, Q> = ex.scale(sx);
    let ey: Expansion<T, S> = e.scale(y);
    let eyy: Expansion<T, Q> = ey.scale(sy);
    let exy: Expansion<T, XY> = exx.sum(&eyy);
    let ez: Expansion<T, S> = e.scale(z);
    let ezz: Expansion<T, Q> = ez.scale(sz);
    exy.sum(&ezz)
}

/// Exact in-sphere determinant expanded from the raw coordinates.
pub fn insphere_exact<T: PredicateFloat>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> T {
    let ab: Expansion<T, 4> = Expansion::product_difference(a.x, b.y, b.x, a.y);
    let bc: Expansion<T, 4> = Expansion::product_difference(b.x, c.y, c.x, b.y);
    let cd: Expansion<T, 4> = Expansion::product_difference(c.x, d.y, d.x, c.y);
    let de: Expansion<T, 4> = Expansion::product_difference(d.x, e.y, e.x, d.y);
    let ea: Expansion<T, 4> = Expansion::product_difference(e.x, a.y, a.x, e.y);
    let ac: Expansion<T, 4> = Expansion::product_difference(a.x, c.y, c.x, a.y);
    let bd: Expansion<T, 4> = Expansion::product_difference(b.x, d.y, d.x, b.y);
    let ce: Expansion<T, 4> = Expansion::product_difference(c.x, e.y, e.x, c.y);
    let da: Expansion<T, 4> = Expansion::product_difference(d.x, a.y, a.x, d.y);
    let eb: Expansion<T, 4> = Expansion::product_difference(e.x, b.y, b.x, e.y);

    let abc = weighted_sum(&bc, a.z, &ac, -b.z, &ab, c.z);
    let bcd = weighted_sum(&cd, b.z, &bd, -c.z, &bc, d.z);
    let cde = weighted_sum(&de, c.z, &ce, -d.z, &cd, e.z);
    let dea = weighted_sum(&ea, d.z, &da, -e.z, &de, a.z);
    let eab = weighted_sum(&ab, e.z, &eb, -a.z, &ea, b.z);
    let abd = weighted_sum(&bd, a.z, &da, b.z, &ab, d.z);
    let bce = weighted_sum(&ce, b.z, &eb, c.z, &bc, e.z);
    let cda = weighted_sum(&da, c.z, &ac, d.z, &cd, a.z);
    let deb = weighted_sum(&eb, d.z, &bd, e.z, &de, b.z);
    let eac = weighted_sum(&ac, e.z, &ce, a.z, &ea, c.z);

    let bcde = pair_difference(&cde, &bce, &deb, &bcd);
    let cdea = pair_difference(&dea, &cda, &eac, &cde);
    let deab = pair_difference(&eab, &deb, &abd, &dea);
    let eabc = pair_difference(&abc, &eac, &bce, &eab);
    let abcd = pair_difference(&bcd, &abd, &cda, &abc);

    let adet = lift_scale::<T, 96, 192, 384, 768, 1152>(&bcde, a.x, a.y, a.z, false);
    let bdet = lift_scale::<T, 96, 192, 384, 768, 1152>(&cdea, b.x, b.y, b.z, false);
    let cdet = lift_scale::<T, 96, 192, 384, 768, 1152>(&deab, c.x, c.y, c.z, false);
    let ddet = lift_scale::<T, 96, 192, 384, 768, 1152>(&eabc, d.x, d.y, d.z, false);
    let edet = lift_scale::<T, 96, 192, 384, 768, 1152>(&abcd, e.x, e.y, e.z, false);

    let abdet: Expansion<T, 2304> = adet.sum(&bdet);
    let cddet: Expansion<T, 2304> = cdet.sum(&ddet);
    let cdedet: Expansion<T, 3456> = cddet.sum(&edet);
    let deter: Expansion<T, 5760> = abdet.sum(&cdedet);
    deter.most_significant()
}
