#![allow(dead_code)]

use adaptive_predicates::{Point2, Point3, Sign};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use quickcheck::{Arbitrary, Gen};

pub const LCG_A: u64 = 6364136223846793005;
pub const LCG_C: u64 = 1;

pub fn lcg_next(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(LCG_A).wrapping_add(LCG_C);
    let val = ((*state >> 32) as f64) / (u32::MAX as f64);
    (val * 2.0) - 1.0
}

pub fn lcg_range(state: &mut u64, min: f64, max: f64) -> f64 {
    min + (max - min) * (lcg_next(state) * 0.5 + 0.5)
}

/// Moves a positive value by `k` units in the last place.
pub fn ulps(x: f64, k: i64) -> f64 {
    assert!(x > 0.0, "ulps only walks positive values");
    f64::from_bits((x.to_bits() as i64 + k) as u64)
}

/// A coordinate `m * 2^k` with a 32-bit `m` and `|k| <= 20`. Products of five
/// such values (and of their differences) neither overflow nor underflow.
#[derive(Clone, Copy, Debug)]
pub struct Coordinate(pub f64);

impl Arbitrary for Coordinate {
    fn arbitrary(g: &mut Gen) -> Self {
        let mantissa = i32::arbitrary(g);
        let shift = i32::from(u8::arbitrary(g) % 41) - 20;
        Coordinate(f64::from(mantissa) * 2f64.powi(shift))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Pt2(pub Point2<f64>);

impl Arbitrary for Pt2 {
    fn arbitrary(g: &mut Gen) -> Self {
        Pt2(Point2::new(Coordinate::arbitrary(g).0, Coordinate::arbitrary(g).0))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Pt3(pub Point3<f64>);

impl Arbitrary for Pt3 {
    fn arbitrary(g: &mut Gen) -> Self {
        Pt3(Point3::new(
            Coordinate::arbitrary(g).0,
            Coordinate::arbitrary(g).0,
            Coordinate::arbitrary(g).0,
        ))
    }
}

pub fn rational(value: f64) -> BigRational {
    if value == 0.0 {
        return BigRational::zero();
    }
    BigRational::from_float(value).expect("finite coordinate")
}

pub fn rational_sum(components: &[f64]) -> BigRational {
    components
        .iter()
        .fold(BigRational::zero(), |acc, &c| acc + rational(c))
}

pub fn sign_of(value: &BigRational) -> Sign {
    if value.is_positive() {
        Sign::Positive
    } else if value.is_negative() {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

fn det2(a: &BigRational, b: &BigRational, c: &BigRational, d: &BigRational) -> BigRational {
    a * d - b * c
}

fn det3(m: &[[BigRational; 3]; 3]) -> BigRational {
    &m[0][0] * det2(&m[1][1], &m[1][2], &m[2][1], &m[2][2])
        - &m[0][1] * det2(&m[1][0], &m[1][2], &m[2][0], &m[2][2])
        + &m[0][2] * det2(&m[1][0], &m[1][1], &m[2][0], &m[2][1])
}

fn det4(m: &[[BigRational; 4]; 4]) -> BigRational {
    let mut total = BigRational::zero();
    for column in 0..4 {
        let minor: [[BigRational; 3]; 3] = std::array::from_fn(|i| {
            let row = &m[i + 1];
            let mut picked = row.iter().enumerate().filter(|(k, _)| *k != column);
            std::array::from_fn(|_| picked.next().map(|(_, v)| v.clone()).unwrap())
        });
        let term = &m[0][column] * det3(&minor);
        if column % 2 == 0 {
            total += term;
        } else {
            total -= term;
        }
    }
    total
}

pub fn orient2d_reference<T: Copy + Into<f64>>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> Sign {
    let r = |v: T| rational(v.into());
    let acx = r(a.x) - r(c.x);
    let acy = r(a.y) - r(c.y);
    let bcx = r(b.x) - r(c.x);
    let bcy = r(b.y) - r(c.y);
    sign_of(&det2(&acx, &acy, &bcx, &bcy))
}

pub fn orient3d_reference<T: Copy + Into<f64>>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> Sign {
    let r = |v: T| rational(v.into());
    let row = |p: &Point3<T>| [r(p.x) - r(d.x), r(p.y) - r(d.y), r(p.z) - r(d.z)];
    sign_of(&det3(&[row(a), row(b), row(c)]))
}

pub fn incircle_reference<T: Copy + Into<f64>>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> Sign {
    let r = |v: T| rational(v.into());
    let row = |p: &Point2<T>| {
        let x = r(p.x) - r(d.x);
        let y = r(p.y) - r(d.y);
        let lift = &x * &x + &y * &y;
        [x, y, lift]
    };
    sign_of(&det3(&[row(a), row(b), row(c)]))
}

pub fn insphere_reference<T: Copy + Into<f64>>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> Sign {
    let r = |v: T| rational(v.into());
    let row = |p: &Point3<T>| {
        let x = r(p.x) - r(e.x);
        let y = r(p.y) - r(e.y);
        let z = r(p.z) - r(e.z);
        let lift = &x * &x + &y * &y + &z * &z;
        [x, y, z, lift]
    };
    sign_of(&det4(&[row(a), row(b), row(c), row(d)]))
}

fn sign_of_int(value: &BigInt) -> Sign {
    if value.is_positive() {
        Sign::Positive
    } else if value.is_negative() {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

/// Exact orient2d of integer lattice points.
pub fn orient2d_lattice(a: (i64, i64), b: (i64, i64), c: (i64, i64)) -> Sign {
    let acx = BigInt::from(a.0 - c.0);
    let acy = BigInt::from(a.1 - c.1);
    let bcx = BigInt::from(b.0 - c.0);
    let bcy = BigInt::from(b.1 - c.1);
    sign_of_int(&(acx * bcy - acy * bcx))
}

/// Exact incircle of integer lattice points.
pub fn incircle_lattice(a: (i64, i64), b: (i64, i64), c: (i64, i64), d: (i64, i64)) -> Sign {
    let row = |p: (i64, i64)| {
        let x = BigInt::from(p.0 - d.0);
        let y = BigInt::from(p.1 - d.1);
        let lift = &x * &x + &y * &y;
        (x, y, lift)
    };
    let (ax, ay, al) = row(a);
    let (bx, by, bl) = row(b);
    let (cx, cy, cl) = row(c);
    let det = &al * (&bx * &cy - &cx * &by) + &bl * (&cx * &ay - &ax * &cy)
        + &cl * (&ax * &by - &bx * &ay);
    sign_of_int(&det)
}
