//! Classifies one random point set, then tallies which stage of the adaptive
//! evaluation settled each of many random and nearly degenerate sets.
//!
//! ```text
//! cargo run --example random_points -- [seed]
//! ```

use adaptive_predicates::{
    ErrorBounds, Evaluation, Point2, Point3, Sign, Stage, incircle, incircle_with, insphere,
    insphere_with, orient2d, orient2d_fast, orient2d_with, orient3d, orient3d_with,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLES: usize = 10_000;

#[derive(Default)]
struct Tally {
    stages: [usize; 3],
    signs: [usize; 3],
}

impl Tally {
    fn record(&mut self, evaluation: &Evaluation<f64>) {
        let stage = match evaluation.stage {
            Stage::Fast => 0,
            Stage::SemiExact => 1,
            Stage::Exact => 2,
        };
        let sign = match evaluation.sign() {
            Sign::Negative => 0,
            Sign::Zero => 1,
            Sign::Positive => 2,
        };
        self.stages[stage] += 1;
        self.signs[sign] += 1;
    }

    fn report(&self, label: &str) {
        println!(
            "{label:<28} fast {:>6}  semi-exact {:>6}  exact {:>6}  |  - {:>6}  0 {:>6}  + {:>6}",
            self.stages[0], self.stages[1], self.stages[2], self.signs[0], self.signs[1], self.signs[2],
        );
    }
}

fn point2(rng: &mut StdRng) -> Point2<f64> {
    Point2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
}

fn point3(rng: &mut StdRng) -> Point3<f64> {
    Point3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
    )
}

fn lerp2(a: &Point2<f64>, b: &Point2<f64>, t: f64) -> Point2<f64> {
    Point2::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

fn describe(rng: &mut StdRng) {
    let c: [f64; 15] = std::array::from_fn(|_| rng.random::<f64>());
    let (a2, b2, c2, d2) = (
        Point2::new(c[0], c[1]),
        Point2::new(c[2], c[3]),
        Point2::new(c[4], c[5]),
        Point2::new(c[6], c[7]),
    );
    let (a3, b3, c3, d3, e3) = (
        Point3::new(c[0], c[1], c[2]),
        Point3::new(c[3], c[4], c[5]),
        Point3::new(c[6], c[7], c[8]),
        Point3::new(c[9], c[10], c[11]),
        Point3::new(c[12], c[13], c[14]),
    );

    let side = match Sign::of(orient2d(&a2, &b2, &c2)) {
        Sign::Positive => "left of",
        Sign::Negative => "right of",
        Sign::Zero => "on",
    };
    println!("{c2:?} is {side} the line from {a2:?} to {b2:?}");

    let side = match Sign::of(incircle(&a2, &b2, &c2, &d2)) {
        Sign::Positive if orient2d(&a2, &b2, &c2) > 0.0 => "inside",
        Sign::Negative if orient2d(&a2, &b2, &c2) < 0.0 => "inside",
        Sign::Zero => "on",
        _ => "outside",
    };
    println!("{d2:?} is {side} the circle through {a2:?}, {b2:?}, {c2:?}");

    let side = match Sign::of(orient3d(&a3, &b3, &c3, &d3)) {
        Sign::Positive => "below",
        Sign::Negative => "above",
        Sign::Zero => "on",
    };
    println!("{d3:?} is {side} the plane through {a3:?}, {b3:?}, {c3:?}");

    let side = match Sign::of(insphere(&a3, &b3, &c3, &d3, &e3)) {
        Sign::Positive if orient3d(&a3, &b3, &c3, &d3) > 0.0 => "inside",
        Sign::Negative if orient3d(&a3, &b3, &c3, &d3) < 0.0 => "inside",
        Sign::Zero => "on",
        _ => "outside",
    };
    println!("{e3:?} is {side} the sphere through {a3:?}, {b3:?}, {c3:?}, {d3:?}\n");
}

fn main() {
    let seed = std::env::args().nth(1).and_then(|arg| arg.parse::<u64>().ok());
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let bounds = ErrorBounds::<f64>::get();
    println!("seed: {}", seed.map_or_else(|| "os".to_string(), |s| s.to_string()));
    describe(&mut rng);

    let mut tally = Tally::default();
    for _ in 0..SAMPLES {
        let (a, b, c) = (point2(&mut rng), point2(&mut rng), point2(&mut rng));
        tally.record(&orient2d_with(bounds, &a, &b, &c));
    }
    tally.report("orient2d random");

    let mut tally = Tally::default();
    let mut naive_wrong = 0;
    for _ in 0..SAMPLES {
        let (a, b) = (point2(&mut rng), point2(&mut rng));
        let c = lerp2(&a, &b, rng.random_range(-1.0..2.0));
        let evaluation = orient2d_with(bounds, &a, &b, &c);
        if Sign::of(orient2d_fast(&a, &b, &c)) != evaluation.sign() {
            naive_wrong += 1;
        }
        tally.record(&evaluation);
    }
    tally.report("orient2d near-collinear");
    println!("{:<28} naive sign wrong on {naive_wrong} of {SAMPLES}", "");

    let mut tally = Tally::default();
    for _ in 0..SAMPLES {
        let (a, b, c) = (point3(&mut rng), point3(&mut rng), point3(&mut rng));
        let (s, t) = (rng.random_range(-1.0..2.0), rng.random_range(-1.0..2.0));
        let d = Point3::new(
            a.x + s * (b.x - a.x) + t * (c.x - a.x),
            a.y + s * (b.y - a.y) + t * (c.y - a.y),
            a.z + s * (b.z - a.z) + t * (c.z - a.z),
        );
        tally.record(&orient3d_with(bounds, &a, &b, &c, &d));
    }
    tally.report("orient3d near-coplanar");

    let mut tally = Tally::default();
    for _ in 0..SAMPLES {
        let angle = |rng: &mut StdRng| rng.random_range(0.0..std::f64::consts::TAU);
        let on_circle = |theta: f64| Point2::new(theta.cos(), theta.sin());
        let (a, b, c, d) = (
            on_circle(angle(&mut rng)),
            on_circle(angle(&mut rng)),
            on_circle(angle(&mut rng)),
            on_circle(angle(&mut rng)),
        );
        tally.record(&incircle_with(bounds, &a, &b, &c, &d));
    }
    tally.report("incircle near-cocircular");

    let mut tally = Tally::default();
    for _ in 0..SAMPLES / 10 {
        let mut on_sphere = || {
            let p = point3(&mut rng);
            let norm = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt().max(f64::MIN_POSITIVE);
            Point3::new(p.x / norm, p.y / norm, p.z / norm)
        };
        let (a, b, c, d, e) = (on_sphere(), on_sphere(), on_sphere(), on_sphere(), on_sphere());
        tally.record(&insphere_with(bounds, &a, &b, &c, &d, &e));
    }
    tally.report("insphere near-cospherical");
}
