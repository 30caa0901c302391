//! Adaptive precision floating-point predicates for robust computational geometry.
//!
//! This crate answers the four classic geometric questions with an exact sign,
//! however close the configuration is to degenerate:
//!
//! - [`orient2d`]: on which side of the directed line `ab` does `c` lie?
//! - [`orient3d`]: on which side of the plane through `a, b, c` does `d` lie?
//! - [`incircle`]: is `d` inside the circle through `a, b, c`?
//! - [`insphere`]: is `e` inside the sphere through `a, b, c, d`?
//!
//! Every predicate is evaluated in up to three stages. A plain floating-point
//! determinant is accepted when it clears an a-priori error bound; otherwise the
//! determinant is recomputed from exact products of the rounded coordinate
//! differences and checked against a tighter bound; only when that is still
//! inconclusive is the determinant expanded exactly from the raw coordinates.
//! Most calls finish in the first stage.
//!
//! # Quick Start
//!
//! ```rust
//! use adaptive_predicates::{Point2, Sign, incircle, orient2d};
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(24.0, 24.0);
//! let c = Point2::new(0.5, 0.5);
//! assert_eq!(orient2d(&a, &b, &c), 0.0);
//!
//! let nudged = Point2::new(0.5 + f64::EPSILON / 2.0, 0.5);
//! assert_eq!(Sign::of(orient2d(&a, &b, &nudged)), Sign::Negative);
//!
//! let inside = incircle(
//!     &Point2::new(0.0, 0.0),
//!     &Point2::new(1.0, 0.0),
//!     &Point2::new(0.0, 1.0),
//!     &Point2::new(10.0, 10.0),
//! );
//! assert!(inside < 0.0);
//! ```
//!
//! # Sign conventions
//!
//! Only the sign of a returned value is meaningful. Positive means `c` is left of
//! `ab` (counterclockwise), `d` is below the plane of a counterclockwise `abc`,
//! `d` is inside the circle of a counterclockwise `abc`, and `e` is inside the
//! sphere of a positively oriented `abcd`. Zero is returned exactly for
//! degenerate inputs.
//!
//! # Arithmetic requirements
//!
//! The exact primitives rely on round-to-nearest-even at working precision.
//! Rust never fuses `a * b + c` on its own, and every supported target evaluates
//! `f32`/`f64` without extended-precision registers except 32-bit x86 without
//! SSE2, which is rejected at compile time. Overflow and underflow of
//! intermediate products are outside the guarantee. NaN and infinite inputs give
//! undefined results; the [`checked`] module rejects them up front.

#[cfg(all(target_arch = "x86", not(target_feature = "sse2")))]
compile_error!(
    "adaptive-predicates needs SSE2 floating point: x87 extended precision breaks exact two_sum/two_product"
);

pub mod bounds;
pub mod checked;
pub mod error;
pub mod expansion;
pub mod float;
pub mod geometry;
pub mod predicates;

pub use bounds::{ErrorBounds, StaticFilter};
pub use error::PredicateError;
pub use expansion::Expansion;
pub use float::PredicateFloat;
pub use geometry::{Point2, Point3, Sign};
pub use predicates::{
    Evaluation, Stage, incircle, incircle_exact, incircle_fast, incircle_with, insphere,
    insphere_exact, insphere_fast, insphere_with, orient2d, orient2d_exact, orient2d_fast,
    orient2d_with, orient3d, orient3d_exact, orient3d_fast, orient3d_with,
};
