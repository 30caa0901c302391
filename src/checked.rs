//! Predicates that validate their input first.
//!
//! The plain predicates assume finite coordinates and give meaningless results
//! for NaN or infinite input. These wrappers reject such coordinates with
//! [`PredicateError::NonFiniteCoordinate`] and otherwise forward to the
//! adaptive predicate.

use crate::error::PredicateError;
use crate::float::PredicateFloat;
use crate::geometry::{Point2, Point3, Sign};
use crate::predicates;

pub fn orient2d<T: PredicateFloat>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> Result<Sign, PredicateError> {
    ensure_finite(&[a.coordinates(), b.coordinates(), c.coordinates()])?;
    Ok(Sign::of(predicates::orient2d(a, b, c)))
}

pub fn orient3d<T: PredicateFloat>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
) -> Result<Sign, PredicateError> {
    ensure_finite(&[a.coordinates(), b.coordinates(), c.coordinates(), d.coordinates()])?;
    Ok(Sign::of(predicates::orient3d(a, b, c, d)))
}

pub fn incircle<T: PredicateFloat>(
    a: &Point2<T>,
    b: &Point2<T>,
    c: &Point2<T>,
    d: &Point2<T>,
) -> Result<Sign, PredicateError> {
    ensure_finite(&[a.coordinates(), b.coordinates(), c.coordinates(), d.coordinates()])?;
    Ok(Sign::of(predicates::incircle(a, b, c, d)))
}

pub fn insphere<T: PredicateFloat>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
    d: &Point3<T>,
    e: &Point3<T>,
) -> Result<Sign, PredicateError> {
    ensure_finite(&[
        a.coordinates(),
        b.coordinates(),
        c.coordinates(),
        d.coordinates(),
        e.coordinates(),
    ])?;
    Ok(Sign::of(predicates::insphere(a, b, c, d, e)))
}

fn ensure_finite<T: PredicateFloat, const D: usize>(points: &[[T; D]]) -> Result<(), PredicateError> {
    for (point, coordinates) in points.iter().enumerate() {
        for (axis, value) in coordinates.iter().enumerate() {
            if !value.is_finite() {
                return Err(PredicateError::NonFiniteCoordinate {
                    point,
                    axis,
                    value: value.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_input_is_forwarded() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert_eq!(orient2d(&a, &b, &Point2::new(0.0, 1.0)), Ok(Sign::Positive));
        assert_eq!(orient2d(&a, &b, &Point2::new(7.0, 0.0)), Ok(Sign::Zero));
        assert_eq!(
            incircle(&a, &b, &Point2::new(0.0, 1.0), &Point2::new(1.0, 1.0)),
            Ok(Sign::Zero)
        );
    }

    #[test]
    fn reports_the_offending_coordinate() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let bad = Point3::new(0.0, 0.0, f64::INFINITY);
        assert_eq!(
            orient3d(&a, &b, &c, &bad),
            Err(PredicateError::NonFiniteCoordinate {
                point: 3,
                axis: 2,
                value: f64::INFINITY
            })
        );

        let nan = Point2::new(f32::NAN, 0.0);
        let err = orient2d(&Point2::new(0.0, 0.0), &nan, &Point2::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            PredicateError::NonFiniteCoordinate { point: 1, axis: 0, .. }
        ));
        assert!(err.to_string().contains("point 1, axis 0"));
    }

    #[test]
    fn insphere_checks_every_point() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let bad = Point3::new(f64::NEG_INFINITY, 0.0, 0.0);
        assert!(matches!(
            insphere(&p, &p, &p, &p, &bad),
            Err(PredicateError::NonFiniteCoordinate { point: 4, axis: 0, .. })
        ));
        assert_eq!(insphere(&p, &p, &p, &p, &p), Ok(Sign::Zero));
    }
}
