use std::cmp::Ordering;

use crate::float::PredicateFloat;

/// The sign of a predicate result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Sign of `value`. Both zeros map to [`Sign::Zero`]; NaN has no sign and
    /// also maps to [`Sign::Zero`].
    pub fn of<T: PredicateFloat>(value: T) -> Sign {
        if value > T::zero() {
            Sign::Positive
        } else if value < T::zero() {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    pub fn reversed(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }

    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }
}

impl From<Sign> for Ordering {
    fn from(sign: Sign) -> Ordering {
        match sign {
            Sign::Negative => Ordering::Less,
            Sign::Zero => Ordering::Equal,
            Sign::Positive => Ordering::Greater,
        }
    }
}
