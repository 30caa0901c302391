//! Error types.
//!
//! The adaptive predicates themselves never fail for finite input. Errors only
//! arise at the edges: validating caller-supplied coordinates, building
//! expansions from raw components, configuring a [`StaticFilter`] and probing
//! the platform's floating-point arithmetic.
//!
//! [`StaticFilter`]: crate::bounds::StaticFilter

/// Errors reported by the validating entry points of this crate.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum PredicateError {
    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinate (NaN or infinity) at point {point}, axis {axis}: {value}")]
    NonFiniteCoordinate {
        /// Index of the offending point in the predicate's argument list.
        point: usize,
        /// Index of the offending coordinate within the point.
        axis: usize,
        /// The rejected value, widened to `f64`.
        value: f64,
    },

    /// A component sequence violates the expansion invariants.
    #[error("Invalid expansion: {reason}")]
    InvalidExpansion {
        /// Which invariant was broken.
        reason: &'static str,
    },

    /// A component sequence does not fit into a fixed-capacity expansion.
    #[error("Expansion needs {required} components but holds at most {capacity}")]
    CapacityExceeded {
        /// Capacity of the target expansion.
        capacity: usize,
        /// Number of components that were supplied.
        required: usize,
    },

    /// A static filter was configured with a negative or non-finite magnitude.
    #[error("Invalid coordinate magnitude for a static filter: {value}")]
    InvalidMagnitude {
        /// The rejected magnitude, widened to `f64`.
        value: f64,
    },

    /// The running platform does not round like IEEE-754 round-to-nearest-even
    /// at working precision.
    #[error("Unsupported floating-point arithmetic: expected {quantity} = {expected}, observed {observed}")]
    UnsupportedArithmetic {
        /// Name of the probed quantity.
        quantity: &'static str,
        /// Value the exact primitives are compiled for.
        expected: f64,
        /// Value measured at run time.
        observed: f64,
    },
}
