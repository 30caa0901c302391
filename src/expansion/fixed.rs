use std::ops::Neg;

use crate::error::PredicateError;
use crate::float::PredicateFloat;
use crate::geometry::Sign;

use super::primitives::{product_difference, two_two_diff};
use super::{
    check_components, estimate, fast_expansion_sum_zeroelim, grow_expansion_zeroelim,
    scale_expansion_zeroelim,
};

/// A nonoverlapping expansion stored inline with room for `N` components.
///
/// Operations producing a larger expansion name the result capacity as a const
/// parameter, usually inferred from a type annotation at the call site. A
/// result capacity smaller than the worst case is rejected at compile time, so
/// no operation can run out of room:
///
/// ```rust
/// use adaptive_predicates::Expansion;
///
/// let ab: Expansion<f64, 4> = Expansion::product_difference(3.0, 5.0, 2.0, 7.0);
/// let twice: Expansion<f64, 8> = ab.scale(2.0);
/// let sum: Expansion<f64, 12> = twice.sum(&ab);
/// assert_eq!(sum.estimate(), 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct Expansion<T, const N: usize> {
    len: usize,
    components: [T; N],
}

impl<T: PredicateFloat, const N: usize> Expansion<T, N> {
    /// The zero value, which has no components.
    pub fn zero() -> Self {
        Self {
            len: 0,
            components: [T::zero(); N],
        }
    }

    /// An expansion holding the single value `value`.
    pub fn from_value(value: T) -> Self {
        const { assert!(N >= 1, "expansion capacity must be at least 1") };
        let mut result = Self::zero();
        if value != T::zero() {
            result.components[0] = value;
            result.len = 1;
        }
        result
    }

    /// `high + low` from the output of an error-free transformation such as
    /// [`two_sum`](super::primitives::two_sum) or
    /// [`two_product`](super::primitives::two_product).
    pub fn from_pair(high: T, low: T) -> Self {
        const { assert!(N >= 2, "expansion capacity must be at least 2") };
        Self::from_increasing(&[low, high])
    }

    /// `a * b - c * d`, exactly.
    pub fn product_difference(a: T, b: T, c: T, d: T) -> Self {
        const { assert!(N >= 4, "expansion capacity must be at least 4") };
        Self::from_increasing(&product_difference(a, b, c, d))
    }

    /// `(a1 + a0) - (b1 + b0)`, exactly, for two-component inputs.
    pub fn two_two_diff(a1: T, a0: T, b1: T, b0: T) -> Self {
        const { assert!(N >= 4, "expansion capacity must be at least 4") };
        let (x3, x2, x1, x0) = two_two_diff(a1, a0, b1, b0);
        Self::from_increasing(&[x0, x1, x2, x3])
    }

    /// Builds an expansion from caller-supplied components in increasing
    /// magnitude order, rejecting sequences that are not valid expansions.
    /// Zero components are skipped.
    pub fn try_from_components(components: &[T]) -> Result<Self, PredicateError> {
        let nonzero = components.iter().filter(|&&c| c != T::zero()).count();
        if nonzero > N {
            return Err(PredicateError::CapacityExceeded {
                capacity: N,
                required: nonzero,
            });
        }
        let result = Self::collect_nonzero(components);
        result.check_invariants()?;
        Ok(result)
    }

    /// Copies components that already form a valid expansion, dropping zeros.
    fn from_increasing(components: &[T]) -> Self {
        let result = Self::collect_nonzero(components);
        result.debug_check();
        result
    }

    fn collect_nonzero(components: &[T]) -> Self {
        let mut result = Self::zero();
        for &component in components {
            if component != T::zero() {
                result.components[result.len] = component;
                result.len += 1;
            }
        }
        result
    }

    fn from_buffer(components: [T; N], len: usize) -> Self {
        let result = Self { len, components };
        result.debug_check();
        result
    }

    #[inline(always)]
    fn debug_check(&self) {
        debug_assert!(
            self.check_invariants().is_ok(),
            "malformed expansion: {:?}",
            self.components()
        );
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of nonzero components.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the represented value is exactly zero.
    pub const fn is_zero(&self) -> bool {
        self.len == 0
    }

    /// The components, least significant first.
    pub fn components(&self) -> &[T] {
        &self.components[..self.len]
    }

    /// The largest-magnitude component, or zero for the empty expansion. It
    /// carries the sign of the exact value.
    pub fn most_significant(&self) -> T {
        self.components().last().copied().unwrap_or_else(T::zero)
    }

    pub fn sign(&self) -> Sign {
        Sign::of(self.most_significant())
    }

    /// A floating-point approximation of the value. Use [`Self::sign`] when only
    /// the sign matters.
    pub fn estimate(&self) -> T {
        estimate(self.components())
    }

    pub fn check_invariants(&self) -> Result<(), PredicateError> {
        check_components(self.components())
    }

    /// `self + b`.
    pub fn grow<const R: usize>(&self, b: T) -> Expansion<T, R> {
        const { assert!(R >= N + 1, "grow needs a result capacity of at least N + 1") };
        let mut buffer = [T::zero(); R];
        let len = grow_expansion_zeroelim(self.components(), b, &mut buffer);
        Expansion::from_buffer(buffer, len)
    }

    /// `self + rhs`.
    pub fn sum<const M: usize, const R: usize>(&self, rhs: &Expansion<T, M>) -> Expansion<T, R> {
        const { assert!(R >= N + M, "sum needs a result capacity of at least N + M") };
        let mut buffer = [T::zero(); R];
        let len = fast_expansion_sum_zeroelim(self.components(), rhs.components(), &mut buffer);
        Expansion::from_buffer(buffer, len)
    }

    /// `self - rhs`.
    pub fn diff<const M: usize, const R: usize>(&self, rhs: &Expansion<T, M>) -> Expansion<T, R> {
        self.sum(&rhs.negate())
    }

    /// `self * b`.
    pub fn scale<const R: usize>(&self, b: T) -> Expansion<T, R> {
        const { assert!(R >= 2 * N, "scale needs a result capacity of at least 2 * N") };
        let mut buffer = [T::zero(); R];
        let len = scale_expansion_zeroelim(self.components(), b, &mut buffer);
        Expansion::from_buffer(buffer, len)
    }

    /// `-self`, obtained by negating every component.
    pub fn negate(&self) -> Self {
        let mut result = Self::zero();
        for (dst, &src) in result.components.iter_mut().zip(self.components()) {
            *dst = -src;
        }
        result.len = self.len;
        result
    }
}

impl<T: PredicateFloat, const N: usize> Default for Expansion<T, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: PredicateFloat, const N: usize, const M: usize> PartialEq<Expansion<T, M>> for Expansion<T, N> {
    /// Component-wise equality. Two expansions of the same value may differ in
    /// representation.
    fn eq(&self, other: &Expansion<T, M>) -> bool {
        self.components() == other.components()
    }
}

impl<T: PredicateFloat, const N: usize> Neg for Expansion<T, N> {
    type Output = Expansion<T, N>;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<T: PredicateFloat, const N: usize> Neg for &Expansion<T, N> {
    type Output = Expansion<T, N>;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<T: PredicateFloat> From<T> for Expansion<T, 1> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}
