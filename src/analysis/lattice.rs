//! Lattice interface for abstract domains.
//!
//! A lattice defines how abstract values combine at control flow join points and how a
//! fixed-point driver decides that an iteration has converged.
//!
//! # Lattice Theory Background
//!
//! - **Partial Order**: Elements can be compared (≤), the concretization of the smaller
//!   element is a subset of the larger one
//! - **Join (⊔)**: Least upper bound of two elements, used where control flow merges
//! - **Meet (⊓)**: Greatest lower bound of two elements, used to intersect constraints
//! - **Top (⊤)**: Greatest element (no information)
//! - **Bottom (⊥)**: Least element (unreachable)
//!
//! # Equality
//!
//! Two notions of equality are provided. Semantic equality compares concretizations and is
//! what a client asks when it wants to know whether two values describe the same set.
//! Syntactic identity compares representations and is what the driver must use for its
//! convergence check: only identity is guaranteed to stabilize after widening.

use std::fmt::Debug;

use crate::Result;

/// A lattice of abstract values as seen by a fixed-point driver.
///
/// All combining operations are pure: they return a fresh value and leave both operands
/// untouched. Operations that combine two values may reject operands that cannot be
/// combined (e.g. intervals of different bit-widths) with an error.
///
/// The operations must satisfy:
///
/// - **Idempotent**: `x.join(x) ≡ x`, `x.meet(x) ≡ x`
/// - **Commutative**: `x.join(y) ≡ y.join(x)`
/// - **Associative**: `x.join(y.join(z)) ≡ (x.join(y)).join(z)`
/// - **Bounds**: `⊥ ≤ x ≤ ⊤` for every `x`
///
/// where `≡` is [`AbstractDomain::is_equal`].
///
/// # Examples
///
/// ```rust
/// use intrange::analysis::{AbstractDomain, BitWidth, Range};
///
/// fn merge_all<D: AbstractDomain>(first: &D, rest: &[D]) -> intrange::Result<D> {
///     rest.iter().try_fold(first.clone(), |acc, v| acc.join(v))
/// }
///
/// let w = BitWidth::new(8)?;
/// let merged = merge_all(&Range::constant(1, w), &[Range::constant(7, w)])?;
/// assert_eq!(merged.bounds(), Some((1, 7)));
/// # Ok::<(), intrange::Error>(())
/// ```
pub trait AbstractDomain: Clone + Debug + PartialEq {
    /// Returns `true` if this is the bottom element.
    fn is_bottom(&self) -> bool;

    /// Returns `true` if this is the explicit top element.
    fn is_top(&self) -> bool;

    /// Partial order test: is the concretization of `self` a subset of `other`'s?
    ///
    /// # Errors
    ///
    /// Returns an error if the two values cannot be compared.
    fn less_or_equal(&self, other: &Self) -> Result<bool>;

    /// Computes the least upper bound of two elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the two values cannot be combined.
    fn join(&self, other: &Self) -> Result<Self>;

    /// Computes the greatest lower bound of two elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the two values cannot be combined.
    fn meet(&self, other: &Self) -> Result<Self>;

    /// Semantic equality: both elements have the same concretization.
    ///
    /// # Errors
    ///
    /// Returns an error if the two values cannot be compared.
    fn is_equal(&self, other: &Self) -> Result<bool> {
        Ok(self.less_or_equal(other)? && other.less_or_equal(self)?)
    }

    /// Syntactic equality, used for fixed-point convergence checks.
    fn is_identical(&self, other: &Self) -> bool;

    /// Joins an arbitrary number of elements at once.
    ///
    /// Only disjunctive domains can give this a meaning beyond an iterated pairwise join,
    /// so the default implementation rejects the call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Unsupported`] unless the domain overrides it.
    fn generalized_join(_values: &[Self]) -> Result<Self> {
        Err(crate::Error::Unsupported("generalized join"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BitWidth, Range};

    fn w8() -> BitWidth {
        BitWidth::new(8).unwrap()
    }

    fn samples() -> Vec<Range> {
        let w = w8();
        vec![
            Range::bottom(w),
            Range::top(w),
            Range::bounded(-128, 127, w).unwrap(),
            Range::bounded(0, 10, w).unwrap(),
            Range::bounded(5, 15, w).unwrap(),
            Range::bounded(-50, -20, w).unwrap(),
            Range::constant(3, w),
        ]
    }

    fn assert_laws<D: AbstractDomain>(values: &[D]) {
        for x in values {
            assert!(x.join(x).unwrap().is_equal(x).unwrap());
            assert!(x.meet(x).unwrap().is_equal(x).unwrap());
            assert!(x.is_identical(x));
            for y in values {
                assert!(x.join(y).unwrap().is_equal(&y.join(x).unwrap()).unwrap());
                assert!(x.meet(y).unwrap().is_equal(&y.meet(x).unwrap()).unwrap());
                assert!(x.less_or_equal(&x.join(y).unwrap()).unwrap());
                assert!(x.meet(y).unwrap().less_or_equal(x).unwrap());
                for z in values {
                    let left = x.join(&y.join(z).unwrap()).unwrap();
                    let right = x.join(y).unwrap().join(z).unwrap();
                    assert!(left.is_equal(&right).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_range_lattice_laws() {
        assert_laws(&samples());
    }

    #[test]
    fn test_bottom_and_top_bound_everything() {
        let w = w8();
        for x in samples() {
            assert!(Range::bottom(w).less_or_equal(&x).unwrap());
            assert!(x.less_or_equal(&Range::top(w)).unwrap());
        }
    }

    #[test]
    fn test_generalized_join_rejected() {
        let values = samples();
        assert_eq!(
            <Range as AbstractDomain>::generalized_join(&values),
            Err(crate::Error::Unsupported("generalized join"))
        );
    }
}
