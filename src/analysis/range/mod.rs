//! Fixed-width interval lattice.
//!
//! This module provides the [`Range`] abstract value, the classical interval domain of
//! Cousot&Cousot'76 specialised to fixed-width two's-complement integers:
//!
//! - **Bottom**: no possible value (unreachable code, contradictory constraints)
//! - **Interval**: `[lb, ub]` with `lb ≤ ub` in the signed reading of the width
//! - **Top**: every value of the width is possible
//!
//! # Lattice Structure
//!
//! ```text
//!              Top
//!               |
//!          [MIN, MAX]      same concretization as Top, but evaluated normally
//!           /      \
//!       [a, b]    [c, d]   bounded ranges
//!           \      /
//!            [x, x]        singleton
//!               |
//!             Bottom
//! ```
//!
//! # Top versus `[MIN, MAX]`
//!
//! Top is tracked explicitly instead of being inferred from bounds. Every binary transfer
//! function returns Top immediately when an operand is Top, while an operand that merely
//! spans `[MIN, MAX]` is evaluated like any other interval and may overflow into Top.
//! [`Range::normalized`] collapses the latter into the former for presentation.
//!
//! # Signedness
//!
//! Bounds are always stored under the signed interpretation. Unsigned operations split an
//! interval at the north pole (between `-1` and `0`) into pieces that are contiguous in
//! the unsigned reading; see the `pole` submodule.
//!
//! # Usage
//!
//! ```rust
//! use intrange::analysis::{BitWidth, Range, TBool, Signedness};
//!
//! let w8 = BitWidth::new(8)?;
//!
//! let c = Range::constant(42, w8);
//! assert!(c.is_gamma_singleton());
//!
//! let b = Range::from_tbool(TBool::False, w8, Signedness::Signed)?;
//! assert_eq!(b.as_constant(), Some(0));
//!
//! let full = Range::bounded(-128, 127, w8)?;
//! assert!(!full.is_top());
//! assert!(full.normalized().is_top());
//! # Ok::<(), intrange::Error>(())
//! ```

mod arith;
mod bitwise;
mod bound;
mod cast;
mod guard;
mod lattice;
mod pole;
mod transfer;
mod widening;

use std::fmt;

pub use bound::{BitWidth, IntegerValue, Signedness};
pub use guard::{filter, CmpPredicate, GuardOperand};
pub use transfer::{
    apply, apply_cast, apply_cast_checked, apply_checked, BinaryOp, CastKind, TransferResult,
};
pub use widening::{LandmarkSet, WideningStrategy};

use crate::{analysis::TBool, Error, Result};

/// The three mutually exclusive states of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Bounds {
    Bottom,
    Top,
    Interval { lb: i128, ub: i128 },
}

/// An interval of `width`-bit two's-complement integers.
///
/// `Range` is a small `Copy` value; lattice operations and transfer functions return a
/// fresh value instead of mutating their operands. Derived equality is syntactic identity
/// (same width, same state, same bounds); use [`Range::is_equal`] for semantic equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    width: BitWidth,
    bounds: Bounds,
}

impl Range {
    /// Creates the bottom element (no possible value).
    #[must_use]
    pub const fn bottom(width: BitWidth) -> Self {
        Self {
            width,
            bounds: Bounds::Bottom,
        }
    }

    /// Creates the top element (any value).
    #[must_use]
    pub const fn top(width: BitWidth) -> Self {
        Self {
            width,
            bounds: Bounds::Top,
        }
    }

    /// Creates the explicit `[MIN, MAX]` interval, which is *not* Top.
    #[must_use]
    pub const fn full(width: BitWidth) -> Self {
        Self::interval(width, width.signed_min(), width.signed_max())
    }

    /// Creates the range of an unconstrained program value: Top at the value's width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsignedRange`] for an unsigned interpretation and
    /// [`Error::InvalidWidth`] if the value reports an unsupported width.
    pub fn from_value<V: IntegerValue + ?Sized>(value: &V, signedness: Signedness) -> Result<Self> {
        signedness.require_signed()?;
        Ok(Self::top(BitWidth::new(value.bit_width())?))
    }

    /// Creates a singleton interval from an integer constant.
    ///
    /// The constant is read as a `width`-bit pattern, so both its signed and its unsigned
    /// spelling are accepted: `255` at 8 bits is the singleton `{-1}`.
    #[must_use]
    pub const fn constant(value: i128, width: BitWidth) -> Self {
        let value = width.wrap(value);
        Self::interval(width, value, value)
    }

    /// Creates a singleton interval from an integer constant with an explicit signedness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsignedRange`] for an unsigned interpretation.
    pub fn from_constant(value: i128, width: BitWidth, signedness: Signedness) -> Result<Self> {
        signedness.require_signed()?;
        Ok(Self::constant(value, width))
    }

    /// Creates the range of a boolean-typed value from a three-valued boolean.
    ///
    /// True is the bit pattern `1`, false is `0`, unknown is Top.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsignedRange`] for an unsigned interpretation.
    pub fn from_tbool(value: TBool, width: BitWidth, signedness: Signedness) -> Result<Self> {
        signedness.require_signed()?;
        Ok(match value {
            TBool::True => Self::constant(1, width),
            TBool::False => Self::constant(0, width),
            TBool::Unknown => Self::top(width),
        })
    }

    /// Creates the interval `[lb, ub]`; an empty interval (`lb > ub`) is Bottom.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoundOutOfRange`] if a bound does not fit the signed range of
    /// `width`.
    pub fn bounded(lb: i128, ub: i128, width: BitWidth) -> Result<Self> {
        for value in [lb, ub] {
            if !width.fits(value) {
                return Err(Error::BoundOutOfRange {
                    value,
                    width: width.bits(),
                });
            }
        }
        if lb > ub {
            return Ok(Self::bottom(width));
        }
        Ok(Self::interval(width, lb, ub))
    }

    /// Creates `[lb, ub]` from bounds the caller has already validated.
    pub(crate) const fn interval(width: BitWidth, lb: i128, ub: i128) -> Self {
        debug_assert!(lb <= ub);
        Self {
            width,
            bounds: Bounds::Interval { lb, ub },
        }
    }

    /// Creates an interval from optional materialized bounds, `None` being Bottom.
    pub(crate) fn from_hull(width: BitWidth, hull: Option<(i128, i128)>) -> Self {
        match hull {
            Some((lb, ub)) => Self::interval(width, lb, ub),
            None => Self::bottom(width),
        }
    }

    /// Bit-width of the represented values.
    #[must_use]
    pub const fn width(&self) -> BitWidth {
        self.width
    }

    /// Interpretation of the bounds. Always [`Signedness::Signed`].
    #[must_use]
    pub const fn signedness(&self) -> Signedness {
        Signedness::Signed
    }

    /// Returns `true`; intervals are always stored under the signed interpretation.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        true
    }

    /// Returns `true` if this is the bottom element.
    #[must_use]
    pub const fn is_bottom(&self) -> bool {
        matches!(self.bounds, Bounds::Bottom)
    }

    /// Returns `true` if this is the explicit top element.
    #[must_use]
    pub const fn is_top(&self) -> bool {
        matches!(self.bounds, Bounds::Top)
    }

    /// Forces this value to Top, discarding its bounds.
    pub fn make_top(&mut self) {
        self.bounds = Bounds::Top;
    }

    /// Forces this value to Bottom, discarding its bounds.
    pub fn make_bot(&mut self) {
        self.bounds = Bounds::Bottom;
    }

    /// Returns `true` if the concretization contains exactly one integer.
    #[must_use]
    pub const fn is_gamma_singleton(&self) -> bool {
        matches!(self.bounds, Bounds::Interval { lb, ub } if lb == ub)
    }

    /// Returns the constant value if this is a singleton.
    #[must_use]
    pub const fn as_constant(&self) -> Option<i128> {
        match self.bounds {
            Bounds::Interval { lb, ub } if lb == ub => Some(lb),
            _ => None,
        }
    }

    /// Returns `(lb, ub)` for a concrete interval, `None` for Top and Bottom.
    #[must_use]
    pub const fn bounds(&self) -> Option<(i128, i128)> {
        match self.bounds {
            Bounds::Interval { lb, ub } => Some((lb, ub)),
            Bounds::Top | Bounds::Bottom => None,
        }
    }

    /// Lower bound of a concrete interval.
    #[must_use]
    pub const fn lower_bound(&self) -> Option<i128> {
        match self.bounds() {
            Some((lb, _)) => Some(lb),
            None => None,
        }
    }

    /// Upper bound of a concrete interval.
    #[must_use]
    pub const fn upper_bound(&self) -> Option<i128> {
        match self.bounds() {
            Some((_, ub)) => Some(ub),
            None => None,
        }
    }

    /// Returns the bounds with Top spelled out as `[MIN, MAX]`; `None` for Bottom.
    pub(crate) const fn materialize(&self) -> Option<(i128, i128)> {
        match self.bounds {
            Bounds::Bottom => None,
            Bounds::Top => Some((self.width.signed_min(), self.width.signed_max())),
            Bounds::Interval { lb, ub } => Some((lb, ub)),
        }
    }

    /// Number of integers in the concretization.
    #[must_use]
    pub const fn cardinality(&self) -> i128 {
        match self.materialize() {
            Some((lb, ub)) => ub - lb + 1,
            None => 0,
        }
    }

    /// Returns `true` if `value` (read as a `width`-bit pattern) is in the concretization.
    #[must_use]
    pub const fn contains(&self, value: i128) -> bool {
        let value = self.width.wrap(value);
        match self.materialize() {
            Some((lb, ub)) => lb <= value && value <= ub,
            None => false,
        }
    }

    /// Collapses an explicit `[MIN, MAX]` interval into Top.
    ///
    /// This canonicalization only exists for presentation and comparison with other
    /// analyses; transfer functions never apply it.
    #[must_use]
    pub fn normalized(&self) -> Self {
        match self.bounds {
            Bounds::Interval { lb, ub }
                if lb == self.width.signed_min() && ub == self.width.signed_max() =>
            {
                Self::top(self.width)
            }
            _ => *self,
        }
    }

    /// Ensures `other` has the same bit-width as `self`.
    pub(crate) fn check_width(&self, other: &Self) -> Result<()> {
        if self.width == other.width {
            Ok(())
        } else {
            Err(width_mismatch!(self.width, other.width))
        }
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.width, self)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            Bounds::Bottom => write!(f, "⊥"),
            Bounds::Top => write!(f, "⊤"),
            Bounds::Interval { lb, ub } if lb == ub => write!(f, "{lb}"),
            Bounds::Interval { lb, ub } => write!(f, "[{lb}, {ub}]"),
        }
    }
}
