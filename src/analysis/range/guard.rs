//! Guard filtering.
//!
//! When a branch is taken, its condition is known to hold. Filtering narrows the
//! intervals of the compared operands to the values for which the comparison can hold,
//! or proves the branch unreachable (both operands Bottom).
//!
//! # Core Rule
//!
//! For intervals that do not wrap in the reading of the comparison, `[a, b] ≤ [c, d]` can
//! hold only if `a ≤ d`, and then the left upper bound tightens to `min(b, d)` and the
//! right lower bound to `max(a, c)`. Strict comparisons use `a < d`, `min(b, d - 1)` and
//! `max(a + 1, c)`.
//!
//! Signed comparisons apply the rule directly, as stored intervals never cross the south
//! pole. Unsigned comparisons first split each operand at the north pole and apply the rule
//! to every pair of pieces; applying it to an interval containing both `-1` and `0` would
//! drop feasible values.

use strum::{Display, EnumIter, EnumString};

use crate::{
    analysis::{
        range::{
            pole::{comparison_ule_no_pole, comparison_ult_no_pole, hull, unsigned_pieces},
            BitWidth, Range,
        },
        TBool,
    },
    Result,
};

/// Integer comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CmpPredicate {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Signed less than.
    Slt,
    /// Signed less or equal.
    Sle,
    /// Signed greater than.
    Sgt,
    /// Signed greater or equal.
    Sge,
    /// Unsigned less than.
    Ult,
    /// Unsigned less or equal.
    Ule,
    /// Unsigned greater than.
    Ugt,
    /// Unsigned greater or equal.
    Uge,
}

impl CmpPredicate {
    /// The predicate with its operands exchanged: `a OP b` iff `b OP.swapped() a`.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
            Self::Slt => Self::Sgt,
            Self::Sle => Self::Sge,
            Self::Sgt => Self::Slt,
            Self::Sge => Self::Sle,
            Self::Ult => Self::Ugt,
            Self::Ule => Self::Uge,
            Self::Ugt => Self::Ult,
            Self::Uge => Self::Ule,
        }
    }

    /// The negated predicate, which holds on the other branch.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Eq => Self::Ne,
            Self::Ne => Self::Eq,
            Self::Slt => Self::Sge,
            Self::Sle => Self::Sgt,
            Self::Sgt => Self::Sle,
            Self::Sge => Self::Slt,
            Self::Ult => Self::Uge,
            Self::Ule => Self::Ugt,
            Self::Ugt => Self::Ule,
            Self::Uge => Self::Ult,
        }
    }

    /// Returns `true` for the predicates reading their operands as unsigned.
    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::Ult | Self::Ule | Self::Ugt | Self::Uge)
    }

    /// Evaluates the predicate on two concrete signed-stored values of `width`.
    #[must_use]
    pub const fn evaluate(self, width: BitWidth, lhs: i128, rhs: i128) -> bool {
        let (ul, ur) = (width.to_unsigned(lhs), width.to_unsigned(rhs));
        match self {
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Slt => lhs < rhs,
            Self::Sle => lhs <= rhs,
            Self::Sgt => lhs > rhs,
            Self::Sge => lhs >= rhs,
            Self::Ult => ul < ur,
            Self::Ule => ul <= ur,
            Self::Ugt => ul > ur,
            Self::Uge => ul >= ur,
        }
    }
}

/// Right-hand side of a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOperand<'a> {
    /// Another variable; both sides are narrowed.
    Var(&'a Range),
    /// An integer constant at the width of the left operand; only the left side is
    /// narrowed.
    Const(i128),
}

/// Narrows `left` and `right` to the values for which `left pred right` can hold.
///
/// Returns the narrowed left operand and the narrowed right operand. For a constant
/// right-hand side the second element is the constant itself. If the comparison can
/// never hold, both elements are Bottom.
///
/// # Errors
///
/// Returns [`crate::Error::WidthMismatch`] if the operand widths differ.
///
/// # Examples
///
/// ```rust
/// use intrange::analysis::{filter, BitWidth, CmpPredicate, GuardOperand, Range};
///
/// let w8 = BitWidth::new(8)?;
/// let x = Range::bounded(0, 100, w8)?;
/// let y = Range::bounded(20, 50, w8)?;
///
/// let (x2, y2) = filter(CmpPredicate::Sle, &x, GuardOperand::Var(&y))?;
/// assert_eq!(x2.bounds(), Some((0, 50)));
/// assert_eq!(y2.bounds(), Some((20, 50)));
/// # Ok::<(), intrange::Error>(())
/// ```
pub fn filter(pred: CmpPredicate, left: &Range, right: GuardOperand<'_>) -> Result<(Range, Range)> {
    match right {
        GuardOperand::Var(right) => filter_two_vars(pred, left, right),
        GuardOperand::Const(value) => filter_var_and_const(pred, left, value),
    }
}

fn filter_var_and_const(pred: CmpPredicate, var: &Range, value: i128) -> Result<(Range, Range)> {
    let constant = Range::constant(value, var.width());
    let (narrowed, _) = filter_two_vars(pred, var, &constant)?;
    if narrowed.is_bottom() {
        return Ok((narrowed, Range::bottom(var.width())));
    }
    Ok((narrowed, constant))
}

fn filter_two_vars(pred: CmpPredicate, left: &Range, right: &Range) -> Result<(Range, Range)> {
    left.check_width(right)?;
    let width = left.width();
    let unreachable = (Range::bottom(width), Range::bottom(width));

    let (Some((a, b)), Some((c, d))) = (left.materialize(), right.materialize()) else {
        return Ok(unreachable);
    };

    let narrowed = match pred {
        CmpPredicate::Eq => {
            let both = left.meet(right)?;
            return Ok((both, both));
        }
        CmpPredicate::Ne => return Ok(filter_ne(left, right)),
        CmpPredicate::Sgt | CmpPredicate::Sge | CmpPredicate::Ugt | CmpPredicate::Uge => {
            let (narrowed_right, narrowed_left) = filter_two_vars(pred.swapped(), right, left)?;
            return Ok((narrowed_left, narrowed_right));
        }
        CmpPredicate::Slt => narrow_le((a, b), (c, d), true),
        CmpPredicate::Sle => narrow_le((a, b), (c, d), false),
        CmpPredicate::Ult => narrow_unsigned(width, (a, b), (c, d), true),
        CmpPredicate::Ule => narrow_unsigned(width, (a, b), (c, d), false),
    };

    Ok(match narrowed {
        Some((left_hull, right_hull)) => (rebuild(left, left_hull), rebuild(right, right_hull)),
        None => unreachable,
    })
}

/// Core rule on two intervals that do not wrap in the reading being compared.
fn narrow_le(
    (a, b): (i128, i128),
    (c, d): (i128, i128),
    strict: bool,
) -> Option<((i128, i128), (i128, i128))> {
    if strict {
        if !comparison_ult_no_pole(a, b, c, d) {
            return None;
        }
        Some(((a, b.min(d - 1)), (c.max(a + 1), d)))
    } else {
        if !comparison_ule_no_pole(a, b, c, d) {
            return None;
        }
        Some(((a, b.min(d)), (c.max(a), d)))
    }
}

/// Core rule applied to every pair of north-pole-free pieces.
fn narrow_unsigned(
    width: BitWidth,
    (a, b): (i128, i128),
    (c, d): (i128, i128),
    strict: bool,
) -> Option<((i128, i128), (i128, i128))> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for &piece_left in &unsigned_pieces(width, a, b) {
        for &piece_right in &unsigned_pieces(width, c, d) {
            if let Some((l, r)) = narrow_le(piece_left, piece_right, strict) {
                left.push(l);
                right.push(r);
            }
        }
    }

    // Each piece lies within one half of the circle, so the signed reading of its
    // bounds stays ordered.
    let to_signed = |(lo, hi): (i128, i128)| (width.to_signed(lo), width.to_signed(hi));
    let left = hull(left.into_iter().map(to_signed))?;
    let right = hull(right.into_iter().map(to_signed))?;
    Some((left, right))
}

fn filter_ne(left: &Range, right: &Range) -> (Range, Range) {
    let width = left.width();
    let narrowed_left = trim_constant(left, right);
    let narrowed_right = trim_constant(right, left);
    if narrowed_left.is_bottom() || narrowed_right.is_bottom() {
        return (Range::bottom(width), Range::bottom(width));
    }
    (narrowed_left, narrowed_right)
}

/// Removes the value of a singleton `other` from `side` when it sits on a bound.
fn trim_constant(side: &Range, other: &Range) -> Range {
    let (Some(k), Some((lb, ub))) = (other.as_constant(), side.materialize()) else {
        return *side;
    };
    let width = side.width();
    if lb == k && ub == k {
        Range::bottom(width)
    } else if lb == k {
        Range::interval(width, lb + 1, ub)
    } else if ub == k {
        Range::interval(width, lb, ub - 1)
    } else {
        *side
    }
}

/// Rebuilds an operand from narrowed bounds, keeping it untouched when nothing changed.
fn rebuild(original: &Range, (lb, ub): (i128, i128)) -> Range {
    if original.materialize() == Some((lb, ub)) {
        *original
    } else {
        Range::interval(original.width(), lb, ub)
    }
}

impl Range {
    /// Evaluates the guard `self pred other`.
    ///
    /// Returns [`TBool::True`] if it holds for every pair of values, [`TBool::False`] if
    /// it holds for none, and [`TBool::Unknown`] otherwise (including Bottom operands).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WidthMismatch`] if the widths differ.
    pub fn compare(&self, pred: CmpPredicate, other: &Self) -> Result<TBool> {
        self.check_width(other)?;
        if self.is_bottom() || other.is_bottom() {
            return Ok(TBool::Unknown);
        }
        let (may_hold, _) = filter_two_vars(pred, self, other)?;
        if may_hold.is_bottom() {
            return Ok(TBool::False);
        }
        let (may_fail, _) = filter_two_vars(pred.inverse(), self, other)?;
        if may_fail.is_bottom() {
            return Ok(TBool::True);
        }
        Ok(TBool::Unknown)
    }
}
