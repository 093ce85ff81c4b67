//! Transfer functions of the interval domain.
//!
//! [`apply_checked`] evaluates a binary instruction on two intervals of the same width and
//! [`apply_cast`] evaluates a width change. Both follow the same skeleton:
//!
//! 1. a Bottom operand makes the instruction unreachable and yields Bottom
//! 2. a Top operand yields Top without further work
//! 3. otherwise the operation is evaluated on the bounds in exact arithmetic; a result
//!    that does not fit the signed range of the width is reported as overflow and
//!    collapses to Top
//!
//! Results are never wrapped. A wrapped pair of bounds would describe a range crossing
//! the south pole, which the signed representation cannot express.

use log::trace;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    analysis::{
        range::{
            arith, bitwise,
            cast::{sign_extend, truncate, zero_extend},
            pole::hull,
            BitWidth, Range, Signedness,
        },
        TBool,
    },
    Error, Result,
};

/// Binary integer instruction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum BinaryOp {
    /// Wrapping addition
    Add,
    /// Wrapping subtraction
    Sub,
    /// Wrapping multiplication
    Mul,
    /// Signed division, truncating toward zero
    SDiv,
    /// Unsigned division
    UDiv,
    /// Signed remainder, with the sign of the dividend
    SRem,
    /// Unsigned remainder
    URem,
    /// Bitwise and
    And,
    /// Bitwise or
    Or,
    /// Bitwise exclusive or
    Xor,
    /// Shift left
    Shl,
    /// Logical (zero-filling) shift right
    LShr,
    /// Arithmetic (sign-filling) shift right
    AShr,
}

impl BinaryOp {
    /// Returns `true` for additive, multiplicative, division and remainder operations.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::SDiv | Self::UDiv | Self::SRem | Self::URem
        )
    }

    /// Returns `true` for logical and shift operations.
    #[must_use]
    pub const fn is_bitwise(self) -> bool {
        !self.is_arithmetic()
    }

    /// Evaluates the instruction on two concrete `width`-bit values with wraparound.
    ///
    /// Both operands are read as `width`-bit patterns. Returns `None` where the
    /// instruction has no defined result: division or remainder by zero and shift
    /// amounts outside `[0, width)`.
    #[must_use]
    pub fn evaluate(self, width: BitWidth, lhs: i128, rhs: i128) -> Option<i128> {
        let (l, r) = (width.wrap(lhs), width.wrap(rhs));
        let (lu, ru) = (width.to_unsigned(l), width.to_unsigned(r));
        let shift = (0..i128::from(width.bits())).contains(&r);
        let value = match self {
            Self::Add => l + r,
            Self::Sub => l - r,
            Self::Mul => l * r,
            Self::SDiv if r != 0 => l / r,
            Self::UDiv if r != 0 => lu / ru,
            Self::SRem if r != 0 => l % r,
            Self::URem if r != 0 => lu % ru,
            Self::SDiv | Self::UDiv | Self::SRem | Self::URem => return None,
            Self::And => l & r,
            Self::Or => l | r,
            Self::Xor => l ^ r,
            Self::Shl if shift => l << r,
            Self::LShr if shift => lu >> r,
            Self::AShr if shift => l >> r,
            Self::Shl | Self::LShr | Self::AShr => return None,
        };
        Some(width.wrap(value))
    }
}

/// Width-changing cast.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum CastKind {
    /// Keep the low bits
    Trunc,
    /// Sign extension
    SExt,
    /// Zero extension
    ZExt,
}

impl CastKind {
    /// The extension kind for a sign- or zero-extending instruction.
    #[must_use]
    pub const fn extension(is_sign_extend: bool) -> Self {
        if is_sign_extend {
            Self::SExt
        } else {
            Self::ZExt
        }
    }

    /// Returns `true` if a cast of this kind from `from` to `to` is well-formed.
    ///
    /// Truncation must narrow and extensions must widen.
    #[must_use]
    pub fn accepts(self, from: BitWidth, to: BitWidth) -> bool {
        match self {
            Self::Trunc => to < from,
            Self::SExt | Self::ZExt => to > from,
        }
    }
}

/// Outcome of a transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferResult {
    /// Abstract result of the instruction.
    pub range: Range,
    /// `true` if the exact result left the signed range of the width, in which case
    /// `range` is Top.
    pub overflow: bool,
}

impl TransferResult {
    /// `[lb, ub]` if both bounds fit the width, Top with the overflow flag otherwise.
    pub(super) fn exact(width: BitWidth, lb: i128, ub: i128) -> Self {
        if width.fits(lb) && width.fits(ub) {
            Self {
                range: Range::interval(width, lb, ub),
                overflow: false,
            }
        } else {
            Self {
                range: Range::top(width),
                overflow: true,
            }
        }
    }

    pub(super) const fn top(width: BitWidth) -> Self {
        Self {
            range: Range::top(width),
            overflow: false,
        }
    }

    pub(super) const fn bottom(width: BitWidth) -> Self {
        Self {
            range: Range::bottom(width),
            overflow: false,
        }
    }

    /// Joins per-piece results. A piece without signed representation makes the whole
    /// result Top; no pieces at all means the operation is unreachable.
    pub(super) fn from_pieces(width: BitWidth, pieces: Vec<Option<(i128, i128)>>) -> Self {
        match pieces.into_iter().collect::<Option<Vec<_>>>() {
            Some(pieces) => Self {
                range: Range::from_hull(width, hull(pieces)),
                overflow: false,
            },
            None => Self::top(width),
        }
    }
}

/// Abstract transfer function of a binary instruction, reporting overflow.
///
/// # Errors
///
/// Returns [`Error::WidthMismatch`] if the operand widths differ.
///
/// # Examples
///
/// ```rust
/// use intrange::analysis::{apply_checked, BinaryOp, BitWidth, Range};
///
/// let w8 = BitWidth::new(8)?;
/// let x = Range::bounded(0, 10, w8)?;
/// let result = apply_checked(BinaryOp::Sub, &x, &Range::constant(3, w8))?;
/// assert_eq!(result.range.bounds(), Some((-3, 7)));
/// assert!(!result.overflow);
/// # Ok::<(), intrange::Error>(())
/// ```
pub fn apply_checked(op: BinaryOp, lhs: &Range, rhs: &Range) -> Result<TransferResult> {
    lhs.check_width(rhs)?;
    let width = lhs.width();

    let (Some(x), Some(y)) = (lhs.bounds(), rhs.bounds()) else {
        if lhs.is_bottom() || rhs.is_bottom() {
            return Ok(TransferResult::bottom(width));
        }
        return Ok(TransferResult::top(width));
    };

    let result = match op {
        BinaryOp::Add => arith::add(width, x, y),
        BinaryOp::Sub => arith::sub(width, x, y),
        BinaryOp::Mul => arith::mul(width, x, y),
        BinaryOp::SDiv => arith::sdiv(width, x, y),
        BinaryOp::UDiv => arith::udiv(width, x, y),
        BinaryOp::SRem => arith::srem(width, x, y),
        BinaryOp::URem => arith::urem(width, x, y),
        BinaryOp::And => bitwise::signed_and(width, x, y),
        BinaryOp::Or => bitwise::signed_or(width, x, y),
        BinaryOp::Xor => bitwise::signed_xor(width, x, y),
        BinaryOp::Shl => bitwise::shl(width, x, y),
        BinaryOp::LShr => bitwise::lshr(width, x, y),
        BinaryOp::AShr => bitwise::ashr(width, x, y),
    };

    if result.overflow {
        trace!("{op} {lhs:?}, {rhs:?}: overflow, result is top");
    }
    Ok(result)
}

/// Abstract transfer function of a binary instruction.
///
/// # Errors
///
/// Returns [`Error::WidthMismatch`] if the operand widths differ.
pub fn apply(op: BinaryOp, lhs: &Range, rhs: &Range) -> Result<Range> {
    apply_checked(op, lhs, rhs).map(|result| result.range)
}

/// Abstract transfer function of a cast to `target` bits.
///
/// `hint` is a three-valued boolean already known for the source, for instance from a
/// preceding comparison. It is intersected with the source range, so a definite hint
/// makes a one-bit source exact.
///
/// Extending Top yields the full range of the source width at the target width;
/// truncating Top yields Top.
///
/// # Errors
///
/// Returns [`Error::InvalidCast`] if truncation does not narrow or an extension does not
/// widen.
///
/// # Examples
///
/// ```rust
/// use intrange::analysis::{apply_cast, BitWidth, CastKind, Range, TBool};
///
/// let (w1, w32) = (BitWidth::new(1)?, BitWidth::new(32)?);
/// let flag = Range::top(w1);
/// let widened = apply_cast(CastKind::ZExt, &flag, w32, Some(TBool::True))?;
/// assert_eq!(widened.as_constant(), Some(1));
/// # Ok::<(), intrange::Error>(())
/// ```
pub fn apply_cast(
    kind: CastKind,
    src: &Range,
    target: BitWidth,
    hint: Option<TBool>,
) -> Result<Range> {
    apply_cast_checked(kind, src, target, hint).map(|result| result.range)
}

/// Like [`apply_cast`], also reporting whether truncation overflowed.
///
/// # Errors
///
/// Returns [`Error::InvalidCast`] if truncation does not narrow or an extension does not
/// widen.
pub fn apply_cast_checked(
    kind: CastKind,
    src: &Range,
    target: BitWidth,
    hint: Option<TBool>,
) -> Result<TransferResult> {
    let from = src.width();
    if !kind.accepts(from, target) {
        return Err(Error::InvalidCast {
            kind: kind.into(),
            from: from.bits(),
            to: target.bits(),
        });
    }

    let src = match hint {
        Some(hint) => src.meet(&Range::from_tbool(hint, from, Signedness::Signed)?)?,
        None => *src,
    };

    Ok(match kind {
        CastKind::Trunc => truncate(&src, target),
        CastKind::SExt => sign_extend(&src, target),
        CastKind::ZExt => zero_extend(&src, target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn w(bits: u32) -> BitWidth {
        BitWidth::new(bits).unwrap()
    }

    fn r(lb: i128, ub: i128) -> Range {
        Range::bounded(lb, ub, w(8)).unwrap()
    }

    #[test]
    fn test_binary_op_names() {
        assert_eq!(BinaryOp::SDiv.to_string(), "sdiv");
        assert_eq!("lshr".parse::<BinaryOp>().unwrap(), BinaryOp::LShr);
        assert_eq!(BinaryOp::iter().filter(|op| op.is_arithmetic()).count(), 7);
        assert_eq!(BinaryOp::iter().filter(|op| op.is_bitwise()).count(), 6);
        assert_eq!(CastKind::extension(true), CastKind::SExt);
        assert_eq!(CastKind::extension(false), CastKind::ZExt);
    }

    #[test]
    fn test_evaluate_concrete() {
        let w8 = w(8);
        assert_eq!(BinaryOp::Add.evaluate(w8, 127, 1), Some(-128));
        assert_eq!(BinaryOp::UDiv.evaluate(w8, -2, 2), Some(127));
        assert_eq!(BinaryOp::SRem.evaluate(w8, -7, 3), Some(-1));
        assert_eq!(BinaryOp::URem.evaluate(w8, 5, 0), None);
        assert_eq!(BinaryOp::LShr.evaluate(w8, -1, 4), Some(15));
        assert_eq!(BinaryOp::AShr.evaluate(w8, -16, 2), Some(-4));
        assert_eq!(BinaryOp::Shl.evaluate(w8, 1, 8), None);
        assert_eq!(BinaryOp::Shl.evaluate(w8, 64, 1), Some(-128));
    }

    #[test]
    fn test_bottom_and_top_operands() {
        let w8 = w(8);
        for op in BinaryOp::iter() {
            let result = apply_checked(op, &Range::bottom(w8), &r(1, 2)).unwrap();
            assert!(result.range.is_bottom(), "{op}");
            assert!(apply(op, &Range::top(w8), &Range::bottom(w8))
                .unwrap()
                .is_bottom());
            let result = apply_checked(op, &Range::top(w8), &r(1, 2)).unwrap();
            assert!(result.range.is_top(), "{op}");
            assert!(!result.overflow);
        }
    }

    #[test]
    fn test_full_range_is_not_top() {
        // An explicit [MIN, MAX] operand is evaluated normally
        let full = Range::full(w(8));
        let masked = apply(BinaryOp::And, &full, &r(0, 7)).unwrap();
        assert_eq!(masked.bounds(), Some((0, 7)));

        let result = apply_checked(BinaryOp::Add, &full, &r(1, 1)).unwrap();
        assert!(result.overflow);
        assert!(result.range.is_top());
    }

    #[test]
    fn test_width_mismatch() {
        let wide = Range::top(w(16));
        assert_eq!(
            apply(BinaryOp::Add, &r(0, 1), &wide),
            Err(Error::WidthMismatch {
                expected: 8,
                found: 16
            })
        );
    }

    #[test]
    fn test_apply_cast() {
        let src = Range::bounded(-5, 5, w(32)).unwrap();
        let narrow = apply_cast(CastKind::Trunc, &src, w(8), None).unwrap();
        assert_eq!(narrow.bounds(), Some((-5, 5)));

        let wide = apply_cast(CastKind::SExt, &r(-3, 3), w(64), None).unwrap();
        assert_eq!(wide.bounds(), Some((-3, 3)));

        let wide_src = Range::bounded(0, 1000, w(32)).unwrap();
        let result = apply_cast_checked(CastKind::Trunc, &wide_src, w(8), None).unwrap();
        assert!(result.overflow);

        assert!(apply_cast(CastKind::ZExt, &Range::bottom(w(8)), w(16), None)
            .unwrap()
            .is_bottom());
    }

    #[test]
    fn test_apply_cast_invalid() {
        assert_eq!(
            apply_cast(CastKind::Trunc, &r(0, 1), w(16), None),
            Err(Error::InvalidCast {
                kind: "trunc",
                from: 8,
                to: 16
            })
        );
        assert_eq!(
            apply_cast(CastKind::SExt, &r(0, 1), w(8), None),
            Err(Error::InvalidCast {
                kind: "sext",
                from: 8,
                to: 8
            })
        );
    }

    #[test]
    fn test_apply_cast_with_hint() {
        let (w1, w8) = (w(1), w(8));
        let flag = Range::top(w1);

        let t = apply_cast(CastKind::ZExt, &flag, w8, Some(TBool::True)).unwrap();
        assert_eq!(t.as_constant(), Some(1));
        let t = apply_cast(CastKind::SExt, &flag, w8, Some(TBool::True)).unwrap();
        assert_eq!(t.as_constant(), Some(-1));
        let f = apply_cast(CastKind::ZExt, &flag, w8, Some(TBool::False)).unwrap();
        assert_eq!(f.as_constant(), Some(0));
        let u = apply_cast(CastKind::ZExt, &flag, w8, Some(TBool::Unknown)).unwrap();
        assert_eq!(u.bounds(), Some((0, 1)));

        // A hint contradicting the source makes the cast unreachable
        let zero = Range::constant(0, w1);
        let none = apply_cast(CastKind::ZExt, &zero, w8, Some(TBool::True)).unwrap();
        assert!(none.is_bottom());
    }
}
