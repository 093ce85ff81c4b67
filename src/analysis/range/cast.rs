//! Cast transfer functions.
//!
//! Casts change the width of a value. Sign extension preserves the signed reading and
//! zero extension the unsigned one, so both map an interval to an interval of the wider
//! width. Truncation keeps the low bits: it is exact when the truncated bit patterns form
//! an arc that does not cross the south pole of the narrower width, and Top otherwise.

use log::trace;

use crate::analysis::range::{
    pole::arc_crosses_south_pole, transfer::TransferResult, BitWidth, Range,
};

/// Returns `true` if truncating `src` to `target` does not yield a signed interval.
///
/// That is the case when the source spans more than `2^target` values, so that two
/// of them share a truncated bit pattern, or when the truncated patterns wrap from
/// MAX to MIN of the target width.
pub(super) fn is_truncate_overflow(src: &Range, target: BitWidth) -> bool {
    let Some((lb, ub)) = src.materialize() else {
        return false;
    };
    if ub - lb + 1 > target.modulus() {
        return true;
    }
    let lo = lb.rem_euclid(target.modulus());
    let hi = ub.rem_euclid(target.modulus());
    arc_crosses_south_pole(target, lo, hi)
}

pub(super) fn truncate(src: &Range, target: BitWidth) -> TransferResult {
    let Some((lb, ub)) = src.materialize() else {
        return TransferResult::bottom(target);
    };
    if src.is_top() {
        return TransferResult::top(target);
    }
    if is_truncate_overflow(src, target) {
        trace!("trunc {src:?} to {target}: overflow");
        return TransferResult {
            range: Range::top(target),
            overflow: true,
        };
    }
    let lo = target.wrap(lb);
    let hi = target.wrap(ub);
    TransferResult::exact(target, lo, hi)
}

pub(super) fn sign_extend(src: &Range, target: BitWidth) -> TransferResult {
    match src.materialize() {
        Some((lb, ub)) => TransferResult::exact(target, lb, ub),
        None => TransferResult::bottom(target),
    }
}

pub(super) fn zero_extend(src: &Range, target: BitWidth) -> TransferResult {
    let width = src.width();
    match src.materialize() {
        Some((lb, ub)) if lb >= 0 || ub < 0 => {
            TransferResult::exact(target, width.to_unsigned(lb), width.to_unsigned(ub))
        }
        Some(_) => TransferResult::exact(target, 0, width.unsigned_max()),
        None => TransferResult::bottom(target),
    }
}
