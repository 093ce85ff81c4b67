//! Wraparound ("pole") handling.
//!
//! The `2^width` bit patterns of a width form a circle. Two points on it matter:
//!
//! ```text
//!                 north pole
//!          -1 (1..1) | 0 (0..0)
//!               .----+----.
//!             /             \
//!   negative |               | non-negative
//!             \             /
//!               '----+----'
//!          MIN (10..0) | MAX (01..1)
//!                 south pole
//! ```
//!
//! The south pole is where the signed reading wraps (MAX to MIN), the north pole is where
//! the unsigned reading wraps (all-ones to zero). Bounds are stored signed, so a stored
//! interval never crosses the south pole, but it crosses the north pole whenever it
//! contains both `-1` and `0`. Every unsigned operation first splits such an interval
//! into its at most two north-pole-free pieces, evaluates on the pieces in the unsigned
//! reading, and maps the results back, giving up when a result would cross the south pole.

use crate::analysis::range::{BitWidth, Range};

/// Returns `true` if the arc from bit pattern `lo` to bit pattern `hi`, walked in
/// increasing modular order, passes from MAX to MIN.
pub(super) fn arc_crosses_south_pole(width: BitWidth, lo: i128, hi: i128) -> bool {
    let half = width.signed_max() + 1;
    if lo <= hi {
        lo < half && hi >= half
    } else {
        lo < half || hi >= half
    }
}

/// Returns `true` if the arc from bit pattern `lo` to bit pattern `hi`, walked in
/// increasing modular order, passes from all-ones to zero.
pub(super) fn arc_crosses_north_pole(lo: i128, hi: i128) -> bool {
    lo > hi
}

/// Splits a signed-stored interval into its unsigned pieces.
///
/// Each returned pair is contiguous and ordered in the unsigned reading.
pub(super) fn unsigned_pieces(width: BitWidth, lb: i128, ub: i128) -> Vec<(i128, i128)> {
    if lb >= 0 || ub < 0 {
        vec![(width.to_unsigned(lb), width.to_unsigned(ub))]
    } else {
        vec![(0, ub), (width.to_unsigned(lb), width.unsigned_max())]
    }
}

/// Maps an unsigned interval back to signed storage.
///
/// Returns `None` if the interval crosses the south pole and so has no signed
/// representation narrower than the full range.
pub(super) fn signed_from_unsigned(width: BitWidth, lo: i128, hi: i128) -> Option<(i128, i128)> {
    if arc_crosses_south_pole(width, lo, hi) {
        return None;
    }
    Some((width.to_signed(lo), width.to_signed(hi)))
}

/// Convex hull of a sequence of intervals; `None` if the sequence is empty.
pub(super) fn hull<I>(pieces: I) -> Option<(i128, i128)>
where
    I: IntoIterator<Item = (i128, i128)>,
{
    pieces
        .into_iter()
        .reduce(|(a, b), (c, d)| (a.min(c), b.max(d)))
}

/// `[a, b] ≤u [c, d]` may hold, for intervals not crossing the north pole.
pub(super) fn comparison_ule_no_pole(a: i128, _b: i128, _c: i128, d: i128) -> bool {
    a <= d
}

/// `[a, b] <u [c, d]` may hold, for intervals not crossing the north pole.
pub(super) fn comparison_ult_no_pole(a: i128, _b: i128, _c: i128, d: i128) -> bool {
    a < d
}

impl Range {
    /// Returns `true` if walking from the lower to the upper bound passes from MAX to MIN.
    ///
    /// Top covers the whole circle and crosses both poles. A bounded interval is stored
    /// in the signed reading and therefore never crosses the south pole.
    #[must_use]
    pub fn is_crossing_south_pole(&self) -> bool {
        if self.is_top() {
            return true;
        }
        match self.bounds() {
            Some((lb, ub)) => arc_crosses_south_pole(
                self.width,
                self.width.to_unsigned(lb),
                self.width.to_unsigned(ub),
            ),
            None => false,
        }
    }

    /// Returns `true` if walking from the lower to the upper bound passes from all-ones
    /// to zero, i.e. the interval contains both `-1` and `0`.
    #[must_use]
    pub fn is_crossing_north_pole(&self) -> bool {
        if self.is_top() {
            return true;
        }
        match self.bounds() {
            Some((lb, ub)) => {
                arc_crosses_north_pole(self.width.to_unsigned(lb), self.width.to_unsigned(ub))
            }
            None => false,
        }
    }
}
