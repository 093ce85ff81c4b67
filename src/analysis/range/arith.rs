//! Arithmetic transfer functions.
//!
//! Every function receives the bounds of two concrete operands of the same width and
//! evaluates the operation on them in exact 128-bit arithmetic. A signed result outside
//! the representable range means the operation may overflow; the result is then Top with
//! the overflow flag raised, never a wrapped pair of bounds.
//!
//! Division and remainder drop zero from the divisor. A divisor of exactly `{0}` makes the
//! operation unreachable and yields Bottom.

use crate::analysis::range::{
    pole::{hull, signed_from_unsigned, unsigned_pieces},
    transfer::TransferResult,
    BitWidth,
};

type Bounds = (i128, i128);

/// `[a, b] + [c, d] = [a + c, b + d]`
pub(super) fn add(width: BitWidth, (a, b): Bounds, (c, d): Bounds) -> TransferResult {
    TransferResult::exact(width, a + c, b + d)
}

/// `[a, b] - [c, d] = [a - d, b - c]`
pub(super) fn sub(width: BitWidth, (a, b): Bounds, (c, d): Bounds) -> TransferResult {
    TransferResult::exact(width, a - d, b - c)
}

/// Product bounds are attained at the corners of the operand box, whatever the signs.
pub(super) fn mul(width: BitWidth, (a, b): Bounds, (c, d): Bounds) -> TransferResult {
    let (lo, hi) = corner_bounds([a * c, a * d, b * c, b * d]);
    TransferResult::exact(width, lo, hi)
}

/// Signed division, truncating toward zero.
///
/// The divisor is split into its negative and positive parts. On each part the sign of
/// the divisor is fixed, the quotient is monotone in both operands and its extremes sit at
/// the corners. `MIN / -1` leaves the range and yields Top.
pub(super) fn sdiv(width: BitWidth, (a, b): Bounds, divisor: Bounds) -> TransferResult {
    let parts = divisor_parts(divisor).map(|(c, d)| corner_bounds([a / c, a / d, b / c, b / d]));
    match hull(parts) {
        Some((lo, hi)) => TransferResult::exact(width, lo, hi),
        None => TransferResult::bottom(width),
    }
}

/// Unsigned division on the north-pole-free pieces of both operands.
pub(super) fn udiv(width: BitWidth, (a, b): Bounds, (c, d): Bounds) -> TransferResult {
    let mut parts = Vec::new();
    for &(p, q) in &unsigned_pieces(width, a, b) {
        for &(r, s) in &unsigned_pieces(width, c, d) {
            let r = r.max(1);
            if r > s {
                continue;
            }
            parts.push(signed_from_unsigned(width, p / s, q / r));
        }
    }
    TransferResult::from_pieces(width, parts)
}

/// Signed remainder. The result takes the sign of the dividend and its magnitude is
/// below both the magnitude of the dividend and that of the divisor.
pub(super) fn srem(width: BitWidth, (a, b): Bounds, divisor: Bounds) -> TransferResult {
    let mut max_abs = None;
    let mut min_abs = None;
    for (c, d) in divisor_parts(divisor) {
        let (near, far) = if c > 0 { (c, d) } else { (-d, -c) };
        max_abs = Some(max_abs.map_or(far, |m: i128| m.max(far)));
        min_abs = Some(min_abs.map_or(near, |m: i128| m.min(near)));
    }
    let (Some(max_abs), Some(min_abs)) = (max_abs, min_abs) else {
        return TransferResult::bottom(width);
    };

    // Dividend strictly smaller than every divisor: the remainder is the dividend.
    if a.abs().max(b.abs()) < min_abs {
        return TransferResult::exact(width, a, b);
    }

    let limit = max_abs - 1;
    let lo = if a >= 0 { 0 } else { a.max(-limit) };
    let hi = if b <= 0 { 0 } else { b.min(limit) };
    TransferResult::exact(width, lo, hi)
}

/// Unsigned remainder on the north-pole-free pieces of both operands.
pub(super) fn urem(width: BitWidth, (a, b): Bounds, (c, d): Bounds) -> TransferResult {
    let mut parts = Vec::new();
    for &(p, q) in &unsigned_pieces(width, a, b) {
        for &(r, s) in &unsigned_pieces(width, c, d) {
            let r = r.max(1);
            if r > s {
                continue;
            }
            let piece = if q < r { (p, q) } else { (0, q.min(s - 1)) };
            parts.push(signed_from_unsigned(width, piece.0, piece.1));
        }
    }
    TransferResult::from_pieces(width, parts)
}

/// The negative and positive parts of a divisor, zero excluded.
fn divisor_parts((c, d): Bounds) -> impl Iterator<Item = Bounds> {
    let negative = (c <= -1).then(|| (c, d.min(-1)));
    let positive = (d >= 1).then(|| (c.max(1), d));
    negative.into_iter().chain(positive)
}

fn corner_bounds(corners: [i128; 4]) -> Bounds {
    corners
        .into_iter()
        .fold((i128::MAX, i128::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w8() -> BitWidth {
        BitWidth::new(8).unwrap()
    }

    fn bounds(result: &TransferResult) -> Option<Bounds> {
        result.range.bounds()
    }

    #[test]
    fn test_add() {
        let r = add(w8(), (1, 5), (2, 3));
        assert_eq!(bounds(&r), Some((3, 8)));
        assert!(!r.overflow);

        let r = add(w8(), (120, 125), (10, 10));
        assert!(r.overflow);
        assert!(r.range.is_top());

        let r = add(w8(), (-128, -120), (-10, 0));
        assert!(r.overflow);
    }

    #[test]
    fn test_sub() {
        assert_eq!(bounds(&sub(w8(), (1, 5), (2, 3))), Some((-2, 3)));
        assert!(sub(w8(), (-128, 0), (1, 1)).overflow);
        assert_eq!(bounds(&sub(w8(), (0, 0), (-127, 127))), Some((-127, 127)));
    }

    #[test]
    fn test_mul() {
        assert_eq!(bounds(&mul(w8(), (-2, 3), (-1, 4))), Some((-8, 12)));
        assert_eq!(bounds(&mul(w8(), (-5, -2), (-3, -1))), Some((2, 15)));
        assert!(mul(w8(), (10, 20), (10, 10)).overflow);
        assert_eq!(bounds(&mul(w8(), (-128, -128), (1, 1))), Some((-128, -128)));
    }

    #[test]
    fn test_sdiv() {
        assert_eq!(bounds(&sdiv(w8(), (10, 20), (2, 5))), Some((2, 10)));
        assert_eq!(bounds(&sdiv(w8(), (10, 20), (-5, -2))), Some((-10, -2)));
        // Zero is dropped from the divisor
        assert_eq!(bounds(&sdiv(w8(), (10, 20), (-1, 1))), Some((-20, 20)));
        assert_eq!(bounds(&sdiv(w8(), (-7, 7), (0, 2))), Some((-7, 7)));
        assert!(sdiv(w8(), (1, 2), (0, 0)).range.is_bottom());
        // MIN / -1
        assert!(sdiv(w8(), (-128, -128), (-1, -1)).overflow);
    }

    #[test]
    fn test_udiv() {
        assert_eq!(bounds(&udiv(w8(), (10, 20), (2, 5))), Some((2, 10)));
        // -2 is 254 unsigned
        assert_eq!(bounds(&udiv(w8(), (-2, -2), (2, 2))), Some((127, 127)));
        assert!(udiv(w8(), (5, 6), (0, 0)).range.is_bottom());
        // Dividing the all-ones pattern by one keeps it negative
        assert_eq!(bounds(&udiv(w8(), (-1, -1), (0, 1))), Some((-1, -1)));
    }

    #[test]
    fn test_srem() {
        assert_eq!(bounds(&srem(w8(), (0, 100), (10, 10))), Some((0, 9)));
        assert_eq!(bounds(&srem(w8(), (-100, 100), (-10, 10))), Some((-9, 9)));
        assert_eq!(bounds(&srem(w8(), (-3, 3), (10, 20))), Some((-3, 3)));
        assert_eq!(bounds(&srem(w8(), (-100, -50), (7, 7))), Some((-6, 0)));
        assert!(srem(w8(), (1, 2), (0, 0)).range.is_bottom());
        assert_eq!(bounds(&srem(w8(), (-128, -128), (-1, -1))), Some((0, 0)));
    }

    #[test]
    fn test_urem() {
        assert_eq!(bounds(&urem(w8(), (0, 100), (10, 10))), Some((0, 9)));
        assert_eq!(bounds(&urem(w8(), (3, 5), (10, 20))), Some((3, 5)));
        // 255 % 10 = 5, 254 % 10 = 4 ... bounded by the divisor
        assert_eq!(bounds(&urem(w8(), (-2, -1), (10, 10))), Some((0, 9)));
        assert!(urem(w8(), (1, 2), (0, 0)).range.is_bottom());
    }
}
