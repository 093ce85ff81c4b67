//! Bitwise and shift transfer functions.
//!
//! `and`, `or` and `xor` are evaluated with the unsigned interval bounds from Warren's
//! *Hacker's Delight* (section 4-3). Those bounds require both operands to be unsigned
//! intervals, so each operand is first split at the north pole: every piece then lies in
//! one sign half and is a proper unsigned interval. The result of each pair of pieces lies
//! in a single sign half as well and maps back to signed storage without loss.
//!
//! Shift amounts outside `[0, width)` produce a poison value; such shifts give Top.

use log::trace;

use crate::analysis::range::{
    pole::{signed_from_unsigned, unsigned_pieces},
    transfer::TransferResult,
    BitWidth,
};

type Bounds = (i128, i128);

/// Bitwise `and` of two signed intervals.
pub(super) fn signed_and(width: BitWidth, x: Bounds, y: Bounds) -> TransferResult {
    per_quadrant(width, x, y, |(a, b), (c, d)| {
        (min_and(width, a, b, c, d), max_and(width, a, b, c, d))
    })
}

/// Bitwise `or` of two signed intervals.
pub(super) fn signed_or(width: BitWidth, x: Bounds, y: Bounds) -> TransferResult {
    per_quadrant(width, x, y, |(a, b), (c, d)| {
        (min_or(width, a, b, c, d), max_or(width, a, b, c, d))
    })
}

/// Bitwise `xor` of two signed intervals.
pub(super) fn signed_xor(width: BitWidth, x: Bounds, y: Bounds) -> TransferResult {
    per_quadrant(width, x, y, |(a, b), (c, d)| {
        (min_xor(width, a, b, c, d), max_xor(width, a, b, c, d))
    })
}

fn per_quadrant<F>(width: BitWidth, (a, b): Bounds, (c, d): Bounds, bounds: F) -> TransferResult
where
    F: Fn(Bounds, Bounds) -> Bounds,
{
    let mut parts = Vec::new();
    for &x in &unsigned_pieces(width, a, b) {
        for &y in &unsigned_pieces(width, c, d) {
            let (lo, hi) = bounds(x, y);
            parts.push(signed_from_unsigned(width, lo, hi));
        }
    }
    TransferResult::from_pieces(width, parts)
}

/// Returns `true` if every shift amount in `[c, d]` is defined at `width`.
fn shift_amount_in_range(width: BitWidth, (c, d): Bounds) -> bool {
    c >= 0 && d < i128::from(width.bits())
}

/// `shl`: the shifted value is `x * 2^k`, monotone in both operands for a fixed sign.
pub(super) fn shl(width: BitWidth, (a, b): Bounds, amount: Bounds) -> TransferResult {
    if !shift_amount_in_range(width, amount) {
        trace!("shl by {amount:?} at {width}: shift amount out of range");
        return TransferResult::top(width);
    }
    let (c, d) = amount;
    let corners = [a << c, a << d, b << c, b << d];
    let lo = corners.iter().copied().fold(i128::MAX, i128::min);
    let hi = corners.iter().copied().fold(i128::MIN, i128::max);
    TransferResult::exact(width, lo, hi)
}

/// `lshr`: evaluated on the unsigned pieces, where the shift is monotone.
pub(super) fn lshr(width: BitWidth, (a, b): Bounds, amount: Bounds) -> TransferResult {
    if !shift_amount_in_range(width, amount) {
        trace!("lshr by {amount:?} at {width}: shift amount out of range");
        return TransferResult::top(width);
    }
    let (c, d) = amount;
    let parts = unsigned_pieces(width, a, b)
        .into_iter()
        .map(|(p, q)| signed_from_unsigned(width, p >> d, q >> c))
        .collect();
    TransferResult::from_pieces(width, parts)
}

/// `ashr`: arithmetic shift keeps the sign, so the extremes sit at the corners.
pub(super) fn ashr(width: BitWidth, (a, b): Bounds, amount: Bounds) -> TransferResult {
    if !shift_amount_in_range(width, amount) {
        trace!("ashr by {amount:?} at {width}: shift amount out of range");
        return TransferResult::top(width);
    }
    let (c, d) = amount;
    let lo = (a >> c).min(a >> d);
    let hi = (b >> c).max(b >> d);
    TransferResult::exact(width, lo, hi)
}

// Hacker's Delight bounds. All arguments are unsigned bit patterns of `width` bits with
// `a <= b` and `c <= d`; `m` walks from the most significant bit down.

fn top_bit(width: BitWidth) -> i128 {
    1i128 << (width.bits() - 1)
}

fn min_or(width: BitWidth, mut a: i128, b: i128, mut c: i128, d: i128) -> i128 {
    let mut m = top_bit(width);
    while m != 0 {
        if !a & c & m != 0 {
            let temp = (a | m) & -m;
            if temp <= b {
                a = temp;
                break;
            }
        } else if a & !c & m != 0 {
            let temp = (c | m) & -m;
            if temp <= d {
                c = temp;
                break;
            }
        }
        m >>= 1;
    }
    a | c
}

fn max_or(width: BitWidth, a: i128, mut b: i128, c: i128, mut d: i128) -> i128 {
    let mut m = top_bit(width);
    while m != 0 {
        if b & d & m != 0 {
            let temp = (b - m) | (m - 1);
            if temp >= a {
                b = temp;
                break;
            }
            let temp = (d - m) | (m - 1);
            if temp >= c {
                d = temp;
                break;
            }
        }
        m >>= 1;
    }
    b | d
}

fn min_and(width: BitWidth, mut a: i128, b: i128, mut c: i128, d: i128) -> i128 {
    let mut m = top_bit(width);
    while m != 0 {
        if !a & !c & m != 0 {
            let temp = (a | m) & -m;
            if temp <= b {
                a = temp;
                break;
            }
            let temp = (c | m) & -m;
            if temp <= d {
                c = temp;
                break;
            }
        }
        m >>= 1;
    }
    a & c
}

fn max_and(width: BitWidth, a: i128, mut b: i128, c: i128, mut d: i128) -> i128 {
    let mut m = top_bit(width);
    while m != 0 {
        if b & !d & m != 0 {
            let temp = (b & !m) | (m - 1);
            if temp >= a {
                b = temp;
                break;
            }
        } else if !b & d & m != 0 {
            let temp = (d & !m) | (m - 1);
            if temp >= c {
                d = temp;
                break;
            }
        }
        m >>= 1;
    }
    b & d
}

fn min_xor(width: BitWidth, mut a: i128, b: i128, mut c: i128, d: i128) -> i128 {
    let mut m = top_bit(width);
    while m != 0 {
        if !a & c & m != 0 {
            let temp = (a | m) & -m;
            if temp <= b {
                a = temp;
            }
        } else if a & !c & m != 0 {
            let temp = (c | m) & -m;
            if temp <= d {
                c = temp;
            }
        }
        m >>= 1;
    }
    a ^ c
}

fn max_xor(width: BitWidth, a: i128, mut b: i128, c: i128, mut d: i128) -> i128 {
    let mut m = top_bit(width);
    while m != 0 {
        if b & d & m != 0 {
            let temp = (b - m) | (m - 1);
            if temp >= a {
                b = temp;
            } else {
                let temp = (d - m) | (m - 1);
                if temp >= c {
                    d = temp;
                }
            }
        }
        m >>= 1;
    }
    b ^ d
}
