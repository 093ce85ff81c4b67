//! Fixed-width bound representation.
//!
//! Bounds of an interval are `width`-bit two's-complement integers. They are kept in an
//! `i128` already reduced into the signed range of the width, which lets every transfer
//! function compute the exact mathematical result of an operation on two bounds and
//! then decide whether that result is representable.
//!
//! The same bit pattern has two readings. Helpers in this module convert between the
//! signed reading (how bounds are stored) and the unsigned reading (how `udiv`, `urem`,
//! `lshr`, `zext` and unsigned comparisons see them).

use std::fmt;

use strum::{Display, EnumString};

use crate::{Error, Result};

/// Bit-width of an integer value, in `1..=64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitWidth(u32);

impl BitWidth {
    /// Widest supported integer.
    pub const MAX_BITS: u32 = 64;

    /// Creates a new bit-width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWidth`] if `bits` is zero or wider than
    /// [`BitWidth::MAX_BITS`].
    pub const fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > Self::MAX_BITS {
            return Err(Error::InvalidWidth(bits));
        }
        Ok(Self(bits))
    }

    /// Number of bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Number of distinct values, `2^width`.
    #[must_use]
    pub const fn modulus(self) -> i128 {
        1i128 << self.0
    }

    /// Smallest signed value, `-2^(width-1)`.
    #[must_use]
    pub const fn signed_min(self) -> i128 {
        -(1i128 << (self.0 - 1))
    }

    /// Largest signed value, `2^(width-1) - 1`.
    #[must_use]
    pub const fn signed_max(self) -> i128 {
        (1i128 << (self.0 - 1)) - 1
    }

    /// Largest unsigned value, `2^width - 1`.
    #[must_use]
    pub const fn unsigned_max(self) -> i128 {
        (1i128 << self.0) - 1
    }

    /// Returns `true` if `value` lies in the signed range of this width.
    #[must_use]
    pub const fn fits(self, value: i128) -> bool {
        value >= self.signed_min() && value <= self.signed_max()
    }

    /// Reduces an arbitrary integer modulo `2^width` into the signed range.
    ///
    /// This is the two's-complement wraparound of the width.
    #[must_use]
    pub const fn wrap(self, value: i128) -> i128 {
        let reduced = value.rem_euclid(self.modulus());
        if reduced > self.signed_max() {
            reduced - self.modulus()
        } else {
            reduced
        }
    }

    /// Unsigned reading of a signed-stored value.
    #[must_use]
    pub const fn to_unsigned(self, value: i128) -> i128 {
        if value < 0 {
            value + self.modulus()
        } else {
            value
        }
    }

    /// Signed reading of an unsigned bit pattern in `0..2^width`.
    #[must_use]
    pub const fn to_signed(self, value: i128) -> i128 {
        if value > self.signed_max() {
            value - self.modulus()
        } else {
            value
        }
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        Self::new(bits)
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.0)
    }
}

/// Interpretation of the bit patterns of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Signedness {
    /// Two's-complement signed.
    Signed,
    /// Unsigned. Not constructible; kept so the construction interface can reject it.
    Unsigned,
}

impl Signedness {
    /// Ensures the interpretation is the supported signed one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsignedRange`] for [`Signedness::Unsigned`].
    pub(crate) fn require_signed(self) -> Result<()> {
        match self {
            Self::Signed => Ok(()),
            Self::Unsigned => Err(Error::UnsignedRange),
        }
    }
}

/// An opaque handle to an integer-typed program value.
///
/// The instruction visitor of the surrounding analyzer implements this for its own value
/// type; the domain only needs to know how wide the value is.
pub trait IntegerValue {
    /// Bit-width of the value's integer type.
    fn bit_width(&self) -> u32;
}
