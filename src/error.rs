use thiserror::Error;

/// Builds an [`Error::WidthMismatch`] from two bit-widths.
macro_rules! width_mismatch {
    ($expected:expr, $found:expr) => {
        crate::Error::WidthMismatch {
            expected: $expected.bits(),
            found: $found.bits(),
        }
    };
}

/// The generic Error type, which covers every contract violation this library can report.
///
/// Errors in this crate never describe a property of the analyzed program. Overflow,
/// pole-crossing, division by a possibly-zero divisor and undefined shift amounts are all
/// answered with a sound over-approximation (usually Top). An `Error` is only returned when
/// the caller (the fixed-point driver or the instruction visitor) breaks the contract of the
/// domain, for example by combining intervals of different bit-widths.
///
/// # Error Categories
///
/// ## Construction Errors
/// - [`Error::InvalidWidth`] - Bit-width outside the supported range
/// - [`Error::UnsignedRange`] - An unsigned interval was requested
/// - [`Error::BoundOutOfRange`] - A bound does not fit the requested bit-width
///
/// ## Operation Errors
/// - [`Error::WidthMismatch`] - Operands of a binary operation disagree on their width
/// - [`Error::InvalidCast`] - A truncation to a wider type or an extension to a narrower one
/// - [`Error::Unsupported`] - The operation has no meaning for this lattice
///
/// # Examples
///
/// ```rust
/// use intrange::{analysis::{BitWidth, Range}, Error};
///
/// let a = Range::bounded(0, 10, BitWidth::new(8)?)?;
/// let b = Range::bounded(0, 10, BitWidth::new(16)?)?;
///
/// match a.join(&b) {
///     Err(Error::WidthMismatch { expected, found }) => {
///         assert_eq!((expected, found), (8, 16));
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// # Ok::<(), intrange::Error>(())
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested bit-width is not supported.
    ///
    /// Widths must lie in `1..=64`; bounds are evaluated in 128-bit arithmetic so that
    /// every product or shift of two supported values is computed exactly.
    #[error("Invalid bit-width {0}, supported widths are 1..=64")]
    InvalidWidth(u32),

    /// Two operands of a binary operation have different bit-widths.
    ///
    /// # Fields
    ///
    /// * `expected` - Width of the left operand (or the receiver)
    /// * `found` - Width of the offending operand
    #[error("Bit-width mismatch - expected {expected}, found {found}")]
    WidthMismatch {
        /// Width of the left operand
        expected: u32,
        /// Width of the right operand
        found: u32,
    },

    /// An interval with unsigned interpretation was requested.
    ///
    /// All intervals are stored under the signed interpretation. Unsigned operations are
    /// still supported on them through pole splitting.
    #[error("Intervals must be signed")]
    UnsignedRange,

    /// A bound does not fit into the signed range of the requested width.
    #[error("Bound {value} does not fit into {width} bits")]
    BoundOutOfRange {
        /// The offending value
        value: i128,
        /// The requested width
        width: u32,
    },

    /// A cast with inconsistent source and target widths.
    ///
    /// Truncations must strictly narrow, extensions must strictly widen.
    #[error("Invalid {kind} from {from} to {to} bits")]
    InvalidCast {
        /// Name of the cast kind
        kind: &'static str,
        /// Source width
        from: u32,
        /// Target width
        to: u32,
    },

    /// The operation is not defined for this lattice.
    ///
    /// Raised by the n-ary join: the interval lattice is convex and non-disjunctive, so
    /// callers must fold pairwise joins themselves.
    #[error("Unsupported operation - {0}")]
    Unsupported(&'static str),
}
