//! Three-valued booleans.
//!
//! The boolean abstract domain of the surrounding analyzer reports the outcome of a
//! comparison as one of three values. The interval domain consumes them to seed the range
//! of boolean-typed values and produces them when evaluating a guard.

use strum::Display;

/// A three-valued boolean: definitely true, definitely false, or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TBool {
    /// Holds on every execution.
    True,
    /// Holds on no execution.
    False,
    /// May or may not hold.
    #[default]
    Unknown,
}

impl TBool {
    /// Returns `true` if this is definitely true.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns `true` if this is definitely false.
    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    /// Returns `true` if the value is unknown.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Logical negation. Unknown stays unknown.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }

    /// Returns the concrete value when known.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }
}

impl From<bool> for TBool {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}
