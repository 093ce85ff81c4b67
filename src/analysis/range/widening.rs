//! Widening operators.
//!
//! Interval chains can ascend for as long as the width allows (`2^width` steps), so a
//! fixed-point driver replaces the join at loop heads by a widening once it has iterated
//! enough. Three strategies are available:
//!
//! - [`WideningStrategy::NoWiden`]: plain join; only terminates on short chains
//! - [`WideningStrategy::Cousot76`]: a growing bound jumps straight to MIN or MAX
//! - [`WideningStrategy::JumpSet`]: a growing bound jumps to the next landmark constant
//!   taken from the analyzed program, and only then to MIN or MAX
//!
//! Jump-set widening keeps loop bounds such as `i < 100` precise for the cost of a
//! handful of extra iterations, so it is the default.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use strum::{Display, EnumIter, EnumString};

use crate::{
    analysis::range::{BitWidth, Range},
    Result,
};

/// Widening technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum WideningStrategy {
    /// Widening disabled: the join of both iterations.
    NoWiden,
    /// Classical widening: unstable bounds jump to the extreme of the width.
    Cousot76,
    /// Unstable bounds jump to the nearest landmark beyond them.
    #[default]
    JumpSet,
}

/// Width-tagged landmark constants for jump-set widening.
///
/// The driver collects these from the integer literals of the analyzed program. Each
/// constant is stored as a bit pattern of its width, so `255` and `-1` are the same
/// landmark at 8 bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandmarkSet {
    constants: BTreeMap<BitWidth, BTreeSet<i128>>,
}

impl LandmarkSet {
    /// Creates an empty landmark set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a landmark of the given width. Returns `true` if it was not present yet.
    pub fn insert(&mut self, value: i128, width: BitWidth) -> bool {
        self.constants
            .entry(width)
            .or_default()
            .insert(width.wrap(value))
    }

    /// Returns `true` if the landmark is present.
    #[must_use]
    pub fn contains(&self, value: i128, width: BitWidth) -> bool {
        self.constants
            .get(&width)
            .is_some_and(|set| set.contains(&width.wrap(value)))
    }

    /// Number of landmarks of the given width.
    #[must_use]
    pub fn len_for(&self, width: BitWidth) -> usize {
        self.constants.get(&width).map_or(0, BTreeSet::len)
    }

    /// Total number of landmarks over all widths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.values().map(BTreeSet::len).sum()
    }

    /// Returns `true` if no landmark is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest landmark `>= value` of the width.
    #[must_use]
    pub fn at_or_above(&self, value: i128, width: BitWidth) -> Option<i128> {
        self.constants
            .get(&width)
            .and_then(|set| set.range(value..).next().copied())
    }

    /// Largest landmark `<= value` of the width.
    #[must_use]
    pub fn at_or_below(&self, value: i128, width: BitWidth) -> Option<i128> {
        self.constants
            .get(&width)
            .and_then(|set| set.range(..=value).next_back().copied())
    }
}

impl Extend<(i128, BitWidth)> for LandmarkSet {
    fn extend<T: IntoIterator<Item = (i128, BitWidth)>>(&mut self, iter: T) {
        for (value, width) in iter {
            self.insert(value, width);
        }
    }
}

impl FromIterator<(i128, BitWidth)> for LandmarkSet {
    fn from_iter<T: IntoIterator<Item = (i128, BitWidth)>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Range {
    /// Widens `previous` (the value of the last iteration) by `self` (the newly
    /// computed value).
    ///
    /// The result is always above the join of both. With [`WideningStrategy::NoWiden`]
    /// it is exactly the join; otherwise every bound of `self` that moved beyond the
    /// corresponding bound of `previous` is pushed to a landmark or to the extreme of
    /// the width, while stable bounds are kept.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WidthMismatch`] if the widths differ.
    pub fn widening(
        &self,
        previous: &Self,
        strategy: WideningStrategy,
        landmarks: &LandmarkSet,
    ) -> Result<Self> {
        self.check_width(previous)?;
        let width = self.width;

        let (Some((prev_lb, prev_ub)), Some((lb, ub))) = (previous.bounds(), self.bounds())
        else {
            return self.join(previous);
        };

        if strategy == WideningStrategy::NoWiden {
            return self.join(previous);
        }

        let new_lb = if lb < prev_lb {
            let jumped = match strategy {
                WideningStrategy::JumpSet => landmarks
                    .at_or_below(lb, width)
                    .unwrap_or(width.signed_min()),
                _ => width.signed_min(),
            };
            debug!("widening ({strategy}): lower bound {prev_lb} -> {jumped}");
            jumped
        } else {
            prev_lb
        };

        let new_ub = if ub > prev_ub {
            let jumped = match strategy {
                WideningStrategy::JumpSet => landmarks
                    .at_or_above(ub, width)
                    .unwrap_or(width.signed_max()),
                _ => width.signed_max(),
            };
            debug!("widening ({strategy}): upper bound {prev_ub} -> {jumped}");
            jumped
        } else {
            prev_ub
        };

        Ok(Self::interval(width, new_lb, new_ub))
    }
}
