//! Configuration for range analysis runs.
//!
//! The widening policy is not a process-wide constant: each analysis run owns a
//! [`RangeConfig`] and threads it through its fixed-point driver, so several runs with
//! different strategies can coexist (for example when comparing them in tests).

use crate::{
    analysis::{LandmarkSet, Range, WideningStrategy},
    Result,
};

/// Configuration of the interval domain as used by a fixed-point driver.
///
/// # Examples
///
/// ```rust
/// use intrange::analysis::{BitWidth, LandmarkSet, Range, RangeConfig, WideningStrategy};
///
/// let config = RangeConfig {
///     widening: WideningStrategy::Cousot76,
///     widening_delay: 0,
/// };
/// let w8 = BitWidth::new(8)?;
/// let widened = config.widen(
///     &Range::bounded(0, 2, w8)?,
///     &Range::bounded(0, 1, w8)?,
///     &LandmarkSet::new(),
///     0,
/// )?;
/// assert_eq!(widened.bounds(), Some((0, 127)));
/// # Ok::<(), intrange::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeConfig {
    /// Widening strategy applied at loop heads (default: jump-set).
    pub widening: WideningStrategy,

    /// Number of iterations at a program point that use a plain join before widening
    /// kicks in (default: 0).
    pub widening_delay: usize,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            widening: WideningStrategy::default(),
            widening_delay: 0,
        }
    }
}

impl RangeConfig {
    /// Creates a configuration with the given strategy and no widening delay.
    #[must_use]
    pub fn with_strategy(widening: WideningStrategy) -> Self {
        Self {
            widening,
            ..Self::default()
        }
    }

    /// Returns `true` if iteration `iteration` (counted from zero) of a program point
    /// must widen rather than join.
    #[must_use]
    pub fn should_widen(&self, iteration: usize) -> bool {
        self.widening != WideningStrategy::NoWiden && iteration >= self.widening_delay
    }

    /// Combines the value of the previous iteration with the newly computed one
    /// according to this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WidthMismatch`] if the widths differ.
    pub fn widen(
        &self,
        current: &Range,
        previous: &Range,
        landmarks: &LandmarkSet,
        iteration: usize,
    ) -> Result<Range> {
        if self.should_widen(iteration) {
            current.widening(previous, self.widening, landmarks)
        } else {
            current.join(previous)
        }
    }
}
