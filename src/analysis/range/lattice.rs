//! Lattice core of the interval domain.
//!
//! Ordering, join and meet work on the concretization: Top is treated as `[MIN, MAX]`
//! when comparing, and combining two concrete intervals takes the pairwise min/max of
//! their signed bounds. Stored intervals never cross the south pole, so no wraparound
//! case arises here.

use crate::{
    analysis::{
        range::{Bounds, Range},
        AbstractDomain,
    },
    Result,
};

impl Range {
    /// Partial order: is every value of `self` also a value of `other`?
    ///
    /// Bottom is below everything and everything is below Top. Top and `[MIN, MAX]`
    /// are below each other.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WidthMismatch`] if the widths differ.
    pub fn less_or_equal(&self, other: &Self) -> Result<bool> {
        self.check_width(other)?;
        Ok(match (self.materialize(), other.materialize()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some((a, b)), Some((c, d))) => c <= a && b <= d,
        })
    }

    /// Smallest interval containing both operands.
    ///
    /// Bottom is the identity and Top absorbs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WidthMismatch`] if the widths differ.
    pub fn join(&self, other: &Self) -> Result<Self> {
        self.check_width(other)?;
        Ok(match (self.bounds, other.bounds) {
            (Bounds::Bottom, _) => *other,
            (_, Bounds::Bottom) => *self,
            (Bounds::Top, _) | (_, Bounds::Top) => Self::top(self.width),
            (Bounds::Interval { lb: a, ub: b }, Bounds::Interval { lb: c, ub: d }) => {
                Self::interval(self.width, a.min(c), b.max(d))
            }
        })
    }

    /// Intersection of both operands; disjoint intervals meet in Bottom.
    ///
    /// Bottom absorbs and Top is the identity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WidthMismatch`] if the widths differ.
    pub fn meet(&self, other: &Self) -> Result<Self> {
        self.check_width(other)?;
        Ok(match (self.bounds, other.bounds) {
            (Bounds::Bottom, _) | (_, Bounds::Bottom) => Self::bottom(self.width),
            (Bounds::Top, _) => *other,
            (_, Bounds::Top) => *self,
            (Bounds::Interval { lb: a, ub: b }, Bounds::Interval { lb: c, ub: d }) => {
                let lb = a.max(c);
                let ub = b.min(d);
                if lb > ub {
                    Self::bottom(self.width)
                } else {
                    Self::interval(self.width, lb, ub)
                }
            }
        })
    }

    /// Semantic equality: both operands have the same concretization.
    ///
    /// Unlike [`Range::is_identical`], Top equals `[MIN, MAX]`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WidthMismatch`] if the widths differ.
    pub fn is_equal(&self, other: &Self) -> Result<bool> {
        self.check_width(other)?;
        Ok(self.materialize() == other.materialize())
    }

    /// Syntactic equality: same width, same state and same bounds.
    ///
    /// This is the check a fixed-point driver must use to detect convergence.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self == other
    }
}

impl AbstractDomain for Range {
    fn is_bottom(&self) -> bool {
        Range::is_bottom(self)
    }

    fn is_top(&self) -> bool {
        Range::is_top(self)
    }

    fn less_or_equal(&self, other: &Self) -> Result<bool> {
        Range::less_or_equal(self, other)
    }

    fn join(&self, other: &Self) -> Result<Self> {
        Range::join(self, other)
    }

    fn meet(&self, other: &Self) -> Result<Self> {
        Range::meet(self, other)
    }

    fn is_equal(&self, other: &Self) -> Result<bool> {
        Range::is_equal(self, other)
    }

    fn is_identical(&self, other: &Self) -> bool {
        Range::is_identical(self, other)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        analysis::{BitWidth, Range},
        Error,
    };

    fn w8() -> BitWidth {
        BitWidth::new(8).unwrap()
    }

    fn r(lb: i128, ub: i128) -> Range {
        Range::bounded(lb, ub, w8()).unwrap()
    }

    #[test]
    fn test_join_singletons() {
        let joined = r(5, 5).join(&r(10, 10)).unwrap();
        assert_eq!(joined.bounds(), Some((5, 10)));
    }

    #[test]
    fn test_join_identity_and_absorption() {
        let a = r(0, 10);
        let w = w8();
        assert_eq!(a.join(&Range::bottom(w)).unwrap(), a);
        assert_eq!(Range::bottom(w).join(&a).unwrap(), a);
        assert!(a.join(&Range::top(w)).unwrap().is_top());
        assert!(Range::top(w).join(&a).unwrap().is_top());
    }

    #[test]
    fn test_meet() {
        let w = w8();
        assert_eq!(r(0, 10).meet(&r(5, 15)).unwrap().bounds(), Some((5, 10)));
        assert!(r(0, 5).meet(&r(10, 15)).unwrap().is_bottom());
        assert_eq!(r(0, 10).meet(&Range::top(w)).unwrap(), r(0, 10));
        assert!(r(0, 10).meet(&Range::bottom(w)).unwrap().is_bottom());
        assert_eq!(r(-5, 0).meet(&r(0, 9)).unwrap().as_constant(), Some(0));
    }

    #[test]
    fn test_less_or_equal() {
        let w = w8();
        assert!(r(2, 3).less_or_equal(&r(0, 10)).unwrap());
        assert!(!r(0, 10).less_or_equal(&r(2, 3)).unwrap());
        assert!(!r(-1, 3).less_or_equal(&r(0, 10)).unwrap());
        assert!(Range::top(w).less_or_equal(&Range::full(w)).unwrap());
        assert!(Range::full(w).less_or_equal(&Range::top(w)).unwrap());
        assert!(!Range::top(w).less_or_equal(&r(0, 1)).unwrap());
        assert!(!r(0, 1).less_or_equal(&Range::bottom(w)).unwrap());
    }

    #[test]
    fn test_equal_versus_identical() {
        let w = w8();
        let full = Range::full(w);
        let top = Range::top(w);
        assert!(full.is_equal(&top).unwrap());
        assert!(!full.is_identical(&top));
        assert!(full.is_identical(&Range::full(w)));
        assert!(!r(0, 1).is_equal(&r(0, 2)).unwrap());
    }

    #[test]
    fn test_width_mismatch() {
        let w16 = BitWidth::new(16).unwrap();
        let wide = Range::bounded(0, 1000, w16).unwrap();
        let expected = Err(Error::WidthMismatch {
            expected: 8,
            found: 16,
        });
        assert_eq!(r(0, 1).join(&wide), expected);
        assert_eq!(r(0, 1).meet(&wide), expected);
        assert_eq!(
            r(0, 1).less_or_equal(&wide),
            Err(Error::WidthMismatch {
                expected: 8,
                found: 16
            })
        );
    }
}
