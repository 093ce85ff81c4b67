//! Interval abstract domain for fixed-width integers.
//!
//! This module provides the pieces a value-range analyzer plugs into its fixed-point
//! driver:
//!
//! - [`Range`] - the interval lattice element (Bottom, Top or `[lb, ub]` at a bit-width)
//! - [`AbstractDomain`] - the lattice interface (join, meet, ordering, equality)
//! - [`RangeConfig`] / [`WideningStrategy`] / [`LandmarkSet`] - widening policy
//! - [`apply`] / [`apply_cast`] - arithmetic, bitwise and cast transfer functions
//! - [`filter`] - narrowing of operands along a taken branch
//!
//! # Out of Scope
//!
//! The domain does not iterate a control-flow graph, dispatch instructions or track
//! relations between variables. A driver owns one [`Range`] per analysis slot and calls
//! into this module sequentially.
//!
//! # Usage
//!
//! ```rust
//! use intrange::analysis::{apply, filter, BinaryOp, BitWidth, CmpPredicate, GuardOperand, Range};
//!
//! let w8 = BitWidth::new(8)?;
//! let x = Range::bounded(-20, 20, w8)?;
//!
//! // Along the branch where `x < 0` holds
//! let (narrowed, _) = filter(CmpPredicate::Slt, &x, GuardOperand::Const(0))?;
//! assert_eq!(narrowed.bounds(), Some((-20, -1)));
//!
//! // y = x * 2
//! let y = apply(BinaryOp::Mul, &narrowed, &Range::constant(2, w8))?;
//! assert_eq!(y.bounds(), Some((-40, -2)));
//! # Ok::<(), intrange::Error>(())
//! ```

mod config;
mod lattice;
mod range;
mod tbool;

// Re-export primary types at module level
pub use config::RangeConfig;
pub use lattice::AbstractDomain;
pub use range::{
    apply, apply_cast, apply_cast_checked, apply_checked, filter, BinaryOp, BitWidth, CastKind,
    CmpPredicate, GuardOperand, IntegerValue, LandmarkSet, Range, Signedness, TransferResult,
    WideningStrategy,
};
pub use tbool::TBool;
