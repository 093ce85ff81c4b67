//! # intrange Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the intrange library. Import this module to get quick access to the interval type,
//! its lattice interface and the transfer functions.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all intrange operations
pub use crate::Error;

/// The result type used throughout intrange
pub use crate::Result;

// ================================================================================================
// Bound Representation
// ================================================================================================

/// Interval element, bit-width and interpretation
pub use crate::analysis::{BitWidth, IntegerValue, Range, Signedness};

/// Three-valued boolean used for seeding and guard evaluation
pub use crate::analysis::TBool;

// ================================================================================================
// Lattice and Widening
// ================================================================================================

/// Lattice interface consumed by fixed-point drivers
pub use crate::analysis::AbstractDomain;

/// Widening configuration
pub use crate::analysis::{LandmarkSet, RangeConfig, WideningStrategy};

// ================================================================================================
// Transfer Functions and Guards
// ================================================================================================

/// Binary and cast transfer functions
pub use crate::analysis::{
    apply, apply_cast, apply_cast_checked, apply_checked, BinaryOp, CastKind, TransferResult,
};

/// Guard filtering
pub use crate::analysis::{filter, CmpPredicate, GuardOperand};
