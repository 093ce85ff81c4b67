// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # intrange
//!
//! [![Crates.io](https://img.shields.io/crates/v/intrange.svg)](https://crates.io/crates/intrange)
//! [![Documentation](https://docs.rs/intrange/badge.svg)](https://docs.rs/intrange)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/intrange/blob/main/LICENSE-APACHE)
//!
//! An interval abstract domain over fixed-width two's-complement integers, intended to be
//! driven by a value-range analyzer. For every program value the domain keeps a sound
//! over-approximation `[lo, hi]` of the integers the value can take at a given bit-width,
//! plus the two distinguished elements Bottom (unreachable) and Top (no information).
//!
//! ## Features
//!
//! - **Lattice operations** - join, meet, ordering, semantic and syntactic equality
//! - **Widening** - disabled, Cousot&Cousot'76, or landmark (jump-set) widening
//! - **Guard filtering** - narrowing of both operands of a satisfied comparison
//! - **Transfer functions** - exact wraparound and overflow handling for add, sub, mul,
//!   signed/unsigned div and rem, and, or, xor, shifts, truncation and extension
//!
//! ## Quick Start
//!
//! ```rust
//! use intrange::prelude::*;
//!
//! let w8 = BitWidth::new(8)?;
//! let a = Range::bounded(5, 5, w8)?;
//! let b = Range::bounded(10, 10, w8)?;
//!
//! // Lattice join: [5, 10]
//! let joined = a.join(&b)?;
//! assert_eq!(joined.bounds(), Some((5, 10)));
//!
//! // 125 + 10 does not fit into 8 signed bits
//! let a = Range::bounded(120, 125, w8)?;
//! let sum = apply_checked(BinaryOp::Add, &a, &Range::constant(10, w8))?;
//! assert!(sum.overflow);
//! assert!(sum.range.is_top());
//! # Ok::<(), intrange::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`analysis::Range`] - the interval and its bound representation
//! - [`analysis::AbstractDomain`] - the lattice interface consumed by a fixed-point driver
//! - [`analysis::apply`] / [`analysis::apply_cast`] - transfer functions
//! - [`analysis::filter`] - guard-based narrowing
//! - [`analysis::RangeConfig`] - the widening policy threaded through the driver
//!
//! ## About Top
//!
//! Top and the explicit interval `[MIN, MAX]` describe the same set of values but behave
//! differently. Any binary operation on Top yields Top without computing bounds, while an
//! operation on `[MIN, MAX]` is evaluated normally and may overflow into Top.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Errors are reserved for contract
//! violations by the caller; imprecision is always expressed as Top or Bottom:
//!
//! ```rust
//! use intrange::{analysis::{AbstractDomain, BitWidth, Range}, Error};
//!
//! let a = Range::constant(1, BitWidth::new(8)?);
//! assert_eq!(Range::generalized_join(&[a, a]), Err(Error::Unsupported("generalized join")));
//! # Ok::<(), intrange::Error>(())
//! ```
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run transfer --release
//! ```
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use intrange::prelude::*;
///
/// let r = Range::bounded(0, 10, BitWidth::new(32)?)?;
/// assert!(r.contains(7));
/// # Ok::<(), intrange::Error>(())
/// ```
pub mod prelude;

/// Interval abstract domain, guard filtering and transfer functions.
///
/// This module contains the [`analysis::Range`] lattice element together with everything
/// a fixed-point driver needs to evaluate a program over it.
pub mod analysis;

/// `intrange` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `intrange` Error type
///
/// The main error type for all operations in this crate. See [`Error`] for the list of
/// contract violations it can describe.
pub use error::Error;
