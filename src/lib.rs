//! # randbst
//!
//! A randomized balanced binary search tree in the Martinez-Roura style.
//!
//! ## Overview
//!
//! [`RandomBst`] is an ordered key-value container that keeps an expected
//! logarithmic height without priorities, colors, or balance counters. Every
//! node stores the size of its subtree, and that size alone drives the random
//! choices made by insertion (root promotion) and deletion (weighted join).
//!
//! - **Tree**: [`RandomBst`], the owning handle and only mutable entry point
//! - **Verification**: [`RandomBst::verify`] recomputes every subtree size and
//!   checks the search ordering
//! - **Persistence**: [`snapshot`] encodes and restores whole trees
//!   (feature `serde`)
//! - **Stress tooling**: [`stress`] drives long fill/drain runs with periodic
//!   verification
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for trees and the [`snapshot`] module
//!   (enabled by default)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use randbst::prelude::*;
//!
//! let mut tree = RandomBst::with_seed(7);
//! tree.put(5, "five");
//! tree.put(3, "three");
//! tree.put(8, "eight");
//!
//! assert_eq!(tree.get(&3), Some(&"three"));
//! assert_eq!(tree.min_key(), Some(&3));
//! assert_eq!(tree.remove(&5), Some("five"));
//! assert_eq!(tree.len(), 2);
//! assert!(tree.verify().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use randbst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{InvariantViolation, OrderSide};
    pub use crate::tree::RandomBst;

    #[cfg(feature = "serde")]
    pub use crate::snapshot::{restore, snapshot};
}

pub mod error;
pub mod stress;
pub mod tree;

#[cfg(feature = "serde")]
pub mod snapshot;

pub use error::{ConfigError, Extremum, InvariantViolation, OrderSide, StressError};
pub use tree::RandomBst;

#[cfg(feature = "serde")]
pub use error::{ShapeError, SnapshotError};
