//! Dynamic forests with path aggregates, backed by link-cut trees.
//!
//! [`LinkCutForest`] keeps a forest over a fixed vertex set `0..n` under
//! `link`/`cut`, and answers connectivity and path-fold queries in amortized
//! `O(log n)`. The fold is described by a [`policy::PathMonoid`]; the default
//! [`policy::Sum`] sums `i64` vertex values.
//!
//! ```
//! use link_cut::LinkCutForest;
//!
//! let mut forest: LinkCutForest = LinkCutForest::from_values(&[1, 2, 3, 4, 5]);
//! forest.link(0, 1)?;
//! forest.link(1, 2)?;
//! forest.link(2, 3)?;
//! assert!(forest.connected(0, 3)?);
//! assert_eq!(forest.path_aggregate(0, 3)?, 10);
//!
//! forest.cut(1, 2)?;
//! assert!(!forest.connected(0, 3)?);
//! # Ok::<(), link_cut::InvalidOperation>(())
//! ```

pub mod policy;
pub mod traits;

mod error;
mod forest;
mod naive;
mod splay;

pub use error::{InvalidOperation, Result};
pub use forest::LinkCutForest;
pub use naive::NaiveForest;

pub use traits::{DynamicForest, PathQuery};
