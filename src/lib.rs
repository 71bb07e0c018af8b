//! # kdthree
//!
//! `kdthree` is a balanced 3D k-d tree for axis-aligned box queries over points that
//! move every simulation step. It is designed to be rebuilt often and searched many
//! times per rebuild, reusing its memory on both paths, and can be compiled to
//! WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Balanced construction**: median splits cycling through the X, Y and Z axes,
//!   with nodes taken from a pool of exactly `2n - 1` slots.
//! - **Pruned range search**: subtrees outside the query box are skipped and
//!   subtrees fully inside it are reported without per-point tests.
//! - **Memory reuse**: rebuilding with the same point count and reusing a
//!   [`SearchIterator`] across searches do not allocate.
//! - **Parallel batches**: many cube queries against one tree with rayon.
//!
//! ## Example
//!
//! ```
//! use kdthree::{KdTree, SearchIterator, END};
//!
//! let xs = [0.0, 1.0, 0.0, 1.0];
//! let ys = [0.0, 0.0, 1.0, 1.0];
//! let zs = [0.0, 0.0, 0.0, 2.0];
//! let tree = KdTree::new(&xs, &ys, &zs, 4).unwrap();
//!
//! let mut iter = SearchIterator::new();
//! tree.search([0.0, 0.0, 0.0], 1.0, &mut iter).unwrap();
//! iter.sort();
//! assert_eq!(iter.get_next(), 0);
//! assert_eq!(iter.get_next(), 1);
//! assert_eq!(iter.get_next(), 2);
//! assert_eq!(iter.get_next(), END);
//! ```
//!
//! Box queries return a cube or box, never a sphere: callers that need points within
//! a radius must filter the results by distance themselves.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct, searched into a [`SearchIterator`].

mod algorithm;
mod batch;
mod bounds;
mod config;
mod error;
mod iterator;
mod kdtree;
mod point;
mod search;
pub mod wasm;

pub use algorithm::LinearScan;
pub use algorithm::RangeQuery;
pub use bounds::BoundingBox;
pub use config::IteratorConfig;
pub use config::ITERATOR_GROWTH_RATIO;
pub use config::ITERATOR_INITIAL_CAPACITY;
pub use error::KdTreeError;
pub use error::Result;
pub use iterator::SearchIterator;
pub use iterator::END;
pub use kdtree::KdTree;
pub use point::random_points;
pub use search::build_into;
pub use search::release_iterator;
pub use search::release_tree;
pub use search::search_into;
pub use search::search_space_into;
