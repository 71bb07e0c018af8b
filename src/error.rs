//! Error types for kdthree.

use thiserror::Error;

/// Precondition violations reported by tree construction and searches.
///
/// None of these are recoverable in the sense of a degraded mode: they signal a
/// caller bug, and the operation that returned them left its inputs untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KdTreeError {
    /// A tree needs at least two points so that its root is a branch.
    #[error("a k-d tree needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },

    /// The coordinate arrays differ in length, or are shorter than the point count.
    #[error("coordinate arrays must have equal length of at least {count} (x: {x}, y: {y}, z: {z})")]
    LengthMismatch {
        x: usize,
        y: usize,
        z: usize,
        count: usize,
    },

    /// Cube searches need a non-negative apothem.
    #[error("apothem must be a non-negative number, got {0}")]
    InvalidApothem(f64),

    /// The result buffer must grow by a factor strictly greater than one.
    #[error("iterator growth ratio must be finite and > 1, got {0}")]
    InvalidGrowthRatio(f64),

    /// The result buffer must start with room for at least one index.
    #[error("iterator initial capacity must be at least 1")]
    InvalidCapacity,

    /// Random points were requested from a box that is inverted or not finite.
    #[error("cannot sample points from bounds {min:?}..{max:?}")]
    InvalidBounds { min: [f64; 3], max: [f64; 3] },

    /// A tree slot was searched before anything was built into it.
    #[error("tree has not been built")]
    NotBuilt,
}

/// Result type for kdthree operations.
pub type Result<T> = std::result::Result<T, KdTreeError>;
