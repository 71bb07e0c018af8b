use crate::bounds::BoundingBox;
use crate::error::Result;
use crate::iterator::SearchIterator;
use crate::kdtree::{KdTree, check_lengths};

/// Trait defining a structure that answers closed box queries over indexed points.
/// This allows checking the k-d tree against a brute-force scan in tests and benchmarks.
pub trait RangeQuery: Send + Sync {
    /// Number of indexed points.
    fn count(&self) -> usize;

    /// Replaces the contents of `iter` with the indices of all points inside `query`.
    fn query(&self, query: &BoundingBox, iter: &mut SearchIterator);
}

impl RangeQuery for KdTree {
    fn count(&self) -> usize {
        self.len()
    }

    fn query(&self, query: &BoundingBox, iter: &mut SearchIterator) {
        self.search_space(query, iter);
    }
}

/// Reference index that tests every point against the query box.
///
/// O(n) per query, but trivially correct and reports indices in ascending order.
#[derive(Clone, Debug, Default)]
pub struct LinearScan {
    points: Vec<[f64; 3]>,
}

impl LinearScan {
    pub fn new(xs: &[f64], ys: &[f64], zs: &[f64], count: usize) -> Result<Self> {
        check_lengths(xs, ys, zs, count)?;
        let points = (0..count).map(|i| [xs[i], ys[i], zs[i]]).collect();
        Ok(Self { points })
    }
}

impl RangeQuery for LinearScan {
    fn count(&self) -> usize {
        self.points.len()
    }

    fn query(&self, query: &BoundingBox, iter: &mut SearchIterator) {
        iter.reset();
        for (i, p) in self.points.iter().enumerate() {
            if query.contains(p) {
                iter.push(i);
            }
        }
    }
}
