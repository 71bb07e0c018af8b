use crate::bounds::BoundingBox;
use crate::error::{KdTreeError, Result};
use crate::iterator::SearchIterator;
use crate::kdtree::KdTree;
use rayon::prelude::*;

impl KdTree {
    /// Runs one cube search per center in parallel.
    ///
    /// Searches only read the tree, so each rayon worker reuses its own
    /// [`SearchIterator`] across the centers it handles. Entry `i` of the result holds
    /// the ascending indices found around `centers[i]`.
    pub fn search_batch(&self, centers: &[[f64; 3]], apothem: f64) -> Result<Vec<Vec<usize>>> {
        if !(apothem >= 0.0) {
            return Err(KdTreeError::InvalidApothem(apothem));
        }
        Ok(centers
            .par_iter()
            .map_init(SearchIterator::new, |iter, center| {
                self.search_space(&BoundingBox::cube(*center, apothem), iter);
                iter.sort();
                iter.as_slice().to_vec()
            })
            .collect())
    }

    /// Parallel cube search around every point of the tree itself.
    ///
    /// Entry `i` lists the points near point `i`, including `i`.
    pub fn neighbors_within(&self, apothem: f64) -> Result<Vec<Vec<usize>>> {
        let mut centers = vec![[0.0; 3]; self.len()];
        for i in 0..self.len() {
            let p = self.point(i);
            centers[p.index] = p.coords();
        }
        self.search_batch(&centers, apothem)
    }
}
