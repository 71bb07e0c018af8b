use crate::bounds::BoundingBox;
use crate::error::{KdTreeError, Result};
use crate::iterator::SearchIterator;
use crate::kdtree::{KdTree, Node};
use crate::point::{Axis, Point};
use tracing::trace;

impl KdTree {
    /// Collects the indices of all points inside the closed box `query` into `iter`.
    ///
    /// `iter` is cleared first but keeps its capacity. Results come out in tree
    /// order; call [`SearchIterator::sort`] for ascending indices. A box with
    /// `min > max` on some axis matches nothing.
    pub fn search_space(&self, query: &BoundingBox, iter: &mut SearchIterator) {
        iter.reset();
        if let Node::Branch { split, left, right } = self.node(self.root()) {
            self.search_branch(split, left, right, 0, query, &BoundingBox::unbounded(), iter);
        }
        trace!(matches = iter.len(), capacity = iter.capacity(), "box search done");
    }

    /// Collects all points inside the cube of half-width `apothem` around `center`.
    ///
    /// This is a cube, not a sphere: callers after a radius must still filter the
    /// results by distance.
    pub fn search(&self, center: [f64; 3], apothem: f64, iter: &mut SearchIterator) -> Result<()> {
        // written this way round so that NaN is rejected too
        if !(apothem >= 0.0) {
            return Err(KdTreeError::InvalidApothem(apothem));
        }
        self.search_space(&BoundingBox::cube(center, apothem), iter);
        Ok(())
    }

    /// Convenience form of [`search_space`](Self::search_space) returning a new iterator.
    pub fn query_space(&self, query: &BoundingBox) -> SearchIterator {
        let mut iter = SearchIterator::new();
        self.search_space(query, &mut iter);
        iter
    }

    /// Splits `domain` at a branch and explores both halves.
    #[allow(clippy::too_many_arguments)]
    fn search_branch(
        &self,
        split: f64,
        left: usize,
        right: usize,
        depth: usize,
        query: &BoundingBox,
        domain: &BoundingBox,
        iter: &mut SearchIterator,
    ) {
        let axis = Axis::from_depth(depth).index();
        self.explore(left, depth, query, &domain.with_max(axis, split), iter);
        self.explore(right, depth, query, &domain.with_min(axis, split), iter);
    }

    /// Visits the child `node` of a branch at `depth`, whose points all lie in `domain`.
    fn explore(
        &self,
        node: usize,
        depth: usize,
        query: &BoundingBox,
        domain: &BoundingBox,
        iter: &mut SearchIterator,
    ) {
        match self.node(node) {
            Node::Leaf { point } => {
                let p = self.point(point);
                if query.contains(&p.coords()) {
                    iter.push(p.index);
                }
            }
            Node::Branch { split, left, right } => {
                if !query.intersects(domain) {
                    return;
                }
                if query.encloses(domain) {
                    self.for_each_leaf(node, &mut |p: &Point| iter.push(p.index));
                } else {
                    self.search_branch(split, left, right, depth + 1, query, domain, iter);
                }
            }
        }
    }
}

/// Builds into `slot`, reusing the tree already there when the point count matches.
///
/// This mirrors a simulation loop that keeps one tree alive across steps:
///
/// ```
/// let xs = [0.0, 1.0, 2.0];
/// let mut tree = None;
/// for _ in 0..3 {
///     kdthree::build_into(&mut tree, &xs, &xs, &xs, 3).unwrap();
/// }
/// kdthree::release_tree(&mut tree);
/// assert!(tree.is_none());
/// ```
pub fn build_into<'a>(
    slot: &'a mut Option<KdTree>,
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
    count: usize,
) -> Result<&'a mut KdTree> {
    match slot {
        Some(tree) => {
            tree.rebuild(xs, ys, zs, count)?;
            Ok(tree)
        }
        None => Ok(slot.insert(KdTree::new(xs, ys, zs, count)?)),
    }
}

/// Box search into the iterator held by `slot`, creating it on first use.
#[allow(clippy::too_many_arguments)]
pub fn search_space_into<'a>(
    tree: Option<&KdTree>,
    slot: &'a mut Option<SearchIterator>,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    z_min: f64,
    z_max: f64,
) -> Result<&'a mut SearchIterator> {
    let tree = tree.ok_or(KdTreeError::NotBuilt)?;
    let iter = slot.get_or_insert_with(SearchIterator::new);
    let query = BoundingBox::new([x_min, y_min, z_min], [x_max, y_max, z_max]);
    tree.search_space(&query, iter);
    Ok(iter)
}

/// Cube search into the iterator held by `slot`, creating it on first use.
pub fn search_into<'a>(
    tree: Option<&KdTree>,
    slot: &'a mut Option<SearchIterator>,
    x: f64,
    y: f64,
    z: f64,
    apothem: f64,
) -> Result<&'a mut SearchIterator> {
    let tree = tree.ok_or(KdTreeError::NotBuilt)?;
    let iter = slot.get_or_insert_with(SearchIterator::new);
    tree.search([x, y, z], apothem, iter)?;
    Ok(iter)
}

/// Drops the tree held by `slot`, if any.
pub fn release_tree(slot: &mut Option<KdTree>) {
    *slot = None;
}

/// Drops the iterator held by `slot`, if any.
pub fn release_iterator(slot: &mut Option<SearchIterator>) {
    *slot = None;
}
