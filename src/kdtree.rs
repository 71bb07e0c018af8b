use crate::bounds::BoundingBox;
use crate::error::{KdTreeError, Result};
use crate::point::{Axis, Point, PointStore};
use tracing::debug;

#[derive(Clone, Copy, Debug)]
pub(crate) enum Node {
    /// Splits its subtree on the axis of its depth; children are pool indices.
    Branch { split: f64, left: usize, right: usize },
    /// Refers to a slot of the point store.
    Leaf { point: usize },
}

/// Fixed-size node arena. A tree over `n` points uses exactly `2n - 1` slots.
#[derive(Clone, Debug)]
struct NodePool {
    nodes: Vec<Node>,
    max_nodes: usize,
}

impl NodePool {
    fn new(max_nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(max_nodes),
            max_nodes,
        }
    }

    /// Forgets all nodes while keeping the allocation.
    fn reset(&mut self) {
        self.nodes.clear();
    }

    fn alloc(&mut self, node: Node) -> usize {
        assert!(
            self.nodes.len() < self.max_nodes,
            "node pool exhausted after {} nodes",
            self.max_nodes
        );
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

/// Balanced 3D k-d tree over a fixed number of points.
///
/// Each level splits at the median of its point range along the X, Y and Z axes in
/// turn, so the tree has one leaf per point and a height of at most `ceil(log2 n)`.
/// The tree is meant to be rebuilt whenever the points move: [`KdTree::rebuild`]
/// with an unchanged point count reuses all memory in place.
#[derive(Clone, Debug)]
pub struct KdTree {
    count: usize,
    points: PointStore,
    pool: NodePool,
    root: usize,
}

impl KdTree {
    /// Builds a tree over the first `count` entries of the coordinate arrays.
    ///
    /// Entry `i` of the three arrays is point `i`; searches report that index.
    pub fn new(xs: &[f64], ys: &[f64], zs: &[f64], count: usize) -> Result<Self> {
        validate_input(xs, ys, zs, count)?;
        let mut tree = Self::allocate(count);
        tree.fill(xs, ys, zs);
        Ok(tree)
    }

    /// Rebuilds the tree for new coordinates.
    ///
    /// With the same `count` the point store and node pool are overwritten without
    /// reallocating; otherwise fresh storage is allocated. On error the tree is left
    /// as it was.
    pub fn rebuild(&mut self, xs: &[f64], ys: &[f64], zs: &[f64], count: usize) -> Result<()> {
        validate_input(xs, ys, zs, count)?;
        if count != self.count {
            debug!(from = self.count, to = count, "reallocating k-d tree");
            *self = Self::allocate(count);
        } else {
            debug!(count, "rebuilding k-d tree in place");
        }
        self.fill(xs, ys, zs);
        Ok(())
    }

    fn allocate(count: usize) -> Self {
        let max_nodes = 2 * count - 1;
        debug!(count, nodes = max_nodes, "allocating k-d tree");
        Self {
            count,
            points: PointStore::with_capacity(count),
            pool: NodePool::new(max_nodes),
            root: 0,
        }
    }

    fn fill(&mut self, xs: &[f64], ys: &[f64], zs: &[f64]) {
        self.pool.reset();
        self.points.load(xs, ys, zs, self.count);
        self.root = build_range(&mut self.points, &mut self.pool, 0, self.count - 1, 0);
        debug_assert_eq!(self.pool.nodes.len(), self.pool.max_nodes);
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false: a tree holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of nodes in use, `2 * len() - 1` after a build.
    pub fn node_count(&self) -> usize {
        self.pool.nodes.len()
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut stack = vec![(self.root, 0)];
        let mut deepest = 0;
        while let Some((node, d)) = stack.pop() {
            match self.pool.nodes[node] {
                Node::Leaf { .. } => deepest = deepest.max(d),
                Node::Branch { left, right, .. } => {
                    stack.push((left, d + 1));
                    stack.push((right, d + 1));
                }
            }
        }
        deepest
    }

    /// Original indices of all leaves, left to right.
    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.count);
        self.for_each_leaf(self.root, &mut |p: &Point| out.push(p.index));
        out
    }

    /// Tight bounding box of the points currently in the tree.
    pub fn bounds(&self) -> BoundingBox {
        let mut b = BoundingBox::new([f64::INFINITY; 3], [f64::NEG_INFINITY; 3]);
        for p in self.points.as_slice() {
            let c = p.coords();
            for i in 0..3 {
                b.min[i] = b.min[i].min(c[i]);
                b.max[i] = b.max[i].max(c[i]);
            }
        }
        b
    }

    /// Capacity of the point store and node pool, for checking in-place reuse.
    pub fn allocated(&self) -> (usize, usize) {
        (self.points.capacity(), self.pool.nodes.capacity())
    }

    pub(crate) fn root(&self) -> usize {
        self.root
    }

    pub(crate) fn node(&self, i: usize) -> Node {
        self.pool.nodes[i]
    }

    pub(crate) fn point(&self, i: usize) -> &Point {
        self.points.get(i)
    }

    /// Calls `f` on every point below `node` without any filtering.
    pub(crate) fn for_each_leaf<F>(&self, node: usize, f: &mut F)
    where
        F: FnMut(&Point),
    {
        match self.pool.nodes[node] {
            Node::Leaf { point } => f(self.points.get(point)),
            Node::Branch { left, right, .. } => {
                self.for_each_leaf(left, f);
                self.for_each_leaf(right, f);
            }
        }
    }
}

fn validate_input(xs: &[f64], ys: &[f64], zs: &[f64], count: usize) -> Result<()> {
    if count < 2 {
        return Err(KdTreeError::TooFewPoints { count });
    }
    check_lengths(xs, ys, zs, count)
}

/// The three arrays must have the same length, and hold at least `count` values.
pub(crate) fn check_lengths(xs: &[f64], ys: &[f64], zs: &[f64], count: usize) -> Result<()> {
    if xs.len() != ys.len() || ys.len() != zs.len() || xs.len() < count {
        return Err(KdTreeError::LengthMismatch {
            x: xs.len(),
            y: ys.len(),
            z: zs.len(),
            count,
        });
    }
    Ok(())
}

/// Builds the subtree over the inclusive range `[from, to]` and returns its root.
///
/// The median is taken at `from + (to - from) / 2`, which puts the extra point of an
/// even-sized range on the left. Nodes are allocated children first, so the root of
/// the whole tree is the last node in the pool.
fn build_range(
    points: &mut PointStore,
    pool: &mut NodePool,
    from: usize,
    to: usize,
    depth: usize,
) -> usize {
    if from == to {
        return pool.alloc(Node::Leaf { point: from });
    }

    let axis = Axis::from_depth(depth);
    points.sort_range(from, to, axis);

    let mid = from + (to - from) / 2;
    let split = points.get(mid).coord(axis);

    let left = build_range(points, pool, from, mid, depth + 1);
    let right = build_range(points, pool, mid + 1, to, depth + 1);
    pool.alloc(Node::Branch { split, left, right })
}
