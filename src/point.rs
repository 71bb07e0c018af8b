use crate::bounds::BoundingBox;
use crate::error::{KdTreeError, Result};
use rand::Rng;

/// Split axis of a tree level. Axes cycle X, Y, Z with depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_depth(depth: usize) -> Self {
        match depth % 3 {
            0 => Axis::X,
            1 => Axis::Y,
            _ => Axis::Z,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A copy of one caller point, tagged with its position in the caller's arrays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Index into the coordinate arrays the tree was built from.
    pub index: usize,
}

impl Point {
    pub fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Owned point buffer that the tree builder reorders in place.
#[derive(Clone, Debug, Default)]
pub(crate) struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            points: Vec::with_capacity(count),
        }
    }

    /// Overwrites the store with the first `count` entries of the coordinate arrays.
    ///
    /// Existing storage is reused; the slices must hold at least `count` values.
    pub(crate) fn load(&mut self, xs: &[f64], ys: &[f64], zs: &[f64], count: usize) {
        self.points.clear();
        self.points.extend(
            xs[..count]
                .iter()
                .zip(&ys[..count])
                .zip(&zs[..count])
                .enumerate()
                .map(|(index, ((&x, &y), &z))| Point { x, y, z, index }),
        );
    }

    /// Sorts the inclusive range `[from, to]` by the coordinate on `axis`.
    ///
    /// Ties are left in arbitrary order; each point carries its own index. NaN
    /// coordinates sort after every number.
    pub(crate) fn sort_range(&mut self, from: usize, to: usize, axis: Axis) {
        self.points[from..=to].sort_unstable_by(|a, b| a.coord(axis).total_cmp(&b.coord(axis)));
    }

    pub(crate) fn get(&self, i: usize) -> &Point {
        &self.points[i]
    }

    pub(crate) fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub(crate) fn as_slice(&self) -> &[Point] {
        &self.points
    }
}

/// Draws `count` points uniformly from `bounds`, returned as separate x, y and z arrays.
///
/// Fails with [`KdTreeError::InvalidBounds`] if `bounds` is inverted or not finite
/// on some axis.
pub fn random_points<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    bounds: &BoundingBox,
) -> Result<[Vec<f64>; 3]> {
    let finite = bounds.min.iter().chain(&bounds.max).all(|v| v.is_finite());
    if !finite || bounds.is_empty() {
        return Err(KdTreeError::InvalidBounds {
            min: bounds.min,
            max: bounds.max,
        });
    }
    let mut xs = Vec::with_capacity(count);
    let mut ys = Vec::with_capacity(count);
    let mut zs = Vec::with_capacity(count);
    for _ in 0..count {
        xs.push(rng.gen_range(bounds.min[0]..=bounds.max[0]));
        ys.push(rng.gen_range(bounds.min[1]..=bounds.max[1]));
        zs.push(rng.gen_range(bounds.min[2]..=bounds.max[2]));
    }
    Ok([xs, ys, zs])
}
