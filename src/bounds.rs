/// Generic axis-aligned bounding box for N-dimensional space.
///
/// Both the query region of a search and the implicit domain of a subtree are
/// represented by this type. All tests treat the box as closed, so a point lying
/// exactly on a face is inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize = 3> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// The whole space, `(-inf, +inf)` on every axis.
    pub fn unbounded() -> Self {
        Self {
            min: [f64::NEG_INFINITY; D],
            max: [f64::INFINITY; D],
        }
    }

    /// Cube of half-width `apothem` around `center`.
    pub fn cube(center: [f64; D], apothem: f64) -> Self {
        let mut min = center;
        let mut max = center;
        for i in 0..D {
            min[i] -= apothem;
            max[i] += apothem;
        }
        Self { min, max }
    }

    /// True if `min > max` on some axis, i.e. the box cannot contain anything.
    pub fn is_empty(&self) -> bool {
        (0..D).any(|i| self.min[i] > self.max[i])
    }

    pub fn contains(&self, point: &[f64; D]) -> bool {
        (0..D).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// True unless the two boxes are separated along some axis.
    pub fn intersects(&self, other: &Self) -> bool {
        !(0..D).any(|i| self.min[i] > other.max[i] || self.max[i] < other.min[i])
    }

    /// True if `other` lies entirely inside `self`.
    pub fn encloses(&self, other: &Self) -> bool {
        (0..D).all(|i| {
            other.min[i] >= self.min[i]
                && other.min[i] <= self.max[i]
                && other.max[i] >= self.min[i]
                && other.max[i] <= self.max[i]
        })
    }

    /// Copy of this box with the upper bound of `axis` replaced.
    pub fn with_max(&self, axis: usize, value: f64) -> Self {
        let mut b = *self;
        b.max[axis] = value;
        b
    }

    /// Copy of this box with the lower bound of `axis` replaced.
    pub fn with_min(&self, axis: usize, value: f64) -> Self {
        let mut b = *self;
        b.min[axis] = value;
        b
    }
}
