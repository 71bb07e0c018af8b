use crate::bounds::BoundingBox;
use crate::iterator::SearchIterator;
use crate::kdtree::KdTree;
use crate::point::random_points;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

// Mirrors ITERATOR_INITIAL_CAPACITY and ITERATOR_GROWTH_RATIO in config.rs.
#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_ITERATOR: &'static str = r#"
export const KDTREE_ITERATOR_INITIAL_SIZE = 50;
export const KDTREE_ITERATOR_GROWTH_RATIO = 2;
"#;

/// Closed query box for the JS side, either from its corners or as a cube.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox3D {
    inner: BoundingBox<3>,
}

#[wasm_bindgen]
impl BoundingBox3D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> BoundingBox3D {
        BoundingBox3D {
            inner: BoundingBox::new([min_x, min_y, min_z], [max_x, max_y, max_z]),
        }
    }

    /// Cube of half-width `apothem` around `(x, y, z)`.
    pub fn cube(x: f64, y: f64, z: f64, apothem: f64) -> BoundingBox3D {
        BoundingBox3D {
            inner: BoundingBox::cube([x, y, z], apothem),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn min(&self) -> Vec<f64> {
        self.inner.min.to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn max(&self) -> Vec<f64> {
        self.inner.max.to_vec()
    }

    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.inner.contains(&[x, y, z])
    }
}

impl From<BoundingBox3D> for BoundingBox<3> {
    fn from(b: BoundingBox3D) -> Self {
        b.inner
    }
}

/// WASM wrapper around a reusable k-d tree and its result buffer.
///
/// Both are kept between calls, so rebuilding every frame with the same number of
/// points and searching repeatedly does not allocate in steady state.
#[wasm_bindgen(js_name = KdTree)]
pub struct KdTreeWASM {
    tree: Option<KdTree>,
    results: SearchIterator,
}

#[wasm_bindgen(js_class = KdTree)]
impl KdTreeWASM {
    #[wasm_bindgen(constructor)]
    pub fn new() -> KdTreeWASM {
        KdTreeWASM {
            tree: None,
            results: SearchIterator::new(),
        }
    }

    /// Builds or rebuilds the tree from separate coordinate arrays of equal length.
    pub fn build(&mut self, xs: &[f64], ys: &[f64], zs: &[f64]) -> Result<(), JsError> {
        crate::build_into(&mut self.tree, xs, ys, zs, xs.len())?;
        Ok(())
    }

    /// Builds the tree over `count` random points inside `bounds` and returns them
    /// as `[x.., y.., z..]`. Inverted or infinite bounds are an error.
    pub fn random_points(&mut self, count: usize, bounds: BoundingBox3D, seed: u64) -> Result<Vec<f64>, JsError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let [xs, ys, zs] = random_points(&mut rng, count, &bounds.into())?;
        self.build(&xs, &ys, &zs)?;
        Ok(xs.into_iter().chain(ys).chain(zs).collect())
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.tree.as_ref().map_or(0, KdTree::len)
    }

    /// Indices of the points inside the box, in ascending order.
    pub fn search_space(&mut self, bounds: BoundingBox3D) -> Result<Vec<u32>, JsError> {
        let tree = self.tree.as_ref().ok_or(crate::KdTreeError::NotBuilt)?;
        tree.search_space(&bounds.into(), &mut self.results);
        Ok(self.sorted_results())
    }

    /// Indices of the points inside the cube of half-width `apothem`, in ascending order.
    pub fn search(&mut self, x: f64, y: f64, z: f64, apothem: f64) -> Result<Vec<u32>, JsError> {
        let tree = self.tree.as_ref().ok_or(crate::KdTreeError::NotBuilt)?;
        tree.search([x, y, z], apothem, &mut self.results)?;
        Ok(self.sorted_results())
    }

    pub fn release(&mut self) {
        crate::release_tree(&mut self.tree);
    }
}

impl KdTreeWASM {
    fn sorted_results(&mut self) -> Vec<u32> {
        self.results.sort();
        self.results.iter().map(|i| i as u32).collect()
    }
}

impl Default for KdTreeWASM {
    fn default() -> Self {
        Self::new()
    }
}
