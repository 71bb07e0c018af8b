use kdthree::{BoundingBox, KdTree, LinearScan, RangeQuery, SearchIterator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_cloud(rng: &mut StdRng, n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let bounds = BoundingBox::new([0.0, 0.0, 0.0], [10.0, 10.0, 10.0]);
    let [xs, ys, zs] = kdthree::random_points(rng, n, &bounds).unwrap();
    (xs, ys, zs)
}

/// Coordinates snapped to a coarse lattice so that many points share split values.
fn lattice_cloud(rng: &mut StdRng, n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut coord = || rng.gen_range(0..5) as f64 * 0.5;
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    let mut zs = Vec::with_capacity(n);
    for _ in 0..n {
        xs.push(coord());
        ys.push(coord());
        zs.push(coord());
    }
    (xs, ys, zs)
}

fn random_box(rng: &mut StdRng) -> BoundingBox {
    let mut min = [0.0; 3];
    let mut max = [0.0; 3];
    for i in 0..3 {
        let a: f64 = rng.gen_range(-1.0..11.0);
        let b: f64 = rng.gen_range(-1.0..11.0);
        min[i] = a.min(b);
        max[i] = a.max(b);
    }
    BoundingBox::new(min, max)
}

fn assert_same(tree: &KdTree, scan: &LinearScan, query: &BoundingBox, a: &mut SearchIterator, b: &mut SearchIterator) {
    tree.query(query, a);
    scan.query(query, b);
    a.sort();
    assert_eq!(a.as_slice(), b.as_slice(), "Mismatch for query {:?}", query);
}

#[test]
fn test_random_boxes_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut a = SearchIterator::new();
    let mut b = SearchIterator::new();

    for &n in &[2usize, 3, 10, 97, 1000] {
        let (xs, ys, zs) = random_cloud(&mut rng, n);
        let tree = KdTree::new(&xs, &ys, &zs, n).unwrap();
        let scan = LinearScan::new(&xs, &ys, &zs, n).unwrap();

        for _ in 0..200 {
            let query = random_box(&mut rng);
            assert_same(&tree, &scan, &query, &mut a, &mut b);
        }
    }
}

#[test]
fn test_lattice_boxes_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut a = SearchIterator::new();
    let mut b = SearchIterator::new();

    for &n in &[2usize, 16, 200, 2000] {
        let (xs, ys, zs) = lattice_cloud(&mut rng, n);
        let tree = KdTree::new(&xs, &ys, &zs, n).unwrap();
        let scan = LinearScan::new(&xs, &ys, &zs, n).unwrap();

        for _ in 0..200 {
            // boxes whose faces land on lattice values exercise the inclusive boundaries
            let mut min = [0.0; 3];
            let mut max = [0.0; 3];
            for i in 0..3 {
                let lo = rng.gen_range(0..5) as f64 * 0.5;
                let hi = rng.gen_range(0..5) as f64 * 0.5;
                min[i] = lo.min(hi);
                max[i] = lo.max(hi);
            }
            assert_same(&tree, &scan, &BoundingBox::new(min, max), &mut a, &mut b);
        }
    }
}

#[test]
fn test_degenerate_boxes_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(3);
    let (xs, ys, zs) = lattice_cloud(&mut rng, 300);
    let tree = KdTree::new(&xs, &ys, &zs, 300).unwrap();
    let scan = LinearScan::new(&xs, &ys, &zs, 300).unwrap();
    let mut a = SearchIterator::new();
    let mut b = SearchIterator::new();

    for _ in 0..100 {
        // zero-width boxes on lattice values select exact duplicates
        let c = [
            rng.gen_range(0..5) as f64 * 0.5,
            rng.gen_range(0..5) as f64 * 0.5,
            rng.gen_range(0..5) as f64 * 0.5,
        ];
        assert_same(&tree, &scan, &BoundingBox::cube(c, 0.0), &mut a, &mut b);

        // inverted boxes are empty
        let mut inverted = random_box(&mut rng);
        inverted.min[rng.gen_range(0..3)] = 20.0;
        tree.query(&inverted, &mut a);
        assert!(a.is_empty(), "Inverted box {:?} matched {:?}", inverted, a.as_slice());
    }
}

#[test]
fn test_cube_search_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(99);
    let (xs, ys, zs) = random_cloud(&mut rng, 800);
    let tree = KdTree::new(&xs, &ys, &zs, 800).unwrap();
    let scan = LinearScan::new(&xs, &ys, &zs, 800).unwrap();
    let mut a = SearchIterator::new();
    let mut b = SearchIterator::new();

    for _ in 0..300 {
        let center = [
            rng.gen_range(0.0..10.0),
            rng.gen_range(0.0..10.0),
            rng.gen_range(0.0..10.0),
        ];
        let apothem = rng.gen_range(0.0..3.0);
        tree.search(center, apothem, &mut a).unwrap();
        scan.query(&BoundingBox::cube(center, apothem), &mut b);
        a.sort();
        assert_eq!(a.as_slice(), b.as_slice());
    }
}

#[test]
fn test_every_result_is_inside_the_box() {
    let mut rng = StdRng::seed_from_u64(5);
    let (xs, ys, zs) = random_cloud(&mut rng, 500);
    let tree = KdTree::new(&xs, &ys, &zs, 500).unwrap();
    let mut iter = SearchIterator::new();

    for _ in 0..100 {
        let query = random_box(&mut rng);
        tree.search_space(&query, &mut iter);
        let mut seen = vec![false; 500];
        for i in iter.by_ref() {
            assert!(query.contains(&[xs[i], ys[i], zs[i]]));
            assert!(!seen[i], "Index {} reported twice", i);
            seen[i] = true;
        }
    }
}
