//! Distance model.
//!
//! Distances follow the TSPLIB `EUC_2D` rule: the Euclidean distance
//! rounded to the nearest integer, `nint(sqrt(dx² + dy²))`. The rule is
//! the only one in the crate, so move deltas and recomputed tour lengths
//! always agree exactly.

mod grid;

use crate::dataset::CityList;
use grid::Grid;

/// Integer tour length / edge cost.
pub type Cost = i64;

/// Default largest instance for which a dense matrix is precomputed.
///
/// Dense models are built and scanned in O(N²) before the search starts
/// polling its deadline; above the limit, distances are computed on demand
/// and candidate lists come from a bucket grid in roughly O(N·k).
pub const DEFAULT_MATRIX_LIMIT: usize = 5_000;

/// `EUC_2D` distance between two points.
///
/// Absolute differences make the result independent of operand order.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::euc_2d;
///
/// assert_eq!(euc_2d((0.0, 0.0), (3.0, 4.0)), 5);
/// assert_eq!(euc_2d((0.0, 0.0), (1.0, 1.0)), 1); // 1.414 rounds down
/// assert_eq!(euc_2d((0.0, 0.0), (1.0, 2.0)), 2); // 2.236 rounds down
/// assert_eq!(euc_2d((0.0, 0.0), (0.0, 2.5)), 3); // halves round away from zero
/// ```
pub fn euc_2d(a: (f64, f64), b: (f64, f64)) -> Cost {
    let dx = (a.0 - b.0).abs();
    let dy = (a.1 - b.1).abs();
    (dx * dx + dy * dy).sqrt().round() as Cost
}

/// Symmetric cost between every pair of cities of one run.
///
/// Small instances precompute a dense matrix; large ones evaluate
/// [`euc_2d`] on demand to avoid O(N²) memory. Both storages return the
/// same values. Immutable once built and owned by a single run.
#[derive(Debug, Clone)]
pub struct DistanceModel {
    n: usize,
    storage: Storage,
}

#[derive(Debug, Clone)]
enum Storage {
    Matrix(Vec<Cost>),
    OnDemand(Vec<(f64, f64)>),
}

impl DistanceModel {
    /// Builds the model, using a dense matrix when `cities.len() <= matrix_limit`.
    pub fn new(cities: &CityList, matrix_limit: usize) -> Self {
        let coords: Vec<(f64, f64)> = cities.cities().iter().map(|c| (c.x, c.y)).collect();
        let n = coords.len();

        if n > matrix_limit {
            log::debug!("using on-demand distances for {n} cities");
            return Self {
                n,
                storage: Storage::OnDemand(coords),
            };
        }

        let mut matrix = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = euc_2d(coords[i], coords[j]);
                matrix[i * n + j] = d;
                matrix[j * n + i] = d;
            }
        }
        Self {
            n,
            storage: Storage::Matrix(matrix),
        }
    }

    /// Builds a dense-matrix model regardless of size.
    pub fn dense(cities: &CityList) -> Self {
        Self::new(cities, usize::MAX)
    }

    /// Builds an on-demand model regardless of size.
    pub fn on_demand(cities: &CityList) -> Self {
        Self::new(cities, 0)
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false` for a model built from a valid [`CityList`].
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Whether a dense matrix backs this model.
    pub fn is_dense(&self) -> bool {
        matches!(self.storage, Storage::Matrix(_))
    }

    /// Cost of edge `i`–`j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> Cost {
        match &self.storage {
            Storage::Matrix(m) => m[i * self.n + j],
            Storage::OnDemand(coords) => {
                if i == j {
                    0
                } else {
                    euc_2d(coords[i], coords[j])
                }
            }
        }
    }

    /// Length of the closed tour visiting `order` cyclically.
    pub fn tour_length(&self, order: &[usize]) -> Cost {
        if order.is_empty() {
            return 0;
        }
        let closing = self.distance(order[order.len() - 1], order[0]);
        order
            .windows(2)
            .map(|w| self.distance(w[0], w[1]))
            .sum::<Cost>()
            + closing
    }

    /// For every city, the `k` nearest other cities sorted by distance
    /// then index. `k` is capped at `n - 1`.
    ///
    /// Dense models scan every pair; on-demand models query a bucket grid,
    /// which yields the same lists without the quadratic scan.
    pub fn nearest_neighbors(&self, k: usize) -> Vec<Vec<usize>> {
        let k = k.min(self.n.saturating_sub(1));
        if let Storage::OnDemand(coords) = &self.storage {
            let grid = Grid::new(coords);
            return (0..self.n).map(|i| grid.nearest(i, k)).collect();
        }
        (0..self.n)
            .map(|i| {
                let key = |j: &usize| (self.distance(i, *j), *j);
                let mut others: Vec<usize> = (0..self.n).filter(|&j| j != i).collect();
                if k < others.len() {
                    others.select_nth_unstable_by_key(k, key);
                    others.truncate(k);
                }
                others.sort_by_key(key);
                others
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generate_random;

    fn square() -> CityList {
        CityList::from_coords(
            "square",
            &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (50.0, 50.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_rounding_rule() {
        assert_eq!(euc_2d((0.0, 0.0), (0.0, 0.49)), 0);
        assert_eq!(euc_2d((0.0, 0.0), (0.0, 0.5)), 1);
        assert_eq!(euc_2d((0.0, 0.0), (50.0, 50.0)), 71);
    }

    #[test]
    fn test_symmetry_and_zero_diagonal() {
        let cities = generate_random(40, 5).unwrap();
        for model in [DistanceModel::dense(&cities), DistanceModel::on_demand(&cities)] {
            for i in 0..cities.len() {
                assert_eq!(model.distance(i, i), 0);
                for j in 0..cities.len() {
                    assert_eq!(model.distance(i, j), model.distance(j, i));
                    assert!(model.distance(i, j) >= 0);
                }
            }
        }
    }

    #[test]
    fn test_dense_matches_on_demand() {
        let cities = generate_random(30, 8).unwrap();
        let dense = DistanceModel::dense(&cities);
        let lazy = DistanceModel::on_demand(&cities);
        assert!(dense.is_dense());
        assert!(!lazy.is_dense());
        for i in 0..30 {
            for j in 0..30 {
                assert_eq!(dense.distance(i, j), lazy.distance(i, j));
            }
        }
    }

    #[test]
    fn test_matrix_limit_selects_storage() {
        let cities = square();
        assert!(DistanceModel::new(&cities, 5).is_dense());
        assert!(!DistanceModel::new(&cities, 4).is_dense());
    }

    #[test]
    fn test_tour_length_closes_cycle() {
        let model = DistanceModel::dense(&square());
        assert_eq!(model.tour_length(&[0, 1, 2, 3]), 400);
        assert_eq!(model.tour_length(&[0, 1, 2, 3, 4]), 100 + 100 + 100 + 71 + 71);
    }

    #[test]
    fn test_grid_lists_match_full_scan() {
        let clustered: Vec<(f64, f64)> = (0..120)
            .map(|i| {
                let c = (i % 3) as f64 * 5_000.0;
                (c + (i * 7 % 13) as f64, c + (i * 11 % 17) as f64)
            })
            .collect();
        let collinear: Vec<(f64, f64)> = (0..60).map(|i| ((i * 37 % 60) as f64 * 2.5, 0.0)).collect();
        let duplicates: Vec<(f64, f64)> = (0..40).map(|i| ((i % 4) as f64, (i % 2) as f64)).collect();
        let lattice: Vec<(f64, f64)> = (0..100).map(|i| ((i % 10) as f64 * 3.0, (i / 10) as f64 * 3.0)).collect();

        let mut instances = vec![generate_random(300, 13).unwrap(), square()];
        for (name, coords) in [
            ("clustered", clustered),
            ("collinear", collinear),
            ("duplicates", duplicates),
            ("lattice", lattice),
        ] {
            instances.push(CityList::from_coords(name, &coords).unwrap());
        }

        for cities in &instances {
            let dense = DistanceModel::dense(cities);
            let lazy = DistanceModel::on_demand(cities);
            for k in [1, 5, 12, cities.len()] {
                assert_eq!(
                    lazy.nearest_neighbors(k),
                    dense.nearest_neighbors(k),
                    "{} k={k}",
                    cities.name()
                );
            }
        }
    }

    #[test]
    fn test_large_on_demand_lists_are_built_quickly() {
        let cities = generate_random(20_000, 14).unwrap();
        let model = DistanceModel::new(&cities, DEFAULT_MATRIX_LIMIT);
        assert!(!model.is_dense());

        let started = std::time::Instant::now();
        let lists = model.nearest_neighbors(8);
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
        assert_eq!(lists.len(), 20_000);
        assert!(lists.iter().all(|l| l.len() == 8));
    }

    #[test]
    fn test_nearest_neighbors_sorted() {
        let model = DistanceModel::dense(&square());
        let lists = model.nearest_neighbors(10);
        assert_eq!(lists[0].len(), 4);
        assert_eq!(lists[0][0], 4);
        for (i, list) in lists.iter().enumerate() {
            assert!(!list.contains(&i));
            for w in list.windows(2) {
                assert!(model.distance(i, w[0]) <= model.distance(i, w[1]));
            }
        }
        assert_eq!(model.nearest_neighbors(2)[4].len(), 2);
    }
}
