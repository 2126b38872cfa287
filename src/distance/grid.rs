//! Uniform bucket grid for candidate-list queries on large instances.

use super::{euc_2d, Cost};

/// Cities bucketed into square cells of side `cell`, about two per cell.
pub(super) struct Grid<'a> {
    coords: &'a [(f64, f64)],
    origin: (f64, f64),
    cell: f64,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<usize>>,
}

impl<'a> Grid<'a> {
    pub(super) fn new(coords: &'a [(f64, f64)]) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in coords {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let n = coords.len().max(1) as f64;
        let width = (max_x - min_x).max(0.0);
        let height = (max_y - min_y).max(0.0);

        // Thin or collinear layouts still get at most ~2n cells per axis.
        let mut cell = (2.0 * width * height / n)
            .sqrt()
            .max(width / (2.0 * n))
            .max(height / (2.0 * n));
        if !(cell.is_finite() && cell > 0.0) {
            cell = 1.0;
        }
        let cols = (width / cell) as usize + 1;
        let rows = (height / cell) as usize + 1;

        let mut grid = Self {
            coords,
            origin: (min_x, min_y),
            cell,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        };
        for (i, &p) in coords.iter().enumerate() {
            let (cx, cy) = grid.cell_of(p);
            grid.buckets[cy * cols + cx].push(i);
        }
        grid
    }

    fn cell_of(&self, (x, y): (f64, f64)) -> (usize, usize) {
        let cx = ((x - self.origin.0) / self.cell) as usize;
        let cy = ((y - self.origin.1) / self.cell) as usize;
        (cx.min(self.cols - 1), cy.min(self.rows - 1))
    }

    /// The `k` cities nearest to `i`, sorted by distance then index.
    ///
    /// Rings of cells are scanned outwards until no unscanned city can
    /// beat or tie the current `k`-th key, so the result equals a full
    /// scan.
    pub(super) fn nearest(&self, i: usize, k: usize) -> Vec<usize> {
        let p = self.coords[i];
        let (cx, cy) = self.cell_of(p);
        let mut found: Vec<(Cost, usize)> = Vec::new();

        for ring in 0..=self.cols.max(self.rows) {
            self.for_each_in_ring(cx, cy, ring, |j| {
                if j != i {
                    found.push((euc_2d(p, self.coords[j]), j));
                }
            });
            if k == 0 {
                break;
            }
            if found.len() >= k {
                found.sort_unstable();
                found.truncate(k);
                // Unscanned cities lie at least `ring * cell` away.
                let reach = ring as f64 * self.cell * (1.0 - 1e-9);
                if found[k - 1].0 as f64 + 1.0 <= reach {
                    break;
                }
            }
        }

        found.sort_unstable();
        found.truncate(k);
        found.into_iter().map(|(_, j)| j).collect()
    }

    fn for_each_in_ring(&self, cx: usize, cy: usize, ring: usize, mut visit: impl FnMut(usize)) {
        let (cx, cy, r) = (cx as isize, cy as isize, ring as isize);
        let (cols, rows) = (self.cols as isize, self.rows as isize);
        let mut bucket = |gx: isize, gy: isize| {
            if (0..cols).contains(&gx) && (0..rows).contains(&gy) {
                for &j in &self.buckets[(gy * cols + gx) as usize] {
                    visit(j);
                }
            }
        };

        if r == 0 {
            bucket(cx, cy);
            return;
        }
        let (x0, x1) = ((cx - r).max(0), (cx + r).min(cols - 1));
        for gx in x0..=x1 {
            bucket(gx, cy - r);
            bucket(gx, cy + r);
        }
        let (y0, y1) = ((cy - r + 1).max(0), (cy + r - 1).min(rows - 1));
        for gy in y0..=y1 {
            bucket(cx - r, gy);
            bucket(cx + r, gy);
        }
    }
}
