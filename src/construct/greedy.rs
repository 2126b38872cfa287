//! Greedy edge construction.

use crate::distance::{Cost, DistanceModel};
use crate::error::InvariantError;
use crate::tour::Tour;

/// Candidate edges per city considered by the greedy pass.
const CANDIDATES: usize = 10;

/// Greedy-edge tour.
///
/// Candidate edges come from each city's nearest neighbours; fragments
/// left over after the greedy pass are joined endpoint to nearest
/// endpoint. Deterministic: no random stream is involved.
pub fn greedy_edge(dist: &DistanceModel) -> Result<Tour, InvariantError> {
    let n = dist.len();
    if n <= 3 {
        return Tour::from_order((0..n).collect(), dist);
    }

    let mut edges: Vec<(Cost, usize, usize)> = dist
        .nearest_neighbors(CANDIDATES.min(n - 1))
        .iter()
        .enumerate()
        .flat_map(|(i, list)| list.iter().map(move |&j| (dist.distance(i, j), i.min(j), i.max(j))))
        .collect();
    edges.sort_unstable();
    edges.dedup();

    let mut fragments = Fragments::new(n);
    for &(_, i, j) in &edges {
        fragments.try_link(i, j);
    }

    // Join the remaining fragments, nearest endpoint first.
    while fragments.links < n - 1 {
        let ends: Vec<usize> = (0..n).filter(|&c| fragments.degree(c) < 2).collect();
        let a = ends[0];
        let mut nearest = None;
        let mut nearest_dist = Cost::MAX;
        for &b in &ends[1..] {
            if fragments.can_link(a, b) && dist.distance(a, b) < nearest_dist {
                nearest = Some(b);
                nearest_dist = dist.distance(a, b);
            }
        }
        match nearest {
            Some(b) => {
                fragments.try_link(a, b);
            }
            None => break,
        }
    }

    Tour::from_order(fragments.into_order(), dist)
}

/// Path fragments under construction: degree-bounded adjacency plus a
/// union-find over fragment membership.
struct Fragments {
    adj: Vec<[usize; 2]>,
    deg: Vec<u8>,
    parent: Vec<usize>,
    links: usize,
}

impl Fragments {
    fn new(n: usize) -> Self {
        Self {
            adj: vec![[usize::MAX; 2]; n],
            deg: vec![0; n],
            parent: (0..n).collect(),
            links: 0,
        }
    }

    fn degree(&self, c: usize) -> u8 {
        self.deg[c]
    }

    fn root(&mut self, mut c: usize) -> usize {
        while self.parent[c] != c {
            self.parent[c] = self.parent[self.parent[c]];
            c = self.parent[c];
        }
        c
    }

    fn can_link(&mut self, a: usize, b: usize) -> bool {
        a != b && self.deg[a] < 2 && self.deg[b] < 2 && self.root(a) != self.root(b)
    }

    fn try_link(&mut self, a: usize, b: usize) -> bool {
        if !self.can_link(a, b) {
            return false;
        }
        self.adj[a][self.deg[a] as usize] = b;
        self.adj[b][self.deg[b] as usize] = a;
        self.deg[a] += 1;
        self.deg[b] += 1;
        let (ra, rb) = (self.root(a), self.root(b));
        self.parent[ra] = rb;
        self.links += 1;
        true
    }

    /// Walks the Hamiltonian path from one end. An incomplete path yields a
    /// short order, which `Tour::from_order` reports.
    fn into_order(self) -> Vec<usize> {
        let n = self.adj.len();
        let Some(start) = (0..n).find(|&c| self.deg[c] < 2) else {
            return Vec::new();
        };
        let mut order = Vec::with_capacity(n);
        let mut prev = usize::MAX;
        let mut cur = start;
        loop {
            order.push(cur);
            let next = self.adj[cur]
                .iter()
                .take(self.deg[cur] as usize)
                .copied()
                .find(|&c| c != prev);
            match next {
                Some(c) if order.len() < n => {
                    prev = cur;
                    cur = c;
                }
                _ => break,
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{generate_random, CityList};

    #[test]
    fn test_greedy_edge_on_square_picks_perimeter() {
        let cities = CityList::from_coords(
            "sq",
            &[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)],
        )
        .unwrap();
        let dist = DistanceModel::dense(&cities);
        let tour = greedy_edge(&dist).unwrap();
        assert_eq!(tour.cost(), 40);
    }

    #[test]
    fn test_greedy_edge_is_deterministic_and_valid() {
        for n in [2usize, 3, 4, 7, 50, 200] {
            let dist = DistanceModel::dense(&generate_random(n, n as u64).unwrap());
            let a = greedy_edge(&dist).unwrap();
            let b = greedy_edge(&dist).unwrap();
            assert_eq!(a, b);
            assert!(a.validate(&dist).is_ok(), "n={n}");
        }
    }

    #[test]
    fn test_greedy_edge_joins_distant_clusters() {
        // Two tight clusters far apart: neighbour lists never cross.
        let mut coords = Vec::new();
        for k in 0..12 {
            coords.push((k as f64, (k % 3) as f64));
            coords.push((50_000.0 + k as f64, (k % 3) as f64));
        }
        let dist = DistanceModel::dense(&CityList::from_coords("two", &coords).unwrap());
        let tour = greedy_edge(&dist).unwrap();
        assert!(tour.validate(&dist).is_ok());
    }
}
