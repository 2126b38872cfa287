//! Construction heuristics.
//!
//! Produce the first feasible tour of a run:
//!
//! - **Nearest neighbour**: from a seed-chosen city, repeatedly visit the
//!   closest unvisited city. Ties are broken uniformly through the run's
//!   [`RandomStream`].
//! - **Greedy edge**: add the shortest edges that keep every city at
//!   degree ≤ 2 and create no premature cycle, then close the tour.
//! - **Multi-start**: nearest neighbour from every city in turn, keeping
//!   the shortest, until the deadline.
//!
//! # References
//!
//! - Rosenkrantz, Stearns & Lewis (1977), "An Analysis of Several
//!   Heuristics for the Traveling Salesman Problem"
//! - Johnson & McGeoch (1997), "The Traveling Salesman Problem: A Case
//!   Study in Local Optimization"

mod greedy;

pub use greedy::greedy_edge;

use crate::deadline::Deadline;
use crate::distance::{Cost, DistanceModel};
use crate::error::InvariantError;
use crate::random::RandomStream;
use crate::tour::Tour;

/// Which construction seeds the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Construction {
    /// Nearest neighbour from a random start city.
    #[default]
    NearestNeighbor,
    /// Greedy edge matching; deterministic.
    GreedyEdge,
}

impl Construction {
    /// Builds a tour with this heuristic.
    pub fn build(self, dist: &DistanceModel, rng: &mut RandomStream) -> Result<Tour, InvariantError> {
        match self {
            Construction::NearestNeighbor => {
                let start = random_start(dist.len(), rng);
                nearest_neighbor(dist, start, rng)
            }
            Construction::GreedyEdge => greedy_edge(dist),
        }
    }
}

/// The seed-chosen first city.
pub fn random_start(n: usize, rng: &mut RandomStream) -> usize {
    rng.index(n)
}

/// Nearest-neighbour tour from `start`.
///
/// The stream is consumed only when several unvisited cities are equally
/// near, so tie-free instances give the same tour for every seed.
///
/// # Examples
///
/// ```
/// use u_tsp::construct::nearest_neighbor;
/// use u_tsp::{CityList, DistanceModel, RandomStream};
///
/// let cities = CityList::from_coords("l", &[(0.0, 0.0), (5.0, 0.0), (1.0, 0.0), (9.0, 0.0)]).unwrap();
/// let dist = DistanceModel::dense(&cities);
/// let tour = nearest_neighbor(&dist, 0, &mut RandomStream::from_seed(1)).unwrap();
/// assert_eq!(tour.order(), &[0, 2, 1, 3]);
/// ```
pub fn nearest_neighbor(
    dist: &DistanceModel,
    start: usize,
    rng: &mut RandomStream,
) -> Result<Tour, InvariantError> {
    let n = dist.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = start;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let mut chosen = None;
        let mut chosen_dist = Cost::MAX;
        let mut ties = 0usize;

        for (city, _) in visited.iter().enumerate().filter(|(_, &v)| !v) {
            let d = dist.distance(current, city);
            if d < chosen_dist {
                chosen = Some(city);
                chosen_dist = d;
                ties = 1;
            } else if d == chosen_dist {
                // Reservoir choice keeps every tied city equally likely.
                ties += 1;
                if rng.index(ties) == 0 {
                    chosen = Some(city);
                }
            }
        }

        let Some(next) = chosen else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Tour::from_order(order, dist)
}

/// Result of [`multi_start`].
#[derive(Debug, Clone)]
pub struct MultiStartOutcome {
    /// Shortest tour found.
    pub tour: Tour,
    /// Start city of that tour.
    pub start: usize,
    /// Number of start cities tried.
    pub starts: usize,
    /// Whether every city was tried before the deadline.
    pub completed: bool,
}

/// Nearest neighbour from every start city, keeping the shortest tour.
///
/// The deadline is checked between starts; the first start always runs so
/// a tour is returned even with an expired deadline.
pub fn multi_start(
    dist: &DistanceModel,
    rng: &mut RandomStream,
    deadline: &Deadline,
) -> Result<MultiStartOutcome, InvariantError> {
    let n = dist.len();
    let mut best = nearest_neighbor(dist, 0, rng)?;
    let mut best_start = 0;
    let mut starts = 1;

    for start in 1..n {
        if deadline.expired() {
            break;
        }
        let tour = nearest_neighbor(dist, start, rng)?;
        starts += 1;
        if tour.cost() < best.cost() {
            log::debug!("multi-start: start {start} improves to {}", tour.cost());
            best = tour;
            best_start = start;
        }
    }

    Ok(MultiStartOutcome {
        tour: best,
        start: best_start,
        starts,
        completed: starts == n,
    })
}
