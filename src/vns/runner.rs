//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Descend from the start tour to a local optimum x, set k = 0
//! 2. While the deadline has not passed:
//!    a. **Shaking**: apply k + 1 random double bridges to a copy of x
//!    b. **Local search**: repair from the rewired cities → x''
//!    c. **Move or not**: if f(x'') < f(x), set x = x'' and k = 0;
//!    otherwise k = k + 1
//!    d. If k = k_max, reset k = 0
//! 3. Return the best tour found
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use super::config::VnsConfig;
use crate::deadline::Deadline;
use crate::distance::{Cost, DistanceModel};
use crate::error::InvariantError;
use crate::local_search::LocalSearch;
use crate::random::RandomStream;
use crate::tour::{BestSolution, DoubleBridge, Tour};

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult {
    /// Best tour found.
    pub best: Tour,
    /// Cost of the best tour.
    pub best_cost: Cost,
    /// Total shake/repair steps executed.
    pub iterations: usize,
    /// Step at which the best tour was found (0 = first descent).
    pub best_iteration: usize,
    /// Successive best costs.
    pub cost_history: Vec<Cost>,
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes Basic VNS from `start`.
    pub fn run(
        ls: &LocalSearch<'_>,
        start: Tour,
        config: &VnsConfig,
        rng: &mut RandomStream,
        deadline: &Deadline,
    ) -> Result<VnsResult, InvariantError> {
        let dist = ls.dist();
        let n = start.len();

        let mut current = ls.run(start, deadline).tour;
        let mut best = BestSolution::new(current.clone(), dist)?;
        let mut best_iteration = 0;
        let mut iteration = 0;
        let mut k = 0;

        if n >= config.min_cities.max(DoubleBridge::MIN_CITIES) {
            while !deadline.expired() {
                if config.max_iterations > 0 && iteration >= config.max_iterations {
                    break;
                }
                iteration += 1;

                let (shaken, dirty) = shake(&current, k, dist, rng);
                let candidate = ls.run_from(shaken, &dirty, deadline).tour;

                if candidate.cost() < current.cost() {
                    current = candidate;
                    k = 0;
                    if best.offer(&current, dist)? {
                        best_iteration = iteration;
                    }
                } else {
                    k += 1;
                    if k == config.k_max {
                        k = 0;
                    }
                }
            }
        }

        log::debug!(
            "vns: {iteration} steps, best {} at step {best_iteration}",
            best.cost()
        );

        let cost_history = best.history().to_vec();
        let best_cost = best.cost();
        Ok(VnsResult {
            best: best.into_tour(),
            best_cost,
            iterations: iteration,
            best_iteration,
            cost_history,
        })
    }
}

/// Applies `k + 1` random double bridges to a copy of `tour`, returning
/// it with the rewired cities.
fn shake(
    tour: &Tour,
    k: usize,
    dist: &DistanceModel,
    rng: &mut RandomStream,
) -> (Tour, Vec<usize>) {
    let mut shaken = tour.clone();
    let mut dirty = Vec::with_capacity(6 * (k + 1));
    for _ in 0..=k {
        let kick = DoubleBridge::random(shaken.len(), rng);
        dirty.extend_from_slice(&kick.endpoints(&shaken));
        shaken.apply_move(&kick, dist);
    }
    (shaken, dirty)
}
