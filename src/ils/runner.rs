//! ILS execution loop.
//!
//! # Algorithm
//!
//! 1. Descend from the start tour to a local optimum (`current`)
//! 2. Until the deadline or the round limit:
//!    a. Copy `current` and apply a random double-bridge
//!    b. Repair with local search seeded by the six rewired cities
//!    c. Offer the result to the best-so-far tracker
//!    d. Continue from the result if the acceptance rule allows it

use super::config::IlsConfig;
use crate::deadline::Deadline;
use crate::distance::Cost;
use crate::error::InvariantError;
use crate::local_search::LocalSearch;
use crate::random::RandomStream;
use crate::tour::{BestSolution, DoubleBridge, Tour};

/// Result of an ILS run.
#[derive(Debug, Clone)]
pub struct IlsResult {
    /// Best tour found.
    pub best: Tour,
    /// Cost of the best tour.
    pub best_cost: Cost,
    /// Kick/repair rounds executed.
    pub iterations: usize,
    /// Round at which the best tour was found (0 = first descent).
    pub best_iteration: usize,
    /// Rounds whose candidate was accepted as the new current tour.
    pub accepted: usize,
    /// Successive best costs.
    pub cost_history: Vec<Cost>,
}

/// Iterated Local Search runner.
pub struct IlsRunner;

impl IlsRunner {
    /// Runs ILS from `start` until `deadline`.
    ///
    /// Always returns the best tour seen, even when the deadline has
    /// already passed.
    pub fn run(
        ls: &LocalSearch<'_>,
        start: Tour,
        config: &IlsConfig,
        rng: &mut RandomStream,
        deadline: &Deadline,
    ) -> Result<IlsResult, InvariantError> {
        let dist = ls.dist();
        let n = start.len();

        let first = ls.run(start, deadline);
        let mut best = BestSolution::new(first.tour.clone(), dist)?;
        let mut current = first.tour;
        let mut iterations = 0usize;
        let mut best_iteration = 0usize;
        let mut accepted = 0usize;

        if n >= config.min_cities.max(DoubleBridge::MIN_CITIES) {
            while !deadline.expired() {
                if config.max_iterations > 0 && iterations >= config.max_iterations {
                    break;
                }

                let mut candidate = current.clone();
                let kick = DoubleBridge::random(n, rng);
                let dirty = kick.endpoints(&candidate);
                candidate.apply_move(&kick, dist);
                let repaired = ls.run_from(candidate, &dirty, deadline).tour;
                iterations += 1;

                if best.offer(&repaired, dist)? {
                    best_iteration = iterations;
                }
                if config.acceptance.accepts(repaired.cost(), current.cost()) {
                    current = repaired;
                    accepted += 1;
                }
            }
        }

        log::debug!(
            "ils: {iterations} rounds, {accepted} accepted, best {} at round {best_iteration}",
            best.cost()
        );

        let cost_history = best.history().to_vec();
        let best_cost = best.cost();
        Ok(IlsResult {
            best: best.into_tour(),
            best_cost,
            iterations,
            best_iteration,
            accepted,
            cost_history,
        })
    }
}
