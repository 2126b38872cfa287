//! SA execution loop.

use super::config::SaConfig;
use super::types::SaMove;
use crate::deadline::Deadline;
use crate::distance::Cost;
use crate::error::InvariantError;
use crate::local_search::LocalSearch;
use crate::random::RandomStream;
use crate::tour::{BestSolution, Tour, TourMove};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best tour found, after the final local search.
    pub best: Tour,

    /// Cost of the best tour.
    pub best_cost: Cost,

    /// Total number of moves drawn.
    pub iterations: usize,

    /// Temperature when annealing stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Successive best costs.
    pub cost_history: Vec<Cost>,
}

/// Executes the Simulated Annealing driver.
pub struct SaRunner;

impl SaRunner {
    /// Smallest tour on which both move kinds are defined.
    pub const MIN_CITIES: usize = 5;

    /// Anneals from `start`, then polishes the best tour with `ls`.
    pub fn run(
        ls: &LocalSearch<'_>,
        start: Tour,
        config: &SaConfig,
        rng: &mut RandomStream,
        deadline: &Deadline,
    ) -> Result<SaResult, InvariantError> {
        let dist = ls.dist();
        let n = start.len();

        let mut best = BestSolution::new(start.clone(), dist)?;
        let mut current = start;

        let anneal = deadline.share(config.anneal_share);
        let clock = Deadline::after(anneal.remaining());
        let mean_edge = (current.cost() as f64 / n as f64).max(1.0);
        let t0 = mean_edge * config.initial_temperature_factor;
        let tf = mean_edge * config.final_temperature_factor;

        let mut temperature = t0;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        if n >= Self::MIN_CITIES {
            loop {
                if iterations.is_multiple_of(config.check_interval) {
                    if anneal.expired() {
                        break;
                    }
                    let progress = if config.max_iterations > 0 {
                        iterations as f64 / config.max_iterations as f64
                    } else {
                        clock.progress()
                    };
                    temperature = config.cooling.temperature(t0, tf, progress);
                }
                if config.max_iterations > 0 && iterations >= config.max_iterations {
                    break;
                }

                let mv = SaMove::random(n, config.or_opt_probability, rng);
                let delta = mv.delta(&current, dist);
                iterations += 1;

                // Metropolis acceptance criterion
                let accept = delta <= 0 || rng.unit() < (-(delta as f64) / temperature).exp();
                if !accept {
                    continue;
                }

                // Snapshot a new best only when the walk is about to leave it.
                if delta > 0 && current.cost() < best.cost() {
                    best.offer(&current, dist)?;
                }
                current.commit(&mv, delta);
                accepted_moves += 1;
                if delta < 0 {
                    improving_moves += 1;
                }
            }
            best.offer_owned(current, dist)?;
        }

        let polished = ls.run(best.tour().clone(), deadline);
        best.offer_owned(polished.tour, dist)?;

        log::debug!(
            "sa: {iterations} moves, {accepted_moves} accepted, final temperature {temperature:.3}, best {}",
            best.cost()
        );

        let cost_history = best.history().to_vec();
        let best_cost = best.cost();
        Ok(SaResult {
            best: best.into_tour(),
            best_cost,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cost_history,
        })
    }
}
