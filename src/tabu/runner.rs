//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the given tour
//! 2. At each iteration:
//!    a. Advance the tenure
//!    b. Scan the 2-opt moves of every city's candidate list
//!    c. Commit the best move whose four cities are not tabu (or a tabu
//!    move satisfying aspiration), even if it lengthens the tour
//!    d. Mark its four cities tabu and update the global best
//! 3. Stop at the deadline or the iteration limit
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search: Part I", *ORSA Journal on Computing* 1(3), 190-206.

use super::config::TabuConfig;
use super::types::{TabuList, Tenure};
use crate::deadline::Deadline;
use crate::distance::Cost;
use crate::error::InvariantError;
use crate::local_search::LocalSearch;
use crate::random::RandomStream;
use crate::tour::{BestSolution, Tour, TourMove, TwoOptMove};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best tour found.
    pub best: Tour,
    /// Cost of the best tour.
    pub best_cost: Cost,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best tour was found (0 = start tour).
    pub best_iteration: usize,
    /// Successive best costs.
    pub cost_history: Vec<Cost>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Smallest tour with a non-trivial 2-opt neighbourhood.
    pub const MIN_CITIES: usize = 5;

    /// Executes Tabu Search from `start`, scanning the candidate lists of
    /// `ls`.
    pub fn run(
        ls: &LocalSearch<'_>,
        start: Tour,
        config: &TabuConfig,
        rng: &mut RandomStream,
        deadline: &Deadline,
    ) -> Result<TabuResult, InvariantError> {
        let dist = ls.dist();
        let candidates = ls.candidates();
        let n = start.len();

        let mut best = BestSolution::new(start.clone(), dist)?;
        let mut current = start;
        let mut best_iteration = 0usize;
        let mut iterations = 0usize;

        if n >= Self::MIN_CITIES {
            let mut tenure = Tenure::new(config.tenure, n);
            let mut tabu = TabuList::new(n);

            while !deadline.expired() {
                if config.max_iterations > 0 && iterations >= config.max_iterations {
                    break;
                }
                iterations += 1;
                let t = tenure.advance(rng);

                // Best admissible move: (move, delta, touched cities).
                let mut chosen: Option<(TwoOptMove, Cost, [usize; 4])> = None;
                for a in 0..n {
                    for forward in [true, false] {
                        let b = if forward { current.succ(a) } else { current.pred(a) };
                        for &c in &candidates[a] {
                            let d = if forward { current.succ(c) } else { current.pred(c) };
                            if c == b || d == a {
                                continue;
                            }
                            let mv = if forward {
                                TwoOptMove::new(current.position(a), current.position(c))
                            } else {
                                TwoOptMove::new(current.position(b), current.position(d))
                            };
                            let delta = mv.delta(&current, dist);
                            if chosen.as_ref().is_some_and(|&(_, best_delta, _)| delta >= best_delta) {
                                continue;
                            }
                            let touched = [a, b, c, d];
                            let is_tabu = touched.iter().any(|&x| tabu.is_tabu(x, iterations, t));
                            if is_tabu && !(config.aspiration && current.cost() + delta < best.cost()) {
                                continue;
                            }
                            chosen = Some((mv, delta, touched));
                        }
                    }
                }

                let Some((mv, delta, touched)) = chosen else {
                    log::debug!("tabu: every move is tabu at iteration {iterations}");
                    continue;
                };
                current.commit(&mv, delta);
                for city in touched {
                    tabu.mark(city, iterations);
                }
                if current.cost() < best.cost() && best.offer(&current, dist)? {
                    best_iteration = iterations;
                }
            }
        }

        log::debug!(
            "tabu: {iterations} iterations, best {} at iteration {best_iteration}",
            best.cost()
        );

        let cost_history = best.history().to_vec();
        let best_cost = best.cost();
        Ok(TabuResult {
            best: best.into_tour(),
            best_cost,
            iterations,
            best_iteration,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generate_random;
    use crate::distance::DistanceModel;
    use crate::local_search::LocalSearchConfig;
    use crate::tabu::TenurePolicy;

    fn model(n: usize, seed: u64) -> DistanceModel {
        DistanceModel::dense(&generate_random(n, seed).unwrap())
    }

    fn identity(dist: &DistanceModel) -> Tour {
        Tour::from_order((0..dist.len()).collect(), dist).unwrap()
    }

    #[test]
    fn test_tabu_improves_and_never_reports_worse_than_start() {
        let dist = model(60, 31);
        let ls = LocalSearch::new(&dist, &LocalSearchConfig::default());
        let start = identity(&dist);
        let start_cost = start.cost();

        let result = TabuRunner::run(
            &ls,
            start,
            &TabuConfig::default().with_max_iterations(400),
            &mut RandomStream::from_seed(31),
            &Deadline::unbounded(),
        )
        .unwrap();

        assert_eq!(result.iterations, 400);
        assert!(result.best_cost < start_cost);
        assert!(result.best.validate(&dist).is_ok());
        assert_eq!(result.cost_history[0], start_cost);
    }

    #[test]
    fn test_tabu_escapes_local_optimum() {
        let dist = model(80, 32);
        let ls = LocalSearch::new(&dist, &LocalSearchConfig::default().with_or_opt(false));
        let optimum = ls.run(identity(&dist), &Deadline::unbounded()).tour;
        let optimum_cost = optimum.cost();

        let result = TabuRunner::run(
            &ls,
            optimum,
            &TabuConfig::default().with_max_iterations(50),
            &mut RandomStream::from_seed(32),
            &Deadline::unbounded(),
        )
        .unwrap();

        // Forced to move every iteration, never reports above the start.
        assert_eq!(result.iterations, 50);
        assert!(result.best_cost <= optimum_cost);
    }

    #[test]
    fn test_tabu_policies_are_deterministic() {
        let dist = model(40, 33);
        let ls = LocalSearch::new(&dist, &LocalSearchConfig::default());
        for policy in [
            TenurePolicy::Fixed(3),
            TenurePolicy::Size,
            TenurePolicy::Random,
            TenurePolicy::Linear,
        ] {
            let config = TabuConfig::default()
                .with_max_iterations(120)
                .with_tenure(policy);
            let run = || {
                TabuRunner::run(
                    &ls,
                    identity(&dist),
                    &config,
                    &mut RandomStream::from_seed(4),
                    &Deadline::unbounded(),
                )
                .unwrap()
            };
            let a = run();
            let b = run();
            assert_eq!(a.best.order(), b.best.order(), "{policy:?}");
            assert_eq!(a.best_iteration, b.best_iteration);
        }
    }
}
