//! Per-variant search pipelines.

use super::algorithm::Algorithm;
use super::config::SolverConfig;
use crate::construct::{multi_start, nearest_neighbor};
use crate::deadline::Deadline;
use crate::distance::{Cost, DistanceModel};
use crate::error::InvariantError;
use crate::ils::IlsRunner;
use crate::local_search::LocalSearch;
use crate::random::RandomStream;
use crate::sa::SaRunner;
use crate::tabu::TabuRunner;
use crate::tour::{BestSolution, Tour};
use crate::vns::VnsRunner;

/// Runs `algorithm` and returns the best tour with its improvement trace.
pub(crate) fn run(
    algorithm: Algorithm,
    config: &SolverConfig,
    dist: &DistanceModel,
    rng: &mut RandomStream,
    deadline: &Deadline,
) -> Result<(Tour, Vec<Cost>), InvariantError> {
    match algorithm {
        Algorithm::Construction => {
            let tour = config.construction.build(dist, rng)?;
            let history = vec![tour.cost()];
            Ok((tour, history))
        }
        Algorithm::ConstructionPlusLocalSearch => {
            let start = config.construction.build(dist, rng)?;
            let mut history = vec![start.cost()];
            let ls = LocalSearch::new(dist, &config.local_search);
            let out = ls.run(start, deadline);
            extend_history(&mut history, &[out.tour.cost()]);
            Ok((out.tour, history))
        }
        Algorithm::IteratedLocalSearch => {
            let start = config.construction.build(dist, rng)?;
            let mut history = vec![start.cost()];
            let ls = LocalSearch::new(dist, &config.local_search);
            let result = IlsRunner::run(&ls, start, &config.ils, rng, deadline)?;
            extend_history(&mut history, &result.cost_history);
            Ok((result.best, history))
        }
        Algorithm::MultiStartConstruction => {
            let outcome = multi_start(dist, rng, deadline)?;
            let history = vec![outcome.tour.cost()];
            Ok((outcome.tour, history))
        }
        Algorithm::MultiStartLocalSearch => {
            let ls = LocalSearch::new(dist, &config.local_search);
            let best = multi_start_local_search(&ls, rng, deadline)?;
            let history = best.history().to_vec();
            Ok((best.into_tour(), history))
        }
        Algorithm::TabuSearch => {
            let ls = LocalSearch::new(dist, &config.local_search);
            let warm_deadline = deadline.share(config.tabu.warm_start_share);
            let warm = multi_start_local_search(&ls, rng, &warm_deadline)?;
            let mut history = warm.history().to_vec();
            let result = TabuRunner::run(&ls, warm.into_tour(), &config.tabu, rng, deadline)?;
            extend_history(&mut history, &result.cost_history);
            Ok((result.best, history))
        }
        Algorithm::VariableNeighborhoodSearch => {
            let start = config.construction.build(dist, rng)?;
            let mut history = vec![start.cost()];
            let ls = LocalSearch::new(dist, &config.local_search);
            let result = VnsRunner::run(&ls, start, &config.vns, rng, deadline)?;
            extend_history(&mut history, &result.cost_history);
            Ok((result.best, history))
        }
        Algorithm::SimulatedAnnealing => {
            let start = config.construction.build(dist, rng)?;
            let mut history = vec![start.cost()];
            let ls = LocalSearch::new(dist, &config.local_search);
            let result = SaRunner::run(&ls, start, &config.sa, rng, deadline)?;
            extend_history(&mut history, &result.cost_history);
            Ok((result.best, history))
        }
    }
}

/// Nearest neighbour + local search from every start city in turn,
/// keeping the shortest tour. The first start always completes.
fn multi_start_local_search(
    ls: &LocalSearch<'_>,
    rng: &mut RandomStream,
    deadline: &Deadline,
) -> Result<BestSolution, InvariantError> {
    let dist = ls.dist();
    let first = ls.run(nearest_neighbor(dist, 0, rng)?, deadline).tour;
    let mut best = BestSolution::new(first, dist)?;

    for start in 1..dist.len() {
        if deadline.expired() {
            log::debug!("multi-start local search: deadline after {start} starts");
            break;
        }
        let tour = ls.run(nearest_neighbor(dist, start, rng)?, deadline).tour;
        best.offer_owned(tour, dist)?;
    }
    Ok(best)
}

/// Appends the entries of `more` that improve on the last recorded cost.
fn extend_history(history: &mut Vec<Cost>, more: &[Cost]) {
    for &cost in more {
        if history.last().is_none_or(|&last| cost < last) {
            history.push(cost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::generate_random;

    #[test]
    fn test_extend_history_keeps_strict_decrease() {
        let mut history = vec![100];
        extend_history(&mut history, &[120, 90, 90, 80, 85, 70]);
        assert_eq!(history, vec![100, 90, 80, 70]);
    }

    #[test]
    fn test_every_variant_returns_a_valid_tour() {
        let dist = DistanceModel::dense(&generate_random(30, 61).unwrap());
        let config = SolverConfig::default().without_artifacts();
        for algorithm in Algorithm::ALL {
            let deadline = Deadline::after(std::time::Duration::from_millis(100));
            let mut rng = RandomStream::from_seed(61);
            let (tour, history) = run(algorithm, &config, &dist, &mut rng, &deadline).unwrap();
            assert!(tour.validate(&dist).is_ok(), "{algorithm}");
            assert_eq!(history.last().copied(), Some(tour.cost()), "{algorithm}");
        }
    }

    #[test]
    fn test_multi_start_local_search_beats_single_start() {
        let dist = DistanceModel::dense(&generate_random(40, 62).unwrap());
        let ls = LocalSearch::new(&dist, &Default::default());
        let single = ls
            .run(
                nearest_neighbor(&dist, 0, &mut RandomStream::from_seed(1)).unwrap(),
                &Deadline::unbounded(),
            )
            .tour;
        let best = multi_start_local_search(&ls, &mut RandomStream::from_seed(1), &Deadline::unbounded()).unwrap();
        assert!(best.cost() <= single.cost());
    }
}
