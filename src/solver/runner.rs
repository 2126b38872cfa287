//! Solver orchestration: validate, load, search, verify, persist.

use std::path::PathBuf;
use std::time::Duration;

use super::algorithm::Algorithm;
use super::artifact::{sanitize_stem, Artifact};
use super::config::SolverConfig;
use super::pipeline;
use super::request::SolveRequest;
use crate::dataset::{load_cities, CityList};
use crate::deadline::Deadline;
use crate::distance::{Cost, DistanceModel};
use crate::error::SolveError;
use crate::random::RandomStream;
use crate::tour::Tour;

/// Outcome of one solve.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Instance name.
    pub instance: String,
    /// Variant that ran.
    pub algorithm: Algorithm,
    /// Seed of the run.
    pub seed: u64,
    /// Best tour found, verified.
    pub tour: Tour,
    /// Its length.
    pub cost: Cost,
    /// Wall-clock time from request acceptance to verified result.
    pub elapsed: Duration,
    /// Successive best costs, from the first tour to `cost`.
    pub cost_history: Vec<Cost>,
    /// Where the artifact was written, when persistence is enabled.
    pub artifact_path: Option<PathBuf>,
}

impl RunResult {
    /// The artifact describing this run.
    pub fn to_artifact(&self) -> Artifact {
        Artifact {
            name: self.instance.clone(),
            dimension: self.tour.len(),
            algorithm: self.algorithm,
            seed: self.seed,
            cost: self.cost,
            tour: self.tour.order().to_vec(),
            elapsed_ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// The TSP engine. Holds only configuration, so one solver can serve
/// any number of requests, concurrently or not.
///
/// # Examples
///
/// ```no_run
/// use u_tsp::{SolveRequest, SolverConfig, TspSolver};
///
/// let solver = TspSolver::new(SolverConfig::default());
/// let req = SolveRequest::from_raw("data/berlin52.tsp", 1, 2.0, 2)?;
/// let result = solver.solve(&req)?;
/// println!("{} -> {}", result.instance, result.cost);
/// # Ok::<(), u_tsp::SolveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TspSolver {
    config: SolverConfig,
}

impl TspSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Loads the request's dataset and solves it.
    ///
    /// The clock starts before loading, so the time limit covers the whole
    /// request. Nothing is written when any step fails.
    pub fn solve(&self, req: &SolveRequest) -> Result<RunResult, SolveError> {
        self.config.validate()?;
        let deadline = Deadline::after(req.time_limit);
        let cities = load_cities(&req.dataset).inspect_err(|e| {
            log::warn!("cannot load {}: {e}", req.dataset.display());
        })?;
        self.solve_with_deadline(&cities, req, &deadline)
    }

    /// Solves an already loaded instance; `req.dataset` is ignored.
    pub fn solve_cities(&self, cities: &CityList, req: &SolveRequest) -> Result<RunResult, SolveError> {
        self.config.validate()?;
        let deadline = Deadline::after(req.time_limit);
        self.solve_with_deadline(cities, req, &deadline)
    }

    /// Solves independent requests, concurrently when the `parallel`
    /// feature is enabled. Results keep the order of `requests`.
    pub fn solve_batch(&self, requests: &[SolveRequest]) -> Vec<Result<RunResult, SolveError>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            requests.par_iter().map(|req| self.solve(req)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            requests.iter().map(|req| self.solve(req)).collect()
        }
    }

    fn solve_with_deadline(
        &self,
        cities: &CityList,
        req: &SolveRequest,
        deadline: &Deadline,
    ) -> Result<RunResult, SolveError> {
        let dist = DistanceModel::new(cities, self.config.matrix_limit);
        let mut rng = RandomStream::from_seed(req.seed);
        log::info!(
            "solving {} (n = {}, {} distances) with {}, seed {}, limit {:?}",
            cities.name(),
            cities.len(),
            if dist.is_dense() { "dense" } else { "on-demand" },
            req.algorithm,
            req.seed,
            req.time_limit
        );

        let (tour, cost_history) =
            pipeline::run(req.algorithm, &self.config, &dist, &mut rng, deadline).inspect_err(|e| {
                log::error!("{} on {}: {e}", req.algorithm, cities.name());
            })?;
        tour.validate(&dist).inspect_err(|e| {
            log::error!("final tour of {} on {} failed verification: {e}", req.algorithm, cities.name());
        })?;

        let cost = tour.cost();
        let mut result = RunResult {
            instance: cities.name().to_string(),
            algorithm: req.algorithm,
            seed: req.seed,
            tour,
            cost,
            elapsed: deadline.elapsed(),
            cost_history,
            artifact_path: None,
        };

        if let Some(dir) = &self.config.artifact_dir {
            let stem = req
                .artifact_name
                .clone()
                .unwrap_or_else(|| default_artifact_name(cities.name(), req.algorithm, req.seed));
            result.artifact_path = Some(result.to_artifact().write(dir, &stem)?);
        }

        log::info!(
            "{} on {}: cost {} after {} ms",
            req.algorithm,
            result.instance,
            result.cost,
            result.elapsed.as_millis()
        );
        Ok(result)
    }
}

/// `<instance>_<algorithm>_<seed>`, with the instance name reduced to
/// file-safe characters.
pub fn default_artifact_name(instance: &str, algorithm: Algorithm, seed: u64) -> String {
    format!("{}_{algorithm}_{seed}", sanitize_stem(instance))
}

/// Solves one request with the default configuration.
///
/// Parameters are validated before the dataset is touched.
pub fn solve(
    dataset: impl Into<PathBuf>,
    seed: i64,
    time_limit_seconds: f64,
    algorithm_code: i64,
) -> Result<RunResult, SolveError> {
    let req = SolveRequest::from_raw(dataset, seed, time_limit_seconds, algorithm_code)?;
    TspSolver::new(SolverConfig::default()).solve(&req)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, DatasetError};
    use std::fs;
    use std::path::Path;

    const SQUARE_PLUS_CENTER: &str = "\
NAME : square5
TYPE : TSP
DIMENSION : 5
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 100 0
3 100 100
4 0 100
5 50 50
EOF
";

    /// Perimeter with one side replaced by a detour through the center.
    const SQUARE_PLUS_CENTER_OPTIMUM: Cost = 442;

    fn write_dataset(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn solver_into(dir: &Path) -> TspSolver {
        TspSolver::new(SolverConfig::default().with_artifact_dir(dir.join("results")))
    }

    #[test]
    fn test_square_plus_center_within_five_percent() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(dir.path(), "square5.tsp", SQUARE_PLUS_CENTER);
        let solver = solver_into(dir.path());

        for seed in [0, 1, 7, 12345, -9] {
            let req = SolveRequest::from_raw(&dataset, seed, 1.0, 1).unwrap();
            let result = solver.solve(&req).unwrap();
            assert!(
                result.cost as f64 <= 1.05 * SQUARE_PLUS_CENTER_OPTIMUM as f64,
                "seed {seed}: {}",
                result.cost
            );

            let path = result.artifact_path.clone().unwrap();
            let artifact = Artifact::read(&path).unwrap();
            assert_eq!(artifact.dimension, 5);
            let mut sorted = artifact.tour.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_malformed_dataset_writes_no_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(dir.path(), "bad.txt", "1 0 0\n2 10 0\n3 abc 5\n4 0 10\n");
        let solver = solver_into(dir.path());

        let req = SolveRequest::from_raw(&dataset, 1, 1.0, 1).unwrap();
        let err = solver.solve(&req).unwrap_err();
        assert!(
            matches!(err, SolveError::Dataset(DatasetError::Malformed { line: 3, .. })),
            "{err:?}"
        );
        assert!(err.is_user_error());
        assert!(!dir.path().join("results").exists());
    }

    #[test]
    fn test_zero_time_limit_fails_before_loading() {
        let err = solve("/definitely/not/here.tsp", 1, 0.0, 1).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Config(ConfigError::InvalidTimeLimit(_))
        ));
    }

    #[test]
    fn test_unknown_algorithm_fails_before_loading() {
        let err = solve("/definitely/not/here.tsp", 1, 1.0, 42).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Config(ConfigError::UnknownAlgorithm(42))
        ));
    }

    #[test]
    fn test_missing_dataset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let solver = solver_into(dir.path());
        let req = SolveRequest::from_raw(dir.path().join("nope.tsp"), 1, 1.0, 0).unwrap();
        assert!(matches!(
            solver.solve(&req),
            Err(SolveError::Dataset(DatasetError::NotFound(_)))
        ));
    }

    #[test]
    fn test_local_search_variant_is_deterministic() {
        let cities = crate::dataset::generate_random(120, 71).unwrap();
        let solver = TspSolver::new(SolverConfig::default().without_artifacts());
        let req = SolveRequest::new("unused", 71, Duration::from_secs(30), Algorithm::ConstructionPlusLocalSearch)
            .unwrap();

        let a = solver.solve_cities(&cities, &req).unwrap();
        let b = solver.solve_cities(&cities, &req).unwrap();
        assert_eq!(a.tour.order(), b.tour.order());
        assert_eq!(a.cost, b.cost);
        assert!(a.artifact_path.is_none());
    }

    #[test]
    fn test_artifact_reproduces_cost() {
        let dir = tempfile::tempdir().unwrap();
        let cities = crate::dataset::generate_random(60, 72).unwrap();
        let dataset = dir.path().join("rand60.tsp");
        cities.write_tsplib(&dataset).unwrap();
        let solver = solver_into(dir.path());

        let req = SolveRequest::from_raw(&dataset, 72, 0.3, 2).unwrap();
        let result = solver.solve(&req).unwrap();
        let path = result.artifact_path.clone().unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("{}_ils_72.json", cities.name())
        );

        let artifact = Artifact::read(&path).unwrap();
        assert_eq!(artifact.cost, result.cost);
        assert_eq!(artifact.verify(&cities), Ok(result.cost));
        assert!(result.cost_history.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_artifact_name_override() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(dir.path(), "square5.tsp", SQUARE_PLUS_CENTER);
        let req = SolveRequest::from_raw(&dataset, 3, 0.5, 0)
            .unwrap()
            .with_artifact_name("custom");
        let result = solver_into(dir.path()).solve(&req).unwrap();
        assert_eq!(
            result.artifact_path.unwrap(),
            dir.path().join("results").join("custom.json")
        );
    }

    #[test]
    fn test_instance_name_with_path_characters_stays_in_artifact_dir() {
        let dir = tempfile::tempdir().unwrap();
        let solver = solver_into(dir.path());
        let results = dir.path().join("results");

        for (file, name, expected) in [
            ("slash.tsp", "berlin/52", "berlin_52_construction_ls_1.json"),
            ("escape.tsp", "../escaped", ".._escaped_construction_ls_1.json"),
        ] {
            let body = SQUARE_PLUS_CENTER.replace("NAME : square5", &format!("NAME : {name}"));
            let dataset = write_dataset(dir.path(), file, &body);
            let req = SolveRequest::from_raw(&dataset, 1, 1.0, 1).unwrap();
            let result = solver.solve(&req).unwrap();

            assert_eq!(result.instance, name);
            let path = result.artifact_path.unwrap();
            assert_eq!(path, results.join(expected));
            assert!(path.exists());
        }
        assert!(!dir.path().join("escaped_construction_ls_1.json").exists());
    }

    #[test]
    fn test_variant_ordering_on_mean_cost() {
        let cities = crate::dataset::generate_random(150, 75).unwrap();
        let solver = TspSolver::new(SolverConfig::default().without_artifacts());
        let seeds = [1i64, 2, 3, 4, 5];

        let mean_cost = |code: i64| {
            let total: Cost = seeds
                .iter()
                .map(|&seed| {
                    let req = SolveRequest::from_raw("unused", seed, 0.3, code).unwrap();
                    solver.solve_cities(&cities, &req).unwrap().cost
                })
                .sum();
            total as f64 / seeds.len() as f64
        };

        let construction = mean_cost(0);
        let local_search = mean_cost(1);
        let ils = mean_cost(2);
        assert!(local_search <= construction, "{local_search} > {construction}");
        assert!(ils <= local_search, "{ils} > {local_search}");
        assert!(local_search < construction);
    }

    #[test]
    fn test_every_variant_respects_time_limit() {
        let cities = crate::dataset::generate_random(300, 73).unwrap();
        let solver = TspSolver::new(SolverConfig::default().without_artifacts());
        for algorithm in Algorithm::ALL {
            let req = SolveRequest::new("unused", 5, Duration::from_millis(200), algorithm).unwrap();
            let result = solver.solve_cities(&cities, &req).unwrap();
            assert!(
                result.elapsed < Duration::from_millis(200 + 800),
                "{algorithm} took {:?}",
                result.elapsed
            );
            assert!(result.tour.validate(&DistanceModel::dense(&cities)).is_ok());
        }
    }

    #[test]
    fn test_batch_matches_sequential_for_deterministic_variants() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("rand80.tsp");
        crate::dataset::generate_random(80, 74)
            .unwrap()
            .write_tsplib(&dataset)
            .unwrap();
        let solver = TspSolver::new(SolverConfig::default().without_artifacts());

        let requests: Vec<SolveRequest> = [(1, 0), (2, 0), (3, 1), (4, 1)]
            .iter()
            .map(|&(seed, code)| SolveRequest::from_raw(&dataset, seed, 30.0, code).unwrap())
            .collect();
        let batch = solver.solve_batch(&requests);
        assert_eq!(batch.len(), requests.len());
        for (req, res) in requests.iter().zip(batch) {
            let sequential = solver.solve(req).unwrap();
            let batched = res.unwrap();
            assert_eq!(batched.tour.order(), sequential.tour.order());
        }
    }
}
