//! Anytime Euclidean TSP engine.
//!
//! Given cities on a plane, a seed, a wall-clock budget and one of eight
//! search pipelines, returns the shortest closed tour it can find before
//! the budget runs out:
//!
//! - **Construction**: nearest neighbour, greedy edge and multi-start
//!   nearest neighbour ([`construct`]).
//! - **Local search**: 2-opt and Or-opt over candidate lists with
//!   don't-look bits ([`local_search`]).
//! - **Iterated Local Search (ILS)**: double-bridge kicks between
//!   descents ([`ils`]).
//! - **Tabu Search (TS)**: best admissible 2-opt move under short-term
//!   memory with aspiration ([`tabu`]).
//! - **Variable Neighborhood Search (VNS)**: shaking of growing strength
//!   between descents ([`vns`]).
//! - **Simulated Annealing (SA)**: Metropolis acceptance on a
//!   time-driven cooling schedule ([`sa`]).
//!
//! Every run owns its city list, distance model, tours and
//! [`RandomStream`]. Identical inputs that finish before the deadline give
//! identical tours. The best tour is re-verified before it is returned
//! and persisted as a JSON [`Artifact`].
//!
//! # Quick start
//!
//! ```
//! use std::time::Duration;
//! use u_tsp::{Algorithm, CityList, SolveRequest, SolverConfig, TspSolver};
//!
//! let cities = CityList::from_coords(
//!     "square",
//!     &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (50.0, 50.0)],
//! )
//! .unwrap();
//! let req = SolveRequest::new(
//!     "unused",
//!     1,
//!     Duration::from_millis(500),
//!     Algorithm::ConstructionPlusLocalSearch,
//! )
//! .unwrap();
//!
//! let solver = TspSolver::new(SolverConfig::default().without_artifacts());
//! let result = solver.solve_cities(&cities, &req).unwrap();
//! assert_eq!(result.tour.len(), 5);
//! assert!(result.cost <= 465);
//! ```

pub mod construct;
pub mod dataset;
pub mod deadline;
pub mod distance;
pub mod error;
pub mod ils;
pub mod local_search;
pub mod random;
pub mod sa;
pub mod solver;
pub mod tabu;
pub mod tour;
pub mod vns;

pub use construct::Construction;
pub use dataset::{generate_random, load_cities, City, CityList};
pub use deadline::Deadline;
pub use distance::{Cost, DistanceModel};
pub use error::{ArtifactError, ConfigError, DatasetError, InvariantError, SolveError};
pub use random::RandomStream;
pub use solver::{solve, Algorithm, Artifact, RunResult, SolveRequest, SolverConfig, TspSolver};
pub use tour::Tour;
