//! Solver orchestrator.
//!
//! Turns a [`SolveRequest`] into a verified [`RunResult`]:
//!
//! 1. validate parameters and configuration ([`ConfigError`](crate::ConfigError))
//! 2. load the dataset ([`DatasetError`](crate::DatasetError))
//! 3. build the distance model and the run's random stream
//! 4. run the selected [`Algorithm`] under the deadline
//! 5. re-verify the best tour ([`InvariantError`](crate::InvariantError))
//! 6. persist the [`Artifact`]
//!
//! Each run owns its city list, distances, tours and random stream, so
//! runs never share mutable state.

mod algorithm;
mod artifact;
mod config;
mod pipeline;
mod request;
mod runner;

pub use algorithm::Algorithm;
pub use artifact::{sanitize_stem, Artifact};
pub use config::{SolverConfig, DEFAULT_ARTIFACT_DIR};
pub use request::SolveRequest;
pub use runner::{default_artifact_name, solve, RunResult, TspSolver};
