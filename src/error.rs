//! Error kinds surfaced by the solver.
//!
//! User-input problems ([`ConfigError`], [`DatasetError`]) are kept apart
//! from internal defects ([`InvariantError`]) so callers and logs can tell
//! a bad request from a bug in the move logic. Running out of time is not
//! an error: every run that passes validation yields a result.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid solve parameters, detected before any computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The time limit was zero, negative or not finite.
    #[error("time limit must be a positive number of seconds, got {0}")]
    InvalidTimeLimit(f64),

    /// The algorithm code does not name a known variant.
    #[error("unknown algorithm variant {0}")]
    UnknownAlgorithm(i64),

    /// The seed could not be read as an integer.
    #[error("seed must be an integer, got {0}")]
    InvalidSeed(String),

    /// The request body could not be decoded.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// A tuning parameter in the solver configuration is out of range.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

/// Failure to load a city list. Nothing is partially loaded.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset path does not exist.
    #[error("dataset file not found: {0}")]
    NotFound(PathBuf),

    /// The dataset exists but could not be read.
    #[error("cannot read dataset {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Two coordinate lines share an id.
    #[error("line {line}: duplicate city id {id}")]
    DuplicateIndex {
        /// One-based line number of the second occurrence.
        line: usize,
        /// The repeated id as written in the file.
        id: i64,
    },

    /// The ids do not form a contiguous range.
    #[error("city id {0} is missing from the coordinate section")]
    MissingIndex(i64),

    /// `DIMENSION` disagrees with the number of coordinate lines.
    #[error("DIMENSION declares {declared} cities but {found} were read")]
    DimensionMismatch {
        /// Value of the `DIMENSION` header.
        declared: usize,
        /// Coordinate lines actually read.
        found: usize,
    },

    /// `TYPE` names something other than a symmetric TSP.
    #[error("unsupported problem type '{0}', only TSP is accepted")]
    UnsupportedType(String),

    /// `EDGE_WEIGHT_TYPE` names something other than `EUC_2D`.
    #[error("unsupported edge weight type '{0}', only EUC_2D is accepted")]
    UnsupportedEdgeWeight(String),

    /// A coordinate is not finite or too large for integer tour lengths.
    #[error("city {index} at ({x}, {y}) lies outside the supported coordinate range")]
    CoordinateOutOfRange {
        /// Zero-based city index.
        index: usize,
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },

    /// Fewer than two cities were read.
    #[error("a tour needs at least 2 cities, found {0}")]
    TooFewCities(usize),
}

/// A produced tour broke an internal guarantee.
///
/// This always indicates a defect in construction, local search or move
/// logic; the run is aborted rather than returning a corrupted result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// The tour length differs from the number of cities.
    #[error("tour has {found} entries, expected {expected}")]
    WrongLength {
        /// Number of cities in the instance.
        expected: usize,
        /// Entries in the tour.
        found: usize,
    },

    /// A city index outside `0..n` appears in the tour.
    #[error("tour references city {city} outside 0..{n}")]
    OutOfRange {
        /// Offending index.
        city: usize,
        /// Number of cities.
        n: usize,
    },

    /// A city appears more than once.
    #[error("city {0} is visited more than once")]
    DuplicateCity(usize),

    /// The city → position index disagrees with the visiting order.
    #[error("position index of city {0} is stale")]
    StalePosition(usize),

    /// The cached tour cost diverged from the recomputed one.
    #[error("cached cost {cached} differs from recomputed cost {recomputed}")]
    CostMismatch {
        /// Cost carried by the tour.
        cached: i64,
        /// Cost obtained by summing the edges again.
        recomputed: i64,
    },
}

/// Failure to persist or re-read a result artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Filesystem failure while writing or reading the artifact.
    #[error("artifact {path}: {source}")]
    Io {
        /// Artifact location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The artifact content is not valid JSON for this format.
    #[error("artifact {path} is not a valid tour file: {source}")]
    Format {
        /// Artifact location.
        path: PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Any failure of [`crate::solver::TspSolver::solve`].
#[derive(Debug, Error)]
pub enum SolveError {
    /// Invalid request or configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The dataset could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Internal defect; never caused by user input.
    #[error("internal invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    /// The result could not be persisted.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl SolveError {
    /// Returns `true` when the caller can fix the failure by changing the
    /// request (bad parameters or a bad dataset).
    pub fn is_user_error(&self) -> bool {
        matches!(self, SolveError::Config(_) | SolveError::Dataset(_))
    }
}
