//! Solve requests and their validation.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use super::algorithm::Algorithm;
use super::artifact::sanitize_stem;
use crate::error::ConfigError;

/// A validated request: dataset, seed, time budget and variant.
///
/// Construction validates every field, so a request that exists is
/// runnable; dataset problems surface only when it is solved.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveRequest {
    /// Path of the TSPLIB or plain coordinate file.
    pub dataset: PathBuf,
    /// Seed of the run's random stream.
    pub seed: u64,
    /// Wall-clock budget.
    pub time_limit: Duration,
    /// Pipeline to run.
    pub algorithm: Algorithm,
    /// Artifact file stem; `<instance>_<algorithm>_<seed>` when unset.
    pub artifact_name: Option<String>,
}

impl SolveRequest {
    /// Builds a request from typed parameters.
    pub fn new(
        dataset: impl Into<PathBuf>,
        seed: u64,
        time_limit: Duration,
        algorithm: Algorithm,
    ) -> Result<Self, ConfigError> {
        if time_limit.is_zero() {
            return Err(ConfigError::InvalidTimeLimit(0.0));
        }
        Ok(Self {
            dataset: dataset.into(),
            seed,
            time_limit,
            algorithm,
            artifact_name: None,
        })
    }

    /// Builds a request from transport-level values.
    ///
    /// Negative seeds are reinterpreted bit-for-bit as unsigned.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::{Algorithm, ConfigError, SolveRequest};
    ///
    /// let req = SolveRequest::from_raw("data/att48.tsp", 7, 1.5, 2).unwrap();
    /// assert_eq!(req.algorithm, Algorithm::IteratedLocalSearch);
    ///
    /// let err = SolveRequest::from_raw("data/att48.tsp", 7, 0.0, 2).unwrap_err();
    /// assert_eq!(err, ConfigError::InvalidTimeLimit(0.0));
    /// ```
    pub fn from_raw(
        dataset: impl Into<PathBuf>,
        seed: i64,
        time_limit_seconds: f64,
        algorithm_code: i64,
    ) -> Result<Self, ConfigError> {
        let time_limit = time_limit_from_secs(time_limit_seconds)?;
        let algorithm = Algorithm::from_code(algorithm_code)?;
        Self::new(dataset, seed as u64, time_limit, algorithm)
    }

    /// Decodes a JSON request body:
    /// `{"datasetPath", "seed", "timeLimitSeconds", "algorithm"}` plus an
    /// optional `"artifactName"`.
    pub fn from_json(body: &str) -> Result<Self, ConfigError> {
        let raw: RawSolveRequest =
            serde_json::from_str(body).map_err(|e| ConfigError::MalformedRequest(e.to_string()))?;

        let time_limit = time_limit_from_secs(raw.time_limit_seconds)?;
        let algorithm = Algorithm::from_code(raw.algorithm)?;
        let seed = match &raw.seed {
            serde_json::Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_i64().map(|s| s as u64))
                .ok_or_else(|| ConfigError::InvalidSeed(n.to_string()))?,
            other => return Err(ConfigError::InvalidSeed(other.to_string())),
        };

        let mut req = Self::new(raw.dataset_path, seed, time_limit, algorithm)?;
        req.artifact_name = raw.artifact_name.as_deref().map(sanitize_stem);
        Ok(req)
    }

    /// Overrides the artifact file stem. Characters that are not
    /// file-safe are replaced, see [`sanitize_stem`].
    pub fn with_artifact_name(mut self, name: impl AsRef<str>) -> Self {
        self.artifact_name = Some(sanitize_stem(name.as_ref()));
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSolveRequest {
    dataset_path: PathBuf,
    seed: serde_json::Value,
    time_limit_seconds: f64,
    algorithm: i64,
    #[serde(default)]
    artifact_name: Option<String>,
}

fn time_limit_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::InvalidTimeLimit(secs));
    }
    match Duration::try_from_secs_f64(secs) {
        Ok(d) if !d.is_zero() => Ok(d),
        _ => Err(ConfigError::InvalidTimeLimit(secs)),
    }
}
