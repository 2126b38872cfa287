//! Solver configuration.

use std::path::PathBuf;

use crate::construct::Construction;
use crate::distance::DEFAULT_MATRIX_LIMIT;
use crate::error::ConfigError;
use crate::ils::IlsConfig;
use crate::local_search::LocalSearchConfig;
use crate::sa::SaConfig;
use crate::tabu::TabuConfig;
use crate::vns::VnsConfig;

/// Directory artifacts are written to unless configured otherwise.
pub const DEFAULT_ARTIFACT_DIR: &str = "results";

/// Tuning shared by every request a [`TspSolver`](super::TspSolver)
/// serves.
///
/// # Examples
///
/// ```
/// use u_tsp::{Construction, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_construction(Construction::GreedyEdge)
///     .with_matrix_limit(2_000)
///     .without_artifacts();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Largest instance whose distances are precomputed into a matrix.
    pub matrix_limit: usize,

    /// Heuristic that builds the first tour.
    pub construction: Construction,

    /// Where result artifacts go. `None` disables persistence.
    pub artifact_dir: Option<PathBuf>,

    /// Local search used by every improving variant.
    pub local_search: LocalSearchConfig,

    /// Iterated local search tuning.
    pub ils: IlsConfig,

    /// Tabu search tuning.
    pub tabu: TabuConfig,

    /// VNS tuning.
    pub vns: VnsConfig,

    /// Simulated annealing tuning.
    pub sa: SaConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            matrix_limit: DEFAULT_MATRIX_LIMIT,
            construction: Construction::default(),
            artifact_dir: Some(PathBuf::from(DEFAULT_ARTIFACT_DIR)),
            local_search: LocalSearchConfig::default(),
            ils: IlsConfig::default(),
            tabu: TabuConfig::default(),
            vns: VnsConfig::default(),
            sa: SaConfig::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_matrix_limit(mut self, n: usize) -> Self {
        self.matrix_limit = n;
        self
    }

    pub fn with_construction(mut self, construction: Construction) -> Self {
        self.construction = construction;
        self
    }

    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(dir.into());
        self
    }

    /// Disables artifact persistence.
    pub fn without_artifacts(mut self) -> Self {
        self.artifact_dir = None;
        self
    }

    pub fn with_local_search(mut self, config: LocalSearchConfig) -> Self {
        self.local_search = config;
        self
    }

    pub fn with_ils(mut self, config: IlsConfig) -> Self {
        self.ils = config;
        self
    }

    pub fn with_tabu(mut self, config: TabuConfig) -> Self {
        self.tabu = config;
        self
    }

    pub fn with_vns(mut self, config: VnsConfig) -> Self {
        self.vns = config;
        self
    }

    pub fn with_sa(mut self, config: SaConfig) -> Self {
        self.sa = config;
        self
    }

    /// Validates every section, naming the failing one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let section = |name: &str, result: Result<(), String>| {
            result.map_err(|e| ConfigError::InvalidConfig(format!("{name}: {e}")))
        };
        section("local_search", self.local_search.validate())?;
        section("ils", self.ils.validate())?;
        section("tabu", self.tabu.validate())?;
        section("vns", self.vns.validate())?;
        section("sa", self.sa.validate())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.matrix_limit, DEFAULT_MATRIX_LIMIT);
        assert_eq!(config.construction, Construction::NearestNeighbor);
        assert_eq!(config.artifact_dir, Some(PathBuf::from("results")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_names_section() {
        let config = SolverConfig::default().with_vns(VnsConfig::default().with_k_max(0));
        match config.validate() {
            Err(ConfigError::InvalidConfig(msg)) => assert!(msg.starts_with("vns:"), "{msg}"),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
