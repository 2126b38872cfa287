//! Local search configuration.

/// Configuration for [`LocalSearch`](super::LocalSearch).
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default()
///     .with_neighbors(8)
///     .with_or_opt(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearchConfig {
    /// Candidate list length per city. Capped at `N - 1`, where the
    /// neighbourhood becomes the complete one.
    pub neighbors: usize,

    /// Number of processed cities between two deadline checks.
    pub check_interval: usize,

    /// Whether Or-opt chain moves are tried after 2-opt.
    pub or_opt: bool,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            neighbors: 12,
            check_interval: 64,
            or_opt: true,
        }
    }
}

impl LocalSearchConfig {
    pub fn with_neighbors(mut self, k: usize) -> Self {
        self.neighbors = k;
        self
    }

    pub fn with_check_interval(mut self, n: usize) -> Self {
        self.check_interval = n;
        self
    }

    pub fn with_or_opt(mut self, enabled: bool) -> Self {
        self.or_opt = enabled;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.neighbors == 0 {
            return Err("neighbors must be at least 1".into());
        }
        if self.check_interval == 0 {
            return Err("check_interval must be at least 1".into());
        }
        Ok(())
    }
}
