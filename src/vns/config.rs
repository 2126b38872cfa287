//! Variable Neighborhood Search configuration.

/// Configuration parameters for Variable Neighborhood Search.
///
/// # Examples
///
/// ```
/// use u_tsp::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_k_max(3)
///     .with_max_iterations(1000);
/// assert_eq!(config.k_max, 3);
/// assert_eq!(config.max_iterations, 1000);
/// ```
#[derive(Debug, Clone)]
pub struct VnsConfig {
    /// Number of neighbourhoods. Neighbourhood `k` (from 0) shakes with
    /// `k + 1` segment swaps.
    pub k_max: usize,
    /// Maximum number of shake/repair steps. 0 = until the deadline.
    pub max_iterations: usize,
    /// Instances smaller than this return the first local optimum.
    pub min_cities: usize,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            k_max: 5,
            max_iterations: 0,
            min_cities: 8,
        }
    }
}

impl VnsConfig {
    /// Sets the number of neighbourhoods.
    pub fn with_k_max(mut self, k: usize) -> Self {
        self.k_max = k;
        self
    }

    /// Sets the maximum number of shake/repair steps.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the smallest instance that is shaken.
    pub fn with_min_cities(mut self, n: usize) -> Self {
        self.min_cities = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.k_max == 0 {
            return Err("k_max must be at least 1".into());
        }
        if self.min_cities < crate::tour::DoubleBridge::MIN_CITIES {
            return Err(format!(
                "min_cities must be at least {}",
                crate::tour::DoubleBridge::MIN_CITIES
            ));
        }
        Ok(())
    }
}
