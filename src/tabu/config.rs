//! Tabu Search configuration.

use super::types::TenurePolicy;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_tsp::tabu::{TabuConfig, TenurePolicy};
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tenure(TenurePolicy::Fixed(7))
///     .with_aspiration(true);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.tenure, TenurePolicy::Fixed(7));
/// ```
#[derive(Debug, Clone)]
pub struct TabuConfig {
    /// Maximum number of iterations. 0 = until the deadline.
    pub max_iterations: usize,
    /// How the tenure evolves.
    pub tenure: TenurePolicy,
    /// Whether to use aspiration criterion (override tabu if the move
    /// produces a new global best).
    pub aspiration: bool,
    /// Share of the time budget spent on the multi-start local search that
    /// seeds the tabu walk.
    pub warm_start_share: f64,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 0,
            tenure: TenurePolicy::default(),
            aspiration: true,
            warm_start_share: 0.3,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tenure policy.
    pub fn with_tenure(mut self, tenure: TenurePolicy) -> Self {
        self.tenure = tenure;
        self
    }

    /// Enables or disables aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets the warm-start share of the budget.
    pub fn with_warm_start_share(mut self, share: f64) -> Self {
        self.warm_start_share = share;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let TenurePolicy::Fixed(0) = self.tenure {
            return Err("fixed tenure must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.warm_start_share) {
            return Err(format!(
                "warm_start_share must be in [0, 1], got {}",
                self.warm_start_share
            ));
        }
        Ok(())
    }
}
