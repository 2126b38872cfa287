//! SA configuration and cooling schedules.

/// How the temperature moves from `T_0` to `T_f` as the run progresses.
///
/// `p` is the completed share of the run in `[0, 1]`: the elapsed share
/// of the time budget, or of `max_iterations` when one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoolingSchedule {
    /// Geometric interpolation: `T(p) = T_0 * (T_f / T_0)^p`.
    ///
    /// The continuous-time analogue of `T_{k+1} = alpha * T_k`.
    #[default]
    Geometric,

    /// Linear interpolation: `T(p) = T_0 + p * (T_f - T_0)`.
    Linear,
}

impl CoolingSchedule {
    /// Temperature at progress `p`.
    pub fn temperature(self, t0: f64, tf: f64, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            CoolingSchedule::Geometric => t0 * (tf / t0).powf(p),
            CoolingSchedule::Linear => t0 + p * (tf - t0),
        }
    }
}

/// Configuration for the Simulated Annealing driver.
///
/// Temperatures are expressed as multiples of the mean edge length of the
/// start tour, which keeps the defaults meaningful across instance scales.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature_factor(0.8)
///     .with_final_temperature_factor(0.01)
///     .with_cooling(CoolingSchedule::Linear);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// `T_0` as a multiple of the mean edge length.
    pub initial_temperature_factor: f64,

    /// `T_f` as a multiple of the mean edge length.
    pub final_temperature_factor: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Probability of drawing an Or-opt move instead of a 2-opt move.
    pub or_opt_probability: f64,

    /// Share of the remaining budget spent annealing; the rest goes to the
    /// final local search.
    pub anneal_share: f64,

    /// Moves between two deadline checks and temperature updates.
    pub check_interval: usize,

    /// Maximum total moves. 0 = until the deadline.
    pub max_iterations: usize,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature_factor: 0.5,
            final_temperature_factor: 0.005,
            cooling: CoolingSchedule::default(),
            or_opt_probability: 0.3,
            anneal_share: 0.9,
            check_interval: 256,
            max_iterations: 0,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature_factor(mut self, f: f64) -> Self {
        self.initial_temperature_factor = f;
        self
    }

    pub fn with_final_temperature_factor(mut self, f: f64) -> Self {
        self.final_temperature_factor = f;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_or_opt_probability(mut self, p: f64) -> Self {
        self.or_opt_probability = p;
        self
    }

    pub fn with_anneal_share(mut self, share: f64) -> Self {
        self.anneal_share = share;
        self
    }

    pub fn with_check_interval(mut self, n: usize) -> Self {
        self.check_interval = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_temperature_factor.is_finite() || self.initial_temperature_factor <= 0.0 {
            return Err("initial_temperature_factor must be positive".into());
        }
        if !self.final_temperature_factor.is_finite() || self.final_temperature_factor <= 0.0 {
            return Err("final_temperature_factor must be positive".into());
        }
        if self.final_temperature_factor >= self.initial_temperature_factor {
            return Err(
                "final_temperature_factor must be less than initial_temperature_factor".into(),
            );
        }
        if !(0.0..=1.0).contains(&self.or_opt_probability) {
            return Err(format!(
                "or_opt_probability must be in [0, 1], got {}",
                self.or_opt_probability
            ));
        }
        if self.anneal_share.is_nan() || self.anneal_share <= 0.0 || self.anneal_share > 1.0 {
            return Err(format!(
                "anneal_share must be in (0, 1], got {}",
                self.anneal_share
            ));
        }
        if self.check_interval == 0 {
            return Err("check_interval must be at least 1".into());
        }
        Ok(())
    }
}
