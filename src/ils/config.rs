//! ILS configuration.

use crate::tour::DoubleBridge;

/// Rule deciding whether a repaired candidate replaces the current tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acceptance {
    /// Accept when the candidate is not longer than the current tour.
    ///
    /// Lets the search drift across plateaus of equal cost.
    #[default]
    NotWorse,

    /// Accept only strictly shorter candidates.
    Improving,
}

impl Acceptance {
    /// Whether a candidate of cost `candidate` replaces one of `current`.
    pub fn accepts(self, candidate: i64, current: i64) -> bool {
        match self {
            Acceptance::NotWorse => candidate <= current,
            Acceptance::Improving => candidate < current,
        }
    }
}

/// Configuration for [`IlsRunner`](super::IlsRunner).
///
/// # Examples
///
/// ```
/// use u_tsp::ils::{Acceptance, IlsConfig};
///
/// let config = IlsConfig::default()
///     .with_max_iterations(500)
///     .with_acceptance(Acceptance::Improving);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct IlsConfig {
    /// Kick/repair rounds. 0 = until the deadline.
    pub max_iterations: usize,

    /// Acceptance rule for repaired candidates.
    pub acceptance: Acceptance,

    /// Instances smaller than this skip the kick loop and return the
    /// first local optimum.
    pub min_cities: usize,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 0,
            acceptance: Acceptance::default(),
            min_cities: 8,
        }
    }
}

impl IlsConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_min_cities(mut self, n: usize) -> Self {
        self.min_cities = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_cities < DoubleBridge::MIN_CITIES {
            return Err(format!(
                "min_cities must be at least {}, got {}",
                DoubleBridge::MIN_CITIES,
                self.min_cities
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IlsConfig::default();
        assert_eq!(config.max_iterations, 0);
        assert_eq!(config.min_cities, 8);
        assert_eq!(config.acceptance, Acceptance::NotWorse);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_acceptance_rules() {
        assert!(Acceptance::NotWorse.accepts(10, 10));
        assert!(!Acceptance::Improving.accepts(10, 10));
        assert!(Acceptance::Improving.accepts(9, 10));
        assert!(!Acceptance::NotWorse.accepts(11, 10));
    }

    #[test]
    fn test_validate_min_cities() {
        assert!(IlsConfig::default().with_min_cities(3).validate().is_err());
    }
}
