//! Algorithm variants selectable by a request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The search pipeline run for a request.
///
/// Integer codes are part of the request format and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Construction only (code 0).
    #[serde(rename = "construction")]
    Construction,
    /// Construction followed by one local search descent (code 1).
    #[serde(rename = "construction_ls")]
    ConstructionPlusLocalSearch,
    /// Iterated local search with double-bridge kicks (code 2).
    #[serde(rename = "ils")]
    IteratedLocalSearch,
    /// Nearest neighbour from every start city (code 3).
    #[serde(rename = "multi_start")]
    MultiStartConstruction,
    /// Nearest neighbour plus local search from every start city (code 4).
    #[serde(rename = "multi_start_ls")]
    MultiStartLocalSearch,
    /// Tabu search over 2-opt moves (code 5).
    #[serde(rename = "tabu")]
    TabuSearch,
    /// Variable neighbourhood search (code 6).
    #[serde(rename = "vns")]
    VariableNeighborhoodSearch,
    /// Simulated annealing finished by local search (code 7).
    #[serde(rename = "sa")]
    SimulatedAnnealing,
}

impl Algorithm {
    /// Every variant, in code order.
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Construction,
        Algorithm::ConstructionPlusLocalSearch,
        Algorithm::IteratedLocalSearch,
        Algorithm::MultiStartConstruction,
        Algorithm::MultiStartLocalSearch,
        Algorithm::TabuSearch,
        Algorithm::VariableNeighborhoodSearch,
        Algorithm::SimulatedAnnealing,
    ];

    /// Looks up a variant by its request code.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::Algorithm;
    ///
    /// assert_eq!(Algorithm::from_code(2).unwrap(), Algorithm::IteratedLocalSearch);
    /// assert!(Algorithm::from_code(8).is_err());
    /// ```
    pub fn from_code(code: i64) -> Result<Self, ConfigError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ConfigError::UnknownAlgorithm(code))
    }

    /// The request code of this variant.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Short name used in artifact names and logs.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Construction => "construction",
            Algorithm::ConstructionPlusLocalSearch => "construction_ls",
            Algorithm::IteratedLocalSearch => "ils",
            Algorithm::MultiStartConstruction => "multi_start",
            Algorithm::MultiStartLocalSearch => "multi_start_ls",
            Algorithm::TabuSearch => "tabu",
            Algorithm::VariableNeighborhoodSearch => "vns",
            Algorithm::SimulatedAnnealing => "sa",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for (i, alg) in Algorithm::ALL.iter().enumerate() {
            assert_eq!(alg.code(), i as i64);
            assert_eq!(Algorithm::from_code(i as i64).unwrap(), *alg);
        }
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(
            Algorithm::from_code(-1),
            Err(ConfigError::UnknownAlgorithm(-1))
        );
        assert_eq!(
            Algorithm::from_code(99),
            Err(ConfigError::UnknownAlgorithm(99))
        );
    }

    #[test]
    fn test_serialized_name_matches_display() {
        let json = serde_json::to_string(&Algorithm::MultiStartLocalSearch).unwrap();
        assert_eq!(json, "\"multi_start_ls\"");
        assert_eq!(Algorithm::MultiStartLocalSearch.to_string(), "multi_start_ls");
        let back: Algorithm = serde_json::from_str("\"vns\"").unwrap();
        assert_eq!(back, Algorithm::VariableNeighborhoodSearch);
    }
}
