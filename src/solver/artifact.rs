//! Result artifact persisted after each run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::algorithm::Algorithm;
use crate::dataset::CityList;
use crate::distance::{Cost, DistanceModel, DEFAULT_MATRIX_LIMIT};
use crate::error::{ArtifactError, InvariantError};
use crate::tour::Tour;

/// The JSON document describing one finished run.
///
/// Re-reading it and recomputing the tour length against the instance
/// reproduces `cost` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Instance name.
    pub name: String,
    /// Number of cities.
    pub dimension: usize,
    /// Variant that produced the tour.
    pub algorithm: Algorithm,
    /// Seed of the run.
    pub seed: u64,
    /// Tour length.
    pub cost: Cost,
    /// Visiting order, zero-based city indices.
    pub tour: Vec<usize>,
    /// Wall-clock time of the run in milliseconds.
    pub elapsed_ms: u64,
}

/// Turns arbitrary text into a file stem that stays inside the artifact
/// directory.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`; a stem made only of
/// dots (or nothing) is replaced by underscores.
///
/// # Examples
///
/// ```
/// use u_tsp::solver::sanitize_stem;
///
/// assert_eq!(sanitize_stem("berlin52"), "berlin52");
/// assert_eq!(sanitize_stem("../etc/x y"), ".._etc_x_y");
/// assert_eq!(sanitize_stem(".."), "__");
/// ```
pub fn sanitize_stem(raw: &str) -> String {
    let stem: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.chars().all(|c| c == '.') {
        return "_".repeat(stem.len().max(1));
    }
    stem
}

impl Artifact {
    /// Writes the artifact as pretty JSON to `<dir>/<stem>.json`, creating
    /// `dir` when missing. `stem` goes through [`sanitize_stem`], so the
    /// file always lands directly in `dir`. Returns the file path.
    pub fn write(&self, dir: &Path, stem: &str) -> Result<PathBuf, ArtifactError> {
        let path = dir.join(format!("{}.json", sanitize_stem(stem)));
        fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        let body = serde_json::to_string_pretty(self).map_err(|source| ArtifactError::Format {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, body).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Reads an artifact back.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let body = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| ArtifactError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the stored tour against `cities`: it must be a permutation
    /// whose recomputed length equals the stored cost.
    pub fn verify(&self, cities: &CityList) -> Result<Cost, InvariantError> {
        let dist = DistanceModel::new(cities, DEFAULT_MATRIX_LIMIT);
        let tour = Tour::from_order(self.tour.clone(), &dist)?;
        if tour.cost() != self.cost {
            return Err(InvariantError::CostMismatch {
                cached: self.cost,
                recomputed: tour.cost(),
            });
        }
        Ok(tour.cost())
    }
}
