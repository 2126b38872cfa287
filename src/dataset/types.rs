//! City records and the per-run city list.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::DatasetError;

/// Largest coordinate magnitude accepted.
///
/// Keeps every edge below 3e9 so tour lengths and move deltas stay far
/// inside `i64` for any instance that fits in memory.
pub const MAX_COORDINATE: f64 = 1e9;

/// One city of the instance. Created at load time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// Zero-based position in the [`CityList`].
    pub index: usize,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

/// The ordered cities of one run, indices `0..len()` stable for its
/// whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct CityList {
    name: String,
    cities: Vec<City>,
}

impl CityList {
    /// Builds a list from coordinates in index order.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::CityList;
    ///
    /// let cities = CityList::from_coords("square", &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]).unwrap();
    /// assert_eq!(cities.len(), 3);
    /// assert_eq!(cities.get(2).index, 2);
    /// ```
    pub fn from_coords(name: impl Into<String>, coords: &[(f64, f64)]) -> Result<Self, DatasetError> {
        if coords.len() < 2 {
            return Err(DatasetError::TooFewCities(coords.len()));
        }
        let in_range = |v: f64| v.is_finite() && v.abs() <= MAX_COORDINATE;
        if let Some((index, &(x, y))) = coords
            .iter()
            .enumerate()
            .find(|&(_, &(x, y))| !(in_range(x) && in_range(y)))
        {
            return Err(DatasetError::CoordinateOutOfRange { index, x, y });
        }
        let cities = coords
            .iter()
            .enumerate()
            .map(|(index, &(x, y))| City { index, x, y })
            .collect();
        Ok(Self {
            name: name.into(),
            cities,
        })
    }

    /// Wraps cities whose `index` fields already equal their positions.
    pub(crate) fn from_cities(name: String, cities: Vec<City>) -> Self {
        debug_assert!(cities.iter().enumerate().all(|(i, c)| c.index == i));
        Self { name, cities }
    }

    /// Instance name (TSPLIB `NAME` or the file stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`; a list holds at least two cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// City at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> &City {
        &self.cities[index]
    }

    /// All cities in index order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Renders the list as a TSPLIB `EUC_2D` file with one-based ids.
    pub fn to_tsplib(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "NAME : {}", self.name);
        let _ = writeln!(out, "TYPE : TSP");
        let _ = writeln!(out, "DIMENSION : {}", self.cities.len());
        let _ = writeln!(out, "EDGE_WEIGHT_TYPE : EUC_2D");
        let _ = writeln!(out, "NODE_COORD_SECTION");
        for city in &self.cities {
            let _ = writeln!(out, "{} {} {}", city.index + 1, city.x, city.y);
        }
        out.push_str("EOF\n");
        out
    }

    /// Writes [`CityList::to_tsplib`] to `path`.
    pub fn write_tsplib(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_tsplib())
    }
}
