//! Dataset loading.
//!
//! Reads TSPLIB-style `EUC_2D` coordinate files (or bare `id x y` lists)
//! into a [`CityList`], and generates seeded random instances.
//!
//! # References
//!
//! - Reinelt, G. (1991). "TSPLIB: A Traveling Salesman Problem Library",
//!   *ORSA Journal on Computing* 3(4), 376-384.

mod generator;
mod loader;
mod types;

pub use generator::{generate_random, RANDOM_SQUARE_SIDE};
pub use loader::{load_cities, parse_cities};
pub use types::{City, CityList, MAX_COORDINATE};
