//! Random instance generation.

use super::types::{City, CityList};
use crate::error::DatasetError;
use crate::random::RandomStream;

/// Side length of the square random cities are drawn from.
pub const RANDOM_SQUARE_SIDE: f64 = 10_000.0;

/// Draws `n` cities uniformly from a `RANDOM_SQUARE_SIDE` square.
///
/// The same `(n, seed)` always yields the same list, which makes random
/// instances usable as regression fixtures and benchmark inputs.
///
/// # Examples
///
/// ```
/// use u_tsp::dataset::generate_random;
///
/// let a = generate_random(50, 3).unwrap();
/// let b = generate_random(50, 3).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 50);
/// ```
pub fn generate_random(n: usize, seed: u64) -> Result<CityList, DatasetError> {
    if n < 2 {
        return Err(DatasetError::TooFewCities(n));
    }
    let mut stream = RandomStream::from_seed(seed);
    let cities = (0..n)
        .map(|index| City {
            index,
            x: stream.unit() * RANDOM_SQUARE_SIDE,
            y: stream.unit() * RANDOM_SQUARE_SIDE,
        })
        .collect();
    Ok(CityList::from_cities(format!("random{n}_{seed}"), cities))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_inside_square() {
        let list = generate_random(200, 11).unwrap();
        for city in list.cities() {
            assert!((0.0..RANDOM_SQUARE_SIDE).contains(&city.x));
            assert!((0.0..RANDOM_SQUARE_SIDE).contains(&city.y));
        }
        assert_eq!(list.name(), "random200_11");
    }

    #[test]
    fn test_seed_changes_points() {
        let a = generate_random(20, 1).unwrap();
        let b = generate_random(20, 2).unwrap();
        assert_ne!(a.cities(), b.cities());
    }

    #[test]
    fn test_rejects_tiny() {
        assert!(matches!(
            generate_random(1, 0),
            Err(DatasetError::TooFewCities(1))
        ));
    }
}
