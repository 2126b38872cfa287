//! Tour representation.
//!
//! A [`Tour`] keeps the visiting order, the inverse city → position index
//! and the cached length. Moves are evaluated in O(1) through
//! [`TourMove::delta`] and committed with [`Tour::commit`], which adds
//! exactly the evaluated delta to the cached cost; lengths are never
//! recomputed during search.

mod best;
mod moves;

pub use best::BestSolution;
pub use moves::{DoubleBridge, OrOptMove, TourMove, TwoOptMove};

use crate::distance::{Cost, DistanceModel};
use crate::error::InvariantError;

/// A cyclic permutation of all cities with its cached length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    order: Vec<usize>,
    pos: Vec<usize>,
    cost: Cost,
}

impl Tour {
    /// Builds a tour from a visiting order, checking that it is a
    /// permutation of `0..dist.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::{CityList, DistanceModel, Tour};
    ///
    /// let cities = CityList::from_coords("sq", &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]).unwrap();
    /// let dist = DistanceModel::dense(&cities);
    /// let tour = Tour::from_order(vec![0, 1, 2, 3], &dist).unwrap();
    /// assert_eq!(tour.cost(), 40);
    /// assert!(Tour::from_order(vec![0, 1, 1, 3], &dist).is_err());
    /// ```
    pub fn from_order(order: Vec<usize>, dist: &DistanceModel) -> Result<Self, InvariantError> {
        let pos = positions_of(&order, dist.len())?;
        let cost = dist.tour_length(&order);
        Ok(Self { order, pos, cost })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false` for tours built from a valid instance.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cached total length.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Visiting order (position → city).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// City visited at position `p`.
    #[inline]
    pub fn city_at(&self, p: usize) -> usize {
        self.order[p]
    }

    /// Position of `city` in the order.
    #[inline]
    pub fn position(&self, city: usize) -> usize {
        self.pos[city]
    }

    /// Position following `p` cyclically.
    #[inline]
    pub fn next_pos(&self, p: usize) -> usize {
        if p + 1 == self.order.len() {
            0
        } else {
            p + 1
        }
    }

    /// Position preceding `p` cyclically.
    #[inline]
    pub fn prev_pos(&self, p: usize) -> usize {
        if p == 0 {
            self.order.len() - 1
        } else {
            p - 1
        }
    }

    /// City visited after `city`.
    #[inline]
    pub fn succ(&self, city: usize) -> usize {
        self.order[self.next_pos(self.pos[city])]
    }

    /// City visited before `city`.
    #[inline]
    pub fn pred(&self, city: usize) -> usize {
        self.order[self.prev_pos(self.pos[city])]
    }

    /// Sums every edge again. O(N); for verification only.
    pub fn recompute_cost(&self, dist: &DistanceModel) -> Cost {
        dist.tour_length(&self.order)
    }

    /// Checks the permutation, the position index and the cached cost.
    pub fn validate(&self, dist: &DistanceModel) -> Result<(), InvariantError> {
        let pos = positions_of(&self.order, dist.len())?;
        if let Some(city) = (0..pos.len()).find(|&c| pos[c] != self.pos[c]) {
            return Err(InvariantError::StalePosition(city));
        }
        let recomputed = self.recompute_cost(dist);
        if recomputed != self.cost {
            return Err(InvariantError::CostMismatch {
                cached: self.cost,
                recomputed,
            });
        }
        Ok(())
    }

    /// Applies a move whose `delta` was evaluated on this exact tour.
    ///
    /// The cached cost changes by `delta` and nothing else.
    pub fn commit<M: TourMove>(&mut self, mv: &M, delta: Cost) {
        mv.apply(self);
        self.cost += delta;
    }

    /// Evaluates and commits `mv` in one step, returning the delta.
    pub fn apply_move<M: TourMove>(&mut self, mv: &M, dist: &DistanceModel) -> Cost {
        let delta = mv.delta(self, dist);
        self.commit(mv, delta);
        delta
    }

    /// Reverses the `len` cities starting at position `start`, wrapping
    /// around the end of the order. O(len).
    pub(crate) fn reverse_cyclic(&mut self, start: usize, len: usize) {
        let n = self.order.len();
        if len < 2 {
            return;
        }
        let mut i = start;
        let mut j = (start + len - 1) % n;
        for _ in 0..len / 2 {
            self.order.swap(i, j);
            self.pos[self.order[i]] = i;
            self.pos[self.order[j]] = j;
            i = if i + 1 == n { 0 } else { i + 1 };
            j = if j == 0 { n - 1 } else { j - 1 };
        }
    }
}

/// Inverse index of `order`, failing when it is not a permutation of `0..n`.
fn positions_of(order: &[usize], n: usize) -> Result<Vec<usize>, InvariantError> {
    if order.len() != n {
        return Err(InvariantError::WrongLength {
            expected: n,
            found: order.len(),
        });
    }
    let mut pos = vec![usize::MAX; n];
    for (p, &city) in order.iter().enumerate() {
        if city >= n {
            return Err(InvariantError::OutOfRange { city, n });
        }
        if pos[city] != usize::MAX {
            return Err(InvariantError::DuplicateCity(city));
        }
        pos[city] = p;
    }
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CityList;

    fn line(n: usize) -> DistanceModel {
        let coords: Vec<(f64, f64)> = (0..n).map(|i| (i as f64 * 10.0, 0.0)).collect();
        DistanceModel::dense(&CityList::from_coords("line", &coords).unwrap())
    }

    #[test]
    fn test_from_order_rejects_bad_permutations() {
        let dist = line(4);
        assert_eq!(
            Tour::from_order(vec![0, 1, 2], &dist),
            Err(InvariantError::WrongLength {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Tour::from_order(vec![0, 1, 2, 7], &dist),
            Err(InvariantError::OutOfRange { city: 7, n: 4 })
        );
        assert_eq!(
            Tour::from_order(vec![0, 2, 2, 1], &dist),
            Err(InvariantError::DuplicateCity(2))
        );
    }

    #[test]
    fn test_neighbors_wrap_around() {
        let dist = line(4);
        let tour = Tour::from_order(vec![2, 0, 3, 1], &dist).unwrap();
        assert_eq!(tour.succ(1), 2);
        assert_eq!(tour.pred(2), 1);
        assert_eq!(tour.position(3), 2);
        assert_eq!(tour.next_pos(3), 0);
        assert_eq!(tour.prev_pos(0), 3);
    }

    #[test]
    fn test_reverse_cyclic_wrapping() {
        let dist = line(6);
        let mut tour = Tour::from_order(vec![0, 1, 2, 3, 4, 5], &dist).unwrap();
        tour.reverse_cyclic(4, 4); // positions 4,5,0,1
        assert_eq!(tour.order(), &[5, 4, 2, 3, 1, 0]);
        for (p, &c) in tour.order().iter().enumerate() {
            assert_eq!(tour.position(c), p);
        }
    }

    #[test]
    fn test_validate_detects_cost_drift() {
        let dist = line(4);
        let mut tour = Tour::from_order(vec![0, 1, 2, 3], &dist).unwrap();
        assert!(tour.validate(&dist).is_ok());
        tour.cost += 1;
        assert!(matches!(
            tour.validate(&dist),
            Err(InvariantError::CostMismatch { .. })
        ));
    }
}
