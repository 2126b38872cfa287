//! Move drawn by the annealer.

use crate::distance::{Cost, DistanceModel};
use crate::random::RandomStream;
use crate::tour::{OrOptMove, Tour, TourMove, TwoOptMove};

/// A random 2-opt or Or-opt move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaMove {
    TwoOpt(TwoOptMove),
    OrOpt(OrOptMove),
}

impl SaMove {
    /// Draws an Or-opt move with probability `or_opt_probability`, a 2-opt
    /// move otherwise. Requires `n >= 5`.
    pub fn random(n: usize, or_opt_probability: f64, rng: &mut RandomStream) -> Self {
        if rng.chance(or_opt_probability) {
            SaMove::OrOpt(OrOptMove::random(n, rng))
        } else {
            SaMove::TwoOpt(TwoOptMove::random(n, rng))
        }
    }
}

impl TourMove for SaMove {
    fn delta(&self, tour: &Tour, dist: &DistanceModel) -> Cost {
        match self {
            SaMove::TwoOpt(mv) => mv.delta(tour, dist),
            SaMove::OrOpt(mv) => mv.delta(tour, dist),
        }
    }

    fn apply(&self, tour: &mut Tour) {
        match self {
            SaMove::TwoOpt(mv) => mv.apply(tour),
            SaMove::OrOpt(mv) => mv.apply(tour),
        }
    }
}
