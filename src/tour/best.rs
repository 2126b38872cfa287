//! Best-tour tracker.

use super::Tour;
use crate::distance::{Cost, DistanceModel};
use crate::error::InvariantError;

/// The lowest-cost valid tour seen so far in a run.
///
/// Replaced only by a strictly cheaper candidate, so the reported cost is
/// non-increasing for the whole run. Candidates are verified (permutation
/// and recomputed cost) before they are accepted.
#[derive(Debug, Clone)]
pub struct BestSolution {
    tour: Tour,
    history: Vec<Cost>,
}

impl BestSolution {
    /// Starts tracking from a first valid tour.
    pub fn new(tour: Tour, dist: &DistanceModel) -> Result<Self, InvariantError> {
        tour.validate(dist)?;
        let history = vec![tour.cost()];
        Ok(Self { tour, history })
    }

    /// Offers a candidate; returns `true` when it became the new best.
    pub fn offer(&mut self, candidate: &Tour, dist: &DistanceModel) -> Result<bool, InvariantError> {
        if candidate.cost() >= self.tour.cost() {
            return Ok(false);
        }
        if let Err(e) = candidate.validate(dist) {
            log::error!("rejected corrupted candidate tour: {e}");
            return Err(e);
        }
        log::debug!(
            "new best tour: {} -> {}",
            self.tour.cost(),
            candidate.cost()
        );
        self.tour.clone_from(candidate);
        self.history.push(candidate.cost());
        Ok(true)
    }

    /// Like [`BestSolution::offer`] but takes ownership, avoiding a copy.
    pub fn offer_owned(&mut self, candidate: Tour, dist: &DistanceModel) -> Result<bool, InvariantError> {
        if candidate.cost() >= self.tour.cost() {
            return Ok(false);
        }
        candidate.validate(dist)?;
        self.history.push(candidate.cost());
        self.tour = candidate;
        Ok(true)
    }

    /// Cost of the best tour.
    pub fn cost(&self) -> Cost {
        self.tour.cost()
    }

    /// The best tour.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Consumes the tracker, returning the best tour.
    pub fn into_tour(self) -> Tour {
        self.tour
    }

    /// Successive best costs, starting with the initial tour.
    pub fn history(&self) -> &[Cost] {
        &self.history
    }

    /// Number of accepted improvements.
    pub fn improvements(&self) -> usize {
        self.history.len() - 1
    }
}
