//! Wall-clock budget shared by every suspendable stage of a run.

use std::time::{Duration, Instant};

/// A fixed point in time after which search stages yield.
///
/// Stages poll [`Deadline::expired`] at pass or round boundaries, never in
/// the middle of a move.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts the timer now with the given budget.
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// A deadline that never expires in practice (used by tests and
    /// tools that want natural completion).
    pub fn unbounded() -> Self {
        Self::after(Duration::from_secs(60 * 60 * 24 * 365))
    }

    /// Returns `true` once the budget is used up.
    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }

    /// The full budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Fraction of the budget consumed, clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.budget.is_zero() {
            return 1.0;
        }
        (self.elapsed().as_secs_f64() / self.budget.as_secs_f64()).min(1.0)
    }

    /// A deadline sharing this start time that expires after `share` of
    /// the remaining budget, never later than `self`.
    pub fn share(&self, share: f64) -> Deadline {
        let extra = self.remaining().mul_f64(share.clamp(0.0, 1.0));
        Deadline {
            started: self.started,
            budget: self.elapsed() + extra,
        }
    }
}
