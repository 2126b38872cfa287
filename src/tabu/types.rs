//! Tabu memory and tenure policies.

use crate::random::RandomStream;

/// How the tabu tenure evolves over the iterations.
///
/// Dynamic policies move between `N / 8` and `N / 4` (at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TenurePolicy {
    /// The same tenure every iteration.
    Fixed(usize),

    /// The midpoint of the dynamic range, rounded up.
    Size,

    /// Uniform in the dynamic range, drawn every iteration.
    Random,

    /// Moves one step per iteration, bouncing between the bounds.
    #[default]
    Linear,
}

/// Tenure state for one run.
#[derive(Debug, Clone)]
pub struct Tenure {
    policy: TenurePolicy,
    min: usize,
    max: usize,
    value: usize,
    rising: bool,
}

impl Tenure {
    /// Tenure for a tour of `n` cities.
    pub fn new(policy: TenurePolicy, n: usize) -> Self {
        let min = (n / 8).max(1);
        let max = (n / 4).max(min);
        let value = match policy {
            TenurePolicy::Fixed(t) => t,
            TenurePolicy::Size => (min + max).div_ceil(2),
            TenurePolicy::Random | TenurePolicy::Linear => min,
        };
        Self {
            policy,
            min,
            max,
            value,
            rising: true,
        }
    }

    /// Lower bound of the dynamic range.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Upper bound of the dynamic range.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Current tenure.
    pub fn value(&self) -> usize {
        self.value
    }

    /// Advances to the tenure of the next iteration.
    pub fn advance(&mut self, rng: &mut RandomStream) -> usize {
        match self.policy {
            TenurePolicy::Fixed(_) | TenurePolicy::Size => {}
            TenurePolicy::Random => self.value = rng.between(self.min, self.max),
            TenurePolicy::Linear => {
                if self.min == self.max {
                    self.value = self.min;
                } else {
                    if self.value >= self.max {
                        self.rising = false;
                    } else if self.value <= self.min {
                        self.rising = true;
                    }
                    if self.rising {
                        self.value += 1;
                    } else {
                        self.value -= 1;
                    }
                }
            }
        }
        self.value
    }
}

/// Per-city record of the iteration that last touched it.
#[derive(Debug, Clone)]
pub struct TabuList {
    touched: Vec<Option<usize>>,
}

impl TabuList {
    /// Empty list for `n` cities.
    pub fn new(n: usize) -> Self {
        Self {
            touched: vec![None; n],
        }
    }

    /// Marks `city` as touched at `iteration`.
    pub fn mark(&mut self, city: usize, iteration: usize) {
        self.touched[city] = Some(iteration);
    }

    /// Whether `city` is still tabu at `iteration` under `tenure`.
    pub fn is_tabu(&self, city: usize, iteration: usize, tenure: usize) -> bool {
        self.touched[city].is_some_and(|at| iteration.saturating_sub(at) < tenure)
    }
}
