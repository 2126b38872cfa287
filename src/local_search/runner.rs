//! Local search execution loop.

use std::collections::VecDeque;

use super::config::LocalSearchConfig;
use crate::deadline::Deadline;
use crate::distance::DistanceModel;
use crate::tour::{OrOptMove, Tour, TourMove, TwoOptMove};

/// Result of a local search descent.
#[derive(Debug, Clone)]
pub struct LocalSearchOutcome {
    /// The improved tour. Its cached cost is exact.
    pub tour: Tour,

    /// Number of improving moves committed.
    pub improvements: usize,

    /// `false` when the deadline cut the descent short.
    pub local_optimum: bool,
}

/// 2-opt + Or-opt descent bound to one distance model.
///
/// Candidate lists are built once in [`LocalSearch::new`] and reused by
/// every descent, which is what iterated drivers rely on.
#[derive(Debug, Clone)]
pub struct LocalSearch<'a> {
    dist: &'a DistanceModel,
    candidates: Vec<Vec<usize>>,
    config: LocalSearchConfig,
}

impl<'a> LocalSearch<'a> {
    /// Prepares candidate lists for `dist`.
    pub fn new(dist: &'a DistanceModel, config: &LocalSearchConfig) -> Self {
        Self {
            dist,
            candidates: dist.nearest_neighbors(config.neighbors),
            config: config.clone(),
        }
    }

    /// The distance model the candidate lists were built from.
    pub fn dist(&self) -> &'a DistanceModel {
        self.dist
    }

    /// Per-city candidate lists, nearest first.
    pub fn candidates(&self) -> &[Vec<usize>] {
        &self.candidates
    }

    /// Descends from `tour` to a local optimum, examining every city.
    ///
    /// When the queue drains, one more full sweep confirms that no city
    /// has an improving move left, so with candidate lists of length
    /// `N - 1` the result is 2-opt and Or-opt optimal.
    pub fn run(&self, tour: Tour, deadline: &Deadline) -> LocalSearchOutcome {
        let all: Vec<usize> = tour.order().to_vec();
        self.descend(tour, &all, deadline, true)
    }

    /// Descends from `tour`, examining only `dirty` cities and whatever
    /// their improvements touch. Used after a perturbation that rewired a
    /// handful of edges.
    pub fn run_from(&self, tour: Tour, dirty: &[usize], deadline: &Deadline) -> LocalSearchOutcome {
        self.descend(tour, dirty, deadline, false)
    }

    fn descend(&self, mut tour: Tour, dirty: &[usize], deadline: &Deadline, confirm: bool) -> LocalSearchOutcome {
        let n = tour.len();
        if n < 4 {
            return LocalSearchOutcome {
                tour,
                improvements: 0,
                local_optimum: true,
            };
        }
        if deadline.expired() {
            return LocalSearchOutcome {
                tour,
                improvements: 0,
                local_optimum: false,
            };
        }

        let mut queue = DirtyQueue::new(n);
        for &c in dirty {
            queue.push(c);
        }
        let mut full_sweep = dirty.len() == n;
        let mut sweep_start = 0usize;
        let mut improvements = 0usize;
        let mut processed = 0usize;

        let local_optimum = loop {
            while let Some(a) = queue.pop() {
                processed += 1;
                if processed.is_multiple_of(self.config.check_interval) && deadline.expired() {
                    log::debug!("local search cut by deadline after {improvements} improvements");
                    return LocalSearchOutcome {
                        tour,
                        improvements,
                        local_optimum: false,
                    };
                }
                if let Some(touched) = self.improve_city(&mut tour, a) {
                    improvements += 1;
                    queue.push(a);
                    for c in touched {
                        queue.push(c);
                    }
                }
            }

            if !confirm || (full_sweep && improvements == sweep_start) {
                break true;
            }
            full_sweep = true;
            sweep_start = improvements;
            for c in 0..n {
                queue.push(c);
            }
        };

        LocalSearchOutcome {
            tour,
            improvements,
            local_optimum,
        }
    }

    /// Commits the first improving move around `a`, returning the cities
    /// whose incident edges changed.
    fn improve_city(&self, tour: &mut Tour, a: usize) -> Option<[usize; 6]> {
        self.two_opt_from(tour, a).or_else(|| {
            if self.config.or_opt {
                self.or_opt_from(tour, a)
            } else {
                None
            }
        })
    }

    fn two_opt_from(&self, tour: &mut Tour, a: usize) -> Option<[usize; 6]> {
        let dist = self.dist;
        for forward in [true, false] {
            let b = if forward { tour.succ(a) } else { tour.pred(a) };
            let d_ab = dist.distance(a, b);

            for &c in &self.candidates[a] {
                // Sorted lists: no later candidate can shorten edge (a, b).
                if dist.distance(a, c) >= d_ab {
                    break;
                }
                let d = if forward { tour.succ(c) } else { tour.pred(c) };
                if c == b || d == a {
                    continue;
                }
                let mv = if forward {
                    TwoOptMove::new(tour.position(a), tour.position(c))
                } else {
                    TwoOptMove::new(tour.position(b), tour.position(d))
                };
                let delta = mv.delta(tour, dist);
                if delta < 0 {
                    tour.commit(&mv, delta);
                    return Some([a, b, c, d, a, b]);
                }
            }
        }
        None
    }

    fn or_opt_from(&self, tour: &mut Tour, a: usize) -> Option<[usize; 6]> {
        let dist = self.dist;
        let n = tour.len();
        let start = tour.position(a);

        for len in 1..=OrOptMove::MAX_CHAIN {
            if len + 2 > n {
                break;
            }
            for &c in &self.candidates[a] {
                let pc = tour.position(c);
                for after in [pc, tour.prev_pos(pc)] {
                    for reversed in [false, true] {
                        let mv = OrOptMove {
                            start,
                            len,
                            after,
                            reversed,
                        };
                        if !mv.is_valid(n) {
                            continue;
                        }
                        let delta = mv.delta(tour, dist);
                        if delta < 0 {
                            let touched = [
                                tour.city_at(tour.prev_pos(start)),
                                a,
                                tour.city_at((start + len - 1) % n),
                                tour.city_at((start + len) % n),
                                tour.city_at(after),
                                tour.city_at(tour.next_pos(after)),
                            ];
                            tour.commit(&mv, delta);
                            return Some(touched);
                        }
                    }
                }
            }
        }
        None
    }
}

/// FIFO of cities to examine, without duplicates.
struct DirtyQueue {
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl DirtyQueue {
    fn new(n: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(n),
            queued: vec![false; n],
        }
    }

    fn push(&mut self, city: usize) {
        if !self.queued[city] {
            self.queued[city] = true;
            self.queue.push_back(city);
        }
    }

    fn pop(&mut self) -> Option<usize> {
        let city = self.queue.pop_front()?;
        self.queued[city] = false;
        Some(city)
    }
}
