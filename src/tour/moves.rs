//! Neighbourhood moves over a [`Tour`].
//!
//! Positions refer to the tour the move was evaluated on; committing any
//! move shifts positions, so moves are never reused across commits.

use super::Tour;
use crate::distance::{Cost, DistanceModel};
use crate::random::RandomStream;

/// A local modification of a tour with an O(1) cost delta.
pub trait TourMove {
    /// Cost change the move would cause on `tour`.
    fn delta(&self, tour: &Tour, dist: &DistanceModel) -> Cost;

    /// Rewrites the order and position index. The cached cost is left to
    /// [`Tour::commit`].
    fn apply(&self, tour: &mut Tour);
}

/// 2-opt: reverse the path between two tour edges.
///
/// Replaces edges `(t[i], t[i+1])` and `(t[j], t[j+1])` by
/// `(t[i], t[j])` and `(t[i+1], t[j+1])`, with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptMove {
    /// Position of the first edge's tail.
    pub i: usize,
    /// Position of the second edge's tail.
    pub j: usize,
}

impl TwoOptMove {
    /// Creates a move between positions `i` and `j` in either order.
    pub fn new(i: usize, j: usize) -> Self {
        if i < j {
            Self { i, j }
        } else {
            Self { i: j, j: i }
        }
    }

    /// Uniformly drawn non-trivial move for a tour of `n >= 4` cities.
    pub fn random(n: usize, rng: &mut RandomStream) -> Self {
        loop {
            let mv = Self::new(rng.index(n), rng.index(n));
            let len = mv.j - mv.i;
            if len >= 2 && len <= n - 2 {
                return mv;
            }
        }
    }
}

impl TourMove for TwoOptMove {
    fn delta(&self, tour: &Tour, dist: &DistanceModel) -> Cost {
        let a = tour.city_at(self.i);
        let b = tour.city_at(tour.next_pos(self.i));
        let c = tour.city_at(self.j);
        let d = tour.city_at(tour.next_pos(self.j));
        dist.distance(a, c) + dist.distance(b, d) - dist.distance(a, b) - dist.distance(c, d)
    }

    fn apply(&self, tour: &mut Tour) {
        let n = tour.len();
        let inner = self.j - self.i;
        if 2 * inner <= n {
            tour.reverse_cyclic(self.i + 1, inner);
        } else {
            // The complementary path gives the same cycle, mirrored.
            tour.reverse_cyclic(tour.next_pos(self.j), n - inner);
        }
    }
}

/// Or-opt: move a chain of 1–3 consecutive cities elsewhere.
///
/// The chain starts at position `start` and spans `len` cities. It is
/// reinserted between the cities at positions `after` and `after + 1`,
/// optionally reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrOptMove {
    /// Position of the chain's first city.
    pub start: usize,
    /// Chain length, 1 to 3.
    pub len: usize,
    /// Position of the city the chain is inserted after.
    pub after: usize,
    /// Whether the chain is inserted in reverse orientation.
    pub reversed: bool,
}

impl OrOptMove {
    /// Longest chain Or-opt relocates.
    pub const MAX_CHAIN: usize = 3;

    /// Whether the move is well-formed for a tour of `n` cities: the
    /// insertion edge must lie entirely outside the chain.
    pub fn is_valid(&self, n: usize) -> bool {
        if self.len == 0 || self.len > Self::MAX_CHAIN || self.len + 2 > n {
            return false;
        }
        let offset = (self.after + n - self.start) % n;
        offset >= self.len && offset <= n - 2
    }

    /// Uniformly drawn valid move for a tour of `n >= 5` cities.
    pub fn random(n: usize, rng: &mut RandomStream) -> Self {
        let len = rng.between(1, Self::MAX_CHAIN.min(n - 3));
        let start = rng.index(n);
        let offset = rng.between(len, n - 2);
        Self {
            start,
            len,
            after: (start + offset) % n,
            reversed: rng.chance(0.5),
        }
    }
}

impl TourMove for OrOptMove {
    fn delta(&self, tour: &Tour, dist: &DistanceModel) -> Cost {
        let n = tour.len();
        let prev = tour.city_at(tour.prev_pos(self.start));
        let first = tour.city_at(self.start);
        let last = tour.city_at((self.start + self.len - 1) % n);
        let next = tour.city_at((self.start + self.len) % n);
        let x = tour.city_at(self.after);
        let y = tour.city_at(tour.next_pos(self.after));

        let removed = dist.distance(prev, first) + dist.distance(last, next) + dist.distance(x, y);
        let added = if self.reversed {
            dist.distance(prev, next) + dist.distance(x, last) + dist.distance(first, y)
        } else {
            dist.distance(prev, next) + dist.distance(x, first) + dist.distance(last, y)
        };
        added - removed
    }

    fn apply(&self, tour: &mut Tour) {
        let n = tour.len();
        let offset = (self.after + n - self.start) % n;
        // Cities strictly between the chain and the insertion point, on
        // either side of the chain.
        let forward = offset - self.len + 1;
        let backward = n - self.len - forward;

        if forward <= backward {
            let gap_start = (self.start + self.len) % n;
            if !self.reversed {
                tour.reverse_cyclic(self.start, self.len);
            }
            tour.reverse_cyclic(gap_start, forward);
            tour.reverse_cyclic(self.start, self.len + forward);
        } else {
            let gap_start = tour.next_pos(self.after);
            tour.reverse_cyclic(gap_start, backward);
            if !self.reversed {
                tour.reverse_cyclic(self.start, self.len);
            }
            tour.reverse_cyclic(gap_start, backward + self.len);
        }
    }
}

/// Double-bridge: cut the tour into `A B C D` and reconnect as `A C B D`.
///
/// No sequence of improving 2-opt moves undoes it directly, which makes
/// it the standard kick of iterated local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleBridge {
    /// Start of segment B.
    pub p1: usize,
    /// Start of segment C.
    pub p2: usize,
    /// Start of segment D.
    pub p3: usize,
}

impl DoubleBridge {
    /// Smallest tour a double-bridge can cut into four non-empty segments.
    pub const MIN_CITIES: usize = 4;

    /// Draws three distinct cut points in `1..n`. Requires `n >= 4`.
    pub fn random(n: usize, rng: &mut RandomStream) -> Self {
        let mut cuts = [0usize; 3];
        let mut filled = 0;
        while filled < 3 {
            let c = rng.between(1, n - 1);
            if !cuts[..filled].contains(&c) {
                cuts[filled] = c;
                filled += 1;
            }
        }
        cuts.sort_unstable();
        Self {
            p1: cuts[0],
            p2: cuts[1],
            p3: cuts[2],
        }
    }

    /// Cities whose incident edges the move rewires.
    pub fn endpoints(&self, tour: &Tour) -> [usize; 6] {
        [
            tour.city_at(self.p1 - 1),
            tour.city_at(self.p1),
            tour.city_at(self.p2 - 1),
            tour.city_at(self.p2),
            tour.city_at(self.p3 - 1),
            tour.city_at(self.p3),
        ]
    }
}

impl TourMove for DoubleBridge {
    fn delta(&self, tour: &Tour, dist: &DistanceModel) -> Cost {
        let [a_end, b_first, b_end, c_first, c_end, d_first] = self.endpoints(tour);
        let removed = dist.distance(a_end, b_first)
            + dist.distance(b_end, c_first)
            + dist.distance(c_end, d_first);
        let added = dist.distance(a_end, c_first)
            + dist.distance(c_end, b_first)
            + dist.distance(b_end, d_first);
        added - removed
    }

    fn apply(&self, tour: &mut Tour) {
        let b_len = self.p2 - self.p1;
        let c_len = self.p3 - self.p2;
        tour.reverse_cyclic(self.p1, b_len);
        tour.reverse_cyclic(self.p2, c_len);
        tour.reverse_cyclic(self.p1, b_len + c_len);
    }
}
