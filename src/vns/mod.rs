//! Variable Neighborhood Search (VNS).
//!
//! Shakes the current local optimum with an increasing number of random
//! segment swaps (double bridges), then repairs it with local search. If
//! the repaired tour is shorter, the search moves there and goes back to
//! the smallest shake; otherwise the next, larger shake is tried.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod runner;

pub use config::VnsConfig;
pub use runner::{VnsResult, VnsRunner};
