//! Tabu Search (TS) over 2-opt moves.
//!
//! Each iteration commits the best admissible 2-opt move from the
//! candidate lists, even when it lengthens the tour. Cities touched by a
//! move become tabu for a number of iterations (the tenure), which keeps
//! the search from immediately undoing it.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search: Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search: Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;
mod types;

pub use config::TabuConfig;
pub use runner::{TabuResult, TabuRunner};
pub use types::{TabuList, Tenure, TenurePolicy};
