//! 2-opt + Or-opt local search.
//!
//! First-improvement descent over per-city candidate lists. Cities whose
//! incident edges changed are queued again ("don't-look bits"), so after a
//! small perturbation only the affected region is re-examined.
//!
//! # References
//!
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"
//! - Or (1976), "Traveling Salesman-Type Combinatorial Problems and their
//!   Relation to the Logistics of Regional Blood Banking"
//! - Bentley (1992), "Fast Algorithms for Geometric Traveling Salesman
//!   Problems"

mod config;
mod runner;

pub use config::LocalSearchConfig;
pub use runner::{LocalSearch, LocalSearchOutcome};
