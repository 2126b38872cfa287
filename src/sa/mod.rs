//! Simulated Annealing (SA).
//!
//! Random 2-opt and Or-opt moves accepted by the Metropolis rule. The
//! temperature follows the elapsed share of the budget, so the walk is
//! hot at the start and nearly greedy when time runs out; a final local
//! search polishes the best tour.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{SaResult, SaRunner};
pub use types::SaMove;
