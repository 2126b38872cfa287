//! Iterated Local Search (ILS).
//!
//! Repeats kick + repair around a local optimum: a random double-bridge
//! rewires three edges, local search re-optimises the affected region,
//! and an acceptance rule decides where the next round starts.
//!
//! # References
//!
//! - Martin, Otto & Felten (1991), "Large-Step Markov Chains for the
//!   Traveling Salesman Problem"
//! - Lourenço, Martin & Stützle (2003), "Iterated Local Search"

mod config;
mod runner;

pub use config::{Acceptance, IlsConfig};
pub use runner::{IlsResult, IlsRunner};
