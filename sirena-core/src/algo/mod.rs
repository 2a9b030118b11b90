//! Higher-level analyses built on the planner and simulator

pub mod resilience;

pub use resilience::{evaluate_resilience, ResilienceReport};
