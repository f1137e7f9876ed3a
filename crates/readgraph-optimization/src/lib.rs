pub mod common;
pub mod pareto;

/// Re-export common types
pub use common::*;
pub use pareto::{dominates, non_dominated_fronts};
