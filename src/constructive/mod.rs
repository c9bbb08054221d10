//! Constructive heuristics for building initial CVRP solutions.
//!
//! - [`NearestNeighborSolver`]: Greedy nearest-neighbor route building, O(n²)
//! - [`SavingsSolver`]: Clarke-Wright savings algorithm (1964), O(n² log n)

mod clarke_wright;
mod nearest_neighbor;

pub use clarke_wright::{SavingsEntry, SavingsSolver};
pub use nearest_neighbor::NearestNeighborSolver;
