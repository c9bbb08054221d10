//! # vrp-heuristics
//!
//! Heuristic construction and local search for the capacitated vehicle
//! routing problem (CVRP) in the Euclidean plane.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Point, Problem, Route, Solution, trace records)
//! - [`distance`]: Depot-plus-customers distance matrix
//! - [`evaluation`]: Route load, feasibility and solution assembly
//! - [`constructive`]: Constructive heuristics (Nearest Neighbor, Clarke-Wright savings)
//! - [`local_search`]: 2-opt improvement (intra-route reversal, inter-route swap)
//! - [`error`]: Input validation errors
//!
//! ## Indexing
//!
//! Routes list customer indices in `0..num_customers`, depot excluded. Every
//! route implicitly starts and ends at the depot. Inside the distance matrix
//! the depot is node 0 and customer `c` is node `c + 1`.
//!
//! ## Example
//!
//! ```
//! use vrp_heuristics::models::{Point, Problem};
//! use vrp_heuristics::constructive::SavingsSolver;
//! use vrp_heuristics::local_search::TwoOptImprover;
//!
//! let problem = Problem::new(
//!     Point::new(0.0, 0.0),
//!     vec![Point::new(3.0, 4.0), Point::new(-3.0, 4.0), Point::new(0.0, -5.0)],
//!     vec![2, 2, 2],
//!     4,
//!     2,
//! )
//! .unwrap();
//!
//! let initial = SavingsSolver::new(&problem).solve();
//! assert!(initial.is_feasible());
//!
//! let improved = TwoOptImprover::new(&problem)
//!     .improve(&initial.route_lists(), 100)
//!     .unwrap();
//! assert!(improved.total_distance() <= initial.total_distance() + 1e-9);
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
