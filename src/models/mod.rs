//! Domain model types for capacitated vehicle routing.
//!
//! Provides the core abstractions: planar points, a validated problem
//! definition, routes as ordered customer sequences, solutions with their
//! unvisited customers and violations, and the local search trace.

mod point;
mod problem;
mod route;
mod solution;
mod trace;

pub use point::Point;
pub use problem::Problem;
pub use route::{Route, RouteInfo};
pub use solution::{Solution, Violation, ViolationType};
pub use trace::{MoveKind, MoveRecord, Termination};
