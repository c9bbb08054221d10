//! Route evaluation: distance, load, capacity feasibility, and solution
//! assembly.

mod evaluator;

pub use evaluator::RouteEvaluator;
