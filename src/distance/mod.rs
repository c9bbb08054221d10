//! Distance model.
//!
//! Provides a dense Euclidean distance matrix over the depot and customers.

mod matrix;

pub use matrix::{node_of, DistanceMatrix, DEPOT};
