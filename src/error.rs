//! Error types for problem construction and route validation.
//!
//! Infeasibility is never an error: a customer that cannot be served shows up
//! in [`Solution::unvisited`](crate::models::Solution::unvisited). These types
//! only cover malformed input that would otherwise corrupt index arithmetic.

use thiserror::Error;

/// Errors returned by [`Problem::new`](crate::models::Problem::new) and
/// [`LocalSearchConfig::validate`](crate::local_search::LocalSearchConfig::validate).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Customer coordinates and demands are not index-aligned.
    #[error("expected one demand per customer: {customers} customers but {demands} demands")]
    DemandCountMismatch {
        /// Number of customer coordinates supplied.
        customers: usize,
        /// Number of demands supplied.
        demands: usize,
    },
    /// Vehicle capacity was zero.
    #[error("vehicle capacity must be positive")]
    ZeroCapacity,
    /// Vehicle count was zero.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// Depot coordinates contain NaN or infinity.
    #[error("depot coordinates must be finite")]
    NonFiniteDepot,
    /// A customer's coordinates contain NaN or infinity.
    #[error("coordinates of customer {index} must be finite")]
    NonFiniteCustomer {
        /// Zero-based customer index.
        index: usize,
    },
    /// The local search improvement threshold is negative or not finite.
    #[error("improvement threshold must be finite and non-negative, got {threshold}")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },
}

/// Errors returned when externally supplied routes are malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A route references a customer index outside the problem.
    #[error("route {route} references customer {customer}, but the problem has {num_customers} customers")]
    UnknownCustomer {
        /// Index of the offending route.
        route: usize,
        /// The out-of-range customer index.
        customer: usize,
        /// Number of customers in the problem.
        num_customers: usize,
    },
    /// A customer appears more than once across the routes.
    #[error("customer {customer} is assigned more than once")]
    DuplicateCustomer {
        /// The repeated customer index.
        customer: usize,
    },
}
