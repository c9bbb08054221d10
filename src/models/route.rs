//! Route and per-route summary types.

use serde::Serialize;

/// An ordered sequence of customers served by a single vehicle.
///
/// The route starts and ends at the depot, which is not stored. Distance and
/// load are computed by [`RouteEvaluator`](crate::evaluation::RouteEvaluator).
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::Route;
///
/// let route = Route::new(vec![0, 2, 3], 24.5, 9);
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.customer_ids(), &[0, 2, 3]);
/// assert_eq!(route.total_load(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    customers: Vec<usize>,
    total_distance: f64,
    total_load: u32,
}

impl Route {
    /// Creates a route with precomputed distance and load.
    pub fn new(customers: Vec<usize>, total_distance: f64, total_load: u32) -> Self {
        Self {
            customers,
            total_distance,
            total_load,
        }
    }

    /// Customer indices in visit order.
    pub fn customer_ids(&self) -> &[usize] {
        &self.customers
    }

    /// Consumes the route, returning its customer indices.
    pub fn into_customer_ids(self) -> Vec<usize> {
        self.customers
    }

    /// Number of customers on this route.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if this route serves no customers.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Depot-to-depot distance of this route.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sum of demands served by this route.
    pub fn total_load(&self) -> u32 {
        self.total_load
    }
}

impl AsRef<[usize]> for Route {
    fn as_ref(&self) -> &[usize] {
        &self.customers
    }
}

/// Detailed metrics for one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInfo {
    /// Depot-to-depot distance.
    pub distance: f64,
    /// Sum of customer demands.
    pub load: u32,
    /// Customer indices in visit order.
    pub customers: Vec<usize>,
    /// `load / capacity`.
    pub capacity_utilization: f64,
    /// Whether `load <= capacity`.
    pub feasible: bool,
}

impl RouteInfo {
    /// Metrics of a route with no customers.
    pub fn empty() -> Self {
        Self {
            distance: 0.0,
            load: 0,
            customers: Vec::new(),
            capacity_utilization: 0.0,
            feasible: true,
        }
    }
}
