//! Capacitated routing problem definition.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::ConfigError;

/// A validated single-depot capacitated routing problem.
///
/// Customers are addressed by their zero-based position in `customers`;
/// `demands[c]` is the demand of customer `c`. All vehicles share one
/// capacity.
///
/// Deserialization runs the same validation as [`Problem::new`].
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::{Point, Problem};
///
/// let problem = Problem::new(
///     Point::new(0.0, 0.0),
///     vec![Point::new(4.0, 4.0), Point::new(6.0, 2.0)],
///     vec![3, 5],
///     10,
///     2,
/// )
/// .unwrap();
/// assert_eq!(problem.num_customers(), 2);
/// assert_eq!(problem.total_demand(), 8);
///
/// // Misaligned input is rejected up front.
/// assert!(Problem::new(Point::new(0.0, 0.0), vec![Point::new(1.0, 1.0)], vec![], 10, 1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProblemDefinition", into = "ProblemDefinition")]
pub struct Problem {
    depot: Point,
    customers: Vec<Point>,
    demands: Vec<u32>,
    capacity: u32,
    num_vehicles: usize,
}

/// Unvalidated wire shape of a [`Problem`].
#[derive(Serialize, Deserialize)]
struct ProblemDefinition {
    depot: Point,
    customers: Vec<Point>,
    demands: Vec<u32>,
    capacity: u32,
    num_vehicles: usize,
}

impl Problem {
    /// Validates and constructs a problem.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the demand list is not index-aligned with
    /// the customer list, capacity or vehicle count is zero, or any
    /// coordinate is non-finite.
    pub fn new(
        depot: Point,
        customers: Vec<Point>,
        demands: Vec<u32>,
        capacity: u32,
        num_vehicles: usize,
    ) -> Result<Self, ConfigError> {
        if customers.len() != demands.len() {
            return Err(ConfigError::DemandCountMismatch {
                customers: customers.len(),
                demands: demands.len(),
            });
        }
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if num_vehicles == 0 {
            return Err(ConfigError::NoVehicles);
        }
        if !depot.is_finite() {
            return Err(ConfigError::NonFiniteDepot);
        }
        if let Some(index) = customers.iter().position(|c| !c.is_finite()) {
            return Err(ConfigError::NonFiniteCustomer { index });
        }
        Ok(Self {
            depot,
            customers,
            demands,
            capacity,
            num_vehicles,
        })
    }

    /// Depot location.
    pub fn depot(&self) -> Point {
        self.depot
    }

    /// Customer locations in input order.
    pub fn customers(&self) -> &[Point] {
        &self.customers
    }

    /// Customer demands, index-aligned with [`customers`](Self::customers).
    pub fn demands(&self) -> &[u32] {
        &self.demands
    }

    /// Demand of a single customer.
    ///
    /// # Panics
    ///
    /// Panics if `customer` is out of range.
    pub fn demand(&self, customer: usize) -> u32 {
        self.demands[customer]
    }

    /// Capacity shared by every vehicle.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Maximum number of routes a constructor may produce.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> u64 {
        self.demands.iter().map(|&d| u64::from(d)).sum()
    }
}

impl TryFrom<ProblemDefinition> for Problem {
    type Error = ConfigError;

    fn try_from(def: ProblemDefinition) -> Result<Self, Self::Error> {
        Self::new(
            def.depot,
            def.customers,
            def.demands,
            def.capacity,
            def.num_vehicles,
        )
    }
}

impl From<Problem> for ProblemDefinition {
    fn from(problem: Problem) -> Self {
        Self {
            depot: problem.depot,
            customers: problem.customers,
            demands: problem.demands,
            capacity: problem.capacity,
            num_vehicles: problem.num_vehicles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_problem_new() {
        let p = Problem::new(
            Point::new(0.0, 0.0),
            points(&[(4.0, 4.0), (6.0, 2.0), (8.0, 6.0)]),
            vec![3, 5, 2],
            10,
            2,
        )
        .expect("valid");
        assert_eq!(p.num_customers(), 3);
        assert_eq!(p.demand(1), 5);
        assert_eq!(p.capacity(), 10);
        assert_eq!(p.num_vehicles(), 2);
        assert_eq!(p.total_demand(), 10);
        assert_eq!(p.depot(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_problem_empty_is_valid() {
        let p = Problem::new(Point::new(0.0, 0.0), vec![], vec![], 10, 1).expect("valid");
        assert_eq!(p.num_customers(), 0);
        assert_eq!(p.total_demand(), 0);
    }

    #[test]
    fn test_problem_demand_mismatch() {
        let err = Problem::new(
            Point::new(0.0, 0.0),
            points(&[(1.0, 1.0), (2.0, 2.0)]),
            vec![1],
            10,
            1,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DemandCountMismatch {
                customers: 2,
                demands: 1
            }
        );
    }

    #[test]
    fn test_problem_zero_capacity() {
        let err = Problem::new(Point::new(0.0, 0.0), vec![], vec![], 0, 1).unwrap_err();
        assert_eq!(err, ConfigError::ZeroCapacity);
    }

    #[test]
    fn test_problem_no_vehicles() {
        let err = Problem::new(Point::new(0.0, 0.0), vec![], vec![], 10, 0).unwrap_err();
        assert_eq!(err, ConfigError::NoVehicles);
    }

    #[test]
    fn test_problem_non_finite() {
        let err = Problem::new(Point::new(f64::NAN, 0.0), vec![], vec![], 10, 1).unwrap_err();
        assert_eq!(err, ConfigError::NonFiniteDepot);

        let err = Problem::new(
            Point::new(0.0, 0.0),
            points(&[(1.0, 1.0), (f64::INFINITY, 2.0)]),
            vec![1, 1],
            10,
            1,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::NonFiniteCustomer { index: 1 });
    }

    #[test]
    fn test_problem_deserialize_validates() {
        let json = r#"{
            "depot": {"x": 0.0, "y": 0.0},
            "customers": [{"x": 4.0, "y": 4.0}],
            "demands": [3, 5],
            "capacity": 10,
            "num_vehicles": 1
        }"#;
        let err = serde_json::from_str::<Problem>(json).unwrap_err();
        assert!(err.to_string().contains("expected one demand per customer"));
    }

    #[test]
    fn test_problem_json_roundtrip() {
        let p = Problem::new(
            Point::new(1.0, 2.0),
            points(&[(4.0, 4.0), (6.0, 2.0)]),
            vec![3, 5],
            10,
            2,
        )
        .expect("valid");
        let json = serde_json::to_string(&p).expect("serialize");
        let back: Problem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, p);
    }
}
