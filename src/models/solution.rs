//! Solution and violation types.

use serde::Serialize;

use super::{MoveRecord, Route, Termination};

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: u32,
        /// Vehicle capacity.
        capacity: u32,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// The result of a construction or improvement run.
///
/// Holds the routes, the customers left unserved, and any capacity
/// violations. A solution is feasible iff every customer is served and no
/// route exceeds capacity. Improvement runs additionally record the number of
/// passes, the applied moves, and why the search stopped.
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(vec![0, 1], 12.0, 8));
/// sol.add_unassigned(2);
/// assert_eq!(sol.num_vehicles_used(), 1);
/// assert!(!sol.is_feasible());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    routes: Vec<Route>,
    unvisited: Vec<usize>,
    violations: Vec<Violation>,
    iterations: usize,
    trace: Vec<MoveRecord>,
    termination: Option<Termination>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unvisited: Vec::new(),
            violations: Vec::new(),
            iterations: 0,
            trace: Vec::new(),
            termination: None,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a customer as unvisited.
    pub fn add_unassigned(&mut self, customer: usize) {
        self.unvisited.push(customer);
    }

    /// Records a constraint violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Attaches the outcome of a local search run.
    pub(crate) fn set_search_outcome(
        &mut self,
        iterations: usize,
        trace: Vec<MoveRecord>,
        termination: Termination,
    ) {
        self.iterations = iterations;
        self.trace = trace;
        self.termination = Some(termination);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the customer sequence of every route.
    pub fn route_lists(&self) -> Vec<Vec<usize>> {
        self.routes
            .iter()
            .map(|r| r.customer_ids().to_vec())
            .collect()
    }

    /// Number of routes that serve at least one customer.
    pub fn num_vehicles_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Customers not covered by any route, in ascending order.
    pub fn unvisited(&self) -> &[usize] {
        &self.unvisited
    }

    /// Capacity violations found in the routes.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// `true` iff every customer is served and no route exceeds capacity.
    pub fn is_feasible(&self) -> bool {
        self.unvisited.is_empty() && self.violations.is_empty()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }

    /// Total number of customers served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Number of local search passes performed (zero for constructors).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Moves applied by the local search, in order.
    pub fn trace(&self) -> &[MoveRecord] {
        &self.trace
    }

    /// Why the local search stopped, if one ran.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}
