//! Route evaluator that computes distance, load, and feasibility.

use crate::distance::DistanceMatrix;
use crate::error::RouteError;
use crate::models::{Problem, Route, RouteInfo, Solution, Violation, ViolationType};

/// Evaluates customer-index routes against a problem's demands, capacity,
/// and distance matrix.
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::{Point, Problem};
/// use vrp_heuristics::distance::DistanceMatrix;
/// use vrp_heuristics::evaluation::RouteEvaluator;
///
/// let problem = Problem::new(
///     Point::new(0.0, 0.0),
///     vec![Point::new(3.0, 4.0), Point::new(6.0, 8.0)],
///     vec![10, 20],
///     25,
///     1,
/// )
/// .unwrap();
/// let dm = DistanceMatrix::from_points(problem.depot(), problem.customers());
///
/// let evaluator = RouteEvaluator::new(&problem, &dm);
/// let (route, violations) = evaluator.build_route(&[0, 1]);
/// assert_eq!(route.total_load(), 30);
/// assert_eq!(violations.len(), 1);
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a Problem,
    distances: &'a DistanceMatrix,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(problem: &'a Problem, distances: &'a DistanceMatrix) -> Self {
        Self { problem, distances }
    }

    /// Depot-to-depot distance of a route.
    pub fn route_distance(&self, route: &[usize]) -> f64 {
        self.distances.route_distance(route)
    }

    /// Sum of demands on a route.
    pub fn route_load(&self, route: &[usize]) -> u32 {
        route
            .iter()
            .fold(0u32, |acc, &c| acc.saturating_add(self.problem.demand(c)))
    }

    /// Returns `true` if the route's load fits the vehicle capacity.
    pub fn is_route_feasible(&self, route: &[usize]) -> bool {
        self.route_load(route) <= self.problem.capacity()
    }

    /// Builds a route from a sequence of customer indices, computing its
    /// distance and load.
    ///
    /// Returns the constructed route and any capacity violation. The
    /// violation's `route_index` is 0; [`build_solution`](Self::build_solution)
    /// rewrites it to the route's position.
    pub fn build_route(&self, customers: &[usize]) -> (Route, Vec<Violation>) {
        let load = self.route_load(customers);
        let route = Route::new(customers.to_vec(), self.route_distance(customers), load);

        let mut violations = Vec::new();
        if load > self.problem.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load,
                capacity: self.problem.capacity(),
            }));
        }
        (route, violations)
    }

    /// Detailed metrics for one route.
    pub fn route_info(&self, route: &[usize]) -> RouteInfo {
        if route.is_empty() {
            return RouteInfo::empty();
        }
        let load = self.route_load(route);
        RouteInfo {
            distance: self.route_distance(route),
            load,
            customers: route.to_vec(),
            capacity_utilization: f64::from(load) / f64::from(self.problem.capacity()),
            feasible: load <= self.problem.capacity(),
        }
    }

    /// Assembles a solution from customer sequences.
    ///
    /// Every customer not present in any route is reported as unvisited, in
    /// ascending order. Route order is preserved, empty routes included.
    pub fn build_solution<I>(&self, routes: I) -> Solution
    where
        I: IntoIterator,
        I::Item: AsRef<[usize]>,
    {
        let mut solution = Solution::new();
        let mut visited = vec![false; self.problem.num_customers()];

        for (idx, customers) in routes.into_iter().enumerate() {
            let customers = customers.as_ref();
            let (route, violations) = self.build_route(customers);
            for mut v in violations {
                match &mut v.kind {
                    ViolationType::CapacityExceeded { route_index, .. } => *route_index = idx,
                }
                solution.add_violation(v);
            }
            for &c in customers {
                visited[c] = true;
            }
            solution.add_route(route);
        }

        for (c, &is_visited) in visited.iter().enumerate() {
            if !is_visited {
                solution.add_unassigned(c);
            }
        }
        solution
    }

    /// Checks that routes only reference known customers, each at most once.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] naming the first offending customer.
    pub fn validate_routes<R: AsRef<[usize]>>(&self, routes: &[R]) -> Result<(), RouteError> {
        let n = self.problem.num_customers();
        let mut seen = vec![false; n];
        for (route_idx, route) in routes.iter().enumerate() {
            for &customer in route.as_ref() {
                if customer >= n {
                    return Err(RouteError::UnknownCustomer {
                        route: route_idx,
                        customer,
                        num_customers: n,
                    });
                }
                if std::mem::replace(&mut seen[customer], true) {
                    return Err(RouteError::DuplicateCustomer { customer });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn setup() -> (Problem, DistanceMatrix) {
        let problem = Problem::new(
            Point::new(0.0, 0.0),
            vec![
                Point::new(3.0, 4.0),
                Point::new(6.0, 8.0),
                Point::new(0.0, 10.0),
            ],
            vec![10, 20, 15],
            50,
            2,
        )
        .expect("valid");
        let dm = DistanceMatrix::from_points(problem.depot(), problem.customers());
        (problem, dm)
    }

    #[test]
    fn test_build_route_empty() {
        let (problem, dm) = setup();
        let eval = RouteEvaluator::new(&problem, &dm);
        let (route, violations) = eval.build_route(&[]);
        assert!(route.is_empty());
        assert!(violations.is_empty());
        assert_eq!(route.total_distance(), 0.0);
        assert_eq!(route.total_load(), 0);
    }

    #[test]
    fn test_build_route_single() {
        let (problem, dm) = setup();
        let eval = RouteEvaluator::new(&problem, &dm);
        let (route, violations) = eval.build_route(&[0]);
        assert_eq!(route.len(), 1);
        assert!(violations.is_empty());
        // depot->0 = 5.0, 0->depot = 5.0
        assert!((route.total_distance() - 10.0).abs() < 1e-10);
        assert_eq!(route.total_load(), 10);
    }

    #[test]
    fn test_build_route_capacity_violated() {
        let (_, dm) = setup();
        let problem = Problem::new(
            Point::new(0.0, 0.0),
            vec![
                Point::new(3.0, 4.0),
                Point::new(6.0, 8.0),
                Point::new(0.0, 10.0),
            ],
            vec![10, 20, 15],
            25,
            1,
        )
        .expect("valid");
        let eval = RouteEvaluator::new(&problem, &dm);
        // 10 + 20 + 15 = 45 > 25
        let (route, violations) = eval.build_route(&[0, 1, 2]);
        assert_eq!(route.len(), 3);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                load: 45,
                capacity: 25,
                ..
            }
        ));
        assert!(!eval.is_route_feasible(&[0, 1, 2]));
        assert!(eval.is_route_feasible(&[0, 2]));
    }

    #[test]
    fn test_route_info() {
        let (problem, dm) = setup();
        let eval = RouteEvaluator::new(&problem, &dm);
        let info = eval.route_info(&[0, 1]);
        assert_eq!(info.load, 30);
        assert_eq!(info.customers, vec![0, 1]);
        assert!((info.capacity_utilization - 0.6).abs() < 1e-10);
        assert!((info.distance - 20.0).abs() < 1e-10);
        assert!(info.feasible);
    }

    #[test]
    fn test_route_info_empty() {
        let (problem, dm) = setup();
        let eval = RouteEvaluator::new(&problem, &dm);
        assert_eq!(eval.route_info(&[]), RouteInfo::empty());
    }

    #[test]
    fn test_build_solution_unvisited_and_violations() {
        let (_, dm) = setup();
        let problem = Problem::new(
            Point::new(0.0, 0.0),
            vec![
                Point::new(3.0, 4.0),
                Point::new(6.0, 8.0),
                Point::new(0.0, 10.0),
            ],
            vec![10, 20, 15],
            25,
            2,
        )
        .expect("valid");
        let eval = RouteEvaluator::new(&problem, &dm);
        let sol = eval.build_solution(vec![vec![2], vec![0, 1]]);
        assert_eq!(sol.routes().len(), 2);
        assert!(sol.unvisited().is_empty());
        assert_eq!(sol.violations().len(), 1);
        assert!(matches!(
            sol.violations()[0].kind,
            ViolationType::CapacityExceeded { route_index: 1, .. }
        ));
        assert!(!sol.is_feasible());

        let partial = eval.build_solution(vec![vec![1]]);
        assert_eq!(partial.unvisited(), &[0, 2]);
    }

    #[test]
    fn test_validate_routes() {
        let (problem, dm) = setup();
        let eval = RouteEvaluator::new(&problem, &dm);
        assert!(eval.validate_routes(&[vec![0, 1], vec![2]]).is_ok());
        assert_eq!(
            eval.validate_routes(&[vec![0], vec![7]]),
            Err(RouteError::UnknownCustomer {
                route: 1,
                customer: 7,
                num_customers: 3
            })
        );
        assert_eq!(
            eval.validate_routes(&[vec![0, 1], vec![1]]),
            Err(RouteError::DuplicateCustomer { customer: 1 })
        );
    }
}
