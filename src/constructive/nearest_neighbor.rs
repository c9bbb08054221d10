//! Nearest-neighbor constructive heuristic.
//!
//! Builds routes greedily, one vehicle at a time: starting from the depot,
//! always extend to the closest unvisited customer whose demand still fits.
//! When nothing fits, the vehicle returns to the depot and the next one
//! starts.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for VRP. While solution
//! quality is typically 15-25% above optimal, it provides a fast baseline.

use crate::distance::{node_of, DistanceMatrix, DEPOT};
use crate::evaluation::RouteEvaluator;
use crate::models::{Problem, RouteInfo, Solution};

/// Nearest-neighbor solver for a single problem instance.
///
/// Owns its distance matrix, computed at construction.
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::{Point, Problem};
/// use vrp_heuristics::constructive::NearestNeighborSolver;
///
/// let problem = Problem::new(
///     Point::new(0.0, 0.0),
///     vec![Point::new(1.0, 0.0), Point::new(2.0, 0.0), Point::new(3.0, 0.0)],
///     vec![10, 10, 10],
///     30,
///     1,
/// )
/// .unwrap();
///
/// let solution = NearestNeighborSolver::new(&problem).solve();
/// assert_eq!(solution.route_lists(), vec![vec![0, 1, 2]]);
/// assert!(solution.is_feasible());
/// ```
pub struct NearestNeighborSolver<'a> {
    problem: &'a Problem,
    distances: DistanceMatrix,
}

impl<'a> NearestNeighborSolver<'a> {
    /// Creates a solver and precomputes the distance matrix.
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            distances: DistanceMatrix::from_points(problem.depot(), problem.customers()),
        }
    }

    /// The solver's distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Constructs a solution using at most `num_vehicles` routes.
    ///
    /// Ties between equidistant candidates go to the lowest customer index.
    /// Customers that fit no remaining vehicle are reported as unvisited.
    pub fn solve(&self) -> Solution {
        let n = self.problem.num_customers();
        let mut visited = vec![false; n];
        let mut remaining = n;
        let mut routes: Vec<Vec<usize>> = Vec::new();

        while remaining > 0 && routes.len() < self.problem.num_vehicles() {
            let route = self.construct_route(&mut visited);
            if route.is_empty() {
                // Nothing left fits an empty vehicle.
                break;
            }
            remaining -= route.len();
            routes.push(route);
        }

        let solution = RouteEvaluator::new(self.problem, &self.distances).build_solution(&routes);
        log::debug!(
            "nearest neighbor built {} routes, distance {:.3}, {} unvisited",
            solution.num_vehicles_used(),
            solution.total_distance(),
            solution.unvisited().len()
        );
        if !solution.unvisited().is_empty() {
            log::warn!(
                "nearest neighbor left customers {:?} unvisited",
                solution.unvisited()
            );
        }
        solution
    }

    /// Detailed metrics for a route.
    pub fn get_route_info(&self, route: &[usize]) -> RouteInfo {
        RouteEvaluator::new(self.problem, &self.distances).route_info(route)
    }

    /// Builds one route, marking its customers as visited.
    fn construct_route(&self, visited: &mut [bool]) -> Vec<usize> {
        let capacity = self.problem.capacity();
        let mut route = Vec::new();
        let mut current = DEPOT;
        let mut load: u32 = 0;

        loop {
            // Find nearest unvisited customer that fits capacity
            let mut best: Option<(usize, f64)> = None;
            for (c, _) in visited.iter().enumerate().filter(|(_, v)| !**v) {
                let demand = self.problem.demand(c);
                if load.saturating_add(demand) > capacity {
                    continue;
                }
                let d = self.distances.get(current, node_of(c));
                if best.is_none_or(|(_, best_d)| d < best_d) {
                    best = Some((c, d));
                }
            }

            match best {
                Some((next, _)) => {
                    visited[next] = true;
                    route.push(next);
                    load += self.problem.demand(next);
                    current = node_of(next);
                }
                None => break,
            }
        }
        route
    }
}
