//! Clarke-Wright savings algorithm.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own route (depot → customer → depot). It then merges routes by
//! computing the "savings" of linking two customers directly instead of
//! returning to the depot in between:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! Routes are merged in decreasing order of savings, subject to capacity,
//! and only when both customers are endpoints of their routes. If more
//! routes remain than vehicles are available, only the shortest routes are
//! kept and the customers of the others become unvisited.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use serde::Serialize;

use crate::distance::{node_of, DistanceMatrix, DEPOT};
use crate::evaluation::RouteEvaluator;
use crate::models::{Problem, RouteInfo, Solution};

/// A savings value for linking customers `i` and `j` (`i < j`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsEntry {
    /// First customer index.
    pub i: usize,
    /// Second customer index.
    pub j: usize,
    /// `d(depot, i) + d(depot, j) - d(i, j)`.
    pub value: f64,
}

/// Clarke-Wright savings solver for a single problem instance.
///
/// The distance matrix and the sorted savings list are computed once at
/// construction.
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::{Point, Problem};
/// use vrp_heuristics::constructive::SavingsSolver;
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
/// let solver = SavingsSolver::new(&problem);
/// let solution = solver.solve();
/// assert_eq!(solution.route_lists(), vec![vec![0, 1, 2]]);
/// assert!((solution.total_distance() - 6.0).abs() < 1e-10);
/// ```
pub struct SavingsSolver<'a> {
    problem: &'a Problem,
    distances: DistanceMatrix,
    savings: Vec<SavingsEntry>,
}

impl<'a> SavingsSolver<'a> {
    /// Creates a solver, precomputing distances and sorted savings.
    pub fn new(problem: &'a Problem) -> Self {
        let distances = DistanceMatrix::from_points(problem.depot(), problem.customers());
        let savings = compute_savings(&distances, problem.num_customers());
        Self {
            problem,
            distances,
            savings,
        }
    }

    /// The solver's distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Savings for every customer pair, sorted by decreasing value.
    pub fn savings(&self) -> &[SavingsEntry] {
        &self.savings
    }

    /// Constructs a solution by merging routes in savings order.
    pub fn solve(&self) -> Solution {
        let n = self.problem.num_customers();
        let capacity = self.problem.capacity();

        // Arena of route buffers indexed by route id; customer c starts in
        // route c. Customers that exceed capacity on their own get no route.
        let mut routes: Vec<Vec<usize>> = (0..n)
            .map(|c| {
                if self.problem.demand(c) <= capacity {
                    vec![c]
                } else {
                    Vec::new()
                }
            })
            .collect();
        let mut route_load: Vec<u32> = self.problem.demands().to_vec();
        let mut route_of: Vec<usize> = (0..n).collect();

        for saving in &self.savings {
            if saving.value <= 0.0 {
                break;
            }

            let ri = route_of[saving.i];
            let rj = route_of[saving.j];
            if ri == rj {
                continue;
            }

            let combined_load = route_load[ri].saturating_add(route_load[rj]);
            if combined_load > capacity {
                continue;
            }

            let Some(merged) = merge_at_endpoints(&routes[ri], &routes[rj], saving.i, saving.j)
            else {
                continue;
            };

            // Route ri survives; route rj is absorbed.
            for &c in &routes[rj] {
                route_of[c] = ri;
            }
            routes[ri] = merged;
            routes[rj].clear();
            route_load[ri] = combined_load;
            route_load[rj] = 0;
        }

        let mut final_routes: Vec<Vec<usize>> =
            routes.into_iter().filter(|r| !r.is_empty()).collect();

        let num_vehicles = self.problem.num_vehicles();
        if final_routes.len() > num_vehicles {
            log::warn!(
                "savings produced {} routes for {} vehicles; dropping the {} longest",
                final_routes.len(),
                num_vehicles,
                final_routes.len() - num_vehicles
            );
            let mut ranked: Vec<(Vec<usize>, f64)> = final_routes
                .into_iter()
                .map(|r| {
                    let d = self.distances.route_distance(&r);
                    (r, d)
                })
                .collect();
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
            ranked.truncate(num_vehicles);
            final_routes = ranked.into_iter().map(|(r, _)| r).collect();
        }

        let solution =
            RouteEvaluator::new(self.problem, &self.distances).build_solution(&final_routes);
        log::debug!(
            "savings built {} routes, distance {:.3}, {} unvisited",
            solution.num_vehicles_used(),
            solution.total_distance(),
            solution.unvisited().len()
        );
        if !solution.unvisited().is_empty() {
            log::warn!("savings left customers {:?} unvisited", solution.unvisited());
        }
        solution
    }

    /// Detailed metrics for a route.
    pub fn get_route_info(&self, route: &[usize]) -> RouteInfo {
        RouteEvaluator::new(self.problem, &self.distances).route_info(route)
    }
}

/// Savings for all unordered customer pairs, sorted by decreasing value.
///
/// The sort is stable, so equal savings keep `(i, j)` enumeration order.
fn compute_savings(distances: &DistanceMatrix, n: usize) -> Vec<SavingsEntry> {
    let mut savings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let value = distances.get(DEPOT, node_of(i)) + distances.get(DEPOT, node_of(j))
                - distances.get(node_of(i), node_of(j));
            savings.push(SavingsEntry { i, j, value });
        }
    }
    savings.sort_by(|a, b| b.value.total_cmp(&a.value));
    savings
}

/// Position of `customer` if it is the first or last element of `route`.
fn endpoint_position(route: &[usize], customer: usize) -> Option<usize> {
    if route.first() == Some(&customer) {
        Some(0)
    } else if route.last() == Some(&customer) {
        Some(route.len() - 1)
    } else {
        None
    }
}

/// Joins two routes so that `ci` (in `first`) and `cj` (in `second`) become
/// adjacent.
///
/// Returns `None` unless both customers sit at an endpoint of their route.
fn merge_at_endpoints(first: &[usize], second: &[usize], ci: usize, cj: usize) -> Option<Vec<usize>> {
    let i_pos = endpoint_position(first, ci)?;
    let j_pos = endpoint_position(second, cj)?;
    let i_last = first.len() - 1;
    let j_last = second.len() - 1;

    let mut merged = Vec::with_capacity(first.len() + second.len());
    if i_pos == i_last && j_pos == 0 {
        // ... ci | cj ...
        merged.extend_from_slice(first);
        merged.extend_from_slice(second);
    } else if i_pos == 0 && j_pos == j_last {
        // ... cj | ci ...
        merged.extend_from_slice(second);
        merged.extend_from_slice(first);
    } else if i_pos == i_last && j_pos == j_last {
        merged.extend_from_slice(first);
        merged.extend(second.iter().rev());
    } else {
        // Both at the head.
        merged.extend(first.iter().rev());
        merged.extend_from_slice(second);
    }
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn problem(coords: &[(f64, f64)], demands: Vec<u32>, capacity: u32, vehicles: usize) -> Problem {
        let customers = coords.iter().copied().map(Point::from).collect();
        Problem::new(Point::new(0.0, 0.0), customers, demands, capacity, vehicles)
            .expect("valid")
    }

    #[test]
    fn test_cw_line() {
        let p = problem(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)], vec![10, 10, 10], 30, 1);
        let sol = SavingsSolver::new(&p).solve();
        assert_eq!(sol.num_served(), 3);
        assert!(sol.unvisited().is_empty());
        // With savings, should merge all into one route
        assert_eq!(sol.route_lists(), vec![vec![0, 1, 2]]);
        // Optimal: 0→1→2→3→0 = 6.0
        assert!((sol.total_distance() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_cw_chain_of_merges() {
        let p = problem(
            &[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)],
            vec![1, 1, 1, 1],
            10,
            1,
        );
        let sol = SavingsSolver::new(&p).solve();
        assert_eq!(sol.route_lists(), vec![vec![0, 1, 2, 3]]);
        assert!((sol.total_distance() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_cw_capacity_split() {
        let p = problem(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)], vec![15, 15, 15], 25, 3);
        let sol = SavingsSolver::new(&p).solve();
        // Can't fit any two customers together (30 > 25)
        assert_eq!(sol.route_lists(), vec![vec![0], vec![1], vec![2]]);
        assert!((sol.total_distance() - 12.0).abs() < 1e-10);
        assert!(sol.is_feasible());
    }

    #[test]
    fn test_cw_empty() {
        let p = problem(&[], vec![], 100, 1);
        let solver = SavingsSolver::new(&p);
        assert!(solver.savings().is_empty());
        let sol = solver.solve();
        assert!(sol.routes().is_empty());
        assert_eq!(sol.total_distance(), 0.0);
        assert!(sol.is_feasible());
    }

    #[test]
    fn test_cw_single_customer() {
        let p = problem(&[(5.0, 0.0)], vec![10], 100, 1);
        let sol = SavingsSolver::new(&p).solve();
        assert_eq!(sol.route_lists(), vec![vec![0]]);
        assert!((sol.total_distance() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_cw_savings_computation() {
        let p = problem(&[(4.0, 4.0), (6.0, 2.0)], vec![1, 1], 10, 1);
        let solver = SavingsSolver::new(&p);
        let depot = Point::new(0.0, 0.0);
        let c0 = Point::new(4.0, 4.0);
        let c1 = Point::new(6.0, 2.0);
        let expected = depot.distance_to(&c0) + depot.distance_to(&c1) - c0.distance_to(&c1);

        assert_eq!(solver.savings().len(), 1);
        let entry = solver.savings()[0];
        assert_eq!((entry.i, entry.j), (0, 1));
        assert!((entry.value - expected).abs() < 1e-10);
        assert!((entry.value - 9.152_982_445_082_95).abs() < 1e-10);

        let sol = solver.solve();
        assert_eq!(sol.route_lists(), vec![vec![0, 1]]);
    }

    #[test]
    fn test_cw_savings_sorted_descending() {
        let p = problem(
            &[(4.0, 4.0), (6.0, 2.0), (8.0, 6.0), (2.0, 8.0), (10.0, 4.0), (12.0, 2.0)],
            vec![3, 5, 2, 4, 6, 3],
            10,
            3,
        );
        let solver = SavingsSolver::new(&p);
        let savings = solver.savings();
        assert_eq!(savings.len(), 15);
        assert!(savings.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!((savings[0].i, savings[0].j), (4, 5));
        assert!((savings[0].value - 20.107_427_550_119_255).abs() < 1e-9);
    }

    #[test]
    fn test_cw_truncates_to_shortest_routes() {
        // Capacity 1 prevents every merge; 4 routes for 2 vehicles.
        let p = problem(
            &[(10.0, 0.0), (-10.0, 0.0), (0.0, 11.0), (0.0, -12.0)],
            vec![1, 1, 1, 1],
            1,
            2,
        );
        let sol = SavingsSolver::new(&p).solve();
        assert_eq!(sol.route_lists(), vec![vec![0], vec![1]]);
        assert_eq!(sol.unvisited(), &[2, 3]);
        assert!((sol.total_distance() - 40.0).abs() < 1e-10);
        assert!(!sol.is_feasible());
    }

    #[test]
    fn test_cw_oversized_customer_unvisited() {
        let p = problem(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)], vec![5, 50, 5], 10, 3);
        let sol = SavingsSolver::new(&p).solve();
        assert_eq!(sol.unvisited(), &[1]);
        assert!(sol.violations().is_empty());
        for route in sol.routes() {
            assert!(route.total_load() <= 10);
        }
    }

    #[test]
    fn test_cw_reference_instance() {
        let p = problem(
            &[(4.0, 4.0), (6.0, 2.0), (8.0, 6.0), (2.0, 8.0), (10.0, 4.0), (12.0, 2.0)],
            vec![3, 5, 2, 4, 6, 3],
            10,
            3,
        );
        let solver = SavingsSolver::new(&p);
        let sol = solver.solve();
        assert_eq!(sol.route_lists(), vec![vec![0, 2, 3], vec![1], vec![4, 5]]);
        assert!((sol.total_distance() - 63.113_149_216_349_2).abs() < 1e-9);
        assert!(sol.is_feasible());

        let info = solver.get_route_info(&[4, 5]);
        assert_eq!(info.load, 9);
        assert!((info.capacity_utilization - 0.9).abs() < 1e-10);
        assert!(info.feasible);
    }

    #[test]
    fn test_merge_orientations() {
        // tail of first meets head of second
        assert_eq!(merge_at_endpoints(&[1, 2], &[3, 4], 2, 3), Some(vec![1, 2, 3, 4]));
        // head of first meets tail of second
        assert_eq!(merge_at_endpoints(&[1, 2], &[3, 4], 1, 4), Some(vec![3, 4, 1, 2]));
        // both tails
        assert_eq!(merge_at_endpoints(&[1, 2], &[3, 4], 2, 4), Some(vec![1, 2, 4, 3]));
        // both heads
        assert_eq!(merge_at_endpoints(&[1, 2], &[3, 4], 1, 3), Some(vec![2, 1, 3, 4]));
        // interior customer
        assert_eq!(merge_at_endpoints(&[1, 2, 5], &[3, 4], 2, 3), None);
        // singletons
        assert_eq!(merge_at_endpoints(&[1], &[3], 1, 3), Some(vec![1, 3]));
    }
}
