//! Inter-route customer swap search.
//!
//! # Algorithm
//!
//! For every pair of distinct non-empty routes and every pair of positions
//! (one per route), evaluate exchanging the two customers. Each route keeps
//! its shape; only the customer at the swapped position changes, so the
//! distance change is local to its two neighbouring edges:
//!
//! ```text
//! gain(r, p, v) = d(prev, r[p]) + d(r[p], next) - d(prev, v) - d(v, next)
//! ```
//!
//! A swap is accepted only if both routes stay within capacity and the
//! combined gain exceeds the threshold.
//!
//! # Complexity
//!
//! O(n² × R²) per pass, where n = customers per route, R = number of routes.

use super::{LocalSearchConfig, SearchPolicy};
use crate::distance::{node_of, DistanceMatrix, DEPOT};

/// Swap the customer at `pos_a` of `route_a` with the one at `pos_b` of
/// `route_b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMove {
    /// First route index.
    pub route_a: usize,
    /// Position in the first route.
    pub pos_a: usize,
    /// Second route index (`route_a < route_b`).
    pub route_b: usize,
    /// Position in the second route.
    pub pos_b: usize,
    /// Distance saved by the move.
    pub improvement: f64,
}

impl SwapMove {
    /// Applies the swap in place.
    pub fn apply(&self, routes: &mut [Vec<usize>]) {
        let a = routes[self.route_a][self.pos_a];
        let b = routes[self.route_b][self.pos_b];
        routes[self.route_a][self.pos_a] = b;
        routes[self.route_b][self.pos_b] = a;
    }
}

/// Searches all route pairs for an improving, capacity-feasible swap.
///
/// Scan order is route pair `(a, b)` with `a < b`, then position in `a`,
/// then position in `b`. With [`SearchPolicy::FirstImprovement`] the first
/// qualifying swap is returned; with [`SearchPolicy::BestImprovement`] the
/// largest (earliest on ties).
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::Point;
/// use vrp_heuristics::distance::DistanceMatrix;
/// use vrp_heuristics::local_search::{find_swap_move, LocalSearchConfig};
///
/// // Two routes, each with one customer on the wrong side.
/// let dm = DistanceMatrix::from_points(
///     Point::new(0.0, 0.0),
///     &[Point::new(5.0, 1.0), Point::new(-5.0, 1.0), Point::new(5.0, -1.0), Point::new(-5.0, -1.0)],
/// );
/// let mut routes = vec![vec![0, 1], vec![2, 3]];
/// let mv = find_swap_move(&routes, &[1, 1, 1, 1], 2, &dm, &LocalSearchConfig::default()).unwrap();
/// mv.apply(&mut routes);
/// assert!(dm.route_distance(&routes[0]) + dm.route_distance(&routes[1]) < 40.0);
/// ```
pub fn find_swap_move<R: AsRef<[usize]>>(
    routes: &[R],
    demands: &[u32],
    capacity: u32,
    distances: &DistanceMatrix,
    config: &LocalSearchConfig,
) -> Option<SwapMove> {
    let loads: Vec<i64> = routes
        .iter()
        .map(|r| r.as_ref().iter().map(|&c| i64::from(demands[c])).sum())
        .collect();
    let capacity = i64::from(capacity);
    let min_gain = config.min_gain();

    let mut best: Option<SwapMove> = None;
    for a in 0..routes.len() {
        for b in (a + 1)..routes.len() {
            let (route_a, route_b) = (routes[a].as_ref(), routes[b].as_ref());
            if route_a.is_empty() || route_b.is_empty() {
                continue;
            }

            for (pos_a, &ca) in route_a.iter().enumerate() {
                for (pos_b, &cb) in route_b.iter().enumerate() {
                    let shift = i64::from(demands[cb]) - i64::from(demands[ca]);
                    if loads[a] + shift > capacity || loads[b] - shift > capacity {
                        continue;
                    }

                    let improvement = substitution_gain(route_a, pos_a, cb, distances)
                        + substitution_gain(route_b, pos_b, ca, distances);
                    if improvement <= min_gain {
                        continue;
                    }

                    let candidate = SwapMove {
                        route_a: a,
                        pos_a,
                        route_b: b,
                        pos_b,
                        improvement,
                    };
                    match config.policy {
                        SearchPolicy::FirstImprovement => return Some(candidate),
                        SearchPolicy::BestImprovement => {
                            if best.is_none_or(|m| improvement > m.improvement) {
                                best = Some(candidate);
                            }
                        }
                    }
                }
            }
        }
    }
    best
}

/// Distance saved by replacing the customer at `pos` with `replacement`.
fn substitution_gain(
    route: &[usize],
    pos: usize,
    replacement: usize,
    distances: &DistanceMatrix,
) -> f64 {
    let prev = if pos == 0 { DEPOT } else { node_of(route[pos - 1]) };
    let next = route.get(pos + 1).map_or(DEPOT, |&x| node_of(x));
    let old = node_of(route[pos]);
    let new = node_of(replacement);

    (distances.get(prev, old) + distances.get(old, next))
        - (distances.get(prev, new) + distances.get(new, next))
}
