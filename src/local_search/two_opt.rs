//! Intra-route 2-opt move search.
//!
//! # Algorithm
//!
//! For positions `i < j - 1` in a route, reversing the segment `i+1..=j`
//! replaces edges `(r[i], r[i+1])` and `(r[j], next)` with `(r[i], r[j])` and
//! `(r[i+1], next)`, where `next` is `r[j+1]` or the depot:
//!
//! ```text
//! gain = d(r[i], r[i+1]) + d(r[j], next) - d(r[i], r[j]) - d(r[i+1], next)
//! ```
//!
//! The edge leaving the depot is never broken, so the first customer keeps
//! its position. Reversal keeps the customer set, so capacity is unaffected.
//!
//! # Complexity
//!
//! O(n²) per route scan.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::{LocalSearchConfig, SearchPolicy};
use crate::distance::{node_of, DistanceMatrix, DEPOT};

/// A 2-opt move within one route: reverse positions `i + 1..=j`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptMove {
    /// Position before the reversed segment.
    pub i: usize,
    /// Last position of the reversed segment.
    pub j: usize,
    /// Distance saved by the move.
    pub improvement: f64,
}

impl TwoOptMove {
    /// Applies the move to a route in place.
    pub fn apply(&self, route: &mut [usize]) {
        route[self.i + 1..=self.j].reverse();
    }
}

/// Finds the best 2-opt move for a single route.
///
/// Routes with fewer than 3 customers have no candidate moves. Returns `None`
/// unless the best gain exceeds `threshold`; among equal gains the first in
/// `(i, j)` scan order wins.
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::Point;
/// use vrp_heuristics::distance::DistanceMatrix;
/// use vrp_heuristics::local_search::best_two_opt_move;
///
/// let dm = DistanceMatrix::from_points(
///     Point::new(0.0, 0.0),
///     &[Point::new(1.0, 0.0), Point::new(2.0, 0.0), Point::new(3.0, 0.0), Point::new(4.0, 0.0)],
/// );
/// // 0→1→3→2→4→0 crosses itself; reversing [3, 2] fixes it.
/// let mut route = vec![0, 2, 1, 3];
/// let mv = best_two_opt_move(&route, &dm, 0.001).unwrap();
/// mv.apply(&mut route);
/// assert_eq!(route, vec![0, 1, 2, 3]);
/// ```
pub fn best_two_opt_move(
    route: &[usize],
    distances: &DistanceMatrix,
    threshold: f64,
) -> Option<TwoOptMove> {
    let n = route.len();
    if n < 3 {
        return None;
    }

    let mut best: Option<TwoOptMove> = None;
    for i in 0..n - 1 {
        for j in (i + 2)..n {
            let improvement = two_opt_gain(route, distances, i, j);
            if improvement > best.map_or(0.0, |b| b.improvement) {
                best = Some(TwoOptMove { i, j, improvement });
            }
        }
    }

    best.filter(|m| m.improvement > threshold)
}

/// Searches every route for an improving 2-opt move.
///
/// With [`SearchPolicy::FirstImprovement`] the first route (in order) that
/// has an improving move wins; with [`SearchPolicy::BestImprovement`] the
/// route whose best move saves the most wins. Returns the route index and
/// the move.
pub fn find_intra_route_move<R: AsRef<[usize]>>(
    routes: &[R],
    distances: &DistanceMatrix,
    config: &LocalSearchConfig,
) -> Option<(usize, TwoOptMove)> {
    let mut candidates = routes.iter().enumerate().filter_map(|(idx, route)| {
        best_two_opt_move(route.as_ref(), distances, config.min_gain()).map(|mv| (idx, mv))
    });

    match config.policy {
        SearchPolicy::FirstImprovement => candidates.next(),
        SearchPolicy::BestImprovement => candidates.fold(None, |best, cand| match best {
            Some((_, b)) if b.improvement >= cand.1.improvement => best,
            _ => Some(cand),
        }),
    }
}

/// Distance saved by reversing positions `i + 1..=j`.
fn two_opt_gain(route: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let a = node_of(route[i]);
    let b = node_of(route[i + 1]);
    let c = node_of(route[j]);
    let next = route.get(j + 1).map_or(DEPOT, |&x| node_of(x));

    let old_cost = distances.get(a, b) + distances.get(c, next);
    let new_cost = distances.get(a, c) + distances.get(b, next);
    old_cost - new_cost
}
