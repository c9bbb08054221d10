//! Dense distance matrix.

use crate::models::Point;

/// Matrix index of the depot.
pub const DEPOT: usize = 0;

/// Maps a zero-based customer index to its matrix index.
///
/// Customer `c` sits at row/column `c + 1`; row/column 0 is the depot.
pub const fn node_of(customer: usize) -> usize {
    customer + 1
}

/// A dense (N+1)×(N+1) Euclidean distance matrix stored in row-major order.
///
/// Row/column 0 is the depot, rows/columns `1..=N` are customers in input
/// order. The matrix is symmetric with a zero diagonal.
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::Point;
/// use vrp_heuristics::distance::{DistanceMatrix, DEPOT, node_of};
///
/// let dm = DistanceMatrix::from_points(
///     Point::new(0.0, 0.0),
///     &[Point::new(3.0, 4.0), Point::new(6.0, 8.0)],
/// );
/// assert!((dm.get(DEPOT, node_of(0)) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes the Euclidean matrix over the depot followed by the customers.
    pub fn from_points(depot: Point, customers: &[Point]) -> Self {
        let points: Vec<Point> = std::iter::once(depot)
            .chain(customers.iter().copied())
            .collect();
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from matrix index `from` to matrix index `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations (depot included) in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Total distance of `depot → route[0] → … → route[k] → depot`.
    ///
    /// `route` holds zero-based customer indices. An empty route has
    /// distance zero.
    pub fn route_distance(&self, route: &[usize]) -> f64 {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return 0.0;
        };
        let inner: f64 = route
            .windows(2)
            .map(|w| self.get(node_of(w[0]), node_of(w[1])))
            .sum();
        self.get(DEPOT, node_of(first)) + inner + self.get(node_of(last), DEPOT)
    }
}
