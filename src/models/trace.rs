//! Local search trace records.

use serde::Serialize;

/// A move applied by the local search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MoveKind {
    /// Intra-route 2-opt: reversed positions `i + 1..=j` of `route`.
    TwoOpt {
        /// Route index.
        route: usize,
        /// Position before the reversed segment.
        i: usize,
        /// Last position of the reversed segment.
        j: usize,
    },
    /// Inter-route swap of the customer at `pos_a` in `route_a` with the
    /// customer at `pos_b` in `route_b`.
    Swap {
        /// First route index.
        route_a: usize,
        /// Position in the first route.
        pos_a: usize,
        /// Second route index.
        route_b: usize,
        /// Position in the second route.
        pos_b: usize,
    },
}

/// One entry of the improvement trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveRecord {
    /// 1-based pass number in which the move was applied.
    pub pass: usize,
    /// The applied move.
    pub kind: MoveKind,
    /// Distance saved by the move.
    pub improvement: f64,
}

/// Why an improvement run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// A full pass found no improving move.
    Converged,
    /// The budget of passes without improvement was exhausted.
    IterationBudget,
    /// The configured cap on total passes was reached.
    PassLimit,
    /// The cancellation token was triggered.
    Cancelled,
}
