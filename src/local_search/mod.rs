//! Local search operators for improving VRP solutions.
//!
//! - [`best_two_opt_move`] finds intra-route 2-opt edge reversals
//! - [`find_swap_move`] finds inter-route customer exchanges
//! - [`TwoOptImprover`] drives either neighborhood to a local optimum

mod cancel;
mod config;
mod exchange;
mod improver;
mod two_opt;

pub use cancel::CancellationToken;
pub use config::{LocalSearchConfig, SearchPolicy};
pub use exchange::{find_swap_move, SwapMove};
pub use improver::TwoOptImprover;
pub use two_opt::{best_two_opt_move, find_intra_route_move, TwoOptMove};
