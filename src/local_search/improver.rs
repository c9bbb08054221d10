//! 2-opt improvement driver.
//!
//! Each pass runs one move search over the current routes and applies at
//! most one move; the next pass searches again from the first route. The run
//! stops when a pass finds no improving move, when the pass budget is spent,
//! or when the cancellation token fires.

use super::{
    find_intra_route_move, find_swap_move, CancellationToken, LocalSearchConfig, SwapMove,
    TwoOptMove,
};
use crate::distance::DistanceMatrix;
use crate::error::RouteError;
use crate::evaluation::RouteEvaluator;
use crate::models::{MoveKind, MoveRecord, Problem, RouteInfo, Solution, Termination};

/// Neighborhood explored by one improvement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Neighborhood {
    IntraRoute,
    InterRoute,
}

impl Neighborhood {
    fn name(self) -> &'static str {
        match self {
            Neighborhood::IntraRoute => "intra-route 2-opt",
            Neighborhood::InterRoute => "inter-route swap",
        }
    }
}

/// A move found by either neighborhood.
enum LocalMove {
    TwoOpt(usize, TwoOptMove),
    Swap(SwapMove),
}

impl LocalMove {
    fn apply(&self, routes: &mut [Vec<usize>]) -> (MoveKind, f64) {
        match self {
            LocalMove::TwoOpt(route, mv) => {
                mv.apply(&mut routes[*route]);
                (
                    MoveKind::TwoOpt {
                        route: *route,
                        i: mv.i,
                        j: mv.j,
                    },
                    mv.improvement,
                )
            }
            LocalMove::Swap(mv) => {
                mv.apply(routes);
                (
                    MoveKind::Swap {
                        route_a: mv.route_a,
                        pos_a: mv.pos_a,
                        route_b: mv.route_b,
                        pos_b: mv.pos_b,
                    },
                    mv.improvement,
                )
            }
        }
    }
}

/// Outcome of one phase of the pass loop.
struct PhaseOutcome {
    passes: usize,
    trace: Vec<MoveRecord>,
    termination: Termination,
}

/// Local search improver using intra-route 2-opt and inter-route swaps.
///
/// Owns its distance matrix. Input routes are copied on entry; the caller's
/// routes are never mutated. Improvement never increases total distance.
///
/// # Examples
///
/// ```
/// use vrp_heuristics::models::{Point, Problem};
/// use vrp_heuristics::constructive::NearestNeighborSolver;
/// use vrp_heuristics::local_search::TwoOptImprover;
///
/// let problem = Problem::new(
///     Point::new(0.0, 0.0),
///     vec![
///         Point::new(4.0, 4.0), Point::new(6.0, 2.0), Point::new(8.0, 6.0),
///         Point::new(2.0, 8.0), Point::new(10.0, 4.0), Point::new(12.0, 2.0),
///     ],
///     vec![3, 5, 2, 4, 6, 3],
///     10,
///     3,
/// )
/// .unwrap();
///
/// let initial = NearestNeighborSolver::new(&problem).solve();
/// let improver = TwoOptImprover::new(&problem);
/// let improved = improver.improve_solution(&initial.route_lists(), 100).unwrap();
/// assert!(improved.total_distance() <= initial.total_distance());
/// assert!(improved.is_feasible());
/// ```
pub struct TwoOptImprover<'a> {
    problem: &'a Problem,
    distances: DistanceMatrix,
    config: LocalSearchConfig,
    cancellation: Option<CancellationToken>,
}

impl<'a> TwoOptImprover<'a> {
    /// Creates an improver with default configuration.
    pub fn new(problem: &'a Problem) -> Self {
        Self::with_config(problem, LocalSearchConfig::default())
    }

    /// Creates an improver with explicit configuration.
    ///
    /// A negative or NaN threshold is treated as 0; see
    /// [`LocalSearchConfig::validate`].
    pub fn with_config(problem: &'a Problem, config: LocalSearchConfig) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("{err}; using a threshold of {}", config.min_gain());
        }
        Self {
            problem,
            distances: DistanceMatrix::from_points(problem.depot(), problem.customers()),
            config,
            cancellation: None,
        }
    }

    /// Attaches a cancellation token checked once per pass.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// The improver's distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Improves each route with intra-route 2-opt.
    ///
    /// Routes with fewer than 3 customers are left as they are.
    /// `max_iterations` bounds the passes without improvement; 0 returns the
    /// input unchanged with [`Termination::IterationBudget`].
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if a route references an unknown customer or a
    /// customer appears twice.
    pub fn improve_solution<R: AsRef<[usize]>>(
        &self,
        routes: &[R],
        max_iterations: usize,
    ) -> Result<Solution, RouteError> {
        self.run(routes, max_iterations, &[Neighborhood::IntraRoute])
    }

    /// Improves the solution by swapping customers between routes.
    ///
    /// Customer membership changes but every customer stays assigned to
    /// exactly one route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if a route references an unknown customer or a
    /// customer appears twice.
    pub fn inter_route_2opt<R: AsRef<[usize]>>(
        &self,
        routes: &[R],
        max_iterations: usize,
    ) -> Result<Solution, RouteError> {
        self.run(routes, max_iterations, &[Neighborhood::InterRoute])
    }

    /// Runs intra-route 2-opt, then inter-route swaps on its result.
    ///
    /// Pass numbers in the trace continue across both phases, and the
    /// reported iterations are their sum. The pass cap covers both phases, and
    /// a first phase stopped by cancellation or the cap skips the second.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] if a route references an unknown customer or a
    /// customer appears twice.
    pub fn improve<R: AsRef<[usize]>>(
        &self,
        routes: &[R],
        max_iterations: usize,
    ) -> Result<Solution, RouteError> {
        self.run(
            routes,
            max_iterations,
            &[Neighborhood::IntraRoute, Neighborhood::InterRoute],
        )
    }

    /// Detailed metrics for a route.
    pub fn get_route_info(&self, route: &[usize]) -> RouteInfo {
        RouteEvaluator::new(self.problem, &self.distances).route_info(route)
    }

    fn run<R: AsRef<[usize]>>(
        &self,
        routes: &[R],
        max_iterations: usize,
        phases: &[Neighborhood],
    ) -> Result<Solution, RouteError> {
        self.run_observed(routes, max_iterations, phases, |_| {})
    }

    /// [`run`](Self::run) with `before_pass` called with the number of
    /// completed passes ahead of every stop check.
    fn run_observed<R, F>(
        &self,
        routes: &[R],
        max_iterations: usize,
        phases: &[Neighborhood],
        mut before_pass: F,
    ) -> Result<Solution, RouteError>
    where
        R: AsRef<[usize]>,
        F: FnMut(usize),
    {
        let evaluator = RouteEvaluator::new(self.problem, &self.distances);
        evaluator.validate_routes(routes)?;

        let mut current: Vec<Vec<usize>> = routes.iter().map(|r| r.as_ref().to_vec()).collect();
        let initial_distance: f64 = current.iter().map(|r| evaluator.route_distance(r)).sum();

        let mut passes = 0;
        let mut trace = Vec::new();
        let mut termination = Termination::Converged;
        for &neighborhood in phases {
            let outcome = self.search(
                &mut current,
                max_iterations,
                neighborhood,
                passes,
                &mut before_pass,
            );
            passes += outcome.passes;
            trace.extend(outcome.trace);
            termination = outcome.termination;
            if matches!(termination, Termination::Cancelled | Termination::PassLimit) {
                break;
            }
        }

        let mut solution = evaluator.build_solution(&current);
        log::info!(
            "local search: distance {:.3} -> {:.3} after {} passes, {} moves ({:?})",
            initial_distance,
            solution.total_distance(),
            passes,
            trace.len(),
            termination
        );
        solution.set_search_outcome(passes, trace, termination);
        Ok(solution)
    }

    /// The pass loop for one neighborhood.
    ///
    /// `pass_offset` is the number of passes spent by earlier phases. It
    /// shifts the recorded pass numbers and counts toward the pass cap.
    fn search(
        &self,
        routes: &mut [Vec<usize>],
        max_iterations: usize,
        neighborhood: Neighborhood,
        pass_offset: usize,
        before_pass: &mut dyn FnMut(usize),
    ) -> PhaseOutcome {
        let mut passes = 0;
        let mut trace = Vec::new();

        if max_iterations == 0 {
            return PhaseOutcome {
                passes,
                trace,
                termination: Termination::IterationBudget,
            };
        }

        let termination = loop {
            before_pass(pass_offset + passes);
            if self
                .config
                .max_passes
                .is_some_and(|cap| pass_offset + passes >= cap)
            {
                break Termination::PassLimit;
            }
            if self
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
            {
                break Termination::Cancelled;
            }

            passes += 1;
            // The search is deterministic: once a pass finds nothing, later
            // passes over the same routes cannot either.
            let Some(mv) = self.find_move(routes, neighborhood) else {
                break Termination::Converged;
            };

            let (kind, improvement) = mv.apply(routes);
            let pass = pass_offset + passes;
            log::debug!(
                "{} pass {}: applied {:?}, improvement {:.3}",
                neighborhood.name(),
                pass,
                kind,
                improvement
            );
            trace.push(MoveRecord {
                pass,
                kind,
                improvement,
            });
        };

        PhaseOutcome {
            passes,
            trace,
            termination,
        }
    }

    fn find_move(&self, routes: &[Vec<usize>], neighborhood: Neighborhood) -> Option<LocalMove> {
        match neighborhood {
            Neighborhood::IntraRoute => {
                find_intra_route_move(routes, &self.distances, &self.config)
                    .map(|(route, mv)| LocalMove::TwoOpt(route, mv))
            }
            Neighborhood::InterRoute => find_swap_move(
                routes,
                self.problem.demands(),
                self.problem.capacity(),
                &self.distances,
                &self.config,
            )
            .map(LocalMove::Swap),
        }
    }
}
