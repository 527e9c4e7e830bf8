mod problem;
mod solution;
mod timeline;

pub use problem::*;
pub use solution::*;
pub use timeline::*;

/// Schedules the requests of a graph within a time limit.
pub trait Solver {
    /// Serves as many requests as the strategy manages within `time_limit`
    /// time units, starting from the depot at time 0.
    fn solve(&mut self, graph: &RequestGraph, time_limit: Time) -> Schedule;

    /// Bounds the wall-clock time of a single `solve` call. Solvers whose
    /// running time is polynomial ignore it.
    fn set_budget(&mut self, _budget: std::time::Duration) {}

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}
