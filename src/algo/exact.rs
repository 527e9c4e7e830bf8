use crate::core::{
    is_feasible, needs_jump, Request, RequestGraph, Schedule, ScheduleStep, Solver, Time,
};
use std::time::{Duration, Instant};

/// Exhaustive search over every service order of the graph's requests.
/// `O(n! * n)` time, `O(n)` memory beyond the incumbent: it exists to
/// produce ground truth for the heuristics, not for production use, so
/// either keep `n` small or give it a wall-clock budget.
#[derive(Clone, Debug, Default)]
pub struct Exact {
    budget: Option<Duration>,
}

impl Exact {
    /// Creates a solver that abandons the search once `budget` wall-clock
    /// time has elapsed, returning the incumbent with `complete = false`.
    #[must_use]
    pub const fn with_budget(budget: Duration) -> Self {
        Self {
            budget: Some(budget),
        }
    }
}

impl Solver for Exact {
    fn solve(&mut self, graph: &RequestGraph, time_limit: Time) -> Schedule {
        let start = Instant::now();
        let mut best: Vec<ScheduleStep> = Vec::new();
        let mut complete = true;

        if !graph.is_empty() && time_limit > 0 {
            let mut order = graph.requests().to_vec();
            let mut permutations = Permutations::new(order.len());

            while permutations.advance(&mut order) {
                let served = simulate(&order, time_limit);
                // First strictly better order wins; ties keep the earlier one.
                if served.len() > best.len() {
                    best = served;
                }

                if self.budget.is_some_and(|budget| start.elapsed() >= budget) {
                    complete = false;
                    break;
                }
            }
        }

        Schedule {
            steps: best,
            seconds: start.elapsed().as_secs_f64(),
            complete,
        }
    }

    fn set_budget(&mut self, budget: Duration) {
        self.budget = Some(budget);
    }

    fn name(&self) -> &'static str {
        "opt"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(Exact::default());

/// Serves the requests of one fixed order. The order grants no freedom: an
/// infeasible request is waited on, and once its window closes the rest of
/// the order is unreachable. Time advances one unit per iteration, plus one
/// jump unit paid right after serving when the next request is not chained.
fn simulate(order: &[Request], time_limit: Time) -> Vec<ScheduleStep> {
    let mut served = Vec::new();
    let mut t: Time = 1;
    let mut i = 0;

    while t < time_limit && i < order.len() {
        let request = order[i];

        if is_feasible(&request, t) {
            served.push(ScheduleStep { request, time: t });
            if let Some(next) = order.get(i + 1) {
                if needs_jump(&request, next) {
                    t = t.saturating_add(1);
                }
            }
            i += 1;
        }

        t = t.saturating_add(1);
    }

    served
}

/// Heap's algorithm, iteratively: `advance` rearranges the slice into the
/// next permutation and reports whether one was produced. The first call
/// leaves the slice untouched, so enumeration starts from the input order
/// and is fully deterministic.
struct Permutations {
    c: Vec<usize>,
    i: usize,
    started: bool,
}

impl Permutations {
    fn new(n: usize) -> Self {
        Self {
            c: vec![0; n],
            i: 0,
            started: false,
        }
    }

    fn advance<T>(&mut self, items: &mut [T]) -> bool {
        if !self.started {
            self.started = true;
            return true;
        }

        while self.i < items.len() {
            if self.c[self.i] < self.i {
                if self.i % 2 == 0 {
                    items.swap(0, self.i);
                } else {
                    items.swap(self.c[self.i], self.i);
                }
                self.c[self.i] += 1;
                self.i = 0;
                return true;
            }

            self.c[self.i] = 0;
            self.i += 1;
        }

        false
    }
}
