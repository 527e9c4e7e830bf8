use super::{is_feasible, Request, RequestGraph, Time};
use ahash::{HashSet, HashSetExt};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A single served request and the time unit it was served at.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Serialize, PartialEq)]
pub struct ScheduleStep {
    pub request: Request,
    pub time: Time,
}

/// The outcome of one solver call: the served requests in service order,
/// the wall-clock seconds the search took, and whether the search ran to
/// completion. Only the exact solver under a wall-clock budget ever returns
/// `complete = false`; its schedule is then a lower bound, not an optimum.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Schedule {
    pub steps: Vec<ScheduleStep>,
    pub seconds: f64,
    pub complete: bool,
}

impl Schedule {
    /// Creates an empty, complete schedule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps: Vec::new(),
            seconds: 0.0,
            complete: true,
        }
    }

    /// Returns the number of served requests.
    #[must_use]
    pub fn count(&self) -> usize {
        self.steps.len()
    }

    /// Checks the schedule against the graph it was produced from: every
    /// step serves a request the graph actually holds, inside its window,
    /// at strictly increasing times, and no request is served twice.
    #[must_use]
    pub fn verify(&self, graph: &RequestGraph) -> bool {
        let mut served = HashSet::new();
        let mut previous = None;

        for step in &self.steps {
            let request = step.request;

            if graph.get(request.origin, request.destination) != Some(&request) {
                return false;
            }
            if !is_feasible(&request, step.time) {
                return false;
            }
            if previous.is_some_and(|time| step.time <= time) {
                return false;
            }
            if !served.insert((request.origin, request.destination)) {
                return false;
            }

            previous = Some(step.time);
        }

        true
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for step in &self.steps {
            writeln!(f, "{} at {}", step.request, step.time)?;
        }
        if !self.complete {
            writeln!(f, "(search cut off before completion)")?;
        }
        write!(f, "served: {}", self.count())
    }
}
