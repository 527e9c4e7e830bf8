use crate::core::{is_feasible, needs_jump, RequestGraph, Schedule, ScheduleStep, Solver, Time};
use std::time::Instant;

/// Earliest-deadline-first heuristic. Serves the feasible request with the
/// lowest deadline; when nothing is immediately servable it peeks further
/// ahead one unit at a time, then catches the clock up to the peeked point
/// before committing. Approximates an online EDF policy on request sets
/// that are not back-to-back.
#[derive(Clone, Copy, Debug, Default)]
pub struct EarliestDeadline;

impl Solver for EarliestDeadline {
    fn solve(&mut self, graph: &RequestGraph, time_limit: Time) -> Schedule {
        let start = Instant::now();
        let mut steps = Vec::new();

        let mut pending = graph.requests().to_vec();
        pending.sort_unstable_by_key(|request| request.edf_key());

        // Unit 1 departs the depot; the lookahead window starts collapsed
        // (a window of 2 peeks zero units ahead).
        let mut t: Time = 2;
        let mut window: Time = 2;

        while t < time_limit && !pending.is_empty() && window < time_limit {
            pending.retain(|request| t < request.deadline);

            let peek = t.saturating_add(window - 2);
            let Some(at) = pending.iter().position(|r| is_feasible(r, peek)) else {
                window += 1;
                continue;
            };

            if window > 2 {
                // Catch up to the point the server was peeking at.
                t = peek;
                window = 2;
            }

            let request = pending.remove(at);
            steps.push(ScheduleStep { request, time: t });
            t = t.saturating_add(1);

            // Pay the jump before the next serve if the upcoming earliest
            // deadline does not chain onto the request just served.
            if let Some(next) = pending.iter().find(|r| is_feasible(r, t)) {
                if needs_jump(&request, next) {
                    t = t.saturating_add(1);
                }
            }
        }

        Schedule {
            steps,
            seconds: start.elapsed().as_secs_f64(),
            complete: true,
        }
    }

    fn name(&self) -> &'static str {
        "edf"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::SOLVERS)]
static INSTANCE: fn() -> Box<dyn Solver> = || Box::new(EarliestDeadline);

#[cfg(test)]
mod test {
    use super::*;
    use crate::algo::solve_edf;
    use crate::data::samples;

    #[test]
    fn test_edf_on_samples() {
        assert!(samples(&mut EarliestDeadline, false).is_ok());
    }

    #[test]
    fn empty_graph_yields_zero() {
        let graph = RequestGraph::new(4);
        let schedule = solve_edf(&graph, 10);
        assert_eq!(schedule.count(), 0);
        assert!(schedule.complete);
    }

    #[test]
    fn single_request_is_served_at_time_two() {
        let mut graph = RequestGraph::new(2);
        graph.add_request(0, 1, 0, 5);

        let schedule = solve_edf(&graph, 5);
        assert_eq!(schedule.count(), 1);
        assert_eq!(schedule.steps[0].time, 2);
        assert!(schedule.verify(&graph));
    }

    #[test]
    fn chained_requests_are_served_back_to_back() {
        let mut graph = RequestGraph::new(3);
        graph.add_request(0, 1, 0, 5);
        graph.add_request(1, 2, 0, 5);

        let schedule = solve_edf(&graph, 10);
        assert_eq!(schedule.count(), 2);
        assert_eq!(schedule.steps[0].time, 2);
        assert_eq!(schedule.steps[1].time, 3);
        assert!(schedule.verify(&graph));
    }

    #[test]
    fn disjoint_requests_within_a_tight_limit_serve_once() {
        let mut graph = RequestGraph::new(4);
        graph.add_request(0, 1, 0, 3);
        graph.add_request(2, 3, 0, 3);

        let schedule = solve_edf(&graph, 3);
        assert_eq!(schedule.count(), 1);
        assert!(schedule.verify(&graph));
    }

    #[test]
    fn unreachable_window_serves_nothing() {
        let mut graph = RequestGraph::new(2);
        graph.add_request(0, 1, 5, 6);
        assert_eq!(solve_edf(&graph, 4).count(), 0);
    }

    #[test]
    fn lookahead_catches_up_to_a_late_release() {
        let mut graph = RequestGraph::new(2);
        graph.add_request(0, 1, 5, 10);

        let schedule = solve_edf(&graph, 20);
        assert_eq!(schedule.count(), 1);
        // The window widens until it reaches the release, then the clock
        // collapses onto it.
        assert_eq!(schedule.steps[0].time, 5);
        assert!(schedule.verify(&graph));
    }

    #[test]
    fn earliest_deadline_wins_ties_on_release_then_pair() {
        let mut graph = RequestGraph::new(4);
        graph.add_request(2, 3, 0, 9);
        graph.add_request(0, 1, 0, 4);

        let schedule = solve_edf(&graph, 12);
        assert_eq!(schedule.count(), 2);
        assert_eq!(schedule.steps[0].request.origin, 0, "lower deadline first");
        assert!(schedule.verify(&graph));
    }

    #[test]
    fn expired_requests_are_dropped_not_waited_on() {
        let mut graph = RequestGraph::new(4);
        graph.add_request(0, 1, 0, 2);
        graph.add_request(2, 3, 4, 8);

        let schedule = solve_edf(&graph, 12);
        assert_eq!(schedule.count(), 1);
        assert_eq!(schedule.steps[0].request.origin, 2);
        assert!(schedule.verify(&graph));
    }
}
