mod edf;
mod exact;

pub use edf::EarliestDeadline;
pub use exact::Exact;

use crate::core::{RequestGraph, Schedule, Solver, Time};

/// Registry of every solver the crate ships. Solvers register themselves
/// next to their definition; the CLI builds its algorithm list from here.
#[allow(unsafe_code)]
#[linkme::distributed_slice]
pub static SOLVERS: [fn() -> Box<dyn Solver>];

/// Provably optimal number of servable requests, by exhaustive search.
#[must_use]
pub fn solve_optimal(graph: &RequestGraph, time_limit: Time) -> Schedule {
    Exact::default().solve(graph, time_limit)
}

/// Earliest-deadline-first heuristic with a widening lookahead window.
#[must_use]
pub fn solve_edf(graph: &RequestGraph, time_limit: Time) -> Schedule {
    EarliestDeadline.solve(graph, time_limit)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;

    fn random_graph(rng: &mut StdRng, vertices: usize, requests: usize) -> RequestGraph {
        let mut graph = RequestGraph::new(vertices);
        for _ in 0..requests {
            let origin = rng.gen_range(0..vertices);
            let destination = rng.gen_range(0..vertices);
            let release = rng.gen_range(0..6);
            let deadline = release + rng.gen_range(1..10);
            graph.add_request(origin, destination, release, deadline);
        }
        graph
    }

    #[test]
    fn edf_never_beats_optimal() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..40 {
            let requests = rng.gen_range(0..=6);
            let graph = random_graph(&mut rng, 4, requests);
            let time_limit = rng.gen_range(0..16);

            let optimal = solve_optimal(&graph, time_limit);
            let edf = solve_edf(&graph, time_limit);

            assert!(optimal.verify(&graph));
            assert!(edf.verify(&graph));
            assert!(
                edf.count() <= optimal.count(),
                "EDF served {} but the optimum is {} (limit {time_limit}, graph {graph:?})",
                edf.count(),
                optimal.count()
            );
        }
    }

    #[test]
    fn optimal_is_monotone_in_the_time_limit() {
        let mut rng = StdRng::seed_from_u64(11);
        let graph = random_graph(&mut rng, 4, 5);

        let mut previous = 0;
        for time_limit in 0..14 {
            let count = solve_optimal(&graph, time_limit).count();
            assert!(count >= previous, "count dropped at limit {time_limit}");
            previous = count;
        }
    }

    #[test]
    fn both_solvers_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(23);
        let graph = random_graph(&mut rng, 5, 6);

        let first = solve_optimal(&graph, 12);
        let second = solve_optimal(&graph, 12);
        assert_eq!(first.steps, second.steps);

        let first = solve_edf(&graph, 12);
        let second = solve_edf(&graph, 12);
        assert_eq!(first.steps, second.steps);
    }

    #[test]
    fn registry_holds_both_solvers() {
        let mut names: Vec<_> = SOLVERS.iter().map(|init| init().name().to_owned()).collect();
        names.sort_unstable();
        assert_eq!(names, ["edf", "opt"]);
    }
}
