use anyhow::ensure;
use clap::{Parser, ValueEnum};
use deadline_darp::core::{RequestGraph, Solver, Time};
use deadline_darp::{algo, data, run_reader};
use rand::prelude::*;
use std::io::Write;
use std::num::NonZero;
use std::time::Duration;

#[derive(Copy, Clone, Debug)]
struct Algorithm(usize, &'static str);

impl From<Algorithm> for Box<dyn Solver> {
    fn from(value: Algorithm) -> Box<dyn Solver> {
        algo::SOLVERS[value.0]()
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.1)
    }
}

impl ValueEnum for Algorithm {
    fn value_variants<'a>() -> &'a [Self] {
        static ALGORITHMS: std::sync::LazyLock<Vec<Algorithm>> = std::sync::LazyLock::new(|| {
            let iter = algo::SOLVERS.iter().enumerate();
            iter.map(|(i, init)| Algorithm(i, init().name())).collect()
        });

        ALGORITHMS.as_slice()
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.1))
    }
}

/// Application solving the single-server dial-a-ride problem with deadlines.
#[derive(Debug, Parser)]
enum Application {
    /// Run one of the implemented algorithms on an instance read from stdin.
    Run {
        algorithm: Algorithm,
        /// Wall-clock budget in seconds for the exhaustive search.
        #[clap(short, long)]
        budget: Option<f64>,
    },
    /// Run benchmarks on a directory of instances.
    Bench {
        /// The input directory.
        input: String,
        /// Exclude algorithms.
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<Algorithm>,
        /// Cap every instance's own time limit.
        #[clap(short, long)]
        time_limit: Option<Time>,
        /// Wall-clock budget in seconds for the exhaustive search.
        #[clap(short, long)]
        budget: Option<f64>,
        /// Print the reports as JSON instead of plain text.
        #[clap(short, long)]
        json: bool,
    },
    /// Generate random instances of the problem.
    Gen {
        /// The number of vertices (at least 2).
        vertices: NonZero<usize>,
        /// The number of request draws. Draws hitting an already requested
        /// pair replace its time window, so instances may end up smaller.
        requests: NonZero<usize>,
        /// Probability that a drawn request is timed rather than open-ended.
        #[clap(short, long, default_value = "0.5")]
        deadline_ratio: f64,
        /// The smallest window length of a timed request.
        #[clap(long, default_value = "2")]
        min_deadline: NonZero<Time>,
        /// The largest window length of a timed request.
        #[clap(long, default_value = "10")]
        max_deadline: NonZero<Time>,
        /// The latest release time of a timed request.
        #[clap(long, default_value = "0")]
        max_release: Time,
        /// Number of instances to generate.
        #[clap(short, long, default_value = "1")]
        amount: NonZero<u64>,
        /// Path to output the generated instances. If the directory does not
        /// exist, it will be created.
        #[clap(short, long, default_value = "output")]
        output: String,
    },
}

fn solvers(exclude: &[Algorithm]) -> impl Iterator<Item = Box<dyn Solver>> + '_ {
    let iter = algo::SOLVERS.iter().map(|init| init());
    iter.filter(|solver| !exclude.iter().any(|name| name.1 == solver.name()))
}

fn gen_graph(
    rng: &mut impl Rng,
    vertices: usize,
    requests: usize,
    deadline_ratio: f64,
    windows: (Time, Time),
    max_release: Time,
) -> RequestGraph {
    let mut graph = RequestGraph::new(vertices);

    for _ in 0..requests {
        let origin = rng.gen_range(0..vertices);
        let mut destination = rng.gen_range(0..vertices);
        while destination == origin {
            destination = rng.gen_range(0..vertices);
        }

        if rng.gen::<f64>() <= deadline_ratio {
            let release = rng.gen_range(0..=max_release);
            let window = rng.gen_range(windows.0..=windows.1);
            graph.add_request(origin, destination, release, (release + window).max(2));
        } else {
            graph.add_edge(origin, destination);
        }
    }

    graph
}

fn main() -> anyhow::Result<()> {
    match Application::parse() {
        Application::Run { algorithm, budget } => {
            let mut solver = Box::<dyn Solver>::from(algorithm);
            if let Some(budget) = budget {
                solver.set_budget(Duration::from_secs_f64(budget));
            }
            run_reader(solver.as_mut(), &mut std::io::stdin().lock())
        }
        Application::Bench {
            input,
            exclude,
            time_limit,
            budget,
            json,
        } => {
            for mut solver in solvers(&exclude) {
                if let Some(budget) = budget {
                    solver.set_budget(Duration::from_secs_f64(budget));
                }

                let report = data::run(&input, time_limit, solver.as_mut())?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("{report}");
                }
            }
            Ok(())
        }
        Application::Gen {
            vertices,
            requests,
            deadline_ratio,
            min_deadline,
            max_deadline,
            max_release,
            amount,
            output,
        } => {
            let vertices = vertices.get();
            let windows = (min_deadline.get(), max_deadline.get());
            ensure!(vertices >= 2, "A request needs two distinct vertices");
            ensure!(windows.0 <= windows.1, "Empty window length range");

            let output = std::path::Path::new(&output);
            if !output.try_exists()? {
                std::fs::create_dir_all(output)?;
            }

            let mut rng = thread_rng();
            for i in 0..amount.get() {
                let graph = gen_graph(
                    &mut rng,
                    vertices,
                    requests.get(),
                    deadline_ratio,
                    windows,
                    max_release,
                );
                let filename = format!("{vertices}_{}_{i}.txt", requests.get());
                let contents = data::to_string(&graph, graph.max_finite_deadline());
                std::fs::File::create(output.join(filename))?.write_all(contents.as_bytes())?;
            }
            Ok(())
        }
    }
}
