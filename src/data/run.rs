use crate::core::{Solver, Time};
use crate::data::deserialize;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Report of running one solver over a directory of instances.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    solver: String,
    entries: Vec<ReportEntry>,
}

impl Report {
    fn new(solver: String) -> Self {
        let entries = Vec::new();
        Self { solver, entries }
    }

    /// Get the solver name.
    #[must_use]
    pub fn solver_name(&self) -> &str {
        &self.solver
    }

    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Solver: {}", self.solver)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Report of running a single instance.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub served: usize,
    pub seconds: f64,
    pub complete: bool,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}: {} in {:.2} sec", self.name, self.served, self.seconds)?;
        if !self.complete {
            write!(f, " (incomplete)")?;
        }
        Ok(())
    }
}

/// Runs the solver over the checked-in `samples` directory, where every
/// filename ends in `_<n>` with `n` the instance's optimal count. Used by
/// the solver tests the same way for both the exact solver and the
/// heuristics.
///
/// # Arguments
/// - `exact` requires the served count to equal the encoded optimum instead
///   of merely not exceeding it.
///
/// # Errors
/// - If a file cannot be read or does not encode its optimum.
/// - If no samples are found.
///
/// # Panics
/// - If a schedule fails verification or misses the encoded bound.
pub fn samples(solver: &mut dyn Solver, exact: bool) -> anyhow::Result<()> {
    let report = run("samples", None, solver)?;
    if report.entries.is_empty() {
        return Err(anyhow!("No samples found"));
    }

    for entry in &report.entries {
        let optimum = encoded_optimum(&entry.name)?;
        if exact {
            assert_eq!(entry.served, optimum, "wrong optimum on {}", entry.name);
        } else {
            assert!(entry.served <= optimum, "beat the optimum on {}", entry.name);
        }
    }

    Ok(())
}

/// Runs the solver over every instance file in `dir`, in filename order.
/// A file that fails to parse is reported to stderr and skipped; the batch
/// carries on. `cap` bounds each instance's own time limit.
///
/// # Errors
/// - If the directory cannot be read.
///
/// # Panics
/// - If a produced schedule fails verification.
pub fn run(dir: &str, cap: Option<Time>, solver: &mut dyn Solver) -> anyhow::Result<Report> {
    let mut report = Report::new(solver.name().into());

    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort_unstable();

    for path in paths {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("Cannot read filename in {dir}"))?
            .to_owned();

        let mut reader = BufReader::new(File::open(&path)?);
        let instance = match deserialize(&mut reader, &name) {
            Ok(instance) => instance,
            Err(error) => {
                eprintln!("skipping: {error}");
                continue;
            }
        };

        let time_limit = cap.map_or(instance.time_limit, |cap| cap.min(instance.time_limit));
        let schedule = solver.solve(&instance.graph, time_limit);
        assert!(schedule.verify(&instance.graph), "Invalid schedule on {name}");

        report.entries.push(ReportEntry {
            name,
            served: schedule.count(),
            seconds: schedule.seconds,
            complete: schedule.complete,
        });
    }

    Ok(report)
}

/// Extracts the `_<n>` optimum suffix from a sample filename.
fn encoded_optimum(name: &str) -> anyhow::Result<usize> {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.rsplit('_').next())
        .and_then(|suffix| suffix.parse().ok())
        .ok_or_else(|| anyhow!("No optimum encoded in {name}"))
}
