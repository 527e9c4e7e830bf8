#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use anyhow::Result;
use std::io::BufRead;

pub mod algo;
pub mod core;
pub mod data;

/// Runs the given solver on the instance read from the reader and writes
/// the schedule and the served count to stdout.
///
/// # Errors
/// - If the instance could not be read from the reader.
///
/// # Panics
/// - If the schedule is invalid in debug mode.
pub fn run_reader(solver: &mut dyn core::Solver, reader: &mut impl BufRead) -> Result<()> {
    let instance = data::deserialize(reader, "<stdin>")?;
    let schedule = solver.solve(&instance.graph, instance.time_limit);

    debug_assert!(
        schedule.verify(&instance.graph),
        "Schedule is invalid: {schedule:?}"
    );

    println!("{schedule}");

    Ok(())
}
