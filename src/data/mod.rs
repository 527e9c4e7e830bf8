mod run;

pub use run::*;

use crate::core::{RequestGraph, Time};
use std::io::BufRead;
use thiserror::Error;

/// A parsed instance file: the request graph plus the time budget the
/// solvers get for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instance {
    pub graph: RequestGraph,
    pub time_limit: Time,
}

/// Failure to read an instance file. Fatal for the file, never for a batch.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{file}:{line}: {message}")]
    Malformed {
        file: String,
        line: usize,
        message: String,
    },
    #[error("{file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reads an instance in the text format. Line 1 is the vertex count; every
/// further non-empty line is one of:
///
/// - `origin destination release deadline` — timed request,
/// - `origin destination deadline` — release time 0,
/// - `origin destination` — untimed request (never expires),
/// - a single integer — overrides the time limit.
///
/// Without an override the time limit defaults to the largest finite
/// deadline in the file. Requests that can never be served are dropped
/// silently, mirroring graph construction; malformed lines are an error.
///
/// # Errors
/// - If the reader fails.
/// - If a line does not match the grammar or names a vertex out of range.
pub fn deserialize(reader: &mut impl BufRead, file: &str) -> Result<Instance, ParseError> {
    let io = |source| ParseError::Io {
        file: file.into(),
        source,
    };
    let malformed = |line, message: String| ParseError::Malformed {
        file: file.into(),
        line,
        message,
    };

    // Non-empty lines with their 1-based numbers, integers already parsed.
    let mut lines = Vec::new();
    for (at, line) in reader.lines().enumerate() {
        let line = line.map_err(io)?;
        let number = at + 1;

        let mut values = Vec::new();
        for field in line.split_whitespace() {
            let value: u64 = field
                .parse()
                .map_err(|_| malformed(number, format!("expected an integer, found {field:?}")))?;
            values.push(value);
        }

        if !values.is_empty() {
            lines.push((number, values));
        }
    }

    let mut lines = lines.into_iter();
    let Some((number, header)) = lines.next() else {
        return Err(malformed(1, "empty instance, expected the vertex count".into()));
    };
    if header.len() != 1 {
        return Err(malformed(number, "expected the vertex count".into()));
    }

    let mut graph = RequestGraph::new(usize::try_from(header[0]).unwrap_or(usize::MAX));
    let mut time_limit = None;

    for (number, values) in lines {
        let (origin, destination, release, deadline) = match values.as_slice() {
            [limit] => {
                time_limit = Some(*limit);
                continue;
            }
            [o, d] => (*o, *d, 0, Time::MAX),
            [o, d, deadline] => (*o, *d, 0, *deadline),
            [o, d, release, deadline] => (*o, *d, *release, *deadline),
            _ => {
                return Err(malformed(
                    number,
                    format!("expected 1 to 4 integers, found {}", values.len()),
                ))
            }
        };

        let origin = usize::try_from(origin).unwrap_or(usize::MAX);
        let destination = usize::try_from(destination).unwrap_or(usize::MAX);
        if origin >= graph.vertices() || destination >= graph.vertices() {
            return Err(malformed(
                number,
                format!("vertex out of range, graph has {} vertices", graph.vertices()),
            ));
        }

        graph.add_request(origin, destination, release, deadline);
    }

    let time_limit = time_limit.unwrap_or_else(|| graph.max_finite_deadline());
    Ok(Instance { graph, time_limit })
}

/// Writes the graph back into the instance text format. The time-limit
/// override line is emitted only when `time_limit` differs from the file
/// default, so `deserialize` round-trips exactly.
#[must_use]
pub fn to_string(graph: &RequestGraph, time_limit: Time) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "{}", graph.vertices());

    for request in graph.requests() {
        let _ = match (request.release, request.deadline) {
            (0, Time::MAX) => writeln!(out, "{} {}", request.origin, request.destination),
            (0, deadline) => writeln!(out, "{} {} {deadline}", request.origin, request.destination),
            (release, deadline) => writeln!(
                out,
                "{} {} {release} {deadline}",
                request.origin, request.destination
            ),
        };
    }

    if time_limit != graph.max_finite_deadline() {
        let _ = writeln!(out, "{time_limit}");
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(input: &str) -> Result<Instance, ParseError> {
        deserialize(&mut std::io::Cursor::new(input), "test.txt")
    }

    #[test]
    fn parses_every_line_form() -> anyhow::Result<()> {
        let instance = parse("3\n0 1 2 7\n1 2 6\n2 0\n9\n")?;

        assert_eq!(instance.graph.vertices(), 3);
        assert_eq!(instance.graph.len(), 3);
        assert_eq!(instance.graph.get(0, 1).map(|r| (r.release, r.deadline)), Some((2, 7)));
        assert_eq!(instance.graph.get(1, 2).map(|r| (r.release, r.deadline)), Some((0, 6)));
        assert_eq!(instance.graph.get(2, 0).map(|r| r.deadline), Some(Time::MAX));
        assert_eq!(instance.time_limit, 9);

        Ok(())
    }

    #[test]
    fn time_limit_defaults_to_largest_finite_deadline() -> anyhow::Result<()> {
        let instance = parse("3\n0 1 5\n1 2 8\n2 0\n")?;
        assert_eq!(instance.time_limit, 8);

        let untimed = parse("2\n0 1\n")?;
        assert_eq!(untimed.time_limit, 0);

        Ok(())
    }

    #[test]
    fn unservable_lines_are_dropped_silently() -> anyhow::Result<()> {
        // A deadline of 0 can never be met, so the line adds nothing.
        let instance = parse("2\n0 1 0\n1 0 4\n")?;
        assert_eq!(instance.graph.len(), 1);
        Ok(())
    }

    #[test]
    fn blank_lines_are_skipped() -> anyhow::Result<()> {
        let instance = parse("2\n\n0 1 4\n\n")?;
        assert_eq!(instance.graph.len(), 1);
        Ok(())
    }

    fn error_of(input: &str) -> String {
        match parse(input) {
            Ok(instance) => unreachable!("parsed into {instance:?}"),
            Err(error) => error.to_string(),
        }
    }

    #[test]
    fn malformed_lines_name_the_file_and_line() {
        assert_eq!(
            error_of("2\n0 1 x\n"),
            "test.txt:2: expected an integer, found \"x\""
        );
        assert_eq!(
            error_of("2\n0 1 2 3 4\n"),
            "test.txt:2: expected 1 to 4 integers, found 5"
        );
        assert_eq!(
            error_of("2\n0 5 4\n"),
            "test.txt:2: vertex out of range, graph has 2 vertices"
        );
        assert_eq!(
            error_of(""),
            "test.txt:1: empty instance, expected the vertex count"
        );
        assert_eq!(error_of("2 3\n"), "test.txt:1: expected the vertex count");
    }

    #[test]
    fn serialization_round_trips() -> anyhow::Result<()> {
        let original = parse("4\n0 1 2 7\n1 2 6\n3 0\n20\n")?;
        let text = to_string(&original.graph, original.time_limit);
        let reparsed = deserialize(&mut std::io::Cursor::new(text), "roundtrip.txt")?;

        assert_eq!(original, reparsed);
        Ok(())
    }
}
