//! Training-log scanning and epoch/loss field extraction
//!
//! The log format is free text. A line participates only if it contains the
//! `epoch:` token; the pair is recorded only when the line also carries
//! `train loss` and lacks the `iter` token (iteration-level lines report a
//! running loss, not the per-epoch value).

use crate::io::error::{EvalError, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

// Literal patterns always compile
#[allow(clippy::unwrap_used)]
static EPOCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new("epoch:([0-9]+)").unwrap());

#[allow(clippy::unwrap_used)]
static LOSS_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"loss:([0-9.e-]+)").unwrap());

/// One recorded training-loss sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochLoss {
    /// Epoch number as written in the log
    pub epoch: u32,
    /// Reported training loss for that epoch
    pub loss: f64,
}

/// Parse a training log from disk
///
/// # Errors
///
/// Returns a `FileSystem` error if the log cannot be opened or read, and a
/// `MalformedLogLine` error for any matching line whose fields do not parse.
pub fn parse_log_file(path: &Path) -> Result<Vec<EpochLoss>> {
    let file = File::open(path).map_err(|source| EvalError::FileSystem {
        path: path.to_path_buf(),
        operation: "open log",
        source,
    })?;
    parse_log(BufReader::new(file))
}

/// Parse a training log from any line-oriented reader
///
/// Samples append in log order; no deduplication or sorting is applied.
///
/// # Errors
///
/// Returns a `MalformedLogLine` error for any matching line whose fields do
/// not parse, and propagates read failures.
pub fn parse_log<R: BufRead>(reader: R) -> Result<Vec<EpochLoss>> {
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(sample) = parse_line(line.trim(), index + 1)? {
            samples.push(sample);
        }
    }
    Ok(samples)
}

/// Extract the epoch/loss pair from a single log line
///
/// Returns `None` for lines that do not participate: lines without `epoch:`,
/// iteration-level lines, and lines without a `train loss` report.
///
/// # Errors
///
/// Returns a `MalformedLogLine` error when a line contains `epoch:` but the
/// epoch number does not match, or when the loss field of a participating
/// line does not parse.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<EpochLoss>> {
    if !line.contains("epoch:") {
        return Ok(None);
    }

    let epoch = capture(&EPOCH_PATTERN, line, line_number)?
        .parse::<u32>()
        .map_err(|_src| malformed(line, line_number))?;

    if line.contains("iter") || !line.contains("train loss") {
        return Ok(None);
    }

    let loss = capture(&LOSS_PATTERN, line, line_number)?
        .parse::<f64>()
        .map_err(|_src| malformed(line, line_number))?;

    Ok(Some(EpochLoss { epoch, loss }))
}

fn capture<'a>(pattern: &Regex, line: &'a str, line_number: usize) -> Result<&'a str> {
    pattern
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|field| field.as_str())
        .ok_or_else(|| malformed(line, line_number))
}

fn malformed(line: &str, line_number: usize) -> EvalError {
    EvalError::MalformedLogLine {
        line_number,
        line: line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scientific_notation_loss() {
        let sample = parse_line("epoch:120 train loss, loss:1.5e-4", 1)
            .unwrap()
            .unwrap();
        assert_eq!(sample.epoch, 120);
        assert!((sample.loss - 1.5e-4).abs() < 1e-12);
    }

    #[test]
    fn test_unparseable_loss_field_is_fatal() {
        // ".e-" matches the loss pattern but is not a number
        let err = parse_line("epoch:3 train loss, loss:.e-", 5).unwrap_err();
        assert!(matches!(
            err,
            EvalError::MalformedLogLine { line_number: 5, .. }
        ));
    }

    #[test]
    fn test_validation_loss_lines_are_skipped() {
        assert!(
            parse_line("epoch:3 valid loss, loss:0.2", 1)
                .unwrap()
                .is_none()
        );
    }
}
