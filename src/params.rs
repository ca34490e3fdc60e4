// Hyperparameter file parsing and dimension cross-checks.
//
// The `.par` file is a list of `key = value` lines written by the fitter.
// Only the two concentration totals are used; `D`, `T` and `W` are checked
// against the loaded tables to catch a data stem paired with the wrong fit.
// Everything else in the file is ignored without being parsed.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{HcaError, Result};
use crate::table::CountTable;

const COMMENT_MARKER: char = '#';
const SEPARATOR: &str = " = ";

/// Dirichlet concentration totals from a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hyperparameters {
    /// Total document-topic concentration.
    pub alphatot: f64,
    /// Total topic-word concentration.
    pub betatot: f64,
}

/// Dimensions observed in the loaded count tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub documents: usize,
    pub topics: usize,
    pub words: usize,
}

impl Dimensions {
    pub fn of(doc_topic: &CountTable, topic_word: &CountTable) -> Self {
        let (documents, topics) = doc_topic.shape();
        let (_, words) = topic_word.shape();
        Self {
            documents,
            topics,
            words,
        }
    }
}

/// Read `path` and cross-check it against the loaded count tables.
pub fn read_hyperparameters(
    path: &Path,
    doc_topic: &CountTable,
    topic_word: &CountTable,
) -> Result<Hyperparameters> {
    let text = fs::read_to_string(path).map_err(|e| HcaError::io(path, e))?;
    parse_hyperparameters(path, &text, Dimensions::of(doc_topic, topic_word))
}

/// Parse the contents of a `.par` file. `path` is only used in errors.
pub fn parse_hyperparameters(path: &Path, text: &str, dims: Dimensions) -> Result<Hyperparameters> {
    let mut alphatot = None;
    let mut betatot = None;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.starts_with(COMMENT_MARKER) {
            continue;
        }
        let (key, value) = split_line(path, line_no, line)?;
        match key {
            "alphatot" => alphatot = Some(parse_float(path, line_no, value)?),
            "betatot" => betatot = Some(parse_float(path, line_no, value)?),
            "D" => check_dimension(path, line_no, value, "document count", dims.documents)?,
            "T" => check_dimension(path, line_no, value, "topic count", dims.topics)?,
            "W" => check_dimension(path, line_no, value, "vocabulary size", dims.words)?,
            _ => {}
        }
    }

    let alphatot = require_concentration(path, "alphatot", alphatot)?;
    let betatot = require_concentration(path, "betatot", betatot)?;
    debug!(path = %path.display(), alphatot, betatot, "Read hyperparameters");
    Ok(Hyperparameters { alphatot, betatot })
}

fn split_line<'a>(path: &Path, line_no: usize, line: &'a str) -> Result<(&'a str, &'a str)> {
    let mut parts = line.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok((key, value.trim())),
        _ => Err(HcaError::malformed(
            path,
            line_no,
            format!("expected `key{SEPARATOR}value`, found {line:?}"),
        )),
    }
}

fn parse_float(path: &Path, line_no: usize, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| HcaError::malformed(path, line_no, format!("invalid number {value:?}")))
}

fn check_dimension(
    path: &Path,
    line_no: usize,
    value: &str,
    what: &'static str,
    observed: usize,
) -> Result<()> {
    let declared: usize = value
        .parse()
        .map_err(|_| HcaError::malformed(path, line_no, format!("invalid {what} {value:?}")))?;
    if declared != observed {
        return Err(HcaError::DimensionMismatch {
            path: path.to_path_buf(),
            what,
            declared,
            observed,
        });
    }
    Ok(())
}

fn require_concentration(path: &Path, name: &'static str, value: Option<f64>) -> Result<f64> {
    let value = value.ok_or_else(|| HcaError::MissingHyperparameter {
        path: path.to_path_buf(),
        name,
    })?;
    if !(value.is_finite() && value > 0.0) {
        return Err(HcaError::InvalidConcentration {
            path: path.to_path_buf(),
            name,
            value,
        });
    }
    Ok(value)
}
