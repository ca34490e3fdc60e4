// Error types for loading and validating an HCA fit snapshot.
//
// Every failure is fatal to the call that hit it: the loaders never hand
// back a partially filled table. Variants carry the offending file so the
// CLI can point at the exact input that needs fixing.

use std::path::PathBuf;

/// Everything that can go wrong while loading a fitter snapshot.
#[derive(Debug, thiserror::Error)]
pub enum HcaError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: header is missing its {field} line", .path.display())]
    MissingHeader { path: PathBuf, field: &'static str },

    #[error("{}: header {field} is not a non-negative integer: {value:?}", .path.display())]
    InvalidHeader {
        path: PathBuf,
        field: &'static str,
        value: String,
    },

    #[error("{}: declared shape {rows}x{cols} is too large to allocate", .path.display())]
    ShapeTooLarge {
        path: PathBuf,
        rows: usize,
        cols: usize,
    },

    #[error("{}:{line}: {reason}", .path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{}:{line}: index ({row}, {col}) outside declared shape {rows}x{cols}", .path.display())]
    IndexOutOfRange {
        path: PathBuf,
        line: usize,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{}: {what} mismatch: declared {declared}, observed {observed}", .path.display())]
    DimensionMismatch {
        path: PathBuf,
        what: &'static str,
        declared: usize,
        observed: usize,
    },

    #[error("{}: document identifier {id:?} appears more than once", .path.display())]
    DuplicateDocId { path: PathBuf, id: String },

    #[error("{}: negative count {count} at ({row}, {col})", .path.display())]
    NegativeCount {
        path: PathBuf,
        row: usize,
        col: usize,
        count: i64,
    },

    #[error("{}: {name} must be a finite positive number, got {value}", .path.display())]
    InvalidConcentration {
        path: PathBuf,
        name: &'static str,
        value: f64,
    },

    #[error("{}: hyperparameter {name} is never defined", .path.display())]
    MissingHyperparameter { path: PathBuf, name: &'static str },
}

impl HcaError {
    /// Wrap an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HcaError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        HcaError::MalformedLine {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HcaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let err = HcaError::MissingHyperparameter {
            path: PathBuf::from("fit.par"),
            name: "alphatot",
        };
        assert_eq!(err.to_string(), "fit.par: hyperparameter alphatot is never defined");

        let err = HcaError::malformed("fit.ndt", 7, "expected 3 fields, found 2");
        assert_eq!(err.to_string(), "fit.ndt:7: expected 3 fields, found 2");
    }

    #[test]
    fn io_error_keeps_source() {
        let err = HcaError::io(
            "corpus.tokens",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().starts_with("failed to read corpus.tokens"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
