// Vocabulary and document-identifier loading.
//
// The vocabulary is mandatory. The document list is optional: when it is
// missing, identifiers fall back to `0..D`, but D is only known after the
// `.ndt` header is read. So loading is split in two phases: `read_doc_ids`
// records what was on disk, `DocIds::resolve` fills in the default later.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{HcaError, Result};
use crate::table::{range_labels, Label};

/// Read the whitespace-separated token list.
pub fn read_vocabulary(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| HcaError::io(path, e))?;
    let vocab: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    debug!(path = %path.display(), words = vocab.len(), "Read vocabulary");
    Ok(vocab)
}

/// Document identifiers as found on disk, before the fallback is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocIds {
    /// Identifiers read from the document list, in file order.
    Listed { path: PathBuf, ids: Vec<String> },
    /// No document list exists at `path`.
    Missing { path: PathBuf },
}

/// Where the final row labels of the doc-topic table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocIdSource {
    DocumentList,
    DefaultRange,
}

/// Read the document list, stripping directory and extension from every entry.
///
/// A missing file is not an error; any other I/O failure is.
pub fn read_doc_ids(path: &Path) -> Result<DocIds> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let ids: Vec<String> = text.split_whitespace().map(bare_identifier).collect();
            debug!(path = %path.display(), documents = ids.len(), "Read document list");
            Ok(DocIds::Listed {
                path: path.to_path_buf(),
                ids,
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(DocIds::Missing {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(HcaError::io(path, e)),
    }
}

impl DocIds {
    /// Produce the `num_docs` row labels, checking count and uniqueness.
    ///
    /// `declared_in` is the count file whose header declared `num_docs`; it
    /// is what a dimension mismatch gets reported against.
    pub fn resolve(self, num_docs: usize, declared_in: &Path) -> Result<(Vec<Label>, DocIdSource)> {
        match self {
            DocIds::Missing { path } => {
                warn!(
                    path = %path.display(),
                    documents = num_docs,
                    "No document list, using positional document ids"
                );
                Ok((range_labels(num_docs), DocIdSource::DefaultRange))
            }
            DocIds::Listed { path, ids } => {
                if ids.len() != num_docs {
                    return Err(HcaError::DimensionMismatch {
                        path: declared_in.to_path_buf(),
                        what: "document count",
                        declared: num_docs,
                        observed: ids.len(),
                    });
                }
                let mut seen = HashSet::with_capacity(ids.len());
                for id in &ids {
                    if !seen.insert(id.as_str()) {
                        return Err(HcaError::DuplicateDocId {
                            path,
                            id: id.clone(),
                        });
                    }
                }
                let labels = ids.into_iter().map(Label::Name).collect();
                Ok((labels, DocIdSource::DocumentList))
            }
        }
    }
}

/// `corpus/a/doc17.txt` -> `doc17`. Only the last extension goes, and a
/// leading dot does not start one.
fn bare_identifier(entry: &str) -> String {
    let path = Path::new(entry);
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directory_and_extension() {
        assert_eq!(bare_identifier("corpus/a/doc17.txt"), "doc17");
        assert_eq!(bare_identifier("doc17"), "doc17");
        assert_eq!(bare_identifier("reuters/train.0001.sgm"), "train.0001");
        assert_eq!(bare_identifier(".hidden"), ".hidden");
    }

    #[test]
    fn missing_resolves_to_range() {
        let ids = DocIds::Missing {
            path: PathBuf::from("none.documents"),
        };
        let (labels, source) = ids.resolve(3, Path::new("fit.ndt")).unwrap();
        assert_eq!(labels, range_labels(3));
        assert_eq!(source, DocIdSource::DefaultRange);
    }

    #[test]
    fn listed_count_must_match() {
        let ids = DocIds::Listed {
            path: PathBuf::from("c.documents"),
            ids: vec!["a".into(), "b".into()],
        };
        let err = ids.resolve(3, Path::new("fit.ndt")).unwrap_err();
        assert!(matches!(
            err,
            HcaError::DimensionMismatch {
                declared: 3,
                observed: 2,
                ..
            }
        ));
    }

    #[test]
    fn listed_ids_must_be_unique() {
        let ids = DocIds::Listed {
            path: PathBuf::from("c.documents"),
            ids: vec!["a".into(), "b".into(), "a".into()],
        };
        let err = ids.resolve(3, Path::new("fit.ndt")).unwrap_err();
        assert!(matches!(err, HcaError::DuplicateDocId { ref id, .. } if id == "a"));
    }
}
