// File-name contract for fitter snapshots.
//
// A data stem names the corpus (token list, document list); a fit stem names
// one fitter run (count files, parameter file). Suffixes are appended to the
// stem string as-is, so `runs/fit-K20.iter100` becomes
// `runs/fit-K20.iter100.ndt` rather than having its ".iter100" replaced.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const TOKENS_SUFFIX: &str = ".tokens";
pub const DOCUMENTS_SUFFIX: &str = ".documents";
pub const DOC_TOPIC_SUFFIX: &str = ".ndt";
pub const WORD_TOPIC_SUFFIX: &str = ".nwt";
pub const PARAMS_SUFFIX: &str = ".par";

/// Input files keyed by the data stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub tokens: PathBuf,
    pub documents: PathBuf,
}

impl DataFiles {
    pub fn from_stem(datastem: impl AsRef<Path>) -> Self {
        let stem = datastem.as_ref();
        Self {
            tokens: with_suffix(stem, TOKENS_SUFFIX),
            documents: with_suffix(stem, DOCUMENTS_SUFFIX),
        }
    }
}

/// Input files keyed by the fit stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitFiles {
    pub doc_topic: PathBuf,
    pub word_topic: PathBuf,
    pub params: PathBuf,
}

impl FitFiles {
    pub fn from_stem(fitstem: impl AsRef<Path>) -> Self {
        let stem = fitstem.as_ref();
        Self {
            doc_topic: with_suffix(stem, DOC_TOPIC_SUFFIX),
            word_topic: with_suffix(stem, WORD_TOPIC_SUFFIX),
            params: with_suffix(stem, PARAMS_SUFFIX),
        }
    }
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
