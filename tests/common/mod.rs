// Shared fixtures for the integration tests.
//
// `fixture_stems` points at the checked-in tiny corpus (D=5, T=3, W=10).
// `Snapshot` writes a custom snapshot into a temporary directory so a test
// can break exactly one file.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub fn fixture_stems() -> (PathBuf, PathBuf) {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    (dir.join("tiny"), dir.join("fit-tiny"))
}

pub const TINY_TOKENS: &str = "market oil price crude trade tariff export bank rate loan\n";
pub const TINY_DOCUMENTS: &str =
    "reuters/train/0001.sgm\nreuters/train/0002.sgm\nreuters/train/0003.sgm\nreuters/test/0004.sgm\nreuters/test/0005.sgm\n";
pub const TINY_NDT: &str =
    "5\n3\nD T counts\n0 0 2\n1 1 3\n1 2 1\n2 0 1\n2 2 4\n3 1 2\n4 0 1\n4 1 1\n4 2 1\n";
pub const TINY_NWT: &str =
    "10\n3\nW T counts\n0 0 2\n3 0 1\n7 0 1\n1 1 2\n4 1 3\n9 1 1\n2 2 2\n5 2 2\n6 2 1\n8 2 1\n";
pub const TINY_PAR: &str = "# hca run parameters\nD = 5\nT = 3\nW = 10\nalphatot = 3\nbetatot = 0.5\n";

/// A snapshot written to a temp dir. Any file left `None` is not created.
pub struct Snapshot {
    pub tokens: Option<String>,
    pub documents: Option<String>,
    pub ndt: Option<String>,
    pub nwt: Option<String>,
    pub par: Option<String>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            tokens: Some(TINY_TOKENS.to_string()),
            documents: Some(TINY_DOCUMENTS.to_string()),
            ndt: Some(TINY_NDT.to_string()),
            nwt: Some(TINY_NWT.to_string()),
            par: Some(TINY_PAR.to_string()),
        }
    }
}

pub struct Written {
    pub dir: TempDir,
    pub datastem: PathBuf,
    pub fitstem: PathBuf,
}

impl Snapshot {
    pub fn write(&self) -> Written {
        let dir = tempfile::tempdir().unwrap();
        let datastem = dir.path().join("corpus");
        let fitstem = dir.path().join("fit-corpus.iter10");
        let put = |stem: &PathBuf, suffix: &str, body: &Option<String>| {
            if let Some(body) = body {
                let mut name = stem.clone().into_os_string();
                name.push(suffix);
                fs::write(PathBuf::from(name), body).unwrap();
            }
        };
        put(&datastem, ".tokens", &self.tokens);
        put(&datastem, ".documents", &self.documents);
        put(&fitstem, ".ndt", &self.ndt);
        put(&fitstem, ".nwt", &self.nwt);
        put(&fitstem, ".par", &self.par);
        Written {
            dir,
            datastem,
            fitstem,
        }
    }
}
