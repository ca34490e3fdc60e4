use std::env;

use anyhow::{Context, Result};

/// Row-sum tolerance used when none is configured.
pub const DEFAULT_ROW_SUM_TOLERANCE: f64 = 1e-9;

/// CLI configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so stems for a project
/// can live there instead of being typed on every invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default data stem (`HCATOOL_DATA_STEM`)
    pub data_stem: Option<String>,
    /// Default fit stem (`HCATOOL_FIT_STEM`)
    pub fit_stem: Option<String>,
    /// Largest acceptable |row sum - 1| in the summary (`HCATOOL_ROW_SUM_TOLERANCE`)
    pub row_sum_tolerance: f64,
}

/// A data stem and fit stem that are both known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stems {
    pub data: String,
    pub fit: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let row_sum_tolerance = match non_empty("HCATOOL_ROW_SUM_TOLERANCE") {
            Some(raw) => {
                let tol: f64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("HCATOOL_ROW_SUM_TOLERANCE is not a number: {raw:?}"))?;
                if !(tol.is_finite() && tol >= 0.0) {
                    anyhow::bail!("HCATOOL_ROW_SUM_TOLERANCE must be a non-negative number, got {raw}");
                }
                tol
            }
            None => DEFAULT_ROW_SUM_TOLERANCE,
        };

        Ok(Self {
            data_stem: non_empty("HCATOOL_DATA_STEM"),
            fit_stem: non_empty("HCATOOL_FIT_STEM"),
            row_sum_tolerance,
        })
    }

    /// Combine CLI arguments with the configured defaults. Arguments win.
    /// Call this before any load so a missing stem fails with a clear message.
    pub fn require_stems(&self, data: Option<String>, fit: Option<String>) -> Result<Stems> {
        let Some(data) = data.or_else(|| self.data_stem.clone()) else {
            anyhow::bail!(
                "No data stem given. Pass DATASTEM or set HCATOOL_DATA_STEM in your .env file.\n\
                 The data stem is the path prefix of the corpus .tokens file."
            );
        };
        let Some(fit) = fit.or_else(|| self.fit_stem.clone()) else {
            anyhow::bail!(
                "No fit stem given. Pass FITSTEM or set HCATOOL_FIT_STEM in your .env file.\n\
                 The fit stem is the path prefix of the .ndt/.nwt/.par files."
            );
        };
        Ok(Stems { data, fit })
    }
}
