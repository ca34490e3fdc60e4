// hcatool: load HCA topic-model fits into count tables and posterior estimates
//
// This is the library root. Modules follow the load pipeline:
// vocabulary/document ids -> sparse count files -> hyperparameters -> estimates.

pub mod config;
pub mod counts;
pub mod error;
pub mod estimate;
pub mod output;
pub mod params;
pub mod paths;
pub mod table;
pub mod vocab;

pub use counts::{load_counts, load_counts_with_report};
pub use error::{HcaError, Result};
pub use estimate::{estimate, load, load_posterior};
pub use table::{CountTable, Label, ProbabilityTable, Table};
