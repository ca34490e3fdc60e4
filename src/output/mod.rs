// Output formatting: the load summary printed by `hcatool check`.
//
// The summary describes a snapshot (dimensions, hyperparameters, what the
// validation saw). It never contains the tables themselves.

pub mod terminal;

use serde::Serialize;

use crate::counts::{CountsReport, LoadedCounts};
use crate::estimate::Posterior;
use crate::params::{Dimensions, Hyperparameters};
use crate::table::Label;

/// What a load found, suitable for a terminal or `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub data_stem: String,
    pub fit_stem: String,
    pub dimensions: Dimensions,
    pub report: CountsReport,
    pub doc_topic_total: u64,
    pub topic_word_total: u64,
    /// First few document ids, for eyeballing the labels.
    pub doc_id_preview: String,
    /// Absent when only the counts were loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posterior: Option<PosteriorSummary>,
}

/// Hyperparameters and row-sum check of the posterior estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorSummary {
    pub hyperparameters: Hyperparameters,
    pub theta_max_row_sum_deviation: f64,
    pub phi_max_row_sum_deviation: f64,
    pub row_sum_tolerance: f64,
    pub within_tolerance: bool,
}

const DOC_ID_PREVIEW: usize = 5;

impl LoadSummary {
    /// Summarize a counts-only load.
    pub fn from_counts(data_stem: &str, fit_stem: &str, counts: &LoadedCounts) -> Self {
        Self {
            data_stem: data_stem.to_string(),
            fit_stem: fit_stem.to_string(),
            dimensions: Dimensions::of(&counts.doc_topic, &counts.topic_word),
            report: counts.report.clone(),
            doc_topic_total: counts.doc_topic.total(),
            topic_word_total: counts.topic_word.total(),
            doc_id_preview: preview_labels(counts.doc_topic.index(), DOC_ID_PREVIEW),
            posterior: None,
        }
    }

    /// Summarize a full load, checking row sums against `tolerance`.
    pub fn from_posterior(data_stem: &str, fit_stem: &str, posterior: &Posterior, tolerance: f64) -> Self {
        let theta_dev = posterior.theta.max_row_sum_deviation();
        let phi_dev = posterior.phi.max_row_sum_deviation();
        Self {
            posterior: Some(PosteriorSummary {
                hyperparameters: posterior.hyperparameters,
                theta_max_row_sum_deviation: theta_dev,
                phi_max_row_sum_deviation: phi_dev,
                row_sum_tolerance: tolerance,
                within_tolerance: theta_dev <= tolerance && phi_dev <= tolerance,
            }),
            ..Self::from_counts(data_stem, fit_stem, &posterior.counts)
        }
    }
}

/// `a, b, c (+7 more)`: the first `max` labels and how many were left out.
pub fn preview_labels(labels: &[Label], max: usize) -> String {
    let shown: Vec<String> = labels.iter().take(max).map(Label::to_string).collect();
    let mut preview = shown.join(", ");
    if labels.len() > max {
        preview.push_str(&format!(" (+{} more)", labels.len() - max));
    }
    preview
}
