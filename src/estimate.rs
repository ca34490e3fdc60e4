// Posterior mean estimates of theta (doc-topic) and phi (topic-word).
//
// Each count row gets a uniform pseudo-count (the concentration total spread
// over the row's columns) and is then normalized. Under a symmetric
// Dirichlet prior this is the posterior mean of the row's multinomial.

use std::path::Path;

use ndarray::{Array2, Axis};
use tracing::info;

use crate::counts::{load_counts_with_report, LoadedCounts};
use crate::error::Result;
use crate::params::{read_hyperparameters, Hyperparameters};
use crate::paths::FitFiles;
use crate::table::{CountTable, ProbabilityTable};

/// Smooth every row of `counts` by `concentration / ncols` and normalize it.
///
/// A row of zero columns stays empty.
pub fn smoothed_row_distribution(counts: &Array2<u64>, concentration: f64) -> Array2<f64> {
    let ncols = counts.ncols();
    if ncols == 0 {
        return Array2::zeros(counts.dim());
    }
    let pseudo_count = concentration / ncols as f64;
    let mut smoothed = counts.mapv(|c| c as f64 + pseudo_count);
    let totals = smoothed.sum_axis(Axis(1)).insert_axis(Axis(1));
    smoothed /= &totals;
    smoothed
}

/// Compute `(theta, phi)` from count tables and concentration totals.
///
/// `theta` keeps the labels of `doc_topic`, `phi` those of `topic_word`.
pub fn estimate(
    doc_topic: &CountTable,
    topic_word: &CountTable,
    alphatot: f64,
    betatot: f64,
) -> (ProbabilityTable, ProbabilityTable) {
    let theta = ProbabilityTable::new(
        doc_topic.index().to_vec(),
        doc_topic.columns().to_vec(),
        smoothed_row_distribution(doc_topic.values(), alphatot),
    );
    let phi = ProbabilityTable::new(
        topic_word.index().to_vec(),
        topic_word.columns().to_vec(),
        smoothed_row_distribution(topic_word.values(), betatot),
    );
    (theta, phi)
}

/// Everything a full load produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    pub counts: LoadedCounts,
    pub hyperparameters: Hyperparameters,
    pub theta: ProbabilityTable,
    pub phi: ProbabilityTable,
}

/// Load the count tables and hyperparameters for a fit and return the
/// posterior estimates `(theta, phi)`.
pub fn load(
    datastem: impl AsRef<Path>,
    fitstem: impl AsRef<Path>,
) -> Result<(ProbabilityTable, ProbabilityTable)> {
    let posterior = load_posterior(datastem, fitstem)?;
    Ok((posterior.theta, posterior.phi))
}

/// Like [`load`], keeping the counts and hyperparameters alongside.
pub fn load_posterior(datastem: impl AsRef<Path>, fitstem: impl AsRef<Path>) -> Result<Posterior> {
    let fit = FitFiles::from_stem(fitstem.as_ref());
    let counts = load_counts_with_report(datastem, fitstem)?;
    let hyperparameters = read_hyperparameters(&fit.params, &counts.doc_topic, &counts.topic_word)?;
    let (theta, phi) = estimate(
        &counts.doc_topic,
        &counts.topic_word,
        hyperparameters.alphatot,
        hyperparameters.betatot,
    );
    info!(
        alphatot = hyperparameters.alphatot,
        betatot = hyperparameters.betatot,
        "Computed posterior estimates"
    );
    Ok(Posterior {
        counts,
        hyperparameters,
        theta,
        phi,
    })
}
