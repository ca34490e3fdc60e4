// Colored terminal output for load summaries.

use colored::Colorize;

use super::LoadSummary;
use crate::vocab::DocIdSource;

/// Display a load summary in the terminal.
pub fn display_summary(summary: &LoadSummary) {
    println!("\n{}", "=== HCA Fit Summary ===".bold());
    println!("  Data stem: {}", summary.data_stem);
    println!("  Fit stem:  {}", summary.fit_stem);
    println!();

    let dims = &summary.dimensions;
    println!(
        "  Documents: {:>8}   Topics: {:>5}   Words: {:>8}",
        dims.documents, dims.topics, dims.words
    );
    println!(
        "  Assignments: {} (doc-topic), {} (topic-word)",
        summary.doc_topic_total, summary.topic_word_total
    );

    let source = match summary.report.doc_id_source {
        DocIdSource::DocumentList => "document list".normal(),
        DocIdSource::DefaultRange => "positional (no .documents file)".yellow(),
    };
    println!("  Document ids: {source}");
    if !summary.doc_id_preview.is_empty() {
        println!("    {}", summary.doc_id_preview.dimmed());
    }

    let report = &summary.report;
    if report.doc_topic_duplicates + report.word_topic_duplicates > 0 {
        println!(
            "  {} repeated triplets: {} in .ndt, {} in .nwt (last value kept)",
            "!".yellow().bold(),
            report.doc_topic_duplicates,
            report.word_topic_duplicates
        );
    }

    if let Some(posterior) = &summary.posterior {
        println!();
        println!(
            "  alphatot: {}   betatot: {}",
            posterior.hyperparameters.alphatot, posterior.hyperparameters.betatot
        );
        let verdict = if posterior.within_tolerance {
            "ok".green().bold()
        } else {
            "OUT OF TOLERANCE".red().bold()
        };
        println!(
            "  Row sums: theta max |s-1| = {:.2e}, phi max |s-1| = {:.2e} (tol {:.0e}) {}",
            posterior.theta_max_row_sum_deviation,
            posterior.phi_max_row_sum_deviation,
            posterior.row_sum_tolerance,
            verdict
        );
    }
    println!();
}
