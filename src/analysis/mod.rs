pub mod descriptor;
pub mod error;
pub mod response;
pub mod stats;

pub use descriptor::{
    DescriptorRow, DistanceBucket, DistanceTally, Factor, PlaceLabel,
};
pub use error::AnalysisError;

use crate::shared::constants;
use crate::utils::logger;
use serde::Serialize;
use std::path::Path;

/// Percent of mismatched trials showing each environmental factor. `total`
/// is the unweighted arithmetic sum of the three, kept for the report's
/// combined bar; it is not a bounded percentage.
#[derive(Debug, Clone, Serialize)]
pub struct FactorBreakdown {
    pub blend: f64,
    pub clutter: f64,
    pub edge: f64,
    pub total: f64,
}

/// Everything the report and charts need, computed in one pass over the two
/// tables. Percentages are rounded to whole numbers for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub trials: usize,
    pub mismatches: usize,
    pub percent_correct: f64,
    pub percent_incorrect: f64,
    pub factors: FactorBreakdown,
    pub distance_percentages: [f64; 4],
    pub distance_counts: [usize; 4],
}

impl AnalysisSummary {
    pub fn print_report(&self) {
        println!("\n=== Analysis Summary ===");
        println!("Trials: {}", self.trials);
        println!(
            "Correct: {:.0}% | Incorrect: {:.0}% ({} trial(s))",
            self.percent_correct, self.percent_incorrect, self.mismatches
        );
        println!(
            "Factors in incorrect answers: Blend {:.0}% | Clutter {:.0}% | Edge {:.0}% | Sum {:.0}%",
            self.factors.blend, self.factors.clutter, self.factors.edge, self.factors.total
        );
        for (label, (percent, count)) in constants::CHART_DISTANCE_LABELS.iter().zip(
            self.distance_percentages
                .iter()
                .zip(self.distance_counts.iter()),
        ) {
            println!("Incorrect at {}: {:.0}% (of {} frame(s))", label, percent, count);
        }
    }
}

/// Loads both tables, validates their alignment, and derives the three
/// summaries: overall correct/incorrect split, per-factor mismatch rates,
/// and per-distance-bucket mismatch rates.
pub fn run_analysis(
    descriptor_path: &Path,
    response_path: &Path,
) -> Result<AnalysisSummary, AnalysisError> {
    let (rows, tally) = descriptor::parse_descriptors(descriptor_path)?;
    let responses = response::parse_responses(response_path)?;
    let mismatch_indices = stats::find_mismatches(&responses, &rows)?;

    let trials = rows.len();
    let percent_incorrect = if trials == 0 {
        0.0
    } else {
        (mismatch_indices.len() as f64 / trials as f64 * 100.0).round()
    };

    let blend = (stats::factor_rate(&mismatch_indices, &rows, Factor::Blend) * 100.0).round();
    let clutter = (stats::factor_rate(&mismatch_indices, &rows, Factor::Clutter) * 100.0).round();
    let edge = (stats::factor_rate(&mismatch_indices, &rows, Factor::Edge) * 100.0).round();

    let rates = stats::distance_rates(&mismatch_indices, &rows, &tally);
    let distance_percentages = rates.map(|r| (r * 100.0).round());

    logger::info(&format!(
        "Analysis: {} trial(s), {} incorrect",
        trials,
        mismatch_indices.len()
    ));

    Ok(AnalysisSummary {
        trials,
        mismatches: mismatch_indices.len(),
        percent_correct: 100.0 - percent_incorrect,
        percent_incorrect,
        factors: FactorBreakdown {
            blend,
            clutter,
            edge,
            total: blend + clutter + edge,
        },
        distance_percentages,
        distance_counts: tally.counts(),
    })
}
