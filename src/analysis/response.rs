use super::descriptor::{open_table, PlaceLabel};
use super::error::AnalysisError;
use crate::shared::constants;
use crate::utils::logger;
use std::path::Path;

/// Parses the experiment response table, skipping its header row. Only the
/// subject's place answer (column 2) is consumed; the surrounding trial
/// metadata columns are passed over untouched.
pub fn parse_responses(path: &Path) -> Result<Vec<PlaceLabel>, AnalysisError> {
    let mut reader = open_table(path)?;

    let mut responses = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i + 2;
        let raw = record
            .get(constants::RESPONSE_LABEL_COLUMN)
            .ok_or(AnalysisError::MalformedRow {
                line,
                found: record.len(),
                expected: constants::RESPONSE_LABEL_COLUMN + 1,
            })?;
        let label = PlaceLabel::parse(raw).ok_or_else(|| AnalysisError::BadValue {
            line,
            column: constants::RESPONSE_LABEL_COLUMN,
            kind: "response label",
            value: raw.trim().to_string(),
        })?;
        responses.push(label);
    }

    logger::debug(&format!(
        "Parsed {} response(s) from {}",
        responses.len(),
        path.display()
    ));
    Ok(responses)
}
