use super::descriptor::{DescriptorRow, DistanceTally, Factor, PlaceLabel};
use super::error::AnalysisError;

/// Returns the ascending list of trial indices where the subject's answer
/// differs from the descriptor's ground truth. The two sequences are aligned
/// positionally, so unequal lengths mean the tables are out of sync and no
/// comparison is meaningful.
pub fn find_mismatches(
    responses: &[PlaceLabel],
    descriptors: &[DescriptorRow],
) -> Result<Vec<usize>, AnalysisError> {
    if responses.len() != descriptors.len() {
        return Err(AnalysisError::LengthMismatch {
            descriptors: descriptors.len(),
            responses: responses.len(),
        });
    }

    let mismatches = responses
        .iter()
        .zip(descriptors)
        .enumerate()
        .filter(|(_, (response, row))| **response != row.place)
        .map(|(i, _)| i)
        .collect();
    Ok(mismatches)
}

/// Fraction of mismatched trials whose frame had the given factor present.
/// An empty mismatch set yields 0.0 rather than a divide-by-zero.
pub fn factor_rate(mismatches: &[usize], rows: &[DescriptorRow], factor: Factor) -> f64 {
    if mismatches.is_empty() {
        return 0.0;
    }
    let present = mismatches
        .iter()
        .filter(|&&i| factor.flag(&rows[i]))
        .count();
    present as f64 / mismatches.len() as f64
}

/// Per-bucket fraction of that bucket's frames the subjects got wrong:
/// mismatches in the bucket divided by the bucket's tally. A bucket no
/// descriptor row fell into cannot hold a mismatch either, so its rate is
/// 0.0 by definition.
pub fn distance_rates(
    mismatches: &[usize],
    rows: &[DescriptorRow],
    tally: &DistanceTally,
) -> [f64; 4] {
    let mut wrong = [0usize; 4];
    for &i in mismatches {
        wrong[rows[i].distance.index()] += 1;
    }

    let mut rates = [0.0f64; 4];
    for (bucket, rate) in rates.iter_mut().enumerate() {
        let total = tally.counts()[bucket];
        if total > 0 {
            *rate = wrong[bucket] as f64 / total as f64;
        }
    }
    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::descriptor::DistanceBucket;

    fn row(place: PlaceLabel, distance: DistanceBucket, blend: bool) -> DescriptorRow {
        DescriptorRow {
            frame_id: 0,
            place,
            intent: false,
            distance,
            blend,
            clutter: false,
            edge: false,
            expectation: false,
        }
    }

    #[test]
    fn test_mismatches_are_ascending_indices() {
        let descriptors = vec![
            row(PlaceLabel::Road, DistanceBucket::Closest, false),
            row(PlaceLabel::Road, DistanceBucket::Closest, true),
            row(PlaceLabel::Road, DistanceBucket::Closest, false),
        ];
        let responses = vec![PlaceLabel::Road, PlaceLabel::Sidewalk, PlaceLabel::Road];

        let mismatches = find_mismatches(&responses, &descriptors).unwrap();
        assert_eq!(mismatches, vec![1]);

        // Deterministic: same inputs, same output
        assert_eq!(find_mismatches(&responses, &descriptors).unwrap(), vec![1]);
    }

    #[test]
    fn test_unequal_lengths_are_rejected() {
        let descriptors = vec![row(PlaceLabel::Road, DistanceBucket::Closest, false)];
        let responses = vec![PlaceLabel::Road, PlaceLabel::Both];

        let err = find_mismatches(&responses, &descriptors).unwrap_err();
        match err {
            AnalysisError::LengthMismatch { descriptors, responses } => {
                assert_eq!(descriptors, 1);
                assert_eq!(responses, 2);
            }
            other => panic!("expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_factor_rate_counts_present_flags() {
        let rows = vec![
            row(PlaceLabel::Road, DistanceBucket::Closest, false),
            row(PlaceLabel::Road, DistanceBucket::Closest, true),
            row(PlaceLabel::Road, DistanceBucket::Closest, false),
        ];
        // Row 1 was answered wrong and its blend flag is set
        assert_eq!(factor_rate(&[1], &rows, Factor::Blend), 1.0);
        assert_eq!(factor_rate(&[0, 1], &rows, Factor::Blend), 0.5);
        assert_eq!(factor_rate(&[0, 2], &rows, Factor::Blend), 0.0);
    }

    #[test]
    fn test_empty_mismatch_set_has_zero_rates() {
        let rows = vec![row(PlaceLabel::Road, DistanceBucket::Close, true)];
        let tally = {
            let mut t = DistanceTally::default();
            t.record(DistanceBucket::Close);
            t
        };
        assert_eq!(factor_rate(&[], &rows, Factor::Blend), 0.0);
        assert_eq!(distance_rates(&[], &rows, &tally), [0.0; 4]);
    }

    #[test]
    fn test_distance_rates_divide_by_bucket_tally() {
        let rows = vec![
            row(PlaceLabel::Road, DistanceBucket::Closest, false),
            row(PlaceLabel::Road, DistanceBucket::Closest, false),
            row(PlaceLabel::Road, DistanceBucket::Far, false),
        ];
        let mut tally = DistanceTally::default();
        for r in &rows {
            tally.record(r.distance);
        }

        // One of two Closest frames wrong, the single Far frame wrong
        let rates = distance_rates(&[0, 2], &rows, &tally);
        assert_eq!(rates, [0.5, 0.0, 0.0, 1.0]);

        for rate in rates {
            assert!((0.0..=1.0).contains(&rate));
        }
    }
}
