use super::error::AnalysisError;
use crate::shared::constants;
use crate::utils::logger;
use std::fmt;
use std::path::Path;

/// Ground-truth scene label for a frame. The source tables encode these as
/// numeric codes (0..3); the spelled-out names are accepted as well so the
/// response table can use either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceLabel {
    Road,
    Sidewalk,
    Both,
    None,
}

impl PlaceLabel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "0" => Some(Self::Road),
            "1" => Some(Self::Sidewalk),
            "2" => Some(Self::Both),
            "3" => Some(Self::None),
            other => match other.to_ascii_lowercase().as_str() {
                "road" => Some(Self::Road),
                "sidewalk" => Some(Self::Sidewalk),
                "both" => Some(Self::Both),
                "none" => Some(Self::None),
                _ => Option::None,
            },
        }
    }
}

impl fmt::Display for PlaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Road => "Road",
            Self::Sidewalk => "Sidewalk",
            Self::Both => "Both",
            Self::None => "None",
        };
        write!(f, "{}", name)
    }
}

/// Ordinal distance of the closest pedestrian from the camera. Codes outside
/// 0..=3 are rejected rather than folded into Far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceBucket {
    Closest = 0,
    Close = 1,
    Medium = 2,
    Far = 3,
}

impl DistanceBucket {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "0" => Some(Self::Closest),
            "1" => Some(Self::Close),
            "2" => Some(Self::Medium),
            "3" => Some(Self::Far),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-bucket row counts, accumulated while the descriptor table is parsed
/// and used later as the denominator for distance mismatch rates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceTally {
    counts: [usize; 4],
}

impl DistanceTally {
    pub fn record(&mut self, bucket: DistanceBucket) {
        self.counts[bucket.index()] += 1;
    }

    pub fn counts(&self) -> [usize; 4] {
        self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Binary environmental factors recorded per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    Blend,
    Clutter,
    Edge,
}

impl Factor {
    pub fn flag(self, row: &DescriptorRow) -> bool {
        match self {
            Factor::Blend => row.blend,
            Factor::Clutter => row.clutter,
            Factor::Edge => row.edge,
        }
    }
}

/// One data row of the hand-authored descriptor table:
/// frame, place, intent, distance, blend, clutter, edge, expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorRow {
    pub frame_id: u64,
    pub place: PlaceLabel,
    pub intent: bool,
    pub distance: DistanceBucket,
    pub blend: bool,
    pub clutter: bool,
    pub edge: bool,
    pub expectation: bool,
}

impl DescriptorRow {
    fn from_record(record: &csv::StringRecord, line: usize) -> Result<Self, AnalysisError> {
        if record.len() < constants::DESCRIPTOR_COLUMNS {
            return Err(AnalysisError::MalformedRow {
                line,
                found: record.len(),
                expected: constants::DESCRIPTOR_COLUMNS,
            });
        }
        let field = |column: usize| record.get(column).unwrap_or("");

        let frame_id = field(0)
            .trim()
            .parse::<u64>()
            .map_err(|_| bad_value(line, 0, "frame id", field(0)))?;
        let place =
            PlaceLabel::parse(field(1)).ok_or_else(|| bad_value(line, 1, "place label", field(1)))?;
        let intent = parse_flag(field(2), line, 2, "intent flag")?;
        let distance = DistanceBucket::parse(field(3))
            .ok_or_else(|| bad_value(line, 3, "distance code", field(3)))?;
        let blend = parse_flag(field(4), line, 4, "blend flag")?;
        let clutter = parse_flag(field(5), line, 5, "clutter flag")?;
        let edge = parse_flag(field(6), line, 6, "edge flag")?;
        let expectation = parse_flag(field(7), line, 7, "expectation flag")?;

        Ok(Self {
            frame_id,
            place,
            intent,
            distance,
            blend,
            clutter,
            edge,
            expectation,
        })
    }
}

fn parse_flag(raw: &str, line: usize, column: usize, kind: &'static str) -> Result<bool, AnalysisError> {
    match raw.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(bad_value(line, column, kind, raw)),
    }
}

fn bad_value(line: usize, column: usize, kind: &'static str, raw: &str) -> AnalysisError {
    AnalysisError::BadValue {
        line,
        column,
        kind,
        value: raw.trim().to_string(),
    }
}

pub(super) fn open_table(path: &Path) -> Result<csv::Reader<std::fs::File>, AnalysisError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| AnalysisError::SourceOpen {
            path: path.to_path_buf(),
            source,
        })
}

/// Parses the descriptor table, skipping its single header row. Returns the
/// rows in source order together with the distance tally accumulated over
/// them. Any short row or out-of-domain value aborts the parse; skipping rows
/// would desync the positional alignment with the response table.
pub fn parse_descriptors(path: &Path) -> Result<(Vec<DescriptorRow>, DistanceTally), AnalysisError> {
    let mut reader = open_table(path)?;

    let mut rows = Vec::new();
    let mut tally = DistanceTally::default();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i + 2; // 1-based, after the header row
        let row = DescriptorRow::from_record(&record, line)?;
        tally.record(row.distance);
        rows.push(row);
    }

    logger::debug(&format!(
        "Parsed {} descriptor row(s) from {} (distance tally {:?})",
        rows.len(),
        path.display(),
        tally.counts()
    ));
    Ok((rows, tally))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, File};
    use std::io::Write;
    use std::path::PathBuf;

    fn write_table(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("framesight_descriptor_tests");
        create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_tally_counts_distances() {
        let path = write_table(
            "tally.csv",
            "frame,place,intent,distance,blend,clutter,edge,expectation\n\
             30,0,0,0,0,0,0,0\n\
             151,1,1,1,0,1,0,1\n\
             202,2,0,0,1,0,1,0\n",
        );
        let (rows, tally) = parse_descriptors(&path).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(tally.counts(), [2, 1, 0, 0]);
        assert_eq!(tally.total(), rows.len());
        assert_eq!(rows[0].frame_id, 30);
        assert_eq!(rows[0].place, PlaceLabel::Road);
        assert_eq!(rows[1].distance, DistanceBucket::Close);
        assert!(rows[1].intent);
        assert!(rows[1].expectation);
        assert!(rows[2].blend);
        assert!(!rows[2].clutter && rows[2].edge);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let path = write_table(
            "short.csv",
            "frame,place,intent,distance,blend,clutter,edge,expectation\n\
             30,0,0,0,0,0,0,0\n\
             151,1,1\n",
        );
        let err = parse_descriptors(&path).unwrap_err();
        match err {
            AnalysisError::MalformedRow { line, found, expected } => {
                assert_eq!(line, 3);
                assert_eq!(found, 3);
                assert_eq!(expected, 8);
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_domain_distance_is_rejected() {
        let path = write_table(
            "bad_distance.csv",
            "frame,place,intent,distance,blend,clutter,edge,expectation\n\
             30,0,0,7,0,0,0,0\n",
        );
        let err = parse_descriptors(&path).unwrap_err();
        match err {
            AnalysisError::BadValue { line, column, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 3);
                assert_eq!(value, "7");
            }
            other => panic!("expected BadValue, got {:?}", other),
        }
    }

    #[test]
    fn test_place_label_accepts_codes_and_names() {
        assert_eq!(PlaceLabel::parse("0"), Some(PlaceLabel::Road));
        assert_eq!(PlaceLabel::parse("Sidewalk"), Some(PlaceLabel::Sidewalk));
        assert_eq!(PlaceLabel::parse("both"), Some(PlaceLabel::Both));
        assert_eq!(PlaceLabel::parse("NONE"), Some(PlaceLabel::None));
        assert_eq!(PlaceLabel::parse("5"), None);
        assert_eq!(PlaceLabel::parse("curb"), None);
    }

    #[test]
    fn test_missing_file_is_source_open() {
        let path = std::env::temp_dir().join("framesight_descriptor_tests/nope.csv");
        let err = parse_descriptors(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::SourceOpen { .. }));
    }
}
