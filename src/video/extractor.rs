use crate::shared::constants;
use crate::utils::logger;
use crate::video::VideoSource;
use anyhow::{Context, Result};
use opencv::{core::Vector, imgcodecs};
use std::collections::HashSet;
use std::path::Path;

pub struct ExtractReport {
    pub frames_scanned: u64,
    pub frames_written: u64,
}

pub fn frame_file_name(index: u64, format: &str) -> String {
    format!("{}{}.{}", constants::FRAME_FILE_PREFIX, index, format)
}

/// Scans the video sequentially from frame 0 and writes every frame whose
/// index is in `indices` as a still image named frame<index>.<format>.
/// Indices past the end of the stream simply never match; that is not an
/// error. Stops early once every requested index has been written.
pub fn extract_frames(
    video_path: &str,
    indices: &HashSet<u64>,
    out_dir: &Path,
    format: &str,
) -> Result<ExtractReport> {
    let mut source = VideoSource::open(video_path)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let (width, height) = source.frame_size();
    println!(
        "Extracting {} frame(s) from {} ({}x{})",
        indices.len(),
        video_path,
        width,
        height
    );

    let mut report = ExtractReport {
        frames_scanned: 0,
        frames_written: 0,
    };

    let mut index: u64 = 0;
    while let Some(frame) = source.read_frame()? {
        if indices.contains(&index) {
            let path = out_dir.join(frame_file_name(index, format));
            let path_str = path
                .to_str()
                .with_context(|| format!("Non-UTF8 output path: {}", path.display()))?;
            if !imgcodecs::imwrite(path_str, &frame, &Vector::new())? {
                anyhow::bail!("Failed to encode frame {} as {}", index, path.display());
            }
            logger::debug(&format!("Wrote {}", path.display()));
            report.frames_written += 1;
        }

        index += 1;
        report.frames_scanned = index;

        if report.frames_written as usize == indices.len() {
            break;
        }
    }

    let missed = indices.len() as u64 - report.frames_written;
    if missed > 0 {
        logger::info(&format!(
            "{} requested index(es) were past the end of the video",
            missed
        ));
    }

    println!("\n=== Extraction Complete ===");
    println!("Frames scanned: {}", report.frames_scanned);
    println!("Frames written: {}", report.frames_written);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_file_name_matches_original_scheme() {
        assert_eq!(frame_file_name(30, "jpg"), "frame30.jpg");
        assert_eq!(frame_file_name(0, "png"), "frame0.png");
    }

    #[test]
    fn test_missing_video_reports_open_error() {
        let indices: HashSet<u64> = [5].into_iter().collect();
        let out_dir = std::env::temp_dir().join("framesight_extract_tests");
        let err = extract_frames("no_such_video.mp4", &indices, &out_dir, "jpg");
        assert!(err.is_err());
    }
}
