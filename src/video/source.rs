use crate::utils::logger;
use anyhow::{anyhow, Result};
use opencv::{core::Mat, prelude::*, videoio};

/// Sequential frame source over a video container. Frames come back in
/// decode order starting at index 0; seeking is never used.
pub struct VideoSource {
    capture: videoio::VideoCapture,
    fps: f64,
    width: u32,
    height: u32,
}

impl VideoSource {
    pub fn open(path: &str) -> Result<Self> {
        // CAP_ANY lets OpenCV pick the platform backend
        let capture = videoio::VideoCapture::from_file(path, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(anyhow!("Failed to open video file: {}", path));
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;

        logger::debug(&format!(
            "Opened video {} ({}x{} @ {:.2} fps)",
            path, width, height, fps
        ));

        Ok(Self {
            capture,
            fps,
            width,
            height,
        })
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reads the next frame, `None` once the stream is exhausted.
    pub fn read_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}
