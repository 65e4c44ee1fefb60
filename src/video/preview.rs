use crate::shared::constants;
use crate::utils::logger;
use crate::video::{CancelToken, VideoSource};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use opencv::core::{Mat, Point, Scalar};
use opencv::{highgui, imgproc};
use std::time::Duration;

pub struct PreviewReport {
    pub frames_shown: u64,
    pub cancelled: bool,
}

/// The display surface for preview playback. Destroyed on drop so the
/// window disappears on every exit path, including errors.
struct PreviewWindow {
    title: &'static str,
}

impl PreviewWindow {
    fn open() -> Result<Self> {
        highgui::named_window(constants::PREVIEW_WINDOW_TITLE, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            title: constants::PREVIEW_WINDOW_TITLE,
        })
    }

    fn show(&self, frame: &Mat) -> Result<()> {
        highgui::imshow(self.title, frame)?;
        Ok(())
    }

    /// Blocks for the pacing delay and returns the key pressed in the
    /// window, if any.
    fn wait_key(&self, delay: Duration) -> Result<Option<char>> {
        let code = highgui::wait_key(delay.as_millis().max(1) as i32)?;
        if code < 0 {
            return Ok(None);
        }
        Ok(char::from_u32(code as u32))
    }
}

impl Drop for PreviewWindow {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(self.title);
    }
}

fn is_quit_key(key: char) -> bool {
    key == 'q' || key == '\x1b'
}

// Non-blocking: the window's wait_key provides the pacing
fn terminal_quit_requested() -> Result<bool> {
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn overlay_index(frame: &mut Mat, index: u64) -> Result<()> {
    imgproc::put_text(
        frame,
        &format!("frame: {}", index),
        Point::new(16, 40),
        imgproc::FONT_HERSHEY_SIMPLEX,
        1.0,
        Scalar::new(0.0, 255.0, 0.0, 0.0),
        2,
        imgproc::LINE_AA,
        false,
    )?;
    Ok(())
}

/// Plays the video frame-by-frame with each frame's index overlaid and
/// logged, for manually picking extraction indices. Runs until the stream
/// ends or the token is cancelled; 'q'/Esc in the window or on the terminal
/// and Ctrl-C all stop playback.
pub fn preview_frames(
    video_path: &str,
    delay: Duration,
    cancel: &CancelToken,
) -> Result<PreviewReport> {
    let mut source = VideoSource::open(video_path)?;
    let window = PreviewWindow::open()?;

    // Raw mode so a bare 'q' on the terminal stops playback too
    let raw_mode = crossterm::terminal::enable_raw_mode().is_ok();

    println!(
        "Previewing {} @ {:.2} fps (press 'q' or Esc to stop)\r",
        video_path,
        source.fps()
    );

    let mut report = PreviewReport {
        frames_shown: 0,
        cancelled: false,
    };

    let outcome = loop {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break Ok(());
        }

        let mut frame = match source.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break Ok(()), // end of stream
            Err(e) => break Err(e),
        };

        let index = report.frames_shown;
        if let Err(e) = overlay_index(&mut frame, index).and_then(|_| window.show(&frame)) {
            break Err(e);
        }
        print!("frame: {}\r\n", index);
        report.frames_shown += 1;

        match window.wait_key(delay) {
            Ok(Some(key)) if is_quit_key(key) => {
                cancel.cancel();
                report.cancelled = true;
                break Ok(());
            }
            Ok(_) => {}
            Err(e) => break Err(e),
        }

        match terminal_quit_requested() {
            Ok(true) => {
                cancel.cancel();
                report.cancelled = true;
                break Ok(());
            }
            Ok(false) => {}
            Err(e) => break Err(e),
        }
    };

    if raw_mode {
        let _ = crossterm::terminal::disable_raw_mode();
    }
    drop(window);
    outcome?;

    logger::debug(&format!(
        "Preview ended after {} frame(s), cancelled={}",
        report.frames_shown, report.cancelled
    ));
    println!("\n=== Preview Complete ===");
    println!("Frames shown: {}", report.frames_shown);
    if report.cancelled {
        println!("Stopped by user");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key('q'));
        assert!(is_quit_key('\x1b'));
        assert!(!is_quit_key(' '));
        assert!(!is_quit_key('p'));
    }
}
