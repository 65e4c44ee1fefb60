use crate::shared::constants;
use lazy_static::lazy_static;
use std::backtrace::Backtrace;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Clone)]
struct LogFiles {
    error_log: PathBuf,
    debug_log: PathBuf,
}

lazy_static! {
    static ref LOGGER: Mutex<Option<LogFiles>> = Mutex::new(None);
}

fn append_line(path: &Path, line: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

fn start_fresh(path: &Path, title: &str) {
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
    {
        let _ = writeln!(file, "=== {} Started: {} ===", title, chrono::Local::now());
    }
}

/// Truncates both log files in the working directory and installs a panic
/// hook that records the panic and tears down any preview window before the
/// process dies.
pub fn init() {
    let cwd = std::env::current_dir().unwrap_or_default();
    let files = LogFiles {
        error_log: cwd.join(constants::ERROR_LOG_FILE),
        debug_log: cwd.join(constants::DEBUG_LOG_FILE),
    };

    start_fresh(&files.error_log, "Error Log");
    start_fresh(&files.debug_log, "Debug Log");

    *LOGGER.lock().unwrap() = Some(files.clone());

    panic::set_hook(Box::new(move |info| {
        let msg = match info.payload().downcast_ref::<&str>() {
            Some(s) => (*s).to_string(),
            None => info
                .payload()
                .downcast_ref::<String>()
                .cloned()
                .unwrap_or_else(|| "Box<Any>".to_string()),
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let report = format!(
            "\nCRITICAL PANIC at {}:\nMessage: {}\nBacktrace:\n{:?}\n",
            location,
            msg,
            Backtrace::capture()
        );
        append_line(&files.error_log, &report);
        append_line(&files.debug_log, &report);

        // Best effort: close the preview window and leave the terminal usable
        let _ = opencv::highgui::destroy_all_windows();
        let _ = crossterm::terminal::disable_raw_mode();
        println!(
            "{} crashed. See {} for details.",
            constants::APP_NAME,
            files.error_log.display()
        );
    }));
}

pub fn log(level: &str, msg: &str) {
    if let Some(files) = LOGGER.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let line = format!("[{}][{}] {}", timestamp, level, msg);
        append_line(&files.debug_log, &line);
        if level == "ERROR" {
            append_line(&files.error_log, &line);
        }
    }
}

pub fn info(msg: &str) {
    log("INFO", msg);
}

pub fn error(msg: &str) {
    log("ERROR", msg);
}

pub fn debug(msg: &str) {
    log("DEBUG", msg);
}
