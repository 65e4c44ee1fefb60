mod analysis;
mod charts;
mod shared;
mod utils;
mod video;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::shared::constants;
use crate::video::CancelToken;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract selected frames from a video as still images
    Extract {
        #[arg(short, long)]
        input: String,
        /// Frame indices to write, e.g. --frames 30,151,202
        #[arg(short, long, value_delimiter = ',', required = true)]
        frames: Vec<u64>,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        #[arg(long, default_value = constants::DEFAULT_IMAGE_FORMAT)]
        format: String,
    },
    /// Play the video frame-by-frame with indices shown, for picking frames
    Preview {
        #[arg(short, long)]
        input: String,
        #[arg(short, long, default_value_t = constants::DEFAULT_PREVIEW_DELAY_MS)]
        delay_ms: u64,
    },
    /// Compare descriptor and response tables and render mismatch charts
    Analyze {
        #[arg(short, long)]
        descriptors: PathBuf,
        #[arg(short, long)]
        responses: PathBuf,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Print the computed summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // 1. Initialize Logger (error.log / debug.log)
    crate::utils::logger::init();

    // 2. Reset terminal state in case a previous preview died in raw mode
    let _ = crossterm::terminal::disable_raw_mode();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract {
            input,
            frames,
            output_dir,
            format,
        } => {
            let indices: HashSet<u64> = frames.iter().copied().collect();
            video::extract_frames(input, &indices, output_dir, format)?;
        }
        Commands::Preview { input, delay_ms } => {
            let cancel = CancelToken::with_ctrlc()?;
            video::preview_frames(input, Duration::from_millis(*delay_ms), &cancel)?;
        }
        Commands::Analyze {
            descriptors,
            responses,
            output_dir,
            json,
        } => {
            let summary = analysis::run_analysis(descriptors, responses)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                summary.print_report();
            }
            for path in charts::render_all(&summary, output_dir)? {
                println!("Chart written: {}", path.display());
            }
        }
    }

    Ok(())
}
