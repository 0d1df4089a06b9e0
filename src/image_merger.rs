use clap::Parser;
use dotenv::dotenv;
use image_merger_lib::selection::{is_supported_image, MSG_SELECT_TWO};
use image_merger_lib::{
    compose, default_output_dir, merge_into_dir, ImagePair, InputEvent, MergeConfig, Response, Selection,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Images to merge; the first is labelled "Before", the second "After"
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory to save the merged image to (defaults to the desktop)
    #[arg(long, env = "MERGE_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Exact output path; skips the merged_image_N.png naming
    #[arg(long)]
    output: Option<PathBuf>,

    /// Gap between the two images, in pixels
    #[arg(long, env = "MERGE_PADDING", default_value = "10")]
    padding: u32,

    /// Height of the caption band below the images, in pixels
    #[arg(long, env = "MERGE_CAPTION_BAND_HEIGHT", default_value = "125")]
    caption_band_height: u32,

    #[arg(skip)]
    resolved_output_dir: PathBuf,
}

impl MergeConfig for Args {
    fn output_dir(&self) -> &Path {
        &self.resolved_output_dir
    }

    fn padding(&self) -> u32 {
        self.padding
    }

    fn caption_band_height(&self) -> u32 {
        self.caption_band_height
    }
}

/// The pair to merge, or the message to show the user instead.
fn select_pair(files: &[PathBuf]) -> Result<ImagePair, &'static str> {
    let mut selection = Selection::new();
    if let Response::Rejected(message) = selection.handle(InputEvent::FilesPicked(files.to_vec())) {
        return Err(message);
    }
    match selection.handle(InputEvent::MergeRequested) {
        Response::Merge(pair) => Ok(pair),
        Response::Rejected(message) => Err(message),
        Response::Ready(_) => Err(MSG_SELECT_TWO),
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file if present
    dotenv().ok();

    // Logs go to stderr so stdout only carries the result line
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = Args::parse();
    args.resolved_output_dir = args.output_dir.clone().unwrap_or_else(default_output_dir);

    if args.files.len() > 2 {
        warn!("Only the first two images are merged; ignoring {} more", args.files.len() - 2);
    }
    for file in args.files.iter().take(2) {
        if !is_supported_image(file) {
            warn!("{} does not look like a JPEG or PNG file", file.display());
        }
    }

    let pair = match select_pair(&args.files) {
        Ok(pair) => pair,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let result = match &args.output {
        Some(output) => compose(&pair.before, &pair.after, output, args.compose_options()),
        None => merge_into_dir(&pair.before, &pair.after, &args),
    };

    match result {
        Ok(path) => {
            println!("Merged image created successfully! Saved at: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error merging images: {}", e);
            ExitCode::FAILURE
        }
    }
}
