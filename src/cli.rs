use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytsubs",
    about = "YouTube video subtitles (captions) scraper",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Text file with YouTube video URLs, one per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Comma-separated export formats: json, csv, excel, xml, html
    #[arg(short, long)]
    pub formats: Option<String>,

    /// Subtitle language code to extract
    #[arg(short, long)]
    pub language: Option<String>,

    /// Directory to write exported files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Base filename (without extension) for exported files
    #[arg(short, long, default_value = "output")]
    pub base_name: String,

    /// Log URLs that produce no captions
    #[arg(long)]
    pub skip_empty: bool,

    /// Settings file (JSON) to use instead of the standard locations
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
