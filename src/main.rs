use std::path::PathBuf;

use eyre::{Result, WrapErr};
use log::{LevelFilter, debug, info, warn};

use ytsubs::config::{self, Settings};
use ytsubs::output::{self, ExportFormat};
use ytsubs::pipeline;
use ytsubs::youtube::YouTube;

mod cli;

use cli::Cli;

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    // RUST_LOG, when set, overrides the -v level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_after_help() -> String {
    let formats = ExportFormat::ALL
        .iter()
        .map(|f| format!("  {:<6} -> <base-name>.{}", f.name(), f.extension()))
        .collect::<Vec<_>>()
        .join("\n");

    let settings = config::settings_paths()
        .iter()
        .map(|p| {
            if p.exists() {
                format!("  \x1b[32m✅\x1b[0m {}", p.display())
            } else {
                format!("  \x1b[31m❌\x1b[0m {}", p.display())
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("\nEXPORT FORMATS:\n{formats}\n\nSETTINGS (first found wins):\n{settings}")
}

#[tokio::main]
async fn main() -> Result<()> {
    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    setup_logging(cli.verbose);

    // Settings supply defaults; CLI flags take priority
    let settings = Settings::load(cli.config.as_deref()).wrap_err("failed to load settings")?;
    let language = cli.language.clone().unwrap_or(settings.default_language);
    let output_dir = cli.output_dir.clone().unwrap_or_else(|| PathBuf::from(settings.output_dir));
    let format_names = match cli.formats {
        Some(ref list) => output::split_formats(list),
        None => output::split_formats(&settings.export_formats.join(",")),
    };
    debug!(
        "input={} language={language} output_dir={} base_name={} formats={format_names:?} skip_empty={}",
        cli.input.display(),
        output_dir.display(),
        cli.base_name,
        cli.skip_empty
    );

    let formats = output::parse_formats(&format_names).wrap_err("failed to export data")?;
    let urls = pipeline::read_input_urls(&cli.input).wrap_err("failed to read input URLs")?;

    let source = YouTube::new(reqwest::Client::new());
    let records = pipeline::process_videos(&source, &urls, &language, cli.skip_empty).await;

    if records.is_empty() {
        warn!("No records collected from any video.");
    } else {
        info!("Collected {} caption records.", records.len());
    }

    output::write_exports(&records, &output_dir, &cli.base_name, &formats).wrap_err("failed to export data")?;

    info!("Done.");
    Ok(())
}
