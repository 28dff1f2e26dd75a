//! ytdl - fetch, configure and save a YouTube video in three steps.

mod platform;

use std::path::PathBuf;

use clap::Parser;

use platform::{Backend, LaunchOptions, LogDestination, Overrides};

/// Three-step YouTube downloader for the terminal.
#[derive(Parser, Debug)]
#[command(name = "ytdl")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Video URL to fill in and look up right away
    #[arg(long)]
    url: Option<String>,

    /// Settings file (RON)
    #[arg(long, default_value = "./ytdl.ron")]
    config: PathBuf,

    /// Directory downloads are saved into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Metadata lookup backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Where log lines go
    #[arg(long, value_enum)]
    log: Option<LogDestination>,

    /// off, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::run_app(LaunchOptions {
        config_path: cli.config,
        initial_url: cli.url,
        overrides: Overrides {
            output_dir: cli.output_dir,
            backend: cli.backend,
            log_destination: cli.log,
            log_level: cli.log_level,
        },
    })
}
