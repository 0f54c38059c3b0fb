//! xgd CLI
//!
//! Command-line interface for inspecting and rewriting Xbox disc security
//! sectors and computing layerbreaks from PIC dumps.

mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use commands::config::{run_config_path, run_config_show};
use commands::layerbreak::run_layerbreak;
use commands::sector::{run_classify, run_clean, run_ranges, run_reconstruct};
use error::CliError;

#[derive(Parser)]
#[command(name = "xgd")]
#[command(about = "Inspect and rewrite Xbox disc security metadata", long_about = None)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the disc generation of a security sector
    Classify {
        /// Security sector file (2048 bytes)
        ss: PathBuf,
    },

    /// Rewrite drive-dependent bytes to their canonical values
    Clean {
        /// Security sector file (2048 bytes)
        ss: PathBuf,

        /// Only check whether the file is canonical; exit non-zero if not
        #[arg(long)]
        check: bool,

        /// Do not keep a .bak copy of the original
        #[arg(long)]
        no_backup: bool,
    },

    /// Print the logical ranges covered by the security sector
    Ranges {
        /// Security sector file (2048 bytes)
        ss: PathBuf,
    },

    /// Restore drive-specific bytes from a dumping tool's replay table
    Reconstruct {
        /// Canonical security sector file (2048 bytes)
        ss: PathBuf,

        /// Tool log containing the replay table
        log: PathBuf,

        /// Do not keep a .bak copy of the original
        #[arg(long)]
        no_backup: bool,
    },

    /// Compute layerbreaks from a PIC / disc-information dump
    Layerbreak {
        /// PIC file (e.g. .physical)
        pic: PathBuf,

        /// Total disc size in bytes
        #[arg(long, conflicts_with = "image")]
        size: Option<u64>,

        /// Disc image whose size bounds the layerbreaks
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Show settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}

/// Install the diagnostics logger on stderr. Command results go to stdout
/// with `println!`, so `RUST_LOG` never hides them.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format(|buf, record| match record.level() {
            Level::Warn => writeln!(buf, "warning: {}", record.args()),
            Level::Error => writeln!(buf, "error: {}", record.args()),
            level => writeln!(
                buf,
                "[{}] {}: {}",
                level.as_str().to_lowercase(),
                record.target(),
                record.args()
            ),
        })
        .init();
}

fn run(cli: Cli, settings: xgd_lib::Settings, json: bool) -> Result<(), CliError> {
    let write_options = |no_backup: bool| {
        let mut options = settings.write_options();
        if no_backup {
            options.create_backup = false;
        }
        options
    };

    match cli.command {
        Commands::Classify { ss } => run_classify(&ss, json),
        Commands::Clean {
            ss,
            check,
            no_backup,
        } => run_clean(&ss, check, &write_options(no_backup), json),
        Commands::Ranges { ss } => run_ranges(&ss, json),
        Commands::Reconstruct { ss, log, no_backup } => {
            run_reconstruct(&ss, &log, &write_options(no_backup), json)
        }
        Commands::Layerbreak { pic, size, image } => {
            run_layerbreak(&pic, size, image.as_deref(), json)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(&settings, json),
            ConfigAction::Path => run_config_path(json),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings_path = xgd_lib::settings_path();
    let loaded = xgd_lib::settings::try_load_settings_from(&settings_path);
    let json = cli.json || loaded.as_ref().is_ok_and(|s| s.output.json);
    init_logging(cli.verbose);

    let settings = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Ignoring settings file {}: {}",
            settings_path.display(),
            e
        );
        xgd_lib::Settings::default()
    });

    match run(cli, settings, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                e
            );
            ExitCode::FAILURE
        }
    }
}
