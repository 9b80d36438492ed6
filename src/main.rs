// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Folio: Photo Portfolio Data Generator
//!
//! Run with no arguments to turn `./photos` into `./portfolio-data.json`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use folio::config::BuildConfig;
use folio::portfolio::{self, render};
use folio::{load_captions, FolioError, Result};

/// Folio CLI - Photo Portfolio Data Generator
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "0.1.0")]
#[command(about = "Build portfolio JSON from photo albums and caption files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "folio.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan albums and write the portfolio document
    Build {
        /// Albums root directory (overrides config)
        #[arg(short, long)]
        photos: Option<PathBuf>,

        /// Output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the document instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse one album's caption file and print its entries
    Captions {
        /// Album directory
        album: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "folio.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = BuildConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Build { photos, output, dry_run }) => {
            run_build(config, photos, output, dry_run)
        }
        Some(Commands::Captions { album }) => run_captions(&config, album),
        Some(Commands::Config { action }) => run_config_command(config, action),
        None => run_build(config, None, None, false),
    }
}

/// Run the portfolio build
fn run_build(
    mut config: BuildConfig,
    photos: Option<PathBuf>,
    output: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    if let Some(photos) = photos {
        config.photos_dir = photos;
    }
    if let Some(output) = output {
        config.output_path = output;
    }

    info!("Starting portfolio build...");

    let result = if dry_run {
        portfolio::scan(&config).and_then(|(portfolio, _)| {
            let json = render(&portfolio)?;
            println!("{}", String::from_utf8_lossy(&json));
            Ok(())
        })
    } else {
        portfolio::build(&config).map(|_| ())
    };

    match result {
        Ok(()) => {
            if dry_run {
                warn!("DRY RUN - {:?} was not written", config.output_path);
            } else {
                info!("Success! Portfolio data saved to {:?}", config.output_path);
            }
            Ok(())
        }
        Err(e) => {
            error!("An error occurred during the build process:");
            if let FolioError::DirectoryNotFound(_) = e {
                error!("{}", e);
            } else {
                error!("{:?}", e);
            }
            Err(e)
        }
    }
}

/// Print the parsed caption entries for one album
fn run_captions(config: &BuildConfig, album: PathBuf) -> Result<()> {
    if !album.is_dir() {
        return Err(FolioError::DirectoryNotFound(album));
    }

    let captions = load_captions(&album, &config.captions_file);
    for (file_name, caption) in captions.entries() {
        println!("{}: {}", file_name, caption);
    }

    println!("\n{} captions", captions.len());
    if captions.malformed_lines() > 0 {
        println!("{} malformed lines skipped", captions.malformed_lines());
    }

    Ok(())
}

/// Run configuration commands
fn run_config_command(config: BuildConfig, action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommands::Generate { output, force } => {
            if output.exists() && !force {
                return Err(FolioError::Config(format!(
                    "{:?} already exists. Use --force to overwrite", output
                )));
            }
            BuildConfig::default().save(&output)?;
            println!("Generated configuration: {:?}", output);
        }
    }

    Ok(())
}
