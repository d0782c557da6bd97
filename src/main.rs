// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use snap_gallery::FilterKind;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "snap-gallery")]
#[command(about = "Capture, filter and collect photos")]
#[command(version = snap_gallery::constants::app_info::version())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available filters
    Filters,

    /// Check an email address format
    CheckEmail {
        email: String,
    },

    /// Show the default gallery
    Gallery {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one capture session against an image file
    Snap {
        /// Image the camera captures from
        #[arg(short, long)]
        source: PathBuf,

        /// Email of the user taking the photo
        #[arg(short, long)]
        email: Option<String>,

        /// Use the front camera (mirrored)
        #[arg(long)]
        front: bool,

        /// Filter to apply; repeat to switch filters in order
        #[arg(short, long = "filter")]
        filters: Vec<FilterKind>,

        /// Commit the unfiltered capture
        #[arg(long, conflicts_with = "discard")]
        original: bool,

        /// Discard the capture instead of committing it
        #[arg(long)]
        discard: bool,

        /// Output folder (default: ~/Pictures/SnapGallery)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the resulting gallery as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=snap_gallery=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filters => cli::list_filters(),
        Commands::CheckEmail { email } => cli::check_email(&email),
        Commands::Gallery { json } => cli::show_gallery(json),
        Commands::Snap {
            source,
            email,
            front,
            filters,
            original,
            discard,
            output,
            json,
        } => cli::snap(cli::SnapOptions {
            source,
            email,
            front,
            filters,
            finish: if discard {
                cli::Finish::Discard
            } else if original {
                cli::Finish::CommitOriginal
            } else {
                cli::Finish::Commit
            },
            output,
            json,
        }),
    }
}
