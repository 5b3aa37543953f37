//! Inbetween CLI - console walkthroughs of the tweening engine
//!
//! Prints easing plots, loop and yoyo patterns, a multi-dimensional tween
//! and a 2D path, driven one step per frame.

mod config;
mod demos;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inbetween_core::Easing;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::InbetweenConfig;

#[derive(Parser, Debug)]
#[command(name = "inbetween")]
#[command(about = "Console demos for the inbetween tweening engine")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the span of the easing and multi demos
    #[arg(long, global = true)]
    steps: Option<u32>,

    /// Override the number of frames driven by the loop, yoyo and path demos
    #[arg(long, global = true)]
    frames: Option<u32>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot every easing curve
    Easings {
        /// Plot a single curve, e.g. `cubic-in-out`
        #[arg(long)]
        only: Option<String>,
    },

    /// Restart a short tween a number of times
    Loop {
        /// Number of plays; 0 loops until the frames run out
        #[arg(long, default_value = "10")]
        count: u32,
    },

    /// Bounce a short tween between its ends
    Yoyo,

    /// Step an integer and a float together
    Multi,

    /// Move a point along a three-segment path
    Path,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = InbetweenConfig::load(args.config.as_deref())?;
    if let Some(steps) = args.steps {
        config.demo.steps = steps;
    }
    if let Some(frames) = args.frames {
        config.demo.frames = frames;
    }
    tracing::debug!(?config, "effective configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Easings { only } => {
            let only = only
                .map(|name| {
                    name.parse::<Easing>()
                        .with_context(|| format!("Invalid --only value `{}`", name))
                })
                .transpose()?;
            demos::easings(&mut out, &config, only)?;
        }
        Command::Loop { count } => demos::counted_loop(&mut out, &config, count)?,
        Command::Yoyo => demos::yoyo(&mut out, &config)?,
        Command::Multi => demos::multi(&mut out, &config)?,
        Command::Path => demos::path(&mut out, &config)?,
    }

    out.flush()?;
    Ok(())
}
