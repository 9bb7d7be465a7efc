//! Glide CLI
//!
//! Run the scroll demo and inspect easing curves.

use anyhow::Result;
use clap::{Parser, Subcommand};
use glide_animation::{Easing, Pacing};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod demo;

use config::{GlideConfig, CONFIG_FILE};
use demo::DemoOptions;

#[derive(Parser)]
#[command(name = "glide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Smooth scroll animation toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll a simulated list and log every frame
    Demo {
        /// Vertical offset to scroll to
        #[arg(long)]
        to_y: Option<f32>,

        /// Animation duration in milliseconds (0 applies instantly)
        #[arg(short, long)]
        duration_ms: Option<u64>,

        /// Easing curve, e.g. sine-in-out
        #[arg(short, long)]
        easing: Option<Easing>,

        /// Config file or directory containing glide.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run frames back to back instead of in real time
        #[arg(long)]
        fast: bool,
    },

    /// List available easing curves
    Easings,

    /// Print normalized samples of an easing curve
    Sample {
        /// Easing curve name
        easing: Easing,

        /// Number of intervals between 0 and 1
        #[arg(short, long, default_value = "10")]
        steps: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a starter glide.toml
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Demo {
            to_y,
            duration_ms,
            easing,
            config,
            fast,
        } => cmd_demo(to_y, duration_ms, easing, config, fast),

        Commands::Easings => cmd_easings(),

        Commands::Sample {
            easing,
            steps,
            json,
        } => cmd_sample(easing, steps, json),

        Commands::Init { path, force } => cmd_init(path, force),
    }
}

fn cmd_demo(
    to_y: Option<f32>,
    duration_ms: Option<u64>,
    easing: Option<Easing>,
    config: Option<PathBuf>,
    fast: bool,
) -> Result<()> {
    let config = GlideConfig::load(config.as_deref())?;

    let report = demo::run(
        &config,
        DemoOptions {
            scroll_to: to_y,
            duration: duration_ms.map(Duration::from_millis),
            easing,
            pacing: Some(if fast {
                Pacing::Simulated
            } else {
                Pacing::RealTime
            }),
        },
    )?;

    if !report.completed {
        anyhow::bail!(
            "Animation did not finish within {} frames (stopped at y={})",
            report.frames,
            report.final_offset.y
        );
    }

    info!(
        "Done in {} frames, final offset ({}, {})",
        report.frames, report.final_offset.x, report.final_offset.y
    );
    Ok(())
}

fn cmd_easings() -> Result<()> {
    for easing in Easing::ALL {
        println!("{}", easing);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SamplePoint {
    progress: f32,
    value: f32,
}

fn sample(easing: Easing, steps: u32) -> Vec<SamplePoint> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let progress = i as f32 / steps as f32;
            SamplePoint {
                progress,
                value: easing.apply(progress),
            }
        })
        .collect()
}

fn cmd_sample(easing: Easing, steps: u32, json: bool) -> Result<()> {
    let points = sample(easing, steps);

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("{}", easing);
    for point in &points {
        let bar = "#".repeat((point.value.clamp(0.0, 1.0) * 40.0).round() as usize);
        println!("  {:>5.2}  {:>8.4}  {}", point.progress, point.value, bar);
    }
    Ok(())
}

fn cmd_init(path: PathBuf, force: bool) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::create_dir_all(&path)?;
    fs::write(&config_path, GlideConfig::starter().to_toml()?)?;
    info!("Wrote {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_covers_both_ends() {
        let points = sample(Easing::QuadIn, 4);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].value, 0.0);
        assert_eq!(points[2].value, 0.25);
        assert_eq!(points[4].value, 1.0);
    }

    #[test]
    fn test_cli_parses_easing_names() {
        let cli = Cli::try_parse_from(["glide", "demo", "--easing", "sineInOut", "--fast"]).unwrap();
        match cli.command {
            Commands::Demo { easing, fast, .. } => {
                assert_eq!(easing, Some(Easing::SineInOut));
                assert!(fast);
            }
            _ => panic!("expected demo command"),
        }

        assert!(Cli::try_parse_from(["glide", "sample", "wobble"]).is_err());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        cmd_init(dir.path().to_path_buf(), false).unwrap();
        assert!(cmd_init(dir.path().to_path_buf(), false).is_err());
        cmd_init(dir.path().to_path_buf(), true).unwrap();

        let loaded = GlideConfig::load(Some(dir.path())).unwrap();
        assert_eq!(loaded.animation.default_easing, Easing::SineInOut);
    }
}
