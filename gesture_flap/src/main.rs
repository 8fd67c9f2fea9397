//! gesture_flap — interactive entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gesture_flap::{run, AppConfig, Overrides};

#[derive(Parser, Debug)]
#[command(name = "gesture_flap", version, about = "Flappy-style game steered by hand gestures")]
struct Args {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Landmark detector command and its arguments.  Must come last.
    #[arg(long, value_name = "CMD", num_args = 1.., allow_hyphen_values = true)]
    landmarks: Option<Vec<String>>,

    /// Seed for obstacle placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Ignore any configured detector; keyboard only.
    #[arg(long)]
    no_camera: bool,

    /// Window magnification (1, 2 or 4).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    scale: Option<u8>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            landmark_command: self.landmarks.clone(),
            seed:             self.seed,
            window_scale:     self.scale,
            no_camera:        self.no_camera,
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = try_main(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn try_main(args: Args) -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_default(args.config.as_deref())?.apply(args.overrides());
    init_tracing(&cfg.log_filter);

    println!();
    println!("╔══════════════════════════════════════════════╗");
    println!("║  Gesture Flap — fist to flap, palm to dive   ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();
    if cfg.camera_enabled() {
        println!("  Mode: camera ({})", cfg.landmark_command.join(" "));
    } else {
        println!("  Mode: keyboard simulation  (F = fist, P = palm)");
    }
    println!();

    run(&cfg).context("could not start the game")?;
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured filter, otherwise `info`.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
