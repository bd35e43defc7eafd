//! gesture_racer — interactive entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gesture_racer::{run, AppConfig, KeyBackendKind, RunOptions, TrackerKind};

#[derive(Debug, Parser)]
#[command(name = "gesture_racer", version, about = "Drive a racing game with a two-hand steering wheel")]
struct Args {
    /// TOML config file; missing keys keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore --config and start with built-in defaults.
    #[arg(long)]
    quick: bool,

    /// Theme name (e.g. holo_flux, neo_green, dark_cyan).
    #[arg(long)]
    theme: Option<String>,

    /// Start with the debug overlay hidden.
    #[arg(long)]
    no_debug: bool,

    #[arg(long, value_enum, default_value_t = TrackerKind::Sim)]
    tracker: TrackerKind,

    #[arg(long, value_enum, default_value_t = KeyBackendKind::Log)]
    keys: KeyBackendKind,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// Log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mut cfg = match (&args.config, args.quick) {
        (Some(path), false) => match AppConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        _ => AppConfig::default(),
    };
    if let Some(theme) = args.theme {
        cfg.theme_name = theme;
    }
    if args.no_debug {
        cfg.show_debug = false;
    }

    if args.print_config {
        match cfg.to_toml_string() {
            Ok(text) => {
                print!("{}", text);
                return;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Gesture Racer — Two-Hand Steering Wheel Control       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    if args.config.is_none() || args.quick {
        println!("  Quick-start: built-in defaults\n");
    }
    match args.tracker {
        TrackerKind::Sim  => println!("  Tracker: keyboard simulation  (N hands, ←/→ tilt, ↑/↓ spread, Space pinch)"),
        TrackerKind::Leap => println!("  Tracker: LeapMotion hardware"),
    }
    println!("  Keys:    {:?} → forward {}  left {}  back {}  right {}",
        args.keys,
        cfg.movement_keys.forward, cfg.movement_keys.left,
        cfg.movement_keys.back, cfg.movement_keys.right);
    println!("  Theme:   {}   Gain {:.2}   Deadband {:.0}°   Smoothing {:.2}",
        cfg.theme_name, cfg.steering_gain, cfg.turn_deadband_deg, cfg.smoothing_alpha_angle);
    println!();
    println!("  Opening window…  (q quits, t/d themes, -/= gain, [/] deadband, ,/. smoothing, h debug, r reset)");
    println!();

    let opts = RunOptions { tracker: args.tracker, keys: args.keys };
    if let Err(e) = run(cfg, opts) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
