//! Exercise form analysis over recorded pose landmarks.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use exercise_form::{
    config::{Config, EXAMPLE_CONFIG},
    export::{write_angles_csv, write_summary_yaml},
    input::{read_frames, ImageSize},
    landmarks::Side,
    session::SessionAnalyzer,
};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Landmark input in JSON Lines format ("-" for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Exercise to analyze (bicep_curl, tricep_curl, lateral_raise, push_up)
    #[arg(short, long)]
    exercise: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Frame rate of the recording, used to derive the rep debounce gap
    #[arg(long)]
    fps: Option<f64>,

    /// Smoothing method (savgol, ema, none)
    #[arg(short, long)]
    smoothing: Option<String>,

    /// Landmark coordinates are normalized to [0, 1]
    #[arg(long, requires_all = ["width", "height"])]
    normalized: bool,

    /// Image width used to scale normalized coordinates
    #[arg(long, requires = "normalized")]
    width: Option<f64>,

    /// Image height used to scale normalized coordinates
    #[arg(long, requires = "normalized")]
    height: Option<f64>,

    /// Per-frame CSV output (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the session summary as YAML
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print an example configuration file and exit
    #[arg(long)]
    example_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.example_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = build_config(&args)?;
    let mut session = SessionAnalyzer::from_config(&config).context("Invalid configuration")?;

    let scale = match (args.normalized, args.width, args.height) {
        (true, Some(width), Some(height)) => Some(ImageSize { width, height }),
        _ => None,
    };

    let frames = if args.input == "-" {
        info!("Reading landmarks from stdin");
        read_frames(io::stdin().lock(), scale)
    } else {
        info!("Reading landmarks from: {}", args.input);
        let file = File::open(&args.input).with_context(|| format!("Failed to open {}", args.input))?;
        read_frames(BufReader::new(file), scale)
    }
    .context("Failed to read landmarks")?;

    let mut failed_frames = 0usize;
    for frame in &frames {
        let record = session.process_frame(frame.as_ref());
        failed_frames += record.verdicts.iter().filter(|v| !v.ok).count().min(1);
    }
    if failed_frames > 0 {
        info!("{} of {} frames had at least one form issue", failed_frames, frames.len());
    }

    let report = session.finish();
    for side in Side::BOTH {
        let limb = report.limbs.get(side);
        if let Some(reason) = limb.smoothed.degrade_reason() {
            warn!("{} angles were not smoothed: {}", side, reason);
        }
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            write_angles_csv(BufWriter::new(file), &report)?;
            info!("Per-frame angles written to: {}", path.display());
        }
        None => write_angles_csv(io::stdout().lock(), &report)?,
    }

    let summary = report.summary();
    info!(
        "Summary: frames={}, reps_left={}, reps_right={}, left_mean_angle={}, right_mean_angle={}",
        summary.frames,
        summary.reps_left,
        summary.reps_right,
        format_angle(summary.left_mean_angle),
        format_angle(summary.right_mean_angle)
    );

    if let Some(path) = &args.summary {
        let mut file =
            BufWriter::new(File::create(path).with_context(|| format!("Failed to create {}", path.display()))?);
        write_summary_yaml(&mut file, &summary)?;
        file.flush()?;
        info!("Summary written to: {}", path.display());
    }

    Ok(())
}

/// Merge the configuration file with command line overrides
fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path).with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(exercise) = &args.exercise {
        config.exercise.clone_from(exercise);
    }
    if let Some(fps) = args.fps {
        config.counter.fps = fps;
    }
    if let Some(method) = &args.smoothing {
        config.smoothing.method.clone_from(method);
    }

    Ok(config)
}

fn format_angle(angle: Option<f64>) -> String {
    angle.map_or_else(|| "n/a".to_string(), |a| format!("{a:.1}"))
}
