use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use sign_range::io::{report_path, EstimateReport, LidarEstimateConfig, StereoEstimateConfig};
use sign_range::synthetic::SyntheticScene;
use sign_range::{CameraBaseline, EstimateSource, FieldOfView};

#[cfg(not(feature = "tracing"))]
use log::{debug, info, warn};
#[cfg(feature = "tracing")]
use tracing::{debug, info, warn};

#[cfg(feature = "tracing")]
use sign_range::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use sign_range::core::init_with_level;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Range and bearing to a detected marker.
#[derive(Debug, Parser)]
#[command(name = "sign-range", version, about)]
struct Cli {
    /// Log level on stderr (`RUST_LOG` overrides it with tracing).
    #[arg(long, global = true, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,

    /// Emit JSON log lines.
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fuse a located centroid with a lidar scan.
    Lidar {
        /// JSON config file.
        config: PathBuf,
        /// Report path; overrides `output_path` in the config.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Triangulate a marker seen by both cameras of a stereo pair.
    Stereo {
        config: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run both pipelines against a synthetic marker.
    Simulate {
        /// Lateral marker offset, left positive.
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Forward marker distance.
        #[arg(long)]
        z: f64,
        #[arg(long, default_value_t = 0.2)]
        baseline: f64,
        #[arg(long, default_value_t = 60.0)]
        fov_deg: f64,
        #[arg(long, default_value_t = 640)]
        width: usize,
        #[arg(long, default_value_t = 480)]
        height: usize,
        /// Also write `lidar.json` and `stereo.json` configs for the scene.
        #[arg(long)]
        emit_configs: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level `{raw}` (off, error, warn, info, debug, trace)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> CliResult<()> {
    #[cfg(not(feature = "tracing"))]
    init_with_level(cli.log_level).map_err(|e| e.to_string())?;

    #[cfg(feature = "tracing")]
    init_tracing(cli.log_level, cli.json_logs)?;

    Ok(())
}

/// Returns whether every estimate succeeded.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(command)))]
fn run(command: Command) -> CliResult<bool> {
    match command {
        Command::Lidar { config, out } => {
            let cfg = LidarEstimateConfig::load_json(&config)?;
            info!("loaded lidar config {}", config.display());
            let report =
                EstimateReport::new(EstimateSource::Lidar, Some(&config)).with_outcome(cfg.run());
            let target = report_path(out.as_deref(), cfg.output_path.as_deref());
            emit_estimate(&report, target.as_deref())
        }
        Command::Stereo { config, out } => {
            let cfg = StereoEstimateConfig::load_json(&config)?;
            info!("loaded stereo config {}", config.display());
            let report =
                EstimateReport::new(EstimateSource::Stereo, Some(&config)).with_outcome(cfg.run());
            let target = report_path(out.as_deref(), cfg.output_path.as_deref());
            emit_estimate(&report, target.as_deref())
        }
        Command::Simulate {
            x,
            z,
            baseline,
            fov_deg,
            width,
            height,
            emit_configs,
            out,
        } => {
            let mut scene = SyntheticScene::new(x, z)?;
            scene.baseline = CameraBaseline::new(baseline)?;
            scene.fov = FieldOfView::from_degrees(fov_deg)?;
            scene.image_width = width;
            scene.image_height = height;

            if let Some(dir) = emit_configs {
                scene.lidar_config()?.write_json(dir.join("lidar.json"))?;
                scene.stereo_config()?.write_json(dir.join("stereo.json"))?;
                info!("wrote scene configs to {}", dir.display());
            }

            let report = scene.simulate();
            let ok = report.stereo.is_ok() && report.lidar.is_ok();
            emit(&report, out.as_deref())?;
            Ok(ok)
        }
    }
}

fn emit_estimate(report: &EstimateReport, path: Option<&Path>) -> CliResult<bool> {
    match (&report.result, &report.error) {
        (Some(res), _) => debug!(
            "distance={:.4} bearing={:.3}deg",
            res.distance, res.bearing_deg
        ),
        (None, Some(err)) => warn!("estimate failed: {err}"),
        (None, None) => {}
    }
    emit(report, path)?;
    Ok(report.is_ok())
}

fn emit<T: Serialize>(value: &T, path: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
            info!("wrote report JSON to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
