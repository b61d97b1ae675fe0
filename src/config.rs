//! Startup configuration.
//!
//! Defaults, overridden by the optional dataset path on the command line
//! and `LAUNCH_DASH_*` environment variables.

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";
pub const DEFAULT_PAYLOAD_STEP: f64 = 1000.0;

/// Interactive dashboard of rocket launch records
#[derive(Debug, Parser)]
#[command(name = "launch-dash", version, about)]
pub struct Cli {
    /// Launch records to load at startup (.csv, .json or .parquet)
    /// [default: spacex_launch_dash.csv, or $LAUNCH_DASH_DATA]
    pub data_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    /// Granularity of the payload range sliders, in kg.
    pub payload_step: f64,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            payload_step: DEFAULT_PAYLOAD_STEP,
            window_size: [1200.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Defaults plus parsed arguments and environment.
    pub fn from_cli(cli: Cli) -> Self {
        let mut config = Self::default();
        config.apply_overrides(
            cli.data_path,
            std::env::var("LAUNCH_DASH_DATA").ok(),
            std::env::var("LAUNCH_DASH_PAYLOAD_STEP").ok(),
        );
        config
    }

    /// The command-line path wins over the environment variable. An
    /// unusable step is ignored.
    fn apply_overrides(
        &mut self,
        arg_path: Option<PathBuf>,
        env_path: Option<String>,
        env_step: Option<String>,
    ) {
        let env_path = env_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        if let Some(path) = arg_path.or(env_path) {
            self.data_path = path;
        }

        if let Some(step) = env_step {
            match step.trim().parse::<f64>() {
                Ok(s) if s.is_finite() && s > 0.0 => self.payload_step = s,
                _ => log::warn!("Ignoring invalid LAUNCH_DASH_PAYLOAD_STEP={step:?}"),
            }
        }
    }
}
