use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Which rendering pipelines to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pipeline {
    Photon,
    Path,
    Both,
}

impl Pipeline {
    pub fn runs_photon(self) -> bool {
        matches!(self, Pipeline::Photon | Pipeline::Both)
    }

    pub fn runs_path(self) -> bool {
        matches!(self, Pipeline::Path | Pipeline::Both)
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lux")]
#[command(about = "Progressive photon-map and path-traced rendering of a demo room")]
pub struct Args {
    /// Render settings (JSON); built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pipelines to run
    #[arg(short, long, value_enum, default_value = "both")]
    pub pipeline: Pipeline,

    /// Directory the PNG frames are written to
    #[arg(short, long, default_value = "out")]
    pub output: PathBuf,

    /// Override the configured RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the configured image size (power of two)
    #[arg(long)]
    pub size: Option<u32>,

    /// Image file used to texture the floor
    #[arg(long)]
    pub floor_texture: Option<PathBuf>,

    /// Write an in-progress frame every N steps (0 writes only the final frame)
    #[arg(long, default_value = "0")]
    pub snapshot_every: usize,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
