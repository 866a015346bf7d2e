use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
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

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "prismray")]
#[command(about = "A scene-file raytracer with analytic primitives")]
pub struct Args {
    /// Input scene description file
    pub scene: String,

    /// Output image path (.png and .exr by extension, binary PPM otherwise)
    pub output: String,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,
}
