//! Configuration for the planet generator.
//!
//! Settings persist to disk as `config.ron` in the user's config directory,
//! can be overridden from the command line, and tolerate missing or unknown
//! fields so older and newer files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GenerationConfig, OutputConfig, default_config_dir};
pub use error::ConfigError;
