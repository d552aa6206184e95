//! Errors raised while reading or writing `config.ron`.

use std::path::PathBuf;

/// Errors that can occur when loading, saving, or parsing the generator config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config directory or file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Directory or file that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid generator config.
    #[error("malformed config {}: {source}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// RON error with the offending position.
        #[source]
        source: ron::error::SpannedError,
    },

    /// The in-memory config could not be serialized to RON.
    #[error("cannot serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
