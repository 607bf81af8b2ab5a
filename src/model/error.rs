//! Error types for the spots binary and its ambient layers.
//!
//! The composition core itself never fails: malformed documents decode to
//! nothing, unknown identifiers resolve to nothing and unknown kinds fall
//! back to the default kind. Errors only exist at the edges, where a
//! document is read, configuration is loaded or logging is installed.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`InputError`] - Reading or decoding the document text
//!   - [`ConfigError`](crate::config::ConfigError) - Config file problems
//!   - [`LoggingError`](crate::logging::LoggingError) - Subscriber setup
//!   - [`FactoryError`](crate::factory::FactoryError) - Startup registration mistakes

use crate::config::ConfigError;
use crate::factory::FactoryError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the input document.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Failed to load configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to install the tracing subscriber.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The kind dispatch table was set up incorrectly.
    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),

    /// Writing the report failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when reading a document from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified document does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// The document text is not JSON at all.
    ///
    /// Structurally valid JSON with the wrong shape is not an error; it
    /// simply produces no components.
    #[error("Invalid JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
