#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Input document was not valid JSON.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// Input document was not valid YAML.
    #[display("YAML Error: {}", _0)]
    Yaml(serde_yaml::Error),

    /// The engine reported a fatal generation error.
    #[display("Generation failed: {}", _0)]
    Generation(tsgen_core::AppError),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
