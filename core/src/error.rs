//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Contract-shape violations are not errors: they are reported as
//! [`Diagnostic`](crate::validation::Diagnostic) values and never abort a run.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A source file that could not be parsed as Rust.
    #[from(ignore)]
    #[display("Parse Error in {}: {message}", path.display())]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Malformed YAML configuration.
    #[display("Config Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Configuration that parsed but holds unusable values.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// The host asked the pipeline to stop between two contracts.
    #[from(ignore)]
    #[display("Generation cancelled")]
    Cancelled,

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
