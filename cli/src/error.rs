#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use svcgen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Failure reported by the generator library.
    #[display("{}", _0)]
    App(AppError),

    /// JSON report could not be encoded.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// `General(String)` holds a `String`, which is not an `Error`, so `source()`
/// cannot be derived.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_is_shown_verbatim() {
        let err: CliError = AppError::Config("bad marker".into()).into();
        assert_eq!(err.to_string(), "Config Error: bad marker");
    }

    #[test]
    fn test_walk_error_becomes_io() {
        let missing = walkdir::WalkDir::new("/definitely/not/here")
            .into_iter()
            .find_map(Result::err)
            .unwrap();
        let err: CliError = std::io::Error::from(missing).into();
        assert!(matches!(err, CliError::Io(_)));
    }
}
