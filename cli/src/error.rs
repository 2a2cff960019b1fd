#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use raml_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// An external command ran but did not succeed.
    #[from(ignore)]
    #[display("Command failed: {}", _0)]
    Command(String),
}

/// Manual implementation of the standard Error trait.
///
/// Implemented by hand because `String` payloads do not implement `std::error::Error`,
/// which breaks the derived `source()`.
impl std::error::Error for CliError {}

impl From<CliError> for AppError {
    fn from(e: CliError) -> Self {
        match e {
            CliError::Io(io) => AppError::Io(io),
            other => AppError::Provider(other.to_string()),
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_maps_to_provider() {
        let err: AppError = CliError::Command("exit status 255".into()).into();
        match err {
            AppError::Provider(msg) => assert_eq!(msg, "Command failed: exit status 255"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_io_error_stays_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "aws");
        let err: AppError = CliError::from(io).into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
