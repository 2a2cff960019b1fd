//! # Error Handling
//!
//! Provides the unified `AppError` enum shared by the core library and the CLI.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Only `std::io::Error` and `String` convert implicitly; `String` lands in `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The service manifest could not be parsed or has an unexpected shape.
    #[from(ignore)]
    #[display("Manifest Error: {_0}")]
    Manifest(String),

    /// An HTTP trigger is missing the data needed to place it in the document.
    #[from(ignore)]
    #[display("Malformed trigger declaration in function '{function}': {reason}")]
    MalformedTrigger {
        /// Name of the function owning the trigger.
        function: String,
        /// What is missing or invalid.
        reason: String,
    },

    /// The infrastructure query could not be completed.
    #[from(ignore)]
    #[display("Provider Error: {_0}")]
    Provider(String),

    /// The assembled document could not be dumped as YAML.
    #[from(ignore)]
    #[display("Serialization Error: {_0}")]
    Serialize(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::NotFound, "serverless.yml");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String defaults to General, never to one of the tagged variants
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_malformed_trigger_display() {
        let app_err = AppError::MalformedTrigger {
            function: "users".into(),
            reason: "http event has no path".into(),
        };
        assert_eq!(
            app_err.to_string(),
            "Malformed trigger declaration in function 'users': http event has no path"
        );
    }
}
