//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only hard failures live here. A payload that cannot be decoded is not an
//! error: the builder degrades to a document without that schema and records
//! a [`crate::builder::BuildWarning`] instead.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// String errors default to `General`; validation and serialization failures
/// must be constructed explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The assembled document does not conform to the OpenAPI specification.
    ///
    /// Carries the validator's message verbatim.
    #[from(ignore)]
    #[display("{_0}")]
    Validation(String),

    /// The document could not be rendered to JSON or YAML.
    #[from(ignore)]
    #[display("Serialization Error: {_0}")]
    Serialization(String),

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
        let io_err = Error::new(ErrorKind::NotFound, "missing");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String converts to General, never to Validation
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let app_err = AppError::Validation("Response code '42' is not valid".into());
        assert_eq!(app_err.to_string(), "Response code '42' is not valid");
    }
}
