#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use induce_core::{AppError, PayloadRole};
use std::path::PathBuf;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Document assembly failed (validation, serialization).
    #[display("{}", describe_core(_0))]
    Core(AppError),

    /// An example payload file could not be read.
    #[from(ignore)]
    #[display("Error reading {role} file {}\n{source}", path.display())]
    ReadInput {
        /// Which payload was being read.
        role: PayloadRole,
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[from(ignore)]
    #[display("Error writing output file {}\n{source}", path.display())]
    WriteOutput {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

fn describe_core(err: &AppError) -> String {
    match err {
        AppError::Validation(msg) => format!("OpenAPI validation error\n{}", msg),
        other => other.to_string(),
    }
}

/// Manual implementation of the standard Error trait.
///
/// The `source` fields are plain data here, so deriving `Error` would wire up
/// `source()` for some variants and not others.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_validation_message() {
        let err: CliError = AppError::Validation("Path 'x' must begin with '/'".into()).into();
        assert_eq!(
            err.to_string(),
            "OpenAPI validation error\nPath 'x' must begin with '/'"
        );
    }

    #[test]
    fn test_read_input_message() {
        let err = CliError::ReadInput {
            role: PayloadRole::Response,
            path: PathBuf::from("missing.json"),
            source: Error::new(ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Error reading response file missing.json\nnot found"
        );
    }
}
