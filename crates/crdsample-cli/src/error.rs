//! CLI error types with exit code handling

use crdsample_core::SampleError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI error carrying enough information to pick an exit code
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Input was not a usable CRD
    #[error("Invalid input: {message}")]
    #[diagnostic(code(crdsample::cli::input))]
    Input {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Walking a schema failed
    #[error("Generation failed: {message}")]
    #[diagnostic(code(crdsample::cli::generate))]
    Generate {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Options file could not be loaded
    #[error("Config error: {message}")]
    #[diagnostic(code(crdsample::cli::config))]
    Config { message: String },

    /// IO error (file not found, permissions, closed pipe)
    #[error("IO error: {message}")]
    #[diagnostic(code(crdsample::cli::io))]
    Io { message: String },

    /// Anything else
    #[error("{message}")]
    #[diagnostic(code(crdsample::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::Generate { .. } => exit_codes::GENERATE_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: None,
        }
    }

    pub fn input_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<SampleError> for CliError {
    fn from(err: SampleError) -> Self {
        match err {
            SampleError::DepthExceeded { max, .. } => CliError::Generate {
                message: err.to_string(),
                help: Some(format!(
                    "raise `maxDepth` above {} in the options file if the schema is legitimately this deep",
                    max
                )),
            },
            SampleError::InvalidCrd(_) | SampleError::Serialization(_) => {
                CliError::input(err.to_string())
            }
            SampleError::Io(ref e) => CliError::Io {
                message: e.to_string(),
            },
            err if err.is_output_error() => CliError::Io {
                message: err.to_string(),
            },
            err => CliError::other(err.to_string()),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
