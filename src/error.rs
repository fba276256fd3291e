//! @ai:module:intent Define error types for show-command extraction
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use crate::device::DeviceError;
use crate::schema::Violation;
use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all parsing operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("No parser for command: {0}")]
    UnknownCommand(String),

    #[error("No output to parse: pass --input or --replay-dir")]
    NoInput,

    #[error("Command `{command}` needs parameter `{parameter}`")]
    MissingParameter { command: String, parameter: String },

    #[error("Output of `{command}` was not recognized: no line matched")]
    EmptyOutput { command: String },

    #[error("Output of `{command}` does not match its schema: {}", summarize(.violations))]
    Schema {
        command: String,
        violations: Vec<Violation>,
    },

    #[error("No `{slot}` was established by an earlier line")]
    MissingContext { slot: &'static str },

    #[error("Capture group `{0}` did not participate in the match")]
    MissingField(&'static str),

    #[error("Field `{field}` is not a number: {text:?}")]
    InvalidNumber { field: &'static str, text: String },

    #[error("Field `{field}` is not a boolean: {text:?}")]
    InvalidBool { field: &'static str, text: String },

    #[error("Rule `{rule}` failed on line {line}: {source}")]
    Rule {
        rule: &'static str,
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// @ai:intent True for failures that mean the output was not recognized, as opposed to usage or I/O errors
    pub fn is_recognition_failure(&self) -> bool {
        matches!(
            self,
            Error::EmptyOutput { .. } | Error::Schema { .. } | Error::Rule { .. }
        )
    }
}

fn summarize(violations: &[Violation]) -> String {
    match violations {
        [] => "no violations".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
