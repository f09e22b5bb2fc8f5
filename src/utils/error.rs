//! Error types for the suggestion pipeline
//!
//! Only generation and parsing failures reach the caller. Documentation
//! lookups have their own [`DocError`] which the pipeline always recovers from.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Fatal failures of a suggestion request
#[derive(Debug, Error)]
pub enum ClaiError {
    /// The engine did not finish before the absolute deadline and was killed
    #[error("generation timed out after {}s", .timeout.as_secs_f32())]
    GenerationTimeout { timeout: Duration },

    /// The engine exited with a non-zero status
    #[error("generation engine failed ({status})\nstderr: {stderr}")]
    GenerationProcessFailure { status: String, stderr: String },

    /// The engine output was not a JSON array of command objects
    #[error("failed to parse engine response: {source}\nraw: {raw}")]
    MalformedResponse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request cancelled")]
    Cancelled,

    #[error("failed to start generation engine: {0}")]
    EngineSpawn(#[source] std::io::Error),

    #[error("failed to write grammar file: {0}")]
    GrammarFile(#[source] std::io::Error),

    #[error("{kind} not found at {}", .path.display())]
    AssetMissing { kind: String, path: PathBuf },
}

impl ClaiError {
    pub fn process_failure(status: ExitStatus, stderr: &[u8]) -> Self {
        ClaiError::GenerationProcessFailure {
            status: status.to_string(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }
}

pub type ClaiResult<T> = std::result::Result<T, ClaiError>;

/// Failures of a single documentation lookup
#[derive(Debug, Error)]
pub enum DocError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
}
