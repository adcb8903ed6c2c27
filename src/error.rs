// SPDX-License-Identifier: MIT

//! Typed error handling for flowgen-rs
//!
//! This module provides the error type hierarchy using thiserror.
//! Validation and emission failures are always surfaced to the caller,
//! never logged-and-swallowed.

use thiserror::Error;

/// Top-level error type for flowgen-rs
#[derive(Debug, Error)]
pub enum FlowgenError {
    /// Graph validation failures raised by the spec compiler
    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),

    /// Code emission failures (local or remote)
    #[error("Code generation failed: {0}")]
    Emit(#[from] EmitError),

    /// Artifact packaging failures
    #[error("Packaging failed: {0}")]
    Bundle(#[from] BundleError),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Generic error wrapper for compatibility
    #[error("{0}")]
    Other(String),
}

/// Graph validation errors.
///
/// Any of these means the graph cannot be compiled: the compiler
/// produces no partial spec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No source node in the graph
    #[error("graph has no source node")]
    MissingSource,

    /// No end node in the graph
    #[error("graph has no end node")]
    MissingEnd,

    /// More than one source node
    #[error("graph has {0} source nodes, expected exactly one")]
    MultipleSources(usize),

    /// More than one end node
    #[error("graph has {0} end nodes, expected exactly one")]
    MultipleEnds(usize),

    /// An edge references a node id that does not exist
    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownNode { edge: String, node: String },

    /// No directed path connects the source node to the end node
    #[error("no path connects the source node to the end node")]
    Unreachable,

    /// Two distinct custom nodes normalize to the same label
    #[error("nodes '{first}' and '{second}' both resolve to the label '{label}'")]
    AmbiguousLabel {
        label: String,
        first: String,
        second: String,
    },
}

/// Code emission errors.
///
/// Remote failures are reported per language request; a failed language
/// never suppresses another language's success, and the compiled spec
/// remains valid for resubmission.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Non-success response from the generation service
    #[error("generation service responded with status {status}: {message}")]
    RemoteGeneration { status: u16, message: String },

    /// Response body did not match the service contract
    #[error("generation service returned a malformed body: {0}")]
    MalformedResponse(String),

    /// Transport-level HTTP failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Artifact packaging errors
#[derive(Debug, Error)]
pub enum BundleError {
    /// Archive writer failure
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O failure while assembling the archive
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FlowgenError {
    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<&str> for FlowgenError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for FlowgenError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}
