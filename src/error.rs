//! Error types for the offer recommendation pipeline.
//!
//! Every failure a request can hit is represented by [`PipelineError`].
//! The binary converts any variant into the structured error envelope, so
//! each variant carries a stable tag via [`PipelineError::kind`].

use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

/// The error type for pipeline assembly and prediction.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Required invocation inputs were missing or unusable.
    #[error("invalid invocation: {0}")]
    Invocation(String),

    /// A fitted artifact could not be read or deserialized.
    #[error("failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    /// The customer record payload was not a valid JSON object.
    #[error("invalid customer record: {0}")]
    InputFormat(String),

    /// An artifact disagrees with the feature schema or with another
    /// artifact about shape or feature order.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The classifier or scaler failed while scoring a vector.
    #[error("prediction failed: {0}")]
    Prediction(String),

    /// A class index could not be mapped back to an offer name.
    #[error("label decoding failed: {0}")]
    Decode(String),
}

/// Result type alias for operations that may fail with [`PipelineError`].
pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Stable category tag reported as `error_type` in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Invocation(_) => "InvocationError",
            PipelineError::ArtifactLoad { .. } => "ArtifactLoadError",
            PipelineError::InputFormat(_) => "InputFormatError",
            PipelineError::SchemaMismatch(_) => "SchemaMismatchError",
            PipelineError::Prediction(_) => "PredictionError",
            PipelineError::Decode(_) => "DecodeError",
        }
    }

    /// Create a new artifact load error for `path`.
    pub fn artifact_load(path: &Path, reason: impl Display) -> Self {
        PipelineError::ArtifactLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new schema mismatch error.
    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        PipelineError::SchemaMismatch(msg.into())
    }

    /// Create a new prediction error.
    pub fn prediction(msg: impl Into<String>) -> Self {
        PipelineError::Prediction(msg.into())
    }

    /// Create a new label decoding error.
    pub fn decode(msg: impl Into<String>) -> Self {
        PipelineError::Decode(msg.into())
    }
}
