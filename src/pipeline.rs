//! End-to-end prediction pipeline and the response envelope

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::artifacts::{LabelEncoder, SoftmaxClassifier, StandardScaler};
use crate::error::{PipelineError, Result};
use crate::rank::{self, PredictionResult};
use crate::record::CustomerRecord;
use crate::vectorize::vectorize;

/// The assembled inference pipeline: one fitted scaler, classifier, and
/// label vocabulary, cross-checked against each other when assembled.
///
/// Artifacts are read-only after load. Every method takes `&self` and the
/// pipeline holds no per-request state, so one instance can be shared by
/// reference across threads in a long-lived host.
#[derive(Debug, Clone)]
pub struct OfferPipeline {
    scaler: StandardScaler,
    classifier: SoftmaxClassifier,
    encoder: LabelEncoder,
}

impl OfferPipeline {
    /// Assemble a pipeline from already-loaded artifacts.
    ///
    /// The label vocabulary must name exactly one offer per classifier
    /// class; the individual artifacts have already been validated against
    /// the feature schema by their loaders.
    pub fn new(
        scaler: StandardScaler,
        classifier: SoftmaxClassifier,
        encoder: LabelEncoder,
    ) -> Result<Self> {
        if encoder.n_classes() != classifier.n_classes() {
            return Err(PipelineError::schema_mismatch(format!(
                "label vocabulary names {} offers, classifier predicts {} classes",
                encoder.n_classes(),
                classifier.n_classes(),
            )));
        }
        Ok(OfferPipeline {
            scaler,
            classifier,
            encoder,
        })
    }

    /// Load the three artifact files and assemble the pipeline.
    pub fn from_artifact_files(model: &Path, scaler: &Path, encoder: &Path) -> Result<Self> {
        let classifier = SoftmaxClassifier::load(model)?;
        let scaler = StandardScaler::load(scaler)?;
        let encoder = LabelEncoder::load(encoder)?;
        OfferPipeline::new(scaler, classifier, encoder)
    }

    /// Score one record: vectorize, scale, classify, rank.
    ///
    /// Runs strictly in sequence with no retries and no partial results;
    /// the first failing stage aborts the request.
    pub fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult> {
        let features = vectorize(record);
        let scaled = self.scaler.transform(&features);
        let (predicted, distribution) = self.classifier.predict(&scaled)?;
        debug!(predicted, "classifier produced distribution");
        rank::build_result(predicted, &distribution, &self.encoder)
    }
}

/// Envelope written to stdout: either a prediction or a structured error.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Success { prediction: PredictionResult },
    Error { message: String, error_type: String },
}

impl Response {
    /// Build the error envelope for any pipeline failure.
    pub fn failure(err: &PipelineError) -> Self {
        Response::Error {
            message: err.to_string(),
            error_type: err.kind().to_string(),
        }
    }
}

impl From<Result<PredictionResult>> for Response {
    fn from(outcome: Result<PredictionResult>) -> Self {
        match outcome {
            Ok(prediction) => Response::Success { prediction },
            Err(err) => Response::failure(&err),
        }
    }
}
