//! Typed adapters over the fitted model artifacts.
//!
//! Each artifact is a JSON export of parameters fitted at training time:
//! per-feature scaling statistics, the multinomial coefficient matrix, and
//! the ordered class vocabulary. The scaler and classifier consume feature
//! vectors purely positionally, so every shape is validated against
//! [`crate::schema`] when the artifact is loaded — a record must never be
//! scored against misaligned statistics.

use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::schema::{FEATURE_NAMES, NUM_FEATURES};

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| PipelineError::artifact_load(path, e))?;
    serde_json::from_str(&raw).map_err(|e| PipelineError::artifact_load(path, e))
}

/// Per-feature standardization statistics fitted on the training set.
///
/// Artifact shape:
///
/// ```json
/// {"feature_names": ["avg_data_usage_gb", ...], "mean": [...], "scale": [...]}
/// ```
///
/// `mean` and `scale` must carry one entry per schema slot, in schema
/// order. `feature_names` is optional; when the export carries it, it must
/// match the compiled schema exactly.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Construct from fitted statistics, validating them against the schema.
    pub fn from_params(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = StandardScaler {
            feature_names: None,
            mean,
            scale,
        };
        scaler.validate()?;
        Ok(scaler)
    }

    /// Load and validate a fitted scaler artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let scaler: StandardScaler = read_artifact(path)?;
        scaler.validate()?;
        debug!(path = %path.display(), "scaler artifact loaded");
        Ok(scaler)
    }

    fn validate(&self) -> Result<()> {
        if self.mean.len() != NUM_FEATURES || self.scale.len() != NUM_FEATURES {
            return Err(PipelineError::schema_mismatch(format!(
                "scaler carries {} mean / {} scale entries, schema expects {NUM_FEATURES}",
                self.mean.len(),
                self.scale.len(),
            )));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != NUM_FEATURES
                || names.iter().zip(FEATURE_NAMES.iter()).any(|(a, b)| a != b)
            {
                return Err(PipelineError::schema_mismatch(
                    "scaler feature names do not match the training schema",
                ));
            }
        }
        if self.mean.iter().any(|m| !m.is_finite())
            || self.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(PipelineError::schema_mismatch(
                "scaler statistics contain non-finite or zero entries",
            ));
        }
        Ok(())
    }

    /// Apply the fitted transform elementwise: `(x[i] - mean[i]) / scale[i]`.
    ///
    /// The input must come from the vectorizer, whose output length is
    /// guaranteed to match the validated statistics.
    pub fn transform(&self, features: &Array1<f64>) -> Array1<f64> {
        debug_assert_eq!(features.len(), self.mean.len());
        features
            .iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((x, m), s)| (x - m) / s)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ClassifierParams {
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

/// Fitted multinomial logistic classifier.
///
/// Artifact shape:
///
/// ```json
/// {"coefficients": [[...15 weights...], ...], "intercepts": [...]}
/// ```
///
/// One coefficient row and one intercept per trained class, rows in the
/// classifier's class order — the same order the label encoder's
/// vocabulary uses.
#[derive(Debug, Clone)]
pub struct SoftmaxClassifier {
    coefficients: Array2<f64>,
    intercepts: Array1<f64>,
}

impl SoftmaxClassifier {
    /// Construct from fitted parameters, validating shapes.
    pub fn from_params(coefficients: Vec<Vec<f64>>, intercepts: Vec<f64>) -> Result<Self> {
        let n_classes = coefficients.len();
        if n_classes == 0 {
            return Err(PipelineError::schema_mismatch(
                "classifier carries no coefficient rows",
            ));
        }
        if intercepts.len() != n_classes {
            return Err(PipelineError::schema_mismatch(format!(
                "classifier has {n_classes} coefficient rows but {} intercepts",
                intercepts.len(),
            )));
        }
        if let Some(row) = coefficients.iter().find(|row| row.len() != NUM_FEATURES) {
            return Err(PipelineError::schema_mismatch(format!(
                "classifier coefficient row has {} entries, schema expects {NUM_FEATURES}",
                row.len(),
            )));
        }
        if coefficients.iter().flatten().any(|w| !w.is_finite())
            || intercepts.iter().any(|b| !b.is_finite())
        {
            return Err(PipelineError::schema_mismatch(
                "classifier parameters contain non-finite entries",
            ));
        }

        let flat: Vec<f64> = coefficients.into_iter().flatten().collect();
        let coefficients = Array2::from_shape_vec((n_classes, NUM_FEATURES), flat)
            .map_err(|e| PipelineError::schema_mismatch(e.to_string()))?;
        Ok(SoftmaxClassifier {
            coefficients,
            intercepts: Array1::from(intercepts),
        })
    }

    /// Load and validate a fitted classifier artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let params: ClassifierParams = read_artifact(path)?;
        let classifier = SoftmaxClassifier::from_params(params.coefficients, params.intercepts)?;
        debug!(
            path = %path.display(),
            classes = classifier.n_classes(),
            "classifier artifact loaded"
        );
        Ok(classifier)
    }

    /// Number of classes the classifier was trained on.
    pub fn n_classes(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Score a scaled feature vector.
    ///
    /// Returns the arg-max class index and the full probability
    /// distribution over all trained classes, in the classifier's class
    /// order. Probabilities come from a max-subtracted softmax, so they
    /// are non-negative and sum to one.
    pub fn predict(&self, scaled: &Array1<f64>) -> Result<(usize, Array1<f64>)> {
        if scaled.len() != self.coefficients.ncols() {
            return Err(PipelineError::prediction(format!(
                "feature vector has {} entries, classifier expects {}",
                scaled.len(),
                self.coefficients.ncols(),
            )));
        }

        let logits = self.coefficients.dot(scaled) + &self.intercepts;
        // Subtracting the max keeps every exponent in range.
        let max_logit = logits.fold(f64::NEG_INFINITY, |m, &z| m.max(z));
        let mut probabilities = logits.mapv(|z| (z - max_logit).exp());
        let total = probabilities.sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(PipelineError::prediction(
                "class scores did not form a valid distribution",
            ));
        }
        probabilities /= total;

        let mut predicted = 0;
        for (index, &p) in probabilities.iter().enumerate() {
            if p > probabilities[predicted] {
                predicted = index;
            }
        }
        Ok((predicted, probabilities))
    }
}

#[derive(Debug, Deserialize)]
struct EncoderParams {
    classes: Vec<String>,
}

/// Ordered class vocabulary from the fitted label encoder.
///
/// Artifact shape: `{"classes": ["Offer A", "Offer B", ...]}` — entry `i`
/// names the classifier's class `i`.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Construct from an ordered vocabulary.
    pub fn from_classes(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(PipelineError::schema_mismatch(
                "label encoder vocabulary is empty",
            ));
        }
        Ok(LabelEncoder { classes })
    }

    /// Load and validate a fitted label-encoder artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let params: EncoderParams = read_artifact(path)?;
        let encoder = LabelEncoder::from_classes(params.classes)?;
        debug!(
            path = %path.display(),
            classes = encoder.n_classes(),
            "label encoder artifact loaded"
        );
        Ok(encoder)
    }

    /// Number of offer names in the vocabulary.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Positional lookup of the offer name for a class index.
    pub fn decode(&self, index: usize) -> Result<&str> {
        self.classes.get(index).map(String::as_str).ok_or_else(|| {
            PipelineError::decode(format!(
                "class index {index} outside vocabulary of {} offers",
                self.classes.len(),
            ))
        })
    }
}
