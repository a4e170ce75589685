//! OfferForge: telco offer recommendation from fitted model artifacts
//!
//! This library turns a single customer-attribute record into a ranked,
//! confidence-bucketed list of offer recommendations using three
//! independently fitted artifacts: a feature scaler, a multi-class
//! probabilistic classifier, and a label encoder. The record is mapped
//! onto the fixed training schema, scaled, scored to a full
//! class-probability distribution, and reported as the top offers.

pub mod artifacts;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod rank;
pub mod record;
pub mod schema;
pub mod vectorize;

// Re-export public items for easier access
pub use artifacts::{LabelEncoder, SoftmaxClassifier, StandardScaler};
pub use cli::Args;
pub use error::{PipelineError, Result};
pub use pipeline::{OfferPipeline, Response};
pub use rank::{Confidence, PredictionResult, Recommendation};
pub use record::CustomerRecord;
pub use vectorize::vectorize;
