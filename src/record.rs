//! Customer record ingestion

use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::schema;

/// A single customer-attribute record as supplied by the caller.
///
/// Any subset of the recognized attributes may be present. Unrecognized
/// keys are ignored, and each missing attribute takes the default declared
/// on its field: 0 for the numeric attributes,
/// [`schema::REFERENCE_PLAN`] for `plan_type`, and
/// [`schema::DEFAULT_BRAND`] for `device_brand`. A value of the wrong type
/// (e.g. a string where a number belongs) rejects the whole record at the
/// parse boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRecord {
    #[serde(default)]
    pub avg_data_usage_gb: f64,
    #[serde(default)]
    pub pct_video_usage: f64,
    #[serde(default)]
    pub avg_call_duration: f64,
    #[serde(default)]
    pub sms_freq: f64,
    #[serde(default)]
    pub monthly_spend: f64,
    #[serde(default)]
    pub topup_freq: f64,
    #[serde(default)]
    pub travel_score: f64,
    #[serde(default)]
    pub complaint_count: f64,
    /// Plan name. Anything other than [`schema::PREPAID_PLAN`] is treated
    /// as the reference plan.
    #[serde(default = "default_plan")]
    pub plan_type: String,
    /// Device brand name, matched against the trained brand vocabulary.
    #[serde(default = "default_brand")]
    pub device_brand: String,
}

fn default_plan() -> String {
    schema::REFERENCE_PLAN.to_string()
}

fn default_brand() -> String {
    schema::DEFAULT_BRAND.to_string()
}

impl Default for CustomerRecord {
    fn default() -> Self {
        CustomerRecord {
            avg_data_usage_gb: 0.0,
            pct_video_usage: 0.0,
            avg_call_duration: 0.0,
            sms_freq: 0.0,
            monthly_spend: 0.0,
            topup_freq: 0.0,
            travel_score: 0.0,
            complaint_count: 0.0,
            plan_type: default_plan(),
            device_brand: default_brand(),
        }
    }
}

impl CustomerRecord {
    /// Parse a record from its JSON encoding.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| PipelineError::InputFormat(e.to_string()))
    }
}
