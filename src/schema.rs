//! Fixed feature schema the fitted artifacts were trained on

/// Number of feature slots expected by the scaler and classifier.
pub const NUM_FEATURES: usize = 15;

/// Ordered feature names matching the training schema.
///
/// The order was fixed when the artifacts were fitted and is never derived
/// from input records at runtime: slot `i` of every feature vector
/// corresponds to `FEATURE_NAMES[i]`. 8 numeric attributes, then the
/// prepaid plan indicator, then the 6 device-brand indicators.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "avg_data_usage_gb",
    "pct_video_usage",
    "avg_call_duration",
    "sms_freq",
    "monthly_spend",
    "topup_freq",
    "travel_score",
    "complaint_count",
    "plan_type_Prepaid",
    "device_brand_Huawei",
    "device_brand_Oppo",
    "device_brand_Realme",
    "device_brand_Samsung",
    "device_brand_Vivo",
    "device_brand_Xiaomi",
];

/// Slot holding the prepaid plan indicator.
pub const PLAN_PREPAID_SLOT: usize = 8;

/// Plan value that sets the prepaid indicator.
pub const PREPAID_PLAN: &str = "Prepaid";

/// Implicit reference category for `plan_type`. It has no slot of its own:
/// a zero prepaid indicator means this plan.
pub const REFERENCE_PLAN: &str = "Postpaid";

/// Brand assumed when a record omits `device_brand`.
pub const DEFAULT_BRAND: &str = "Samsung";

/// Prefix composing a brand value into its indicator slot name.
pub const BRAND_SLOT_PREFIX: &str = "device_brand_";

/// Resolve the indicator slot for a device brand, if the brand is in the
/// trained vocabulary. A brand with no slot leaves the whole brand block
/// zero, which the artifacts cannot tell apart from a dropped reference
/// brand.
pub fn brand_slot(brand: &str) -> Option<usize> {
    FEATURE_NAMES
        .iter()
        .position(|name| name.strip_prefix(BRAND_SLOT_PREFIX) == Some(brand))
}
