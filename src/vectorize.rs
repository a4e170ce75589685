//! Record-to-feature-vector construction

use ndarray::Array1;
use tracing::warn;

use crate::record::CustomerRecord;
use crate::schema::{self, NUM_FEATURES};

/// Build the dense feature vector for one record.
///
/// The output always has exactly [`NUM_FEATURES`] entries in schema order,
/// no matter which attributes the record carried. The numeric attributes
/// fill slots 0..8 in training order, `plan_type_Prepaid` is set iff the
/// plan equals the prepaid literal (any other plan is the implicit
/// reference category), and the brand indicator is resolved by composing
/// the slot name from the brand value. A brand outside the trained
/// vocabulary leaves the whole brand block zero.
pub fn vectorize(record: &CustomerRecord) -> Array1<f64> {
    let mut features = Array1::zeros(NUM_FEATURES);

    // Numeric slots, training order.
    features[0] = record.avg_data_usage_gb;
    features[1] = record.pct_video_usage;
    features[2] = record.avg_call_duration;
    features[3] = record.sms_freq;
    features[4] = record.monthly_spend;
    features[5] = record.topup_freq;
    features[6] = record.travel_score;
    features[7] = record.complaint_count;

    if record.plan_type == schema::PREPAID_PLAN {
        features[schema::PLAN_PREPAID_SLOT] = 1.0;
    }

    match schema::brand_slot(&record.device_brand) {
        Some(slot) => features[slot] = 1.0,
        None => warn!(
            brand = %record.device_brand,
            "device brand outside trained vocabulary, brand indicators stay zero"
        ),
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CustomerRecord;
    use crate::schema::PLAN_PREPAID_SLOT;
    use proptest::prelude::*;

    fn brand_block(features: &Array1<f64>) -> Vec<f64> {
        features.iter().skip(PLAN_PREPAID_SLOT + 1).copied().collect()
    }

    #[test]
    fn test_prepaid_oppo_record() {
        let record = CustomerRecord::from_json(
            r#"{"avg_data_usage_gb": 5, "plan_type": "Prepaid", "device_brand": "Oppo"}"#,
        )
        .unwrap();
        let features = vectorize(&record);

        assert_eq!(features.len(), NUM_FEATURES);
        assert_eq!(features[0], 5.0);
        assert_eq!(features[PLAN_PREPAID_SLOT], 1.0);
        assert_eq!(features[10], 1.0); // device_brand_Oppo
        let others: f64 = brand_block(&features)
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .map(|(_, v)| v)
            .sum();
        assert_eq!(others, 0.0);
    }

    #[test]
    fn test_empty_record_default_fill() {
        let features = vectorize(&CustomerRecord::default());

        // All numerics and the prepaid indicator default to zero; only the
        // default brand's slot is set.
        for i in 0..=PLAN_PREPAID_SLOT {
            assert_eq!(features[i], 0.0, "slot {i} should default to zero");
        }
        assert_eq!(features[12], 1.0); // device_brand_Samsung
        assert_eq!(brand_block(&features).iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_unknown_brand_leaves_block_zero() {
        let record = CustomerRecord::from_json(r#"{"device_brand": "Apple"}"#).unwrap();
        let features = vectorize(&record);

        assert_eq!(features.len(), NUM_FEATURES);
        assert_eq!(brand_block(&features).iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn test_postpaid_is_reference_category() {
        for plan in ["Postpaid", "postpaid", "PREPAID", "Hybrid", ""] {
            let record = CustomerRecord {
                plan_type: plan.to_string(),
                ..CustomerRecord::default()
            };
            assert_eq!(vectorize(&record)[PLAN_PREPAID_SLOT], 0.0, "plan {plan:?}");
        }
    }

    #[test]
    fn test_key_order_irrelevant() {
        let a = CustomerRecord::from_json(r#"{"sms_freq": 2, "monthly_spend": 9}"#).unwrap();
        let b = CustomerRecord::from_json(r#"{"monthly_spend": 9, "sms_freq": 2}"#).unwrap();
        assert_eq!(vectorize(&a), vectorize(&b));
    }

    proptest! {
        #[test]
        fn prop_vector_always_schema_shaped(
            avg_data_usage_gb in -1e6f64..1e6,
            pct_video_usage in -1e6f64..1e6,
            avg_call_duration in -1e6f64..1e6,
            sms_freq in -1e6f64..1e6,
            monthly_spend in -1e6f64..1e6,
            topup_freq in -1e6f64..1e6,
            travel_score in -1e6f64..1e6,
            complaint_count in -1e6f64..1e6,
            plan_type in "[A-Za-z]{0,10}",
            device_brand in "[A-Za-z]{0,10}",
        ) {
            let record = CustomerRecord {
                avg_data_usage_gb,
                pct_video_usage,
                avg_call_duration,
                sms_freq,
                monthly_spend,
                topup_freq,
                travel_score,
                complaint_count,
                plan_type: plan_type.clone(),
                device_brand,
            };
            let features = vectorize(&record);

            prop_assert_eq!(features.len(), NUM_FEATURES);
            prop_assert_eq!(features[0], avg_data_usage_gb);
            prop_assert_eq!(features[4], monthly_spend);
            prop_assert_eq!(features[7], complaint_count);

            // Plan indicator is binary and set only for the exact literal.
            let plan_slot = features[PLAN_PREPAID_SLOT];
            prop_assert!(plan_slot == 0.0 || plan_slot == 1.0);
            prop_assert_eq!(plan_slot == 1.0, plan_type == "Prepaid");

            // At most one brand indicator is ever set.
            let ones = features
                .iter()
                .skip(PLAN_PREPAID_SLOT + 1)
                .filter(|&&v| v == 1.0)
                .count();
            let zeros = features
                .iter()
                .skip(PLAN_PREPAID_SLOT + 1)
                .filter(|&&v| v == 0.0)
                .count();
            prop_assert!(ones <= 1);
            prop_assert_eq!(ones + zeros, NUM_FEATURES - PLAN_PREPAID_SLOT - 1);
        }
    }
}
