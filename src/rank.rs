//! Ranking and report assembly

use std::cmp::Ordering;

use ndarray::Array1;
use serde::Serialize;

use crate::artifacts::LabelEncoder;
use crate::error::Result;

/// Maximum number of recommendations reported per request.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Coarse confidence bucket derived from a class probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Bucket a raw (unrounded) probability. Both thresholds are strict:
    /// exactly 0.7 is `Medium` and exactly 0.4 is `Low`.
    pub fn from_probability(p: f64) -> Self {
        if p > 0.7 {
            Confidence::High
        } else if p > 0.4 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// One ranked offer suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Decoded offer name.
    pub offer: String,
    /// Class probability as a percentage, rounded to two decimals.
    pub score: f64,
    /// Bucket computed from the raw probability, before rounding.
    pub confidence: Confidence,
}

/// Final report for one scored record.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Offer name of the arg-max class.
    pub primary_offer: String,
    /// Arg-max probability as a percentage, rounded to two decimals.
    pub confidence_score: f64,
    /// Top-N offers, strictly non-increasing by score.
    pub recommendations: Vec<Recommendation>,
}

fn percent(p: f64) -> f64 {
    (p * 10_000.0).round() / 100.0
}

/// Assemble the ranked report from a class-probability distribution.
///
/// Selects `min(3, classes)` entries by descending probability; equal
/// probabilities resolve to the lower class index, so the ranking is
/// deterministic for any distribution. `predicted` is the arg-max index
/// the classifier reported and names the primary offer.
pub fn build_result(
    predicted: usize,
    distribution: &Array1<f64>,
    encoder: &LabelEncoder,
) -> Result<PredictionResult> {
    let top_n = MAX_RECOMMENDATIONS.min(distribution.len());

    let mut order: Vec<usize> = (0..distribution.len()).collect();
    order.sort_by(|&a, &b| {
        distribution[b]
            .partial_cmp(&distribution[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut recommendations = Vec::with_capacity(top_n);
    for &index in order.iter().take(top_n) {
        let p = distribution[index];
        recommendations.push(Recommendation {
            offer: encoder.decode(index)?.to_string(),
            score: percent(p),
            confidence: Confidence::from_probability(p),
        });
    }

    Ok(PredictionResult {
        primary_offer: encoder.decode(predicted)?.to_string(),
        confidence_score: percent(distribution[predicted]),
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn encoder(n: usize) -> LabelEncoder {
        LabelEncoder::from_classes((0..n).map(|i| format!("Offer {i}")).collect()).unwrap()
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(Confidence::from_probability(0.71), Confidence::High);
        assert_eq!(Confidence::from_probability(0.7), Confidence::Medium);
        assert_eq!(Confidence::from_probability(0.41), Confidence::Medium);
        assert_eq!(Confidence::from_probability(0.4), Confidence::Low);
        assert_eq!(Confidence::from_probability(0.0), Confidence::Low);
    }

    #[test]
    fn test_top_three_descending() {
        let distribution = array![0.05, 0.5, 0.1, 0.3, 0.05];
        let result = build_result(1, &distribution, &encoder(5)).unwrap();

        assert_eq!(result.primary_offer, "Offer 1");
        assert_eq!(result.confidence_score, 50.0);
        assert_eq!(result.recommendations.len(), 3);

        let offers: Vec<&str> = result
            .recommendations
            .iter()
            .map(|r| r.offer.as_str())
            .collect();
        assert_eq!(offers, ["Offer 1", "Offer 3", "Offer 2"]);

        for pair in result.recommendations.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_ties_resolve_to_lower_index() {
        let distribution = array![0.2, 0.2, 0.2, 0.2, 0.2];
        let result = build_result(0, &distribution, &encoder(5)).unwrap();

        let offers: Vec<&str> = result
            .recommendations
            .iter()
            .map(|r| r.offer.as_str())
            .collect();
        assert_eq!(offers, ["Offer 0", "Offer 1", "Offer 2"]);
    }

    #[test]
    fn test_fewer_classes_than_slots() {
        let distribution = array![0.6, 0.4];
        let result = build_result(0, &distribution, &encoder(2)).unwrap();

        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.recommendations[0].offer, "Offer 0");
        assert_eq!(result.recommendations[0].confidence, Confidence::Medium);
        assert_eq!(result.recommendations[1].confidence, Confidence::Low);
    }

    #[test]
    fn test_single_class() {
        let distribution = array![1.0];
        let result = build_result(0, &distribution, &encoder(1)).unwrap();

        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.confidence_score, 100.0);
        assert_eq!(result.recommendations[0].confidence, Confidence::High);
    }

    #[test]
    fn test_scores_round_to_two_decimals() {
        let third = 1.0 / 3.0;
        let distribution = array![third, third, third];
        let result = build_result(0, &distribution, &encoder(3)).unwrap();

        assert_eq!(result.confidence_score, 33.33);
        assert!(result.recommendations.iter().all(|r| r.score == 33.33));
    }

    #[test]
    fn test_decode_failure_propagates() {
        // Vocabulary shorter than the distribution: ranking walks into an
        // out-of-range index.
        let distribution = array![0.5, 0.3, 0.2];
        let err = build_result(0, &distribution, &encoder(2)).unwrap_err();
        assert_eq!(err.kind(), "DecodeError");
    }

    #[test]
    fn test_confidence_serializes_as_label() {
        let json = serde_json::to_string(&Confidence::High).unwrap();
        assert_eq!(json, r#""High""#);
    }
}
