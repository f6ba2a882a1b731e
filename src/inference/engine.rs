//! Inference engine implementation
//!
//! Wraps the shared model handle with the softmax/argmax post-processing
//! step and per-process latency tracking. The engine holds no request
//! state, so a single instance serves all handlers concurrently.

use std::sync::Arc;
use std::time::Instant;

use ndarray::Array1;
use serde::Serialize;

use crate::error::Result;
use crate::grid::Grid;
use crate::model::DigitModel;
use crate::monitoring::PredictionMetrics;

/// Latency window size for rolling statistics
const METRICS_WINDOW: usize = 1000;

/// Inference statistics snapshot
#[derive(Debug, Clone, Serialize)]
pub struct InferenceStats {
    pub total_predictions: u64,
    pub error_count: u64,
    pub avg_latency_ms: f64,
    pub p50_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub throughput_per_sec: f64,
    pub uptime_secs: f64,
}

/// Outcome of one forward pass
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// Winning digit class
    pub digit: usize,
    /// Softmax probability of the winning class, in (0, 1]
    pub confidence: f32,
    /// Full probability distribution over the ten classes
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Confidence rendered as a percentage with two decimals, e.g. "97.32%".
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// Prediction service around the shared model handle
pub struct InferenceEngine {
    model: Arc<dyn DigitModel>,
    metrics: PredictionMetrics,
}

impl InferenceEngine {
    /// Create an engine for an already-loaded model.
    pub fn new(model: Arc<dyn DigitModel>) -> Self {
        Self {
            model,
            metrics: PredictionMetrics::new(METRICS_WINDOW),
        }
    }

    /// Run one forward pass over a validated grid.
    ///
    /// The same grid always yields the same digit and the same confidence;
    /// there is no sampling anywhere in the pipeline.
    pub fn predict(&self, grid: &Grid) -> Result<Prediction> {
        let start = Instant::now();

        let image = grid.to_image();
        let scores = match self.model.class_scores(&image) {
            Ok(scores) => scores,
            Err(e) => {
                self.metrics.record_error();
                return Err(e);
            }
        };

        let probabilities = softmax(&scores);
        let digit = argmax(&scores);
        let confidence = probabilities[digit];

        self.metrics
            .record_latency(start.elapsed().as_secs_f64() * 1000.0);

        Ok(Prediction {
            digit,
            confidence,
            probabilities: probabilities.to_vec(),
        })
    }

    /// Snapshot of latency and error statistics.
    pub fn stats(&self) -> InferenceStats {
        let total = self.metrics.total_predictions();
        let uptime = self.metrics.uptime_secs();
        let latency = self.metrics.latency_summary();

        InferenceStats {
            total_predictions: total,
            error_count: self.metrics.total_errors(),
            avg_latency_ms: latency.avg,
            p50_latency_ms: latency.p50,
            p95_latency_ms: latency.p95,
            p99_latency_ms: latency.p99,
            throughput_per_sec: if uptime > 0.0 {
                total as f64 / uptime
            } else {
                0.0
            },
            uptime_secs: uptime,
        }
    }
}

/// Numerically stable softmax over raw class scores.
///
/// Subtracting the maximum before exponentiating keeps large scores from
/// overflowing to infinity.
fn softmax(scores: &Array1<f32>) -> Array1<f32> {
    let max = scores.fold(f32::NEG_INFINITY, |acc, &s| acc.max(s));
    let exp = scores.mapv(|s| (s - max).exp());
    let sum = exp.sum();
    exp / sum
}

/// Index of the maximum raw score.
///
/// Softmax is monotonic, so this is also the class with the maximum
/// probability.
fn argmax(scores: &Array1<f32>) -> usize {
    scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CLASS_COUNT;

    #[test]
    fn test_softmax_sums_to_one() {
        let scores = Array1::from_vec(vec![1.0, 2.0, 3.0, 0.5, -1.0, 0.0, 4.0, 2.5, 1.5, 0.2]);
        let probs = softmax(&scores);
        assert!((probs.sum() - 1.0).abs() < 1e-5);
        assert!(probs.iter().all(|&p| p > 0.0 && p <= 1.0));
    }

    #[test]
    fn test_softmax_stable_for_large_scores() {
        let scores = Array1::from_vec(vec![1000.0, 999.0, 998.0]);
        let probs = softmax(&scores);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.sum() - 1.0).abs() < 1e-5);
        assert!(probs[0] > probs[1]);
    }

    #[test]
    fn test_softmax_uniform_for_equal_scores() {
        let scores = Array1::from_vec(vec![2.0; CLASS_COUNT]);
        let probs = softmax(&scores);
        for &p in probs.iter() {
            assert!((p - 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_argmax_picks_largest() {
        let scores = Array1::from_vec(vec![0.1, 0.2, 9.0, 0.3]);
        assert_eq!(argmax(&scores), 2);
    }

    #[test]
    fn test_argmax_matches_probability_argmax() {
        let scores = Array1::from_vec(vec![-3.0, 1.0, 4.5, 2.0, -0.5, 0.0, 3.9, 1.1, 2.2, 0.7]);
        let probs = softmax(&scores);
        let digit = argmax(&scores);
        let max_prob = probs.fold(f32::NEG_INFINITY, |acc, &p| acc.max(p));
        assert_eq!(probs[digit], max_prob);
    }

    #[test]
    fn test_confidence_percent_formatting() {
        let prediction = Prediction {
            digit: 7,
            confidence: 0.9732,
            probabilities: vec![0.0; CLASS_COUNT],
        };
        assert_eq!(prediction.confidence_percent(), "97.32%");

        let certain = Prediction {
            digit: 1,
            confidence: 1.0,
            probabilities: vec![0.0; CLASS_COUNT],
        };
        assert_eq!(certain.confidence_percent(), "100.00%");
    }
}
