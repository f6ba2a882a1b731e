//! Prediction metrics
//!
//! Latency and error tracking for the prediction path. The rolling latency
//! window is the only locked state, so the hot path takes one write lock
//! per prediction; counters are lock-free atomics.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Instant;

/// One-pass summary of the rolling latency window, in milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatencySummary {
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Metrics collector for the prediction path.
///
/// Latencies beyond the window capacity are evicted oldest-first, so the
/// summary reflects recent behavior rather than process history; the
/// counters cover the whole process lifetime.
pub struct PredictionMetrics {
    window: RwLock<VecDeque<f64>>,
    capacity: usize,
    predictions: AtomicU64,
    errors: AtomicU64,
    started: Instant,
}

impl PredictionMetrics {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
            predictions: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Record one completed prediction and its latency.
    pub fn record_latency(&self, latency_ms: f64) {
        if let Ok(mut window) = self.window.write() {
            if window.len() == self.capacity {
                window.pop_front();
            }
            window.push_back(latency_ms);
        }
        self.predictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed prediction.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Summarize the rolling window with a single sorted pass.
    pub fn latency_summary(&self) -> LatencySummary {
        let sorted: Vec<f64> = match self.window.read() {
            Ok(window) if !window.is_empty() => {
                let mut data: Vec<f64> = window.iter().copied().collect();
                data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                data
            }
            _ => return LatencySummary::default(),
        };

        let rank = |p: f64| {
            let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
            sorted[idx.min(sorted.len() - 1)]
        };

        LatencySummary {
            avg: sorted.iter().sum::<f64>() / sorted.len() as f64,
            p50: rank(50.0),
            p95: rank(95.0),
            p99: rank(99.0),
        }
    }

    pub fn total_predictions(&self) -> u64 {
        self.predictions.load(Ordering::Relaxed)
    }

    pub fn total_errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Errors as a fraction of all attempts, successful or not.
    pub fn error_rate(&self) -> f64 {
        let errors = self.total_errors();
        let attempts = self.total_predictions() + errors;
        if attempts == 0 {
            return 0.0;
        }
        errors as f64 / attempts as f64
    }

    pub fn uptime_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_average() {
        let metrics = PredictionMetrics::new(100);

        metrics.record_latency(10.0);
        metrics.record_latency(20.0);
        metrics.record_latency(30.0);

        assert_eq!(metrics.total_predictions(), 3);
        assert!((metrics.latency_summary().avg - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_window_summary_is_zero() {
        let metrics = PredictionMetrics::new(100);
        let summary = metrics.latency_summary();
        assert_eq!(summary.avg, 0.0);
        assert_eq!(summary.p99, 0.0);
    }

    #[test]
    fn test_percentiles() {
        let metrics = PredictionMetrics::new(100);

        for i in 1..=100 {
            metrics.record_latency(i as f64);
        }

        let summary = metrics.latency_summary();
        assert!((summary.p50 - 50.0).abs() <= 1.0);
        assert!((summary.p95 - 95.0).abs() <= 1.0);
        assert!((summary.p99 - 99.0).abs() <= 1.0);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let metrics = PredictionMetrics::new(10);

        for i in 0..100 {
            metrics.record_latency(i as f64);
        }

        // Counter covers everything, window only the last 10
        assert_eq!(metrics.total_predictions(), 100);
        assert!(metrics.latency_summary().avg >= 90.0);
    }

    #[test]
    fn test_error_rate() {
        let metrics = PredictionMetrics::new(100);

        for _ in 0..90 {
            metrics.record_latency(10.0);
        }
        for _ in 0..10 {
            metrics.record_error();
        }

        assert!((metrics.error_rate() - 0.1).abs() < 0.01);
        assert_eq!(metrics.total_errors(), 10);
    }
}
