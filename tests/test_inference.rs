//! Integration test: inference engine behavior
//!
//! Uses a deterministic stub classifier so no model artifact is needed.

use std::sync::Arc;

use ndarray::{Array1, Array2};

use scrawl::error::{Result, ScrawlError};
use scrawl::grid::{Grid, GRID_SIDE};
use scrawl::inference::InferenceEngine;
use scrawl::model::{DigitModel, CLASS_COUNT};

/// Linear stub: each class gets a fixed base score, and class 3 also gets
/// a bonus proportional to the number of drawn cells. Blank grids resolve
/// to digit 9, any drawing with two or more cells resolves to digit 3.
struct StubModel;

impl DigitModel for StubModel {
    fn class_scores(&self, image: &Array2<f32>) -> Result<Array1<f32>> {
        let active = image.sum();
        let scores: Vec<f32> = (0..CLASS_COUNT)
            .map(|c| c as f32 * 0.1 + if c == 3 { active * 0.5 } else { 0.0 })
            .collect();
        Ok(Array1::from_vec(scores))
    }
}

/// Stub that always fails, for exercising the error path.
struct FailingModel;

impl DigitModel for FailingModel {
    fn class_scores(&self, _image: &Array2<f32>) -> Result<Array1<f32>> {
        Err(ScrawlError::InferenceFailure(
            "stub backend failure".to_string(),
        ))
    }
}

fn blank_rows() -> Vec<Vec<f64>> {
    vec![vec![0.0; GRID_SIDE]; GRID_SIDE]
}

fn drawn_grid() -> Grid {
    let mut rows = blank_rows();
    rows[10][10] = 1.0;
    rows[10][11] = 1.0;
    rows[11][10] = 1.0;
    rows[11][11] = 1.0;
    Grid::from_rows(&rows).unwrap()
}

#[test]
fn test_blank_grid_prediction() {
    let engine = InferenceEngine::new(Arc::new(StubModel));
    let prediction = engine.predict(&Grid::blank()).unwrap();

    assert_eq!(prediction.digit, 9);
    assert_eq!(prediction.probabilities.len(), CLASS_COUNT);
    let sum: f32 = prediction.probabilities.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
}

#[test]
fn test_drawn_grid_prediction() {
    let engine = InferenceEngine::new(Arc::new(StubModel));
    let prediction = engine.predict(&drawn_grid()).unwrap();

    assert_eq!(prediction.digit, 3);
    assert!(prediction.confidence > 0.0 && prediction.confidence <= 1.0);
}

#[test]
fn test_confidence_is_max_probability() {
    let engine = InferenceEngine::new(Arc::new(StubModel));
    let prediction = engine.predict(&drawn_grid()).unwrap();

    let max = prediction
        .probabilities
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(prediction.confidence, max);
}

#[test]
fn test_identical_grids_identical_output() {
    let engine = InferenceEngine::new(Arc::new(StubModel));
    let grid = drawn_grid();

    let first = engine.predict(&grid).unwrap();
    let second = engine.predict(&grid).unwrap();

    assert_eq!(first.digit, second.digit);
    assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
    assert_eq!(first.confidence_percent(), second.confidence_percent());
}

#[test]
fn test_confidence_percent_format() {
    let engine = InferenceEngine::new(Arc::new(StubModel));
    let rendered = engine.predict(&Grid::blank()).unwrap().confidence_percent();

    let percent = rendered.strip_suffix('%').expect("ends with %");
    let value: f64 = percent.parse().unwrap();
    assert!(value > 0.0 && value <= 100.0);

    let decimals = percent.split('.').nth(1).expect("has decimal point");
    assert_eq!(decimals.len(), 2);
}

#[test]
fn test_engine_survives_model_failure() {
    let engine = InferenceEngine::new(Arc::new(FailingModel));

    let err = engine.predict(&Grid::blank()).unwrap_err();
    assert!(matches!(err, ScrawlError::InferenceFailure(_)));

    let stats = engine.stats();
    assert_eq!(stats.error_count, 1);
    assert_eq!(stats.total_predictions, 0);
}

#[test]
fn test_stats_accumulate() {
    let engine = InferenceEngine::new(Arc::new(StubModel));
    let grid = drawn_grid();

    for _ in 0..3 {
        engine.predict(&grid).unwrap();
    }

    let stats = engine.stats();
    assert_eq!(stats.total_predictions, 3);
    assert_eq!(stats.error_count, 0);
    assert!(stats.avg_latency_ms >= 0.0);
    assert!(stats.uptime_secs > 0.0);
}
