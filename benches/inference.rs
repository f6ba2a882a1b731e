use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array1, Array2};
use std::sync::Arc;

use scrawl::error::Result;
use scrawl::grid::{Grid, GRID_SIDE};
use scrawl::inference::InferenceEngine;
use scrawl::model::{DigitModel, CLASS_COUNT};

/// Deterministic stand-in for the ONNX plan, so the bench isolates the
/// grid conversion and softmax/argmax pipeline.
struct StubModel;

impl DigitModel for StubModel {
    fn class_scores(&self, image: &Array2<f32>) -> Result<Array1<f32>> {
        let active = image.sum();
        let scores: Vec<f32> = (0..CLASS_COUNT)
            .map(|c| c as f32 * 0.1 + active * 0.01)
            .collect();
        Ok(Array1::from_vec(scores))
    }
}

fn rows_with_drawn_cells(n: usize) -> Vec<Vec<f64>> {
    let mut rows = vec![vec![0.0; GRID_SIDE]; GRID_SIDE];
    for i in 0..n {
        rows[i / GRID_SIDE][i % GRID_SIDE] = 1.0;
    }
    rows
}

fn bench_grid_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_validation");

    for n_cells in [0, 100, 784].iter() {
        let rows = rows_with_drawn_cells(*n_cells);

        group.bench_with_input(BenchmarkId::new("from_rows", n_cells), &rows, |b, rows| {
            b.iter(|| Grid::from_rows(black_box(rows)).unwrap())
        });
    }

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    let engine = InferenceEngine::new(Arc::new(StubModel));

    for n_cells in [0, 100, 784].iter() {
        let grid = Grid::from_rows(&rows_with_drawn_cells(*n_cells)).unwrap();

        group.bench_with_input(BenchmarkId::new("predict", n_cells), &grid, |b, grid| {
            b.iter(|| engine.predict(black_box(grid)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_validation, bench_prediction);
criterion_main!(benches);
