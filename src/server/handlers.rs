//! HTTP request handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::grid::Grid;

use super::error::{Result, ServerError};
use super::state::AppState;

// ============================================================================
// Prediction Handlers
// ============================================================================

/// Classification request: the raw cell matrix from the drawing surface
#[derive(Deserialize)]
pub struct PredictRequest {
    grid: Vec<Vec<f64>>,
}

/// Classify one drawing.
///
/// Runs a single forward pass and reports the winning digit with its
/// softmax confidence. Model failures surface as HTTP 500 and leave the
/// server running.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let Json(request) =
        payload.map_err(|e| ServerError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let grid = Grid::from_rows(&request.grid)?;
    let prediction = state.engine.predict(&grid)?;

    info!(
        digit = prediction.digit,
        confidence = %prediction.confidence_percent(),
        active_cells = grid.active_cells(),
        "Prediction served"
    );

    Ok(Json(serde_json::json!({
        "prediction": prediction.digit,
        "confidence": prediction.confidence_percent(),
        "status": "Success.",
    })))
}

// ============================================================================
// Model Handlers
// ============================================================================

pub async fn get_model_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "model": state.model_info,
    }))
}

// ============================================================================
// System Handlers
// ============================================================================

pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let system_info = state.get_system_info();
    let stats = state.engine.stats();

    Json(serde_json::json!({
        "system": system_info,
        "inference": stats,
        "status": "healthy",
    }))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ============================================================================
// UI Handler
// ============================================================================

pub async fn serve_index() -> Html<String> {
    // Embedded HTML for portability
    Html(EMBEDDED_INDEX_HTML.to_string())
}

const EMBEDDED_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Scrawl</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: ui-sans-serif, system-ui, -apple-system, sans-serif;
            background-color: rgb(17 24 39);
            color: rgb(243 244 246);
            min-height: 100vh;
            display: flex;
            flex-direction: column;
            align-items: center;
        }
        header {
            width: 100%;
            background-color: rgb(31 41 55);
            border-bottom: 1px solid rgb(55 65 81);
            padding: 1rem 1.5rem;
            display: flex;
            align-items: baseline;
            justify-content: space-between;
        }
        header h1 { font-size: 1.25rem; font-weight: 700; }
        header span { font-size: 0.875rem; color: rgb(156 163 175); }
        main { padding: 2rem 1rem; display: flex; flex-direction: column; align-items: center; }
        p.hint { color: rgb(156 163 175); margin-bottom: 1rem; font-size: 0.9rem; }
        #grid {
            display: grid;
            grid-template-columns: repeat(28, 13px);
            grid-template-rows: repeat(28, 13px);
            gap: 1px;
            background-color: rgb(55 65 81);
            border: 1px solid rgb(55 65 81);
            touch-action: none;
            cursor: crosshair;
        }
        .cell { background-color: rgb(17 24 39); }
        .cell.on { background-color: rgb(243 244 246); }
        .buttons { margin-top: 1.25rem; display: flex; gap: 0.75rem; }
        button {
            font: inherit;
            padding: 0.5rem 1.5rem;
            border: none;
            border-radius: 0.375rem;
            cursor: pointer;
            color: white;
        }
        #predict { background-color: rgb(59 130 246); }
        #predict:hover { background-color: rgb(37 99 235); }
        #clear { background-color: rgb(55 65 81); }
        #clear:hover { background-color: rgb(75 85 99); }
        #result {
            margin-top: 1.5rem;
            padding: 1rem 2rem;
            background-color: rgb(31 41 55);
            border: 1px solid rgb(55 65 81);
            border-radius: 0.5rem;
            text-align: center;
            min-width: 16rem;
        }
        #result .digit { font-size: 3rem; font-weight: 700; }
        #result .confidence { color: rgb(156 163 175); margin-top: 0.25rem; }
        #result .error { color: rgb(248 113 113); }
        #result[hidden] { display: none; }
    </style>
</head>
<body>
    <header>
        <h1>Scrawl</h1>
        <span>handwritten digit recognition</span>
    </header>
    <main>
        <p class="hint">Draw a digit below, then press Predict.</p>
        <div id="grid"></div>
        <div class="buttons">
            <button id="predict">Predict</button>
            <button id="clear">Clear</button>
        </div>
        <div id="result" hidden>
            <div class="digit">?</div>
            <div class="confidence"></div>
        </div>
    </main>
    <script>
        const SIZE = 28;
        const grid = Array.from({ length: SIZE }, () => Array(SIZE).fill(0));
        const gridEl = document.getElementById('grid');
        const resultEl = document.getElementById('result');
        const digitEl = resultEl.querySelector('.digit');
        const confidenceEl = resultEl.querySelector('.confidence');

        for (let y = 0; y < SIZE; y++) {
            for (let x = 0; x < SIZE; x++) {
                const cell = document.createElement('div');
                cell.className = 'cell';
                cell.dataset.y = y;
                cell.dataset.x = x;
                gridEl.appendChild(cell);
            }
        }

        function paint(cell) {
            if (!cell || !cell.classList.contains('cell')) return;
            cell.classList.add('on');
            grid[cell.dataset.y][cell.dataset.x] = 1;
        }

        gridEl.addEventListener('mousedown', e => paint(e.target));
        gridEl.addEventListener('mouseover', e => { if (e.buttons === 1) paint(e.target); });
        gridEl.addEventListener('dragstart', e => e.preventDefault());
        gridEl.addEventListener('touchmove', e => {
            e.preventDefault();
            const touch = e.touches[0];
            paint(document.elementFromPoint(touch.clientX, touch.clientY));
        });

        document.getElementById('clear').addEventListener('click', () => {
            for (const row of grid) row.fill(0);
            for (const cell of gridEl.children) cell.classList.remove('on');
            resultEl.hidden = true;
        });

        document.getElementById('predict').addEventListener('click', async () => {
            try {
                const res = await fetch('/api/predict', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ grid }),
                });
                const data = await res.json();
                resultEl.hidden = false;
                if (data.status === 'Success.') {
                    digitEl.textContent = data.prediction;
                    digitEl.classList.remove('error');
                    confidenceEl.textContent = 'confidence ' + data.confidence;
                } else {
                    digitEl.textContent = '!';
                    digitEl.classList.add('error');
                    confidenceEl.textContent = data.message || 'prediction failed';
                }
            } catch (err) {
                resultEl.hidden = false;
                digitEl.textContent = '!';
                digitEl.classList.add('error');
                confidenceEl.textContent = 'server unreachable';
            }
        });
    </script>
</body>
</html>
"#;
