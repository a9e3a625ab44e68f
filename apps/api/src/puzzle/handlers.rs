//! Axum route handlers for the Puzzle API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::puzzle::assembler::{BuildOptions, Puzzle};
use crate::puzzle::validation::{parse_artifact, validate_puzzle, PuzzleValidationResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BuildPuzzleRequest {
    pub phrase: String,
    #[serde(flatten)]
    pub options: BuildOptions,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/puzzles
///
/// Builds a puzzle artifact from a phrase. When the request names neither
/// width bound, the configured default range is searched.
pub async fn handle_build_puzzle(
    State(state): State<AppState>,
    Json(request): Json<BuildPuzzleRequest>,
) -> Result<Json<Puzzle>, AppError> {
    let options = with_default_widths(request.options, &state.config);
    let phrase = request.phrase;
    let builder = state.builder.clone();

    // CPU-bound width scan + shift search — keep it off the async executor.
    let puzzle = tokio::task::spawn_blocking(move || builder.build(&phrase, &options))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed building puzzle: {e}")))??;

    info!(
        id = %puzzle.id,
        rows = puzzle.rows,
        cols = puzzle.cols,
        overlay = puzzle.overlay.len(),
        "Puzzle built"
    );

    Ok(Json(puzzle))
}

/// POST /api/v1/puzzles/validate
///
/// Checks a previously built artifact. Unsupported schema versions fail with
/// `SCHEMA_UNSUPPORTED`; invariant violations are listed in the response.
pub async fn handle_validate_puzzle(
    Json(body): Json<Value>,
) -> Result<Json<PuzzleValidationResult>, AppError> {
    let puzzle = parse_artifact(body)?;
    Ok(Json(validate_puzzle(&puzzle)))
}

fn with_default_widths(mut options: BuildOptions, config: &Config) -> BuildOptions {
    if options.min_width.is_none() && options.max_width.is_none() {
        options.min_width = Some(config.default_min_width);
        options.max_width = Some(config.default_max_width);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_only_without_bounds() {
        let config = Config::default();

        let filled = with_default_widths(BuildOptions::default(), &config);
        assert_eq!(filled.min_width, Some(14));
        assert_eq!(filled.max_width, Some(24));

        let partial = BuildOptions {
            min_width: Some(8),
            ..Default::default()
        };
        let kept = with_default_widths(partial, &config);
        assert_eq!(kept.min_width, Some(8));
        assert_eq!(kept.max_width, None);
    }

    #[test]
    fn test_request_flattens_options() {
        let request: BuildPuzzleRequest = serde_json::from_value(serde_json::json!({
            "phrase": "hello",
            "min_width": 5,
            "pins": [{ "row": 0, "raw_index": 0, "target_col": 0 }],
            "debug": true
        }))
        .unwrap();
        assert_eq!(request.phrase, "hello");
        assert_eq!(request.options.min_width, Some(5));
        assert_eq!(request.options.pins.len(), 1);
        assert!(request.options.debug);
    }
}
