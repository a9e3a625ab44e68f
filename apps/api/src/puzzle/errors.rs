//! Build failures for the puzzle pipeline.
//!
//! Every failure is detected synchronously during a single build call and
//! reported as exactly one `PuzzleError`. No partial artifact is ever returned.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Stable, serializable error code. This is what API consumers switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PuzzleErrorKind {
    PhraseTooLong,
    EmptyPhrase,
    WidthUnfittable,
    PinConflict,
    SchemaUnsupported,
    InvalidOptions,
}

impl PuzzleErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            PuzzleErrorKind::PhraseTooLong => "PHRASE_TOO_LONG",
            PuzzleErrorKind::EmptyPhrase => "EMPTY_PHRASE",
            PuzzleErrorKind::WidthUnfittable => "WIDTH_UNFITTABLE",
            PuzzleErrorKind::PinConflict => "PIN_CONFLICT",
            PuzzleErrorKind::SchemaUnsupported => "SCHEMA_UNSUPPORTED",
            PuzzleErrorKind::InvalidOptions => "INVALID_OPTIONS",
        }
    }
}

/// Why a width search or row placement could not fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidthProblem {
    /// The longest chunk is wider than the caller's `max_width`.
    ChunkTooWide { longest: usize, max_width: usize },
    /// `min_width` is greater than `max_width`.
    EmptyRange { min_width: usize, max_width: usize },
    /// The effective search range exceeds the hard column limit.
    AboveColumnLimit { max_width: usize, limit: usize },
    /// A packed row is longer than the chosen width.
    RowOverflow { row: usize, len: usize, width: usize },
}

/// Why a pin could not be honored exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinProblem {
    /// The pin names a row the packing did not produce.
    NoSuchRow { rows: usize },
    /// `raw_index` falls outside the row's raw string.
    RawIndexOutOfRange { raw_len: usize },
    /// `target_col` falls outside the grid.
    TargetOutOfGrid { cols: usize },
    /// The required shift is negative or exceeds the row's slack.
    ShiftOutOfRange { shift: i64, slack: usize },
    /// An earlier pin already locked this row at a different shift.
    Contradicts { locked_shift: usize, shift: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("phrase is {len} characters, limit is {limit}")]
    PhraseTooLong { len: usize, limit: usize },

    #[error("phrase contains no chunks")]
    EmptyPhrase,

    #[error("no width fits: {0:?}")]
    WidthUnfittable(WidthProblem),

    #[error("pin {pin_index} (row {row}, raw_index {raw_index}, target_col {target_col}) cannot be honored: {problem:?}")]
    PinConflict {
        pin_index: usize,
        row: usize,
        raw_index: usize,
        target_col: usize,
        problem: PinProblem,
    },

    #[error("unsupported artifact schema {found:?}, expected {expected}")]
    SchemaUnsupported {
        found: Option<String>,
        expected: &'static str,
    },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl PuzzleError {
    pub fn kind(&self) -> PuzzleErrorKind {
        match self {
            PuzzleError::PhraseTooLong { .. } => PuzzleErrorKind::PhraseTooLong,
            PuzzleError::EmptyPhrase => PuzzleErrorKind::EmptyPhrase,
            PuzzleError::WidthUnfittable(_) => PuzzleErrorKind::WidthUnfittable,
            PuzzleError::PinConflict { .. } => PuzzleErrorKind::PinConflict,
            PuzzleError::SchemaUnsupported { .. } => PuzzleErrorKind::SchemaUnsupported,
            PuzzleError::InvalidOptions(_) => PuzzleErrorKind::InvalidOptions,
        }
    }

    /// Structured context for the error body (offending row, pin, width).
    pub fn detail(&self) -> Value {
        match self {
            PuzzleError::PhraseTooLong { len, limit } => json!({ "len": len, "limit": limit }),
            PuzzleError::EmptyPhrase => json!({}),
            PuzzleError::WidthUnfittable(problem) => match problem {
                WidthProblem::ChunkTooWide { longest, max_width } => {
                    json!({ "reason": "chunk_too_wide", "longest": longest, "max_width": max_width })
                }
                WidthProblem::EmptyRange {
                    min_width,
                    max_width,
                } => {
                    json!({ "reason": "empty_range", "min_width": min_width, "max_width": max_width })
                }
                WidthProblem::AboveColumnLimit { max_width, limit } => {
                    json!({ "reason": "above_column_limit", "max_width": max_width, "limit": limit })
                }
                WidthProblem::RowOverflow { row, len, width } => {
                    json!({ "reason": "row_overflow", "row": row, "len": len, "width": width })
                }
            },
            PuzzleError::PinConflict {
                pin_index,
                row,
                raw_index,
                target_col,
                problem,
            } => {
                let reason = match problem {
                    PinProblem::NoSuchRow { rows } => json!({ "reason": "no_such_row", "rows": rows }),
                    PinProblem::RawIndexOutOfRange { raw_len } => {
                        json!({ "reason": "raw_index_out_of_range", "raw_len": raw_len })
                    }
                    PinProblem::TargetOutOfGrid { cols } => {
                        json!({ "reason": "target_out_of_grid", "cols": cols })
                    }
                    PinProblem::ShiftOutOfRange { shift, slack } => {
                        json!({ "reason": "shift_out_of_range", "shift": shift, "slack": slack })
                    }
                    PinProblem::Contradicts {
                        locked_shift,
                        shift,
                    } => json!({ "reason": "contradicts_locked_row", "locked_shift": locked_shift, "shift": shift }),
                };
                json!({
                    "pin_index": pin_index,
                    "row": row,
                    "raw_index": raw_index,
                    "target_col": target_col,
                    "problem": reason,
                })
            }
            PuzzleError::SchemaUnsupported { found, expected } => {
                json!({ "found": found, "expected": expected })
            }
            PuzzleError::InvalidOptions(msg) => json!({ "message": msg }),
        }
    }
}
