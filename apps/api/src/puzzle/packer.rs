//! Line Packer and Width Selector.
//!
//! # Packing
//! Greedy left-to-right fill: a chunk joins the current row when its length
//! (plus one separator space if the row is non-empty) still fits in the width,
//! otherwise it opens a new row. Chunks are never split.
//!
//! # Width selection
//! Exhaustive scan over `[min, max]`, packing once per candidate. The winner is
//! the width with the fewest rows, the smallest width among ties. The scan is
//! bounded by `BuildLimits::max_cols`.

use serde::{Deserialize, Serialize};

use crate::puzzle::errors::{PuzzleError, WidthProblem};
use crate::puzzle::tokenizer::Chunk;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One packed row: chunks joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedRow {
    /// Raw (pre-shift) row string.
    pub raw: String,
    /// Rendered length in cells.
    pub len: usize,
}

/// Row count produced by one candidate width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthCandidate {
    pub width: usize,
    pub rows: usize,
}

/// Outcome of the width search.
#[derive(Debug, Clone)]
pub struct WidthChoice {
    pub width: usize,
    pub rows: Vec<PackedRow>,
    /// Every scanned width in ascending order.
    pub candidates: Vec<WidthCandidate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Line packer
// ────────────────────────────────────────────────────────────────────────────

/// Packs `chunks` into rows of at most `width` cells. Zero chunks yield zero rows.
///
/// A chunk longer than `width` still gets a row of its own; the cell splitter
/// rejects the overflow later.
pub fn pack_lines(chunks: &[Chunk], width: usize) -> Vec<PackedRow> {
    let mut rows: Vec<PackedRow> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for chunk in chunks {
        let chunk_len = chunk.len();
        let separator = usize::from(current_len > 0);

        if current_len > 0 && current_len + separator + chunk_len > width {
            rows.push(PackedRow {
                raw: std::mem::take(&mut current),
                len: current_len,
            });
            current.push_str(&chunk.text);
            current_len = chunk_len;
        } else {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(&chunk.text);
            current_len += separator + chunk_len;
        }
    }

    if current_len > 0 {
        rows.push(PackedRow {
            raw: current,
            len: current_len,
        });
    }

    rows
}

// ────────────────────────────────────────────────────────────────────────────
// Width selector
// ────────────────────────────────────────────────────────────────────────────

/// Chooses the grid width for `chunks`.
///
/// Effective bounds: `min = max(requested_min or L, L)` and
/// `max = max(requested_max or min, min)`, where `L` is the longest chunk.
/// A requested `max_width` below `L`, an inverted range, or a range reaching
/// past `max_cols` fails with `WIDTH_UNFITTABLE`.
pub fn select_width(
    chunks: &[Chunk],
    requested_min: Option<usize>,
    requested_max: Option<usize>,
    max_cols: usize,
) -> Result<WidthChoice, PuzzleError> {
    let longest = chunks.iter().map(Chunk::len).max().unwrap_or(0);

    if let Some(max_width) = requested_max {
        if let Some(min_width) = requested_min {
            if min_width > max_width {
                return Err(PuzzleError::WidthUnfittable(WidthProblem::EmptyRange {
                    min_width,
                    max_width,
                }));
            }
        }
        if longest > max_width {
            return Err(PuzzleError::WidthUnfittable(WidthProblem::ChunkTooWide {
                longest,
                max_width,
            }));
        }
    }

    let min_width = requested_min.unwrap_or(longest).max(longest).max(1);
    let max_width = requested_max.unwrap_or(min_width).max(min_width);

    if max_width > max_cols {
        return Err(PuzzleError::WidthUnfittable(
            WidthProblem::AboveColumnLimit {
                max_width,
                limit: max_cols,
            },
        ));
    }

    let candidates: Vec<WidthCandidate> = (min_width..=max_width)
        .map(|width| WidthCandidate {
            width,
            rows: pack_lines(chunks, width).len(),
        })
        .collect();

    // Fewest rows first, then the smallest width.
    let best = candidates
        .iter()
        .min_by_key(|c| (c.rows, c.width))
        .copied()
        .ok_or(PuzzleError::WidthUnfittable(WidthProblem::EmptyRange {
            min_width,
            max_width,
        }))?;

    Ok(WidthChoice {
        width: best.width,
        rows: pack_lines(chunks, best.width),
        candidates,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
