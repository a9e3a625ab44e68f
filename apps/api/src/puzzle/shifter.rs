//! Overlap Shifter — horizontal placement of each row.
//!
//! # Algorithm
//! Rows are placed top to bottom. `placed` is the explicit accumulator of rows
//! already finalized (shifted and padded to the grid width). For an unpinned
//! row every shift in `0..=slack` is scored by counting, for each letter, how
//! many placed rows carry the same letter in the same absolute column. The
//! chosen shift is the smallest one among the maximal scores.
//!
//! Pinned rows skip the search. A pin that cannot be honored exactly is a
//! `PIN_CONFLICT`; pins are never clamped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::puzzle::cells::SplitRow;
use crate::puzzle::errors::{PinProblem, PuzzleError};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Forces the character at `raw_index` of row `row`'s raw string onto `target_col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    pub row: usize,
    pub raw_index: usize,
    pub target_col: usize,
}

/// A fixed non-letter character at its final grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayEntry {
    pub row: usize,
    pub col: usize,
    pub ch: String,
}

/// Rows after shifting, ready for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftedGrid {
    pub solution: Vec<String>,
    pub overlay: Vec<OverlayEntry>,
    pub shifts: Vec<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pins
// ────────────────────────────────────────────────────────────────────────────

/// Validates `pins` against the split rows and returns the locked shift per row.
pub fn resolve_pins(
    pins: &[Pin],
    rows: &[SplitRow],
    width: usize,
) -> Result<BTreeMap<usize, usize>, PuzzleError> {
    let mut locked: BTreeMap<usize, usize> = BTreeMap::new();

    for (pin_index, pin) in pins.iter().enumerate() {
        let conflict = |problem: PinProblem| PuzzleError::PinConflict {
            pin_index,
            row: pin.row,
            raw_index: pin.raw_index,
            target_col: pin.target_col,
            problem,
        };

        let split = rows
            .get(pin.row)
            .ok_or_else(|| conflict(PinProblem::NoSuchRow { rows: rows.len() }))?;

        if pin.raw_index >= split.raw_len {
            return Err(conflict(PinProblem::RawIndexOutOfRange {
                raw_len: split.raw_len,
            }));
        }
        if pin.target_col >= width {
            return Err(conflict(PinProblem::TargetOutOfGrid { cols: width }));
        }

        let slack = split.slack();
        let shift = pin.target_col as i64 - pin.raw_index as i64;
        if shift < 0 || shift > slack as i64 {
            return Err(conflict(PinProblem::ShiftOutOfRange { shift, slack }));
        }
        let shift = shift as usize;

        match locked.get(&pin.row) {
            Some(&locked_shift) if locked_shift != shift => {
                return Err(conflict(PinProblem::Contradicts {
                    locked_shift,
                    shift,
                }));
            }
            _ => {
                locked.insert(pin.row, shift);
            }
        }
    }

    Ok(locked)
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Letter agreement between `row` placed at `shift` and every row in `placed`.
///
/// A letter matching two placed rows in the same column counts twice.
pub fn overlap_score(row: &SplitRow, shift: usize, placed: &[Vec<char>]) -> usize {
    row.cells[..row.raw_len]
        .iter()
        .enumerate()
        .filter(|(_, ch)| **ch != ' ')
        .map(|(c, &ch)| {
            placed
                .iter()
                .filter(|p| p.get(shift + c) == Some(&ch))
                .count()
        })
        .sum()
}

/// Returns `(shift, score)` for the smallest shift among the maximal scores.
pub fn best_shift(row: &SplitRow, placed: &[Vec<char>]) -> (usize, usize) {
    (0..=row.slack())
        .map(|shift| (shift, overlap_score(row, shift, placed)))
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .unwrap_or((0, 0))
}

// ────────────────────────────────────────────────────────────────────────────
// Placement
// ────────────────────────────────────────────────────────────────────────────

/// Places every row, honoring `pins` exactly and searching the rest.
pub fn shift_rows(
    rows: &[SplitRow],
    pins: &[Pin],
    width: usize,
) -> Result<ShiftedGrid, PuzzleError> {
    let locked = resolve_pins(pins, rows, width)?;

    let mut placed: Vec<Vec<char>> = Vec::with_capacity(rows.len());
    let mut overlay: Vec<OverlayEntry> = Vec::new();
    let mut shifts: Vec<usize> = Vec::with_capacity(rows.len());

    for (row_index, split) in rows.iter().enumerate() {
        let shift = match locked.get(&row_index) {
            Some(&shift) => {
                debug!(row = row_index, shift, "row pinned");
                shift
            }
            None => {
                let (shift, score) = best_shift(split, &placed);
                debug!(row = row_index, shift, score, "row shifted");
                shift
            }
        };

        placed.push(apply_shift(split, shift, width));
        overlay.extend(split.overlay.iter().map(|o| OverlayEntry {
            row: row_index,
            col: shift + o.col,
            ch: o.ch.to_string(),
        }));
        shifts.push(shift);
    }

    Ok(ShiftedGrid {
        solution: placed.iter().map(|cells| cells.iter().collect()).collect(),
        overlay,
        shifts,
    })
}

/// Left-pads the used cells by `shift` and pads to exactly `width`.
fn apply_shift(split: &SplitRow, shift: usize, width: usize) -> Vec<char> {
    let mut cells = vec![' '; shift];
    cells.extend_from_slice(&split.cells[..split.raw_len]);
    cells.resize(width, ' ');
    cells
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
