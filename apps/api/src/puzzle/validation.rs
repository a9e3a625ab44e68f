//! Artifact checks at the consumer boundary.
//!
//! `parse_artifact` gates on the schema version before decoding; unknown
//! top-level fields are ignored. `validate_puzzle` reports every shape or
//! overlay violation it finds rather than stopping at the first.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::puzzle::assembler::{Puzzle, SCHEMA_VERSION};
use crate::puzzle::errors::PuzzleError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleViolation {
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleValidationResult {
    pub passed: bool,
    pub violations: Vec<PuzzleViolation>,
}

/// Decodes an artifact, rejecting any schema other than the current one.
pub fn parse_artifact(value: Value) -> Result<Puzzle, PuzzleError> {
    let found = value.get("schema").and_then(Value::as_str);
    if found != Some(SCHEMA_VERSION) {
        return Err(PuzzleError::SchemaUnsupported {
            found: found.map(str::to_string),
            expected: SCHEMA_VERSION,
        });
    }

    serde_json::from_value(value)
        .map_err(|e| PuzzleError::InvalidOptions(format!("malformed artifact: {e}")))
}

/// Checks shape invariants and overlay placement.
pub fn validate_puzzle(puzzle: &Puzzle) -> PuzzleValidationResult {
    let mut violations = Vec::new();
    let mut push = |rule: &str, message: String| {
        violations.push(PuzzleViolation {
            rule: rule.to_string(),
            message,
        })
    };

    if puzzle.solution.len() != puzzle.rows {
        push(
            "row_count",
            format!(
                "rows is {} but solution has {} rows",
                puzzle.rows,
                puzzle.solution.len()
            ),
        );
    }

    let grid: Vec<Vec<char>> = puzzle.solution.iter().map(|r| r.chars().collect()).collect();

    for (r, row) in grid.iter().enumerate() {
        if row.len() != puzzle.cols {
            push(
                "row_width",
                format!("row {r} has {} cells, expected {}", row.len(), puzzle.cols),
            );
        }
        if let Some(bad) = row.iter().find(|&&c| c != ' ' && !c.is_ascii_uppercase()) {
            push(
                "row_charset",
                format!("row {r} contains {bad:?}; only A-Z and space are allowed"),
            );
        }
    }

    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    for entry in &puzzle.overlay {
        let at = format!("overlay at ({}, {})", entry.row, entry.col);

        if entry.row >= puzzle.rows || entry.col >= puzzle.cols {
            push("overlay_bounds", format!("{at} is outside the grid"));
            continue;
        }
        if !seen.insert((entry.row, entry.col)) {
            push("overlay_unique", format!("{at} is duplicated"));
        }

        let mut chars = entry.ch.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() && !c.is_ascii_alphabetic() => {}
            _ => push(
                "overlay_char",
                format!("{at} holds {:?}; expected one non-letter character", entry.ch),
            ),
        }

        if let Some(cell) = grid.get(entry.row).and_then(|row| row.get(entry.col)) {
            if *cell != ' ' {
                push(
                    "overlay_on_letter",
                    format!("{at} covers letter {cell:?}"),
                );
            }
        }
    }

    PuzzleValidationResult {
        passed: violations.is_empty(),
        violations,
    }
}
