//! Puzzle Assembler — runs the full pipeline and packages the artifact.
//!
//! # Pipeline
//! tokenize → select_width (packs per candidate) → split_row per row →
//! shift_rows → `Puzzle`.
//!
//! `PuzzleBuilder` is stateless apart from its injected clock, id source and
//! limits, so one instance is shared by every request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::puzzle::cells::{split_row, SplitRow};
use crate::puzzle::clock::{Clock, IdGenerator};
use crate::puzzle::errors::PuzzleError;
use crate::puzzle::packer::{select_width, WidthCandidate};
use crate::puzzle::shifter::{shift_rows, OverlayEntry, Pin};
use crate::puzzle::tokenizer::tokenize;

pub const SCHEMA_VERSION: &str = "0.3";

const MAX_ID_CHARS: usize = 64;

// ────────────────────────────────────────────────────────────────────────────
// Artifact
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// `YYYY-MM-DD`, taken from the injected clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Packing and shift diagnostics, attached only on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDebug {
    /// Raw (pre-shift) row strings.
    pub packed: Vec<String>,
    pub shifts: Vec<usize>,
    #[serde(default)]
    pub widths: Vec<WidthCandidate>,
}

/// The puzzle artifact handed to game clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub schema: String,
    pub id: String,
    pub rows: usize,
    pub cols: usize,
    pub solution: Vec<String>,
    pub overlay: Vec<OverlayEntry>,
    #[serde(default)]
    pub meta: PuzzleMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<PuzzleDebug>,
}

// ────────────────────────────────────────────────────────────────────────────
// Options and limits
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub min_width: Option<usize>,
    #[serde(default)]
    pub max_width: Option<usize>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub pins: Vec<Pin>,
    #[serde(default)]
    pub debug: bool,
}

/// Hard caps that bound the cost of a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildLimits {
    pub max_phrase_chars: usize,
    pub max_cols: usize,
}

impl Default for BuildLimits {
    fn default() -> Self {
        BuildLimits {
            max_phrase_chars: 200,
            max_cols: 30,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PuzzleBuilder {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    limits: BuildLimits,
}

impl PuzzleBuilder {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>, limits: BuildLimits) -> Self {
        PuzzleBuilder { clock, ids, limits }
    }

    /// Builds the puzzle for `phrase`. Either the whole artifact or one error.
    pub fn build(&self, phrase: &str, options: &BuildOptions) -> Result<Puzzle, PuzzleError> {
        let phrase_len = phrase.chars().count();
        if phrase_len > self.limits.max_phrase_chars {
            return Err(PuzzleError::PhraseTooLong {
                len: phrase_len,
                limit: self.limits.max_phrase_chars,
            });
        }
        if let Some(id) = &options.id {
            validate_id(id)?;
        }

        let chunks = tokenize(phrase);
        if chunks.is_empty() {
            return Err(PuzzleError::EmptyPhrase);
        }

        let choice = select_width(
            &chunks,
            options.min_width,
            options.max_width,
            self.limits.max_cols,
        )?;
        debug!(
            width = choice.width,
            rows = choice.rows.len(),
            candidates = choice.candidates.len(),
            "width selected"
        );

        let split: Vec<SplitRow> = choice
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| split_row(row, i, choice.width))
            .collect::<Result<_, _>>()?;

        let grid = shift_rows(&split, &options.pins, choice.width)?;

        let debug = options.debug.then(|| PuzzleDebug {
            packed: choice.rows.iter().map(|r| r.raw.clone()).collect(),
            shifts: grid.shifts.clone(),
            widths: choice.candidates.clone(),
        });

        let id = match &options.id {
            Some(id) => id.trim().to_string(),
            None => self.ids.next_id(),
        };

        Ok(Puzzle {
            schema: SCHEMA_VERSION.to_string(),
            id,
            rows: grid.solution.len(),
            cols: choice.width,
            solution: grid.solution,
            overlay: grid.overlay,
            meta: PuzzleMeta {
                phrase: Some(phrase.to_string()),
                author: options.author.clone(),
                date: Some(self.clock.now().format("%Y-%m-%d").to_string()),
            },
            debug,
        })
    }
}

fn validate_id(id: &str) -> Result<(), PuzzleError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(PuzzleError::InvalidOptions("id cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_ID_CHARS {
        return Err(PuzzleError::InvalidOptions(format!(
            "id exceeds {MAX_ID_CHARS} characters"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
