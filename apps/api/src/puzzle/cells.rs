//! Cell Splitter — separates letters from fixed overlay characters.

use crate::puzzle::errors::{PuzzleError, WidthProblem};
use crate::puzzle::packer::PackedRow;

/// An overlay character in row-local (pre-shift) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalOverlay {
    pub col: usize,
    pub ch: char,
}

/// A packed row split into grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRow {
    /// Exactly `width` cells, each `A–Z` or a space.
    pub cells: Vec<char>,
    pub overlay: Vec<LocalOverlay>,
    /// Cells actually used before padding.
    pub raw_len: usize,
}

impl SplitRow {
    pub fn slack(&self) -> usize {
        self.cells.len() - self.raw_len
    }
}

/// Converts row `row_index` into a letter/space row plus overlay entries.
///
/// Every character advances the column, overlay characters included. A row
/// longer than `width` is rejected rather than truncated.
pub fn split_row(row: &PackedRow, row_index: usize, width: usize) -> Result<SplitRow, PuzzleError> {
    if row.len > width {
        return Err(PuzzleError::WidthUnfittable(WidthProblem::RowOverflow {
            row: row_index,
            len: row.len,
            width,
        }));
    }

    let mut cells = Vec::with_capacity(width);
    let mut overlay = Vec::new();

    for (col, ch) in row.raw.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            cells.push(ch);
        } else if ch.is_whitespace() {
            cells.push(' ');
        } else {
            overlay.push(LocalOverlay { col, ch });
            cells.push(' ');
        }
    }

    let raw_len = cells.len();
    cells.resize(width, ' ');

    Ok(SplitRow {
        cells,
        overlay,
        raw_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(raw: &str) -> PackedRow {
        PackedRow {
            raw: raw.to_string(),
            len: raw.chars().count(),
        }
    }

    fn row_string(split: &SplitRow) -> String {
        split.cells.iter().collect()
    }

    #[test]
    fn test_split_apostrophe_becomes_overlay() {
        let split = split_row(&packed("DON'T STOP"), 0, 10).unwrap();
        assert_eq!(row_string(&split), "DON T STOP");
        assert_eq!(split.overlay, vec![LocalOverlay { col: 3, ch: '\'' }]);
        assert_eq!(split.slack(), 0);
    }

    #[test]
    fn test_split_hyphen_keeps_its_cell() {
        let split = split_row(&packed("GHOST-WHITE"), 0, 11).unwrap();
        assert_eq!(row_string(&split), "GHOST WHITE");
        assert_eq!(split.overlay, vec![LocalOverlay { col: 5, ch: '-' }]);
    }

    #[test]
    fn test_split_pads_to_width() {
        let split = split_row(&packed("123 GO."), 0, 10).unwrap();
        assert_eq!(row_string(&split), "    GO    ");
        assert_eq!(split.raw_len, 7);
        assert_eq!(split.slack(), 3);
        let chars: Vec<char> = split.overlay.iter().map(|o| o.ch).collect();
        assert_eq!(chars, vec!['1', '2', '3', '.']);
        assert_eq!(split.overlay[3].col, 6);
    }

    #[test]
    fn test_split_non_ascii_letter_is_overlay() {
        let split = split_row(&packed("CAFé"), 0, 4).unwrap();
        assert_eq!(row_string(&split), "CAF ");
        assert_eq!(split.overlay, vec![LocalOverlay { col: 3, ch: 'é' }]);
    }

    #[test]
    fn test_split_overflow_is_rejected() {
        let err = split_row(&packed("ABCDEFGH"), 2, 5).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::WidthUnfittable(WidthProblem::RowOverflow {
                row: 2,
                len: 8,
                width: 5
            })
        );
    }
}
