//! Table grid payload and its mutation engine.
//!
//! Cells are stored sparse: a missing `(row, column)` pair means an empty
//! slot, not a structural hole. Most table cells are never written, so the
//! sparse vector trades a linear scan on lookup for memory — tables are
//! user-sized (tens of cells), never bulk data.

use crate::RichTextValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default width assigned to new or missing column entries.
pub const DEFAULT_COLUMN_WIDTH: f64 = 150.0;
/// Default height assigned to new or missing row entries.
pub const DEFAULT_ROW_HEIGHT: f64 = 36.0;
/// Lower clamp applied by [`TableGrid::set_column_width`].
pub const MIN_COLUMN_WIDTH: f64 = 40.0;
/// Lower clamp applied by [`TableGrid::set_row_height`].
pub const MIN_ROW_HEIGHT: f64 = 20.0;

/// One populated slot of a [`TableGrid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub id: String,
    pub row: usize,
    pub column: usize,
    pub content: RichTextValue,
}

/// The row/column structure of a Table block.
///
/// Invariants maintained by every mutator:
///
/// - `row_count` and `column_count` are always ≥ 1 (the last row/column
///   cannot be removed; such calls are silent no-ops).
/// - Every cell's coordinates lie within the current counts.
/// - The size arrays are grown on demand with default-filled padding and
///   never shrunk implicitly; a missing entry reads as the default size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    pub title: String,
    row_count: usize,
    column_count: usize,
    column_widths: Vec<f64>,
    row_heights: Vec<f64>,
    cells: Vec<TableCell>,
}

impl TableGrid {
    /// Creates an empty grid. Counts below 1 are raised to 1.
    pub fn new(rows: usize, columns: usize) -> Self {
        let row_count = rows.max(1);
        let column_count = columns.max(1);
        Self {
            title: String::new(),
            row_count,
            column_count,
            column_widths: vec![DEFAULT_COLUMN_WIDTH; column_count],
            row_heights: vec![DEFAULT_ROW_HEIGHT; row_count],
            cells: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// All populated cells, in insertion order.
    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    /// Mutable cell access for the clone pass, which re-mints cell ids.
    pub(crate) fn cells_mut(&mut self) -> &mut [TableCell] {
        &mut self.cells
    }

    /// Returns the content at `(row, column)`, or `None` for an empty slot.
    pub fn get_cell(&self, row: usize, column: usize) -> Option<&RichTextValue> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
            .map(|c| &c.content)
    }

    /// Writes `content` at `(row, column)`, creating the cell on first write.
    ///
    /// Coordinates outside the current counts are ignored so the
    /// in-bounds invariant can never be violated by a stray write.
    pub fn set_cell(&mut self, row: usize, column: usize, content: RichTextValue) {
        if row >= self.row_count || column >= self.column_count {
            log::warn!(
                "set_cell({row}, {column}) outside {}x{} grid ignored",
                self.row_count,
                self.column_count
            );
            return;
        }
        if let Some(cell) = self
            .cells
            .iter_mut()
            .find(|c| c.row == row && c.column == column)
        {
            cell.content = content;
        } else {
            self.cells.push(TableCell {
                id: Uuid::new_v4().to_string(),
                row,
                column,
                content,
            });
        }
    }

    /// Inserts a new empty row before index `at`.
    ///
    /// Every cell with `row >= at` shifts down by one; a default-height
    /// entry is spliced into the size array at `at` (appended when `at`
    /// is beyond the array's current length). `at` values beyond the
    /// current row count append at the end.
    pub fn insert_row(&mut self, at: usize) {
        let at = at.min(self.row_count);
        for cell in &mut self.cells {
            if cell.row >= at {
                cell.row += 1;
            }
        }
        if at <= self.row_heights.len() {
            self.row_heights.insert(at, DEFAULT_ROW_HEIGHT);
        } else {
            self.row_heights.push(DEFAULT_ROW_HEIGHT);
        }
        self.row_count += 1;
    }

    /// Inserts a new empty column before index `at`. See [`Self::insert_row`].
    pub fn insert_column(&mut self, at: usize) {
        let at = at.min(self.column_count);
        for cell in &mut self.cells {
            if cell.column >= at {
                cell.column += 1;
            }
        }
        if at <= self.column_widths.len() {
            self.column_widths.insert(at, DEFAULT_COLUMN_WIDTH);
        } else {
            self.column_widths.push(DEFAULT_COLUMN_WIDTH);
        }
        self.column_count += 1;
    }

    /// Appends a row after the current last row.
    pub fn add_row(&mut self) {
        self.insert_row(self.row_count);
    }

    /// Appends a column after the current last column.
    pub fn add_column(&mut self) {
        self.insert_column(self.column_count);
    }

    /// Removes the row at `at` (the last row when `None`).
    ///
    /// Silent no-op when only one row remains or `at` is out of bounds;
    /// callers that need to detect refusal compare `row_count` before and
    /// after. Cells on the removed row are deleted, cells below shift up,
    /// and the size-array entry is removed if present.
    pub fn remove_row(&mut self, at: Option<usize>) {
        if self.row_count <= 1 {
            return;
        }
        let at = at.unwrap_or(self.row_count - 1);
        if at >= self.row_count {
            return;
        }
        self.cells.retain(|c| c.row != at);
        for cell in &mut self.cells {
            if cell.row > at {
                cell.row -= 1;
            }
        }
        if at < self.row_heights.len() {
            self.row_heights.remove(at);
        }
        self.row_count -= 1;
    }

    /// Removes the column at `at` (the last column when `None`). See [`Self::remove_row`].
    pub fn remove_column(&mut self, at: Option<usize>) {
        if self.column_count <= 1 {
            return;
        }
        let at = at.unwrap_or(self.column_count - 1);
        if at >= self.column_count {
            return;
        }
        self.cells.retain(|c| c.column != at);
        for cell in &mut self.cells {
            if cell.column > at {
                cell.column -= 1;
            }
        }
        if at < self.column_widths.len() {
            self.column_widths.remove(at);
        }
        self.column_count -= 1;
    }

    /// Width of column `at`; missing entries read as the default.
    pub fn column_width(&self, at: usize) -> f64 {
        self.column_widths
            .get(at)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Height of row `at`; missing entries read as the default.
    pub fn row_height(&self, at: usize) -> f64 {
        self.row_heights
            .get(at)
            .copied()
            .unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Sets the width of column `at`, clamped to [`MIN_COLUMN_WIDTH`].
    ///
    /// The size array is grown with default-filled padding when `at` is
    /// beyond its current length, then the slot is overwritten.
    pub fn set_column_width(&mut self, at: usize, value: f64) {
        while self.column_widths.len() <= at {
            self.column_widths.push(DEFAULT_COLUMN_WIDTH);
        }
        self.column_widths[at] = value.max(MIN_COLUMN_WIDTH);
    }

    /// Sets the height of row `at`, clamped to [`MIN_ROW_HEIGHT`].
    pub fn set_row_height(&mut self, at: usize, value: f64) {
        while self.row_heights.len() <= at {
            self.row_heights.push(DEFAULT_ROW_HEIGHT);
        }
        self.row_heights[at] = value.max(MIN_ROW_HEIGHT);
    }
}

impl Default for TableGrid {
    /// The grid inserted by the "add table" action: 2×2, all defaults.
    fn default() -> Self {
        Self::new(2, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x3_with_center() -> TableGrid {
        let mut grid = TableGrid::new(3, 3);
        grid.set_cell(1, 1, RichTextValue::from("X"));
        grid
    }

    #[test]
    fn test_get_cell_empty_slot_is_none() {
        let grid = TableGrid::new(2, 2);
        assert!(grid.get_cell(0, 0).is_none());
        assert!(grid.get_cell(1, 1).is_none());
    }

    #[test]
    fn test_set_cell_creates_then_overwrites() {
        let mut grid = TableGrid::new(2, 2);
        grid.set_cell(0, 1, RichTextValue::from("a"));
        grid.set_cell(0, 1, RichTextValue::from("b"));
        assert_eq!(grid.get_cell(0, 1).unwrap().plain_text(), "b");
        assert_eq!(grid.cells().len(), 1);
    }

    #[test]
    fn test_set_cell_out_of_bounds_is_ignored() {
        let mut grid = TableGrid::new(2, 2);
        grid.set_cell(5, 0, RichTextValue::from("x"));
        assert!(grid.cells().is_empty());
    }

    #[test]
    fn test_insert_column_shifts_cells_at_boundary() {
        let mut grid = grid_3x3_with_center();
        grid.insert_column(0);
        assert_eq!(grid.column_count(), 4);
        assert_eq!(grid.get_cell(1, 2).unwrap().plain_text(), "X");
        assert!(grid.get_cell(1, 1).is_none());
    }

    #[test]
    fn test_insert_row_at_equal_index_shifts_not_skips() {
        let mut grid = grid_3x3_with_center();
        // Boundary: a cell whose row == at must shift.
        grid.insert_row(1);
        assert_eq!(grid.get_cell(2, 1).unwrap().plain_text(), "X");
        assert!(grid.get_cell(1, 1).is_none());
        assert_eq!(grid.row_count(), 4);
    }

    #[test]
    fn test_add_row_appends_without_shifting() {
        let mut grid = grid_3x3_with_center();
        grid.add_row();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.get_cell(1, 1).unwrap().plain_text(), "X");
    }

    #[test]
    fn test_remove_last_row_refuses_when_single() {
        let mut grid = TableGrid::new(1, 3);
        grid.set_cell(0, 2, RichTextValue::from("keep"));
        grid.remove_row(None);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.get_cell(0, 2).unwrap().plain_text(), "keep");
    }

    #[test]
    fn test_remove_last_column_refuses_when_single() {
        let mut grid = TableGrid::new(3, 1);
        grid.remove_column(Some(0));
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn test_remove_row_defaults_to_last() {
        let mut grid = grid_3x3_with_center();
        grid.set_cell(2, 0, RichTextValue::from("bottom"));
        grid.remove_row(None);
        assert_eq!(grid.row_count(), 2);
        assert!(grid.get_cell(2, 0).is_none());
        assert_eq!(grid.get_cell(1, 1).unwrap().plain_text(), "X");
    }

    #[test]
    fn test_remove_row_shifts_greater_rows_down() {
        let mut grid = grid_3x3_with_center();
        grid.set_cell(2, 2, RichTextValue::from("corner"));
        grid.remove_row(Some(0));
        assert_eq!(grid.get_cell(0, 1).unwrap().plain_text(), "X");
        assert_eq!(grid.get_cell(1, 2).unwrap().plain_text(), "corner");
    }

    #[test]
    fn test_insert_then_remove_is_inverse() {
        let original = {
            let mut g = grid_3x3_with_center();
            g.set_cell(0, 0, RichTextValue::from("tl"));
            g.set_cell(2, 2, RichTextValue::from("br"));
            g
        };
        for k in 0..=3 {
            let mut grid = original.clone();
            grid.insert_row(k);
            grid.remove_row(Some(k));
            assert_eq!(grid.row_count(), original.row_count(), "at k={k}");
            for cell in original.cells() {
                assert_eq!(
                    grid.get_cell(cell.row, cell.column).map(|c| c.plain_text()),
                    Some(cell.content.plain_text()),
                    "cell ({}, {}) at k={k}",
                    cell.row,
                    cell.column
                );
            }
            assert_eq!(grid.cells().len(), original.cells().len());
            for at in 0..grid.row_count() {
                assert_eq!(grid.row_height(at), original.row_height(at));
            }
        }
    }

    #[test]
    fn test_size_reads_fall_back_to_defaults() {
        let grid = TableGrid::new(2, 2);
        assert_eq!(grid.column_width(99), DEFAULT_COLUMN_WIDTH);
        assert_eq!(grid.row_height(99), DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_set_column_width_clamps_and_pads() {
        let mut grid = TableGrid::new(1, 1);
        grid.set_column_width(3, 10.0);
        assert_eq!(grid.column_width(3), MIN_COLUMN_WIDTH);
        // Padding slots read as default.
        assert_eq!(grid.column_width(2), DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_set_row_height_overwrites_slot() {
        let mut grid = TableGrid::new(3, 1);
        grid.set_row_height(1, 48.0);
        assert_eq!(grid.row_height(1), 48.0);
        assert_eq!(grid.row_height(0), DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_counts_never_below_one() {
        let grid = TableGrid::new(0, 0);
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.column_count(), 1);
    }
}
