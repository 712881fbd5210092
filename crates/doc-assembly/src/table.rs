//! Cell offsets inside a freshly inserted table
//!
//! Inserting a table at `location` first splits the paragraph there with a
//! newline, so the table itself starts at `location + 1`. Inside, each row
//! opens with a row marker and each cell with a cell marker followed by an
//! empty paragraph. Content can't be written while the table is created; it
//! is appended afterwards, cell by cell in row-major order, and each write
//! shifts every later cell by the written length.

use crate::cursor::OffsetTracker;
use crate::error::PlanError;
use crate::operations::{EditBatch, EditOperation, Range, TextStyle};
use crate::styles::Rgb;

/// Newline before the table.
const TABLE_START_OFFSET: u32 = 1;
/// Newline, table start, first row start, first cell start.
const FIRST_CELL_OFFSET: u32 = 4;
/// Cell paragraph end, next cell start.
const CELL_BOUNDARY: u32 = 2;
/// Cell paragraph end, next row start, its first cell start.
const ROW_BOUNDARY: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableAnchor {
    pub location: u32,
    pub rows: u32,
    pub columns: u32,
}

impl TableAnchor {
    pub fn new(location: u32, rows: u32, columns: u32) -> Self {
        Self {
            location,
            rows,
            columns,
        }
    }

    pub fn insert_operation(&self) -> EditOperation {
        EditOperation::table(self.location, self.rows, self.columns)
    }

    /// Index the editor uses to address the table in cell-style requests.
    pub fn table_start(&self) -> u32 {
        self.location + TABLE_START_OFFSET
    }

    /// Content offset of cell (0, 0) while the table is still empty.
    pub fn first_cell(&self) -> u32 {
        self.location + FIRST_CELL_OFFSET
    }

    pub fn cell_background(&self, row: u32, column: u32, color: Rgb) -> EditOperation {
        EditOperation::cell_background(self.table_start(), row, column, color.to_color())
    }
}

/// Writes cell content in row-major order, tracking how each write and each
/// cell boundary moves the next cell's offset.
#[derive(Debug)]
pub struct CellWriter {
    anchor: TableAnchor,
    cursor: OffsetTracker,
    written: u32,
}

impl CellWriter {
    pub fn new(anchor: TableAnchor) -> Self {
        Self {
            anchor,
            cursor: OffsetTracker::new(anchor.first_cell()),
            written: 0,
        }
    }

    pub fn anchor(&self) -> TableAnchor {
        self.anchor
    }

    /// Write `text` into the next cell and return where it was inserted.
    ///
    /// Empty text still consumes the cell but emits nothing; the editor
    /// rejects empty insertions and empty style ranges.
    pub fn write(
        &mut self,
        batch: &mut EditBatch,
        text: &str,
        style: TextStyle,
    ) -> Result<u32, PlanError> {
        if self.written >= self.anchor.rows * self.anchor.columns {
            return Err(PlanError::TableOverflow {
                rows: self.anchor.rows,
                columns: self.anchor.columns,
            });
        }

        match self.written {
            0 => {}
            n if n % self.anchor.columns == 0 => {
                self.cursor.advance(ROW_BOUNDARY);
            }
            _ => {
                self.cursor.advance(CELL_BOUNDARY);
            }
        }
        self.written += 1;

        let at = self.cursor.advance_text(text);
        if !text.is_empty() {
            batch.push(EditOperation::insert_text(at, text));
            batch.push(EditOperation::text_style(
                Range::new(at, self.cursor.current()),
                style,
            ));
        }
        Ok(at)
    }
}
