//! Client-side cursor over the document content stream
//!
//! The editor applies a batch in order but resolves every index against the
//! document as it stands before each operation, so the planner has to know
//! in advance how far each insertion pushes the content behind it. All
//! emission goes through `advance`; nothing moves the cursor any other way.

/// First writable offset of an empty body (offset 0 is the section break).
pub const BODY_START: u32 = 1;

/// Length of `text` in the editor's content units (UTF-16 code units).
pub fn text_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTracker {
    position: u32,
}

impl OffsetTracker {
    pub fn new(start: u32) -> Self {
        Self { position: start }
    }

    pub fn current(&self) -> u32 {
        self.position
    }

    /// Move forward by `n` units and return the position before the move,
    /// which is where the content just planned gets inserted.
    pub fn advance(&mut self, n: u32) -> u32 {
        let at = self.position;
        self.position += n;
        at
    }

    /// Replace the simulated position with one read back from the editor.
    pub fn resync(&mut self, position: u32) {
        self.position = position;
    }

    /// Plain text with no trailing newline.
    pub fn advance_text(&mut self, text: &str) -> u32 {
        self.advance(text_len(text))
    }

    /// Text followed by a newline.
    pub fn advance_line(&mut self, text: &str) -> u32 {
        self.advance(text_len(text) + 1)
    }

    /// Line break, page break or inline image.
    pub fn advance_break(&mut self) -> u32 {
        self.advance(1)
    }

    /// A freshly inserted `rows` x `columns` table: one boundary per cell plus
    /// the table start marker. Cell content is written afterwards through a
    /// `CellWriter`, and the cursor is resynced once the batch is applied.
    pub fn advance_table(&mut self, rows: u32, columns: u32) -> u32 {
        self.advance(rows * columns + 1)
    }
}

impl Default for OffsetTracker {
    fn default() -> Self {
        Self::new(BODY_START)
    }
}
