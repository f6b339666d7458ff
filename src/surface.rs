//! Editing surface contract the commit engine writes through.
//!
//! Hosts adapt their text widget to this trait; `models::TextBuffer` is the
//! built-in rope implementation. All offsets count chars, not bytes.

pub trait EditSurface {
    /// Current cursor position as a char offset.
    fn cursor_offset(&self) -> usize;

    /// Char at `offset`, `None` past the end of the document.
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Up to `len` chars starting at `offset`, clamped to the document end.
    fn text_at(&self, offset: usize, len: usize) -> String;

    /// Offset of the first char of the line containing `offset`.
    fn line_start_offset(&self, offset: usize) -> usize;

    /// Offset one past the last char of the line containing `offset`, line
    /// break excluded.
    fn line_end_offset(&self, offset: usize) -> usize;

    /// Moves the cursor, clamping into the document.
    fn set_cursor_offset(&mut self, offset: usize);

    /// Replaces `len` chars starting at the cursor. The cursor ends up
    /// after the inserted text.
    fn replace(&mut self, len: usize, text: &str);

    /// Re-indents the lines covered by `start..end`.
    fn auto_indent(&mut self, start: usize, end: usize);
}
