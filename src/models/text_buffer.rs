//! Rope-backed text model the commit algorithm edits against.

use crate::surface::EditSurface;
use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use unicode_xid::UnicodeXID;

/// Borrows the slice as `&str` when it is contiguous, copies otherwise.
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// Rope text plus a char-offset cursor and an edit version counter.
#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
    version: u64,
    indent_width: u8,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: 0,
            version: 0,
            indent_width: 4,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            version: 0,
            indent_width: 4,
        }
    }

    pub fn with_indent_width(mut self, indent_width: u8) -> Self {
        self.indent_width = indent_width.max(1);
        self
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Bumped on every mutation; a stable version after a commit means the
    /// buffer already read correctly.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Inserts at the cursor and leaves the cursor after the text.
    pub fn insert(&mut self, text: &str) {
        let at = self.cursor.min(self.rope.len_chars());
        self.rope.insert(at, text);
        self.cursor = at.saturating_add(text.chars().count());
        self.version = self.version.saturating_add(1);
    }

    /// Start of the identifier ending at `offset`; `offset` itself when no
    /// identifier char precedes it. Hosts use this to find the base
    /// position of the prefix being completed.
    pub fn word_start_before(&self, offset: usize) -> usize {
        let mut start = offset.min(self.rope.len_chars());
        while start > 0 {
            let ch = self.rope.char(start - 1);
            if ch == '_' || UnicodeXID::is_xid_continue(ch) {
                start -= 1;
            } else {
                break;
            }
        }
        start
    }

    fn leading_blank_prefix(&self, line: usize) -> String {
        let text = slice_to_cow(self.rope.line(line));
        text.chars()
            .take_while(|ch| *ch == ' ' || *ch == '\t')
            .collect()
    }

    /// Re-indents the lines of `start..end` after the first one: each gets
    /// the first line's leading whitespace plus one indent unit per brace
    /// still open above it. Blank lines are left alone.
    fn reindent_span(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        let start = start.min(len);
        let end = end.min(len).max(start);

        let first_line = self.rope.char_to_line(start);
        let last_line = self.rope.char_to_line(end);
        if last_line == first_line {
            return;
        }

        let base_prefix = self.leading_blank_prefix(first_line);
        let mut depth = 0usize;
        let mut changed = false;

        for line in first_line..=last_line {
            let text = slice_to_cow(self.rope.line(line)).into_owned();
            let body = text.strip_suffix('\n').unwrap_or(&text);
            let body = body.strip_suffix('\r').unwrap_or(body);

            if line > first_line && !body.trim().is_empty() {
                let effective = if body.trim_start().starts_with('}') {
                    depth.saturating_sub(1)
                } else {
                    depth
                };
                let mut target = base_prefix.clone();
                for _ in 0..effective.saturating_mul(usize::from(self.indent_width)) {
                    target.push(' ');
                }

                let current_cols = body
                    .chars()
                    .take_while(|ch| *ch == ' ' || *ch == '\t')
                    .count();
                let target_cols = target.chars().count();

                if !body.starts_with(&target) || current_cols != target_cols {
                    let line_start = self.rope.line_to_char(line);
                    let ws_end = line_start.saturating_add(current_cols);
                    self.rope.remove(line_start..ws_end);
                    self.rope.insert(line_start, &target);
                    if self.cursor >= ws_end {
                        self.cursor = self
                            .cursor
                            .saturating_sub(current_cols)
                            .saturating_add(target_cols);
                    }
                    changed = true;
                }
            }

            for ch in body.chars() {
                match ch {
                    '{' => depth = depth.saturating_add(1),
                    '}' => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
        }

        if changed {
            self.version = self.version.saturating_add(1);
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSurface for TextBuffer {
    fn cursor_offset(&self) -> usize {
        self.cursor
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    fn text_at(&self, start: usize, len: usize) -> String {
        let total = self.rope.len_chars();
        let start = start.min(total);
        let end = start.saturating_add(len).min(total);
        slice_to_cow(self.rope.slice(start..end)).into_owned()
    }

    fn line_start_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len_chars());
        self.rope.line_to_char(self.rope.char_to_line(offset))
    }

    fn line_end_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let line_start = self.rope.line_to_char(line);
        let text = slice_to_cow(self.rope.line(line));
        let body = text.strip_suffix('\n').unwrap_or(&text);
        let body = body.strip_suffix('\r').unwrap_or(body);
        line_start.saturating_add(body.chars().count())
    }

    fn set_cursor_offset(&mut self, offset: usize) {
        self.cursor = offset.min(self.rope.len_chars());
    }

    fn replace(&mut self, len: usize, text: &str) {
        let start = self.cursor.min(self.rope.len_chars());
        let end = start.saturating_add(len).min(self.rope.len_chars());
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.cursor = start.saturating_add(text.chars().count());
        self.version = self.version.saturating_add(1);
    }

    fn auto_indent(&mut self, start: usize, end: usize) {
        self.reindent_span(start, end);
    }
}
