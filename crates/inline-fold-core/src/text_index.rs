//! Offset/position mapping over a document snapshot.
//!
//! Regex matches are reported in UTF-8 byte offsets, decorations are anchored in character
//! offsets and hosts speak line/column. [`TextIndex`] converts between the three using a rope,
//! so each conversion is `O(log N)` regardless of document size.

use crate::position::Position;
use ropey::Rope;

/// Rope-backed index over one version of the document text.
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    rope: Rope,
}

impl TextIndex {
    /// Build an index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count (an empty document, or a trailing `\n`, still counts a line)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total byte count
    pub fn byte_count(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Convert a UTF-8 byte offset into a character offset (clamped to the document).
    pub fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.rope.byte_to_char(byte_offset.min(self.rope.len_bytes()))
    }

    /// Get line/column from a character offset (clamped to the document).
    pub fn char_offset_to_position(&self, char_offset: usize) -> Position {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line);
        Position::new(line, char_offset - line_start_char)
    }

    /// Get character offset from a position; columns past the line end clamp to the line end.
    pub fn position_to_char_offset(&self, pos: Position) -> usize {
        if pos.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start_char = self.rope.line_to_char(pos.line);
        line_start_char + pos.column.min(self.line_len_chars(pos.line))
    }

    /// Length of a line in characters, excluding its line terminator.
    pub fn line_len_chars(&self, line: usize) -> usize {
        self.line_text(line)
            .map(|text| text.chars().count())
            .unwrap_or(0)
    }

    /// Get text of the specified line (excluding `\n` / `\r\n`)
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }

        Some(text)
    }

    /// Insert text at a character offset (clamped to the document end).
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Get complete text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}
