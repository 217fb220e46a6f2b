//! Edit descriptors.

use inline_fold_core::{Position, TextIndex};

/// Insert `text` at `position`. Columns past the line end mean the line end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Where to insert, in pre-edit coordinates.
    pub position: Position,
    /// What to insert.
    pub text: String,
}

impl TextEdit {
    /// Create an insertion.
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// Apply `edits` to `text` as one batch.
///
/// All positions refer to the original text. Insertions at the same position keep their list
/// order.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut index = TextIndex::from_text(text);
    let mut offsets: Vec<(usize, &str)> = edits
        .iter()
        .map(|edit| (index.position_to_char_offset(edit.position), edit.text.as_str()))
        .collect();
    offsets.sort_by_key(|(offset, _)| *offset);

    for (offset, insert) in offsets.into_iter().rev() {
        index.insert(offset, insert);
    }
    index.text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_refer_to_original_text() {
        let edits = vec![
            TextEdit::insert(Position::new(0, 0), "<"),
            TextEdit::insert(Position::new(1, 99), ">"),
            TextEdit::insert(Position::new(0, 0), "["),
        ];
        assert_eq!(apply_edits("ab\ncd\n", &edits), "<[ab\ncd>\n");
    }
}
