//! Insert and wrap commands.
//!
//! Both commands work on the primary selection only. Markers are placed at the first non-blank
//! column of a line and the line's indentation is repeated after the inserted line break, so the
//! annotated code keeps its alignment.

use crate::catalog::IdCatalog;
use crate::edit::TextEdit;
use crate::error::AnnotateError;
use crate::prompt::{Prompt, resolve_injector_id};
use inline_fold_core::{Position, Selection, TextEditor};

/// Command id of the wrap command.
pub const WRAP_COMMAND: &str = "injectorId.wrap";

/// Command id of the insert command.
pub const INSERT_COMMAND: &str = "injectorId.insert";

/// Shown when wrap runs without a selection.
pub const WRAP_EMPTY_SELECTION_MESSAGE: &str = "Please select text to wrap with injector id.";

/// Single-point marker: `/** @injector-id: <id> */`.
pub fn id_marker(id: &str) -> String {
    format!("/** @injector-id: {} */", id)
}

/// Opening block marker: `/** @injector-start: <id> */`.
pub fn start_marker(id: &str) -> String {
    format!("/** @injector-start: {} */", id)
}

/// Closing block marker: `/** @injector-stop: <id> */`.
pub fn stop_marker(id: &str) -> String {
    format!("/** @injector-stop: {} */", id)
}

/// Build the edits of the insert command.
///
/// With a caret the marker goes right after it, preceded by a space. With a selection it goes on
/// its own line above the selection's first line.
pub fn insert_edits<E, P>(
    editor: &E,
    catalog: &IdCatalog,
    prompt: &mut P,
) -> Result<Vec<TextEdit>, AnnotateError>
where
    E: TextEditor + ?Sized,
    P: Prompt + ?Sized,
{
    let id = resolve_injector_id(catalog, prompt)?;
    let selection = primary_selection(editor)?;
    let marker = id_marker(&id);

    let edit = if selection.is_empty() {
        TextEdit::insert(selection.start, format!(" {}", marker))
    } else {
        let start = selection.range().start;
        let (indent_column, indent) = indentation(editor, start.line);
        TextEdit::insert(
            Position::new(start.line, indent_column),
            format!("{}\n{}", marker, indent),
        )
    };

    tracing::debug!(id = %id, position = ?edit.position, "injector id inserted");
    Ok(vec![edit])
}

/// Build the edits of the wrap command.
///
/// An empty selection shows [`WRAP_EMPTY_SELECTION_MESSAGE`] before any prompt opens.
pub fn wrap_edits<E, P>(
    editor: &E,
    catalog: &IdCatalog,
    prompt: &mut P,
) -> Result<Vec<TextEdit>, AnnotateError>
where
    E: TextEditor + ?Sized,
    P: Prompt + ?Sized,
{
    let selection = primary_selection(editor)?;
    if selection.is_empty() {
        prompt.show_error(WRAP_EMPTY_SELECTION_MESSAGE);
        return Err(AnnotateError::EmptySelection);
    }

    let id = resolve_injector_id(catalog, prompt)?;
    let range = selection.range();

    let (start_column, start_indent) = indentation(editor, range.start.line);
    let (_, end_indent) = indentation(editor, range.end.line);
    let end_column = editor
        .line_text(range.end.line)
        .map(|line| line.chars().count())
        .unwrap_or(0);

    tracing::debug!(
        id = %id,
        start_line = range.start.line,
        end_line = range.end.line,
        "selection wrapped with injector id"
    );
    Ok(vec![
        TextEdit::insert(
            Position::new(range.start.line, start_column),
            format!("{}\n{}", start_marker(&id), start_indent),
        ),
        TextEdit::insert(
            Position::new(range.end.line, end_column),
            format!("\n{}{}", end_indent, stop_marker(&id)),
        ),
    ])
}

fn primary_selection<E>(editor: &E) -> Result<Selection, AnnotateError>
where
    E: TextEditor + ?Sized,
{
    editor
        .selections()
        .first()
        .copied()
        .ok_or(AnnotateError::NoSelection)
}

/// Column of the first non-blank character and the whitespace before it. A blank line has no
/// indentation.
fn indentation<E>(editor: &E, line: usize) -> (usize, String)
where
    E: TextEditor + ?Sized,
{
    let text = editor.line_text(line).unwrap_or_default();
    match text.chars().position(|ch| !ch.is_whitespace()) {
        Some(column) => (column, text.chars().take(column).collect()),
        None => (0, String::new()),
    }
}
