#![warn(missing_docs)]
//! Inline Fold Annotate - injector-id insert/wrap commands
//!
//! # Overview
//!
//! Companion commands for `inline-fold-core`: they write the annotations the fold controller
//! later hides. The host supplies the id catalog (the JSON payload of its id service), a
//! [`Prompt`] for the quick-pick and input box, and a [`TextEditor`] to read lines and selections
//! from. Commands never touch the buffer themselves; they return [`TextEdit`] lists that the host
//! applies as one undo step.
//!
//! ```rust
//! use inline_fold_annotate::{IdCatalog, InputRequest, IdEntry, Prompt, apply_edits, wrap_edits};
//! use inline_fold_core::{MemoryEditor, Position, Selection};
//!
//! struct FirstEntry;
//!
//! impl Prompt for FirstEntry {
//!     fn pick<'a>(&mut self, items: &'a [IdEntry]) -> Option<&'a IdEntry> {
//!         items.first()
//!     }
//!     fn input(&mut self, _request: &InputRequest) -> Option<String> {
//!         Some("login".to_string())
//!     }
//!     fn show_error(&mut self, _message: &str) {}
//! }
//!
//! let catalog = IdCatalog::from_json(
//!     r#"{"result": [{"title": "Auth flow", "injectorId": "auth-{name}"}]}"#,
//! )
//! .unwrap();
//!
//! let text = "fn main() {\n    run();\n}\n";
//! let mut editor = MemoryEditor::new("rust", text);
//! editor.set_selections(vec![Selection::new(Position::new(1, 4), Position::new(1, 10))]);
//!
//! let edits = wrap_edits(&editor, &catalog, &mut FirstEntry).unwrap();
//! assert_eq!(
//!     apply_edits(text, &edits),
//!     "fn main() {\n    /** @injector-start: auth-login */\n    run();\n    /** @injector-stop: auth-login */\n}\n"
//! );
//! ```
//!
//! # Module Description
//!
//! - [`catalog`] - id list parsing
//! - [`prompt`] - host UI seam and id resolution
//! - [`commands`] - insert and wrap edit builders
//! - [`edit`] - edit descriptors and headless application

pub mod catalog;
pub mod commands;
pub mod edit;
pub mod error;
pub mod prompt;

pub use catalog::{IdCatalog, IdEntry};
pub use commands::{
    INSERT_COMMAND, WRAP_COMMAND, WRAP_EMPTY_SELECTION_MESSAGE, id_marker, insert_edits,
    start_marker, stop_marker, wrap_edits,
};
pub use edit::{TextEdit, apply_edits};
pub use error::AnnotateError;
pub use prompt::{InputRequest, Prompt, resolve_injector_id};

#[doc(no_inline)]
pub use inline_fold_core::TextEditor;
