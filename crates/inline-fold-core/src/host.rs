//! Host seams.
//!
//! The text buffer, selection model and decoration painter belong to the host editor. The
//! controller reaches them only through [`TextEditor`] and [`DecorationFactory`].
//! [`MemoryEditor`] is a self-contained implementation of both, suitable for tests and headless
//! tools.

use crate::decorations::{DecorationStyle, DecorationTypeId, FoldDecoration};
use crate::position::{LineRange, Selection};
use crate::text_index::TextIndex;
use std::collections::HashMap;

/// The editor a controller decorates.
pub trait TextEditor {
    /// Language id of the open document (e.g. `"typescript"`).
    fn language_id(&self) -> &str;

    /// Full document text.
    fn text(&self) -> String;

    /// Number of lines in the document.
    fn line_count(&self) -> usize;

    /// Text of one line, without its terminator.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Currently visible line ranges, topmost first.
    fn visible_ranges(&self) -> Vec<LineRange>;

    /// Current selections, primary first.
    fn selections(&self) -> Vec<Selection>;

    /// Replace everything painted with `handle` by `decorations`.
    fn set_decorations(&mut self, handle: DecorationTypeId, decorations: &[FoldDecoration]);
}

/// Creates and releases host decoration types.
pub trait DecorationFactory {
    /// Register a decoration type and return its handle.
    fn create_decoration_type(&mut self, style: &DecorationStyle) -> DecorationTypeId;

    /// Release a handle; its painted decorations disappear.
    fn dispose_decoration_type(&mut self, handle: DecorationTypeId);
}

/// An in-memory editor.
#[derive(Debug, Clone)]
pub struct MemoryEditor {
    language_id: String,
    index: TextIndex,
    visible: Vec<LineRange>,
    selections: Vec<Selection>,
    styles: HashMap<DecorationTypeId, DecorationStyle>,
    painted: HashMap<DecorationTypeId, Vec<FoldDecoration>>,
    next_type_id: u64,
    paint_count: usize,
}

impl MemoryEditor {
    /// Create an editor with every line visible and no selection.
    pub fn new(language_id: impl Into<String>, text: &str) -> Self {
        let index = TextIndex::from_text(text);
        let visible = vec![LineRange::new(0, index.line_count().saturating_sub(1))];
        Self {
            language_id: language_id.into(),
            index,
            visible,
            selections: Vec::new(),
            styles: HashMap::new(),
            painted: HashMap::new(),
            next_type_id: 1,
            paint_count: 0,
        }
    }

    /// Replace the document text (visible ranges and selections are kept).
    pub fn set_text(&mut self, text: &str) {
        self.index = TextIndex::from_text(text);
    }

    /// Change the language id.
    pub fn set_language_id(&mut self, language_id: impl Into<String>) {
        self.language_id = language_id.into();
    }

    /// Set a single visible range.
    pub fn set_visible_range(&mut self, range: LineRange) {
        self.visible = vec![range];
    }

    /// Replace the visible ranges (empty means the editor is not laid out yet).
    pub fn set_visible_ranges(&mut self, ranges: Vec<LineRange>) {
        self.visible = ranges;
    }

    /// Replace the selections.
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections;
    }

    /// What is currently painted with `handle`.
    pub fn decorations(&self, handle: DecorationTypeId) -> &[FoldDecoration] {
        self.painted.get(&handle).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The style a live handle was created with.
    pub fn style(&self, handle: DecorationTypeId) -> Option<&DecorationStyle> {
        self.styles.get(&handle)
    }

    /// Number of live decoration types.
    pub fn live_decoration_types(&self) -> usize {
        self.styles.len()
    }

    /// Number of `set_decorations` calls so far.
    pub fn paint_count(&self) -> usize {
        self.paint_count
    }

    /// The document index.
    pub fn index(&self) -> &TextIndex {
        &self.index
    }
}

impl TextEditor for MemoryEditor {
    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn text(&self) -> String {
        self.index.text()
    }

    fn line_count(&self) -> usize {
        self.index.line_count()
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.index.line_text(line)
    }

    fn visible_ranges(&self) -> Vec<LineRange> {
        self.visible.clone()
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn set_decorations(&mut self, handle: DecorationTypeId, decorations: &[FoldDecoration]) {
        self.paint_count += 1;
        if !self.styles.contains_key(&handle) {
            tracing::warn!(?handle, "painting with a disposed decoration type ignored");
            return;
        }
        self.painted.insert(handle, decorations.to_vec());
    }
}

impl DecorationFactory for MemoryEditor {
    fn create_decoration_type(&mut self, style: &DecorationStyle) -> DecorationTypeId {
        let handle = DecorationTypeId::new(self.next_type_id);
        self.next_type_id += 1;
        self.styles.insert(handle, style.clone());
        handle
    }

    fn dispose_decoration_type(&mut self, handle: DecorationTypeId) {
        self.styles.remove(&handle);
        self.painted.remove(&handle);
    }
}
