//! The line window decorations are computed for.

use crate::position::LineRange;

/// Lines added above and below the visible range.
pub const DEFAULT_VIEWPORT_MARGIN: usize = 30;

/// Visible lines expanded by a margin and clamped to `[0, line_count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First eligible line.
    pub start_line: usize,
    /// Last eligible line (may equal the document's line count).
    pub end_line: usize,
}

impl Viewport {
    /// Create a viewport directly.
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Expand the host's visible range by `margin` lines on each side.
    pub fn from_visible(visible: LineRange, margin: usize, line_count: usize) -> Self {
        let start = visible.start.min(line_count);
        let end = visible.end.min(line_count);

        Self {
            start_line: start.saturating_sub(margin),
            end_line: end.saturating_add(margin).min(line_count),
        }
    }

    /// Returns `true` if every line in `start_line..=end_line` lies within the viewport.
    pub fn contains_lines(&self, start_line: usize, end_line: usize) -> bool {
        self.start_line <= start_line && end_line <= self.end_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_document_clamps_to_whole_document() {
        for visible in [
            LineRange::new(0, 0),
            LineRange::new(3, 7),
            LineRange::new(9, 9),
            LineRange::new(50, 80),
        ] {
            assert_eq!(
                Viewport::from_visible(visible, DEFAULT_VIEWPORT_MARGIN, 10),
                Viewport::new(0, 10)
            );
        }
    }

    #[test]
    fn test_margin_expands_both_sides() {
        let viewport = Viewport::from_visible(LineRange::new(100, 140), 30, 1000);
        assert_eq!(viewport, Viewport::new(70, 170));
        assert!(viewport.contains_lines(70, 170));
        assert!(!viewport.contains_lines(69, 80));
        assert!(!viewport.contains_lines(160, 171));
    }
}
