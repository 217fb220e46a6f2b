//! Region scanning.
//!
//! [`RegionScanner::scan`] runs the compiled fold pattern over the whole document and yields a
//! [`MatchRecord`] per match. The fold span is derived from the full match by fixed delimiter
//! widths ([`FOLD_OPEN_WIDTH`] characters in from the start, [`FOLD_CLOSE_WIDTH`] in from the
//! end), which is a property of the annotation syntax (`/** ... */`) rather than of the regex.
//!
//! Every refresh performs a full rescan; there is no incremental reuse across edits.

use crate::error::MalformedPatternError;
use crate::pattern::FoldPattern;
use crate::position::{OffsetRange, Range};
use crate::text_index::TextIndex;
use regex::{CaptureMatches, Regex};
use std::sync::LazyLock;

/// Characters between the start of a match and the start of its fold span.
pub const FOLD_OPEN_WIDTH: usize = 3;

/// Characters between the end of a fold span and the end of its match.
pub const FOLD_CLOSE_WIDTH: usize = 2;

/// Sub-pattern that extracts a display name from the fold target group.
pub const NAME_PATTERN: &str = r"name:([a-zA-Z0-9-]+)";

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("NAME_PATTERN is a valid regex"));

/// One annotated region found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// The full match, in character offsets.
    pub full: OffsetRange,
    /// The span that gets masked, in character offsets.
    pub fold: OffsetRange,
    /// `full` as line/column.
    pub full_range: Range,
    /// `fold` as line/column.
    pub fold_range: Range,
    /// Name extracted from the target group with [`NAME_PATTERN`].
    pub display_name: Option<String>,
    /// The matched text.
    pub text: String,
}

impl MatchRecord {
    /// Tooltip shown when hovering the region.
    pub fn tooltip(&self) -> String {
        format!("Full text {}", self.text)
    }
}

/// Applies a fold pattern to document text.
#[derive(Debug, Clone, Copy)]
pub struct RegionScanner<'p> {
    regex: &'p Regex,
    target_group: usize,
    required_slots: usize,
}

impl<'p> RegionScanner<'p> {
    /// Scanner for a validated pattern.
    pub fn new(pattern: &'p FoldPattern) -> Self {
        Self {
            regex: pattern.regex(),
            target_group: pattern.target_group(),
            required_slots: pattern.required_slots(),
        }
    }

    /// Scanner for an already-normalized regex whose group count has not been validated.
    ///
    /// Matches that expose too few capture slots end the scan with a
    /// [`MalformedPatternError`].
    pub fn from_regex(regex: &'p Regex, fold_group: usize) -> Self {
        Self {
            regex,
            target_group: fold_group + 1,
            required_slots: fold_group + 2,
        }
    }

    /// Start a scan over `text`.
    pub fn scan<'t>(&self, text: &'t str) -> Scan<'p, 't> {
        Scan {
            captures: self.regex.captures_iter(text),
            index: TextIndex::from_text(text),
            target_group: self.target_group,
            required_slots: self.required_slots,
            failed: false,
        }
    }

    /// Scan `text` to completion, failing on the first malformed match.
    pub fn scan_all(&self, text: &str) -> Result<Vec<MatchRecord>, MalformedPatternError> {
        self.scan(text).collect()
    }
}

/// An in-progress scan. Yields nothing further after an error.
pub struct Scan<'r, 't> {
    captures: CaptureMatches<'r, 't>,
    index: TextIndex,
    target_group: usize,
    required_slots: usize,
    failed: bool,
}

impl Iterator for Scan<'_, '_> {
    type Item = Result<MatchRecord, MalformedPatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let caps = self.captures.next()?;
            let Some(full) = caps.get(0) else {
                continue;
            };

            let start = self.index.byte_to_char(full.start());
            if caps.len() < self.required_slots {
                self.failed = true;
                return Some(Err(MalformedPatternError {
                    offset: start,
                    found: caps.len(),
                    expected: self.required_slots,
                }));
            }

            let end = self.index.byte_to_char(full.end());
            let full_span = OffsetRange::new(start, end);
            if full_span.len() < FOLD_OPEN_WIDTH + FOLD_CLOSE_WIDTH {
                tracing::trace!(start, end, "match shorter than fold delimiters, skipped");
                continue;
            }

            let fold_span = OffsetRange::new(start + FOLD_OPEN_WIDTH, end - FOLD_CLOSE_WIDTH);
            let display_name = caps
                .get(self.target_group)
                .and_then(|target| NAME_REGEX.captures(target.as_str()))
                .and_then(|name| name.get(1))
                .map(|name| name.as_str().to_string());

            return Some(Ok(MatchRecord {
                full: full_span,
                fold: fold_span,
                full_range: self.range_for(full_span),
                fold_range: self.range_for(fold_span),
                display_name,
                text: full.as_str().to_string(),
            }));
        }
    }
}

impl Scan<'_, '_> {
    fn range_for(&self, span: OffsetRange) -> Range {
        Range::new(
            self.index.char_offset_to_position(span.start),
            self.index.char_offset_to_position(span.end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    const BLOCK_PATTERN: &str =
        r"(/\*\* @injector-start:[^*]*\*/)([\s\S]*?)/\*\* @injector-stop:[^*]*\*/";

    #[test]
    fn test_scan_annotation_block() {
        let text = "/** @injector-start: name:foo */BODY/** @injector-stop: name:foo */";
        let pattern = FoldPattern::compile(BLOCK_PATTERN, 1, "g").unwrap();
        let records = RegionScanner::new(&pattern).scan_all(text).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.full, OffsetRange::new(0, text.chars().count()));
        assert_eq!(record.display_name.as_deref(), Some("foo"));

        let folded: String = text
            .chars()
            .skip(record.fold.start)
            .take(record.fold.len())
            .collect();
        assert!(folded.starts_with(" @injector-start"));
        assert!(folded.contains("BODY"));
        assert!(folded.ends_with("name:foo "));
    }

    #[test]
    fn test_fold_positions_span_lines() {
        let text = "fn a() {}\n/** @injector-start: x */\nlet y = 1;\n/** @injector-stop: x */\n";
        let pattern = FoldPattern::compile(BLOCK_PATTERN, 1, "").unwrap();
        let records = RegionScanner::new(&pattern).scan_all(text).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.full_range.start, Position::new(1, 0));
        assert_eq!(record.fold_range.start, Position::new(1, 3));
        assert_eq!(record.fold_range.end, Position::new(3, 22));
        assert_eq!(record.display_name, None);
        assert!(record.tooltip().starts_with("Full text /** @injector-start"));
    }

    #[test]
    fn test_offsets_are_characters_not_bytes() {
        let text = "é😀 <<<ab>> z";
        let pattern = FoldPattern::compile(r"(<<<)[a-z]+>>", 1, "").unwrap();
        let records = RegionScanner::new(&pattern).scan_all(text).unwrap();

        assert_eq!(records[0].full, OffsetRange::new(3, 10));
        assert_eq!(records[0].fold, OffsetRange::new(6, 8));
    }

    #[test]
    fn test_short_matches_are_skipped() {
        let pattern = FoldPattern::compile(r"(<)[a-z]*>", 1, "").unwrap();
        let records = RegionScanner::new(&pattern)
            .scan_all("<ab> <abcdef>")
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fold, OffsetRange::new(8, 11));
    }

    #[test]
    fn test_scan_stops_on_malformed_pattern() {
        let regex = Regex::new(r"(<)x+>").unwrap();
        let mut scan = RegionScanner::from_regex(&regex, 1).scan("<xxxx> <xxxx>");

        assert_eq!(
            scan.next(),
            Some(Err(MalformedPatternError {
                offset: 0,
                found: 2,
                expected: 3,
            }))
        );
        assert_eq!(scan.next(), None);
    }
}
