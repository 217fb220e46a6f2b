use inline_fold_core::{FoldDecoration, MaskStyle};
use serde_json::{Value, json};

/// Replace each masked span of `text` with its label followed by the style's `after` text.
///
/// A decoration without a name falls back to the style's mask text; with neither the span is
/// simply hidden.
pub fn masked_text(text: &str, masks: &[FoldDecoration], style: &MaskStyle) -> String {
    let mut spans: Vec<&FoldDecoration> = masks.iter().collect();
    spans.sort_by_key(|decoration| decoration.offsets.start);

    let mut out = String::with_capacity(text.len());
    let mut spans = spans.into_iter().peekable();
    let mut skip_until = 0;

    for (offset, ch) in text.chars().enumerate() {
        while let Some(span) = spans.next_if(|span| span.offsets.start <= offset) {
            if span.offsets.start < skip_until {
                tracing::warn!(start = span.offsets.start, "overlapping mask ignored");
                continue;
            }
            if let Some(label) = span.label.as_deref().or(style.before_text.as_deref()) {
                out.push_str(label);
            }
            if let Some(after) = style.after_text.as_deref() {
                out.push_str(after);
            }
            skip_until = span.offsets.end;
        }

        if offset >= skip_until {
            out.push(ch);
        }
    }
    out
}

/// JSON report of one decoration list.
pub fn decorations_json(decorations: &[FoldDecoration]) -> Value {
    Value::Array(
        decorations
            .iter()
            .map(|decoration| {
                json!({
                    "start": [decoration.range.start.line, decoration.range.start.column],
                    "end": [decoration.range.end.line, decoration.range.end.column],
                    "offsets": [decoration.offsets.start, decoration.offsets.end],
                    "label": decoration.label,
                    "tooltip": decoration.tooltip,
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use inline_fold_core::{OffsetRange, Position, Range};

    fn mask(start: usize, end: usize, label: Option<&str>) -> FoldDecoration {
        FoldDecoration {
            range: Range::new(Position::new(0, start), Position::new(0, end)),
            offsets: OffsetRange::new(start, end),
            tooltip: None,
            label: label.map(str::to_string),
        }
    }

    fn style(before: Option<&str>, after: Option<&str>) -> MaskStyle {
        MaskStyle {
            before_text: before.map(str::to_string),
            color: None,
            after_text: after.map(str::to_string),
            letter_spacing: MaskStyle::COLLAPSED_LETTER_SPACING.to_string(),
            hide_text: true,
        }
    }

    #[test]
    fn test_label_then_after_replaces_span() {
        let text = "foo(injector-start: id-1)bar(injector-stop: id-1)";
        let out = masked_text(
            text,
            &[mask(25, 28, Some("auth"))],
            &style(Some("…"), Some(" ▸")),
        );
        assert_eq!(out, "foo(injector-start: id-1)auth ▸(injector-stop: id-1)");
    }

    #[test]
    fn test_nameless_mask_uses_mask_text() {
        let out = masked_text("abcdefgh", &[mask(2, 6, None)], &style(Some("…"), None));
        assert_eq!(out, "ab…gh");

        let out = masked_text("abcdefgh", &[mask(2, 6, None)], &style(None, None));
        assert_eq!(out, "abgh");
    }

    #[test]
    fn test_json_report_lists_offsets() {
        let report = decorations_json(&[mask(1, 3, Some("x"))]);
        assert_eq!(report[0]["offsets"], json!([1, 3]));
        assert_eq!(report[0]["label"], json!("x"));
    }
}
