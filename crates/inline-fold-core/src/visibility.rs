//! Partitioning scan results into unfolded and masked decorations.
//!
//! [`partition`] is a pure function of its inputs, so repeated refreshes with unchanged inputs
//! paint identical decoration lists.

use crate::decorations::FoldDecoration;
use crate::position::Selection;
use crate::scanner::MatchRecord;
use crate::viewport::Viewport;

/// Switches that shape a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Folding is toggled on.
    pub active: bool,
    /// A region without a display name suspends folding.
    pub disabled_if_no_name: bool,
    /// A selection anywhere on a region's lines unfolds it.
    pub unfold_on_line_select: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            active: true,
            disabled_if_no_name: false,
            unfold_on_line_select: false,
        }
    }
}

/// Why a pass stopped before reaching the last match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suspension {
    /// Folding is toggled off.
    Inactive,
    /// A region without a display name was found while `disabled_if_no_name` is set.
    MissingName {
        /// Character offset where the nameless region starts.
        offset: usize,
    },
}

/// Result of one pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    /// Every in-viewport region, painted with the unfolded style.
    pub hover: Vec<FoldDecoration>,
    /// Regions to mask.
    pub mask: Vec<FoldDecoration>,
    /// Set when the pass stopped early; `mask` is then empty.
    pub suspended: Option<Suspension>,
    /// Regions skipped because they lie outside the viewport.
    pub out_of_viewport: usize,
}

/// Split `matches` into hover and mask decorations.
///
/// Per match, in order:
///
/// 1. folding inactive, or a nameless region under `disabled_if_no_name`: stop the whole pass
///    and mask nothing (regions already collected stay in `hover`);
/// 2. regions whose full span leaves the viewport are skipped;
/// 3. regions intersecting any selection stay unfolded;
/// 4. with `unfold_on_line_select`, regions sharing a line with any selection stay unfolded.
pub fn partition(
    matches: &[MatchRecord],
    viewport: Viewport,
    selections: &[Selection],
    options: FilterOptions,
) -> Partition {
    let mut result = Partition::default();
    let mut candidates: Vec<FoldDecoration> = Vec::new();

    for record in matches {
        if !options.active {
            result.suspended = Some(Suspension::Inactive);
            break;
        }
        if options.disabled_if_no_name && record.display_name.is_none() {
            result.suspended = Some(Suspension::MissingName {
                offset: record.full.start,
            });
            break;
        }

        if !viewport.contains_lines(record.full_range.start.line, record.full_range.end.line) {
            result.out_of_viewport += 1;
            continue;
        }

        let decoration = FoldDecoration {
            range: record.fold_range,
            offsets: record.fold,
            tooltip: Some(record.tooltip()),
            label: record.display_name.clone(),
        };
        result.hover.push(FoldDecoration {
            label: None,
            ..decoration.clone()
        });
        candidates.push(decoration);
    }

    if result.suspended.is_some() {
        return result;
    }

    result.mask = candidates
        .into_iter()
        .filter(|decoration| {
            !selections.iter().any(|selection| {
                let selected = selection.range();
                decoration.range.intersects(&selected)
                    || (options.unfold_on_line_select
                        && decoration.range.shares_line_with(&selected))
            })
        })
        .collect();

    result
}
