//! Decoration data model.
//!
//! Two decoration types are painted per editor:
//!
//! - the **unfolded** type marks every eligible region (dimmed, with a hover tooltip);
//! - the **mask** type hides the fold span of regions that are currently folded and renders a
//!   short label in its place.
//!
//! Decoration types are created by the host from a [`DecorationStyle`] and referred to through
//! opaque [`DecorationTypeId`] handles. The controller never keeps a handle longer than one
//! configuration generation.

use crate::config::FoldConfig;
use crate::position::{OffsetRange, Range};

/// Host-owned decoration type handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationTypeId(pub u64);

impl DecorationTypeId {
    /// Create a handle from a raw host identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// How a decorated range grows when text is typed at its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeBehavior {
    /// The range grows at both edges.
    OpenOpen,
    /// The range grows at neither edge.
    #[default]
    ClosedClosed,
    /// The range grows at its start only.
    OpenClosed,
    /// The range grows at its end only.
    ClosedOpen,
}

/// Style of the always-visible marker over a foldable region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfoldedStyle {
    /// CSS-like opacity, e.g. `"0.6"`.
    pub opacity: String,
    /// Edge behaviour.
    pub range_behavior: RangeBehavior,
}

/// Style of the mask painted over a folded region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskStyle {
    /// Label rendered before the hidden text when a decoration carries no label of its own.
    pub before_text: Option<String>,
    /// Label color.
    pub color: Option<String>,
    /// Text rendered after the hidden text.
    pub after_text: Option<String>,
    /// Letter spacing applied to the hidden text.
    pub letter_spacing: String,
    /// Whether the covered text is hidden.
    pub hide_text: bool,
}

impl MaskStyle {
    /// Letter spacing that collapses the hidden text.
    pub const COLLAPSED_LETTER_SPACING: &'static str = "-1ch";

    /// Mask style for `config`: mask text and color resolved, `after` suffix, hidden span.
    pub fn from_config(config: &FoldConfig) -> Self {
        Self {
            before_text: config.mask_char.clone(),
            color: config.mask_color.clone(),
            after_text: config.after.clone(),
            letter_spacing: Self::COLLAPSED_LETTER_SPACING.to_string(),
            hide_text: true,
        }
    }
}

/// A decoration type description handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecorationStyle {
    /// See [`UnfoldedStyle`].
    Unfolded(UnfoldedStyle),
    /// See [`MaskStyle`].
    Mask(MaskStyle),
}

impl DecorationStyle {
    /// The unfolded style for a configuration.
    pub fn unfolded(config: &FoldConfig) -> Self {
        Self::Unfolded(UnfoldedStyle {
            opacity: config.unfolded_opacity.clone(),
            range_behavior: RangeBehavior::ClosedClosed,
        })
    }

    /// The mask style for a configuration.
    pub fn mask(config: &FoldConfig) -> Self {
        Self::Mask(MaskStyle::from_config(config))
    }
}

/// A single decoration item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldDecoration {
    /// Decorated range (the fold span) as line/column.
    pub range: Range,
    /// The same range in character offsets.
    pub offsets: OffsetRange,
    /// Hover tooltip (plain text).
    pub tooltip: Option<String>,
    /// Per-decoration label that replaces the mask's `before_text`.
    pub label: Option<String>,
}
