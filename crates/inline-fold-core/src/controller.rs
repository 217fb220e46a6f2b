//! Decoration controller.
//!
//! One [`FoldController`] serves one editor session. It is a small state machine over
//! active/inactive (the toggle command) and configured/unconfigured (whether a usable fold
//! pattern and decoration types exist):
//!
//! ```text
//!                 update_configs(ok)
//!   unconfigured ────────────────────▶ configured
//!        ▲        ◀────────────────────     │
//!        │        update_configs(err)       │ refresh: scan → partition → paint
//!        └──────────── dispose ─────────────┘
//! ```
//!
//! Refreshes while unconfigured, or for a document whose language is not supported, do
//! nothing. A refresh whose scan fails leaves the previous decorations painted.

use crate::config::FoldConfig;
use crate::decorations::{DecorationStyle, DecorationTypeId};
use crate::error::{MalformedPatternError, PatternConfigError};
use crate::host::{DecorationFactory, TextEditor};
use crate::pattern::FoldPattern;
use crate::scanner::RegionScanner;
use crate::viewport::{DEFAULT_VIEWPORT_MARGIN, Viewport};
use crate::visibility::{FilterOptions, Partition, partition};

/// Command id of [`FoldController::toggle`].
pub const TOGGLE_COMMAND: &str = "inlineInjectorIdFold.toggle";

/// The two decoration types of one configuration generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleHandles {
    /// Unfolded marker type.
    pub unfolded: DecorationTypeId,
    /// Mask type.
    pub mask: DecorationTypeId,
}

/// What a refresh did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Decorations were replaced.
    Applied(Partition),
    /// No usable configuration.
    Unconfigured,
    /// The document's language is not in `supportedLanguages`.
    UnsupportedLanguage,
    /// The host reported no visible range.
    NoVisibleRange,
    /// The scan stopped on a malformed match; nothing was painted.
    ScanFailed(MalformedPatternError),
}

impl RefreshOutcome {
    /// The partition that was painted, if any.
    pub fn partition(&self) -> Option<&Partition> {
        match self {
            Self::Applied(partition) => Some(partition),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct DecoratorState {
    active: bool,
    supported_languages: Vec<String>,
    disabled_if_no_name: bool,
    unfold_on_line_select: bool,
    viewport_margin: usize,
    pattern: Option<FoldPattern>,
    viewport: Viewport,
    handles: Option<StyleHandles>,
}

impl Default for DecoratorState {
    fn default() -> Self {
        Self {
            active: true,
            supported_languages: Vec::new(),
            disabled_if_no_name: false,
            unfold_on_line_select: false,
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
            pattern: None,
            viewport: Viewport::default(),
            handles: None,
        }
    }
}

/// Orchestrates scanning, filtering and painting for one editor session.
#[derive(Debug, Default)]
pub struct FoldController {
    state: DecoratorState,
}

impl FoldController {
    /// A new, active, unconfigured controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether folding is toggled on.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Whether a pattern and decoration types are in place.
    pub fn is_configured(&self) -> bool {
        self.state.pattern.is_some() && self.state.handles.is_some()
    }

    /// The compiled pattern, if configured.
    pub fn pattern(&self) -> Option<&FoldPattern> {
        self.state.pattern.as_ref()
    }

    /// The current decoration types, if configured.
    pub fn handles(&self) -> Option<StyleHandles> {
        self.state.handles
    }

    /// The last computed viewport.
    pub fn viewport(&self) -> Viewport {
        self.state.viewport
    }

    /// Apply a new configuration generation.
    ///
    /// The fold pattern is compiled first. If it is rejected the error is logged and returned,
    /// the controller becomes unconfigured, and the decoration types painted so far stay on
    /// screen. Otherwise previous decoration types are released and new ones created.
    pub fn update_configs<F>(
        &mut self,
        factory: &mut F,
        config: &FoldConfig,
    ) -> Result<(), PatternConfigError>
    where
        F: DecorationFactory + ?Sized,
    {
        let compiled = config
            .regex
            .as_deref()
            .ok_or(PatternConfigError::Missing)
            .and_then(|raw| FoldPattern::compile(raw, config.regex_group, &config.regex_flags));

        let pattern = match compiled {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::error!(error = %err, "fold pattern rejected, folding disabled");
                self.state.pattern = None;
                return Err(err);
            }
        };

        self.state.supported_languages = config.supported_languages.clone();
        self.state.disabled_if_no_name = config.disabled_if_no_name;
        self.state.unfold_on_line_select = config.unfold_on_line_select;
        self.state.viewport_margin = config.viewport_margin;

        self.release_handles(factory);
        self.state.handles = Some(StyleHandles {
            unfolded: factory.create_decoration_type(&DecorationStyle::unfolded(config)),
            mask: factory.create_decoration_type(&DecorationStyle::mask(config)),
        });

        tracing::debug!(
            pattern = pattern.normalized(),
            group = pattern.fold_group(),
            languages = ?self.state.supported_languages,
            "fold configuration applied"
        );
        self.state.pattern = Some(pattern);
        Ok(())
    }

    /// Bind to `editor`: recompute the viewport from its first visible range, then refresh.
    pub fn active_editor<E>(&mut self, editor: &mut E) -> RefreshOutcome
    where
        E: TextEditor + ?Sized,
    {
        let Some(visible) = editor.visible_ranges().first().copied() else {
            tracing::trace!("editor has no visible range yet");
            return RefreshOutcome::NoVisibleRange;
        };

        self.state.viewport =
            Viewport::from_visible(visible, self.state.viewport_margin, editor.line_count());
        self.refresh(editor)
    }

    /// Flip folding on/off and refresh.
    pub fn toggle<E>(&mut self, editor: &mut E) -> RefreshOutcome
    where
        E: TextEditor + ?Sized,
    {
        self.state.active = !self.state.active;
        tracing::debug!(active = self.state.active, "fold toggled");
        self.refresh(editor)
    }

    /// Rescan the document and replace both decoration sets.
    pub fn refresh<E>(&mut self, editor: &mut E) -> RefreshOutcome
    where
        E: TextEditor + ?Sized,
    {
        let (Some(pattern), Some(handles)) = (&self.state.pattern, self.state.handles) else {
            return RefreshOutcome::Unconfigured;
        };

        let language = editor.language_id();
        if !self
            .state
            .supported_languages
            .iter()
            .any(|supported| supported == language)
        {
            return RefreshOutcome::UnsupportedLanguage;
        }

        let text = editor.text();
        let records = match RegionScanner::new(pattern).scan_all(&text) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "fold scan aborted, keeping previous decorations");
                return RefreshOutcome::ScanFailed(err);
            }
        };

        let options = FilterOptions {
            active: self.state.active,
            disabled_if_no_name: self.state.disabled_if_no_name,
            unfold_on_line_select: self.state.unfold_on_line_select,
        };
        let result = partition(&records, self.state.viewport, &editor.selections(), options);

        editor.set_decorations(handles.unfolded, &result.hover);
        editor.set_decorations(handles.mask, &result.mask);

        tracing::trace!(
            matches = records.len(),
            hover = result.hover.len(),
            mask = result.mask.len(),
            out_of_viewport = result.out_of_viewport,
            suspended = ?result.suspended,
            "fold decorations refreshed"
        );
        RefreshOutcome::Applied(result)
    }

    /// Release decoration types and forget the pattern.
    pub fn dispose<F>(&mut self, factory: &mut F)
    where
        F: DecorationFactory + ?Sized,
    {
        self.release_handles(factory);
        self.state.pattern = None;
    }

    fn release_handles<F>(&mut self, factory: &mut F)
    where
        F: DecorationFactory + ?Sized,
    {
        if let Some(handles) = self.state.handles.take() {
            factory.dispose_decoration_type(handles.unfolded);
            factory.dispose_decoration_type(handles.mask);
        }
    }
}
