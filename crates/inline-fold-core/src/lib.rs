#![warn(missing_docs)]
//! Inline Fold Core - headless decoration engine for annotation folding
//!
//! # Overview
//!
//! `inline-fold-core` folds regions of source text that match a configurable pattern (typically
//! injected-id annotation blocks such as `/** @injector-start: name:foo */ ... /** @injector-stop */`)
//! behind a compact masked label, and unfolds the region under the cursor or selection.
//!
//! It does not paint anything. The host editor supplies the text, the selections and the
//! visible range through [`TextEditor`], creates decoration types through
//! [`DecorationFactory`], and paints the decoration lists the controller hands back.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditorEvent → EventRouter → RateLimiter    │  ← when to refresh
//! ├─────────────────────────────────────────────┤
//! │  FoldController (toggle, configuration)     │  ← state machine
//! ├─────────────────────────────────────────────┤
//! │  RegionScanner (FoldPattern over full text) │  ← what to fold
//! ├─────────────────────────────────────────────┤
//! │  partition (viewport, selections)           │  ← what is folded now
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use inline_fold_core::{FoldConfig, FoldController, MemoryEditor, RefreshOutcome};
//!
//! let text = "/** @injector-start: name:auth */\nlogin();\n/** @injector-stop: name:auth */\n";
//! let mut editor = MemoryEditor::new("typescript", text);
//!
//! let config = FoldConfig {
//!     regex: Some(r"(/\*\* @injector-start:[^*]*\*/)[\s\S]*?/\*\* @injector-stop:[^*]*\*/".into()),
//!     supported_languages: vec!["typescript".into()],
//!     ..FoldConfig::default()
//! };
//!
//! let mut controller = FoldController::new();
//! controller.update_configs(&mut editor, &config).unwrap();
//!
//! let RefreshOutcome::Applied(partition) = controller.active_editor(&mut editor) else {
//!     panic!("expected decorations");
//! };
//! assert_eq!(partition.mask.len(), 1);
//! assert_eq!(partition.mask[0].label.as_deref(), Some("auth"));
//! ```
//!
//! # Module Description
//!
//! - [`rate_limit`] - leading/trailing throttle for editor events
//! - [`pattern`] - fold pattern normalization and validation
//! - [`scanner`] - full-document region scanning
//! - [`visibility`] - viewport/selection partitioning
//! - [`controller`] - per-editor state machine
//! - [`events`] / [`session`] - host event wiring
//! - [`config`] - typed configuration
//! - [`host`] - host seams and an in-memory editor

pub mod config;
pub mod controller;
pub mod decorations;
pub mod error;
pub mod events;
pub mod host;
pub mod pattern;
pub mod position;
pub mod rate_limit;
pub mod scanner;
pub mod session;
pub mod text_index;
pub mod viewport;
pub mod visibility;

pub use config::{CONFIG_NAMESPACE, ConfigSource, FoldConfig, ScopedConfig};
pub use controller::{FoldController, RefreshOutcome, StyleHandles, TOGGLE_COMMAND};
pub use decorations::{
    DecorationStyle, DecorationTypeId, FoldDecoration, MaskStyle, RangeBehavior, UnfoldedStyle,
};
pub use error::{ConfigError, MalformedPatternError, PatternConfigError, RateLimitError};
pub use events::{EditorEvent, EventRouter, Route, SelectionChangeKind};
pub use host::{DecorationFactory, MemoryEditor, TextEditor};
pub use pattern::{FoldPattern, RegexFlags};
pub use position::{LineRange, OffsetRange, Position, Range, Selection, SelectionDirection};
pub use rate_limit::RateLimiter;
pub use scanner::{MatchRecord, RegionScanner};
pub use session::FoldSession;
pub use text_index::TextIndex;
pub use viewport::Viewport;
pub use visibility::{FilterOptions, Partition, Suspension, partition};
