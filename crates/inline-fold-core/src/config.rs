//! Typed view over the host's flat configuration surface.
//!
//! Hosts expose settings as JSON values keyed by name ([`ConfigSource`]). [`FoldConfig`] reads
//! the keys below, applying the documented defaults for missing values:
//!
//! | key                  | type             | default            |
//! |----------------------|------------------|--------------------|
//! | `regex`              | string           | unset              |
//! | `regexFlags`         | string           | `""`               |
//! | `regexGroup`         | integer          | `1`                |
//! | `supportedLanguages` | list of string   | `[]`               |
//! | `unfoldedOpacity`    | string or number | `"0.6"`            |
//! | `maskChar`           | key name         | `"maskCharValue"`  |
//! | `maskColor`          | key name         | `"maskColorValue"` |
//! | `after`              | string           | unset              |
//! | `unfoldOnLineSelect` | bool             | `false`            |
//! | `disabledIfNoName`   | bool             | `false`            |
//! | `viewportMargin`     | integer          | `30`               |
//!
//! `maskChar` and `maskColor` name further keys that hold the actual label and color, so a
//! host can switch between presets by changing one setting.

use crate::error::ConfigError;
use crate::pattern::DEFAULT_FOLD_GROUP;
use crate::viewport::DEFAULT_VIEWPORT_MARGIN;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Configuration namespace of the fold settings.
pub const CONFIG_NAMESPACE: &str = "inlineInjectorIdFold";

/// Configuration keys.
pub mod keys {
    /// Fold pattern.
    pub const REGEX: &str = "regex";
    /// Fold pattern flags.
    pub const REGEX_FLAGS: &str = "regexFlags";
    /// 1-based fold group index.
    pub const REGEX_GROUP: &str = "regexGroup";
    /// Language ids folding applies to.
    pub const SUPPORTED_LANGUAGES: &str = "supportedLanguages";
    /// Opacity of the unfolded marker.
    pub const UNFOLDED_OPACITY: &str = "unfoldedOpacity";
    /// Name of the key holding the mask label.
    pub const MASK_CHAR: &str = "maskChar";
    /// Name of the key holding the mask color.
    pub const MASK_COLOR: &str = "maskColor";
    /// Default target of [`MASK_CHAR`].
    pub const MASK_CHAR_VALUE: &str = "maskCharValue";
    /// Default target of [`MASK_COLOR`].
    pub const MASK_COLOR_VALUE: &str = "maskColorValue";
    /// Text rendered after the mask.
    pub const AFTER: &str = "after";
    /// Unfold regions sharing a line with a selection.
    pub const UNFOLD_ON_LINE_SELECT: &str = "unfoldOnLineSelect";
    /// Suspend folding when a region has no display name.
    pub const DISABLED_IF_NO_NAME: &str = "disabledIfNoName";
    /// Lines added around the visible range.
    pub const VIEWPORT_MARGIN: &str = "viewportMargin";
}

/// Default opacity of the unfolded marker.
pub const DEFAULT_UNFOLDED_OPACITY: &str = "0.6";

/// A read-only key/value configuration surface.
pub trait ConfigSource {
    /// The value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&Value>;
}

impl ConfigSource for Map<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }
}

impl ConfigSource for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        HashMap::get(self, key)
    }
}

/// A settings object where fold keys may be nested under [`CONFIG_NAMESPACE`], written as
/// dotted `namespace.key` entries, or stored at the top level.
#[derive(Debug, Clone, Copy)]
pub struct ScopedConfig<'a> {
    settings: &'a Map<String, Value>,
    namespace: &'a str,
}

impl<'a> ScopedConfig<'a> {
    /// View `settings` through `namespace`.
    pub fn new(settings: &'a Map<String, Value>, namespace: &'a str) -> Self {
        Self {
            settings,
            namespace,
        }
    }
}

impl ConfigSource for ScopedConfig<'_> {
    fn get(&self, key: &str) -> Option<&Value> {
        self.settings
            .get(self.namespace)
            .and_then(Value::as_object)
            .and_then(|section| section.get(key))
            .or_else(|| self.settings.get(&format!("{}.{}", self.namespace, key)))
            .or_else(|| self.settings.get(key))
    }
}

/// Returns `true` if a change to `section` affects the fold settings.
pub fn affects_configuration(section: &str) -> bool {
    section == CONFIG_NAMESPACE
        || section
            .strip_prefix(CONFIG_NAMESPACE)
            .is_some_and(|rest| rest.starts_with('.'))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Fold settings read from a [`ConfigSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldConfig {
    /// Fold pattern; folding stays unconfigured without one.
    pub regex: Option<String>,
    /// Fold pattern flags.
    pub regex_flags: String,
    /// 1-based fold group index.
    pub regex_group: usize,
    /// Language ids folding applies to.
    pub supported_languages: Vec<String>,
    /// Opacity of the unfolded marker.
    pub unfolded_opacity: String,
    /// Mask label (resolved through the `maskChar` key).
    pub mask_char: Option<String>,
    /// Mask color (resolved through the `maskColor` key).
    pub mask_color: Option<String>,
    /// Text rendered after the mask.
    pub after: Option<String>,
    /// Unfold regions sharing a line with a selection.
    pub unfold_on_line_select: bool,
    /// Suspend folding when a region has no display name.
    pub disabled_if_no_name: bool,
    /// Lines added around the visible range.
    pub viewport_margin: usize,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            regex: None,
            regex_flags: String::new(),
            regex_group: DEFAULT_FOLD_GROUP,
            supported_languages: Vec::new(),
            unfolded_opacity: DEFAULT_UNFOLDED_OPACITY.to_string(),
            mask_char: None,
            mask_color: None,
            after: None,
            unfold_on_line_select: false,
            disabled_if_no_name: false,
            viewport_margin: DEFAULT_VIEWPORT_MARGIN,
        }
    }
}

impl FoldConfig {
    /// Read all fold settings from `source`.
    pub fn from_source<S>(source: &S) -> Result<Self, ConfigError>
    where
        S: ConfigSource + ?Sized,
    {
        let defaults = Self::default();

        let mask_char_key: String =
            read(source, keys::MASK_CHAR)?.unwrap_or_else(|| keys::MASK_CHAR_VALUE.to_string());
        let mask_color_key: String =
            read(source, keys::MASK_COLOR)?.unwrap_or_else(|| keys::MASK_COLOR_VALUE.to_string());

        Ok(Self {
            regex: read::<String, _>(source, keys::REGEX)?.filter(|regex| !regex.is_empty()),
            regex_flags: read(source, keys::REGEX_FLAGS)?.unwrap_or(defaults.regex_flags),
            regex_group: read_group(source)?.unwrap_or(defaults.regex_group),
            supported_languages: read(source, keys::SUPPORTED_LANGUAGES)?
                .unwrap_or(defaults.supported_languages),
            unfolded_opacity: read::<TextOrNumber, _>(source, keys::UNFOLDED_OPACITY)?
                .map(TextOrNumber::into_text)
                .unwrap_or(defaults.unfolded_opacity),
            mask_char: read(source, &mask_char_key)?,
            mask_color: read(source, &mask_color_key)?,
            after: read(source, keys::AFTER)?,
            unfold_on_line_select: read(source, keys::UNFOLD_ON_LINE_SELECT)?
                .unwrap_or(defaults.unfold_on_line_select),
            disabled_if_no_name: read(source, keys::DISABLED_IF_NO_NAME)?
                .unwrap_or(defaults.disabled_if_no_name),
            viewport_margin: read(source, keys::VIEWPORT_MARGIN)?
                .unwrap_or(defaults.viewport_margin),
        })
    }
}

fn read<T, S>(source: &S, key: &str) -> Result<Option<T>, ConfigError>
where
    T: DeserializeOwned,
    S: ConfigSource + ?Sized,
{
    match source.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: err.to_string(),
            }),
    }
}

/// `regexGroup` may be stored as a number or as numeric text.
fn read_group<S>(source: &S) -> Result<Option<usize>, ConfigError>
where
    S: ConfigSource + ?Sized,
{
    let Some(raw) = read::<TextOrNumber, _>(source, keys::REGEX_GROUP)? else {
        return Ok(None);
    };

    let text = raw.into_text();
    text.trim()
        .parse::<usize>()
        .map(Some)
        .map_err(|err| ConfigError::InvalidValue {
            key: keys::REGEX_GROUP.to_string(),
            message: format!("expected a non-negative integer, got '{}': {}", text, err),
        })
}
