//! Error types for pattern compilation, scanning, configuration and rate limiting.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// The configured fold pattern, fold group index or regex flags cannot be used.
pub enum PatternConfigError {
    #[error("no fold pattern configured")]
    /// The `regex` key is unset or empty.
    Missing,

    #[error("fold group index must be 1 or greater")]
    /// The fold group index was zero.
    ZeroGroup,

    #[error("pattern '{pattern}' has {found} capturing group(s), fold group {group} requested")]
    /// The pattern has fewer capturing groups than the fold group index.
    NotEnoughGroups {
        /// The raw pattern string.
        pattern: String,
        /// The requested fold group (1-based).
        group: usize,
        /// Capturing groups found in the pattern.
        found: usize,
    },

    #[error("unsupported regex flag '{0}'")]
    /// A flag outside `g i m s u d` was given.
    UnsupportedFlag(char),

    #[error("regex compile error for pattern '{pattern}': {message}")]
    /// The normalized pattern failed to compile.
    RegexCompile {
        /// The normalized pattern string.
        pattern: String,
        /// The compiler error message.
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("match at offset {offset} exposes {found} capture slot(s), {expected} required")]
/// A match produced during a scan has fewer capture slots than the fold group needs.
pub struct MalformedPatternError {
    /// Character offset of the offending match.
    pub offset: usize,
    /// Capture slots present (including group 0).
    pub found: usize,
    /// Capture slots required (including group 0).
    pub expected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// Misuse of [`RateLimiter`](crate::RateLimiter).
pub enum RateLimitError {
    #[error("rate limiter triggered before a callback was registered")]
    /// `lead`/`tail` was called before `register`.
    Unregistered,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A configuration value has the wrong shape.
pub enum ConfigError {
    #[error("configuration key '{key}': {message}")]
    /// The value stored under `key` could not be read as the expected type.
    InvalidValue {
        /// The configuration key.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}
