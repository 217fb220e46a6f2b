//! Fold pattern compilation.
//!
//! Users configure a regex and the 1-based index of the capture group that marks the start of
//! the fold target. The pattern is normalized by wrapping everything before that group in a new
//! capturing group, so group 1 is always the prefix and the original target group follows it
//! at [`FoldPattern::target_group`] (group 2 for the default index of 1).
//!
//! ```
//! use inline_fold_core::pattern::normalize_pattern;
//!
//! assert_eq!(normalize_pattern("abc(x)def(y)ghi", 2).unwrap(), "(abc(x)def)(y)ghi");
//! ```

use crate::error::PatternConfigError;
use regex::{Regex, RegexBuilder};

/// Default fold group index.
pub const DEFAULT_FOLD_GROUP: usize = 1;

/// Regex flags in the host's `gimsud` alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegexFlags {
    /// `i`
    pub case_insensitive: bool,
    /// `m`: `^`/`$` match at line boundaries.
    pub multi_line: bool,
    /// `s`: `.` matches `\n`.
    pub dot_matches_new_line: bool,
}

impl RegexFlags {
    /// Parse a flag string such as `"gm"`.
    ///
    /// `g` is implied (scans are always global); `u` and `d` are accepted and have no effect.
    pub fn parse(flags: &str) -> Result<Self, PatternConfigError> {
        let mut parsed = Self::default();
        for flag in flags.chars() {
            match flag {
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_matches_new_line = true,
                'g' | 'u' | 'd' => {}
                other => return Err(PatternConfigError::UnsupportedFlag(other)),
            }
        }
        Ok(parsed)
    }
}

/// Byte offsets of every capturing group-open in `raw`.
///
/// Escaped parentheses, parentheses inside character classes, and `(?...)` groups other than
/// named captures are skipped.
pub fn capturing_group_offsets(raw: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut escaped = false;
    let mut class_depth = 0usize;
    let mut class_open: Option<usize> = None;

    for (idx, ch) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '[' => {
                class_depth += 1;
                class_open = Some(idx);
            }
            ']' if class_depth > 0 => {
                // `[]...]` and `[^]...]` start with a literal `]`.
                let literal = class_open.is_some_and(|open| {
                    let between = &raw[open + 1..idx];
                    between.is_empty() || between == "^"
                });
                if !literal {
                    class_depth -= 1;
                }
                class_open = None;
            }
            '(' if class_depth == 0 => {
                if opens_capture(&raw[idx + 1..]) {
                    offsets.push(idx);
                }
            }
            _ => {}
        }
    }

    offsets
}

fn opens_capture(rest: &str) -> bool {
    if !rest.starts_with('?') {
        return true;
    }
    rest.starts_with("?P<")
        || (rest.starts_with("?<") && !rest.starts_with("?<=") && !rest.starts_with("?<!"))
}

/// Wrap the prefix before the `group`-th capturing group in a new capturing group.
pub fn normalize_pattern(raw: &str, group: usize) -> Result<String, PatternConfigError> {
    if group == 0 {
        return Err(PatternConfigError::ZeroGroup);
    }

    let offsets = capturing_group_offsets(raw);
    let Some(&fold_start) = offsets.get(group - 1) else {
        return Err(PatternConfigError::NotEnoughGroups {
            pattern: raw.to_string(),
            group,
            found: offsets.len(),
        });
    };

    Ok(format!("({}){}", &raw[..fold_start], &raw[fold_start..]))
}

/// A validated, compiled fold pattern.
#[derive(Debug, Clone)]
pub struct FoldPattern {
    source: String,
    normalized: String,
    fold_group: usize,
    flags: RegexFlags,
    regex: Regex,
}

impl FoldPattern {
    /// Normalize and compile `raw`, targeting the 1-based `fold_group`.
    pub fn compile(raw: &str, fold_group: usize, flags: &str) -> Result<Self, PatternConfigError> {
        if raw.is_empty() {
            return Err(PatternConfigError::Missing);
        }

        let flags = RegexFlags::parse(flags)?;
        let normalized = normalize_pattern(raw, fold_group)?;
        let regex = RegexBuilder::new(&normalized)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .build()
            .map_err(|err| PatternConfigError::RegexCompile {
                pattern: normalized.clone(),
                message: err.to_string(),
            })?;

        let pattern = Self {
            source: raw.to_string(),
            normalized,
            fold_group,
            flags,
            regex,
        };

        // Group counting above is lexical; the compiled regex is authoritative.
        if pattern.regex.captures_len() < pattern.required_slots() {
            return Err(PatternConfigError::NotEnoughGroups {
                pattern: pattern.source,
                group: fold_group,
                found: pattern.regex.captures_len().saturating_sub(2),
            });
        }

        Ok(pattern)
    }

    /// The pattern as configured.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The pattern with the prefix wrapper applied.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// The configured 1-based fold group index.
    pub fn fold_group(&self) -> usize {
        self.fold_group
    }

    /// Capture group of the fold target in the compiled regex.
    pub fn target_group(&self) -> usize {
        self.fold_group + 1
    }

    /// Capture slots (including group 0) every match must expose.
    pub fn required_slots(&self) -> usize {
        self.fold_group + 2
    }

    /// Parsed flags.
    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    /// The compiled regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wraps_prefix_before_target_group() {
        assert_eq!(
            normalize_pattern("abc(x)def(y)ghi", 2).unwrap(),
            "(abc(x)def)(y)ghi"
        );
        assert_eq!(normalize_pattern("abc(x)def", 1).unwrap(), "(abc)(x)def");
        assert_eq!(normalize_pattern("(x)", 1).unwrap(), "()(x)");
    }

    #[test]
    fn test_target_group_captures_original_group() {
        let pattern = FoldPattern::compile("abc(x)def(y)ghi", 2, "").unwrap();
        let caps = pattern.regex().captures("abcxdefyghi").unwrap();

        assert_eq!(&caps[1], "abcxdef");
        assert_eq!(&caps[pattern.target_group()], "y");
    }

    #[test]
    fn test_default_group_lands_on_group_two() {
        let pattern = FoldPattern::compile("<(a+)>", DEFAULT_FOLD_GROUP, "g").unwrap();
        assert_eq!(pattern.target_group(), 2);
        let caps = pattern.regex().captures("<aaa>").unwrap();
        assert_eq!(&caps[2], "aaa");
    }

    #[test]
    fn test_escaped_and_class_parens_are_not_groups() {
        assert_eq!(capturing_group_offsets(r"\((a)[(](b)"), vec![2, 8]);
        assert_eq!(capturing_group_offsets(r"[](](x)"), vec![4]);
        assert_eq!(capturing_group_offsets(r"(?:a)(?i)(?P<n>b)(?<m>c)"), vec![9, 17]);
    }

    #[test]
    fn test_missing_group_is_rejected() {
        let err = normalize_pattern("abc(x)def", 2).unwrap_err();
        assert_eq!(
            err,
            PatternConfigError::NotEnoughGroups {
                pattern: "abc(x)def".to_string(),
                group: 2,
                found: 1,
            }
        );
        assert_eq!(
            normalize_pattern("(x)", 0).unwrap_err(),
            PatternConfigError::ZeroGroup
        );
    }

    #[test]
    fn test_flags() {
        let flags = RegexFlags::parse("gims").unwrap();
        assert!(flags.case_insensitive && flags.multi_line && flags.dot_matches_new_line);
        assert_eq!(
            RegexFlags::parse("gy").unwrap_err(),
            PatternConfigError::UnsupportedFlag('y')
        );

        let pattern = FoldPattern::compile("(ab)", 1, "i").unwrap();
        assert!(pattern.regex().is_match("AB"));
    }

    #[test]
    fn test_invalid_regex_reports_normalized_pattern() {
        let err = FoldPattern::compile("(a)[", 1, "").unwrap_err();
        assert!(matches!(
            err,
            PatternConfigError::RegexCompile { ref pattern, .. } if pattern == "()(a)["
        ));
        assert_eq!(
            FoldPattern::compile("", 1, "").unwrap_err(),
            PatternConfigError::Missing
        );
    }
}
