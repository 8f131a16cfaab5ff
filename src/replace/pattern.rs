//! Compiled placeholder patterns.

use crate::error::{Error, Result};
use regex::{CaptureMatches, Captures, Regex};

/// Minimum run of `X`/`x` characters treated as the numeric placeholder.
const PLACEHOLDER_RUN: usize = 3;

/// A placeholder regex with exactly one capture group holding the prefix.
#[derive(Debug, Clone)]
pub struct PlaceholderPattern {
    regex: Regex,
}

impl PlaceholderPattern {
    /// Compile `pattern`, rejecting it unless it has exactly one capture group.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        let groups = regex.captures_len() - 1;
        if groups != 1 {
            return Err(Error::Pattern(format!(
                "'{}' must contain exactly one capture group, found {}",
                pattern, groups
            )));
        }
        Ok(Self { regex })
    }

    /// The source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn captures_iter<'h>(&self, text: &'h str) -> CaptureMatches<'_, 'h> {
        self.regex.captures_iter(text)
    }
}

/// Rewrite one matched placeholder with its assigned number.
///
/// The first run of at least three `X`/`x` characters after the prefix is
/// replaced by `number`, keeping the rest of the matched text. A match without
/// such a run becomes `[PREFIX-NUMBER]`.
pub(crate) fn render_match(caps: &Captures<'_>, prefix: &str, number: &str) -> String {
    let whole = &caps[0];
    let search_from = caps
        .get(1)
        .map(|group| group.end() - caps.get(0).map_or(0, |m| m.start()))
        .unwrap_or(0);

    match find_placeholder_run(&whole[search_from..]) {
        Some((start, end)) => {
            let start = search_from + start;
            let end = search_from + end;
            format!("{}{}{}", &whole[..start], number, &whole[end..])
        }
        None => format!("[{}-{}]", prefix, number),
    }
}

fn find_placeholder_run(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].eq_ignore_ascii_case(&b'x') {
            let start = i;
            while i < bytes.len() && bytes[i].eq_ignore_ascii_case(&b'x') {
                i += 1;
            }
            if i - start >= PLACEHOLDER_RUN {
                return Some((start, i));
            }
        } else {
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_PATTERN;

    fn render(pattern: &str, text: &str, number: &str) -> String {
        let pattern = PlaceholderPattern::new(pattern).unwrap();
        let caps = pattern.captures_iter(text).next().unwrap();
        let prefix = caps[1].to_string();
        render_match(&caps, &prefix, number)
    }

    #[test]
    fn test_default_pattern_compiles() {
        let pattern = PlaceholderPattern::new(DEFAULT_PATTERN).unwrap();
        assert_eq!(pattern.as_str(), DEFAULT_PATTERN);
    }

    #[test]
    fn test_rejects_wrong_group_count() {
        assert!(matches!(
            PlaceholderPattern::new(r"\[REQ-XXX\]"),
            Err(Error::Pattern(_))
        ));
        assert!(matches!(
            PlaceholderPattern::new(r"\[([A-Z]+)-(XXX)\]"),
            Err(Error::Pattern(_))
        ));
        assert!(matches!(
            PlaceholderPattern::new(r"\[(?:[A-Z]+)-XXX\]"),
            Err(Error::Pattern(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_regex() {
        assert!(matches!(
            PlaceholderPattern::new(r"\[([A-Z]+-XXX\]"),
            Err(Error::Pattern(_))
        ));
    }

    #[test]
    fn test_render_default_placeholder() {
        assert_eq!(render(DEFAULT_PATTERN, "see [REQ-XXX]", "001"), "[REQ-001]");
    }

    #[test]
    fn test_render_keeps_surrounding_literal_text() {
        assert_eq!(render(r"<<([a-z]+):xxx>>", "<<cap:xxx>>", "042"), "<<cap:042>>");
        assert_eq!(render(r"\{([A-Z]+)_XXXX\}", "{DOC_XXXX}", "007"), "{DOC_007}");
    }

    #[test]
    fn test_render_skips_x_inside_prefix() {
        assert_eq!(render(r"\[([A-Z]+)-XXX\]", "[XXXA-XXX]", "002"), "[XXXA-002]");
    }

    #[test]
    fn test_render_without_placeholder_run() {
        assert_eq!(render(r"\[([A-Z]+)-TBD\]", "[REQ-TBD]", "005"), "[REQ-005]");
        assert_eq!(render(r"@([A-Z]+)", "@SYS", "010"), "[SYS-010]");
    }
}
