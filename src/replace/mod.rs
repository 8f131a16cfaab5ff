//! Placeholder numbering over a sequence of text nodes.
//!
//! The replacer is independent of the document format. It walks any sequence
//! of [`TextNode`]s in order, numbers every allowed placeholder it finds with
//! a per-prefix counter, and reports the numbers it generated.
//!
//! # Example
//!
//! ```
//! use docseq::replace::PatternReplacer;
//! use docseq::ReplaceOptions;
//!
//! let replacer = PatternReplacer::new(&ReplaceOptions::default())?;
//! let mut nodes = vec![
//!     "[REQ-XXX] and [SYS-XXX]".to_string(),
//!     "[REQ-XXX]".to_string(),
//! ];
//! let record = replacer.process(nodes.iter_mut());
//!
//! assert_eq!(nodes[0], "[REQ-001] and [SYS-001]");
//! assert_eq!(nodes[1], "[REQ-002]");
//! assert_eq!(record.get("REQ").unwrap(), ["001", "002"]);
//! # Ok::<(), docseq::Error>(())
//! ```

mod pattern;
mod record;

pub use pattern::PlaceholderPattern;
pub use record::{Counters, Replacements};

use crate::error::Result;
use crate::options::{PrefixFilter, ReplaceOptions};

/// A unit of editable text.
pub trait TextNode {
    /// Current text of the node.
    fn text(&self) -> &str;

    /// Replace the text of the node.
    fn set_text(&mut self, text: String);
}

impl TextNode for String {
    fn text(&self) -> &str {
        self
    }

    fn set_text(&mut self, text: String) {
        *self = text;
    }
}

/// Numbers placeholders in text nodes.
#[derive(Debug, Clone)]
pub struct PatternReplacer {
    pattern: PlaceholderPattern,
    prefixes: PrefixFilter,
    min_width: usize,
}

impl PatternReplacer {
    /// Build a replacer from options, compiling the pattern.
    pub fn new(options: &ReplaceOptions) -> Result<Self> {
        Ok(Self {
            pattern: PlaceholderPattern::new(&options.pattern)?,
            prefixes: options.prefixes.clone(),
            min_width: options.min_width.max(1),
        })
    }

    /// The compiled placeholder pattern.
    pub fn pattern(&self) -> &PlaceholderPattern {
        &self.pattern
    }

    /// Number every allowed placeholder across `nodes`, in iteration order.
    ///
    /// Counters start fresh at 1 for each call.
    pub fn process<'a, N, I>(&self, nodes: I) -> Replacements
    where
        N: TextNode + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut N>,
    {
        let mut counters = Counters::new();
        let mut record = Replacements::new();

        for node in nodes {
            self.process_node(node, &mut counters, &mut record);
        }

        record
    }

    /// Number the placeholders of a single node, continuing `counters`.
    ///
    /// The node is only written when at least one substitution happened.
    pub fn process_node<N: TextNode + ?Sized>(
        &self,
        node: &mut N,
        counters: &mut Counters,
        record: &mut Replacements,
    ) -> bool {
        match self.replace_text(node.text(), counters, record) {
            Some(text) => {
                node.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Substitute placeholders in `text`, left to right.
    ///
    /// Returns `None` when nothing in `text` was substituted.
    pub fn replace_text(
        &self,
        text: &str,
        counters: &mut Counters,
        record: &mut Replacements,
    ) -> Option<String> {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        let mut changed = false;

        for caps in self.pattern.captures_iter(text) {
            let (Some(whole), Some(group)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let prefix = group.as_str();
            if !self.prefixes.allows(prefix) {
                continue;
            }

            let number = self.format_number(counters.advance(prefix));
            tracing::trace!(prefix, number = %number, "numbered placeholder");

            output.push_str(&text[last..whole.start()]);
            output.push_str(&pattern::render_match(&caps, prefix, &number));
            last = whole.end();
            record.push(prefix, number);
            changed = true;
        }

        if !changed {
            return None;
        }
        output.push_str(&text[last..]);
        Some(output)
    }

    fn format_number(&self, value: u64) -> String {
        format!("{:0width$}", value, width = self.min_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacer(options: ReplaceOptions) -> PatternReplacer {
        PatternReplacer::new(&options).unwrap()
    }

    fn mixed_nodes() -> Vec<String> {
        vec![
            "Intro [REQ-XXX]".to_string(),
            "[REQ-XXX] then [SYS-XXX]".to_string(),
            "[SYS-XXX]".to_string(),
            "last [REQ-XXX].".to_string(),
        ]
    }

    #[test]
    fn test_numbers_in_encounter_order() {
        let mut nodes = mixed_nodes();
        let record = replacer(ReplaceOptions::default()).process(nodes.iter_mut());

        assert_eq!(
            nodes,
            vec![
                "Intro [REQ-001]",
                "[REQ-002] then [SYS-001]",
                "[SYS-002]",
                "last [REQ-003].",
            ]
        );
        assert_eq!(record.get("REQ").unwrap(), ["001", "002", "003"]);
        assert_eq!(record.get("SYS").unwrap(), ["001", "002"]);
        assert_eq!(record.prefixes().collect::<Vec<_>>(), vec!["REQ", "SYS"]);
    }

    #[test]
    fn test_disallowed_prefix_left_unchanged() {
        let mut nodes = mixed_nodes();
        let record =
            replacer(ReplaceOptions::default().with_prefixes(["SYS"])).process(nodes.iter_mut());

        assert_eq!(nodes[0], "Intro [REQ-XXX]");
        assert_eq!(nodes[1], "[REQ-XXX] then [SYS-001]");
        assert_eq!(nodes[2], "[SYS-002]");
        assert_eq!(nodes[3], "last [REQ-XXX].");
        assert_eq!(record.get("REQ"), None);
        assert_eq!(record.get("SYS").unwrap(), ["001", "002"]);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_allow_all_numbers_any_prefix() {
        let mut nodes = vec!["[DOC-XXX] [ABC-XXX] [DOC-XXX]".to_string()];
        let record =
            replacer(ReplaceOptions::default().allow_all_prefixes()).process(nodes.iter_mut());

        assert_eq!(nodes[0], "[DOC-001] [ABC-001] [DOC-002]");
        assert_eq!(record.get("DOC").unwrap(), ["001", "002"]);
        assert_eq!(record.get("ABC").unwrap(), ["001"]);
    }

    #[test]
    fn test_no_matches_returns_empty_record() {
        let mut nodes = vec!["nothing here".to_string(), "[REQ-001] done".to_string()];
        let record = replacer(ReplaceOptions::default()).process(nodes.iter_mut());

        assert!(record.is_empty());
        assert_eq!(nodes[0], "nothing here");
        assert_eq!(nodes[1], "[REQ-001] done");
    }

    #[test]
    fn test_node_written_only_when_changed() {
        struct Tracked {
            text: String,
            writes: usize,
        }

        impl TextNode for Tracked {
            fn text(&self) -> &str {
                &self.text
            }

            fn set_text(&mut self, text: String) {
                self.text = text;
                self.writes += 1;
            }
        }

        let mut nodes = vec![
            Tracked {
                text: "plain".to_string(),
                writes: 0,
            },
            Tracked {
                text: "[REQ-XXX] [REQ-XXX]".to_string(),
                writes: 0,
            },
            Tracked {
                text: "[ABC-XXX]".to_string(),
                writes: 0,
            },
        ];
        replacer(ReplaceOptions::default()).process(nodes.iter_mut());

        assert_eq!(nodes[0].writes, 0);
        assert_eq!(nodes[1].writes, 1);
        assert_eq!(nodes[1].text, "[REQ-001] [REQ-002]");
        assert_eq!(nodes[2].writes, 0);
    }

    #[test]
    fn test_numbers_past_999_widen() {
        let text = "[REQ-XXX]".repeat(1001);
        let mut counters = Counters::new();
        let mut record = Replacements::new();
        let out = replacer(ReplaceOptions::default())
            .replace_text(&text, &mut counters, &mut record)
            .unwrap();

        assert!(out.starts_with("[REQ-001][REQ-002]"));
        assert!(out.ends_with("[REQ-999][REQ-1000][REQ-1001]"));
        assert_eq!(record.get("REQ").unwrap().len(), 1001);
    }

    #[test]
    fn test_counters_continue_across_calls() {
        let replacer = replacer(ReplaceOptions::default());
        let mut counters = Counters::new();
        let mut record = Replacements::new();

        replacer.replace_text("[REQ-XXX]", &mut counters, &mut record);
        let second = replacer.replace_text("[REQ-XXX]", &mut counters, &mut record);

        assert_eq!(second.as_deref(), Some("[REQ-002]"));
        assert_eq!(counters.peek("REQ"), 3);
    }

    #[test]
    fn test_each_process_call_starts_fresh() {
        let replacer = replacer(ReplaceOptions::default());
        let mut first = vec!["[REQ-XXX]".to_string()];
        let mut second = vec!["[REQ-XXX]".to_string()];

        replacer.process(first.iter_mut());
        replacer.process(second.iter_mut());

        assert_eq!(first, second);
        assert_eq!(second[0], "[REQ-001]");
    }

    #[test]
    fn test_custom_width() {
        let mut nodes = vec!["[REQ-XXX]".to_string()];
        replacer(ReplaceOptions::default().with_min_width(5)).process(nodes.iter_mut());
        assert_eq!(nodes[0], "[REQ-00001]");
    }

    #[test]
    fn test_prefix_captured_verbatim() {
        let options = ReplaceOptions::default()
            .with_pattern(r"\{([^}]+?)-XXX\}")
            .allow_all_prefixes();
        let mut nodes = vec!["{req 2.1-XXX} {req 2.1-XXX}".to_string()];
        let record = replacer(options).process(nodes.iter_mut());

        assert_eq!(nodes[0], "{req 2.1-001} {req 2.1-002}");
        assert_eq!(record.get("req 2.1").unwrap(), ["001", "002"]);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = PatternReplacer::new(&ReplaceOptions::default().with_pattern("no groups"));
        assert!(matches!(result, Err(crate::Error::Pattern(_))));
    }
}
