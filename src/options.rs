//! Numbering options configuration.

use std::collections::BTreeSet;

/// Placeholder pattern used when none is given: `[PREFIX-XXX]`.
pub const DEFAULT_PATTERN: &str = r"\[([A-Z]+)-XXX\]";

/// Prefixes numbered when none are given.
pub const DEFAULT_PREFIXES: [&str; 2] = ["REQ", "SYS"];

/// Minimum number of digits in a generated number.
pub const DEFAULT_MIN_WIDTH: usize = 3;

/// Which captured prefixes receive numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixFilter {
    /// Every captured prefix is numbered
    AllowAll,
    /// Only the listed prefixes are numbered; others are left as-is
    Only(BTreeSet<String>),
}

impl PrefixFilter {
    /// Build a filter from a list of prefixes. An empty list allows all.
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = prefixes.into_iter().map(Into::into).collect();
        if set.is_empty() {
            PrefixFilter::AllowAll
        } else {
            PrefixFilter::Only(set)
        }
    }

    /// Whether `prefix` is numbered under this filter.
    pub fn allows(&self, prefix: &str) -> bool {
        match self {
            PrefixFilter::AllowAll => true,
            PrefixFilter::Only(set) => set.contains(prefix),
        }
    }
}

impl Default for PrefixFilter {
    fn default() -> Self {
        Self::from_prefixes(DEFAULT_PREFIXES)
    }
}

/// Options for numbering placeholders in a document.
#[derive(Debug, Clone)]
pub struct ReplaceOptions {
    /// Prefixes that receive numbers
    pub prefixes: PrefixFilter,

    /// Regular expression with exactly one capture group (the prefix)
    pub pattern: String,

    /// Scan header parts
    pub include_headers: bool,

    /// Scan footer parts
    pub include_footers: bool,

    /// Zero-pad generated numbers to at least this many digits
    pub min_width: usize,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            prefixes: PrefixFilter::default(),
            pattern: DEFAULT_PATTERN.to_string(),
            include_headers: true,
            include_footers: true,
            min_width: DEFAULT_MIN_WIDTH,
        }
    }
}

impl ReplaceOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict numbering to the given prefixes (empty = all prefixes).
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = PrefixFilter::from_prefixes(prefixes);
        self
    }

    /// Number every captured prefix.
    pub fn allow_all_prefixes(mut self) -> Self {
        self.prefixes = PrefixFilter::AllowAll;
        self
    }

    /// Set the placeholder pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Set whether header parts are scanned.
    pub fn with_headers(mut self, include: bool) -> Self {
        self.include_headers = include;
        self
    }

    /// Set whether footer parts are scanned.
    pub fn with_footers(mut self, include: bool) -> Self {
        self.include_footers = include;
        self
    }

    /// Set the minimum digit count (at least 1).
    pub fn with_min_width(mut self, width: usize) -> Self {
        self.min_width = width.max(1);
        self
    }
}
