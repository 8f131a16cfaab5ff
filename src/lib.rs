//! # docseq
//!
//! Sequential numbering of placeholder tokens in Word documents.
//!
//! Requirement documents are often drafted with placeholders such as
//! `[REQ-XXX]` and `[SYS-XXX]`. This library walks a `.docx` package in reading
//! order (body, tables, headers, footers) and replaces each placeholder with a
//! zero-padded number, keeping an independent counter per prefix.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docseq::find_and_replace_patterns;
//!
//! let record = find_and_replace_patterns("draft.docx", "final.docx", None, None)?;
//! for (prefix, numbers) in record.iter() {
//!     println!("{}: {} replacements", prefix, numbers.len());
//! }
//! # Ok::<(), docseq::Error>(())
//! ```
//!
//! ## Options
//!
//! ```no_run
//! use docseq::{find_and_replace_patterns_with_options, ReplaceOptions};
//!
//! let options = ReplaceOptions::new()
//!     .with_prefixes(["SYS"])
//!     .with_footers(false);
//!
//! let record = find_and_replace_patterns_with_options("draft.docx", "final.docx", &options)?;
//! # Ok::<(), docseq::Error>(())
//! ```

pub mod container;
pub mod detect;
pub mod docx;
pub mod error;
pub mod glossary;
pub mod options;
pub mod replace;

// Re-exports
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use detect::WordFlavor;
pub use docx::{Region, WordDocument};
pub use error::{Error, Result};
pub use glossary::Glossary;
pub use options::{PrefixFilter, ReplaceOptions, DEFAULT_PATTERN, DEFAULT_PREFIXES};
pub use replace::{PatternReplacer, Replacements, TextNode};

use std::path::Path;

/// Number the placeholders of `input` and write the result to `output`.
///
/// `prefixes` defaults to `["REQ", "SYS"]`; an empty slice numbers every
/// captured prefix. `pattern` defaults to [`DEFAULT_PATTERN`].
///
/// # Errors
///
/// - [`Error::Pattern`] if the pattern does not compile or does not have
///   exactly one capture group.
/// - [`Error::DocumentLoad`] if `input` is missing or not a Word document.
/// - [`Error::DocumentSave`] if `output` cannot be written.
///
/// Nothing is written unless the whole document was processed.
pub fn find_and_replace_patterns(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    prefixes: Option<&[&str]>,
    pattern: Option<&str>,
) -> Result<Replacements> {
    let mut options = ReplaceOptions::new();
    if let Some(prefixes) = prefixes {
        options = options.with_prefixes(prefixes.iter().copied());
    }
    if let Some(pattern) = pattern {
        options = options.with_pattern(pattern);
    }
    find_and_replace_patterns_with_options(input, output, &options)
}

/// Number the placeholders of `input` with `options` and write `output`.
pub fn find_and_replace_patterns_with_options(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ReplaceOptions,
) -> Result<Replacements> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let replacer = PatternReplacer::new(options)?;

    let mut document = WordDocument::load(input)?;
    let record = number_document(&mut document, &replacer, options);
    document.save(output)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        prefixes = record.len(),
        replacements = record.total(),
        "numbered document"
    );
    Ok(record)
}

/// Number the placeholders of a document held in memory.
///
/// Returns the rewritten package and the generated numbers.
pub fn number_bytes(data: Vec<u8>, options: &ReplaceOptions) -> Result<(Vec<u8>, Replacements)> {
    let replacer = PatternReplacer::new(options)?;
    let mut document = WordDocument::load_bytes(data)?;
    let record = number_document(&mut document, &replacer, options);
    let bytes = document.to_bytes()?;
    Ok((bytes, record))
}

/// Run `replacer` over the regions of `document` selected by `options`.
pub fn number_document(
    document: &mut WordDocument,
    replacer: &PatternReplacer,
    options: &ReplaceOptions,
) -> Replacements {
    let mut regions = vec![Region::Body, Region::Table];
    if options.include_headers {
        regions.push(Region::Header);
    }
    if options.include_footers {
        regions.push(Region::Footer);
    }

    replacer.process(document.text_nodes_in(&regions))
}
