//! Abbreviation and term extraction from review comments.
//!
//! Reviewers mark up a document with comments whose text starts with a sigil:
//!
//! - `@Meaning` on a comment defines the commented word as an abbreviation.
//! - `#Term: Definition` defines a glossary term.
//!
//! The commented word is the text of the last non-blank run at or before the
//! comment reference.

use crate::container::OoxmlContainer;
use crate::detect::detect_word_flavor;
use crate::docx::comments::{parse_comments, scan_comment_anchors, COMMENTS_REL};
use crate::docx::{main_part_path, writer};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default comments part location.
const DEFAULT_COMMENTS_PART: &str = "word/comments.xml";

/// Ordered key/value entries where a repeated key overwrites in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    items: Vec<(String, String)>,
}

impl Entries {
    /// Insert or overwrite `key`, keeping its first position.
    pub fn insert(&mut self, key: String, value: String) {
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.items.push((key, value)),
        }
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in insertion order.
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Abbreviations and terms collected from a document's comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    /// Abbreviation -> meaning
    pub abbreviations: Entries,
    /// Term -> definition
    pub terms: Entries,
}

/// Paths of the documents written by [`Glossary::write_documents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryOutput {
    /// The abbreviations table document
    pub abbreviations: PathBuf,
    /// The terms table document
    pub terms: PathBuf,
}

impl Glossary {
    /// Extract the glossary from the document at `path`.
    pub fn extract(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        OoxmlContainer::open(path)
            .and_then(|container| Self::from_container(&container))
            .map_err(|e| Error::load(path, e))
    }

    /// Extract the glossary from an opened package.
    pub fn from_container(container: &OoxmlContainer) -> Result<Self> {
        detect_word_flavor(container)?;
        let main_path = main_part_path(container)?;

        let rels = container.read_relationships(&main_path)?;
        let comments_path = rels
            .get_by_type(COMMENTS_REL)
            .first()
            .map(|rel| OoxmlContainer::resolve_path(&main_path, &rel.target))
            .unwrap_or_else(|| DEFAULT_COMMENTS_PART.to_string());

        if !container.exists(&comments_path) {
            tracing::info!("document has no comments");
            return Ok(Self::default());
        }

        let comments: HashMap<String, String> = parse_comments(&container.read_xml(&comments_path)?)?
            .into_iter()
            .map(|c| (c.id, c.text))
            .collect();
        let anchors = scan_comment_anchors(&container.read_xml(&main_path)?)?;

        let mut glossary = Self::default();
        for anchor in anchors {
            let Some(text) = comments.get(&anchor.id) else {
                tracing::warn!(id = %anchor.id, "comment reference without a comment");
                continue;
            };
            glossary.add_comment(&anchor.preceding_text, text);
        }

        tracing::debug!(
            abbreviations = glossary.abbreviations.len(),
            terms = glossary.terms.len(),
            "extracted glossary"
        );
        Ok(glossary)
    }

    /// Classify one comment attached to `commented` text.
    pub fn add_comment(&mut self, commented: &str, comment: &str) {
        let comment = comment.trim();

        if let Some(meaning) = comment.strip_prefix('@') {
            self.abbreviations
                .insert(commented.to_string(), meaning.to_string());
        } else if let Some(body) = comment.strip_prefix('#') {
            match body.split_once(':') {
                Some((term, definition)) => self
                    .terms
                    .insert(term.to_string(), definition.trim().to_string()),
                None => tracing::warn!(comment, "term comment has no ':' separator"),
            }
        }
    }

    /// Write `<stem>_abbr.docx` and `<stem>_terms.docx` into `out_dir`.
    ///
    /// `source` is the document the glossary came from; only its file stem
    /// is used.
    pub fn write_documents(
        &self,
        source: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
    ) -> Result<GlossaryOutput> {
        let stem = source
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let out_dir = out_dir.as_ref();

        let output = GlossaryOutput {
            abbreviations: out_dir.join(format!("{}_abbr.docx", stem)),
            terms: out_dir.join(format!("{}_terms.docx", stem)),
        };

        write_table(
            &output.abbreviations,
            ["Abbreviation", "Meaning"],
            &self.abbreviations,
        )?;
        write_table(&output.terms, ["Term", "Definition"], &self.terms)?;

        Ok(output)
    }
}

fn write_table(path: &Path, header: [&str; 2], entries: &Entries) -> Result<()> {
    writer::table_document(header, entries.as_slice())
        .and_then(|data| fs::write(path, data).map_err(Error::from))
        .map_err(|e| Error::save(path, e))
}
