//! Loading, traversing and saving a Word document.

use super::part::{scan_part_references, PartKind, Region, RunText, TextPart};
use crate::container::{OoxmlContainer, OFFICE_DOCUMENT_REL};
use crate::detect::{detect_word_flavor, WordFlavor};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Default location of the main document part.
const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// A Word document opened for editing.
///
/// Holds the package and the scanned text of the main part, its headers, and
/// its footers. Text is edited through [`WordDocument::text_nodes`] and the
/// result is written with [`WordDocument::save`].
#[derive(Debug)]
pub struct WordDocument {
    container: OoxmlContainer,
    flavor: WordFlavor,
    parts: Vec<TextPart>,
}

impl WordDocument {
    /// Open a document from a file.
    ///
    /// Any failure is reported as [`Error::DocumentLoad`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docseq::docx::WordDocument;
    ///
    /// let doc = WordDocument::load("spec.docx")?;
    /// println!("{} text runs", doc.runs().count());
    /// # Ok::<(), docseq::Error>(())
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        OoxmlContainer::open(path)
            .and_then(Self::from_container)
            .map_err(|e| Error::load(path, e))
    }

    /// Open a document from bytes.
    pub fn load_bytes(data: Vec<u8>) -> Result<Self> {
        OoxmlContainer::from_bytes(data)
            .and_then(Self::from_container)
            .map_err(|e| Error::load("<memory>", e))
    }

    fn from_container(container: OoxmlContainer) -> Result<Self> {
        let flavor = detect_word_flavor(&container)?;
        let main_path = main_part_path(&container)?;

        let main_xml = container.read_xml(&main_path)?;
        let references = scan_part_references(&main_xml)?;
        let main = TextPart::parse(main_path.as_str(), PartKind::Main, main_xml)?;

        let rels = container.read_relationships(&main_path)?;
        let mut headers = Vec::new();
        let mut footers = Vec::new();
        let mut loaded = BTreeSet::from([main_path.clone()]);

        for reference in references {
            let Some(rel) = rels.get(&reference.rel_id) else {
                tracing::warn!(rel_id = %reference.rel_id, "section references unknown relationship");
                continue;
            };
            let path = OoxmlContainer::resolve_path(&main_path, &rel.target);
            if !container.exists(&path) {
                tracing::warn!(part = %path, "referenced part is missing from the package");
                continue;
            }
            if !loaded.insert(path.clone()) {
                tracing::debug!(part = %path, rel_id = %reference.rel_id, "part already loaded");
                continue;
            }

            let part = TextPart::parse(path.as_str(), reference.kind, container.read_xml(&path)?)?;
            match reference.kind {
                PartKind::Header => headers.push(part),
                _ => footers.push(part),
            }
        }

        let mut parts = Vec::with_capacity(1 + headers.len() + footers.len());
        parts.push(main);
        parts.extend(headers);
        parts.extend(footers);

        Ok(Self {
            container,
            flavor,
            parts,
        })
    }

    /// The package variant (document, template, macro-enabled).
    pub fn flavor(&self) -> WordFlavor {
        self.flavor
    }

    /// Scanned parts: the main part, then headers, then footers.
    pub fn parts(&self) -> &[TextPart] {
        &self.parts
    }

    /// All text runs in traversal order.
    pub fn runs(&self) -> impl Iterator<Item = &RunText> {
        let mut ordered: Vec<&RunText> = self.parts.iter().flat_map(|p| p.runs()).collect();
        ordered.sort_by_key(|run| run.region());
        ordered.into_iter()
    }

    /// Editable text runs in traversal order.
    ///
    /// Body text outside tables comes first, then table text (row by row,
    /// cell by cell, nested tables in place), then headers, then footers.
    pub fn text_nodes(&mut self) -> Vec<&mut RunText> {
        let mut nodes: Vec<&mut RunText> = self
            .parts
            .iter_mut()
            .flat_map(|p| p.runs_mut().iter_mut())
            .collect();
        // Stable: keeps document order within a region.
        nodes.sort_by_key(|run| run.region());
        nodes
    }

    /// Editable text runs restricted to `regions`, in traversal order.
    pub fn text_nodes_in(&mut self, regions: &[Region]) -> Vec<&mut RunText> {
        self.text_nodes()
            .into_iter()
            .filter(|run| regions.contains(&run.region()))
            .collect()
    }

    /// Whether any text run was edited.
    pub fn is_modified(&self) -> bool {
        self.parts.iter().any(TextPart::is_dirty)
    }

    /// Serialize the document, rewriting only the edited parts.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.container.to_bytes(&self.modified_parts())
    }

    /// Save the document to `path`.
    ///
    /// The package is written to a sibling temporary file first and renamed
    /// into place, so a failure leaves no partial output behind. Any failure
    /// is reported as [`Error::DocumentSave`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write_atomically(path).map_err(|e| Error::save(path, e))
    }

    fn write_atomically(&self, path: &Path) -> Result<()> {
        let modified = self.modified_parts();
        let file_name = path.file_name().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "output path has no file name",
            ))
        })?;
        let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        let result = fs::File::create(&tmp_path)
            .map_err(Error::from)
            .and_then(|file| self.container.write_to(file, &modified).map(drop))
            .and_then(|()| fs::rename(&tmp_path, path).map_err(Error::from));

        match result {
            Ok(()) => {
                tracing::debug!(output = %path.display(), rewritten = modified.len(), "saved document");
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                Err(e)
            }
        }
    }

    fn modified_parts(&self) -> BTreeMap<String, Vec<u8>> {
        self.parts
            .iter()
            .filter(|part| part.is_dirty())
            .map(|part| {
                tracing::debug!(part = %part.path(), "rewriting part");
                (part.path().to_string(), part.to_xml().into_bytes())
            })
            .collect()
    }
}

/// Locate the main document part through the package relationships.
pub(crate) fn main_part_path(container: &OoxmlContainer) -> Result<String> {
    let rels = container.read_package_relationships()?;
    let path = rels
        .get_by_type(OFFICE_DOCUMENT_REL)
        .first()
        .map(|rel| OoxmlContainer::resolve_path("", &rel.target))
        .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());

    if container.exists(&path) {
        Ok(path)
    } else {
        Err(Error::MissingComponent(path))
    }
}
