//! Detection of word-processing packages.

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Main-part content types of the word-processing package variants.
const WORD_CONTENT_TYPES: [(&str, WordFlavor); 4] = [
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        WordFlavor::Document,
    ),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml",
        WordFlavor::Template,
    ),
    (
        "application/vnd.ms-word.document.macroEnabled.main+xml",
        WordFlavor::MacroEnabledDocument,
    ),
    (
        "application/vnd.ms-word.template.macroEnabledTemplate.main+xml",
        WordFlavor::MacroEnabledTemplate,
    ),
];

/// Other Office main parts, reported by name when rejected.
const OTHER_CONTENT_TYPES: [(&str, &str); 2] = [
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
        "Excel workbook",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        "PowerPoint presentation",
    ),
];

/// Variant of a word-processing package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordFlavor {
    /// Word document (.docx)
    Document,
    /// Word template (.dotx)
    Template,
    /// Macro-enabled document (.docm)
    MacroEnabledDocument,
    /// Macro-enabled template (.dotm)
    MacroEnabledTemplate,
}

impl WordFlavor {
    /// Returns the file extension for this variant.
    pub fn extension(&self) -> &'static str {
        match self {
            WordFlavor::Document => "docx",
            WordFlavor::Template => "dotx",
            WordFlavor::MacroEnabledDocument => "docm",
            WordFlavor::MacroEnabledTemplate => "dotm",
        }
    }
}

impl std::fmt::Display for WordFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WordFlavor::Document => "Word Document",
            WordFlavor::Template => "Word Template",
            WordFlavor::MacroEnabledDocument => "Word Macro-Enabled Document",
            WordFlavor::MacroEnabledTemplate => "Word Macro-Enabled Template",
        };
        f.write_str(name)
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Verify that an opened package is a word-processing document.
///
/// Inspects `[Content_Types].xml`, falling back to the presence of a `word/`
/// folder when the content types are missing or unrecognized.
pub fn detect_word_flavor(container: &OoxmlContainer) -> Result<WordFlavor> {
    if container.exists("[Content_Types].xml") {
        let content_types = container.read_xml("[Content_Types].xml")?;

        for (content_type, flavor) in WORD_CONTENT_TYPES {
            if content_types.contains(content_type) {
                return Ok(flavor);
            }
        }
        for (content_type, name) in OTHER_CONTENT_TYPES {
            if content_types.contains(content_type) {
                return Err(Error::UnsupportedFormat(name.to_string()));
            }
        }
    }

    detect_by_folder_structure(container)
}

fn detect_by_folder_structure(container: &OoxmlContainer) -> Result<WordFlavor> {
    let files = container.list_files();
    let has_word = files.iter().any(|n| n.starts_with("word/"));
    let has_other = files
        .iter()
        .any(|n| n.starts_with("xl/") || n.starts_with("ppt/"));

    match (has_word, has_other) {
        (true, false) => Ok(WordFlavor::Document),
        (false, true) => Err(Error::UnsupportedFormat(
            "not a word-processing package".to_string(),
        )),
        _ => Err(Error::UnknownFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn container_with(entries: &[(&str, &str)]) -> OoxmlContainer {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        let data = zip.finish().unwrap().into_inner();
        OoxmlContainer::from_bytes(data).unwrap()
    }

    #[test]
    fn test_is_zip_file() {
        assert!(is_zip_file(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(!is_zip_file(&[0x00, 0x00, 0x00, 0x00]));
        assert!(!is_zip_file(&[0x50, 0x4B]));
    }

    #[test]
    fn test_detect_docx_content_type() {
        let container = container_with(&[(
            "[Content_Types].xml",
            r#"<Types><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
        )]);
        assert_eq!(detect_word_flavor(&container).unwrap(), WordFlavor::Document);
    }

    #[test]
    fn test_detect_macro_enabled() {
        let container = container_with(&[(
            "[Content_Types].xml",
            r#"<Types><Override PartName="/word/document.xml" ContentType="application/vnd.ms-word.document.macroEnabled.main+xml"/></Types>"#,
        )]);
        let flavor = detect_word_flavor(&container).unwrap();
        assert_eq!(flavor, WordFlavor::MacroEnabledDocument);
        assert_eq!(flavor.extension(), "docm");
    }

    #[test]
    fn test_rejects_workbook() {
        let container = container_with(&[(
            "[Content_Types].xml",
            r#"<Types><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#,
        )]);
        assert!(matches!(
            detect_word_flavor(&container),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_folder_fallback() {
        let container = container_with(&[("word/document.xml", "<w:document/>")]);
        assert_eq!(detect_word_flavor(&container).unwrap(), WordFlavor::Document);

        let container = container_with(&[("readme.txt", "hello")]);
        assert!(matches!(
            detect_word_flavor(&container),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_flavor_display() {
        assert_eq!(WordFlavor::Document.to_string(), "Word Document");
        assert_eq!(WordFlavor::Template.extension(), "dotx");
    }
}
