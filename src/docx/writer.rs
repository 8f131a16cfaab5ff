//! Minimal Word documents holding a single two-column table.

use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Build a `.docx` package with one bordered table.
///
/// The first row holds `header`, followed by one row per entry in `rows`.
pub fn table_document(header: [&str; 2], rows: &[(String, String)]) -> Result<Vec<u8>> {
    let document = table_document_xml(header, rows)?;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;
    zip.start_file("word/document.xml", options)?;
    zip.write_all(&document)?;

    Ok(zip.finish()?.into_inner())
}

fn table_document_xml(header: [&str; 2], rows: &[(String, String)]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(
        BytesStart::new("w:document").with_attributes([("xmlns:w", WORD_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;
    writer.write_event(Event::Start(BytesStart::new("w:tbl")))?;
    write_table_properties(&mut writer)?;

    write_row(&mut writer, header[0], header[1])?;
    for (left, right) in rows {
        write_row(&mut writer, left, right)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:tbl")))?;
    // A document must end with a paragraph after a table.
    writer.write_event(Event::Empty(BytesStart::new("w:p")))?;
    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

fn write_table_properties(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:tblPr")))?;
    writer.write_event(Event::Empty(
        BytesStart::new("w:tblW").with_attributes([("w:w", "0"), ("w:type", "auto")]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("w:tblBorders")))?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        writer.write_event(Event::Empty(BytesStart::new(edge).with_attributes([
            ("w:val", "single"),
            ("w:sz", "4"),
            ("w:space", "0"),
            ("w:color", "auto"),
        ])))?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:tblBorders")))?;
    writer.write_event(Event::End(BytesEnd::new("w:tblPr")))?;
    Ok(())
}

fn write_row(writer: &mut Writer<Vec<u8>>, left: &str, right: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:tr")))?;
    for text in [left, right] {
        writer.write_event(Event::Start(BytesStart::new("w:tc")))?;
        writer.write_event(Event::Start(BytesStart::new("w:p")))?;
        writer.write_event(Event::Start(BytesStart::new("w:r")))?;
        writer.write_event(Event::Start(
            BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
        ))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;
        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
        writer.write_event(Event::End(BytesEnd::new("w:tc")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:tr")))?;
    Ok(())
}
