//! In-memory `.docx` builders shared by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

pub const WORD_NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape" xmlns:v="urn:schemas-microsoft-com:vml""#;

/// A paragraph with one run per text.
pub fn paragraph(runs: &[&str]) -> String {
    let mut xml = String::from("<w:p>");
    for text in runs {
        xml.push_str(&format!(
            r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
            text
        ));
    }
    xml.push_str("</w:p>");
    xml
}

/// A paragraph holding a text box, stored the way Word does: a DrawingML
/// `mc:Choice` and a VML `mc:Fallback` with the same text.
pub fn text_box(text: &str) -> String {
    let content = format!(
        "<w:txbxContent>{}</w:txbxContent>",
        paragraph(&[text])
    );
    format!(
        r#"<w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wps:wsp><wps:txbx>{c}</wps:txbx></wps:wsp></w:drawing></mc:Choice><mc:Fallback><w:pict><v:shape><v:textbox>{c}</v:textbox></v:shape></w:pict></mc:Fallback></mc:AlternateContent></w:r></w:p>"#,
        c = content
    )
}

/// A table; each cell holds already-built block markup.
pub fn table(rows: &[Vec<String>]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr/>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row {
            xml.push_str(&format!("<w:tc>{}</w:tc>", cell));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// Builder for a minimal word-processing package.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    headers: Vec<String>,
    footers: Vec<String>,
    header_aliases: usize,
    comments: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, xml: impl Into<String>) -> Self {
        self.body.push_str(&xml.into());
        self
    }

    pub fn header(mut self, xml: impl Into<String>) -> Self {
        self.headers.push(xml.into());
        self
    }

    /// Reference the first header again under a separate relationship ID.
    pub fn header_alias(mut self) -> Self {
        self.header_aliases += 1;
        self
    }

    pub fn footer(mut self, xml: impl Into<String>) -> Self {
        self.footers.push(xml.into());
        self
    }

    pub fn comments(mut self, xml: impl Into<String>) -> Self {
        self.comments = Some(xml.into());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut overrides = String::from(
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        );
        let mut rels = String::new();
        let mut sect = String::new();

        for (i, _) in self.headers.iter().enumerate() {
            overrides.push_str(&format!(
                r#"<Override PartName="/word/header{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>"#,
                n = i + 1
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rIdH{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header{n}.xml"/>"#,
                n = i + 1
            ));
            sect.push_str(&format!(
                r#"<w:headerReference w:type="default" r:id="rIdH{}"/>"#,
                i + 1
            ));
        }
        for i in 0..self.header_aliases {
            rels.push_str(&format!(
                r#"<Relationship Id="rIdHA{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>"#,
                i + 1
            ));
            sect.push_str(&format!(
                r#"<w:headerReference w:type="first" r:id="rIdHA{}"/>"#,
                i + 1
            ));
        }
        for (i, _) in self.footers.iter().enumerate() {
            overrides.push_str(&format!(
                r#"<Override PartName="/word/footer{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/>"#,
                n = i + 1
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rIdF{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer{n}.xml"/>"#,
                n = i + 1
            ));
            sect.push_str(&format!(
                r#"<w:footerReference w:type="default" r:id="rIdF{}"/>"#,
                i + 1
            ));
        }
        if self.comments.is_some() {
            rels.push_str(r#"<Relationship Id="rIdC1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments" Target="comments.xml"/>"#);
        }

        write(
            &mut zip,
            options,
            "[Content_Types].xml",
            &format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>{}</Types>"#,
                overrides
            ),
        );
        write(
            &mut zip,
            options,
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#,
        );
        write(
            &mut zip,
            options,
            "word/_rels/document.xml.rels",
            &format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                rels
            ),
        );
        write(
            &mut zip,
            options,
            "word/document.xml",
            &format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document {}><w:body>{}<w:sectPr>{}</w:sectPr></w:body></w:document>"#,
                WORD_NS, self.body, sect
            ),
        );
        for (i, header) in self.headers.iter().enumerate() {
            write(
                &mut zip,
                options,
                &format!("word/header{}.xml", i + 1),
                &format!(r#"<w:hdr {}>{}</w:hdr>"#, WORD_NS, header),
            );
        }
        for (i, footer) in self.footers.iter().enumerate() {
            write(
                &mut zip,
                options,
                &format!("word/footer{}.xml", i + 1),
                &format!(r#"<w:ftr {}>{}</w:ftr>"#, WORD_NS, footer),
            );
        }
        if let Some(comments) = &self.comments {
            write(
                &mut zip,
                options,
                "word/comments.xml",
                &format!(r#"<w:comments {}>{}</w:comments>"#, WORD_NS, comments),
            );
        }
        write(&mut zip, options, "docProps/app.xml", "<Properties/>");

        zip.finish().unwrap().into_inner()
    }

    pub fn write_to(&self, path: &std::path::Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}

fn write(
    zip: &mut zip::ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    name: &str,
    content: &str,
) {
    zip.start_file(name, options).unwrap();
    zip.write_all(content.as_bytes()).unwrap();
}

/// Text of every run in traversal order.
pub fn run_texts(doc: &docseq::WordDocument) -> Vec<String> {
    doc.runs()
        .map(|run| docseq::TextNode::text(run).to_string())
        .collect()
}
