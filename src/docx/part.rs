//! Text runs of a single WordprocessingML part.
//!
//! A part is scanned once for its `<w:t>` elements. Each element's content is
//! remembered by byte range so that edited runs can be spliced back into the
//! original markup, leaving every other byte of the part untouched.

use crate::error::{Error, Result};
use crate::replace::TextNode;
use quick_xml::events::Event;
use std::ops::Range;

/// Where a run of text lives in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Body text outside of any table
    Body,
    /// Text inside a body table, at any nesting depth
    Table,
    /// Text in a header part
    Header,
    /// Text in a footer part
    Footer,
}

impl Region {
    /// Short lowercase name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Body => "body",
            Region::Table => "table",
            Region::Header => "header",
            Region::Footer => "footer",
        }
    }
}

/// Kind of part being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// The main document part
    Main,
    /// A header part
    Header,
    /// A footer part
    Footer,
}

/// The text content of one `<w:t>` element.
#[derive(Debug, Clone)]
pub struct RunText {
    region: Region,
    range: Range<usize>,
    text: String,
    dirty: bool,
}

impl RunText {
    /// The region this run belongs to.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Whether the text was changed since the part was read.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl TextNode for RunText {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        self.dirty = true;
    }
}

/// Text of a `<w:t>` inside `mc:Fallback`.
///
/// Fallback markup repeats its `mc:Choice` sibling for older readers, so it is
/// never numbered on its own. When its text matches the run at the same
/// position in the Choice branch, it is rewritten along with that run.
#[derive(Debug, Clone)]
struct FallbackText {
    range: Range<usize>,
    twin: Option<usize>,
}

/// Open `mc:AlternateContent` element during a scan.
struct Alternate {
    choice_start: usize,
    choice_end: Option<usize>,
    fallback_next: usize,
}

/// A header or footer reference found in section properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartReference {
    /// Header or footer
    pub kind: PartKind,
    /// Relationship ID of the referenced part
    pub rel_id: String,
}

/// A scanned XML part and its text runs.
#[derive(Debug, Clone)]
pub struct TextPart {
    path: String,
    kind: PartKind,
    xml: String,
    runs: Vec<RunText>,
    fallbacks: Vec<FallbackText>,
}

impl TextPart {
    /// Scan `xml` for text runs.
    pub fn parse(path: impl Into<String>, kind: PartKind, xml: String) -> Result<Self> {
        let path = path.into();
        let (runs, fallbacks) = scan_runs(&xml, kind).map_err(|e| match e {
            Error::XmlParse(msg) => Error::XmlParse(format!("{}: {}", path, msg)),
            other => other,
        })?;
        tracing::debug!(part = %path, runs = runs.len(), "scanned part");

        Ok(Self {
            path,
            kind,
            xml,
            runs,
            fallbacks,
        })
    }

    /// Archive path of the part.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Kind of the part.
    pub fn kind(&self) -> PartKind {
        self.kind
    }

    /// Text runs in document order.
    pub fn runs(&self) -> &[RunText] {
        &self.runs
    }

    /// Mutable text runs in document order.
    pub fn runs_mut(&mut self) -> &mut [RunText] {
        &mut self.runs
    }

    /// Whether any run was edited.
    pub fn is_dirty(&self) -> bool {
        self.runs.iter().any(RunText::is_dirty)
    }

    /// Plain text of the part, one `<w:t>` after another.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Rebuild the part markup with edited runs spliced in.
    ///
    /// Fallback copies of an edited run receive the same text.
    pub fn to_xml(&self) -> String {
        let mut edits: Vec<(&Range<usize>, &str)> = self
            .runs
            .iter()
            .filter(|r| r.dirty)
            .map(|r| (&r.range, r.text.as_str()))
            .collect();
        for fallback in &self.fallbacks {
            if let Some(run) = fallback.twin.map(|i| &self.runs[i]).filter(|r| r.dirty) {
                edits.push((&fallback.range, run.text.as_str()));
            }
        }
        edits.sort_by_key(|(range, _)| range.start);

        let mut out = String::with_capacity(self.xml.len() + 64);
        let mut last = 0;

        for (range, text) in edits {
            out.push_str(&self.xml[last..range.start]);
            out.push_str(&quick_xml::escape::escape(text));
            last = range.end;
        }
        out.push_str(&self.xml[last..]);
        out
    }
}

fn scan_runs(xml: &str, kind: PartKind) -> Result<(Vec<RunText>, Vec<FallbackText>)> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut runs: Vec<RunText> = Vec::new();
    let mut fallbacks = Vec::new();
    let mut alternates: Vec<Alternate> = Vec::new();
    let mut table_depth: u32 = 0;
    let mut fallback_depth: u32 = 0;
    let mut text_start: Option<usize> = None;

    loop {
        let before = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:t" => text_start = Some(reader.buffer_position() as usize),
                b"mc:AlternateContent" => alternates.push(Alternate {
                    choice_start: runs.len(),
                    choice_end: None,
                    fallback_next: 0,
                }),
                b"mc:Fallback" => {
                    fallback_depth += 1;
                    if let Some(alt) = alternates.last_mut() {
                        alt.choice_end.get_or_insert(runs.len());
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"mc:AlternateContent" => {
                    alternates.pop();
                }
                b"mc:Fallback" => fallback_depth = fallback_depth.saturating_sub(1),
                b"w:t" => {
                    if let Some(start) = text_start.take() {
                        let range = start..before;
                        let text = quick_xml::escape::unescape(&xml[range.clone()])?.into_owned();
                        if fallback_depth > 0 {
                            let twin = alternates.last_mut().and_then(|alt| {
                                let index = alt.choice_start + alt.fallback_next;
                                alt.fallback_next += 1;
                                let choice_end = alt.choice_end.unwrap_or(runs.len());
                                (index < choice_end && runs[index].text == text).then_some(index)
                            });
                            fallbacks.push(FallbackText { range, twin });
                            continue;
                        }
                        let region = match kind {
                            PartKind::Main if table_depth > 0 => Region::Table,
                            PartKind::Main => Region::Body,
                            PartKind::Header => Region::Header,
                            PartKind::Footer => Region::Footer,
                        };
                        runs.push(RunText {
                            region,
                            range,
                            text,
                            dirty: false,
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Ok((runs, fallbacks))
}

/// Collect header and footer references from section properties.
///
/// References are returned in order of first appearance, without duplicates.
pub fn scan_part_references(xml: &str) -> Result<Vec<PartReference>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut refs: Vec<PartReference> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                let kind = match e.name().as_ref() {
                    b"w:headerReference" => PartKind::Header,
                    b"w:footerReference" => PartKind::Footer,
                    _ => continue,
                };
                let rel_id = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.as_ref() == b"r:id")
                    .map(|attr| String::from_utf8_lossy(&attr.value).to_string());

                if let Some(rel_id) = rel_id {
                    let reference = PartReference { kind, rel_id };
                    if !refs.contains(&reference) {
                        refs.push(reference);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Ok(refs)
}
