//! Review comments and the text they are attached to.

use crate::error::{Error, Result};
use quick_xml::events::Event;

/// Relationship type of the comments part.
pub const COMMENTS_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";

/// A review comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment ID (`w:id`)
    pub id: String,
    /// Comment text, paragraphs joined by newlines
    pub text: String,
}

/// A comment reference and the text of the run that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAnchor {
    /// Referenced comment ID
    pub id: String,
    /// Trimmed text of the last non-blank run at or before the reference
    pub preceding_text: String,
}

fn attr_value(e: &quick_xml::events::BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Parse the comments part.
pub fn parse_comments(xml: &str) -> Result<Vec<Comment>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut comments = Vec::new();
    let mut current: Option<Comment> = None;
    let mut paragraphs = 0usize;
    let mut in_t = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:comment" => {
                    current = Some(Comment {
                        id: attr_value(e, b"w:id").unwrap_or_default(),
                        text: String::new(),
                    });
                    paragraphs = 0;
                }
                b"w:p" => {
                    if let Some(comment) = current.as_mut() {
                        if paragraphs > 0 {
                            comment.text.push('\n');
                        }
                        paragraphs += 1;
                    }
                }
                b"w:t" => in_t = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_t => {
                if let Some(comment) = current.as_mut() {
                    comment.text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:comment" => {
                    if let Some(comment) = current.take() {
                        comments.push(comment);
                    }
                }
                b"w:t" => in_t = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
    }

    Ok(comments)
}

/// Find every comment reference in a document part, with its preceding text.
pub fn scan_comment_anchors(xml: &str) -> Result<Vec<CommentAnchor>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut anchors = Vec::new();
    let mut preceding = String::new();
    let mut run_text = String::new();
    let mut pending: Vec<String> = Vec::new();
    let mut in_t = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:r" => {
                    run_text.clear();
                    pending.clear();
                }
                b"w:t" => in_t = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"w:commentReference" => {
                if let Some(id) = attr_value(e, b"w:id") {
                    pending.push(id);
                }
            }
            Ok(Event::Text(ref e)) if in_t => run_text.push_str(&e.unescape()?),
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_t = false,
                b"w:r" => {
                    let trimmed = run_text.trim();
                    if !trimmed.is_empty() {
                        preceding = trimmed.to_string();
                    }
                    for id in pending.drain(..) {
                        anchors.push(CommentAnchor {
                            id,
                            preceding_text: preceding.clone(),
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

    Ok(anchors)
}
