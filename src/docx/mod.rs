//! DOCX (Word) document access.
//!
//! This module opens Office Open XML word-processing packages, exposes their
//! text runs in a fixed traversal order, and writes edited packages back out.

pub mod comments;
mod document;
pub mod part;
pub mod writer;

pub use document::WordDocument;
pub(crate) use document::main_part_path;
pub use part::{PartKind, Region, RunText, TextPart};
