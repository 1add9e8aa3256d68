//! Report content model.
//!
//! A [`Document`] is an ordered list of [`Section`]s, each holding
//! [`ContentElement`]s. Element kinds form a closed tagged union
//! ([`ElementBody`]) serialized with a `type` tag.

mod document;
mod element;

pub use document::{Document, Section};
pub use element::{
    Attributes, ContentElement, ElementBody, ElementKind, ImageHeight, ParagraphContent,
    TableRow,
};
