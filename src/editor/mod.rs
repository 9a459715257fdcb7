//! The editable document.
//!
//! Holds the raw markdown text and a flat cursor offset, with the
//! line-oriented helpers the clipboard operations are built on.

mod document;

pub use document::{Direction, Document, current_line, delete_line};
