//! aula-export
//!
//! Presentations of a validated Plan Document: plain text, the
//! print-oriented Markdown layout (via Tera), DOCX, and a share link.

pub mod artifact;
pub mod docx;
pub mod error;
pub mod guard;
pub mod naming;
pub mod render;
pub mod share;
pub mod styles;
pub mod text;
