//! anamnese-export
//!
//! Turns a completed assessment into shareable documents: DOCX from the
//! consensus report, or any text format through a Tera template.

pub mod docx;
pub mod error;
pub mod render;
pub mod styles;
