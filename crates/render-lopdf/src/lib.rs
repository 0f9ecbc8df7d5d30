//! Report renderer using lopdf.
//!
//! Draws laid-out report pages with vector primitives and the standard Type1
//! fonts, then serializes the document in memory.

mod canvas;
mod cover;
mod error;
mod page;
mod report;
mod toc;
mod writer;

pub use error::RenderError;
pub use report::{CoverLabels, PageRenderer, RenderInput};
pub use writer::{DocumentInfo, OutlineEntry, PdfWriter};
