//! Paginated PDF reports for audit checklists.
//!
//! A [`Document`] of sections and judged items goes in; a PDF with a cover,
//! a clickable table of contents and one card per item comes out.
//!
//! ```no_run
//! use auditpdf::{DocumentAssembler, DocumentSource, ExportConfig};
//!
//! let loaded = DocumentSource::from_file("audit.json")?;
//! let output = DocumentAssembler::new(ExportConfig::default()).assemble_loaded(&loaded)?;
//! std::fs::write(&output.file_name, &output.bytes)?;
//! for warning in &output.warnings {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod image;
pub mod source;

pub use assembler::{DocumentAssembler, ExportOutput};
pub use config::{ExportConfig, ImageSettings};
pub use error::{ExportError, Warning};
pub use image::{ImageBatch, ImageError, ImageProcessor};
pub use source::{DocumentSource, LoadedDocument, SourceError};

// Re-export the model and layout types callers build documents and settings with
pub use auditpdf_layout::{PageGeometry, SectionBreak, SectionPageMap};
pub use auditpdf_types::{
    AuditMetadata, AuditSummary, Document, ImageBlob, Item, ItemId, Section, SectionId, Status,
};
