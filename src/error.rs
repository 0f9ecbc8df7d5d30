use crate::image::ImageError;
use crate::source::SourceError;
use auditpdf_layout::{FontFace, LayoutError};
use auditpdf_render_lopdf::RenderError;
use auditpdf_types::ItemId;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors for a whole export. Any of these aborts the export before a
/// file is written.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Text could not be measured: no metrics for the {face:?} face.")]
    MeasurementFailed { face: FontFace },

    #[error("Layout failed: {0}")]
    Layout(LayoutError),

    #[error("PDF serialization failed: {0}")]
    SerializationFailed(RenderError),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not load the audit: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ExportError {
    /// Short, stable name for diagnostics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::MeasurementFailed { .. } => "measurement_failed",
            ExportError::Layout(_) => "layout",
            ExportError::SerializationFailed(_) => "serialization_failed",
            ExportError::InvalidDocument(_) => "invalid_document",
            ExportError::Io(_) => "io",
            ExportError::Source(_) => "source",
            ExportError::Config(_) => "config",
        }
    }

    /// The message shown to the person who requested the export. Details go
    /// to the log, never to this string.
    pub fn user_message(&self) -> &'static str {
        "Failed to generate PDF. Please try again."
    }
}

impl From<LayoutError> for ExportError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::MeasurementFailed { face } => ExportError::MeasurementFailed { face },
            other => ExportError::Layout(other),
        }
    }
}

impl From<RenderError> for ExportError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Layout(layout) => layout.into(),
            RenderError::Io(io) => ExportError::Io(io),
            other => ExportError::SerializationFailed(other),
        }
    }
}

/// Problems that degrade part of the report without stopping the export.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("Image for item '{item}' could not be used: {reason}")]
    DecodeFailed { item: ItemId, reason: String },

    #[error("Image '{}' for item '{item}' could not be read: {reason}", .path.display())]
    ImageUnreadable {
        item: ItemId,
        path: PathBuf,
        reason: String,
    },

    #[error("Item '{item}' is {height:.1}pt tall but a page only holds {available:.1}pt; it overflows the page.")]
    LayoutOverflow {
        item: ItemId,
        height: f32,
        available: f32,
    },
}

impl Warning {
    pub fn item(&self) -> &ItemId {
        match self {
            Warning::DecodeFailed { item, .. }
            | Warning::ImageUnreadable { item, .. }
            | Warning::LayoutOverflow { item, .. } => item,
        }
    }
}

impl From<(ItemId, ImageError)> for Warning {
    fn from((item, error): (ItemId, ImageError)) -> Self {
        Warning::DecodeFailed {
            item,
            reason: error.to_string(),
        }
    }
}
