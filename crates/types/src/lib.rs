pub mod color;
pub mod document;
pub mod geometry;
pub mod ids;
pub mod image;

pub use color::Color;
pub use document::{AuditMetadata, AuditSummary, Document, ImageBlob, Item, Section, Status};
pub use geometry::{Rect, Size};
pub use ids::{ItemId, SectionId};
pub use image::{ResolvedImage, ResolvedImages};
