use crate::block::LayoutEngine;
use crate::config::{PageGeometry, PaginationSettings};
use crate::fonts::{FontFace, FontMetrics, StandardFontMetrics};
use crate::paginate::{Pagination, Paginator};
use crate::text::TextMeasurer;
use crate::LayoutError;
use auditpdf_types::{Item, ResolvedImage, ResolvedImages, Section, Size, Status};
use std::sync::Arc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a default layout engine for testing purposes.
pub fn create_test_engine() -> LayoutEngine {
    LayoutEngine::new(TextMeasurer::default(), &PageGeometry::a4())
}

pub fn paginate_test_sections(
    sections: &[Section],
    settings: PaginationSettings,
) -> Result<Pagination, LayoutError> {
    let engine = create_test_engine();
    Paginator::new(&engine, settings).paginate(sections, &ResolvedImages::new())
}

pub fn default_settings() -> PaginationSettings {
    PaginationSettings::for_page(&PageGeometry::a4())
}

pub fn pass_item(id: &str) -> Item {
    Item::new(id, format!("Checklist item {id}"))
        .with_description("Confirm the element is visible above the fold on desktop and mobile.")
        .with_status(Status::Pass)
}

pub fn long_text(chars: usize) -> String {
    "Lorem ipsum dolor sit amet consectetur adipiscing elit "
        .chars()
        .cycle()
        .take(chars)
        .collect()
}

pub fn section_with_items(id: &str, count: usize) -> Section {
    Section::new(id, format!("Section {id}"))
        .with_description("Things to verify in this area of the site.")
        .with_items((0..count).map(|i| pass_item(&format!("{id}-{i}"))))
}

pub fn resolved_image(width: f32, height: f32) -> ResolvedImage {
    let source = Size::new(width, height);
    ResolvedImage {
        source,
        pixel_width: width as u32,
        pixel_height: height as u32,
        jpeg: Arc::from(Vec::new()),
        display: source.fit_within(Size::new(375.0, 225.0)),
    }
}

/// Metrics provider that knows the regular face only.
#[derive(Debug)]
pub struct RegularOnlyMetrics;

impl FontMetrics for RegularOnlyMetrics {
    fn advance_width(&self, face: FontFace, ch: char) -> Option<u16> {
        match face {
            FontFace::Regular => StandardFontMetrics.advance_width(face, ch),
            _ => None,
        }
    }

    fn base_font(&self, face: FontFace) -> Option<&'static str> {
        match face {
            FontFace::Regular => Some("Helvetica"),
            _ => None,
        }
    }
}
