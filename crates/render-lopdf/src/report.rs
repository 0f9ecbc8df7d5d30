use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::writer::{DocumentInfo, OutlineEntry, PdfWriter};
use crate::{cover, page, toc};
use auditpdf_layout::{
    CardMetrics, FontSpec, LayoutEngine, LinkRegion, PageGeometry, Pagination, Palette, StatusTheme,
    TextMeasurer, TocLayout,
};
use auditpdf_types::{AuditMetadata, AuditSummary, Color, ItemId, ResolvedImages};
use std::collections::HashMap;

/// Cover page wording.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverLabels {
    pub title: String,
    pub subtitle: String,
}

impl Default for CoverLabels {
    fn default() -> Self {
        Self {
            title: "Conversion Rate Optimization".to_string(),
            subtitle: "Analysis Report".to_string(),
        }
    }
}

/// Everything a render pass reads. Produced by layout, pagination and
/// linking; nothing here is modified while drawing.
pub struct RenderInput<'a> {
    pub metadata: &'a AuditMetadata,
    pub summary: AuditSummary,
    pub toc: &'a TocLayout,
    pub pagination: &'a Pagination,
    pub links: &'a [LinkRegion],
    pub images: &'a ResolvedImages,
}

/// Draws the cover, the table of contents and every content page, then
/// serializes the document.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    pub(crate) measurer: TextMeasurer,
    pub(crate) page: PageGeometry,
    pub(crate) palette: Palette,
    pub(crate) theme: StatusTheme,
    pub(crate) card: CardMetrics,
    pub(crate) labels: CoverLabels,
    compress: bool,
}

const FRONT_MATTER_PAGES: usize = 2;
const TOC_PAGE_INDEX: usize = 1;

impl PageRenderer {
    pub fn new(measurer: TextMeasurer, page: PageGeometry) -> Self {
        Self {
            measurer,
            page,
            palette: Palette::default(),
            theme: StatusTheme::default(),
            card: CardMetrics::default(),
            labels: CoverLabels::default(),
            compress: true,
        }
    }

    /// A renderer that draws cards with the metrics, theme and measurer
    /// `engine` laid them out with.
    pub fn for_engine(engine: &LayoutEngine, page: PageGeometry) -> Self {
        Self {
            card: *engine.card_metrics(),
            theme: engine.theme().clone(),
            ..Self::new(engine.measurer().clone(), page)
        }
    }

    pub fn with_labels(mut self, labels: CoverLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn render(&self, input: &RenderInput<'_>) -> Result<Vec<u8>, RenderError> {
        let pagination = input.pagination;
        if pagination.first_content_page != FRONT_MATTER_PAGES + 1 {
            return Err(RenderError::Other(format!(
                "content must start on page {}, pagination starts it on page {}",
                FRONT_MATTER_PAGES + 1,
                pagination.first_content_page
            )));
        }

        let total_pages = pagination.total_pages();
        let mut writer = PdfWriter::new(self.measurer.metrics().as_ref(), total_pages, self.compress)?;

        let mut image_names: HashMap<ItemId, String> = HashMap::new();
        for placed in pagination.placed_blocks() {
            let Some(slot) = &placed.block.image else {
                continue;
            };
            let resolved = input
                .images
                .get(&slot.item)
                .ok_or_else(|| RenderError::MissingImage(slot.item.clone()))?;
            let name = writer.add_jpeg(&resolved.jpeg, resolved.pixel_width, resolved.pixel_height);
            image_names.insert(slot.item.clone(), name);
        }

        let mut drafts = Vec::with_capacity(total_pages);
        drafts.push(cover::draw_cover(self, input.metadata, &input.summary)?);
        drafts.push(toc::draw_toc(self, input.toc)?);
        for content_page in &pagination.pages {
            drafts.push(page::draw_content_page(self, content_page, &image_names)?);
        }

        // Footers go on once every page exists and the total is final.
        let total = drafts.len();
        for (index, canvas) in drafts.iter_mut().enumerate().skip(FRONT_MATTER_PAGES) {
            page::draw_footer(self, canvas, index + 1, total, &input.metadata.subject)?;
        }

        let mut toc_annotations = Vec::with_capacity(input.links.len());
        for region in input.links {
            let target_index = region
                .target_page
                .checked_sub(1)
                .filter(|index| *index < total)
                .ok_or_else(|| {
                    RenderError::Other(format!(
                        "link for section '{}' targets missing page {}",
                        region.section, region.target_page
                    ))
                })?;
            toc_annotations.push(writer.add_link(region.rect, target_index, self.page.height)?);
        }

        for (index, canvas) in drafts.into_iter().enumerate() {
            let annotations = if index == TOC_PAGE_INDEX {
                std::mem::take(&mut toc_annotations)
            } else {
                Vec::new()
            };
            writer.write_page(index, canvas.finish(), annotations, self.page.width, self.page.height)?;
        }

        let outline: Vec<OutlineEntry> = pagination
            .pages
            .iter()
            .flat_map(|content_page| {
                content_page.intros.iter().map(move |placed| OutlineEntry {
                    title: format!("{:02}. {}", placed.intro.number, placed.intro.title.lines.join(" ")),
                    page_index: content_page.number - 1,
                })
            })
            .collect();

        let subject = &input.metadata.subject;
        let info = DocumentInfo {
            title: format!("{} {} - {}", self.labels.title, self.labels.subtitle, subject),
            author: input.metadata.prepared_by.clone(),
            subject: subject.clone(),
        };

        log::debug!(
            "Rendered {} pages with {} images and {} links.",
            total,
            image_names.len(),
            input.links.len()
        );
        writer.finish(&info, &outline)
    }

    /// Draws `text` horizontally centred inside `[x, x + width]`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn centered_text(
        &self,
        canvas: &mut Canvas,
        x: f32,
        width: f32,
        top: f32,
        line_height: f32,
        font: &FontSpec,
        color: Color,
        text: &str,
    ) -> Result<(), RenderError> {
        let text = self.measurer.truncate(text, width, font)?;
        let text_width = self.measurer.width(&text, font)?;
        canvas.text(x + (width - text_width) / 2.0, top, line_height, font, color, &text);
        Ok(())
    }
}
