//! Table of contents geometry and the links it carries.
//!
//! The table of contents is a fixed two-column grid of cards. Card positions
//! depend only on the entry index, so drawing (which happens before the
//! content pages exist) and linking (which needs the finished
//! [`SectionPageMap`]) agree without sharing any state beyond the grid.

use crate::LayoutError;
use crate::block::TextLines;
use crate::config::PageGeometry;
use crate::fonts::{FontFace, FontSpec};
use crate::paginate::SectionPageMap;
use crate::text::TextMeasurer;
use auditpdf_types::{Rect, Section, SectionId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TocGrid {
    pub origin_x: f32,
    pub origin_y: f32,
    pub columns: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub column_gap: f32,
    pub row_gap: f32,
    /// Lowest y a card may reach.
    pub bottom_limit: f32,
}

impl TocGrid {
    pub fn for_page(page: &PageGeometry) -> Self {
        let columns = 2;
        let column_gap = 14.0;
        Self {
            origin_x: page.margins.left,
            origin_y: page.margins.top + 100.0,
            columns,
            cell_width: (page.content_width() - column_gap) / columns as f32,
            cell_height: 92.0,
            column_gap,
            row_gap: 12.0,
            bottom_limit: page.height - page.margins.bottom,
        }
    }

    /// Rectangle of the `index`-th card in page space, top-left origin.
    pub fn cell(&self, index: usize) -> Rect {
        let row = index / self.columns;
        let column = index % self.columns;
        Rect::new(
            self.origin_x + column as f32 * (self.cell_width + self.column_gap),
            self.origin_y + row as f32 * (self.cell_height + self.row_gap),
            self.cell_width,
            self.cell_height,
        )
    }

    pub fn rows(&self) -> usize {
        let usable = self.bottom_limit - self.origin_y + self.row_gap;
        if usable <= 0.0 {
            return 0;
        }
        (usable / (self.cell_height + self.row_gap)).floor() as usize
    }

    /// Number of cards that fit on the single table of contents page.
    pub fn capacity(&self) -> usize {
        self.rows() * self.columns
    }

    pub fn check_capacity(&self, sections: usize) -> Result<(), LayoutError> {
        let capacity = self.capacity();
        if sections > capacity {
            return Err(LayoutError::TocOverflow { sections, capacity });
        }
        Ok(())
    }
}

/// What the table of contents shows for one section.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub section: SectionId,
    pub number: usize,
    pub title: String,
    pub description: String,
    pub item_count: usize,
}

impl TocEntry {
    pub fn from_sections(sections: &[Section]) -> Vec<TocEntry> {
        sections
            .iter()
            .enumerate()
            .map(|(index, section)| TocEntry {
                section: section.id.clone(),
                number: index + 1,
                title: section.title.clone(),
                description: section.description.clone(),
                item_count: section.items.len(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TocCardMetrics {
    pub padding: f32,
    pub badge_size: f32,
    pub badge_gap: f32,
    pub badge_font: FontSpec,
    pub title_font: FontSpec,
    pub title_line_height: f32,
    pub title_max_lines: usize,
    pub description_font: FontSpec,
    pub description_line_height: f32,
    pub description_max_lines: usize,
    pub count_font: FontSpec,
    pub count_line_height: f32,
}

impl Default for TocCardMetrics {
    fn default() -> Self {
        Self {
            padding: 12.0,
            badge_size: 24.0,
            badge_gap: 10.0,
            badge_font: FontSpec::new(FontFace::Bold, 10.0),
            title_font: FontSpec::new(FontFace::Bold, 11.0),
            title_line_height: 14.0,
            title_max_lines: 2,
            description_font: FontSpec::new(FontFace::Regular, 8.5),
            description_line_height: 11.0,
            description_max_lines: 2,
            count_font: FontSpec::new(FontFace::Bold, 8.5),
            count_line_height: 11.0,
        }
    }
}

/// One card with its text clamped to the card. Coordinates are page space.
#[derive(Debug, Clone, PartialEq)]
pub struct TocCard {
    pub section: SectionId,
    pub rect: Rect,
    pub badge: Rect,
    pub badge_label: String,
    pub title: TextLines,
    pub description: TextLines,
    pub count: TextLines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocLayout {
    pub grid: TocGrid,
    pub cards: Vec<TocCard>,
}

impl TocLayout {
    pub fn new(
        measurer: &TextMeasurer,
        grid: TocGrid,
        entries: &[TocEntry],
    ) -> Result<Self, LayoutError> {
        Self::with_metrics(measurer, grid, TocCardMetrics::default(), entries)
    }

    pub fn with_metrics(
        measurer: &TextMeasurer,
        grid: TocGrid,
        m: TocCardMetrics,
        entries: &[TocEntry],
    ) -> Result<Self, LayoutError> {
        grid.check_capacity(entries.len())?;

        let mut cards = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let rect = grid.cell(index);
            let title_x = rect.x + m.padding + m.badge_size + m.badge_gap;
            let title_width = rect.right() - m.padding - title_x;
            let body_x = rect.x + m.padding;
            let body_width = rect.width - 2.0 * m.padding;

            let title = TextLines {
                lines: measurer.wrap_clamped(&entry.title, title_width, &m.title_font, m.title_max_lines)?,
                x: title_x,
                y: rect.y + m.padding,
                font: m.title_font,
                line_height: m.title_line_height,
            };
            let description = TextLines {
                lines: measurer.wrap_clamped(
                    &entry.description,
                    body_width,
                    &m.description_font,
                    m.description_max_lines,
                )?,
                x: body_x,
                y: rect.y + m.padding + m.badge_size.max(title.height()) + 6.0,
                font: m.description_font,
                line_height: m.description_line_height,
            };
            let noun = if entry.item_count == 1 { "Item" } else { "Items" };
            let count = TextLines {
                lines: vec![format!("{} {}", entry.item_count, noun)],
                x: body_x,
                y: rect.bottom() - m.padding - m.count_line_height,
                font: m.count_font,
                line_height: m.count_line_height,
            };

            cards.push(TocCard {
                section: entry.section.clone(),
                rect,
                badge: Rect::new(rect.x + m.padding, rect.y + m.padding, m.badge_size, m.badge_size),
                badge_label: format!("{:02}", entry.number),
                title,
                description,
                count,
            });
        }

        Ok(Self { grid, cards })
    }
}

/// A clickable area on the table of contents page.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRegion {
    pub section: SectionId,
    pub rect: Rect,
    pub target_page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationLinker {
    grid: TocGrid,
}

impl NavigationLinker {
    pub fn new(grid: TocGrid) -> Self {
        Self { grid }
    }

    /// One region per entry whose section was paginated, covering the entry's
    /// card and targeting the section's first page.
    pub fn link(
        &self,
        section_pages: &SectionPageMap,
        entries: &[TocEntry],
    ) -> Result<Vec<LinkRegion>, LayoutError> {
        self.grid.check_capacity(entries.len())?;

        let regions = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let Some(target_page) = section_pages.get(&entry.section) else {
                    log::debug!("No page for section '{}'; leaving its card unlinked.", entry.section);
                    return None;
                };
                Some(LinkRegion {
                    section: entry.section.clone(),
                    rect: self.grid.cell(index),
                    target_page,
                })
            })
            .collect();

        Ok(regions)
    }
}
