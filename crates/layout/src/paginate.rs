//! Greedy page breaking.
//!
//! A single forward pass over sections and items. Blocks are atomic: a block
//! that does not fit below the current offset moves to a new page as a whole,
//! and nothing already placed is ever revisited.

use crate::LayoutError;
use crate::block::{Block, LayoutEngine, SectionIntro};
use crate::config::{PaginationSettings, SectionBreak};
use auditpdf_types::{ItemId, ResolvedImages, Section, SectionId};
use std::collections::BTreeMap;

// Small tolerance for floating point inaccuracies when checking fit
const EPSILON: f32 = 0.01;

/// A block assigned to a page. `offset` is measured from the top of the
/// page's content area.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub block: Block,
    pub page: usize,
    pub offset: f32,
}

impl PlacedBlock {
    pub fn bottom(&self) -> f32 {
        self.offset + self.block.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedIntro {
    pub intro: SectionIntro,
    pub offset: f32,
}

/// One content page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    /// The section the page was opened for; shown in the running header.
    pub section: SectionId,
    pub section_number: usize,
    pub section_title: String,
    pub intros: Vec<PlacedIntro>,
    pub blocks: Vec<PlacedBlock>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.intros.is_empty() && self.blocks.is_empty()
    }
}

/// First page of every paginated section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPageMap(BTreeMap<SectionId, usize>);

impl SectionPageMap {
    pub fn get(&self, section: &SectionId) -> Option<usize> {
        self.0.get(section).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionId, usize)> {
        self.0.iter().map(|(id, page)| (id, *page))
    }

    fn insert(&mut self, section: SectionId, page: usize) {
        self.0.entry(section).or_insert(page);
    }
}

/// A block taller than a whole page. It is still placed, alone on its page,
/// and overruns the bottom of the content area.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOverflow {
    pub item: ItemId,
    pub page: usize,
    pub height: f32,
    pub available: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub pages: Vec<Page>,
    pub section_pages: SectionPageMap,
    pub overflows: Vec<LayoutOverflow>,
    pub first_content_page: usize,
}

impl Pagination {
    /// Total page count including the pages before the first content page.
    pub fn total_pages(&self) -> usize {
        self.first_content_page - 1 + self.pages.len()
    }

    pub fn placed_blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.pages.iter().flat_map(|page| page.blocks.iter())
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|page| page.blocks.len()).sum()
    }
}

pub struct Paginator<'e> {
    engine: &'e LayoutEngine,
    settings: PaginationSettings,
}

impl<'e> Paginator<'e> {
    pub fn new(engine: &'e LayoutEngine, settings: PaginationSettings) -> Self {
        Self { engine, settings }
    }

    pub fn settings(&self) -> &PaginationSettings {
        &self.settings
    }

    pub fn paginate(
        &self,
        sections: &[Section],
        images: &ResolvedImages,
    ) -> Result<Pagination, LayoutError> {
        self.settings.validate()?;

        let mut cursor = Cursor::new(&self.settings);
        let mut section_pages = SectionPageMap::default();
        let mut overflows = Vec::new();
        let available = self.settings.available_height();

        for (index, section) in sections.iter().enumerate() {
            let number = index + 1;
            let items: Vec<_> = section
                .items
                .iter()
                .filter(|item| self.settings.include_pending || item.status.is_completed())
                .collect();

            if !self.settings.include_pending && items.is_empty() {
                log::debug!("Skipping section '{}': no completed items.", section.id);
                continue;
            }

            let intro = self.engine.layout_intro(section, number, items.len())?;
            let blocks = items
                .iter()
                .map(|item| Ok((*item, self.engine.layout(item, images.get(&item.id))?)))
                .collect::<Result<Vec<_>, LayoutError>>()?;

            // The banner never ends a page without the section's first card.
            let lead = blocks
                .first()
                .map_or(0.0, |(_, block)| self.settings.block_gap + block.height);
            let fresh_page = match self.settings.section_break {
                SectionBreak::NewPage => true,
                SectionBreak::Continue => !cursor.fits(intro.height + lead),
            };
            if fresh_page {
                cursor.open_page(section, number);
            }
            section_pages.insert(section.id.clone(), cursor.page_number());
            cursor.place_intro(intro);

            for (item, block) in blocks {
                if !cursor.fits(block.height) && cursor.has_content() {
                    log::debug!(
                        "Page break before item '{}': {:.2}pt block at offset {:.2}.",
                        item.id,
                        block.height,
                        cursor.offset
                    );
                    cursor.open_page(section, number);
                }

                if block.height > available + EPSILON {
                    log::warn!(
                        "Item '{}' is {:.2}pt tall, more than the {:.2}pt available on a page.",
                        item.id,
                        block.height,
                        available
                    );
                    overflows.push(LayoutOverflow {
                        item: item.id.clone(),
                        page: cursor.page_number(),
                        height: block.height,
                        available,
                    });
                }

                cursor.place_block(block);
            }
        }

        let pages = cursor.finish();
        log::debug!(
            "Paginated {} sections into {} content pages.",
            section_pages.len(),
            pages.len()
        );

        Ok(Pagination {
            pages,
            section_pages,
            overflows,
            first_content_page: self.settings.first_content_page,
        })
    }
}

/// The page/offset cursor. Owned by a single `paginate` call.
struct Cursor<'s> {
    settings: &'s PaginationSettings,
    pages: Vec<Page>,
    offset: f32,
}

impl<'s> Cursor<'s> {
    fn new(settings: &'s PaginationSettings) -> Self {
        Self {
            settings,
            pages: Vec::new(),
            offset: settings.header_height,
        }
    }

    fn page_number(&self) -> usize {
        self.settings.first_content_page + self.pages.len().saturating_sub(1)
    }

    fn has_content(&self) -> bool {
        self.pages.last().is_some_and(|page| !page.is_empty())
    }

    /// Whether `height` fits below the current offset. With no page open
    /// nothing fits.
    fn fits(&self, height: f32) -> bool {
        !self.pages.is_empty() && self.offset + height <= self.settings.content_height + EPSILON
    }

    fn open_page(&mut self, section: &Section, section_number: usize) {
        let number = self.settings.first_content_page + self.pages.len();
        self.pages.push(Page {
            number,
            section: section.id.clone(),
            section_number,
            section_title: section.title.clone(),
            intros: Vec::new(),
            blocks: Vec::new(),
        });
        self.offset = self.settings.header_height;
    }

    fn place_intro(&mut self, intro: SectionIntro) {
        let offset = self.offset;
        self.offset += intro.height + self.settings.block_gap;
        if let Some(page) = self.pages.last_mut() {
            page.intros.push(PlacedIntro { intro, offset });
        }
    }

    fn place_block(&mut self, block: Block) {
        let offset = self.offset;
        let page = self.page_number();
        self.offset += block.height + self.settings.block_gap;
        if let Some(current) = self.pages.last_mut() {
            current.blocks.push(PlacedBlock {
                block,
                page,
                offset,
            });
        }
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}
