//! Item cards and section banners.
//!
//! Everything here is a pure function of its inputs: a [`Block`] carries its
//! total height and the position of each of its parts relative to the block's
//! top-left corner, so the paginator only needs the height and the renderer
//! never re-measures.

use crate::LayoutError;
use crate::config::{CardMetrics, IntroMetrics, PageGeometry};
use crate::fonts::FontSpec;
use crate::text::TextMeasurer;
use crate::theme::StatusTheme;
use auditpdf_types::{ItemId, Item, Rect, ResolvedImage, Section, SectionId, Size, Status};

/// Wrapped lines positioned inside a block. `y` is the top of the first line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLines {
    pub lines: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub font: FontSpec,
    pub line_height: f32,
}

impl TextLines {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub status: Status,
    pub label: String,
    pub font: FontSpec,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The tinted box holding an item's explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: TextLines,
    pub body: TextLines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlot {
    pub item: ItemId,
    pub x: f32,
    pub y: f32,
    pub size: Size,
}

/// One item laid out as an atomic card.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub item: ItemId,
    pub status: Status,
    pub width: f32,
    pub height: f32,
    pub badge: Badge,
    pub title: TextLines,
    pub description: TextLines,
    pub callout: Option<Callout>,
    pub image: Option<ImageSlot>,
}

/// The banner at the top of a section's first page.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionIntro {
    pub section: SectionId,
    pub number: usize,
    pub item_count: usize,
    pub width: f32,
    pub height: f32,
    pub badge: Rect,
    pub badge_label: String,
    pub title: TextLines,
    pub description: TextLines,
    pub count: TextLines,
}

/// Turns items into blocks for a fixed content width.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    measurer: TextMeasurer,
    card: CardMetrics,
    intro: IntroMetrics,
    theme: StatusTheme,
    content_width: f32,
}

impl LayoutEngine {
    pub fn new(measurer: TextMeasurer, page: &PageGeometry) -> Self {
        Self {
            measurer,
            card: CardMetrics::default(),
            intro: IntroMetrics::default(),
            theme: StatusTheme::default(),
            content_width: page.content_width(),
        }
    }

    pub fn with_card_metrics(mut self, card: CardMetrics) -> Self {
        self.card = card;
        self
    }

    pub fn with_intro_metrics(mut self, intro: IntroMetrics) -> Self {
        self.intro = intro;
        self
    }

    pub fn with_theme(mut self, theme: StatusTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn measurer(&self) -> &TextMeasurer {
        &self.measurer
    }

    pub fn card_metrics(&self) -> &CardMetrics {
        &self.card
    }

    pub fn theme(&self) -> &StatusTheme {
        &self.theme
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Lays out one item. The image, when given, is scaled down further if its
    /// display size is wider than the card's inner width.
    pub fn layout(&self, item: &Item, image: Option<&ResolvedImage>) -> Result<Block, LayoutError> {
        let m = &self.card;
        let inner_width = self.content_width - 2.0 * m.padding;
        let style = self.theme.style(item.status);
        let mut y = m.accent_height + m.padding;

        let badge_width = self.measurer.width(&style.label, &m.badge_font)? + 2.0 * m.badge_padding;
        let badge = Badge {
            status: item.status,
            label: style.label.clone(),
            font: m.badge_font,
            x: m.padding,
            y,
            width: badge_width,
            height: m.badge_height,
        };
        y += m.badge_height + m.badge_gap;

        let title = TextLines {
            lines: self.measurer.wrap(&item.title, inner_width, &m.title_font)?,
            x: m.padding,
            y,
            font: m.title_font,
            line_height: m.title_line_height,
        };
        y += title.height();

        let description_lines =
            self.measurer
                .wrap(&item.description, inner_width, &m.description_font)?;
        if !description_lines.is_empty() {
            y += m.title_gap;
        }
        let description = TextLines {
            lines: description_lines,
            x: m.padding,
            y,
            font: m.description_font,
            line_height: m.description_line_height,
        };
        y += description.height();

        let callout = match item.explanation_text() {
            Some(text) => {
                y += m.callout_margin;
                let callout = self.layout_callout(text, &style.callout_label, y, inner_width)?;
                y += callout.height;
                Some(callout)
            }
            None => None,
        };

        let image = image.map(|resolved| {
            y += m.image_margin;
            let size = resolved
                .display
                .fit_within(Size::new(inner_width, f32::INFINITY));
            let slot = ImageSlot {
                item: item.id.clone(),
                x: m.padding + (inner_width - size.width) / 2.0,
                y,
                size,
            };
            y += size.height;
            slot
        });

        y += m.padding;

        Ok(Block {
            item: item.id.clone(),
            status: item.status,
            width: self.content_width,
            height: y,
            badge,
            title,
            description,
            callout,
            image,
        })
    }

    fn layout_callout(
        &self,
        text: &str,
        label: &str,
        y: f32,
        width: f32,
    ) -> Result<Callout, LayoutError> {
        let m = &self.card;
        let text_x = m.padding + m.callout_bar_width + m.callout_padding;
        let text_width = width - m.callout_bar_width - 2.0 * m.callout_padding;

        let label = TextLines {
            lines: vec![self.measurer.truncate(label, text_width, &m.callout_label_font)?],
            x: text_x,
            y: y + m.callout_padding,
            font: m.callout_label_font,
            line_height: m.callout_label_height,
        };
        let body = TextLines {
            lines: self.measurer.wrap(text, text_width, &m.callout_body_font)?,
            x: text_x,
            y: label.y + m.callout_label_height + m.callout_label_gap,
            font: m.callout_body_font,
            line_height: m.callout_line_height,
        };
        let height = 2.0 * m.callout_padding
            + m.callout_label_height
            + m.callout_label_gap
            + body.height();

        Ok(Callout {
            x: m.padding,
            y,
            width,
            height,
            label,
            body,
        })
    }

    /// Lays out a section banner counting all of the section's items.
    pub fn layout_section_intro(
        &self,
        section: &Section,
        number: usize,
    ) -> Result<SectionIntro, LayoutError> {
        self.layout_intro(section, number, section.items.len())
    }

    /// Lays out a section banner announcing `item_count` items.
    pub fn layout_intro(
        &self,
        section: &Section,
        number: usize,
        item_count: usize,
    ) -> Result<SectionIntro, LayoutError> {
        let m = &self.intro;
        let width = self.content_width;
        let text_x = m.padding + m.badge_size + m.badge_gap;
        let text_width = width - text_x - m.padding;
        let mut y = m.padding;

        let title = TextLines {
            lines: self.measurer.wrap_clamped(
                &section.title,
                text_width,
                &m.title_font,
                m.title_max_lines,
            )?,
            x: text_x,
            y,
            font: m.title_font,
            line_height: m.title_line_height,
        };
        y += title.height();

        let description_lines = self.measurer.wrap_clamped(
            &section.description,
            text_width,
            &m.description_font,
            m.description_max_lines,
        )?;
        if !description_lines.is_empty() {
            y += m.gap;
        }
        let description = TextLines {
            lines: description_lines,
            x: text_x,
            y,
            font: m.description_font,
            line_height: m.description_line_height,
        };
        y += description.height() + m.gap;

        let noun = if item_count == 1 { "item" } else { "items" };
        let count_label = format!("{item_count} {noun} to review in this section");
        let count = TextLines {
            lines: vec![self.measurer.truncate(&count_label, text_width, &m.count_font)?],
            x: text_x,
            y,
            font: m.count_font,
            line_height: m.count_line_height,
        };
        y += count.height();

        let height = y.max(m.padding + m.badge_size) + m.padding;

        Ok(SectionIntro {
            section: section.id.clone(),
            number,
            item_count,
            width,
            height,
            badge: Rect::new(m.padding, m.padding, m.badge_size, m.badge_size),
            badge_label: format!("{number:02}"),
            title,
            description,
            count,
        })
    }
}
