//! Content pages: running header, section banners, item cards and footer.

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::report::PageRenderer;
use auditpdf_layout::{Block, FontFace, FontSpec, Page, SectionIntro};
use auditpdf_types::{Color, ItemId, Rect};
use std::collections::HashMap;

const HEADER_FONT: FontSpec = FontSpec::new(FontFace::Bold, 10.0);
const FOOTER_FONT: FontSpec = FontSpec::new(FontFace::Regular, 8.5);

pub(crate) fn draw_content_page(
    r: &PageRenderer,
    page: &Page,
    image_names: &HashMap<ItemId, String>,
) -> Result<Canvas, RenderError> {
    let g = &r.page;
    let p = &r.palette;
    let left = g.margins.left;
    let top = g.margins.top;
    let width = g.content_width();
    let mut canvas = Canvas::new(g.height);

    let caption = format!("{:02}  {}", page.section_number, page.section_title);
    let caption = r.measurer.truncate(&caption, width, &HEADER_FONT)?;
    canvas.text(left, top, 14.0, &HEADER_FONT, p.dark, &caption);
    let rule_y = top + g.header_height - 8.0;
    canvas.line(left, rule_y, left + width, rule_y, p.rule, 0.75);
    canvas.fill_rect(Rect::new(left, rule_y - 1.0, 40.0, 2.0), p.accent);

    for placed in &page.intros {
        draw_intro(r, &mut canvas, &placed.intro, left, top + placed.offset)?;
    }
    for placed in &page.blocks {
        draw_block(r, &mut canvas, &placed.block, left, top + placed.offset, image_names)?;
    }

    Ok(canvas)
}

fn draw_intro(
    r: &PageRenderer,
    canvas: &mut Canvas,
    intro: &SectionIntro,
    x: f32,
    y: f32,
) -> Result<(), RenderError> {
    let p = &r.palette;
    canvas.fill_rect(Rect::new(x, y, intro.width, intro.height), p.dark);
    canvas.fill_rect(Rect::new(x, y, 4.0, intro.height), p.accent);

    let badge = Rect::new(x + intro.badge.x, y + intro.badge.y, intro.badge.width, intro.badge.height);
    canvas.fill_rect(badge, p.accent);
    let badge_font = FontSpec::new(FontFace::Bold, 14.0);
    r.centered_text(canvas, badge.x, badge.width, badge.y, badge.height, &badge_font, p.dark, &intro.badge_label)?;

    canvas.text_lines(&intro.title, x, y, p.background);
    canvas.text_lines(&intro.description, x, y, Color::gray(209));
    canvas.text_lines(&intro.count, x, y, p.accent);
    Ok(())
}

fn draw_block(
    r: &PageRenderer,
    canvas: &mut Canvas,
    block: &Block,
    x: f32,
    y: f32,
    image_names: &HashMap<ItemId, String>,
) -> Result<(), RenderError> {
    let p = &r.palette;
    let card = &r.card;
    let style = r.theme.style(block.status);

    canvas.fill_stroke_rect(Rect::new(x, y, block.width, block.height), p.background, p.rule, card.border_width);
    canvas.fill_rect(Rect::new(x, y, block.width, card.accent_height), style.border);

    let badge = &block.badge;
    let badge_rect = Rect::new(x + badge.x, y + badge.y, badge.width, badge.height);
    canvas.fill_stroke_rect(badge_rect, style.fill, style.border, 0.75);
    r.centered_text(
        canvas,
        badge_rect.x,
        badge_rect.width,
        badge_rect.y,
        badge_rect.height,
        &badge.font,
        style.text,
        &badge.label,
    )?;

    canvas.text_lines(&block.title, x, y, p.dark);
    canvas.text_lines(&block.description, x, y, p.muted);

    if let Some(callout) = &block.callout {
        let area = Rect::new(x + callout.x, y + callout.y, callout.width, callout.height);
        canvas.fill_rect(area, style.fill);
        canvas.fill_rect(Rect::new(area.x, area.y, card.callout_bar_width, area.height), style.border);
        canvas.text_lines(&callout.label, x, y, style.text);
        canvas.text_lines(&callout.body, x, y, p.text);
    }

    if let Some(slot) = &block.image {
        let name = image_names
            .get(&slot.item)
            .ok_or_else(|| RenderError::MissingImage(slot.item.clone()))?;
        let area = Rect::new(x + slot.x, y + slot.y, slot.size.width, slot.size.height);
        canvas.image(name, area);
        canvas.stroke_rect(area, p.rule, 0.5);
    }

    Ok(())
}

/// Footer for a content page. Needs the final page count, so it is drawn in
/// a separate pass over the finished page drafts.
pub(crate) fn draw_footer(
    r: &PageRenderer,
    canvas: &mut Canvas,
    page_number: usize,
    total_pages: usize,
    subject: &str,
) -> Result<(), RenderError> {
    let g = &r.page;
    let p = &r.palette;
    let left = g.margins.left;
    let width = g.content_width();
    let rule_y = g.height - g.margins.bottom + 16.0;
    canvas.line(left, rule_y, left + width, rule_y, p.rule, 0.75);

    let page_label = format!("Page {page_number} of {total_pages}");
    let label_width = r.measurer.width(&page_label, &FOOTER_FONT)?;
    let subject = r.measurer.truncate(subject, width - label_width - 24.0, &FOOTER_FONT)?;
    canvas.text(left, rule_y + 8.0, 12.0, &FOOTER_FONT, p.muted, &subject);
    canvas.text(left + width - label_width, rule_y + 8.0, 12.0, &FOOTER_FONT, p.muted, &page_label);
    Ok(())
}
