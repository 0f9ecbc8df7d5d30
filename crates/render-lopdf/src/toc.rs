use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::report::PageRenderer;
use auditpdf_layout::{FontFace, FontSpec, TocLayout};
use auditpdf_types::Rect;

/// Draws the table of contents. Card geometry comes from the same grid the
/// navigation links are computed from.
pub(crate) fn draw_toc(r: &PageRenderer, toc: &TocLayout) -> Result<Canvas, RenderError> {
    let g = &r.page;
    let p = &r.palette;
    let left = g.margins.left;
    let top = g.margins.top;
    let mut canvas = Canvas::new(g.height);

    let heading_font = FontSpec::new(FontFace::Bold, 24.0);
    canvas.text(left, top + 16.0, 30.0, &heading_font, p.dark, "Table of Contents");
    canvas.fill_rect(Rect::new(left, top + 52.0, 60.0, 4.0), p.accent);
    let hint_font = FontSpec::new(FontFace::Regular, 10.0);
    canvas.text(
        left,
        top + 64.0,
        14.0,
        &hint_font,
        p.muted,
        "Select a section to jump to its findings.",
    );

    let badge_font = FontSpec::new(FontFace::Bold, 10.0);
    for card in &toc.cards {
        canvas.fill_stroke_rect(card.rect, p.surface, p.rule, 0.75);
        canvas.fill_rect(Rect::new(card.rect.x, card.rect.y, 3.0, card.rect.height), p.accent);

        canvas.fill_rect(card.badge, p.accent);
        r.centered_text(
            &mut canvas,
            card.badge.x,
            card.badge.width,
            card.badge.y,
            card.badge.height,
            &badge_font,
            p.dark,
            &card.badge_label,
        )?;

        canvas.text_lines(&card.title, 0.0, 0.0, p.dark);
        canvas.text_lines(&card.description, 0.0, 0.0, p.muted);
        canvas.text_lines(&card.count, 0.0, 0.0, p.dark);
    }

    Ok(canvas)
}
