use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::report::PageRenderer;
use auditpdf_layout::{FontFace, FontSpec};
use auditpdf_types::{AuditMetadata, AuditSummary, Rect};

const BAND_HEIGHT: f32 = 250.0;
const GRID_TOP: f32 = 290.0;
const TILES_TOP: f32 = 480.0;

pub(crate) fn draw_cover(
    r: &PageRenderer,
    metadata: &AuditMetadata,
    summary: &AuditSummary,
) -> Result<Canvas, RenderError> {
    let g = &r.page;
    let p = &r.palette;
    let left = g.margins.left;
    let width = g.content_width();
    let mut canvas = Canvas::new(g.height);

    canvas.fill_rect(Rect::new(0.0, 0.0, g.width, BAND_HEIGHT), p.dark);
    canvas.fill_rect(Rect::new(0.0, BAND_HEIGHT, g.width, 6.0), p.accent);
    canvas.fill_rect(Rect::new(left, 64.0, 32.0, 4.0), p.accent);

    let title_font = FontSpec::new(FontFace::Bold, 30.0);
    let title = r.measurer.wrap_clamped(&r.labels.title, width, &title_font, 2)?;
    let mut y = 90.0;
    for line in &title {
        canvas.text(left, y, 36.0, &title_font, p.background, line);
        y += 36.0;
    }
    let subtitle_font = FontSpec::new(FontFace::Regular, 18.0);
    let subtitle = r.measurer.truncate(&r.labels.subtitle, width, &subtitle_font)?;
    canvas.text(left, y + 6.0, 24.0, &subtitle_font, p.accent, &subtitle);

    let pass_rate = format!("{}%", summary.pass_rate());
    let details = [
        ("WEBSITE", metadata.subject.as_str()),
        ("PREPARED BY", metadata.prepared_by.as_str()),
        ("DATE", metadata.date.as_str()),
        ("PASS RATE", pass_rate.as_str()),
    ];
    let label_font = FontSpec::new(FontFace::Bold, 8.5);
    let value_font = FontSpec::new(FontFace::Bold, 12.0);
    let cell_width = (width - 16.0) / 2.0;
    let cell_height = 54.0;
    for (index, (label, value)) in details.into_iter().enumerate() {
        let column = (index % 2) as f32;
        let row = (index / 2) as f32;
        let cell = Rect::new(
            left + column * (cell_width + 16.0),
            GRID_TOP + row * (cell_height + 12.0),
            cell_width,
            cell_height,
        );
        canvas.fill_stroke_rect(cell, p.surface, p.rule, 0.75);
        canvas.fill_rect(Rect::new(cell.x, cell.y, 3.0, cell.height), p.accent);
        canvas.text(cell.x + 14.0, cell.y + 10.0, 11.0, &label_font, p.muted, label);

        let value = if value.trim().is_empty() { "-" } else { value };
        let value = r.measurer.truncate(value, cell.width - 28.0, &value_font)?;
        canvas.text(cell.x + 14.0, cell.y + 26.0, 16.0, &value_font, p.dark, &value);
    }

    let heading_font = FontSpec::new(FontFace::Bold, 14.0);
    canvas.text(left, TILES_TOP - 34.0, 18.0, &heading_font, p.dark, "Audit Summary");

    let tiles = [
        ("Total Items", summary.total, p.dark),
        ("Completed", summary.completed, p.text),
        ("Passed", summary.passed, r.theme.pass.text),
        ("Failed", summary.failed, r.theme.fail.text),
    ];
    let number_font = FontSpec::new(FontFace::Bold, 26.0);
    let caption_font = FontSpec::new(FontFace::Regular, 9.0);
    let tile_width = (width - 36.0) / 4.0;
    for (index, (caption, value, color)) in tiles.into_iter().enumerate() {
        let tile = Rect::new(left + index as f32 * (tile_width + 12.0), TILES_TOP, tile_width, 86.0);
        canvas.fill_stroke_rect(tile, p.surface, p.rule, 0.75);
        canvas.fill_rect(Rect::new(tile.x, tile.y, tile.width, 3.0), color);
        r.centered_text(&mut canvas, tile.x, tile.width, tile.y + 18.0, 32.0, &number_font, color, &value.to_string())?;
        r.centered_text(&mut canvas, tile.x, tile.width, tile.y + 58.0, 12.0, &caption_font, p.muted, caption)?;
    }

    let note_font = FontSpec::new(FontFace::Oblique, 10.0);
    let note = format!(
        "Optional items: {}   Pending items: {}   Completion: {}%",
        summary.optional,
        summary.pending,
        summary.completion_rate()
    );
    canvas.text(left, TILES_TOP + 104.0, 14.0, &note_font, p.muted, &note);

    Ok(canvas)
}
