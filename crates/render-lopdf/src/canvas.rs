//! Drawing context for one page.
//!
//! Callers work in page space with a top-left origin; the canvas flips y when
//! emitting PDF operators and skips redundant font and colour changes.

use auditpdf_layout::{FontFace, FontSpec, TextLines};
use auditpdf_types::{Color, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

pub(crate) fn font_resource(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
        FontFace::Oblique => "F3",
    }
}

pub(crate) fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| if c as u32 <= 255 { c as u8 } else { b'?' }).collect()
}

fn color_operands(color: Color) -> Vec<Object> {
    color.components().into_iter().map(Object::from).collect()
}

#[derive(Default, Clone, PartialEq)]
struct CanvasState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

pub struct Canvas {
    page_height: f32,
    content: Content,
    state: CanvasState,
}

impl Canvas {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: CanvasState::default(),
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            self.push("rg", color_operands(color));
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.stroke_color != Some(color) {
            self.push("RG", color_operands(color));
            self.state.stroke_color = Some(color);
        }
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    fn set_font(&mut self, font: &FontSpec) {
        if self.state.font != Some((font.face, font.size)) {
            self.push(
                "Tf",
                vec![Object::Name(font_resource(font.face).as_bytes().to_vec()), font.size.into()],
            );
            self.state.font = Some((font.face, font.size));
        }
    }

    fn push_rect(&mut self, rect: Rect) {
        let y = self.page_height - rect.bottom();
        self.push(
            "re",
            vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()],
        );
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        self.push_rect(rect);
        self.push("f", vec![]);
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.set_stroke(color, width);
        self.push_rect(rect);
        self.push("S", vec![]);
    }

    /// Filled rectangle with a border drawn on top.
    pub fn fill_stroke_rect(&mut self, rect: Rect, fill: Color, border: Color, width: f32) {
        self.set_fill_color(fill);
        self.set_stroke(border, width);
        self.push_rect(rect);
        self.push("B", vec![]);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, width: f32) {
        self.set_stroke(color, width);
        self.push("m", vec![x1.into(), (self.page_height - y1).into()]);
        self.push("l", vec![x2.into(), (self.page_height - y2).into()]);
        self.push("S", vec![]);
    }

    /// Draws one line of text whose line box starts at `top`.
    pub fn text(&mut self, x: f32, top: f32, line_height: f32, font: &FontSpec, color: Color, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let baseline = top + (line_height - font.size) / 2.0 + font.size * 0.8;
        self.push("BT", vec![]);
        self.set_font(font);
        self.set_fill_color(color);
        self.push("Td", vec![x.into(), (self.page_height - baseline).into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    /// Draws pre-wrapped lines offset by the origin of the block they belong to.
    pub fn text_lines(&mut self, lines: &TextLines, origin_x: f32, origin_y: f32, color: Color) {
        for (index, line) in lines.lines.iter().enumerate() {
            let top = origin_y + lines.y + index as f32 * lines.line_height;
            self.text(origin_x + lines.x, top, lines.line_height, &lines.font, color, line);
        }
    }

    /// Paints an image XObject scaled into `rect`.
    pub fn image(&mut self, name: &str, rect: Rect) {
        let y = self.page_height - rect.bottom();
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }
}
