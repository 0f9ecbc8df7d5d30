//! Font metrics for text measurement.
//!
//! The report is set entirely in the PDF standard Helvetica family, which every
//! conforming reader provides, so nothing has to be embedded. Measurement uses
//! the same advance widths the reader will use when drawing, which keeps wrapped
//! lines and computed block heights in agreement with the rendered output.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Oblique];
}

/// A face at a point size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub face: FontFace,
    pub size: f32,
}

impl FontSpec {
    pub const fn new(face: FontFace, size: f32) -> Self {
        Self { face, size }
    }
}

/// Source of glyph advance widths.
///
/// Widths are in thousandths of an em, as in AFM files. A provider that has no
/// data for a face returns `None`, which measurement reports as a fatal error.
pub trait FontMetrics: Send + Sync + fmt::Debug {
    fn advance_width(&self, face: FontFace, ch: char) -> Option<u16>;

    /// PostScript name the renderer references for this face.
    fn base_font(&self, face: FontFace) -> Option<&'static str>;
}

/// Advance widths of the standard Helvetica family for the printable ASCII
/// range, starting at the space character.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Built-in metrics for Helvetica, Helvetica-Bold and Helvetica-Oblique.
///
/// Characters outside Latin-1 are measured as `?`, matching how the renderer
/// encodes them. Latin-1 characters outside printable ASCII use the face's
/// average lowercase width.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl StandardFontMetrics {
    fn table(face: FontFace) -> &'static [u16; 95] {
        match face {
            FontFace::Regular | FontFace::Oblique => &HELVETICA_WIDTHS,
            FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

impl FontMetrics for StandardFontMetrics {
    fn advance_width(&self, face: FontFace, ch: char) -> Option<u16> {
        let table = Self::table(face);
        let code = ch as u32;
        let width = match code {
            32..=126 => table[(code - 32) as usize],
            0xA0 => table[0],
            0..=255 => match face {
                FontFace::Bold => 611,
                FontFace::Regular | FontFace::Oblique => 556,
            },
            _ => table[('?' as u32 - 32) as usize],
        };
        Some(width)
    }

    fn base_font(&self, face: FontFace) -> Option<&'static str> {
        Some(match face {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
        })
    }
}
