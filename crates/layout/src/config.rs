use crate::LayoutError;
use crate::fonts::{FontFace, FontSpec};
use serde::{Deserialize, Serialize};

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 45.0,
            bottom: 50.0,
            left: 45.0,
        }
    }
}

/// Fixed page geometry shared by every page of the report.
///
/// The content area is the page minus its margins. Content pages reserve the
/// first `header_height` points of the content area for the running header;
/// the footer lives in the bottom margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub header_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margins: Margins::default(),
            header_height: 30.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.margins.top - self.margins.bottom
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LayoutError::InvalidSettings(format!(
                "page size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.content_width() < 200.0 {
            return Err(LayoutError::InvalidSettings(format!(
                "content width {:.2} is too narrow for report cards",
                self.content_width()
            )));
        }
        if self.content_height() <= self.header_height * 2.0 {
            return Err(LayoutError::InvalidSettings(format!(
                "content height {:.2} leaves no room below a {:.2} header",
                self.content_height(),
                self.header_height
            )));
        }
        Ok(())
    }
}

/// Spacing and typography of an item card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub padding: f32,
    /// Height of the coloured bar across the top of the card.
    pub accent_height: f32,
    pub border_width: f32,

    pub badge_font: FontSpec,
    pub badge_height: f32,
    pub badge_padding: f32,
    pub badge_gap: f32,

    pub title_font: FontSpec,
    pub title_line_height: f32,
    pub title_gap: f32,

    pub description_font: FontSpec,
    pub description_line_height: f32,

    pub callout_margin: f32,
    pub callout_padding: f32,
    pub callout_bar_width: f32,
    pub callout_label_font: FontSpec,
    pub callout_label_height: f32,
    pub callout_label_gap: f32,
    pub callout_body_font: FontSpec,
    pub callout_line_height: f32,

    pub image_margin: f32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            padding: 18.0,
            accent_height: 3.0,
            border_width: 0.75,

            badge_font: FontSpec::new(FontFace::Bold, 8.5),
            badge_height: 18.0,
            badge_padding: 9.0,
            badge_gap: 10.0,

            title_font: FontSpec::new(FontFace::Bold, 13.0),
            title_line_height: 18.0,
            title_gap: 6.0,

            description_font: FontSpec::new(FontFace::Regular, 10.5),
            description_line_height: 15.0,

            callout_margin: 12.0,
            callout_padding: 12.0,
            callout_bar_width: 3.0,
            callout_label_font: FontSpec::new(FontFace::Bold, 10.0),
            callout_label_height: 15.0,
            callout_label_gap: 4.0,
            callout_body_font: FontSpec::new(FontFace::Regular, 10.0),
            callout_line_height: 15.0,

            image_margin: 12.0,
        }
    }
}

/// Spacing and typography of the banner opening each section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroMetrics {
    pub padding: f32,
    pub badge_size: f32,
    pub badge_font: FontSpec,
    pub badge_gap: f32,
    pub title_font: FontSpec,
    pub title_line_height: f32,
    pub title_max_lines: usize,
    pub description_font: FontSpec,
    pub description_line_height: f32,
    /// Longer descriptions end in an ellipsis so a banner always fits a page.
    pub description_max_lines: usize,
    pub count_font: FontSpec,
    pub count_line_height: f32,
    pub gap: f32,
}

impl Default for IntroMetrics {
    fn default() -> Self {
        Self {
            padding: 20.0,
            badge_size: 36.0,
            badge_font: FontSpec::new(FontFace::Bold, 14.0),
            badge_gap: 14.0,
            title_font: FontSpec::new(FontFace::Bold, 18.0),
            title_line_height: 22.0,
            title_max_lines: 3,
            description_font: FontSpec::new(FontFace::Regular, 10.5),
            description_line_height: 15.0,
            description_max_lines: 12,
            count_font: FontSpec::new(FontFace::Oblique, 9.5),
            count_line_height: 13.0,
            gap: 6.0,
        }
    }
}

/// How a new section relates to the page the previous section ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionBreak {
    /// Every section starts on a fresh page.
    #[default]
    NewPage,
    /// A section continues on the current page when its banner fits there.
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationSettings {
    pub content_height: f32,
    pub header_height: f32,
    pub block_gap: f32,
    /// Page number of the first content page; the cover and the table of
    /// contents come before it.
    pub first_content_page: usize,
    pub section_break: SectionBreak,
    pub include_pending: bool,
}

impl PaginationSettings {
    pub fn for_page(page: &PageGeometry) -> Self {
        Self {
            content_height: page.content_height(),
            header_height: page.header_height,
            block_gap: 8.0,
            first_content_page: 3,
            section_break: SectionBreak::NewPage,
            include_pending: true,
        }
    }

    pub fn with_section_break(mut self, section_break: SectionBreak) -> Self {
        self.section_break = section_break;
        self
    }

    pub fn with_include_pending(mut self, include_pending: bool) -> Self {
        self.include_pending = include_pending;
        self
    }

    /// Height available to blocks below the running header.
    pub fn available_height(&self) -> f32 {
        self.content_height - self.header_height
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.available_height() <= 0.0 {
            return Err(LayoutError::InvalidSettings(format!(
                "header height {:.2} leaves no content height (total {:.2})",
                self.header_height, self.content_height
            )));
        }
        if self.block_gap < 0.0 {
            return Err(LayoutError::InvalidSettings(format!(
                "block gap must not be negative, got {:.2}",
                self.block_gap
            )));
        }
        if self.first_content_page == 0 {
            return Err(LayoutError::InvalidSettings(
                "page numbers start at 1".to_string(),
            ));
        }
        Ok(())
    }
}
