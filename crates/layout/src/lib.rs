use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("No font metrics are available for the {face:?} face.")]
    MeasurementFailed { face: FontFace },
    #[error("{sections} sections do not fit on the table of contents page (capacity {capacity}).")]
    TocOverflow { sections: usize, capacity: usize },
    #[error("Invalid layout settings: {0}")]
    InvalidSettings(String),
}

pub mod block;
pub mod config;
pub mod fonts;
pub mod navigation;
pub mod paginate;
pub mod text;
pub mod theme;

pub use self::block::{Badge, Block, Callout, ImageSlot, LayoutEngine, SectionIntro, TextLines};
pub use self::config::{CardMetrics, IntroMetrics, Margins, PageGeometry, PaginationSettings, SectionBreak};
pub use self::fonts::{FontFace, FontMetrics, FontSpec, StandardFontMetrics};
pub use self::navigation::{
    LinkRegion, NavigationLinker, TocCard, TocCardMetrics, TocEntry, TocGrid, TocLayout,
};
pub use self::paginate::{
    LayoutOverflow, Page, PlacedBlock, PlacedIntro, Pagination, Paginator, SectionPageMap,
};
pub use self::text::TextMeasurer;
pub use self::theme::{Palette, StatusStyle, StatusTheme};

// Re-export the foundation types layout results are expressed in
pub use auditpdf_types::{Rect, Size};

#[cfg(test)]
mod paginate_test;
#[cfg(test)]
mod test_utils;
