use crate::geometry::Size;
use crate::ids::ItemId;
use std::collections::HashMap;
use std::sync::Arc;

/// A decoded, size-bounded and re-encoded image ready to be embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    /// Intrinsic pixel size of the decoded source.
    pub source: Size,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Baseline JPEG bytes, embedded as-is with `DCTDecode`.
    pub jpeg: Arc<[u8]>,
    /// Size in points the image occupies on the page before any card fitting.
    pub display: Size,
}

/// Resolved images keyed by the item they belong to.
pub type ResolvedImages = HashMap<ItemId, ResolvedImage>;
