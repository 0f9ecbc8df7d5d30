use serde::{Deserialize, Serialize};

/// A rectangle in page space. The origin is the top-left corner of the page
/// and `y` grows downwards; renderers flip it when emitting PDF coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true when the two rectangles share any interior area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Uniform scale factor that fits `self` inside `bounds` without upscaling.
    pub fn fit_scale(&self, bounds: Size) -> f32 {
        (bounds.width / self.width)
            .min(bounds.height / self.height)
            .min(1.0)
    }

    /// Bounding-box fit: scales both axes by the same factor so the result fits
    /// inside `bounds`. Sizes already inside the bounds are returned unchanged.
    pub fn fit_within(&self, bounds: Size) -> Size {
        let scale = self.fit_scale(bounds);
        Size {
            width: self.width * scale,
            height: self.height * scale,
        }
    }
}
