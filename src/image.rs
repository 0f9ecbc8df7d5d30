//! Image decoding, downscaling and JPEG re-encoding.
//!
//! Every image is resolved before layout starts. The layout engine only sees
//! the resulting display sizes, so failures here can never leave a half-laid
//! out card behind.

use crate::config::ImageSettings;
use auditpdf_types::{ImageBlob, Item, ItemId, ResolvedImage, ResolvedImages, Size};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView, Rgb, RgbImage};
use log::{debug, warn};
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "rayon-executor")]
use rayon::prelude::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    #[error("image could not be decoded: {reason}")]
    DecodeFailed { reason: String },
    #[error("image could not be re-encoded: {reason}")]
    EncodeFailed { reason: String },
}

/// Result of resolving every image in a document.
#[derive(Debug, Default)]
pub struct ImageBatch {
    pub images: ResolvedImages,
    /// Items whose image could not be used, in document order.
    pub failures: Vec<(ItemId, ImageError)>,
}

#[derive(Debug, Clone)]
pub struct ImageProcessor {
    settings: ImageSettings,
    parallel: bool,
}

impl ImageProcessor {
    pub fn new(settings: ImageSettings) -> Self {
        Self {
            settings,
            parallel: true,
        }
    }

    /// Turns off the rayon pool. Batches are then processed on the calling
    /// thread; results are identical either way.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    pub fn process(&self, blob: &ImageBlob) -> Result<ResolvedImage, ImageError> {
        let decoded = image::load_from_memory(blob.as_bytes()).map_err(|e| ImageError::DecodeFailed {
            reason: e.to_string(),
        })?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::DecodeFailed {
                reason: format!("image has no pixels ({width}x{height})"),
            });
        }

        let source = Size::new(width as f32, height as f32);
        let (pixel_width, pixel_height) = pixel_size(source, self.settings.max_pixels);
        let resized = if (pixel_width, pixel_height) == (width, height) {
            decoded
        } else {
            decoded.resize_exact(pixel_width, pixel_height, FilterType::Triangle)
        };

        let rgb = flatten_onto_white(&resized);
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.settings.quality)
            .encode(rgb.as_raw(), pixel_width, pixel_height, ExtendedColorType::Rgb8)
            .map_err(|e| ImageError::EncodeFailed {
                reason: e.to_string(),
            })?;

        debug!(
            "Resolved {}x{} image to {}x{} pixels ({} bytes).",
            width,
            height,
            pixel_width,
            pixel_height,
            jpeg.len()
        );

        Ok(ResolvedImage {
            source,
            pixel_width,
            pixel_height,
            jpeg: Arc::from(jpeg),
            display: source.fit_within(self.settings.max_display),
        })
    }

    /// Resolves the image of every item that has one. Results are keyed by
    /// item id, so the order in which workers finish never matters.
    pub fn process_batch<'a>(&self, items: impl IntoIterator<Item = &'a Item>) -> ImageBatch {
        let jobs: Vec<(&ItemId, &ImageBlob)> = items
            .into_iter()
            .filter_map(|item| item.image.as_ref().map(|blob| (&item.id, blob)))
            .collect();
        if jobs.is_empty() {
            return ImageBatch::default();
        }
        debug!("Processing {} images (parallel: {}).", jobs.len(), self.parallel);

        let results = self.run(&jobs);

        let mut batch = ImageBatch::default();
        for (id, result) in results {
            match result {
                Ok(resolved) => {
                    batch.images.insert(id, resolved);
                }
                Err(error) => {
                    warn!("Image for item '{}' skipped: {}", id, error);
                    batch.failures.push((id, error));
                }
            }
        }
        batch
    }

    #[cfg(feature = "rayon-executor")]
    fn run(&self, jobs: &[(&ItemId, &ImageBlob)]) -> Vec<(ItemId, Result<ResolvedImage, ImageError>)> {
        if self.parallel {
            jobs.par_iter()
                .map(|(id, blob)| ((*id).clone(), self.process(blob)))
                .collect()
        } else {
            self.run_sequential(jobs)
        }
    }

    #[cfg(not(feature = "rayon-executor"))]
    fn run(&self, jobs: &[(&ItemId, &ImageBlob)]) -> Vec<(ItemId, Result<ResolvedImage, ImageError>)> {
        self.run_sequential(jobs)
    }

    fn run_sequential(&self, jobs: &[(&ItemId, &ImageBlob)]) -> Vec<(ItemId, Result<ResolvedImage, ImageError>)> {
        jobs.iter()
            .map(|(id, blob)| ((*id).clone(), self.process(blob)))
            .collect()
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::new(ImageSettings::default())
    }
}

/// Bounding-box fit of the source into `max`, rounded to whole pixels.
fn pixel_size(source: Size, max: Size) -> (u32, u32) {
    let fitted = source.fit_within(max);
    let round = |v: f32| (v.round() as u32).max(1);
    (round(fitted.width), round(fitted.height))
}

fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
