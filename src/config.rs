//! Export configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config and a
//! config file only needs to mention what it changes.

use crate::error::ExportError;
use auditpdf_layout::{PageGeometry, SectionBreak};
use auditpdf_types::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSettings {
    /// Upper bound on the re-encoded pixel size.
    pub max_pixels: Size,
    /// Upper bound on the size drawn on the page, in points.
    pub max_display: Size,
    /// JPEG quality, 1 to 100.
    pub quality: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_pixels: Size::new(600.0, 400.0),
            max_display: Size::new(375.0, 225.0),
            quality: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub page: PageGeometry,
    pub images: ImageSettings,
    pub section_break: SectionBreak,
    /// Whether items without a judgement appear in the report.
    pub include_pending: bool,
    pub file_prefix: String,
    pub cover_title: String,
    pub cover_subtitle: String,
    /// Flate-compress page content streams.
    pub compress: bool,
    /// Decode and re-encode images on the rayon pool.
    pub parallel_images: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            images: ImageSettings::default(),
            section_break: SectionBreak::default(),
            include_pending: true,
            file_prefix: "CRO-Audit-Report".to_string(),
            cover_title: "Conversion Rate Optimization".to_string(),
            cover_subtitle: "Analysis Report".to_string(),
            compress: true,
            parallel_images: true,
        }
    }
}

impl ExportConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ExportError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ExportError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ExportError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        self.page
            .validate()
            .map_err(|e| ExportError::Config(e.to_string()))?;

        let images = &self.images;
        if !(1..=100).contains(&images.quality) {
            return Err(ExportError::Config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                images.quality
            )));
        }
        for (name, size) in [("maxPixels", images.max_pixels), ("maxDisplay", images.max_display)] {
            if !(size.width >= 1.0 && size.height >= 1.0) {
                return Err(ExportError::Config(format!(
                    "{name} must be at least 1x1, got {}x{}",
                    size.width, size.height
                )));
            }
        }
        Ok(())
    }
}
