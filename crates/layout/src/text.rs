use crate::LayoutError;
use crate::fonts::{FontFace, FontMetrics, FontSpec, StandardFontMetrics};
use std::sync::Arc;

// Small tolerance for floating point inaccuracies when comparing widths
const EPSILON: f32 = 0.01;

const ELLIPSIS: &str = "...";

/// Measures and wraps plain text. Cheap to clone; the same instance is shared
/// by height computation and drawing so both agree on every line break.
#[derive(Debug, Clone)]
pub struct TextMeasurer {
    metrics: Arc<dyn FontMetrics>,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new(Arc::new(StandardFontMetrics))
    }
}

impl TextMeasurer {
    pub fn new(metrics: Arc<dyn FontMetrics>) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &Arc<dyn FontMetrics> {
        &self.metrics
    }

    /// Width in points of a single run of text.
    pub fn width(&self, text: &str, font: &FontSpec) -> Result<f32, LayoutError> {
        let mut units = 0u32;
        for ch in text.chars() {
            units += self.advance(font.face, ch)? as u32;
        }
        Ok(units as f32 * font.size / 1000.0)
    }

    /// Greedy word wrap.
    ///
    /// Runs of whitespace collapse to a single space and `\n` forces a break.
    /// A word wider than `max_width` occupies a line of its own. Empty or
    /// whitespace-only text yields no lines.
    pub fn wrap(&self, text: &str, max_width: f32, font: &FontSpec) -> Result<Vec<String>, LayoutError> {
        let space_width = self.width(" ", font)?;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut line = String::new();
            let mut line_width = 0.0f32;

            for word in paragraph.split_whitespace() {
                let word_width = self.width(word, font)?;
                if line.is_empty() {
                    line.push_str(word);
                    line_width = word_width;
                    continue;
                }

                let candidate = line_width + space_width + word_width;
                if candidate <= max_width + EPSILON {
                    line.push(' ');
                    line.push_str(word);
                    line_width = candidate;
                } else {
                    lines.push(std::mem::take(&mut line));
                    line.push_str(word);
                    line_width = word_width;
                }
            }

            if !line.is_empty() {
                lines.push(line);
            }
        }

        Ok(lines)
    }

    /// Wraps like [`wrap`](Self::wrap) but keeps at most `max_lines`, ending
    /// the last kept line with an ellipsis when text was dropped.
    pub fn wrap_clamped(
        &self,
        text: &str,
        max_width: f32,
        font: &FontSpec,
        max_lines: usize,
    ) -> Result<Vec<String>, LayoutError> {
        let mut lines = self.wrap(text, max_width, font)?;
        if lines.len() <= max_lines {
            return Ok(lines);
        }
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut clipped = format!("{last}{ELLIPSIS}");
            if self.width(&clipped, font)? > max_width + EPSILON {
                clipped = self.truncate(&clipped, max_width, font)?;
            }
            *last = clipped;
        }
        Ok(lines)
    }

    /// Cuts a single line down to `max_width`, appending an ellipsis when
    /// anything was removed.
    pub fn truncate(&self, text: &str, max_width: f32, font: &FontSpec) -> Result<String, LayoutError> {
        if self.width(text, font)? <= max_width + EPSILON {
            return Ok(text.to_string());
        }

        let budget = max_width - self.width(ELLIPSIS, font)?;
        let mut kept = String::new();
        let mut width = 0.0f32;
        for ch in text.chars() {
            let advance = self.advance(font.face, ch)? as f32 * font.size / 1000.0;
            if width + advance > budget + EPSILON {
                break;
            }
            kept.push(ch);
            width += advance;
        }
        let mut truncated = kept.trim_end().to_string();
        truncated.push_str(ELLIPSIS);
        Ok(truncated)
    }

    fn advance(&self, face: FontFace, ch: char) -> Result<u16, LayoutError> {
        self.metrics
            .advance_width(face, ch)
            .ok_or(LayoutError::MeasurementFailed { face })
    }
}
