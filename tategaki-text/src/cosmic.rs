//! Measurement surface backed by `cosmic-text`.
//!
//! Widths come from the shaped line width; the inked bounds come from the
//! rasterized glyph placements, matching what a canvas reports as
//! `actualBoundingBoxAscent` / `actualBoundingBoxDescent`.
//!
//! Font discovery happens once, when the measurer is created.

use std::time::Instant;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, SwashCache, Weight};
use tategaki_core::FontStyle;

use crate::font::{FontDeclaration, GenericFamily};
use crate::surface::{MeasureError, TextMeasurer, TextMetrics};

/// System-font measurer.
pub struct CosmicMeasurer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl Default for CosmicMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl CosmicMeasurer {
    /// Create a measurer with system font discovery.
    pub fn new() -> Self {
        let start = Instant::now();
        let font_system = FontSystem::new();
        log::info!(
            "CosmicMeasurer: {} font faces available ({:.1}ms)",
            font_system.db().faces().count(),
            start.elapsed().as_secs_f64() * 1000.0,
        );
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    /// Wrap an existing font system (e.g. one with bundled fonts loaded).
    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    pub fn font_system(&self) -> &FontSystem {
        &self.font_system
    }
}

fn family_of(font: &FontDeclaration) -> Family<'_> {
    let name = font.primary_family();
    match GenericFamily::parse(name) {
        Some(GenericFamily::Serif) => Family::Serif,
        Some(GenericFamily::SansSerif) => Family::SansSerif,
        Some(GenericFamily::Monospace) => Family::Monospace,
        Some(GenericFamily::Cursive) => Family::Cursive,
        Some(GenericFamily::Fantasy) => Family::Fantasy,
        None => Family::Name(name),
    }
}

impl TextMeasurer for CosmicMeasurer {
    fn measure_text(
        &mut self,
        font: &FontDeclaration,
        text: &str,
    ) -> Result<TextMetrics, MeasureError> {
        if text.is_empty() {
            return Ok(TextMetrics::default());
        }
        if !(font.size > 0.0) {
            return Err(MeasureError::Failed(format!("font size {}", font.size)));
        }

        let style = match font.style {
            FontStyle::Normal => Style::Normal,
            FontStyle::Italic => Style::Italic,
            FontStyle::Oblique => Style::Oblique,
        };
        let attrs = Attrs::new()
            .family(family_of(font))
            .weight(Weight(font.weight))
            .style(style);

        let mut buffer = Buffer::new(&mut self.font_system, Metrics::new(font.size, font.size));
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut width = 0.0;
        let mut ascent = f32::NEG_INFINITY;
        let mut descent = f32::NEG_INFINITY;
        let mut saw_run = false;
        for run in buffer.layout_runs() {
            saw_run = true;
            width += run.line_w;

            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((0.0, 0.0), 1.0);
                let image = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical.cache_key);

                let image = match image {
                    Some(img) => img,
                    None => continue, // whitespace or missing glyph
                };
                if image.placement.height == 0 {
                    continue;
                }

                let top = image.placement.top as f32 - physical.y as f32;
                let bottom = image.placement.height as f32 - top;
                ascent = ascent.max(top);
                descent = descent.max(bottom);
            }
        }

        if !saw_run {
            return Err(MeasureError::FontUnavailable(font.to_string()));
        }
        Ok(ink_metrics(width, ascent, descent))
    }
}

/// Bounds folded over the inked glyphs. No ink gives zero bounds; signs
/// are kept otherwise, with a negative total extent pulled back to zero.
fn ink_metrics(width: f32, ascent: f32, descent: f32) -> TextMetrics {
    if !ascent.is_finite() || !descent.is_finite() {
        return TextMetrics { width, ..TextMetrics::default() };
    }
    let descent = if ascent + descent < 0.0 { -ascent } else { descent };
    TextMetrics {
        width,
        actual_ascent: ascent,
        actual_descent: descent,
    }
}

// ===================================================================
// Tests
// ===================================================================
