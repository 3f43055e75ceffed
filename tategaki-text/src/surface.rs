//! Measurement surfaces.
//!
//! A [`TextMeasurer`] answers "how big is this string in this font",
//! the way a canvas `measureText` call does. The engine only ever asks at
//! the reference size, one grapheme or one kerning couple at a time.
//!
//! [`FixedMeasurer`] is a deterministic surface with table-driven glyph
//! metrics, for tests and headless hosts.

use std::collections::HashMap;

use thiserror::Error;

use crate::font::FontDeclaration;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("No font available for '{0}'")]
    FontUnavailable(String),
    #[error("Measurement failed: {0}")]
    Failed(String),
}

/// Result of measuring a string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f32,
    /// Distance from the baseline to the top of the inked bounds.
    pub actual_ascent: f32,
    /// Distance from the baseline to the bottom of the inked bounds.
    pub actual_descent: f32,
}

impl TextMetrics {
    /// Inked height of the measured string.
    pub fn height(&self) -> f32 {
        self.actual_ascent + self.actual_descent
    }
}

/// A text measurement facility.
pub trait TextMeasurer {
    fn measure_text(&mut self, font: &FontDeclaration, text: &str)
        -> Result<TextMetrics, MeasureError>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure_text(
        &mut self,
        font: &FontDeclaration,
        text: &str,
    ) -> Result<TextMetrics, MeasureError> {
        (**self).measure_text(font, text)
    }
}

// ── Fixed metrics ───────────────────────────────────────────────────

/// Table-driven measurer.
///
/// Widths are returned exactly as configured, independent of the font
/// size asked for. A string's width is its configured couple width when
/// it is a known couple, else the sum of its characters' widths. Every
/// non-empty string has the same ascent/descent.
#[derive(Clone, Debug)]
pub struct FixedMeasurer {
    default_width: f32,
    widths: HashMap<String, f32>,
    couples: HashMap<String, f32>,
    ascent: f32,
    descent: f32,
    calls: usize,
}

impl Default for FixedMeasurer {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl FixedMeasurer {
    /// Every character measures `default_width`; ascent 8, descent 2.
    pub fn new(default_width: f32) -> Self {
        Self {
            default_width,
            widths: HashMap::new(),
            couples: HashMap::new(),
            ascent: 8.0,
            descent: 2.0,
            calls: 0,
        }
    }

    pub fn with_glyph(mut self, grapheme: &str, width: f32) -> Self {
        self.widths.insert(grapheme.to_owned(), width);
        self
    }

    /// Width reported for the two-grapheme string `prev + current`.
    pub fn with_couple(mut self, prev: &str, current: &str, width: f32) -> Self {
        self.couples.insert(format!("{prev}{current}"), width);
        self
    }

    pub fn with_bounds(mut self, ascent: f32, descent: f32) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self
    }

    /// Number of `measure_text` calls served.
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn width_of(&self, text: &str) -> f32 {
        if let Some(&w) = self.couples.get(text) {
            return w;
        }
        if let Some(&w) = self.widths.get(text) {
            return w;
        }
        text.chars()
            .map(|c| {
                let mut buf = [0u8; 4];
                self.widths
                    .get(&*c.encode_utf8(&mut buf))
                    .copied()
                    .unwrap_or(self.default_width)
            })
            .sum()
    }
}

impl TextMeasurer for FixedMeasurer {
    fn measure_text(
        &mut self,
        _font: &FontDeclaration,
        text: &str,
    ) -> Result<TextMetrics, MeasureError> {
        self.calls += 1;
        if text.is_empty() {
            return Ok(TextMetrics::default());
        }
        Ok(TextMetrics {
            width: self.width_of(text),
            actual_ascent: self.ascent,
            actual_descent: self.descent,
        })
    }
}

// ===================================================================
// Tests
// ===================================================================
