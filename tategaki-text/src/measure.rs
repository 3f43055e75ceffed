//! Grapheme measurement with kerning-couple lookup.
//!
//! [`MeasureContext`] pairs a [`FontMetricsCache`] with the measurement
//! surface that fills it. Measuring a grapheme:
//!
//! 1. Fetch the cache table for the style's font signature.
//! 2. If the previous grapheme has the same font declaration, look up the
//!    previous grapheme, the current one and the couple.
//! 3. `kerned_width = couple - previous` when the couple is known,
//!    otherwise `kerned_width = width`.
//! 4. Misses are measured at [`CACHE_FONT_SIZE`] and stored; results are
//!    scaled by `font_size / CACHE_FONT_SIZE`.
//!
//! ## Shared context
//!
//! Hosts that do not manage their own context use the process-wide one
//! ([`with_shared_context`]). It is created on first use with a
//! [`CosmicMeasurer`] and lives until the process exits.
//! [`install_shared_context`] replaces it, e.g. with a [`FixedMeasurer`].
//!
//! [`FixedMeasurer`]: crate::surface::FixedMeasurer

use std::sync::Mutex;

use tategaki_core::CompleteTextStyleDeclaration;

use crate::cache::{FontMetricsCache, FontSignature, GlyphMetrics};
use crate::cosmic::CosmicMeasurer;
use crate::font::{FontDeclaration, CACHE_FONT_SIZE};
use crate::surface::{TextMeasurer, TextMetrics};

/// Measured size of one grapheme at its actual font size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CharMetrics {
    pub width: f32,
    pub height: f32,
    /// Width adjusted for the kerning couple with the previous grapheme.
    pub kerned_width: f32,
}

/// The grapheme preceding the one being measured.
#[derive(Clone, Copy, Debug)]
pub struct PrevGrapheme<'a> {
    pub grapheme: &'a str,
    pub style: &'a CompleteTextStyleDeclaration,
}

/// Metrics cache plus the surface used on cache misses.
pub struct MeasureContext {
    cache: FontMetricsCache,
    measurer: Box<dyn TextMeasurer + Send>,
}

impl MeasureContext {
    pub fn new(measurer: impl TextMeasurer + Send + 'static) -> Self {
        Self {
            cache: FontMetricsCache::new(),
            measurer: Box::new(measurer),
        }
    }

    pub fn cache(&self) -> &FontMetricsCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut FontMetricsCache {
        &mut self.cache
    }

    /// Measure `grapheme` drawn in `style`, after `prev` if any.
    pub fn measure_char(
        &mut self,
        grapheme: &str,
        style: &CompleteTextStyleDeclaration,
        prev: Option<PrevGrapheme<'_>>,
    ) -> CharMetrics {
        let signature = FontSignature::of(style);
        let declaration = FontDeclaration::new(style, false);
        let prev = prev.filter(|p| FontDeclaration::new(p.style, false) == declaration);
        let multiplier = style.font_size / CACHE_FONT_SIZE;

        let table = self.cache.table(&signature);
        let mut glyph = table.glyph(grapheme);
        let mut prev_width = prev.and_then(|p| table.glyph(p.grapheme)).map(|m| m.width);
        let mut couple_width = prev.and_then(|p| table.couple(p.grapheme, grapheme));

        let needs_measure = glyph.is_none()
            || (prev.is_some() && (prev_width.is_none() || couple_width.is_none()));
        if needs_measure {
            let font = FontDeclaration::new(style, true);
            if glyph.is_none() {
                let metrics = self.measure_at_cache_size(&font, grapheme);
                let measured = GlyphMetrics::from_metrics(&metrics);
                self.cache.table(&signature).insert_glyph(grapheme, measured);
                glyph = Some(measured);
            }
            if let Some(p) = prev {
                if prev_width.is_none() {
                    let metrics = self.measure_at_cache_size(&font, p.grapheme);
                    let measured = GlyphMetrics::from_metrics(&metrics);
                    self.cache.table(&signature).insert_glyph(p.grapheme, measured);
                    prev_width = Some(measured.width);
                }
                if couple_width.is_none() {
                    let couple = format!("{}{}", p.grapheme, grapheme);
                    let width = self.measure_at_cache_size(&font, &couple).width;
                    self.cache
                        .table(&signature)
                        .insert_couple(p.grapheme, grapheme, width);
                    couple_width = Some(width);
                }
            }
        }

        let glyph = glyph.unwrap_or(GlyphMetrics { width: 0.0, height: 0.0 });
        let kerned_width = match (couple_width, prev_width) {
            (Some(couple), Some(previous)) => couple - previous,
            _ => glyph.width,
        };

        CharMetrics {
            width: glyph.width * multiplier,
            height: glyph.height * multiplier,
            kerned_width: kerned_width * multiplier,
        }
    }

    /// Measure on the surface, degrading failures to zero metrics.
    fn measure_at_cache_size(&mut self, font: &FontDeclaration, text: &str) -> TextMetrics {
        log::trace!("measure miss: {text:?} in {font}");
        match self.measurer.measure_text(font, text) {
            Ok(m) => TextMetrics {
                width: finite_or_zero(m.width),
                actual_ascent: finite_or_zero(m.actual_ascent),
                actual_descent: finite_or_zero(m.actual_descent),
            },
            Err(e) => {
                log::warn!("measuring {text:?} in {font} failed: {e}; using zero metrics");
                TextMetrics::default()
            }
        }
    }
}

/// Non-finite values become zero; signs are kept, since ink wholly
/// below or above the baseline reports a negative ascent or descent.
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

impl GlyphMetrics {
    fn from_metrics(metrics: &TextMetrics) -> Self {
        Self {
            width: metrics.width,
            height: metrics.height().max(0.0),
        }
    }
}

// ── Process-wide context ────────────────────────────────────────────

static SHARED: Mutex<Option<MeasureContext>> = Mutex::new(None);

/// Run `f` with the process-wide measuring context, creating it first if
/// needed.
pub fn with_shared_context<R>(f: impl FnOnce(&mut MeasureContext) -> R) -> R {
    let mut guard = SHARED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let ctx = guard.get_or_insert_with(|| {
        log::info!("creating shared measuring context");
        MeasureContext::new(CosmicMeasurer::new())
    });
    f(ctx)
}

/// Replace the process-wide context, returning the previous one.
pub fn install_shared_context(ctx: MeasureContext) -> Option<MeasureContext> {
    let mut guard = SHARED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.replace(ctx)
}

// ===================================================================
// Tests
// ===================================================================
