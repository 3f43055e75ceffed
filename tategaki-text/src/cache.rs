//! Font metrics cache: glyph and kerning-couple widths per font signature.
//!
//! ```text
//! FontMetricsCache
//!   └── tables: FxHashMap<FontSignature, MetricsTable>
//!         ├── glyphs:  grapheme        → GlyphMetrics { width, height }
//!         └── couples: prev → current → width of the pair
//! ```
//!
//! Values are measured at [`CACHE_FONT_SIZE`](crate::font::CACHE_FONT_SIZE)
//! and scaled by the caller. Tables are created on first lookup and never
//! evicted.

use rustc_hash::FxHashMap;

use tategaki_core::{CompleteTextStyleDeclaration, FontStyle};

/// Cache key: everything that changes glyph shapes except the size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontSignature {
    pub family: String,
    pub style: FontStyle,
    pub weight: u16,
}

impl FontSignature {
    pub fn of(style: &CompleteTextStyleDeclaration) -> Self {
        Self {
            family: style.font_family.clone(),
            style: style.font_style,
            weight: style.font_weight,
        }
    }
}

/// Metrics of one grapheme at the reference size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
}

/// Width table of one font signature.
#[derive(Clone, Debug, Default)]
pub struct MetricsTable {
    glyphs: FxHashMap<String, GlyphMetrics>,
    couples: FxHashMap<String, FxHashMap<String, f32>>,
}

impl MetricsTable {
    pub fn glyph(&self, grapheme: &str) -> Option<GlyphMetrics> {
        self.glyphs.get(grapheme).copied()
    }

    pub fn insert_glyph(&mut self, grapheme: &str, metrics: GlyphMetrics) {
        self.glyphs.insert(grapheme.to_owned(), metrics);
    }

    /// Width of `prev` immediately followed by `current`.
    pub fn couple(&self, prev: &str, current: &str) -> Option<f32> {
        self.couples.get(prev).and_then(|next| next.get(current)).copied()
    }

    pub fn insert_couple(&mut self, prev: &str, current: &str, width: f32) {
        self.couples
            .entry(prev.to_owned())
            .or_default()
            .insert(current.to_owned(), width);
    }

    /// Number of cached glyphs plus couples.
    pub fn len(&self) -> usize {
        self.glyphs.len() + self.couples.values().map(FxHashMap::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime store of measured widths, keyed by font signature.
#[derive(Clone, Debug, Default)]
pub struct FontMetricsCache {
    tables: FxHashMap<FontSignature, MetricsTable>,
}

impl FontMetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table for `signature`, created on first access.
    pub fn table(&mut self, signature: &FontSignature) -> &mut MetricsTable {
        if !self.tables.contains_key(signature) {
            log::trace!(
                "FontMetricsCache: new table for {} {:?} {}",
                signature.family,
                signature.style,
                signature.weight,
            );
        }
        self.tables.entry(signature.clone()).or_default()
    }

    /// Read-only lookup; never creates a table.
    pub fn get(&self, signature: &FontSignature) -> Option<&MetricsTable> {
        self.tables.get(signature)
    }

    /// Number of font signatures seen.
    pub fn signature_count(&self) -> usize {
        self.tables.len()
    }

    /// Total cached entries across all signatures.
    pub fn entry_count(&self) -> usize {
        self.tables.values().map(MetricsTable::len).sum()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

// ===================================================================
// Tests
// ===================================================================
