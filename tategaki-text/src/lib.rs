//! # tategaki-text
//!
//! Glyph measurement for vertical text: font declarations, a font metrics
//! cache keyed by font signature, and the measurement surface seam.
//!
//! ## Architecture
//!
//! ```text
//! MeasureContext::measure_char(grapheme, style, prev)
//!     │
//!     ├──► FontMetricsCache[signature]  ── hit ──► scale to font size
//!     │
//!     ▼ miss
//!   TextMeasurer (CosmicMeasurer | FixedMeasurer) at CACHE_FONT_SIZE
//! ```
//!
//! - **`font`** — font declaration strings, family quoting, reference size.
//! - **`cache`** — per-signature glyph and kerning-couple width tables.
//! - **`surface`** — the `TextMeasurer` trait and a fixed-metrics measurer.
//! - **`cosmic`** — system-font measurer backed by `cosmic-text`.
//! - **`measure`** — grapheme measurement and the shared context.

pub mod cache;
pub mod cosmic;
pub mod font;
pub mod measure;
pub mod surface;

// Re-exports for ergonomic use.
pub use cache::{FontMetricsCache, FontSignature, GlyphMetrics, MetricsTable};
pub use cosmic::CosmicMeasurer;
pub use font::{font_declaration, quote_family, FontDeclaration, GenericFamily, CACHE_FONT_SIZE};
pub use measure::{
    install_shared_context, with_shared_context, CharMetrics, MeasureContext, PrevGrapheme,
};
pub use surface::{FixedMeasurer, MeasureError, TextMeasurer, TextMetrics};
