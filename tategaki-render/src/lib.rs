//! # tategaki-render
//!
//! Painting for vertical text blocks, over any 2D drawing surface.
//!
//! ## Architecture
//!
//! ```text
//!  StyledText / StyleSource (tategaki-core)
//!       │
//!       ▼
//!  TextLayout (tategaki-layout)        ◀─── recomputed when dirty
//!       │
//!       ▼
//!  VerticalText::render(surface)       ◀─── block font, paint_first order
//!       │
//!       ├──► render_text_fill   ─┐
//!       └──► render_text_stroke ─┴──► render_line → runs → DrawingSurface
//! ```
//!
//! ## Crate modules
//!
//! - [`surface`] — the `DrawingSurface` trait and stroke state
//! - [`recording`] — a display-list surface
//! - [`run`] — run grouping and per-grapheme placement within a column
//! - [`vertical`] — the `VerticalTextLayout` capability and `VerticalText`

pub mod recording;
pub mod run;
pub mod surface;
pub mod vertical;

// Re-exports for convenience
pub use recording::{DrawCommand, RecordingSurface};
pub use run::{render_line, TextRun};
pub use surface::{DrawingSurface, StrokeStyle, TextMethod};
pub use vertical::{PaintStats, RenderError, VerticalText, VerticalTextLayout};
