//! # tategaki-core
//!
//! Shared data model for vertical text blocks: per-character style
//! declarations, the sparse style table, block options and the
//! [`StyleSource`] seam the layout engine reads through.
//!
//! - **`style`** — declarations, `TextStyle` override table, style diffing.
//! - **`options`** — block defaults / configuration (`TextOptions`).
//! - **`text`** — grapheme line splitting and the `StyleSource` host trait.

pub mod options;
pub mod style;
pub mod text;

pub use options::{ConfigError, Direction, LineCap, LineJoin, PaintFirst, TextAlign, TextOptions};
pub use style::{
    has_style_changed, CompleteTextStyleDeclaration, FontStyle, Rgba, TextStyle,
    TextStyleDeclaration,
};
pub use text::{is_space_or_tab, split_lines, GraphemeLine, StyleSource, StyledText};
