//! # tategaki-layout
//!
//! Geometry of vertical text blocks: per-grapheme bounding boxes, column
//! pitch, block dimensions and justification.
//!
//! ## Architecture
//!
//! ```text
//! StyleSource ──► measure_vline (per line) ──► GraphemeBBox[] + extent
//!                         │
//!                         ▼
//!             calc_text_width / calc_text_height
//!                         │
//!                         ▼
//!             floor_dimensions ──► enlarge_spaces (justify only)
//!                         │
//!                         ▼
//!                TextLayout (owned, versioned)
//! ```
//!
//! - **`bbox`** — `GraphemeBBox` and `LineMetrics`.
//! - **`line`** — line measurement with the caret sentinel box.
//! - **`dimensions`** — column pitch and block width/height.
//! - **`justify`** — space stretching for justified alignment.
//! - **`engine`** — `TextLayout`, recomputed wholesale behind a dirty flag.

pub mod bbox;
pub mod dimensions;
pub mod engine;
pub mod justify;
pub mod line;

pub use bbox::{GraphemeBBox, LineMetrics};
pub use dimensions::{calc_text_height, calc_text_width, floor_dimensions, line_width, BlockDimensions};
pub use engine::{LayoutError, TextLayout};
pub use justify::enlarge_spaces;
pub use line::{measure_line, measure_vline};
