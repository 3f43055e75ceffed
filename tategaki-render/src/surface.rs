//! The drawing surface seam.
//!
//! Modeled on a 2D canvas context: a stack of drawing state plus fill
//! and stroke text calls. Backends implement [`DrawingSurface`]; the
//! run renderer never assumes anything beyond these calls.

use tategaki_core::{Direction, LineCap, LineJoin, Rgba, TextOptions};
use tategaki_text::FontDeclaration;

/// Which text pass is being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextMethod {
    Fill,
    Stroke,
}

/// Stroke state applied before a stroke draw call.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    pub dash_offset: f32,
}

impl StrokeStyle {
    /// Block stroke geometry with a run's stroke colour.
    pub fn from_options(options: &TextOptions, color: Rgba) -> Self {
        Self {
            color,
            width: options.stroke_width,
            line_cap: options.stroke_line_cap,
            line_join: options.stroke_line_join,
            miter_limit: options.stroke_miter_limit,
            dash_offset: options.stroke_dash_offset,
        }
    }
}

/// A 2D drawing context that can draw text.
pub trait DrawingSurface {
    /// Push the current drawing state.
    fn save(&mut self);
    /// Pop the last saved drawing state. A restore without a matching
    /// save is ignored.
    fn restore(&mut self);

    fn direction(&self) -> Direction;
    fn set_direction(&mut self, direction: Direction);

    fn set_font(&mut self, font: &FontDeclaration);
    fn set_fill_style(&mut self, color: Rgba);
    fn set_stroke_style(&mut self, style: &StrokeStyle);
    fn set_line_dash(&mut self, segments: &[f32]);
    fn remove_shadow(&mut self);

    /// Fill `text` with its baseline origin at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    /// Stroke `text` with its baseline origin at `(x, y)`.
    fn stroke_text(&mut self, text: &str, x: f32, y: f32);
}
