//! The vertical text block: a style source, its layout and the paint
//! entry points a host shape drives.

use log::debug;
use tategaki_core::{PaintFirst, StyleSource};
use tategaki_layout::{BlockDimensions, LayoutError, TextLayout};
use tategaki_text::{FontDeclaration, MeasureContext};
use thiserror::Error;

use crate::run::{render_line, TextRun};
use crate::surface::{DrawingSurface, TextMethod};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Statistics returned after each paint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Runs flushed in the fill pass.
    pub fill_runs: usize,
    /// Runs flushed in the stroke pass.
    pub stroke_runs: usize,
    /// Fill and stroke text calls issued.
    pub draw_calls: usize,
}

/// What a host shape needs from a vertical text engine.
pub trait VerticalTextLayout {
    /// Recompute the layout and return the new block size.
    fn init_dimensions(&mut self) -> BlockDimensions;

    /// Paint the block centred on the surface origin, recomputing first
    /// if the layout is dirty.
    fn render(&mut self, surface: &mut dyn DrawingSurface) -> Result<PaintStats, RenderError>;
}

/// A vertical text block over any [`StyleSource`].
///
/// Measures through its own [`MeasureContext`] when given one, otherwise
/// through the process-wide shared context.
pub struct VerticalText<S: StyleSource> {
    source: S,
    layout: TextLayout,
    ctx: Option<MeasureContext>,
}

impl<S: StyleSource> VerticalText<S> {
    /// A block measured through the shared context.
    pub fn new(source: S) -> Self {
        Self { source, layout: TextLayout::new(), ctx: None }
    }

    /// A block measured through `ctx`.
    pub fn with_context(source: S, ctx: MeasureContext) -> Self {
        Self { source, layout: TextLayout::new(), ctx: Some(ctx) }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source. Marks the layout dirty.
    pub fn source_mut(&mut self) -> &mut S {
        self.layout.mark_dirty();
        &mut self.source
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    pub fn context(&self) -> Option<&MeasureContext> {
        self.ctx.as_ref()
    }

    pub fn width(&self) -> f32 {
        self.layout.width()
    }

    pub fn height(&self) -> f32 {
        self.layout.height()
    }

    pub fn mark_dirty(&mut self) {
        self.layout.mark_dirty();
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn recompute(&mut self) -> BlockDimensions {
        match self.ctx.as_mut() {
            Some(ctx) => self.layout.recompute(&self.source, ctx),
            None => self.layout.recompute_shared(&self.source),
        }
    }

    fn ensure_layout(&mut self) {
        if self.layout.is_dirty() {
            self.recompute();
        }
    }

    // ---------------------------------------------------------------
    // Passes
    // ---------------------------------------------------------------

    /// Draw every line with `method`, columns right to left from the
    /// block's right edge.
    pub fn render_text_common(
        &self,
        surface: &mut dyn DrawingSurface,
        method: TextMethod,
    ) -> Result<Vec<TextRun>, RenderError> {
        surface.save();
        let result = self.render_lines(surface, method);
        surface.restore();
        result
    }

    fn render_lines(
        &self,
        surface: &mut dyn DrawingSurface,
        method: TextMethod,
    ) -> Result<Vec<TextRun>, RenderError> {
        let left = self.layout.width() / 2.0;
        let top = -self.layout.height() / 2.0;
        let mut line_widths = 0.0;
        let mut runs = Vec::new();

        for i in 0..self.source.lines().len() {
            let line_left = left - line_widths;
            runs.extend(render_line(method, surface, &self.source, &self.layout, i, line_left, top)?);
            line_widths += self.layout.line_width(i)?;
        }
        Ok(runs)
    }

    /// Fill pass. Skipped when neither the block nor any character could
    /// define a fill.
    pub fn render_text_fill(&self, surface: &mut dyn DrawingSurface) -> Result<Vec<TextRun>, RenderError> {
        if self.source.options().fill.is_none() && self.source.has_no_styles() {
            return Ok(Vec::new());
        }
        self.render_text_common(surface, TextMethod::Fill)
    }

    /// Stroke pass: no shadow, block dash pattern, own drawing state.
    pub fn render_text_stroke(&self, surface: &mut dyn DrawingSurface) -> Result<Vec<TextRun>, RenderError> {
        let options = self.source.options();
        let block_stroke = options.stroke.is_some() && options.stroke_width > 0.0;
        if !block_stroke && self.source.has_no_styles() {
            return Ok(Vec::new());
        }

        surface.save();
        if let Some(dash) = &options.stroke_dash_array {
            surface.set_line_dash(dash);
        }
        surface.remove_shadow();
        let result = self.render_text_common(surface, TextMethod::Stroke);
        surface.restore();
        result
    }
}

impl<S: StyleSource> VerticalTextLayout for VerticalText<S> {
    fn init_dimensions(&mut self) -> BlockDimensions {
        self.recompute()
    }

    fn render(&mut self, surface: &mut dyn DrawingSurface) -> Result<PaintStats, RenderError> {
        self.ensure_layout();

        let block_style = self.source.options().defaults();
        surface.set_font(&FontDeclaration::new(&block_style, false));

        let (fill, stroke) = match self.source.options().paint_first {
            PaintFirst::Fill => {
                let fill = self.render_text_fill(surface)?;
                (fill, self.render_text_stroke(surface)?)
            }
            PaintFirst::Stroke => {
                let stroke = self.render_text_stroke(surface)?;
                (self.render_text_fill(surface)?, stroke)
            }
        };

        let stats = PaintStats {
            fill_runs: fill.len(),
            stroke_runs: stroke.len(),
            draw_calls: fill.iter().chain(&stroke).map(|r| r.draw_calls).sum(),
        };
        debug!(
            "Painted layout v{}: {} fill runs, {} stroke runs, {} draw calls",
            self.layout.version(),
            stats.fill_runs,
            stats.stroke_runs,
            stats.draw_calls
        );
        Ok(stats)
    }
}

// ===================================================================
// Tests
// ===================================================================
