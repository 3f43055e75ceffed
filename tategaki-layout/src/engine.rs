use log::debug;
use tategaki_core::StyleSource;
use tategaki_text::{with_shared_context, MeasureContext};
use thiserror::Error;

use crate::bbox::GraphemeBBox;
use crate::dimensions::{calc_text_height, calc_text_width, floor_dimensions, line_width, BlockDimensions};
use crate::justify::enlarge_spaces;
use crate::line::measure_vline;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Line out of range: {0}")]
    LineOutOfRange(usize),
    #[error("Character out of range: line {line}, char {ch}")]
    CharOutOfRange { line: usize, ch: usize },
}

/// Owned layout of one vertical text block.
///
/// Every recompute replaces the per-line arrays wholesale and bumps
/// `version`. A single dirty flag decides between recomputing and
/// reusing the last result.
#[derive(Debug, Clone)]
pub struct TextLayout {
    /// Per-line boxes, each with a trailing caret box.
    char_bounds: Vec<Vec<GraphemeBBox>>,
    /// Extent of each line along its direction (sum of glyph heights).
    line_heights: Vec<f32>,
    /// Column pitch of each line.
    line_widths: Vec<f32>,
    width: f32,
    height: f32,
    version: u64,
    dirty: bool,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayout {
    /// An empty layout, dirty until first computed.
    pub fn new() -> Self {
        Self {
            char_bounds: Vec::new(),
            line_heights: Vec::new(),
            line_widths: Vec::new(),
            width: 0.0,
            height: 0.0,
            version: 0,
            dirty: true,
        }
    }

    // ---------------------------------------------------------------
    // Computation
    // ---------------------------------------------------------------

    /// Measure every line of `source` and derive the block dimensions.
    pub fn recompute<S: StyleSource + ?Sized>(
        &mut self,
        source: &S,
        ctx: &mut MeasureContext,
    ) -> BlockDimensions {
        let line_count = source.lines().len();
        let mut char_bounds = Vec::with_capacity(line_count);
        let mut line_heights = Vec::with_capacity(line_count);
        let mut line_widths = Vec::with_capacity(line_count);

        for i in 0..line_count {
            let metrics = measure_vline(source, ctx, i);
            line_heights.push(metrics.height);
            line_widths.push(line_width(source, i));
            char_bounds.push(metrics.boxes);
        }

        let options = source.options();
        let raw_width = calc_text_width(&line_widths, options.line_height);
        let raw_height = calc_text_height(&line_heights);
        let dims = floor_dimensions(source, raw_width, raw_height);

        let justified = if options.text_align.is_justify() {
            enlarge_spaces(source, &mut char_bounds, &line_heights, dims.height)
        } else {
            0
        };

        self.char_bounds = char_bounds;
        self.line_heights = line_heights;
        self.line_widths = line_widths;
        self.width = dims.width;
        self.height = dims.height;
        self.version += 1;
        self.dirty = false;

        debug!(
            "Layout v{}: {} lines, {:.2}x{:.2}, {} justified",
            self.version, line_count, dims.width, dims.height, justified
        );
        dims
    }

    /// [`recompute`](Self::recompute) against the process-wide context.
    pub fn recompute_shared<S: StyleSource + ?Sized>(&mut self, source: &S) -> BlockDimensions {
        with_shared_context(|ctx| self.recompute(source, ctx))
    }

    /// Recompute only when marked dirty. Returns whether work was done.
    pub fn recompute_if_dirty<S: StyleSource + ?Sized>(
        &mut self,
        source: &S,
        ctx: &mut MeasureContext,
    ) -> bool {
        if !self.dirty {
            return false;
        }
        self.recompute(source, ctx);
        true
    }

    /// Invalidate the layout after a content, style or option change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn line_count(&self) -> usize {
        self.char_bounds.len()
    }

    /// Boxes of `line`, including the trailing caret box.
    pub fn line_bounds(&self, line: usize) -> Result<&[GraphemeBBox], LayoutError> {
        self.char_bounds
            .get(line)
            .map(Vec::as_slice)
            .ok_or(LayoutError::LineOutOfRange(line))
    }

    pub fn char_bound(&self, line: usize, ch: usize) -> Result<&GraphemeBBox, LayoutError> {
        self.line_bounds(line)?
            .get(ch)
            .ok_or(LayoutError::CharOutOfRange { line, ch })
    }

    pub fn line_height(&self, line: usize) -> Result<f32, LayoutError> {
        self.line_heights
            .get(line)
            .copied()
            .ok_or(LayoutError::LineOutOfRange(line))
    }

    pub fn line_width(&self, line: usize) -> Result<f32, LayoutError> {
        self.line_widths
            .get(line)
            .copied()
            .ok_or(LayoutError::LineOutOfRange(line))
    }

    pub fn line_heights(&self) -> &[f32] {
        &self.line_heights
    }

    pub fn line_widths(&self) -> &[f32] {
        &self.line_widths
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn dimensions(&self) -> BlockDimensions {
        BlockDimensions { width: self.width, height: self.height }
    }

    /// Number of completed recomputes.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tategaki_core::{StyledText, TextAlign, TextOptions, TextStyleDeclaration};
    use tategaki_text::FixedMeasurer;

    fn ctx() -> MeasureContext {
        // Width 10, height 10 at the reference size.
        MeasureContext::new(FixedMeasurer::new(10.0))
    }

    fn options() -> TextOptions {
        TextOptions {
            font_size: 400.0,
            line_height: 2.0,
            font_size_mult: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_layout_is_dirty() {
        let layout = TextLayout::new();
        assert!(layout.is_dirty());
        assert_eq!(layout.version(), 0);
        assert_eq!(layout.line_count(), 0);
    }

    #[test]
    fn test_height_is_tallest_line() {
        let text = StyledText::new("ab\nabcd\nabc", options());
        let mut layout = TextLayout::new();
        let dims = layout.recompute(&text, &mut ctx());

        assert_eq!(layout.line_heights(), &[20.0, 40.0, 30.0]);
        assert_eq!(dims.height, 40.0);
        assert_eq!(layout.height(), 40.0);
    }

    #[test]
    fn test_width_flat_advance_then_last_line() {
        let text = StyledText::new("ab\nabcd\nabc", options());
        let mut layout = TextLayout::new();
        let dims = layout.recompute(&text, &mut ctx());

        // Pitch of every line is 400 * 2 * 1; the last adds 800 / 2.
        assert_eq!(layout.line_widths(), &[800.0, 800.0, 800.0]);
        assert_eq!(dims.width, 2.0 + 2.0 + 400.0);
    }

    #[test]
    fn test_empty_block_uses_minimums() {
        let opts = TextOptions { min_width: 3.0, min_height: 15.0, cursor_height: 10.0, ..options() };
        let text = StyledText::new("", opts);
        let mut layout = TextLayout::new();
        let dims = layout.recompute(&text, &mut ctx());
        assert_eq!(dims, BlockDimensions { width: 3.0, height: 15.0 });
        assert_eq!(layout.line_count(), 1);
    }

    #[test]
    fn test_version_and_dirty_flag() {
        let text = StyledText::new("a", options());
        let mut layout = TextLayout::new();
        let mut ctx = ctx();

        assert!(layout.recompute_if_dirty(&text, &mut ctx));
        assert_eq!(layout.version(), 1);
        assert!(!layout.is_dirty());
        assert!(!layout.recompute_if_dirty(&text, &mut ctx));
        assert_eq!(layout.version(), 1);

        layout.mark_dirty();
        assert!(layout.recompute_if_dirty(&text, &mut ctx));
        assert_eq!(layout.version(), 2);
    }

    #[test]
    fn test_recompute_replaces_arrays() {
        let mut text = StyledText::new("abc\nd", options());
        let mut layout = TextLayout::new();
        let mut ctx = ctx();
        layout.recompute(&text, &mut ctx);
        assert_eq!(layout.line_count(), 2);

        text.set_text("x");
        layout.recompute(&text, &mut ctx);
        assert_eq!(layout.line_count(), 1);
        assert!(layout.line_bounds(1).is_err());
    }

    #[test]
    fn test_justify_stretches_non_last_lines() {
        let opts = TextOptions { text_align: TextAlign::Justify, ..options() };
        // Line 0 is 30 tall, line 1 is 60 tall.
        let text = StyledText::new("a b\nabcdef", opts);
        let mut layout = TextLayout::new();
        layout.recompute(&text, &mut ctx());

        let space = layout.char_bound(0, 1).unwrap();
        assert_eq!(space.width, 10.0 + 30.0);
        assert_eq!(layout.char_bound(0, 2).unwrap().left, 20.0 + 30.0);
        assert_eq!(layout.char_bound(0, 0).unwrap().left, 0.0);
    }

    #[test]
    fn test_left_align_does_not_justify() {
        let text = StyledText::new("a b\nabcdef", options());
        let mut layout = TextLayout::new();
        layout.recompute(&text, &mut ctx());
        assert_eq!(layout.char_bound(0, 1).unwrap().width, 10.0);
    }

    #[test]
    fn test_queries_out_of_range() {
        let text = StyledText::new("ab", options());
        let mut layout = TextLayout::new();
        layout.recompute(&text, &mut ctx());

        assert_eq!(layout.line_bounds(0).unwrap().len(), 3);
        assert_eq!(layout.line_height(4), Err(LayoutError::LineOutOfRange(4)));
        assert_eq!(layout.line_width(4), Err(LayoutError::LineOutOfRange(4)));
        assert_eq!(
            layout.char_bound(0, 9).unwrap_err(),
            LayoutError::CharOutOfRange { line: 0, ch: 9 }
        );
    }

    #[test]
    fn test_larger_override_widens_column() {
        let mut text = StyledText::new("ab", options());
        text.styles.set(0, 1, TextStyleDeclaration { font_size: Some(800.0), ..Default::default() });
        let mut layout = TextLayout::new();
        layout.recompute(&text, &mut ctx());
        assert_eq!(layout.line_width(0).unwrap(), 1600.0);
        // 10 at 400 plus 20 at 800.
        assert_eq!(layout.line_height(0).unwrap(), 30.0);
    }
}
