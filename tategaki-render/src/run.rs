//! Run rendering: one vertical line into styled draw calls.
//!
//! Graphemes with the same complete style are grouped into a run and
//! drawn with one font and colour state. Within a run the pen moves down
//! the column by each grapheme's height (plus any justification slack);
//! every grapheme is drawn on its own baseline at the bottom of its slot.
//! The pen carries over from run to run, so runs only change state,
//! never position.

use std::ops::Range;

use log::trace;
use tategaki_core::{has_style_changed, is_space_or_tab, Direction, StyleSource};
use tategaki_layout::{GraphemeBBox, LayoutError, TextLayout};
use tategaki_text::FontDeclaration;

use crate::surface::{DrawingSurface, StrokeStyle, TextMethod};

/// One flushed run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Concatenated graphemes of the run.
    pub text: String,
    /// Grapheme range within the line.
    pub range: Range<usize>,
    /// Column origin.
    pub x: f32,
    /// Pen position at the start of the run.
    pub y: f32,
    /// Draw calls issued. Zero when the run's style defines nothing to
    /// paint for the pass.
    pub draw_calls: usize,
}

/// Draw line `line_index` of `source` with the column's right edge at
/// `left` and the column's head at `top`.
///
/// Kerning only shifts the layout's `left` chain; the pen here advances
/// by box height plus justification slack, so it never moves glyphs.
pub fn render_line<S: StyleSource + ?Sized>(
    method: TextMethod,
    surface: &mut dyn DrawingSurface,
    source: &S,
    layout: &TextLayout,
    line_index: usize,
    left: f32,
    top: f32,
) -> Result<Vec<TextRun>, LayoutError> {
    let graphemes = source
        .lines()
        .get(line_index)
        .ok_or(LayoutError::LineOutOfRange(line_index))?;
    let bounds = layout.line_bounds(line_index)?;
    if bounds.len() < graphemes.len() {
        return Err(LayoutError::CharOutOfRange { line: line_index, ch: bounds.len() });
    }

    let options = source.options();
    let is_justify = options.text_align.is_justify();
    let short_cut = !is_justify && options.char_spacing == 0.0 && source.is_empty_styles(line_index);
    let len = graphemes.len();

    surface.save();
    if surface.direction() != options.direction {
        surface.set_direction(options.direction);
    }

    let mut pen = match options.direction {
        Direction::Ltr => top,
        Direction::Rtl => top + layout.height(),
    };
    let mut runs = Vec::new();
    let line = RunLine { method, source, line_index, graphemes, bounds, left };

    if short_cut {
        if len > 0 {
            runs.push(line.draw_run(surface, 0..len, &mut pen));
        }
    } else {
        let mut start = 0;
        for i in 0..len {
            let mut time_to_render = i + 1 == len || options.char_spacing != 0.0;
            if !time_to_render && is_justify && is_space_or_tab(&graphemes[i]) {
                time_to_render = true;
            }
            if !time_to_render {
                let actual = source.complete_style(line_index, i);
                let next = source.complete_style(line_index, i + 1);
                time_to_render = has_style_changed(&actual, &next);
            }
            if time_to_render {
                runs.push(line.draw_run(surface, start..i + 1, &mut pen));
                start = i + 1;
            }
        }
    }

    surface.restore();
    Ok(runs)
}

struct RunLine<'a, S: ?Sized> {
    method: TextMethod,
    source: &'a S,
    line_index: usize,
    graphemes: &'a [String],
    bounds: &'a [GraphemeBBox],
    left: f32,
}

impl<S: StyleSource + ?Sized> RunLine<'_, S> {
    fn draw_run(&self, surface: &mut dyn DrawingSurface, range: Range<usize>, pen: &mut f32) -> TextRun {
        let options = self.source.options();
        let sign = options.direction.sign();
        let style = self.source.complete_style(self.line_index, range.start);
        let raw = self.source.style_override(self.line_index, range.start);
        let graphemes = &self.graphemes[range.clone()];
        let boxes = &self.bounds[range.clone()];

        let start = *pen;
        let advance: f32 = boxes.iter().map(|b| b.height + b.slack).sum();
        *pen += sign * advance;

        let mut run = TextRun {
            text: graphemes.concat(),
            range,
            x: self.left,
            y: start,
            draw_calls: 0,
        };

        let should_draw = match self.method {
            TextMethod::Fill => style.should_fill(),
            TextMethod::Stroke => style.should_stroke(),
        };
        if !should_draw {
            trace!("Run {:?} on line {} skipped: nothing to paint", run.range, self.line_index);
            return run;
        }

        surface.save();
        surface.set_font(&FontDeclaration::new(&style, false));

        let mut top = start;
        if let Some(decl) = raw {
            if decl.text_background_color.is_some() {
                surface.remove_shadow();
            }
            if let Some(delta_y) = decl.delta_y {
                top += delta_y;
            }
        }

        match (self.method, style.fill, style.stroke) {
            (TextMethod::Fill, Some(fill), _) => surface.set_fill_style(fill),
            (TextMethod::Stroke, _, Some(stroke)) => {
                surface.set_stroke_style(&StrokeStyle::from_options(options, stroke));
            }
            _ => {}
        }

        let mut cursor = top;
        for (grapheme, bbox) in graphemes.iter().zip(boxes) {
            let baseline = if sign > 0.0 { cursor + bbox.height } else { cursor };
            let x = self.left - bbox.width;
            match self.method {
                TextMethod::Fill => surface.fill_text(grapheme, x, baseline),
                TextMethod::Stroke => surface.stroke_text(grapheme, x, baseline),
            }
            run.draw_calls += 1;
            cursor += sign * (bbox.height + bbox.slack);
        }
        surface.restore();

        trace!(
            "Run {:?} on line {}: {:?} at ({:.2}, {:.2})",
            run.range, self.line_index, run.text, run.x, run.y
        );
        run
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use tategaki_core::{StyledText, TextAlign, TextOptions, TextStyleDeclaration};
    use tategaki_text::{FixedMeasurer, MeasureContext};

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    fn options() -> TextOptions {
        TextOptions { font_size: 400.0, ..Default::default() }
    }

    fn layout_of(text: &StyledText) -> TextLayout {
        let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0));
        let mut layout = TextLayout::new();
        layout.recompute(text, &mut ctx);
        layout
    }

    fn fill_positions(surface: &RecordingSurface) -> Vec<(f32, f32)> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_uniform_line_is_one_run() {
        let text = StyledText::new("abc", options());
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        let runs = render_line(TextMethod::Fill, &mut surface, &text, &layout, 0, 100.0, 0.0).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "abc");
        assert_eq!(runs[0].draw_calls, 3);
        assert_eq!(surface.fill_calls(), 3);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_glyphs_stack_down_the_column() {
        let text = StyledText::new("abc", options());
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        render_line(TextMethod::Fill, &mut surface, &text, &layout, 0, 100.0, 5.0).unwrap();
        assert_eq!(fill_positions(&surface), vec![(90.0, 15.0), (90.0, 25.0), (90.0, 35.0)]);
    }

    #[test]
    fn test_style_change_splits_runs_and_pen_continues() {
        let mut text = StyledText::new("abcde", options());
        text.styles.set(0, 2, TextStyleDeclaration { fill: Some(RED), ..Default::default() });
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        let runs = render_line(TextMethod::Fill, &mut surface, &text, &layout, 0, 0.0, 0.0).unwrap();
        let texts: Vec<_> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "c", "de"]);
        assert_eq!(runs[1].y, 20.0);
        assert_eq!(runs[2].y, 30.0);
        assert!(surface.commands().contains(&DrawCommand::SetFillStyle(RED)));
    }

    #[test]
    fn test_char_spacing_renders_per_grapheme() {
        let opts = TextOptions { char_spacing: 100.0, ..options() };
        let text = StyledText::new("abc", opts);
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        let runs = render_line(TextMethod::Fill, &mut surface, &text, &layout, 0, 0.0, 0.0).unwrap();
        assert_eq!(runs.len(), 3);
    }

    #[test]
    fn test_justify_flushes_at_spaces() {
        let opts = TextOptions { text_align: TextAlign::Justify, ..options() };
        let text = StyledText::new("ab cd\nabcdefgh", opts);
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        let runs = render_line(TextMethod::Fill, &mut surface, &text, &layout, 0, 0.0, 0.0).unwrap();
        let texts: Vec<_> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["ab ", "cd"]);
        // The space absorbed the 30 units the line was short by.
        assert_eq!(runs[1].y, 30.0 + 30.0);
    }

    #[test]
    fn test_stroke_pass_without_stroke_draws_nothing() {
        let text = StyledText::new("abc", options());
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        let runs = render_line(TextMethod::Stroke, &mut surface, &text, &layout, 0, 0.0, 0.0).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].draw_calls, 0);
        assert_eq!(surface.stroke_calls(), 0);
    }

    #[test]
    fn test_stroke_uses_block_geometry() {
        let opts = TextOptions { stroke: Some(RED), stroke_width: 3.0, ..options() };
        let text = StyledText::new("a", opts.clone());
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        render_line(TextMethod::Stroke, &mut surface, &text, &layout, 0, 0.0, 0.0).unwrap();
        let expected = StrokeStyle::from_options(&opts, RED);
        assert!(surface.commands().contains(&DrawCommand::SetStrokeStyle(expected)));
        assert_eq!(surface.stroke_calls(), 1);
    }

    #[test]
    fn test_raw_override_shifts_and_removes_shadow() {
        let mut text = StyledText::new("ab", options());
        text.styles.set(
            0,
            1,
            TextStyleDeclaration {
                delta_y: Some(4.0),
                text_background_color: Some(RED),
                ..Default::default()
            },
        );
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        render_line(TextMethod::Fill, &mut surface, &text, &layout, 0, 0.0, 0.0).unwrap();
        assert!(surface.commands().contains(&DrawCommand::RemoveShadow));
        assert_eq!(fill_positions(&surface), vec![(-10.0, 10.0), (-10.0, 24.0)]);
    }

    #[test]
    fn test_rtl_sets_direction_and_climbs() {
        let opts = TextOptions { direction: Direction::Rtl, ..options() };
        let text = StyledText::new("ab", opts);
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        render_line(TextMethod::Fill, &mut surface, &text, &layout, 0, 0.0, 0.0).unwrap();
        assert!(surface.commands().contains(&DrawCommand::SetDirection(Direction::Rtl)));
        assert_eq!(surface.direction(), Direction::Ltr);
        // Block height 20: "a" sits at the bottom, "b" above it.
        assert_eq!(fill_positions(&surface), vec![(-10.0, 20.0), (-10.0, 10.0)]);
    }

    #[test]
    fn test_empty_line_draws_nothing() {
        let text = StyledText::new("", options());
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        let runs = render_line(TextMethod::Fill, &mut surface, &text, &layout, 0, 0.0, 0.0).unwrap();
        assert!(runs.is_empty());
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_line_out_of_range() {
        let text = StyledText::new("a", options());
        let layout = layout_of(&text);
        let mut surface = RecordingSurface::new();

        let err = render_line(TextMethod::Fill, &mut surface, &text, &layout, 3, 0.0, 0.0).unwrap_err();
        assert_eq!(err, LayoutError::LineOutOfRange(3));
    }
}
