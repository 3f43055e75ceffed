//! Line measurement: one line of graphemes into bounding boxes.
//!
//! Graphemes stack along the line, so the line's extent is the sum of
//! their heights. `left` chains through kerned widths and is what caret
//! placement and justification read.

use tategaki_core::StyleSource;
use tategaki_text::{MeasureContext, PrevGrapheme};

use crate::bbox::{GraphemeBBox, LineMetrics};

/// Measure every grapheme of `line_index`.
///
/// The returned boxes have one trailing entry past the last grapheme:
/// the caret position, whose width is the block font size and height 0.
pub fn measure_line<S: StyleSource + ?Sized>(
    source: &S,
    ctx: &mut MeasureContext,
    line_index: usize,
) -> LineMetrics {
    let options = source.options();
    let spacing = options.char_spacing_px();
    let graphemes = source.lines().get(line_index).map_or(&[][..], Vec::as_slice);

    let mut boxes: Vec<GraphemeBBox> = Vec::with_capacity(graphemes.len() + 1);
    let mut height = 0.0;
    let mut prev_style = None;

    for (i, grapheme) in graphemes.iter().enumerate() {
        let style = source.complete_style(line_index, i);
        let prev = match (i.checked_sub(1), prev_style.as_ref()) {
            (Some(p), Some(ps)) => Some(PrevGrapheme { grapheme: graphemes[p].as_str(), style: ps }),
            _ => None,
        };
        let info = ctx.measure_char(grapheme, &style, prev);

        let mut bbox = GraphemeBBox {
            width: info.width + spacing,
            height: info.height,
            kerned_width: info.kerned_width + spacing,
            left: 0.0,
            delta_y: style.delta_y,
            ..Default::default()
        };
        if let Some(previous) = boxes.last() {
            bbox.left = previous.left + previous.width + info.kerned_width - info.width;
        }

        height += bbox.height;
        boxes.push(bbox);
        prev_style = Some(style);
    }

    let caret_left = boxes.last().map_or(0.0, |b| b.left + b.width);
    boxes.push(GraphemeBBox {
        left: caret_left,
        width: options.font_size,
        ..Default::default()
    });

    LineMetrics {
        width: options.font_size,
        height,
        boxes,
    }
}

/// [`measure_line`] with the trailing char spacing removed from the
/// line's extent, clamped at zero.
pub fn measure_vline<S: StyleSource + ?Sized>(
    source: &S,
    ctx: &mut MeasureContext,
    line_index: usize,
) -> LineMetrics {
    let mut info = measure_line(source, ctx, line_index);
    if source.options().char_spacing != 0.0 {
        info.height -= source.options().char_spacing_px();
    }
    if info.height < 0.0 {
        info.height = 0.0;
    }
    info
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tategaki_core::{StyledText, TextOptions, TextStyleDeclaration};
    use tategaki_text::FixedMeasurer;

    fn options(size: f32) -> TextOptions {
        TextOptions { font_size: size, ..Default::default() }
    }

    #[test]
    fn test_two_chars_chain_left() {
        let text = StyledText::new("AB", options(20.0));
        let mut ctx = MeasureContext::new(FixedMeasurer::new(40.0));
        let line = measure_line(&text, &mut ctx, 0);

        assert_eq!(line.boxes.len(), 3);
        assert_eq!(line.boxes[0].left, 0.0);
        assert!((line.boxes[0].width - 2.0).abs() < 1e-6);
        assert!((line.boxes[1].left - line.boxes[0].width).abs() < 1e-6);
        assert_eq!(line.width, 20.0);
    }

    #[test]
    fn test_left_chain_invariant_with_kerning() {
        let text = StyledText::new("AVAV", options(400.0));
        let measurer = FixedMeasurer::new(10.0)
            .with_couple("A", "V", 17.0)
            .with_couple("V", "A", 16.0);
        let mut ctx = MeasureContext::new(measurer);
        let line = measure_line(&text, &mut ctx, 0);

        for i in 1..4 {
            let (p, c) = (line.boxes[i - 1], line.boxes[i]);
            let expected = p.left + p.width + (c.kerned_width - c.width);
            assert!((c.left - expected).abs() < 1e-4, "box {i}: {} != {}", c.left, expected);
        }
        assert_eq!(line.boxes[1].kerned_width, 7.0);
        assert_eq!(line.boxes[2].kerned_width, 6.0);
    }

    #[test]
    fn test_height_accumulates() {
        let text = StyledText::new("abc", options(400.0));
        let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0).with_bounds(30.0, 10.0));
        let line = measure_line(&text, &mut ctx, 0);
        assert_eq!(line.height, 120.0);
    }

    #[test]
    fn test_caret_box() {
        let text = StyledText::new("ab", options(400.0));
        let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0));
        let line = measure_line(&text, &mut ctx, 0);
        let caret = line.boxes[2];
        assert_eq!(caret.left, line.boxes[1].left + line.boxes[1].width);
        assert_eq!(caret.width, 400.0);
        assert_eq!(caret.height, 0.0);
        assert_eq!(caret.kerned_width, 0.0);
    }

    #[test]
    fn test_empty_line_has_only_caret() {
        let text = StyledText::new("", options(30.0));
        let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0));
        let line = measure_line(&text, &mut ctx, 0);
        assert_eq!(line.boxes.len(), 1);
        assert_eq!(line.boxes[0].left, 0.0);
        assert_eq!(line.height, 0.0);
    }

    #[test]
    fn test_char_spacing_added_and_removed_once() {
        let opts = TextOptions { font_size: 400.0, char_spacing: 25.0, ..Default::default() };
        let text = StyledText::new("ab", opts);
        let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0));
        let line = measure_vline(&text, &mut ctx, 0);
        // 400 * 25 / 1000 = 10 px of spacing.
        assert_eq!(line.boxes[0].width, 20.0);
        assert_eq!(line.boxes[0].kerned_width, 20.0);
        assert_eq!(line.height, 2.0 * 10.0 - 10.0);
    }

    #[test]
    fn test_vline_height_clamped_at_zero() {
        let opts = TextOptions { font_size: 400.0, char_spacing: 500.0, ..Default::default() };
        let text = StyledText::new("a", opts);
        let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0));
        assert_eq!(measure_vline(&text, &mut ctx, 0).height, 0.0);
    }

    #[test]
    fn test_delta_y_copied_from_style() {
        let mut text = StyledText::new("ab", options(400.0));
        text.styles.set(0, 1, TextStyleDeclaration { delta_y: Some(-5.0), ..Default::default() });
        let mut ctx = MeasureContext::new(FixedMeasurer::new(10.0));
        let line = measure_line(&text, &mut ctx, 0);
        assert_eq!(line.boxes[0].delta_y, 0.0);
        assert_eq!(line.boxes[1].delta_y, -5.0);
    }
}
