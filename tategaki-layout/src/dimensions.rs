//! Block dimensions from per-line metrics.
//!
//! Vertical lines are columns placed side by side, all anchored at the
//! same top. The block is therefore as tall as its tallest line and as
//! wide as its columns' pitch.

use tategaki_core::StyleSource;

/// Overall size of a text block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockDimensions {
    pub width: f32,
    pub height: f32,
}

/// Column pitch of `line_index`: the largest font size on the line times
/// the line height and the font-size multiplier.
///
/// An empty line uses the style at its first position.
pub fn line_width<S: StyleSource + ?Sized>(source: &S, line_index: usize) -> f32 {
    let len = source.lines().get(line_index).map_or(0, Vec::len);
    let mut max_size = source.complete_style(line_index, 0).font_size;
    for i in 1..len {
        max_size = max_size.max(source.complete_style(line_index, i).font_size);
    }
    let options = source.options();
    max_size * options.line_height * options.font_size_mult
}

/// Block width: a flat `line_height` advance for every line but the
/// last, plus the last line's width divided by `line_height`.
pub fn calc_text_width(line_widths: &[f32], line_height: f32) -> f32 {
    let len = line_widths.len();
    line_widths
        .iter()
        .enumerate()
        .map(|(i, &w)| if i + 1 == len { w / line_height } else { line_height })
        .sum()
}

/// Block height: the tallest line.
pub fn calc_text_height(line_heights: &[f32]) -> f32 {
    line_heights.iter().copied().fold(0.0, f32::max)
}

/// Apply the configured floors.
///
/// A block without any grapheme is `min_width` wide and
/// `max(cursor_height, min_height)` tall. Otherwise a non-positive
/// height falls back to `cursor_height`, and both dimensions are then
/// raised to at least `min_width` / `min_height`.
pub fn floor_dimensions<S: StyleSource + ?Sized>(
    source: &S,
    width: f32,
    height: f32,
) -> BlockDimensions {
    let options = source.options();
    let is_empty = source.lines().iter().all(Vec::is_empty);
    if is_empty {
        return BlockDimensions {
            width: options.min_width,
            height: options.cursor_height.max(options.min_height),
        };
    }

    let width = if width.is_finite() && width > 0.0 { width } else { 0.0 };
    let height = if height.is_finite() && height > 0.0 {
        height
    } else {
        options.cursor_height
    };
    BlockDimensions {
        width: width.max(options.min_width),
        height: height.max(options.min_height),
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tategaki_core::{StyledText, TextOptions, TextStyleDeclaration};

    #[test]
    fn test_line_width_uses_largest_font() {
        let opts = TextOptions { font_size: 10.0, line_height: 2.0, font_size_mult: 1.5, ..Default::default() };
        let mut text = StyledText::new("abc", opts);
        text.styles.set(0, 2, TextStyleDeclaration { font_size: Some(30.0), ..Default::default() });
        assert_eq!(line_width(&text, 0), 30.0 * 2.0 * 1.5);
    }

    #[test]
    fn test_line_width_empty_line() {
        let opts = TextOptions { font_size: 10.0, line_height: 1.0, font_size_mult: 1.0, ..Default::default() };
        let text = StyledText::new("", opts);
        assert_eq!(line_width(&text, 0), 10.0);
    }

    #[test]
    fn test_width_asymmetry() {
        // Two non-last lines add the flat 2.0 advance, the last adds 50/2.
        assert_eq!(calc_text_width(&[40.0, 40.0, 50.0], 2.0), 2.0 + 2.0 + 25.0);
    }

    #[test]
    fn test_width_single_line() {
        assert_eq!(calc_text_width(&[30.0], 1.5), 20.0);
        assert_eq!(calc_text_width(&[], 1.5), 0.0);
    }

    #[test]
    fn test_height_is_max() {
        assert_eq!(calc_text_height(&[3.0, 9.0, 4.0]), 9.0);
        assert_eq!(calc_text_height(&[]), 0.0);
    }

    #[test]
    fn test_floor_empty_block() {
        let opts = TextOptions { min_width: 5.0, min_height: 12.0, cursor_height: 0.0, ..Default::default() };
        let text = StyledText::new("", opts);
        assert_eq!(floor_dimensions(&text, 45.0, 0.0), BlockDimensions { width: 5.0, height: 12.0 });
    }

    #[test]
    fn test_floor_zero_height_uses_cursor_height() {
        let opts = TextOptions { cursor_height: 7.0, min_height: 0.0, ..Default::default() };
        let text = StyledText::new("   ", opts);
        let dims = floor_dimensions(&text, 20.0, 0.0);
        assert_eq!(dims.height, 7.0);
        assert_eq!(dims.width, 20.0);
    }

    #[test]
    fn test_floor_keeps_real_dimensions() {
        let text = StyledText::new("a", TextOptions::default());
        assert_eq!(floor_dimensions(&text, 30.0, 40.0), BlockDimensions { width: 30.0, height: 40.0 });
    }

    #[test]
    fn test_floor_raises_small_content_to_minimums() {
        let opts = TextOptions { font_size: 1.0, min_width: 2.0, min_height: 10.0, ..Default::default() };
        let text = StyledText::new("a", opts);
        assert_eq!(floor_dimensions(&text, 1.13, 0.025), BlockDimensions { width: 2.0, height: 10.0 });
    }

    #[test]
    fn test_zero_height_cursor_fallback_still_floored() {
        let opts = TextOptions { cursor_height: 4.0, min_height: 10.0, ..Default::default() };
        let text = StyledText::new(" ", opts);
        assert_eq!(floor_dimensions(&text, 0.0, 0.0), BlockDimensions { width: 2.0, height: 10.0 });
    }
}
