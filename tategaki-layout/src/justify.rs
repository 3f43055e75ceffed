//! Justification: stretch spaces so a line fills the block's extent.
//!
//! Applied left to right: each space/tab grows by `slack / spaces` and
//! every box after it shifts by the slack injected so far, the caret box
//! included. The last line and lines ending a wrapped paragraph keep
//! their natural spacing, as do lines with no space to stretch.

use tategaki_core::{is_space_or_tab, StyleSource};

use crate::bbox::GraphemeBBox;

/// Stretch every eligible line of `bounds` to `target_extent`.
///
/// `line_extents[i]` is the measured extent of line `i`. Returns the
/// number of lines that were stretched.
pub fn enlarge_spaces<S: StyleSource + ?Sized>(
    source: &S,
    bounds: &mut [Vec<GraphemeBBox>],
    line_extents: &[f32],
    target_extent: f32,
) -> usize {
    let lines = source.lines();
    let len = lines.len();
    let mut justified = 0;

    for (i, line) in lines.iter().enumerate() {
        if i + 1 == len || source.is_end_of_wrapping(i) {
            continue;
        }
        let (Some(boxes), Some(&extent)) = (bounds.get_mut(i), line_extents.get(i)) else {
            continue;
        };
        if extent >= target_extent {
            continue;
        }
        let spaces = line.iter().filter(|g| is_space_or_tab(g)).count();
        if spaces == 0 {
            continue;
        }

        let diff_space = (target_extent - extent) / spaces as f32;
        let mut accumulated = 0.0;
        for (j, bbox) in boxes.iter_mut().enumerate() {
            if line.get(j).is_some_and(|g| is_space_or_tab(g)) {
                bbox.width += diff_space;
                bbox.kerned_width += diff_space;
                bbox.slack += diff_space;
                bbox.left += accumulated;
                accumulated += diff_space;
            } else {
                bbox.left += accumulated;
            }
        }
        justified += 1;
    }

    justified
}

// ===================================================================
// Tests
// ===================================================================
