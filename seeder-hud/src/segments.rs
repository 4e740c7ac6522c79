//! Working-width segment bar
//!
//! The bar is a fixed row of segments. Half-side shutoff highlights one half,
//! tram lines highlight a narrow band around the center. Colorings are
//! computed as whole target vectors and applied as a diff, so only segments
//! whose color actually changes produce a mutation.

use crate::types::{SegmentColor, ShutoffMode};

/// Coloring for a half-side shutoff mode
///
/// `Left` highlights the second half (slots N/2+1..=N), `Right` the first
/// half (slots 1..=N/2).
pub fn shutoff_coloring(mode: ShutoffMode, count: usize) -> Vec<SegmentColor> {
    let half = count / 2;
    (0..count)
        .map(|index| {
            let highlighted = match mode {
                ShutoffMode::Off => false,
                ShutoffMode::Left => index >= half,
                ShutoffMode::Right => index < half,
            };
            if highlighted {
                SegmentColor::Highlight
            } else {
                SegmentColor::Normal
            }
        })
        .collect()
}

/// Coloring for active tram lines
///
/// With center slot `c = N/2`, slots `c-span..c-1` and `c+1..c+span` are
/// highlighted and everything else is normal.
pub fn tram_line_coloring(count: usize, span: usize) -> Vec<SegmentColor> {
    let center = count / 2;
    (1..=count)
        .map(|slot| {
            let offset = slot.abs_diff(center);
            if offset >= 1 && offset <= span {
                SegmentColor::Highlight
            } else {
                SegmentColor::Normal
            }
        })
        .collect()
}

/// Target coloring for the combined tram line / shutoff state
///
/// Active tram lines override any shutoff coloring.
pub fn combined_coloring(
    tram_lines_active: bool,
    shutoff_mode: ShutoffMode,
    count: usize,
    span: usize,
) -> Vec<SegmentColor> {
    if tram_lines_active {
        tram_line_coloring(count, span)
    } else {
        shutoff_coloring(shutoff_mode, count)
    }
}

/// Current colors of the segment bar as last pushed to the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySegments {
    colors: Vec<SegmentColor>,
}

impl DisplaySegments {
    /// Create a bar of `count` segments, all normal
    pub fn new(count: usize) -> Self {
        Self {
            colors: vec![SegmentColor::Normal; count],
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at a 0-based index
    pub fn color(&self, index: usize) -> Option<SegmentColor> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[SegmentColor] {
        &self.colors
    }

    /// 0-based indices of all highlighted segments
    pub fn highlighted(&self) -> Vec<usize> {
        self.colors
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == SegmentColor::Highlight)
            .map(|(i, _)| i)
            .collect()
    }

    /// Adopt a target coloring, returning the segments that changed
    ///
    /// The slot count never changes; a target of a different length is
    /// applied only over the overlapping range.
    pub fn apply(&mut self, target: &[SegmentColor]) -> Vec<(usize, SegmentColor)> {
        let mut changes = Vec::new();
        for (index, (current, wanted)) in self.colors.iter_mut().zip(target).enumerate() {
            if current != wanted {
                *current = *wanted;
                changes.push((index, *wanted));
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutoff_left_highlights_second_half() {
        let colors = shutoff_coloring(ShutoffMode::Left, 20);
        for (index, color) in colors.iter().enumerate() {
            let slot = index + 1;
            if slot >= 11 {
                assert_eq!(*color, SegmentColor::Highlight, "slot {}", slot);
            } else {
                assert_eq!(*color, SegmentColor::Normal, "slot {}", slot);
            }
        }
    }

    #[test]
    fn test_shutoff_right_highlights_first_half() {
        let colors = shutoff_coloring(ShutoffMode::Right, 20);
        for (index, color) in colors.iter().enumerate() {
            let slot = index + 1;
            if slot <= 10 {
                assert_eq!(*color, SegmentColor::Highlight, "slot {}", slot);
            } else {
                assert_eq!(*color, SegmentColor::Normal, "slot {}", slot);
            }
        }
    }

    #[test]
    fn test_shutoff_off_is_all_normal() {
        assert!(shutoff_coloring(ShutoffMode::Off, 20)
            .iter()
            .all(|c| *c == SegmentColor::Normal));
    }

    #[test]
    fn test_tram_line_band() {
        let colors = tram_line_coloring(20, 2);
        let highlighted: Vec<usize> = colors
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == SegmentColor::Highlight)
            .map(|(i, _)| i + 1)
            .collect();
        // center slot 10: 8, 9, 11, 12
        assert_eq!(highlighted, vec![8, 9, 11, 12]);
    }

    #[test]
    fn test_apply_reports_only_changes() {
        let mut segments = DisplaySegments::new(20);
        assert!(segments.apply(&shutoff_coloring(ShutoffMode::Off, 20)).is_empty());

        let changes = segments.apply(&shutoff_coloring(ShutoffMode::Left, 20));
        assert_eq!(changes.len(), 10);
        assert!(changes.iter().all(|(i, c)| *i >= 10 && *c == SegmentColor::Highlight));

        let changes = segments.apply(&shutoff_coloring(ShutoffMode::Left, 20));
        assert!(changes.is_empty());
        assert_eq!(segments.highlighted(), (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_apply_keeps_slot_count() {
        let mut segments = DisplaySegments::new(6);
        segments.apply(&[SegmentColor::Highlight; 10]);
        assert_eq!(segments.len(), 6);
        assert_eq!(segments.highlighted().len(), 6);
    }
}
