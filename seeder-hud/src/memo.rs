//! Last-seen values for redraw suppression
//!
//! Every display element is driven by one or more polled values. The memo
//! keeps the value each element was last drawn from; `None` means the element
//! has not been drawn since the HUD attached.

use crate::types::{RidgeMarkerState, ShutoffMode, TramLineMode};

/// Record `value` in `slot`, returning true if it differs from the last one
pub(crate) fn changed<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

/// Float variant of [`changed`], comparing bit patterns
///
/// A NaN reading equals its memoized copy, so it is drawn once and not on
/// every tick.
pub(crate) fn changed_floats<const N: usize>(
    slot: &mut Option<[f64; N]>,
    values: [f64; N],
) -> bool {
    if let Some(previous) = slot {
        if previous.iter().zip(&values).all(|(a, b)| a.to_bits() == b.to_bits()) {
            return false;
        }
    }
    *slot = Some(values);
    true
}

/// Typed snapshot of everything the tracker has drawn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualMemo {
    pub shutoff_mode: Option<ShutoffMode>,
    pub tram_lines_active: Option<bool>,
    pub shutoff_control_enabled: Option<bool>,
    pub ridge_marker_state: Option<RidgeMarkerState>,
    pub tram_line_mode: Option<TramLineMode>,
    /// [distance, working width, current lane]
    pub lane_counter: Option<[f64; 3]>,
    pub total_hectares: Option<[f64; 1]>,
    /// [session hectares, hectares per hour]
    pub session_hectares: Option<[f64; 2]>,
    pub seed_usage: Option<[f64; 1]>,
    pub pre_markers_active: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub fertilizer_enabled: Option<bool>,
    pub fertilizer_available: Option<bool>,
}

impl VisualMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything so the next tick redraws every element
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_first_time_and_on_difference() {
        let mut slot = None;
        assert!(changed(&mut slot, 3));
        assert!(!changed(&mut slot, 3));
        assert!(changed(&mut slot, 4));
        assert_eq!(slot, Some(4));
    }

    #[test]
    fn test_changed_floats_treats_nan_as_stable() {
        let mut slot = None;
        assert!(changed_floats(&mut slot, [f64::NAN, 1.0]));
        assert!(!changed_floats(&mut slot, [f64::NAN, 1.0]));
        assert!(changed_floats(&mut slot, [f64::NAN, 2.0]));
        assert!(changed_floats(&mut slot, [0.5, 2.0]));
        assert!(!changed_floats(&mut slot, [0.5, 2.0]));
    }

    #[test]
    fn test_clear_resets_all_fields() {
        let mut memo = VisualMemo::new();
        memo.shutoff_mode = Some(ShutoffMode::Left);
        memo.seed_usage = Some([1.0]);
        memo.clear();
        assert_eq!(memo, VisualMemo::default());
    }
}
