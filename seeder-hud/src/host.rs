//! Host capability interfaces
//!
//! The HUD never owns the vehicle. The host simulation exposes the implement
//! through these traits; optional capabilities have defaults so a host only
//! implements what its implement actually supports.

use crate::types::{ImplementState, RidgeMarkerState, ShutoffMode, TramLineMode};

/// Anything in an attachment chain that may carry ridge markers
pub trait AttachmentNode {
    /// Number of ridge markers fitted (0 = none)
    fn ridge_marker_count(&self) -> usize {
        0
    }

    /// Current ridge marker state, meaningful only when markers are fitted
    fn ridge_marker_state(&self) -> RidgeMarkerState {
        RidgeMarkerState::None
    }

    /// The vehicle or implement this node is attached to, if any
    fn attacher(&self) -> Option<&dyn AttachmentNode> {
        None
    }
}

/// Read access to the seeding implement the HUD is attached to
pub trait ImplementHost: AttachmentNode {
    /// Poll the current implement state
    fn snapshot(&self) -> ImplementState;

    /// Whether half-side shutoff can be engaged right now
    ///
    /// `None` means the implement has no such capability at all.
    fn can_activate_half_side_shutoff(&self) -> Option<bool> {
        None
    }

    /// Whether a fertilizer unit is fitted
    fn has_fertilizer(&self) -> bool {
        false
    }
}

/// Mutators the HUD forwards user intents to
///
/// Implementations apply the request to the vehicle; the HUD only picks up
/// the result on the next poll.
pub trait VehicleCommands: ImplementHost {
    fn increase_tram_line_distance(&mut self);
    fn decrease_tram_line_distance(&mut self);
    fn set_tram_line_mode(&mut self, mode: TramLineMode);
    fn set_half_side_shutoff_mode(&mut self, mode: ShutoffMode);
    fn toggle_pre_markers(&mut self);
    fn toggle_sound(&mut self);
    fn toggle_fertilizer(&mut self);
    fn reset_session_hectares(&mut self);
    fn increment_passed_lanes(&mut self);
    fn decrement_passed_lanes(&mut self);
}
