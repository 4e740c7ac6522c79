//! Ridge marker resolution
//!
//! Seeders in a combination often carry no markers themselves; the
//! cultivator or drill they are attached to does. The resolved state is taken
//! from the implement if it has markers, otherwise from the nearest attacher
//! in the chain that has any.

use crate::host::AttachmentNode;
use crate::types::{MarkerIcon, RidgeMarkerState};

/// Resolve the ridge marker state for an implement
///
/// `own_count` and `own_state` are the implement's own readings (usually from
/// its polled snapshot). At most `max_depth` attachers are visited; running
/// off the chain or past the bound resolves to `None`.
pub fn resolve_ridge_marker_state<N>(
    own_count: usize,
    own_state: RidgeMarkerState,
    node: &N,
    max_depth: usize,
) -> RidgeMarkerState
where
    N: AttachmentNode + ?Sized,
{
    if own_count > 0 {
        return own_state;
    }

    let mut current = node.attacher();
    let mut depth = 0;
    while let Some(parent) = current {
        if depth >= max_depth {
            log::debug!("Ridge marker search stopped at depth {}", depth);
            break;
        }
        if parent.ridge_marker_count() > 0 {
            return parent.ridge_marker_state();
        }
        current = parent.attacher();
        depth += 1;
    }

    RidgeMarkerState::None
}

/// Icons for the left and right marker
pub fn ridge_marker_icons(state: RidgeMarkerState) -> (MarkerIcon, MarkerIcon) {
    match state {
        RidgeMarkerState::None => (MarkerIcon::Raised, MarkerIcon::Raised),
        RidgeMarkerState::Left => (MarkerIcon::Lowered, MarkerIcon::Raised),
        RidgeMarkerState::Right => (MarkerIcon::Raised, MarkerIcon::Lowered),
    }
}
