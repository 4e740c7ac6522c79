//! Seeder HUD Library
//!
//! Display state for a seeding implement's heads-up display: tram line
//! guidance, half-side shutoff, ridge markers and session statistics.
//!
//! # Architecture
//!
//! This library only decides *what* changes on the display:
//! - Polls an `ImplementHost` once per frame
//! - Memoizes every drawn value and emits only the changed elements
//! - Forwards button presses to the vehicle through `VehicleCommands`
//!
//! The library does NOT:
//! - Build or lay out overlays
//! - Load textures or localization files
//! - Route mouse or key input
//!
//! # Example Usage
//!
//! ```
//! use seeder_hud::{
//!     AttachmentNode, DefaultLocalization, ImplementHost, ImplementState, ShutoffMode,
//!     TrackerConfig, VisualizationStateTracker,
//! };
//!
//! struct Seeder(ImplementState);
//!
//! impl AttachmentNode for Seeder {}
//!
//! impl ImplementHost for Seeder {
//!     fn snapshot(&self) -> ImplementState {
//!         self.0.clone()
//!     }
//! }
//!
//! let mut tracker = VisualizationStateTracker::new(TrackerConfig::default()).unwrap();
//! let seeder = Seeder(ImplementState {
//!     shutoff_mode: ShutoffMode::Left,
//!     ..ImplementState::default()
//! });
//!
//! let update = tracker.update(&seeder, &DefaultLocalization);
//! for mutation in &update.mutations {
//!     println!("{}", mutation);
//! }
//!
//! // Nothing changed, nothing to redraw
//! assert!(tracker.update(&seeder, &DefaultLocalization).is_empty());
//! ```

// Public modules
pub mod commands;
pub mod config;
pub mod host;
pub mod hud;
pub mod labels;
pub mod markers;
pub mod memo;
pub mod segments;
pub mod tracker;
pub mod types;

// Re-export main types for convenience
pub use commands::{dispatch, Dispatch, HudCommand, IgnoreReason};
pub use config::TrackerConfig;
pub use host::{AttachmentNode, ImplementHost, VehicleCommands};
pub use hud::Hud;
pub use labels::{DefaultLocalization, Localization};
pub use memo::VisualMemo;
pub use segments::DisplaySegments;
pub use tracker::{HectareLabels, LaneCounter, ModeDisplay, VisualizationStateTracker};
pub use types::{
    HudError, HudMutation, HudUpdate, ImplementState, MarkerIcon, Result, RidgeMarkerState,
    SegmentColor, ShutoffMode, Toggle, TramLineMode,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: ensure we can create a tracker with defaults
        let tracker = VisualizationStateTracker::new(TrackerConfig::default()).unwrap();
        assert_eq!(tracker.segments().len(), 20);
        assert_eq!(tracker.memo(), &VisualMemo::default());
    }
}
