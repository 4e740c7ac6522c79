//! Core types for the seeder HUD library
//!
//! This module defines the implement state polled from the host every frame,
//! the explicit mode enumerations, and the display mutations the tracker emits.
//! The tracker only reads `ImplementState`; it never writes back to the host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, HudError>;

/// Errors that can occur while setting up the HUD
///
/// The per-frame tracker never fails; only configuration can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum HudError {
    #[error("Invalid segment count {0}: must be even and at least 6")]
    InvalidSegmentCount(usize),

    #[error("Invalid tram line span {span} for {segments} segments")]
    InvalidTramLineSpan { span: usize, segments: usize },

    #[error("Invalid attachment depth {0}: must be at least 1")]
    InvalidAttachmentDepth(usize),
}

/// Half-side shutoff mode of the seeder
///
/// Cycles `Off → Left → Right → Off`; there is no reverse step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShutoffMode {
    #[default]
    Off,
    Left,
    Right,
}

impl ShutoffMode {
    /// Next mode on the shutoff ring (wraps back to `Off`)
    pub fn cycle(self) -> Self {
        match self {
            ShutoffMode::Off => ShutoffMode::Left,
            ShutoffMode::Left => ShutoffMode::Right,
            ShutoffMode::Right => ShutoffMode::Off,
        }
    }
}

impl fmt::Display for ShutoffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutoffMode::Off => write!(f, "off"),
            ShutoffMode::Left => write!(f, "left"),
            ShutoffMode::Right => write!(f, "right"),
        }
    }
}

/// Tram line guidance mode
///
/// Ordered `Manual < Semi < Auto`. Stepping clamps at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TramLineMode {
    #[default]
    Manual,
    Semi,
    Auto,
}

impl TramLineMode {
    /// Step towards `Auto`, staying at `Auto`
    pub fn increment(self) -> Self {
        match self {
            TramLineMode::Manual => TramLineMode::Semi,
            TramLineMode::Semi | TramLineMode::Auto => TramLineMode::Auto,
        }
    }

    /// Step towards `Manual`, staying at `Manual`
    pub fn decrement(self) -> Self {
        match self {
            TramLineMode::Auto => TramLineMode::Semi,
            TramLineMode::Semi | TramLineMode::Manual => TramLineMode::Manual,
        }
    }

    /// Passed-lane counting buttons are only usable in semi-automatic mode
    pub fn counting_buttons_enabled(self) -> bool {
        matches!(self, TramLineMode::Semi)
    }

    /// Distance buttons are usable whenever the mode is not manual
    pub fn distance_buttons_enabled(self) -> bool {
        !matches!(self, TramLineMode::Manual)
    }

    /// Localization key of the mode name
    pub fn label_key(self) -> &'static str {
        match self {
            TramLineMode::Manual => crate::labels::KEY_MODE_MANUAL,
            TramLineMode::Semi => crate::labels::KEY_MODE_SEMI,
            TramLineMode::Auto => crate::labels::KEY_MODE_AUTO,
        }
    }
}

impl fmt::Display for TramLineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TramLineMode::Manual => write!(f, "manual"),
            TramLineMode::Semi => write!(f, "semi"),
            TramLineMode::Auto => write!(f, "auto"),
        }
    }
}

/// Which ridge marker is currently lowered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RidgeMarkerState {
    #[default]
    None,
    Left,
    Right,
}

/// Icon variant shown for a single ridge marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerIcon {
    Raised,
    Lowered,
}

/// Color state of one working-width segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentColor {
    #[default]
    Normal,
    Highlight,
}

/// On/off indicators that mirror a simple implement switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    PreMarkers,
    Sound,
    Fertilizer,
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::PreMarkers => write!(f, "pre-markers"),
            Toggle::Sound => write!(f, "sound"),
            Toggle::Fertilizer => write!(f, "fertilizer"),
        }
    }
}

/// Snapshot of the implement, polled from the host once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplementState {
    /// Active half-side shutoff
    pub shutoff_mode: ShutoffMode,
    /// True while the current pass is a tram line
    pub tram_lines_active: bool,
    /// Tram line guidance mode
    pub tram_line_mode: TramLineMode,
    /// Distance between tram lines in meters
    pub tram_line_distance: f64,
    /// Working width of the implement in meters (> 0)
    pub working_width: f64,
    /// Lane counter shown next to the lanes-per-distance value
    pub current_lane: i32,
    /// Ridge marker state reported by the implement itself
    ///
    /// Informational copy; the tracker reads markers through `AttachmentNode`.
    pub ridge_marker_state: RidgeMarkerState,
    /// Number of ridge markers fitted to the implement, mirrored like the state
    pub ridge_marker_count: usize,
    /// Total worked area in hectares
    pub total_hectares: f64,
    /// Worked area of the current session in hectares
    pub session_hectares: f64,
    /// Current work rate in hectares per hour
    pub hectares_per_hour: f64,
    /// Seed used in liters
    pub seed_usage: f64,
    pub pre_markers_active: bool,
    pub sound_enabled: bool,
    pub fertilizer_enabled: bool,
}

impl Default for ImplementState {
    fn default() -> Self {
        Self {
            shutoff_mode: ShutoffMode::Off,
            tram_lines_active: false,
            tram_line_mode: TramLineMode::Manual,
            tram_line_distance: 18.0,
            working_width: 6.0,
            current_lane: 1,
            ridge_marker_state: RidgeMarkerState::None,
            ridge_marker_count: 0,
            total_hectares: 0.0,
            session_hectares: 0.0,
            hectares_per_hour: 0.0,
            seed_usage: 0.0,
            pre_markers_active: false,
            sound_enabled: true,
            fertilizer_enabled: false,
        }
    }
}

/// A single change the HUD must apply to its display elements
///
/// Segment indices are 0-based; slot number `n` on the display is index `n - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HudMutation {
    SegmentColor { index: usize, color: SegmentColor },
    ShutoffControlEnabled { enabled: bool },
    RidgeMarkerIcons { left: MarkerIcon, right: MarkerIcon },
    TramLineModeLabel { text: String },
    CountingButtonsEnabled { enabled: bool },
    DistanceButtonsEnabled { enabled: bool },
    LaneCounterLabel { text: String },
    TotalHectaresLabel { text: String },
    SessionHectaresLabel { text: String },
    SeedUsageLabel { text: String },
    ToggleIcon { toggle: Toggle, on: bool },
    ToggleEnabled { toggle: Toggle, enabled: bool },
}

impl fmt::Display for HudMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HudMutation::SegmentColor { index, color } => {
                write!(f, "segment {:>2} -> {:?}", index + 1, color)
            }
            HudMutation::ShutoffControlEnabled { enabled } => {
                write!(f, "shutoff control enabled = {}", enabled)
            }
            HudMutation::RidgeMarkerIcons { left, right } => {
                write!(f, "ridge markers: left {:?}, right {:?}", left, right)
            }
            HudMutation::TramLineModeLabel { text } => write!(f, "mode label = \"{}\"", text),
            HudMutation::CountingButtonsEnabled { enabled } => {
                write!(f, "counting buttons enabled = {}", enabled)
            }
            HudMutation::DistanceButtonsEnabled { enabled } => {
                write!(f, "distance buttons enabled = {}", enabled)
            }
            HudMutation::LaneCounterLabel { text } => write!(f, "lane label = \"{}\"", text),
            HudMutation::TotalHectaresLabel { text } => write!(f, "total label = \"{}\"", text),
            HudMutation::SessionHectaresLabel { text } => {
                write!(f, "session label = \"{}\"", text)
            }
            HudMutation::SeedUsageLabel { text } => write!(f, "seed label = \"{}\"", text),
            HudMutation::ToggleIcon { toggle, on } => {
                write!(f, "{} icon = {}", toggle, if *on { "on" } else { "off" })
            }
            HudMutation::ToggleEnabled { toggle, enabled } => {
                write!(f, "{} button enabled = {}", toggle, enabled)
            }
        }
    }
}

/// All mutations produced by one tick, in application order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudUpdate {
    pub mutations: Vec<HudMutation>,
}

impl HudUpdate {
    /// True if nothing needs to be redrawn
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn push(&mut self, mutation: HudMutation) {
        self.mutations.push(mutation);
    }

    /// Segment mutations only, as `(index, color)` pairs
    pub fn segment_changes(&self) -> Vec<(usize, SegmentColor)> {
        self.mutations
            .iter()
            .filter_map(|m| match m {
                HudMutation::SegmentColor { index, color } => Some((*index, *color)),
                _ => None,
            })
            .collect()
    }
}
