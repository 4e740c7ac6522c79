//! Visualization state tracker
//!
//! The tracker turns a polled `ImplementState` into the minimal list of
//! display mutations. Each display element is guarded by its memoized source
//! value, so an unchanged value costs one comparison and no formatting.

use crate::config::TrackerConfig;
use crate::host::ImplementHost;
use crate::labels::{self, Localization};
use crate::markers::{resolve_ridge_marker_state, ridge_marker_icons};
use crate::memo::{changed, changed_floats, VisualMemo};
use crate::segments::{combined_coloring, DisplaySegments};
use crate::types::{
    HudMutation, HudUpdate, ImplementState, MarkerIcon, RidgeMarkerState, Result,
    SegmentColor, ShutoffMode, Toggle, TramLineMode,
};

/// Lane counter after a recomputation
#[derive(Debug, Clone, PartialEq)]
pub struct LaneCounter {
    pub lanes_for_distance: f64,
    pub label: String,
}

/// Statistics labels; `None` means the label is unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HectareLabels {
    pub total: Option<String>,
    pub session: Option<String>,
    pub seed_usage: Option<String>,
}

/// Everything that depends on the tram line mode
#[derive(Debug, Clone, PartialEq)]
pub struct ModeDisplay {
    pub label: String,
    pub counting_buttons_enabled: bool,
    pub distance_buttons_enabled: bool,
}

/// Per-vehicle display state, created on attach and dropped on detach
#[derive(Debug, Clone)]
pub struct VisualizationStateTracker {
    config: TrackerConfig,
    segments: DisplaySegments,
    memo: VisualMemo,
}

impl VisualizationStateTracker {
    /// Create a tracker for a validated configuration
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            segments: DisplaySegments::new(config.segment_count),
            memo: VisualMemo::new(),
            config,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn segments(&self) -> &DisplaySegments {
        &self.segments
    }

    pub fn memo(&self) -> &VisualMemo {
        &self.memo
    }

    /// Last drawn state of the half-side shutoff control
    pub fn shutoff_control_enabled(&self) -> bool {
        self.memo.shutoff_control_enabled.unwrap_or(false)
    }

    /// Apply a half-side shutoff mode to the segment bar
    ///
    /// Returns nothing when the mode equals the last one seen. While tram
    /// lines are shown the mode is recorded but the band stays on screen.
    pub fn compute_shutoff_highlight(&mut self, mode: ShutoffMode) -> Vec<(usize, SegmentColor)> {
        let active = self.memo.tram_lines_active.unwrap_or(false);
        self.refresh_segments(mode, active)
    }

    /// Apply a tram line on/off transition to the segment bar
    ///
    /// Activation always writes the tram band, whatever was drawn before.
    /// Deactivation falls back to the current shutoff coloring.
    pub fn compute_tram_line_highlight(&mut self, active: bool) -> Vec<(usize, SegmentColor)> {
        let mode = self.memo.shutoff_mode.unwrap_or_default();
        self.refresh_segments(mode, active)
    }

    fn refresh_segments(&mut self, mode: ShutoffMode, active: bool) -> Vec<(usize, SegmentColor)> {
        let mode_changed = changed(&mut self.memo.shutoff_mode, mode);
        let tram_changed = changed(&mut self.memo.tram_lines_active, active);
        if !mode_changed && !tram_changed {
            return Vec::new();
        }

        log::debug!(
            "Repainting segments (shutoff: {}, tram lines: {})",
            mode,
            if active { "on" } else { "off" }
        );

        let count = self.config.segment_count;
        let target = combined_coloring(active, mode, count, self.config.tram_line_span);
        let mut changes = self.segments.apply(&target);

        if tram_changed && active {
            // Band segments already lit by the shutoff coloring are rewritten
            for (index, color) in target.iter().enumerate() {
                if *color == SegmentColor::Highlight && !changes.iter().any(|(i, _)| *i == index) {
                    changes.push((index, SegmentColor::Highlight));
                }
            }
            changes.sort_by_key(|(index, _)| *index);
        }

        changes
    }

    /// Enablement of the half-side shutoff control
    ///
    /// A missing capability counts as "cannot activate". Returns the new
    /// value only when it differs from the drawn one.
    pub fn compute_shutoff_control(
        &mut self,
        capability: Option<bool>,
        tram_lines_active: bool,
    ) -> Option<bool> {
        let enabled = capability.unwrap_or(false) && !tram_lines_active;
        changed(&mut self.memo.shutoff_control_enabled, enabled).then_some(enabled)
    }

    /// Marker icons for an already resolved ridge marker state
    pub fn compute_ridge_marker_icons(
        &mut self,
        state: RidgeMarkerState,
    ) -> Option<(MarkerIcon, MarkerIcon)> {
        changed(&mut self.memo.ridge_marker_state, state).then(|| ridge_marker_icons(state))
    }

    /// Lanes per tram line distance and the counter label
    ///
    /// `working_width` must be positive.
    pub fn compute_lane_counter(
        &mut self,
        distance: f64,
        working_width: f64,
        current_lane: i32,
    ) -> Option<LaneCounter> {
        let key = [distance, working_width, f64::from(current_lane)];
        if !changed_floats(&mut self.memo.lane_counter, key) {
            return None;
        }
        let lanes_for_distance = labels::lanes_for_distance(distance, working_width);
        Some(LaneCounter {
            lanes_for_distance,
            label: labels::format_lane_counter(current_lane, lanes_for_distance),
        })
    }

    /// Statistics labels, each formatted only when its own source changed
    pub fn compute_hectare_summary(
        &mut self,
        total: f64,
        session: f64,
        rate: f64,
        seed_usage: f64,
    ) -> HectareLabels {
        HectareLabels {
            total: changed_floats(&mut self.memo.total_hectares, [total])
                .then(|| labels::format_total_hectares(total)),
            session: changed_floats(&mut self.memo.session_hectares, [session, rate])
                .then(|| labels::format_session_hectares(session, rate)),
            seed_usage: changed_floats(&mut self.memo.seed_usage, [seed_usage])
                .then(|| labels::format_seed_usage(seed_usage)),
        }
    }

    /// Mode label and mode-dependent button states
    pub fn compute_tram_line_mode(
        &mut self,
        mode: TramLineMode,
        locale: &dyn Localization,
    ) -> Option<ModeDisplay> {
        if !changed(&mut self.memo.tram_line_mode, mode) {
            return None;
        }
        Some(ModeDisplay {
            label: locale.text(mode.label_key()),
            counting_buttons_enabled: mode.counting_buttons_enabled(),
            distance_buttons_enabled: mode.distance_buttons_enabled(),
        })
    }

    /// On/off icons of the switch buttons
    pub fn compute_toggles(
        &mut self,
        state: &ImplementState,
        fertilizer_available: bool,
    ) -> Vec<HudMutation> {
        let mut mutations = Vec::new();

        if changed(&mut self.memo.pre_markers_active, state.pre_markers_active) {
            mutations.push(HudMutation::ToggleIcon {
                toggle: Toggle::PreMarkers,
                on: state.pre_markers_active,
            });
        }
        if changed(&mut self.memo.sound_enabled, state.sound_enabled) {
            mutations.push(HudMutation::ToggleIcon {
                toggle: Toggle::Sound,
                on: state.sound_enabled,
            });
        }
        if changed(&mut self.memo.fertilizer_available, fertilizer_available) {
            mutations.push(HudMutation::ToggleEnabled {
                toggle: Toggle::Fertilizer,
                enabled: fertilizer_available,
            });
        }
        if changed(&mut self.memo.fertilizer_enabled, state.fertilizer_enabled) {
            mutations.push(HudMutation::ToggleIcon {
                toggle: Toggle::Fertilizer,
                on: state.fertilizer_enabled,
            });
        }

        mutations
    }

    /// Poll the host once and collect every display change
    pub fn update(&mut self, host: &dyn ImplementHost, locale: &dyn Localization) -> HudUpdate {
        let state = host.snapshot();
        let mut update = HudUpdate::default();

        // Segment bar: tram lines and shutoff share one coloring pass
        for (index, color) in self.refresh_segments(state.shutoff_mode, state.tram_lines_active) {
            update.push(HudMutation::SegmentColor { index, color });
        }

        if let Some(enabled) = self.compute_shutoff_control(
            host.can_activate_half_side_shutoff(),
            state.tram_lines_active,
        ) {
            update.push(HudMutation::ShutoffControlEnabled { enabled });
        }

        let ridge_state = resolve_ridge_marker_state(
            host.ridge_marker_count(),
            host.ridge_marker_state(),
            host,
            self.config.max_attachment_depth,
        );
        if let Some((left, right)) = self.compute_ridge_marker_icons(ridge_state) {
            update.push(HudMutation::RidgeMarkerIcons { left, right });
        }

        if let Some(display) = self.compute_tram_line_mode(state.tram_line_mode, locale) {
            update.push(HudMutation::TramLineModeLabel { text: display.label });
            update.push(HudMutation::CountingButtonsEnabled {
                enabled: display.counting_buttons_enabled,
            });
            update.push(HudMutation::DistanceButtonsEnabled {
                enabled: display.distance_buttons_enabled,
            });
        }

        if let Some(counter) = self.compute_lane_counter(
            state.tram_line_distance,
            state.working_width,
            state.current_lane,
        ) {
            update.push(HudMutation::LaneCounterLabel { text: counter.label });
        }

        let summary = self.compute_hectare_summary(
            state.total_hectares,
            state.session_hectares,
            state.hectares_per_hour,
            state.seed_usage,
        );
        if let Some(text) = summary.total {
            update.push(HudMutation::TotalHectaresLabel { text });
        }
        if let Some(text) = summary.session {
            update.push(HudMutation::SessionHectaresLabel { text });
        }
        if let Some(text) = summary.seed_usage {
            update.push(HudMutation::SeedUsageLabel { text });
        }

        update.mutations.extend(self.compute_toggles(&state, host.has_fertilizer()));

        if !update.is_empty() {
            log::trace!("Tick produced {} mutation(s)", update.len());
        }
        update
    }
}
