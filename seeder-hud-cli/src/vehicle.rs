//! Simulated seeder used for scenario replay
//!
//! Stands in for the host simulation: holds the implement state, applies the
//! HUD's commands the way a real seeder would, and exposes its attachment
//! chain for ridge marker lookup.

use crate::config::{AttacherConfig, ShutoffCapability, VehicleConfig};
use seeder_hud::{
    labels, AttachmentNode, ImplementHost, ImplementState, RidgeMarkerState, ShutoffMode,
    TramLineMode, VehicleCommands,
};

/// Errors in the simulated vehicle's state
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Working width must be positive, got {0}")]
    InvalidWorkingWidth(f64),

    #[error("Tram line distance must not be negative, got {0}")]
    InvalidTramLineDistance(f64),
}

/// One link of the attachment chain
#[derive(Debug, Clone)]
pub struct SimAttacher {
    pub name: String,
    pub ridge_markers: usize,
    pub ridge_marker_state: RidgeMarkerState,
    pub parent: Option<Box<SimAttacher>>,
}

impl AttachmentNode for SimAttacher {
    fn ridge_marker_count(&self) -> usize {
        self.ridge_markers
    }

    fn ridge_marker_state(&self) -> RidgeMarkerState {
        self.ridge_marker_state
    }

    fn attacher(&self) -> Option<&dyn AttachmentNode> {
        self.parent.as_deref().map(|p| p as &dyn AttachmentNode)
    }
}

/// Build a nested chain from a nearest-first list
fn build_chain(attachers: &[AttacherConfig]) -> Option<Box<SimAttacher>> {
    attachers.iter().rev().fold(None, |parent, config| {
        Some(Box::new(SimAttacher {
            name: config.name.clone(),
            ridge_markers: config.ridge_markers,
            ridge_marker_state: config.ridge_marker_state,
            parent,
        }))
    })
}

/// The seeder the HUD is attached to during replay
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub state: ImplementState,
    pub shutoff: ShutoffCapability,
    pub has_fertilizer: bool,
    pub seed_liters_per_hectare: f64,
    pub attacher: Option<Box<SimAttacher>>,
}

impl SimVehicle {
    pub fn from_config(config: &VehicleConfig) -> Result<Self, ScenarioError> {
        let vehicle = Self {
            state: config.state.clone(),
            shutoff: config.shutoff,
            has_fertilizer: config.has_fertilizer,
            seed_liters_per_hectare: config.seed_liters_per_hectare,
            attacher: build_chain(&config.attachers),
        };
        vehicle.check()?;
        if vehicle.attacher.is_some() {
            log::debug!("Attachment chain: {}", vehicle.chain_names().join(" -> "));
        }
        Ok(vehicle)
    }

    /// Attacher names, nearest first
    pub fn chain_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = self.attacher.as_deref();
        while let Some(node) = current {
            names.push(node.name.as_str());
            current = node.parent.as_deref();
        }
        names
    }

    /// Check the preconditions the HUD relies on
    pub fn check(&self) -> Result<(), ScenarioError> {
        if !(self.state.working_width > 0.0) {
            return Err(ScenarioError::InvalidWorkingWidth(self.state.working_width));
        }
        if self.state.tram_line_distance < 0.0 {
            return Err(ScenarioError::InvalidTramLineDistance(self.state.tram_line_distance));
        }
        Ok(())
    }

    /// Account for worked area and the seed it consumed
    pub fn work(&mut self, hectares: f64) {
        if hectares <= 0.0 {
            return;
        }
        self.state.total_hectares += hectares;
        self.state.session_hectares += hectares;
        self.state.seed_usage += hectares * self.seed_liters_per_hectare;
    }

    /// Whole lanes in one tram line cycle, at least 1
    fn lane_count(&self) -> i32 {
        let lanes = labels::lanes_for_distance(self.state.tram_line_distance, self.state.working_width);
        (lanes.ceil() as i32).max(1)
    }
}

impl AttachmentNode for SimVehicle {
    fn ridge_marker_count(&self) -> usize {
        self.state.ridge_marker_count
    }

    fn ridge_marker_state(&self) -> RidgeMarkerState {
        self.state.ridge_marker_state
    }

    fn attacher(&self) -> Option<&dyn AttachmentNode> {
        self.attacher.as_deref().map(|p| p as &dyn AttachmentNode)
    }
}

impl ImplementHost for SimVehicle {
    fn snapshot(&self) -> ImplementState {
        self.state.clone()
    }

    fn can_activate_half_side_shutoff(&self) -> Option<bool> {
        self.shutoff.as_option()
    }

    fn has_fertilizer(&self) -> bool {
        self.has_fertilizer
    }
}

impl VehicleCommands for SimVehicle {
    fn increase_tram_line_distance(&mut self) {
        self.state.tram_line_distance += self.state.working_width;
    }

    fn decrease_tram_line_distance(&mut self) {
        let width = self.state.working_width;
        self.state.tram_line_distance = (self.state.tram_line_distance - width).max(width);
    }

    fn set_tram_line_mode(&mut self, mode: TramLineMode) {
        self.state.tram_line_mode = mode;
    }

    fn set_half_side_shutoff_mode(&mut self, mode: ShutoffMode) {
        self.state.shutoff_mode = mode;
    }

    fn toggle_pre_markers(&mut self) {
        self.state.pre_markers_active = !self.state.pre_markers_active;
    }

    fn toggle_sound(&mut self) {
        self.state.sound_enabled = !self.state.sound_enabled;
    }

    fn toggle_fertilizer(&mut self) {
        if self.has_fertilizer {
            self.state.fertilizer_enabled = !self.state.fertilizer_enabled;
        }
    }

    fn reset_session_hectares(&mut self) {
        self.state.session_hectares = 0.0;
    }

    fn increment_passed_lanes(&mut self) {
        let lanes = self.lane_count();
        self.state.current_lane = if self.state.current_lane >= lanes {
            1
        } else {
            self.state.current_lane + 1
        };
    }

    fn decrement_passed_lanes(&mut self) {
        let lanes = self.lane_count();
        self.state.current_lane = if self.state.current_lane <= 1 {
            lanes
        } else {
            self.state.current_lane - 1
        };
    }
}
