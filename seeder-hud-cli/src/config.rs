//! Scenario loading and parsing
//!
//! A scenario describes a simulated seeder (initial state, capabilities and
//! attachment chain) and a list of ticks. Each tick may override parts of the
//! implement state, press HUD buttons, and add worked area.

use anyhow::{Context, Result};
use seeder_hud::{HudCommand, ImplementState, RidgeMarkerState, ShutoffMode, TrackerConfig, TramLineMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main scenario configuration (loaded from a TOML file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Localization overrides (key → text)
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub ticks: Vec<TickConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VehicleConfig {
    /// Initial implement state
    #[serde(default)]
    pub state: ImplementState,
    #[serde(default)]
    pub shutoff: ShutoffCapability,
    #[serde(default)]
    pub has_fertilizer: bool,
    /// Seed consumed per worked hectare
    #[serde(default = "default_seed_rate")]
    pub seed_liters_per_hectare: f64,
    /// Attachment chain, nearest attacher first
    #[serde(default)]
    pub attachers: Vec<AttacherConfig>,
}

/// Half-side shutoff support of the simulated implement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShutoffCapability {
    #[default]
    Available,
    /// Fitted, but refused in the current configuration
    Unavailable,
    /// Not fitted at all
    Unsupported,
}

impl ShutoffCapability {
    pub fn as_option(self) -> Option<bool> {
        match self {
            ShutoffCapability::Available => Some(true),
            ShutoffCapability::Unavailable => Some(false),
            ShutoffCapability::Unsupported => None,
        }
    }
}

fn default_seed_rate() -> f64 {
    150.0
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            state: ImplementState::default(),
            shutoff: ShutoffCapability::default(),
            has_fertilizer: false,
            seed_liters_per_hectare: default_seed_rate(),
            attachers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttacherConfig {
    pub name: String,
    #[serde(default)]
    pub ridge_markers: usize,
    #[serde(default)]
    pub ridge_marker_state: RidgeMarkerState,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TickConfig {
    /// Run this tick several times (default 1)
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    /// Vehicle gone (player left it); the HUD detaches
    #[serde(default)]
    pub detached: bool,
    #[serde(default)]
    pub set: StateOverride,
    #[serde(default)]
    pub commands: Vec<HudCommand>,
    /// Area worked during this tick, in hectares
    #[serde(default)]
    pub worked_hectares: f64,
}

fn default_repeat() -> usize {
    1
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            repeat: default_repeat(),
            detached: false,
            set: StateOverride::default(),
            commands: Vec::new(),
            worked_hectares: 0.0,
        }
    }
}

/// Partial implement state; only the given fields are applied
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StateOverride {
    pub shutoff_mode: Option<ShutoffMode>,
    pub tram_lines_active: Option<bool>,
    pub tram_line_mode: Option<TramLineMode>,
    pub tram_line_distance: Option<f64>,
    pub working_width: Option<f64>,
    pub current_lane: Option<i32>,
    pub ridge_marker_state: Option<RidgeMarkerState>,
    pub ridge_marker_count: Option<usize>,
    pub hectares_per_hour: Option<f64>,
    pub pre_markers_active: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub fertilizer_enabled: Option<bool>,
}

impl StateOverride {
    pub fn apply(&self, state: &mut ImplementState) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(value) = self.$field {
                    state.$field = value;
                })*
            };
        }
        set!(
            shutoff_mode,
            tram_lines_active,
            tram_line_mode,
            tram_line_distance,
            working_width,
            current_lane,
            ridge_marker_state,
            ridge_marker_count,
            hectares_per_hour,
            pre_markers_active,
            sound_enabled,
            fertilizer_enabled
        );
    }
}

/// Load a scenario from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse scenario file: {:?}", path))?;

    config
        .tracker
        .validate()
        .with_context(|| format!("Invalid [tracker] section in {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [tracker]
            segment_count = 20

            [output]
            format = "json"

            [labels]
            tramline_mode_auto = "Automatik"

            [vehicle]
            shutoff = "unavailable"
            has_fertilizer = true

            [vehicle.state]
            working_width = 6.0
            tram_line_distance = 24.0
            tram_line_mode = "semi"

            [[vehicle.attachers]]
            name = "cultivator"
            ridge_markers = 2
            ridge_marker_state = "left"

            [[ticks]]
            commands = ["cycle_half_side_shutoff", "increment_passed_lanes"]

            [[ticks]]
            repeat = 3
            worked_hectares = 0.1
            [ticks.set]
            tram_lines_active = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.vehicle.shutoff.as_option(), Some(false));
        assert_eq!(config.labels.len(), 1);
        assert_eq!(config.vehicle.state.tram_line_mode, TramLineMode::Semi);
        assert_eq!(config.vehicle.state.tram_line_distance, 24.0);
        assert_eq!(config.vehicle.attachers[0].ridge_marker_state, RidgeMarkerState::Left);
        assert_eq!(config.ticks.len(), 2);
        assert_eq!(config.ticks[0].commands[0], HudCommand::CycleHalfSideShutoff);
        assert_eq!(config.ticks[0].repeat, 1);
        assert_eq!(config.ticks[1].repeat, 3);
        assert_eq!(config.ticks[1].set.tram_lines_active, Some(true));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.tracker, TrackerConfig::default());
        assert_eq!(config.output.format, OutputFormat::Txt);
        assert_eq!(config.vehicle.shutoff, ShutoffCapability::Available);
        assert!(config.ticks.is_empty());
    }

    #[test]
    fn test_state_override_applies_only_given_fields() {
        let mut state = ImplementState::default();
        let overrides = StateOverride {
            shutoff_mode: Some(ShutoffMode::Right),
            current_lane: Some(3),
            ..StateOverride::default()
        };
        overrides.apply(&mut state);
        assert_eq!(state.shutoff_mode, ShutoffMode::Right);
        assert_eq!(state.current_lane, 3);
        assert_eq!(state.working_width, ImplementState::default().working_width);
    }

    #[test]
    fn test_load_config_rejects_bad_tracker() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tracker]\nsegment_count = 5").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("segment count"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read scenario file"));
    }
}
