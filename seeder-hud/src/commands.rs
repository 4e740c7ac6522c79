//! User intents from the HUD buttons
//!
//! Commands are forwarded to the vehicle as-is. The only values computed
//! here are the next tram line mode (clamped) and the next shutoff mode on
//! the ring; everything else is the vehicle's business.

use crate::host::VehicleCommands;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A button press on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudCommand {
    IncreaseTramLineDistance,
    DecreaseTramLineDistance,
    IncreaseTramLineMode,
    DecreaseTramLineMode,
    CycleHalfSideShutoff,
    TogglePreMarkers,
    ToggleSound,
    ToggleFertilizer,
    ResetSessionHectares,
    IncrementPassedLanes,
    DecrementPassedLanes,
}

/// Why a command was not forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The implement has no half-side shutoff at all
    ShutoffUnsupported,
    /// The implement refuses shutoff in its current configuration
    ShutoffUnavailable,
    /// Half-side shutoff is locked while tram lines are active
    TramLinesActive,
    /// No fertilizer unit is fitted
    NoFertilizer,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::ShutoffUnsupported => write!(f, "half-side shutoff not supported"),
            IgnoreReason::ShutoffUnavailable => write!(f, "half-side shutoff unavailable"),
            IgnoreReason::TramLinesActive => write!(f, "tram lines active"),
            IgnoreReason::NoFertilizer => write!(f, "no fertilizer unit"),
        }
    }
}

/// Outcome of dispatching a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum Dispatch {
    Forwarded,
    Ignored(IgnoreReason),
}

/// Forward a command to the vehicle
///
/// Inapplicable commands are silently dropped (reported as `Ignored`), never
/// treated as errors.
pub fn dispatch(command: HudCommand, vehicle: &mut dyn VehicleCommands) -> Dispatch {
    let result = match command {
        HudCommand::IncreaseTramLineDistance => {
            vehicle.increase_tram_line_distance();
            Dispatch::Forwarded
        }
        HudCommand::DecreaseTramLineDistance => {
            vehicle.decrease_tram_line_distance();
            Dispatch::Forwarded
        }
        HudCommand::IncreaseTramLineMode => {
            let mode = vehicle.snapshot().tram_line_mode.increment();
            vehicle.set_tram_line_mode(mode);
            Dispatch::Forwarded
        }
        HudCommand::DecreaseTramLineMode => {
            let mode = vehicle.snapshot().tram_line_mode.decrement();
            vehicle.set_tram_line_mode(mode);
            Dispatch::Forwarded
        }
        HudCommand::CycleHalfSideShutoff => cycle_shutoff(vehicle),
        HudCommand::TogglePreMarkers => {
            vehicle.toggle_pre_markers();
            Dispatch::Forwarded
        }
        HudCommand::ToggleSound => {
            vehicle.toggle_sound();
            Dispatch::Forwarded
        }
        HudCommand::ToggleFertilizer => {
            if vehicle.has_fertilizer() {
                vehicle.toggle_fertilizer();
                Dispatch::Forwarded
            } else {
                Dispatch::Ignored(IgnoreReason::NoFertilizer)
            }
        }
        HudCommand::ResetSessionHectares => {
            vehicle.reset_session_hectares();
            Dispatch::Forwarded
        }
        HudCommand::IncrementPassedLanes => {
            vehicle.increment_passed_lanes();
            Dispatch::Forwarded
        }
        HudCommand::DecrementPassedLanes => {
            vehicle.decrement_passed_lanes();
            Dispatch::Forwarded
        }
    };

    if let Dispatch::Ignored(reason) = result {
        log::debug!("Ignoring {:?}: {}", command, reason);
    }
    result
}

fn cycle_shutoff(vehicle: &mut dyn VehicleCommands) -> Dispatch {
    let state = vehicle.snapshot();
    if state.tram_lines_active {
        return Dispatch::Ignored(IgnoreReason::TramLinesActive);
    }
    match vehicle.can_activate_half_side_shutoff() {
        None => Dispatch::Ignored(IgnoreReason::ShutoffUnsupported),
        Some(false) => Dispatch::Ignored(IgnoreReason::ShutoffUnavailable),
        Some(true) => {
            vehicle.set_half_side_shutoff_mode(state.shutoff_mode.cycle());
            Dispatch::Forwarded
        }
    }
}
