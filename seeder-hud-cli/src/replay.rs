//! Scenario replay
//!
//! Drives the HUD through a scenario tick by tick: apply state overrides,
//! press the tick's buttons, account for worked area, then poll the HUD and
//! record what it would redraw.

use crate::config::{AppConfig, TickConfig};
use crate::vehicle::SimVehicle;
use anyhow::{Context, Result};
use seeder_hud::{
    DefaultLocalization, Dispatch, Hud, HudCommand, HudMutation, ImplementHost, ImplementState,
    Localization, VehicleCommands,
};
use serde::Serialize;
use std::collections::HashMap;

/// Result of one button press
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub command: HudCommand,
    /// `None` when the HUD had no vehicle
    pub dispatch: Option<Dispatch>,
}

/// Everything that happened in one tick
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: usize,
    pub attached: bool,
    pub commands: Vec<CommandOutcome>,
    pub mutations: Vec<HudMutation>,
}

/// Aggregate numbers over the whole replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub ticks: usize,
    pub total_mutations: usize,
    /// Ticks that needed no redraw at all
    pub quiet_ticks: usize,
    pub ignored_commands: usize,
    pub final_state: ImplementState,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub ticks: Vec<TickReport>,
    pub summary: ReplaySummary,
}

/// Labels from the scenario, falling back to the built-in English table
struct ScenarioLabels<'a> {
    overrides: &'a HashMap<String, String>,
}

impl Localization for ScenarioLabels<'_> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.lookup(key).or_else(|| DefaultLocalization.lookup(key))
    }
}

/// Replay a whole scenario
pub fn run(config: &AppConfig) -> Result<ReplayReport> {
    let mut hud = Hud::new(config.tracker.clone()).context("Failed to create HUD")?;
    let mut vehicle =
        SimVehicle::from_config(&config.vehicle).context("Invalid [vehicle] section")?;
    let locale = ScenarioLabels { overrides: &config.labels };

    let mut ticks = Vec::new();
    for (index, tick) in config.ticks.iter().enumerate() {
        for _ in 0..tick.repeat {
            let report = run_tick(ticks.len(), tick, &mut hud, &mut vehicle, &locale)
                .with_context(|| format!("Tick #{} failed", index + 1))?;
            ticks.push(report);
        }
    }

    let summary = ReplaySummary {
        ticks: ticks.len(),
        total_mutations: ticks.iter().map(|t| t.mutations.len()).sum(),
        quiet_ticks: ticks.iter().filter(|t| t.mutations.is_empty()).count(),
        ignored_commands: ticks
            .iter()
            .flat_map(|t| &t.commands)
            .filter(|c| !matches!(c.dispatch, Some(Dispatch::Forwarded)))
            .count(),
        final_state: vehicle.snapshot(),
    };

    log::info!(
        "Replayed {} tick(s), {} mutation(s)",
        summary.ticks,
        summary.total_mutations
    );

    Ok(ReplayReport { ticks, summary })
}

fn run_tick(
    number: usize,
    tick: &TickConfig,
    hud: &mut Hud,
    vehicle: &mut SimVehicle,
    locale: &dyn Localization,
) -> Result<TickReport> {
    tick.set.apply(&mut vehicle.state);
    vehicle.check()?;

    let mut commands = Vec::with_capacity(tick.commands.len());
    for command in &tick.commands {
        let target: Option<&mut dyn VehicleCommands> = if tick.detached {
            None
        } else {
            Some(&mut *vehicle)
        };
        let dispatch = hud.handle_command(*command, target);
        log::debug!("Tick {}: {:?} -> {:?}", number, command, dispatch);
        commands.push(CommandOutcome { command: *command, dispatch });
    }

    vehicle.work(tick.worked_hectares);

    let host: Option<&dyn ImplementHost> = if tick.detached { None } else { Some(&*vehicle) };
    let update = hud.update(host, locale)?;

    Ok(TickReport {
        tick: number,
        attached: hud.is_attached(),
        commands,
        mutations: update.mutations,
    })
}
