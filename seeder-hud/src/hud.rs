//! HUD lifecycle
//!
//! The HUD lives for the whole game session but only tracks display state
//! while a vehicle is attached. Attaching creates a fresh tracker, so the
//! first tick after attach redraws everything; detaching drops it.

use crate::commands::{dispatch, Dispatch, HudCommand};
use crate::config::TrackerConfig;
use crate::host::{ImplementHost, VehicleCommands};
use crate::labels::Localization;
use crate::tracker::VisualizationStateTracker;
use crate::types::{HudUpdate, Result};

/// Seeder HUD bound to at most one vehicle at a time
#[derive(Debug)]
pub struct Hud {
    config: TrackerConfig,
    tracker: Option<VisualizationStateTracker>,
}

impl Hud {
    /// Create a detached HUD
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tracker: None,
        })
    }

    pub fn is_attached(&self) -> bool {
        self.tracker.is_some()
    }

    pub fn tracker(&self) -> Option<&VisualizationStateTracker> {
        self.tracker.as_ref()
    }

    /// Start tracking a vehicle, discarding any previous display state
    pub fn attach(&mut self) -> Result<()> {
        self.tracker = Some(self.new_tracker()?);
        Ok(())
    }

    fn new_tracker(&self) -> Result<VisualizationStateTracker> {
        log::info!("Attaching seeder HUD");
        VisualizationStateTracker::new(self.config.clone())
    }

    /// Stop tracking; a no-op when nothing is attached
    pub fn detach(&mut self) {
        if self.tracker.take().is_some() {
            log::info!("Detaching seeder HUD");
        }
    }

    /// Per-frame update
    ///
    /// An absent vehicle detaches the HUD and yields an empty update. A
    /// present vehicle while detached attaches first.
    pub fn update(
        &mut self,
        host: Option<&dyn ImplementHost>,
        locale: &dyn Localization,
    ) -> Result<HudUpdate> {
        let Some(host) = host else {
            self.detach();
            return Ok(HudUpdate::default());
        };

        let tracker = match self.tracker.take() {
            Some(tracker) => tracker,
            None => self.new_tracker()?,
        };
        Ok(self.tracker.insert(tracker).update(host, locale))
    }

    /// Forward a button press; does nothing without a vehicle
    pub fn handle_command(
        &mut self,
        command: HudCommand,
        vehicle: Option<&mut dyn VehicleCommands>,
    ) -> Option<Dispatch> {
        let vehicle = vehicle?;
        if !self.is_attached() {
            log::debug!("Dropping {:?}: HUD not attached", command);
            return None;
        }
        Some(dispatch(command, vehicle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::AttachmentNode;
    use crate::labels::DefaultLocalization;
    use crate::types::{HudMutation, ImplementState, TramLineMode};

    struct Seeder(ImplementState);

    impl AttachmentNode for Seeder {}

    impl ImplementHost for Seeder {
        fn snapshot(&self) -> ImplementState {
            self.0.clone()
        }
    }

    #[test]
    fn test_absent_vehicle_detaches() {
        let mut hud = Hud::new(TrackerConfig::default()).unwrap();
        let seeder = Seeder(ImplementState::default());

        let update = hud.update(Some(&seeder), &DefaultLocalization).unwrap();
        assert!(hud.is_attached());
        assert!(!update.is_empty());

        let update = hud.update(None, &DefaultLocalization).unwrap();
        assert!(update.is_empty());
        assert!(!hud.is_attached());
    }

    #[test]
    fn test_update_attaches_detached_hud() {
        let mut hud = Hud::new(TrackerConfig::default()).unwrap();
        assert!(!hud.is_attached());

        let seeder = Seeder(ImplementState::default());
        let update = hud.update(Some(&seeder), &DefaultLocalization).unwrap();
        assert!(hud.is_attached());
        assert!(update.mutations.contains(&HudMutation::LaneCounterLabel {
            text: "1 / 3".to_string()
        }));

        // Same tracker on the next tick, so nothing is redrawn
        assert!(hud.update(Some(&seeder), &DefaultLocalization).unwrap().is_empty());
        assert!(hud.is_attached());
    }

    #[test]
    fn test_reattach_redraws_everything() {
        let mut hud = Hud::new(TrackerConfig::default()).unwrap();
        let seeder = Seeder(ImplementState {
            tram_line_mode: TramLineMode::Auto,
            ..ImplementState::default()
        });

        let first = hud.update(Some(&seeder), &DefaultLocalization).unwrap();
        assert!(hud.update(Some(&seeder), &DefaultLocalization).unwrap().is_empty());

        hud.detach();
        hud.attach().unwrap();
        let again = hud.update(Some(&seeder), &DefaultLocalization).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_command_without_vehicle_is_noop() {
        let mut hud = Hud::new(TrackerConfig::default()).unwrap();
        assert_eq!(hud.handle_command(HudCommand::ToggleSound, None), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Hud::new(TrackerConfig::new().with_segment_count(3)).is_err());
    }
}
