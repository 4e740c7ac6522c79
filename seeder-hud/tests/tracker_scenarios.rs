// Multi-tick scenarios against the public API
use seeder_hud::{
    dispatch, AttachmentNode, DefaultLocalization, Dispatch, Hud, HudCommand, HudMutation,
    ImplementHost, ImplementState, MarkerIcon, RidgeMarkerState, SegmentColor, ShutoffMode,
    TrackerConfig, TramLineMode, VehicleCommands, VisualizationStateTracker,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Cultivator {
    markers: RidgeMarkerState,
}

impl AttachmentNode for Cultivator {
    fn ridge_marker_count(&self) -> usize {
        2
    }

    fn ridge_marker_state(&self) -> RidgeMarkerState {
        self.markers
    }
}

struct Drill {
    state: ImplementState,
    parent: Option<Cultivator>,
}

impl Drill {
    fn new() -> Self {
        Self {
            state: ImplementState {
                tram_line_distance: 24.0,
                working_width: 6.0,
                current_lane: 1,
                ..ImplementState::default()
            },
            parent: None,
        }
    }
}

impl AttachmentNode for Drill {
    fn ridge_marker_count(&self) -> usize {
        self.state.ridge_marker_count
    }

    fn ridge_marker_state(&self) -> RidgeMarkerState {
        self.state.ridge_marker_state
    }

    fn attacher(&self) -> Option<&dyn AttachmentNode> {
        self.parent.as_ref().map(|p| p as &dyn AttachmentNode)
    }
}

impl ImplementHost for Drill {
    fn snapshot(&self) -> ImplementState {
        self.state.clone()
    }

    fn can_activate_half_side_shutoff(&self) -> Option<bool> {
        Some(true)
    }
}

impl VehicleCommands for Drill {
    fn increase_tram_line_distance(&mut self) {
        self.state.tram_line_distance += self.state.working_width;
    }
    fn decrease_tram_line_distance(&mut self) {
        self.state.tram_line_distance -= self.state.working_width;
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
    fn toggle_fertilizer(&mut self) {}
    fn reset_session_hectares(&mut self) {
        self.state.session_hectares = 0.0;
    }
    fn increment_passed_lanes(&mut self) {
        self.state.current_lane += 1;
    }
    fn decrement_passed_lanes(&mut self) {
        self.state.current_lane -= 1;
    }
}

#[test]
fn ridge_marker_state_comes_from_parent() {
    init_logging();
    let mut tracker = VisualizationStateTracker::new(TrackerConfig::default()).unwrap();
    let mut drill = Drill::new();
    drill.parent = Some(Cultivator { markers: RidgeMarkerState::Left });

    let update = tracker.update(&drill, &DefaultLocalization);
    assert!(update.mutations.contains(&HudMutation::RidgeMarkerIcons {
        left: MarkerIcon::Lowered,
        right: MarkerIcon::Raised,
    }));
    assert_eq!(tracker.memo().ridge_marker_state, Some(RidgeMarkerState::Left));

    // Parent flips to the other side
    drill.parent = Some(Cultivator { markers: RidgeMarkerState::Right });
    let update = tracker.update(&drill, &DefaultLocalization);
    assert_eq!(
        update.mutations,
        vec![HudMutation::RidgeMarkerIcons {
            left: MarkerIcon::Raised,
            right: MarkerIcon::Lowered,
        }]
    );

    // Unhitched: no marker at all
    drill.parent = None;
    let update = tracker.update(&drill, &DefaultLocalization);
    assert_eq!(
        update.mutations,
        vec![HudMutation::RidgeMarkerIcons {
            left: MarkerIcon::Raised,
            right: MarkerIcon::Raised,
        }]
    );
}

#[test]
fn commands_are_reflected_on_next_tick() {
    init_logging();
    let mut tracker = VisualizationStateTracker::new(TrackerConfig::default()).unwrap();
    let mut drill = Drill::new();
    drill.state.tram_line_mode = TramLineMode::Semi;
    tracker.update(&drill, &DefaultLocalization);

    assert_eq!(dispatch(HudCommand::IncrementPassedLanes, &mut drill), Dispatch::Forwarded);
    let update = tracker.update(&drill, &DefaultLocalization);
    assert_eq!(
        update.mutations,
        vec![HudMutation::LaneCounterLabel { text: "2 / 4".to_string() }]
    );

    dispatch(HudCommand::IncreaseTramLineMode, &mut drill);
    let update = tracker.update(&drill, &DefaultLocalization);
    assert_eq!(
        update.mutations,
        vec![
            HudMutation::TramLineModeLabel { text: "Automatic".to_string() },
            HudMutation::CountingButtonsEnabled { enabled: false },
            HudMutation::DistanceButtonsEnabled { enabled: true },
        ]
    );
}

#[test]
fn shutoff_and_tram_lines_are_mutually_exclusive() {
    init_logging();
    let mut hud = Hud::new(TrackerConfig::default()).unwrap();
    let mut drill = Drill::new();
    hud.update(Some(&drill), &DefaultLocalization).unwrap();

    hud.handle_command(HudCommand::CycleHalfSideShutoff, Some(&mut drill));
    let update = hud.update(Some(&drill), &DefaultLocalization).unwrap();
    assert_eq!(update.segment_changes().len(), 10);
    assert!(update
        .segment_changes()
        .iter()
        .all(|(i, c)| *i >= 10 && *c == SegmentColor::Highlight));

    // The host starts a tram line pass
    drill.state.tram_lines_active = true;
    let update = hud.update(Some(&drill), &DefaultLocalization).unwrap();
    assert!(update.mutations.contains(&HudMutation::ShutoffControlEnabled { enabled: false }));
    let tracker = hud.tracker().unwrap();
    assert_eq!(tracker.segments().highlighted(), vec![7, 8, 10, 11]);
    assert!(!tracker.shutoff_control_enabled());

    // Cycling is refused while tram lines are active
    let result = hud.handle_command(HudCommand::CycleHalfSideShutoff, Some(&mut drill));
    assert!(matches!(result, Some(Dispatch::Ignored(_))));
    assert_eq!(drill.state.shutoff_mode, ShutoffMode::Left);
}
