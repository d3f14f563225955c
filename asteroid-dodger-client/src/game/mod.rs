//! Game module - drives the core simulation and draws it
//!
//! The simulation owns all gameplay state. Bevy only feeds it one
//! `InputFrame` per fixed step and reacts to the events it returns.

use bevy::prelude::*;

use asteroid_dodger::core::constants::{SCREEN_WIDTH, SCREEN_HEIGHT};
use asteroid_dodger::{GameEvent, GameState, InputRecording, Vec2 as SimVec2, tick};

use crate::AppState;
use crate::records::Records;

pub mod background;
pub mod effects;
pub mod input;
pub mod render;

pub use input::FireLatch;

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .insert_resource(Session::new(0))
            .init_resource::<FireLatch>()
            .init_resource::<effects::ScreenShake>()

            // Events
            .add_event::<SimEvent>()

            // Starfield runs in every state
            .add_systems(Startup, (background::setup_background, render::setup_boss_tint))
            .add_systems(FixedUpdate, background::drift_background)

            // Core gameplay (fixed timestep, one sim tick per step)
            .add_systems(FixedUpdate, (
                sim_tick,
                effects::spawn_event_effects,
                effects::spawn_ambient_particles,
            ).chain().run_if(in_state(AppState::Playing)))

            // Effects keep animating under menus but freeze while paused
            .add_systems(FixedUpdate, (
                effects::update_particles,
                effects::update_explosions,
                effects::update_score_popups,
                effects::update_distortion_waves,
                effects::update_screen_shake,
            ).run_if(not(in_state(AppState::Paused))))

            // Input latch (variable timestep, so no press is missed)
            .add_systems(Update, (
                input::latch_fire,
                pause_on_escape,
            ).run_if(in_state(AppState::Playing)))

            // Drawing
            .add_systems(Update, (
                render::draw_lasers,
                render::draw_asteroids,
                render::draw_powerups,
                render::draw_boss,
                render::draw_ship,
                effects::draw_explosions,
                effects::draw_distortion_waves,
            ).run_if(session_visible))
            .add_systems(Update, (
                render::update_boss_tint,
                render::sync_pickup_labels,
                effects::apply_screen_shake,
            ))

            // Leaving the session for the menu clears leftover effects
            .add_systems(OnEnter(AppState::MainMenu), effects::clear_effects);
    }
}

/// Sessions are drawn while playing, paused or on the game-over screen.
fn session_visible(state: Res<State<AppState>>) -> bool {
    matches!(
        state.get(),
        AppState::Playing | AppState::Paused | AppState::GameOver
    )
}

// ============================================================================
// RESOURCES
// ============================================================================

/// The running session and its input log.
#[derive(Resource)]
pub struct Session {
    pub state: GameState,
    pub recording: InputRecording,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            recording: InputRecording::new(seed),
        }
    }

    /// Fresh session with a new seed.
    pub fn start(&mut self, seed: u64) {
        info!("Starting session with seed {}", seed);
        *self = Self::new(seed);
    }

    /// Play again, continuing the current random stream.
    pub fn restart(&mut self) {
        self.state.reset();
        self.recording = InputRecording::new(self.state.seed);
        info!("Session restarted");
    }
}

/// Start a session from the menu.
pub fn start_session(session: &mut Session, records: &Records) {
    session.start(records.config.session_seed());
}

// ============================================================================
// EVENTS
// ============================================================================

/// A simulation event, forwarded to effects, audio and UI.
#[derive(Event, Clone, Debug)]
pub struct SimEvent(pub GameEvent);

// ============================================================================
// COORDINATES
// ============================================================================

/// Simulation screen space (origin top-left, +y down) to world space
/// (origin centre, +y up).
pub fn to_world(p: SimVec2) -> Vec2 {
    Vec2::new(p.x - SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - p.y)
}

// ============================================================================
// SIMULATION
// ============================================================================

/// Run one simulation tick with the current keyboard state.
fn sim_tick(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut latch: ResMut<FireLatch>,
    mut session: ResMut<Session>,
    mut sim_events: EventWriter<SimEvent>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let frame = input::read_input(&keyboard, latch.take());
    session.recording.record(frame);

    let result = tick(&mut session.state, frame);
    for event in result.events {
        sim_events.send(SimEvent(event));
    }

    if result.game_over {
        info!(
            "Game over at frame {} with score {} ({} input changes recorded)",
            session.state.frame,
            session.state.score,
            session.recording.deltas().len()
        );
        next_state.set(AppState::GameOver);
    }
}

fn pause_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(AppState::Paused);
    }
}
