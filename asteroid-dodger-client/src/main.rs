//! Asteroid Dodger - side-scrolling arcade shooter
//!
//! Fly the ship, shoot or dodge the incoming rocks, grab power-ups and
//! survive the boss waves. The simulation runs in `asteroid-dodger-core`;
//! this crate draws it, plays sounds and runs the menus.

mod audio;
mod game;
mod records;
mod ui;

use bevy::prelude::*;
use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::render::camera::ScalingMode;
use bevy::window::WindowResolution;

use asteroid_dodger::core::constants::{SCREEN_WIDTH, SCREEN_HEIGHT};
use asteroid_dodger::{GameConfig, TICK_RATE, VERSION};

use audio::SoundPlugin;
use game::GamePlugin;
use records::Records;
use ui::UiPlugin;

/// Game states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    MainMenu,
    HighScores,
    Options,
    Playing,
    Paused,
    GameOver,
}

/// Marker for the game camera (screen shake moves it)
#[derive(Component)]
pub struct MainCamera;

fn main() {
    let config = GameConfig::from_env();
    config.ensure_data_dir();
    let asset_dir = config.asset_dir.to_string_lossy().into_owned();
    let records = Records::load(config);

    App::new()
        // Bevy defaults with a fixed-size window
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Ship Obstacle Avoidance".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: asset_dir,
                    ..default()
                }),
        )
        // One simulation tick per fixed step
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE as f64))
        .insert_resource(records)
        // Game state
        .init_state::<AppState>()
        // Our plugins
        .add_plugins((
            GamePlugin,
            SoundPlugin,
            UiPlugin,
        ))
        // Startup
        .add_systems(Startup, setup_2d_camera)
        .run();
}

/// 2D camera with bloom for the glowing vector look
fn setup_2d_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            hdr: true,  // Required for bloom
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        OrthographicProjection {
            // The playfield is always exactly 800 x 600 units
            scaling_mode: ScalingMode::Fixed {
                width: SCREEN_WIDTH,
                height: SCREEN_HEIGHT,
            },
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: 0.25,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.9,
            high_pass_frequency: 1.0,
            prefilter: bevy::core_pipeline::bloom::BloomPrefilter {
                threshold: 0.8,
                threshold_softness: 0.3,
            },
            ..default()
        },
        MainCamera,
    ));

    info!("Asteroid Dodger v{} initialized", VERSION);
}
