//! Main menu, high scores, options and pause screens.

use bevy::prelude::*;

use crate::game::{start_session, Session};
use crate::records::Records;
use crate::AppState;

use super::{
    label, navigation_delta, screen_root, spawn_menu_item, step_selection, MenuItem,
    MenuSelection, OptionsReturn, GAME_OVER_COLOR, HIGHLIGHT_COLOR, HINT_COLOR, TEXT_COLOR,
};

#[derive(Component)]
pub struct MainMenuUI;

#[derive(Component)]
pub struct HighScoresUI;

#[derive(Component)]
pub struct OptionsUI;

#[derive(Component)]
pub struct PauseUI;

/// Filled part of the volume slider.
#[derive(Component)]
pub struct VolumeFill;

/// Main menu entries, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainMenuAction {
    Play,
    HighScores,
    Options,
    Exit,
}

impl MainMenuAction {
    pub const ALL: [MainMenuAction; 4] = [
        MainMenuAction::Play,
        MainMenuAction::HighScores,
        MainMenuAction::Options,
        MainMenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MainMenuAction::Play => "Play",
            MainMenuAction::HighScores => "Highscores",
            MainMenuAction::Options => "Options",
            MainMenuAction::Exit => "Exit",
        }
    }
}

/// Pause menu entries, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    Options,
    MainMenu,
}

impl PauseAction {
    pub const ALL: [PauseAction; 3] = [PauseAction::Resume, PauseAction::Options, PauseAction::MainMenu];

    pub fn label(self) -> &'static str {
        match self {
            PauseAction::Resume => "Resume",
            PauseAction::Options => "Options",
            PauseAction::MainMenu => "Main Menu",
        }
    }
}

const OPTION_ROWS: usize = 2;
const VOLUME_ROW: usize = 0;
const MUTE_ROW: usize = 1;

fn hint(parent: &mut ChildBuilder, text: &str) {
    parent.spawn(label(text, 16.0, HINT_COLOR, 8.0));
}

// ============================================================================
// MAIN MENU
// ============================================================================

pub fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((screen_root(0.0), MainMenuUI))
        .with_children(|parent| {
            parent.spawn(label("SPACE SHOOTER", 72.0, TEXT_COLOR, 10.0));
            parent.spawn(label(
                "Blast Asteroids  Collect Power-Ups  Battle Bosses",
                18.0,
                TEXT_COLOR,
                50.0,
            ));

            for (index, action) in MainMenuAction::ALL.iter().enumerate() {
                spawn_menu_item(parent, index, action.label());
            }

            parent.spawn(Node {
                height: Val::Px(40.0),
                ..default()
            });
            hint(parent, "W/S or Up/Down Arrow Keys to navigate  ENTER to select");
        });
}

pub fn main_menu_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<MenuSelection>,
    mut session: ResMut<Session>,
    records: Res<Records>,
    mut options_return: ResMut<OptionsReturn>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    selection.0 = step_selection(selection.0, MainMenuAction::ALL.len(), navigation_delta(&keyboard));

    if !keyboard.just_pressed(KeyCode::Enter) {
        return;
    }

    match MainMenuAction::ALL[selection.0] {
        MainMenuAction::Play => {
            start_session(&mut session, &records);
            next_state.set(AppState::Playing);
        }
        MainMenuAction::HighScores => next_state.set(AppState::HighScores),
        MainMenuAction::Options => {
            options_return.0 = AppState::MainMenu;
            next_state.set(AppState::Options);
        }
        MainMenuAction::Exit => {
            info!("Exit selected");
            exit.send(AppExit::Success);
        }
    }
}

// ============================================================================
// HIGH SCORES
// ============================================================================

pub fn setup_high_scores(mut commands: Commands, records: Res<Records>) {
    commands
        .spawn((screen_root(0.0), HighScoresUI))
        .with_children(|parent| {
            parent.spawn(label("HIGH SCORES", 64.0, HIGHLIGHT_COLOR, 30.0));

            if records.high_scores.is_empty() {
                parent.spawn(label("No high scores yet!", 32.0, TEXT_COLOR, 30.0));
            }

            for (rank, entry) in records.high_scores.entries().iter().enumerate() {
                parent
                    .spawn(Node {
                        width: Val::Px(460.0),
                        justify_content: JustifyContent::SpaceBetween,
                        margin: UiRect::bottom(Val::Px(6.0)),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn(label(format!("{:>2}. {}", rank + 1, entry.name), 28.0, TEXT_COLOR, 0.0));
                        row.spawn(label(entry.score.to_string(), 28.0, HIGHLIGHT_COLOR, 0.0));
                    });
            }

            parent.spawn(Node {
                height: Val::Px(30.0),
                ..default()
            });
            hint(parent, "Press ENTER or ESC to return");
        });
}

pub fn high_scores_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard.any_just_pressed([KeyCode::Escape, KeyCode::Enter]) {
        next_state.set(AppState::MainMenu);
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

pub fn volume_label(percent: u32) -> String {
    format!("Volume: {}%", percent)
}

pub fn mute_label(muted: bool) -> String {
    format!("Mute: {}", if muted { "ON" } else { "OFF" })
}

pub fn setup_options(mut commands: Commands, records: Res<Records>) {
    let settings = &records.settings;

    commands
        .spawn((screen_root(0.85), OptionsUI))
        .with_children(|parent| {
            parent.spawn(label("OPTIONS", 64.0, TEXT_COLOR, 40.0));

            spawn_menu_item(parent, VOLUME_ROW, &volume_label(settings.percent()));

            // Slider
            parent
                .spawn((
                    Node {
                        width: Val::Px(300.0),
                        height: Val::Px(20.0),
                        margin: UiRect::bottom(Val::Px(30.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BorderColor(TEXT_COLOR),
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.2)),
                ))
                .with_children(|slider| {
                    slider.spawn((
                        Node {
                            width: Val::Percent(settings.volume * 100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(HIGHLIGHT_COLOR),
                        VolumeFill,
                    ));
                });

            spawn_menu_item(parent, MUTE_ROW, &mute_label(settings.muted));

            parent.spawn(Node {
                height: Val::Px(40.0),
                ..default()
            });
            hint(parent, "W/S: Navigate  A/D: Adjust  ENTER: Toggle Mute");
            hint(parent, "Press ESC to return");
        });
}

pub fn options_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<MenuSelection>,
    mut records: ResMut<Records>,
    options_return: Res<OptionsReturn>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(options_return.0);
        return;
    }

    selection.0 = step_selection(selection.0, OPTION_ROWS, navigation_delta(&keyboard));

    let left = keyboard.any_just_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    let right = keyboard.any_just_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    let enter = keyboard.just_pressed(KeyCode::Enter);

    let changed = match selection.0 {
        VOLUME_ROW if left => {
            records.settings.decrease_volume();
            true
        }
        VOLUME_ROW if right => {
            records.settings.increase_volume();
            true
        }
        MUTE_ROW if left || right || enter => {
            records.settings.toggle_mute();
            true
        }
        _ => false,
    };

    if changed {
        debug!(
            "Audio settings: volume {}%, muted {}",
            records.settings.percent(),
            records.settings.muted
        );
        records.save_settings();
    }
}

pub fn update_options_labels(
    records: Res<Records>,
    mut items: Query<&mut MenuItem>,
    mut fill: Query<(&mut Node, &mut BackgroundColor), With<VolumeFill>>,
) {
    let settings = &records.settings;

    for mut item in items.iter_mut() {
        let wanted = match item.index {
            VOLUME_ROW => volume_label(settings.percent()),
            _ => mute_label(settings.muted),
        };
        if item.label != wanted {
            item.label = wanted;
        }
    }

    if let Ok((mut node, mut color)) = fill.get_single_mut() {
        node.width = Val::Percent(settings.volume * 100.0);
        color.0 = if settings.muted { GAME_OVER_COLOR } else { HIGHLIGHT_COLOR };
    }
}

// ============================================================================
// PAUSE
// ============================================================================

pub fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((screen_root(0.7), PauseUI))
        .with_children(|parent| {
            parent.spawn(label("PAUSED", 64.0, Color::srgb(0.4, 0.8, 1.0), 40.0));

            for (index, action) in PauseAction::ALL.iter().enumerate() {
                spawn_menu_item(parent, index, action.label());
            }

            parent.spawn(Node {
                height: Val::Px(40.0),
                ..default()
            });
            hint(parent, "W/S or Up/Down Arrow Keys  ENTER to select  ESC to resume");
        });
}

pub fn pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<MenuSelection>,
    mut options_return: ResMut<OptionsReturn>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(AppState::Playing);
        return;
    }

    selection.0 = step_selection(selection.0, PauseAction::ALL.len(), navigation_delta(&keyboard));

    if !keyboard.just_pressed(KeyCode::Enter) {
        return;
    }

    match PauseAction::ALL[selection.0] {
        PauseAction::Resume => next_state.set(AppState::Playing),
        PauseAction::Options => {
            options_return.0 = AppState::Paused;
            next_state.set(AppState::Options);
        }
        PauseAction::MainMenu => {
            info!("Session abandoned from pause menu");
            next_state.set(AppState::MainMenu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_order() {
        let labels: Vec<_> = MainMenuAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels, ["Play", "Highscores", "Options", "Exit"]);

        let labels: Vec<_> = PauseAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels, ["Resume", "Options", "Main Menu"]);
    }

    #[test]
    fn test_option_labels() {
        assert_eq!(volume_label(70), "Volume: 70%");
        assert_eq!(mute_label(true), "Mute: ON");
        assert_eq!(mute_label(false), "Mute: OFF");
    }
}
