//! UI module - menus, game-over name entry and the in-game HUD
//!
//! Everything is keyboard driven: W/S or the arrows move the highlight,
//! Enter picks, Esc backs out.

use bevy::prelude::*;

use crate::AppState;

mod game_over;
mod hud;
mod menus;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<MenuSelection>()
            .init_resource::<OptionsReturn>()
            .init_resource::<game_over::NameEntry>()

            // Main menu
            .add_systems(OnEnter(AppState::MainMenu), (reset_selection, menus::setup_main_menu))
            .add_systems(OnExit(AppState::MainMenu), despawn_screen::<menus::MainMenuUI>)

            // High scores
            .add_systems(OnEnter(AppState::HighScores), menus::setup_high_scores)
            .add_systems(OnExit(AppState::HighScores), despawn_screen::<menus::HighScoresUI>)

            // Options
            .add_systems(OnEnter(AppState::Options), (reset_selection, menus::setup_options))
            .add_systems(OnExit(AppState::Options), despawn_screen::<menus::OptionsUI>)

            // Pause
            .add_systems(OnEnter(AppState::Paused), (reset_selection, menus::setup_pause_menu))
            .add_systems(OnExit(AppState::Paused), despawn_screen::<menus::PauseUI>)

            // Game over
            .add_systems(OnEnter(AppState::GameOver), game_over::setup_game_over)
            .add_systems(OnExit(AppState::GameOver), despawn_screen::<game_over::GameOverUI>)

            // HUD lives for the whole app and hides outside a session
            .add_systems(Startup, hud::setup_hud)

            .add_systems(Update, (
                menus::main_menu_input.run_if(in_state(AppState::MainMenu)),
                menus::high_scores_input.run_if(in_state(AppState::HighScores)),
                menus::options_input.run_if(in_state(AppState::Options)),
                menus::pause_input.run_if(in_state(AppState::Paused)),
                game_over::game_over_input.run_if(in_state(AppState::GameOver)),
            ))
            .add_systems(Update, (
                menus::update_options_labels.run_if(in_state(AppState::Options)),
                highlight_menu_items,
            ).chain())
            .add_systems(Update, (
                game_over::update_game_over_text.run_if(in_state(AppState::GameOver)),
                hud::update_hud,
            ));
    }
}

// ============================================================================
// STYLE
// ============================================================================

pub(crate) const TEXT_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
pub(crate) const HIGHLIGHT_COLOR: Color = Color::srgb(1.0, 1.0, 100.0 / 255.0);
pub(crate) const GAME_OVER_COLOR: Color = Color::srgb(1.0, 50.0 / 255.0, 50.0 / 255.0);
pub(crate) const HINT_COLOR: Color = Color::srgb(0.6, 0.6, 0.7);

const ITEM_FONT_SIZE: f32 = 32.0;
const SELECTED_FONT_SIZE: f32 = 40.0;

// ============================================================================
// MENU SELECTION
// ============================================================================

/// Highlighted row of whichever menu is open.
#[derive(Resource, Default, Debug)]
pub struct MenuSelection(pub usize);

/// State the options screen returns to on Esc.
#[derive(Resource, Debug)]
pub struct OptionsReturn(pub AppState);

impl Default for OptionsReturn {
    fn default() -> Self {
        Self(AppState::MainMenu)
    }
}

/// One selectable line of a menu.
#[derive(Component)]
pub struct MenuItem {
    pub index: usize,
    pub label: String,
}

fn reset_selection(mut selection: ResMut<MenuSelection>) {
    selection.0 = 0;
}

/// Move a wrapping highlight by `delta` rows.
pub fn step_selection(current: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + delta).rem_euclid(len as isize) as usize
}

/// -1 for up, +1 for down, 0 otherwise.
pub fn navigation_delta(keyboard: &ButtonInput<KeyCode>) -> isize {
    let up = keyboard.any_just_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    let down = keyboard.any_just_pressed([KeyCode::KeyS, KeyCode::ArrowDown]);
    down as isize - up as isize
}

/// Text shown for a menu row.
pub fn item_text(label: &str, selected: bool) -> String {
    if selected {
        format!("> {} <", label)
    } else {
        label.to_string()
    }
}

fn highlight_menu_items(
    selection: Res<MenuSelection>,
    mut items: Query<(&MenuItem, &mut Text, &mut TextColor, &mut TextFont)>,
) {
    for (item, mut text, mut color, mut font) in items.iter_mut() {
        let selected = item.index == selection.0;
        let wanted = item_text(&item.label, selected);
        if text.0 != wanted {
            text.0 = wanted;
        }
        color.0 = if selected { HIGHLIGHT_COLOR } else { TEXT_COLOR };
        font.font_size = if selected { SELECTED_FONT_SIZE } else { ITEM_FONT_SIZE };
    }
}

// ============================================================================
// SHARED WIDGETS
// ============================================================================

/// Full-screen centred column, optionally darkening what is behind it.
pub(crate) fn screen_root(overlay_alpha: f32) -> impl Bundle {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, overlay_alpha)),
        GlobalZIndex(10),
    )
}

/// Plain text line with a bottom margin.
pub(crate) fn label(text: impl Into<String>, font_size: f32, color: Color, margin: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(margin)),
            ..default()
        },
    )
}

pub(crate) fn spawn_menu_item(parent: &mut ChildBuilder, index: usize, text: &str) {
    parent.spawn((
        label(text, ITEM_FONT_SIZE, TEXT_COLOR, 20.0),
        MenuItem {
            index,
            label: text.to_string(),
        },
    ));
}

fn despawn_screen<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        assert_eq!(step_selection(0, 4, -1), 3);
        assert_eq!(step_selection(3, 4, 1), 0);
        assert_eq!(step_selection(1, 4, 0), 1);
        assert_eq!(step_selection(0, 0, 1), 0);
    }

    #[test]
    fn test_navigation_delta() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        assert_eq!(navigation_delta(&keyboard), 0);

        keyboard.press(KeyCode::ArrowDown);
        assert_eq!(navigation_delta(&keyboard), 1);

        keyboard.clear();
        keyboard.press(KeyCode::KeyW);
        assert_eq!(navigation_delta(&keyboard), -1);
    }

    #[test]
    fn test_item_text() {
        assert_eq!(item_text("Play", true), "> Play <");
        assert_eq!(item_text("Play", false), "Play");
    }
}
