//! Game-over overlay with high score name entry.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use asteroid_dodger::core::constants::MAX_NAME_LENGTH;

use crate::game::Session;
use crate::records::Records;
use crate::AppState;

use super::{label, screen_root, GAME_OVER_COLOR, HINT_COLOR, TEXT_COLOR};

#[derive(Component)]
pub struct GameOverUI;

/// Text lines that change while the overlay is open.
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum GameOverText {
    Prompt,
    Name,
    Hint,
}

/// Name typed for a qualifying score.
#[derive(Resource, Default, Debug)]
pub struct NameEntry {
    pub name: String,
    /// Typing is accepted only while true
    pub active: bool,
    /// Table position after saving
    pub saved_rank: Option<usize>,
}

impl NameEntry {
    pub fn new(active: bool) -> Self {
        Self {
            name: String::new(),
            active,
            saved_rank: None,
        }
    }

    /// Append a typed character. Separators, line breaks and control
    /// characters are refused, as is anything past the length cap.
    pub fn push(&mut self, c: char) -> bool {
        if !self.active || c.is_control() || c == ':' {
            return false;
        }
        if self.name.chars().count() >= MAX_NAME_LENGTH {
            return false;
        }
        self.name.push(c);
        true
    }

    pub fn backspace(&mut self) {
        if self.active {
            self.name.pop();
        }
    }
}

pub fn setup_game_over(
    mut commands: Commands,
    session: Res<Session>,
    records: Res<Records>,
    mut key_events: ResMut<Events<KeyboardInput>>,
) {
    // Keys pressed during play must not land in the name field
    key_events.clear();

    let score = session.state.score;
    let qualifies = records.high_scores.qualifies(score);
    commands.insert_resource(NameEntry::new(qualifies));

    commands
        .spawn((screen_root(0.7), GameOverUI))
        .with_children(|parent| {
            parent.spawn(label("GAME OVER!", 56.0, GAME_OVER_COLOR, 20.0));
            parent.spawn(label(format!("Final Score: {}", score), 36.0, TEXT_COLOR, 30.0));
            parent.spawn((label("", 28.0, TEXT_COLOR, 12.0), GameOverText::Prompt));

            // Name field
            parent
                .spawn((
                    Node {
                        width: Val::Px(240.0),
                        height: Val::Px(40.0),
                        padding: UiRect::horizontal(Val::Px(10.0)),
                        align_items: AlignItems::Center,
                        margin: UiRect::bottom(Val::Px(12.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(50.0 / 255.0, 50.0 / 255.0, 100.0 / 255.0)),
                    Visibility::Inherited,
                    GameOverText::Name,
                ))
                .with_children(|field| {
                    field.spawn((label("", 24.0, TEXT_COLOR, 0.0), GameOverText::Name));
                });

            parent.spawn((label("", 20.0, HINT_COLOR, 8.0), GameOverText::Hint));
        });
}

/// Field text with a cursor blinking at 1 Hz.
pub fn name_field_text(name: &str, elapsed_secs: f32) -> String {
    if elapsed_secs.fract() < 0.5 {
        format!("{}|", name)
    } else {
        name.to_string()
    }
}

pub fn update_game_over_text(
    entry: Res<NameEntry>,
    time: Res<Time>,
    mut texts: Query<(&GameOverText, &mut Text)>,
    mut field: Query<(&GameOverText, &mut Visibility), Without<Text>>,
) {
    for (kind, mut visibility) in field.iter_mut() {
        if *kind == GameOverText::Name {
            *visibility = if entry.active { Visibility::Inherited } else { Visibility::Hidden };
        }
    }

    for (kind, mut text) in texts.iter_mut() {
        let wanted = match (kind, entry.active) {
            (GameOverText::Prompt, true) => "New High Score! Enter your name:".to_string(),
            (GameOverText::Prompt, false) => match entry.saved_rank {
                Some(rank) => format!("Saved as #{}", rank + 1),
                None => String::new(),
            },
            (GameOverText::Name, _) => name_field_text(&entry.name, time.elapsed_secs()),
            (GameOverText::Hint, true) => "Press ENTER to save".to_string(),
            (GameOverText::Hint, false) => "Press R to restart  ESC for menu".to_string(),
        };
        if text.0 != wanted {
            text.0 = wanted;
        }
    }
}

pub fn game_over_input(
    mut key_events: EventReader<KeyboardInput>,
    mut entry: ResMut<NameEntry>,
    mut records: ResMut<Records>,
    mut session: ResMut<Session>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for event in key_events.read() {
        if !event.state.is_pressed() {
            continue;
        }

        match &event.logical_key {
            Key::Escape => {
                next_state.set(AppState::MainMenu);
                return;
            }
            Key::Enter if entry.active => {
                let score = session.state.score;
                entry.active = false;
                if records.high_scores.qualifies(score) {
                    let name = entry.name.clone();
                    entry.saved_rank = records.submit_score(score, &name);
                }
            }
            Key::Backspace => entry.backspace(),
            Key::Space => {
                entry.push(' ');
            }
            Key::Character(typed) if entry.active => {
                for c in typed.chars() {
                    entry.push(c);
                }
            }
            Key::Character(typed) if typed.eq_ignore_ascii_case("r") => {
                session.restart();
                next_state.set(AppState::Playing);
                return;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_entry_filters() {
        let mut entry = NameEntry::new(true);
        assert!(entry.push('A'));
        assert!(!entry.push(':'));
        assert!(!entry.push('\n'));
        assert!(!entry.push('\r'));
        assert!(entry.push(' '));
        assert_eq!(entry.name, "A ");

        entry.backspace();
        assert_eq!(entry.name, "A");
    }

    #[test]
    fn test_name_entry_caps_length() {
        let mut entry = NameEntry::new(true);
        for _ in 0..20 {
            entry.push('x');
        }
        assert_eq!(entry.name.len(), MAX_NAME_LENGTH);
    }

    #[test]
    fn test_inactive_entry_ignores_typing() {
        let mut entry = NameEntry::new(false);
        assert!(!entry.push('A'));
        entry.backspace();
        assert!(entry.name.is_empty());
    }

    #[test]
    fn test_cursor_blinks() {
        assert_eq!(name_field_text("Ace", 2.25), "Ace|");
        assert_eq!(name_field_text("Ace", 2.75), "Ace");
    }
}
