//! In-game HUD.
//!
//! Spawned once at start-up and shown while a session is on screen
//! (playing, paused, game over).

use bevy::prelude::*;

use asteroid_dodger::core::constants::{COMBO_MULTIPLIERS, FPS};
use asteroid_dodger::game::combo::multiplier_for;
use asteroid_dodger::game::difficulty::ScoreTheme;
use asteroid_dodger::game::powerup::PowerUpKind;

use crate::game::Session;
use crate::records::Records;
use crate::AppState;

use super::{HIGHLIGHT_COLOR, HINT_COLOR, TEXT_COLOR};

/// Power-up rows top to bottom.
const HUD_ORDER: [PowerUpKind; 6] = [
    PowerUpKind::RapidFire,
    PowerUpKind::SpreadShot,
    PowerUpKind::Shield,
    PowerUpKind::DoubleDamage,
    PowerUpKind::Magnet,
    PowerUpKind::TimeSlow,
];

const HEALTH_COLOR: Color = Color::srgb(100.0 / 255.0, 1.0, 100.0 / 255.0);
const SPEED_COLOR: Color = Color::srgb(1.0, 200.0 / 255.0, 100.0 / 255.0);
const BOSS_LABEL_COLOR: Color = Color::srgb(1.0, 50.0 / 255.0, 50.0 / 255.0);

/// HUD text lines.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudText {
    Score,
    Best,
    BestHolder,
    Lives,
    Speed,
    Combo,
    BossHealth,
    Warning,
    PowerUp(PowerUpKind),
}

/// HUD boxes that show, hide or resize.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudNode {
    Root,
    EdgeGlow,
    PowerUpRow(PowerUpKind),
    PowerUpFill(PowerUpKind),
    BossBar,
    BossFill,
}

// ============================================================================
// FORMATTING
// ============================================================================

pub fn format_speed(difficulty: f32) -> String {
    format!("Speed: {:.1}x", difficulty)
}

/// Banner for a running combo.
pub fn combo_banner(count: u32) -> Option<String> {
    (count > 1).then(|| format!("COMBO x{}!", multiplier_for(count)))
}

/// Edge glow opacity for long combos.
pub fn edge_glow_alpha(count: u32) -> Option<f32> {
    if count < 3 {
        return None;
    }
    let alpha = 50.0 + 30.0 * count as f32 / COMBO_MULTIPLIERS.len() as f32;
    Some(alpha.min(255.0) / 255.0)
}

/// Whole seconds left on a power-up.
pub fn seconds_left(frames: u32) -> u32 {
    frames / FPS
}

/// Filled share of a bar.
pub fn bar_fraction(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

/// Boss warning opacity for the frames left on the countdown.
pub fn warning_alpha(frames_left: u32) -> f32 {
    200.0 * (frames_left as f32 / 10.0).sin().abs() / 255.0
}

/// Lives text colour. Pulses red-white on the last life.
pub fn lives_color(lives: u32, elapsed_secs: f32) -> Color {
    if lives != 1 {
        return HEALTH_COLOR;
    }
    let pulse = ((elapsed_secs * 10.0).sin() + 1.0) / 2.0;
    let gb = (100.0 + pulse * 155.0) / 255.0;
    Color::srgb(1.0, gb, gb)
}

fn rgb(color: [u8; 3]) -> Color {
    Color::srgb_u8(color[0], color[1], color[2])
}

// ============================================================================
// SETUP
// ============================================================================

fn text(value: &str, font_size: f32, color: Color) -> impl Bundle {
    (
        Text::new(value),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

fn absolute(top: Option<f32>, bottom: Option<f32>, left: Option<f32>, right: Option<f32>) -> Node {
    let px = |v: Option<f32>| v.map(Val::Px).unwrap_or(Val::Auto);
    Node {
        position_type: PositionType::Absolute,
        top: px(top),
        bottom: px(bottom),
        left: px(left),
        right: px(right),
        flex_direction: FlexDirection::Column,
        ..default()
    }
}

pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                display: Display::None,
                ..default()
            },
            HudNode::Root,
        ))
        .with_children(|root| {
            // Combo edge glow
            root.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    position_type: PositionType::Absolute,
                    border: UiRect::vertical(Val::Px(20.0)),
                    ..default()
                },
                BorderColor(Color::NONE),
                HudNode::EdgeGlow,
            ));

            // Left column: score, lives, speed, power-ups
            root.spawn(absolute(Some(20.0), None, Some(20.0), None))
                .with_children(|col| {
                    col.spawn((text("Score: 0", 30.0, TEXT_COLOR), HudText::Score));
                    col.spawn((text("Lives: 3", 30.0, HEALTH_COLOR), HudText::Lives));
                    col.spawn((text("Speed: 1.0x", 20.0, SPEED_COLOR), HudText::Speed));

                    for kind in HUD_ORDER {
                        col.spawn((
                            Node {
                                flex_direction: FlexDirection::Column,
                                margin: UiRect::top(Val::Px(8.0)),
                                display: Display::None,
                                ..default()
                            },
                            HudNode::PowerUpRow(kind),
                        ))
                        .with_children(|row| {
                            row.spawn((text("", 18.0, rgb(kind.rgb())), HudText::PowerUp(kind)));
                            row.spawn((
                                Node {
                                    width: Val::Px(150.0),
                                    height: Val::Px(8.0),
                                    border: UiRect::all(Val::Px(1.0)),
                                    ..default()
                                },
                                BorderColor(Color::srgb(0.8, 0.8, 0.8)),
                                BackgroundColor(Color::srgb(0.2, 0.2, 0.2)),
                            ))
                            .with_children(|bar| {
                                bar.spawn((
                                    Node {
                                        width: Val::Percent(100.0),
                                        height: Val::Percent(100.0),
                                        ..default()
                                    },
                                    BackgroundColor(rgb(kind.rgb())),
                                    HudNode::PowerUpFill(kind),
                                ));
                            });
                        });
                    }
                });

            // Right column: best score
            root.spawn(Node {
                align_items: AlignItems::FlexEnd,
                ..absolute(Some(20.0), None, None, Some(20.0))
            })
            .with_children(|col| {
                col.spawn((text("", 30.0, TEXT_COLOR), HudText::Best));
                col.spawn((text("", 20.0, TEXT_COLOR), HudText::BestHolder));
            });

            // Centre top: combo banner and boss bar
            root.spawn(Node {
                width: Val::Percent(100.0),
                align_items: AlignItems::Center,
                ..absolute(Some(20.0), None, Some(0.0), None)
            })
            .with_children(|col| {
                col.spawn((text("", 36.0, HIGHLIGHT_COLOR), HudText::Combo));

                col.spawn((
                    Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(10.0),
                        display: Display::None,
                        ..default()
                    },
                    HudNode::BossBar,
                ))
                .with_children(|row| {
                    row.spawn(text("BOSS", 30.0, BOSS_LABEL_COLOR));
                    row.spawn((
                        Node {
                            width: Val::Px(300.0),
                            height: Val::Px(24.0),
                            border: UiRect::all(Val::Px(2.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BorderColor(Color::WHITE),
                        BackgroundColor(Color::srgb(0.2, 0.2, 0.2)),
                    ))
                    .with_children(|bar| {
                        bar.spawn((
                            Node {
                                position_type: PositionType::Absolute,
                                left: Val::Px(0.0),
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(Color::WHITE),
                            HudNode::BossFill,
                        ));
                        bar.spawn((text("", 18.0, TEXT_COLOR), HudText::BossHealth));
                    });
                });
            });

            // Boss warning
            root.spawn(Node {
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..absolute(Some(275.0), None, Some(0.0), None)
            })
            .with_children(|row| {
                row.spawn((text("", 36.0, Color::srgba(1.0, 0.0, 0.0, 0.0)), HudText::Warning));
            });

            // Controls
            root.spawn(absolute(None, Some(20.0), Some(20.0), None))
                .with_children(|col| {
                    col.spawn(text("WASD/Arrows: Move | SPACE: Shoot | ESC: Pause", 16.0, HINT_COLOR));
                });
        });
}

// ============================================================================
// UPDATE
// ============================================================================

pub fn update_hud(
    session: Res<Session>,
    records: Res<Records>,
    time: Res<Time>,
    app_state: Res<State<AppState>>,
    mut texts: Query<(&HudText, &mut Text, &mut TextColor)>,
    mut nodes: Query<(&HudNode, &mut Node, Option<&mut BackgroundColor>, Option<&mut BorderColor>)>,
) {
    let visible = matches!(
        app_state.get(),
        AppState::Playing | AppState::Paused | AppState::GameOver
    );
    let state = &session.state;
    let elapsed = time.elapsed_secs();

    for (kind, mut node, background, border) in nodes.iter_mut() {
        let shown = match kind {
            HudNode::Root => visible,
            HudNode::EdgeGlow => {
                if let Some(mut border) = border {
                    border.0 = match edge_glow_alpha(state.combo.count) {
                        Some(alpha) => HIGHLIGHT_COLOR.with_alpha(alpha),
                        None => Color::NONE,
                    };
                }
                true
            }
            HudNode::PowerUpRow(power) => state.is_active(*power),
            HudNode::PowerUpFill(power) => {
                let fraction = bar_fraction(state.timer(*power) as f32, power.max_timer() as f32);
                node.width = Val::Percent(fraction * 100.0);
                true
            }
            HudNode::BossBar => state.boss.is_some(),
            HudNode::BossFill => {
                if let Some(boss) = &state.boss {
                    let fraction = boss.health_fraction().clamp(0.0, 1.0);
                    node.width = Val::Percent(fraction * 100.0);
                    if let Some(mut background) = background {
                        background.0 = Color::srgb(1.0, fraction, fraction);
                    }
                }
                true
            }
        };

        let display = if shown { Display::Flex } else { Display::None };
        if node.display != display {
            node.display = display;
        }
    }

    if !visible {
        return;
    }

    for (kind, mut text, mut color) in texts.iter_mut() {
        let wanted = match kind {
            HudText::Score => {
                color.0 = rgb(ScoreTheme::for_score(state.score).rgb());
                format!("Score: {}", state.score)
            }
            HudText::Best => records
                .best()
                .map(|(score, _)| format!("High Score: {}", score))
                .unwrap_or_default(),
            HudText::BestHolder => records
                .best()
                .map(|(_, name)| format!("By: {}", name))
                .unwrap_or_default(),
            HudText::Lives => {
                color.0 = lives_color(state.ship.lives, elapsed);
                format!("Lives: {}", state.ship.lives)
            }
            HudText::Speed => format_speed(state.difficulty),
            HudText::Combo => combo_banner(state.combo.count).unwrap_or_default(),
            HudText::BossHealth => state
                .boss
                .as_ref()
                .map(|boss| format!("{}/{}", boss.health.max(0), boss.max_health))
                .unwrap_or_default(),
            HudText::Warning => match state.boss_warning {
                Some(frames) => {
                    color.0 = Color::srgba(1.0, 0.0, 0.0, warning_alpha(frames));
                    "WARNING! BOSS APPROACHING!".to_string()
                }
                None => String::new(),
            },
            HudText::PowerUp(power) => {
                format!("{}: {}s", power.label(), seconds_left(state.timer(*power)))
            }
        };
        if text.0 != wanted {
            text.0 = wanted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_banner() {
        assert_eq!(combo_banner(0), None);
        assert_eq!(combo_banner(1), None);
        assert_eq!(combo_banner(2).as_deref(), Some("COMBO x2!"));
        assert_eq!(combo_banner(4).as_deref(), Some("COMBO x5!"));
        assert_eq!(combo_banner(40).as_deref(), Some("COMBO x10!"));
    }

    #[test]
    fn test_edge_glow_from_three() {
        assert_eq!(edge_glow_alpha(2), None);
        let low = edge_glow_alpha(3).unwrap();
        let high = edge_glow_alpha(6).unwrap();
        assert!(low < high);
        assert!((high - 80.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_speed(1.0), "Speed: 1.0x");
        assert_eq!(format_speed(2.3), "Speed: 2.3x");
        assert_eq!(seconds_left(419), 6);
        assert_eq!(seconds_left(59), 0);
    }

    #[test]
    fn test_bar_fraction() {
        assert_eq!(bar_fraction(420.0, 840.0), 0.5);
        assert_eq!(bar_fraction(5.0, 0.0), 0.0);
        assert_eq!(bar_fraction(-3.0, 15.0), 0.0);
    }

    #[test]
    fn test_lives_pulse_only_on_last_life() {
        assert_eq!(lives_color(3, 1.0), HEALTH_COLOR);
        assert_ne!(lives_color(1, 0.05), HEALTH_COLOR);
    }

    #[test]
    fn test_warning_alpha_bounded() {
        for frames in 0..180 {
            let alpha = warning_alpha(frames);
            assert!((0.0..=200.0 / 255.0 + 1e-6).contains(&alpha));
        }
    }
}
