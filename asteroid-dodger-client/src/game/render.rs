//! Vector-style drawing of the simulation state.
//!
//! Everything here is immediate-mode gizmos redrawn each frame from the
//! `Session`, except the text labels and the boss tint overlay, which are
//! long-lived entities synced to the state.

use bevy::prelude::*;

use asteroid_dodger::core::constants::{LASER_WIDTH, LASER_HEIGHT, SHIP_WIDTH, SHIP_HEIGHT};
use asteroid_dodger::game::asteroid::{Asteroid, AsteroidLook};
use asteroid_dodger::Vec2 as SimVec2;

use super::{to_world, Session};
use crate::AppState;

// ============================================================================
// COLOURS
// ============================================================================

const SHIP_COLOR: [u8; 3] = [100, 200, 255];
const SHIP_COCKPIT_COLOR: [u8; 3] = [50, 180, 255];
const SHIP_WING_COLOR: [u8; 3] = [80, 180, 255];
const SHIP_DAMAGE_COLOR: [u8; 3] = [255, 100, 100];
const SHIELD_COLOR: [u8; 3] = [100, 255, 100];
const LASER_COLOR: [u8; 3] = [0, 255, 255];
const LASER_GLOW_COLOR: [u8; 3] = [150, 255, 255];
const BOSS_COLOR: [u8; 3] = [200, 50, 50];
const BOSS_DETAIL_COLOR: [u8; 3] = [150, 30, 30];
const BOSS_GLOW_COLOR: [u8; 3] = [255, 100, 100];
const ENGINE_COLOR: [u8; 3] = [255, 150, 50];

/// 8-bit colour pushed above 1.0 for bloom.
pub fn glow(rgb: [u8; 3], intensity: f32) -> Color {
    let c = LinearRgba::from(Color::srgb_u8(rgb[0], rgb[1], rgb[2]));
    Color::LinearRgba(LinearRgba::new(
        c.red * intensity,
        c.green * intensity,
        c.blue * intensity,
        1.0,
    ))
}

/// Polar offset from a centre, in simulation space.
fn polar(center: SimVec2, distance: f32, degrees: f32) -> Vec2 {
    to_world(center + SimVec2::from_polar(distance, degrees))
}

// ============================================================================
// SHIP
// ============================================================================

/// Hull outline in simulation space (closed loop).
pub fn hull_points(x: f32, y: f32) -> [SimVec2; 5] {
    let half = SHIP_HEIGHT / 2.0;
    [
        SimVec2::new(x + SHIP_WIDTH, y),
        SimVec2::new(x, y - half),
        SimVec2::new(x + 8.0, y),
        SimVec2::new(x, y + half),
        SimVec2::new(x + SHIP_WIDTH, y),
    ]
}

/// Invulnerable ships blink on and off every 5 frames.
pub fn ship_visible(invulnerable: bool, frame: u64) -> bool {
    !invulnerable || (frame / 5) % 2 == 0
}

pub fn draw_ship(session: Res<Session>, mut gizmos: Gizmos) {
    let state = &session.state;
    let ship = &state.ship;
    if !ship_visible(ship.invulnerable, state.frame) {
        return;
    }

    let (x, y) = (ship.x, ship.y);
    let flashing = ship.is_flashing();
    let hull = if flashing { SHIP_DAMAGE_COLOR } else { SHIP_COLOR };
    let wing = if flashing { SHIP_DAMAGE_COLOR } else { SHIP_WING_COLOR };

    // Engine flame, flickering with the frame counter
    let flame = 10.0 + (state.frame % 4) as f32 * 2.0;
    gizmos.line_2d(
        to_world(SimVec2::new(x + 2.0, y)),
        to_world(SimVec2::new(x - flame, y)),
        glow(ENGINE_COLOR, 2.5),
    );

    gizmos.linestrip_2d(hull_points(x, y).map(to_world), glow(hull, 2.0));

    // Wings
    for side in [-1.0, 1.0] {
        gizmos.linestrip_2d(
            [
                SimVec2::new(x + 10.0, y + side * 6.0),
                SimVec2::new(x + 4.0, y + side * 20.0),
                SimVec2::new(x + 22.0, y + side * 7.0),
            ]
            .map(to_world),
            glow(wing, 1.5),
        );
    }

    // Cockpit
    gizmos.circle_2d(to_world(SimVec2::new(x + 26.0, y)), 4.0, glow(SHIP_COCKPIT_COLOR, 3.0));

    if ship.shielded {
        draw_hex_shield(&mut gizmos, ship.center(), state.frame);
    }
}

/// Three nested rotating hexagons around the ship.
fn draw_hex_shield(gizmos: &mut Gizmos, center: SimVec2, frame: u64) {
    let spin = (frame % 360) as f32;
    let pulse = 0.7 + 0.3 * (frame as f32 * 0.1).sin();

    for layer in 0..3 {
        let radius = 30.0 + layer as f32 * 5.0;
        let offset = if layer % 2 == 0 { spin } else { -spin };
        let points: Vec<Vec2> = (0..=6)
            .map(|i| polar(center, radius, offset + i as f32 * 60.0))
            .collect();
        let alpha = pulse * (1.0 - layer as f32 * 0.25);
        gizmos.linestrip_2d(points, glow(SHIELD_COLOR, 1.5).with_alpha(alpha));
    }
}

// ============================================================================
// ASTEROIDS
// ============================================================================

fn outline_points(look: &AsteroidLook, center: SimVec2, rotation: f32) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = look
        .outline
        .iter()
        .map(|p| polar(center, p.distance, p.angle + rotation))
        .collect();
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

fn rock_color(rgb: [u8; 3], alpha: f32) -> Color {
    Color::srgb_u8(rgb[0], rgb[1], rgb[2]).with_alpha(alpha)
}

fn draw_asteroid(gizmos: &mut Gizmos, asteroid: &Asteroid) {
    let [base, highlight, shadow] = asteroid.look.palette.rgb();
    let look = &asteroid.look;
    let rot = asteroid.angle;
    let center = asteroid.position;

    // Motion ghosts, oldest faintest
    let ghosts = asteroid.trail.len();
    for (i, pos) in asteroid.trail.iter().enumerate() {
        let alpha = 0.15 * (i + 1) as f32 / ghosts as f32;
        gizmos.linestrip_2d(outline_points(look, *pos, rot), rock_color(shadow, alpha));
    }

    gizmos.linestrip_2d(outline_points(look, center, rot), rock_color(highlight, 1.0));

    for crack in &look.cracks {
        gizmos.line_2d(
            polar(center, crack.start, crack.angle + rot),
            polar(center, crack.end, crack.angle + rot),
            rock_color(shadow, if crack.width > 1 { 1.0 } else { 0.7 }),
        );
    }

    for crater in &look.craters {
        gizmos.circle_2d(
            polar(center, crater.distance, crater.angle + rot),
            crater.size,
            rock_color(base, 0.8),
        );
    }

    for mineral in &look.minerals {
        let b = mineral.brightness;
        gizmos.circle_2d(
            polar(center, mineral.distance, mineral.angle + rot),
            1.5,
            glow([b, b, b.saturating_sub(40)], 1.5),
        );
    }
}

pub fn draw_asteroids(session: Res<Session>, mut gizmos: Gizmos) {
    for asteroid in &session.state.asteroids {
        draw_asteroid(&mut gizmos, asteroid);
    }
}

// ============================================================================
// LASERS
// ============================================================================

pub fn draw_lasers(session: Res<Session>, mut gizmos: Gizmos) {
    for laser in &session.state.lasers {
        let mid = SimVec2::new(0.0, LASER_HEIGHT / 2.0);
        let dir = laser.velocity.normalize();
        let start = laser.position + mid;
        let end = start + dir * LASER_WIDTH;

        // Trail fades towards the oldest position
        let n = laser.trail.len();
        for (i, pos) in laser.trail.iter().enumerate() {
            let alpha = 0.6 * (i + 1) as f32 / (n + 1) as f32;
            let p = *pos + mid;
            gizmos.line_2d(
                to_world(p),
                to_world(p + dir * LASER_WIDTH * 0.5),
                glow(LASER_GLOW_COLOR, 1.0).with_alpha(alpha),
            );
        }

        gizmos.line_2d(to_world(start), to_world(end), glow(LASER_COLOR, 4.0));
    }
}

// ============================================================================
// POWER-UPS
// ============================================================================

/// Text label riding on a pickup.
#[derive(Component)]
pub struct PickupLabel;

pub fn draw_powerups(session: Res<Session>, mut gizmos: Gizmos) {
    let frame = session.state.frame as f32;
    for powerup in &session.state.powerups {
        let pos = to_world(powerup.position);
        let color = powerup.kind.rgb();
        let pulse = 1.0 + 0.15 * (frame * 0.15).sin();

        gizmos.circle_2d(pos, powerup.size * 0.75 * pulse, glow(color, 2.0));
        gizmos.circle_2d(pos, powerup.size * 0.55, glow(color, 1.0).with_alpha(0.6));
    }
}

/// Keep one label entity per pickup, in list order.
pub fn sync_pickup_labels(
    mut commands: Commands,
    session: Res<Session>,
    app_state: Res<State<AppState>>,
    mut labels: Query<(Entity, &mut Text2d, &mut Transform, &mut TextColor), With<PickupLabel>>,
) {
    let visible = matches!(
        app_state.get(),
        AppState::Playing | AppState::Paused | AppState::GameOver
    );
    let powerups = if visible { session.state.powerups.as_slice() } else { &[] };

    let mut existing = labels.iter_mut();
    for powerup in powerups {
        let translation = to_world(powerup.position).extend(5.0);
        let letter = powerup.kind.letter().to_string();
        let color = glow(powerup.kind.rgb(), 1.5);

        match existing.next() {
            Some((_, mut text, mut transform, mut text_color)) => {
                if text.0 != letter {
                    text.0 = letter;
                }
                transform.translation = translation;
                text_color.0 = color;
            }
            None => {
                commands.spawn((
                    Text2d::new(letter),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(color),
                    Transform::from_translation(translation),
                    PickupLabel,
                ));
            }
        }
    }

    for (entity, ..) in existing {
        commands.entity(entity).despawn();
    }
}

// ============================================================================
// BOSS
// ============================================================================

pub fn draw_boss(session: Res<Session>, mut gizmos: Gizmos) {
    let Some(boss) = &session.state.boss else {
        return;
    };
    let center = to_world(boss.position);
    let r = boss.radius;
    let glow_strength = 0.5 + 0.5 * boss.glow_phase.to_radians().sin();

    // Outer glow rings
    for i in 1..=3 {
        let alpha = glow_strength * (0.5 - i as f32 * 0.12);
        gizmos.circle_2d(center, r + i as f32 * 6.0, glow(BOSS_GLOW_COLOR, 2.0).with_alpha(alpha));
    }

    // Body
    gizmos.circle_2d(center, r, glow(BOSS_COLOR, 1.5)).resolution(64);

    // Rotating armour details
    for i in 0..8 {
        let angle = boss.detail_angle + i as f32 * 45.0;
        gizmos.line_2d(
            polar(boss.position, r * 0.55, angle),
            polar(boss.position, r * 0.9, angle),
            glow(BOSS_DETAIL_COLOR, 2.0),
        );
    }

    // Veins curling out from the core
    for i in 0..6 {
        let angle = -boss.detail_angle * 0.5 + i as f32 * 60.0;
        gizmos.linestrip_2d(
            [
                polar(boss.position, r * 0.3, angle),
                polar(boss.position, r * 0.45, angle + 12.0),
                polar(boss.position, r * 0.6, angle + 4.0),
            ],
            glow(BOSS_GLOW_COLOR, 1.2).with_alpha(0.7),
        );
    }

    // Pulsing core
    let core = r * 0.3 * (1.0 + 0.15 * (boss.time as f32 * 0.1).sin());
    gizmos.circle_2d(center, core, glow(BOSS_GLOW_COLOR, 4.0));
}

/// Full-screen red wash during boss fights.
#[derive(Component)]
pub struct BossTint;

pub fn setup_boss_tint(mut commands: Commands) {
    commands.spawn((
        Sprite {
            color: Color::NONE,
            custom_size: Some(Vec2::new(
                asteroid_dodger::core::constants::SCREEN_WIDTH,
                asteroid_dodger::core::constants::SCREEN_HEIGHT,
            )),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -10.0),
        Visibility::Hidden,
        BossTint,
    ));
}

pub fn update_boss_tint(
    session: Res<Session>,
    app_state: Res<State<AppState>>,
    mut tint: Query<(&mut Sprite, &mut Visibility), With<BossTint>>,
) {
    let Ok((mut sprite, mut visibility)) = tint.get_single_mut() else {
        return;
    };

    let in_session = matches!(app_state.get(), AppState::Playing | AppState::Paused);
    if !in_session || !session.state.boss_phase() {
        *visibility = Visibility::Hidden;
        return;
    }

    let pulse = 0.06 + 0.03 * (session.state.frame as f32 * 0.05).sin();
    sprite.color = Color::srgba(0.6, 0.0, 0.0, pulse);
    *visibility = Visibility::Visible;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hull_closed_and_pointing_right() {
        let hull = hull_points(200.0, 300.0);
        assert_eq!(hull[0], hull[4]);
        assert_eq!(hull[0], SimVec2::new(240.0, 300.0));
        assert!(hull.iter().all(|p| p.x <= 240.0));
    }

    #[test]
    fn test_ship_blinks_while_invulnerable() {
        assert!(ship_visible(false, 7));
        assert!(ship_visible(true, 4));
        assert!(!ship_visible(true, 5));
        assert!(ship_visible(true, 10));
    }
}
