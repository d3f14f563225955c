//! Scrolling starfield and nebula clouds.

use bevy::prelude::*;
use rand::Rng;

use asteroid_dodger::core::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::AppState;

const STAR_COUNT: usize = 200;
const NEBULA_COUNT: usize = 5;

const STAR_COLORS: [[u8; 3]; 3] = [[255, 255, 255], [200, 200, 255], [255, 200, 200]];
const NEBULA_COLORS: [[u8; 4]; 3] = [[50, 20, 80, 80], [20, 50, 80, 80], [80, 20, 50, 80]];

/// Extra brightness at the top of a twinkle.
const TWINKLE_RANGE: f32 = 50.0;

const HALF_WIDTH: f32 = SCREEN_WIDTH / 2.0;
const HALF_HEIGHT: f32 = SCREEN_HEIGHT / 2.0;

#[derive(Component)]
pub struct Star {
    pub speed: f32,
    pub brightness: f32,
    /// Degrees
    pub twinkle_phase: f32,
    pub twinkle_speed: f32,
    pub rgb: [u8; 3],
}

#[derive(Component)]
pub struct Nebula {
    pub size: f32,
    pub drift: f32,
}

/// Star brightness (0-255) at a twinkle phase in degrees.
pub fn twinkle_brightness(base: f32, phase: f32) -> f32 {
    let twinkle = (phase.to_radians().sin() + 1.0) / 2.0;
    (base + TWINKLE_RANGE * twinkle).min(255.0)
}

/// Where something drifting left re-enters, once it has fully left.
pub fn wrapped_x(x: f32, margin: f32) -> Option<f32> {
    (x < -HALF_WIDTH - margin).then_some(HALF_WIDTH + margin)
}

fn star_color(rgb: [u8; 3], brightness: f32) -> Color {
    let scale = brightness / 255.0;
    Color::srgb(
        rgb[0] as f32 / 255.0 * scale,
        rgb[1] as f32 / 255.0 * scale,
        rgb[2] as f32 / 255.0 * scale,
    )
}

pub fn setup_background(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let mut rng = rand::thread_rng();

    for _ in 0..STAR_COUNT {
        let star = Star {
            speed: rng.gen_range(0.1..0.5),
            brightness: rng.gen_range(150.0..255.0),
            twinkle_phase: rng.gen_range(0.0..360.0),
            twinkle_speed: rng.gen_range(0.5..2.0),
            rgb: STAR_COLORS[rng.gen_range(0..STAR_COLORS.len())],
        };
        let size = rng.gen_range(1..=3) as f32;
        let x = rng.gen_range(-HALF_WIDTH..HALF_WIDTH);
        let y = rng.gen_range(-HALF_HEIGHT..HALF_HEIGHT);

        commands.spawn((
            Sprite {
                color: star_color(star.rgb, star.brightness),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            Transform::from_xyz(x, y, -50.0),
            star,
        ));
    }

    for i in 0..NEBULA_COUNT {
        let size = rng.gen_range(100.0..300.0);
        let [r, g, b, a] = NEBULA_COLORS[rng.gen_range(0..NEBULA_COLORS.len())];
        let x = rng.gen_range(-HALF_WIDTH..HALF_WIDTH);
        let y = rng.gen_range(-HALF_HEIGHT..HALF_HEIGHT);

        commands
            .spawn((
                Nebula {
                    size,
                    drift: rng.gen_range(0.05..0.15),
                },
                Transform::from_xyz(x, y, -60.0 - i as f32),
                Visibility::default(),
            ))
            .with_children(|parent| {
                // Shrinking, fading layers scattered around the centre
                for layer in 0..rng.gen_range(3..=5) {
                    let fraction = 1.0 - layer as f32 * 0.15;
                    let alpha = a as f32 / 255.0 * (0.8 - layer as f32 * 0.15);
                    let offset = Vec2::new(
                        rng.gen_range(-0.3..0.3) * size,
                        rng.gen_range(-0.3..0.3) * size,
                    );
                    let color = Color::srgba_u8(r, g, b, 255).with_alpha(alpha.max(0.0));

                    parent.spawn((
                        Mesh2d(meshes.add(Circle::new(size * fraction / 2.0))),
                        MeshMaterial2d(materials.add(color)),
                        Transform::from_translation(offset.extend(layer as f32 * 0.01)),
                    ));
                }
            });
    }

    info!("Background ready: {} stars, {} nebulae", STAR_COUNT, NEBULA_COUNT);
}

/// Stars twinkle always; everything drifts left unless the game is paused.
pub fn drift_background(
    app_state: Res<State<AppState>>,
    mut stars: Query<(&mut Star, &mut Transform, &mut Sprite), Without<Nebula>>,
    mut nebulae: Query<(&Nebula, &mut Transform), Without<Star>>,
) {
    let moving = *app_state.get() != AppState::Paused;
    let mut rng = rand::thread_rng();

    for (mut star, mut transform, mut sprite) in stars.iter_mut() {
        star.twinkle_phase = (star.twinkle_phase + star.twinkle_speed) % 360.0;
        sprite.color = star_color(star.rgb, twinkle_brightness(star.brightness, star.twinkle_phase));

        if moving {
            transform.translation.x -= star.speed;
            if let Some(x) = wrapped_x(transform.translation.x, 5.0) {
                transform.translation.x = x;
                transform.translation.y = rng.gen_range(-HALF_HEIGHT..HALF_HEIGHT);
            }
        }
    }

    if !moving {
        return;
    }

    for (nebula, mut transform) in nebulae.iter_mut() {
        transform.translation.x -= nebula.drift;
        if let Some(x) = wrapped_x(transform.translation.x, nebula.size) {
            transform.translation.x = x;
            transform.translation.y = rng.gen_range(-HALF_HEIGHT..HALF_HEIGHT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twinkle_range() {
        assert!((twinkle_brightness(150.0, 270.0) - 150.0).abs() < 1e-3);
        assert!((twinkle_brightness(150.0, 90.0) - 200.0).abs() < 1e-3);
        // Capped at full brightness
        assert_eq!(twinkle_brightness(240.0, 90.0), 255.0);
    }

    #[test]
    fn test_wrap_only_after_leaving() {
        assert_eq!(wrapped_x(-400.0, 5.0), None);
        assert_eq!(wrapped_x(-406.0, 5.0), Some(405.0));
        assert_eq!(wrapped_x(-650.0, 200.0), Some(600.0));
    }
}
