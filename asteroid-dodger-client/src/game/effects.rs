//! Visual effects - particles, explosions, score popups, shock waves and
//! screen shake, all spawned from simulation events.
//!
//! Effects advance in `FixedUpdate`, so every lifetime below is in
//! simulation frames.

use bevy::prelude::*;
use rand::Rng;

use asteroid_dodger::game::events::{DestroyCause, HitSource};
use asteroid_dodger::game::ship::DamageOutcome;
use asteroid_dodger::{GameEvent, Vec2 as SimVec2};

use super::render::glow;
use super::{to_world, Session, SimEvent};
use crate::MainCamera;

// ============================================================================
// TUNING
// ============================================================================

const EXPLOSION_INITIAL_SIZE: f32 = 10.0;
const EXPLOSION_MAX_SIZE: f32 = 20.0;
const EXPLOSION_GROWTH: f32 = 1.5;

const SCORE_POPUP_LIFETIME: u32 = 60;
const SCORE_POPUP_RISE_SPEED: f32 = 1.5;

const DISTORTION_LIFETIME: u32 = 60;
const NUKE_WAVE_RADIUS: f32 = 600.0;
const BOSS_WAVE_RADIUS: f32 = 400.0;

const SHAKE_DURATION: u32 = 10;
const SHAKE_INTENSITY: f32 = 8.0;

const EXPLOSION_COLORS: [[u8; 3]; 3] = [[255, 150, 50], [255, 200, 100], [255, 100, 20]];
const LASER_PARTICLE_COLORS: [[u8; 3]; 3] = [[0, 255, 255], [100, 255, 255], [150, 255, 255]];
const DEBRIS_COLORS: [[u8; 3]; 3] = [[150, 150, 150], [180, 180, 180], [120, 120, 120]];
const ENGINE_COLORS: [[u8; 3]; 3] = [[255, 150, 50], [255, 200, 100], [255, 100, 20]];
const SPARKLE_COLORS: [[u8; 3]; 3] = [[255, 255, 100], [255, 200, 255], [200, 255, 255]];
const IMPACT_COLORS: [[u8; 3]; 3] = [[255, 255, 255], [255, 200, 100], [255, 150, 50]];
const POPUP_COLOR: [u8; 3] = [255, 255, 100];
const WAVE_COLOR: [u8; 3] = [150, 200, 255];

// ============================================================================
// COMPONENTS
// ============================================================================

/// Marker for everything this module spawns.
#[derive(Component)]
pub struct GameEffect;

/// A fading square spark.
#[derive(Component)]
pub struct Particle {
    /// Screen units per frame, world orientation
    pub velocity: Vec2,
    pub lifetime: u32,
    pub max_lifetime: u32,
    /// Velocity kept each frame
    pub drag: f32,
}

impl Particle {
    /// Opacity for the remaining life.
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime == 0 {
            return 0.0;
        }
        self.lifetime as f32 / self.max_lifetime as f32
    }
}

/// A growing fireball.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Explosion {
    pub size: f32,
    pub max_size: f32,
    pub age: u32,
}

impl Default for Explosion {
    fn default() -> Self {
        Self {
            size: EXPLOSION_INITIAL_SIZE,
            max_size: EXPLOSION_MAX_SIZE,
            age: 0,
        }
    }
}

impl Explosion {
    /// Grow one frame. Returns false once fully grown.
    pub fn advance(&mut self) -> bool {
        self.size += EXPLOSION_GROWTH;
        self.age += 1;
        self.size < self.max_size
    }

    /// 0.0 at birth, 1.0 at the end.
    pub fn progress(&self) -> f32 {
        ((self.size - EXPLOSION_INITIAL_SIZE) / (self.max_size - EXPLOSION_INITIAL_SIZE)).clamp(0.0, 1.0)
    }
}

/// Floating "+N" text.
#[derive(Component)]
pub struct ScorePopup {
    pub lifetime: u32,
}

/// Expanding ring for big blasts.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct DistortionWave {
    pub max_radius: f32,
    pub lifetime: u32,
}

impl DistortionWave {
    pub fn new(max_radius: f32) -> Self {
        Self {
            max_radius,
            lifetime: DISTORTION_LIFETIME,
        }
    }

    /// Fast at first, then easing out.
    pub fn radius(&self) -> f32 {
        let progress = 1.0 - self.lifetime as f32 / DISTORTION_LIFETIME as f32;
        self.max_radius * progress.powf(0.7)
    }

    pub fn alpha(&self) -> f32 {
        self.lifetime as f32 / DISTORTION_LIFETIME as f32
    }
}

// ============================================================================
// SCREEN SHAKE
// ============================================================================

/// Remaining shake frames and the current camera offset.
#[derive(Resource, Default, Debug)]
pub struct ScreenShake {
    pub frames: u32,
    pub offset: Vec2,
}

impl ScreenShake {
    /// Start shaking for at least `frames`.
    pub fn trigger(&mut self, frames: u32) {
        self.frames = self.frames.max(frames);
    }
}

/// Shake length for an event, if it shakes the screen.
pub fn shake_frames(event: &GameEvent) -> Option<u32> {
    match event {
        // No shake on the fatal hit
        GameEvent::ShipHit { outcome: DamageOutcome::Destroyed, .. } => None,
        GameEvent::ShipHit { source: HitSource::Asteroid { .. }, .. } => Some(SHAKE_DURATION),
        GameEvent::ShipHit { source: HitSource::Boss, .. } => Some(SHAKE_DURATION * 2),
        GameEvent::BossHit { .. } => Some(SHAKE_DURATION / 2),
        GameEvent::NukeDetonated { .. } => Some(SHAKE_DURATION * 2),
        GameEvent::BossDefeated { .. } => Some(SHAKE_DURATION * 3),
        _ => None,
    }
}

// ============================================================================
// SPAWNING
// ============================================================================

fn pick(rng: &mut impl Rng, colors: &[[u8; 3]; 3]) -> [u8; 3] {
    colors[rng.gen_range(0..colors.len())]
}

/// Velocity for a burst particle, converted to world orientation.
fn burst_velocity(rng: &mut impl Rng, min_speed: f32, max_speed: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let speed = rng.gen_range(min_speed..max_speed);
    Vec2::new(angle.cos(), angle.sin()) * speed
}

fn spawn_particle(
    commands: &mut Commands,
    at: Vec2,
    velocity: Vec2,
    color: [u8; 3],
    size: f32,
    lifetime: u32,
    drag: f32,
) {
    commands.spawn((
        Particle {
            velocity,
            lifetime,
            max_lifetime: lifetime,
            drag,
        },
        Sprite {
            color: glow(color, 1.5),
            custom_size: Some(Vec2::splat(size)),
            ..default()
        },
        Transform::from_translation(at.extend(8.0)),
        GameEffect,
    ));
}

fn spawn_explosion(commands: &mut Commands, rng: &mut impl Rng, at: Vec2) {
    commands.spawn((Explosion::default(), Transform::from_translation(at.extend(9.0)), GameEffect));

    // Sparks
    for _ in 0..rng.gen_range(8..=12) {
        let velocity = burst_velocity(rng, 1.5, 3.5);
        let size = rng.gen_range(2..=4) as f32 * 2.0;
        let lifetime = rng.gen_range(10..=20);
        spawn_particle(commands, at, velocity, pick(rng, &EXPLOSION_COLORS), size, lifetime, 0.95);
    }
}

fn spawn_debris(commands: &mut Commands, rng: &mut impl Rng, at: Vec2, count: u32) {
    for _ in 0..count {
        let velocity = burst_velocity(rng, 1.0, 4.0);
        let size = rng.gen_range(2..=4) as f32;
        spawn_particle(commands, at, velocity, pick(rng, &DEBRIS_COLORS), size, 40, 1.0);
    }
}

fn spawn_impact(commands: &mut Commands, rng: &mut impl Rng, at: Vec2) {
    for _ in 0..5 {
        let velocity = burst_velocity(rng, 2.0, 5.0);
        spawn_particle(commands, at, velocity, pick(rng, &IMPACT_COLORS), 3.0, 15, 1.0);
    }
}

fn spawn_sparkle(commands: &mut Commands, rng: &mut impl Rng, at: Vec2) {
    let velocity = burst_velocity(rng, 0.5, 1.5);
    spawn_particle(commands, at, velocity, pick(rng, &SPARKLE_COLORS), 2.0, 20, 1.0);
}

fn spawn_popup(commands: &mut Commands, at: Vec2, points: u32) {
    let font_size = match points {
        0..=99 => 22.0,
        100..=499 => 28.0,
        _ => 34.0,
    };
    commands.spawn((
        Text2d::new(format!("+{}", points)),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(glow(POPUP_COLOR, 1.2)),
        Transform::from_translation(at.extend(20.0)).with_scale(Vec3::splat(0.5)),
        ScorePopup {
            lifetime: SCORE_POPUP_LIFETIME,
        },
        GameEffect,
    ));
}

fn spawn_wave(commands: &mut Commands, at: Vec2, max_radius: f32) {
    commands.spawn((
        DistortionWave::new(max_radius),
        Transform::from_translation(at.extend(15.0)),
        GameEffect,
    ));
}

/// Turn this tick's simulation events into effects.
pub fn spawn_event_effects(
    mut commands: Commands,
    mut events: EventReader<SimEvent>,
    mut shake: ResMut<ScreenShake>,
) {
    let mut rng = rand::thread_rng();

    for SimEvent(event) in events.read() {
        if let Some(frames) = shake_frames(event) {
            shake.trigger(frames);
        }

        match event {
            GameEvent::LaserFired { origin, count } => {
                let at = to_world(*origin);
                for _ in 0..*count * 2 {
                    let velocity = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
                    spawn_particle(&mut commands, at, velocity, pick(&mut rng, &LASER_PARTICLE_COLORS), 2.0, 15, 1.0);
                }
            }
            GameEvent::AsteroidDestroyed { position, radius, points, cause } => {
                let at = to_world(*position);
                spawn_explosion(&mut commands, &mut rng, at);
                let debris = match cause {
                    DestroyCause::Laser => {
                        spawn_impact(&mut commands, &mut rng, at);
                        radius / 3.0
                    }
                    DestroyCause::Ship => radius / 2.0,
                    DestroyCause::Nuke => radius / 4.0,
                };
                spawn_debris(&mut commands, &mut rng, at, debris as u32);
                if *points > 0 {
                    spawn_popup(&mut commands, at, *points);
                }
            }
            GameEvent::BossHit { position, .. } => {
                spawn_impact(&mut commands, &mut rng, to_world(*position));
            }
            GameEvent::BossDefeated { position, points } => {
                let at = to_world(*position);
                for _ in 0..5 {
                    let offset = Vec2::new(rng.gen_range(-30.0..30.0), rng.gen_range(-30.0..30.0));
                    spawn_explosion(&mut commands, &mut rng, at + offset);
                }
                spawn_debris(&mut commands, &mut rng, at, 50);
                spawn_popup(&mut commands, at, *points);
                spawn_wave(&mut commands, at, BOSS_WAVE_RADIUS);
            }
            GameEvent::NukeDetonated { origin } => {
                spawn_wave(&mut commands, to_world(*origin), NUKE_WAVE_RADIUS);
            }
            GameEvent::PowerUpCollected { position, .. } => {
                let at = to_world(*position);
                for _ in 0..8 {
                    spawn_sparkle(&mut commands, &mut rng, at);
                }
            }
            _ => {}
        }
    }
}

/// Engine exhaust behind the ship and sparkles around pickups.
pub fn spawn_ambient_particles(mut commands: Commands, session: Res<Session>) {
    let mut rng = rand::thread_rng();
    let state = &session.state;
    if state.game_over {
        return;
    }

    let exhaust = to_world(SimVec2::new(state.ship.x, state.ship.y));
    for _ in 0..2 {
        let velocity = Vec2::new(rng.gen_range(-3.0..-1.0), rng.gen_range(-0.5..0.5));
        let size = rng.gen_range(2..=3) as f32;
        spawn_particle(&mut commands, exhaust, velocity, pick(&mut rng, &ENGINE_COLORS), size, 10, 1.0);
    }

    for powerup in &state.powerups {
        if rng.gen_bool(0.1) {
            spawn_sparkle(&mut commands, &mut rng, to_world(powerup.position));
        }
    }
}

// ============================================================================
// UPDATES
// ============================================================================

pub fn update_particles(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    for (entity, mut particle, mut transform, mut sprite) in query.iter_mut() {
        transform.translation += particle.velocity.extend(0.0);
        let drag = particle.drag;
        particle.velocity *= drag;

        particle.lifetime = particle.lifetime.saturating_sub(1);
        if particle.lifetime == 0 {
            commands.entity(entity).despawn();
            continue;
        }

        sprite.color = sprite.color.with_alpha(particle.alpha());
    }
}

pub fn update_explosions(mut commands: Commands, mut query: Query<(Entity, &mut Explosion)>) {
    for (entity, mut explosion) in query.iter_mut() {
        if !explosion.advance() {
            commands.entity(entity).despawn();
        }
    }
}

pub fn update_score_popups(
    mut commands: Commands,
    mut query: Query<(Entity, &mut ScorePopup, &mut Transform, &mut TextColor)>,
) {
    for (entity, mut popup, mut transform, mut color) in query.iter_mut() {
        popup.lifetime = popup.lifetime.saturating_sub(1);
        if popup.lifetime == 0 {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation.y += SCORE_POPUP_RISE_SPEED;

        // Pop in over the first 15 % of its life
        let progress = 1.0 - popup.lifetime as f32 / SCORE_POPUP_LIFETIME as f32;
        let scale = if progress < 0.15 { 0.5 + progress / 0.15 * 0.5 } else { 1.0 };
        transform.scale = Vec3::splat(scale);

        color.0 = color.0.with_alpha(popup.lifetime as f32 / SCORE_POPUP_LIFETIME as f32);
    }
}

pub fn update_distortion_waves(mut commands: Commands, mut query: Query<(Entity, &mut DistortionWave)>) {
    for (entity, mut wave) in query.iter_mut() {
        wave.lifetime = wave.lifetime.saturating_sub(1);
        if wave.lifetime == 0 {
            commands.entity(entity).despawn();
        }
    }
}

pub fn update_screen_shake(mut shake: ResMut<ScreenShake>) {
    if shake.frames > 0 {
        shake.frames -= 1;
        let mut rng = rand::thread_rng();
        shake.offset = Vec2::new(
            rng.gen_range(-SHAKE_INTENSITY..=SHAKE_INTENSITY),
            rng.gen_range(-SHAKE_INTENSITY..=SHAKE_INTENSITY),
        );
    } else {
        shake.offset = Vec2::ZERO;
    }
}

pub fn apply_screen_shake(
    shake: Res<ScreenShake>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera.get_single_mut() else {
        return;
    };
    transform.translation.x = shake.offset.x;
    transform.translation.y = shake.offset.y;
}

// ============================================================================
// DRAWING
// ============================================================================

pub fn draw_explosions(query: Query<(&Explosion, &Transform)>, mut gizmos: Gizmos) {
    for (explosion, transform) in query.iter() {
        let at = transform.translation.truncate();
        let progress = explosion.progress();

        // Bright core early, dark red late
        let color = if progress < 0.3 {
            EXPLOSION_COLORS[1]
        } else if progress < 0.6 {
            EXPLOSION_COLORS[0]
        } else {
            EXPLOSION_COLORS[2]
        };

        for layer in 0..4 {
            let fraction = (4 - layer) as f32 / 4.0;
            let alpha = (1.0 - progress) * fraction;
            gizmos.circle_2d(at, explosion.size * fraction, glow(color, 2.5).with_alpha(alpha));
        }

        if progress < 0.2 {
            gizmos.circle_2d(at, (explosion.size * 0.3).max(3.0), glow([255, 255, 255], 4.0));
        }
    }
}

pub fn draw_distortion_waves(query: Query<(&DistortionWave, &Transform)>, mut gizmos: Gizmos) {
    for (wave, transform) in query.iter() {
        let at = transform.translation.truncate();
        for ring in 0..3 {
            let radius = wave.radius() - ring as f32 * 20.0;
            if radius <= 0.0 {
                continue;
            }
            let alpha = 0.4 * wave.alpha() * (1.0 - ring as f32 * 0.3);
            gizmos.circle_2d(at, radius, glow(WAVE_COLOR, 1.5).with_alpha(alpha)).resolution(64);
        }
    }
}

/// Drop every leftover effect and settle the camera.
pub fn clear_effects(
    mut commands: Commands,
    effects: Query<Entity, With<GameEffect>>,
    mut shake: ResMut<ScreenShake>,
) {
    for entity in effects.iter() {
        commands.entity(entity).despawn_recursive();
    }
    *shake = ScreenShake::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_lifetime() {
        let mut explosion = Explosion::default();
        let mut frames = 1;
        while explosion.advance() {
            frames += 1;
        }
        // 10 -> 20 in steps of 1.5
        assert_eq!(frames, 7);
        assert_eq!(explosion.progress(), 1.0);
    }

    #[test]
    fn test_wave_radius_eases_out() {
        let mut wave = DistortionWave::new(400.0);
        assert_eq!(wave.radius(), 0.0);

        wave.lifetime = DISTORTION_LIFETIME / 2;
        let half = wave.radius();
        assert!(half > 200.0 && half < 400.0);

        wave.lifetime = 0;
        assert!((wave.radius() - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_shake_frames_by_event() {
        let at = SimVec2::new(0.0, 0.0);
        let rock_hit = GameEvent::ship_hit(at, DamageOutcome::Damaged, HitSource::Asteroid { radius: 30.0 });
        let boss_hit = GameEvent::ship_hit(at, DamageOutcome::Damaged, HitSource::Boss);

        assert_eq!(shake_frames(&rock_hit), Some(10));
        assert_eq!(shake_frames(&boss_hit), Some(20));
        assert_eq!(shake_frames(&GameEvent::BossDefeated { position: at, points: 500 }), Some(30));
        assert_eq!(shake_frames(&GameEvent::GameOver { score: 1 }), None);
    }

    #[test]
    fn test_fatal_hit_does_not_shake() {
        let at = SimVec2::new(0.0, 0.0);
        let rock = HitSource::Asteroid { radius: 20.0 };
        assert_eq!(shake_frames(&GameEvent::ship_hit(at, DamageOutcome::Destroyed, rock)), None);
        assert_eq!(shake_frames(&GameEvent::ship_hit(at, DamageOutcome::Destroyed, HitSource::Boss)), None);
        // A shielded hit still shakes
        assert_eq!(shake_frames(&GameEvent::ship_hit(at, DamageOutcome::ShieldAbsorbed, rock)), Some(10));
    }

    #[test]
    fn test_shake_keeps_longest() {
        let mut shake = ScreenShake::default();
        shake.trigger(20);
        shake.trigger(5);
        assert_eq!(shake.frames, 20);
    }

    #[test]
    fn test_particle_alpha() {
        let p = Particle {
            velocity: Vec2::ZERO,
            lifetime: 10,
            max_lifetime: 40,
            drag: 1.0,
        };
        assert_eq!(p.alpha(), 0.25);
    }
}
