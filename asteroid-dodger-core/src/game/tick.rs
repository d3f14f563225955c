//! Authoritative Simulation Tick
//!
//! One call = one frame at 60 FPS. The phase order below is part of the
//! game rules (scores, combo and RNG draws depend on it) and must not be
//! rearranged.

use tracing::{debug, info};

use crate::core::constants::{
    MAX_ASTEROIDS, SCREEN_WIDTH, BOSS_SPAWN_INTERVAL, BOSS_WARNING_DURATION, BOSS_POINTS,
    LASER_COOLDOWN_FRAMES, RAPID_FIRE_COOLDOWN, TIME_SLOW_MULTIPLIER, NUKE_BOSS_DAMAGE,
};
use crate::core::hash::StateHash;
use crate::game::boss::{Boss, BossPattern};
use crate::game::collision::{
    find_laser_asteroid_hits, first_asteroid_hitting_ship, laser_hits_circle,
    remove_indices, ship_hits_circle,
};
use crate::game::difficulty::{level_for_score, spawn_interval};
use crate::game::events::{DestroyCause, GameEvent, HitSource};
use crate::game::input::{InputFrame, InputRecording};
use crate::game::laser::fire_pattern;
use crate::game::powerup::{roll_asteroid_drop, roll_boss_drop, PowerUp, PowerUpKind};
use crate::game::state::GameState;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the session is over
    pub game_over: bool,
}

/// Run one simulation tick.
///
/// # Determinism
///
/// All randomness comes from `state.rng` and every entity list is walked
/// in insertion order, so identical inputs reproduce identical states.
pub fn tick(state: &mut GameState, input: InputFrame) -> TickResult {
    let mut result = TickResult::default();

    if state.game_over {
        result.game_over = true;
        return result;
    }

    state.frame += 1;

    // 1. Trigger
    if input.fire_pressed() && state.laser_cooldown == 0 {
        fire(state);
    }

    // 2. Difficulty from score milestones
    update_difficulty(state);

    // 3. Boss warning / arrival
    update_boss_schedule(state);

    // 4. Ship and timers
    state.ship.update(input);
    state.laser_cooldown = state.laser_cooldown.saturating_sub(1);
    state.timers.tick(&mut state.ship);
    state.combo.tick();

    // 5. Movement
    move_entities(state);

    // 6. New asteroids
    spawn_asteroids(state);

    // 7. Collisions
    process_laser_asteroid_collisions(state);
    process_laser_boss_collisions(state);
    process_ship_asteroid_collision(state);
    process_ship_boss_collision(state);
    process_pickup_collisions(state);

    result.events = state.take_events();
    result.game_over = state.game_over;
    result
}

/// Fire the current shot pattern from the ship's nose.
fn fire(state: &mut GameState) {
    let spread = state.is_active(PowerUpKind::SpreadShot);
    let origin = state.ship.nose();
    let lasers = fire_pattern(origin, spread);

    state.push_event(GameEvent::LaserFired {
        origin,
        count: lasers.len() as u8,
    });
    state.lasers.extend(lasers);

    state.laser_cooldown = if state.is_active(PowerUpKind::RapidFire) {
        RAPID_FIRE_COOLDOWN
    } else {
        LASER_COOLDOWN_FRAMES
    };
}

/// Raise difficulty to the milestone level, never lowering it.
fn update_difficulty(state: &mut GameState) {
    let target = level_for_score(state.score);
    if target > state.difficulty {
        state.difficulty = target;
        debug!(level = target, score = state.score, "difficulty raised");
        state.push_event(GameEvent::DifficultyRaised { level: target });
    }
}

/// Announce a boss every 2500 points, then spawn it after the warning.
fn update_boss_schedule(state: &mut GameState) {
    if state.boss.is_none()
        && state.boss_warning.is_none()
        && state.score >= BOSS_SPAWN_INTERVAL
        && state.score - state.last_boss_spawn_score >= BOSS_SPAWN_INTERVAL
    {
        state.boss_warning = Some(BOSS_WARNING_DURATION);
        state.last_boss_spawn_score = state.score;
        info!(score = state.score, "boss approaching");
        state.push_event(GameEvent::BossWarning {
            frames: BOSS_WARNING_DURATION,
        });
    }

    // The warning counts down on the frame it starts too
    let Some(remaining) = state.boss_warning else {
        return;
    };
    let remaining = remaining.saturating_sub(1);
    if remaining > 0 {
        state.boss_warning = Some(remaining);
        return;
    }

    state.boss_warning = None;
    let pattern = BossPattern::random(&mut state.rng);
    let boss = Boss::new(pattern, state.difficulty);
    info!(
        pattern = pattern.name(),
        health = boss.max_health,
        difficulty = state.difficulty,
        "boss spawned"
    );
    state.push_event(GameEvent::BossSpawned {
        position: boss.position,
        pattern,
        health: boss.max_health,
    });
    state.boss = Some(boss);
}

/// Move lasers, asteroids, boss and pickups; drop whatever left the field.
fn move_entities(state: &mut GameState) {
    for laser in &mut state.lasers {
        laser.update();
    }
    state.lasers.retain(|l| !l.is_off_screen());

    let time_scale = if state.is_active(PowerUpKind::TimeSlow) {
        TIME_SLOW_MULTIPLIER
    } else {
        1.0
    };
    for asteroid in &mut state.asteroids {
        asteroid.update(time_scale);
    }
    state.asteroids.retain(|a| !a.is_off_screen());

    if let Some(boss) = &mut state.boss {
        boss.update();
    }

    let attractor = state
        .is_active(PowerUpKind::Magnet)
        .then(|| state.ship.center());
    for powerup in &mut state.powerups {
        powerup.update(attractor);
    }
    state.powerups.retain(|p| !p.is_off_screen());
}

/// Spawn a rock at the right edge once the interval has elapsed.
fn spawn_asteroids(state: &mut GameState) {
    state.asteroid_spawn_timer += 1;
    if state.asteroids.len() < MAX_ASTEROIDS
        && state.asteroid_spawn_timer >= spawn_interval(state.difficulty)
    {
        state.spawn_asteroid(SCREEN_WIDTH);
        state.asteroid_spawn_timer = 0;
    }
}

// =============================================================================
// COLLISIONS
// =============================================================================

/// Lasers destroy asteroids: combo, score, split and drop roll per rock.
fn process_laser_asteroid_collisions(state: &mut GameState) {
    let hits = find_laser_asteroid_hits(&state.lasers, &state.asteroids);
    if hits.asteroids.is_empty() {
        return;
    }

    let double_damage = state.is_active(PowerUpKind::DoubleDamage);
    let mut children = Vec::new();

    for &idx in &hits.asteroids {
        let asteroid = &state.asteroids[idx];
        let (position, radius, base_points) = (asteroid.position, asteroid.radius, asteroid.points);
        let pieces = asteroid.split(&mut state.rng, state.difficulty);

        state.combo.register_hit();
        let mut points = base_points * state.combo.multiplier();
        if double_damage {
            points *= 2;
        }
        state.score += points;
        state.push_event(GameEvent::asteroid_destroyed(position, radius, points, DestroyCause::Laser));

        children.extend(pieces);

        if let Some(kind) = roll_asteroid_drop(&mut state.rng) {
            state.powerups.push(PowerUp::new(position, kind));
            state.push_event(GameEvent::PowerUpDropped { position, kind });
        }
    }

    remove_indices(&mut state.lasers, &hits.lasers);
    remove_indices(&mut state.asteroids, &hits.asteroids);

    let free = MAX_ASTEROIDS.saturating_sub(state.asteroids.len());
    state.asteroids.extend(children.into_iter().take(free));
}

/// Remaining lasers chip at the boss until it falls.
fn process_laser_boss_collisions(state: &mut GameState) {
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    let (center, radius) = (boss.position, boss.radius);
    let damage = if state.is_active(PowerUpKind::DoubleDamage) { 2 } else { 1 };

    let mut consumed = Vec::new();
    for i in 0..state.lasers.len() {
        if !laser_hits_circle(&state.lasers[i], center, radius) {
            continue;
        }
        consumed.push(i);
        state.combo.register_hit();

        let Some(boss) = state.boss.as_mut() else {
            break;
        };
        let defeated = boss.take_damage(damage);
        let remaining = boss.health;
        state.push_event(GameEvent::BossHit {
            position: center,
            damage,
            remaining,
        });

        if defeated {
            let points = BOSS_POINTS * state.combo.multiplier();
            defeat_boss(state, points);
            break;
        }
    }

    remove_indices(&mut state.lasers, &consumed);
}

/// Score, drop and clear the boss.
fn defeat_boss(state: &mut GameState, points: u32) {
    let Some(boss) = state.boss.take() else {
        return;
    };

    state.score += points;
    state.last_boss_spawn_score = state.score;
    info!(points, score = state.score, "boss defeated");
    state.push_event(GameEvent::BossDefeated {
        position: boss.position,
        points,
    });

    let kind = roll_boss_drop(&mut state.rng);
    state.powerups.push(PowerUp::new(boss.position, kind));
    state.push_event(GameEvent::PowerUpDropped {
        position: boss.position,
        kind,
    });
}

/// Only the first asteroid touching the ship counts.
fn process_ship_asteroid_collision(state: &mut GameState) {
    let Some(idx) = first_asteroid_hitting_ship(&state.ship, &state.asteroids) else {
        return;
    };

    let outcome = state.damage_ship();
    let (position, radius) = (state.asteroids[idx].position, state.asteroids[idx].radius);
    state.push_event(GameEvent::ship_hit(position, outcome, HitSource::Asteroid { radius }));

    if outcome.is_fatal() {
        end_session(state);
        return;
    }

    // Slots are counted with the parent still in the list
    let free = MAX_ASTEROIDS.saturating_sub(state.asteroids.len());
    let children = state.asteroids[idx].split(&mut state.rng, state.difficulty);
    state.asteroids.remove(idx);
    state.asteroids.extend(children.into_iter().take(free));

    state.push_event(GameEvent::asteroid_destroyed(position, radius, 0, DestroyCause::Ship));
    state.combo.reset();
}

fn process_ship_boss_collision(state: &mut GameState) {
    if state.game_over {
        return;
    }
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    if !ship_hits_circle(&state.ship, boss.position, boss.radius) {
        return;
    }

    let position = boss.position;
    let outcome = state.damage_ship();
    state.push_event(GameEvent::ship_hit(position, outcome, HitSource::Boss));

    if outcome.is_fatal() {
        end_session(state);
    } else {
        state.combo.reset();
    }
}

/// Collect every touching pickup, in list order.
fn process_pickup_collisions(state: &mut GameState) {
    if state.game_over {
        return;
    }

    let collected: Vec<usize> = state
        .powerups
        .iter()
        .enumerate()
        .filter(|(_, p)| ship_hits_circle(&state.ship, p.position, p.size))
        .map(|(i, _)| i)
        .collect();
    if collected.is_empty() {
        return;
    }

    let taken: Vec<PowerUp> = collected.iter().map(|&i| state.powerups[i].clone()).collect();
    remove_indices(&mut state.powerups, &collected);

    for pickup in taken {
        state.push_event(GameEvent::PowerUpCollected {
            position: pickup.position,
            kind: pickup.kind,
        });
        if pickup.kind == PowerUpKind::Nuke {
            detonate_nuke(state);
        } else {
            state.timers.activate(pickup.kind, &mut state.ship);
        }
    }
}

/// Clear every asteroid for points and slam the boss.
fn detonate_nuke(state: &mut GameState) {
    let origin = state.ship.center();
    state.push_event(GameEvent::NukeDetonated { origin });

    let multiplier = state.combo.multiplier();
    let asteroids = std::mem::take(&mut state.asteroids);
    for asteroid in &asteroids {
        let points = asteroid.points * multiplier;
        state.score += points;
        state.push_event(GameEvent::asteroid_destroyed(
            asteroid.position,
            asteroid.radius,
            points,
            DestroyCause::Nuke,
        ));
    }
    debug!(cleared = asteroids.len(), score = state.score, "nuke detonated");

    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let defeated = boss.take_damage(NUKE_BOSS_DAMAGE);
    let (position, remaining) = (boss.position, boss.health);
    state.push_event(GameEvent::BossHit {
        position,
        damage: NUKE_BOSS_DAMAGE,
        remaining,
    });
    if defeated {
        defeat_boss(state, BOSS_POINTS);
    }
}

fn end_session(state: &mut GameState) {
    state.game_over = true;
    info!(score = state.score, frame = state.frame, "game over");
    state.push_event(GameEvent::GameOver { score: state.score });
}

// =============================================================================
// REPLAY
// =============================================================================

/// Replay a session from its seed and per-frame inputs.
///
/// Stops early when the session ends. Returns the final state and every
/// event in order.
pub fn replay_session(seed: u64, inputs: &[InputFrame]) -> (GameState, Vec<GameEvent>) {
    let mut state = GameState::new(seed);
    let mut all_events = Vec::new();

    for input in inputs {
        let result = tick(&mut state, *input);
        all_events.extend(result.events);
        if result.game_over {
            break;
        }
    }

    (state, all_events)
}

/// Replay a recording and digest the final state.
pub fn replay_recording(recording: &InputRecording) -> Result<StateHash, bincode::Error> {
    let inputs: Vec<InputFrame> = recording.replay_iter().map(|(_, input)| input).collect();
    let (state, _) = replay_session(recording.seed, &inputs);
    state.compute_hash()
}
