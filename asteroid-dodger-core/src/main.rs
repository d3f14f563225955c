//! Asteroid Dodger headless simulator
//!
//! Plays a scripted session, then replays its input recording and checks
//! that both runs end in the same state.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use asteroid_dodger::{
    GameConfig, GameState, InputFrame, InputRecording, TICK_RATE, VERSION,
    game::{
        events::GameEvent,
        tick::{tick, replay_session},
    },
};

/// Five minutes of play.
const DEMO_FRAMES: u64 = 5 * 60 * TICK_RATE as u64;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Asteroid Dodger simulator v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let config = GameConfig::from_env();
    let seed = config.session_seed();

    demo_session(seed)
}

/// Autopilot: weave up and down and fire whenever the gun is ready.
fn scripted_input(frame: u64) -> InputFrame {
    let mut input = InputFrame::new();
    match (frame / 45) % 4 {
        0 => input.set(InputFrame::UP, true),
        2 => input.set(InputFrame::DOWN, true),
        _ => {}
    }
    input.set(InputFrame::RIGHT, (frame / 120) % 5 == 0);
    input.set(InputFrame::LEFT, (frame / 120) % 5 == 2);
    input.set(InputFrame::FIRE, frame % 3 == 0);
    input
}

fn demo_session(seed: u64) -> Result<()> {
    info!("=== Starting Demo Session ===");
    info!("RNG Seed: {}", seed);

    let mut state = GameState::new(seed);
    let mut recording = InputRecording::new(seed);

    let mut total_events = 0;
    let mut asteroids_destroyed = 0;
    let mut bosses_defeated = 0;

    for frame in 0..DEMO_FRAMES {
        let input = scripted_input(frame);
        recording.record(input);

        let result = tick(&mut state, input);
        total_events += result.events.len();

        for event in &result.events {
            match event {
                GameEvent::AsteroidDestroyed { .. } => asteroids_destroyed += 1,
                GameEvent::BossDefeated { .. } => bosses_defeated += 1,
                GameEvent::PowerUpCollected { kind, .. } => {
                    info!("Frame {}: collected {}", state.frame, kind.label());
                }
                _ => {}
            }
        }

        // Report every 30 seconds
        if frame > 0 && frame % (30 * TICK_RATE as u64) == 0 {
            info!(
                "Frame {}: score {}, lives {}, difficulty {:.1}, {} asteroids",
                state.frame,
                state.score,
                state.ship.lives,
                state.difficulty,
                state.asteroids.len()
            );
        }

        if result.game_over {
            break;
        }
    }

    // Print final results
    info!("=== Session Results ===");
    info!("Frames played: {}", state.frame);
    info!("Final score: {}", state.score);
    info!("Asteroids destroyed: {}", asteroids_destroyed);
    info!("Bosses defeated: {}", bosses_defeated);
    info!("Total events: {}", total_events);
    info!(
        "Recording: {} frames, {} input changes, digest {}",
        recording.frame_count,
        recording.deltas().len(),
        hex::encode(recording.compute_hash())
    );

    let hash = state.compute_hash().context("hashing final state")?;
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let inputs: Vec<InputFrame> = recording.replay_iter().map(|(_, input)| input).collect();
    let (replay_final, replay_events) = replay_session(seed, &inputs);
    let replay_hash = replay_final.compute_hash().context("hashing replayed state")?;

    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        warn!("replay produced {} events, live run {}", replay_events.len(), total_events);
        bail!("determinism failure: state hashes differ");
    }

    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}
