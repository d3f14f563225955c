//! Game Tuning Constants
//!
//! Every number the simulation depends on. Distances are screen units
//! (800x600 playfield, +y down), durations are frames at 60 FPS.

// =============================================================================
// SCREEN
// =============================================================================

/// Playfield width
pub const SCREEN_WIDTH: f32 = 800.0;
/// Playfield height
pub const SCREEN_HEIGHT: f32 = 600.0;
/// Simulation rate (frames per second)
pub const FPS: u32 = 60;

// =============================================================================
// SHIP
// =============================================================================

pub const SHIP_WIDTH: f32 = 40.0;
pub const SHIP_HEIGHT: f32 = 30.0;
/// Units moved per frame per pressed direction
pub const SHIP_SPEED: f32 = 5.0;
pub const SHIP_START_X: f32 = SCREEN_WIDTH / 4.0;
pub const SHIP_START_Y: f32 = SCREEN_HEIGHT / 2.0;
pub const MAX_LIVES: u32 = 3;
pub const INVULNERABILITY_FRAMES: u32 = 120;
pub const DAMAGE_FLASH_FRAMES: u32 = 10;

// =============================================================================
// ASTEROIDS
// =============================================================================

pub const ASTEROID_MIN_RADIUS: i32 = 20;
pub const ASTEROID_MAX_RADIUS: i32 = 50;
pub const ASTEROID_BASE_SPEED: f32 = 5.0;
/// Frames between spawns at difficulty 1.0
pub const ASTEROID_SPAWN_FREQUENCY: u32 = 60;
/// Spawn interval never drops below this
pub const ASTEROID_MIN_SPAWN_INTERVAL: u32 = 30;
pub const MAX_ASTEROIDS: usize = 8;
pub const INITIAL_ASTEROIDS: usize = 5;
/// Horizontal gap between the initial wave of asteroids
pub const INITIAL_ASTEROID_SPACING: f32 = 300.0;
/// Spawned asteroids keep this far from the bottom edge
pub const ASTEROID_SPAWN_BOTTOM_MARGIN: i32 = 100;
pub const LARGE_ASTEROID_RADIUS: f32 = 40.0;
pub const MEDIUM_ASTEROID_RADIUS: f32 = 25.0;
pub const MIN_ASTEROID_POINTS: u32 = 10;
/// Positions remembered for motion ghosts
pub const MOTION_BLUR_POSITIONS: usize = 3;

// =============================================================================
// LASERS
// =============================================================================

pub const LASER_WIDTH: f32 = 20.0;
pub const LASER_HEIGHT: f32 = 6.0;
pub const LASER_SPEED: f32 = 10.0;
pub const LASER_COOLDOWN_FRAMES: u32 = 10;
pub const RAPID_FIRE_COOLDOWN: u32 = 5;
/// Spread shot fan half-angle (degrees)
pub const SPREAD_SHOT_ANGLE: f32 = 15.0;
pub const LASER_TRAIL_LENGTH: usize = 5;

// =============================================================================
// POWER-UPS
// =============================================================================

pub const POWERUP_SIZE: f32 = 20.0;
pub const POWERUP_SPEED: f32 = 3.0;
/// Chance that a laser-destroyed asteroid drops a pickup
pub const POWERUP_SPAWN_CHANCE: f32 = 0.1;
pub const POWERUP_DURATION: u32 = 420;
pub const SHIELD_DURATION: u32 = 600;
/// Stacked timers are capped at this multiple of one pickup
pub const POWERUP_STACK_LIMIT: u32 = 2;
pub const TIME_SLOW_MULTIPLIER: f32 = 0.5;
pub const MAGNET_PULL_SPEED: f32 = 3.0;
pub const NUKE_BOSS_DAMAGE: i32 = 3;

// =============================================================================
// BOSS
// =============================================================================

pub const BOSS_RADIUS: f32 = 80.0;
pub const BOSS_HEALTH: f32 = 15.0;
/// A boss is due every this many points
pub const BOSS_SPAWN_INTERVAL: u32 = 2500;
pub const BOSS_WARNING_DURATION: u32 = 180;
pub const BOSS_POINTS: u32 = 500;
pub const BOSS_ANCHOR_X: f32 = SCREEN_WIDTH - 150.0;
pub const BOSS_ANCHOR_Y: f32 = SCREEN_HEIGHT / 2.0;

// =============================================================================
// COMBO
// =============================================================================

pub const COMBO_TIMEOUT: u32 = 120;
pub const COMBO_MULTIPLIERS: [u32; 6] = [1, 2, 3, 5, 8, 10];

// =============================================================================
// DIFFICULTY
// =============================================================================

/// Each milestone reached adds `DIFFICULTY_STEP` to the level
pub const SCORE_MILESTONES: [u32; 21] = [
    0, 400, 1000, 2000, 3500, 5500, 8000, 11000, 15000, 20000, 26000, 33000, 41000, 50000,
    60000, 71000, 83000, 90000, 95000, 98000, 100000,
];
pub const DIFFICULTY_STEP: f32 = 0.1;
pub const MAX_DIFFICULTY: f32 = 3.0;

// Theme thresholds
pub const THEME_BLUE_MAX: u32 = 1000;
pub const THEME_PURPLE_MAX: u32 = 5000;

// =============================================================================
// STORAGE
// =============================================================================

pub const MAX_HIGH_SCORES: usize = 10;
pub const MAX_NAME_LENGTH: usize = 15;
pub const HIGH_SCORE_FILE: &str = "high_score.txt";
pub const SETTINGS_FILE: &str = "settings.txt";
pub const VOLUME_STEP: f32 = 0.1;
