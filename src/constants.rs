//! Compile-time defaults for every tunable value.
//!
//! [`crate::config::GameConfig::default`] is built from these, so a TOML file
//! only has to mention the values it wants to change.

// ── World ─────────────────────────────────────────────────────────────────────

/// Width of the logical world (world units).
pub const WORLD_WIDTH: f32 = 72.0;

/// Height of the logical world (world units).
///
/// The lower half is the player's band, the upper half the enemies'.
pub const WORLD_HEIGHT: f32 = 128.0;

// ── Player ship ───────────────────────────────────────────────────────────────

pub const PLAYER_MOVEMENT_SPEED: f32 = 48.0;
pub const PLAYER_SHIELD: u32 = 3;
pub const PLAYER_WIDTH: f32 = 10.0;
pub const PLAYER_HEIGHT: f32 = 10.0;
pub const PLAYER_LASER_WIDTH: f32 = 0.4;
pub const PLAYER_LASER_HEIGHT: f32 = 4.0;
pub const PLAYER_LASER_SPEED: f32 = 45.0;
/// Seconds between player volleys.
pub const PLAYER_TIME_BETWEEN_SHOTS: f32 = 0.5;
pub const PLAYER_LIVES: i32 = 3;
/// Shield restored after the player loses a life.
pub const PLAYER_RESPAWN_SHIELD: u32 = 10;

// ── Enemy ships ───────────────────────────────────────────────────────────────

pub const ENEMY_MOVEMENT_SPEED: f32 = 48.0;
pub const ENEMY_SHIELD: u32 = 1;
pub const ENEMY_WIDTH: f32 = 10.0;
pub const ENEMY_HEIGHT: f32 = 10.0;
pub const ENEMY_LASER_WIDTH: f32 = 0.3;
pub const ENEMY_LASER_HEIGHT: f32 = 5.0;
pub const ENEMY_LASER_SPEED: f32 = 50.0;
/// Seconds between enemy volleys.
pub const ENEMY_TIME_BETWEEN_SHOTS: f32 = 0.8;
/// A wandering enemy picks a new random heading this often (seconds).
pub const ENEMY_DIRECTION_CHANGE_INTERVAL: f32 = 0.75;

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Seconds between enemy spawns.
pub const ENEMY_SPAWN_INTERVAL: f32 = 3.0;
/// Horizontal inset kept clear on both sides when picking a spawn center.
pub const ENEMY_SPAWN_MARGIN: f32 = 5.0;
/// Distance of the spawn center below the top of the world.
pub const ENEMY_SPAWN_TOP_OFFSET: f32 = 5.0;

// ── Combat & effects ──────────────────────────────────────────────────────────

pub const ENEMY_REWARD: u32 = 100;
pub const EXPLOSION_DURATION: f32 = 1.6;
/// Number of animation frames in the explosion sheet (4 × 4).
pub const EXPLOSION_FRAMES: u32 = 16;
pub const PARTICLE_DURATION: f32 = 1.0;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Pointer targets closer than this to the ship center are ignored.
pub const POINTER_MOVEMENT_THRESHOLD: f32 = 0.5;

// ── Background ────────────────────────────────────────────────────────────────

pub const BACKGROUND_LAYERS: usize = 4;
/// Scroll speed of the fastest layer as a fraction of the world height per
/// second; each slower layer halves it.
pub const BACKGROUND_SCROLL_FRACTION: f32 = 0.25;

/// `Background::advance` halves the speed per layer with a `u32` shift.
pub const MAX_BACKGROUND_LAYERS: usize = 32;

// ── Timing ────────────────────────────────────────────────────────────────────

/// Longest frame the simulation advances in one step, in seconds.  Longer
/// frames are clamped to this.
pub const MAX_FRAME_DELTA: f32 = 10.0;
