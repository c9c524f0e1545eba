//! Runtime game configuration, optionally loaded from a TOML file.
//!
//! Every field defaults to the matching value in [`crate::constants`], and
//! every section is `#[serde(default)]`, so a file can override a single key:
//!
//! ```toml
//! [enemy]
//! spawn_interval = 1.5
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub effects: EffectsConfig,
    pub scoring: ScoringConfig,
    pub input: InputConfig,
    pub background: BackgroundConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

/// Stats shared by both ship variants, assembled from the per-variant
/// config sections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipStats {
    pub movement_speed: f32,
    pub shield: u32,
    pub width: f32,
    pub height: f32,
    pub laser_width: f32,
    pub laser_height: f32,
    pub laser_speed: f32,
    pub time_between_shots: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub movement_speed: f32,
    pub shield: u32,
    pub width: f32,
    pub height: f32,
    pub laser_width: f32,
    pub laser_height: f32,
    pub laser_speed: f32,
    pub time_between_shots: f32,
    pub lives: i32,
    pub respawn_shield: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub movement_speed: f32,
    pub shield: u32,
    pub width: f32,
    pub height: f32,
    pub laser_width: f32,
    pub laser_height: f32,
    pub laser_speed: f32,
    pub time_between_shots: f32,
    pub spawn_interval: f32,
    pub spawn_margin: f32,
    pub spawn_top_offset: f32,
    pub direction_change_interval: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub explosion_duration: f32,
    pub explosion_frames: u32,
    pub particle_duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub enemy_reward: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub pointer_threshold: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Parallax layers, at most [`MAX_BACKGROUND_LAYERS`].
    pub layers: usize,
    /// Fastest layer speed as a fraction of the world height per second.
    pub scroll_fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frames longer than this many seconds are clamped.
    pub max_frame_dt: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

impl PlayerConfig {
    pub fn stats(&self) -> ShipStats {
        ShipStats {
            movement_speed: self.movement_speed,
            shield: self.shield,
            width: self.width,
            height: self.height,
            laser_width: self.laser_width,
            laser_height: self.laser_height,
            laser_speed: self.laser_speed,
            time_between_shots: self.time_between_shots,
        }
    }
}

impl EnemyConfig {
    pub fn stats(&self) -> ShipStats {
        ShipStats {
            movement_speed: self.movement_speed,
            shield: self.shield,
            width: self.width,
            height: self.height,
            laser_width: self.laser_width,
            laser_height: self.laser_height,
            laser_speed: self.laser_speed,
            time_between_shots: self.time_between_shots,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            movement_speed: PLAYER_MOVEMENT_SPEED,
            shield: PLAYER_SHIELD,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            laser_width: PLAYER_LASER_WIDTH,
            laser_height: PLAYER_LASER_HEIGHT,
            laser_speed: PLAYER_LASER_SPEED,
            time_between_shots: PLAYER_TIME_BETWEEN_SHOTS,
            lives: PLAYER_LIVES,
            respawn_shield: PLAYER_RESPAWN_SHIELD,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            movement_speed: ENEMY_MOVEMENT_SPEED,
            shield: ENEMY_SHIELD,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            laser_width: ENEMY_LASER_WIDTH,
            laser_height: ENEMY_LASER_HEIGHT,
            laser_speed: ENEMY_LASER_SPEED,
            time_between_shots: ENEMY_TIME_BETWEEN_SHOTS,
            spawn_interval: ENEMY_SPAWN_INTERVAL,
            spawn_margin: ENEMY_SPAWN_MARGIN,
            spawn_top_offset: ENEMY_SPAWN_TOP_OFFSET,
            direction_change_interval: ENEMY_DIRECTION_CHANGE_INTERVAL,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            explosion_duration: EXPLOSION_DURATION,
            explosion_frames: EXPLOSION_FRAMES,
            particle_duration: PARTICLE_DURATION,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            enemy_reward: ENEMY_REWARD,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pointer_threshold: POINTER_MOVEMENT_THRESHOLD,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            layers: BACKGROUND_LAYERS,
            scroll_fraction: BACKGROUND_SCROLL_FRACTION,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: MAX_FRAME_DELTA,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            effects: EffectsConfig::default(),
            scoring: ScoringConfig::default(),
            input: InputConfig::default(),
            background: BackgroundConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(contents).map_err(|e| GameError::ConfigParse {
            path: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&contents).map_err(|e| GameError::ConfigParse {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;

        validate_ship("player", &self.player.stats())?;
        validate_ship("enemy", &self.enemy.stats())?;

        if self.player.width > self.world.width {
            return Err(GameError::InvalidConfig {
                field: "player.width",
                value: self.player.width,
                reason: "ship must fit across the world",
            });
        }
        if self.enemy.width > self.world.width {
            return Err(GameError::InvalidConfig {
                field: "enemy.width",
                value: self.enemy.width,
                reason: "ship must fit across the world",
            });
        }

        let band = self.world.height / 2.0;
        if self.player.height > band {
            return Err(GameError::InvalidConfig {
                field: "player.height",
                value: self.player.height,
                reason: "ship must fit in the lower half of the world",
            });
        }
        if self.enemy.height > band {
            return Err(GameError::InvalidConfig {
                field: "enemy.height",
                value: self.enemy.height,
                reason: "ship must fit in the upper half of the world",
            });
        }

        positive("enemy.spawn_interval", self.enemy.spawn_interval)?;
        positive(
            "enemy.direction_change_interval",
            self.enemy.direction_change_interval,
        )?;
        if self.enemy.spawn_margin < self.enemy.width / 2.0
            || self.world.width - 2.0 * self.enemy.spawn_margin < 0.0
        {
            return Err(GameError::InvalidConfig {
                field: "enemy.spawn_margin",
                value: self.enemy.spawn_margin,
                reason: "margin must keep a spawned enemy inside the world",
            });
        }

        if self.enemy.spawn_top_offset < self.enemy.height / 2.0 {
            return Err(GameError::InvalidConfig {
                field: "enemy.spawn_top_offset",
                value: self.enemy.spawn_top_offset,
                reason: "offset must keep a spawned enemy below the top of the world",
            });
        }

        positive("effects.explosion_duration", self.effects.explosion_duration)?;
        positive("effects.particle_duration", self.effects.particle_duration)?;
        if self.effects.explosion_frames == 0 {
            return Err(GameError::InvalidConfig {
                field: "effects.explosion_frames",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !(self.input.pointer_threshold >= 0.0) {
            return Err(GameError::InvalidConfig {
                field: "input.pointer_threshold",
                value: self.input.pointer_threshold,
                reason: "must not be negative",
            });
        }

        let layers = self.background.layers;
        if layers == 0 || layers > MAX_BACKGROUND_LAYERS {
            return Err(GameError::InvalidConfig {
                field: "background.layers",
                value: layers as f32,
                reason: "must be between 1 and 32",
            });
        }
        let fraction = self.background.scroll_fraction;
        if !(fraction.is_finite() && fraction >= 0.0) {
            return Err(GameError::InvalidConfig {
                field: "background.scroll_fraction",
                value: fraction,
                reason: "must be a finite, non-negative number",
            });
        }

        positive("timing.max_frame_dt", self.timing.max_frame_dt)?;
        if !self.timing.max_frame_dt.is_finite() {
            return Err(GameError::InvalidConfig {
                field: "timing.max_frame_dt",
                value: self.timing.max_frame_dt,
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

fn validate_ship(prefix: &'static str, stats: &ShipStats) -> GameResult<()> {
    let fields: [(&'static str, &'static str, f32); 6] = [
        ("player.movement_speed", "enemy.movement_speed", stats.movement_speed),
        ("player.width", "enemy.width", stats.width),
        ("player.height", "enemy.height", stats.height),
        ("player.laser_height", "enemy.laser_height", stats.laser_height),
        ("player.laser_speed", "enemy.laser_speed", stats.laser_speed),
        (
            "player.time_between_shots",
            "enemy.time_between_shots",
            stats.time_between_shots,
        ),
    ];
    for (player_field, enemy_field, value) in fields {
        let field = if prefix == "player" { player_field } else { enemy_field };
        positive(field, value)?;
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> GameResult<()> {
    // `!(x > 0)` also rejects NaN.
    if !(value > 0.0) {
        Err(GameError::InvalidConfig {
            field,
            value,
            reason: "must be greater than zero",
        })
    } else {
        Ok(())
    }
}
