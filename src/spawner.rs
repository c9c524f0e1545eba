//! Timer-driven enemy spawning.

use rand::Rng;

use crate::config::GameConfig;
use crate::movement::Steering;
use crate::ship::Ship;

#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    /// Seconds accumulated since the last spawn.
    pub timer: f32,
    pub interval: f32,
}

impl Spawner {
    pub fn new(interval: f32) -> Self {
        Self { timer: 0.0, interval }
    }

    /// Add `dt` and return how many enemies are due.
    ///
    /// The interval is subtracted rather than the timer reset, so a long
    /// frame yields every spawn it covered: 7.0s at a 3.0s interval is two
    /// spawns with 1.0s carried over.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.timer += dt;
        if self.timer <= self.interval {
            return 0;
        }
        // Smallest n with timer - n·interval <= interval.  Computed rather
        // than looped: at large timers an f32 subtraction can be a no-op.
        let due = (self.timer / self.interval - 1.0).ceil().max(1.0);
        self.timer = (self.timer - due * self.interval).max(0.0);
        due as usize
    }
}

/// Build an enemy at a random horizontal position near the top of the world.
///
/// The center is drawn uniformly from `[margin, width - margin)`.
pub fn spawn_enemy(config: &GameConfig, rng: &mut impl Rng) -> Ship {
    let enemy = &config.enemy;
    let width = config.world.width;
    let x_center = rng.gen::<f32>() * (width - 2.0 * enemy.spawn_margin) + enemy.spawn_margin;
    let y_center = config.world.height - enemy.spawn_top_offset;
    Ship::enemy(
        &enemy.stats(),
        Steering::wander(enemy.direction_change_interval),
        x_center,
        y_center,
    )
}
