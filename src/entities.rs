//! Game entity types: plain data plus the small per-entity behaviors
//! (laser travel, effect timers).  Ships live in `ship.rs`.

use crate::config::GameConfig;
use crate::ship::Ship;
use crate::spawner::Spawner;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units.  `(x, y)` is the bottom-left
/// corner; y grows upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Open-interval overlap: rectangles that only share an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LaserOwner {
    /// Travels up.
    Player,
    /// Travels down.
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub rect: Rect,
    /// Magnitude only; the direction comes from `owner`.
    pub speed: f32,
    pub owner: LaserOwner,
}

impl Laser {
    /// `x_center` is the horizontal center, `y` the bottom edge.
    pub fn new(x_center: f32, y: f32, width: f32, height: f32, speed: f32, owner: LaserOwner) -> Self {
        Self {
            rect: Rect::new(x_center - width / 2.0, y, width, height),
            speed,
            owner,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        match self.owner {
            LaserOwner::Player => self.rect.y += self.speed * dt,
            LaserOwner::Enemy => self.rect.y -= self.speed * dt,
        }
    }

    /// True once the laser has fully left the world through the edge it is
    /// travelling towards.
    pub fn is_out_of_bounds(&self, world_height: f32) -> bool {
        match self.owner {
            LaserOwner::Player => self.rect.y >= world_height,
            LaserOwner::Enemy => self.rect.top() <= 0.0,
        }
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// Animated explosion shown where the player ship was destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub rect: Rect,
    pub duration: f32,
    pub elapsed: f32,
    /// Frames in the animation sheet.
    pub frames: u32,
}

impl Explosion {
    pub fn new(rect: Rect, duration: f32, frames: u32) -> Self {
        Self {
            rect,
            duration,
            elapsed: 0.0,
            frames,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed > self.duration
    }

    /// Animation frame to show, clamped to the last frame.
    pub fn frame_index(&self) -> u32 {
        let per_frame = self.duration / self.frames as f32;
        ((self.elapsed / per_frame) as u32).min(self.frames - 1)
    }
}

/// Particle burst left behind by a destroyed enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct Particles {
    pub rect: Rect,
    pub duration: f32,
    pub elapsed: f32,
}

impl Particles {
    pub fn new(rect: Rect, duration: f32) -> Self {
        Self {
            rect,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Fraction of the burst already played, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// Parallax starfield scroll offsets.  Purely cosmetic.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    /// One offset per layer, slowest first.
    pub offsets: Vec<f32>,
    pub max_scroll_speed: f32,
}

impl Background {
    pub fn new(layers: usize, max_scroll_speed: f32) -> Self {
        Self {
            offsets: vec![0.0; layers],
            max_scroll_speed,
        }
    }

    /// Layer `i` of `n` scrolls at `max / 2^(n-1-i)`; an offset past
    /// `world_height` wraps back to zero.
    pub fn advance(&mut self, dt: f32, world_height: f32) {
        let layers = self.offsets.len();
        for (i, offset) in self.offsets.iter_mut().enumerate() {
            let divisor = (1u32 << (layers - 1 - i)) as f32;
            *offset += dt * self.max_scroll_speed / divisor;
            if *offset > world_height {
                *offset = 0.0;
            }
        }
    }
}

// ── Frame events ──────────────────────────────────────────────────────────────

/// Something that happened during the last `tick`.  The list is cleared at
/// the start of every frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    EnemySpawned { rect: Rect },
    EnemyDestroyed { rect: Rect, reward: u32 },
    /// A particle burst was created at `rect`.
    ParticlesCreated { rect: Rect },
    /// An explosion was created at `rect`.
    ExplosionCreated { rect: Rect, duration: f32 },
    PlayerHit { shield: u32 },
    LifeLost { lives: i32 },
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Read-only numbers shown by the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub shield: u32,
    /// Goes negative once the last life is lost.
    pub lives: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so `tick` can return a new copy
/// without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Ship,
    /// Live enemies in spawn order.
    pub enemies: Vec<Ship>,
    pub player_lasers: Vec<Laser>,
    pub enemy_lasers: Vec<Laser>,
    pub explosions: Vec<Explosion>,
    pub particles: Vec<Particles>,
    pub background: Background,
    pub spawner: Spawner,
    pub score: u32,
    /// Events produced by the most recent `tick`.
    pub events: Vec<FrameEvent>,
    pub frame: u64,
}

impl GameState {
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            shield: self.player.shield,
            lives: self.player.lives().unwrap_or(0),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.hud().lives < 0
    }

    pub fn world_width(&self) -> f32 {
        self.config.world.width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world.height
    }
}
