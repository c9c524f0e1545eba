//! Bounded ship movement.
//!
//! Every ship moves through the same clamp rule: the desired delta for the
//! frame is limited, per axis, to the room left between the ship's bounding
//! box and the edges of its band.  The player owns the lower half of the
//! world, enemies the upper half; both span the full width.

use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::Rect;
use crate::input::{Direction, InputSource};
use crate::ship::{Ship, ShipKind};

/// Room left to move from the current position.  `left` and `down` are
/// ≤ 0, `right` and `up` are ≥ 0 while the ship is inside its band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub left: f32,
    pub right: f32,
    pub down: f32,
    pub up: f32,
}

impl Limits {
    /// Limits for `rect` inside `[0, width] × [floor, ceiling]`.
    pub fn within(rect: &Rect, width: f32, floor: f32, ceiling: f32) -> Self {
        Self {
            left: -rect.x,
            right: width - rect.right(),
            down: floor - rect.y,
            up: ceiling - rect.top(),
        }
    }

    pub fn clamp(&self, dx: f32, dy: f32) -> (f32, f32) {
        (
            clamp_delta(dx, self.left, self.right),
            clamp_delta(dy, self.down, self.up),
        )
    }
}

/// Positive deltas are capped by `positive_room`, everything else is
/// floored at `negative_room`.
pub fn clamp_delta(desired: f32, negative_room: f32, positive_room: f32) -> f32 {
    if desired > 0.0 {
        desired.min(positive_room)
    } else {
        desired.max(negative_room)
    }
}

pub fn player_limits(ship: &Ship, world_width: f32, world_height: f32) -> Limits {
    Limits::within(&ship.rect, world_width, 0.0, world_height / 2.0)
}

pub fn enemy_limits(ship: &Ship, world_width: f32, world_height: f32) -> Limits {
    Limits::within(&ship.rect, world_width, world_height / 2.0, world_height)
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Move the player from keyboard and pointer input.
///
/// Held directions add `speed · dt` along their axis.  An active pointer
/// then pulls the ship toward the pointer at `speed · dt`, unless the pointer
/// is within `pointer_threshold` of the ship center.
pub fn move_player(
    ship: &mut Ship,
    input: &impl InputSource,
    dt: f32,
    world_width: f32,
    world_height: f32,
    pointer_threshold: f32,
) {
    let step = ship.movement_speed * dt;

    let axis = |neg: Direction, pos: Direction| -> f32 {
        let mut v = 0.0;
        if input.is_direction_pressed(pos) {
            v += step;
        }
        if input.is_direction_pressed(neg) {
            v -= step;
        }
        v
    };
    let dx = axis(Direction::Left, Direction::Right);
    let dy = axis(Direction::Down, Direction::Up);
    if dx != 0.0 || dy != 0.0 {
        let (dx, dy) = player_limits(ship, world_width, world_height).clamp(dx, dy);
        ship.translate(dx, dy);
    }

    if input.is_pointer_active() {
        let (tx, ty) = input.pointer_world_position();
        let (cx, cy) = ship.rect.center();
        let (ox, oy) = (tx - cx, ty - cy);
        let distance = (ox * ox + oy * oy).sqrt();
        if distance > pointer_threshold {
            let (dx, dy) = (ox / distance * step, oy / distance * step);
            let (dx, dy) = player_limits(ship, world_width, world_height).clamp(dx, dy);
            ship.translate(dx, dy);
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Where an enemy wants to go each frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Steering {
    /// Heads along `direction` and picks a new random unit heading every
    /// `change_every` seconds.
    Wander {
        direction: (f32, f32),
        since_change: f32,
        change_every: f32,
    },
    /// Constant direction vector (not normalized).
    Fixed { dx: f32, dy: f32 },
    Still,
}

impl Steering {
    /// Wandering steering that starts out heading straight down.
    pub fn wander(change_every: f32) -> Self {
        Steering::Wander {
            direction: (0.0, -1.0),
            since_change: 0.0,
            change_every,
        }
    }

    pub fn direction(&self) -> (f32, f32) {
        match *self {
            Steering::Wander { direction, .. } => direction,
            Steering::Fixed { dx, dy } => (dx, dy),
            Steering::Still => (0.0, 0.0),
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        if let Steering::Wander {
            direction,
            since_change,
            change_every,
        } = self
        {
            *since_change += dt;
            if *since_change > *change_every {
                let bearing = rng.gen::<f32>() * TAU;
                *direction = (bearing.sin(), bearing.cos());
                *since_change %= *change_every;
            }
        }
    }
}

/// Move an enemy along its steering direction, clamped to the upper band.
pub fn move_enemy(ship: &mut Ship, dt: f32, world_width: f32, world_height: f32) {
    let (dir_x, dir_y) = match &ship.kind {
        ShipKind::Enemy { steering } => steering.direction(),
        ShipKind::Player { .. } => return,
    };
    let step = ship.movement_speed * dt;
    let (dx, dy) = enemy_limits(ship, world_width, world_height).clamp(dir_x * step, dir_y * step);
    ship.translate(dx, dy);
}
