//! Ships: one entity type with a closed set of variants.
//!
//! Both variants share movement, firing cadence, shield absorption and
//! collision; only the firing pattern and the variant data differ.

use crate::config::ShipStats;
use crate::entities::{Laser, LaserOwner, Rect};
use crate::movement::Steering;

#[derive(Clone, Debug, PartialEq)]
pub enum ShipKind {
    /// Fires two lasers upward from its wingtips.
    Player { lives: i32 },
    /// Fires two lasers downward from under its hull.
    Enemy { steering: Steering },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub kind: ShipKind,
    pub rect: Rect,
    /// World units per second.
    pub movement_speed: f32,
    pub shield: u32,
    pub laser_width: f32,
    pub laser_height: f32,
    pub laser_speed: f32,
    pub time_between_shots: f32,
    pub time_since_last_shot: f32,
}

impl Ship {
    fn new(kind: ShipKind, stats: &ShipStats, x_center: f32, y_center: f32) -> Self {
        Self {
            kind,
            rect: Rect::centered(x_center, y_center, stats.width, stats.height),
            movement_speed: stats.movement_speed,
            shield: stats.shield,
            laser_width: stats.laser_width,
            laser_height: stats.laser_height,
            laser_speed: stats.laser_speed,
            time_between_shots: stats.time_between_shots,
            time_since_last_shot: 0.0,
        }
    }

    pub fn player(stats: &ShipStats, lives: i32, x_center: f32, y_center: f32) -> Self {
        Self::new(ShipKind::Player { lives }, stats, x_center, y_center)
    }

    pub fn enemy(stats: &ShipStats, steering: Steering, x_center: f32, y_center: f32) -> Self {
        Self::new(ShipKind::Enemy { steering }, stats, x_center, y_center)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ShipKind::Player { .. })
    }

    /// Remaining lives; `None` for enemies.
    pub fn lives(&self) -> Option<i32> {
        match self.kind {
            ShipKind::Player { lives } => Some(lives),
            ShipKind::Enemy { .. } => None,
        }
    }

    /// Advance the shot cooldown.
    pub fn update(&mut self, dt: f32) {
        self.time_since_last_shot += dt;
    }

    pub fn can_shoot(&self) -> bool {
        self.time_since_last_shot - self.time_between_shots >= 0.0
    }

    /// Fire one volley and restart the cooldown.  Callers check
    /// [`Ship::can_shoot`] first.
    pub fn fire_lasers(&mut self) -> Vec<Laser> {
        debug_assert!(self.can_shoot(), "fire_lasers called during cooldown");
        self.time_since_last_shot = 0.0;

        let r = self.rect;
        match self.kind {
            ShipKind::Player { .. } => {
                let y = r.y + r.height * 0.45;
                vec![
                    self.laser(r.x + r.width * 0.07, y, LaserOwner::Player),
                    self.laser(r.x + r.width * 0.93, y, LaserOwner::Player),
                ]
            }
            ShipKind::Enemy { .. } => {
                let y = r.y - self.laser_height;
                vec![
                    self.laser(r.x + r.width * 0.18, y, LaserOwner::Enemy),
                    self.laser(r.x + r.width * 0.82, y, LaserOwner::Enemy),
                ]
            }
        }
    }

    fn laser(&self, x_center: f32, y: f32, owner: LaserOwner) -> Laser {
        Laser::new(
            x_center,
            y,
            self.laser_width,
            self.laser_height,
            self.laser_speed,
            owner,
        )
    }

    /// Absorb a hit.  A charged shield loses one point and the ship
    /// survives; a ship with no shield left is destroyed.
    pub fn hit_and_check_destroyed(&mut self) -> bool {
        if self.shield > 0 {
            self.shield -= 1;
            false
        } else {
            true
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.rect.overlaps(other)
    }

    /// Move by an already-clamped delta.  See [`crate::movement`].
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.rect.x += dx;
        self.rect.y += dy;
    }

    /// Player only: spend a life and restore the shield.
    pub fn lose_life(&mut self, respawn_shield: u32) {
        if let ShipKind::Player { lives } = &mut self.kind {
            *lives -= 1;
            self.shield = respawn_shield;
        }
    }
}
