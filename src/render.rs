//! Draw-call generation.
//!
//! The game never touches graphics resources.  [`draw_frame`] walks the
//! state and hands a [`Visual`] plus a world-space rectangle to whatever
//! [`Canvas`] the front end provides; textures, sprite batching and
//! projection are the canvas's business.

use crate::entities::{GameState, LaserOwner, Rect};
use crate::ship::Ship;

/// What to draw; the canvas maps each variant to its own asset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    /// Starfield layer, slowest first.
    Background { layer: usize },
    PlayerShip,
    PlayerShield,
    EnemyShip,
    EnemyShield,
    PlayerLaser,
    EnemyLaser,
    Explosion { frame: u32 },
    /// `progress` runs from 0 to 1 over the burst's lifetime.
    Particles { progress: f32 },
}

pub trait Canvas {
    fn draw(&mut self, visual: Visual, x: f32, y: f32, width: f32, height: f32);

    fn draw_rect(&mut self, visual: Visual, rect: &Rect) {
        self.draw(visual, rect.x, rect.y, rect.width, rect.height);
    }
}

/// Emit every draw call for one frame, back to front: background, enemies,
/// player, lasers, explosions, particles.
pub fn draw_frame(state: &GameState, canvas: &mut impl Canvas) {
    let (width, height) = (state.world_width(), state.world_height());

    // Layers are twice the world height so the scroll never shows a gap.
    for (layer, offset) in state.background.offsets.iter().enumerate() {
        canvas.draw(Visual::Background { layer }, 0.0, -offset, width, height * 2.0);
    }

    for enemy in &state.enemies {
        draw_ship(canvas, enemy, Visual::EnemyShip, Visual::EnemyShield);
    }
    draw_ship(canvas, &state.player, Visual::PlayerShip, Visual::PlayerShield);

    for laser in state.player_lasers.iter().chain(&state.enemy_lasers) {
        let visual = match laser.owner {
            LaserOwner::Player => Visual::PlayerLaser,
            LaserOwner::Enemy => Visual::EnemyLaser,
        };
        canvas.draw_rect(visual, &laser.rect);
    }

    for explosion in &state.explosions {
        canvas.draw_rect(
            Visual::Explosion {
                frame: explosion.frame_index(),
            },
            &explosion.rect,
        );
    }
    for particles in &state.particles {
        canvas.draw_rect(
            Visual::Particles {
                progress: particles.progress(),
            },
            &particles.rect,
        );
    }
}

fn draw_ship(canvas: &mut impl Canvas, ship: &Ship, hull: Visual, shield: Visual) {
    canvas.draw_rect(hull, &ship.rect);
    if ship.shield > 0 {
        canvas.draw_rect(shield, &ship.rect);
    }
}
