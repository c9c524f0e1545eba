//! Laser-versus-ship collision and combat resolution.
//!
//! One pass per frame.  Order is fixed so results are deterministic:
//! player lasers in firing order, each against enemies in spawn order, then
//! enemy lasers against the player.

use crate::entities::{Explosion, FrameEvent, GameState, Particles};

/// Resolve every laser hit for this frame.
///
/// A player laser is consumed by the first enemy it overlaps, whether or not
/// that enemy survives, so one laser never damages two ships.  A destroyed
/// enemy is removed, pays out the reward and leaves a particle burst.
///
/// An enemy laser that overlaps the player is consumed; if the hit destroys
/// the player, an explosion is created, a life is spent and the shield is
/// restored.
pub fn resolve_collisions(state: &mut GameState) {
    let GameState {
        config,
        player,
        enemies,
        player_lasers,
        enemy_lasers,
        explosions,
        particles,
        score,
        events,
        ..
    } = state;

    // ── Player lasers → enemies ───────────────────────────────────────────────
    player_lasers.retain(|laser| {
        let Some(index) = enemies.iter().position(|e| e.intersects(&laser.rect)) else {
            return true;
        };

        if enemies[index].hit_and_check_destroyed() {
            let enemy = enemies.remove(index);
            let reward = config.scoring.enemy_reward;
            *score = score.saturating_add(reward);
            particles.push(Particles::new(enemy.rect, config.effects.particle_duration));
            events.push(FrameEvent::EnemyDestroyed {
                rect: enemy.rect,
                reward,
            });
            events.push(FrameEvent::ParticlesCreated { rect: enemy.rect });
            tracing::debug!(score = *score, "enemy destroyed");
        }
        false
    });

    // ── Enemy lasers → player ─────────────────────────────────────────────────
    enemy_lasers.retain(|laser| {
        if !player.intersects(&laser.rect) {
            return true;
        }

        if player.hit_and_check_destroyed() {
            let duration = config.effects.explosion_duration;
            explosions.push(Explosion::new(
                player.rect,
                duration,
                config.effects.explosion_frames,
            ));
            events.push(FrameEvent::ExplosionCreated {
                rect: player.rect,
                duration,
            });
            player.lose_life(config.player.respawn_shield);
            let lives = player.lives().unwrap_or(0);
            events.push(FrameEvent::LifeLost { lives });
            tracing::info!(lives, "player lost a life");
        } else {
            events.push(FrameEvent::PlayerHit {
                shield: player.shield,
            });
        }
        false
    });
}
