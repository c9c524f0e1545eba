//! The per-frame game loop.
//!
//! `tick` takes an immutable reference to the current `GameState` (plus the
//! frame's input and an RNG handle) and returns a brand-new `GameState`.
//! All randomness comes through the injected RNG, so a seeded RNG replays a
//! game exactly.
//!
//! The individual steps are public and operate in place on a state, which
//! is how `tick` composes them.

use rand::Rng;

use crate::combat::resolve_collisions;
use crate::config::GameConfig;
use crate::entities::{Background, FrameEvent, GameState};
use crate::input::InputSource;
use crate::movement::{move_enemy, move_player};
use crate::ship::{Ship, ShipKind};
use crate::spawner::{spawn_enemy, Spawner};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: the player centred horizontally a quarter
/// of the way up the world, no enemies, nothing in flight.
pub fn init_state(config: GameConfig) -> GameState {
    let world = config.world;
    let player = Ship::player(
        &config.player.stats(),
        config.player.lives,
        world.width / 2.0,
        world.height / 4.0,
    );
    let spawner = Spawner::new(config.enemy.spawn_interval);
    let background = Background::new(
        config.background.layers,
        world.height * config.background.scroll_fraction,
    );

    GameState {
        config,
        player,
        enemies: Vec::new(),
        player_lasers: Vec::new(),
        enemy_lasers: Vec::new(),
        explosions: Vec::new(),
        particles: Vec::new(),
        background,
        spawner,
        score: 0,
        events: Vec::new(),
        frame: 0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the game by one frame of `dt` seconds.
///
/// Steps run in a fixed order:
/// 1. background scroll
/// 2. player movement from input
/// 3. enemy spawning
/// 4. enemy movement, cooldowns and fire
/// 5. player cooldown and fire
/// 6. laser travel and culling
/// 7. collision resolution
/// 8. effect timers and culling
///
/// Afterwards `hud()` on the returned state reflects the frame.
pub fn tick(
    state: &GameState,
    dt: f32,
    input: &impl InputSource,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    step(&mut next, dt, input, rng);
    next
}

/// In-place version of [`tick`].
pub fn step(state: &mut GameState, dt: f32, input: &impl InputSource, rng: &mut impl Rng) {
    let dt = sanitize_dt(dt, state.config.timing.max_frame_dt);
    state.frame += 1;
    state.events.clear();

    // ── 1. Background ────────────────────────────────────────────────────────
    let world_height = state.world_height();
    state.background.advance(dt, world_height);

    // ── 2. Player movement ───────────────────────────────────────────────────
    move_player(
        &mut state.player,
        input,
        dt,
        state.config.world.width,
        world_height,
        state.config.input.pointer_threshold,
    );

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    spawn_enemies(state, dt, rng);

    // ── 4–5. Ships ───────────────────────────────────────────────────────────
    update_enemies(state, dt, rng);
    update_player(state, dt);

    // ── 6. Lasers ────────────────────────────────────────────────────────────
    advance_lasers(state, dt);

    // ── 7. Combat ────────────────────────────────────────────────────────────
    resolve_collisions(state);

    // ── 8. Effects ───────────────────────────────────────────────────────────
    update_effects(state, dt);

    tracing::trace!(
        frame = state.frame,
        enemies = state.enemies.len(),
        player_lasers = state.player_lasers.len(),
        enemy_lasers = state.enemy_lasers.len(),
        "tick"
    );
}

/// Negative or non-finite frame times are treated as a zero-length frame;
/// frames longer than `max_dt` are clamped to it.
fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !(dt.is_finite() && dt >= 0.0) {
        tracing::warn!(dt, "ignoring invalid frame delta");
        0.0
    } else if dt > max_dt {
        tracing::debug!(dt, max_dt, "clamping long frame");
        max_dt
    } else {
        dt
    }
}

// ── Steps ────────────────────────────────────────────────────────────────────

/// Advance the spawn timer and add any enemies that became due.
pub fn spawn_enemies(state: &mut GameState, dt: f32, rng: &mut impl Rng) {
    let due = state.spawner.advance(dt);
    for _ in 0..due {
        let enemy = spawn_enemy(&state.config, rng);
        tracing::debug!(x = enemy.rect.x, y = enemy.rect.y, "enemy spawned");
        state.events.push(FrameEvent::EnemySpawned { rect: enemy.rect });
        state.enemies.push(enemy);
    }
}

/// Move every enemy, advance its steering and cooldown, and collect the
/// lasers it fires.
pub fn update_enemies(state: &mut GameState, dt: f32, rng: &mut impl Rng) {
    let (width, height) = (state.world_width(), state.world_height());
    for enemy in &mut state.enemies {
        move_enemy(enemy, dt, width, height);
        if let ShipKind::Enemy { steering } = &mut enemy.kind {
            steering.update(dt, rng);
        }
        enemy.update(dt);
        if enemy.can_shoot() {
            state.enemy_lasers.extend(enemy.fire_lasers());
        }
    }
}

/// Advance the player's cooldown and collect its volley, if any.
pub fn update_player(state: &mut GameState, dt: f32) {
    state.player.update(dt);
    if state.player.can_shoot() {
        state.player_lasers.extend(state.player.fire_lasers());
    }
}

/// Move every laser and drop the ones that have left the world.
pub fn advance_lasers(state: &mut GameState, dt: f32) {
    let world_height = state.world_height();
    for lasers in [&mut state.player_lasers, &mut state.enemy_lasers] {
        lasers.retain_mut(|laser| {
            laser.advance(dt);
            !laser.is_out_of_bounds(world_height)
        });
    }
}

/// Run effect timers and drop finished effects.
pub fn update_effects(state: &mut GameState, dt: f32) {
    state.explosions.retain_mut(|explosion| {
        explosion.update(dt);
        !explosion.is_finished()
    });
    state.particles.retain_mut(|particles| {
        particles.update(dt);
        !particles.is_finished()
    });
}
