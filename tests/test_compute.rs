use space_shooter::compute::*;
use space_shooter::config::GameConfig;
use space_shooter::entities::*;
use space_shooter::input::{Direction, InputState};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPS: f32 = 1e-3;

fn make_state() -> GameState {
    init_state(GameConfig::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn random_input(rng: &mut StdRng) -> InputState {
    let mut input = InputState::none();
    for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
        input.set(direction, rng.gen_bool(0.4));
    }
    if rng.gen_bool(0.2) {
        input.pointer = Some((rng.gen_range(0.0..72.0), rng.gen_range(0.0..128.0)));
    }
    input
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_places_player() {
    let s = make_state();
    assert!(s.player.is_player());
    assert_eq!(s.player.rect, Rect::new(31.0, 27.0, 10.0, 10.0));
    assert_eq!(s.player.rect.center(), (36.0, 32.0)); // (W/2, H/4)
}

#[test]
fn init_state_starts_empty() {
    let s = make_state();
    assert!(s.enemies.is_empty());
    assert!(s.player_lasers.is_empty());
    assert!(s.enemy_lasers.is_empty());
    assert!(s.explosions.is_empty());
    assert!(s.particles.is_empty());
    assert!(s.events.is_empty());
    assert_eq!(s.frame, 0);
    assert_eq!(s.spawner.timer, 0.0);
    assert_eq!(s.spawner.interval, 3.0);
    assert_eq!(s.background.offsets, vec![0.0; 4]);
}

#[test]
fn init_state_hud() {
    let s = make_state();
    assert_eq!(s.hud(), Hud { score: 0, shield: 3, lives: 3 });
    assert!(!s.is_game_over());
}

#[test]
fn init_state_uses_config() {
    let mut config = GameConfig::default();
    config.player.lives = 5;
    config.enemy.spawn_interval = 1.5;
    let s = init_state(config);
    assert_eq!(s.hud().lives, 5);
    assert_eq!(s.spawner.interval, 1.5);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_does_not_mutate_input_state() {
    let s = make_state();
    let before = s.clone();
    let next = tick(&s, 0.5, &InputState::holding(Direction::Right), &mut seeded_rng());
    assert_eq!(s, before);
    assert_ne!(next, before);
}

#[test]
fn tick_increments_frame() {
    let s = make_state();
    let s = tick(&s, 0.1, &InputState::none(), &mut seeded_rng());
    let s = tick(&s, 0.1, &InputState::none(), &mut seeded_rng());
    assert_eq!(s.frame, 2);
}

#[test]
fn tick_moves_player_from_input() {
    let s = make_state();
    let next = tick(&s, 0.25, &InputState::holding(Direction::Right), &mut seeded_rng());
    assert_eq!(next.player.rect.x, 43.0);
}

#[test]
fn player_fires_twin_volley_at_cadence() {
    let mut rng = seeded_rng();
    let s = tick(&make_state(), 0.25, &InputState::none(), &mut rng);
    assert!(s.player_lasers.is_empty());
    let s = tick(&s, 0.25, &InputState::none(), &mut rng);
    assert_eq!(s.player_lasers.len(), 2);
    assert!(s.player_lasers.iter().all(|l| l.owner == LaserOwner::Player));
    assert_eq!(s.player.time_since_last_shot, 0.0);
}

#[test]
fn events_only_describe_latest_frame() {
    let mut rng = seeded_rng();
    let s = tick(&make_state(), 3.5, &InputState::none(), &mut rng);
    assert!(!s.events.is_empty());
    let s = tick(&s, 0.0, &InputState::none(), &mut rng);
    assert!(s.events.is_empty());
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn long_frame_spawns_two_enemies() {
    let s = tick(&make_state(), 7.0, &InputState::none(), &mut seeded_rng());
    assert_eq!(s.enemies.len(), 2);
    let spawned = s
        .events
        .iter()
        .filter(|e| matches!(e, FrameEvent::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned, 2);
    assert!((s.spawner.timer - 1.0).abs() < EPS);
}

#[test]
fn no_spawn_before_interval() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player.time_between_shots = 1000.0;
    for _ in 0..6 {
        s = tick(&s, 0.5, &InputState::none(), &mut rng);
    }
    assert!(s.enemies.is_empty());
    s = tick(&s, 0.5, &InputState::none(), &mut rng);
    assert_eq!(s.enemies.len(), 1);
}

// ── Lasers ────────────────────────────────────────────────────────────────────

#[test]
fn fast_laser_leaves_after_ceil_frames() {
    // 128 / (64 · 0.5) = 4 frames.
    let mut s = make_state();
    s.player_lasers.push(Laser::new(36.0, 0.0, 0.4, 4.0, 64.0, LaserOwner::Player));
    for _ in 0..3 {
        advance_lasers(&mut s, 0.5);
    }
    assert_eq!(s.player_lasers.len(), 1);
    advance_lasers(&mut s, 0.5);
    assert!(s.player_lasers.is_empty());
}

#[test]
fn slow_laser_leaves_after_ceil_frames() {
    // ceil(128 / (45 / 60)) = 171 frames.
    let mut s = make_state();
    s.player_lasers.push(Laser::new(36.0, 0.0, 0.4, 4.0, 45.0, LaserOwner::Player));
    for _ in 0..170 {
        advance_lasers(&mut s, 1.0 / 60.0);
    }
    assert_eq!(s.player_lasers.len(), 1);
    advance_lasers(&mut s, 1.0 / 60.0);
    assert!(s.player_lasers.is_empty());
}

#[test]
fn enemy_laser_leaves_through_bottom() {
    let mut s = make_state();
    s.enemy_lasers.push(Laser::new(5.0, 10.0, 0.3, 5.0, 50.0, LaserOwner::Enemy));
    advance_lasers(&mut s, 0.25);
    assert_eq!(s.enemy_lasers.len(), 1);
    assert_eq!(s.enemy_lasers[0].rect.y, -2.5);
    advance_lasers(&mut s, 0.25);
    assert!(s.enemy_lasers.is_empty());
}

// ── dt handling ───────────────────────────────────────────────────────────────

#[test]
fn invalid_dt_is_a_zero_length_frame() {
    for dt in [f32::NAN, -1.0, f32::INFINITY] {
        let s = make_state();
        let next = tick(&s, dt, &InputState::holding(Direction::Up), &mut seeded_rng());
        let mut expected = s.clone();
        expected.frame = 1;
        assert_eq!(next, expected, "dt = {}", dt);
    }
}

#[test]
fn huge_finite_dt_is_clamped_to_max_frame() {
    let mut s = make_state();
    step(&mut s, f32::MAX, &InputState::none(), &mut seeded_rng());
    // Clamped to 10 s: three spawns at a 3 s interval, 1 s carried over.
    assert_eq!(s.frame, 1);
    assert_eq!(s.enemies.len(), 3);
    assert!((s.spawner.timer - 1.0).abs() < EPS);
    step(&mut s, 1.0e30, &InputState::none(), &mut seeded_rng());
    assert_eq!(s.enemies.len(), 6);
}

#[test]
fn max_frame_dt_comes_from_config() {
    let mut config = GameConfig::default();
    config.timing.max_frame_dt = 0.25;
    let s = tick(&init_state(config), 1.0, &InputState::none(), &mut seeded_rng());
    assert_eq!(s.background.offsets, vec![1.0, 2.0, 4.0, 8.0]);
}

#[test]
fn background_layers_come_from_config() {
    let mut config = GameConfig::default();
    config.background.layers = 2;
    config.background.scroll_fraction = 0.5;
    let s = tick(&init_state(config), 1.0, &InputState::none(), &mut seeded_rng());
    assert_eq!(s.background.offsets, vec![32.0, 64.0]);
}

#[test]
fn zero_dt_changes_nothing_but_frame() {
    let s = make_state();
    let next = tick(&s, 0.0, &InputState::holding(Direction::Left), &mut seeded_rng());
    assert_eq!(next.player, s.player);
    assert_eq!(next.spawner, s.spawner);
    assert_eq!(next.background, s.background);
}

// ── Effects and background ────────────────────────────────────────────────────

#[test]
fn finished_effects_are_dropped() {
    let mut s = make_state();
    let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
    s.explosions.push(Explosion::new(rect, 1.6, 16));
    s.particles.push(Particles::new(rect, 1.0));
    update_effects(&mut s, 1.0);
    assert_eq!(s.explosions.len(), 1);
    assert!(s.particles.is_empty());
    update_effects(&mut s, 0.75);
    assert!(s.explosions.is_empty());
}

#[test]
fn background_scrolls_with_tick() {
    let s = tick(&make_state(), 1.0, &InputState::none(), &mut seeded_rng());
    assert_eq!(s.background.offsets, vec![4.0, 8.0, 16.0, 32.0]);
}

// ── Whole-game properties ─────────────────────────────────────────────────────

#[test]
fn same_seed_replays_identically() {
    let mut input_rng = seeded_rng();
    let inputs: Vec<InputState> = (0..600).map(|_| random_input(&mut input_rng)).collect();

    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);
    let mut a = make_state();
    let mut b = make_state();
    for input in &inputs {
        a = tick(&a, 1.0 / 30.0, input, &mut rng_a);
        b = tick(&b, 1.0 / 30.0, input, &mut rng_b);
        assert_eq!(a, b);
    }
    assert_eq!(a.frame, 600);
}

#[test]
fn long_game_keeps_invariants() {
    let mut input_rng = seeded_rng();
    let mut rng = StdRng::seed_from_u64(99);
    let mut s = make_state();
    let (w, h) = (s.world_width(), s.world_height());

    for _ in 0..3000 {
        let input = random_input(&mut input_rng);
        let prev_score = s.score;
        step(&mut s, 1.0 / 30.0, &input, &mut rng);

        let p = &s.player.rect;
        assert!(p.x >= -EPS && p.right() <= w + EPS);
        assert!(p.y >= -EPS && p.top() <= h / 2.0 + EPS);
        for e in &s.enemies {
            assert!(e.rect.x >= -EPS && e.rect.right() <= w + EPS);
            assert!(e.rect.y >= h / 2.0 - EPS && e.rect.top() <= h + EPS);
            assert!(!e.is_player());
        }
        assert!(s.player_lasers.iter().all(|l| !l.is_out_of_bounds(h)));
        assert!(s.enemy_lasers.iter().all(|l| !l.is_out_of_bounds(h)));
        assert!(s.score >= prev_score);
        assert_eq!(s.score % 100, 0);
        assert_eq!(s.hud().shield, s.player.shield);
    }
}
