use space_shooter::config::GameConfig;
use space_shooter::movement::Steering;
use space_shooter::ship::ShipKind;
use space_shooter::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Spawner::advance ──────────────────────────────────────────────────────────

#[test]
fn nothing_due_before_interval() {
    let mut s = Spawner::new(3.0);
    assert_eq!(s.advance(1.0), 0);
    assert_eq!(s.advance(1.0), 0);
    assert_eq!(s.timer, 2.0);
}

#[test]
fn exactly_one_interval_is_not_yet_due() {
    let mut s = Spawner::new(3.0);
    assert_eq!(s.advance(3.0), 0);
    assert_eq!(s.advance(0.5), 1);
    assert_eq!(s.timer, 0.5);
}

#[test]
fn long_frame_spawns_every_covered_interval() {
    let mut s = Spawner::new(3.0);
    assert_eq!(s.advance(7.0), 2);
    assert_eq!(s.timer, 1.0);
}

#[test]
fn remainder_carries_into_next_frame() {
    let mut s = Spawner::new(3.0);
    assert_eq!(s.advance(3.5), 1);
    assert_eq!(s.advance(2.5), 0);
    assert_eq!(s.advance(0.5), 1);
}

#[test]
fn steady_frames_spawn_at_interval() {
    let mut s = Spawner::new(3.0);
    let total: usize = (0..12).map(|_| s.advance(0.5)).sum();
    assert_eq!(total, 1);
    assert_eq!(s.timer, 3.0);
}

#[test]
fn huge_frame_returns_promptly() {
    let mut s = Spawner::new(3.0);
    assert_eq!(s.advance(1.0e6), 333_333);
    assert!((s.timer - 1.0).abs() < 1e-3);
}

#[test]
fn zero_dt_changes_nothing() {
    let mut s = Spawner::new(3.0);
    assert_eq!(s.advance(0.0), 0);
    assert_eq!(s, Spawner::new(3.0));
}

// ── spawn_enemy ───────────────────────────────────────────────────────────────

#[test]
fn spawned_enemy_uses_enemy_stats() {
    let config = GameConfig::default();
    let e = spawn_enemy(&config, &mut seeded_rng());
    assert!(!e.is_player());
    assert_eq!(e.shield, 1);
    assert_eq!(e.rect.width, 10.0);
    assert_eq!(e.rect.height, 10.0);
    assert_eq!(e.movement_speed, 48.0);
    assert_eq!(e.time_since_last_shot, 0.0);
}

#[test]
fn spawned_enemy_starts_wandering_down() {
    let config = GameConfig::default();
    let e = spawn_enemy(&config, &mut seeded_rng());
    match e.kind {
        ShipKind::Enemy { steering } => assert_eq!(steering, Steering::wander(0.75)),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn spawned_enemies_stay_inside_top_of_world() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    for _ in 0..500 {
        let e = spawn_enemy(&config, &mut rng);
        let (cx, cy) = e.rect.center();
        assert!((5.0..67.0).contains(&cx), "center x {} outside margins", cx);
        assert_eq!(cy, 123.0);
        assert_eq!(e.rect.y, 118.0);
        assert!(e.rect.x >= 0.0 && e.rect.right() <= 72.0);
        assert!(e.rect.top() <= 128.0);
    }
}

#[test]
fn spawn_positions_repeat_for_a_seed() {
    let config = GameConfig::default();
    let a = spawn_enemy(&config, &mut seeded_rng());
    let b = spawn_enemy(&config, &mut seeded_rng());
    assert_eq!(a, b);
}
