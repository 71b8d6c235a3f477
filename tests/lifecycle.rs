//! End-to-end runs through the public API, driving time explicitly

use glam::Vec2;
use scuba_dive::input::{Key, KeyState};
use scuba_dive::sim::{
    Collectable, Enemy, GameEvent, GamePhase, GameState, ItemKind, Player, enemy_spawn_params,
    tick,
};
use scuba_dive::{GameConfig, HighScores};

/// Running session with every spawner pushed out of the way
fn quiet_run(now: f64) -> GameState {
    let mut state = GameState::new(&GameConfig::default(), 99, now);
    assert!(state.start(now));
    state.timers.enemy_at = f64::INFINITY;
    state.timers.good_item_at = f64::INFINITY;
    state.timers.bad_item_at = f64::INFINITY;
    state.drain_events();
    state
}

#[test]
fn test_untouched_item_expires_instead_of_being_collected() {
    let mut state = quiet_run(0.0);
    let id = state.next_entity_id();
    state.collectables.push(Collectable::new(
        id,
        ItemKind::Good { variant: 2 },
        Vec2::new(10.0, 380.0),
        Vec2::splat(42.0),
        0.0,
        5000.0,
    ));

    tick(&mut state, &KeyState::new(), 4999.0);
    assert_eq!(state.collectables.len(), 1);

    tick(&mut state, &KeyState::new(), 5001.0);
    assert!(state.collectables.is_empty());
    assert_eq!(state.score, 0);

    let events = state.drain_events();
    assert!(events.contains(&GameEvent::ItemExpired { id }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::ItemCollected { .. })));
}

#[test]
fn test_enemy_hit_on_low_breath_kills_same_tick() {
    let mut state = quiet_run(0.0);
    state.score = 30;
    state.player.breath = 10.0;

    let id = state.next_entity_id();
    let pos = state.player.body.pos;
    state
        .enemies
        .push(Enemy::new(id, pos, Vec2::ZERO, Vec2::new(100.0, 45.0)));

    tick(&mut state, &KeyState::new(), 20.0);

    assert_eq!(state.player.breath, 0.0);
    assert_eq!(state.phase, GamePhase::Dying { since: 20.0 });
    let events = state.drain_events();
    assert!(events.contains(&GameEvent::PlayerHit { damage: 50.0 }));
    assert!(events.contains(&GameEvent::PlayerDied { score: 30 }));
}

#[test]
fn test_bad_item_while_invulnerable_keeps_breath() {
    let mut state = quiet_run(0.0);
    assert!(state.player.take_damage(20.0, None, 0.0));
    let breath = state.player.breath;

    let id = state.next_entity_id();
    let pos = state.player.body.pos;
    state.collectables.push(Collectable::new(
        id,
        ItemKind::Bad { variant: 1 },
        pos,
        Vec2::splat(42.0),
        0.0,
        5000.0,
    ));

    tick(&mut state, &KeyState::new(), 10.0);

    assert_eq!(state.score, -10);
    assert_eq!(state.player.breath, breath);
    assert!(state.player.is_flashing(100.0));
    assert_eq!(
        state.drain_events(),
        vec![GameEvent::ItemCollected {
            id,
            bad: true,
            score_delta: -10
        }]
    );
}

#[test]
fn test_death_fade_returns_to_menu_and_feeds_leaderboard() {
    let config = GameConfig::default();
    let mut state = quiet_run(0.0);
    state.score = 80;
    state.player.breath = 0.0;
    state.player.body.pos = Vec2::new(120.0, 300.0);
    state.player.body.vel = Vec2::new(30.0, 20.0);

    tick(&mut state, &KeyState::new(), 100.0);
    assert!(state.is_dead());
    assert!((state.death_fade_alpha(850.0) - 0.5).abs() < 1e-6);

    tick(&mut state, &KeyState::new(), 1600.0);
    assert_eq!(state.phase, GamePhase::Menu);
    assert_eq!(state.final_score, 80);
    assert_eq!(state.score, 0);
    assert!(state.enemies.is_empty() && state.collectables.is_empty());

    // A fresh diver at the start position, and every spawner rescheduled
    let fresh = Player::new(&config);
    assert_eq!(state.player.body.pos, fresh.body.pos);
    assert_eq!(state.player.body.vel, Vec2::ZERO);
    assert_eq!(state.player.breath, fresh.max_breath);
    assert!(!state.player.is_invulnerable(1600.0));
    assert!(state.timers.enemy_at > 1600.0);
    assert!(state.timers.good_item_at > 1600.0);
    assert!(state.timers.bad_item_at > 1600.0);

    let mut scores = HighScores::new();
    let ranks: Vec<_> = state
        .drain_events()
        .iter()
        .filter_map(|e| scores.record(e, "ann", 0.0))
        .collect();
    assert_eq!(ranks, vec![1]);
    assert_eq!(scores.top_score(), Some(80));

    // Menu is frozen until the next start
    let player_pos = state.player.body.pos;
    tick(&mut state, &KeyState::new(), 5000.0);
    assert_eq!(state.player.body.pos, player_pos);
    assert!(state.start(5000.0));
    assert!(!state.start(5001.0));
}

#[test]
fn test_difficulty_at_250_points() {
    let config = GameConfig::default();
    let (base, variance) = enemy_spawn_params(&config, 250);
    assert!((base - (3000.0f64 * 0.75 * 0.75).max(400.0)).abs() < 1e-9);
    assert!((variance - 1000.0 * 0.75 * 0.75).abs() < 1e-9);
}

#[test]
fn test_diving_costs_breath_and_surface_refills() {
    let mut state = quiet_run(0.0);
    let mut keys = KeyState::new();

    tick(&mut state, &keys, 0.0);
    // Several separate strokes downward
    let mut t = 0.0;
    for _ in 0..5 {
        t += 16.0;
        keys.press(Key::ArrowDown);
        tick(&mut state, &keys, t);
        t += 16.0;
        keys.release(Key::ArrowDown);
        tick(&mut state, &keys, t);
    }
    assert!(state.player.body.pos.y > state.surface_y);
    assert!(state.player.breath < state.player.max_breath);

    // Let buoyancy carry the diver back up
    while t < 20_000.0 && state.player.body.pos.y > state.surface_y {
        t += 16.0;
        tick(&mut state, &keys, t);
    }
    assert_eq!(state.player.body.pos.y, state.surface_y);
    let low = state.player.breath;
    for _ in 0..10 {
        t += 16.0;
        tick(&mut state, &keys, t);
    }
    assert!(state.player.breath > low || state.player.breath == state.player.max_breath);
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let mut state = GameState::new(&GameConfig::default(), seed, 0.0);
        state.start(0.0);
        let keys = KeyState::new();
        let mut t = 0.0;
        while t < 30_000.0 {
            t += 16.0;
            tick(&mut state, &keys, t);
        }
        state
            .drain_events()
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::EnemySpawned { .. } | GameEvent::CollectableSpawned { .. }
                )
            })
            .collect::<Vec<_>>()
    };

    let a = run(5);
    assert!(!a.is_empty());
    assert_eq!(a, run(5));
}
