//! Per-frame simulation tick
//!
//! Order within a tick: player, enemies, collectables, spawners, lifecycle.
//! Time comes in as a monotonic millisecond timestamp; the player integrates
//! against the wall-clock delta since its previous update.

use super::collision::overlaps;
use super::spawn::SpawnKind;
use super::state::{GameEvent, GamePhase, GameState};
use crate::input::InputSource;

/// Advance the game to `now` (ms). Does nothing while on the menu.
pub fn tick(state: &mut GameState, input: &dyn InputSource, now: f64) {
    if !state.is_running() {
        return;
    }

    update_player(state, input, now);
    update_enemies(state, now);
    update_collectables(state, now);
    run_spawners(state, now);
    update_lifecycle(state, now);
}

fn update_player(state: &mut GameState, input: &dyn InputSource, now: f64) {
    let (world, surface_y) = (state.world, state.surface_y);
    state.player.update(input, world, surface_y, now);
    state.player.clamp_to_surface(surface_y);
}

fn update_enemies(state: &mut GameState, now: f64) {
    let (world, surface_y) = (state.world, state.surface_y);
    let compenetration = state.config.enemy_compenetration;
    let damage = state.config.player.enemy_damage;

    // Backwards so removal keeps earlier indices valid
    for i in (0..state.enemies.len()).rev() {
        let enemy = &mut state.enemies[i];
        enemy.update(world, surface_y);

        let hit = overlaps(state.player.body.bounds(), enemy.body.bounds(), compenetration);
        let offscreen = enemy.offscreen;

        if hit && state.player.take_damage(damage, None, now) {
            log::debug!("Enemy hit, breath now {:.1}", state.player.breath);
            state.emit(GameEvent::PlayerHit { damage });
        }

        if offscreen {
            state.enemies.remove(i);
        }
    }
}

fn update_collectables(state: &mut GameState, now: f64) {
    let compenetration = state.config.collectable_compenetration;

    for i in (0..state.collectables.len()).rev() {
        let item = &mut state.collectables[i];
        item.update(now);

        let touched = !item.is_done()
            && overlaps(state.player.body.bounds(), item.body.bounds(), compenetration);

        if touched {
            item.collect();
            let (id, bad) = (item.id, item.is_bad());
            let score_delta = if bad {
                bad_item_contact(state, now)
            } else {
                state.config.collectable_score
            };
            state.score += score_delta;
            state.emit(GameEvent::ItemCollected { id, bad, score_delta });
        } else if item.is_done() {
            let id = item.id;
            state.emit(GameEvent::ItemExpired { id });
        }

        if state.collectables[i].is_done() {
            state.collectables.remove(i);
        }
    }
}

/// Breath damage with a short window, plus a flash even when the hit is blocked
fn bad_item_contact(state: &mut GameState, now: f64) -> i64 {
    let invul_ms = state.config.player.collectable_invul_ms;
    let damage = state.config.bad_collectable_damage;

    if !state.player.take_damage(damage, Some(invul_ms), now) {
        log::debug!("Bad item damage blocked by invulnerability");
    }
    state.player.flash(Some(invul_ms), now);

    -state.config.bad_collectable_penalty
}

fn run_spawners(state: &mut GameState, now: f64) {
    if now >= state.timers.enemy_at {
        state.spawn_enemy();
        state.timers.enemy_at = now + state.roll_delay(SpawnKind::Enemy);
    }

    if now >= state.timers.good_item_at {
        state.spawn_collectable(false, now);
        state.timers.good_item_at = now + state.roll_delay(SpawnKind::GoodItem);
    }

    if now >= state.timers.bad_item_at {
        state.spawn_collectable(true, now);
        state.timers.bad_item_at = now + state.roll_delay(SpawnKind::BadItem);
    }
}

fn update_lifecycle(state: &mut GameState, now: f64) {
    if state.phase == GamePhase::Playing && state.player.is_out_of_breath() {
        state.phase = GamePhase::Dying { since: now };
        log::info!("Out of breath with score {}", state.score);
        let score = state.score;
        state.emit(GameEvent::PlayerDied { score });
    }

    if let GamePhase::Dying { since } = state.phase {
        if now - since >= state.config.death_fade_ms {
            state.reset_to_menu(now);
        }
    }
}
