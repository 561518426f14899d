use glam::Vec2;
use rand::Rng;

use crate::config::ArenaConfig;
use crate::entity::{Enemy, GameState};

/// Drops a fresh enemy just above the top edge at a random column.
pub fn spawn_enemy<R: Rng>(state: &mut GameState, arena: &ArenaConfig, rng: &mut R) {
    let tuning = &arena.enemy;
    let min = tuning.spawn_margin;
    let max = arena.width - tuning.spawn_margin;
    let x = if max > min {
        rng.gen_range(min..max)
    } else {
        arena.width / 2.0
    };
    let enemy = Enemy::new(Vec2::new(x, -tuning.spawn_offset), tuning);
    log::debug!("Spawned enemy at x={:.1}", x);
    state.enemies.push(enemy);
}
