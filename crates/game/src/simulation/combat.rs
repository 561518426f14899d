use crate::config::SHARED_KILL_MULTIPLIER;
use crate::entity::{GameState, PlayerId};
use crate::geometry::distance;

#[derive(Debug, Clone, PartialEq)]
pub struct KillEvent {
    /// Owner of the last bullet that hit the enemy.
    pub killer: Option<PlayerId>,
    /// Points handed out for this kill, killer first.
    pub awarded: Vec<(PlayerId, f32)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub hits: usize,
    pub kills: Vec<KillEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeEvent {
    /// Player that lost health, or `None` if nobody was left alive.
    pub damaged: Option<PlayerId>,
}

/// Resolves bullet/enemy overlaps, removes dead enemies and pays out kills.
///
/// A bullet damages at most one enemy and is consumed by the hit. Enemies are
/// walked in order, so an enemy already at zero health can still soak up a
/// bullet before the dead are collected.
pub fn resolve_collisions(state: &mut GameState, enemy_value: f32, cooperative: bool) -> CollisionReport {
    let mut report = CollisionReport::default();
    let GameState {
        players, enemies, ..
    } = state;

    let mut spent: Vec<Vec<bool>> = players
        .iter()
        .map(|p| vec![false; p.bullets.len()])
        .collect();

    for enemy in enemies.iter_mut() {
        let radius = enemy.radius();
        for (player, spent) in players.iter().zip(spent.iter_mut()) {
            for (bullet, used) in player.bullets.iter().zip(spent.iter_mut()) {
                if *used {
                    continue;
                }
                if distance(bullet.position, enemy.position) < radius + bullet.radius {
                    enemy.health -= bullet.damage;
                    enemy.last_hit_owner = Some(bullet.owner_id);
                    *used = true;
                    report.hits += 1;
                }
            }
        }
    }

    for (player, spent) in players.iter_mut().zip(spent) {
        let mut flags = spent.into_iter();
        player.bullets.retain(|_| !flags.next().unwrap_or(false));
    }

    let mut killers = Vec::new();
    enemies.retain(|enemy| {
        if enemy.is_dead() {
            killers.push(enemy.last_hit_owner);
            false
        } else {
            true
        }
    });

    for killer in killers {
        state.enemies_killed += 1;
        report.kills.push(award_kill(state, killer, enemy_value, cooperative));
    }

    report
}

fn award_kill(state: &mut GameState, killer: Option<PlayerId>, value: f32, cooperative: bool) -> KillEvent {
    let mut awarded = Vec::new();
    let Some(killer_id) = killer else {
        return KillEvent { killer, awarded };
    };
    if let Some(player) = state.player_mut(killer_id) {
        player.credit(value);
        awarded.push((killer_id, value));
    } else {
        log::debug!("Kill credited to unknown player {}", killer_id);
    }

    if cooperative {
        let share = value * SHARED_KILL_MULTIPLIER;
        for player in state.players.iter_mut() {
            if player.id != killer_id && player.is_alive() {
                player.credit(share);
                awarded.push((player.id, share));
            }
        }
    }

    KillEvent { killer, awarded }
}

/// Removes enemies that slipped past the bottom edge, each costing the
/// weakest living player one health.
pub fn resolve_escapes(state: &mut GameState, height: f32) -> Vec<EscapeEvent> {
    let before = state.enemies.len();
    state.enemies.retain(|enemy| !enemy.has_escaped(height));
    let escaped = before - state.enemies.len();

    (0..escaped)
        .map(|_| {
            let damaged = state.weakest_living_mut().map(|player| {
                player.health -= 1;
                player.id
            });
            EscapeEvent { damaged }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::{ArenaConfig, ENEMY_VALUE, EnemyTuning};
    use crate::entity::{Bullet, Enemy, Player};

    fn state_with(players: usize) -> GameState {
        let arena = ArenaConfig::default();
        GameState {
            players: (0..players)
                .map(|i| Player::new(i as PlayerId, i, players, &arena))
                .collect(),
            enemies: Vec::new(),
            enemies_killed: 0,
        }
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), &EnemyTuning::default())
    }

    fn bullet_at(owner: PlayerId, x: f32, y: f32, damage: i32) -> Bullet {
        Bullet::straight(owner, Vec2::new(x, y), 10.0, 4.0, damage)
    }

    #[test]
    fn hit_damages_and_consumes_bullet() {
        let mut state = state_with(1);
        state.enemies.push(enemy_at(100.0, 100.0));
        state.players[0].bullets.push(bullet_at(0, 100.0, 110.0, 1));
        state.players[0].bullets.push(bullet_at(0, 300.0, 300.0, 1));

        let report = resolve_collisions(&mut state, ENEMY_VALUE, false);

        assert_eq!(report.hits, 1);
        assert_eq!(state.enemies[0].health, 9);
        assert_eq!(state.enemies[0].last_hit_owner, Some(0));
        assert_eq!(state.players[0].bullets.len(), 1);
        assert_eq!(state.players[0].bullets[0].position, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn bullet_hits_only_one_overlapping_enemy() {
        let mut state = state_with(1);
        state.enemies.push(enemy_at(100.0, 100.0));
        state.enemies.push(enemy_at(105.0, 100.0));
        state.players[0].bullets.push(bullet_at(0, 102.0, 100.0, 1));

        let report = resolve_collisions(&mut state, ENEMY_VALUE, false);

        assert_eq!(report.hits, 1);
        assert_eq!(state.enemies[0].health, 9);
        assert_eq!(state.enemies[1].health, 10);
    }

    #[test]
    fn dead_enemy_still_absorbs_hits_this_tick() {
        let mut state = state_with(1);
        state.enemies.push(enemy_at(100.0, 100.0));
        state.enemies.push(enemy_at(104.0, 100.0));
        state.players[0].bullets.push(bullet_at(0, 102.0, 100.0, 10));
        state.players[0].bullets.push(bullet_at(0, 102.0, 100.0, 10));

        let report = resolve_collisions(&mut state, ENEMY_VALUE, false);

        assert_eq!(report.hits, 2);
        assert_eq!(report.kills.len(), 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 10);
        assert!(state.players[0].bullets.is_empty());
    }

    #[test]
    fn cooperative_kill_shares_points() {
        let mut state = state_with(2);
        let mut enemy = enemy_at(100.0, 100.0);
        enemy.health = 1;
        state.enemies.push(enemy);
        state.players[0].bullets.push(bullet_at(0, 100.0, 100.0, 1));

        let report = resolve_collisions(&mut state, ENEMY_VALUE, true);

        assert_eq!(state.players[0].score, 3.0);
        assert_eq!(state.players[0].total_score_earned, 3.0);
        assert_eq!(state.players[1].score, 1.5);
        assert_eq!(state.players[1].total_score_earned, 1.5);
        assert_eq!(state.enemies_killed, 1);
        assert_eq!(report.kills[0].awarded, vec![(0, 3.0), (1, 1.5)]);
    }

    #[test]
    fn dead_teammates_get_no_share() {
        let mut state = state_with(3);
        state.players[2].health = 0;
        let mut enemy = enemy_at(100.0, 100.0);
        enemy.health = 1;
        state.enemies.push(enemy);
        state.players[1].bullets.push(bullet_at(1, 100.0, 100.0, 1));

        resolve_collisions(&mut state, ENEMY_VALUE, true);

        assert_eq!(state.players[0].score, 1.5);
        assert_eq!(state.players[1].score, 3.0);
        assert_eq!(state.players[2].score, 0.0);
    }

    #[test]
    fn single_mode_pays_killer_only() {
        let mut state = state_with(1);
        let mut enemy = enemy_at(100.0, 100.0);
        enemy.health = 1;
        state.enemies.push(enemy);
        state.players[0].bullets.push(bullet_at(0, 100.0, 100.0, 1));

        resolve_collisions(&mut state, ENEMY_VALUE, false);
        assert_eq!(state.players[0].score, 3.0);
    }

    #[test]
    fn escape_hurts_weakest_living_player() {
        let mut state = state_with(3);
        state.players[0].health = 3;
        state.players[1].health = 2;
        state.players[2].health = 2;
        state.enemies.push(enemy_at(100.0, 655.0));
        state.enemies.push(enemy_at(100.0, 600.0));

        let escapes = resolve_escapes(&mut state, 640.0);

        assert_eq!(escapes, vec![EscapeEvent { damaged: Some(1) }]);
        assert_eq!(state.players[1].health, 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn escape_with_nobody_alive_damages_nobody() {
        let mut state = state_with(1);
        state.players[0].health = 0;
        state.enemies.push(enemy_at(100.0, 700.0));

        let escapes = resolve_escapes(&mut state, 640.0);
        assert_eq!(escapes, vec![EscapeEvent { damaged: None }]);
        assert_eq!(state.players[0].health, 0);
    }
}
