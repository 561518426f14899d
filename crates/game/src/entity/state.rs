use serde::{Deserialize, Serialize};

use crate::net::WorldSnapshot;

use super::{Enemy, Player, PlayerId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Join order; ids are unique.
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    pub enemies_killed: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn living_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    pub fn any_alive(&self) -> bool {
        self.players.iter().any(Player::is_alive)
    }

    /// Living player with the lowest health; ties go to the earliest joiner.
    pub fn weakest_living_mut(&mut self) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .filter(|p| p.is_alive())
            .min_by_key(|p| p.health)
    }

    pub fn bullet_count(&self) -> usize {
        self.players.iter().map(|p| p.bullets.len()).sum()
    }

    pub fn snapshot(&self, tick: u32, server_time_ms: f64) -> WorldSnapshot {
        WorldSnapshot {
            tick,
            server_time_ms,
            enemies_killed: self.enemies_killed,
            players: self.players.iter().map(Player::to_network_state).collect(),
            enemies: self.enemies.iter().map(Enemy::to_network_state).collect(),
        }
    }

    pub fn from_snapshot(snapshot: &WorldSnapshot) -> Self {
        Self {
            players: snapshot
                .players
                .iter()
                .map(Player::from_network_state)
                .collect(),
            enemies: snapshot
                .enemies
                .iter()
                .map(Enemy::from_network_state)
                .collect(),
            enemies_killed: snapshot.enemies_killed,
        }
    }
}
