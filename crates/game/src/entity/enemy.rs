use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::EnemyTuning;
use crate::net::EnemyState;

use super::PlayerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    /// Owner of the last bullet that damaged this enemy; credited with the kill.
    pub last_hit_owner: Option<PlayerId>,
}

impl Enemy {
    pub fn new(position: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            position,
            size: tuning.size,
            speed: tuning.speed,
            health: tuning.health,
            last_hit_owner: None,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn has_escaped(&self, height: f32) -> bool {
        self.position.y >= height + self.radius()
    }

    pub fn to_network_state(&self) -> EnemyState {
        EnemyState {
            position: self.position.into(),
            size: self.size,
            speed: self.speed,
            health: self.health,
            last_hit_owner: self.last_hit_owner,
        }
    }

    pub fn from_network_state(state: &EnemyState) -> Self {
        Self {
            position: Vec2::from(state.position),
            size: state.size,
            speed: state.speed,
            health: state.health,
            last_hit_owner: state.last_hit_owner,
        }
    }
}
