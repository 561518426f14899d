use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::net::BulletState;

use super::PlayerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub damage: i32,
    pub velocity: Vec2,
    pub owner_id: PlayerId,
    pub is_bounce: bool,
    pub is_aim: bool,
    pub aim_strength: f32,
}

impl Bullet {
    /// A bullet flying straight up at `speed`.
    pub fn straight(owner_id: PlayerId, position: Vec2, speed: f32, radius: f32, damage: i32) -> Self {
        Self {
            position,
            radius,
            speed,
            damage,
            velocity: Vec2::new(0.0, -speed),
            owner_id,
            is_bounce: false,
            is_aim: false,
            aim_strength: 0.0,
        }
    }

    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.position.x < 0.0
            || self.position.x > width
            || self.position.y < 0.0
            || self.position.y > height
    }

    pub fn to_network_state(&self) -> BulletState {
        BulletState {
            position: self.position.into(),
            velocity: self.velocity.into(),
            radius: self.radius,
            speed: self.speed,
            damage: self.damage,
            owner_id: self.owner_id,
            is_bounce: self.is_bounce,
            is_aim: self.is_aim,
            aim_strength: self.aim_strength,
        }
    }

    pub fn from_network_state(state: &BulletState) -> Self {
        Self {
            position: Vec2::from(state.position),
            radius: state.radius,
            speed: state.speed,
            damage: state.damage,
            velocity: Vec2::from(state.velocity),
            owner_id: state.owner_id,
            is_bounce: state.is_bounce,
            is_aim: state.is_aim,
            aim_strength: state.aim_strength,
        }
    }
}
