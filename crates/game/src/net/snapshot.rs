use rkyv::{Archive, Deserialize, Serialize};

use crate::entity::PlayerId;
use crate::upgrade::UpgradeKind;

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct BulletState {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub radius: f32,
    pub speed: f32,
    pub damage: i32,
    pub owner_id: PlayerId,
    pub is_bounce: bool,
    pub is_aim: bool,
    pub aim_strength: f32,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct PlayerState {
    pub id: PlayerId,
    pub color: u8,
    pub position: [f32; 2],
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub score: f32,
    pub total_score_earned: f32,
    pub last_shot_ms: f64,
    pub bullets: Vec<BulletState>,
    pub upgrade_levels: [u32; UpgradeKind::COUNT],
    pub input_flags: u8,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct EnemyState {
    pub position: [f32; 2],
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub last_hit_owner: Option<PlayerId>,
}

/// Self-contained copy of the authoritative state after one tick.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct WorldSnapshot {
    pub tick: u32,
    pub server_time_ms: f64,
    pub enemies_killed: u32,
    pub players: Vec<PlayerState>,
    pub enemies: Vec<EnemyState>,
}

impl WorldSnapshot {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }
}
