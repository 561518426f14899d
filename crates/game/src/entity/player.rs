use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;
use crate::net::PlayerState;
use crate::upgrade::UpgradeSet;

use super::Bullet;

pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum PlayerColor {
    #[default]
    Lime = 0,
    Cyan = 1,
    Red = 2,
    Yellow = 3,
}

impl PlayerColor {
    pub fn for_player(id: PlayerId) -> Self {
        Self::from((id % 4) as u8)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Lime => "lime",
            Self::Cyan => "cyan",
            Self::Red => "red",
            Self::Yellow => "yellow",
        }
    }
}

impl From<u8> for PlayerColor {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Cyan,
            2 => Self::Red,
            3 => Self::Yellow,
            _ => Self::Lime,
        }
    }
}

/// Abstract per-frame input, regardless of whether it came from keys or touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

impl PlayerInput {
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        shoot: false,
    };

    /// -1, 0 or 1; opposing directions cancel out.
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub color: PlayerColor,
    pub position: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub score: f32,
    pub total_score_earned: f32,
    pub last_shot_ms: f64,
    pub bullets: Vec<Bullet>,
    pub upgrades: UpgradeSet,
    pub input: PlayerInput,
    /// Only set on client replicas, for the locally controlled player.
    pub predicted_x: Option<f32>,
}

impl Player {
    /// Creates a fresh player in slot `slot` of `player_count` evenly spaced slots.
    pub fn new(id: PlayerId, slot: usize, player_count: usize, arena: &ArenaConfig) -> Self {
        Self {
            id,
            color: PlayerColor::for_player(id),
            position: Vec2::new(arena.slot_x(slot, player_count), arena.player_row()),
            size: arena.player.size,
            speed: arena.player.speed,
            health: arena.player.max_health,
            score: 0.0,
            total_score_earned: 0.0,
            last_shot_ms: 0.0,
            bullets: Vec::new(),
            upgrades: UpgradeSet::default(),
            input: PlayerInput::IDLE,
            predicted_x: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    /// Adds earned points to both the spendable and the lifetime score.
    pub fn credit(&mut self, points: f32) {
        self.score += points;
        self.total_score_earned += points;
    }

    pub fn to_network_state(&self) -> PlayerState {
        PlayerState {
            id: self.id,
            color: self.color as u8,
            position: self.position.into(),
            size: self.size,
            speed: self.speed,
            health: self.health,
            score: self.score,
            total_score_earned: self.total_score_earned,
            last_shot_ms: self.last_shot_ms,
            bullets: self.bullets.iter().map(Bullet::to_network_state).collect(),
            upgrade_levels: self.upgrades.levels(),
            input_flags: crate::net::InputFlags::from(self.input).bits(),
        }
    }

    pub fn from_network_state(state: &PlayerState) -> Self {
        Self {
            id: state.id,
            color: PlayerColor::from(state.color),
            position: Vec2::from(state.position),
            size: state.size,
            speed: state.speed,
            health: state.health,
            score: state.score,
            total_score_earned: state.total_score_earned,
            last_shot_ms: state.last_shot_ms,
            bullets: state.bullets.iter().map(Bullet::from_network_state).collect(),
            upgrades: UpgradeSet::from_levels(state.upgrade_levels),
            input: crate::net::InputFlags::from_bits_truncate(state.input_flags).into(),
            predicted_x: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upgrade::UpgradeKind;

    #[test]
    fn new_player_starts_fresh() {
        let arena = ArenaConfig::default();
        let player = Player::new(1, 1, 2, &arena);

        assert_eq!(player.health, arena.player.max_health);
        assert_eq!(player.score, 0.0);
        assert!(player.bullets.is_empty());
        assert_eq!(player.color, PlayerColor::Cyan);
        assert_eq!(player.position.x, arena.width * 2.0 / 3.0);
        assert_eq!(player.upgrades.level(UpgradeKind::Bounce), 0);
        assert_eq!(player.upgrades.level(UpgradeKind::Damage), 1);
    }

    #[test]
    fn opposing_inputs_cancel() {
        let input = PlayerInput {
            left: true,
            right: true,
            shoot: false,
        };
        assert_eq!(input.direction(), 0.0);
    }
}
