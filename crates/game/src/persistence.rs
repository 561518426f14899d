use serde::{Deserialize, Serialize};

use crate::entity::Player;
use crate::upgrade::{UpgradeKind, UpgradeSet};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("save data is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save data is only kept for single-player sessions")]
    NotAvailable,
}

/// What a single-player run leaves behind for the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub x: f32,
    pub health: i32,
    pub score: f32,
    pub total_score_earned: f32,
    pub upgrades: [u32; UpgradeKind::COUNT],
}

impl SaveData {
    pub fn from_player(player: &Player) -> Self {
        Self {
            x: player.position.x,
            health: player.health,
            score: player.score,
            total_score_earned: player.total_score_earned,
            upgrades: player.upgrades.levels(),
        }
    }

    /// Copies the saved fields onto `player`, keeping everything else.
    ///
    /// Saves are taken at game over, so a downed player comes back at
    /// `max_health`; any other saved health is capped to it.
    pub fn restore(&self, player: &mut Player, max_health: i32) {
        player.position.x = self.x;
        player.health = if self.health <= 0 {
            max_health
        } else {
            self.health.min(max_health)
        };
        player.score = self.score;
        player.total_score_earned = self.total_score_earned;
        player.upgrades = UpgradeSet::from_levels(self.upgrades);
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }
}
