use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const UPGRADE_COST: f32 = 10.0;
pub const MAX_HEALTH: i32 = 5;
pub const MAX_PLAYERS: usize = 4;
pub const ENEMY_HEALTH: i32 = 10;
pub const ENEMY_VALUE: f32 = 3.0;
pub const SHARED_KILL_MULTIPLIER: f32 = 0.5;

/// Frame length every speed in the game is tuned against, in milliseconds.
pub const REFERENCE_FRAME_MS: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    pub size: f32,
    pub speed: f32,
    pub max_health: i32,
    /// Distance from the bottom edge to the player row.
    pub row_offset: f32,
    /// Horizontal step between sibling bullets of one volley.
    pub shot_spread: f32,
    /// Spread of the launch angle of bounce bullets, in radians either side of straight up.
    pub bounce_launch_angle: f32,
    pub aim_radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: 20.0,
            speed: 5.0,
            max_health: MAX_HEALTH,
            row_offset: 50.0,
            shot_spread: 5.0,
            bounce_launch_angle: 0.5,
            aim_radius: 300.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub value: f32,
    pub spawn_offset: f32,
    /// Keeps spawns this far from either side wall.
    pub spawn_margin: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: 30.0,
            speed: 1.5,
            health: ENEMY_HEALTH,
            value: ENEMY_VALUE,
            spawn_offset: 15.0,
            spawn_margin: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 640.0,
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
        }
    }
}

impl ArenaConfig {
    pub fn player_row(&self) -> f32 {
        self.height - self.player.row_offset
    }

    /// Evenly spaced slot for the `index`-th of `count` players.
    pub fn slot_x(&self, index: usize, count: usize) -> f32 {
        let count = count.max(1);
        self.width / (count as f32 + 1.0) * (index as f32 + 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionTuning {
    pub snap_threshold: f32,
    pub soft_correction: f32,
}

impl Default for PredictionTuning {
    fn default() -> Self {
        Self {
            snap_threshold: 5.0,
            soft_correction: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub arena: ArenaConfig,
    pub prediction: PredictionTuning,
    pub max_players: usize,
    /// Round trip; each direction is delayed by half of it.
    pub latency_ms: u64,
    pub max_frame_ms: f32,
    pub upgrade_cost: f32,
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            prediction: PredictionTuning::default(),
            max_players: MAX_PLAYERS,
            latency_ms: 50,
            max_frame_ms: 250.0,
            upgrade_cost: UPGRADE_COST,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn one_way_delay(&self) -> Duration {
        Duration::from_millis(self.latency_ms / 2)
    }
}
