use crate::entity::{PlayerColor, PlayerId};
use crate::upgrade::UpgradeAction;

/// Notable things the session reports to whoever drives it.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PlayerJoined {
        player_id: PlayerId,
        color: PlayerColor,
        host: bool,
    },
    SessionStarted {
        players: usize,
    },
    UpgradeStarted {
        player_id: PlayerId,
        score: f32,
    },
    UpgradeApplied {
        player_id: PlayerId,
        action: UpgradeAction,
        remaining_score: f32,
    },
    UpgradeRejected {
        player_id: PlayerId,
        reason: String,
    },
    EnemyKilled {
        killer: Option<PlayerId>,
        awarded: Vec<(PlayerId, f32)>,
    },
    EnemyEscaped {
        damaged: Option<PlayerId>,
    },
    PlayerDowned {
        player_id: PlayerId,
    },
    SessionOver {
        final_score: u32,
    },
    SessionEnded,
}

impl SessionEvent {
    /// Lifecycle events survive queue overflow; per-tick combat noise does not.
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, Self::EnemyKilled { .. } | Self::EnemyEscaped { .. })
    }
}
