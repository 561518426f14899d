use starfall::{Client, GameState, PlayerId, PlayerInput, UpgradeAction, UpgradeKind};

const UPGRADE_ROTATION: [UpgradeKind; UpgradeKind::COUNT] = [
    UpgradeKind::FireRate,
    UpgradeKind::Damage,
    UpgradeKind::BulletCount,
    UpgradeKind::BulletSpeed,
    UpgradeKind::HitRadius,
    UpgradeKind::Bounce,
    UpgradeKind::AutoAim,
];

/// Teammate health at or below which a cooperative bot buys recovery instead.
const RECOVER_BELOW: i32 = 2;
/// Horizontal slack before the bot bothers to move.
const AIM_DEADZONE: f32 = 3.0;

/// Scripted participant: chases the lowest enemy, holds fire and spends
/// score in a fixed rotation.
#[derive(Debug)]
pub struct Bot {
    player_id: PlayerId,
    next_upgrade: usize,
    cooldown: u32,
    cooldown_frames: u32,
}

impl Bot {
    /// `cooldown_frames` should cover one uplink delay so a request is not resent
    /// before the host has seen it.
    pub fn new(player_id: PlayerId, cooldown_frames: u32) -> Self {
        Self {
            player_id,
            next_upgrade: player_id as usize % UPGRADE_ROTATION.len(),
            cooldown: 0,
            cooldown_frames,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn decide_input(&self, client: &Client) -> PlayerInput {
        let state = client.state();
        let Some(x) = client.displayed_x() else {
            return PlayerInput::IDLE;
        };
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.position.y.total_cmp(&b.position.y));

        let dx = target.map_or(0.0, |enemy| enemy.position.x - x);
        PlayerInput {
            left: dx < -AIM_DEADZONE,
            right: dx > AIM_DEADZONE,
            shoot: target.is_some(),
        }
    }

    /// Picks the next purchase while the session is paused for this bot.
    pub fn choose_upgrade(&mut self, state: &GameState, cooperative: bool) -> Option<UpgradeAction> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }
        self.cooldown = self.cooldown_frames;

        let teammate_hurting = state
            .living_players()
            .any(|p| p.health <= RECOVER_BELOW);
        if cooperative && teammate_hurting {
            return Some(UpgradeAction::Recover);
        }

        let kind = UPGRADE_ROTATION[self.next_upgrade];
        self.next_upgrade = (self.next_upgrade + 1) % UPGRADE_ROTATION.len();
        Some(UpgradeAction::Track(kind))
    }
}
