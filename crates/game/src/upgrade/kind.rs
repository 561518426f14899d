use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum UpgradeKind {
    FireRate = 0,
    BulletCount = 1,
    Bounce = 2,
    Damage = 3,
    BulletSpeed = 4,
    HitRadius = 5,
    AutoAim = 6,
}

impl UpgradeKind {
    pub const COUNT: usize = 7;

    pub const ALL: [UpgradeKind; Self::COUNT] = [
        Self::FireRate,
        Self::BulletCount,
        Self::Bounce,
        Self::Damage,
        Self::BulletSpeed,
        Self::HitRadius,
        Self::AutoAim,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FireRate => "fire-rate",
            Self::BulletCount => "bullet-count",
            Self::Bounce => "bounce",
            Self::Damage => "damage",
            Self::BulletSpeed => "bullet-speed",
            Self::HitRadius => "hit-radius",
            Self::AutoAim => "auto-aim",
        }
    }

    /// Bounce and auto-aim start inactive.
    pub fn starting_level(self) -> u32 {
        match self {
            Self::Bounce | Self::AutoAim => 0,
            _ => 1,
        }
    }

    pub fn base_magnitude(self) -> f32 {
        match self {
            Self::FireRate => 400.0,
            Self::BulletCount => 1.0,
            Self::Bounce => 0.1,
            Self::Damage => 1.0,
            Self::BulletSpeed => 10.0,
            Self::HitRadius => 4.0,
            Self::AutoAim => 0.005,
        }
    }

    /// Effective value of the track at `level`.
    ///
    /// Fire rate is an interval in milliseconds and shrinks with level, bullet
    /// count is the level itself, bounce is a probability capped at 1, every
    /// other kind scales its base linearly.
    pub fn magnitude(self, level: u32) -> f32 {
        let base = self.base_magnitude();
        match self {
            Self::FireRate => base / level.max(1) as f32,
            Self::BulletCount => level as f32,
            Self::Bounce => (base * level as f32).min(1.0),
            Self::Damage | Self::BulletSpeed | Self::HitRadius | Self::AutoAim => {
                base * level as f32
            }
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown upgrade: {0}")]
pub struct ParseUpgradeError(pub String);

impl FromStr for UpgradeKind {
    type Err = ParseUpgradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "fire-rate" | "firerate" => Ok(Self::FireRate),
            "bullet-count" | "bulletcount" => Ok(Self::BulletCount),
            "bounce" => Ok(Self::Bounce),
            "damage" => Ok(Self::Damage),
            "bullet-speed" | "speed" => Ok(Self::BulletSpeed),
            "hit-radius" | "radius" => Ok(Self::HitRadius),
            "auto-aim" | "autoaim" => Ok(Self::AutoAim),
            _ => Err(ParseUpgradeError(s.to_string())),
        }
    }
}

/// Something a player can spend score on while the session is paused for upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeAction {
    Track(UpgradeKind),
    /// Heals the weakest living teammate by one point. Multiplayer only.
    Recover,
}

impl UpgradeAction {
    const RECOVER_CODE: u8 = 7;

    pub fn code(self) -> u8 {
        match self {
            Self::Track(kind) => kind as u8,
            Self::Recover => Self::RECOVER_CODE,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        if code == Self::RECOVER_CODE {
            return Some(Self::Recover);
        }
        UpgradeKind::from_index(code as usize).map(Self::Track)
    }
}

impl fmt::Display for UpgradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Track(kind) => kind.fmt(f),
            Self::Recover => f.write_str("recover"),
        }
    }
}

impl FromStr for UpgradeAction {
    type Err = ParseUpgradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recover" | "health-recover" | "healthrecover" => Ok(Self::Recover),
            _ => s.parse().map(Self::Track),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitudes_follow_level() {
        assert_eq!(UpgradeKind::FireRate.magnitude(1), 400.0);
        assert_eq!(UpgradeKind::FireRate.magnitude(2), 200.0);
        assert_eq!(UpgradeKind::BulletCount.magnitude(3), 3.0);
        assert_eq!(UpgradeKind::Damage.magnitude(4), 4.0);
        assert_eq!(UpgradeKind::BulletSpeed.magnitude(2), 20.0);
        assert_eq!(UpgradeKind::Bounce.magnitude(0), 0.0);
        assert_eq!(UpgradeKind::Bounce.magnitude(15), 1.0);
    }

    #[test]
    fn action_codes_are_stable() {
        for kind in UpgradeKind::ALL {
            let action = UpgradeAction::Track(kind);
            assert_eq!(UpgradeAction::from_code(action.code()), Some(action));
        }
        assert_eq!(UpgradeAction::from_code(7), Some(UpgradeAction::Recover));
        assert_eq!(UpgradeAction::from_code(8), None);
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!("fireRate".parse::<UpgradeKind>(), Ok(UpgradeKind::FireRate));
        assert_eq!("auto_aim".parse::<UpgradeKind>(), Ok(UpgradeKind::AutoAim));
        assert_eq!("healthRecover".parse::<UpgradeAction>(), Ok(UpgradeAction::Recover));
        assert!("laser".parse::<UpgradeAction>().is_err());
    }
}
