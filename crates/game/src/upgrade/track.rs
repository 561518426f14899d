use serde::{Deserialize, Serialize};

use super::UpgradeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeTrack {
    pub kind: UpgradeKind,
    pub level: u32,
}

impl UpgradeTrack {
    pub fn new(kind: UpgradeKind) -> Self {
        Self {
            kind,
            level: kind.starting_level(),
        }
    }

    pub fn magnitude(&self) -> f32 {
        self.kind.magnitude(self.level)
    }

    pub fn is_active(&self) -> bool {
        self.level > 0
    }
}

/// One track per upgrade kind, indexed by the kind's discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeSet {
    tracks: [UpgradeTrack; UpgradeKind::COUNT],
}

impl Default for UpgradeSet {
    fn default() -> Self {
        Self {
            tracks: UpgradeKind::ALL.map(UpgradeTrack::new),
        }
    }
}

impl UpgradeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_levels(levels: [u32; UpgradeKind::COUNT]) -> Self {
        let mut set = Self::default();
        for (track, level) in set.tracks.iter_mut().zip(levels) {
            track.level = level;
        }
        set
    }

    pub fn levels(&self) -> [u32; UpgradeKind::COUNT] {
        self.tracks.map(|t| t.level)
    }

    pub fn track(&self, kind: UpgradeKind) -> &UpgradeTrack {
        &self.tracks[kind.index()]
    }

    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self.track(kind).level
    }

    pub fn set_level(&mut self, kind: UpgradeKind, level: u32) {
        self.tracks[kind.index()].level = level;
    }

    pub fn raise(&mut self, kind: UpgradeKind) -> u32 {
        let track = &mut self.tracks[kind.index()];
        track.level = track.level.saturating_add(1);
        track.level
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpgradeTrack> {
        self.tracks.iter()
    }

    /// Levels bought on top of the starting loadout.
    pub fn purchased_levels(&self) -> u32 {
        self.tracks
            .iter()
            .map(|t| t.level.saturating_sub(t.kind.starting_level()))
            .sum()
    }

    pub fn fire_interval_ms(&self) -> f32 {
        self.track(UpgradeKind::FireRate).magnitude()
    }

    pub fn bullet_count(&self) -> u32 {
        self.level(UpgradeKind::BulletCount)
    }

    pub fn bounce_chance(&self) -> f32 {
        self.track(UpgradeKind::Bounce).magnitude()
    }

    pub fn damage(&self) -> i32 {
        self.track(UpgradeKind::Damage).magnitude().round() as i32
    }

    pub fn bullet_speed(&self) -> f32 {
        self.track(UpgradeKind::BulletSpeed).magnitude()
    }

    pub fn bullet_radius(&self) -> f32 {
        self.track(UpgradeKind::HitRadius).magnitude()
    }

    pub fn aim_strength(&self) -> f32 {
        self.track(UpgradeKind::AutoAim).magnitude()
    }
}
