mod economy;
mod kind;
mod track;

pub use economy::{UpgradeError, UpgradeOutcome, UpgradeRules, apply_upgrade};
pub use kind::{ParseUpgradeError, UpgradeAction, UpgradeKind};
pub use track::{UpgradeSet, UpgradeTrack};
