use crate::entity::{GameState, PlayerId};

use super::UpgradeAction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeRules {
    pub cost: f32,
    pub allow_recover: bool,
    pub max_health: i32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpgradeError {
    #[error("no upgrade in progress")]
    NotUpgrading,
    #[error("player {actual} cannot upgrade while player {expected} is upgrading")]
    NotUpgradingPlayer { expected: PlayerId, actual: PlayerId },
    #[error("insufficient score: have {score}, need {cost}")]
    InsufficientScore { score: f32, cost: f32 },
    #[error("health recovery is only available in multiplayer")]
    RecoverUnavailable,
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeOutcome {
    pub player_id: PlayerId,
    pub action: UpgradeAction,
    pub remaining_score: f32,
    pub new_level: Option<u32>,
    /// Teammate whose health went up, for a recover action that healed someone.
    pub healed: Option<PlayerId>,
    /// The pause continues while the buyer can afford another purchase.
    pub still_upgrading: bool,
}

/// Spends one upgrade cost of `player_id`'s score on `action`.
///
/// `upgrading` is the player the session is currently paused for. Recover
/// heals the living player with the lowest health (capped at max health) and
/// always ends the pause.
pub fn apply_upgrade(
    state: &mut GameState,
    rules: UpgradeRules,
    upgrading: Option<PlayerId>,
    player_id: PlayerId,
    action: UpgradeAction,
) -> Result<UpgradeOutcome, UpgradeError> {
    let expected = upgrading.ok_or(UpgradeError::NotUpgrading)?;
    if expected != player_id {
        return Err(UpgradeError::NotUpgradingPlayer {
            expected,
            actual: player_id,
        });
    }
    if action == UpgradeAction::Recover && !rules.allow_recover {
        return Err(UpgradeError::RecoverUnavailable);
    }

    let player = state
        .player_mut(player_id)
        .ok_or(UpgradeError::UnknownPlayer(player_id))?;
    if player.score < rules.cost {
        return Err(UpgradeError::InsufficientScore {
            score: player.score,
            cost: rules.cost,
        });
    }
    player.score -= rules.cost;
    let remaining_score = player.score;

    match action {
        UpgradeAction::Track(kind) => {
            let level = player.upgrades.raise(kind);
            Ok(UpgradeOutcome {
                player_id,
                action,
                remaining_score,
                new_level: Some(level),
                healed: None,
                still_upgrading: remaining_score >= rules.cost,
            })
        }
        UpgradeAction::Recover => {
            let healed = state.weakest_living_mut().and_then(|target| {
                if target.health < rules.max_health {
                    target.health += 1;
                    Some(target.id)
                } else {
                    None
                }
            });
            Ok(UpgradeOutcome {
                player_id,
                action,
                remaining_score,
                new_level: None,
                healed,
                still_upgrading: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArenaConfig, MAX_HEALTH, UPGRADE_COST};
    use crate::entity::Player;
    use crate::upgrade::UpgradeKind;

    const COOP: UpgradeRules = UpgradeRules {
        cost: UPGRADE_COST,
        allow_recover: true,
        max_health: MAX_HEALTH,
    };

    fn state_with_scores(scores: &[f32]) -> GameState {
        let arena = ArenaConfig::default();
        let mut state = GameState::new();
        for (i, score) in scores.iter().enumerate() {
            let mut player = Player::new(i as PlayerId, i, scores.len(), &arena);
            player.score = *score;
            state.players.push(player);
        }
        state
    }

    #[test]
    fn upgrade_spends_cost_and_raises_one_level() {
        let mut state = state_with_scores(&[25.0]);
        let before = state.players[0].upgrades.levels();

        let outcome = apply_upgrade(
            &mut state,
            COOP,
            Some(0),
            0,
            UpgradeAction::Track(UpgradeKind::BulletCount),
        )
        .unwrap();

        assert_eq!(outcome.remaining_score, 15.0);
        assert_eq!(outcome.new_level, Some(2));
        assert!(outcome.still_upgrading);
        let after = state.players[0].upgrades.levels();
        let raised: u32 = after.iter().zip(before).map(|(a, b)| a - b).sum();
        assert_eq!(raised, 1);
    }

    #[test]
    fn pause_ends_when_score_runs_out() {
        let mut state = state_with_scores(&[12.0]);
        let outcome = apply_upgrade(
            &mut state,
            COOP,
            Some(0),
            0,
            UpgradeAction::Track(UpgradeKind::Damage),
        )
        .unwrap();
        assert!(!outcome.still_upgrading);
    }

    #[test]
    fn insufficient_score_is_reported() {
        let mut state = state_with_scores(&[9.5]);
        let err = apply_upgrade(
            &mut state,
            COOP,
            Some(0),
            0,
            UpgradeAction::Track(UpgradeKind::Damage),
        )
        .unwrap_err();
        assert_eq!(
            err,
            UpgradeError::InsufficientScore {
                score: 9.5,
                cost: UPGRADE_COST
            }
        );
        assert_eq!(state.players[0].score, 9.5);
    }

    #[test]
    fn requires_an_upgrade_pause() {
        let mut state = state_with_scores(&[30.0, 30.0]);
        let action = UpgradeAction::Track(UpgradeKind::Damage);
        assert_eq!(
            apply_upgrade(&mut state, COOP, None, 0, action),
            Err(UpgradeError::NotUpgrading)
        );
        assert_eq!(
            apply_upgrade(&mut state, COOP, Some(0), 1, action),
            Err(UpgradeError::NotUpgradingPlayer {
                expected: 0,
                actual: 1
            })
        );
    }

    #[test]
    fn recover_heals_weakest_and_ends_pause() {
        let mut state = state_with_scores(&[40.0, 0.0, 0.0]);
        state.players[1].health = 2;
        state.players[2].health = 0;

        let outcome = apply_upgrade(&mut state, COOP, Some(0), 0, UpgradeAction::Recover).unwrap();

        assert_eq!(outcome.healed, Some(1));
        assert_eq!(outcome.new_level, None);
        assert!(!outcome.still_upgrading);
        assert_eq!(state.players[1].health, 3);
        assert_eq!(state.players[2].health, 0);
        assert_eq!(state.players[0].score, 30.0);
        assert_eq!(state.players[0].upgrades.purchased_levels(), 0);
    }

    #[test]
    fn recover_is_capped_at_max_health() {
        let mut state = state_with_scores(&[10.0, 0.0]);
        let outcome = apply_upgrade(&mut state, COOP, Some(0), 0, UpgradeAction::Recover).unwrap();
        assert_eq!(outcome.healed, None);
        assert!(state.players.iter().all(|p| p.health == MAX_HEALTH));
    }

    #[test]
    fn recover_needs_multiplayer() {
        let mut state = state_with_scores(&[10.0]);
        let solo = UpgradeRules {
            allow_recover: false,
            ..COOP
        };
        assert_eq!(
            apply_upgrade(&mut state, solo, Some(0), 0, UpgradeAction::Recover),
            Err(UpgradeError::RecoverUnavailable)
        );
    }
}
