mod game_loop;
mod handle;
mod lobby;

pub use game_loop::GameLoop;
pub use handle::TickOwnerHandle;
pub use lobby::{Roster, RosterEntry};

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::entity::{GameState, Player, PlayerId};
use crate::event::{EventQueue, PendingEvent, SessionEvent};
use crate::net::{NetworkSimulation, PendingCommand, PlayerCommand};
use crate::persistence::{PersistError, SaveData};
use crate::simulation::{TickEngine, TickReport};
use crate::upgrade::{UpgradeAction, UpgradeError, UpgradeOutcome, UpgradeRules, apply_upgrade};

const MAX_PENDING_EVENTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionMode {
    Single,
    Cooperative,
}

impl SessionMode {
    pub fn is_cooperative(self) -> bool {
        matches!(self, Self::Cooperative)
    }

    pub fn capacity(self, max_players: usize) -> usize {
        match self {
            Self::Single => 1,
            Self::Cooperative => max_players,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    /// Global pause while `player_id` spends score.
    Upgrading { player_id: PlayerId },
    Over,
}

impl SessionPhase {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Running or paused for an upgrade; snapshots are only applied then.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Upgrading { .. })
    }

    pub fn upgrading_player(self) -> Option<PlayerId> {
        match self {
            Self::Upgrading { player_id } => Some(player_id),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is full ({capacity} players)")]
    SessionFull { capacity: usize },
    #[error("session already has a host")]
    HostTaken,
    #[error("session has no host yet")]
    NoHost,
    #[error("session is not idle")]
    NotIdle,
    #[error("handle does not own this session")]
    NotTickOwner,
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error(transparent)]
    Upgrade(#[from] UpgradeError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug)]
pub struct Joined {
    pub player_id: PlayerId,
    /// Only the host receives the capability to advance the simulation.
    pub owner: Option<TickOwnerHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Wrong handle, or nothing to simulate in the current phase.
    Skipped,
    /// Frozen for an upgrade; only upgrade requests were processed.
    Paused { upgrades_applied: usize },
    Advanced(TickReport),
    /// The last living player went down this tick.
    Finished(TickReport),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverReport {
    /// Best lifetime score among all players, rounded down.
    pub final_score: u32,
    pub totals: Vec<(PlayerId, f32)>,
    pub enemies_killed: u32,
    pub ticks: u32,
    pub elapsed_ms: f64,
}

/// One game from lobby to game over.
///
/// Holds the authoritative [`GameState`]; only the holder of the session's
/// [`TickOwnerHandle`] can advance it.
pub struct Session {
    id: u64,
    config: SessionConfig,
    mode: SessionMode,
    phase: SessionPhase,
    roster: Roster,
    state: GameState,
    engine: TickEngine,
    events: EventQueue,
    report: Option<GameOverReport>,
}

impl Session {
    pub fn new(config: SessionConfig, mode: SessionMode) -> Self {
        let id = handle::next_session_id();
        let engine = TickEngine::new(config.arena, mode.is_cooperative(), config.seed);
        log::debug!("Created {:?} session {}", mode, id);
        Self {
            id,
            roster: Roster::new(mode.capacity(config.max_players)),
            config,
            mode,
            phase: SessionPhase::Idle,
            state: GameState::new(),
            engine,
            events: EventQueue::new(MAX_PENDING_EVENTS),
            report: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The authoritative state, read-only.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick(&self) -> u32 {
        self.engine.tick()
    }

    pub fn clock_ms(&self) -> f64 {
        self.engine.clock_ms()
    }

    pub fn owns(&self, owner: &TickOwnerHandle) -> bool {
        owner.session_id() == self.id
    }

    pub fn join(&mut self, as_host: bool) -> Result<Joined, SessionError> {
        if self.phase != SessionPhase::Idle {
            return Err(SessionError::NotIdle);
        }
        if self.roster.is_full() {
            return Err(SessionError::SessionFull {
                capacity: self.roster.capacity(),
            });
        }
        match (as_host, self.roster.has_host()) {
            (true, true) => return Err(SessionError::HostTaken),
            (false, false) => return Err(SessionError::NoHost),
            _ => {}
        }

        let entry = self
            .roster
            .add(as_host)
            .ok_or(SessionError::SessionFull {
                capacity: self.roster.capacity(),
            })?;
        self.seat_players();

        log::info!(
            "Player {} joined session {} ({}{})",
            entry.player_id,
            self.id,
            entry.color.label(),
            if as_host { ", host" } else { "" }
        );
        self.push_event(SessionEvent::PlayerJoined {
            player_id: entry.player_id,
            color: entry.color,
            host: as_host,
        });

        Ok(Joined {
            player_id: entry.player_id,
            owner: as_host.then(|| TickOwnerHandle::new(self.id)),
        })
    }

    /// Resets every player's health, score and position plus the arena, then
    /// starts ticking. Purchased upgrades stay.
    pub fn start(&mut self, owner: &TickOwnerHandle) -> Result<(), SessionError> {
        if !self.owns(owner) {
            return Err(SessionError::NotTickOwner);
        }
        if self.phase.is_active() {
            return Err(SessionError::NotIdle);
        }

        self.engine.reset();
        self.seat_players();
        self.state.enemies.clear();
        self.state.enemies_killed = 0;
        self.engine.spawn_enemy(&mut self.state);
        self.report = None;
        self.phase = SessionPhase::Running;

        log::info!(
            "Session {} started with {} player(s)",
            self.id,
            self.state.players.len()
        );
        self.push_event(SessionEvent::SessionStarted {
            players: self.state.players.len(),
        });
        Ok(())
    }

    /// Starts a single-player run carrying over a previous run's player.
    pub fn start_with_save(&mut self, owner: &TickOwnerHandle, save: &SaveData) -> Result<(), SessionError> {
        if self.mode != SessionMode::Single {
            return Err(PersistError::NotAvailable.into());
        }
        self.start(owner)?;
        let max_health = self.config.arena.player.max_health;
        if let Some(player) = self.state.players.first_mut() {
            save.restore(player, max_health);
            log::info!(
                "Restored player {} (score {}, total {})",
                player.id,
                player.score,
                player.total_score_earned
            );
        }
        Ok(())
    }

    /// Back to the lobby. Anything still in flight is absorbed.
    pub fn end(&mut self) {
        if self.phase == SessionPhase::Idle {
            return;
        }
        self.phase = SessionPhase::Idle;
        self.state.enemies.clear();
        for player in &mut self.state.players {
            player.bullets.clear();
        }
        log::info!("Session {} ended", self.id);
        self.push_event(SessionEvent::SessionEnded);
    }

    /// Pauses every player so `player_id` can spend score.
    ///
    /// Only takes effect while running and when the authoritative score
    /// covers the cost, so late snapshots cannot reopen a finished pause.
    pub fn begin_upgrade(&mut self, player_id: PlayerId) -> bool {
        if !self.phase.is_running() {
            return false;
        }
        let Some(player) = self.state.player(player_id) else {
            return false;
        };
        if !player.is_alive() || player.score < self.config.upgrade_cost {
            return false;
        }
        let score = player.score;
        self.phase = SessionPhase::Upgrading { player_id };
        log::info!("Player {} is upgrading (score {})", player_id, score);
        self.push_event(SessionEvent::UpgradeStarted { player_id, score });
        true
    }

    /// Applies an upgrade on the tick owner's side without going through the network.
    pub fn apply_upgrade(
        &mut self,
        owner: &TickOwnerHandle,
        player_id: PlayerId,
        action: UpgradeAction,
    ) -> Result<UpgradeOutcome, SessionError> {
        if !self.owns(owner) {
            return Err(SessionError::NotTickOwner);
        }
        if self.state.player(player_id).is_none() {
            return Err(SessionError::UnknownPlayer(player_id));
        }
        Ok(self.spend_upgrade(player_id, action)?)
    }

    /// Runs one authoritative tick and broadcasts the result.
    pub fn simulate_server_tick(
        &mut self,
        owner: &TickOwnerHandle,
        net: &mut NetworkSimulation,
        dt_ms: f32,
    ) -> TickOutcome {
        if !self.owns(owner) {
            log::warn!(
                "Rejected tick for session {} from handle of session {}",
                self.id,
                owner.session_id()
            );
            return TickOutcome::Skipped;
        }
        if !self.phase.is_active() {
            let dropped = net.drain_commands().len();
            if dropped > 0 {
                log::debug!("Dropped {} command(s) outside of play", dropped);
            }
            return TickOutcome::Skipped;
        }

        let dt_ms = dt_ms.clamp(0.0, self.config.max_frame_ms);
        let upgrades_applied = self.apply_commands(net.drain_commands());

        if self.phase.upgrading_player().is_some() {
            if upgrades_applied > 0 {
                self.broadcast(net);
            }
            return TickOutcome::Paused { upgrades_applied };
        }

        let report = self.engine.step(&mut self.state, dt_ms);
        self.record(&report);

        if report.all_dead {
            self.finish();
            return TickOutcome::Finished(report);
        }

        self.broadcast(net);
        TickOutcome::Advanced(report)
    }

    pub fn drain_events(&mut self) -> Vec<PendingEvent> {
        self.events.drain()
    }

    pub fn game_over_report(&self) -> Option<&GameOverReport> {
        self.report.as_ref()
    }

    /// The single player's carry-over data; multiplayer sessions never persist.
    pub fn save_data(&self) -> Result<SaveData, PersistError> {
        if self.mode != SessionMode::Single {
            return Err(PersistError::NotAvailable);
        }
        self.state
            .players
            .first()
            .map(SaveData::from_player)
            .ok_or(PersistError::NotAvailable)
    }

    fn upgrade_rules(&self) -> UpgradeRules {
        UpgradeRules {
            cost: self.config.upgrade_cost,
            allow_recover: self.mode.is_cooperative(),
            max_health: self.config.arena.player.max_health,
        }
    }

    /// Re-seats every roster entry with fresh health, score and position.
    /// Upgrade tracks carry over for players who were already seated.
    fn seat_players(&mut self) {
        let count = self.roster.len();
        let previous = std::mem::take(&mut self.state.players);
        self.state.players = self
            .roster
            .entries()
            .iter()
            .enumerate()
            .map(|(slot, entry)| {
                let mut player = Player::new(entry.player_id, slot, count, &self.config.arena);
                player.color = entry.color;
                if let Some(old) = previous.iter().find(|p| p.id == entry.player_id) {
                    player.upgrades = old.upgrades.clone();
                }
                player
            })
            .collect();
    }

    fn apply_commands(&mut self, commands: Vec<PendingCommand>) -> usize {
        let mut applied = 0;
        for command in commands {
            match command.command {
                PlayerCommand::Input(input) => match self.state.player_mut(command.player_id) {
                    Some(player) => player.input = input,
                    None => log::debug!("Ignoring input for unknown player {}", command.player_id),
                },
                PlayerCommand::Upgrade(_) if self.state.player(command.player_id).is_none() => {
                    log::debug!("Ignoring upgrade for unknown player {}", command.player_id);
                }
                PlayerCommand::Upgrade(code) => {
                    let Some(action) = UpgradeAction::from_code(code) else {
                        log::debug!("Ignoring unknown upgrade code {}", code);
                        continue;
                    };
                    match self.spend_upgrade(command.player_id, action) {
                        Ok(_) => applied += 1,
                        Err(err) => {
                            log::debug!("Upgrade {} for player {} rejected: {}", action, command.player_id, err);
                            self.push_event(SessionEvent::UpgradeRejected {
                                player_id: command.player_id,
                                reason: err.to_string(),
                            });
                        }
                    }
                }
            }
        }
        applied
    }

    fn spend_upgrade(&mut self, player_id: PlayerId, action: UpgradeAction) -> Result<UpgradeOutcome, UpgradeError> {
        let rules = self.upgrade_rules();
        let upgrading = self.phase.upgrading_player();
        let outcome = apply_upgrade(&mut self.state, rules, upgrading, player_id, action)?;
        if !outcome.still_upgrading {
            self.phase = SessionPhase::Running;
        }
        log::info!(
            "Player {} bought {} (score left {})",
            player_id,
            action,
            outcome.remaining_score
        );
        self.push_event(SessionEvent::UpgradeApplied {
            player_id,
            action,
            remaining_score: outcome.remaining_score,
        });
        Ok(outcome)
    }

    fn record(&mut self, report: &TickReport) {
        for kill in &report.kills {
            self.push_event(SessionEvent::EnemyKilled {
                killer: kill.killer,
                awarded: kill.awarded.clone(),
            });
        }
        for escape in &report.escapes {
            self.push_event(SessionEvent::EnemyEscaped {
                damaged: escape.damaged,
            });
        }
        for &player_id in &report.downed {
            log::info!("Player {} is down", player_id);
            self.push_event(SessionEvent::PlayerDowned { player_id });
        }
    }

    fn finish(&mut self) {
        let totals: Vec<(PlayerId, f32)> = self
            .state
            .players
            .iter()
            .map(|p| (p.id, p.total_score_earned))
            .collect();
        let best = totals.iter().map(|(_, total)| *total).fold(0.0f32, f32::max);
        let report = GameOverReport {
            final_score: best.floor() as u32,
            totals,
            enemies_killed: self.state.enemies_killed,
            ticks: self.engine.tick(),
            elapsed_ms: self.engine.clock_ms(),
        };

        self.phase = SessionPhase::Over;
        log::info!(
            "Session {} over after {} ticks: final score {}, {} enemies killed",
            self.id,
            report.ticks,
            report.final_score,
            report.enemies_killed
        );
        self.push_event(SessionEvent::SessionOver {
            final_score: report.final_score,
        });
        self.report = Some(report);
    }

    fn broadcast(&mut self, net: &mut NetworkSimulation) {
        let snapshot = self.state.snapshot(self.engine.tick(), self.engine.clock_ms());
        if let Err(err) = net.broadcast(&snapshot) {
            log::warn!("Failed to broadcast snapshot {}: {}", snapshot.tick, err);
        }
    }

    fn push_event(&mut self, event: SessionEvent) {
        self.events.push(self.engine.tick(), event);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::entity::PlayerInput;
    use crate::upgrade::UpgradeKind;

    fn config() -> SessionConfig {
        SessionConfig {
            seed: Some(5),
            ..SessionConfig::default()
        }
    }

    fn hosted(mode: SessionMode) -> (Session, TickOwnerHandle) {
        let mut session = Session::new(config(), mode);
        let joined = session.join(true).unwrap();
        (session, joined.owner.unwrap())
    }

    fn network() -> NetworkSimulation {
        let mut net = NetworkSimulation::new(Duration::from_millis(50));
        net.connect();
        net.add_participant(0);
        net
    }

    #[test]
    fn join_rules() {
        let mut session = Session::new(config(), SessionMode::Cooperative);
        assert!(matches!(session.join(false), Err(SessionError::NoHost)));

        let host = session.join(true).unwrap();
        assert_eq!(host.player_id, 0);
        assert!(host.owner.is_some());
        assert!(matches!(session.join(true), Err(SessionError::HostTaken)));

        for expected in 1..4 {
            let guest = session.join(false).unwrap();
            assert_eq!(guest.player_id, expected);
            assert!(guest.owner.is_none());
        }
        assert!(matches!(
            session.join(false),
            Err(SessionError::SessionFull { capacity: 4 })
        ));
    }

    #[test]
    fn single_mode_takes_one_player() {
        let (mut session, _owner) = hosted(SessionMode::Single);
        assert!(matches!(
            session.join(false),
            Err(SessionError::SessionFull { capacity: 1 })
        ));
    }

    #[test]
    fn joins_spread_players_evenly() {
        let (mut session, _owner) = hosted(SessionMode::Cooperative);
        session.join(false).unwrap();
        let xs: Vec<f32> = session.state().players.iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![160.0, 320.0]);
    }

    #[test]
    fn start_resets_and_spawns() {
        let (mut session, owner) = hosted(SessionMode::Single);
        session.start(&owner).unwrap();

        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.state().enemies.len(), 1);
        let player = &session.state().players[0];
        assert_eq!(player.health, 5);
        assert_eq!(player.score, 0.0);
        assert!(matches!(session.start(&owner), Err(SessionError::NotIdle)));
    }

    #[test]
    fn foreign_handle_cannot_tick() {
        let (mut session, _owner) = hosted(SessionMode::Single);
        let (_other, stranger) = hosted(SessionMode::Single);
        let mut net = network();

        assert!(matches!(session.start(&stranger), Err(SessionError::NotTickOwner)));
        assert_eq!(
            session.simulate_server_tick(&stranger, &mut net, 16.0),
            TickOutcome::Skipped
        );
    }

    #[test]
    fn idle_session_does_not_tick() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        assert_eq!(session.simulate_server_tick(&owner, &mut net, 16.0), TickOutcome::Skipped);
        assert_eq!(session.tick(), 0);
    }

    #[test]
    fn inputs_are_applied_before_movement() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        session.start(&owner).unwrap();
        let x = session.state().players[0].position.x;

        net.send_input(
            0,
            PlayerInput {
                left: false,
                right: true,
                shoot: false,
            },
        )
        .unwrap();
        net.advance(Duration::from_millis(25));
        session.simulate_server_tick(&owner, &mut net, 16.0);

        assert_eq!(session.state().players[0].position.x, x + 5.0);
    }

    #[test]
    fn frame_length_is_clamped() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        session.start(&owner).unwrap();
        session.simulate_server_tick(&owner, &mut net, 10_000.0);
        assert_eq!(session.clock_ms(), 250.0);
    }

    #[test]
    fn upgrade_pause_freezes_physics() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        session.start(&owner).unwrap();
        session.state.players[0].score = 20.0;

        assert!(session.begin_upgrade(0));
        let enemy_y = session.state().enemies[0].position.y;
        assert_eq!(
            session.simulate_server_tick(&owner, &mut net, 16.0),
            TickOutcome::Paused { upgrades_applied: 0 }
        );
        assert_eq!(session.state().enemies[0].position.y, enemy_y);
        assert_eq!(session.tick(), 0);

        net.send_upgrade(0, UpgradeAction::Track(UpgradeKind::Damage)).unwrap();
        net.send_upgrade(0, UpgradeAction::Track(UpgradeKind::FireRate)).unwrap();
        net.advance(Duration::from_millis(25));
        let outcome = session.simulate_server_tick(&owner, &mut net, 16.0);

        assert!(matches!(outcome, TickOutcome::Advanced(_)));
        assert_eq!(session.phase(), SessionPhase::Running);
        let player = &session.state().players[0];
        assert_eq!(player.score, 0.0);
        assert_eq!(player.upgrades.level(UpgradeKind::Damage), 2);
        assert_eq!(player.upgrades.level(UpgradeKind::FireRate), 2);
    }

    #[test]
    fn cannot_pause_without_enough_score() {
        let (mut session, owner) = hosted(SessionMode::Single);
        session.start(&owner).unwrap();
        session.state.players[0].score = 9.5;
        assert!(!session.begin_upgrade(0));
        assert_eq!(session.phase(), SessionPhase::Running);
    }

    #[test]
    fn rejected_upgrades_are_reported() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        session.start(&owner).unwrap();
        session.drain_events();

        net.send_upgrade(0, UpgradeAction::Track(UpgradeKind::Damage)).unwrap();
        net.send_upgrade_code(0, 42).unwrap();
        net.send_upgrade(9, UpgradeAction::Recover).unwrap();
        net.advance(Duration::from_millis(25));
        session.simulate_server_tick(&owner, &mut net, 16.0);

        let rejected: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e.event, SessionEvent::UpgradeRejected { .. }))
            .collect();
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn game_over_reports_best_total() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        session.start(&owner).unwrap();
        session.state.players[0].health = 1;
        session.state.players[0].total_score_earned = 16.5;
        session.state.enemies[0].position.y = 700.0;

        let outcome = session.simulate_server_tick(&owner, &mut net, 16.0);
        assert!(matches!(outcome, TickOutcome::Finished(_)));
        assert_eq!(session.phase(), SessionPhase::Over);

        let report = session.game_over_report().unwrap();
        assert_eq!(report.final_score, 16);
        assert_eq!(report.totals, vec![(0, 16.5)]);

        assert_eq!(session.simulate_server_tick(&owner, &mut net, 16.0), TickOutcome::Skipped);
        assert_eq!(session.tick(), 1);
    }

    #[test]
    fn save_data_is_single_player_only() {
        let (session, _owner) = hosted(SessionMode::Cooperative);
        assert!(matches!(session.save_data(), Err(PersistError::NotAvailable)));

        let (mut single, owner) = hosted(SessionMode::Single);
        single.start(&owner).unwrap();
        let mut save = single.save_data().unwrap();
        save.score = 12.0;
        save.upgrades[UpgradeKind::Damage.index()] = 3;

        single.end();
        single.start_with_save(&owner, &save).unwrap();
        let player = &single.state().players[0];
        assert_eq!(player.score, 12.0);
        assert_eq!(player.upgrades.level(UpgradeKind::Damage), 3);
    }

    #[test]
    fn save_from_game_over_starts_a_playable_run() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        session.start(&owner).unwrap();
        session.state.players[0].health = 1;
        session.state.players[0].total_score_earned = 42.0;
        session.state.enemies[0].position.y = 700.0;
        session.simulate_server_tick(&owner, &mut net, 16.0);

        let save = session.save_data().unwrap();
        assert_eq!(save.health, 0);

        session.end();
        session.start_with_save(&owner, &save).unwrap();
        assert_eq!(session.state().players[0].health, 5);
        assert!(matches!(
            session.simulate_server_tick(&owner, &mut net, 16.0),
            TickOutcome::Advanced(_)
        ));
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.state().players[0].total_score_earned, 42.0);
    }

    #[test]
    fn restart_keeps_purchased_upgrades() {
        let (mut session, owner) = hosted(SessionMode::Cooperative);
        session.join(false).unwrap();
        session.start(&owner).unwrap();
        session.state.players[1].score = 10.0;
        assert!(session.begin_upgrade(1));
        session
            .apply_upgrade(&owner, 1, UpgradeAction::Track(UpgradeKind::Bounce))
            .unwrap();
        session.state.players[1].health = 2;

        session.end();
        session.start(&owner).unwrap();

        let player = &session.state().players[1];
        assert_eq!(player.upgrades.level(UpgradeKind::Bounce), 1);
        assert_eq!(player.health, 5);
        assert_eq!(player.score, 0.0);
        assert_eq!(session.state().players[0].upgrades.purchased_levels(), 0);
    }

    #[test]
    fn input_for_unknown_player_is_dropped() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        session.start(&owner).unwrap();
        session.drain_events();
        let before = session.state().players.clone();

        net.send_input(
            9,
            PlayerInput {
                left: true,
                right: false,
                shoot: true,
            },
        )
        .unwrap();
        net.advance(Duration::from_millis(25));
        let outcome = session.simulate_server_tick(&owner, &mut net, 16.0);

        assert!(matches!(outcome, TickOutcome::Advanced(_)));
        assert_eq!(session.tick(), 1);
        assert_eq!(session.state().players, before);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn restart_after_game_over() {
        let (mut session, owner) = hosted(SessionMode::Single);
        let mut net = network();
        session.start(&owner).unwrap();
        session.state.players[0].health = 1;
        session.state.enemies[0].position.y = 700.0;
        session.simulate_server_tick(&owner, &mut net, 16.0);
        assert_eq!(session.phase(), SessionPhase::Over);

        session.start(&owner).unwrap();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.state().players[0].health, 5);
        assert!(session.game_over_report().is_none());
        assert_eq!(session.tick(), 0);
    }
}
