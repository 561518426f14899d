use crate::config::SessionConfig;
use crate::entity::{GameState, Player, PlayerId, PlayerInput};
use crate::net::{NetworkSimulation, PacketError, WorldSnapshot};
use crate::session::Session;

use super::prediction::{ClientPrediction, Correction};

/// One participant's view of the game: a replica rebuilt from every snapshot
/// plus local prediction for its own player.
pub struct Client {
    player_id: PlayerId,
    width: f32,
    upgrade_cost: f32,
    replica: GameState,
    prediction: ClientPrediction,
    input: PlayerInput,
    last_tick: Option<u32>,
    hard_snaps: u32,
}

impl Client {
    pub fn new(player_id: PlayerId, config: &SessionConfig) -> Self {
        Self {
            player_id,
            width: config.arena.width,
            upgrade_cost: config.upgrade_cost,
            replica: GameState::new(),
            prediction: ClientPrediction::new(config.prediction),
            input: PlayerInput::IDLE,
            last_tick: None,
            hard_snaps: 0,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn state(&self) -> &GameState {
        &self.replica
    }

    pub fn local_player(&self) -> Option<&Player> {
        self.replica.player(self.player_id)
    }

    pub fn input(&self) -> PlayerInput {
        self.input
    }

    pub fn set_input(&mut self, input: PlayerInput) {
        self.input = input;
    }

    pub fn displayed_x(&self) -> Option<f32> {
        self.prediction.displayed_x()
    }

    pub fn last_tick(&self) -> Option<u32> {
        self.last_tick
    }

    /// Snapshots that disagreed with the prediction by more than the snap threshold.
    pub fn hard_snaps(&self) -> u32 {
        self.hard_snaps
    }

    /// Forgets everything learned from the previous run.
    pub fn reset(&mut self) {
        self.replica = GameState::new();
        self.prediction.reset();
        self.last_tick = None;
        self.hard_snaps = 0;
    }

    /// Moves the local player from the current input, ahead of the server.
    pub fn update_prediction(&mut self, dt_ms: f32) {
        let width = self.width;
        let input = self.input;
        let Some(player) = self.replica.player_mut(self.player_id) else {
            return;
        };
        if !player.is_alive() {
            return;
        }
        let x = self.prediction.apply_input(player, input, width, dt_ms);
        player.position.x = x;
        player.predicted_x = Some(x);
    }

    pub fn send_input(&self, net: &mut NetworkSimulation) -> Result<(), PacketError> {
        net.send_input(self.player_id, self.input)
    }

    /// Applies every snapshot that has reached this client.
    ///
    /// Deliveries are absorbed once the session is no longer playing. When the
    /// local player can afford an upgrade the session is paused for them.
    pub fn receive_state(&mut self, net: &mut NetworkSimulation, session: &mut Session) -> usize {
        let snapshots = net.receive(self.player_id);
        if !session.phase().is_active() {
            return 0;
        }

        let mut applied = 0;
        for snapshot in &snapshots {
            if self.apply_snapshot(snapshot).is_some() {
                applied += 1;
            }
        }

        if applied > 0 && session.phase().is_running() {
            let can_afford = self
                .local_player()
                .is_some_and(|p| p.is_alive() && p.score >= self.upgrade_cost);
            if can_afford {
                session.begin_upgrade(self.player_id);
            }
        }
        applied
    }

    /// Replaces the replica with `snapshot`, reconciling the local player.
    ///
    /// Returns `None` for a snapshot older than one already applied.
    pub fn apply_snapshot(&mut self, snapshot: &WorldSnapshot) -> Option<Option<Correction>> {
        if self.last_tick.is_some_and(|last| snapshot.tick < last) {
            log::debug!(
                "Client {} dropped stale snapshot {} (have {:?})",
                self.player_id,
                snapshot.tick,
                self.last_tick
            );
            return None;
        }
        self.last_tick = Some(snapshot.tick);
        self.replica = GameState::from_snapshot(snapshot);

        let correction = self.replica.player_mut(self.player_id).map(|player| {
            let correction = self.prediction.reconcile(player.position.x);
            if let Some(x) = self.prediction.displayed_x() {
                player.position.x = x;
            }
            player.predicted_x = self.prediction.predicted_x();
            correction
        });
        if matches!(correction, Some(Correction::Hard { .. })) {
            self.hard_snaps += 1;
        }
        Some(correction)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::ArenaConfig;

    fn snapshot_with_x(tick: u32, xs: &[f32]) -> WorldSnapshot {
        let arena = ArenaConfig::default();
        let mut state = GameState::new();
        for (i, x) in xs.iter().enumerate() {
            let mut player = Player::new(i as PlayerId, i, xs.len(), &arena);
            player.position = Vec2::new(*x, arena.player_row());
            state.players.push(player);
        }
        state.snapshot(tick, tick as f64 * 16.0)
    }

    #[test]
    fn remote_players_take_server_positions() {
        let mut client = Client::new(0, &SessionConfig::default());
        client.apply_snapshot(&snapshot_with_x(1, &[100.0, 200.0]));
        client.apply_snapshot(&snapshot_with_x(2, &[96.0, 250.0]));

        let state = client.state();
        assert_eq!(state.players[1].position.x, 250.0);
        assert!((state.players[0].position.x - 99.6).abs() < 1e-4);
        assert_eq!(state.players[0].predicted_x, Some(96.0));
    }

    #[test]
    fn stale_snapshots_are_ignored() {
        let mut client = Client::new(0, &SessionConfig::default());
        client.apply_snapshot(&snapshot_with_x(5, &[100.0]));
        assert!(client.apply_snapshot(&snapshot_with_x(4, &[300.0])).is_none());
        assert_eq!(client.last_tick(), Some(5));
        assert_eq!(client.displayed_x(), Some(100.0));
    }

    #[test]
    fn prediction_runs_without_the_network() {
        let mut client = Client::new(0, &SessionConfig::default());
        client.apply_snapshot(&snapshot_with_x(1, &[100.0]));
        client.set_input(PlayerInput {
            left: false,
            right: true,
            shoot: false,
        });
        client.update_prediction(16.0);
        client.update_prediction(16.0);

        assert_eq!(client.displayed_x(), Some(110.0));
        assert_eq!(client.local_player().map(|p| p.position.x), Some(110.0));
    }

    #[test]
    fn reset_forgets_the_previous_run() {
        let mut client = Client::new(0, &SessionConfig::default());
        client.apply_snapshot(&snapshot_with_x(9, &[100.0]));
        client.reset();
        assert!(client.apply_snapshot(&snapshot_with_x(1, &[50.0])).is_some());
        assert_eq!(client.displayed_x(), Some(50.0));
    }
}
