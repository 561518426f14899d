use std::time::Duration;

use crate::client::Client;
use crate::config::SessionConfig;
use crate::entity::{PlayerId, PlayerInput};
use crate::net::{NetworkSimulation, PacketError};
use crate::persistence::SaveData;
use crate::upgrade::UpgradeAction;

use super::{Session, SessionError, SessionMode, TickOutcome, TickOwnerHandle};

/// Drives a whole session in one process: every participant's client, the
/// simulated network between them and the host's authoritative tick.
pub struct GameLoop {
    session: Session,
    owner: TickOwnerHandle,
    net: NetworkSimulation,
    clients: Vec<Client>,
}

impl GameLoop {
    /// Creates a session, joins the host plus `players - 1` guests and connects them.
    pub fn new(config: SessionConfig, mode: SessionMode, players: usize) -> Result<Self, SessionError> {
        let mut session = Session::new(config.clone(), mode);
        let mut net = NetworkSimulation::new(Duration::from_millis(config.latency_ms));
        net.connect();

        let host = session.join(true)?;
        let owner = host.owner.ok_or(SessionError::NoHost)?;
        net.add_participant(host.player_id);
        let mut clients = vec![Client::new(host.player_id, &config)];

        for _ in 1..players.max(1) {
            let guest = session.join(false)?;
            net.add_participant(guest.player_id);
            clients.push(Client::new(guest.player_id, &config));
        }

        Ok(Self {
            session,
            owner,
            net,
            clients,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn network(&self) -> &NetworkSimulation {
        &self.net
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, player_id: PlayerId) -> Option<&Client> {
        self.clients.iter().find(|c| c.player_id() == player_id)
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.session.start(&self.owner)?;
        self.reset_run();
        Ok(())
    }

    pub fn start_with_save(&mut self, save: &SaveData) -> Result<(), SessionError> {
        self.session.start_with_save(&self.owner, save)?;
        self.reset_run();
        Ok(())
    }

    pub fn end(&mut self) {
        self.session.end();
        self.net.flush();
    }

    /// Sets the input `player_id`'s client will predict with and send next frame.
    pub fn set_input(&mut self, player_id: PlayerId, input: PlayerInput) -> bool {
        match self.clients.iter_mut().find(|c| c.player_id() == player_id) {
            Some(client) => {
                client.set_input(input);
                true
            }
            None => false,
        }
    }

    /// Sends an upgrade request from `player_id` to the host.
    pub fn request_upgrade(&mut self, player_id: PlayerId, action: UpgradeAction) -> Result<(), PacketError> {
        self.net.send_upgrade(player_id, action)
    }

    /// Runs one frame of `dt_ms`, clamped to the session's longest frame.
    ///
    /// Clients predict and send input first, then the network clock advances,
    /// the host ticks and every client takes whatever snapshots arrived.
    pub fn frame(&mut self, dt_ms: f32) -> TickOutcome {
        let dt_ms = dt_ms.clamp(0.0, self.session.config().max_frame_ms);
        if self.session.phase().is_running() {
            for client in &mut self.clients {
                client.update_prediction(dt_ms);
                if let Err(err) = client.send_input(&mut self.net) {
                    log::warn!("Client {} failed to send input: {}", client.player_id(), err);
                }
            }
        }

        self.net.advance(frame_duration(dt_ms));
        let outcome = self
            .session
            .simulate_server_tick(&self.owner, &mut self.net, dt_ms);

        for client in &mut self.clients {
            client.receive_state(&mut self.net, &mut self.session);
        }
        outcome
    }

    /// Nothing sent during an earlier run may reach the new one.
    fn reset_run(&mut self) {
        self.net.flush();
        for client in &mut self.clients {
            client.reset();
        }
    }
}

fn frame_duration(dt_ms: f32) -> Duration {
    Duration::from_micros((dt_ms.max(0.0) * 1000.0).round() as u64)
}
