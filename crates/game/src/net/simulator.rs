use std::time::Duration;

use crate::entity::{PlayerId, PlayerInput};
use crate::upgrade::UpgradeAction;

use super::channel::{Channel, DelayedChannel};
use super::protocol::{InputCommand, Packet, PacketError, PacketHeader, PacketType, UpgradeRequest};
use super::snapshot::WorldSnapshot;
use super::stats::ChannelStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Input(PlayerInput),
    /// Raw action code; the tick owner decides whether it names a real upgrade.
    Upgrade(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCommand {
    pub player_id: PlayerId,
    pub sequence: u32,
    pub command: PlayerCommand,
}

type ChannelFactory = Box<dyn Fn() -> Box<dyn Channel>>;

/// Host/client split inside one process.
///
/// One uplink carries every participant's commands to the tick owner and
/// one downlink per participant carries snapshots back. Each direction is
/// delayed by half of the configured round-trip latency.
pub struct NetworkSimulation {
    connected: bool,
    latency: Duration,
    uplink: Box<dyn Channel>,
    downlinks: Vec<(PlayerId, Box<dyn Channel>)>,
    make_channel: ChannelFactory,
    send_sequence: u32,
}

impl NetworkSimulation {
    pub fn new(latency: Duration) -> Self {
        Self::with_transport(latency, || Box::new(DelayedChannel::new()))
    }

    pub fn with_transport<F>(latency: Duration, make_channel: F) -> Self
    where
        F: Fn() -> Box<dyn Channel> + 'static,
    {
        Self {
            connected: false,
            latency,
            uplink: make_channel(),
            downlinks: Vec::new(),
            make_channel: Box::new(make_channel),
            send_sequence: 0,
        }
    }

    pub fn connect(&mut self) {
        if !self.connected {
            log::info!("Network connected (latency {} ms)", self.latency.as_millis());
        }
        self.connected = true;
    }

    /// Drops every in-flight message; later sends are no-ops until reconnected.
    pub fn disconnect(&mut self) {
        if self.connected {
            log::info!("Network disconnected");
        }
        self.connected = false;
        self.flush();
    }

    /// Drops every in-flight message in both directions and stays connected.
    pub fn flush(&mut self) {
        self.uplink.clear();
        for (_, downlink) in &mut self.downlinks {
            downlink.clear();
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn one_way_delay(&self) -> Duration {
        self.latency / 2
    }

    pub fn add_participant(&mut self, player_id: PlayerId) {
        if self.downlinks.iter().any(|(id, _)| *id == player_id) {
            return;
        }
        self.downlinks.push((player_id, (self.make_channel)()));
    }

    /// Drops `player_id`'s downlink along with any snapshots still queued on it.
    pub fn remove_participant(&mut self, player_id: PlayerId) -> bool {
        let before = self.downlinks.len();
        self.downlinks.retain(|(id, _)| *id != player_id);
        before != self.downlinks.len()
    }

    pub fn participants(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.downlinks.iter().map(|(id, _)| *id)
    }

    pub fn send_input(&mut self, player_id: PlayerId, input: PlayerInput) -> Result<(), PacketError> {
        let sequence = self.send_sequence;
        self.send_uplink(PacketType::Input(InputCommand::new(player_id, sequence, input)))
    }

    pub fn send_upgrade(&mut self, player_id: PlayerId, action: UpgradeAction) -> Result<(), PacketError> {
        self.send_upgrade_code(player_id, action.code())
    }

    pub fn send_upgrade_code(&mut self, player_id: PlayerId, action: u8) -> Result<(), PacketError> {
        self.send_uplink(PacketType::Upgrade(UpgradeRequest { player_id, action }))
    }

    /// Queues an independent copy of `snapshot` for every participant.
    pub fn broadcast(&mut self, snapshot: &WorldSnapshot) -> Result<(), PacketError> {
        if !self.connected {
            return Ok(());
        }
        let delay = self.one_way_delay();
        for (_, downlink) in &mut self.downlinks {
            let packet = Packet::new(
                PacketHeader::new(snapshot.tick),
                PacketType::Snapshot(snapshot.clone()),
            );
            downlink.send(&packet, delay)?;
        }
        Ok(())
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.uplink.advance(elapsed);
        for (_, downlink) in &mut self.downlinks {
            downlink.advance(elapsed);
        }
    }

    /// Every command that has reached the tick owner, in send order.
    pub fn drain_commands(&mut self) -> Vec<PendingCommand> {
        let packets = self.uplink.poll();
        if !self.connected {
            return Vec::new();
        }
        packets
            .into_iter()
            .filter_map(|packet| match packet.payload {
                PacketType::Input(cmd) => Some(PendingCommand {
                    player_id: cmd.player_id,
                    sequence: cmd.sequence,
                    command: PlayerCommand::Input(cmd.input()),
                }),
                PacketType::Upgrade(request) => Some(PendingCommand {
                    player_id: request.player_id,
                    sequence: packet.header.sequence,
                    command: PlayerCommand::Upgrade(request.action),
                }),
                PacketType::Snapshot(_) => {
                    log::debug!("Ignoring snapshot sent upstream");
                    None
                }
            })
            .collect()
    }

    /// Snapshots delivered to `player_id` so far; empty while disconnected.
    pub fn receive(&mut self, player_id: PlayerId) -> Vec<WorldSnapshot> {
        let Some((_, downlink)) = self.downlinks.iter_mut().find(|(id, _)| *id == player_id) else {
            return Vec::new();
        };
        let packets = downlink.poll();
        if !self.connected {
            return Vec::new();
        }
        packets
            .into_iter()
            .filter_map(|packet| match packet.payload {
                PacketType::Snapshot(snapshot) => Some(snapshot),
                _ => None,
            })
            .collect()
    }

    pub fn stats(&self) -> ChannelStats {
        let mut total = *self.uplink.stats();
        for (_, downlink) in &self.downlinks {
            total.merge(downlink.stats());
        }
        total
    }

    fn send_uplink(&mut self, payload: PacketType) -> Result<(), PacketError> {
        if !self.connected {
            return Ok(());
        }
        let packet = Packet::new(PacketHeader::new(self.send_sequence), payload);
        self.send_sequence = self.send_sequence.wrapping_add(1);
        let delay = self.one_way_delay();
        self.uplink.send(&packet, delay)
    }
}
