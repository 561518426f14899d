use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize, rancor};

use crate::entity::{PlayerId, PlayerInput};

use super::snapshot::WorldSnapshot;

pub const PROTOCOL_VERSION: u32 = 1;
pub const PROTOCOL_MAGIC: u32 = 0x5354_4652;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputFlags: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const SHOOT = 1 << 2;
    }
}

impl From<PlayerInput> for InputFlags {
    fn from(input: PlayerInput) -> Self {
        let mut flags = InputFlags::empty();
        flags.set(InputFlags::LEFT, input.left);
        flags.set(InputFlags::RIGHT, input.right);
        flags.set(InputFlags::SHOOT, input.shoot);
        flags
    }
}

impl From<InputFlags> for PlayerInput {
    fn from(flags: InputFlags) -> Self {
        Self {
            left: flags.contains(InputFlags::LEFT),
            right: flags.contains(InputFlags::RIGHT),
            shoot: flags.contains(InputFlags::SHOOT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq), derive(Debug))]
pub struct PacketHeader {
    pub magic: u32,
    pub version: u32,
    pub sequence: u32,
}

impl PacketHeader {
    pub fn new(sequence: u32) -> Self {
        Self {
            magic: PROTOCOL_MAGIC,
            version: PROTOCOL_VERSION,
            sequence,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.magic == PROTOCOL_MAGIC && self.version == PROTOCOL_VERSION
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct InputCommand {
    pub player_id: PlayerId,
    pub sequence: u32,
    pub flags: u8,
}

impl InputCommand {
    pub fn new(player_id: PlayerId, sequence: u32, input: PlayerInput) -> Self {
        Self {
            player_id,
            sequence,
            flags: InputFlags::from(input).bits(),
        }
    }

    pub fn input(&self) -> PlayerInput {
        InputFlags::from_bits_truncate(self.flags).into()
    }
}

/// Purchase request; `action` is an `UpgradeAction` code and may be unknown to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct UpgradeRequest {
    pub player_id: PlayerId,
    pub action: u8,
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub enum PacketType {
    Input(InputCommand),
    Upgrade(UpgradeRequest),
    Snapshot(WorldSnapshot),
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct Packet {
    pub header: PacketHeader,
    pub payload: PacketType,
}

#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    #[error("serialization failed: {0}")]
    Serialize(rancor::Error),
    #[error("deserialization failed: {0}")]
    Deserialize(rancor::Error),
    #[error("invalid packet header")]
    InvalidHeader,
}

impl Packet {
    pub fn new(header: PacketHeader, payload: PacketType) -> Self {
        Self { header, payload }
    }

    pub fn encode(&self) -> Result<AlignedVec, PacketError> {
        rkyv::to_bytes::<rancor::Error>(self).map_err(PacketError::Serialize)
    }

    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        let packet =
            rkyv::from_bytes::<Self, rancor::Error>(data).map_err(PacketError::Deserialize)?;
        if !packet.header.is_valid() {
            return Err(PacketError::InvalidHeader);
        }
        Ok(packet)
    }
}
