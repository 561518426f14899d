mod channel;
mod protocol;
mod simulator;
mod snapshot;
mod stats;

pub use channel::{Channel, DelayedChannel};
pub use protocol::{
    InputCommand, InputFlags, PROTOCOL_MAGIC, PROTOCOL_VERSION, Packet, PacketError,
    PacketHeader, PacketType, UpgradeRequest,
};
pub use simulator::{NetworkSimulation, PendingCommand, PlayerCommand};
pub use snapshot::{BulletState, EnemyState, PlayerState, WorldSnapshot};
pub use stats::ChannelStats;
