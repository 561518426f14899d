pub mod client;
pub mod config;
pub mod entity;
pub mod event;
pub mod geometry;
pub mod net;
pub mod persistence;
pub mod session;
pub mod simulation;
pub mod upgrade;

pub use client::{Client, ClientPrediction, Correction};
pub use config::{ArenaConfig, EnemyTuning, PlayerTuning, PredictionTuning, SessionConfig};
pub use entity::{Bullet, Enemy, GameState, Player, PlayerColor, PlayerId, PlayerInput};
pub use event::{EventQueue, PendingEvent, SessionEvent};
pub use net::{
    BulletState, Channel, ChannelStats, DelayedChannel, EnemyState, InputCommand, InputFlags,
    NetworkSimulation, Packet, PacketError, PacketHeader, PacketType, PendingCommand,
    PlayerCommand, PlayerState, UpgradeRequest, WorldSnapshot,
};
pub use persistence::{PersistError, SaveData};
pub use session::{
    GameLoop, GameOverReport, Joined, Roster, RosterEntry, Session, SessionError, SessionMode,
    SessionPhase, TickOutcome, TickOwnerHandle,
};
pub use simulation::{FixedTimestep, TickEngine, TickReport};
pub use upgrade::{
    UpgradeAction, UpgradeError, UpgradeKind, UpgradeOutcome, UpgradeRules, UpgradeSet,
    UpgradeTrack,
};
