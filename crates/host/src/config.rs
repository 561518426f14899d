use std::path::PathBuf;

use starfall::{SessionConfig, SessionMode};

#[derive(Debug, Clone)]
pub struct HostConfig {
    pub players: usize,
    pub frame_ms: f32,
    /// Upper bound on simulated frames; the run also stops at game over.
    pub max_frames: u64,
    pub realtime: bool,
    pub session: SessionConfig,
    pub save_path: Option<PathBuf>,
    pub load_path: Option<PathBuf>,
    pub report_json: bool,
}

impl HostConfig {
    pub fn mode(&self) -> SessionMode {
        if self.players > 1 {
            SessionMode::Cooperative
        } else {
            SessionMode::Single
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            players: 1,
            frame_ms: 16.0,
            max_frames: 36_000,
            realtime: false,
            session: SessionConfig::default(),
            save_path: None,
            load_path: None,
            report_json: false,
        }
    }
}
