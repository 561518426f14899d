use std::fs;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use starfall::{
    FixedTimestep, GameLoop, GameOverReport, SaveData, SessionEvent, SessionPhase, TickOutcome,
};

use crate::bot::Bot;
use crate::config::HostConfig;

pub struct HostRunner {
    config: HostConfig,
    game: GameLoop,
    bots: Vec<Bot>,
    frames: u64,
}

impl HostRunner {
    pub fn new(config: HostConfig) -> Result<Self> {
        let game = GameLoop::new(config.session.clone(), config.mode(), config.players)
            .context("failed to set up session")?;

        let uplink_ms = config.session.one_way_delay().as_secs_f32() * 1000.0;
        let cooldown = (uplink_ms / config.frame_ms).ceil() as u32 + 1;
        let bots = game
            .clients()
            .iter()
            .map(|client| Bot::new(client.player_id(), cooldown))
            .collect();

        Ok(Self {
            config,
            game,
            bots,
            frames: 0,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        match self.load_save()? {
            Some(save) => self.game.start_with_save(&save)?,
            None => self.game.start()?,
        }
        Ok(())
    }

    /// Plays until game over or the frame budget runs out.
    pub fn run(&mut self) -> Result<Option<GameOverReport>> {
        if self.config.realtime {
            self.run_realtime();
        } else {
            while self.frames < self.config.max_frames && !self.step(self.config.frame_ms) {}
        }
        self.finish()
    }

    fn run_realtime(&mut self) {
        let mut timestep = FixedTimestep::new(self.config.frame_ms, self.config.session.max_frame_ms);
        let mut last = Instant::now();
        while self.frames < self.config.max_frames {
            let now = Instant::now();
            timestep.accumulate((now - last).as_secs_f32() * 1000.0);
            last = now;

            while timestep.consume_tick() {
                if self.step(timestep.step_ms()) {
                    return;
                }
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    /// One frame; returns true once the session is over.
    fn step(&mut self, dt_ms: f32) -> bool {
        for bot in &self.bots {
            if let Some(client) = self.game.client(bot.player_id()) {
                let input = bot.decide_input(client);
                self.game.set_input(bot.player_id(), input);
            }
        }

        let outcome = self.game.frame(dt_ms);
        self.frames += 1;

        if let SessionPhase::Upgrading { player_id } = self.game.session().phase() {
            self.spend_upgrade(player_id);
        }
        self.log_events();

        matches!(outcome, TickOutcome::Finished(_))
    }

    fn spend_upgrade(&mut self, player_id: starfall::PlayerId) {
        let cooperative = self.config.mode().is_cooperative();
        let Some(bot) = self.bots.iter_mut().find(|b| b.player_id() == player_id) else {
            return;
        };
        let Some(action) = bot.choose_upgrade(self.game.session().state(), cooperative) else {
            return;
        };
        if let Err(err) = self.game.request_upgrade(player_id, action) {
            log::warn!("Player {} could not request {}: {}", player_id, action, err);
        }
    }

    fn log_events(&mut self) {
        for pending in self.game.session_mut().drain_events() {
            match pending.event {
                SessionEvent::EnemyKilled { killer, awarded } => {
                    log::debug!("[{}] enemy killed by {:?}, awarded {:?}", pending.tick, killer, awarded);
                }
                SessionEvent::EnemyEscaped { damaged } => {
                    log::debug!("[{}] enemy escaped, damaged {:?}", pending.tick, damaged);
                }
                SessionEvent::UpgradeRejected { player_id, reason } => {
                    log::debug!("[{}] upgrade for player {} rejected: {}", pending.tick, player_id, reason);
                }
                other => log::trace!("[{}] {:?}", pending.tick, other),
            }
        }
    }

    fn load_save(&self) -> Result<Option<SaveData>> {
        let Some(path) = &self.config.load_path else {
            return Ok(None);
        };
        if self.config.mode().is_cooperative() {
            log::warn!("Ignoring save file {}: multiplayer sessions never persist", path.display());
            return Ok(None);
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read save file {}", path.display()))?;
        let save = SaveData::from_json(&json)
            .with_context(|| format!("failed to parse save file {}", path.display()))?;
        log::info!("Loaded save from {}", path.display());
        Ok(Some(save))
    }

    fn finish(&mut self) -> Result<Option<GameOverReport>> {
        let session = self.game.session();
        let report = session.game_over_report().cloned();

        match &report {
            Some(report) => log::info!(
                "Game over after {} frames ({:.1}s simulated)",
                self.frames,
                report.elapsed_ms / 1000.0
            ),
            None => log::info!(
                "Frame budget of {} exhausted at tick {}",
                self.config.max_frames,
                session.tick()
            ),
        }
        self.log_scoreboard();

        if let Some(path) = &self.config.save_path {
            if self.config.mode().is_cooperative() {
                log::warn!("Not saving: multiplayer sessions never persist");
            } else {
                let json = session.save_data()?.to_json()?;
                fs::write(path, json)
                    .with_context(|| format!("failed to write save file {}", path.display()))?;
                log::info!("Saved player to {}", path.display());
            }
        }

        self.game.end();
        Ok(report)
    }

    fn log_scoreboard(&self) {
        let state = self.game.session().state();
        log::info!(
            "{:<8} {:<7} {:>6} {:>8} {:>8} {:>6}",
            "player",
            "color",
            "health",
            "score",
            "total",
            "snaps"
        );
        for player in &state.players {
            let snaps = self.game.client(player.id).map_or(0, |c| c.hard_snaps());
            log::info!(
                "{:<8} {:<7} {:>6} {:>8.1} {:>8.1} {:>6}",
                player.id,
                player.color.label(),
                player.health,
                player.score,
                player.total_score_earned,
                snaps
            );
        }
        let stats = self.game.network().stats();
        log::info!(
            "{} enemies killed, {} packets sent, {} delivered, {} in flight",
            state.enemies_killed,
            stats.packets_sent,
            stats.packets_delivered,
            stats.in_flight()
        );
    }
}
