use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::ArenaConfig;
use crate::entity::{GameState, PlayerId};

use super::combat::{EscapeEvent, KillEvent, resolve_collisions, resolve_escapes};
use super::firing::try_fire;
use super::movement::{advance_bullet, advance_enemies, move_player};
use super::spawn::spawn_enemy;

/// Turns variable frame lengths into whole simulation steps.
pub struct FixedTimestep {
    step_ms: f32,
    max_frame_ms: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step_ms: f32, max_frame_ms: f32) -> Self {
        Self {
            step_ms,
            max_frame_ms,
            accumulator: 0.0,
        }
    }

    pub fn step_ms(&self) -> f32 {
        self.step_ms
    }

    pub fn accumulate(&mut self, delta_ms: f32) {
        self.accumulator += delta_ms.clamp(0.0, self.max_frame_ms);
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.step_ms {
            self.accumulator -= self.step_ms;
            true
        } else {
            false
        }
    }

}

/// What happened during one authoritative step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u32,
    pub bullets_fired: usize,
    pub bullets_expired: usize,
    pub hits: usize,
    pub enemy_spawned: bool,
    pub kills: Vec<KillEvent>,
    pub escapes: Vec<EscapeEvent>,
    pub downed: Vec<PlayerId>,
    pub all_dead: bool,
}

/// The single writer of the authoritative [`GameState`].
///
/// Owns the simulation clock, which only advances while physics runs, and the
/// RNG used for spawning and bounce rolls.
pub struct TickEngine {
    arena: ArenaConfig,
    cooperative: bool,
    seed: Option<u64>,
    rng: StdRng,
    clock_ms: f64,
    tick: u32,
}

impl TickEngine {
    pub fn new(arena: ArenaConfig, cooperative: bool, seed: Option<u64>) -> Self {
        Self {
            arena,
            cooperative,
            seed,
            rng: make_rng(seed),
            clock_ms: 0.0,
            tick: 0,
        }
    }

    pub fn arena(&self) -> &ArenaConfig {
        &self.arena
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Rewinds the clock and reseeds; used when a session (re)starts.
    pub fn reset(&mut self) {
        self.clock_ms = 0.0;
        self.tick = 0;
        self.rng = make_rng(self.seed);
    }

    pub fn spawn_enemy(&mut self, state: &mut GameState) {
        spawn_enemy(state, &self.arena, &mut self.rng);
    }

    /// Runs movement, firing, spawning, collisions and escapes for one frame.
    /// Input has already been applied to the players.
    pub fn step(&mut self, state: &mut GameState, dt_ms: f32) -> TickReport {
        self.clock_ms += dt_ms as f64;
        self.tick = self.tick.wrapping_add(1);

        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };
        let alive_before: Vec<PlayerId> = state.living_players().map(|p| p.id).collect();

        for player in state.players.iter_mut().filter(|p| p.is_alive()) {
            move_player(player, self.arena.width, dt_ms);
            report.bullets_fired += try_fire(player, self.clock_ms, &self.arena.player, &mut self.rng);
        }

        let (width, height) = (self.arena.width, self.arena.height);
        for player in state.players.iter_mut() {
            for bullet in player.bullets.iter_mut() {
                advance_bullet(bullet, &state.enemies, &self.arena, dt_ms);
            }
            let before = player.bullets.len();
            player.bullets.retain(|b| !b.is_out_of_bounds(width, height));
            report.bullets_expired += before - player.bullets.len();
        }

        if state.enemies.is_empty() {
            self.spawn_enemy(state);
            report.enemy_spawned = true;
        }

        advance_enemies(&mut state.enemies, dt_ms);

        let collisions = resolve_collisions(state, self.arena.enemy.value, self.cooperative);
        report.hits = collisions.hits;
        report.kills = collisions.kills;

        if state.any_alive() {
            report.escapes = resolve_escapes(state, height);
        }

        report.downed = alive_before
            .into_iter()
            .filter(|id| state.player(*id).is_some_and(|p| !p.is_alive()))
            .collect();
        report.all_dead = !state.any_alive();

        log::trace!(
            "tick {}: fired={} hits={} kills={} enemies={} bullets={}",
            report.tick,
            report.bullets_fired,
            report.hits,
            report.kills.len(),
            state.enemies.len(),
            state.bullet_count()
        );
        report
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
