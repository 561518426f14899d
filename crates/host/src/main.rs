mod bot;
mod config;
mod runner;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use starfall::SessionConfig;

use config::HostConfig;
use runner::HostRunner;

#[derive(Parser)]
#[command(name = "starfall-host")]
#[command(about = "Headless Starfall session driven by scripted players")]
struct Args {
    #[arg(short, long, default_value_t = 1, help = "Players (1 = single, 2-4 = co-op)")]
    players: usize,

    #[arg(short, long, default_value_t = 50, help = "Round-trip latency in ms")]
    latency_ms: u64,

    #[arg(long, default_value_t = 16.0, help = "Frame length in ms")]
    frame_ms: f32,

    #[arg(short, long, default_value_t = 36_000, help = "Frame budget")]
    frames: u64,

    #[arg(short, long, help = "RNG seed for a reproducible run")]
    seed: Option<u64>,

    #[arg(long, help = "Pace frames against the wall clock")]
    realtime: bool,

    #[arg(long, help = "Write the single player's save here at the end")]
    save: Option<PathBuf>,

    #[arg(long, help = "Start the single player from this save")]
    load: Option<PathBuf>,

    #[arg(long, help = "Print the game over report as JSON")]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !(1..=starfall::config::MAX_PLAYERS).contains(&args.players) {
        bail!("players must be between 1 and {}", starfall::config::MAX_PLAYERS);
    }
    if args.frame_ms <= 0.0 {
        bail!("frame length must be positive");
    }

    let config = HostConfig {
        players: args.players,
        frame_ms: args.frame_ms,
        max_frames: args.frames,
        realtime: args.realtime,
        session: SessionConfig {
            latency_ms: args.latency_ms,
            seed: args.seed,
            ..SessionConfig::default()
        },
        save_path: args.save,
        load_path: args.load,
        report_json: args.json,
    };

    log::info!(
        "Starting {:?} session with {} player(s), {} ms latency",
        config.mode(),
        config.players,
        config.session.latency_ms
    );

    let report_json = config.report_json;
    let mut runner = HostRunner::new(config)?;
    runner.start()?;
    let report = runner.run()?;

    if report_json {
        if let Some(report) = report {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
