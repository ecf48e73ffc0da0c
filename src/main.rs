//! Headless runner for the falling-block engine
//!
//! Plays one session with a seeded random input source on a simulated
//! frame clock, then prints the result as JSON.

use anyhow::{Context, Result};
use blockfall::{GameSession, GameStatus, Score, Settings, TickInput};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Play a session without a screen and report how it went.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence and the simulated player
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the automatic drop interval, in milliseconds
    #[arg(long)]
    drop_delay_ms: Option<u64>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Stop after this many ticks even if the game is still running
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,

    /// Read settings from this file instead of the config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the config directory
    #[arg(long)]
    save_config: bool,

    /// Print the full final snapshot instead of the summary
    #[arg(long)]
    snapshot: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    simulated_ms: u128,
    status: GameStatus,
    score: Score,
}

fn blockfall_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Random intents with a bias toward dropping
fn random_input(rng: &mut ChaCha8Rng) -> TickInput {
    TickInput {
        move_left: rng.gen_bool(0.15),
        move_right: rng.gen_bool(0.15),
        soft_drop: rng.gen_bool(0.25),
        rotate: rng.gen_bool(0.05),
        close: false,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let run_id: u32 = rand::random();
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", run_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockfall=debug".parse().context("bad log directive")?),
        )
        .with_ansi(false)
        .init();

    tracing::info!("blockfall starting, log={}", log_dir.join(&log_file).display());

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load(),
    };
    if let Some(seed) = args.seed {
        settings.session.seed = Some(seed);
    }
    if let Some(ms) = args.drop_delay_ms {
        settings.timing.drop_delay_ms = ms;
    }
    let mut config = settings.session_config().context("invalid settings")?;
    let seed = config.seed.unwrap_or_else(rand::random);
    config.seed = Some(seed);

    if args.save_config {
        settings.save().context("saving settings")?;
    }

    let frame = Duration::from_secs(1) / args.fps.max(1);
    let start = Instant::now();
    let mut now = start;
    let mut session = GameSession::start_at(config, start);
    let mut player = ChaCha8Rng::seed_from_u64(seed.rotate_left(17));

    let mut ticks = 0;
    while session.is_running() && ticks < args.max_ticks {
        now += frame;
        session.update_at(random_input(&mut player), now);
        ticks += 1;
    }
    if session.is_running() {
        tracing::info!(ticks, "tick limit reached");
        session.close();
    }

    let out = if args.snapshot {
        serde_json::to_string_pretty(&session.snapshot())?
    } else {
        serde_json::to_string_pretty(&Summary {
            seed,
            ticks,
            simulated_ms: (now - start).as_millis(),
            status: session.status(),
            score: *session.score(),
        })?
    };
    println!("{}", out);
    Ok(())
}
