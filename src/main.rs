use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::{Rng, SeedableRng};
use racer_env::{
    Action, ActionSpace, Collaborators, EnvConfig, LogSink, LogTraceSink, RacerEnv,
    RandomTelemetry, TraceSink, WriterTraceSink,
};
use tracing_subscriber::EnvFilter;

/// Drives the racing environment with a random policy and simulated telemetry.
#[derive(Parser)]
#[command(name = "racer-env")]
#[command(version)]
struct Cli {
    /// Path to a JSON environment configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulation world name, overriding the configuration
    #[arg(short, long)]
    world: Option<String>,

    /// Number of episodes to run
    #[arg(short, long, default_value = "3")]
    episodes: usize,

    /// Maximum number of steps per episode
    #[arg(short, long, default_value = "100")]
    max_steps: usize,

    /// Random seed for the telemetry and the policy
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Write trace lines to this file instead of the log
    #[arg(short, long)]
    trace_file: Option<PathBuf>,

    /// Skip the settle pauses, which only matter with a real simulator
    #[arg(long)]
    no_settle: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &cli.config {
        Some(path) => EnvConfig::from_file(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?,
        None => EnvConfig::default(),
    };
    if let Some(world) = cli.world {
        config.world_name = world;
    }
    if cli.no_settle {
        config.reset_settle_ms = 0;
        config.step_settle_ms = 0;
    }

    let track = racer_env::lookup_track(&config.world_name)?;
    let trace: Box<dyn TraceSink + Send> = match &cli.trace_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create trace file {}", path.display()))?;
            Box::new(WriterTraceSink::new(BufWriter::new(file)))
        }
        None => Box::new(LogTraceSink),
    };
    let io = Collaborators {
        telemetry: Box::new(RandomTelemetry::new(&track, (640, 480), cli.seed)),
        actuator: Box::new(LogSink),
        placement: Box::new(LogSink),
        metrics: Box::new(LogSink),
        trace,
    };
    let mut env = RacerEnv::new(config, io)?;

    let num_actions = match env.action_space() {
        ActionSpace::Discrete(n) => n,
        ActionSpace::Continuous { .. } => anyhow::bail!("Expected a discrete action space"),
    };
    let mut rng = rand::rngs::StdRng::seed_from_u64(cli.seed.wrapping_add(1));

    let t_start = Instant::now();
    for _ in 0..cli.episodes {
        env.reset()?;
        for _ in 0..cli.max_steps {
            let action = Action::Discrete(rng.gen_range(0..num_actions));
            if env.step(action)?.done {
                break;
            }
        }
    }
    env.close();

    log::info!(
        "Ran {} episodes in {}ms",
        cli.episodes,
        t_start.elapsed().as_millis()
    );
    Ok(())
}
