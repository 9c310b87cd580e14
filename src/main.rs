//! Computer Tennis random-agent runner
//!
//! Plays uniformly random button vectors on every court for a number of
//! steps, logs each finished episode and prints a JSON summary.

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use computer_tennis::{Action, Backend, EnvConfig, Result, VecEnv};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "computer-tennis")]
#[command(about = "Run random agents on the Computer Tennis environment", long_about = None)]
struct Cli {
    /// Steps to run on every court
    #[arg(long, default_value = "10000")]
    steps: u64,

    /// Seed for both the environment and the random agents
    #[arg(long)]
    seed: Option<u64>,

    /// Renderer backend ("vector" or "gpu")
    #[arg(long)]
    backend: Option<Backend>,

    /// Human-controlled paddles (1 or 2)
    #[arg(long)]
    players: Option<u8>,

    /// Courts stepped together
    #[arg(long)]
    num_envs: Option<usize>,

    /// Score that ends an episode
    #[arg(long)]
    max_score: Option<u32>,

    /// JSON config file; command line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Default, serde::Serialize)]
struct Summary {
    backend: Backend,
    courts: usize,
    agents: usize,
    steps: u64,
    episodes: u64,
    total_reward: f32,
    /// Finished episode returns per agent, in completion order
    returns: Vec<Vec<f32>>,
}

#[cfg(feature = "cli")]
fn build_env(config: &mut EnvConfig) -> Result<VecEnv> {
    match VecEnv::new(config.clone()) {
        Err(e) if e.is_backend_failure() && config.backend != Backend::Vector => {
            log::warn!("{}; falling back to the vector backend", e);
            config.backend = Backend::Vector;
            VecEnv::new(config.clone())
        }
        result => result,
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EnvConfig::load(path)?,
        None => EnvConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(players) = cli.players {
        config.num_players = players;
    }
    if let Some(num_envs) = cli.num_envs {
        config.num_envs = num_envs;
    }
    if let Some(max_score) = cli.max_score {
        config.max_score = max_score;
    }

    let mut env = build_env(&mut config)?;
    let agents = env.num_agents();
    // separate stream from every court
    let mut rng = rand_pcg::Pcg32::new(config.seed, u64::MAX);

    let mut summary = Summary {
        backend: config.backend,
        courts: env.num_envs(),
        agents,
        returns: vec![Vec::new(); agents],
        ..Default::default()
    };
    let mut running = vec![0.0f32; agents];

    for _ in 0..cli.steps {
        let actions: Vec<Action> = (0..agents).map(|_| Action::random(&mut rng)).collect();
        env.act(&actions)?;
        summary.steps += 1;

        let batch = env.observe();
        for agent in 0..agents {
            running[agent] += batch.rewards[agent];
            if batch.first[agent] {
                log::info!("Agent {} finished an episode with return {}", agent, running[agent]);
                summary.returns[agent].push(running[agent]);
                summary.total_reward += running[agent];
                running[agent] = 0.0;
                if agent % config.num_players as usize == 0 {
                    summary.episodes += 1;
                }
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("computer-tennis runner is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
