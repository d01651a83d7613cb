use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use connectx_agents::ai::{build_agent, EngineKind};
use connectx_agents::arena::play_match;
use connectx_agents::config::{validate_game, AppConfig};
use connectx_agents::game::ActRequest;

/// Choose Connect-X moves with minimax or MCTS.
#[derive(Parser)]
#[command(name = "connectx", about = "Connect-X move selection agents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "connectx.toml")]
    config: PathBuf,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Override the RNG seed of every engine
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a JSON move request and print the chosen column
    Act {
        #[arg(long, value_enum)]
        engine: EngineKind,

        /// Request file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Play a match between two engines and print the summary
    Play {
        #[arg(long, value_enum)]
        first: EngineKind,

        #[arg(long, value_enum)]
        second: EngineKind,

        #[arg(long, default_value_t = 10)]
        games: usize,
    },

    /// Print the default configuration as TOML
    DefaultConfig,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Command::DefaultConfig = cli.command {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    match cli.command {
        Command::Act { engine, input } => act(engine, input, &config),
        Command::Play {
            first,
            second,
            games,
        } => play(first, second, games, &config),
        Command::DefaultConfig => Ok(()),
    }
}

fn act(engine: EngineKind, input: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let raw = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading request from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading request from stdin")?;
            buf
        }
    };

    let request: ActRequest = serde_json::from_str(&raw).context("parsing move request")?;
    let game = request.game_config(&config.game);
    validate_game(&game).context("invalid request configuration")?;

    let mut agent = build_agent(engine, config);
    let column = agent
        .select_action(&request.observation, &game)
        .with_context(|| format!("{} could not choose a move", agent.name()))?;

    println!("{column}");
    Ok(())
}

fn play(first: EngineKind, second: EngineKind, games: usize, config: &AppConfig) -> Result<()> {
    if games == 0 {
        bail!("--games must be at least 1");
    }

    let mut a = build_agent(first, config);
    // Distinct streams when both sides share a seed
    let mut second_config = config.clone();
    second_config.seed = config.seed.map(|s| s.wrapping_add(1));
    let mut b = build_agent(second, &second_config);

    let stats = play_match(a.as_mut(), b.as_mut(), games, &config.game)
        .with_context(|| format!("{} vs {}", a.name(), b.name()))?;

    println!("A = {} ({first:?}), B = {} ({second:?})", a.name(), b.name());
    println!("{stats}");
    Ok(())
}
