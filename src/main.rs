use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger};

use connect_four_engine::config::AppConfig;
use connect_four_engine::game::CombinationIndex;
use connect_four_engine::simulate::{simulate, RandomPlayer};

/// Play random Connect Four games on a shared combination index.
#[derive(Parser)]
#[command(name = "connect-four-sim", about = "Simulate random Connect Four games")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override board columns
    #[arg(long)]
    columns: Option<usize>,

    /// Log level (overrides config; RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the final board of the last game
    #[arg(long)]
    show_last: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the combination index as JSON and exit
    #[arg(long)]
    dump_index: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = Logger::try_with_env_or_str(cli.log_level.as_deref().unwrap_or("info"))?
        .log_to_stderr()
        .adaptive_format_for_stderr(AdaptiveFormat::Default)
        .start()
        .context("starting logger")?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if cli.log_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
        logger
            .parse_new_spec(&config.logging.level)
            .with_context(|| format!("applying log level '{}'", config.logging.level))?;
    }

    // Apply CLI overrides
    if let Some(games) = cli.games {
        config.simulation.games = games;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.board.columns = columns;
    }
    config.validate().context("invalid settings")?;

    let index = CombinationIndex::build(config.board.rows, config.board.columns);

    if cli.dump_index {
        println!("{}", serde_json::to_string_pretty(&index)?);
        return Ok(());
    }

    let mut player = match config.simulation.seed {
        Some(seed) => RandomPlayer::seeded(seed),
        None => RandomPlayer::new(),
    };
    let (summary, last) = simulate(&index, config.simulation.games, &mut player)
        .context("running simulation")?;

    if cli.show_last {
        if let Some(state) = &last {
            println!("{}", state.board());
            if let Some(outcome) = state.outcome() {
                println!("Final outcome: {:?}", outcome);
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Games:      {}", summary.games);
        println!("X wins:     {}", summary.x_wins);
        println!("O wins:     {}", summary.o_wins);
        println!("Draws:      {}", summary.draws);
        println!("Avg length: {:.1}", summary.average_length());
    }

    Ok(())
}
