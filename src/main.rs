use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use connect_four_duel::config::AppConfig;
use connect_four_duel::duel::Duel;
use connect_four_duel::game::Piece;
use connect_four_duel::logging::init_logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FirstArg {
    Deepening,
    Minimax,
}

impl From<FirstArg> for Piece {
    fn from(arg: FirstArg) -> Piece {
        match arg {
            FirstArg::Deepening => Piece::Deepening,
            FirstArg::Minimax => Piece::Minimax,
        }
    }
}

/// Watch iterative deepening play fixed-depth minimax at Connect Four.
#[derive(Parser)]
#[command(name = "connect-four-duel", about = "Two search agents play Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "duel.toml")]
    config: PathBuf,

    /// Seed for every random choice (starting piece, fallback moves)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the fixed-depth agent's search depth
    #[arg(long)]
    fixed_depth: Option<u32>,

    /// Override the iterative-deepening agent's maximum depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Stop deepening once this many milliseconds have passed
    #[arg(long)]
    time_budget_ms: Option<u64>,

    /// Force the starting piece instead of picking at random
    #[arg(long, value_enum)]
    first: Option<FirstArg>,

    /// Search the full tree without alpha-beta cutoffs
    #[arg(long)]
    no_alpha_beta: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(seed) = cli.seed {
        config.duel.seed = Some(seed);
    }
    if let Some(depth) = cli.fixed_depth {
        config.search.fixed_depth = depth;
    }
    if let Some(depth) = cli.max_depth {
        config.search.max_depth = depth;
    }
    if let Some(ms) = cli.time_budget_ms {
        config.search.time_budget_ms = Some(ms);
    }
    if let Some(first) = cli.first {
        config.duel.first = Some(first.into());
    }
    if cli.no_alpha_beta {
        config.search.alpha_beta = false;
    }
    config.validate().context("invalid configuration")?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config).context("serializing config")?);
        return Ok(());
    }

    let mut duel = Duel::from_config(&config);
    println!("{}\n", duel.board());
    let outcome = duel.play(|turn| {
        if turn.applied {
            println!("{}\n", turn.board);
        }
    });
    println!("{}", duel.announcement(outcome));

    Ok(())
}
