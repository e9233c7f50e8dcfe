//! Lineup CLI
//!
//! Generates fielding assignments and a batting order from a roster JSON
//! file (or the built-in demo roster) and prints the result as a scorecard
//! table plus the validation report.

mod sample;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lineup_core::{GameConfig, Lineup, Player, Position, Severity};

#[derive(Parser)]
#[command(name = "lineup_cli")]
#[command(about = "Generate fielding lineups and batting orders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a lineup from a roster file
    Generate {
        /// Input roster JSON (array of players)
        #[arg(long)]
        roster: PathBuf,

        /// Game configuration JSON; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fixed tie-break seed for a reproducible lineup
        #[arg(long)]
        seed: Option<u64>,

        /// Write the full lineup snapshot JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a lineup for the built-in demo roster
    Demo {
        /// Fixed tie-break seed for a reproducible lineup
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { roster, config, seed, out } => {
            let raw = std::fs::read_to_string(&roster)
                .with_context(|| format!("reading roster {}", roster.display()))?;
            let players: Vec<Player> =
                serde_json::from_str(&raw).context("parsing roster JSON")?;
            let config = match config {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading config {}", path.display()))?;
                    serde_json::from_str(&raw).context("parsing config JSON")?
                }
                None => GameConfig::default(),
            };

            let lineup = build(players, config, seed)?;
            print_lineup(&lineup);

            if let Some(path) = out {
                let snapshot = serde_json::to_string_pretty(&lineup.snapshot())?;
                std::fs::write(&path, snapshot)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("\nSnapshot written to {}", path.display());
            }
        }
        Commands::Demo { seed } => {
            let lineup = build(sample::demo_roster(), GameConfig::default(), Some(seed))?;
            print_lineup(&lineup);
        }
    }
    Ok(())
}

fn build(players: Vec<Player>, config: GameConfig, seed: Option<u64>) -> Result<Lineup> {
    let lineup = match seed {
        Some(seed) => Lineup::with_seed(players, config, seed),
        None => Lineup::new(players, config),
    };
    lineup.context("generating lineup")
}

fn short_name(lineup: &Lineup, id: &str) -> String {
    match lineup.player(id) {
        Some(player) => match player.number {
            Some(number) => format!("#{} {}", number, player.last_name),
            None => player.last_name.clone(),
        },
        None => id.to_string(),
    }
}

fn print_lineup(lineup: &Lineup) {
    let config = lineup.config();
    println!("{} vs {} at {}", config.team_name, config.opponent, config.field);

    // Fielding grid, one row per position.
    print!("{:<4}", "");
    for inning in 1..=config.innings {
        print!("{:<16}", format!("Inning {}", inning));
    }
    println!();
    for position in Position::FIELD {
        print!("{:<4}", position.code());
        for inning in 1..=config.innings {
            let cell = lineup
                .grid()
                .inning(inning)
                .ok()
                .and_then(|slots| slots.fielder(position).cloned())
                .map(|id| short_name(lineup, &id))
                .unwrap_or_else(|| "--".to_string());
            print!("{:<16}", cell);
        }
        println!();
    }

    // Bench rows are ragged; print them last.
    print!("{:<4}", "BN");
    for inning in 1..=config.innings {
        let bench = lineup
            .grid()
            .inning(inning)
            .map(|slots| {
                slots
                    .bench
                    .iter()
                    .map(|id| short_name(lineup, id))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        print!("{:<16}", bench);
    }
    println!();

    println!("\nBatting order:");
    for (index, id) in lineup.batting_order().iter().enumerate() {
        println!("  {}. {}", index + 1, short_name(lineup, id));
    }

    let errors = lineup.validation_errors();
    let warnings = lineup.validation_warnings();
    if errors.is_empty() && warnings.is_empty() {
        println!("\nNo rule violations.");
        return;
    }
    println!();
    for issue in errors.iter().chain(&warnings) {
        let tag = match issue.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "warning",
        };
        println!("{}: {}", tag, issue.message);
    }
}
