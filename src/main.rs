//! Flag Stack
//!
//! Generates seeded Mahjong-style flag boards: a layout preset is compiled to
//! tile positions, run through mirror/rotate/stagger/settle transforms, and
//! paired with country codes so the board is provably clearable. A second mode
//! builds five continent piles fed from a balanced country pool. Boards can be
//! printed, exported as JSON, or explored in an interactive 3D viewer.

mod visualization;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use flagstack::board::{self, Board, BoardConfig, TileSlot};
use flagstack::countries::Continent;
use flagstack::layouts::Preset;
use flagstack::pool::build_balanced_pool;

/// Builds and displays seeded flag-tile boards.
#[derive(Parser)]
#[command(name = "flagstack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base seed for every randomized decision.
    #[arg(short, long, default_value_t = 98597, global = true)]
    seed: u32,
    /// Force a layout preset instead of the seeded auto-pick.
    #[arg(short, long, global = true)]
    preset: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build a mahjong board and print a summary.
    Build,
    /// Build the five continent piles and print their purity.
    Piles,
    /// Export a board as JSON on stdout.
    Export {
        /// Export the piles board instead of the mahjong board.
        #[arg(long)]
        piles: bool,
    },
    /// Print the continent-balanced country pool.
    Pool {
        /// Countries per continent.
        #[arg(long, default_value_t = 10)]
        quota: usize,
    },
    /// Explore a board in the interactive 3D viewer.
    Display,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config_from(&cli)?;

    match cli.command {
        Some(Command::Build) => {
            run_build(&config);
        }
        Some(Command::Piles) => run_piles(&config),
        Some(Command::Export { piles }) => run_export(&config, piles)?,
        Some(Command::Pool { quota }) => run_pool(config.seed, quota),
        Some(Command::Display) => visualization::display(config),
        None => {
            // default: build and display
            run_build(&config);
            println!("Controls: Left/Right reseed, P preset, M mode");
            visualization::display(config);
        }
    }
    Ok(())
}

fn config_from(cli: &Cli) -> Result<BoardConfig> {
    let preset = match &cli.preset {
        None => None,
        Some(name) => match Preset::from_name(name) {
            Some(p) => Some(p),
            None => {
                let known: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
                bail!("unknown preset '{name}', expected one of: {}", known.join(", "));
            }
        },
    };
    Ok(BoardConfig {
        seed: cli.seed,
        preset,
        ..BoardConfig::default()
    })
}

/// Builds the mahjong board and prints its summary.
fn run_build(config: &BoardConfig) -> Board {
    let board = board::build_board(config);
    for diagnostic in &board.diagnostics {
        eprintln!("{diagnostic}");
    }
    println!("{}", summarize(&board));
    board
}

/// One-line board summary for the terminal.
fn summarize(board: &Board) -> String {
    let free = (0..board.slots.len())
        .filter(|&i| board.is_free(i))
        .count();
    let solvable = if board.removal_order.is_some() {
        "solvable"
    } else {
        "no solvability witness"
    };
    format!(
        "seed {} preset {}: {} tiles, {} free, {}",
        board.seed,
        board.preset.map(Preset::name).unwrap_or("-"),
        board.slots.len(),
        free,
        solvable
    )
}

/// Builds the piles board and prints per-pile purity.
fn run_piles(config: &BoardConfig) {
    let board = board::build_piles(config);
    for diagnostic in &board.diagnostics {
        eprintln!("{diagnostic}");
    }
    for (pile, &anchor) in board.anchors.iter().enumerate() {
        match board.pile_purity(pile) {
            Some((continent, pct)) => {
                println!("pile {pile} (x={anchor:+.2}): {continent} {pct}%")
            }
            None => println!("pile {pile} (x={anchor:+.2}): empty"),
        }
    }
    if let Some(hand) = &board.hand {
        println!("hand: {} ({})", hand.code, hand.continent());
    }
    if board.all_piles_pure() {
        println!("all piles pure");
    }
}

#[derive(Serialize)]
struct Export<'a> {
    seed: u32,
    mode: &'static str,
    preset: Option<&'static str>,
    slots: &'a [TileSlot],
    hand: Option<&'a TileSlot>,
    solvable: bool,
}

/// Prints the board as pretty JSON on stdout.
fn run_export(config: &BoardConfig, piles: bool) -> Result<()> {
    let board = if piles {
        board::build_piles(config)
    } else {
        board::build_board(config)
    };
    for diagnostic in &board.diagnostics {
        eprintln!("{diagnostic}");
    }
    let export = Export {
        seed: board.seed,
        mode: if piles { "piles" } else { "mahjong" },
        preset: board.preset.map(Preset::name),
        slots: &board.slots,
        hand: board.hand.as_ref(),
        solvable: board.removal_order.is_some(),
    };
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}

/// Prints the balanced pool grouped by continent.
fn run_pool(seed: u32, quota: usize) {
    let pool = build_balanced_pool(seed, quota);
    for continent in Continent::ALL {
        let codes: Vec<&str> = pool
            .iter()
            .copied()
            .filter(|c| flagstack::countries::continent_of(c) == continent)
            .collect();
        println!("{continent}: {}", codes.join(" "));
    }
    println!("{} countries total", pool.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_build_returns_the_board() {
        let config = BoardConfig::default();
        let board = run_build(&config);
        assert_eq!(board.slots.len(), 144);
    }

    #[test]
    fn test_summary_mentions_solvability() {
        let config = BoardConfig {
            preset: Some(Preset::Turtle),
            ..BoardConfig::default()
        };
        let board = board::build_board(&config);
        let summary = summarize(&board);
        assert!(summary.contains("144 tiles"));
        assert!(summary.contains("solvable"));
    }

    #[test]
    fn test_export_json_shape() {
        let config = BoardConfig::default();
        let board = board::build_piles(&config);
        let export = Export {
            seed: board.seed,
            mode: "piles",
            preset: None,
            slots: &board.slots,
            hand: board.hand.as_ref(),
            solvable: false,
        };
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&export).unwrap()).unwrap();
        assert_eq!(value["seed"], 98597);
        assert_eq!(value["slots"].as_array().unwrap().len(), 50);
        assert!(value["hand"]["code"].is_string());
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let cli = Cli {
            seed: 1,
            preset: Some("dragon_v2".to_string()),
            command: None,
        };
        assert!(config_from(&cli).is_err());
    }
}
