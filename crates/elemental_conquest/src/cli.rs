//! Command-line interface for elemental_conquest.

use clap::{Parser, Subcommand};
use elemental_engine::{Difficulty, Element, MapSize};
use std::path::PathBuf;

/// Elemental Conquest - draw borders, claim land, bend the rules with your element
#[derive(Parser, Debug)]
#[command(name = "elemental_conquest")]
#[command(about = "Elemental territory-conquest game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "elemental_conquest.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Board preset (small, medium, large)
        #[arg(long)]
        map_size: Option<MapSize>,

        /// Explicit grid side length, overriding the preset
        #[arg(long)]
        grid_size: Option<usize>,

        /// AI difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Seed for AI choices and elemental chance
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run AI-only matches and tally wins per element
    Simulate {
        /// Number of matches
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Seed of the first match; later matches add their index
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Explicit grid side length, overriding the configuration
        #[arg(long)]
        grid_size: Option<usize>,
    },

    /// Explore an elemental world with a single hero
    Explore {
        /// Hero's element
        #[arg(long, default_value = "fire")]
        element: Element,

        /// World generation seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show recorded statistics
    Stats {
        /// Stats file, overriding the configuration
        #[arg(long)]
        path: Option<PathBuf>,
    },
}
