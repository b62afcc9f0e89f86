//! Elemental Conquest - Unified CLI
//!
//! Terminal matches, AI simulations, world exploration and statistics.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use elemental_conquest::{
    AiPlayer, AppConfig, HumanPlayer, JsonStatsStore, MatchRunner, Player, StatsStore,
};
use elemental_engine::{
    Coord, Element, EXPLORATION_SIZE, GameSession, PlayerSetup, SeededRandom, World,
};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            map_size,
            grid_size,
            difficulty,
            seed,
        } => {
            let mut config = AppConfig::load_or_default(&cli.config).context("Failed to load configuration")?;
            if let Some(map_size) = map_size {
                config = config.with_grid_size(map_size.grid_size());
            }
            if let Some(grid_size) = grid_size {
                config = config.with_grid_size(grid_size);
            }
            if let Some(difficulty) = difficulty {
                config = config.with_difficulty(difficulty);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            run_play(config)
        }
        Command::Simulate { games, seed, grid_size } => {
            let mut config = AppConfig::load_or_default(&cli.config).context("Failed to load configuration")?;
            if let Some(grid_size) = grid_size {
                config = config.with_grid_size(grid_size);
            }
            run_simulate(config, games, seed)
        }
        Command::Explore { element, seed } => run_explore(element, seed),
        Command::Stats { path } => {
            let path = match path {
                Some(path) => path,
                None => AppConfig::load_or_default(&cli.config)
                    .context("Failed to load configuration")?
                    .stats_path()
                    .clone(),
            };
            run_stats(&path)
        }
    }
}

/// Per-seat random stream: seeded matches stay reproducible, unseeded ones
/// draw from the OS.
fn seat_rng(seed: Option<u64>, stream: u64) -> SeededRandom {
    match seed {
        Some(seed) => SeededRandom::from_seed(seed.wrapping_add(stream)),
        None => SeededRandom::from_entropy(),
    }
}

fn seat_name(seat: usize, setup: &PlayerSetup) -> String {
    if setup.is_ai {
        format!("{} AI", setup.element)
    } else {
        format!("Player {} ({})", seat + 1, setup.element)
    }
}

/// Play a match in the terminal
#[instrument(skip(config))]
fn run_play(config: AppConfig) -> Result<()> {
    let session_config = config.session_config()?;
    let seed = *config.seed();

    let mut seats: Vec<Box<dyn Player>> = Vec::new();
    for (seat, setup) in session_config.players.iter().enumerate() {
        let name = seat_name(seat, setup);
        if setup.is_ai {
            seats.push(Box::new(AiPlayer::new(
                name,
                session_config.difficulty,
                seat_rng(seed, seat as u64 + 1),
            )));
        } else {
            // One-byte buffer: hot-seat humans share stdin without stealing
            // each other's lines.
            let input = BufReader::with_capacity(1, std::io::stdin());
            seats.push(Box::new(HumanPlayer::new(name, input, std::io::stdout())));
        }
    }
    let has_human = session_config.players.iter().any(|setup| !setup.is_ai);

    let game = GameSession::new(session_config)?;
    let mut runner = MatchRunner::new(game, seats, seat_rng(seed, 0), *config.turn_limit())?;
    if has_human {
        runner = runner.with_stats(Box::new(JsonStatsStore::new(config.stats_path().clone())));
    }

    println!("Commands: line h|v X Y | army FX FY TX TY | pass");
    let summary = runner.run().context("Match aborted")?;

    print!("\n{}", runner.game().board().display());
    match (summary.winner(), summary.winner_element()) {
        (Some(winner), Some(element)) => {
            println!("Player {} ({}) wins after {} turns", winner + 1, element, summary.turns());
        }
        _ => println!("Stalemate after {} turns", summary.turns()),
    }
    for (seat, territories) in summary.territories().iter().enumerate() {
        println!("  Player {}: {} territories", seat + 1, territories);
    }
    Ok(())
}

/// Run AI-only matches and tally wins per element
#[instrument(skip(config))]
fn run_simulate(config: AppConfig, games: u32, seed: u64) -> Result<()> {
    let players: Vec<PlayerSetup> = config
        .players()
        .iter()
        .map(|setup| PlayerSetup::ai(setup.element))
        .collect();
    let config = config.with_players(players);
    let session_config = config.session_config()?;

    let mut wins: BTreeMap<Element, u32> = BTreeMap::new();
    let mut stalemates = 0;
    let mut total_turns = 0u64;

    for game_index in 0..games {
        let game_seed = seed.wrapping_add(u64::from(game_index) * 1000);
        let seats: Vec<Box<dyn Player>> = session_config
            .players
            .iter()
            .enumerate()
            .map(|(seat, setup)| {
                Box::new(AiPlayer::new(
                    seat_name(seat, setup),
                    session_config.difficulty,
                    SeededRandom::from_seed(game_seed.wrapping_add(seat as u64 + 1)),
                )) as Box<dyn Player>
            })
            .collect();

        let game = GameSession::new(session_config.clone())?;
        let mut runner = MatchRunner::new(game, seats, SeededRandom::from_seed(game_seed), *config.turn_limit())?;
        let summary = runner
            .run()
            .with_context(|| format!("Simulated match {} aborted", game_index))?;
        total_turns += u64::from(*summary.turns());
        match summary.winner_element() {
            Some(element) => *wins.entry(*element).or_default() += 1,
            None => stalemates += 1,
        }
        info!(game = game_index, winner = ?summary.winner(), turns = summary.turns(), "Simulation finished");
    }

    println!("{} games on a {}x{} grid", games, config.grid_size(), config.grid_size());
    for element in Element::iter() {
        if let Some(count) = wins.get(&element) {
            println!("  {:<6} {} wins", element, count);
        }
    }
    println!("  stalemates: {}", stalemates);
    if games > 0 {
        println!("  average turns: {:.1}", total_turns as f64 / f64::from(games));
    }
    Ok(())
}

fn render_world(world: &World) -> String {
    let mut out = String::new();
    for y in 0..world.size() {
        for x in 0..world.size() {
            let coord = Coord::new(x, y);
            let symbol = if *world.hero().position() == coord {
                '@'
            } else {
                match world.tile(coord) {
                    Ok(tile) if tile.guardian().as_ref().is_some_and(|g| !g.defeated()) => 'G',
                    Ok(tile) if *tile.owned() => '#',
                    Ok(tile) if world.can_reach(coord) && !tile.explored() => '?',
                    Ok(_) => '.',
                    Err(_) => ' ',
                }
            };
            out.push(symbol);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Explore an elemental world with a single hero
#[instrument]
fn run_explore(element: Element, seed: Option<u64>) -> Result<()> {
    let mut rng = seat_rng(seed, 0);
    let mut world = World::generate(EXPLORATION_SIZE, element, &mut rng)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    writeln!(out, "Commands: X Y (explore) | ability | quit")?;
    while !world.is_won() {
        let hero = world.hero();
        write!(out, "\n{}", render_world(&world))?;
        writeln!(
            out,
            "level {} | mana {}/{} | items {} | land {}/{}",
            hero.level(),
            hero.mana(),
            hero.max_mana(),
            hero.items().len(),
            world.owned_count(),
            world.victory_threshold()
        )?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["quit"] | ["q"] => return Ok(()),
            ["ability"] => match world.use_ability() {
                Ok(mana) => writeln!(out, "{} ability unleashed, {} mana left", element, mana)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            [x, y] => {
                let (Ok(x), Ok(y)) = (x.parse::<usize>(), y.parse::<usize>()) else {
                    writeln!(out, "Coordinates must be non-negative integers")?;
                    continue;
                };
                match world.explore(Coord::new(x, y)) {
                    Ok(discovery) => writeln!(out, "{:?}", discovery)?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            _ => writeln!(out, "Commands: X Y (explore) | ability | quit")?,
        }
    }

    writeln!(out, "\n{}The world is yours.", render_world(&world))?;
    Ok(())
}

/// Show recorded statistics
#[instrument]
fn run_stats(path: &Path) -> Result<()> {
    let store = JsonStatsStore::new(PathBuf::from(path));
    let stats = store
        .stats()
        .with_context(|| format!("Failed to read stats from {}", path.display()))?;
    println!("Games played: {}", stats.games_played());
    println!("Current streak: {} (best {})", stats.current_streak(), stats.best_streak());
    for element in Element::iter() {
        println!(
            "  {:<6} {} wins, {} losses",
            element,
            stats.wins_with(element),
            stats.losses_with(element)
        );
    }
    Ok(())
}
