//! Elemental Conquest - playable matches over the elemental engine
//!
//! Seats human and AI players around a [`elemental_engine::GameSession`],
//! runs the turn loop, and keeps win/loss statistics between runs.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod orchestrator;
mod players;
mod stats;

pub use config::{AppConfig, AppConfigError};
pub use orchestrator::{MatchEvent, MatchRunner, MatchSummary};
pub use players::{AiPlayer, CommandError, HumanPlayer, Player, parse_command};
pub use stats::{GameStats, JsonStatsStore, MemoryStatsStore, StatsError, StatsStore};
