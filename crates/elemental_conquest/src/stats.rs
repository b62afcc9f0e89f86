//! Persisted win/loss statistics.

use derive_getters::Getters;
use derive_more::{Display, Error};
use elemental_engine::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Lifetime results of the human players on this machine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct GameStats {
    /// Results recorded.
    #[serde(default)]
    games_played: u32,
    /// Wins by the element played.
    #[serde(default)]
    wins: BTreeMap<Element, u32>,
    /// Losses by the element played.
    #[serde(default)]
    losses: BTreeMap<Element, u32>,
    /// Consecutive wins up to the latest result.
    #[serde(default)]
    current_streak: u32,
    /// Longest streak seen.
    #[serde(default)]
    best_streak: u32,
}

impl GameStats {
    /// Adds one result.
    #[instrument(skip(self))]
    pub fn record(&mut self, element: Element, won: bool) {
        self.games_played += 1;
        if won {
            *self.wins.entry(element).or_default() += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            *self.losses.entry(element).or_default() += 1;
            self.current_streak = 0;
        }
    }

    /// Wins recorded with `element`.
    pub fn wins_with(&self, element: Element) -> u32 {
        self.wins.get(&element).copied().unwrap_or(0)
    }

    /// Losses recorded with `element`.
    pub fn losses_with(&self, element: Element) -> u32 {
        self.losses.get(&element).copied().unwrap_or(0)
    }

    /// Total wins across elements.
    pub fn total_wins(&self) -> u32 {
        self.wins.values().sum()
    }
}

/// Storage for [`GameStats`].
pub trait StatsStore {
    /// Records one result and returns the updated totals.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the store cannot be read or written.
    fn record_result(&mut self, element: Element, won: bool) -> Result<GameStats, StatsError>;

    /// Current totals.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the store cannot be read.
    fn stats(&self) -> Result<GameStats, StatsError>;
}

/// Stats kept in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    stats: GameStats,
}

impl MemoryStatsStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemoryStatsStore {
    fn record_result(&mut self, element: Element, won: bool) -> Result<GameStats, StatsError> {
        self.stats.record(element, won);
        Ok(self.stats.clone())
    }

    fn stats(&self) -> Result<GameStats, StatsError> {
        Ok(self.stats.clone())
    }
}

/// Stats persisted as a JSON file, created on first write.
#[derive(Debug, Clone)]
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    /// A store backed by `path`.
    #[instrument(skip(path))]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "Opening stats store");
        Self { path }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonStatsStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn record_result(&mut self, element: Element, won: bool) -> Result<GameStats, StatsError> {
        let mut stats = self.stats()?;
        stats.record(element, won);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&stats)?;
        std::fs::write(&self.path, json)?;

        info!(%element, won, games = stats.games_played, "Result recorded");
        Ok(stats)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn stats(&self) -> Result<GameStats, StatsError> {
        if !self.path.exists() {
            debug!("No stats file yet");
            return Ok(GameStats::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Stats storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Stats error: {} at {}:{}", message, file, line)]
pub struct StatsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StatsError {
    /// Creates a new stats error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StatsError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StatsError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaks() {
        let mut stats = GameStats::default();
        stats.record(Element::Fire, true);
        stats.record(Element::Fire, true);
        stats.record(Element::Water, false);
        stats.record(Element::Wind, true);
        assert_eq!(*stats.games_played(), 4);
        assert_eq!(stats.wins_with(Element::Fire), 2);
        assert_eq!(stats.losses_with(Element::Water), 1);
        assert_eq!(*stats.current_streak(), 1);
        assert_eq!(*stats.best_streak(), 2);
        assert_eq!(stats.total_wins(), 3);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStatsStore::new();
        store.record_result(Element::Earth, false).unwrap();
        assert_eq!(store.stats().unwrap().losses_with(Element::Earth), 1);
    }
}
