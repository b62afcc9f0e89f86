//! Session configuration and validation.

use crate::error::{ConfigError, ConfigErrorKind};
use crate::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Smallest supported roster.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported roster (one seat per element).
pub const MAX_PLAYERS: usize = 4;

/// Named board size presets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MapSize {
    /// 8 × 8.
    Small,
    /// 10 × 10.
    #[default]
    Medium,
    /// 12 × 12.
    Large,
}

impl MapSize {
    /// Grid side length for this preset.
    pub fn grid_size(self) -> usize {
        match self {
            MapSize::Small => 8,
            MapSize::Medium => 10,
            MapSize::Large => 12,
        }
    }
}

/// AI difficulty: how far down the ranked line candidates the AI may pick.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Picks among the top 70% of candidates.
    Easy,
    /// Picks among the top 30% of candidates.
    #[default]
    Medium,
    /// Picks among the top 10% of candidates.
    Hard,
}

impl Difficulty {
    /// Percentage of the ranked candidates the AI samples from.
    pub fn candidate_percent(self) -> usize {
        match self {
            Difficulty::Easy => 70,
            Difficulty::Medium => 30,
            Difficulty::Hard => 10,
        }
    }

    /// Number of top candidates to sample from out of `total`, rounded down
    /// but never below one.
    pub fn candidate_pool(self, total: usize) -> usize {
        (total * self.candidate_percent() / 100).max(1)
    }
}

/// One seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Faction for this seat.
    pub element: Element,
    /// Whether the heuristic AI plays this seat.
    #[serde(default)]
    pub is_ai: bool,
}

impl PlayerSetup {
    /// A human-controlled seat.
    pub fn human(element: Element) -> Self {
        Self {
            element,
            is_ai: false,
        }
    }

    /// An AI-controlled seat.
    pub fn ai(element: Element) -> Self {
        Self { element, is_ai: true }
    }
}

/// Everything needed to start a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Side length of the square board.
    pub grid_size: usize,
    /// Seats in turn order.
    pub players: Vec<PlayerSetup>,
    /// Difficulty used by AI seats.
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl SessionConfig {
    /// Creates a configuration from seats in turn order.
    #[instrument(skip(players), fields(player_count = players.len()))]
    pub fn new(grid_size: usize, players: Vec<PlayerSetup>) -> Self {
        Self {
            grid_size,
            players,
            difficulty: Difficulty::default(),
        }
    }

    /// Creates a configuration from parallel element and AI-flag lists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the lists have different lengths or the
    /// resulting configuration fails [`SessionConfig::validate`].
    #[track_caller]
    #[instrument]
    pub fn from_parts(
        grid_size: usize,
        elements: &[Element],
        ai_flags: &[bool],
    ) -> Result<Self, ConfigError> {
        if elements.len() != ai_flags.len() {
            warn!(elements = elements.len(), players = ai_flags.len(), "Element list mismatch");
            return Err(ConfigError::new(ConfigErrorKind::ElementCount {
                elements: elements.len(),
                players: ai_flags.len(),
            }));
        }
        let players = elements
            .iter()
            .zip(ai_flags)
            .map(|(&element, &is_ai)| PlayerSetup { element, is_ai })
            .collect();
        let config = Self::new(grid_size, players);
        config.validate()?;
        Ok(config)
    }

    /// Sets the AI difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Checks grid size, player count and element uniqueness.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    #[track_caller]
    #[instrument(skip(self), fields(grid_size = self.grid_size, players = self.players.len()))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::new(ConfigErrorKind::GridSize(self.grid_size)));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players.len()) {
            return Err(ConfigError::new(ConfigErrorKind::PlayerCount(self.players.len())));
        }
        let mut seen = HashSet::new();
        for seat in &self.players {
            if !seen.insert(seat.element) {
                return Err(ConfigError::new(ConfigErrorKind::DuplicateElement(seat.element)));
            }
        }
        debug!("Session config valid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_seats() -> Vec<PlayerSetup> {
        vec![PlayerSetup::human(Element::Fire), PlayerSetup::ai(Element::Water)]
    }

    #[test]
    fn test_valid_config() {
        assert!(SessionConfig::new(10, two_seats()).validate().is_ok());
    }

    #[test]
    fn test_zero_grid_rejected() {
        let err = SessionConfig::new(0, two_seats()).validate().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::GridSize(0));
    }

    #[test]
    fn test_player_count_bounds() {
        let one = vec![PlayerSetup::human(Element::Fire)];
        let err = SessionConfig::new(8, one).validate().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::PlayerCount(1));

        let five = vec![
            PlayerSetup::human(Element::Fire),
            PlayerSetup::ai(Element::Water),
            PlayerSetup::ai(Element::Earth),
            PlayerSetup::ai(Element::Wind),
            PlayerSetup::ai(Element::Fire),
        ];
        let err = SessionConfig::new(8, five).validate().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::PlayerCount(5));
    }

    #[test]
    fn test_duplicate_element_rejected() {
        let seats = vec![PlayerSetup::human(Element::Earth), PlayerSetup::ai(Element::Earth)];
        let err = SessionConfig::new(8, seats).validate().unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::DuplicateElement(Element::Earth));
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let err = SessionConfig::from_parts(8, &[Element::Fire, Element::Wind], &[false]).unwrap_err();
        assert_eq!(
            err.kind,
            ConfigErrorKind::ElementCount {
                elements: 2,
                players: 1
            }
        );
    }

    #[test]
    fn test_candidate_pool_never_empty() {
        assert_eq!(Difficulty::Hard.candidate_pool(5), 1);
        assert_eq!(Difficulty::Hard.candidate_pool(40), 4);
        assert_eq!(Difficulty::Medium.candidate_pool(40), 12);
        assert_eq!(Difficulty::Easy.candidate_pool(10), 7);
        assert_eq!(Difficulty::Easy.candidate_pool(0), 1);
    }

    #[test]
    fn test_map_size_presets() {
        assert_eq!(MapSize::Small.grid_size(), 8);
        assert_eq!(MapSize::default().grid_size(), 10);
        assert_eq!(MapSize::Large.grid_size(), 12);
    }
}
