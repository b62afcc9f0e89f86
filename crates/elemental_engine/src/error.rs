//! Programmer-fault and configuration error types.

use crate::position::Coord;
use crate::{Element, PlayerId};
use derive_more::{Display, Error};
use tracing::instrument;

/// A coordinate or edge lies outside the board.
///
/// Never produced by a correct engine given valid inputs; callers treat it
/// as a fatal invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Out of bounds: {} on a {}x{} board at {}:{}", target, grid_size, grid_size, file, line)]
pub struct BoundsError {
    /// What was accessed (territory or edge label).
    pub target: String,
    /// Side length of the board.
    pub grid_size: usize,
    /// Line number where the access happened.
    pub line: u32,
    /// Source file where the access happened.
    pub file: &'static str,
}

impl BoundsError {
    /// Creates a bounds error with caller location tracking.
    #[track_caller]
    #[instrument(skip(target))]
    pub fn new(target: impl Into<String>, grid_size: usize) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            target: target.into(),
            grid_size,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Reason a session configuration was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// Grid size must be positive.
    #[display("grid size must be positive, got {}", _0)]
    GridSize(usize),
    /// Between two and four players are supported.
    #[display("player count must be 2..=4, got {}", _0)]
    PlayerCount(usize),
    /// Each element may be assigned to at most one player.
    #[display("element {} assigned to more than one player", _0)]
    DuplicateElement(Element),
    /// Element and AI-flag lists must describe the same players.
    #[display("{} elements given for {} players", elements, players)]
    ElementCount {
        /// Number of elements supplied.
        elements: usize,
        /// Number of players described by the AI flags.
        players: usize,
    },
    /// A prepared board must match the configured grid size.
    #[display("board is {}x{}, expected {}x{}", actual, actual, expected, expected)]
    BoardSize {
        /// Configured grid size.
        expected: usize,
        /// Side length of the supplied board.
        actual: usize,
    },
    /// A prepared board names an owner that is not seated.
    #[display("owner {} is not a seated player", _0)]
    UnknownOwner(PlayerId),
    /// A prepared board holds a claimed territory without armies.
    #[display("territory {} is claimed with no armies", _0)]
    EmptyGarrison(Coord),
}

/// Invalid session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// What was wrong.
    pub kind: ConfigErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_error_tracks_caller() {
        let err = BoundsError::new("(9, 9)", 4);
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("(9, 9) on a 4x4 board"));
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::new(ConfigErrorKind::PlayerCount(5));
        assert_eq!(err.kind, ConfigErrorKind::PlayerCount(5));
        assert!(err.to_string().contains("player count must be 2..=4, got 5"));
    }
}
