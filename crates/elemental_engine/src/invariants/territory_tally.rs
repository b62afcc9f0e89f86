//! Player territory counters agree with the board.

use super::Invariant;
use crate::session::GameSession;

/// Invariant: each player's territory counter equals the cells they own.
///
/// This implies the counters sum to the number of claimed cells.
pub struct TerritoryTallyInvariant;

impl Invariant<GameSession> for TerritoryTallyInvariant {
    fn holds(game: &GameSession) -> bool {
        let counted: usize = game.players().iter().map(|p| *p.territories() as usize).sum();
        counted == game.board().claimed_count()
            && game
                .players()
                .iter()
                .all(|p| *p.territories() as usize == game.board().owned_by(*p.id()).count())
    }

    fn description() -> &'static str {
        "Player territory counters match the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlayerSetup, SessionConfig};
    use crate::Element;

    #[test]
    fn test_miscounted_player_violates() {
        let config = SessionConfig::new(
            2,
            vec![PlayerSetup::human(Element::Earth), PlayerSetup::human(Element::Wind)],
        );
        let mut game = GameSession::new(config).unwrap();
        assert!(TerritoryTallyInvariant::holds(&game));
        game.players[1].set_territories(2);
        assert!(!TerritoryTallyInvariant::holds(&game));
    }
}
