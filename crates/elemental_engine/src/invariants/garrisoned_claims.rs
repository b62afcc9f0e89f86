//! Every claimed territory holds at least one army.

use super::Invariant;
use crate::session::GameSession;

/// Invariant: claimed territories are garrisoned.
///
/// A territory is claimed exactly when it has an owner, and a claim always
/// carries at least one army. Tie battles leave the defender with one.
pub struct GarrisonedClaimsInvariant;

impl Invariant<GameSession> for GarrisonedClaimsInvariant {
    fn holds(game: &GameSession) -> bool {
        game.board()
            .territories()
            .all(|t| t.claim().is_none_or(|claim| claim.army >= 1))
    }

    fn description() -> &'static str {
        "Claimed territories hold at least one army"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Claim;
    use crate::config::{PlayerSetup, SessionConfig};
    use crate::position::Coord;
    use crate::Element;

    #[test]
    fn test_zero_army_claim_violates() {
        let config = SessionConfig::new(
            2,
            vec![PlayerSetup::human(Element::Earth), PlayerSetup::human(Element::Wind)],
        );
        let mut game = GameSession::new(config).unwrap();
        assert!(GarrisonedClaimsInvariant::holds(&game));
        game.board
            .set_territory(Coord::new(1, 1), Some(Claim::new(0, 0, Element::Earth)))
            .unwrap();
        assert!(!GarrisonedClaimsInvariant::holds(&game));
    }
}
