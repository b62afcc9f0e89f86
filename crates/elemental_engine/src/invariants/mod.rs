//! First-class invariants for conquest sessions.
//!
//! Invariants are logical properties that hold after every accepted
//! operation. Each is testable on its own; the session checks them as a set
//! in debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of two and three invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod garrisoned_claims;
pub mod seated_owners;
pub mod territory_tally;

pub use garrisoned_claims::GarrisonedClaimsInvariant;
pub use seated_owners::SeatedOwnersInvariant;
pub use territory_tally::TerritoryTallyInvariant;

/// All conquest invariants as a composable set.
pub type ConquestInvariants = (
    GarrisonedClaimsInvariant,
    TerritoryTallyInvariant,
    SeatedOwnersInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Claim;
    use crate::config::{PlayerSetup, SessionConfig};
    use crate::position::{Coord, Orientation};
    use crate::session::GameSession;
    use crate::Element;

    fn game() -> GameSession {
        let config = SessionConfig::new(
            3,
            vec![PlayerSetup::human(Element::Fire), PlayerSetup::human(Element::Water)],
        );
        GameSession::new(config).unwrap()
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(ConquestInvariants::check_all(&game()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = game();
        game.draw_line(0, Orientation::Horizontal, 0, 0).unwrap();
        assert!(ConquestInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut game = game();
        game.board
            .set_territory(Coord::new(0, 0), Some(Claim::new(5, 0, Element::Wind)))
            .unwrap();
        let violations = ConquestInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (TerritoryTallyInvariant, SeatedOwnersInvariant);
        assert!(TwoInvariants::check_all(&game()).is_ok());
    }
}
