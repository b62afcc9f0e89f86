//! Tests for army movement and elemental combat through the session.

use elemental_engine::rules::in_reach;
use elemental_engine::{
    BattleOutcome, Board, Claim, Coord, Element, GameSession, MoveError, Phase, PlayerSetup,
    SessionConfig,
};

fn session_with(size: usize, elements: [Element; 2], claims: &[(Coord, Claim)]) -> GameSession {
    let mut board = Board::new(size);
    for (coord, claim) in claims {
        board.set_territory(*coord, Some(*claim)).unwrap();
    }
    let config = SessionConfig::new(
        size,
        vec![PlayerSetup::human(elements[0]), PlayerSetup::human(elements[1])],
    );
    let mut game = GameSession::with_board(config, board).unwrap();
    game.set_phase(Phase::Army).unwrap();
    game
}

#[test]
fn test_stronger_attacker_captures() {
    let from = Coord::new(2, 2);
    let to = Coord::new(3, 2);
    let mut game = session_with(
        10,
        [Element::Earth, Element::Fire],
        &[(from, Claim::new(0, 5, Element::Earth)), (to, Claim::new(1, 3, Element::Fire))],
    );

    let outcome = game.move_army(0, from, to).unwrap();
    assert_eq!(*outcome.outcome(), BattleOutcome::Captured);
    assert_eq!(*outcome.attack_power(), 4);
    assert_eq!(*outcome.defend_power(), 3);

    let target = game.board().territory(to).unwrap();
    assert_eq!(target.owner(), Some(0));
    assert_eq!(target.army_count(), 1);
    assert_eq!(target.element(), Some(Element::Earth));
    assert_eq!(game.board().territory(from).unwrap().army_count(), 1);
    assert_eq!(*game.players()[0].territories(), 2);
    assert_eq!(*game.players()[1].territories(), 0);
}

#[test]
fn test_water_defence_holds_and_defender_keeps_army() {
    let from = Coord::new(0, 0);
    let to = Coord::new(0, 1);
    let mut game = session_with(
        5,
        [Element::Earth, Element::Water],
        &[(from, Claim::new(0, 4, Element::Earth)), (to, Claim::new(1, 3, Element::Water))],
    );
    // Attack 3 against defence 3 + 1.
    let outcome = game.move_army(0, from, to).unwrap();
    assert_eq!(*outcome.outcome(), BattleOutcome::Repelled);
    assert_eq!(*outcome.to_army(), 1);
    assert_eq!(game.board().territory(to).unwrap().owner(), Some(1));
    assert_eq!(game.board().territory(from).unwrap().army_count(), 1);
}

#[test]
fn test_wind_reach_from_two_two() {
    let origin = Coord::new(2, 2);
    for (x, y) in [(4, 2), (0, 2), (2, 4), (2, 0), (1, 1), (3, 3), (1, 3), (3, 1)] {
        assert!(in_reach(Element::Wind, origin, Coord::new(x, y)), "({x}, {y})");
    }
    for (x, y) in [(2, 5), (5, 2), (4, 4), (0, 0)] {
        assert!(!in_reach(Element::Wind, origin, Coord::new(x, y)), "({x}, {y})");
    }
}

#[test]
fn test_wind_attacks_two_steps_away() {
    let from = Coord::new(2, 2);
    let to = Coord::new(4, 2);
    let mut game = session_with(
        6,
        [Element::Wind, Element::Fire],
        &[(from, Claim::new(0, 3, Element::Wind))],
    );
    let outcome = game.move_army(0, from, to).unwrap();
    assert_eq!(*outcome.attack_power(), 3);
    assert_eq!(game.board().territory(to).unwrap().army_count(), 3);
}

#[test]
fn test_non_wind_cannot_reach_diagonal() {
    let from = Coord::new(2, 2);
    let to = Coord::new(3, 3);
    let mut game = session_with(
        6,
        [Element::Earth, Element::Fire],
        &[(from, Claim::new(0, 3, Element::Earth))],
    );
    let before = game.clone();
    assert_eq!(game.move_army(0, from, to), Err(MoveError::NotAdjacent { from, to }));
    assert_eq!(game, before);
}

#[test]
fn test_fire_spread_claims_empty_neighbours_only() {
    let from = Coord::new(1, 2);
    let to = Coord::new(2, 2);
    let mut game = session_with(
        6,
        [Element::Fire, Element::Water],
        &[
            (from, Claim::new(0, 6, Element::Fire)),
            (to, Claim::new(1, 1, Element::Water)),
            (Coord::new(2, 1), Claim::new(1, 2, Element::Water)),
        ],
    );
    let outcome = game.move_army(0, from, to).unwrap();
    assert_eq!(*outcome.outcome(), BattleOutcome::Captured);
    assert_eq!(outcome.spread(), &vec![Coord::new(2, 3), Coord::new(3, 2)]);
    for cell in outcome.spread() {
        let t = game.board().territory(*cell).unwrap();
        assert_eq!(t.owner(), Some(0));
        assert_eq!(t.element(), Some(Element::Fire));
        assert_eq!(t.army_count(), 1);
    }
    // No cascade from the spread cells.
    assert!(game.board().territory(Coord::new(4, 2)).unwrap().is_empty());
    assert_eq!(*game.players()[0].territories(), 4);
    assert_eq!(*game.players()[1].territories(), 1);
}

#[test]
fn test_repelled_fire_does_not_spread() {
    let from = Coord::new(1, 1);
    let to = Coord::new(2, 1);
    let mut game = session_with(
        5,
        [Element::Fire, Element::Earth],
        &[(from, Claim::new(0, 2, Element::Fire)), (to, Claim::new(1, 4, Element::Earth))],
    );
    let outcome = game.move_army(0, from, to).unwrap();
    assert_eq!(*outcome.outcome(), BattleOutcome::Repelled);
    assert!(outcome.spread().is_empty());
    assert_eq!(game.board().claimed_count(), 2);
}

#[test]
fn test_single_army_source_rejected() {
    let from = Coord::new(0, 0);
    let mut game = session_with(
        4,
        [Element::Fire, Element::Earth],
        &[(from, Claim::new(0, 1, Element::Fire))],
    );
    assert_eq!(
        game.move_army(0, from, Coord::new(1, 0)),
        Err(MoveError::InsufficientArmy { coord: from, army: 1 })
    );
}
