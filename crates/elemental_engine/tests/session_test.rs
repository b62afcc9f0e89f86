//! Whole-session properties under AI play.

use elemental_engine::invariants::{ConquestInvariants, InvariantSet};
use elemental_engine::{
    ActionOutcome, Difficulty, Element, GameSession, HeuristicAi, PlayerSetup, SeededRandom,
    SessionConfig,
};

fn ai_session(size: usize, elements: &[Element]) -> GameSession {
    let seats = elements.iter().map(|e| PlayerSetup::ai(*e)).collect();
    let config = SessionConfig::new(size, seats).with_difficulty(Difficulty::Hard);
    GameSession::new(config).unwrap()
}

#[test]
fn test_invariants_hold_through_ai_match() {
    let mut game = ai_session(5, &Element::SEATS);
    let ai = HeuristicAi::new(game.config().difficulty);
    let mut rng = SeededRandom::from_seed(2024);

    for _ in 0..400 {
        if game.is_over() {
            break;
        }
        let player = game.current_player();
        let action = ai.choose_action(&game, &mut rng);
        game.play(player, action).unwrap();

        let counted: u32 = game.players().iter().map(|p| *p.territories()).sum();
        assert_eq!(counted as usize, game.board().claimed_count());
        assert!(ConquestInvariants::check_all(&game).is_ok());

        if game.is_over() {
            break;
        }
        game.end_turn(&mut rng).unwrap();
        assert!(ConquestInvariants::check_all(&game).is_ok());
    }
}

#[test]
fn test_seeded_matches_are_reproducible() {
    let play = |seed: u64| {
        let mut game = ai_session(4, &[Element::Fire, Element::Earth]);
        let ai = HeuristicAi::new(Difficulty::Medium);
        let mut rng = SeededRandom::from_seed(seed);
        for _ in 0..60 {
            if game.is_over() {
                break;
            }
            let action = ai.choose_action(&game, &mut rng);
            game.play(game.current_player(), action).unwrap();
            if game.is_over() {
                break;
            }
            game.end_turn(&mut rng).unwrap();
        }
        game
    };
    assert_eq!(play(9), play(9));
}

#[test]
fn test_pass_commits_nothing() {
    let mut game = ai_session(3, &[Element::Water, Element::Wind]);
    let outcome = game.play(0, elemental_engine::Action::Pass).unwrap();
    assert_eq!(outcome, ActionOutcome::Passed);
    assert!(!game.has_committed());
    assert_eq!(game.board().edges().filter(|(_, s)| s.is_drawn()).count(), 0);
}
