//! Tests for the heuristic AI.

use elemental_engine::{
    Action, Board, Claim, Coord, Difficulty, EdgeState, Element, GameSession, HeuristicAi,
    PlayerSetup, SeededRandom, SessionConfig,
};

fn board_with_open_squares() -> Board {
    let mut board = Board::new(10);
    for cell in [Coord::new(1, 1), Coord::new(5, 5), Coord::new(8, 2)] {
        let edges = Board::bounding_edges(cell);
        for edge in &edges[..3] {
            board.set_edge(*edge, EdgeState::Drawn(0)).unwrap();
        }
    }
    board
}

#[test]
fn test_hard_only_picks_top_ten_percent() {
    let board = board_with_open_squares();
    let ranked = HeuristicAi::rank_lines(&board);
    let pool = Difficulty::Hard.candidate_pool(ranked.len());
    let top: Vec<_> = ranked[..pool].iter().map(|line| *line.edge()).collect();

    let ai = HeuristicAi::new(Difficulty::Hard);
    for seed in 0..64 {
        let mut rng = SeededRandom::from_seed(seed);
        let edge = ai.choose_line_move(&board, &mut rng).unwrap();
        assert!(top.contains(&edge), "seed {seed} picked {edge}");
    }
}

#[test]
fn test_same_seed_same_choice() {
    let board = board_with_open_squares();
    let ai = HeuristicAi::new(Difficulty::Easy);
    let a = ai.choose_line_move(&board, &mut SeededRandom::from_seed(11));
    let b = ai.choose_line_move(&board, &mut SeededRandom::from_seed(11));
    assert_eq!(a, b);
}

#[test]
fn test_full_board_has_no_line() {
    let mut board = Board::new(2);
    let edges: Vec<_> = board.edge_ids().collect();
    for edge in edges {
        board.set_edge(edge, EdgeState::Drawn(1)).unwrap();
    }
    let ai = HeuristicAi::default();
    assert!(ai.choose_line_move(&board, &mut SeededRandom::from_seed(1)).is_none());
}

fn session(board: Board) -> GameSession {
    let config = SessionConfig::new(
        board.size(),
        vec![PlayerSetup::ai(Element::Earth), PlayerSetup::human(Element::Fire)],
    );
    GameSession::with_board(config, board).unwrap()
}

#[test]
fn test_action_prefers_completing_line() {
    let mut board = board_with_open_squares();
    board
        .set_territory(Coord::new(3, 3), Some(Claim::new(0, 6, Element::Earth)))
        .unwrap();
    let game = session(board);
    let ai = HeuristicAi::new(Difficulty::Easy);
    match ai.choose_action(&game, &mut SeededRandom::from_seed(3)) {
        Action::DrawLine(edge) => {
            assert!(elemental_engine::rules::completions(game.board(), edge).unwrap() > 0);
        }
        other => panic!("expected a completing line, got {other}"),
    }
}

#[test]
fn test_action_prefers_winning_attack_over_plain_line() {
    let mut board = Board::new(4);
    board
        .set_territory(Coord::new(0, 0), Some(Claim::new(0, 5, Element::Earth)))
        .unwrap();
    board
        .set_territory(Coord::new(1, 0), Some(Claim::new(1, 1, Element::Fire)))
        .unwrap();
    let game = session(board);
    let action = HeuristicAi::default().choose_action(&game, &mut SeededRandom::from_seed(3));
    assert!(matches!(action, Action::MoveArmy { from, .. } if from == Coord::new(0, 0)));
}

#[test]
fn test_action_passes_when_nothing_to_do() {
    let mut board = Board::new(1);
    let edges: Vec<_> = board.edge_ids().collect();
    for edge in edges {
        board.set_edge(edge, EdgeState::Drawn(1)).unwrap();
    }
    let game = session(board);
    assert_eq!(
        HeuristicAi::default().choose_action(&game, &mut SeededRandom::from_seed(0)),
        Action::Pass
    );
}
