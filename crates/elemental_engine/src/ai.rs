//! Heuristic single-ply AI.
//!
//! Lines are scored by the squares they complete and sampled from the top
//! of the ranking according to difficulty. Army moves are scored by battle
//! odds and target weakness and picked greedily.

use crate::action::Action;
use crate::board::Board;
use crate::config::Difficulty;
use crate::position::{Coord, EdgeId};
use crate::rng::RandomSource;
use crate::rules::{attack_power, completions, defend_power, reach};
use crate::session::GameSession;
use crate::Player;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Base score of every candidate.
const BASE_SCORE: u32 = 1;
/// Line bonus per completed square.
const COMPLETION_BONUS: u32 = 10;
/// Army bonus when the attack beats the defence.
const VICTORY_BONUS: u32 = 5;
/// Targets defended below this get a weakness bonus.
const WEAKNESS_CEILING: u32 = 3;

/// An empty line and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct ScoredLine {
    /// Candidate line.
    edge: EdgeId,
    /// `1 + 10 × squares completed`.
    score: u32,
}

impl ScoredLine {
    /// True when drawing the line encloses at least one territory.
    pub fn completes_square(&self) -> bool {
        self.score > BASE_SCORE
    }
}

/// A candidate army move and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct ScoredArmyMove {
    /// Source territory.
    from: Coord,
    /// Target territory.
    to: Coord,
    /// Attack power of the move.
    attack: u32,
    /// Defence power of the target.
    defend: u32,
    /// Heuristic score.
    score: u32,
}

impl ScoredArmyMove {
    /// True when the move captures its target.
    pub fn wins(&self) -> bool {
        self.attack > self.defend
    }

    /// The move as an action.
    pub fn action(&self) -> Action {
        Action::MoveArmy {
            from: self.from,
            to: self.to,
        }
    }
}

/// Scored-candidate move picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, new)]
pub struct HeuristicAi {
    difficulty: Difficulty,
}

impl HeuristicAi {
    /// Difficulty in use.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Every empty line with its score, best first.
    ///
    /// Ties keep lattice order (horizontal lines first, row-major).
    #[instrument(skip(board))]
    pub fn rank_lines(board: &Board) -> Vec<ScoredLine> {
        let mut ranked: Vec<ScoredLine> = board
            .empty_edges()
            .map(|edge| {
                let squares = completions(board, edge).unwrap_or(0) as u32;
                ScoredLine::new(edge, BASE_SCORE + COMPLETION_BONUS * squares)
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Picks uniformly from the difficulty's share of `ranked`.
    fn sample(&self, ranked: &[ScoredLine], rng: &mut dyn RandomSource) -> Option<ScoredLine> {
        if ranked.is_empty() {
            return None;
        }
        let pool = self.difficulty.candidate_pool(ranked.len());
        let pick = ranked[rng.index(pool)];
        debug!(candidates = ranked.len(), pool, edge = %pick.edge, score = pick.score, "Line chosen");
        Some(pick)
    }

    /// Chooses a line to draw, or `None` when every line is drawn.
    #[instrument(skip(self, board, rng), fields(difficulty = %self.difficulty))]
    pub fn choose_line_move(&self, board: &Board, rng: &mut dyn RandomSource) -> Option<EdgeId> {
        self.sample(&Self::rank_lines(board), rng).map(|line| line.edge)
    }

    /// Chooses the highest-scoring army move for `player`.
    ///
    /// Sources are the player's territories with more than one army, in
    /// row-major order; targets are cells in the element's reach that the
    /// player does not own. Score is 1, plus 5 if the attack beats the
    /// defence, plus `max(0, 3 − defence)`. The first best move wins ties.
    #[instrument(skip(board, player), fields(player = player.id()))]
    pub fn choose_army_move(board: &Board, player: &Player) -> Option<ScoredArmyMove> {
        let id = *player.id();
        let element = *player.element();
        let mut best: Option<ScoredArmyMove> = None;

        for source in board.owned_by(id).filter(|t| t.army_count() > 1) {
            let from = source.coord();
            let attack = attack_power(source.army_count(), element);
            for to in reach(element, from, board.size()) {
                let Ok(target) = board.territory(to) else {
                    continue;
                };
                if target.is_owned_by(id) {
                    continue;
                }
                let defend = defend_power(target);
                let mut score = BASE_SCORE + WEAKNESS_CEILING.saturating_sub(defend);
                if attack > defend {
                    score += VICTORY_BONUS;
                }
                if best.is_none_or(|b| score > b.score) {
                    best = Some(ScoredArmyMove::new(from, to, attack, defend, score));
                }
            }
        }

        if let Some(mv) = &best {
            debug!(from = %mv.from, to = %mv.to, score = mv.score, "Army move chosen");
        }
        best
    }

    /// Chooses the current player's action.
    ///
    /// In order of preference: a line that completes a square, an army move
    /// that wins its battle, any line, the best army move, pass.
    #[instrument(skip(self, session, rng), fields(player = session.current_player()))]
    pub fn choose_action(&self, session: &GameSession, rng: &mut dyn RandomSource) -> Action {
        let board = session.board();
        let ranked = Self::rank_lines(board);
        let completing: Vec<ScoredLine> = ranked.iter().copied().filter(ScoredLine::completes_square).collect();
        if let Some(line) = self.sample(&completing, rng) {
            return Action::DrawLine(line.edge);
        }

        let army = session
            .player(session.current_player())
            .and_then(|player| Self::choose_army_move(board, player));
        if let Some(mv) = army.filter(ScoredArmyMove::wins) {
            return mv.action();
        }

        if let Some(line) = self.sample(&ranked, rng) {
            return Action::DrawLine(line.edge);
        }

        match army {
            Some(mv) => mv.action(),
            None => {
                debug!("No move available, passing");
                Action::Pass
            }
        }
    }
}
