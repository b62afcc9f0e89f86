//! Game session: the single owner of board and roster state.
//!
//! Every player-facing operation goes through a contract: preconditions are
//! checked before anything changes, and in debug builds the invariant set is
//! re-checked afterwards. Rejected operations leave the session untouched.

use crate::action::{
    Action, ActionOutcome, ArmyOutcome, LineOutcome, MoveError, Phase, PlayerMove, TurnReport,
};
use crate::board::Board;
use crate::config::SessionConfig;
use crate::contracts::{Contract, DrawLineContract, EndTurnContract, GameActive, MoveArmyContract, PlayersTurn, TurnOpen};
use crate::error::{ConfigError, ConfigErrorKind};
use crate::position::{Coord, EdgeId, Orientation};
use crate::rng::RandomSource;
use crate::rules::{self, roster_mut};
use crate::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Whether the session is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted.
    InProgress,
    /// A player reached the victory threshold; moves are rejected.
    Victory(PlayerId),
}

/// A running conquest match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) config: SessionConfig,
    pub(crate) board: Board,
    pub(crate) players: Vec<Player>,
    pub(crate) current: PlayerId,
    pub(crate) phase: Phase,
    pub(crate) status: GameStatus,
    pub(crate) committed: bool,
    pub(crate) turn_number: u32,
}

impl GameSession {
    /// Starts a session on an empty board.
    ///
    /// Player 0 moves first in the drawing phase; every player starts with
    /// no territories and the starting army pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    #[instrument(skip(config), fields(grid_size = config.grid_size, players = config.players.len()))]
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let board = Board::new(config.grid_size);
        Self::with_board(config, board)
    }

    /// Starts a session on a prepared board, e.g. a scenario or puzzle.
    ///
    /// Player territory counters are derived from the board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid, the board
    /// size differs from the configured grid size, a territory is owned by
    /// an unseated player, or a claimed territory has no armies.
    #[instrument(skip(config, board), fields(grid_size = config.grid_size))]
    pub fn with_board(config: SessionConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.size() != config.grid_size {
            return Err(ConfigError::new(ConfigErrorKind::BoardSize {
                expected: config.grid_size,
                actual: board.size(),
            }));
        }

        let mut players: Vec<Player> = config
            .players
            .iter()
            .enumerate()
            .map(|(id, seat)| Player::new(id, seat.element, seat.is_ai))
            .collect();

        for territory in board.territories() {
            if let Some(claim) = territory.claim() {
                if claim.army == 0 {
                    return Err(ConfigError::new(ConfigErrorKind::EmptyGarrison(territory.coord())));
                }
                match players.get_mut(claim.owner) {
                    Some(player) => player.gain_territories(1),
                    None => return Err(ConfigError::new(ConfigErrorKind::UnknownOwner(claim.owner))),
                }
            }
        }
        for (_, state) in board.edges() {
            if let Some(owner) = state.owner() {
                if owner >= players.len() {
                    return Err(ConfigError::new(ConfigErrorKind::UnknownOwner(owner)));
                }
            }
        }

        let mut session = Self {
            config,
            board,
            players,
            current: 0,
            phase: Phase::Drawing,
            status: GameStatus::InProgress,
            committed: false,
            turn_number: 0,
        };
        session.refresh_status();
        info!(grid_size = session.board.size(), players = session.players.len(), "Session started");
        Ok(session)
    }

    /// The configuration the session was started with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Roster in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player with the given id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Id of the player whose turn it is.
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once a winner is declared.
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Victory(_))
    }

    /// The declared winner, if any.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Victory(id) => Some(id),
            GameStatus::InProgress => None,
        }
    }

    /// Whether the current turn already has its move.
    pub fn has_committed(&self) -> bool {
        self.committed
    }

    /// Number of completed turns.
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Territories needed to win this session.
    pub fn win_threshold(&self) -> usize {
        rules::win_threshold(self.board.cell_count())
    }

    /// Switches to `phase`.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] after victory, [`MoveError::TurnAlreadyCommitted`]
    /// once the turn's move is made.
    #[instrument(skip(self))]
    pub fn set_phase(&mut self, phase: Phase) -> Result<(), MoveError> {
        GameActive::check(self)?;
        TurnOpen::check(self)?;
        if self.phase != phase {
            debug!(from = %self.phase, to = %phase, "Phase changed");
            self.phase = phase;
        }
        Ok(())
    }

    /// Switches to the other phase and returns it.
    ///
    /// # Errors
    ///
    /// See [`GameSession::set_phase`].
    pub fn toggle_phase(&mut self) -> Result<Phase, MoveError> {
        let next = self.phase.toggled();
        self.set_phase(next)?;
        Ok(next)
    }

    /// Draws a line for `player` and claims any territory it encloses.
    ///
    /// # Errors
    ///
    /// Rejected (state unchanged) if the game is over, it is not `player`'s
    /// turn, the turn's move is already made, the phase is not drawing, or
    /// the line is already drawn.
    #[instrument(skip(self))]
    pub fn draw_line(
        &mut self,
        player: PlayerId,
        orientation: Orientation,
        x: usize,
        y: usize,
    ) -> Result<LineOutcome, MoveError> {
        let edge = EdgeId::new(orientation, x, y);
        let mv = PlayerMove::new(player, Action::DrawLine(edge));
        if let Err(e) = DrawLineContract::pre(self, &mv) {
            warn!(error = %e, "Line rejected");
            return Err(e);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let claimed = {
            let mover = roster_mut(&mut self.players, player)?;
            rules::draw_line(&mut self.board, mover, edge)?
        };
        self.committed = true;
        self.refresh_status();

        #[cfg(debug_assertions)]
        DrawLineContract::post(&before, self)?;

        Ok(LineOutcome::new(edge, claimed))
    }

    /// Moves armies for `player` from `from` into `to`.
    ///
    /// # Errors
    ///
    /// Rejected (state unchanged) if the game is over, it is not `player`'s
    /// turn, the turn's move is already made, the phase is not army, `from`
    /// is not the player's, `from` holds a single army, or `to` is out of
    /// the player's reach.
    #[instrument(skip(self))]
    pub fn move_army(&mut self, player: PlayerId, from: Coord, to: Coord) -> Result<ArmyOutcome, MoveError> {
        let mv = PlayerMove::new(player, Action::MoveArmy { from, to });
        if let Err(e) = MoveArmyContract::pre(self, &mv) {
            warn!(error = %e, "Army move rejected");
            return Err(e);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let outcome = rules::move_army(&mut self.board, &mut self.players, player, from, to)?;
        self.committed = true;
        self.refresh_status();

        #[cfg(debug_assertions)]
        MoveArmyContract::post(&before, self)?;

        Ok(outcome)
    }

    /// Applies `action` for `player`, switching to the phase it needs first.
    ///
    /// `Pass` is accepted for the current player and changes nothing; the
    /// caller ends the turn.
    ///
    /// # Errors
    ///
    /// As for [`GameSession::draw_line`] and [`GameSession::move_army`],
    /// minus the phase check. On rejection the phase is restored.
    #[instrument(skip(self))]
    pub fn play(&mut self, player: PlayerId, action: Action) -> Result<ActionOutcome, MoveError> {
        GameActive::check(self)?;
        PlayersTurn::check(&PlayerMove::new(player, action), self)?;

        let Some(needed) = action.phase() else {
            debug!(player, "Player passed");
            return Ok(ActionOutcome::Passed);
        };

        let previous = self.phase;
        self.set_phase(needed)?;
        let result = match action {
            Action::DrawLine(edge) => self
                .draw_line(player, edge.orientation, edge.x, edge.y)
                .map(ActionOutcome::Line),
            Action::MoveArmy { from, to } => self.move_army(player, from, to).map(ActionOutcome::Army),
            Action::Pass => Ok(ActionOutcome::Passed),
        };
        if result.is_err() {
            self.phase = previous;
        }
        result
    }

    /// Ends the current turn and starts the next player's.
    ///
    /// Advances the current player, then applies army pool growth, earth
    /// regeneration and reinforcement for the new current player, then
    /// checks for a winner. Legal with or without a move this turn. The
    /// phase carries over.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] after victory.
    #[instrument(skip(self, rng), fields(turn = self.turn_number))]
    pub fn end_turn(&mut self, rng: &mut dyn RandomSource) -> Result<TurnReport, MoveError> {
        EndTurnContract::pre(self, &())?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.current = (self.current + 1) % self.players.len();
        self.committed = false;
        self.turn_number += 1;

        let report = rules::start_turn(&mut self.board, &mut self.players, self.current, rng)?;
        self.refresh_status();

        #[cfg(debug_assertions)]
        EndTurnContract::post(&before, self)?;

        info!(
            next_player = self.current,
            element = %report.element(),
            regenerated = report.regen_events().len(),
            reinforced = report.reinforce_delta(),
            "Turn started"
        );
        Ok(report)
    }

    /// The first player in turn order at or above the victory threshold.
    pub fn check_winner(&self) -> Option<PlayerId> {
        rules::check_winner(&self.players, self.board.cell_count())
    }

    /// Re-evaluates victory; once declared it is final.
    fn refresh_status(&mut self) {
        if self.is_over() {
            return;
        }
        if let Some(winner) = self.check_winner() {
            info!(winner, "Victory");
            self.status = GameStatus::Victory(winner);
        }
    }
}
