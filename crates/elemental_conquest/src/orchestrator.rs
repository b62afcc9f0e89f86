//! Match orchestration between seated players.

use crate::players::Player;
use crate::stats::StatsStore;
use anyhow::Result;
use derive_getters::Getters;
use elemental_engine::{
    Action, ActionOutcome, Element, GameSession, MoveError, PlayerId, SeededRandom, TurnReport,
};
use serde::{Deserialize, Serialize};
use std::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from the runner to an observer.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    /// A seat's action was accepted.
    ActionApplied {
        /// Acting seat.
        player: PlayerId,
        /// What happened.
        outcome: ActionOutcome,
    },
    /// A seat's action was refused.
    ActionRejected {
        /// Acting seat.
        player: PlayerId,
        /// The refused action.
        action: Action,
        /// Why.
        error: MoveError,
    },
    /// A new turn started.
    TurnEnded(TurnReport),
    /// A seat reached the victory threshold.
    Victory {
        /// Winning seat.
        winner: PlayerId,
        /// Its element.
        element: Element,
    },
    /// The turn limit ran out with no winner.
    Stalemate {
        /// Turns played.
        turns: u32,
    },
}

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Winning seat, if any.
    winner: Option<PlayerId>,
    /// Element of the winning seat.
    winner_element: Option<Element>,
    /// Turns played.
    turns: u32,
    /// Territories owned per seat at the end.
    territories: Vec<u32>,
}

/// Runs one session to victory or the turn limit.
pub struct MatchRunner {
    game: GameSession,
    seats: Vec<Box<dyn Player>>,
    rng: SeededRandom,
    turn_limit: u32,
    events: Option<mpsc::Sender<MatchEvent>>,
    stats: Option<Box<dyn StatsStore>>,
}

impl MatchRunner {
    /// Creates a runner with one player per session seat, in seat order.
    ///
    /// # Errors
    ///
    /// Fails when the number of players differs from the session's seats.
    pub fn new(
        game: GameSession,
        seats: Vec<Box<dyn Player>>,
        rng: SeededRandom,
        turn_limit: u32,
    ) -> Result<Self> {
        if seats.len() != game.players().len() {
            anyhow::bail!(
                "Session has {} seats but {} players were given",
                game.players().len(),
                seats.len()
            );
        }
        Ok(Self {
            game,
            seats,
            rng,
            turn_limit,
            events: None,
            stats: None,
        })
    }

    /// Sends match events to `tx`.
    pub fn with_events(mut self, tx: mpsc::Sender<MatchEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Records the result of every human seat in `store` when the match is won.
    pub fn with_stats(mut self, store: Box<dyn StatsStore>) -> Self {
        self.stats = Some(store);
        self
    }

    /// The session being played.
    pub fn game(&self) -> &GameSession {
        &self.game
    }

    /// The stats store, if one is attached.
    pub fn stats_store(&self) -> Option<&dyn StatsStore> {
        self.stats.as_deref()
    }

    fn emit(events: &Option<mpsc::Sender<MatchEvent>>, event: MatchEvent) {
        if let Some(tx) = events {
            if tx.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }

    /// Runs the game loop.
    ///
    /// Each turn the current seat chooses until the session accepts, then
    /// the turn ends. A rejected human command is reported back and asked
    /// again; a rejected AI action or a broken invariant aborts the match.
    ///
    /// # Errors
    ///
    /// Fails on player input errors, AI rejections, fatal session errors,
    /// or a stats store failure.
    #[instrument(skip(self), fields(seats = self.seats.len(), turn_limit = self.turn_limit))]
    pub fn run(&mut self) -> Result<MatchSummary> {
        info!("Starting match");

        loop {
            if let Some(winner) = self.game.winner() {
                return self.finish(Some(winner));
            }
            if self.game.turn_number() >= self.turn_limit {
                warn!(turns = self.game.turn_number(), "Turn limit reached");
                Self::emit(
                    &self.events,
                    MatchEvent::Stalemate {
                        turns: self.game.turn_number(),
                    },
                );
                return self.finish(None);
            }

            self.take_turn()?;

            if !self.game.is_over() {
                let report = self.game.end_turn(&mut self.rng)?;
                Self::emit(&self.events, MatchEvent::TurnEnded(report));
            }
        }
    }

    fn take_turn(&mut self) -> Result<()> {
        let seat = self.game.current_player();
        let Some(player) = self.seats.get_mut(seat) else {
            anyhow::bail!("No player for seat {}", seat);
        };

        loop {
            debug!(player = %player.name(), seat, "Waiting for action");
            let action = player.choose(&self.game)?;
            match self.game.play(seat, action) {
                Ok(outcome) => {
                    Self::emit(&self.events, MatchEvent::ActionApplied { player: seat, outcome });
                    return Ok(());
                }
                Err(error) => {
                    debug!(seat, %action, %error, "Action rejected");
                    Self::emit(
                        &self.events,
                        MatchEvent::ActionRejected {
                            player: seat,
                            action,
                            error: error.clone(),
                        },
                    );
                    // Typed coordinates may fall off the board; only a broken
                    // invariant ends a human's match.
                    let abort = if player.is_human() {
                        matches!(error, MoveError::InvariantViolation(_))
                    } else {
                        true
                    };
                    if abort {
                        anyhow::bail!("{} played {}: {}", player.name(), action, error);
                    }
                    player.notify_rejected(&action, &error);
                }
            }
        }
    }

    fn finish(&mut self, winner: Option<PlayerId>) -> Result<MatchSummary> {
        let winner_element = winner.and_then(|id| self.game.player(id)).map(|p| *p.element());
        if let (Some(winner), Some(element)) = (winner, winner_element) {
            info!(winner, %element, turns = self.game.turn_number(), "Match won");
            Self::emit(&self.events, MatchEvent::Victory { winner, element });
            self.record(winner)?;
        }

        Ok(MatchSummary {
            winner,
            winner_element,
            turns: self.game.turn_number(),
            territories: self.game.players().iter().map(|p| *p.territories()).collect(),
        })
    }

    fn record(&mut self, winner: PlayerId) -> Result<()> {
        let Some(store) = self.stats.as_mut() else {
            return Ok(());
        };
        for (seat, player) in self.seats.iter().enumerate() {
            if !player.is_human() {
                continue;
            }
            let Some(element) = self.game.player(seat).map(|p| *p.element()) else {
                continue;
            };
            store.record_result(element, seat == winner)?;
        }
        Ok(())
    }
}
