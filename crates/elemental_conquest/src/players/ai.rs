//! Heuristic AI seat.

use super::Player;
use anyhow::Result;
use elemental_engine::{Action, Difficulty, GameSession, HeuristicAi, SeededRandom};
use tracing::debug;

/// AI player backed by [`HeuristicAi`] with its own random stream.
pub struct AiPlayer {
    name: String,
    ai: HeuristicAi,
    rng: SeededRandom,
}

impl AiPlayer {
    /// Creates a new AI player.
    pub fn new(name: impl Into<String>, difficulty: Difficulty, rng: SeededRandom) -> Self {
        Self {
            name: name.into(),
            ai: HeuristicAi::new(difficulty),
            rng,
        }
    }
}

impl Player for AiPlayer {
    fn choose(&mut self, game: &GameSession) -> Result<Action> {
        let action = self.ai.choose_action(game, &mut self.rng);
        debug!(ai = %self.name, %action, "AI chose action");
        Ok(action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
