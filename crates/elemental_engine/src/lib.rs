//! Elemental Engine - rules for elemental territory conquest
//!
//! Players draw border lines on a grid to enclose territories, then move
//! armies between them. Each player's element bends the rules: fire spreads
//! on capture, water fortifies, earth regenerates, wind reaches further.
//!
//! # Architecture
//!
//! - **Board**: territory grid plus horizontal and vertical line lattices
//! - **Rules**: line drawing, combat, start-of-turn growth, victory
//! - **Session**: turn and phase gating over contracts and invariants
//! - **AI**: scored-candidate move picker with difficulty sampling
//! - **Exploration**: single-hero variant on an elemental world
//!
//! # Example
//!
//! ```
//! use elemental_engine::{Element, GameSession, Orientation, PlayerSetup, SeededRandom, SessionConfig};
//!
//! let config = SessionConfig::new(
//!     8,
//!     vec![PlayerSetup::human(Element::Fire), PlayerSetup::ai(Element::Water)],
//! );
//! let mut game = GameSession::new(config)?;
//! game.draw_line(0, Orientation::Horizontal, 3, 3)?;
//! let report = game.end_turn(&mut SeededRandom::from_seed(7))?;
//! assert_eq!(*report.next_player(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod ai;
mod board;
mod config;
mod element;
mod error;
mod exploration;
mod player;
mod position;
mod rng;
mod session;

// Public rule modules
pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Domain types
pub use action::{
    Action, ActionOutcome, ArmyOutcome, BattleOutcome, LineOutcome, MoveError, Phase, PlayerMove,
    RegenEvent, TurnReport,
};
pub use board::{Board, Claim, EdgeState, Territory, TerritoryState};
pub use element::{
    BASE_REINFORCEMENT, EARTH_REGEN_CHANCE, Element, WATER_DEFENSE_BONUS, WATER_REINFORCEMENT,
    WIND_ATTACK_BONUS,
};
pub use player::{Player, PlayerId, STARTING_ARMIES};
pub use position::{Coord, EdgeId, Orientation};

// Crate-level exports - Configuration and errors
pub use config::{Difficulty, MAX_PLAYERS, MIN_PLAYERS, MapSize, PlayerSetup, SessionConfig};
pub use error::{BoundsError, ConfigError, ConfigErrorKind};

// Crate-level exports - Session, AI and randomness
pub use ai::{HeuristicAi, ScoredArmyMove, ScoredLine};
pub use rng::{FixedSequence, RandomSource, SeededRandom};
pub use session::{GameSession, GameStatus};

// Crate-level exports - Exploration variant
pub use exploration::{
    ABILITY_MANA_COST, Discovery, EXPERIENCE_PER_LEVEL, EXPLORATION_SIZE, ExploreError,
    GUARDIAN_CAPTURE_ARMY, GUARDIAN_EXPERIENCE, Guardian, HERO_START_ARMY, Hero, Item, Tile,
    TileKind, World,
};
