//! Human player reading typed commands.

use super::Player;
use anyhow::Result;
use derive_more::{Display, Error};
use elemental_engine::{Action, Coord, EdgeId, GameSession, MoveError, Orientation};
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "Commands: line h|v X Y | army FX FY TX TY | pass";

/// Why a typed command was not understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// Blank line.
    #[display("Empty command")]
    Empty,
    /// First word is not a command.
    #[display("Unknown command: {}", _0)]
    #[error(ignore)]
    Unknown(String),
    /// Wrong number of arguments.
    #[display("{} expects {} arguments", command, expected)]
    Arity {
        /// Command name.
        command: &'static str,
        /// Arguments required.
        expected: usize,
    },
    /// Orientation other than `h` or `v`.
    #[display("Orientation must be h or v, got {}", _0)]
    #[error(ignore)]
    Orientation(String),
    /// Argument is not a non-negative integer.
    #[display("Not a coordinate: {}", _0)]
    #[error(ignore)]
    Number(String),
}

fn number(word: &str) -> Result<usize, CommandError> {
    word.parse().map_err(|_| CommandError::Number(word.to_string()))
}

/// Parses one command line into an action.
///
/// ```
/// use elemental_conquest::parse_command;
/// use elemental_engine::{Action, EdgeId};
///
/// assert_eq!(parse_command("line h 2 3"), Ok(Action::DrawLine(EdgeId::horizontal(2, 3))));
/// assert_eq!(parse_command("pass"), Ok(Action::Pass));
/// ```
pub fn parse_command(input: &str) -> Result<Action, CommandError> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some((command, args)) = words.split_first() else {
        return Err(CommandError::Empty);
    };

    match command.to_ascii_lowercase().as_str() {
        "line" | "l" => {
            let [orientation, x, y] = args else {
                return Err(CommandError::Arity {
                    command: "line",
                    expected: 3,
                });
            };
            let orientation = match orientation.to_ascii_lowercase().as_str() {
                "h" | "horizontal" => Orientation::Horizontal,
                "v" | "vertical" => Orientation::Vertical,
                other => return Err(CommandError::Orientation(other.to_string())),
            };
            Ok(Action::DrawLine(EdgeId::new(orientation, number(x)?, number(y)?)))
        }
        "army" | "a" => {
            let [fx, fy, tx, ty] = args else {
                return Err(CommandError::Arity {
                    command: "army",
                    expected: 4,
                });
            };
            Ok(Action::MoveArmy {
                from: Coord::new(number(fx)?, number(fy)?),
                to: Coord::new(number(tx)?, number(ty)?),
            })
        }
        "pass" | "p" => {
            if args.is_empty() {
                Ok(Action::Pass)
            } else {
                Err(CommandError::Arity {
                    command: "pass",
                    expected: 0,
                })
            }
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Human player reading commands from `input` and prompting on `output`.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Consumes the player, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, game: &GameSession) -> Result<()> {
        let id = game.current_player();
        let armies = game.player(id).map(|p| *p.armies()).unwrap_or(0);
        let territories = game.player(id).map(|p| *p.territories()).unwrap_or(0);
        write!(self.output, "\n{}", game.board().display())?;
        writeln!(
            self.output,
            "{} (player {}) | phase: {} | armies: {} | territories: {}/{}",
            self.name,
            id,
            game.phase(),
            armies,
            territories,
            game.win_threshold()
        )?;
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn choose(&mut self, game: &GameSession) -> Result<Action> {
        loop {
            self.prompt(game)?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                anyhow::bail!("Input closed");
            }
            match parse_command(&line) {
                Ok(action) => {
                    debug!(player = %self.name, %action, "Command parsed");
                    return Ok(action);
                }
                Err(e) => {
                    writeln!(self.output, "{}\n{}", e, HELP)?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }

    fn notify_rejected(&mut self, action: &Action, error: &MoveError) {
        // A closed terminal just loses the message.
        let _ = writeln!(self.output, "Cannot {}: {}", action, error);
    }
}
