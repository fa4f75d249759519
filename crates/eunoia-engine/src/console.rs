//! Console commands.
//!
//! Each stdin line is one command. Lines starting with `/` control the
//! room; anything else is a chat message for the companion.
//!
//! | Line               | Effect                                  |
//! |--------------------|-----------------------------------------|
//! | `/key <name>`      | key press (`ArrowUp`, `w`, `Space`, ...) |
//! | `/up` `/down` ...  | shorthand for the arrow keys            |
//! | `/space`           | interact                                |
//! | `/goto <x> <y>`    | walk to a tile                          |
//! | `/stop`            | stop walking                            |
//! | `/do <action>`     | trigger an action (`sitting`, `happy`)  |
//! | `/look`            | log the character's state               |
//! | `/quit`            | exit                                    |

use eunoia_core::input::InputCommand;
use eunoia_types::{Action, Direction, Position};

const KEY_USAGE: &str = "/key <ArrowUp|ArrowDown|ArrowLeft|ArrowRight|w|a|s|d|Space>";

const DO_USAGE: &str = "/do <idle|sitting|sleeping|drinking|breathing|happy|...>";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// A key press.
    Input(InputCommand),
    /// Walk to a tile.
    Goto(Position),
    /// Stop walking.
    Stop,
    /// Trigger an action directly.
    Trigger(Action),
    /// Log the character's state.
    Look,
    /// Exit the engine.
    Quit,
    /// Send a chat message.
    Chat(String),
}

/// Why a console line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line was empty.
    #[error("empty line")]
    Empty,
    /// Unknown `/` command.
    #[error("unknown command: /{0}")]
    UnknownCommand(String),
    /// The command's arguments were missing or malformed.
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl ConsoleCommand {
    /// Parse one console line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Chat(line.to_owned()));
        };

        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        match (name, args.as_slice()) {
            ("key", [key]) => InputCommand::from_key(key)
                .map(Self::Input)
                .ok_or(ParseError::Usage(KEY_USAGE)),
            ("key", _) => Err(ParseError::Usage("/key <name>")),
            ("up", []) => Ok(Self::Input(InputCommand::Move(Direction::Up))),
            ("down", []) => Ok(Self::Input(InputCommand::Move(Direction::Down))),
            ("left", []) => Ok(Self::Input(InputCommand::Move(Direction::Left))),
            ("right", []) => Ok(Self::Input(InputCommand::Move(Direction::Right))),
            ("space", []) => Ok(Self::Input(InputCommand::Interact)),
            ("goto", [x, y]) => match (x.parse::<f64>(), y.parse::<f64>()) {
                (Ok(x), Ok(y)) => Ok(Self::Goto(Position::new(x, y))),
                _ => Err(ParseError::Usage("/goto <x> <y>")),
            },
            ("goto", _) => Err(ParseError::Usage("/goto <x> <y>")),
            ("stop", []) => Ok(Self::Stop),
            ("do", [action]) => parse_action(action)
                .map(Self::Trigger)
                .ok_or(ParseError::Usage(DO_USAGE)),
            ("look", []) => Ok(Self::Look),
            ("quit" | "exit", []) => Ok(Self::Quit),
            (other, _) => Err(ParseError::UnknownCommand(other.to_owned())),
        }
    }
}

fn parse_action(name: &str) -> Option<Action> {
    let name = name.to_ascii_lowercase();
    Action::ALL.into_iter().find(|a| a.name() == name)
}
