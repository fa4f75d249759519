//! Keyboard input mapping.

use eunoia_types::Direction;

/// A player command from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Step one tile.
    Move(Direction),
    /// Use the furniture at the current tile, or get up from it.
    Interact,
}

impl InputCommand {
    /// Map a key name to a command.
    ///
    /// Accepts the browser `KeyboardEvent.key` names for the arrow keys and
    /// space, plus WASD (case-insensitive). Other keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "ArrowUp" => Self::Move(Direction::Up),
            "ArrowDown" => Self::Move(Direction::Down),
            "ArrowLeft" => Self::Move(Direction::Left),
            "ArrowRight" => Self::Move(Direction::Right),
            " " | "Space" | "Spacebar" => Self::Interact,
            other => match other.to_ascii_lowercase().as_str() {
                "w" => Self::Move(Direction::Up),
                "s" => Self::Move(Direction::Down),
                "a" => Self::Move(Direction::Left),
                "d" => Self::Move(Direction::Right),
                _ => return None,
            },
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_map_to_moves() {
        assert_eq!(InputCommand::from_key("ArrowUp"), Some(InputCommand::Move(Direction::Up)));
        assert_eq!(InputCommand::from_key("W"), Some(InputCommand::Move(Direction::Up)));
        assert_eq!(InputCommand::from_key("d"), Some(InputCommand::Move(Direction::Right)));
        assert_eq!(InputCommand::from_key(" "), Some(InputCommand::Interact));
        assert_eq!(InputCommand::from_key("Enter"), None);
    }
}
