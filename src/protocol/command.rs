// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command characters accepted on the debug terminal.

/// Reprint the main menu.
pub const CMD_MENU: u8 = b'm';
/// Advance to the next motor mode.
pub const CMD_MODE: u8 = b's';
pub const CMD_SPEED_UP: u8 = b'+';
pub const CMD_SPEED_DOWN: u8 = b'-';
/// Stop the motor and end the program.
pub const CMD_QUIT: u8 = b'q';

/// Decoded terminal command.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Menu,
    AdvanceMode,
    SpeedUp,
    SpeedDown,
    Quit,
}

impl Command {
    /// Decode a received byte, ignoring ASCII case. Unknown bytes give `None`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte.to_ascii_lowercase() {
            CMD_MENU => Some(Command::Menu),
            CMD_MODE => Some(Command::AdvanceMode),
            CMD_SPEED_UP => Some(Command::SpeedUp),
            CMD_SPEED_DOWN => Some(Command::SpeedDown),
            CMD_QUIT => Some(Command::Quit),
            _ => None,
        }
    }

    /// The lowercase character that selects this command.
    pub const fn as_byte(self) -> u8 {
        match self {
            Command::Menu => CMD_MENU,
            Command::AdvanceMode => CMD_MODE,
            Command::SpeedUp => CMD_SPEED_UP,
            Command::SpeedDown => CMD_SPEED_DOWN,
            Command::Quit => CMD_QUIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_characters_in_either_case() {
        assert_eq!(Command::from_byte(b's'), Some(Command::AdvanceMode));
        assert_eq!(Command::from_byte(b'S'), Some(Command::AdvanceMode));
        assert_eq!(Command::from_byte(b'M'), Some(Command::Menu));
        assert_eq!(Command::from_byte(b'+'), Some(Command::SpeedUp));
        assert_eq!(Command::from_byte(b'-'), Some(Command::SpeedDown));
        assert_eq!(Command::from_byte(b'Q'), Some(Command::Quit));
    }

    #[test]
    fn ignores_everything_else() {
        for byte in [b'x', b'0', b' ', b'\r', b'\n', 0, 0xFF] {
            assert_eq!(Command::from_byte(byte), None);
        }
    }

    #[test]
    fn as_byte_is_accepted_by_from_byte() {
        for cmd in [
            Command::Menu,
            Command::AdvanceMode,
            Command::SpeedUp,
            Command::SpeedDown,
            Command::Quit,
        ] {
            assert_eq!(Command::from_byte(cmd.as_byte()), Some(cmd));
        }
    }
}
