//! Key events fed to the game engine

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Submit the pending guess
    Submit,
    /// Remove the last pending letter
    Delete,
    /// Type an uppercase ASCII letter
    Letter(u8),
}

/// Error for key names that map to no key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized key '{0}'")]
pub struct KeyError(String);

impl Key {
    /// Letter key for an ASCII letter, in either case
    #[must_use]
    pub const fn letter(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Self::Letter(c.to_ascii_uppercase() as u8))
        } else {
            None
        }
    }

    /// Label shown on the on-screen keyboard
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Submit => "ENTER".to_string(),
            Self::Delete => "DEL".to_string(),
            Self::Letter(letter) => char::from(letter).to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Key {
    type Err = KeyError;

    /// Parse a key name
    ///
    /// Accepts `ENTER`/`GO`/`SUBMIT`, `DEL`/`DELETE`/`BACKSPACE`, or a single
    /// ASCII letter, all case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase();
        match name.as_str() {
            "ENTER" | "GO" | "SUBMIT" => Ok(Self::Submit),
            "DEL" | "DELETE" | "BACKSPACE" => Ok(Self::Delete),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::letter(c).ok_or_else(|| KeyError(s.to_string())),
                    _ => Err(KeyError(s.to_string())),
                }
            }
        }
    }
}

/// On-screen QWERTY layout, top row first
///
/// `ENTER` opens the bottom row and `DEL` closes it.
#[must_use]
pub fn keyboard_layout() -> [Vec<Key>; 3] {
    let row = |letters: &str| -> Vec<Key> { letters.chars().filter_map(Key::letter).collect() };

    let mut bottom = vec![Key::Submit];
    bottom.extend(row("ZXCVBNM"));
    bottom.push(Key::Delete);

    [row("QWERTYUIOP"), row("ASDFGHJKL"), bottom]
}
