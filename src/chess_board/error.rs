//! Error types for move parsing, move validation and FEN loading.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ChessField;

/// Reasons a move attempt is rejected. None of them touch the board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The move token is not exactly four characters long.
    #[error("malformed move '{0}': expected four characters such as e2e4")]
    MalformedMove(String),

    /// A file or rank character is outside `a-h` / `1-8`.
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    /// Coordinates fall outside the 8x8 grid.
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },

    /// Movement pattern, path blocking or own-piece capture check failed.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: ChessField, to: ChessField },
}

impl MoveError {
    /// User facing message in the requested language.
    pub fn localized(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, MoveError::MalformedMove(_)) => "Malformed move (example: e2e4).",
            (Locale::English, MoveError::InvalidSquare(_)) => "Invalid square.",
            (Locale::English, MoveError::OutOfBounds { .. }) => "Coordinates are off the board.",
            (Locale::English, MoveError::IllegalMove { .. }) => "Move is not legal under the basic rules.",
            (Locale::Vietnamese, MoveError::MalformedMove(_)) => "Sai định dạng (ví dụ: e2e4).",
            (Locale::Vietnamese, MoveError::InvalidSquare(_)) => "Ô cờ không hợp lệ.",
            (Locale::Vietnamese, MoveError::OutOfBounds { .. }) => "Tọa độ ngoài bàn cờ.",
            (Locale::Vietnamese, MoveError::IllegalMove { .. }) => "Nước đi không hợp lệ theo luật cơ bản.",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN string: expected 1 to 6 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid FEN string: expected 8 rows, found {0}")]
    RowCount(usize),

    #[error("invalid FEN string: row {row} describes {files} files")]
    RowWidth { row: usize, files: usize },

    #[error("invalid piece character in FEN string: {0}")]
    InvalidPiece(char),

    #[error("invalid FEN string: invalid active color '{0}'")]
    InvalidColor(String),
}

/// Language of the messages shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Vietnamese,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "vi" | "vietnamese" => Ok(Locale::Vietnamese),
            _ => Err(format!("unknown language '{}', expected 'en' or 'vi'", s)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en"),
            Locale::Vietnamese => write!(f, "vi"),
        }
    }
}
