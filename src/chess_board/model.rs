use std::fmt;
use std::str::FromStr;

use super::MoveError;

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Single-character turn tag, `w` or `b`.
    pub fn to_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// Row a pawn of this color starts on.
    pub fn pawn_start_row(&self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row delta of a single pawn step.
    pub fn forward(&self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "P"),
            PieceType::Knight => write!(f, "N"),
            PieceType::Bishop => write!(f, "B"),
            PieceType::Rook => write!(f, "R"),
            PieceType::Queen => write!(f, "Q"),
            PieceType::King => write!(f, "K"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct ChessField {
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Move {
    pub from: ChessField,
    pub to: ChessField,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType) -> Self {
        Self { color, kind }
    }

    /// Board letter: uppercase for white, lowercase for black.
    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Inverse of [`Piece::to_char`], the way FEN spells pieces.
    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceType::from_char(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self { color, kind })
    }

    /// Two-character code such as `wP` or `bK`.
    pub fn code(&self) -> String {
        format!("{}{}", self.color.to_char(), self.kind)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let color = Color::from_char(chars.next()?)?;
        let kind = chars.next().filter(|c| c.is_ascii_uppercase()).and_then(PieceType::from_char)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { color, kind })
    }
}

/// True iff both coordinates lie on the board.
pub fn in_bounds(row: isize, col: isize) -> bool {
    (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&col)
}

impl ChessField {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Parses `e2`-style notation. Rank 8 is row 0.
    pub fn from_algebraic(algebraic: &str) -> Result<Self, MoveError> {
        let invalid = || MoveError::InvalidSquare(algebraic.to_string());
        let mut chars = algebraic.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(invalid()),
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        let col = file as u8 - b'a';
        let row = 7 - (rank as u8 - b'1');
        Ok(Self { row, col })
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.row, self.col)
    }

    pub fn is_in_bounds(&self) -> bool {
        in_bounds(self.row as isize, self.col as isize)
    }

    /// Field shifted by `(dr, dc)`, or `None` when that leaves the board.
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        in_bounds(row, col).then(|| Self::new(row as u8, col as u8))
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

impl Move {
    pub fn new(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Self {
        Self {
            from: ChessField::new(from_row, from_col),
            to: ChessField::new(to_row, to_col),
        }
    }

    pub fn as_algebraic(&self) -> String {
        format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic())
    }

    /// Parses a four character token such as `e2e4`.
    pub fn from_algebraic(algebraic: &str) -> Result<Self, MoveError> {
        let chars: Vec<char> = algebraic.chars().collect();
        if chars.len() != 4 {
            return Err(MoveError::MalformedMove(algebraic.to_string()));
        }
        let from = ChessField::from_algebraic(&chars[0..2].iter().collect::<String>())?;
        let to = ChessField::from_algebraic(&chars[2..4].iter().collect::<String>())?;
        Ok(Self { from, to })
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_algebraic(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

/// Algebraic name of `(row, col)`. The caller must pass an on-board field.
pub fn to_algebraic_square(row: u8, col: u8) -> String {
    debug_assert!(in_bounds(row as isize, col as isize), "square ({row}, {col}) is off the board");
    let file = (b'a' + col) as char;
    let rank = (b'8' - row) as char;
    format!("{}{}", file, rank)
}
