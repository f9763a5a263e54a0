use std::fmt;

use tracing::debug;

use super::{fen, move_validation, ChessField, Color, FenError, Locale, Move, MoveError, Piece, PieceType, Square};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 8x8 grid of squares. Row 0 is rank 8, column 0 is file a.
///
/// The side to move is not stored here: callers keep the turn and pass it
/// to every operation that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChessBoard {
    pub squares: [[Square; 8]; 8],
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    /// Creates an empty chess board
    pub fn new() -> Self {
        Self {
            squares: [[Square::Empty; 8]; 8],
        }
    }

    /// Standard starting arrangement of the 32 pieces.
    pub fn starting_position() -> Self {
        let mut board = Self::new();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Square::Occupied(Piece::new(Color::Black, *kind));
            board.squares[1][col] = Square::Occupied(Piece::new(Color::Black, PieceType::Pawn));
            board.squares[6][col] = Square::Occupied(Piece::new(Color::White, PieceType::Pawn));
            board.squares[7][col] = Square::Occupied(Piece::new(Color::White, *kind));
        }
        board
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> Result<(Self, Color), FenError> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self, turn: Color) -> String {
        fen::to_fen(self, turn)
    }

    pub fn square(&self, field: ChessField) -> Square {
        self.squares[field.row as usize][field.col as usize]
    }

    pub fn piece_at(&self, field: ChessField) -> Option<Piece> {
        match self.square(field) {
            Square::Occupied(piece) => Some(piece),
            Square::Empty => None,
        }
    }

    pub fn set_square(&mut self, field: ChessField, square: Square) {
        self.squares[field.row as usize][field.col as usize] = square;
    }

    /// Returns an iterator over all pieces on the chessboard along with their coordinates.
    pub fn pieces_with_coordinates(&self) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, squares)| {
            squares.iter().enumerate().filter_map(move |(col, square)| match square {
                Square::Occupied(piece) => Some((ChessField::new(row as u8, col as u8), *piece)),
                Square::Empty => None,
            })
        })
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.pieces_with_coordinates()
            .filter(|(_, p)| p.color == color && p.kind == PieceType::King)
            .count()
    }

    /// Parses, validates and plays `algebraic` for `turn`, returning the side to move next.
    ///
    /// The board is only modified once every check has passed.
    pub fn apply_move(&mut self, algebraic: &str, turn: Color) -> Result<Color, MoveError> {
        let result = Move::from_algebraic(algebraic).and_then(|mv| self.apply_parsed_move(mv, turn));
        match &result {
            Ok(next) => debug!(mv = algebraic, %turn, %next, "move accepted"),
            Err(err) => debug!(mv = algebraic, %turn, %err, "move rejected"),
        }
        result
    }

    /// Same as [`ChessBoard::apply_move`] for an already parsed move.
    pub fn apply_parsed_move(&mut self, mv: Move, turn: Color) -> Result<Color, MoveError> {
        for field in [mv.from, mv.to] {
            if !field.is_in_bounds() {
                return Err(MoveError::OutOfBounds {
                    row: field.row,
                    col: field.col,
                });
            }
        }
        if !move_validation::is_legal(self, turn, mv.from, mv.to) {
            return Err(MoveError::IllegalMove { from: mv.from, to: mv.to });
        }
        self.make_move(mv);
        Ok(turn.opposite())
    }

    /// Relocates the piece without any validation. Captured pieces are dropped
    /// and a pawn arriving on its last rank becomes a queen.
    pub fn make_move(&mut self, mv: Move) {
        let square = self.square(mv.from);
        self.set_square(mv.from, Square::Empty);
        self.set_square(mv.to, square);

        if let Square::Occupied(piece) = square {
            if piece.kind == PieceType::Pawn && (mv.to.row == 0 || mv.to.row == 7) {
                self.set_square(mv.to, Square::Occupied(Piece::new(piece.color, PieceType::Queen)));
            }
        }
    }

    /// Plain text dump: rank number, pieces separated by spaces, file letters last.
    pub fn render_ascii(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(9);
        for (row, squares) in self.squares.iter().enumerate() {
            let mut line = vec![(8 - row).to_string()];
            line.extend(squares.iter().map(|square| match square {
                Square::Empty => ".".to_string(),
                Square::Occupied(piece) => piece.to_char().to_string(),
            }));
            rows.push(line.join(" "));
        }
        rows.push("  a b c d e f g h".to_string());
        rows.join("\n")
    }

    pub fn render_grid(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for (row, squares) in self.squares.iter().enumerate() {
            let rank = 8 - row;
            board_representation.push_str(&format!("{} │", rank));
            for square in squares {
                let c = match square {
                    Square::Empty => ' ',
                    Square::Occupied(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", c));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if row < 7 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}

impl fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_ascii())
    }
}

/// Free-function form of [`ChessBoard::apply_move`].
pub fn apply_move(board: &mut ChessBoard, algebraic: &str, turn: Color) -> Result<Color, MoveError> {
    board.apply_move(algebraic, turn)
}

/// Boolean-plus-message entry point for drivers that speak the `w`/`b` turn tags.
///
/// On success the message is the tag of the side to move next, otherwise the
/// localized reason. A turn tag that is neither `w` nor `b` owns no pieces.
pub fn apply_move_reporting(board: &mut ChessBoard, algebraic: &str, turn: char, locale: Locale) -> (bool, String) {
    let result = match Color::from_char(turn) {
        Some(color) => board.apply_move(algebraic, color),
        None => {
            let mv = Move::from_algebraic(algebraic);
            mv.and_then(|mv| Err::<Color, _>(MoveError::IllegalMove { from: mv.from, to: mv.to }))
        }
    };
    match result {
        Ok(next) => (true, next.to_char().to_string()),
        Err(err) => (false, err.localized(locale).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::fen::INITIAL_POSITION;

    fn field(s: &str) -> ChessField {
        ChessField::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let board = ChessBoard::starting_position();
        let back = "RNBQKBNR";
        for (col, c) in back.chars().enumerate() {
            let kind = PieceType::from_char(c).unwrap();
            assert_eq!(board.squares[0][col], Square::Occupied(Piece::new(Color::Black, kind)));
            assert_eq!(board.squares[7][col], Square::Occupied(Piece::new(Color::White, kind)));
            assert_eq!(board.squares[1][col], Square::Occupied(Piece::new(Color::Black, PieceType::Pawn)));
            assert_eq!(board.squares[6][col], Square::Occupied(Piece::new(Color::White, PieceType::Pawn)));
        }
        for row in 2..6 {
            assert!(board.squares[row].iter().all(|s| *s == Square::Empty));
        }
        assert_eq!(board.pieces_with_coordinates().count(), 32);
        assert_eq!(board.count_kings(Color::White), 1);
        assert_eq!(board.count_kings(Color::Black), 1);
        assert_eq!(board, ChessBoard::from_fen(INITIAL_POSITION).unwrap().0);
    }

    #[test]
    fn test_apply_move_e2e4() {
        let mut board = ChessBoard::starting_position();
        assert_eq!(board.apply_move("e2e4", Color::White), Ok(Color::Black));
        assert_eq!(board.squares[6][4], Square::Empty);
        assert_eq!(board.squares[4][4], Square::Occupied(Piece::new(Color::White, PieceType::Pawn)));
    }

    #[test]
    fn test_rejected_move_leaves_board_untouched() {
        let mut board = ChessBoard::starting_position();
        let before = board.clone();
        assert_eq!(
            board.apply_move("e2e5", Color::White),
            Err(MoveError::IllegalMove {
                from: field("e2"),
                to: field("e5")
            })
        );
        assert_eq!(board, before);

        assert_eq!(board.apply_move("e2e", Color::White), Err(MoveError::MalformedMove("e2e".to_string())));
        assert_eq!(board.apply_move("e2e4e", Color::White), Err(MoveError::MalformedMove("e2e4e".to_string())));
        assert_eq!(board.apply_move("", Color::White), Err(MoveError::MalformedMove("".to_string())));
        assert_eq!(board.apply_move("x2e4", Color::White), Err(MoveError::InvalidSquare("x2".to_string())));
        assert_eq!(board.apply_move("e2e0", Color::White), Err(MoveError::InvalidSquare("e0".to_string())));
        assert_eq!(
            board.apply_move("e7e5", Color::White).map_err(|e| e.localized(Locale::English)),
            Err("Move is not legal under the basic rules.")
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_bounds_parsed_move() {
        let mut board = ChessBoard::starting_position();
        let before = board.clone();
        let mv = Move::new(6, 4, 8, 4);
        assert_eq!(board.apply_parsed_move(mv, Color::White), Err(MoveError::OutOfBounds { row: 8, col: 4 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_replaces_target() {
        let (mut board, turn) = ChessBoard::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();
        assert_eq!(board.apply_move("e4d5", turn), Ok(Color::Black));
        assert_eq!(board.piece_at(field("d5")), Some(Piece::new(Color::White, PieceType::Pawn)));
        assert_eq!(board.piece_at(field("e4")), None);
        assert_eq!(board.pieces_with_coordinates().count(), 3);
    }

    #[test]
    fn test_promotion_to_queen() {
        let (mut board, _) = ChessBoard::from_fen("8/4P3/8/8/8/8/3p4/8 w").unwrap();
        assert_eq!(board.apply_move("e7e8", Color::White), Ok(Color::Black));
        assert_eq!(board.piece_at(field("e8")), Some(Piece::new(Color::White, PieceType::Queen)));

        assert_eq!(board.apply_move("d2d1", Color::Black), Ok(Color::White));
        assert_eq!(board.piece_at(field("d1")), Some(Piece::new(Color::Black, PieceType::Queen)));
    }

    #[test]
    fn test_promotion_by_capture() {
        let (mut board, _) = ChessBoard::from_fen("3r4/4P3/8/8/8/8/8/8 w").unwrap();
        assert_eq!(board.apply_move("e7d8", Color::White), Ok(Color::Black));
        assert_eq!(board.piece_at(field("d8")), Some(Piece::new(Color::White, PieceType::Queen)));
    }

    #[test]
    fn test_turn_is_enforced() {
        let mut board = ChessBoard::starting_position();
        assert!(board.apply_move("e7e5", Color::White).is_err());
        assert_eq!(board.apply_move("e7e5", Color::Black), Ok(Color::White));
    }

    #[test]
    fn test_apply_move_reporting() {
        let mut board = ChessBoard::starting_position();
        assert_eq!(apply_move_reporting(&mut board, "e2e4", 'w', Locale::English), (true, "b".to_string()));
        assert_eq!(
            apply_move_reporting(&mut board, "e7e", 'b', Locale::Vietnamese),
            (false, "Sai định dạng (ví dụ: e2e4).".to_string())
        );
        assert_eq!(
            apply_move_reporting(&mut board, "e7k5", 'b', Locale::Vietnamese),
            (false, "Ô cờ không hợp lệ.".to_string())
        );
        assert_eq!(
            apply_move_reporting(&mut board, "e7e5", 'x', Locale::English),
            (false, "Move is not legal under the basic rules.".to_string())
        );
        assert_eq!(apply_move(&mut board, "e7e5", Color::Black), Ok(Color::White));
    }

    #[test]
    fn test_render_ascii() {
        let board = ChessBoard::starting_position();
        let expected = "8 r n b q k b n r\n\
                        7 p p p p p p p p\n\
                        6 . . . . . . . .\n\
                        5 . . . . . . . .\n\
                        4 . . . . . . . .\n\
                        3 . . . . . . . .\n\
                        2 P P P P P P P P\n\
                        1 R N B Q K B N R\n  \
                        a b c d e f g h";
        assert_eq!(board.render_ascii(), expected);
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_render_grid() {
        let board = ChessBoard::starting_position();
        let grid = board.render_grid();
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 19);
        assert_eq!(lines[2], "8 │ r │ n │ b │ q │ k │ b │ n │ r │ 8");
        assert_eq!(lines[16], "1 │ R │ N │ B │ Q │ K │ B │ N │ R │ 1");
    }
}
