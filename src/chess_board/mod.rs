//! Board model, coordinate conversion and the basic move rules.

pub mod error;
pub mod fen;
pub mod model;
pub mod move_validation;
pub mod zobrist_hash;

mod chess_board;
mod move_generation;
#[cfg(test)]
pub mod test_utils;

pub use chess_board::{apply_move, apply_move_reporting, ChessBoard};
pub use error::{FenError, Locale, MoveError};
pub use fen::INITIAL_POSITION;
pub use model::{in_bounds, to_algebraic_square, ChessField, Color, Move, Piece, PieceType, Square, BOARD_SIZE};
pub use move_validation::{is_legal, path_clear};
pub use zobrist_hash::{ZobristHash, ZOBRIST};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convertion_method() {
        assert_eq!(ChessField::from_algebraic("b2"), Ok(ChessField::new(6, 1)));
        assert_eq!(ChessField::from_algebraic("b2").map(|f| f.as_algebraic()), Ok("b2".to_string()));
        assert_eq!(Move::from_algebraic("e2e4").map(|m| m.as_algebraic()), Ok("e2e4".to_string()));
    }

    #[test]
    fn test_short_game() {
        let mut board = ChessBoard::starting_position();
        let mut turn = Color::White;
        for mv in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5c6", "d7c6"] {
            turn = apply_move(&mut board, mv, turn).unwrap();
        }
        assert_eq!(turn, Color::White);
        assert_eq!(board.to_fen(turn), "r1bqkbnr/1pp2ppp/p1p5/4p3/4P3/5N2/PPPP1PPP/RNBQK2R w");
        assert_eq!(board.pieces_with_coordinates().count(), 30);
    }

    #[test]
    fn test_king_can_be_captured() {
        // Without check detection the king is an ordinary target.
        let (mut board, turn) = ChessBoard::from_fen("4k3/8/8/8/8/8/8/4RK2 w").unwrap();
        assert_eq!(apply_move(&mut board, "e1e8", turn), Ok(Color::Black));
        assert!(board.is_missing_king());
    }
}
