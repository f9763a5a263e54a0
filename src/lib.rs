//! Move legality checking for a basic game of chess.
//!
//! The board is a plain value owned by the caller, the side to move is passed
//! in explicitly and every rejected move leaves the board untouched. Check,
//! castling and en passant are outside the rules implemented here.

pub mod chess_board;
pub mod perft;
pub mod random_game;
pub mod terminal;

pub use chess_board::{apply_move, apply_move_reporting, ChessBoard, ChessField, Color, Locale, Move, MoveError};
