use super::Square::Occupied;
use super::{ChessBoard, Color, FenError, Piece, Square};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses the placement and side-to-move fields of a FEN string.
///
/// The side to move defaults to white. Castling, en passant and clock fields
/// may be present but are not used by the basic rules.
pub fn from_fen(fen: &str) -> Result<(ChessBoard, Color), FenError> {
    let mut board = ChessBoard::new();
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 6 {
        return Err(FenError::FieldCount(parts.len()));
    }

    // Parse board squares
    let rows: Vec<&str> = parts[0].split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::RowCount(rows.len()));
    }

    for (row_index, row) in rows.iter().enumerate() {
        let mut col_index = 0;

        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                col_index += skip as usize;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece(c))?;
                if col_index > 7 {
                    return Err(FenError::RowWidth {
                        row: row_index,
                        files: col_index + 1,
                    });
                }
                // FEN lists rank 8 first, which is row 0 here.
                board.squares[row_index][col_index] = Square::Occupied(piece);
                col_index += 1;
            }
        }
        if col_index != 8 {
            return Err(FenError::RowWidth {
                row: row_index,
                files: col_index,
            });
        }
    }

    let active_color = match parts.get(1) {
        None => Color::White,
        Some(&"w") => Color::White,
        Some(&"b") => Color::Black,
        Some(other) => return Err(FenError::InvalidColor(other.to_string())),
    };

    Ok((board, active_color))
}

/// Writes the placement field followed by the side to move.
pub fn to_fen(board: &ChessBoard, turn: Color) -> String {
    let mut board_representation = String::new();

    for (row, squares) in board.squares.iter().enumerate() {
        let mut empty_count = 0;

        for square in squares {
            match square {
                Occupied(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                Square::Empty => empty_count += 1,
            }
        }
        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }
        if row < 7 {
            board_representation.push('/');
        }
    }

    format!("{} {}", board_representation, turn.to_char())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::{ChessField, PieceType};

    #[test]
    fn fen_initial_position() {
        let (board, turn) = from_fen(INITIAL_POSITION).expect("Failed to parse FEN");
        assert_eq!(turn, Color::White);
        assert_eq!(board, ChessBoard::starting_position());
    }

    #[test]
    fn fen_placement_only() {
        let (board, turn) = from_fen("8/8/8/8/8/8/8/4K3").expect("Failed to parse FEN");
        assert_eq!(turn, Color::White);
        assert_eq!(
            board.piece_at(ChessField::from_algebraic("e1").unwrap()),
            Some(Piece::new(Color::White, PieceType::King))
        );
    }

    #[test]
    fn fen_black_to_move() {
        let (_, turn) = from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(turn, Color::Black);
    }

    #[test]
    fn fen_invalid_fen_extra_columns() {
        let result = from_fen("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(result, Err(FenError::RowWidth { row: 0, files: 9 }));

        let result = from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert_eq!(result, Err(FenError::RowWidth { row: 2, files: 9 }));
    }

    #[test]
    fn fen_invalid_short_row() {
        let result = from_fen("rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert_eq!(result, Err(FenError::RowWidth { row: 0, files: 7 }));
    }

    #[test]
    fn fen_invalid_rows_and_fields() {
        assert_eq!(from_fen("8/8/8/8/8/8/8 w"), Err(FenError::RowCount(7)));
        assert_eq!(from_fen(""), Err(FenError::FieldCount(0)));
        assert_eq!(from_fen(&format!("{} extra", INITIAL_POSITION)), Err(FenError::FieldCount(7)));
        assert_eq!(from_fen("8/8/8/8/8/8/8/7x w"), Err(FenError::InvalidPiece('x')));
        assert_eq!(from_fen("8/8/8/8/8/8/8/8 white"), Err(FenError::InvalidColor("white".to_string())));
    }

    #[test]
    fn test_to_fen() {
        let board = ChessBoard::starting_position();
        assert_eq!(to_fen(&board, Color::White), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert_eq!(to_fen(&ChessBoard::new(), Color::Black), "8/8/8/8/8/8/8/8 b");

        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b";
        let (board, turn) = from_fen(fen).unwrap();
        assert_eq!(board.to_fen(turn), fen);
    }
}
