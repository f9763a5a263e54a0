use super::{ChessBoard, ChessField, Color, PieceType, Square};

/// Basic per-piece movement legality for `turn` moving `from` -> `to`.
///
/// Whether the move leaves the mover's own king attacked is not considered.
/// Both fields must be on the board.
pub fn is_legal(board: &ChessBoard, turn: Color, from: ChessField, to: ChessField) -> bool {
    let piece = match board.square(from) {
        Square::Occupied(p) if p.color == turn => p,
        _ => return false,
    };
    let target = board.square(to);
    if let Square::Occupied(t) = target {
        if t.color == turn {
            return false;
        }
    }

    let dr = to.row as isize - from.row as isize;
    let dc = to.col as isize - from.col as isize;

    match piece.kind {
        PieceType::Pawn => is_legal_pawn_move(board, turn, from, dr, dc, target),
        PieceType::Knight => matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2)),
        PieceType::Bishop => dr.abs() == dc.abs() && path_clear(board, from, to),
        PieceType::Rook => (dr == 0 || dc == 0) && path_clear(board, from, to),
        PieceType::Queen => (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && path_clear(board, from, to),
        PieceType::King => dr.abs().max(dc.abs()) == 1,
    }
}

fn is_legal_pawn_move(
    board: &ChessBoard,
    color: Color,
    from: ChessField,
    dr: isize,
    dc: isize,
    target: Square,
) -> bool {
    let forward = color.forward();

    if dc == 0 {
        if target != Square::Empty {
            return false;
        }
        if dr == forward {
            return true;
        }
        // Double step needs the square in between to be free as well.
        return from.row as usize == color.pawn_start_row()
            && dr == 2 * forward
            && from
                .offset(forward, 0)
                .is_some_and(|between| board.square(between) == Square::Empty);
    }

    // Diagonal steps only capture; own pieces were rejected by the caller.
    dc.abs() == 1 && dr == forward && matches!(target, Square::Occupied(_))
}

/// True when every square strictly between `from` and `to` is empty.
///
/// Walks unit steps along the line; the destination itself is not inspected.
pub fn path_clear(board: &ChessBoard, from: ChessField, to: ChessField) -> bool {
    let step_r = (to.row as isize - from.row as isize).signum();
    let step_c = (to.col as isize - from.col as isize).signum();
    let mut row = from.row as isize + step_r;
    let mut col = from.col as isize + step_c;

    while (row, col) != (to.row as isize, to.col as isize) {
        if board.squares[row as usize][col as usize] != Square::Empty {
            return false;
        }
        row += step_r;
        col += step_c;
    }
    true
}
