use std::collections::HashMap;

use crate::chess_board::{ChessBoard, Color};

/// Counts the leaves of the move tree `depth` plies deep.
///
/// Every generated move is followed, including king captures, since the
/// basic rules know nothing about check.
pub fn perft(board: &ChessBoard, turn: Color, depth: u8) -> u64 {
    let mut cache = HashMap::new();
    perft_cached(board, turn, depth, &mut cache)
}

/// Per-root-move leaf counts, sorted by move text.
pub fn divide(board: &ChessBoard, turn: Color, depth: u8) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut cache = HashMap::new();
    let mut result_moves: Vec<(String, u64)> = board
        .legal_moves(turn)
        .into_iter()
        .map(|mv| {
            let mut new_board = board.clone();
            new_board.make_move(mv);
            (mv.as_algebraic(), perft_cached(&new_board, turn.opposite(), depth - 1, &mut cache))
        })
        .collect();
    result_moves.sort();
    result_moves
}

fn perft_cached(board: &ChessBoard, turn: Color, depth: u8, cache: &mut HashMap<(u64, u8), u64>) -> u64 {
    if depth == 0 {
        return 1u64;
    }

    let moves = board.legal_moves(turn);
    if depth == 1 {
        return moves.len() as u64;
    }

    let key = (board.zobrist_key(turn), depth);
    if let Some(&count) = cache.get(&key) {
        return count;
    }

    let mut node_count = 0u64;
    for mv in moves {
        let mut new_board = board.clone();
        new_board.make_move(mv);
        node_count += perft_cached(&new_board, turn.opposite(), depth - 1, cache);
    }
    cache.insert(key, node_count);
    node_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::INITIAL_POSITION;

    #[test]
    fn test_perft() {
        let (board, turn) = ChessBoard::from_fen(INITIAL_POSITION).unwrap();
        assert_eq!(perft(&board, turn, 0), 1u64);
        assert_eq!(perft(&board, turn, 1), 20u64);
        assert_eq!(perft(&board, turn, 2), 400u64);
        assert_eq!(perft(&board, turn, 3), 8902u64);
    }

    #[test]
    fn test_perft_lone_kings() {
        let (board, turn) = ChessBoard::from_fen("8/8/8/8/8/8/8/K6k w").unwrap();
        assert_eq!(perft(&board, turn, 1), 3);
        assert_eq!(perft(&board, turn, 2), 9);
    }

    #[test]
    fn test_divide() {
        let board = ChessBoard::starting_position();
        let result = divide(&board, Color::White, 2);
        assert_eq!(result.len(), 20);
        assert!(result.iter().all(|(_, count)| *count == 20));
        assert_eq!(result[0].0, "a2a3");
        assert_eq!(result.iter().map(|(_, c)| c).sum::<u64>(), perft(&board, Color::White, 2));
        assert!(divide(&board, Color::White, 0).is_empty());
    }
}
