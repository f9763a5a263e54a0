use super::move_validation::is_legal;
use super::{ChessBoard, ChessField, Color, Move};

impl ChessBoard {
    /// Every field the piece on `from` may move to, in row-major order.
    ///
    /// A destination is produced iff [`is_legal`] accepts it, so generation and
    /// validation never disagree.
    pub fn legal_destinations(&self, from: ChessField, turn: Color) -> Vec<ChessField> {
        if !matches!(self.piece_at(from), Some(p) if p.color == turn) {
            return Vec::new();
        }
        all_fields().filter(|&to| is_legal(self, turn, from, to)).collect()
    }

    /// All moves available to `turn` under the basic rules.
    pub fn legal_moves(&self, turn: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (from, piece) in self.pieces_with_coordinates() {
            if piece.color != turn {
                continue;
            }
            moves.extend(
                self.legal_destinations(from, turn)
                    .into_iter()
                    .map(|to| Move { from, to }),
            );
        }
        moves
    }

    pub fn is_legal(&self, turn: Color, from: ChessField, to: ChessField) -> bool {
        is_legal(self, turn, from, to)
    }
}

fn all_fields() -> impl Iterator<Item = ChessField> {
    (0..8u8).flat_map(|row| (0..8u8).map(move |col| ChessField::new(row, col)))
}
