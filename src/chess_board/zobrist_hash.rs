use super::{ChessBoard, Color, PieceType, BOARD_SIZE};
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::sync::Arc;

/// Zobrist keys for piece placement and side to move.
pub struct ZobristHash {
    piece_keys: [[[u64; BOARD_SIZE * BOARD_SIZE]; 6]; 2],
    side_to_move_key: u64,
}

impl ZobristHash {
    fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);

        let mut piece_keys = [[[0; BOARD_SIZE * BOARD_SIZE]; 6]; 2];
        for color_keys in &mut piece_keys {
            for piece_type_keys in color_keys {
                for square_key in piece_type_keys {
                    *square_key = rng.gen();
                }
            }
        }

        ZobristHash {
            piece_keys,
            side_to_move_key: rng.gen(),
        }
    }

    pub fn calculate_hash(&self, board: &ChessBoard, turn: Color) -> u64 {
        let mut hash = 0;

        for (field, piece) in board.pieces_with_coordinates() {
            let color_index = match piece.color {
                Color::White => 0,
                Color::Black => 1,
            };
            let piece_index = match piece.kind {
                PieceType::Pawn => 0,
                PieceType::Knight => 1,
                PieceType::Bishop => 2,
                PieceType::Rook => 3,
                PieceType::Queen => 4,
                PieceType::King => 5,
            };
            let square_index = field.row as usize * BOARD_SIZE + field.col as usize;
            hash ^= self.piece_keys[color_index][piece_index][square_index];
        }

        if turn == Color::Black {
            hash ^= self.side_to_move_key;
        }

        hash
    }
}

lazy_static! {
    pub static ref ZOBRIST: Arc<ZobristHash> = Arc::new(ZobristHash::new(42));
}

impl ChessBoard {
    pub fn zobrist_key(&self, turn: Color) -> u64 {
        ZOBRIST.calculate_hash(self, turn)
    }

    /// True once the board lost a king, after which play cannot continue meaningfully.
    pub fn is_missing_king(&self) -> bool {
        self.count_kings(Color::White) == 0 || self.count_kings(Color::Black) == 0
    }
}
