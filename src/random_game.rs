use rand::prelude::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{debug, info};

use crate::chess_board::{ChessBoard, Color, Move, Piece, PieceType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The ply limit was reached.
    PlyLimit,
    /// The given side had nothing to play.
    NoMoves(Color),
    /// The given side lost its king.
    KingCaptured(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutReport {
    pub plies: usize,
    /// Side to move once the playout stopped.
    pub turn: Color,
    pub outcome: Outcome,
}

/// Plays uniformly random moves with a reproducible generator.
pub struct RandomGame {
    rng: Pcg64,
}

impl RandomGame {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Plays from `board` until `max_plies`, until the side to move has no move
    /// or until a king is taken. `on_move` sees every move right after it was played.
    pub fn play<F>(
        &mut self,
        board: &mut ChessBoard,
        mut turn: Color,
        max_plies: usize,
        mut on_move: F,
    ) -> PlayoutReport
    where
        F: FnMut(usize, Color, Move, &ChessBoard),
    {
        let mut plies = 0;
        let outcome = loop {
            if plies >= max_plies {
                break Outcome::PlyLimit;
            }
            let moves = board.legal_moves(turn);
            let Some(&mv) = moves.choose(&mut self.rng) else {
                break Outcome::NoMoves(turn);
            };
            let captured = board.piece_at(mv.to);
            board.make_move(mv);
            plies += 1;
            debug!(ply = plies, %turn, mv = %mv, captured = ?captured.map(|p| p.code()), "random move");
            on_move(plies, turn, mv, &*board);
            turn = turn.opposite();
            if let Some(Piece { color, kind: PieceType::King }) = captured {
                break Outcome::KingCaptured(color);
            }
        };
        info!(plies, ?outcome, "playout finished");
        PlayoutReport { plies, turn, outcome }
    }
}
