//! Full legal move generation pipeline.
//!
//! Refreshes pins and checks for the side to move, runs the per-piece
//! generators (each of which honors pins on its own square), and then
//! narrows the result according to the check situation:
//! - not in check: every generated move plus castling;
//! - single check: king moves, or moves that capture or block the checker;
//! - double check: king moves only.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::PinOrCheck;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castle_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::parse_long_algebraic;

/// Per-kind generator dispatch.
pub fn generate_moves(kind: PieceKind, from: Square, game_state: &GameState, out: &mut Vec<Move>) {
    match kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, from, out),
        PieceKind::Knight => generate_knight_moves(game_state, from, out),
        PieceKind::Bishop => generate_bishop_moves(game_state, from, out),
        PieceKind::Rook => generate_rook_moves(game_state, from, out),
        PieceKind::Queen => generate_queen_moves(game_state, from, out),
        PieceKind::King => generate_king_moves(game_state, from, out),
    }
}

impl GameState {
    /// Legal moves for the side to move.
    ///
    /// Also refreshes `in_check`, pins, and checks, and sets `checkmate` or
    /// `stalemate` when the result is empty.
    pub fn get_valid_moves(&mut self) -> Vec<Move> {
        let scan = self.check_for_pins_and_checks();
        self.check_state.in_check = scan.in_check;
        self.check_state.pins = scan.pins;
        self.check_state.checks = scan.checks;

        let king = self.king_square(self.side_to_move);
        let moves = match self.check_state.checks.as_slice() {
            [] => {
                let mut moves = self.get_all_possible_moves();
                generate_castle_moves(self, king, &mut moves);
                moves
            }
            [check] => {
                let blocking = blocking_squares(self, king, *check);
                let checker = check.square;
                let mut moves = self.get_all_possible_moves();
                moves.retain(|mv| {
                    mv.piece_moved().kind == PieceKind::King
                        || blocking.contains(&mv.end())
                        || mv.en_passant_capture_square() == Some(checker)
                });
                moves
            }
            _ => {
                let mut moves = Vec::with_capacity(8);
                generate_king_moves(self, king, &mut moves);
                moves
            }
        };

        self.check_state.checkmate = moves.is_empty() && self.check_state.in_check;
        self.check_state.stalemate = moves.is_empty() && !self.check_state.in_check;
        if moves.is_empty() {
            debug!(
                fen = %self.to_fen(),
                checkmate = self.check_state.checkmate,
                "no legal moves for side to move"
            );
        }

        moves
    }

    /// Moves for every piece of the side to move, honoring pins but not checks.
    ///
    /// Uses the pins from the most recent scan; `get_valid_moves` refreshes them first.
    pub fn get_all_possible_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (square, piece) in self.board.pieces() {
            if piece.color == self.side_to_move {
                generate_moves(piece.kind, square, self, &mut moves);
            }
        }
        moves
    }

    /// Resolve a square pair against the current legal moves.
    pub fn find_valid_move(&mut self, from: Square, to: Square) -> ChessResult<Move> {
        self.get_valid_moves()
            .into_iter()
            .find(|mv| mv.start() == from && mv.end() == to)
            .ok_or(ChessError::IllegalMove { from, to })
    }

    /// Apply the move from `from` to `to` if it is legal in the current position.
    pub fn try_make_move(&mut self, from: Square, to: Square) -> ChessResult<Move> {
        let mv = self.find_valid_move(from, to)?;
        tracing::trace!(notation = %mv, "applying validated move");
        self.make_move(mv);
        Ok(mv)
    }

    /// Same as [`GameState::try_make_move`] for coordinate text such as `e2e4`.
    pub fn try_make_long_algebraic(&mut self, text: &str) -> ChessResult<Move> {
        let (from, to) = parse_long_algebraic(text)?;
        self.try_make_move(from, to)
    }
}

/// Destinations that resolve a single check: the checker's square, plus the
/// squares between it and the king when the checker is a slider.
fn blocking_squares(game_state: &GameState, king: Square, check: PinOrCheck) -> Vec<Square> {
    let checker = game_state.board.get(check.square);
    if checker.is_some_and(|piece| piece.kind == PieceKind::Knight) {
        return vec![check.square];
    }

    let mut squares = Vec::with_capacity(7);
    for distance in 1..8 {
        let Some(square) = king.step(check.direction, distance) else {
            break;
        };
        squares.push(square);
        if square == check.square {
            break;
        }
    }
    squares
}
