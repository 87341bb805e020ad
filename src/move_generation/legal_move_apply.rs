//! In-place move application and exact reversal.
//!
//! `make_move` trusts its input: callers pass moves produced by
//! `get_valid_moves`. Every derived field it touches is pushed onto a history
//! log so `undo_move` can restore the previous position bit for bit.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

impl GameState {
    pub fn make_move(&mut self, mv: Move) {
        let mover = mv.piece_moved();
        let color = mover.color;

        self.board.set(mv.start(), None);
        let placed = if mv.is_pawn_promotion() {
            Piece::new(color, PieceKind::Queen)
        } else {
            mover
        };
        self.board.set(mv.end(), Some(placed));

        if let Some(captured_square) = mv.en_passant_capture_square() {
            self.board.set(captured_square, None);
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            let rook = self.board.get(rook_from);
            self.board.set(rook_from, None);
            self.board.set(rook_to, rook);
        }

        if mover.kind == PieceKind::King {
            self.king_squares[color.index()] = mv.end();
        }

        self.en_passant_square = double_push_target(mv);

        let mut rights = self.castling_rights;
        if mover.kind == PieceKind::King {
            rights.revoke_all(color);
        }
        rights.revoke_for_corner(mv.start());
        if mv.is_capture() {
            rights.revoke_for_corner(mv.end());
        }
        self.castling_rights = rights;

        self.halfmove_clock = if mover.kind == PieceKind::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        self.side_to_move = color.opposite();

        self.move_log.push(mv);
        self.castle_rights_log.push(self.castling_rights);
        self.en_passant_log.push(self.en_passant_square);
        self.halfmove_log.push(self.halfmove_clock);
        self.position_history.push(self.position_key());
    }

    /// Take back the most recent move. Does nothing when no move has been made.
    pub fn undo_move(&mut self) {
        let Some(mv) = self.move_log.pop() else {
            return;
        };
        let mover = mv.piece_moved();

        self.board.set(mv.start(), Some(mover));
        match mv.en_passant_capture_square() {
            Some(captured_square) => {
                self.board.set(mv.end(), None);
                self.board.set(captured_square, mv.piece_captured());
            }
            None => self.board.set(mv.end(), mv.piece_captured()),
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            let rook = self.board.get(rook_to);
            self.board.set(rook_to, None);
            self.board.set(rook_from, rook);
        }

        if mover.kind == PieceKind::King {
            self.king_squares[mover.color.index()] = mv.start();
        }
        self.side_to_move = mover.color;

        self.castle_rights_log.pop();
        self.en_passant_log.pop();
        self.halfmove_log.pop();
        self.position_history.pop();

        if let Some(rights) = self.castle_rights_log.last() {
            self.castling_rights = *rights;
        }
        if let Some(en_passant) = self.en_passant_log.last() {
            self.en_passant_square = *en_passant;
        }
        if let Some(clock) = self.halfmove_log.last() {
            self.halfmove_clock = *clock;
        }

        self.check_state.checkmate = false;
        self.check_state.stalemate = false;
    }
}

/// Rook origin and destination for a castling move.
fn castle_rook_squares(mv: Move) -> (Square, Square) {
    let row = mv.end().row();
    let col = mv.end().col();
    if mv.is_king_side_castle() {
        (Square::at(row, col + 1), Square::at(row, col - 1))
    } else {
        (Square::at(row, col - 2), Square::at(row, col + 1))
    }
}

/// The square a pawn skipped over on a two-square push.
fn double_push_target(mv: Move) -> Option<Square> {
    let (start, end) = (mv.start(), mv.end());
    if mv.piece_moved().kind != PieceKind::Pawn || start.row().abs_diff(end.row()) != 2 {
        return None;
    }
    Some(Square::at((start.row() + end.row()) / 2, start.col()))
}
