//! Canonical chess-rule constants.
//!
//! Stores static rule literals: the starting position, ray directions in the
//! order the pin/check scan relies on, and knight offsets.

use crate::game_state::chess_types::Direction;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Ray directions. Indices `0..4` are orthogonal, `4..8` diagonal.
pub const RAY_DIRECTIONS: [Direction; 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

pub const ORTHOGONAL_DIRECTIONS: [Direction; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Column the king starts on and castles from.
pub const KING_HOME_COL: u8 = 4;

/// Halfmove clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

#[inline]
pub const fn is_orthogonal(direction_index: usize) -> bool {
    direction_index < 4
}
