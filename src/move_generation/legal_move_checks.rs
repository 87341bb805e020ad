//! Pin, check, and attack detection.
//!
//! The pin/check scan walks the eight rays and the knight offsets outward
//! from a king square. It takes the king square as a parameter, so king move
//! generation can test hypothetical squares without relocating anything.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{is_orthogonal, KNIGHT_OFFSETS, RAY_DIRECTIONS};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// A pinned piece or a checking piece, with the direction from the king toward it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinOrCheck {
    pub square: Square,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinsAndChecks {
    pub in_check: bool,
    pub pins: Vec<PinOrCheck>,
    pub checks: Vec<PinOrCheck>,
}

impl GameState {
    /// Pins against and checks on the side to move's king.
    pub fn check_for_pins_and_checks(&self) -> PinsAndChecks {
        let side = self.side_to_move;
        scan_pins_and_checks(&self.board, self.king_square(side), side)
    }

    /// Whether the opponent of the side to move attacks `square`.
    pub fn square_under_attack(&self, square: Square) -> bool {
        is_square_attacked(&self.board, square, self.side_to_move.opposite())
    }

    /// Whether `color`'s king is attacked in the current placement.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        is_square_attacked(&self.board, self.king_square(color), color.opposite())
    }
}

/// Pin/check scan for `color` as if its king stood on `king_square`.
///
/// Own kings are skipped while walking rays, so a king that is being moved
/// never shields its own destination.
pub fn scan_pins_and_checks(board: &Board, king_square: Square, color: Color) -> PinsAndChecks {
    let enemy = color.opposite();
    let mut out = PinsAndChecks::default();

    for (direction_index, direction) in RAY_DIRECTIONS.iter().copied().enumerate() {
        let mut possible_pin: Option<PinOrCheck> = None;

        for distance in 1..8 {
            let Some(square) = king_square.step(direction, distance) else {
                break;
            };
            let Some(piece) = board.get(square) else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if possible_pin.is_none() {
                    possible_pin = Some(PinOrCheck { square, direction });
                    continue;
                }
                // Second own piece on the ray: nothing behind it matters.
                break;
            }

            if attacks_along_ray(piece, direction_index, direction, distance) {
                match possible_pin {
                    Some(pin) => out.pins.push(pin),
                    None => {
                        out.in_check = true;
                        out.checks.push(PinOrCheck { square, direction });
                    }
                }
            }
            break;
        }
    }

    for offset in KNIGHT_OFFSETS {
        let Some(square) = king_square.offset(offset.0, offset.1) else {
            continue;
        };
        if board.get(square) == Some(Piece::new(enemy, PieceKind::Knight)) {
            out.in_check = true;
            out.checks.push(PinOrCheck {
                square,
                direction: offset,
            });
        }
    }

    out
}

/// Whether an enemy `piece` found `distance` steps along ray `direction` attacks its origin.
fn attacks_along_ray(piece: Piece, direction_index: usize, direction: Direction, distance: i8) -> bool {
    match piece.kind {
        PieceKind::Queen => true,
        PieceKind::Rook => is_orthogonal(direction_index),
        PieceKind::Bishop => !is_orthogonal(direction_index),
        PieceKind::King => distance == 1,
        // The pawn must sit one diagonal step "behind" its own capture direction.
        PieceKind::Pawn => {
            distance == 1
                && !is_orthogonal(direction_index)
                && piece.color.pawn_forward() == -direction.0
        }
        PieceKind::Knight => false,
    }
}

/// Whether any `attacker` piece attacks `square`, ignoring pins.
///
/// Pawns attack their forward diagonals whether or not the target is occupied.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    for (direction_index, direction) in RAY_DIRECTIONS.iter().copied().enumerate() {
        for distance in 1..8 {
            let Some(target) = square.step(direction, distance) else {
                break;
            };
            let Some(piece) = board.get(target) else {
                continue;
            };
            if piece.color == attacker
                && attacks_along_ray(piece, direction_index, direction, distance)
            {
                return true;
            }
            break;
        }
    }

    KNIGHT_OFFSETS.iter().any(|offset| {
        square
            .offset(offset.0, offset.1)
            .and_then(|target| board.get(target))
            == Some(Piece::new(attacker, PieceKind::Knight))
    })
}
