//! Helpers shared by the per-piece generators.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

/// Pin axis (king toward piece) for the piece on `square`, if it is pinned.
#[inline]
pub fn pin_direction(game_state: &GameState, square: Square) -> Option<Direction> {
    game_state
        .check_state
        .pins
        .iter()
        .find(|pin| pin.square == square)
        .map(|pin| pin.direction)
}

/// A pinned piece may only travel along its pin axis, in either sense.
#[inline]
pub fn respects_pin(pin: Option<Direction>, direction: Direction) -> bool {
    match pin {
        None => true,
        Some(axis) => axis == direction || axis == (-direction.0, -direction.1),
    }
}

/// Rays for rooks, bishops, and queens, stopping at the first occupied square.
pub fn push_sliding_moves(
    game_state: &GameState,
    from: Square,
    directions: &[Direction],
    out: &mut Vec<Move>,
) {
    let Some(piece) = game_state.board.get(from) else {
        return;
    };
    let pin = pin_direction(game_state, from);

    for direction in directions.iter().copied() {
        if !respects_pin(pin, direction) {
            continue;
        }

        for distance in 1..8 {
            let Some(to) = from.step(direction, distance) else {
                break;
            };
            match game_state.board.get(to) {
                None => out.push(Move::new(from, to, piece, &game_state.board)),
                Some(other) => {
                    if other.color != piece.color {
                        out.push(Move::new(from, to, piece, &game_state.board));
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::respects_pin;

    #[test]
    fn pin_axis_allows_both_senses_only() {
        assert!(respects_pin(None, (1, 1)));
        assert!(respects_pin(Some((-1, 0)), (-1, 0)));
        assert!(respects_pin(Some((-1, 0)), (1, 0)));
        assert!(!respects_pin(Some((-1, 0)), (0, 1)));
        assert!(!respects_pin(Some((-1, -1)), (-1, 1)));
    }
}
