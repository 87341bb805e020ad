use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::pin_direction;
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    // No knight jump stays on a pin axis.
    if pin_direction(game_state, from).is_some() {
        return;
    }
    let Some(knight) = game_state.board.get(from) else {
        return;
    };

    for (d_row, d_col) in KNIGHT_OFFSETS {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        match game_state.board.get(to) {
            Some(other) if other.color == knight.color => {}
            _ => out.push(Move::new(from, to, knight, &game_state.board)),
        }
    }
}
