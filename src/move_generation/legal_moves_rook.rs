use crate::game_state::chess_rules::ORTHOGONAL_DIRECTIONS;
use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::push_sliding_moves;
use crate::moves::chess_move::Move;

pub fn generate_rook_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    push_sliding_moves(game_state, from, &ORTHOGONAL_DIRECTIONS, out);
}
