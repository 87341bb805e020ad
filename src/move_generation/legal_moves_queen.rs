use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;

/// Queen moves are the union of rook and bishop rays.
pub fn generate_queen_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    generate_rook_moves(game_state, from, out);
    generate_bishop_moves(game_state, from, out);
}
