//! Perft node counting over make/undo.
//!
//! The generator's correctness oracle: counts leaf nodes of the legal move
//! tree to a fixed depth, optionally broken down by move category.

use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count of the legal move tree `depth` plies deep.
pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game_state.get_valid_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        game_state.make_move(mv);
        nodes += perft(game_state, depth - 1);
        game_state.undo_move();
    }
    nodes
}

/// Like [`perft`], with the leaf moves classified.
pub fn perft_counts(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in game_state.get_valid_moves() {
        game_state.make_move(mv);
        if depth == 1 {
            total.merge(classify_leaf(game_state, mv));
        } else {
            total.merge(perft_counts(game_state, depth - 1));
        }
        game_state.undo_move();
    }
    total
}

/// Counts for a single leaf move already applied to `game_state`.
fn classify_leaf(game_state: &mut GameState, mv: Move) -> PerftCounts {
    let gives_check = game_state.is_king_attacked(game_state.side_to_move());
    let checkmate = gives_check && game_state.get_valid_moves().is_empty();

    PerftCounts {
        nodes: 1,
        captures: u64::from(mv.is_capture()),
        en_passant: u64::from(mv.is_en_passant()),
        castles: u64::from(mv.is_castle()),
        promotions: u64::from(mv.is_pawn_promotion()),
        checks: u64::from(gives_check),
        checkmates: u64::from(checkmate),
    }
}
