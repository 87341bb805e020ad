//! Crate root module declarations for the Plum chess engine core.
//!
//! This file exposes the engine subsystems (game state, move generation,
//! evaluation, search, engines, and utility helpers) so presentation shells,
//! benches, and tests can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod negamax;
    pub mod worker;
}

pub mod engines {
    pub mod engine_negamax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
}

pub use errors::{ChessError, ChessResult};
pub use game_state::chess_types::{CastlingRights, Color, Piece, PieceKind, Square};
pub use game_state::game_state::{GameState, GameStatus};
pub use moves::chess_move::Move;
pub use search::negamax::{find_best_move, find_random_move, SearchConfig};
pub use engines::engine_trait::{Engine, EngineOutput};
pub use search::worker::{spawn_search, SearchHandle};
