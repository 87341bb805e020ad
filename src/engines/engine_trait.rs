//! Engine abstraction layer used by shells and the search worker.
//!
//! Defines the common output payload so different move-selection strategies
//! can be chosen at runtime behind a single trait object.

use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Pick one of `valid_moves` for the side to move.
    ///
    /// Implementations may explore with make/undo but must leave
    /// `game_state` in its starting position.
    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        valid_moves: &[Move],
    ) -> ChessResult<EngineOutput>;
}
