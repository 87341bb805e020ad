//! Errors used throughout the engine core.
//!
//! `ChessError` is the single error type returned by parsing helpers,
//! validated move application, and search entry points. Contract violations
//! that cannot be expressed by construction (for example searching an empty
//! move list) are reported here as well instead of panicking.

use thiserror::Error;

use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A FEN string failed to parse or described an impossible position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// An algebraic square or long-algebraic move failed to parse.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// A two-character board tag (for example `"wp"` or `"--"`) was not recognized.
    #[error("invalid board tag: {0}")]
    InvalidBoardTag(String),

    /// The requested move is not a member of the current legal move set.
    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// A search was requested for a position with no legal moves.
    #[error("no legal moves available to search")]
    NoLegalMoves,

    /// The background search thread exited without reporting a move.
    #[error("search worker disconnected before reporting a move")]
    SearchWorkerDisconnected,
}

pub type ChessResult<T> = Result<T, ChessError>;
