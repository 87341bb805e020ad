//! Long algebraic coordinate parsing (`e2e4`, `e7e8q`).
//!
//! Square names themselves are handled by `Square::from_algebraic` and the
//! `Display` impl on `Square`; this module splits move text into its squares.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Split coordinate move text into its start and end squares.
///
/// A trailing promotion letter is accepted only as `q`, since every promotion
/// produces a queen.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square)> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidSquare(text.to_owned()));
    }

    if let Some(promotion) = text.get(4..) {
        if !promotion.is_empty() && !promotion.eq_ignore_ascii_case("q") {
            return Err(ChessError::InvalidSquare(text.to_owned()));
        }
    }

    let from = Square::from_algebraic(&text[0..2])?;
    let to = Square::from_algebraic(&text[2..4])?;
    Ok((from, to))
}
