//! Static evaluation used at search leaves.
//!
//! Scores are integer centipawns from light's point of view: material plus a
//! per-kind placement bonus. Tables are written from light's side (row 0 is
//! rank 8) and mirrored vertically for dark. Kings carry neither material nor
//! a placement bonus.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub const CHECKMATE_SCORE: i32 = 100_000;
pub const STALEMATE_SCORE: i32 = 0;

pub trait BoardScorer: Send + Sync {
    /// Score from light's perspective; positive favors light.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Material plus placement tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        score_board(game_state)
    }
}

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

type PlacementTable = [[i32; 8]; 8];

const KNIGHT_TABLE: PlacementTable = [
    [0, 10, 20, 20, 20, 20, 10, 0],
    [10, 30, 50, 50, 50, 50, 30, 10],
    [20, 50, 60, 65, 65, 60, 50, 20],
    [20, 55, 65, 70, 70, 65, 55, 20],
    [20, 50, 65, 70, 70, 65, 50, 20],
    [20, 55, 60, 65, 65, 60, 55, 20],
    [10, 30, 50, 55, 55, 50, 30, 10],
    [0, 10, 20, 20, 20, 20, 10, 0],
];

const BISHOP_TABLE: PlacementTable = [
    [0, 20, 20, 20, 20, 20, 20, 0],
    [20, 40, 40, 40, 40, 40, 40, 20],
    [20, 40, 50, 60, 60, 50, 40, 20],
    [20, 50, 50, 60, 60, 50, 50, 20],
    [20, 40, 60, 60, 60, 60, 40, 20],
    [20, 60, 60, 60, 60, 60, 60, 20],
    [20, 50, 40, 40, 40, 40, 50, 20],
    [0, 20, 20, 20, 20, 20, 20, 0],
];

const ROOK_TABLE: PlacementTable = [
    [25, 25, 25, 25, 25, 25, 25, 25],
    [50, 75, 75, 75, 75, 75, 75, 50],
    [0, 25, 25, 25, 25, 25, 25, 0],
    [0, 25, 25, 25, 25, 25, 25, 0],
    [0, 25, 25, 25, 25, 25, 25, 0],
    [0, 25, 25, 25, 25, 25, 25, 0],
    [0, 25, 25, 25, 25, 25, 25, 0],
    [25, 25, 25, 50, 50, 25, 25, 25],
];

const QUEEN_TABLE: PlacementTable = [
    [0, 20, 20, 30, 30, 20, 20, 0],
    [20, 40, 40, 40, 40, 40, 40, 20],
    [20, 40, 50, 50, 50, 50, 40, 20],
    [30, 40, 50, 50, 50, 50, 40, 30],
    [40, 40, 50, 50, 50, 50, 40, 30],
    [20, 50, 50, 50, 50, 50, 40, 20],
    [20, 40, 50, 40, 40, 40, 40, 20],
    [0, 20, 20, 30, 30, 20, 20, 0],
];

const PAWN_TABLE: PlacementTable = [
    [80, 80, 80, 80, 80, 80, 80, 80],
    [70, 70, 70, 70, 70, 70, 70, 70],
    [30, 30, 40, 50, 50, 40, 30, 30],
    [25, 25, 30, 45, 45, 30, 25, 25],
    [20, 20, 20, 40, 40, 20, 20, 20],
    [25, 15, 10, 20, 20, 10, 15, 25],
    [25, 30, 30, 0, 0, 30, 30, 25],
    [20, 20, 20, 20, 20, 20, 20, 20],
];

/// Placement bonus for `piece` standing on `square`.
pub fn placement_bonus(piece: Piece, square: Square) -> i32 {
    let table = match piece.kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => return 0,
    };
    let row = match piece.color {
        Color::Light => square.row(),
        Color::Dark => 7 - square.row(),
    };
    table[row as usize][square.col() as usize]
}

/// Light-positive evaluation of the current position.
///
/// Terminal flags come from the most recent `get_valid_moves` call: mate is
/// worth `±CHECKMATE_SCORE` and stalemate `STALEMATE_SCORE`.
pub fn score_board(game_state: &GameState) -> i32 {
    if game_state.checkmate() {
        return match game_state.side_to_move() {
            Color::Light => -CHECKMATE_SCORE,
            Color::Dark => CHECKMATE_SCORE,
        };
    }
    if game_state.stalemate() {
        return STALEMATE_SCORE;
    }

    game_state
        .board()
        .pieces()
        .map(|(square, piece)| {
            let value = piece_value(piece.kind) + placement_bonus(piece, square);
            match piece.color {
                Color::Light => value,
                Color::Dark => -value,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{placement_bonus, score_board, BoardScorer, PositionalScorer, CHECKMATE_SCORE};
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
    use crate::game_state::game_state::GameState;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(score_board(&GameState::new_game()), 0);
    }

    #[test]
    fn dark_tables_mirror_light_tables() {
        let light = Piece::new(Color::Light, PieceKind::Knight);
        let dark = Piece::new(Color::Dark, PieceKind::Knight);
        assert_eq!(placement_bonus(light, sq("d4")), placement_bonus(dark, sq("d5")));
        assert_eq!(placement_bonus(light, sq("a1")), 0);

        let light_pawn = Piece::new(Color::Light, PieceKind::Pawn);
        let dark_pawn = Piece::new(Color::Dark, PieceKind::Pawn);
        assert_eq!(placement_bonus(light_pawn, sq("d2")), 0);
        assert_eq!(placement_bonus(dark_pawn, sq("d7")), 0);
        assert_eq!(placement_bonus(light_pawn, sq("a7")), 70);
    }

    #[test]
    fn extra_queen_scores_for_its_owner() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        assert_eq!(score_board(&game), 900 + 30);
        assert_eq!(PositionalScorer.score(&game), score_board(&game));

        let game = GameState::from_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(score_board(&game), -(900 + 30));
    }

    #[test]
    fn terminal_flags_override_material() {
        let mut game = GameState::new_game();
        for lan in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.try_make_long_algebraic(lan).expect("fool's mate move should be legal");
        }
        assert!(game.get_valid_moves().is_empty());
        assert_eq!(score_board(&game), -CHECKMATE_SCORE);

        let mut stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        stalemate.get_valid_moves();
        assert_eq!(score_board(&stalemate), 0);
    }
}
