//! King steps and castling.

use crate::game_state::chess_rules::{KING_HOME_COL, RAY_DIRECTIONS};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::scan_pins_and_checks;
use crate::moves::chess_move::Move;

/// King steps that do not land in check.
///
/// Each candidate square is tested with the pin/check scan run from that
/// square, which also forbids stepping next to the enemy king.
pub fn generate_king_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let board = &game_state.board;
    let Some(king) = board.get(from) else {
        return;
    };

    for (d_row, d_col) in RAY_DIRECTIONS {
        let Some(to) = from.offset(d_row, d_col) else {
            continue;
        };
        if board.get(to).is_some_and(|other| other.color == king.color) {
            continue;
        }
        if !scan_pins_and_checks(board, to, king.color).in_check {
            out.push(Move::new(from, to, king, board));
        }
    }
}

/// Castling moves for the side to move. Callers only ask when not in check.
pub fn generate_castle_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let board = &game_state.board;
    let Some(king) = board.get(from) else {
        return;
    };
    let color = king.color;
    if from != Square::at(color.back_row(), KING_HOME_COL) || game_state.square_under_attack(from) {
        return;
    }

    let rook = Some(Piece::new(color, PieceKind::Rook));
    let row = color.back_row();
    let empty = |col: u8| board.is_empty(Square::at(row, col));
    let safe = |col: u8| !game_state.square_under_attack(Square::at(row, col));

    if game_state.castling_rights.king_side(color)
        && board.get(Square::at(row, 7)) == rook
        && empty(5)
        && empty(6)
        && safe(5)
        && safe(6)
    {
        out.push(Move::castle(from, Square::at(row, 6), king));
    }

    if game_state.castling_rights.queen_side(color)
        && board.get(Square::at(row, 0)) == rook
        && empty(1)
        && empty(2)
        && empty(3)
        && safe(3)
        && safe(2)
    {
        out.push(Move::castle(from, Square::at(row, 2), king));
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::Square;
    use crate::game_state::game_state::GameState;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    fn castles(fen: &str) -> Vec<String> {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out: Vec<String> = game
            .get_valid_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .map(|mv| mv.chess_notation())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn both_castles_available_with_clear_paths() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), vec!["O-O", "O-O-O"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), vec!["O-O", "O-O-O"]);
    }

    #[test]
    fn castling_needs_the_right_and_an_empty_path() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1"), vec!["O-O"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1"), Vec::<String>::new());
    }

    #[test]
    fn castling_through_or_out_of_check_is_refused() {
        // f1 attacked by the rook on f8.
        assert_eq!(castles("1k3r2/8/8/8/8/8/8/R3K2R w KQ - 0 1"), vec!["O-O-O"]);
        // King in check from e8.
        assert_eq!(castles("1k2r3/8/8/8/8/8/8/R3K2R w KQ - 0 1"), Vec::<String>::new());
        // Only b1 attacked: queen side is still fine.
        assert_eq!(castles("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"), vec!["O-O", "O-O-O"]);
        // A pawn on g2 covers f1 even though the square is empty.
        assert_eq!(castles("4k3/8/8/8/8/8/6p1/R3K2R w KQ - 0 1"), vec!["O-O-O"]);
    }

    #[test]
    fn king_cannot_step_along_the_checking_file() {
        let mut game = GameState::from_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let targets: Vec<Square> = game.get_valid_moves().iter().map(|mv| mv.end()).collect();
        assert!(!targets.contains(&sq("e2")));
        assert!(targets.contains(&sq("d1")));
        assert!(targets.contains(&sq("f2")));
        assert_eq!(targets.len(), 4);
    }

    #[test]
    fn kings_never_stand_next_to_each_other() {
        let mut game = GameState::from_fen("8/8/8/3k4/8/3K4/8/8 w - - 0 1").expect("FEN should parse");
        let targets: Vec<Square> = game.get_valid_moves().iter().map(|mv| mv.end()).collect();
        for forbidden in ["c4", "d4", "e4"] {
            assert!(!targets.contains(&sq(forbidden)));
        }
        assert_eq!(targets.len(), 5);
    }
}
