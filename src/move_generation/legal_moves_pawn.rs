//! Pawn move generation: pushes, double pushes, captures, en passant.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{pin_direction, respects_pin};
use crate::moves::chess_move::Move;

pub fn generate_pawn_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let Some(pawn) = game_state.board.get(from) else {
        return;
    };
    let board = &game_state.board;
    let pin = pin_direction(game_state, from);
    let forward = pawn.color.pawn_forward();

    if respects_pin(pin, (forward, 0)) {
        if let Some(one) = from.offset(forward, 0).filter(|sq| board.is_empty(*sq)) {
            out.push(Move::new(from, one, pawn, board));

            if from.row() == pawn.color.pawn_start_row() {
                if let Some(two) = from.offset(2 * forward, 0).filter(|sq| board.is_empty(*sq)) {
                    out.push(Move::new(from, two, pawn, board));
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if !respects_pin(pin, (forward, d_col)) {
            continue;
        }
        let Some(to) = from.offset(forward, d_col) else {
            continue;
        };

        match board.get(to) {
            Some(target) if target.color != pawn.color => {
                out.push(Move::new(from, to, pawn, board));
            }
            Some(_) => {}
            None if game_state.en_passant_square == Some(to) => {
                let king = game_state.king_square(pawn.color);
                if !en_passant_exposes_king(board, king, pawn.color, from, to.col()) {
                    out.push(Move::en_passant(from, to, pawn));
                }
            }
            None => {}
        }
    }
}

/// Whether removing both pawns from the capture rank reveals a rook or queen on the king.
///
/// Regular pin detection cannot see this: each pawn alone is a single blocker
/// of a different color, so neither is recorded as pinned.
fn en_passant_exposes_king(
    board: &Board,
    king: Square,
    color: Color,
    from: Square,
    captured_col: u8,
) -> bool {
    if king.row() != from.row() {
        return false;
    }

    let step: i8 = if captured_col > king.col() { 1 } else { -1 };
    let vacated = |sq: Square| sq == from || sq.col() == captured_col;

    for distance in 1..8 {
        let Some(sq) = king.offset(0, step * distance) else {
            return false;
        };
        if vacated(sq) {
            continue;
        }
        if let Some(piece) = board.get(sq) {
            return piece.color != color
                && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::Square;
    use crate::game_state::game_state::GameState;
    use crate::moves::chess_move::Move;

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    fn moves_from(game: &mut GameState, from: &str) -> Vec<Move> {
        let from = sq(from);
        game.get_valid_moves()
            .into_iter()
            .filter(|mv| mv.start() == from)
            .collect()
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let mut game = GameState::new_game();
        let moves = moves_from(&mut game, "e2");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|mv| mv.end() == sq("e4")));
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(moves_from(&mut game, "e2").is_empty());
    }

    #[test]
    fn file_pinned_pawn_may_still_advance_toward_the_king() {
        // Light king on e8 side of the pawn, dark rook below it on the same file.
        let mut game = GameState::from_fen("4K3/8/8/4P3/8/8/8/k3r3 w - - 0 1").expect("FEN should parse");
        let moves = moves_from(&mut game, "e5");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].end(), sq("e6"));
    }

    #[test]
    fn diagonally_pinned_pawn_may_only_capture_the_pinner() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/2b5/3P4/4K3 w - - 0 1").expect("FEN should parse");
        let moves = moves_from(&mut game, "d2");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].end(), sq("c3"));
        assert!(moves[0].is_capture());
    }

    #[test]
    fn en_passant_is_refused_when_it_uncovers_a_rank_attack() {
        let mut game = GameState::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1").expect("FEN should parse");
        assert!(!moves_from(&mut game, "b5").iter().any(|mv| mv.is_en_passant()));

        let mut game = GameState::from_fen("8/8/8/K1pP3r/8/8/8/7k w - c6 0 1").expect("FEN should parse");
        assert!(!moves_from(&mut game, "d5").iter().any(|mv| mv.is_en_passant()));

        let mut game = GameState::from_fen("8/8/8/KPp1N2r/8/8/8/7k w - c6 0 1").expect("FEN should parse");
        assert!(moves_from(&mut game, "b5").iter().any(|mv| mv.is_en_passant()));
    }
}
