//! FEN-to-GameState parser.
//!
//! Builds a fully initialized `GameState` (history logs seeded, king squares
//! cached) from a Forsyth-Edwards Notation string. The halfmove and fullmove
//! fields may be omitted, as in EPD-style perft suites; they default to `0 1`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let kings = board.require_single_kings()?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_square = parse_en_passant_square(en_passant_part)?;
    if let Some(target) = en_passant_square {
        check_en_passant_target(&board, target, side_to_move)?;
    }
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("halfmove clock {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("fullmove number {fullmove_part}")))?;

    let game_state = GameState::with_position(
        board,
        kings,
        side_to_move,
        castling_rights,
        en_passant_square,
        halfmove_clock,
        fullmove_number,
    );
    if game_state.is_king_attacked(side_to_move.opposite()) {
        return Err(invalid("side not to move is in check"));
    }

    Ok(game_state)
}

fn invalid(reason: &str) -> ChessError {
    ChessError::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                col += empty_count as u8;
                if col > 8 {
                    return Err(invalid("rank has too many files"));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;
            let square = Square::new(row as u8, col).ok_or_else(|| invalid("rank has too many files"))?;
            board.set(square, Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(&format!("side to move {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.light_king_side = true,
            'Q' => rights.light_queen_side = true,
            'k' => rights.dark_king_side = true,
            'q' => rights.dark_queen_side = true,
            _ => return Err(invalid(&format!("castling rights character {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Square::from_algebraic(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(&format!("en-passant square {en_passant_part}")))
}

/// The target must be the empty square a double push just skipped, with the
/// pushed enemy pawn standing directly behind it.
fn check_en_passant_target(board: &Board, target: Square, side_to_move: Color) -> ChessResult<()> {
    let pusher = side_to_move.opposite();
    let skipped_row = pusher.pawn_start_row() as i8 + pusher.pawn_forward();
    if target.row() as i8 != skipped_row {
        return Err(invalid(&format!("en-passant square {target} is on the wrong rank")));
    }
    if !board.is_empty(target) {
        return Err(invalid(&format!("en-passant square {target} is occupied")));
    }

    let pawn_square = target.offset(pusher.pawn_forward(), 0);
    let pushed_pawn = pawn_square.and_then(|square| board.get(square));
    if pushed_pawn != Some(Piece::new(pusher, PieceKind::Pawn)) {
        return Err(invalid(&format!("no pawn behind en-passant square {target}")));
    }

    Ok(())
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{CastlingRights, Color, Square};
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&game_state));

        assert_eq!(game_state.side_to_move(), Color::Light);
        assert_eq!(game_state.fullmove_number(), 1);
        assert_eq!(game_state.halfmove_clock(), 0);
        assert_eq!(game_state.castling_rights(), CastlingRights::ALL);
        assert_eq!(game_state.board().pieces().count(), 32);
    }

    #[test]
    fn clocks_default_when_omitted() {
        let game_state = parse_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -").expect("four-field FEN should parse");
        assert_eq!(game_state.halfmove_clock(), 0);
        assert_eq!(game_state.fullmove_number(), 1);
        assert_eq!(game_state.castling_rights(), CastlingRights::NONE);
        assert_eq!(game_state.king_square(Color::Dark), Square::from_algebraic("h4").expect("h4"));
    }

    #[test]
    fn en_passant_and_clocks_are_read() {
        let game_state = parse_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3")
            .expect("FEN should parse");
        assert_eq!(game_state.en_passant_square(), Some(Square::from_algebraic("e3").expect("e3")));
        assert_eq!(game_state.fullmove_number(), 3);
        assert_eq!(game_state.side_to_move(), Color::Dark);
    }

    #[test]
    fn malformed_fens_are_rejected() {
        let bad = [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1BNR w kq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
        ];
        for fen in bad {
            assert!(parse_fen(fen).is_err(), "{fen:?} should be rejected");
        }
    }

    #[test]
    fn en_passant_target_must_follow_a_double_push() {
        let bad = [
            // Target on the side to move's own third rank.
            "4k3/3p4/8/8/8/8/8/4K3 b - e6 0 1",
            // Target occupied by the king it would remove.
            "6k1/3pK3/8/8/8/8/8/8 b - e6 0 1",
            // Right rank, but no pushed pawn behind the target.
            "4k3/8/8/8/8/8/8/4K3 w - d6 0 1",
            // Pawn behind the target belongs to the side to move.
            "4k3/8/8/3P4/8/8/8/4K3 w - d6 0 1",
            // Target square itself occupied.
            "4k3/8/3n4/3p4/8/8/8/4K3 w - d6 0 1",
        ];
        for fen in bad {
            let err = parse_fen(fen).expect_err("inconsistent en-passant target should be rejected");
            assert!(matches!(err, ChessError::InvalidFen(_)), "{fen:?} gave {err:?}");
        }

        let ok = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("double push target should parse");
        assert_eq!(ok.en_passant_square(), Some(Square::from_algebraic("d6").expect("d6")));
    }

    #[test]
    fn side_not_to_move_in_check_is_rejected() {
        let err = parse_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").expect_err("capturable king should be rejected");
        assert!(matches!(err, ChessError::InvalidFen(_)));
        assert!(parse_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").is_ok());
    }
}
