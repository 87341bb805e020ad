//! Core mutable position representation.
//!
//! `GameState` is the single source of truth for a game. It owns the board,
//! side to move, cached king squares, and the per-move history logs that let
//! `undo_move` restore every field exactly. Move application lives in
//! `move_generation::legal_move_apply` and legal move generation in
//! `move_generation::legal_move_generator`; both extend this type.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, KING_HOME_COL};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::PinOrCheck;
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Everything that decides whether two positions repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
}

/// Transient check analysis, recomputed by every `get_valid_moves` call.
#[derive(Debug, Clone, Default)]
pub(crate) struct CheckState {
    pub in_check: bool,
    pub pins: Vec<PinOrCheck>,
    pub checks: Vec<PinOrCheck>,
    pub checkmate: bool,
    pub stalemate: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    // [color]
    pub(crate) king_squares: [Square; 2],

    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,
    pub(crate) halfmove_clock: u16,

    // History. `move_log` has one entry per applied move; the other logs also
    // hold the starting value at index 0 so their last entry is always current.
    pub(crate) move_log: Vec<Move>,
    pub(crate) castle_rights_log: Vec<CastlingRights>,
    pub(crate) en_passant_log: Vec<Option<Square>>,
    pub(crate) halfmove_log: Vec<u16>,
    pub(crate) position_history: Vec<PositionKey>,

    pub(crate) initial_side_to_move: Color,
    pub(crate) initial_fullmove_number: u16,

    pub(crate) check_state: CheckState,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard initial position, light to move.
    pub fn new_game() -> Self {
        Self::with_position(
            Board::starting_position(),
            [Square::at(7, KING_HOME_COL), Square::at(0, KING_HOME_COL)],
            Color::Light,
            CastlingRights::ALL,
            None,
            0,
            1,
        )
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Build a position from the presentation layer's tag grid.
    ///
    /// Castling rights are granted wherever a king and rook still stand on
    /// their home squares; no en-passant target is set. The side not to move
    /// may not be in check.
    pub fn from_board_tags(tags: &[[&str; 8]; 8], white_to_move: bool) -> ChessResult<Self> {
        let board = Board::from_tags(tags)?;
        let kings = board.require_single_kings()?;
        let side = if white_to_move { Color::Light } else { Color::Dark };
        let rights = infer_castling_rights(&board);
        let state = Self::with_position(board, kings, side, rights, None, 0, 1);
        if state.is_king_attacked(side.opposite()) {
            return Err(ChessError::InvalidBoardTag(format!(
                "{} king is in check with {} to move",
                side.opposite().tag_char(),
                side.tag_char()
            )));
        }
        Ok(state)
    }

    pub(crate) fn with_position(
        board: Board,
        king_squares: [Square; 2],
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let mut state = Self {
            board,
            side_to_move,
            king_squares,
            castling_rights,
            en_passant_square,
            halfmove_clock,
            move_log: Vec::new(),
            castle_rights_log: vec![castling_rights],
            en_passant_log: vec![en_passant_square],
            halfmove_log: vec![halfmove_clock],
            position_history: Vec::new(),
            initial_side_to_move: side_to_move,
            initial_fullmove_number: fullmove_number.max(1),
            check_state: CheckState::default(),
        };
        state.position_history.push(state.position_key());
        state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::Light
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        let offset = usize::from(self.initial_side_to_move == Color::Dark);
        let completed = (self.move_log.len() + offset) / 2;
        self.initial_fullmove_number
            .saturating_add(u16::try_from(completed).unwrap_or(u16::MAX))
    }

    /// Whether the side to move was in check at the last `get_valid_moves` call.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.check_state.in_check
    }

    #[inline]
    pub fn pins(&self) -> &[PinOrCheck] {
        &self.check_state.pins
    }

    #[inline]
    pub fn checks(&self) -> &[PinOrCheck] {
        &self.check_state.checks
    }

    /// Set by `get_valid_moves` when it finds no moves while in check.
    #[inline]
    pub fn checkmate(&self) -> bool {
        self.check_state.checkmate
    }

    /// Set by `get_valid_moves` when it finds no moves while not in check.
    #[inline]
    pub fn stalemate(&self) -> bool {
        self.check_state.stalemate
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
        }
    }

    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.position_key();
        self.position_history
            .iter()
            .filter(|key| **key == current)
            .count()
            >= 3
    }

    /// Outcome as of the last `get_valid_moves` call.
    pub fn status(&self) -> GameStatus {
        if self.check_state.checkmate {
            GameStatus::Checkmate {
                winner: self.side_to_move.opposite(),
            }
        } else if self.check_state.stalemate {
            GameStatus::Stalemate
        } else if self.is_threefold_repetition() {
            GameStatus::ThreefoldRepetition
        } else if self.is_fifty_move_draw() {
            GameStatus::FiftyMoveRule
        } else {
            GameStatus::Ongoing
        }
    }

    pub(crate) fn save_check_state(&self) -> CheckState {
        self.check_state.clone()
    }

    pub(crate) fn restore_check_state(&mut self, saved: CheckState) {
        self.check_state = saved;
    }
}

pub(crate) fn infer_castling_rights(board: &Board) -> CastlingRights {
    let holds = |color: Color, rook_col: u8| {
        let row = color.back_row();
        board.get(Square::at(row, KING_HOME_COL)) == Some(Piece::new(color, PieceKind::King))
            && board.get(Square::at(row, rook_col)) == Some(Piece::new(color, PieceKind::Rook))
    };

    CastlingRights {
        light_king_side: holds(Color::Light, 7),
        light_queen_side: holds(Color::Light, 0),
        dark_king_side: holds(Color::Dark, 7),
        dark_queen_side: holds(Color::Dark, 0),
    }
}
