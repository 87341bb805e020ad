//! Immutable record of a single ply.
//!
//! A `Move` captures the moved and captured pieces from the board at the time
//! it was generated, so it stays valid as a history entry after the board
//! changes. Moves can only be built by the move generator; shells obtain them
//! from `GameState::get_valid_moves` or resolve square pairs through
//! `GameState::find_valid_move`.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy)]
pub struct Move {
    start: Square,
    end: Square,
    piece_moved: Piece,
    piece_captured: Option<Piece>,
    is_pawn_promotion: bool,
    is_en_passant: bool,
    is_castle: bool,
}

impl Move {
    /// Ordinary move or capture; the captured piece is read from `board`.
    pub(crate) fn new(start: Square, end: Square, piece_moved: Piece, board: &Board) -> Self {
        let is_pawn_promotion = piece_moved.kind == PieceKind::Pawn
            && end.row() == piece_moved.color.promotion_row();
        Self {
            start,
            end,
            piece_moved,
            piece_captured: board.get(end),
            is_pawn_promotion,
            is_en_passant: false,
            is_castle: false,
        }
    }

    /// En-passant capture. The landing square is empty, so the captured pawn is implied.
    pub(crate) fn en_passant(start: Square, end: Square, piece_moved: Piece) -> Self {
        Self {
            start,
            end,
            piece_moved,
            piece_captured: Some(Piece::new(piece_moved.color.opposite(), PieceKind::Pawn)),
            is_pawn_promotion: false,
            is_en_passant: true,
            is_castle: false,
        }
    }

    /// King leg of a castling move; the rook relocation is implied by `end`.
    pub(crate) fn castle(start: Square, end: Square, king: Piece) -> Self {
        Self {
            start,
            end,
            piece_moved: king,
            piece_captured: None,
            is_pawn_promotion: false,
            is_en_passant: false,
            is_castle: true,
        }
    }

    #[inline]
    pub fn start(&self) -> Square {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Square {
        self.end
    }

    #[inline]
    pub fn piece_moved(&self) -> Piece {
        self.piece_moved
    }

    #[inline]
    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    #[inline]
    pub fn is_pawn_promotion(&self) -> bool {
        self.is_pawn_promotion
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.is_castle
    }

    #[inline]
    pub fn is_king_side_castle(&self) -> bool {
        self.is_castle && self.end.col() > self.start.col()
    }

    /// Square of the pawn removed by an en-passant capture.
    #[inline]
    pub fn en_passant_capture_square(&self) -> Option<Square> {
        self.is_en_passant
            .then(|| Square::at(self.start.row(), self.end.col()))
    }

    /// Packed `(start, end)` identity used for equality and hashing.
    #[inline]
    pub fn move_id(&self) -> u16 {
        let start = u16::from(self.start.row()) * 8 + u16::from(self.start.col());
        let end = u16::from(self.end.row()) * 8 + u16::from(self.end.col());
        (start << 6) | end
    }

    /// Coordinate form such as `e2e4` or `e7e8q`.
    pub fn long_algebraic(&self) -> String {
        let mut out = format!("{}{}", self.start, self.end);
        if self.is_pawn_promotion {
            out.push('q');
        }
        out
    }

    /// Short display notation (`Nf3`, `exd5`, `e8=Q`, `O-O`). Disambiguation is not attempted.
    pub fn chess_notation(&self) -> String {
        if self.is_castle {
            return if self.is_king_side_castle() {
                "O-O".to_owned()
            } else {
                "O-O-O".to_owned()
            };
        }

        let mut out = String::new();
        match self.piece_moved.kind {
            PieceKind::Pawn => {
                if self.is_capture() {
                    out.push(self.start.file_char());
                }
            }
            kind => out.push(kind.tag_char()),
        }
        if self.is_capture() {
            out.push('x');
        }
        out.push_str(&self.end.to_string());
        if self.is_pawn_promotion {
            out.push_str("=Q");
        }
        out
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.move_id() == other.move_id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.move_id().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chess_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};

    fn sq(text: &str) -> Square {
        Square::from_algebraic(text).expect("test square should parse")
    }

    #[test]
    fn equality_only_considers_start_and_end() {
        let mut board = Board::empty();
        let pawn = Piece::new(Color::Light, PieceKind::Pawn);
        let quiet = Move::new(sq("e2"), sq("e4"), pawn, &board);
        board.set(sq("e4"), Some(Piece::new(Color::Dark, PieceKind::Knight)));
        let capture = Move::new(sq("e2"), sq("e4"), pawn, &board);

        assert!(capture.is_capture());
        assert!(!quiet.is_capture());
        assert_eq!(quiet, capture);
        assert_ne!(quiet, Move::new(sq("e2"), sq("e3"), pawn, &board));
    }

    #[test]
    fn promotion_is_derived_from_the_far_rank() {
        let board = Board::empty();
        let light_pawn = Piece::new(Color::Light, PieceKind::Pawn);
        let dark_pawn = Piece::new(Color::Dark, PieceKind::Pawn);

        assert!(Move::new(sq("a7"), sq("a8"), light_pawn, &board).is_pawn_promotion());
        assert!(Move::new(sq("h2"), sq("h1"), dark_pawn, &board).is_pawn_promotion());
        assert!(!Move::new(sq("a6"), sq("a7"), light_pawn, &board).is_pawn_promotion());
    }

    #[test]
    fn en_passant_records_the_opposing_pawn() {
        let mv = Move::en_passant(sq("e5"), sq("d6"), Piece::new(Color::Light, PieceKind::Pawn));
        assert_eq!(mv.piece_captured(), Some(Piece::new(Color::Dark, PieceKind::Pawn)));
        assert_eq!(mv.en_passant_capture_square(), Some(sq("d5")));
        assert_eq!(mv.chess_notation(), "exd6");
    }

    #[test]
    fn notation_covers_pieces_castles_and_promotions() {
        let mut board = Board::empty();
        let knight = Piece::new(Color::Light, PieceKind::Knight);
        assert_eq!(Move::new(sq("g1"), sq("f3"), knight, &board).chess_notation(), "Nf3");
        assert_eq!(Move::new(sq("g1"), sq("f3"), knight, &board).long_algebraic(), "g1f3");

        board.set(sq("b8"), Some(Piece::new(Color::Dark, PieceKind::Rook)));
        let promo = Move::new(sq("a7"), sq("b8"), Piece::new(Color::Light, PieceKind::Pawn), &board);
        assert_eq!(promo.chess_notation(), "axb8=Q");
        assert_eq!(promo.long_algebraic(), "a7b8q");

        let king = Piece::new(Color::Dark, PieceKind::King);
        assert_eq!(Move::castle(sq("e8"), sq("g8"), king).chess_notation(), "O-O");
        assert_eq!(Move::castle(sq("e8"), sq("c8"), king).to_string(), "O-O-O");
    }
}
