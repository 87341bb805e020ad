//! 8x8 mailbox board owned by `GameState`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard initial arrangement.
    pub fn starting_position() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for color in [Color::Light, Color::Dark] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.squares[color.back_row() as usize][col] = Some(Piece::new(color, *kind));
                board.squares[color.pawn_start_row() as usize][col] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row() as usize][square.col() as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Occupied squares in row-major order (rank 8 first).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Square::at(row as u8, col as u8), piece))
            })
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| *piece == Piece::new(color, PieceKind::King))
            .map(|(square, _)| square)
    }

    /// Board as the presentation layer's two-character tag grid.
    pub fn tags(&self) -> [[&'static str; 8]; 8] {
        let mut out = [[EMPTY_TAG; 8]; 8];
        for (square, piece) in self.pieces() {
            out[square.row() as usize][square.col() as usize] = piece.tag();
        }
        out
    }

    pub fn from_tags(tags: &[[&str; 8]; 8]) -> ChessResult<Self> {
        let mut board = Self::empty();
        for (row, cells) in tags.iter().enumerate() {
            for (col, tag) in cells.iter().enumerate() {
                board.set(Square::at(row as u8, col as u8), Piece::from_tag(tag)?);
            }
        }
        Ok(board)
    }

    pub(crate) fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|(_, p)| *p == piece).count()
    }

    pub(crate) fn require_single_kings(&self) -> ChessResult<[Square; 2]> {
        let mut kings = [Square::at(0, 0); 2];
        for color in [Color::Light, Color::Dark] {
            let king = Piece::new(color, PieceKind::King);
            if self.count(king) != 1 {
                return Err(ChessError::InvalidFen(format!(
                    "expected exactly one {} king",
                    king.tag()
                )));
            }
            kings[color.index()] = self
                .find_king(color)
                .ok_or_else(|| ChessError::InvalidFen(format!("missing {} king", king.tag())))?;
        }
        Ok(kings)
    }
}
