//! Value types shared by the board, move generator, and search.
//!
//! Squares use `(row, col)` coordinates where row 0 is rank 8 (the dark back
//! rank) and row 7 is rank 1, matching the 8x8 grid the presentation layer
//! draws from top to bottom.

use std::fmt;

use crate::errors::{ChessError, ChessResult};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a single pawn advance.
    #[inline]
    pub const fn pawn_forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }

    /// Farthest row for this color's pawns, where they promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    #[inline]
    pub const fn tag_char(self) -> char {
        match self {
            Color::Light => 'w',
            Color::Dark => 'b',
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Second character of the board tag. Pawns are lowercase for asset-table compatibility.
    #[inline]
    pub const fn tag_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

pub const EMPTY_TAG: &str = "--";

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Two-character tag such as `"wp"` or `"bK"`.
    pub const fn tag(self) -> &'static str {
        match (self.color, self.kind) {
            (Color::Light, PieceKind::Pawn) => "wp",
            (Color::Light, PieceKind::Knight) => "wN",
            (Color::Light, PieceKind::Bishop) => "wB",
            (Color::Light, PieceKind::Rook) => "wR",
            (Color::Light, PieceKind::Queen) => "wQ",
            (Color::Light, PieceKind::King) => "wK",
            (Color::Dark, PieceKind::Pawn) => "bp",
            (Color::Dark, PieceKind::Knight) => "bN",
            (Color::Dark, PieceKind::Bishop) => "bB",
            (Color::Dark, PieceKind::Rook) => "bR",
            (Color::Dark, PieceKind::Queen) => "bQ",
            (Color::Dark, PieceKind::King) => "bK",
        }
    }

    /// Parse a board tag. `"--"` maps to `None`.
    pub fn from_tag(tag: &str) -> ChessResult<Option<Self>> {
        if tag == EMPTY_TAG {
            return Ok(None);
        }

        let mut chars = tag.chars();
        let (Some(color_ch), Some(kind_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(ChessError::InvalidBoardTag(tag.to_owned()));
        };

        let color = match color_ch {
            'w' => Color::Light,
            'b' => Color::Dark,
            _ => return Err(ChessError::InvalidBoardTag(tag.to_owned())),
        };
        let kind = match kind_ch {
            'p' | 'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return Err(ChessError::InvalidBoardTag(tag.to_owned())),
        };

        Ok(Some(Self::new(color, kind)))
    }
}

/// Row/column step used for rays, pins, and checks.
pub type Direction = (i8, i8);

/// A board coordinate, always inside the 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Caller guarantees `row < 8 && col < 8`.
    #[inline]
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn step(self, direction: Direction, distance: i8) -> Option<Self> {
        self.offset(direction.0 * distance, direction.1 * distance)
    }

    /// Parse `"e4"`-style coordinates.
    pub fn from_algebraic(text: &str) -> ChessResult<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(text.to_owned()));
        }

        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessError::InvalidSquare(text.to_owned()));
        }

        Ok(Self::at(b'8' - rank, file - b'a'))
    }

    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// The four castling permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub light_king_side: bool,
    pub light_queen_side: bool,
    pub dark_king_side: bool,
    pub dark_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: Self = Self {
        light_king_side: true,
        light_queen_side: true,
        dark_king_side: true,
        dark_queen_side: true,
    };

    pub const NONE: Self = Self {
        light_king_side: false,
        light_queen_side: false,
        dark_king_side: false,
        dark_queen_side: false,
    };

    #[inline]
    pub const fn king_side(self, color: Color) -> bool {
        match color {
            Color::Light => self.light_king_side,
            Color::Dark => self.dark_king_side,
        }
    }

    #[inline]
    pub const fn queen_side(self, color: Color) -> bool {
        match color {
            Color::Light => self.light_queen_side,
            Color::Dark => self.dark_queen_side,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        match color {
            Color::Light => {
                self.light_king_side = false;
                self.light_queen_side = false;
            }
            Color::Dark => {
                self.dark_king_side = false;
                self.dark_queen_side = false;
            }
        }
    }

    /// Revoke whichever right belongs to the rook home square `square`, if any.
    pub fn revoke_for_corner(&mut self, square: Square) {
        match (square.row(), square.col()) {
            (7, 0) => self.light_queen_side = false,
            (7, 7) => self.light_king_side = false,
            (0, 0) => self.dark_queen_side = false,
            (0, 7) => self.dark_king_side = false,
            _ => {}
        }
    }
}

impl fmt::Display for CastlingRights {
    /// FEN castling field (`KQkq`, or `-` when no right is held).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return f.write_str("-");
        }
        if self.light_king_side {
            f.write_str("K")?;
        }
        if self.light_queen_side {
            f.write_str("Q")?;
        }
        if self.dark_king_side {
            f.write_str("k")?;
        }
        if self.dark_queen_side {
            f.write_str("q")?;
        }
        Ok(())
    }
}
