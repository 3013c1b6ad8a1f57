use crate::error::{RulesError, RulesResult};
use std::fmt;

/// Board coordinate in array convention: row 0 is black's back rank,
/// row 7 is white's back rank, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Panics on coordinates outside the board. Use [`Square::try_new`]
    /// for untrusted input.
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square ({}, {}) is off the board", row, col);
        Self { row, col }
    }

    pub fn try_new(row: i16, col: i16) -> RulesResult<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Self { row: row as u8, col: col as u8 })
        } else {
            Err(RulesError::InvalidSquare { row, col })
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Step `n` times along `dir`, or `None` once off the board
    pub fn offset(&self, dir: Direction, n: i8) -> Option<Self> {
        let row = self.row as i8 + dir.0 * n;
        let col = self.col as i8 + dir.1 * n;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Parses "e4" style names
    pub fn from_algebraic(name: &str) -> RulesResult<Self> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return Err(RulesError::InvalidAlgebraic(name.to_string()));
        }
        let col = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if col >= 8 || rank >= 8 {
            return Err(RulesError::InvalidAlgebraic(name.to_string()));
        }
        Ok(Self { row: 7 - rank, col })
    }

    /// File letter followed by rank digit, e.g. row 6 column 4 is "e2"
    pub fn to_algebraic(&self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        format!("{}{}", file, rank)
    }

    /// Iterates all 64 squares row-major from a8 to h1
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

/// (row delta, column delta)
pub type Direction = (i8, i8);

// Orthogonal rays come first; check detection relies on this split.
pub const ORTHOGONAL: [Direction; 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
pub const DIAGONAL: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ALL_DIRECTIONS: [Direction; 8] = [
    (-1, 0), (0, -1), (1, 0), (0, 1),
    (-1, -1), (-1, 1), (1, -1), (1, 1),
];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

pub const KING_OFFSETS: [Direction; 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (0, 1), (1, -1), (1, 0), (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn push
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Kinds a pawn may promote to, in the usual preference order
pub const PROMOTION_KINDS: [PieceKind; 4] =
    [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

impl PieceKind {
    /// Letter used in two-character piece codes ("wp", "bK")
    pub fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    fn from_code(ch: char) -> Option<Self> {
        match ch {
            'p' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn can_promote_to(self) -> bool {
        PROMOTION_KINDS.contains(&self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    pub fn is_kind(&self, kind: PieceKind) -> bool {
        self.kind == kind
    }

    /// Two-character code such as "wp" or "bQ"
    pub fn code(&self) -> String {
        format!("{}{}", self.color.code(), self.kind.code())
    }

    /// Parses a two-character code; "--" is an empty square
    pub fn from_code(code: &str) -> RulesResult<Option<Piece>> {
        if code == EMPTY_CODE {
            return Ok(None);
        }
        let mut chars = code.chars();
        let color = match chars.next() {
            Some('w') => Color::White,
            Some('b') => Color::Black,
            _ => return Err(RulesError::UnknownPiece(code.to_string())),
        };
        let kind = chars
            .next()
            .and_then(PieceKind::from_code)
            .ok_or_else(|| RulesError::UnknownPiece(code.to_string()))?;
        if chars.next().is_some() {
            return Err(RulesError::UnknownPiece(code.to_string()));
        }
        Ok(Some(Piece::new(color, kind)))
    }

    /// FEN letter: uppercase for white, lowercase for black
    pub fn fen_char(&self) -> char {
        let ch = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    pub fn from_fen_char(ch: char) -> RulesResult<Piece> {
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(RulesError::UnknownPiece(ch.to_string())),
        };
        let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
        Ok(Piece::new(color, kind))
    }
}

/// Code of an empty square in piece-code boards
pub const EMPTY_CODE: &str = "--";

/// Content of one board square; `None` is the empty square
pub type Cell = Option<Piece>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check(Color),     // side to move is in check
    Checkmate(Color), // side to move is mated
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }
}
