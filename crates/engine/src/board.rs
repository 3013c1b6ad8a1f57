use crate::error::{RulesError, RulesResult};
use crate::types::*;
use std::fmt;
use std::ops::{Index, IndexMut};

/// 8x8 piece grid, the single source of truth for piece placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

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

impl Board {
    pub fn empty() -> Self {
        Self { cells: [[None; 8]; 8] }
    }

    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for col in 0..8 {
            board.cells[0][col] = Some(Piece::new(Color::Black, BACK_RANK[col]));
            board.cells[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.cells[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.cells[7][col] = Some(Piece::new(Color::White, BACK_RANK[col]));
        }
        board
    }

    /// Builds a board from two-character codes, row 0 first:
    /// `"wp"`, `"bK"`, `"--"` for an empty square.
    pub fn from_codes(codes: [[&str; 8]; 8]) -> RulesResult<Self> {
        let mut board = Self::empty();
        for (row, line) in codes.iter().enumerate() {
            for (col, code) in line.iter().enumerate() {
                board.cells[row][col] = Piece::from_code(code)?;
            }
        }
        Ok(board)
    }

    /// Inverse of [`Board::from_codes`], for renderers
    pub fn to_codes(&self) -> [[String; 8]; 8] {
        std::array::from_fn(|row| {
            std::array::from_fn(|col| match self.cells[row][col] {
                Some(piece) => piece.code(),
                None => EMPTY_CODE.to_string(),
            })
        })
    }

    pub fn get(&self, square: Square) -> Cell {
        self.cells[square.row() as usize][square.col() as usize]
    }

    pub fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square.row() as usize][square.col() as usize] = cell;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// True when `square` holds a piece of `color`
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        matches!(self.get(square), Some(piece) if piece.color == color)
    }

    /// All squares holding `piece`, row-major
    pub fn find(&self, piece: Piece) -> Vec<Square> {
        Square::all().filter(|&sq| self.get(sq) == Some(piece)).collect()
    }

    /// Parses the piece-placement field of a FEN string
    pub fn from_fen_placement(placement: &str) -> RulesResult<Self> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(RulesError::FenPlacement {
                message: format!("expected 8 ranks, found {}", ranks.len()),
            });
        }

        let mut board = Self::empty();
        // FEN lists rank 8 first, which is row 0 here
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    col += skip as usize;
                } else {
                    if col >= 8 {
                        return Err(RulesError::FenPlacement {
                            message: format!("too many squares in rank {:?}", rank_str),
                        });
                    }
                    board.cells[row][col] = Some(Piece::from_fen_char(ch)?);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(RulesError::FenPlacement {
                    message: format!("rank {:?} covers {} squares", rank_str, col),
                });
            }
        }
        Ok(board)
    }

    pub fn to_fen_placement(&self) -> String {
        let mut out = String::new();
        for row in 0..8 {
            let mut gap = 0;
            for col in 0..8 {
                match self.cells[row][col] {
                    Some(piece) => {
                        if gap > 0 {
                            out.push_str(&gap.to_string());
                            gap = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push_str(&gap.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Index<Square> for Board {
    type Output = Cell;

    fn index(&self, square: Square) -> &Cell {
        &self.cells[square.row() as usize][square.col() as usize]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, square: Square) -> &mut Cell {
        &mut self.cells[square.row() as usize][square.col() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                match self.cells[row][col] {
                    Some(piece) => write!(f, " {}", piece.fen_char())?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
