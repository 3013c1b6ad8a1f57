use crate::board::Board;
use crate::error::{RulesError, RulesResult};
use crate::types::*;
use std::fmt;

/// One ply, captured from the board as it stood before the move.
///
/// Equality compares only the encoded start/end squares, so a move built
/// from user input matches the generated move with the same squares.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub piece_moved: Piece,
    pub piece_captured: Cell,
    pub is_en_passant: bool,
    pub is_promotion: bool,
    id: u16,
}

impl Move {
    /// Reads the moved and captured pieces from `board`. Panics if `start`
    /// is empty; generators only call it on occupied squares. Use
    /// [`Move::try_new`] for squares that come from user input.
    pub fn new(start: Square, end: Square, board: &Board) -> Self {
        let piece_moved = board
            .get(start)
            .unwrap_or_else(|| panic!("no piece on {} to move", start));
        let is_promotion = piece_moved.is_kind(PieceKind::Pawn)
            && end.row() == piece_moved.color.promotion_row();
        Self {
            start,
            end,
            piece_moved,
            piece_captured: board.get(end),
            is_en_passant: false,
            is_promotion,
            id: encode(start, end),
        }
    }

    /// Like [`Move::new`], but an empty `start` is an illegal move rather
    /// than a panic
    pub fn try_new(start: Square, end: Square, board: &Board) -> RulesResult<Self> {
        if board.is_empty(start) {
            return Err(RulesError::IllegalMove {
                notation: format!("{}{}", start.to_algebraic(), end.to_algebraic()),
            });
        }
        Ok(Self::new(start, end, board))
    }

    /// En passant capture: the destination is empty, the captured pawn
    /// sits beside it on the start row.
    pub fn en_passant(start: Square, end: Square, board: &Board) -> Self {
        let mut mv = Self::new(start, end, board);
        mv.is_en_passant = true;
        mv.piece_captured = Some(Piece::new(mv.piece_moved.color.opponent(), PieceKind::Pawn));
        mv
    }

    /// 1000*startRow + 100*startCol + 10*endRow + endCol
    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Square of the piece removed by this move, if any
    pub fn capture_square(&self) -> Option<Square> {
        if self.is_en_passant {
            Some(Square::new(self.start.row(), self.end.col()))
        } else if self.piece_captured.is_some() {
            Some(self.end)
        } else {
            None
        }
    }

    /// "e2e4" style notation: start then end square, nothing else
    pub fn to_algebraic(&self) -> String {
        format!("{}{}", self.start.to_algebraic(), self.end.to_algebraic())
    }
}

fn encode(start: Square, end: Square) -> u16 {
    1000 * start.row() as u16 + 100 * start.col() as u16 + 10 * end.row() as u16 + end.col() as u16
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Move {}

impl std::hash::Hash for Move {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_algebraic())
    }
}

/// Move log entry: the move plus the state it cannot reconstruct on undo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMove {
    pub mv: Move,
    pub promotion: Option<PieceKind>,
    pub previous_en_passant: Option<Square>,
}

impl GameMove {
    /// Notation used by the game log: "e7-e8=Q" for promotions
    pub fn describe(&self) -> String {
        let base = format!("{}-{}", self.mv.start, self.mv.end);
        match self.promotion {
            Some(kind) => format!("{}={}", base, kind.code().to_ascii_uppercase()),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_move_snapshot_and_notation() {
        let board = Board::starting_position();
        let mv = Move::new(sq("e2"), sq("e4"), &board);
        assert_eq!(mv.to_algebraic(), "e2e4");
        assert_eq!(mv.piece_moved, Piece::new(Color::White, PieceKind::Pawn));
        assert_eq!(mv.piece_captured, None);
        assert!(!mv.is_promotion);
        assert_eq!(mv.id(), 6444);
    }

    #[test]
    fn test_try_new_rejects_empty_start() {
        let board = Board::starting_position();
        assert_eq!(
            Move::try_new(sq("e4"), sq("e5"), &board),
            Err(RulesError::IllegalMove { notation: "e4e5".to_string() })
        );
        let mv = Move::try_new(sq("b1"), sq("c3"), &board).unwrap();
        assert_eq!(mv, Move::new(sq("b1"), sq("c3"), &board));
    }

    #[test]
    fn test_equality_uses_squares_only() {
        let board = Board::starting_position();
        let a = Move::new(sq("g1"), sq("f3"), &board);
        let mut b = Move::new(sq("g1"), sq("f3"), &board);
        b.is_promotion = true;
        assert_eq!(a, b);
        assert_ne!(a, Move::new(sq("g1"), sq("h3"), &board));
    }

    #[test]
    fn test_en_passant_synthesizes_captured_pawn() {
        let board = Board::from_fen_placement("8/8/8/3Pp3/8/8/8/8").unwrap();
        let mv = Move::en_passant(sq("d5"), sq("e6"), &board);
        assert!(mv.is_en_passant);
        assert_eq!(mv.piece_captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(mv.capture_square(), Some(sq("e5")));
    }

    #[test]
    fn test_promotion_flag_on_far_rank() {
        let board = Board::from_fen_placement("8/P7/8/8/8/8/p7/8").unwrap();
        assert!(Move::new(sq("a7"), sq("a8"), &board).is_promotion);
        assert!(Move::new(sq("a2"), sq("a1"), &board).is_promotion);
    }

    #[test]
    fn test_game_move_description() {
        let board = Board::from_fen_placement("8/P7/8/8/8/8/8/8").unwrap();
        let record = GameMove {
            mv: Move::new(sq("a7"), sq("a8"), &board),
            promotion: Some(PieceKind::Knight),
            previous_en_passant: None,
        };
        assert_eq!(record.describe(), "a7-a8=N");
    }
}
