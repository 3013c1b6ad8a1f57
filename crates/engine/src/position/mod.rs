use crate::board::Board;
use crate::error::{RulesError, RulesResult};
use crate::moves::{GameMove, Move};
use crate::types::*;

// Declare submodules
pub mod moves;
pub mod state;
pub mod validation;

pub use validation::{PinsAndChecks, Ray};

/// The game aggregate: board, side to move, king squares, en-passant
/// target and move log. Check and pin information is never stored here;
/// it is recomputed by [`Position::check_for_pins_and_checks`] on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    white_king: Square,
    black_king: Square,
    en_passant: Option<Square>,
    move_log: Vec<GameMove>,
}

impl Position {
    pub fn new() -> Self {
        Self {
            board: Board::starting_position(),
            side_to_move: Color::White,
            white_king: Square::new(7, 4),
            black_king: Square::new(0, 4),
            en_passant: None,
            move_log: Vec::new(),
        }
    }

    /// Wraps an arbitrary board. Each side needs exactly one king, and the
    /// side that is not to move must not be in check.
    pub fn from_board(board: Board, side_to_move: Color) -> RulesResult<Self> {
        let white_king = locate_king(&board, Color::White)?;
        let black_king = locate_king(&board, Color::Black)?;

        let position = Self {
            board,
            side_to_move,
            white_king,
            black_king,
            en_passant: None,
            move_log: Vec::new(),
        };

        let waiting = side_to_move.opponent();
        if validation::scan(&position.board, position.king_square(waiting), waiting).in_check {
            return Err(RulesError::OpponentInCheck { color: waiting.name() });
        }
        Ok(position)
    }

    /// Parses a six-field FEN. The castling field is accepted but ignored,
    /// since castling is not generated.
    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(RulesError::FenFieldCount { found: parts.len() });
        }

        let board = Board::from_fen_placement(parts[0])?;
        let side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(RulesError::FenActiveColor(other.to_string())),
        };

        let mut position = Self::from_board(board, side)?;
        position.en_passant = match parts[3] {
            "-" => None,
            name => Some(position.validate_en_passant(Square::from_algebraic(name)?)?),
        };

        for counter in &parts[4..6] {
            counter
                .parse::<u32>()
                .map_err(|_| RulesError::FenCounter(counter.to_string()))?;
        }

        Ok(position)
    }

    /// Placement, side and en-passant square; castling and clocks are
    /// written as "-" and "0 1".
    pub fn to_fen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let en_passant = self
            .en_passant
            .map(|sq| sq.to_algebraic())
            .unwrap_or_else(|| "-".to_string());
        format!("{} {} - {} 0 1", self.board.to_fen_placement(), side, en_passant)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn move_log(&self) -> &[GameMove] {
        &self.move_log
    }

    pub fn last_move(&self) -> Option<&GameMove> {
        self.move_log.last()
    }

    pub fn piece_at(&self, square: Square) -> Cell {
        self.board.get(square)
    }

    /// Finds the legal move with the given "e2e4" notation
    pub fn find_move(&self, notation: &str) -> RulesResult<Move> {
        if notation.len() != 4 || !notation.is_ascii() {
            return Err(RulesError::InvalidAlgebraic(notation.to_string()));
        }
        let start = Square::from_algebraic(&notation[0..2])?;
        let end = Square::from_algebraic(&notation[2..4])?;
        self.legal_moves()
            .into_iter()
            .find(|mv| mv.start == start && mv.end == end)
            .ok_or_else(|| RulesError::IllegalMove { notation: notation.to_string() })
    }

    /// The target must sit right behind an enemy pawn that could just have
    /// made a double push, with both squares it crossed now empty
    fn validate_en_passant(&self, target: Square) -> RulesResult<Square> {
        let mover = self.side_to_move.opponent();
        let pushed_pawn = Piece::new(mover, PieceKind::Pawn);
        let back = (-mover.pawn_direction(), 0);
        let valid = target.row() == (mover.pawn_start_row() as i8 + mover.pawn_direction()) as u8
            && self.board.is_empty(target)
            && target.offset(back, 1).map_or(false, |sq| self.board.is_empty(sq))
            && target.offset((mover.pawn_direction(), 0), 1).and_then(|sq| self.board.get(sq))
                == Some(pushed_pawn);
        if valid {
            Ok(target)
        } else {
            Err(RulesError::FenEnPassant(target.to_algebraic()))
        }
    }

    fn set_king_square(&mut self, color: Color, square: Square) {
        match color {
            Color::White => self.white_king = square,
            Color::Black => self.black_king = square,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

fn locate_king(board: &Board, color: Color) -> RulesResult<Square> {
    let kings = board.find(Piece::new(color, PieceKind::King));
    match kings.as_slice() {
        [square] => Ok(*square),
        _ => Err(RulesError::KingCount { color: color.name(), found: kings.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matches_start_fen() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let parsed = Position::from_fen(fen).unwrap();
        assert_eq!(parsed, Position::new());
        assert_eq!(parsed.king_square(Color::White), Square::new(7, 4));
        assert_eq!(parsed.king_square(Color::Black), Square::new(0, 4));
    }

    #[test]
    fn test_fen_round_trip_keeps_en_passant() {
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w - e6 0 1";
        let position = Position::from_fen(fen).unwrap();
        assert_eq!(position.en_passant_target(), Some(Square::from_algebraic("e6").unwrap()));
        assert_eq!(position.to_fen(), fen);
    }

    #[test]
    fn test_fen_rejects_bad_input() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/8 w - -"),
            Err(RulesError::FenFieldCount { found: 4 })
        );
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(RulesError::FenActiveColor(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - e6 0 1"),
            Err(RulesError::FenEnPassant(_))
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - a 1"),
            Err(RulesError::FenCounter(_))
        ));
    }

    #[test]
    fn test_king_count_enforced() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(RulesError::KingCount { color: "black", found: 0 })
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(RulesError::KingCount { color: "white", found: 2 })
        );
    }

    #[test]
    fn test_waiting_side_cannot_be_in_check() {
        // Black king attacked by the rook, but white is to move
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/K3R3 w - - 0 1"),
            Err(RulesError::OpponentInCheck { color: "black" })
        );
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/K3R3 b - - 0 1").is_ok());
    }
}
