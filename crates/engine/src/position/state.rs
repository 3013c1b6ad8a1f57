use crate::error::{RulesError, RulesResult};
use crate::moves::{GameMove, Move};
use crate::types::*;
use super::Position;

impl Position {
    /// Apply a move without checking that it is legal.
    ///
    /// `promotion` must be given exactly when `mv.is_promotion` is set, and
    /// must be a queen, rook, bishop or knight. Check and pin state is not
    /// recomputed here; the next [`Position::legal_moves`] call does that.
    pub fn make_move(&mut self, mv: Move, promotion: Option<PieceKind>) -> RulesResult<GameMove> {
        let promotion = match (mv.is_promotion, promotion) {
            (true, Some(kind)) if kind.can_promote_to() => Some(kind),
            (true, None) => {
                return Err(RulesError::MissingPromotion { notation: mv.to_algebraic() });
            }
            (false, None) => None,
            _ => {
                return Err(RulesError::InvalidPromotion { notation: mv.to_algebraic() });
            }
        };

        let record = GameMove {
            mv,
            promotion,
            previous_en_passant: self.en_passant,
        };

        let color = mv.piece_moved.color;
        self.board.set(mv.start, None);
        self.board.set(mv.end, Some(mv.piece_moved));
        self.move_log.push(record);
        self.side_to_move = self.side_to_move.opponent();

        if mv.piece_moved.is_kind(PieceKind::King) {
            self.set_king_square(color, mv.end);
        }

        if let Some(kind) = promotion {
            self.board.set(mv.end, Some(Piece::new(color, kind)));
        }

        if mv.is_en_passant {
            self.board.set(Square::new(mv.start.row(), mv.end.col()), None);
        }

        // Only a double pawn push opens an en passant capture
        let rows_moved = (mv.start.row() as i8 - mv.end.row() as i8).abs();
        self.en_passant = if mv.piece_moved.is_kind(PieceKind::Pawn) && rows_moved == 2 {
            Some(Square::new((mv.start.row() + mv.end.row()) / 2, mv.start.col()))
        } else {
            None
        };

        Ok(record)
    }

    /// Apply a move after confirming it is in the legal move set.
    ///
    /// Only the start and end squares of `mv` are consulted; the generated
    /// move with those squares is what gets applied.
    pub fn try_make_move(&mut self, mv: Move, promotion: Option<PieceKind>) -> RulesResult<GameMove> {
        let legal = self
            .legal_moves()
            .into_iter()
            .find(|candidate| *candidate == mv)
            .ok_or_else(|| {
                log::debug!("rejected illegal move {}", mv);
                RulesError::IllegalMove { notation: mv.to_algebraic() }
            })?;
        self.make_move(legal, promotion)
    }

    /// Undo the last move made. Returns `None`, changing nothing, when
    /// the log is empty.
    pub fn undo_move(&mut self) -> Option<GameMove> {
        let record = self.move_log.pop()?;
        let mv = record.mv;
        let color = mv.piece_moved.color;

        // A promoted piece is simply replaced by the pawn in piece_moved
        self.board.set(mv.start, Some(mv.piece_moved));
        if mv.is_en_passant {
            self.board.set(mv.end, None);
            self.board
                .set(Square::new(mv.start.row(), mv.end.col()), mv.piece_captured);
        } else {
            self.board.set(mv.end, mv.piece_captured);
        }

        self.en_passant = record.previous_en_passant;
        self.side_to_move = self.side_to_move.opponent();

        if mv.piece_moved.is_kind(PieceKind::King) {
            self.set_king_square(color, mv.start);
        }

        Some(record)
    }
}
