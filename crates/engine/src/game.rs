use std::path::{Path, PathBuf};

use crate::error::RulesResult;
use crate::logger::ChessLogger;
use crate::moves::{GameMove, Move};
use crate::position::Position;
use crate::types::{GameStatus, PieceKind, Square};

/// A played game: the position plus a log of everything that happened.
/// This is what a front end drives: it asks for legal moves, plays the
/// chosen one (with a promotion piece when needed) and may undo.
#[derive(Debug, Default)]
pub struct Game {
    position: Position,
    logger: ChessLogger,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    pub fn from_position(position: Position) -> Self {
        let mut logger = ChessLogger::new();
        logger.log(&format!("Start: {}", position.to_fen()));
        Self { position, logger }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn logger(&self) -> &ChessLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut ChessLogger {
        &mut self.logger
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves()
    }

    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    /// Validates and plays `mv`, then logs it along with any check or
    /// game-ending result it produced
    pub fn play(&mut self, mv: Move, promotion: Option<PieceKind>) -> RulesResult<GameStatus> {
        let record = self.position.try_make_move(mv, promotion)?;
        self.logger.log_move(&record);

        let (moves, status) = self.position.legal_moves_and_status();
        if self.logger.should_log_advanced() {
            let pins_and_checks = self.position.check_for_pins_and_checks();
            self.logger
                .log_analysis(self.position.side_to_move(), moves.len(), &pins_and_checks);
        }
        self.logger.log_status(status);
        Ok(status)
    }

    /// Plays the move between two picked squares. An empty start square is
    /// rejected like any other illegal move.
    pub fn play_squares(
        &mut self,
        start: Square,
        end: Square,
        promotion: Option<PieceKind>,
    ) -> RulesResult<GameStatus> {
        let mv = Move::try_new(start, end, self.position.board())?;
        self.play(mv, promotion)
    }

    /// Plays a move given as "e2e4"
    pub fn play_notation(&mut self, notation: &str, promotion: Option<PieceKind>) -> RulesResult<GameStatus> {
        let mv = self.position.find_move(notation)?;
        self.play(mv, promotion)
    }

    /// Takes back the last move; `None` when nothing has been played
    pub fn undo(&mut self) -> Option<GameMove> {
        let record = self.position.undo_move()?;
        self.logger.log_undo(&record);
        Some(record)
    }

    pub fn save_log(&mut self, dir: &Path) -> RulesResult<PathBuf> {
        let reason = match self.status() {
            GameStatus::Checkmate(_) => "checkmate",
            GameStatus::Stalemate => "stalemate",
            _ => "game in progress",
        };
        self.logger.save_to_file(dir, reason)
    }
}
