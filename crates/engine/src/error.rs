//! Error types for the rules engine
//!
//! Covers board construction (piece codes, FEN), square parsing, and the
//! validated move entry points. Terminal game states are not errors; they
//! are reported through [`crate::GameStatus`].

use thiserror::Error;

/// Errors that can occur while building positions or applying moves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Coordinates outside the 8x8 board
    #[error("Invalid square: row {row}, column {col} (must be 0-7)")]
    InvalidSquare { row: i16, col: i16 },

    /// Unparseable algebraic square such as "z9"
    #[error("Invalid algebraic square: {0:?}")]
    InvalidAlgebraic(String),

    /// FEN does not have the expected number of fields
    #[error("Invalid FEN: expected 6 fields, found {found}")]
    FenFieldCount { found: usize },

    /// FEN piece placement is malformed
    #[error("Invalid FEN placement: {message}")]
    FenPlacement { message: String },

    /// FEN side-to-move field is neither "w" nor "b"
    #[error("Invalid FEN active color: {0:?}")]
    FenActiveColor(String),

    /// FEN en passant square does not follow a double pawn push
    #[error("Invalid FEN en passant square: {0}")]
    FenEnPassant(String),

    /// FEN move counters are not numbers
    #[error("Invalid FEN move counter: {0:?}")]
    FenCounter(String),

    /// Unknown piece letter or two-character piece code
    #[error("Unknown piece code: {0:?}")]
    UnknownPiece(String),

    /// Each side must have exactly one king
    #[error("Expected exactly one {color} king, found {found}")]
    KingCount { color: &'static str, found: usize },

    /// The player who just moved left their king attacked
    #[error("The side not to move ({color}) is in check")]
    OpponentInCheck { color: &'static str },

    /// Move is not in the current legal move set
    #[error("Illegal move: {notation}")]
    IllegalMove { notation: String },

    /// A promotion move was applied without choosing a piece
    #[error("Promotion move {notation} requires a promotion piece")]
    MissingPromotion { notation: String },

    /// Promotion choice is not queen, rook, bishop or knight, or the move
    /// is not a promotion at all
    #[error("Invalid promotion for move {notation}")]
    InvalidPromotion { notation: String },

    /// Writing the game log failed
    #[error("Failed to write game log: {message}")]
    LogIo { message: String },
}

/// Result type alias for rules engine operations
pub type RulesResult<T> = Result<T, RulesError>;
