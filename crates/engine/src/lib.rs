pub mod board;
pub mod error;
pub mod game;
pub mod logger;
pub mod moves;
pub mod perft;
pub mod position;
pub mod types;

pub use board::Board;
pub use error::{RulesError, RulesResult};
pub use game::Game;
pub use logger::ChessLogger;
pub use moves::{GameMove, Move};
pub use position::{PinsAndChecks, Position, Ray};
pub use types::*;
