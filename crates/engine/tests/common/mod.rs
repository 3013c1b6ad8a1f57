//! Shared helpers and reference positions for the integration tests

#![allow(dead_code)]

use chess_rules::{Move, Position, Square};

pub fn position(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| panic!("bad test FEN {:?}: {}", fen, e))
}

pub fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

/// Sorted "e2e4" strings, for order-independent comparisons
pub fn notations(moves: &[Move]) -> Vec<String> {
    let mut list: Vec<String> = moves.iter().map(|mv| mv.to_algebraic()).collect();
    list.sort();
    list
}

pub fn moves_from(position: &Position, square: &str) -> Vec<Move> {
    let start = sq(square);
    position
        .legal_moves()
        .into_iter()
        .filter(|mv| mv.start == start)
        .collect()
}

/// Plays a list of "e2e4" moves, none of them promotions
pub fn play(position: &mut Position, moves: &[&str]) {
    for notation in moves {
        let mv = position.find_move(notation).unwrap();
        position.make_move(mv, None).unwrap();
    }
}

pub mod positions {
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";
    pub const STARTING_BLACK: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b - - 0 1";
    pub const ROOK_PIN: &str = "k3r3/8/8/8/8/8/4R3/4K3 w - - 0 1";
    pub const QUEEN_CHECK: &str = "4k3/6n1/2b5/8/4Q3/8/8/7K b - - 0 1";
    pub const DOUBLE_CHECK: &str = "4k3/8/r2N4/8/8/8/8/4R2K b - - 0 1";
    pub const STALEMATE: &str = "k7/1R6/K7/8/8/8/8/8 b - - 0 1";
    pub const PROMOTION: &str = "8/P6k/8/8/8/8/8/K7 w - - 0 1";
    pub const EN_PASSANT_DISCOVERED: &str = "7k/8/8/KPp4r/8/8/8/8 w - c6 0 1";
    pub const EN_PASSANT_ALONG_PIN: &str = "7k/5b2/8/3Pp3/2K5/8/8/8 w - e6 0 1";
    pub const EN_PASSANT_OFF_PIN: &str = "1b5k/8/8/4Pp2/8/8/7K/8 w - f6 0 1";
    pub const EN_PASSANT_EVADES_CHECK: &str = "8/8/8/4k3/3Pp3/8/8/4K3 b - d3 0 1";
    pub const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    pub const POSITION_6: &str =
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";
}
