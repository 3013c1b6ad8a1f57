use crate::moves::Move;
use crate::types::*;
use super::{PinsAndChecks, Position};

/// Whether a piece pinned along `pin` may move in direction `dir`: only
/// along the pin axis, towards the pinner or back towards the king.
fn along_pin(pin: Option<Direction>, dir: Direction) -> bool {
    match pin {
        None => true,
        Some(pin) => pin == dir || pin == (-dir.0, -dir.1),
    }
}

impl Position {
    /// Generate all legal moves for the side to move, in generation order
    pub fn legal_moves(&self) -> Vec<Move> {
        let pins_and_checks = self.check_for_pins_and_checks();
        let king = self.king_square(self.side_to_move);

        let moves: Vec<Move> = match pins_and_checks.checks.as_slice() {
            [] => self
                .pseudo_legal_moves(&pins_and_checks)
                .into_iter()
                .filter(|mv| !self.needs_simulation(mv) || self.is_safe_after(mv))
                .collect(),
            [check] => {
                let targets = self.blocking_squares(*check);
                self.pseudo_legal_moves(&pins_and_checks)
                    .into_iter()
                    .filter(|mv| {
                        if self.needs_simulation(mv) {
                            self.is_safe_after(mv)
                        } else {
                            targets.contains(&mv.end)
                        }
                    })
                    .collect()
            }
            _ => {
                // Double check: nothing can block or capture both checkers
                let mut king_moves = Vec::new();
                self.king_moves(king, &mut king_moves);
                king_moves.retain(|mv| self.is_safe_after(mv));
                king_moves
            }
        };

        log::trace!(
            "{} legal moves for {} ({} checks, {} pins)",
            moves.len(),
            self.side_to_move.name(),
            pins_and_checks.checks.len(),
            pins_and_checks.pins.len()
        );
        moves
    }

    /// Legal moves together with the classification they imply
    pub fn legal_moves_and_status(&self) -> (Vec<Move>, GameStatus) {
        let moves = self.legal_moves();
        let side = self.side_to_move;
        let status = match (self.in_check(), moves.is_empty()) {
            (true, true) => GameStatus::Checkmate(side),
            (false, true) => GameStatus::Stalemate,
            (true, false) => GameStatus::Check(side),
            (false, false) => GameStatus::InProgress,
        };
        (moves, status)
    }

    pub fn status(&self) -> GameStatus {
        self.legal_moves_and_status().1
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.status(), GameStatus::Checkmate(_))
    }

    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }

    /// King moves change what blocks what, and en passant removes two
    /// pieces from one row; neither is covered by the pin sweep.
    fn needs_simulation(&self, mv: &Move) -> bool {
        mv.piece_moved.is_kind(PieceKind::King) || mv.is_en_passant
    }

    /// Moves obeying piece movement rules for the side to move. Pieces
    /// listed as pinned in `pins` only move along their pin axis; pass
    /// `PinsAndChecks::default()` for unrestricted generation.
    pub fn pseudo_legal_moves(&self, pins: &PinsAndChecks) -> Vec<Move> {
        let mut moves = Vec::new();
        for square in Square::all() {
            let Some(piece) = self.board.get(square) else {
                continue;
            };
            if piece.color != self.side_to_move {
                continue;
            }

            let pin = pins.pin_direction(square);
            match piece.kind {
                PieceKind::Pawn => self.pawn_moves(square, piece.color, pin, &mut moves),
                PieceKind::Knight => self.knight_moves(square, piece.color, pin, &mut moves),
                PieceKind::Bishop => self.sliding_moves(square, piece.color, &DIAGONAL, pin, &mut moves),
                PieceKind::Rook => self.sliding_moves(square, piece.color, &ORTHOGONAL, pin, &mut moves),
                PieceKind::Queen => {
                    self.sliding_moves(square, piece.color, &ORTHOGONAL, pin, &mut moves);
                    self.sliding_moves(square, piece.color, &DIAGONAL, pin, &mut moves);
                }
                PieceKind::King => self.king_moves(square, &mut moves),
            }
        }
        moves
    }

    fn pawn_moves(&self, square: Square, color: Color, pin: Option<Direction>, moves: &mut Vec<Move>) {
        let forward = color.pawn_direction();
        let push = (forward, 0);

        if along_pin(pin, push) {
            if let Some(one) = square.offset(push, 1) {
                if self.board.is_empty(one) {
                    moves.push(Move::new(square, one, &self.board));
                    // Two steps only from the start row, through an empty square
                    if square.row() == color.pawn_start_row() {
                        if let Some(two) = square.offset(push, 2) {
                            if self.board.is_empty(two) {
                                moves.push(Move::new(square, two, &self.board));
                            }
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let dir = (forward, side);
            if !along_pin(pin, dir) {
                continue;
            }
            let Some(target) = square.offset(dir, 1) else {
                continue;
            };
            if self.board.is_color(target, color.opponent()) {
                moves.push(Move::new(square, target, &self.board));
            } else if self.en_passant == Some(target) {
                moves.push(Move::en_passant(square, target, &self.board));
            }
        }
    }

    fn knight_moves(&self, square: Square, color: Color, pin: Option<Direction>, moves: &mut Vec<Move>) {
        // No knight jump stays on a line through its square
        if pin.is_some() {
            return;
        }
        for &offset in &KNIGHT_OFFSETS {
            if let Some(target) = square.offset(offset, 1) {
                if !self.board.is_color(target, color) {
                    moves.push(Move::new(square, target, &self.board));
                }
            }
        }
    }

    fn sliding_moves(
        &self,
        square: Square,
        color: Color,
        directions: &[Direction],
        pin: Option<Direction>,
        moves: &mut Vec<Move>,
    ) {
        for &dir in directions {
            if !along_pin(pin, dir) {
                continue;
            }
            for distance in 1..8 {
                let Some(target) = square.offset(dir, distance) else {
                    break; // Off the board
                };
                match self.board.get(target) {
                    None => moves.push(Move::new(square, target, &self.board)),
                    Some(piece) if piece.color != color => {
                        moves.push(Move::new(square, target, &self.board));
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
    }

    /// Adjacent squares not held by an ally. Safety is checked by the
    /// caller; castling is not generated.
    fn king_moves(&self, square: Square, moves: &mut Vec<Move>) {
        let Some(king) = self.board.get(square) else {
            return;
        };
        for &offset in &KING_OFFSETS {
            if let Some(target) = square.offset(offset, 1) {
                if !self.board.is_color(target, king.color) {
                    moves.push(Move::new(square, target, &self.board));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    fn notations(moves: &[Move]) -> Vec<String> {
        let mut list: Vec<String> = moves.iter().map(|mv| mv.to_algebraic()).collect();
        list.sort();
        list
    }

    #[test]
    fn test_initial_position_has_twenty_moves() {
        let pos = Position::new();
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_generation_order_is_row_major() {
        let moves = Position::new().legal_moves();
        // a2 pawn comes before any knight on row 7
        assert_eq!(moves[0].to_algebraic(), "a2a3");
        assert_eq!(moves[1].to_algebraic(), "a2a4");
        assert_eq!(moves[16].to_algebraic(), "b1a3");
    }

    #[test]
    fn test_pinned_bishop_cannot_leave_diagonal() {
        // Bishop on d2 pinned by the b4 bishop may only slide along b4-e1
        let pos = position("7k/8/8/8/1b6/8/3B4/4K3 w - - 0 1");
        let bishop: Vec<Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.start == sq("d2"))
            .collect();
        assert_eq!(notations(&bishop), vec!["d2b4", "d2c3"]);
    }

    #[test]
    fn test_pinned_knight_is_frozen() {
        let pos = position("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(pos.legal_moves().iter().all(|mv| mv.start != sq("e2")));
    }

    #[test]
    fn test_pinned_pawn_captures_its_pinner() {
        // Pawn on e2 pinned diagonally by the f3 bishop can only take it
        let pos = position("7k/8/8/8/8/5b2/4P3/3K4 w - - 0 1");
        let pawn: Vec<Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.start == sq("e2"))
            .collect();
        assert_eq!(notations(&pawn), vec!["e2f3"]);
    }

    #[test]
    fn test_knight_check_cannot_be_blocked() {
        // Only king moves or capturing the f3 knight answer the check
        let pos = position("7k/8/8/8/8/5n2/8/R3K3 w - - 0 1");
        let moves = pos.legal_moves();
        assert!(moves
            .iter()
            .all(|mv| mv.piece_moved.is_kind(PieceKind::King) || mv.end == sq("f3")));
        assert!(moves.iter().all(|mv| mv.start != sq("a1")));
        assert_eq!(pos.status(), GameStatus::Check(Color::White));
    }

    #[test]
    fn test_king_does_not_walk_into_pawn_attack() {
        let pos = position("7k/8/8/8/3p4/8/4K3/8 w - - 0 1");
        let king_moves = notations(&pos.legal_moves());
        assert!(!king_moves.contains(&"e2e3".to_string()));
        assert_eq!(
            king_moves,
            vec!["e2d1", "e2d2", "e2d3", "e2e1", "e2f1", "e2f2", "e2f3"]
        );
    }

    #[test]
    fn test_kings_keep_their_distance() {
        let pos = position("8/8/8/3k4/8/3K4/8/8 w - - 0 1");
        let moves = notations(&pos.legal_moves());
        assert_eq!(moves, vec!["d3c2", "d3c3", "d3d2", "d3e2", "d3e3"]);
    }

    #[test]
    fn test_double_pawn_push_blocked() {
        let pos = position("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(pos.legal_moves().iter().all(|mv| mv.start != sq("e2")));
        let pos = position("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        let pawn: Vec<Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.start == sq("e2"))
            .collect();
        assert_eq!(notations(&pawn), vec!["e2e3"]);
    }

    #[test]
    fn test_unrestricted_pseudo_legal_ignores_pins() {
        let pos = position("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let pins = pos.check_for_pins_and_checks();
        let free = pos.pseudo_legal_moves(&PinsAndChecks::default());
        let pinned = pos.pseudo_legal_moves(&pins);
        assert!(free.iter().any(|mv| mv.start == sq("e2")));
        assert!(pinned.iter().all(|mv| mv.start != sq("e2")));
    }
}
