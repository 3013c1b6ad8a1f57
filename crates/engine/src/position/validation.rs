use crate::board::Board;
use crate::moves::Move;
use crate::types::*;
use super::Position;

/// A piece found on a line out of the king: the square it stands on and
/// the direction (from the king) it was found in. For knight checks the
/// direction is the knight offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ray {
    pub square: Square,
    pub direction: Direction,
}

/// Check and pin information for one side, valid only for the board it
/// was computed from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinsAndChecks {
    pub in_check: bool,
    pub pins: Vec<Ray>,
    pub checks: Vec<Ray>,
}

impl PinsAndChecks {
    /// Direction of the pin holding the piece on `square`, if any
    pub fn pin_direction(&self, square: Square) -> Option<Direction> {
        self.pins.iter().find(|pin| pin.square == square).map(|pin| pin.direction)
    }

    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }
}

/// Sweeps the eight rays and the knight offsets around `king` for pieces
/// attacking it or pinning a `color` piece to it. `king` need not actually
/// hold a king, which lets callers probe hypothetical squares.
pub(crate) fn scan(board: &Board, king: Square, color: Color) -> PinsAndChecks {
    let mut result = PinsAndChecks::default();

    for (j, &dir) in ALL_DIRECTIONS.iter().enumerate() {
        let orthogonal = j < 4;
        let mut candidate: Option<Ray> = None;

        for i in 1..8 {
            let Some(square) = king.offset(dir, i) else {
                break;
            };
            let Some(piece) = board.get(square) else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if candidate.is_none() {
                    candidate = Some(Ray { square, direction: dir });
                } else {
                    break; // two friendly pieces, nothing gets through
                }
            } else {
                if attacks_along(piece.kind, orthogonal, i, dir, color) {
                    match candidate {
                        None => {
                            result.in_check = true;
                            result.checks.push(Ray { square, direction: dir });
                        }
                        Some(pin) => result.pins.push(pin),
                    }
                }
                break;
            }
        }
    }

    let enemy_knight = Piece::new(color.opponent(), PieceKind::Knight);
    for &offset in &KNIGHT_OFFSETS {
        if let Some(square) = king.offset(offset, 1) {
            if board.get(square) == Some(enemy_knight) {
                result.in_check = true;
                result.checks.push(Ray { square, direction: offset });
            }
        }
    }

    result
}

/// Whether an enemy `kind` found `distance` steps along `dir` from a
/// `color` king attacks it
fn attacks_along(kind: PieceKind, orthogonal: bool, distance: i8, dir: Direction, color: Color) -> bool {
    match kind {
        PieceKind::Rook => orthogonal,
        PieceKind::Bishop => !orthogonal,
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // Enemy pawns attack from the side the king is advancing towards
        PieceKind::Pawn => distance == 1 && !orthogonal && dir.0 == color.pawn_direction(),
        PieceKind::Knight => false,
    }
}

impl Position {
    /// Checks and pins against the side to move
    pub fn check_for_pins_and_checks(&self) -> PinsAndChecks {
        let color = self.side_to_move;
        let result = scan(&self.board, self.king_square(color), color);
        if result.is_double_check() {
            log::debug!(
                "double check on {} king at {}",
                color.name(),
                self.king_square(color)
            );
        }
        result
    }

    pub fn in_check(&self) -> bool {
        self.check_for_pins_and_checks().in_check
    }

    /// Whether `square` is attacked by the opponent of `color` on the
    /// current board
    pub fn is_square_attacked(&self, square: Square, color: Color) -> bool {
        scan(&self.board, square, color).in_check
    }

    /// Plays `mv` on a scratch copy of the board and tests whether the
    /// mover's king is attacked afterwards. The position itself is never
    /// touched.
    pub fn is_safe_after(&self, mv: &Move) -> bool {
        let color = mv.piece_moved.color;
        let mut scratch = self.board;
        scratch.set(mv.start, None);
        scratch.set(mv.end, Some(mv.piece_moved));
        if mv.is_en_passant {
            scratch.set(Square::new(mv.start.row(), mv.end.col()), None);
        }

        let king = if mv.piece_moved.is_kind(PieceKind::King) {
            mv.end
        } else {
            self.king_square(color)
        };
        !scan(&scratch, king, color).in_check
    }

    /// Squares a non-king move may land on to answer a single check: the
    /// checker's own square, plus the squares between it and the king when
    /// the checker slides.
    pub fn blocking_squares(&self, check: Ray) -> Vec<Square> {
        let checker = self.board.get(check.square);
        if matches!(checker, Some(piece) if piece.is_kind(PieceKind::Knight)) {
            return vec![check.square];
        }

        let king = self.king_square(self.side_to_move);
        let mut squares = Vec::new();
        for i in 1..8 {
            let Some(square) = king.offset(check.direction, i) else {
                break;
            };
            squares.push(square);
            if square == check.square {
                break;
            }
        }
        squares
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

    #[test]
    fn test_starting_position_has_no_pins_or_checks() {
        let result = Position::new().check_for_pins_and_checks();
        assert_eq!(result, PinsAndChecks::default());
    }

    #[test]
    fn test_rook_pin_on_file() {
        let pos = position("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let result = pos.check_for_pins_and_checks();
        assert!(!result.in_check);
        assert_eq!(result.pins, vec![Ray { square: sq("e2"), direction: (-1, 0) }]);
        assert_eq!(result.pin_direction(sq("e2")), Some((-1, 0)));
    }

    #[test]
    fn test_two_blockers_mean_no_pin() {
        let pos = position("4r2k/8/8/8/4N3/8/4R3/4K3 w - - 0 1");
        let result = pos.check_for_pins_and_checks();
        assert!(result.pins.is_empty());
        assert!(!result.in_check);
    }

    #[test]
    fn test_enemy_piece_that_cannot_attack_blocks_ray() {
        // Black knight on e4 shields the king from the rook on e8
        let pos = position("4r2k/8/8/8/4n3/8/8/4K3 w - - 0 1");
        assert!(!pos.in_check());
    }

    #[test]
    fn test_pawn_check_direction() {
        // Black pawn on d2 attacks e1; a pawn on d1 beside it would not
        let pos = position("7k/8/8/8/8/8/3p4/4K3 w - - 0 1");
        let result = pos.check_for_pins_and_checks();
        assert_eq!(result.checks, vec![Ray { square: sq("d2"), direction: (-1, -1) }]);

        // A black pawn behind the white king does not give check
        let pos = position("7k/8/8/8/8/8/4K3/3p4 w - - 0 1");
        assert!(!pos.in_check());
    }

    #[test]
    fn test_knight_and_slider_double_check() {
        let pos = position("4r2k/8/8/8/8/3n4/8/4K3 w - - 0 1");
        let result = pos.check_for_pins_and_checks();
        assert!(result.in_check);
        assert!(result.is_double_check());
        assert_eq!(result.checks.len(), 2);
    }

    #[test]
    fn test_blocking_squares_for_slider_and_knight() {
        let pos = position("4r2k/8/8/8/8/8/8/4K3 w - - 0 1");
        let check = pos.check_for_pins_and_checks().checks[0];
        let squares = pos.blocking_squares(check);
        assert_eq!(squares.len(), 7);
        assert_eq!(squares.first(), Some(&sq("e2")));
        assert_eq!(squares.last(), Some(&sq("e8")));

        let pos = position("7k/8/8/8/8/3n4/8/4K3 w - - 0 1");
        let check = pos.check_for_pins_and_checks().checks[0];
        assert_eq!(pos.blocking_squares(check), vec![sq("d3")]);
    }

    #[test]
    fn test_king_cannot_step_back_along_check_ray() {
        let pos = position("4r2k/8/8/8/8/8/4K3/8 w - - 0 1");
        let board = pos.board();
        let retreat = Move::new(sq("e2"), sq("e1"), board);
        let sidestep = Move::new(sq("e2"), sq("d1"), board);
        assert!(!pos.is_safe_after(&retreat));
        assert!(pos.is_safe_after(&sidestep));
        assert_eq!(pos, position("4r2k/8/8/8/8/8/4K3/8 w - - 0 1"));
    }
}
