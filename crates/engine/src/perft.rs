use crate::error::RulesResult;
use crate::{Move, PieceKind, Position, PROMOTION_KINDS};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }

    fn absorb(&mut self, other: &PerftResult) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passant += other.en_passant;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.checkmates += other.checkmates;
    }
}

#[derive(Debug)]
pub struct PerftTestCase {
    pub name: &'static str,
    pub fen: &'static str,
    pub expected_results: &'static [(u32, u64)], // (depth, expected_nodes)
}

// Reference positions without castling rights, since castling is not
// generated. Counts are the published perft values.
pub const PERFT_POSITIONS: &[PerftTestCase] = &[
    PerftTestCase {
        name: "Starting Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        expected_results: &[(1, 20), (2, 400), (3, 8_902), (4, 197_281), (5, 4_865_609)],
    },
    PerftTestCase {
        name: "Position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_results: &[
            (1, 14),
            (2, 191),
            (3, 2_812),
            (4, 43_238),
            (5, 674_624),
            (6, 11_030_083),
        ],
    },
    PerftTestCase {
        name: "Position 6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        expected_results: &[(1, 46), (2, 2_079), (3, 89_890), (4, 3_894_594)],
    },
];

/// Each promotion move stands for four distinct plies, one per piece
fn expansions(mv: &Move) -> Vec<Option<PieceKind>> {
    if mv.is_promotion {
        PROMOTION_KINDS.iter().copied().map(Some).collect()
    } else {
        vec![None]
    }
}

/// Main perft function - counts all legal move sequences to a given depth
pub fn perft(position: &mut Position, depth: u32) -> RulesResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let mut nodes = 0;
    for mv in position.legal_moves() {
        for promotion in expansions(&mv) {
            position.make_move(mv, promotion)?;
            nodes += if depth == 1 { 1 } else { perft(position, depth - 1)? };
            position.undo_move();
        }
    }
    Ok(nodes)
}

/// Detailed perft that tallies move types at the leaves
pub fn perft_detailed(position: &mut Position, depth: u32) -> RulesResult<PerftResult> {
    let start_time = Instant::now();
    let mut result = PerftResult::new();

    if depth == 0 {
        result.nodes = 1;
        return Ok(result);
    }

    for mv in position.legal_moves() {
        for promotion in expansions(&mv) {
            position.make_move(mv, promotion)?;

            if depth == 1 {
                result.nodes += 1;
                if mv.is_capture() {
                    result.captures += 1;
                }
                if mv.is_en_passant {
                    result.en_passant += 1;
                }
                if promotion.is_some() {
                    result.promotions += 1;
                }
                if position.in_check() {
                    result.checks += 1;
                    if position.legal_moves().is_empty() {
                        result.checkmates += 1;
                    }
                }
            } else {
                let sub_result = perft_detailed(position, depth - 1)?;
                result.absorb(&sub_result);
            }

            position.undo_move();
        }
    }

    result.time_ms = start_time.elapsed().as_millis();
    Ok(result)
}

/// Divide perft - per root move breakdown, largest subtree first
pub fn perft_divide(position: &mut Position, depth: u32) -> RulesResult<Vec<(String, u64)>> {
    let mut results = Vec::new();
    if depth == 0 {
        return Ok(results);
    }

    for mv in position.legal_moves() {
        for promotion in expansions(&mv) {
            position.make_move(mv, promotion)?;
            let nodes = perft(position, depth - 1)?;
            position.undo_move();

            let mut name = mv.to_algebraic();
            if let Some(kind) = promotion {
                name.push(kind.code().to_ascii_lowercase());
            }
            results.push((name, nodes));
        }
    }

    results.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(results)
}

/// Checks one reference position against its published counts up to
/// `max_depth`, printing a line per depth and stopping at the first miss
pub fn run_position_tests(test_case: &PerftTestCase, max_depth: Option<u32>) -> RulesResult<bool> {
    println!("{} [{}]", test_case.name, test_case.fen);
    let mut position = Position::from_fen(test_case.fen)?;

    for &(depth, expected) in test_case.expected_results {
        if max_depth.map_or(false, |max| depth > max) {
            break;
        }

        let start_time = Instant::now();
        let nodes = perft(&mut position, depth)?;
        let ok = nodes == expected;
        println!(
            "  depth {}: {} (expected {}) {:.3}s {}",
            depth,
            nodes,
            expected,
            start_time.elapsed().as_secs_f64(),
            if ok { "ok" } else { "MISMATCH" }
        );
        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Runs every reference position; returns (passed, total)
pub fn run_all_tests(max_depth: Option<u32>) -> RulesResult<(usize, usize)> {
    let mut passed = 0;
    for test_case in PERFT_POSITIONS {
        if run_position_tests(test_case, max_depth)? {
            passed += 1;
        }
    }
    Ok((passed, PERFT_POSITIONS.len()))
}
