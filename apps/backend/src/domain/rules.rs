//! Win evaluation over the fixed 3x3 lines.

use std::collections::HashSet;

use crate::domain::state::{Move, Symbol};

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WINNING_LINES: [[(u8, u8); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Returns the symbol that has completed a line, if any.
///
/// Pure and deterministic. X is checked before O; if a caller bug ever
/// produced a board where both symbols hold a line, X is reported. That
/// tie-break is part of the observable contract.
pub fn evaluate(moves: &[Move]) -> Option<Symbol> {
    let positions = |symbol: Symbol| -> HashSet<(u8, u8)> {
        moves
            .iter()
            .filter(|m| m.symbol == symbol)
            .map(|m| (m.cell.row(), m.cell.col()))
            .collect()
    };

    for symbol in [Symbol::X, Symbol::O] {
        let held = positions(symbol);
        if WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|pos| held.contains(pos)))
        {
            return Some(symbol);
        }
    }
    None
}
