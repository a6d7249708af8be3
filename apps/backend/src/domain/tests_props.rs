//! Property tests for the state machine and win evaluator (pure domain).

use proptest::prelude::*;
use uuid::Uuid;

use crate::domain::rules::{self, WINNING_LINES};
use crate::domain::state::{Cell, GameStatus, Move, Symbol, BOARD_CELLS};
use crate::domain::transitions::{apply_move, join_game, new_game};

fn board_cells() -> Vec<(u8, u8)> {
    (0u8..3)
        .flat_map(|row| (0u8..3).map(move |col| (row, col)))
        .collect()
}

proptest! {
    /// For any prefix of any ordering of the 9 cells, played with correct
    /// alternation: the turn is X after an even number of moves and O after
    /// an odd number until termination, a game never exceeds 9 moves, and
    /// status is Finished exactly when a winner exists or the board is full.
    #[test]
    fn prop_alternation_and_termination(
        order in Just(board_cells()).prop_shuffle(),
        len in 0usize..=BOARD_CELLS,
    ) {
        let mut game = new_game();
        let x = join_game(&mut game, "alice").unwrap();
        let o = join_game(&mut game, "bob").unwrap();

        for &(row, col) in order.iter().take(len) {
            if game.status == GameStatus::Finished {
                break;
            }

            let expected = if game.moves.len() % 2 == 0 { Symbol::X } else { Symbol::O };
            prop_assert_eq!(game.next_turn, Some(expected));

            let actor = if expected == Symbol::X { &x } else { &o };
            apply_move(&mut game, actor, Cell::new(row, col).unwrap()).unwrap();
        }

        prop_assert!(game.moves.len() <= BOARD_CELLS);

        let finished = game.status == GameStatus::Finished;
        let has_winner = game.winner.is_some();
        let board_full = game.moves.len() == BOARD_CELLS;
        prop_assert_eq!(finished, has_winner || board_full);
        if finished {
            prop_assert_eq!(game.next_turn, None);
        } else {
            prop_assert!(game.next_turn.is_some());
            prop_assert_eq!(game.winner, None);
        }

        // No duplicate cells ever accepted.
        let mut seen = std::collections::HashSet::new();
        for m in &game.moves {
            prop_assert!(seen.insert((m.cell.row(), m.cell.col())));
        }
    }

    /// A move set containing exactly one winning triple for one symbol
    /// yields that symbol.
    #[test]
    fn prop_each_line_wins_alone(
        line_idx in 0usize..WINNING_LINES.len(),
        symbol in prop_oneof![Just(Symbol::X), Just(Symbol::O)],
    ) {
        let game_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();
        let moves: Vec<Move> = WINNING_LINES[line_idx]
            .iter()
            .map(|&(row, col)| Move {
                move_id: Uuid::new_v4(),
                game_id,
                player_id,
                symbol,
                cell: Cell::new(row, col).unwrap(),
                moved_at: time::OffsetDateTime::now_utc(),
            })
            .collect();

        prop_assert_eq!(rules::evaluate(&moves), Some(symbol));
    }

    /// Any two cells of a line do not win.
    #[test]
    fn prop_two_cells_never_win(
        line_idx in 0usize..WINNING_LINES.len(),
        drop_idx in 0usize..3,
    ) {
        let game_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();
        let moves: Vec<Move> = WINNING_LINES[line_idx]
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != drop_idx)
            .map(|(_, &(row, col))| Move {
                move_id: Uuid::new_v4(),
                game_id,
                player_id,
                symbol: Symbol::X,
                cell: Cell::new(row, col).unwrap(),
                moved_at: time::OffsetDateTime::now_utc(),
            })
            .collect();

        prop_assert_eq!(rules::evaluate(&moves), None);
    }
}
