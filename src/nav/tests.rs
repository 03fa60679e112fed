// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use proptest::prelude::*;
use rstest::rstest;

use super::{JumpDirection, Navigator};
use crate::model::{Board, Orientation};
use crate::puzzle::{compile, fixtures, CompiledPuzzle};

fn mini() -> CompiledPuzzle {
    compile(&fixtures::mini_5x5()).expect("compile mini")
}

fn open() -> CompiledPuzzle {
    compile(&fixtures::open_15x15()).expect("compile open")
}

#[rstest]
#[case(Orientation::Across, 3, 1)]
#[case(Orientation::Across, 1, 1)]
#[case(Orientation::Across, 23, 20)]
#[case(Orientation::Down, 21, 1)]
#[case(Orientation::Down, 2, 2)]
#[case(Orientation::Down, 15, 5)]
fn word_start_walks_to_the_head(
    #[case] orientation: Orientation,
    #[case] index: usize,
    #[case] expected: usize,
) {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    assert_eq!(nav.word_start(index, orientation), expected);
}

#[rstest]
#[case(Orientation::Across, 1, 4)]
#[case(Orientation::Across, 20, 23)]
#[case(Orientation::Down, 1, 21)]
#[case(Orientation::Down, 4, 19)]
#[case(Orientation::Down, 5, 20)]
fn word_end_stops_before_blocks_and_edges(
    #[case] orientation: Orientation,
    #[case] index: usize,
    #[case] expected: usize,
) {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    assert_eq!(nav.word_end(index, orientation), expected);
}

#[test]
fn word_boundaries_are_total_on_block_squares() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    // The corner blocks have no word to back off into.
    assert_eq!(nav.word_end(0, Orientation::Across), 0);
    assert_eq!(nav.word_end(0, Orientation::Down), 0);
    assert_eq!(nav.word_end(24, Orientation::Across), 23);
    assert_eq!(nav.focused_word(0, Orientation::Across).as_slice(), &[0]);
}

#[test]
fn focused_word_lists_squares_in_order() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    assert_eq!(
        nav.focused_word(7, Orientation::Across).as_slice(),
        &[5, 6, 7, 8, 9]
    );
    assert_eq!(
        nav.focused_word(12, Orientation::Down).as_slice(),
        &[2, 7, 12, 17, 22]
    );
}

#[test]
fn next_and_prev_word_follow_the_clue_chain() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);

    assert_eq!(nav.next_word(1, Orientation::Across), 5);
    assert_eq!(nav.next_word(5, Orientation::Across), 10);
    assert_eq!(nav.prev_word(10, Orientation::Across), 5);

    // Ends of the chain fall back to the word itself.
    assert_eq!(nav.prev_word(3, Orientation::Across), 1);
    assert_eq!(nav.next_word(21, Orientation::Across), 23);
}

#[test]
fn last_clue_square_is_only_the_final_cell() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    assert!(nav.is_last_clue_square(23, Orientation::Across));
    assert!(!nav.is_last_clue_square(22, Orientation::Across));
    assert!(!nav.is_last_clue_square(4, Orientation::Across));
    assert!(nav.is_last_clue_square(20, Orientation::Down));
}

#[test]
fn empty_word_scan_starts_at_the_cursor() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let board = Board::new(compiled.grid.len());
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 2, false, false, 1),
        2
    );
}

#[test]
fn filled_squares_are_skipped_and_the_scan_wraps() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    board.cell_mut(3).unwrap().input = "X".to_owned();
    board.cell_mut(4).unwrap().input = "Y".to_owned();
    // Forward scan from 3 finds nothing until the wrap lands on 1.
    board.cell_mut(2).unwrap().input = "Z".to_owned();
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 3, false, false, 1),
        1
    );
}

#[test]
fn full_word_advances_into_the_next_word() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    for id in 1..=4 {
        board.cell_mut(id).unwrap().input = "A".to_owned();
    }
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 1, false, false, 1),
        5
    );
}

#[test]
fn previous_flag_walks_the_chain_backwards() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    for id in 10..=14 {
        board.cell_mut(id).unwrap().input = "A".to_owned();
    }
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 10, false, true, 1),
        5
    );
}

#[test]
fn verified_empty_squares_are_not_landing_spots() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    board.cell_mut(1).unwrap().verified = true;
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 1, false, false, 1),
        2
    );
}

#[test]
fn fully_filled_board_terminates_at_default_focus() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    for cell in board.cells_mut() {
        cell.input = "A".to_owned();
    }
    let default_focus = compiled.clues.default_focus();
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 5, false, false, default_focus),
        default_focus
    );
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Down, 2, false, true, default_focus),
        default_focus
    );
}

#[test]
fn a_full_final_word_exhausts_to_default_focus() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    for id in 20..=23 {
        board.cell_mut(id).unwrap().input = "A".to_owned();
    }
    // The chain ends at 8-Across; with that word full the forward walk has
    // nowhere left to go and settles on the default focus.
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 20, false, false, 1),
        1
    );
}

#[test]
fn last_clue_square_never_advances_forward() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let board = Board::new(compiled.grid.len());
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 23, false, false, 1),
        23
    );
}

#[test]
fn overwrite_mode_steps_over_filled_squares() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    board.cell_mut(2).unwrap().input = "A".to_owned();
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 1, true, false, 1),
        2
    );
}

#[test]
fn overwrite_mode_skips_verified_to_the_next_word() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    board.cell_mut(4).unwrap().verified = true;
    assert_eq!(
        nav.next_empty_square(&board, Orientation::Across, 3, true, false, 1),
        5
    );
}

#[rstest]
#[case(5, 4)]
#[case(1, 0)]
#[case(10, 9)]
fn across_backspace_steps_left_without_a_row_guard(
    #[case] index: usize,
    #[case] expected: usize,
) {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    assert_eq!(nav.backspace_target(index, Orientation::Across), expected);
}

#[test]
fn down_backspace_steps_up_or_jumps_to_previous_word_end() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    // Mid-word: one row up.
    assert_eq!(nav.backspace_target(12, Orientation::Down), 7);
    // At a word head: previous word's end (4-Down bottoms out at 19).
    assert_eq!(nav.backspace_target(5, Orientation::Down), 19);
}

#[test]
fn jump_lands_on_the_first_fillable_square() {
    let compiled = mini();
    let nav = Navigator::new(&compiled.grid, &compiled.clues);
    let mut board = Board::new(compiled.grid.len());
    board.cell_mut(5).unwrap().input = "A".to_owned();
    assert_eq!(
        nav.jump_to_word(&board, Orientation::Across, 1, JumpDirection::Next, 1),
        6
    );
    assert_eq!(
        nav.jump_to_word(&board, Orientation::Across, 10, JumpDirection::Prev, 1),
        6
    );
}

#[test]
fn chain_walk_visits_every_word_once() {
    for compiled in [mini(), open()] {
        for orientation in [Orientation::Across, Orientation::Down] {
            let entries = compiled.clues.entries(orientation);
            let mut grid_num = compiled
                .clues
                .first_grid_num(orientation)
                .expect("non-empty chain");
            let mut seen = vec![grid_num];
            while let Some(next) = entries[&grid_num].next_grid_num {
                grid_num = next;
                seen.push(grid_num);
            }
            assert_eq!(seen.len(), entries.len());
            assert!(entries[&grid_num].is_last_clue);

            let chain_heads = entries
                .values()
                .filter(|entry| entry.prev_grid_num.is_none())
                .count();
            assert_eq!(chain_heads, 1);
        }
    }
}

proptest! {
    #[test]
    fn boundaries_agree_on_the_same_word(index in 0usize..225, down in any::<bool>()) {
        let compiled = open();
        let nav = Navigator::new(&compiled.grid, &compiled.clues);
        let orientation = if down { Orientation::Down } else { Orientation::Across };
        prop_assume!(compiled.grid.square(index).unwrap().is_playable);

        let end = nav.word_end(index, orientation);
        prop_assert_eq!(
            nav.word_start(end, orientation),
            nav.word_start(index, orientation)
        );
    }

    #[test]
    fn word_start_is_idempotent(index in 0usize..225, down in any::<bool>()) {
        let compiled = open();
        let nav = Navigator::new(&compiled.grid, &compiled.clues);
        let orientation = if down { Orientation::Down } else { Orientation::Across };
        prop_assume!(compiled.grid.square(index).unwrap().is_playable);

        let start = nav.word_start(index, orientation);
        prop_assert_eq!(nav.word_start(start, orientation), start);
    }

    #[test]
    fn next_empty_square_stays_on_playable_squares(
        index in 0usize..225,
        filled in proptest::collection::vec(any::<bool>(), 225),
        down in any::<bool>(),
        overwrite in any::<bool>(),
        previous in any::<bool>(),
    ) {
        let compiled = open();
        let nav = Navigator::new(&compiled.grid, &compiled.clues);
        let orientation = if down { Orientation::Down } else { Orientation::Across };
        prop_assume!(compiled.grid.square(index).unwrap().is_playable);

        let mut board = Board::new(compiled.grid.len());
        for (id, fill) in filled.iter().enumerate() {
            if *fill {
                board.cell_mut(id).unwrap().input = "A".to_owned();
            }
        }

        let default_focus = compiled.clues.default_focus();
        let landed = nav.next_empty_square(
            &board,
            orientation,
            index,
            overwrite,
            previous,
            default_focus,
        );
        prop_assert!(compiled.grid.square(landed).unwrap().is_playable);
    }
}
