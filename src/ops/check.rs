// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-square answer checking.
//!
//! A square is graded when autocheck is on or a one-shot check was requested,
//! and it has input. Verified squares are final and never re-graded; turning
//! autocheck off leaves existing marks in place.

use crate::model::Game;

/// Outcome of grading one square's input against its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Verified,
    Partial,
    Incorrect,
}

/// Grades `input` against `answer`, ASCII case-insensitively.
///
/// Rebus answers require full-string equality to verify; a matching first
/// character alone downgrades to `Partial`.
pub fn grade(input: &str, answer: &str) -> CheckOutcome {
    if input.eq_ignore_ascii_case(answer) {
        return CheckOutcome::Verified;
    }
    let first_input = input.chars().next();
    let first_answer = answer.chars().next();
    match (first_input, first_answer) {
        (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => CheckOutcome::Partial,
        _ => CheckOutcome::Incorrect,
    }
}

/// Runs the checking pass over the whole board, consuming one-shot `check`
/// flags. Called after every applied action.
pub(crate) fn evaluate_checks(game: &mut Game) {
    let autocheck = game.autocheck();
    let (grid, board) = game.grid_and_board_mut();

    for (square, cell) in grid.squares().iter().zip(board.cells_mut()) {
        if !square.is_playable {
            cell.check = false;
            continue;
        }
        if cell.verified || cell.input.is_empty() || !(autocheck || cell.check) {
            cell.check = false;
            continue;
        }

        match grade(&cell.input, &square.answer) {
            CheckOutcome::Verified => {
                cell.verified = true;
                cell.incorrect = false;
                cell.partial = false;
            }
            CheckOutcome::Partial => {
                cell.partial = true;
                cell.incorrect = false;
            }
            CheckOutcome::Incorrect => {
                cell.incorrect = true;
                cell.partial = false;
            }
        }
        cell.check = false;
    }
}
