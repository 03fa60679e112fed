// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Named mutation actions over the shared game state.
//!
//! Every board mutation, local or replayed from a remote client, flows
//! through [`apply_action`]. The closed `Action` enum replaces dispatch by
//! action-name string: an unhandled action is a compile error, and each
//! variant maps to exactly one handler arm.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ClientId, Game};

pub mod check;

pub use check::{grade, CheckOutcome};

/// One named, replayable mutation of a `Game`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Action {
    /// Overwrites one square's input. Only moves focus indirectly: when
    /// `advance_cursor` is set the game's monotonic counter bumps, and the
    /// cursor engine reacts to the transition.
    ChangeInput {
        id: usize,
        value: String,
        penciled: bool,
        source: ClientId,
        #[serde(default)]
        advance_cursor: bool,
    },
    CheckSquare {
        id: usize,
    },
    CheckWord {
        ids: Vec<usize>,
    },
    CheckPuzzle,
    RevealSquare {
        id: usize,
    },
    RevealWord {
        ids: Vec<usize>,
    },
    RevealPuzzle,
    ResetGame,
    ToggleAutocheck,
}

impl Action {
    /// Stable label recorded as `Game::most_recent_action`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ChangeInput { .. } => "change-input",
            Self::CheckSquare { .. } => "check-square",
            Self::CheckWord { .. } => "check-word",
            Self::CheckPuzzle => "check-puzzle",
            Self::RevealSquare { .. } => "reveal-square",
            Self::RevealWord { .. } => "reveal-word",
            Self::RevealPuzzle => "reveal-puzzle",
            Self::ResetGame => "reset-game",
            Self::ToggleAutocheck => "toggle-autocheck",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    SquareOutOfBounds { id: usize, len: usize },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SquareOutOfBounds { id, len } => {
                write!(f, "square {id} out of bounds for board of {len} cells")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

/// Applies one action to the game, then runs the checking pass.
///
/// Safe to replay: applying the same action twice converges on the same
/// state (the `advance_cursor` counter is the one field that keeps moving,
/// and only its transitions are observed).
pub fn apply_action(game: &mut Game, action: &Action) -> Result<(), ApplyError> {
    match action {
        Action::ChangeInput {
            id,
            value,
            penciled,
            source,
            advance_cursor,
        } => {
            let len = game.board().len();
            let cell = game
                .board_mut()
                .cell_mut(*id)
                .ok_or(ApplyError::SquareOutOfBounds { id: *id, len })?;
            // Verified squares are immutable to typing; reveal has its own path.
            if !cell.verified {
                cell.input = value.clone();
                cell.penciled = *penciled;
                cell.initial = false;
                cell.source = Some(source.clone());
            }
            if *advance_cursor {
                game.bump_advance_cursor();
            }
        }
        Action::CheckSquare { id } => {
            request_check(game, &[*id])?;
        }
        Action::CheckWord { ids } => {
            request_check(game, ids)?;
        }
        Action::CheckPuzzle => {
            let all: Vec<usize> = (0..game.board().len()).collect();
            request_check(game, &all)?;
        }
        Action::RevealSquare { id } => {
            reveal(game, &[*id])?;
        }
        Action::RevealWord { ids } => {
            reveal(game, ids)?;
        }
        Action::RevealPuzzle => {
            let all: Vec<usize> = (0..game.board().len()).collect();
            reveal(game, &all)?;
        }
        Action::ResetGame => {
            game.reset_board();
        }
        Action::ToggleAutocheck => {
            game.toggle_autocheck();
        }
    }

    check::evaluate_checks(game);
    game.mark_dirty(action.label());
    Ok(())
}

/// Sets the one-shot check flag on targeted cells that have input.
fn request_check(game: &mut Game, ids: &[usize]) -> Result<(), ApplyError> {
    let len = game.board().len();
    for &id in ids {
        let cell = game
            .board_mut()
            .cell_mut(id)
            .ok_or(ApplyError::SquareOutOfBounds { id, len })?;
        if !cell.input.is_empty() {
            cell.check = true;
        }
    }
    Ok(())
}

/// Unconditionally fills in the stored answer, rebus-safe, and marks the
/// cell verified+revealed.
fn reveal(game: &mut Game, ids: &[usize]) -> Result<(), ApplyError> {
    let len = game.board().len();
    let (grid, board) = game.grid_and_board_mut();
    for &id in ids {
        let Some(square) = grid.square(id) else {
            return Err(ApplyError::SquareOutOfBounds { id, len });
        };
        if !square.is_playable {
            continue;
        }
        let answer = square.answer.clone();
        let cell = board
            .cell_mut(id)
            .ok_or(ApplyError::SquareOutOfBounds { id, len })?;
        cell.incorrect = false;
        cell.partial = false;
        cell.reveal = true;
        cell.verified = true;
        cell.input = answer;
        cell.initial = false;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
