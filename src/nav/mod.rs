// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Word-boundary and cursor navigation over a compiled grid.
//!
//! All functions here are pure over `(Grid, ClueDictionary, Board)`; the
//! transport and UI layers inject state instead of reaching for ambient
//! globals, which keeps every move decision unit-testable.

use std::collections::BTreeSet;

use crate::model::{Board, ClueDictionary, Grid, Orientation, WordSquares};

/// Which way a word jump travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpDirection {
    Next,
    Prev,
}

/// Borrowing view over a compiled puzzle, the seam the session store and the
/// client replica navigate through.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    grid: &'a Grid,
    clues: &'a ClueDictionary,
}

impl<'a> Navigator<'a> {
    pub fn new(grid: &'a Grid, clues: &'a ClueDictionary) -> Self {
        Self { grid, clues }
    }

    fn starts_word(&self, index: usize, orientation: Orientation) -> bool {
        self.grid
            .square(index)
            .is_some_and(|square| square.starts_word(orientation))
    }

    fn is_playable(&self, index: usize) -> bool {
        self.grid
            .square(index)
            .is_some_and(|square| square.is_playable)
    }

    /// First square of the word containing `index`.
    ///
    /// Idempotent: `word_start(word_start(i)) == word_start(i)`.
    pub fn word_start(&self, index: usize, orientation: Orientation) -> usize {
        let mut i = index;
        match orientation {
            Orientation::Across => {
                while i > 0 && !self.starts_word(i, orientation) {
                    i -= 1;
                }
            }
            Orientation::Down => {
                let cols = self.grid.num_cols();
                while i >= cols && !self.starts_word(i, orientation) {
                    i -= cols;
                }
            }
        }
        i
    }

    /// Last square of the word containing `index`.
    pub fn word_end(&self, index: usize, orientation: Orientation) -> usize {
        let cols = self.grid.num_cols();
        let mut i = index;
        match orientation {
            Orientation::Across => loop {
                if !self.is_playable(i) {
                    // Degenerate call on a corner block: nothing to back off to.
                    if i > 0 {
                        i -= 1;
                    }
                    break;
                }
                if i % cols == cols - 1 {
                    break;
                }
                i += 1;
            },
            Orientation::Down => loop {
                if !self.is_playable(i) {
                    if i >= cols {
                        i -= cols;
                    }
                    break;
                }
                if i + cols >= self.grid.len() {
                    break;
                }
                i += cols;
            },
        }
        i
    }

    /// Ordered square ids of the word containing `index`.
    pub fn focused_word(&self, index: usize, orientation: Orientation) -> WordSquares {
        let start = self.word_start(index, orientation);
        let end = self.word_end(index, orientation);
        let step = match orientation {
            Orientation::Across => 1,
            Orientation::Down => self.grid.num_cols(),
        };
        let mut word = WordSquares::new();
        let mut i = start;
        while i <= end {
            word.push(i);
            i += step;
        }
        word
    }

    fn word_grid_num(&self, index: usize, orientation: Orientation) -> Option<u32> {
        let start = self.word_start(index, orientation);
        self.grid
            .square(start)
            .map(|square| square.grid_num)
            .filter(|&grid_num| grid_num != 0)
    }

    /// Head square of the word after the one containing `index`, or the
    /// current word's own end when the chain runs out.
    pub fn next_word(&self, index: usize, orientation: Orientation) -> usize {
        self.word_grid_num(index, orientation)
            .and_then(|grid_num| self.clues.entry(orientation, grid_num))
            .and_then(|entry| entry.next_grid_num)
            .and_then(|next| self.clues.entry(orientation, next))
            .map(|entry| entry.index)
            .unwrap_or_else(|| self.word_end(index, orientation))
    }

    /// Head square of the word before the one containing `index`, or the
    /// current word's own start when the chain runs out.
    pub fn prev_word(&self, index: usize, orientation: Orientation) -> usize {
        self.word_grid_num(index, orientation)
            .and_then(|grid_num| self.clues.entry(orientation, grid_num))
            .and_then(|entry| entry.prev_grid_num)
            .and_then(|prev| self.clues.entry(orientation, prev))
            .map(|entry| entry.index)
            .unwrap_or_else(|| self.word_start(index, orientation))
    }

    /// True iff `index` is the very last square of the orientation's last
    /// clue, i.e. the literal end of the puzzle for forward advance.
    pub fn is_last_clue_square(&self, index: usize, orientation: Orientation) -> bool {
        let Some(grid_num) = self.word_grid_num(index, orientation) else {
            return false;
        };
        let Some(entry) = self.clues.entry(orientation, grid_num) else {
            return false;
        };
        entry.is_last_clue && index == self.word_end(index, orientation)
    }

    /// The square the cursor lands on after committing input at `index`.
    ///
    /// In overwrite mode the cursor advances one step regardless of
    /// occupancy; otherwise it scans the current word for an empty unverified
    /// square (forward first, then wrapping to the word start) and walks the
    /// clue chain word by word when the word is full. The walk is a bounded
    /// loop over visited word heads: once the full cycle is exhausted the
    /// cursor lands on `default_focus` instead of recursing forever.
    #[allow(clippy::too_many_arguments)]
    pub fn next_empty_square(
        &self,
        board: &Board,
        orientation: Orientation,
        index: usize,
        overwrite: bool,
        previous: bool,
        default_focus: usize,
    ) -> usize {
        if self.is_last_clue_square(index, orientation) {
            return index;
        }

        if overwrite {
            let step = match orientation {
                Orientation::Across => 1,
                Orientation::Down => self.grid.num_cols(),
            };
            let candidate = index + step;
            let open = candidate < self.grid.len()
                && self.is_playable(candidate)
                && board.cell(candidate).is_some_and(|cell| !cell.verified);
            if open {
                return candidate;
            }
            return self.next_word(index, orientation);
        }

        let mut current = index;
        let mut visited: BTreeSet<u32> = BTreeSet::new();
        loop {
            let Some(grid_num) = self.word_grid_num(current, orientation) else {
                return default_focus;
            };
            if !visited.insert(grid_num) {
                return default_focus;
            }

            let word = self.focused_word(current, orientation);
            let position = word.iter().position(|&id| id == current).unwrap_or(0);
            let (wrapped, forward) = word.split_at(position);
            let open = forward
                .iter()
                .chain(wrapped.iter())
                .copied()
                .find(|&id| {
                    board
                        .cell(id)
                        .is_some_and(|cell| cell.is_empty() && !cell.verified)
                });
            if let Some(id) = open {
                return id;
            }

            let target = if previous {
                self.prev_word(current, orientation)
            } else {
                self.next_word(current, orientation)
            };
            if target == current {
                return default_focus;
            }
            current = target;
        }
    }

    /// The square focus retreats to on Backspace.
    ///
    /// Across steps left skipping blocks and stops at square 0; down steps up
    /// a row inside the word and otherwise jumps to the previous word's end.
    pub fn backspace_target(&self, index: usize, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Across => {
                if index == 0 {
                    return 0;
                }
                let mut i = index - 1;
                while i > 0 && !self.is_playable(i) {
                    i -= 1;
                }
                i
            }
            Orientation::Down => {
                if !self.starts_word(index, orientation) {
                    return index - self.grid.num_cols();
                }
                let prev_head = self.prev_word(index, orientation);
                self.word_end(prev_head, orientation)
            }
        }
    }

    /// Resolves a Tab-style word jump, landing on the first fillable square
    /// of the target word rather than its head.
    pub fn jump_to_word(
        &self,
        board: &Board,
        orientation: Orientation,
        index: usize,
        direction: JumpDirection,
        default_focus: usize,
    ) -> usize {
        let target = match direction {
            JumpDirection::Next => self.next_word(index, orientation),
            JumpDirection::Prev => self.prev_word(index, orientation),
        };
        self.next_empty_square(
            board,
            orientation,
            target,
            false,
            direction == JumpDirection::Prev,
            default_focus,
        )
    }
}

#[cfg(test)]
mod tests;
