// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::ClientId;

/// Per-square mutable play state.
///
/// `input` may be multi-character for rebus squares. `verified`, `incorrect`
/// and `partial` are mutually exclusive check outcomes; `penciled` and
/// `reveal` are independent flags. `check` is a one-shot check request that
/// the answer-checking pass consumes. `source` records the client that last
/// wrote the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub input: String,
    pub penciled: bool,
    pub reveal: bool,
    pub verified: bool,
    pub incorrect: bool,
    pub partial: bool,
    pub check: bool,
    pub initial: bool,
    pub color: Option<String>,
    pub active_word_colors: BTreeSet<String>,
    pub active_letter_colors: BTreeSet<String>,
    pub source: Option<ClientId>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            input: String::new(),
            penciled: false,
            reveal: false,
            verified: false,
            incorrect: false,
            partial: false,
            check: false,
            initial: true,
            color: None,
            active_word_colors: BTreeSet::new(),
            active_letter_colors: BTreeSet::new(),
            source: None,
        }
    }
}

impl Cell {
    /// A square is open to the cursor when it has no committed input yet.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub(crate) fn strip_color(&mut self, color: &str) {
        self.active_word_colors.remove(color);
        self.active_letter_colors.remove(color);
    }
}

/// The shared play surface: one `Cell` per grid square, row-major.
///
/// Invariant: `len() == num_rows * num_cols == grid.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![Cell::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn cell_mut(&mut self, id: usize) -> Option<&mut Cell> {
        self.cells.get_mut(id)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}
