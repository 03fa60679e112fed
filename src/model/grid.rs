// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The marker used for a black square in raw puzzle data.
pub const BLOCK: &str = ".";

/// Direction of a word in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Across,
    Down,
}

impl Orientation {
    pub fn opposite(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Across => f.write_str("across"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// One cell of the compiled grid. Immutable after compilation.
///
/// `answer` is one or more characters (`"."` marks a block); multi-character
/// answers are rebus squares. `grid_num` is the printed clue number, 0 when no
/// clue starts here. `circle` is decorative and never affects navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub id: usize,
    pub answer: String,
    pub grid_num: u32,
    pub is_playable: bool,
    pub across_start: bool,
    pub down_start: bool,
    pub circle: bool,
}

impl Square {
    pub fn is_block(&self) -> bool {
        self.answer == BLOCK
    }

    /// True when a word in `orientation` begins at this square.
    pub fn starts_word(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Across => self.across_start,
            Orientation::Down => self.down_start,
        }
    }
}

/// The compiled, immutable play grid in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    num_rows: usize,
    num_cols: usize,
    squares: Vec<Square>,
}

impl Grid {
    pub fn new(num_rows: usize, num_cols: usize, squares: Vec<Square>) -> Result<Self, GridError> {
        if num_rows == 0 || num_cols == 0 || squares.len() != num_rows * num_cols {
            return Err(GridError::SizeMismatch {
                num_rows,
                num_cols,
                squares: squares.len(),
            });
        }
        Ok(Self {
            num_rows,
            num_cols,
            squares,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn square(&self, id: usize) -> Option<&Square> {
        self.squares.get(id)
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn row(&self, id: usize) -> usize {
        id / self.num_cols
    }

    pub fn col(&self, id: usize) -> usize {
        id % self.num_cols
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    SizeMismatch {
        num_rows: usize,
        num_cols: usize,
        squares: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch {
                num_rows,
                num_cols,
                squares,
            } => write!(
                f,
                "grid size mismatch: {num_rows}x{num_cols} does not hold {squares} squares"
            ),
        }
    }
}

impl std::error::Error for GridError {}
