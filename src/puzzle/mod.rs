// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The puzzle-to-grid compiler.
//!
//! Turns a raw puzzle description (parallel arrays of cell answers, grid
//! numbers, and prefixed clue/answer lists) into a navigable [`Grid`] and a
//! chained [`ClueDictionary`]. Compilation is pure: the same input always
//! yields an identical output.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{ClueDictionary, ClueEntry, Grid, GridError, Orientation, Square, BLOCK};

pub mod fixtures;

/// Raw puzzle description as delivered by the daily puzzle feed.
///
/// `grid` holds one string per cell (`"."` for a block, several characters
/// for a rebus square); `grid_nums` is parallel to it. Each clue string is
/// prefixed with its number and a period, e.g. `"7. Greek letter"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPuzzle {
    pub title: String,
    pub author: String,
    pub date: String,
    pub num_rows: usize,
    pub num_cols: usize,
    pub grid: Vec<String>,
    pub grid_nums: Vec<u32>,
    pub clues: RawClueLists,
    pub answers: RawAnswerLists,
    #[serde(default)]
    pub circles: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClueLists {
    pub across: Vec<String>,
    pub down: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswerLists {
    pub across: Vec<String>,
    pub down: Vec<String>,
}

/// Compiler output plus the metadata the puzzle store keeps alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPuzzle {
    pub title: String,
    pub author: String,
    pub date: String,
    pub grid: Grid,
    pub clues: ClueDictionary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    GridSizeMismatch {
        num_rows: usize,
        num_cols: usize,
        cells: usize,
    },
    GridNumsSizeMismatch {
        cells: usize,
        grid_nums: usize,
    },
    CirclesSizeMismatch {
        cells: usize,
        circles: usize,
    },
    ClueCountMismatch {
        orientation: Orientation,
        clues: usize,
        answers: usize,
    },
    UnparsableClue {
        orientation: Orientation,
        clue: String,
    },
    DuplicateClueNumber {
        orientation: Orientation,
        grid_num: u32,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridSizeMismatch {
                num_rows,
                num_cols,
                cells,
            } => write!(
                f,
                "grid size mismatch: {num_rows}x{num_cols} but {cells} cells"
            ),
            Self::GridNumsSizeMismatch { cells, grid_nums } => write!(
                f,
                "gridNums size mismatch: {cells} cells but {grid_nums} grid numbers"
            ),
            Self::CirclesSizeMismatch { cells, circles } => write!(
                f,
                "circles size mismatch: {cells} cells but {circles} circle flags"
            ),
            Self::ClueCountMismatch {
                orientation,
                clues,
                answers,
            } => write!(
                f,
                "{orientation} clue/answer count mismatch: {clues} clues, {answers} answers"
            ),
            Self::UnparsableClue { orientation, clue } => write!(
                f,
                "cannot parse leading clue number of {orientation} clue {clue:?}"
            ),
            Self::DuplicateClueNumber {
                orientation,
                grid_num,
            } => write!(f, "duplicate {orientation} clue number {grid_num}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<GridError> for CompileError {
    fn from(err: GridError) -> Self {
        let GridError::SizeMismatch {
            num_rows,
            num_cols,
            squares,
        } = err;
        Self::GridSizeMismatch {
            num_rows,
            num_cols,
            cells: squares,
        }
    }
}

fn clue_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)\.\s*(.*)$").expect("static clue pattern"))
}

/// Compiles a raw puzzle into `(Grid, ClueDictionary)`.
pub fn compile(raw: &RawPuzzle) -> Result<CompiledPuzzle, CompileError> {
    let cells = raw.grid.len();
    if cells != raw.num_rows * raw.num_cols {
        return Err(CompileError::GridSizeMismatch {
            num_rows: raw.num_rows,
            num_cols: raw.num_cols,
            cells,
        });
    }
    if raw.grid_nums.len() != cells {
        return Err(CompileError::GridNumsSizeMismatch {
            cells,
            grid_nums: raw.grid_nums.len(),
        });
    }
    if !raw.circles.is_empty() && raw.circles.len() != cells {
        return Err(CompileError::CirclesSizeMismatch {
            cells,
            circles: raw.circles.len(),
        });
    }

    let across = chain_clues(
        Orientation::Across,
        &raw.clues.across,
        &raw.answers.across,
    )?;
    let down = chain_clues(Orientation::Down, &raw.clues.down, &raw.answers.down)?;
    let mut clues = ClueDictionary::new(across, down);

    let mut squares = Vec::with_capacity(cells);
    for (id, answer) in raw.grid.iter().enumerate() {
        let is_playable = answer != BLOCK;
        let col = id % raw.num_cols;
        let row = id / raw.num_cols;
        let across_start = is_playable && (col == 0 || raw.grid[id - 1] == BLOCK);
        let down_start = is_playable && (row == 0 || raw.grid[id - raw.num_cols] == BLOCK);
        let circle = raw.circles.get(id).is_some_and(|&flag| flag != 0);
        squares.push(Square {
            id,
            answer: answer.clone(),
            grid_num: raw.grid_nums[id],
            is_playable,
            across_start,
            down_start,
            circle,
        });
    }

    // Back-fill each word head's square id into the matching clue entry.
    for square in &squares {
        if square.grid_num == 0 {
            continue;
        }
        for orientation in [Orientation::Across, Orientation::Down] {
            if square.starts_word(orientation) {
                if let Some(entry) = clues
                    .entries_mut(orientation)
                    .get_mut(&square.grid_num)
                {
                    entry.index = square.id;
                }
            }
        }
    }

    let grid = Grid::new(raw.num_rows, raw.num_cols, squares)?;
    Ok(CompiledPuzzle {
        title: raw.title.clone(),
        author: raw.author.clone(),
        date: raw.date.clone(),
        grid,
        clues,
    })
}

/// Parses the prefixed clue list of one orientation and links the entries
/// into a prev/next chain in source order.
fn chain_clues(
    orientation: Orientation,
    clue_list: &[String],
    answer_list: &[String],
) -> Result<BTreeMap<u32, ClueEntry>, CompileError> {
    if clue_list.len() != answer_list.len() {
        return Err(CompileError::ClueCountMismatch {
            orientation,
            clues: clue_list.len(),
            answers: answer_list.len(),
        });
    }

    let pattern = clue_number_pattern();
    let mut parsed = Vec::with_capacity(clue_list.len());
    for (clue, answer) in clue_list.iter().zip(answer_list) {
        let captures = pattern
            .captures(clue)
            .ok_or_else(|| CompileError::UnparsableClue {
                orientation,
                clue: clue.clone(),
            })?;
        let grid_num: u32 =
            captures[1]
                .parse()
                .map_err(|_| CompileError::UnparsableClue {
                    orientation,
                    clue: clue.clone(),
                })?;
        parsed.push((grid_num, captures[2].to_owned(), answer.clone()));
    }

    let mut entries = BTreeMap::new();
    let last = parsed.len().checked_sub(1);
    for (position, (grid_num, clue, answer)) in parsed.iter().enumerate() {
        let prev_grid_num = position.checked_sub(1).map(|p| parsed[p].0);
        let next_grid_num = parsed.get(position + 1).map(|next| next.0);
        let entry = ClueEntry {
            clue: clue.clone(),
            answer: answer.clone(),
            index: 0,
            prev_grid_num,
            next_grid_num,
            is_last_clue: Some(position) == last,
        };
        if entries.insert(*grid_num, entry).is_some() {
            return Err(CompileError::DuplicateClueNumber {
                orientation,
                grid_num: *grid_num,
            });
        }
    }
    Ok(entries)
}
