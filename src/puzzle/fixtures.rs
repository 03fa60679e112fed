// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Small raw puzzles for tests and demo seeding.

use std::collections::BTreeSet;

use super::{RawAnswerLists, RawClueLists, RawPuzzle};
use crate::model::BLOCK;

/// 5x5 grid with blocks in the first and last corner.
///
/// Numbering: 1 at square 1 (across+down), 2..4 down-only, 5 at square 5,
/// across heads 6/7/8 down the left edge.
pub fn mini_5x5() -> RawPuzzle {
    synthesize("Mini", 5, 5, &BTreeSet::from([0, 24]))
}

/// Fully open 15x15 with a single block at square 5, so 1-Across spans
/// squares 0..=4.
pub fn open_15x15() -> RawPuzzle {
    synthesize("Open", 15, 15, &BTreeSet::from([5]))
}

/// 3x3 with a rebus square ("AM") in the top row.
pub fn rebus_3x3() -> RawPuzzle {
    RawPuzzle {
        title: "Rebus".to_owned(),
        author: "fixtures".to_owned(),
        date: "2026-01-01".to_owned(),
        num_rows: 3,
        num_cols: 3,
        grid: ["J", "AM", "B", "A", "I", "E", "M", "S", "D"]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        grid_nums: vec![1, 2, 3, 4, 0, 0, 5, 0, 0],
        clues: RawClueLists {
            across: vec![
                "1. Door frame part".to_owned(),
                "4. Cry of dismay".to_owned(),
                "5. Initials on the mailbox".to_owned(),
            ],
            down: vec![
                "1. Toast topper".to_owned(),
                "2. Friends, in Paris".to_owned(),
                "3. Place to sleep".to_owned(),
            ],
        },
        answers: RawAnswerLists {
            across: vec!["JAMB".to_owned(), "AIE".to_owned(), "MSD".to_owned()],
            down: vec!["JAM".to_owned(), "AMIS".to_owned(), "BED".to_owned()],
        },
        circles: Vec::new(),
    }
}

/// Builds a structurally consistent puzzle: letters cycle the alphabet,
/// numbering follows the standard scan rule, clue texts are generated.
///
/// This duplicates the numbering rule on purpose so compiler tests compare
/// two independent derivations.
fn synthesize(title: &str, num_rows: usize, num_cols: usize, blocks: &BTreeSet<usize>) -> RawPuzzle {
    let len = num_rows * num_cols;
    let letter = |id: usize| ((b'A' + (id % 26) as u8) as char).to_string();
    let grid: Vec<String> = (0..len)
        .map(|id| {
            if blocks.contains(&id) {
                BLOCK.to_owned()
            } else {
                letter(id)
            }
        })
        .collect();

    let mut grid_nums = vec![0u32; len];
    let mut across_clues = Vec::new();
    let mut across_answers = Vec::new();
    let mut down_clues = Vec::new();
    let mut down_answers = Vec::new();
    let mut next_num = 1u32;

    for id in 0..len {
        if blocks.contains(&id) {
            continue;
        }
        let row = id / num_cols;
        let col = id % num_cols;
        let across_start = col == 0 || blocks.contains(&(id - 1));
        let down_start = row == 0 || blocks.contains(&(id - num_cols));
        if !(across_start || down_start) {
            continue;
        }
        grid_nums[id] = next_num;
        if across_start {
            let mut answer = String::new();
            let mut j = id;
            while j / num_cols == row && !blocks.contains(&j) {
                answer.push_str(&grid[j]);
                j += 1;
            }
            across_clues.push(format!("{next_num}. Across word at square {id}"));
            across_answers.push(answer);
        }
        if down_start {
            let mut answer = String::new();
            let mut j = id;
            while j < len && !blocks.contains(&j) {
                answer.push_str(&grid[j]);
                j += num_cols;
            }
            down_clues.push(format!("{next_num}. Down word at square {id}"));
            down_answers.push(answer);
        }
        next_num += 1;
    }

    RawPuzzle {
        title: title.to_owned(),
        author: "fixtures".to_owned(),
        date: "2026-01-01".to_owned(),
        num_rows,
        num_cols,
        grid,
        grid_nums,
        clues: RawClueLists {
            across: across_clues,
            down: down_clues,
        },
        answers: RawAnswerLists {
            across: across_answers,
            down: down_answers,
        },
        circles: Vec::new(),
    }
}
