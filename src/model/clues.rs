// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::grid::Orientation;

/// One clue in an orientation's chain.
///
/// `index` is the square id of the word start. `prev_grid_num`/`next_grid_num`
/// link the clue to its neighbors in source order; `None` at either end of the
/// chain. Exactly one entry per orientation has `is_last_clue == true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    pub clue: String,
    pub answer: String,
    pub index: usize,
    pub prev_grid_num: Option<u32>,
    pub next_grid_num: Option<u32>,
    pub is_last_clue: bool,
}

/// Both orientations' clue chains, keyed by grid number.
///
/// Invariant: following `next_grid_num` from the smallest grid number visits
/// every word start exactly once and terminates at the `is_last_clue` entry;
/// the reverse holds for `prev_grid_num`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueDictionary {
    across: BTreeMap<u32, ClueEntry>,
    down: BTreeMap<u32, ClueEntry>,
}

impl ClueDictionary {
    pub fn new(across: BTreeMap<u32, ClueEntry>, down: BTreeMap<u32, ClueEntry>) -> Self {
        Self { across, down }
    }

    pub fn entries(&self, orientation: Orientation) -> &BTreeMap<u32, ClueEntry> {
        match orientation {
            Orientation::Across => &self.across,
            Orientation::Down => &self.down,
        }
    }

    pub(crate) fn entries_mut(&mut self, orientation: Orientation) -> &mut BTreeMap<u32, ClueEntry> {
        match orientation {
            Orientation::Across => &mut self.across,
            Orientation::Down => &mut self.down,
        }
    }

    pub fn entry(&self, orientation: Orientation, grid_num: u32) -> Option<&ClueEntry> {
        self.entries(orientation).get(&grid_num)
    }

    /// The smallest grid number in an orientation, i.e. the head of the chain.
    pub fn first_grid_num(&self, orientation: Orientation) -> Option<u32> {
        self.entries(orientation).keys().next().copied()
    }

    /// The square id a client focuses by default: the first across word start.
    pub fn default_focus(&self) -> usize {
        self.first_grid_num(Orientation::Across)
            .and_then(|grid_num| self.entry(Orientation::Across, grid_num))
            .map(|entry| entry.index)
            .unwrap_or(0)
    }
}
