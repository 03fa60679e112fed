// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::Orientation;
use super::ids::GameId;

/// Square ids of one word; words rarely exceed 16 squares.
pub type WordSquares = SmallVec<[usize; 16]>;

/// Where one client's cursor sits: the focused square, the orientation, and
/// the ordered squares of the word containing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Focus {
    pub orientation: Orientation,
    pub square: usize,
    pub word: WordSquares,
}

impl Focus {
    pub fn new(orientation: Orientation, square: usize, word: WordSquares) -> Self {
        Self {
            orientation,
            square,
            word,
        }
    }
}

/// One client's local, unshared view state.
///
/// Derived from the shared `Game` plus local UI toggles; never persisted and
/// never sent over the wire (only the `Focus` inside it is shared, via
/// `focus-changed` messages). `player_verified` and `team_games` are folded
/// in from the durable profile after authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointOfView {
    pub focused: Focus,
    pub zoom_active: bool,
    pub rebus_active: bool,
    pub pencil_active: bool,
    pub player_verified: bool,
    pub default_focus: usize,
    pub team_games: Vec<GameId>,
}

impl PointOfView {
    pub fn new(focused: Focus, default_focus: usize) -> Self {
        Self {
            focused,
            zoom_active: false,
            rebus_active: false,
            pencil_active: false,
            player_verified: false,
            default_focus,
            team_games: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::{Focus, PointOfView};
    use crate::model::Orientation;

    #[test]
    fn pov_starts_with_all_toggles_off() {
        let focus = Focus::new(Orientation::Across, 0, smallvec![0, 1, 2]);
        let pov = PointOfView::new(focus, 0);
        assert!(!pov.zoom_active);
        assert!(!pov.rebus_active);
        assert!(!pov.pencil_active);
        assert!(pov.team_games.is_empty());
    }
}
