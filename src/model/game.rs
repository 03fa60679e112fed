// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::clues::ClueDictionary;
use super::dow::Dow;
use super::grid::Grid;
use super::ids::{GameId, PlayerId};
use super::pov::Focus;
use crate::puzzle::CompiledPuzzle;

/// Cursor colors handed out by join order. Colors are assigned as
/// `players.len() % PLAYER_PALETTE.len()` and never reclaimed from departed
/// players, so long churn can produce duplicates before eight concurrent
/// players exist.
pub const PLAYER_PALETTE: [&str; 8] = [
    "blue", "magenta", "violet", "green", "red", "cyan", "orange", "yellow",
];

/// A player as attached to one game.
///
/// Index 0 of `Game::players` is the creating player (`owner == true`).
/// Players are never removed from the list, only marked offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub color: String,
    pub owner: bool,
    pub online: bool,
    pub current_focus: Option<Focus>,
}

/// The durable player profile stored at `players/<player_id>.json`.
///
/// `owner_games` maps a day-of-week to the game this player created for it;
/// `team_games` lists every game the player has joined as a team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: PlayerId,
    pub display_name: String,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub owner_games: BTreeMap<Dow, GameId>,
    #[serde(default)]
    pub team_games: BTreeSet<GameId>,
}

impl PlayerProfile {
    pub fn new(player_id: PlayerId, display_name: String, photo_url: Option<String>) -> Self {
        Self {
            player_id,
            display_name,
            photo_url,
            owner_games: BTreeMap::new(),
            team_games: BTreeSet::new(),
        }
    }
}

/// The authoritative, shared state of one puzzle session.
///
/// Mutation happens only through the named actions in [`crate::ops`] and the
/// presence methods below; fields are private so nothing outside the session
/// store can assign them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    game_id: GameId,
    num_rows: usize,
    num_cols: usize,
    grid: Grid,
    clues: ClueDictionary,
    board: Board,
    players: Vec<Player>,
    autocheck: bool,
    advance_cursor: u64,
    saved_to_db: bool,
    most_recent_action: Option<String>,
}

impl Game {
    pub fn new(game_id: GameId, puzzle: &CompiledPuzzle) -> Self {
        let grid = puzzle.grid.clone();
        let board = Board::new(grid.len());
        Self {
            game_id,
            num_rows: grid.num_rows(),
            num_cols: grid.num_cols(),
            grid,
            clues: puzzle.clues.clone(),
            board,
            players: Vec::new(),
            autocheck: false,
            advance_cursor: 0,
            saved_to_db: true,
            most_recent_action: None,
        }
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn clues(&self) -> &ClueDictionary {
        &self.clues
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| &player.player_id == player_id)
    }

    pub fn autocheck(&self) -> bool {
        self.autocheck
    }

    pub fn advance_cursor(&self) -> u64 {
        self.advance_cursor
    }

    pub fn saved_to_db(&self) -> bool {
        self.saved_to_db
    }

    pub fn most_recent_action(&self) -> Option<&str> {
        self.most_recent_action.as_deref()
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn grid_and_board_mut(&mut self) -> (&Grid, &mut Board) {
        (&self.grid, &mut self.board)
    }

    pub(crate) fn toggle_autocheck(&mut self) {
        self.autocheck = !self.autocheck;
    }

    pub(crate) fn bump_advance_cursor(&mut self) {
        self.advance_cursor += 1;
    }

    pub(crate) fn reset_board(&mut self) {
        self.board = Board::new(self.grid.len());
    }

    pub(crate) fn mark_dirty(&mut self, action: &str) {
        self.saved_to_db = false;
        self.most_recent_action = Some(action.to_owned());
    }

    pub fn mark_saved(&mut self) {
        self.saved_to_db = true;
    }

    /// Replaces the play surface wholesale (the `persist-board` path).
    pub fn replace_board(&mut self, board: Board, autocheck: bool) {
        self.board = board;
        self.autocheck = autocheck;
    }

    /// Attaches a player to this game, or marks a returning player online.
    ///
    /// The first player to ever join is the owner. Returns the player's
    /// assigned color.
    pub fn add_player(
        &mut self,
        player_id: PlayerId,
        display_name: String,
        photo_url: Option<String>,
    ) -> String {
        if let Some(player) = self
            .players
            .iter_mut()
            .find(|player| player.player_id == player_id)
        {
            player.online = true;
            player.display_name = display_name;
            player.photo_url = photo_url;
            return player.color.clone();
        }

        let color = PLAYER_PALETTE[self.players.len() % PLAYER_PALETTE.len()].to_owned();
        self.players.push(Player {
            player_id,
            display_name,
            photo_url,
            color: color.clone(),
            owner: self.players.is_empty(),
            online: true,
            current_focus: None,
        });
        color
    }

    /// Moves a player's cursor highlight to `focus`, repainting that player's
    /// color onto the focused word and letter.
    pub fn set_player_focus(&mut self, player_id: &PlayerId, focus: Focus) {
        let Some(position) = self
            .players
            .iter()
            .position(|player| &player.player_id == player_id)
        else {
            return;
        };
        let color = self.players[position].color.clone();

        for cell in self.board.cells_mut() {
            cell.strip_color(&color);
        }
        for &id in &focus.word {
            if let Some(cell) = self.board.cell_mut(id) {
                cell.active_word_colors.insert(color.clone());
            }
        }
        if let Some(cell) = self.board.cell_mut(focus.square) {
            cell.active_letter_colors.insert(color.clone());
        }

        self.players[position].current_focus = Some(focus);
    }

    /// Marks a player offline and strips their cursor color from every cell.
    pub fn remove_player(&mut self, player_id: &PlayerId) {
        let Some(player) = self
            .players
            .iter_mut()
            .find(|player| &player.player_id == player_id)
        else {
            return;
        };
        player.online = false;
        player.current_focus = None;
        let color = player.color.clone();
        for cell in self.board.cells_mut() {
            cell.strip_color(&color);
        }
    }
}
