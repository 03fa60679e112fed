// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One client's replica of a shared game.
//!
//! A keystroke or menu command mutates the replica first, through the same
//! [`apply_action`] logic the relay replays everywhere else, and the produced
//! action is handed back for forwarding. Remote actions come in through
//! [`LocalClient::apply_remote`], which drops the client's own echoes by
//! source id. Focus movement is a reaction to `advance_cursor` transitions,
//! never part of the action itself.

use crate::model::{ClientId, Focus, Game, Orientation, PlayerId, PlayerProfile, PointOfView};
use crate::nav::{JumpDirection, Navigator};
use crate::ops::{apply_action, Action, ApplyError};

/// Local session state: the game replica plus this client's point of view.
#[derive(Debug, Clone)]
pub struct LocalClient {
    client_id: ClientId,
    player_id: PlayerId,
    game: Game,
    pov: PointOfView,
    seen_advance_cursor: u64,
}

impl LocalClient {
    pub fn new(client_id: ClientId, player_id: PlayerId, game: Game) -> Self {
        let default_focus = game.clues().default_focus();
        let nav = Navigator::new(game.grid(), game.clues());
        let word = nav.focused_word(default_focus, Orientation::Across);
        let pov = PointOfView::new(
            Focus::new(Orientation::Across, default_focus, word),
            default_focus,
        );
        let seen_advance_cursor = game.advance_cursor();
        Self {
            client_id,
            player_id,
            game,
            pov,
            seen_advance_cursor,
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn pov(&self) -> &PointOfView {
        &self.pov
    }

    pub fn focus(&self) -> &Focus {
        &self.pov.focused
    }

    /// Folds the durable profile into the view state, typically from the
    /// relay's `authenticated` reply: the player counts as verified when the
    /// profile matches this client's player id, and the profile's team games
    /// become the switchable session list.
    pub fn apply_profile(&mut self, profile: &PlayerProfile) {
        self.pov.player_verified = profile.player_id == self.player_id;
        self.pov.team_games = profile.team_games.iter().cloned().collect();
    }

    pub fn toggle_pencil(&mut self) {
        self.pov.pencil_active = !self.pov.pencil_active;
    }

    pub fn toggle_rebus(&mut self) {
        self.pov.rebus_active = !self.pov.rebus_active;
    }

    pub fn toggle_zoom(&mut self) {
        self.pov.zoom_active = !self.pov.zoom_active;
    }

    /// Moves focus to `square`, recomputing the word for the orientation.
    pub fn set_focus(&mut self, square: usize, orientation: Orientation) {
        let nav = Navigator::new(self.game.grid(), self.game.clues());
        let word = nav.focused_word(square, orientation);
        self.pov.focused = Focus::new(orientation, square, word);
    }

    /// Flips between across and down on the same square.
    pub fn toggle_orientation(&mut self) {
        let orientation = self.pov.focused.orientation.opposite();
        self.set_focus(self.pov.focused.square, orientation);
    }

    /// Types one character at the focused square.
    ///
    /// Returns the action to forward, or `None` when the square is verified
    /// (verified squares are immutable to typing). Rebus mode appends to the
    /// existing input and suspends auto-advance.
    pub fn type_char(&mut self, ch: char) -> Result<Option<Action>, ApplyError> {
        let id = self.pov.focused.square;
        let Some(cell) = self.game.board().cell(id) else {
            return Ok(None);
        };
        if cell.verified {
            return Ok(None);
        }

        let typed: String = ch.to_uppercase().collect();
        let (value, advance) = if self.pov.rebus_active {
            (format!("{}{}", cell.input, typed), false)
        } else {
            (typed, true)
        };
        let overwrite = !self.pov.rebus_active && !cell.input.is_empty();

        let action = Action::ChangeInput {
            id,
            value,
            penciled: self.pov.pencil_active,
            source: self.client_id.clone(),
            advance_cursor: advance,
        };
        apply_action(&mut self.game, &action)?;
        self.react_to_advance_cursor(overwrite, false);
        Ok(Some(action))
    }

    /// Backspace: clears the focused square if it holds unverified input,
    /// otherwise retreats and clears the square it lands on.
    pub fn backspace(&mut self) -> Result<Option<Action>, ApplyError> {
        let id = self.pov.focused.square;
        let focused = self.game.board().cell(id);
        let clear_here = focused.is_some_and(|cell| !cell.input.is_empty() && !cell.verified);

        let target = if clear_here {
            id
        } else {
            let nav = Navigator::new(self.game.grid(), self.game.clues());
            let back = nav.backspace_target(id, self.pov.focused.orientation);
            let orientation = self.pov.focused.orientation;
            self.set_focus(back, orientation);
            back
        };

        let open = self
            .game
            .board()
            .cell(target)
            .is_some_and(|cell| !cell.input.is_empty() && !cell.verified);
        if !open {
            return Ok(None);
        }
        let action = Action::ChangeInput {
            id: target,
            value: String::new(),
            penciled: self.pov.pencil_active,
            source: self.client_id.clone(),
            advance_cursor: false,
        };
        apply_action(&mut self.game, &action)?;
        Ok(Some(action))
    }

    /// Tab-style jump to the next/previous word's first fillable square.
    pub fn jump_word(&mut self, direction: JumpDirection) {
        let nav = Navigator::new(self.game.grid(), self.game.clues());
        let target = nav.jump_to_word(
            self.game.board(),
            self.pov.focused.orientation,
            self.pov.focused.square,
            direction,
            self.pov.default_focus,
        );
        let orientation = self.pov.focused.orientation;
        self.set_focus(target, orientation);
    }

    pub fn check_square(&mut self) -> Result<Action, ApplyError> {
        self.apply_local(Action::CheckSquare {
            id: self.pov.focused.square,
        })
    }

    pub fn check_word(&mut self) -> Result<Action, ApplyError> {
        self.apply_local(Action::CheckWord {
            ids: self.pov.focused.word.to_vec(),
        })
    }

    pub fn check_puzzle(&mut self) -> Result<Action, ApplyError> {
        self.apply_local(Action::CheckPuzzle)
    }

    pub fn reveal_square(&mut self) -> Result<Action, ApplyError> {
        self.apply_local(Action::RevealSquare {
            id: self.pov.focused.square,
        })
    }

    pub fn reveal_word(&mut self) -> Result<Action, ApplyError> {
        self.apply_local(Action::RevealWord {
            ids: self.pov.focused.word.to_vec(),
        })
    }

    pub fn reveal_puzzle(&mut self) -> Result<Action, ApplyError> {
        self.apply_local(Action::RevealPuzzle)
    }

    pub fn reset_game(&mut self) -> Result<Action, ApplyError> {
        self.apply_local(Action::ResetGame)
    }

    pub fn toggle_autocheck(&mut self) -> Result<Action, ApplyError> {
        self.apply_local(Action::ToggleAutocheck)
    }

    fn apply_local(&mut self, action: Action) -> Result<Action, ApplyError> {
        apply_action(&mut self.game, &action)?;
        Ok(action)
    }

    /// Replays a remote action into the replica. The client's own echo,
    /// tagged with its source id, is dropped.
    pub fn apply_remote(&mut self, source: &ClientId, action: &Action) -> Result<(), ApplyError> {
        if source == &self.client_id {
            return Ok(());
        }
        apply_action(&mut self.game, action)?;
        // Remote advance-cursor bumps are not this client's keystrokes; track
        // them so the next local transition is detected correctly.
        self.seen_advance_cursor = self.game.advance_cursor();
        Ok(())
    }

    /// Moves focus when (and only when) the advance counter transitioned.
    fn react_to_advance_cursor(&mut self, overwrite: bool, previous: bool) {
        let counter = self.game.advance_cursor();
        if counter == self.seen_advance_cursor {
            return;
        }
        self.seen_advance_cursor = counter;

        let nav = Navigator::new(self.game.grid(), self.game.clues());
        let target = nav.next_empty_square(
            self.game.board(),
            self.pov.focused.orientation,
            self.pov.focused.square,
            overwrite,
            previous,
            self.pov.default_focus,
        );
        let orientation = self.pov.focused.orientation;
        self.set_focus(target, orientation);
    }
}
