// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: grid, clues, board, game, and per-client view state.

pub mod board;
pub mod clues;
pub mod dow;
pub mod game;
pub mod grid;
pub mod ids;
pub mod pov;

pub use board::{Board, Cell};
pub use clues::{ClueDictionary, ClueEntry};
pub use dow::{Dow, ParseDowError};
pub use game::{Game, Player, PlayerProfile, PLAYER_PALETTE};
pub use grid::{Grid, GridError, Orientation, Square, BLOCK};
pub use ids::{ClientId, GameId, Id, IdError, PlayerId};
pub use pov::{Focus, PointOfView, WordSquares};
