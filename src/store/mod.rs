// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Durable persistence for games, players, and the daily puzzle rotation.
//!
//! The store is a hierarchical key/value layout on disk:
//! `games/<game_id>.json`, `players/<player_id>.json`, `puzzles/<dow>.json`.

pub mod data_dir;

pub use data_dir::{DataDir, StoreError, WriteDurability};
