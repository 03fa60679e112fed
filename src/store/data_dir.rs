// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{Dow, Game, GameId, PlayerId, PlayerProfile};
use crate::puzzle::CompiledPuzzle;

/// Whether writes opt into slower, best-effort durable persistence
/// (fsync/sync where supported).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteDurability {
    #[default]
    Fast,
    Durable,
}

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// The on-disk data directory. Every read is a fresh load and every write a
/// full-record replace: the relay holds no long-lived in-memory copy, so
/// concurrent writers race at whole-record granularity (last write wins).
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
    durability: WriteDurability,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::Fast,
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn game_path(&self, game_id: &GameId) -> PathBuf {
        self.root.join("games").join(format!("{game_id}.json"))
    }

    fn player_path(&self, player_id: &PlayerId) -> PathBuf {
        self.root.join("players").join(format!("{player_id}.json"))
    }

    fn puzzle_path(&self, dow: Dow) -> PathBuf {
        self.root.join("puzzles").join(format!("{dow}.json"))
    }

    pub fn load_game(&self, game_id: &GameId) -> Result<Option<Game>, StoreError> {
        read_json(&self.game_path(game_id))
    }

    pub fn save_game(&self, game: &Game) -> Result<(), StoreError> {
        write_json(&self.game_path(game.game_id()), game, self.durability)
    }

    pub fn load_player(&self, player_id: &PlayerId) -> Result<Option<PlayerProfile>, StoreError> {
        read_json(&self.player_path(player_id))
    }

    pub fn save_player(&self, profile: &PlayerProfile) -> Result<(), StoreError> {
        write_json(
            &self.player_path(&profile.player_id),
            profile,
            self.durability,
        )
    }

    pub fn load_puzzle(&self, dow: Dow) -> Result<Option<CompiledPuzzle>, StoreError> {
        read_json(&self.puzzle_path(dow))
    }

    pub fn save_puzzle(&self, dow: Dow, puzzle: &CompiledPuzzle) -> Result<(), StoreError> {
        write_json(&self.puzzle_path(dow), puzzle, self.durability)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

fn write_json<T: Serialize>(
    path: &Path,
    value: &T,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &json, durability)
}

/// Write-to-temp-then-rename so readers never observe a torn record.
fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"),
        });
    };
    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
        path: parent.to_path_buf(),
        source,
    })?;

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        });
    };
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".acrostic.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
