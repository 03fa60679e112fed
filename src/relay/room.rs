// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Room-based fan-out.
//!
//! One broadcast channel per game id. Broadcasts are atomic with respect to
//! the room's subscriber snapshot at send time; per-sender order is the
//! channel order, order across senders is arrival order.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::model::{ClientId, GameId};

use super::protocol::ServerMessage;

const ROOM_CHANNEL_CAPACITY: usize = 256;

/// A broadcast frame: the message plus the client it originated from, so
/// subscribers (and the forwarding task) can suppress echoes.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub source: ClientId,
    pub message: ServerMessage,
}

#[derive(Debug, Default)]
pub struct RoomManager {
    rooms: Mutex<HashMap<GameId, broadcast::Sender<Envelope>>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a game room, creating it on first join.
    pub fn join(&self, game_id: &GameId) -> broadcast::Receiver<Envelope> {
        let mut rooms = self.rooms.lock().expect("room registry poisoned");
        rooms
            .entry(game_id.clone())
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Sends to every current subscriber of the room. A room with no
    /// subscribers is dropped from the registry.
    pub fn broadcast(&self, game_id: &GameId, envelope: Envelope) {
        let mut rooms = self.rooms.lock().expect("room registry poisoned");
        let Some(sender) = rooms.get(game_id) else {
            return;
        };
        if sender.send(envelope).is_err() {
            rooms.remove(game_id);
        }
    }

    #[cfg(test)]
    fn room_count(&self) -> usize {
        self.rooms.lock().expect("room registry poisoned").len()
    }
}
